//! Per-patient workout statistics: totals, accuracy and a per-day activity series.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::protocol::prescribed_reps;

/// Estimated active time per repetition.
const SECONDS_PER_REP: i64 = 5;

/// Aggregated statistics returned by `GET /api/user/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_workouts: i64,
    pub total_reps: i64,
    pub total_minutes: i64,
    pub accuracy: i64,
    pub graph_data: Vec<DailyActivity>,
}

/// Repetitions performed on one UTC calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub reps: i64,
}

/// A completed session joined with its protocol, if the protocol still exists.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CompletedSession {
    pub performed_at: DateTime<Utc>,
    pub quality_score: Option<f64>,
    pub protocol_sets: Option<i32>,
    pub protocol_reps: Option<i32>,
}

impl CompletedSession {
    /// Prescribed repetitions, or zero when the protocol reference is unresolved.
    pub fn reps(&self) -> i64 {
        match (self.protocol_sets, self.protocol_reps) {
            (Some(sets), Some(reps)) => prescribed_reps(sets, reps),
            _ => 0,
        }
    }
}

/// Load and summarise every completed session of `user_id`.
pub async fn get_user_stats(pool: &PgPool, user_id: Uuid) -> Result<UserStats, AppError> {
    let sessions = fetch_completed_sessions(pool, user_id).await?;
    tracing::debug!(%user_id, sessions = sessions.len(), "Aggregating session statistics");
    Ok(aggregate(&sessions))
}

/// Completed sessions in ascending `performed_at` order.
async fn fetch_completed_sessions(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<CompletedSession>, AppError> {
    let rows = sqlx::query_as::<_, CompletedSession>(
        r#"
        SELECT
            s.performed_at,
            s.quality_score,
            p.sets AS protocol_sets,
            p.reps AS protocol_reps
        FROM sessions s
        LEFT JOIN protocols p ON p.id = s.protocol_id
        WHERE s.patient_id = $1 AND s.completed = true
        ORDER BY s.performed_at ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Reduce sessions into summary statistics in a single pass.
///
/// Days appear in `graph_data` in the order they are first seen. Accuracy is the
/// quality sum divided by all workouts, including those without a score.
pub fn aggregate(sessions: &[CompletedSession]) -> UserStats {
    let mut total_workouts: i64 = 0;
    let mut total_reps: i64 = 0;
    let mut quality_sum: f64 = 0.0;
    let mut graph_data: Vec<DailyActivity> = Vec::new();
    let mut day_slots: HashMap<NaiveDate, usize> = HashMap::new();

    for session in sessions {
        total_workouts += 1;

        let reps = session.reps();
        total_reps = total_reps.saturating_add(reps);

        if let Some(score) = session.quality_score.filter(|s| s.is_finite()) {
            quality_sum += score;
        }

        let date = session.performed_at.date_naive();
        let slot = *day_slots.entry(date).or_insert_with(|| {
            graph_data.push(DailyActivity { date, reps: 0 });
            graph_data.len() - 1
        });
        graph_data[slot].reps = graph_data[slot].reps.saturating_add(reps);
    }

    let accuracy = if total_workouts > 0 {
        round_half_up(quality_sum / total_workouts as f64) as i64
    } else {
        0
    };

    // round(reps * 5 / 60) on non-negative integers
    let total_minutes = total_reps
        .saturating_mul(SECONDS_PER_REP)
        .saturating_add(30)
        / 60;

    UserStats {
        total_workouts,
        total_reps,
        total_minutes,
        accuracy,
        graph_data,
    }
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn session(
        performed_at: DateTime<Utc>,
        protocol: Option<(i32, i32)>,
        quality_score: Option<f64>,
    ) -> CompletedSession {
        CompletedSession {
            performed_at,
            quality_score,
            protocol_sets: protocol.map(|(sets, _)| sets),
            protocol_reps: protocol.map(|(_, reps)| reps),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_history_yields_zeroes() {
        let stats = aggregate(&[]);
        assert_eq!(
            stats,
            UserStats {
                total_workouts: 0,
                total_reps: 0,
                total_minutes: 0,
                accuracy: 0,
                graph_data: Vec::new(),
            }
        );
    }

    #[test]
    fn reps_are_sets_times_reps() {
        let stats = aggregate(&[session(at(2025, 3, 1, 9, 0), Some((3, 10)), Some(90.0))]);
        assert_eq!(stats.total_workouts, 1);
        assert_eq!(stats.total_reps, 30);
        assert_eq!(stats.total_minutes, 3);
        assert_eq!(
            stats.graph_data,
            vec![DailyActivity {
                date: day(2025, 3, 1),
                reps: 30
            }]
        );
    }

    #[test]
    fn accuracy_is_mean_quality() {
        let stats = aggregate(&[
            session(at(2025, 3, 1, 9, 0), Some((3, 10)), Some(80.0)),
            session(at(2025, 3, 2, 9, 0), Some((3, 10)), Some(90.0)),
        ]);
        assert_eq!(stats.accuracy, 85);
    }

    #[test]
    fn accuracy_rounds_half_up() {
        let stats = aggregate(&[
            session(at(2025, 3, 1, 9, 0), None, Some(85.0)),
            session(at(2025, 3, 1, 10, 0), None, Some(86.0)),
        ]);
        assert_eq!(stats.accuracy, 86);
    }

    #[test]
    fn unscored_session_still_counts_in_denominator() {
        let stats = aggregate(&[
            session(at(2025, 3, 1, 9, 0), Some((2, 5)), Some(90.0)),
            session(at(2025, 3, 2, 9, 0), Some((2, 5)), None),
        ]);
        assert_eq!(stats.total_workouts, 2);
        assert_eq!(stats.accuracy, 45);
    }

    #[test]
    fn same_day_sessions_share_one_bucket() {
        let stats = aggregate(&[
            session(at(2025, 3, 1, 8, 0), Some((3, 10)), None),
            session(at(2025, 3, 1, 18, 30), Some((2, 8)), None),
        ]);
        assert_eq!(
            stats.graph_data,
            vec![DailyActivity {
                date: day(2025, 3, 1),
                reps: 46
            }]
        );
    }

    #[test]
    fn buckets_split_on_utc_midnight() {
        let stats = aggregate(&[
            session(
                Utc.with_ymd_and_hms(2025, 3, 1, 23, 59, 59).unwrap(),
                Some((1, 4)),
                None,
            ),
            session(
                Utc.with_ymd_and_hms(2025, 3, 2, 0, 0, 1).unwrap(),
                Some((1, 6)),
                None,
            ),
        ]);
        let dates: Vec<NaiveDate> = stats.graph_data.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![day(2025, 3, 1), day(2025, 3, 2)]);
    }

    #[test]
    fn unresolved_protocol_contributes_zero_reps() {
        let stats = aggregate(&[
            session(at(2025, 3, 1, 9, 0), Some((3, 10)), Some(70.0)),
            session(at(2025, 3, 4, 9, 0), None, Some(70.0)),
        ]);
        assert_eq!(stats.total_workouts, 2);
        assert_eq!(stats.total_reps, 30);
        assert_eq!(
            stats.graph_data,
            vec![
                DailyActivity {
                    date: day(2025, 3, 1),
                    reps: 30
                },
                DailyActivity {
                    date: day(2025, 3, 4),
                    reps: 0
                },
            ]
        );
    }

    #[test]
    fn days_keep_first_seen_order() {
        let stats = aggregate(&[
            session(at(2025, 3, 5, 9, 0), Some((1, 1)), None),
            session(at(2025, 3, 2, 9, 0), Some((1, 2)), None),
            session(at(2025, 3, 5, 12, 0), Some((1, 3)), None),
        ]);
        assert_eq!(
            stats.graph_data,
            vec![
                DailyActivity {
                    date: day(2025, 3, 5),
                    reps: 4
                },
                DailyActivity {
                    date: day(2025, 3, 2),
                    reps: 2
                },
            ]
        );
    }

    #[test]
    fn minutes_round_half_up() {
        // 6 reps * 5s = 30s = 0.5 min
        let stats = aggregate(&[session(at(2025, 3, 1, 9, 0), Some((2, 3)), None)]);
        assert_eq!(stats.total_minutes, 1);

        // 5 reps * 5s = 25s
        let stats = aggregate(&[session(at(2025, 3, 1, 9, 0), Some((1, 5)), None)]);
        assert_eq!(stats.total_minutes, 0);
    }

    #[test]
    fn extreme_prescriptions_saturate() {
        let huge = session(at(2025, 3, 1, 9, 0), Some((i32::MAX, i32::MAX)), Some(50.0));
        let per_session = i64::from(i32::MAX) * i64::from(i32::MAX);

        let stats = aggregate(std::slice::from_ref(&huge));
        assert_eq!(stats.total_reps, per_session);
        assert_eq!(stats.total_minutes, i64::MAX / 60);

        let stats = aggregate(&[huge.clone(), huge.clone(), huge.clone()]);
        assert_eq!(stats.total_workouts, 3);
        assert_eq!(stats.total_reps, i64::MAX);
        assert_eq!(stats.graph_data[0].reps, i64::MAX);
        assert_eq!(stats.accuracy, 50);
    }

    #[test]
    fn repeated_aggregation_is_identical() {
        let sessions = vec![
            session(at(2025, 3, 1, 9, 0), Some((3, 10)), Some(80.0)),
            session(at(2025, 3, 1, 17, 0), None, None),
            session(at(2025, 3, 3, 9, 0), Some((4, 8)), Some(95.5)),
        ];
        let first = serde_json::to_string(&aggregate(&sessions)).unwrap();
        let second = serde_json::to_string(&aggregate(&sessions)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn serializes_dates_as_plain_days() {
        let stats = aggregate(&[session(at(2025, 12, 10, 9, 0), Some((3, 10)), Some(88.0))]);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["graph_data"][0]["date"], "2025-12-10");
        assert_eq!(json["graph_data"][0]["reps"], 30);
        assert_eq!(json["accuracy"], 88);
        assert_eq!(json["total_minutes"], 3);
    }
}
