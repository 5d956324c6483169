//! Seed script for development: populates a fresh database with sample data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` (reads .env).

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const DEMO_PASSWORD: &str = "Rehab123!";
const THERAPIST_EMAIL: &str = "therapist@clinic.local";
const PATIENT_EMAIL: &str = "patient@clinic.local";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL")?;
    let pool = rehab_api::db::create_pool(&db_url, 5).await?;

    rehab_api::db::run_migrations(&pool).await?;

    println!("=== Rehab API Seed Script ===");

    let therapist_id = seed_user(&pool, THERAPIST_EMAIL, "THERAPIST").await?;
    let patient_id = seed_user(&pool, PATIENT_EMAIL, "PATIENT").await?;
    let protocol_ids = seed_protocols(&pool, therapist_id).await?;
    seed_sessions(&pool, patient_id, &protocol_ids).await?;

    println!("\n=== Seed complete! ===");
    println!("Therapist login: {THERAPIST_EMAIL} / {DEMO_PASSWORD}");
    println!("Patient login:   {PATIENT_EMAIL} / {DEMO_PASSWORD}");

    Ok(())
}

async fn seed_user(pool: &PgPool, email: &str, role: &str) -> anyhow::Result<Uuid> {
    let hash = rehab_api::services::auth::hash_password(DEMO_PASSWORD)?;

    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (email, password_hash, role)
         VALUES ($1, $2, $3::user_role)
         ON CONFLICT (email) DO UPDATE SET password_hash = EXCLUDED.password_hash
         RETURNING id",
    )
    .bind(email)
    .bind(&hash)
    .bind(role)
    .fetch_one(pool)
    .await?;

    println!("[done] {role} account {email}");
    Ok(id)
}

async fn seed_protocols(pool: &PgPool, therapist_id: Uuid) -> anyhow::Result<Vec<Uuid>> {
    let existing: Vec<Uuid> =
        sqlx::query_scalar("SELECT id FROM protocols WHERE therapist_id = $1 ORDER BY created_at")
            .bind(therapist_id)
            .fetch_all(pool)
            .await?;

    if !existing.is_empty() {
        println!("[skip] Protocols already exist ({})", existing.len());
        return Ok(existing);
    }

    let protocols = [
        ("Elbow Mobility", "Bicep Curl", 3, 10),
        ("Shoulder Post-op", "Shoulder Extension", 4, 8),
        ("Knee Rehab V2", "Wall Squat", 3, 12),
    ];

    let mut ids = Vec::with_capacity(protocols.len());
    for (name, exercise, sets, reps) in protocols {
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO protocols (therapist_id, name, exercise, sets, reps)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(therapist_id)
        .bind(name)
        .bind(exercise)
        .bind(sets)
        .bind(reps)
        .fetch_one(pool)
        .await?;
        ids.push(id);
    }

    println!("[done] Created {} protocols", ids.len());
    Ok(ids)
}

async fn seed_sessions(pool: &PgPool, patient_id: Uuid, protocol_ids: &[Uuid]) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE patient_id = $1")
        .bind(patient_id)
        .fetch_one(pool)
        .await?;

    if count > 0 || protocol_ids.is_empty() {
        println!("[skip] Sessions already exist ({count})");
        return Ok(());
    }

    // Two weeks of history, one or two workouts a day.
    let now = Utc::now();
    let mut created = 0;
    for day in 0..14i64 {
        let per_day = if day % 3 == 0 { 2 } else { 1 };
        for slot in 0..per_day {
            let protocol_id = protocol_ids[(day as usize + slot) % protocol_ids.len()];
            let performed_at = now - Duration::days(14 - day) + Duration::hours(slot as i64 * 6);
            let quality = 70.0 + ((day * 7 + slot as i64 * 3) % 28) as f64;
            sqlx::query(
                "INSERT INTO sessions (patient_id, protocol_id, completed, quality_score, performed_at)
                 VALUES ($1, $2, true, $3, $4)",
            )
            .bind(patient_id)
            .bind(protocol_id)
            .bind(quality)
            .bind(performed_at)
            .execute(pool)
            .await?;
            created += 1;
        }
    }

    println!("[done] Created {created} sessions");
    Ok(())
}
