use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create operator table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS operator (
            id VARCHAR(255) PRIMARY KEY,
            operator_name VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT operator_name_key UNIQUE (operator_name)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create booking table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS booking (
            booking_id VARCHAR(255) PRIMARY KEY,
            operator_id VARCHAR(255) NOT NULL REFERENCES operator(id),
            status VARCHAR(100) NOT NULL,
            booking_date DATE NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            is_rescheduled BOOLEAN NOT NULL DEFAULT FALSE,
            is_cancelled BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_status CHECK (status IN ('booked', 'cancelled')),
            CONSTRAINT one_hour_window CHECK (
                end_time - start_time = INTERVAL '1 hour'
                OR (start_time = TIME '23:00:00' AND end_time = TIME '00:00:00')
            )
        );
        "#,
    )
    .execute(pool)
    .await?;

    // At most one live booking per operator and window. Writers rely on this
    // index to reject double bookings atomically.
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS booking_active_slot_idx
            ON booking (operator_id, booking_date, start_time, end_time)
            WHERE status = 'booked';
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query("CREATE INDEX IF NOT EXISTS booking_operator_id_idx ON booking(operator_id)")
        .execute(pool)
        .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS booking_operator_date_idx ON booking(operator_id, booking_date)",
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
