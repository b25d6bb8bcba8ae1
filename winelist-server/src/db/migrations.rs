//! Schema migrations for the wines table
//!
//! Every statement is idempotent, so `run` is safe on each start.

use sqlx::PgPool;

use crate::models::MAX_SHORT_TEXT_LEN;

/// Run all migrations
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running winelist migrations...");

    sqlx::query(&create_wines_table())
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_wines_created_at
        ON wines (created_at DESC, id DESC)
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Migrations complete");
    Ok(())
}

/// Column widths follow the validated input limits.
fn create_wines_table() -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS wines (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR({max}) NOT NULL,
            price VARCHAR({max}) NOT NULL,
            varietal VARCHAR({max}) NOT NULL,
            description TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        max = MAX_SHORT_TEXT_LEN
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_ddl_uses_input_limit() {
        let ddl = create_wines_table();
        assert!(ddl.contains("IF NOT EXISTS wines"));
        assert!(ddl.contains(&format!("name VARCHAR({})", MAX_SHORT_TEXT_LEN)));
        assert!(ddl.contains("description TEXT NOT NULL"));
        assert!(ddl.contains("DEFAULT NOW()"));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn migrations_are_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool creation failed");

        run(&pool).await.expect("first run");
        run(&pool).await.expect("second run");
    }
}
