//! Wine repository
//!
//! - create / replace / update: single statement with RETURNING
//! - list: window function for the total (no second query on a full page)
//! - get / replace / update / delete: missing rows become `DbError::NotFound`

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Row};

use super::DbError;
use crate::models::{NewWine, Paginated, Pagination, WinePatch};

const RESOURCE: &str = "wine";

/// Wine record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Wine {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub varietal: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Wine repository
pub struct WineRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> WineRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a wine; `id` and `created_at` come from column defaults.
    pub async fn create(&self, wine: &NewWine) -> Result<Wine, DbError> {
        let created: Wine = sqlx::query_as(
            r#"
            INSERT INTO wines (name, price, varietal, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, price, varietal, description, created_at
            "#,
        )
        .bind(&wine.name)
        .bind(&wine.price)
        .bind(&wine.varietal)
        .bind(&wine.description)
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(id = created.id, "wine created");
        Ok(created)
    }

    /// List wines, newest first.
    pub async fn list(&self, page: Pagination) -> Result<Paginated<Wine>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                id, name, price, varietal, description, created_at,
                COUNT(*) OVER() AS total
            FROM wines
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        // The window total is only visible on rows; past the last page ask directly
        let total = match rows.first() {
            Some(row) => row.try_get::<i64, _>("total")?,
            None if page.page > 1 => self.count().await?,
            None => 0,
        };

        let items = rows
            .iter()
            .map(Wine::from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated {
            items,
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    /// Total number of wines.
    pub async fn count(&self) -> Result<i64, DbError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM wines")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Get a single wine by id.
    pub async fn get(&self, id: i64) -> Result<Wine, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, name, price, varietal, description, created_at
            FROM wines
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| not_found(id))
    }

    /// Overwrite every user-supplied field (PUT).
    pub async fn replace(&self, id: i64, wine: &NewWine) -> Result<Wine, DbError> {
        sqlx::query_as(
            r#"
            UPDATE wines
            SET name = $2, price = $3, varietal = $4, description = $5
            WHERE id = $1
            RETURNING id, name, price, varietal, description, created_at
            "#,
        )
        .bind(id)
        .bind(&wine.name)
        .bind(&wine.price)
        .bind(&wine.varietal)
        .bind(&wine.description)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| not_found(id))
    }

    /// Apply only the fields present in the patch (PATCH).
    ///
    /// An empty patch still round-trips so the caller gets the current row
    /// or a NotFound.
    pub async fn update(&self, id: i64, patch: &WinePatch) -> Result<Wine, DbError> {
        if patch.is_empty() {
            return self.get(id).await;
        }

        sqlx::query_as(
            r#"
            UPDATE wines
            SET name = COALESCE($2, name),
                price = COALESCE($3, price),
                varietal = COALESCE($4, varietal),
                description = COALESCE($5, description)
            WHERE id = $1
            RETURNING id, name, price, varietal, description, created_at
            "#,
        )
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.price.as_deref())
        .bind(patch.varietal.as_deref())
        .bind(patch.description.as_deref())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| not_found(id))
    }

    /// Delete a wine. Deleting a missing id is a NotFound, not a no-op.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM wines WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tracing::debug!(id, "wine deleted");
        Ok(())
    }
}

fn not_found(id: i64) -> DbError {
    DbError::NotFound {
        resource: RESOURCE,
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations};

    // Run with: DATABASE_URL=postgres://... cargo test -p winelist-server -- --ignored

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        pool
    }

    fn sample(name: &str) -> NewWine {
        NewWine {
            name: name.to_string(),
            price: "$42".to_string(),
            varietal: "Nebbiolo".to_string(),
            description: "Tar and roses.".to_string(),
        }
    }

    #[test]
    fn not_found_carries_id() {
        let err = not_found(17);
        assert_eq!(err.to_string(), "not found: wine '17'");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_assigns_id_and_timestamp() {
        let pool = test_pool().await;
        let repo = WineRepo::new(&pool);

        let before = Utc::now();
        let wine = repo.create(&sample("Barolo")).await.unwrap();

        assert!(wine.id > 0);
        assert!(wine.created_at >= before - chrono::Duration::seconds(5));
        assert_eq!(repo.get(wine.id).await.unwrap(), wine);

        repo.delete(wine.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn patch_keeps_untouched_fields() {
        let pool = test_pool().await;
        let repo = WineRepo::new(&pool);
        let wine = repo.create(&sample("Barbaresco")).await.unwrap();

        let patch = WinePatch {
            price: Some("$55".to_string()),
            ..WinePatch::default()
        };
        let updated = repo.update(wine.id, &patch).await.unwrap();

        assert_eq!(updated.price, "$55");
        assert_eq!(updated.name, "Barbaresco");
        assert_eq!(updated.created_at, wine.created_at);

        repo.delete(wine.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_twice_is_not_found() {
        let pool = test_pool().await;
        let repo = WineRepo::new(&pool);
        let wine = repo.create(&sample("Gattinara")).await.unwrap();

        repo.delete(wine.id).await.unwrap();
        let err = repo.delete(wine.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
        assert!(matches!(repo.get(wine.id).await, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn list_past_last_page_reports_total() {
        let pool = test_pool().await;
        let repo = WineRepo::new(&pool);
        let wine = repo.create(&sample("Ghemme")).await.unwrap();

        let page = repo.list(Pagination::new(100_000, 100)).await.unwrap();
        assert!(page.items.is_empty());
        assert!(page.total >= 1);

        repo.delete(wine.id).await.unwrap();
    }
}
