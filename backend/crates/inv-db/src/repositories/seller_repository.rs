use crate::Result as DbErrorResult;

use inv_core::{TenantId, UserId};

use sqlx::{Row, SqlitePool};

/// Display details of the user who recorded a sale.
#[derive(Debug, Clone, PartialEq)]
pub struct SellerProfile {
    pub user_id: UserId,
    pub name: String,
    /// None when the user has no branch
    pub branch_name: Option<String>,
    pub company_id: Option<TenantId>,
}

pub struct SellerRepository {
    pool: SqlitePool,
}

impl SellerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_profile(&self, user_id: UserId) -> DbErrorResult<Option<SellerProfile>> {
        let row = sqlx::query(
            r#"
              SELECT u.id, u.name, b.name AS branch_name, b.company_id
              FROM users u
              LEFT JOIN branches b ON b.id = u.branch_id
              WHERE u.id = ?
              "#,
        )
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await?;

        let Some(r) = row else {
            return Ok(None);
        };

        let company_id: Option<i64> = r.try_get("company_id")?;

        Ok(Some(SellerProfile {
            user_id: UserId(r.try_get("id")?),
            name: r.try_get("name")?,
            branch_name: r.try_get("branch_name")?,
            company_id: company_id.map(TenantId),
        }))
    }
}
