use crate::{DbError, Result as DbErrorResult};

use inv_core::{NewSale, PaymentStatus, Sale, TenantId, UserId};

use chrono::{DateTime, SubsecRound, Utc};
use serde_json::{Map, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const TABLE: &str = "sales";

pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a sale recorded by `seller_id` within `tenant_id`.
    ///
    /// The caller validates `sale` first; the stored total is taken as given.
    pub async fn create(
        &self,
        tenant_id: TenantId,
        seller_id: UserId,
        sale: &NewSale,
    ) -> DbErrorResult<Sale> {
        // Stored at second precision, so truncate up front to return what a re-read would
        let now = Utc::now().trunc_subsecs(0);
        let attributes = serde_json::to_string(&sale.product_attributes)
            .map_err(|e| DbError::decode(TABLE, format!("product_attributes: {}", e)))?;

        let result = sqlx::query(
            r#"
              INSERT INTO sales (
                  company_id, product_id, product_name, product_attributes,
                  quantity, unit_price, extra_costs, total_price, currency,
                  seller_id, payment_status,
                  buyer_name, buyer_contact, buyer_location,
                  created_at, updated_at
              ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(tenant_id.0)
        .bind(sale.product_id)
        .bind(&sale.product_name)
        .bind(&attributes)
        .bind(sale.quantity)
        .bind(sale.unit_price)
        .bind(sale.extra_costs)
        .bind(sale.total_price)
        .bind(&sale.currency)
        .bind(seller_id.0)
        .bind(sale.payment_status.as_str())
        .bind(&sale.buyer_name)
        .bind(&sale.buyer_contact)
        .bind(&sale.buyer_location)
        .bind(now.timestamp())
        .bind(now.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(Sale {
            id: result.last_insert_rowid(),
            product_id: sale.product_id,
            product_name: sale.product_name.clone(),
            product_attributes: sale.product_attributes.clone(),
            quantity: sale.quantity,
            unit_price: sale.unit_price,
            extra_costs: sale.extra_costs,
            total_price: sale.total_price,
            currency: sale.currency.clone(),
            seller_id,
            payment_status: sale.payment_status,
            buyer_name: sale.buyer_name.clone(),
            buyer_contact: sale.buyer_contact.clone(),
            buyer_location: sale.buyer_location.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Find a sale by id. Sales belonging to another tenant are not visible.
    pub async fn find_by_id(&self, tenant_id: TenantId, id: i64) -> DbErrorResult<Option<Sale>> {
        let row = sqlx::query(
            r#"
              SELECT id, product_id, product_name, product_attributes,
                     quantity, unit_price, extra_costs, total_price, currency,
                     seller_id, payment_status,
                     buyer_name, buyer_contact, buyer_location,
                     created_at, updated_at
              FROM sales
              WHERE id = ? AND company_id = ?
              "#,
        )
        .bind(id)
        .bind(tenant_id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| Self::map_row(&r)).transpose()
    }

    /// Number of sales recorded for a tenant
    pub async fn count_for_tenant(&self, tenant_id: TenantId) -> DbErrorResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales WHERE company_id = ?")
            .bind(tenant_id.0)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    fn map_row(r: &SqliteRow) -> DbErrorResult<Sale> {
        let attributes: String = r.try_get("product_attributes")?;
        let product_attributes: Map<String, Value> = serde_json::from_str(&attributes)
            .map_err(|e| DbError::decode(TABLE, format!("product_attributes: {}", e)))?;

        let status: String = r.try_get("payment_status")?;
        let payment_status: PaymentStatus = status
            .parse()
            .map_err(|_| DbError::decode(TABLE, format!("payment_status '{}'", status)))?;

        Ok(Sale {
            id: r.try_get("id")?,
            product_id: r.try_get("product_id")?,
            product_name: r.try_get("product_name")?,
            product_attributes,
            quantity: r.try_get("quantity")?,
            unit_price: r.try_get("unit_price")?,
            extra_costs: r.try_get("extra_costs")?,
            total_price: r.try_get("total_price")?,
            currency: r.try_get("currency")?,
            seller_id: UserId(r.try_get("seller_id")?),
            payment_status,
            buyer_name: r.try_get("buyer_name")?,
            buyer_contact: r.try_get("buyer_contact")?,
            buyer_location: r.try_get("buyer_location")?,
            created_at: Self::timestamp(r, "created_at")?,
            updated_at: Self::timestamp(r, "updated_at")?,
        })
    }

    fn timestamp(r: &SqliteRow, column: &'static str) -> DbErrorResult<DateTime<Utc>> {
        let secs: i64 = r.try_get(column)?;
        DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| DbError::decode(TABLE, format!("{} out of range: {}", column, secs)))
    }
}
