mod common;

use common::{create_test_new_sale, create_test_pool};

use inv_core::{PaymentStatus, TenantId, UserId};
use inv_db::SaleRepository;

use googletest::prelude::*;

#[tokio::test]
async fn given_valid_sale_when_created_then_can_be_found_by_id() {
    // Given: An empty database and a valid sale
    let pool = create_test_pool().await;
    let repo = SaleRepository::new(pool);
    let new_sale = create_test_new_sale();

    // When: Recording the sale
    let created = repo
        .create(TenantId(7), UserId(12), &new_sale)
        .await
        .unwrap();

    // Then: Finding by ID returns the same sale
    let result = repo.find_by_id(TenantId(7), created.id).await.unwrap();

    assert_that!(result, some(anything()));
    let found = result.unwrap();
    assert_that!(found, eq(&created));
    assert_that!(found.seller_id, eq(UserId(12)));
    assert_that!(found.quantity, eq(3));
    assert_that!(found.total_price, eq(150.0));
    assert_that!(found.payment_status, eq(PaymentStatus::Credit));
    assert_that!(found.buyer_name, some(eq("Jane Buyer")));
    assert_that!(found.buyer_contact, none());
    assert_that!(
        found.product_attributes.get("color").and_then(|v| v.as_str()),
        some(eq("red"))
    );
}

#[tokio::test]
async fn given_two_sales_when_created_then_ids_increase() {
    // Given
    let pool = create_test_pool().await;
    let repo = SaleRepository::new(pool);
    let new_sale = create_test_new_sale();

    // When
    let first = repo.create(TenantId(7), UserId(12), &new_sale).await.unwrap();
    let second = repo.create(TenantId(7), UserId(12), &new_sale).await.unwrap();

    // Then
    assert_that!(second.id, gt(first.id));
    assert_that!(repo.count_for_tenant(TenantId(7)).await.unwrap(), eq(2));
}

#[tokio::test]
async fn given_sale_in_other_tenant_when_finding_then_returns_none() {
    // Given: A sale recorded in tenant 7
    let pool = create_test_pool().await;
    let repo = SaleRepository::new(pool);
    let created = repo
        .create(TenantId(7), UserId(12), &create_test_new_sale())
        .await
        .unwrap();

    // When: Tenant 8 looks it up
    let result = repo.find_by_id(TenantId(8), created.id).await.unwrap();

    // Then: Not visible
    assert_that!(result, none());
    assert_that!(repo.count_for_tenant(TenantId(8)).await.unwrap(), eq(0));
}

#[tokio::test]
async fn given_empty_database_when_finding_nonexistent_id_then_returns_none() {
    // Given
    let pool = create_test_pool().await;
    let repo = SaleRepository::new(pool);

    // When
    let result = repo.find_by_id(TenantId(7), 999).await.unwrap();

    // Then
    assert_that!(result, none());
}

#[tokio::test]
async fn given_corrupt_attributes_when_finding_then_decode_error() {
    // Given: A row whose attributes column is not a JSON object
    let pool = create_test_pool().await;
    let repo = SaleRepository::new(pool.clone());
    let created = repo
        .create(TenantId(7), UserId(12), &create_test_new_sale())
        .await
        .unwrap();
    sqlx::query("UPDATE sales SET product_attributes = 'not json' WHERE id = ?")
        .bind(created.id)
        .execute(&pool)
        .await
        .unwrap();

    // When
    let result = repo.find_by_id(TenantId(7), created.id).await;

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("product_attributes"));
}
