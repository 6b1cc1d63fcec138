use crate::{ApiError, ApiResult, AppState, Identity};

use inv_auth::IdentityContext;
use inv_core::{NewSale, Sale};
use inv_db::{SaleRepository, SellerRepository};
use inv_events::{BroadcastEvent, SaleEvent, open_event_stream};

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::Response,
};
use log::{debug, info, warn};

/// POST /api/v1/sales
///
/// Records a sale for the caller's tenant and publishes a `new_sale` event
/// to the tenant's live streams. Publishing never fails the request.
pub async fn create_sale(
    State(state): State<AppState>,
    Identity(identity): Identity,
    payload: Result<Json<NewSale>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Sale>)> {
    let Json(new_sale) = payload?;
    new_sale.validate()?;

    let repo = SaleRepository::new(state.pool.clone());
    let sale = repo
        .create(identity.tenant_id, identity.user_id, &new_sale)
        .await?;

    info!(
        "Sale {} recorded by user {} (tenant {})",
        sale.id, identity.user_id, identity.tenant_id
    );

    publish_new_sale(&state, &identity, &sale).await;

    Ok((StatusCode::CREATED, Json(sale)))
}

/// GET /api/v1/sales/{id}
pub async fn get_sale(
    State(state): State<AppState>,
    Identity(identity): Identity,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Sale>> {
    let Path(id) = id?;

    let repo = SaleRepository::new(state.pool.clone());
    let sale = repo
        .find_by_id(identity.tenant_id, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Sale {} not found", id)))?;

    Ok(Json(sale))
}

/// GET /api/v1/sales/events
///
/// Opens a `text/event-stream` for a super_admin. The stream stays open
/// until the client disconnects or the server shuts down. Once shutdown
/// has begun new streams get 503.
pub async fn sale_events(
    State(state): State<AppState>,
    Identity(identity): Identity,
) -> ApiResult<Response> {
    if state.shutdown.is_shutdown() {
        return Err(ApiError::unavailable("Server is shutting down"));
    }

    let response = open_event_stream(
        &state.registry,
        &identity,
        &state.stream_config,
        &state.metrics,
    )?;

    info!(
        "Event stream opened for user {} (tenant {})",
        identity.user_id, identity.tenant_id
    );

    Ok(response)
}

async fn publish_new_sale(state: &AppState, identity: &IdentityContext, sale: &Sale) {
    let sellers = SellerRepository::new(state.pool.clone());
    let profile = match sellers.find_profile(identity.user_id).await {
        Ok(profile) => profile,
        Err(e) => {
            warn!("Seller lookup failed for user {}: {}", identity.user_id, e);
            None
        }
    };

    let seller_name = profile
        .as_ref()
        .map(|p| p.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(identity.username.as_str());
    let branch_name = profile.as_ref().and_then(|p| p.branch_name.as_deref());

    let event = BroadcastEvent::from(SaleEvent::from_sale(sale, seller_name, branch_name));
    let outcome = state.registry.broadcast(identity.tenant_id, &event);
    state.metrics.event_published(event.event_type(), outcome);

    debug!(
        "Sale {} published to tenant {}: delivered={}, dropped={}",
        sale.id, identity.tenant_id, outcome.delivered, outcome.dropped
    );
}
