//! Item endpoints.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::debug;

use bazaar_core::validation::{validate_item_changes, validate_new_item};
use bazaar_core::{CoreError, ItemSearchParams, PageParams};

use super::parse_id;
use crate::dto::{resources, Data, Found, ItemPayload, ItemResource, MerchantResource};
use crate::error::ApiResult;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/find", get(find_item))
        .route("/items/find_all", get(find_all_items))
        .route(
            "/items/{id}",
            get(show_item)
                .patch(update_item)
                .put(update_item)
                .delete(delete_item),
        )
        .route("/items/{id}/merchant", get(item_merchant))
}

// =============================================================================
// Reads
// =============================================================================

async fn list_items(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> ApiResult<Json<Data<Vec<ItemResource>>>> {
    let items = state.db.items().list(params?.resolve()).await?;
    Ok(Data::json(resources(items)))
}

async fn show_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Data<ItemResource>>> {
    let id = parse_id("Item", &raw_id)?;
    let item = state
        .db
        .items()
        .get_by_id(id)
        .await?
        .ok_or(CoreError::ItemNotFound(id))?;
    Ok(Data::json(item.into()))
}

async fn item_merchant(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Data<MerchantResource>>> {
    let id = parse_id("Item", &raw_id)?;
    let item = state.db.items().require(id).await?;
    let merchant = state.db.merchants().require(item.merchant_id).await?;
    Ok(Data::json(merchant.into()))
}

// =============================================================================
// Search
// =============================================================================

/// First match in name order, by name fragment or price range.
async fn find_item(
    State(state): State<AppState>,
    params: Result<Query<ItemSearchParams>, QueryRejection>,
) -> ApiResult<Json<Data<Found<ItemResource>>>> {
    let Query(params) = params?;
    let search = params.validate()?;
    let item = state.db.items().find_one(&search).await?;
    Ok(Data::json(item.map(ItemResource::from).into()))
}

async fn find_all_items(
    State(state): State<AppState>,
    params: Result<Query<ItemSearchParams>, QueryRejection>,
) -> ApiResult<Json<Data<Vec<ItemResource>>>> {
    let Query(params) = params?;
    let search = params.validate()?;
    let items = state.db.items().find_all(&search).await?;
    Ok(Data::json(resources(items)))
}

// =============================================================================
// Writes
// =============================================================================

async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<ItemPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Data<ItemResource>>)> {
    let Json(payload) = payload?;
    let new_item = payload.into_new_item()?;
    validate_new_item(&new_item)?;

    let item = state.db.items().insert(&new_item).await?;
    debug!(item_id = item.id, "Item created");

    Ok((StatusCode::CREATED, Data::json(item.into())))
}

async fn update_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<ItemPayload>, JsonRejection>,
) -> ApiResult<Json<Data<ItemResource>>> {
    let id = parse_id("Item", &raw_id)?;
    // Unknown item wins over a bad body
    state.db.items().require(id).await?;

    let Json(payload) = payload?;
    let changes = payload.into_changes()?;
    validate_item_changes(&changes)?;

    let item = state.db.items().update(id, changes).await?;
    Ok(Data::json(item.into()))
}

async fn delete_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Data<ItemResource>>> {
    let id = parse_id("Item", &raw_id)?;
    let deletion = state.db.items().delete(id).await?;

    debug!(
        item_id = id,
        removed_invoices = ?deletion.removed_invoice_ids,
        "Item delete finished"
    );

    Ok(Data::json(deletion.item.into()))
}
