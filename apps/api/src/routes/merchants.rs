//! Merchant endpoints. Merchants can be read and created, never changed.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use bazaar_core::validation::validate_new_merchant;
use bazaar_core::{MerchantSearchParams, PageParams, SearchMode};

use super::parse_id;
use crate::dto::{resources, Data, Found, ItemResource, MerchantPayload, MerchantResource};
use crate::error::ApiResult;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/merchants", get(list_merchants).post(create_merchant))
        .route("/merchants/find", get(find_merchant))
        .route("/merchants/find_all", get(find_all_merchants))
        .route("/merchants/{id}", get(show_merchant))
        .route("/merchants/{id}/items", get(merchant_items))
}

async fn list_merchants(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> ApiResult<Json<Data<Vec<MerchantResource>>>> {
    let merchants = state.db.merchants().list(params?.resolve()).await?;
    Ok(Data::json(resources(merchants)))
}

async fn show_merchant(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Data<MerchantResource>>> {
    let id = parse_id("Merchant", &raw_id)?;
    let merchant = state.db.merchants().require(id).await?;
    Ok(Data::json(merchant.into()))
}

async fn merchant_items(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> ApiResult<Json<Data<Vec<ItemResource>>>> {
    let id = parse_id("Merchant", &raw_id)?;
    // 404 for an unknown merchant, not an empty list
    state.db.merchants().require(id).await?;

    let items = state
        .db
        .items()
        .list_for_merchant(id, params?.resolve())
        .await?;
    Ok(Data::json(resources(items)))
}

async fn find_merchant(
    State(state): State<AppState>,
    params: Result<Query<MerchantSearchParams>, QueryRejection>,
) -> ApiResult<Json<Data<Found<MerchantResource>>>> {
    let Query(params) = params?;
    let query = params.validate()?;
    let merchant = state.db.merchants().find_one(&query).await?;
    Ok(Data::json(merchant.map(MerchantResource::from).into()))
}

async fn find_all_merchants(
    State(state): State<AppState>,
    params: Result<Query<MerchantSearchParams>, QueryRejection>,
) -> ApiResult<Json<Data<Vec<MerchantResource>>>> {
    let Query(params) = params?;
    let query = params.validate()?;
    let merchants = state
        .db
        .merchants()
        .find_by_name(&query, SearchMode::All)
        .await?;
    Ok(Data::json(resources(merchants)))
}

async fn create_merchant(
    State(state): State<AppState>,
    payload: Result<Json<MerchantPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Data<MerchantResource>>)> {
    let Json(payload) = payload?;
    let new_merchant = payload.into_new_merchant()?;
    validate_new_merchant(&new_merchant)?;

    let merchant = state.db.merchants().insert(&new_merchant).await?;
    Ok((StatusCode::CREATED, Data::json(merchant.into())))
}
