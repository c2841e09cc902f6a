//! REST handlers for the `ShopTwo` resource.
//!
//! Each handler translates the request shape into a store call and a status
//! code; the id preconditions on the mutating operations are the only
//! validation this service performs.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use shop_registry_core::ShopTwoId;

use crate::error::ApiError;
use crate::headers;
use crate::models::ShopTwo;
use crate::state::AppState;
use crate::store::{Sort, StoreError};

const ENTITY_NAME: &str = "shopTwo";

/// Query parameters accepted by the list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// `field,direction` ordering, e.g. `id,desc`.
    sort: Option<String>,
}

/// `POST /api/shop-twos` : create a new shopTwo.
///
/// # Errors
///
/// Returns 400 `idexists` if the body already carries an id.
pub async fn create(
    State(state): State<AppState>,
    Json(shop_two): Json<ShopTwo>,
) -> Result<Response, ApiError> {
    tracing::debug!(shop_two = ?shop_two, "REST request to save ShopTwo");
    if shop_two.id.is_some() {
        return Err(ApiError::bad_request(
            ENTITY_NAME,
            "idexists",
            "A new shopTwo cannot already have an ID",
        ));
    }

    let result = state.store().save(shop_two)?;
    let id = result.id.ok_or(StoreError::IdNotAssigned)?;

    let mut response_headers = headers::creation_alert(ENTITY_NAME, &id.to_string());
    if let Ok(location) = HeaderValue::from_str(&format!("/api/shop-twos/{id}")) {
        response_headers.insert(LOCATION, location);
    }

    Ok((StatusCode::CREATED, response_headers, Json(result)).into_response())
}

/// `PUT /api/shop-twos/{id}` : replace an existing shopTwo wholesale.
///
/// Fields omitted from the body are reset to null.
///
/// # Errors
///
/// Returns 400 `idnull` without a body id, `idinvalid` on a path/body id
/// mismatch, and `idnotfound` when the target does not exist.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ShopTwoId>,
    Json(shop_two): Json<ShopTwo>,
) -> Result<Response, ApiError> {
    tracing::debug!(id = %id, shop_two = ?shop_two, "REST request to update ShopTwo");
    check_id_preconditions(&state, id, &shop_two)?;

    let result = state.store().save(shop_two)?;

    Ok((
        StatusCode::OK,
        headers::update_alert(ENTITY_NAME, &id.to_string()),
        Json(result),
    )
        .into_response())
}

/// `PATCH /api/shop-twos/{id}` : partial update, field will ignore if it is
/// null.
///
/// Accepts `application/json` and `application/merge-patch+json`.
///
/// # Errors
///
/// Same id rejections as [`update`]; 404 if the target vanishes between the
/// existence check and the read.
pub async fn partial_update(
    State(state): State<AppState>,
    Path(id): Path<ShopTwoId>,
    Json(shop_two): Json<ShopTwo>,
) -> Result<Response, ApiError> {
    tracing::debug!(id = %id, shop_two = ?shop_two, "REST request to partial update ShopTwo");
    check_id_preconditions(&state, id, &shop_two)?;

    let stored = state.store().find_by_id(id)?.ok_or(ApiError::NotFound)?;
    let result = state.store().save(stored.merged_with(shop_two))?;

    Ok((
        StatusCode::OK,
        headers::update_alert(ENTITY_NAME, &id.to_string()),
        Json(result),
    )
        .into_response())
}

/// `GET /api/shop-twos` : get all the shopTwos.
///
/// Unrecognized `sort` values fall back to the default id-ascending order.
///
/// # Errors
///
/// Returns 500 only if the store fails.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ShopTwo>>, ApiError> {
    tracing::debug!("REST request to get all ShopTwos");
    let sort = params.sort.as_deref().and_then(Sort::parse).unwrap_or_default();
    Ok(Json(state.store().find_all(sort)?))
}

/// `GET /api/shop-twos/{id}` : get the "id" shopTwo.
///
/// # Errors
///
/// Returns 404 with an empty body when absent.
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<ShopTwoId>,
) -> Result<Json<ShopTwo>, ApiError> {
    tracing::debug!(id = %id, "REST request to get ShopTwo");
    state
        .store()
        .find_by_id(id)?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// `DELETE /api/shop-twos/{id}` : delete the "id" shopTwo.
///
/// Deleting an absent id succeeds; the operation is idempotent.
///
/// # Errors
///
/// Returns 500 only if the store fails.
pub async fn delete_one(
    State(state): State<AppState>,
    Path(id): Path<ShopTwoId>,
) -> Result<Response, ApiError> {
    tracing::debug!(id = %id, "REST request to delete ShopTwo");
    state.store().delete_by_id(id)?;

    Ok((
        StatusCode::NO_CONTENT,
        headers::deletion_alert(ENTITY_NAME, &id.to_string()),
    )
        .into_response())
}

/// Shared id preconditions for the two update operations: the body id must
/// be present, match the path id, and point at an existing record.
fn check_id_preconditions(
    state: &AppState,
    path_id: ShopTwoId,
    shop_two: &ShopTwo,
) -> Result<(), ApiError> {
    let Some(body_id) = shop_two.id else {
        return Err(ApiError::bad_request(ENTITY_NAME, "idnull", "Invalid id"));
    };
    if body_id != path_id {
        return Err(ApiError::bad_request(ENTITY_NAME, "idinvalid", "Invalid ID"));
    }
    if !state.store().exists_by_id(path_id)? {
        return Err(ApiError::bad_request(
            ENTITY_NAME,
            "idnotfound",
            "Entity not found",
        ));
    }
    Ok(())
}
