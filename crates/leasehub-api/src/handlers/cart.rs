//! Cart handlers. Carts are addressed by a client-held session id.

use axum::Json;
use axum::extract::{Path, State};

use leasehub_service::cart::{CartView, CheckoutReceipt};

use crate::dto::request::{
    AddItemRequest, CheckoutRequest, SetDeliveryRequest, SetInsuranceRequest,
    SetRentalDaysRequest,
};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// GET /api/carts/{cart_id}
pub async fn get_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
) -> Json<ApiResponse<CartView>> {
    Json(ApiResponse::ok(state.cart_service.get_cart(&cart_id)))
}

/// DELETE /api/carts/{cart_id}
pub async fn clear_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
) -> Json<ApiResponse<MessageResponse>> {
    state.cart_service.clear(&cart_id);
    Json(ApiResponse::ok(MessageResponse::new("Cart cleared")))
}

/// POST /api/carts/{cart_id}/items
pub async fn add_item(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
    ValidatedJson(req): ValidatedJson<AddItemRequest>,
) -> Result<Json<ApiResponse<CartView>>, ApiError> {
    let view = state.cart_service.add_item(&cart_id, req.item)?;
    Ok(Json(ApiResponse::ok(view)))
}

/// DELETE /api/carts/{cart_id}/items/{item_id}
pub async fn remove_item(
    State(state): State<AppState>,
    Path((cart_id, item_id)): Path<(String, String)>,
) -> Json<ApiResponse<CartView>> {
    Json(ApiResponse::ok(
        state.cart_service.remove_item(&cart_id, &item_id),
    ))
}

/// PUT /api/carts/{cart_id}/items/{item_id}/days
pub async fn set_rental_days(
    State(state): State<AppState>,
    Path((cart_id, item_id)): Path<(String, String)>,
    ValidatedJson(req): ValidatedJson<SetRentalDaysRequest>,
) -> Result<Json<ApiResponse<CartView>>, ApiError> {
    let view = state
        .cart_service
        .set_rental_days(&cart_id, &item_id, req.rental_days)?;
    Ok(Json(ApiResponse::ok(view)))
}

/// PUT /api/carts/{cart_id}/items/{item_id}/delivery
pub async fn set_delivery_option(
    State(state): State<AppState>,
    Path((cart_id, item_id)): Path<(String, String)>,
    ValidatedJson(req): ValidatedJson<SetDeliveryRequest>,
) -> Result<Json<ApiResponse<CartView>>, ApiError> {
    let view = state
        .cart_service
        .set_delivery_option(&cart_id, &item_id, req.delivery_option)?;
    Ok(Json(ApiResponse::ok(view)))
}

/// PUT /api/carts/{cart_id}/items/{item_id}/insurance
pub async fn set_insurance_option(
    State(state): State<AppState>,
    Path((cart_id, item_id)): Path<(String, String)>,
    ValidatedJson(req): ValidatedJson<SetInsuranceRequest>,
) -> Result<Json<ApiResponse<CartView>>, ApiError> {
    let view = state
        .cart_service
        .set_insurance_option(&cart_id, &item_id, req.insurance_option)?;
    Ok(Json(ApiResponse::ok(view)))
}

/// POST /api/carts/{cart_id}/checkout
pub async fn checkout(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
    ValidatedJson(req): ValidatedJson<CheckoutRequest>,
) -> Result<Json<ApiResponse<CheckoutReceipt>>, ApiError> {
    let receipt = state.cart_service.checkout(&cart_id, req.into()).await?;
    Ok(Json(ApiResponse::ok(receipt)))
}
