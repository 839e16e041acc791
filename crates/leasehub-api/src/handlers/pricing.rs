//! Price quotes for carts the server does not hold.

use axum::Json;

use leasehub_service::pricing::{self, CartTotals};

use crate::dto::request::QuoteRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::ValidatedJson;

/// POST /api/pricing/quote
pub async fn quote(
    ValidatedJson(req): ValidatedJson<QuoteRequest>,
) -> Result<Json<ApiResponse<CartTotals>>, ApiError> {
    for item in &req.items {
        pricing::validate_item(item)?;
    }

    // Clamp the same way the cart does so quotes match checkout.
    let items: Vec<_> = req
        .items
        .into_iter()
        .map(|mut item| {
            item.rental_days = item.clamp_days(item.rental_days);
            item
        })
        .collect();

    Ok(Json(ApiResponse::ok(pricing::compute_totals(&items))))
}
