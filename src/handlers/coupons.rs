use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::order_service::OrderService;
use crate::errors::AppError;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ApplyCouponRequest {
    pub code: String,
    pub client_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApplyCouponResponse {
    pub success: bool,
}

/// POST /coupons/apply
///
/// Preview whether the coupon could be redeemed on the client's next order.
/// Shares the evaluation used by order placement; nothing is reserved.
#[utoipa::path(
    post,
    path = "/coupons/apply",
    request_body = ApplyCouponRequest,
    responses(
        (status = 200, description = "Coupon can be applied", body = ApplyCouponResponse),
        (status = 400, description = "Unknown, ineligible or exhausted coupon"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "coupons"
)]
pub async fn apply_coupon(
    service: web::Data<OrderService>,
    body: web::Json<ApplyCouponRequest>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    let service = service.into_inner();

    web::block(move || service.preview_coupon(request.client_id, &request.code))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ApplyCouponResponse { success: true }))
}
