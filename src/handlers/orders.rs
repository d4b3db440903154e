use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::order_service::{OrderService, PlaceOrderInput};
use crate::domain::errors::DomainError;
use crate::domain::order::{
    CreamSelection, DeliveryAddress, DeliveryMethod, FruitLine, OrderView, ProductLine,
    SizeSelection, StatusCounts, ToppingLine,
};
use crate::domain::status::OrderStatus;
use crate::errors::AppError;

// ── Request DTOs ─────────────────────────────────────────────────────────────
//
// Money travels as decimal strings to avoid floating-point issues, e.g. "9.99".
// Unknown fields are rejected before any business logic runs.

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ProductLineRequest {
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct FruitLineRequest {
    pub fruit_id: Uuid,
    pub price: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ToppingLineRequest {
    pub topping_id: Uuid,
    pub price: String,
    #[serde(default)]
    pub is_free: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct SizeRequest {
    pub size_id: Uuid,
    pub price: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreamRequest {
    pub cream_id: Uuid,
    pub price: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PlaceOrderRequest {
    pub client_id: Uuid,
    #[serde(default)]
    pub products: Vec<ProductLineRequest>,
    #[serde(default)]
    pub fruits: Vec<FruitLineRequest>,
    #[serde(default)]
    pub toppings: Vec<ToppingLineRequest>,
    pub size: Option<SizeRequest>,
    pub cream: Option<CreamRequest>,
    pub total: String,
    pub coupon_code: Option<String>,
    pub delivery_method: DeliveryMethod,
    pub delivery_address: Option<DeliveryAddress>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct DeliveryFeeRequest {
    pub cep: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct SetStatusRequest {
    pub status: OrderStatus,
}

fn parse_money(field: &str, raw: &str) -> Result<BigDecimal, DomainError> {
    BigDecimal::from_str(raw.trim()).map_err(|_| {
        DomainError::Validation(format!("{} must be a decimal amount, got '{}'", field, raw))
    })
}

impl PlaceOrderRequest {
    fn into_domain(self) -> Result<PlaceOrderInput, DomainError> {
        let total = parse_money("total", &self.total)?;

        let products = self
            .products
            .into_iter()
            .map(|p| {
                Ok(ProductLine {
                    product_id: p.product_id,
                    quantity: p.quantity,
                    price: parse_money("product price", &p.price)?,
                })
            })
            .collect::<Result<_, DomainError>>()?;
        let fruits = self
            .fruits
            .into_iter()
            .map(|f| {
                Ok(FruitLine {
                    fruit_id: f.fruit_id,
                    price: parse_money("fruit price", &f.price)?,
                })
            })
            .collect::<Result<_, DomainError>>()?;
        let toppings = self
            .toppings
            .into_iter()
            .map(|t| {
                Ok(ToppingLine {
                    topping_id: t.topping_id,
                    price: parse_money("topping price", &t.price)?,
                    is_free: t.is_free,
                })
            })
            .collect::<Result<_, DomainError>>()?;
        let size = self
            .size
            .map(|s| {
                Ok::<_, DomainError>(SizeSelection {
                    size_id: s.size_id,
                    price: parse_money("size price", &s.price)?,
                })
            })
            .transpose()?;
        let cream = self
            .cream
            .map(|c| {
                Ok::<_, DomainError>(CreamSelection {
                    cream_id: c.cream_id,
                    price: parse_money("cream price", &c.price)?,
                })
            })
            .transpose()?;

        Ok(PlaceOrderInput {
            client_id: self.client_id,
            products,
            fruits,
            toppings,
            size,
            cream,
            total,
            coupon_code: self.coupon_code.filter(|c| !c.trim().is_empty()),
            delivery_method: self.delivery_method,
            delivery_address: self.delivery_address,
        })
    }
}

// ── Response DTOs ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductLineResponse {
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FruitLineResponse {
    pub fruit_id: Uuid,
    pub price: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ToppingLineResponse {
    pub topping_id: Uuid,
    pub price: String,
    pub is_free: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SizeResponse {
    pub size_id: Uuid,
    pub price: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreamResponse {
    pub cream_id: Uuid,
    pub price: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub client_id: Uuid,
    pub total: String,
    pub delivery_method: DeliveryMethod,
    pub delivery_address: Option<DeliveryAddress>,
    pub delivery_fee: String,
    pub coupon_id: Option<Uuid>,
    pub status: OrderStatus,
    pub products: Vec<ProductLineResponse>,
    pub fruits: Vec<FruitLineResponse>,
    pub toppings: Vec<ToppingLineResponse>,
    pub size: Option<SizeResponse>,
    pub cream: Option<CreamResponse>,
    pub created_at: String,
}

impl From<OrderView> for OrderResponse {
    fn from(o: OrderView) -> Self {
        Self {
            id: o.id,
            client_id: o.client_id,
            total: o.total.to_string(),
            delivery_method: o.delivery_method,
            delivery_address: o.delivery_address,
            delivery_fee: o.delivery_fee.to_string(),
            coupon_id: o.coupon_id,
            status: o.status,
            products: o
                .products
                .into_iter()
                .map(|p| ProductLineResponse {
                    product_id: p.product_id,
                    quantity: p.quantity,
                    price: p.price.to_string(),
                })
                .collect(),
            fruits: o
                .fruits
                .into_iter()
                .map(|f| FruitLineResponse {
                    fruit_id: f.fruit_id,
                    price: f.price.to_string(),
                })
                .collect(),
            toppings: o
                .toppings
                .into_iter()
                .map(|t| ToppingLineResponse {
                    topping_id: t.topping_id,
                    price: t.price.to_string(),
                    is_free: t.is_free,
                })
                .collect(),
            size: o.size.map(|s| SizeResponse {
                size_id: s.size_id,
                price: s.price.to_string(),
            }),
            cream: o.cream.map(|c| CreamResponse {
                cream_id: c.cream_id,
                price: c.price.to_string(),
            }),
            created_at: o.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FeeResponse {
    pub fee: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderCountResponse {
    pub awaiting_confirmation: i64,
    pub in_preparation: i64,
    pub ready_for_pickup: i64,
    pub out_for_delivery: i64,
    pub canceled: i64,
    pub total: i64,
}

impl From<StatusCounts> for OrderCountResponse {
    fn from(c: StatusCounts) -> Self {
        Self {
            awaiting_confirmation: c.awaiting_confirmation,
            in_preparation: c.in_preparation,
            ready_for_pickup: c.ready_for_pickup,
            out_for_delivery: c.out_for_delivery,
            canceled: c.canceled,
            total: c.total,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Validates the payload, prices the delivery, evaluates the coupon and
/// persists the aggregate in one transaction before fanning the new order out.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = PlaceOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = OrderResponse),
        (status = 400, description = "Invalid payload or coupon"),
        (status = 502, description = "Postal code could not be resolved"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn place_order(
    service: web::Data<OrderService>,
    body: web::Json<PlaceOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner().into_domain()?;
    let service = service.into_inner();

    let order = web::block(move || service.place_order(input))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /orders
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "All orders with their line items", body = [OrderResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_all_orders(service: web::Data<OrderService>) -> Result<HttpResponse, AppError> {
    let service = service.into_inner();

    let orders = web::block(move || service.list_all_orders())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let items: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(items))
}

/// GET /orders/{client_id}
#[utoipa::path(
    get,
    path = "/orders/{client_id}",
    params(("client_id" = Uuid, Path, description = "Client UUID")),
    responses(
        (status = 200, description = "The client's orders", body = [OrderResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_client_orders(
    service: web::Data<OrderService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let client_id = path.into_inner();
    let service = service.into_inner();

    let orders = web::block(move || service.list_client_orders(client_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let items: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(items))
}

/// GET /orders/{client_id}/count
#[utoipa::path(
    get,
    path = "/orders/{client_id}/count",
    params(("client_id" = Uuid, Path, description = "Client UUID")),
    responses(
        (status = 200, description = "Per-status order counts", body = OrderCountResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order_counts(
    service: web::Data<OrderService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let client_id = path.into_inner();
    let service = service.into_inner();

    let counts = web::block(move || service.order_counts(client_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderCountResponse::from(counts)))
}

/// POST /orders/delivery-fee
#[utoipa::path(
    post,
    path = "/orders/delivery-fee",
    request_body = DeliveryFeeRequest,
    responses(
        (status = 200, description = "Fee for the postal code", body = FeeResponse),
        (status = 400, description = "Missing cep"),
        (status = 502, description = "Postal code could not be resolved"),
    ),
    tag = "orders"
)]
pub async fn get_delivery_fee(
    service: web::Data<OrderService>,
    body: web::Json<DeliveryFeeRequest>,
) -> Result<HttpResponse, AppError> {
    let cep = body.into_inner().cep;
    let service = service.into_inner();

    let fee = web::block(move || service.delivery_fee_preview(&cep))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(FeeResponse {
        fee: fee.to_string(),
    }))
}

/// PUT /orders/{order_id}/accept
#[utoipa::path(
    put,
    path = "/orders/{order_id}/accept",
    params(("order_id" = Uuid, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Order accepted", body = MessageResponse),
        (status = 400, description = "Order is in a terminal state"),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn accept_order(
    service: web::Data<OrderService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let service = service.into_inner();

    web::block(move || service.accept(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Order is now in preparation".to_string(),
    }))
}

/// PUT /orders/{order_id}/finalize
#[utoipa::path(
    put,
    path = "/orders/{order_id}/finalize",
    params(("order_id" = Uuid, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Order finalized", body = MessageResponse),
        (status = 400, description = "Order is not in preparation"),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn finalize_order(
    service: web::Data<OrderService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let service = service.into_inner();

    let order = web::block(move || service.finalize(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let message = match order.status {
        OrderStatus::ReadyForPickup => "Order ready for pickup",
        _ => "Order out for delivery",
    };
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: message.to_string(),
    }))
}

/// PUT /orders/{order_id}/cancel
#[utoipa::path(
    put,
    path = "/orders/{order_id}/cancel",
    params(("order_id" = Uuid, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Order canceled", body = MessageResponse),
        (status = 400, description = "Order was already fulfilled"),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn cancel_order(
    service: web::Data<OrderService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let service = service.into_inner();

    web::block(move || service.cancel(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Order canceled".to_string(),
    }))
}

/// PUT /orders/{order_id}/status
///
/// Administrative override: writes the given status without a transition
/// check.
#[utoipa::path(
    put,
    path = "/orders/{order_id}/status",
    params(("order_id" = Uuid, Path, description = "Order UUID")),
    request_body = SetStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = MessageResponse),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn set_order_status(
    service: web::Data<OrderService>,
    path: web::Path<Uuid>,
    body: web::Json<SetStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let status = body.into_inner().status;
    let service = service.into_inner();

    let order = web::block(move || service.set_status(order_id, status))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: format!("Order status updated to {}", order.status),
    }))
}
