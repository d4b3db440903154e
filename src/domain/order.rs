use std::fmt;
use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::errors::DomainError;
use super::status::OrderStatus;

/// Round a monetary amount to 2 decimal places (half-up).
pub fn round2(amount: &BigDecimal) -> BigDecimal {
    amount.with_scale_round(2, RoundingMode::HalfUp)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    Pickup,
    Delivery,
}

impl DeliveryMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryMethod::Pickup => "pickup",
            DeliveryMethod::Delivery => "delivery",
        }
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pickup" => Ok(DeliveryMethod::Pickup),
            "delivery" => Ok(DeliveryMethod::Delivery),
            other => Err(DomainError::Internal(format!(
                "unknown delivery method '{}'",
                other
            ))),
        }
    }
}

/// Brazilian-style delivery address. `cep` and `numero` are the only fields
/// the core validates; the rest is carried through for the courier.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeliveryAddress {
    pub cep: String,
    pub logradouro: String,
    pub numero: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complemento: Option<String>,
    pub bairro: String,
    pub localidade: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uf: Option<String>,
}

// ── Line items ────────────────────────────────────────────────────────────────
//
// Prices are snapshots taken at order time; later catalog changes never touch
// a placed order.

#[derive(Debug, Clone, Serialize)]
pub struct ProductLine {
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: BigDecimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct FruitLine {
    pub fruit_id: Uuid,
    pub price: BigDecimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToppingLine {
    pub topping_id: Uuid,
    pub price: BigDecimal,
    /// A free topping is priced at 0 but still recorded for audit.
    pub is_free: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SizeSelection {
    pub size_id: Uuid,
    pub price: BigDecimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreamSelection {
    pub cream_id: Uuid,
    pub price: BigDecimal,
}

// ── Aggregate ────────────────────────────────────────────────────────────────

/// Input to the store when persisting a new aggregate. Totals and fees have
/// already been computed and rounded by the order service.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub client_id: Uuid,
    pub total: BigDecimal,
    pub delivery_method: DeliveryMethod,
    pub delivery_address: Option<DeliveryAddress>,
    pub delivery_fee: BigDecimal,
    pub coupon_id: Option<Uuid>,
    pub status: OrderStatus,
    pub products: Vec<ProductLine>,
    pub fruits: Vec<FruitLine>,
    pub toppings: Vec<ToppingLine>,
    pub size: Option<SizeSelection>,
    pub cream: Option<CreamSelection>,
}

/// A persisted order with all of its relations populated.
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub id: Uuid,
    pub client_id: Uuid,
    pub total: BigDecimal,
    pub delivery_method: DeliveryMethod,
    pub delivery_address: Option<DeliveryAddress>,
    pub delivery_fee: BigDecimal,
    pub coupon_id: Option<Uuid>,
    pub status: OrderStatus,
    pub products: Vec<ProductLine>,
    pub fruits: Vec<FruitLine>,
    pub toppings: Vec<ToppingLine>,
    pub size: Option<SizeSelection>,
    pub cream: Option<CreamSelection>,
    pub created_at: DateTime<Utc>,
}

/// Per-status order counts for one client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub awaiting_confirmation: i64,
    pub in_preparation: i64,
    pub ready_for_pickup: i64,
    pub out_for_delivery: i64,
    pub canceled: i64,
    pub total: i64,
}

impl StatusCounts {
    pub fn add(&mut self, status: OrderStatus, count: i64) {
        match status {
            OrderStatus::AwaitingConfirmation => self.awaiting_confirmation += count,
            OrderStatus::InPreparation => self.in_preparation += count,
            OrderStatus::ReadyForPickup => self.ready_for_pickup += count,
            OrderStatus::OutForDelivery => self.out_for_delivery += count,
            OrderStatus::Canceled => self.canceled += count,
        }
        self.total += count;
    }
}

/// Event pushed through the notification fan-out when an order is created or
/// its status changes. Serializes as `{"type": "...", "order": {...}}`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "order", rename_all = "snake_case")]
pub enum OrderEvent {
    NewOrder(OrderView),
    StatusUpdate(OrderView),
}

impl OrderEvent {
    pub fn order(&self) -> &OrderView {
        match self {
            OrderEvent::NewOrder(o) | OrderEvent::StatusUpdate(o) => o,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn round2_rounds_half_up() {
        let v = BigDecimal::from_str("24.495").unwrap();
        assert_eq!(round2(&v), BigDecimal::from_str("24.50").unwrap());
    }

    #[test]
    fn round2_pads_to_two_decimals() {
        let v = BigDecimal::from_str("20").unwrap();
        assert_eq!(round2(&v).to_string(), "20.00");
    }

    #[test]
    fn status_counts_accumulate_into_total() {
        let mut counts = StatusCounts::default();
        counts.add(OrderStatus::AwaitingConfirmation, 2);
        counts.add(OrderStatus::Canceled, 1);
        assert_eq!(counts.awaiting_confirmation, 2);
        assert_eq!(counts.canceled, 1);
        assert_eq!(counts.total, 3);
    }

    #[test]
    fn delivery_method_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&DeliveryMethod::Pickup).unwrap(),
            "\"pickup\""
        );
        assert_eq!(
            serde_json::from_str::<DeliveryMethod>("\"delivery\"").unwrap(),
            DeliveryMethod::Delivery
        );
    }
}
