use std::sync::Arc;

use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{
    round2, CreamSelection, DeliveryAddress, DeliveryMethod, FruitLine, NewOrder, OrderEvent,
    OrderView, ProductLine, SizeSelection, StatusCounts, ToppingLine,
};
use crate::domain::ports::{OrderNotifier, OrderStore};
use crate::domain::status::OrderStatus;

use super::coupon::CouponEligibilityEngine;
use super::delivery_fee::DeliveryFeeCalculator;

/// Validated order-placement request, money already parsed. Line-item prices
/// are taken as submitted by the caller and snapshotted into the aggregate;
/// they are not re-priced from a catalog.
#[derive(Debug, Clone)]
pub struct PlaceOrderInput {
    pub client_id: Uuid,
    pub products: Vec<ProductLine>,
    pub fruits: Vec<FruitLine>,
    pub toppings: Vec<ToppingLine>,
    pub size: Option<SizeSelection>,
    pub cream: Option<CreamSelection>,
    pub total: BigDecimal,
    pub coupon_code: Option<String>,
    pub delivery_method: DeliveryMethod,
    pub delivery_address: Option<DeliveryAddress>,
}

/// Use-case facade over the ports: assembles orders, previews fees and
/// coupons, and drives the status lifecycle. All dependencies are injected so
/// tests can substitute fakes.
#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn OrderStore>,
    fees: Arc<DeliveryFeeCalculator>,
    coupons: Arc<CouponEligibilityEngine>,
    notifier: Arc<dyn OrderNotifier>,
}

impl OrderService {
    pub fn new(
        store: Arc<dyn OrderStore>,
        fees: Arc<DeliveryFeeCalculator>,
        coupons: Arc<CouponEligibilityEngine>,
        notifier: Arc<dyn OrderNotifier>,
    ) -> Self {
        Self {
            store,
            fees,
            coupons,
            notifier,
        }
    }

    /// Place an order: validate, price the delivery, evaluate the coupon,
    /// persist the aggregate in one write and fan the new order out.
    ///
    /// Any failure before the write aborts the placement with no partial
    /// record; a fan-out failure never fails the request.
    pub fn place_order(&self, input: PlaceOrderInput) -> Result<OrderView, DomainError> {
        if input.client_id.is_nil() {
            return Err(DomainError::Validation("client id is required".to_string()));
        }

        if input.delivery_method == DeliveryMethod::Delivery {
            let usable = input
                .delivery_address
                .as_ref()
                .is_some_and(|a| !a.cep.trim().is_empty() && !a.numero.trim().is_empty());
            if !usable {
                return Err(DomainError::Validation(
                    "cep and numero are required for delivery orders".to_string(),
                ));
            }
        }

        let delivery_fee = match (&input.delivery_method, &input.delivery_address) {
            (DeliveryMethod::Delivery, Some(address)) => {
                self.fees.fee_for_postal_code(&address.cep)?
            }
            _ => round2(&BigDecimal::from(0)),
        };

        // Evaluated strictly before the write: an ineligible or invalid
        // coupon aborts the whole placement.
        let outcome = self
            .coupons
            .evaluate(input.client_id, input.coupon_code.as_deref())?;

        let final_total = round2(&(&input.total + &delivery_fee - &outcome.discount));

        let order = self.store.create(NewOrder {
            client_id: input.client_id,
            total: final_total,
            delivery_method: input.delivery_method,
            delivery_address: input.delivery_address,
            delivery_fee,
            coupon_id: outcome.coupon_id,
            status: OrderStatus::AwaitingConfirmation,
            products: snapshot_products(input.products),
            fruits: snapshot_fruits(input.fruits),
            toppings: snapshot_toppings(input.toppings),
            size: input.size.map(|s| SizeSelection {
                price: round2(&s.price),
                ..s
            }),
            cream: input.cream.map(|c| CreamSelection {
                price: round2(&c.price),
                ..c
            }),
        })?;

        log::info!("order {} placed for client {}", order.id, order.client_id);
        self.notifier.push(&OrderEvent::NewOrder(order.clone()));
        Ok(order)
    }

    pub fn delivery_fee_preview(&self, postal_code: &str) -> Result<BigDecimal, DomainError> {
        if postal_code.trim().is_empty() {
            return Err(DomainError::Validation("cep is required".to_string()));
        }
        self.fees.fee_for_postal_code(postal_code)
    }

    /// Apply-coupon preview: succeeds iff the coupon could be redeemed on the
    /// client's next order. Shares the placement-path evaluation.
    pub fn preview_coupon(&self, client_id: Uuid, code: &str) -> Result<(), DomainError> {
        if code.trim().is_empty() || client_id.is_nil() {
            return Err(DomainError::Validation(
                "coupon code and client id are required".to_string(),
            ));
        }
        self.coupons.evaluate(client_id, Some(code)).map(|_| ())
    }

    pub fn list_all_orders(&self) -> Result<Vec<OrderView>, DomainError> {
        self.store.list_all()
    }

    pub fn list_client_orders(&self, client_id: Uuid) -> Result<Vec<OrderView>, DomainError> {
        self.store.list_by_client(client_id)
    }

    pub fn order_counts(&self, client_id: Uuid) -> Result<StatusCounts, DomainError> {
        self.store.count_by_status(client_id)
    }

    pub fn accept(&self, id: Uuid) -> Result<OrderView, DomainError> {
        self.transition(id, |order| order.status.accept())
    }

    pub fn finalize(&self, id: Uuid) -> Result<OrderView, DomainError> {
        self.transition(id, |order| order.status.finalize(order.delivery_method))
    }

    pub fn cancel(&self, id: Uuid) -> Result<OrderView, DomainError> {
        self.transition(id, |order| order.status.cancel())
    }

    /// Administrative override: writes the given status with no transition
    /// check, matching the staff tooling this backs.
    pub fn set_status(&self, id: Uuid, status: OrderStatus) -> Result<OrderView, DomainError> {
        self.transition(id, |_| Ok(status))
    }

    fn transition(
        &self,
        id: Uuid,
        next: impl FnOnce(&OrderView) -> Result<OrderStatus, DomainError>,
    ) -> Result<OrderView, DomainError> {
        let order = self.store.find_by_id(id)?.ok_or(DomainError::NotFound)?;
        let status = next(&order)?;
        let updated = self.store.update_status(id, status)?;
        self.notifier.push(&OrderEvent::StatusUpdate(updated.clone()));
        Ok(updated)
    }
}

fn snapshot_products(products: Vec<ProductLine>) -> Vec<ProductLine> {
    products
        .into_iter()
        .map(|p| ProductLine {
            price: round2(&p.price),
            ..p
        })
        .collect()
}

fn snapshot_fruits(fruits: Vec<FruitLine>) -> Vec<FruitLine> {
    fruits
        .into_iter()
        .map(|f| FruitLine {
            price: round2(&f.price),
            ..f
        })
        .collect()
}

fn snapshot_toppings(toppings: Vec<ToppingLine>) -> Vec<ToppingLine> {
    toppings
        .into_iter()
        .map(|t| ToppingLine {
            price: round2(&t.price),
            ..t
        })
        .collect()
}
