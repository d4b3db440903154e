//! In-memory implementations of the ports, for tests and local development.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use uuid::Uuid;

use crate::domain::coupon::Coupon;
use crate::domain::errors::DomainError;
use crate::domain::geo::Coordinates;
use crate::domain::order::{NewOrder, OrderView, StatusCounts};
use crate::domain::ports::{AddressResolver, CouponStore, OrderStore};
use crate::domain::status::OrderStatus;

#[derive(Default)]
pub struct MemoryOrderStore {
    orders: Mutex<Vec<OrderView>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn orders(&self) -> MutexGuard<'_, Vec<OrderView>> {
        self.orders.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl OrderStore for MemoryOrderStore {
    fn create(&self, order: NewOrder) -> Result<OrderView, DomainError> {
        let view = OrderView {
            id: Uuid::new_v4(),
            client_id: order.client_id,
            total: order.total,
            delivery_method: order.delivery_method,
            delivery_address: order.delivery_address,
            delivery_fee: order.delivery_fee,
            coupon_id: order.coupon_id,
            status: order.status,
            products: order.products,
            fruits: order.fruits,
            toppings: order.toppings,
            size: order.size,
            cream: order.cream,
            created_at: Utc::now(),
        };
        self.orders().push(view.clone());
        Ok(view)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        Ok(self.orders().iter().find(|o| o.id == id).cloned())
    }

    fn list_all(&self) -> Result<Vec<OrderView>, DomainError> {
        Ok(self.orders().clone())
    }

    fn list_by_client(&self, client_id: Uuid) -> Result<Vec<OrderView>, DomainError> {
        Ok(self
            .orders()
            .iter()
            .filter(|o| o.client_id == client_id)
            .cloned()
            .collect())
    }

    fn count_by_client(&self, client_id: Uuid) -> Result<i64, DomainError> {
        Ok(self
            .orders()
            .iter()
            .filter(|o| o.client_id == client_id)
            .count() as i64)
    }

    fn count_by_status(&self, client_id: Uuid) -> Result<StatusCounts, DomainError> {
        let mut counts = StatusCounts::default();
        for order in self.orders().iter().filter(|o| o.client_id == client_id) {
            counts.add(order.status, 1);
        }
        Ok(counts)
    }

    fn update_status(&self, id: Uuid, status: OrderStatus) -> Result<OrderView, DomainError> {
        let mut orders = self.orders();
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(DomainError::NotFound)?;
        order.status = status;
        Ok(order.clone())
    }
}

#[derive(Default)]
pub struct MemoryCouponStore {
    coupons: Mutex<Vec<Coupon>>,
}

impl MemoryCouponStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, coupon: Coupon) {
        self.coupons
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(coupon);
    }
}

impl CouponStore for MemoryCouponStore {
    fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, DomainError> {
        Ok(self
            .coupons
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|c| c.code == code)
            .cloned())
    }
}

/// Resolves every postal code to the same coordinates.
pub struct FixedAddressResolver {
    coords: Coordinates,
}

impl FixedAddressResolver {
    pub fn new(coords: Coordinates) -> Self {
        Self { coords }
    }
}

impl AddressResolver for FixedAddressResolver {
    fn resolve(&self, _postal_code: &str) -> Result<Coordinates, DomainError> {
        Ok(self.coords)
    }
}

/// Fails every lookup, as an unreachable geocoding service would.
pub struct FailingAddressResolver;

impl AddressResolver for FailingAddressResolver {
    fn resolve(&self, postal_code: &str) -> Result<Coordinates, DomainError> {
        Err(DomainError::AddressResolution(format!(
            "no coordinates for '{}'",
            postal_code
        )))
    }
}
