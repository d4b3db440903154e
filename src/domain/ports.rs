use uuid::Uuid;

use super::coupon::Coupon;
use super::errors::DomainError;
use super::geo::Coordinates;
use super::order::{NewOrder, OrderEvent, OrderView, StatusCounts};
use super::status::OrderStatus;

/// Persistence boundary for order aggregates. Implementations must create the
/// order and all of its line items atomically.
pub trait OrderStore: Send + Sync + 'static {
    fn create(&self, order: NewOrder) -> Result<OrderView, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError>;
    fn list_all(&self) -> Result<Vec<OrderView>, DomainError>;
    fn list_by_client(&self, client_id: Uuid) -> Result<Vec<OrderView>, DomainError>;
    fn count_by_client(&self, client_id: Uuid) -> Result<i64, DomainError>;
    fn count_by_status(&self, client_id: Uuid) -> Result<StatusCounts, DomainError>;
    /// Fails with [`DomainError::NotFound`] for an unknown id.
    fn update_status(&self, id: Uuid, status: OrderStatus) -> Result<OrderView, DomainError>;
}

pub trait CouponStore: Send + Sync + 'static {
    fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, DomainError>;
}

/// External postal-code → coordinates lookup.
pub trait AddressResolver: Send + Sync + 'static {
    /// Fails with [`DomainError::AddressResolution`] when the code cannot be
    /// resolved (not found or network error). Never retried by the core.
    fn resolve(&self, postal_code: &str) -> Result<Coordinates, DomainError>;
}

/// Best-effort fan-out of order events to connected viewers. Implementations
/// must never fail the triggering request.
pub trait OrderNotifier: Send + Sync + 'static {
    fn push(&self, event: &OrderEvent);
}
