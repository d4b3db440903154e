use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::errors::DomainError;
use super::order::DeliveryMethod;

/// Lifecycle of an order.
///
/// `AwaitingConfirmation` is the initial state. `ReadyForPickup`,
/// `OutForDelivery` and `Canceled` are terminal: no staff action moves an
/// order out of them (the administrative override in
/// [`OrderService::set_status`](crate::application::order_service::OrderService::set_status)
/// deliberately bypasses the machine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    AwaitingConfirmation,
    InPreparation,
    ReadyForPickup,
    OutForDelivery,
    Canceled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::ReadyForPickup | OrderStatus::OutForDelivery | OrderStatus::Canceled
        )
    }

    /// Staff accepted the order: any non-terminal state moves to `InPreparation`.
    pub fn accept(self) -> Result<OrderStatus, DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidTransition(format!(
                "cannot accept an order in state '{}'",
                self
            )));
        }
        Ok(OrderStatus::InPreparation)
    }

    /// Staff finished preparing the order. Only valid from `InPreparation`;
    /// the terminal-success state depends on the delivery method.
    pub fn finalize(self, method: DeliveryMethod) -> Result<OrderStatus, DomainError> {
        if self != OrderStatus::InPreparation {
            return Err(DomainError::InvalidTransition(format!(
                "cannot finalize an order in state '{}'",
                self
            )));
        }
        Ok(match method {
            DeliveryMethod::Pickup => OrderStatus::ReadyForPickup,
            DeliveryMethod::Delivery => OrderStatus::OutForDelivery,
        })
    }

    /// Cancel the order. Repeating a cancel on an already-canceled order is an
    /// idempotent no-op; canceling a fulfilled order is rejected.
    pub fn cancel(self) -> Result<OrderStatus, DomainError> {
        match self {
            OrderStatus::Canceled => Ok(OrderStatus::Canceled),
            OrderStatus::ReadyForPickup | OrderStatus::OutForDelivery => {
                Err(DomainError::InvalidTransition(format!(
                    "cannot cancel an order in state '{}'",
                    self
                )))
            }
            _ => Ok(OrderStatus::Canceled),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::AwaitingConfirmation => "awaiting_confirmation",
            OrderStatus::InPreparation => "in_preparation",
            OrderStatus::ReadyForPickup => "ready_for_pickup",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Canceled => "canceled",
        }
    }

    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::AwaitingConfirmation,
        OrderStatus::InPreparation,
        OrderStatus::ReadyForPickup,
        OrderStatus::OutForDelivery,
        OrderStatus::Canceled,
    ];
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "awaiting_confirmation" => Ok(OrderStatus::AwaitingConfirmation),
            "in_preparation" => Ok(OrderStatus::InPreparation),
            "ready_for_pickup" => Ok(OrderStatus::ReadyForPickup),
            "out_for_delivery" => Ok(OrderStatus::OutForDelivery),
            "canceled" => Ok(OrderStatus::Canceled),
            other => Err(DomainError::Internal(format!(
                "unknown order status '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_moves_non_terminal_states_to_in_preparation() {
        assert_eq!(
            OrderStatus::AwaitingConfirmation.accept().unwrap(),
            OrderStatus::InPreparation
        );
        assert_eq!(
            OrderStatus::InPreparation.accept().unwrap(),
            OrderStatus::InPreparation
        );
    }

    #[test]
    fn accept_is_rejected_from_terminal_states() {
        for s in [
            OrderStatus::ReadyForPickup,
            OrderStatus::OutForDelivery,
            OrderStatus::Canceled,
        ] {
            assert!(matches!(
                s.accept(),
                Err(DomainError::InvalidTransition(_))
            ));
        }
    }

    #[test]
    fn finalize_picks_terminal_state_from_delivery_method() {
        assert_eq!(
            OrderStatus::InPreparation
                .finalize(DeliveryMethod::Pickup)
                .unwrap(),
            OrderStatus::ReadyForPickup
        );
        assert_eq!(
            OrderStatus::InPreparation
                .finalize(DeliveryMethod::Delivery)
                .unwrap(),
            OrderStatus::OutForDelivery
        );
    }

    #[test]
    fn finalize_requires_in_preparation() {
        for s in [
            OrderStatus::AwaitingConfirmation,
            OrderStatus::ReadyForPickup,
            OrderStatus::OutForDelivery,
            OrderStatus::Canceled,
        ] {
            assert!(s.finalize(DeliveryMethod::Pickup).is_err());
        }
    }

    #[test]
    fn cancel_is_idempotent_on_canceled_orders() {
        let first = OrderStatus::AwaitingConfirmation.cancel().unwrap();
        assert_eq!(first, OrderStatus::Canceled);
        // Second cancel does not error and leaves the state unchanged.
        assert_eq!(first.cancel().unwrap(), OrderStatus::Canceled);
    }

    #[test]
    fn cancel_is_rejected_on_fulfilled_orders() {
        assert!(OrderStatus::ReadyForPickup.cancel().is_err());
        assert!(OrderStatus::OutForDelivery.cancel().is_err());
    }

    #[test]
    fn as_str_round_trips_through_from_str() {
        for s in OrderStatus::ALL {
            assert_eq!(s.as_str().parse::<OrderStatus>().unwrap(), s);
        }
    }
}
