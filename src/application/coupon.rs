use std::sync::Arc;

use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::domain::coupon::eligible_on_next_order;
use crate::domain::errors::DomainError;
use crate::domain::ports::{CouponStore, OrderStore};

/// Result of a coupon evaluation. A missing code yields a zero discount and
/// no coupon reference.
#[derive(Debug, Clone)]
pub struct CouponOutcome {
    pub discount: BigDecimal,
    pub coupon_id: Option<Uuid>,
}

impl CouponOutcome {
    fn none() -> Self {
        Self {
            discount: BigDecimal::from(0),
            coupon_id: None,
        }
    }
}

/// Decides whether a coupon may be applied to a client's next order.
///
/// Both the order-placement path and the apply-coupon preview share this
/// evaluation: the milestone check counts all prior orders and the
/// `redeemable` flag is always enforced.
pub struct CouponEligibilityEngine {
    orders: Arc<dyn OrderStore>,
    coupons: Arc<dyn CouponStore>,
}

impl CouponEligibilityEngine {
    pub fn new(orders: Arc<dyn OrderStore>, coupons: Arc<dyn CouponStore>) -> Self {
        Self { orders, coupons }
    }

    pub fn evaluate(
        &self,
        client_id: Uuid,
        coupon_code: Option<&str>,
    ) -> Result<CouponOutcome, DomainError> {
        let Some(code) = coupon_code else {
            return Ok(CouponOutcome::none());
        };

        let prior_orders = self.orders.count_by_client(client_id)?;
        log::info!(
            "evaluating coupon '{}' for client {} with {} prior orders",
            code,
            client_id,
            prior_orders
        );

        if !eligible_on_next_order(prior_orders) {
            return Err(DomainError::CouponNotEligible);
        }

        let coupon = self
            .coupons
            .find_by_code(code)?
            .ok_or(DomainError::InvalidCoupon)?;

        if !coupon.redeemable {
            return Err(DomainError::CouponNotRedeemable);
        }

        log::info!("coupon '{}' accepted, discount {}", code, coupon.discount);
        Ok(CouponOutcome {
            discount: coupon.discount,
            coupon_id: Some(coupon.id),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::domain::coupon::Coupon;
    use crate::domain::order::{DeliveryMethod, NewOrder};
    use crate::domain::status::OrderStatus;
    use crate::infrastructure::memory::{MemoryCouponStore, MemoryOrderStore};

    fn pickup_order(client_id: Uuid) -> NewOrder {
        NewOrder {
            client_id,
            total: BigDecimal::from_str("10.00").unwrap(),
            delivery_method: DeliveryMethod::Pickup,
            delivery_address: None,
            delivery_fee: BigDecimal::from(0),
            coupon_id: None,
            status: OrderStatus::AwaitingConfirmation,
            products: vec![],
            fruits: vec![],
            toppings: vec![],
            size: None,
            cream: None,
        }
    }

    fn engine_with(
        prior_orders: i64,
        coupon: Option<Coupon>,
    ) -> (CouponEligibilityEngine, Uuid) {
        let orders = Arc::new(MemoryOrderStore::new());
        let coupons = Arc::new(MemoryCouponStore::new());
        let client_id = Uuid::new_v4();
        for _ in 0..prior_orders {
            orders.create(pickup_order(client_id)).expect("seed failed");
        }
        if let Some(c) = coupon {
            coupons.insert(c);
        }
        (CouponEligibilityEngine::new(orders, coupons), client_id)
    }

    fn promo(redeemable: bool) -> Coupon {
        Coupon {
            id: Uuid::new_v4(),
            code: "PROMO10".to_string(),
            discount: BigDecimal::from_str("3.00").unwrap(),
            redeemable,
        }
    }

    #[test]
    fn no_code_means_zero_discount_and_no_lookups() {
        let (engine, client_id) = engine_with(5, None);

        let outcome = engine.evaluate(client_id, None).expect("evaluate failed");
        assert_eq!(outcome.discount, BigDecimal::from(0));
        assert!(outcome.coupon_id.is_none());
    }

    #[test]
    fn first_order_is_eligible() {
        let coupon = promo(true);
        let expected_id = coupon.id;
        let (engine, client_id) = engine_with(0, Some(coupon));

        let outcome = engine
            .evaluate(client_id, Some("PROMO10"))
            .expect("evaluate failed");
        assert_eq!(outcome.discount, BigDecimal::from_str("3.00").unwrap());
        assert_eq!(outcome.coupon_id, Some(expected_id));
    }

    #[test]
    fn fifth_order_is_not_eligible() {
        let (engine, client_id) = engine_with(5, Some(promo(true)));

        let err = engine.evaluate(client_id, Some("PROMO10")).unwrap_err();
        assert!(matches!(err, DomainError::CouponNotEligible));
    }

    #[test]
    fn eleventh_order_is_eligible_again() {
        let (engine, client_id) = engine_with(10, Some(promo(true)));

        assert!(engine.evaluate(client_id, Some("PROMO10")).is_ok());
    }

    #[test]
    fn unknown_code_fails_after_the_milestone_check() {
        let (engine, client_id) = engine_with(0, None);

        let err = engine.evaluate(client_id, Some("NOPE")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidCoupon));
    }

    #[test]
    fn non_redeemable_coupon_is_rejected() {
        let (engine, client_id) = engine_with(0, Some(promo(false)));

        let err = engine.evaluate(client_id, Some("PROMO10")).unwrap_err();
        assert!(matches!(err, DomainError::CouponNotRedeemable));
    }

    #[test]
    fn ineligibility_wins_over_unknown_code() {
        // The milestone check runs before the coupon lookup.
        let (engine, client_id) = engine_with(3, None);

        let err = engine.evaluate(client_id, Some("NOPE")).unwrap_err();
        assert!(matches!(err, DomainError::CouponNotEligible));
    }
}
