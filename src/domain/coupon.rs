use bigdecimal::BigDecimal;
use uuid::Uuid;

/// A discount coupon. Read-only from this core's perspective; the
/// `redeemable` flag is flipped by an external lifecycle.
#[derive(Debug, Clone)]
pub struct Coupon {
    pub id: Uuid,
    pub code: String,
    pub discount: BigDecimal,
    pub redeemable: bool,
}

/// The coupon may be redeemed only on the 1st, 11th, 21st, ... order.
pub fn eligible_on_next_order(prior_orders: i64) -> bool {
    (prior_orders + 1) % 10 == 1
}

#[cfg(test)]
mod tests {
    use super::eligible_on_next_order;

    #[test]
    fn first_order_is_eligible() {
        assert!(eligible_on_next_order(0));
    }

    #[test]
    fn milestone_orders_are_eligible() {
        assert!(eligible_on_next_order(10));
        assert!(eligible_on_next_order(20));
        assert!(eligible_on_next_order(30));
    }

    #[test]
    fn orders_between_milestones_are_not_eligible() {
        for n in 1..10 {
            assert!(!eligible_on_next_order(n), "n = {}", n);
        }
        assert!(!eligible_on_next_order(11));
    }
}
