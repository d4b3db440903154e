use std::sync::Arc;

use bigdecimal::{BigDecimal, FromPrimitive};

use crate::domain::errors::DomainError;
use crate::domain::geo::{distance_km, Coordinates};
use crate::domain::order::round2;
use crate::domain::ports::AddressResolver;

/// Linear delivery-fee model: `base_fee + distance_km * per_km_rate`.
///
/// The fee grows unbounded with distance; callers that need a cap must clamp
/// it themselves.
#[derive(Debug, Clone)]
pub struct FeeSchedule {
    pub base_fee: f64,
    pub per_km_rate: f64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            base_fee: 5.0,
            per_km_rate: 1.0,
        }
    }
}

/// Resolves a postal code to coordinates and prices the trip from the store
/// origin. No shared mutable state: safe to call concurrently.
pub struct DeliveryFeeCalculator {
    resolver: Arc<dyn AddressResolver>,
    origin: Coordinates,
    schedule: FeeSchedule,
}

impl DeliveryFeeCalculator {
    pub fn new(resolver: Arc<dyn AddressResolver>, origin: Coordinates, schedule: FeeSchedule) -> Self {
        Self {
            resolver,
            origin,
            schedule,
        }
    }

    /// Resolver failures surface as [`DomainError::AddressResolution`] and are
    /// not retried.
    pub fn fee_for_postal_code(&self, postal_code: &str) -> Result<BigDecimal, DomainError> {
        let coords = self.resolver.resolve(postal_code)?;
        let distance = distance_km(self.origin, coords);
        let fee = self.schedule.base_fee + distance * self.schedule.per_km_rate;
        let fee = BigDecimal::from_f64(fee).ok_or_else(|| {
            DomainError::Internal(format!("non-finite delivery fee for '{}'", postal_code))
        })?;
        Ok(round2(&fee))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::infrastructure::memory::{FailingAddressResolver, FixedAddressResolver};

    const ORIGIN: Coordinates = Coordinates {
        lat: -12.134738,
        lng: -44.990359,
    };

    #[test]
    fn postal_code_at_the_store_costs_exactly_the_base_fee() {
        let calc = DeliveryFeeCalculator::new(
            Arc::new(FixedAddressResolver::new(ORIGIN)),
            ORIGIN,
            FeeSchedule::default(),
        );

        let fee = calc.fee_for_postal_code("47800000").expect("fee failed");
        assert_eq!(fee, BigDecimal::from_str("5.00").unwrap());
    }

    #[test]
    fn fee_grows_with_distance() {
        let far = Coordinates::new(-12.25, -44.70);
        let calc = DeliveryFeeCalculator::new(
            Arc::new(FixedAddressResolver::new(far)),
            ORIGIN,
            FeeSchedule::default(),
        );

        let fee = calc.fee_for_postal_code("47800000").expect("fee failed");
        assert!(fee > BigDecimal::from_str("5.00").unwrap(), "got {}", fee);
    }

    #[test]
    fn fee_is_rounded_to_two_decimals() {
        let calc = DeliveryFeeCalculator::new(
            Arc::new(FixedAddressResolver::new(Coordinates::new(-12.20, -44.95))),
            ORIGIN,
            FeeSchedule::default(),
        );

        let fee = calc.fee_for_postal_code("47800000").expect("fee failed");
        assert_eq!(fee.fractional_digit_count(), 2, "got {}", fee);
    }

    #[test]
    fn schedule_is_applied_not_hardcoded() {
        let schedule = FeeSchedule {
            base_fee: 2.0,
            per_km_rate: 0.0,
        };
        let calc = DeliveryFeeCalculator::new(
            Arc::new(FixedAddressResolver::new(Coordinates::new(-13.0, -45.0))),
            ORIGIN,
            schedule,
        );

        let fee = calc.fee_for_postal_code("47800000").expect("fee failed");
        assert_eq!(fee, BigDecimal::from_str("2.00").unwrap());
    }

    #[test]
    fn resolver_failure_is_surfaced() {
        let calc = DeliveryFeeCalculator::new(
            Arc::new(FailingAddressResolver),
            ORIGIN,
            FeeSchedule::default(),
        );

        let err = calc.fee_for_postal_code("00000000").unwrap_err();
        assert!(matches!(err, DomainError::AddressResolution(_)));
    }
}
