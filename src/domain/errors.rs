use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid coupon code")]
    InvalidCoupon,

    #[error("Coupon can only be redeemed on the 1st, 11th, 21st and every tenth order after")]
    CouponNotEligible,

    #[error("Coupon is no longer redeemable")]
    CouponNotRedeemable,

    #[error("Could not resolve postal code: {0}")]
    AddressResolution(String),

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("Order not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}
