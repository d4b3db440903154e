pub mod coupon;
pub mod delivery_fee;
pub mod order_service;
