pub mod coupon;
pub mod errors;
pub mod geo;
pub mod order;
pub mod ports;
pub mod status;
