use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::schema::{coupons, order_fruits, order_products, order_toppings, orders};

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub client_id: Uuid,
    pub status: String,
    pub total: BigDecimal,
    pub delivery_method: String,
    pub delivery_address: Option<Value>,
    pub delivery_fee: BigDecimal,
    pub coupon_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
    pub size_price: Option<BigDecimal>,
    pub cream_id: Option<Uuid>,
    pub cream_price: Option<BigDecimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub id: Uuid,
    pub client_id: Uuid,
    pub status: String,
    pub total: BigDecimal,
    pub delivery_method: String,
    pub delivery_address: Option<Value>,
    pub delivery_fee: BigDecimal,
    pub coupon_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
    pub size_price: Option<BigDecimal>,
    pub cream_id: Option<Uuid>,
    pub cream_price: Option<BigDecimal>,
}

#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, Associations,
)]
#[diesel(table_name = order_products)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderProductRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: BigDecimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_products)]
pub struct NewOrderProductRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: BigDecimal,
}

#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, Associations,
)]
#[diesel(table_name = order_fruits)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderFruitRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub fruit_id: Uuid,
    pub price: BigDecimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_fruits)]
pub struct NewOrderFruitRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub fruit_id: Uuid,
    pub price: BigDecimal,
}

#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, Associations,
)]
#[diesel(table_name = order_toppings)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderToppingRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub topping_id: Uuid,
    pub price: BigDecimal,
    pub is_free: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_toppings)]
pub struct NewOrderToppingRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub topping_id: Uuid,
    pub price: BigDecimal,
    pub is_free: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = coupons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CouponRow {
    pub id: Uuid,
    pub code: String,
    pub discount: BigDecimal,
    pub redeemable: bool,
    pub created_at: DateTime<Utc>,
}
