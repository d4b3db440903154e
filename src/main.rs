use std::sync::Arc;

use acai_order_service::application::coupon::CouponEligibilityEngine;
use acai_order_service::application::delivery_fee::DeliveryFeeCalculator;
use acai_order_service::config::AppConfig;
use acai_order_service::infrastructure::cep_resolver::CepAddressResolver;
use acai_order_service::infrastructure::order_repo::{DieselCouponStore, DieselOrderStore};
use acai_order_service::notifications::NotificationHub;
use acai_order_service::{build_server, create_pool, run_migrations, OrderService};
use dotenvy::dotenv;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env();

    let pool = create_pool(&config.database_url);
    run_migrations(&pool);

    let store = Arc::new(DieselOrderStore::new(pool.clone()));
    let coupons = Arc::new(DieselCouponStore::new(pool));
    let resolver = Arc::new(CepAddressResolver::new(config.cep_api_url.clone()));
    let fees = Arc::new(DeliveryFeeCalculator::new(
        resolver,
        config.store_origin,
        config.fee_schedule.clone(),
    ));
    let engine = Arc::new(CouponEligibilityEngine::new(store.clone(), coupons));
    let hub = NotificationHub::start();

    let service = OrderService::new(store, fees, engine, hub);

    log::info!(
        "Starting server at http://{}:{}",
        config.host,
        config.port
    );

    build_server(service, &config.host, config.port)?.await
}
