pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod notifications;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use application::order_service::OrderService;
pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool
        .get()
        .expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::orders::place_order,
        handlers::orders::list_all_orders,
        handlers::orders::list_client_orders,
        handlers::orders::get_order_counts,
        handlers::orders::get_delivery_fee,
        handlers::orders::accept_order,
        handlers::orders::finalize_order,
        handlers::orders::cancel_order,
        handlers::orders::set_order_status,
        handlers::coupons::apply_coupon,
    ),
    tags(
        (name = "orders", description = "Order placement and lifecycle"),
        (name = "coupons", description = "Coupon redemption previews"),
    )
)]
pub struct ApiDoc;

/// Register the shared order service and every route on `cfg`.
///
/// Split out from [`build_server`] so tests can mount the same routes on an
/// in-process `actix_web::test` app with fake ports.
pub fn routes(service: OrderService) -> impl Fn(&mut web::ServiceConfig) + Clone {
    move |cfg| {
        cfg.app_data(web::Data::new(service.clone()));
        cfg.service(
            web::scope("/orders")
                .route("", web::post().to(handlers::orders::place_order))
                .route("", web::get().to(handlers::orders::list_all_orders))
                .route("/delivery-fee", web::post().to(handlers::orders::get_delivery_fee))
                .route("/{client_id}/count", web::get().to(handlers::orders::get_order_counts))
                .route("/{order_id}/accept", web::put().to(handlers::orders::accept_order))
                .route("/{order_id}/finalize", web::put().to(handlers::orders::finalize_order))
                .route("/{order_id}/cancel", web::put().to(handlers::orders::cancel_order))
                .route("/{order_id}/status", web::put().to(handlers::orders::set_order_status))
                .route("/{client_id}", web::get().to(handlers::orders::list_client_orders)),
        );
        cfg.service(
            web::scope("/coupons").route("/apply", web::post().to(handlers::coupons::apply_coupon)),
        );
    }
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    service: OrderService,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(routes(service.clone()))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
