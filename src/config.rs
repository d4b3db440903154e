use std::env;
use std::fmt;
use std::str::FromStr;

use crate::application::delivery_fee::FeeSchedule;
use crate::domain::geo::Coordinates;

pub const DEFAULT_CEP_API_URL: &str = "https://cep.awesomeapi.com.br/json";

/// Runtime configuration, read from the environment in `main`. Everything
/// except `DATABASE_URL` has a default.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub store_origin: Coordinates,
    pub fee_schedule: FeeSchedule,
    pub cep_api_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_env("PORT", 8080);

        let store_origin = Coordinates::new(
            parse_env("STORE_LAT", -12.134738),
            parse_env("STORE_LNG", -44.990359),
        );
        let fee_schedule = FeeSchedule {
            base_fee: parse_env("DELIVERY_BASE_FEE", 5.0),
            per_km_rate: parse_env("DELIVERY_PER_KM_RATE", 1.0),
        };
        let cep_api_url =
            env::var("CEP_API_URL").unwrap_or_else(|_| DEFAULT_CEP_API_URL.to_string());

        Self {
            host,
            port,
            database_url,
            store_origin,
            fee_schedule,
            cep_api_url,
        }
    }
}

fn parse_env<T: FromStr>(name: &str, default: T) -> T
where
    T::Err: fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("{} must be a valid value: {}", name, e)),
        Err(_) => default,
    }
}
