use std::sync::OnceLock;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::errors::DomainError;
use crate::domain::geo::Coordinates;
use crate::domain::ports::AddressResolver;

/// Postal-code resolver backed by the AwesomeAPI CEP service
/// (`https://cep.awesomeapi.com.br/json/{cep}`).
///
/// Uses a blocking HTTP client because resolution always runs on the actix
/// blocking pool, next to the Diesel work; the client is built lazily so the
/// resolver can be constructed on an async thread.
pub struct CepAddressResolver {
    base_url: String,
    client: OnceLock<reqwest::blocking::Client>,
}

/// AwesomeAPI returns coordinates as decimal strings.
#[derive(Debug, Deserialize)]
struct CepResponse {
    lat: Option<String>,
    lng: Option<String>,
}

impl CepAddressResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: OnceLock::new(),
        }
    }

    fn client(&self) -> &reqwest::blocking::Client {
        self.client.get_or_init(|| {
            reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("failed to build HTTP client")
        })
    }
}

impl AddressResolver for CepAddressResolver {
    fn resolve(&self, postal_code: &str) -> Result<Coordinates, DomainError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), postal_code);

        let response = self
            .client()
            .get(&url)
            .send()
            .map_err(|e| DomainError::AddressResolution(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DomainError::AddressResolution(format!(
                "lookup for '{}' returned HTTP {}",
                postal_code,
                response.status()
            )));
        }

        let body: CepResponse = response
            .json()
            .map_err(|e| DomainError::AddressResolution(e.to_string()))?;

        parse_coordinates(postal_code, body)
    }
}

fn parse_coordinates(postal_code: &str, body: CepResponse) -> Result<Coordinates, DomainError> {
    let (lat, lng) = body.lat.zip(body.lng).ok_or_else(|| {
        DomainError::AddressResolution(format!("no coordinates for '{}'", postal_code))
    })?;

    let lat: f64 = lat.parse().map_err(|_| {
        DomainError::AddressResolution(format!("invalid latitude for '{}'", postal_code))
    })?;
    let lng: f64 = lng.parse().map_err(|_| {
        DomainError::AddressResolution(format!("invalid longitude for '{}'", postal_code))
    })?;

    Ok(Coordinates::new(lat, lng))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_string_coordinates() {
        let body = CepResponse {
            lat: Some("-12.134738".to_string()),
            lng: Some("-44.990359".to_string()),
        };
        let coords = parse_coordinates("47800000", body).expect("parse failed");
        assert_eq!(coords, Coordinates::new(-12.134738, -44.990359));
    }

    #[test]
    fn missing_coordinates_fail_resolution() {
        let body = CepResponse {
            lat: None,
            lng: Some("-44.99".to_string()),
        };
        let err = parse_coordinates("47800000", body).unwrap_err();
        assert!(matches!(err, DomainError::AddressResolution(_)));
    }

    #[test]
    fn unparseable_coordinates_fail_resolution() {
        let body = CepResponse {
            lat: Some("not-a-number".to_string()),
            lng: Some("-44.99".to_string()),
        };
        let err = parse_coordinates("47800000", body).unwrap_err();
        assert!(matches!(err, DomainError::AddressResolution(_)));
    }
}
