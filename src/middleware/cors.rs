use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::error::{Error, Result};

/// Permissive CORS unless a single allowed origin is configured.
pub fn cors_layer(origin: Option<&str>) -> Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    match origin {
        None => Ok(layer.allow_origin(Any)),
        Some(origin) => {
            let value = HeaderValue::from_str(origin)
                .map_err(|e| Error::Config(format!("Invalid CORS_ORIGIN '{}': {}", origin, e)))?;
            Ok(layer.allow_origin(AllowOrigin::exact(value)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_missing_or_valid_origin() {
        assert!(cors_layer(None).is_ok());
        assert!(cors_layer(Some("https://citas.empresa.com")).is_ok());
    }

    #[test]
    fn rejects_origin_with_control_characters() {
        let err = cors_layer(Some("https://bad\norigin")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
