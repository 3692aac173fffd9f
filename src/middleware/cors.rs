use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

/// Browser access for the careers site. With no configured origin any site
/// may call the API.
pub fn public_cors(allowed_origin: Option<&str>) -> CorsLayer {
    let origin = match allowed_origin {
        Some(origin) => match HeaderValue::from_str(origin) {
            Ok(value) => AllowOrigin::exact(value),
            Err(err) => {
                warn!(%origin, error = %err, "ignoring invalid ALLOWED_ORIGIN");
                AllowOrigin::any()
            }
        },
        None => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .allow_origin(origin)
}
