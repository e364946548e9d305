//! Catalog Client
//!
//! The typed [`ContainerClient`] lives in `catalog-shared`; this module
//! supplies the browser side of it:
//!
//! - **GlooTransport**: performs each request with `gloo-net` fetch
//! - **api_base_url**: API root derived from the page origin

mod gloo;

pub use gloo::GlooTransport;

use catalog_shared::ContainerClient;

/// Container client used by the components
pub type CatalogClient = ContainerClient<GlooTransport>;

/// Fallback when the page origin cannot be read
const DEFAULT_ORIGIN: &str = "http://localhost:8585";

/// `{origin}/api/v1`
pub fn api_base_url() -> String {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
    format!("{}/api/v1", origin.trim_end_matches('/'))
}

pub fn catalog_client(base_url: &str) -> CatalogClient {
    ContainerClient::new(GlooTransport::new(base_url))
}
