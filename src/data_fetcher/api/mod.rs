pub mod http_client;
pub mod urls;
mod fetch_utils;
mod mlb_api;

// Re-export URL utilities
pub use urls::*;
// Re-export HTTP client utilities
pub use http_client::create_http_client_with_timeout;
// Re-export the typed client
pub use mlb_api::MlbClient;
