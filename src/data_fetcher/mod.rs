pub mod api;
pub mod models;
pub mod processors;

pub use api::MlbClient;
