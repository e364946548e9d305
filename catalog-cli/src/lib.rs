//! Catalog CLI library
//!
//! Command definitions, configuration loading and the reqwest transport
//! behind the `catalog` binary.

pub mod cli;
pub mod config;
pub mod transport;

pub use config::CatalogConfig;
pub use transport::ReqwestTransport;
