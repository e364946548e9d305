//! Catalog UI Library
//!
//! Container pages of the data catalog, rendered with Leptos.
//!
//! # Modules
//!
//! - [`app`]: Root application component and routing
//! - [`client`]: gloo-net transport for the shared container client
//! - [`components`]: UI components (search card, profiler, sample data, forms)
//! - [`state`]: Global state management

pub mod app;
pub mod client;
pub mod components;
pub mod state;

pub use app::App;
