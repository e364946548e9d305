//! Shared types for the catalog UI and CLI
//!
//! This crate contains everything both front ends need to talk to the
//! catalog's containers resource:
//! - Entity, profile and data quality types
//! - FQN encoding for path segments
//! - The typed `ContainerClient` over a pluggable `Transport`
//! - View models for the profiler, sample data and search result card

pub mod client;
pub mod entity;
pub mod fqn;
pub mod profile;
pub mod quality;
pub mod views;

pub use client::{ClientError, ContainerClient, Transport};
pub use entity::*;
pub use fqn::{decode_fqn, encode_fqn};
pub use profile::*;
pub use quality::*;
