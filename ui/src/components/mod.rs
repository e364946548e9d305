//! UI Components
//!
//! Components organized by page:
//! - `explore`: container listing (also the guided tour entry)
//! - `container_page`: container details with its tabs
//! - `profiler`: table profiler tab and dialogs
//! - `sample_data`: sample data tab
//! - `card`: search result card
//! - `common`: shared/reusable components

pub mod card;
pub mod common;
pub mod container_page;
pub mod explore;
pub mod profiler;
pub mod sample_data;
