//! Global State Management
//!
//! This module manages the global application state including:
//! - API location and the shared client
//! - Guided tour page
//! - Resource permissions of the current user

use leptos::*;
use leptos_router::NavigateOptions;

use catalog_shared::views::{Navigator, OperationPermission, TourContext, TourPage};

use crate::client::{api_base_url, catalog_client, CatalogClient};

/// Global application state
#[derive(Clone)]
pub struct AppState {
    /// Catalog API root (`{origin}/api/v1`)
    pub api_url: String,

    /// Page the guided tour is showing; `None` outside the tour
    pub tour_page: RwSignal<Option<TourPage>>,

    /// Permissions for the entity being viewed
    pub permissions: RwSignal<OperationPermission>,

    /// Page-level error message
    pub error: RwSignal<Option<String>>,
}

impl AppState {
    /// Create a new app state with default values
    pub fn new() -> Self {
        Self::with_api_url(api_base_url())
    }

    pub fn with_api_url(api_url: String) -> Self {
        Self {
            api_url,
            tour_page: create_rw_signal(None),
            // The server enforces access; the UI only hides actions
            permissions: create_rw_signal(OperationPermission::all()),
            error: create_rw_signal(None),
        }
    }

    pub fn client(&self) -> CatalogClient {
        catalog_client(&self.api_url)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl TourContext for AppState {
    fn set_current_page(&self, page: TourPage) {
        tracing::debug!("Tour page -> {:?}", page);
        self.tour_page.set(Some(page));
    }
}

/// [`Navigator`] over the router's `use_navigate` handle
pub struct RouterNavigator<F> {
    navigate: F,
}

impl<F: Fn(&str, NavigateOptions)> RouterNavigator<F> {
    pub fn new(navigate: F) -> Self {
        Self { navigate }
    }
}

impl<F: Fn(&str, NavigateOptions)> Navigator for RouterNavigator<F> {
    fn navigate(&self, path: &str) {
        (self.navigate)(path, NavigateOptions::default());
    }
}
