//! Root Application Component
//!
//! This module contains the main App component that sets up:
//! - Routing for the explore, tour and container pages
//! - Global state providers
//! - Page shell with the top bar

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use catalog_shared::views::TOUR_ROUTE;

use crate::components::common::ContainerIcon;
use crate::components::container_page::ContainerPage;
use crate::components::explore::ExplorePage;
use crate::state::AppState;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let app_state = AppState::new();
    tracing::info!("Catalog API at {}", app_state.api_url);
    provide_context(app_state);

    view! {
        <Title text="Data Catalog" />
        <Router>
            <Shell>
                <Routes>
                    <Route path="/" view=ExplorePage />
                    <Route path=TOUR_ROUTE view=ExplorePage />
                    <Route path="/container/:fqn" view=ContainerPage />
                    <Route path="/*" view=NotFoundPage />
                </Routes>
            </Shell>
        </Router>
    }
}

/// Top bar and scrolling content area
#[component]
fn Shell(children: Children) -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let tour_page = app_state.tour_page;

    view! {
        <div class="min-h-screen bg-slate-900 text-slate-200">
            <header class="h-14 flex items-center justify-between px-6 border-b border-slate-700 bg-slate-800">
                <A href="/" class="flex items-center gap-2 text-white font-semibold">
                    <ContainerIcon class="w-5 h-5 text-blue-400" />
                    "Data Catalog"
                </A>
                {move || tour_page.get().map(|page| view! {
                    <span class="px-2 py-0.5 text-xs rounded bg-blue-500/20 text-blue-400 border border-blue-500/30">
                        {format!("Tour: {:?}", page)}
                    </span>
                })}
            </header>
            <main class="max-w-6xl mx-auto">{children()}</main>
        </div>
    }
}

/// 404 Not Found page
#[component]
fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex-1 flex items-center justify-center p-6">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-slate-500 mb-4">"404"</h1>
                <p class="text-xl text-slate-400 mb-6">"Page not found"</p>
                <a href="/" class="px-4 py-2 bg-blue-500 hover:bg-blue-600 text-white rounded-lg">"Go to Explore"</a>
            </div>
        </div>
    }
}
