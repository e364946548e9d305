//! Explore Page
//!
//! Lists containers as search result cards. Also serves the guided tour,
//! which records the explore step when mounted under `/tour`.

use leptos::*;
use leptos_router::use_location;

use catalog_shared::client::ListParams;
use catalog_shared::views::{is_tour_route, LatestRequest, TableDataCardProps, TourContext, TourPage};
use catalog_shared::Container;

use crate::components::card::TableDataCard;
use crate::components::common::{settle, ErrorBanner, Spinner};
use crate::state::AppState;

const PAGE_SIZE: u32 = 25;
const LIST_FIELDS: &str = "owner,tags";

#[component]
pub fn ExplorePage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let location = use_location();

    if is_tour_route(&location.pathname.get_untracked()) {
        app_state.set_current_page(TourPage::ExplorePage);
    }

    let containers = create_rw_signal(Vec::<Container>::new());
    let after = create_rw_signal(None::<String>);
    let total = create_rw_signal(0_u64);
    let (loading, set_loading) = create_signal(true);
    let error = create_rw_signal(None::<String>);
    let requests = store_value(LatestRequest::new());

    let load_page = {
        let app_state = app_state.clone();
        move |cursor: Option<String>| {
            let client = app_state.client();
            let token = requests.with_value(|r| r.begin());
            let append = cursor.is_some();
            spawn_local(async move {
                set_loading.set(true);
                let mut params = ListParams::new().with_fields(LIST_FIELDS).with_limit(PAGE_SIZE);
                params.after = cursor;
                let result = client.list_containers(&params).await;
                requests.with_value(|r| {
                    r.apply(token, result, |result| {
                        if let Some(page) = settle(result, error, "list containers") {
                            after.set(page.paging.after.clone());
                            total.set(page.paging.total);
                            if append {
                                containers.update(|list| list.extend(page.data));
                            } else {
                                containers.set(page.data);
                            }
                        }
                    });
                });
                set_loading.set(false);
            });
        }
    };
    load_page(None);

    let on_load_more = move |_| load_page(after.get_untracked());

    view! {
        <div class="p-6 space-y-4">
            <div class="flex items-baseline justify-between">
                <h1 class="text-2xl font-bold text-white">"Containers"</h1>
                <span class="text-sm text-slate-400">{move || format!("{} total", total.get())}</span>
            </div>

            <ErrorBanner message=error />

            <div class="space-y-3">
                {move || containers.with(|list| {
                    list.iter()
                        .map(|c| view! { <TableDataCard card=TableDataCardProps::from_container(c) /> })
                        .collect_view()
                })}
            </div>

            <Show when=move || loading.get()>
                <Spinner />
            </Show>

            <Show when=move || !loading.get() && after.with(|a| a.is_some())>
                <div class="flex justify-center">
                    <button
                        class="px-4 py-2 text-sm bg-slate-700 hover:bg-slate-600 text-white rounded-lg"
                        on:click=on_load_more.clone()
                    >
                        "Load more"
                    </button>
                </div>
            </Show>
        </div>
    }
}
