//! Container Details Page
//!
//! `/container/:fqn` with the profiler and sample data tabs.

use leptos::*;
use leptos_router::use_params_map;

use catalog_shared::client::ListParams;
use catalog_shared::views::LatestRequest;
use catalog_shared::{decode_fqn, Container};

use crate::components::common::{ContainerIcon, ErrorBanner, Spinner};
use crate::components::profiler::TableProfiler;
use crate::components::sample_data::SampleDataTable;
use crate::state::AppState;

const CONTAINER_FIELDS: &str = "owner,tags,followers,dataModel,tableProfilerConfig,customMetrics,testSuite";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Profiler,
    SampleData,
}

#[component]
pub fn ContainerPage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let params = use_params_map();

    let container = create_rw_signal(None::<Container>);
    let (loading, set_loading) = create_signal(true);
    let error = create_rw_signal(None::<String>);
    let tab = create_rw_signal(Tab::Profiler);
    let requests = store_value(LatestRequest::new());

    let fqn = move || {
        params.with(|p| {
            p.get("fqn")
                .map(|raw| decode_fqn(raw).map(|f| f.into_owned()).unwrap_or_else(|_| raw.clone()))
        })
    };

    {
        let app_state = app_state.clone();
        create_effect(move |_| {
            let Some(fqn) = fqn() else {
                return;
            };
            let client = app_state.client();
            let token = requests.with_value(|r| r.begin());
            spawn_local(async move {
                set_loading.set(true);
                error.set(None);
                let params = ListParams::new().with_fields(CONTAINER_FIELDS);
                let result = client.get_container_by_fqn(&fqn, &params).await;
                requests.with_value(|r| {
                    r.apply(token, result, |result| match result {
                        Ok(loaded) => container.set(Some(loaded)),
                        Err(err) => {
                            tracing::warn!("Failed to load container {}: {}", fqn, err);
                            container.set(None);
                            error.set(Some(err.to_string()));
                        }
                    });
                });
                set_loading.set(false);
            });
        });
    }

    let permissions = app_state.permissions;
    let tab_class = move |t: Tab| {
        if tab.get() == t {
            "px-4 py-2 text-sm font-medium text-white border-b-2 border-blue-500"
        } else {
            "px-4 py-2 text-sm font-medium text-slate-400 hover:text-white border-b-2 border-transparent"
        }
    };

    view! {
        <div class="p-6 space-y-6">
            <ErrorBanner message=error />

            <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                {move || container.get().map(|c| {
                    let header = c.clone();
                    view! {
                        <div>
                            <div class="flex items-center gap-3">
                                <ContainerIcon class="w-6 h-6 text-blue-400" />
                                <h1 class="text-2xl font-bold text-white">{header.label().to_string()}</h1>
                                {header.deleted.then(|| view! {
                                    <span class="px-2 py-0.5 text-xs rounded bg-red-500/20 text-red-400 border border-red-500/30">
                                        "Deleted"
                                    </span>
                                })}
                            </div>
                            <p class="text-sm text-slate-500 mt-1">{header.fully_qualified_name.clone()}</p>
                            {header.description.clone().map(|d| view! {
                                <p class="text-sm text-slate-300 mt-2">{d}</p>
                            })}
                        </div>

                        <div class="flex gap-2 border-b border-slate-700">
                            <button class=move || tab_class(Tab::Profiler) on:click=move |_| tab.set(Tab::Profiler)>
                                "Profiler"
                            </button>
                            <Show when=move || permissions.get().can_view_sample_data()>
                                <button class=move || tab_class(Tab::SampleData) on:click=move |_| tab.set(Tab::SampleData)>
                                    "Sample Data"
                                </button>
                            </Show>
                        </div>

                        {move || match tab.get() {
                            Tab::Profiler if permissions.get().can_view_profile() => {
                                view! { <TableProfiler container=c.clone() test_summary=c.test_summary() /> }.into_view()
                            }
                            Tab::SampleData if permissions.get().can_view_sample_data() => {
                                view! { <SampleDataTable container=c.clone() /> }.into_view()
                            }
                            _ => view! {
                                <p class="text-sm text-slate-500">"You do not have access to this tab"</p>
                            }.into_view(),
                        }}
                    }
                })}
            </Show>
        </div>
    }
}
