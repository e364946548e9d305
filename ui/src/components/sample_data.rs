//! Sample Data
//!
//! Sample data tab of a container page. Rows come from the sample data
//! endpoint; column types come from the page's container.

use leptos::*;

use catalog_shared::views::{can_delete_sample_data, LatestRequest, SampleData, SampleDataValue};
use catalog_shared::Container;

use crate::components::common::{settle, ErrorBanner, Spinner, TrashIcon};
use crate::state::AppState;

#[component]
pub fn SampleDataTable(container: Container) -> impl IntoView {
    let app_state = expect_context::<AppState>();

    let id = container.id;
    let is_deleted = container.deleted;
    let container = store_value(container);

    let sample = create_rw_signal(None::<SampleData>);
    let (loading, set_loading) = create_signal(true);
    let (deleting, set_deleting) = create_signal(false);
    let error = create_rw_signal(None::<String>);
    let requests = store_value(LatestRequest::new());

    let load = {
        let app_state = app_state.clone();
        move || {
            let client = app_state.client();
            let token = requests.with_value(|r| r.begin());
            spawn_local(async move {
                set_loading.set(true);
                let result = client.get_sample_data(&id).await;
                requests.with_value(|r| {
                    r.apply(token, result, |result| {
                        if let Some(response) = settle(result, error, "load sample data") {
                            let data = response.sample_data.as_ref().map(|data| {
                                container.with_value(|c| SampleData::from_table_data(data, Some(c)))
                            });
                            sample.set(data);
                        }
                    });
                });
                set_loading.set(false);
            });
        }
    };
    load();

    let on_delete = {
        let app_state = app_state.clone();
        move |_| {
            if deleting.get_untracked() {
                return;
            }
            set_deleting.set(true);
            let client = app_state.client();
            spawn_local(async move {
                match client.delete_sample_data(&id).await {
                    Ok(_) => {
                        tracing::info!("Deleted sample data for {}", id);
                        sample.set(None);
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
                set_deleting.set(false);
            });
        }
    };

    let permissions = app_state.permissions;
    let can_delete = move || {
        can_delete_sample_data(&permissions.get(), is_deleted)
            && sample.with(|s| s.as_ref().map(|s| !s.is_empty()).unwrap_or(false))
    };

    view! {
        <div class="space-y-4">
            <ErrorBanner message=error />

            <Show when=can_delete>
                <div class="flex justify-end">
                    <button
                        class="flex items-center gap-2 px-3 py-1.5 text-sm bg-red-500/20 text-red-400 hover:bg-red-500/30 rounded-lg disabled:opacity-50"
                        disabled=move || deleting.get()
                        on:click=on_delete.clone()
                    >
                        <TrashIcon class="w-4 h-4" />
                        "Delete"
                    </button>
                </div>
            </Show>

            <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                {move || match sample.get() {
                    Some(data) if !data.is_empty() => view! { <SampleGrid data=data /> }.into_view(),
                    _ => view! {
                        <div class="bg-slate-800 rounded-xl border border-slate-700 p-8 text-center text-sm text-slate-500">
                            "No sample data available"
                        </div>
                    }.into_view(),
                }}
            </Show>
        </div>
    }
}

#[component]
fn SampleGrid(data: SampleData) -> impl IntoView {
    let SampleData { columns, rows } = data;
    let width = columns.len();

    view! {
        <div class="bg-slate-800 rounded-xl border border-slate-700 overflow-x-auto">
            <table class="w-full">
                <thead class="bg-slate-800/50 border-b border-slate-700">
                    <tr>
                        {columns.into_iter().map(|column| view! {
                            <th class="px-4 py-3 text-left text-xs font-medium text-slate-400 uppercase tracking-wider">
                                {column.name}
                                {(!column.data_type.is_empty()).then(|| view! {
                                    <span class="ml-1 normal-case text-slate-500">{format!("({})", column.data_type)}</span>
                                })}
                            </th>
                        }).collect_view()}
                    </tr>
                </thead>
                <tbody class="divide-y divide-slate-700">
                    {rows.into_iter().map(|row| view! {
                        <tr class="hover:bg-slate-700/30 transition-colors">
                            {(0..width).map(|i| {
                                let value = row.get(i).cloned().unwrap_or(SampleDataValue::Null);
                                let class = if value.is_structured() {
                                    "px-4 py-2 text-xs font-mono text-slate-300 whitespace-pre"
                                } else {
                                    "px-4 py-2 text-sm text-slate-300"
                                };
                                view! { <td class=class>{value.display()}</td> }
                            }).collect_view()}
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
        </div>
    }
}
