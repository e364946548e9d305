//! Custom metric dialog

use leptos::*;

use catalog_shared::views::{existing_metrics, CustomMetricForm};
use catalog_shared::Container;

use super::MetricTarget;
use crate::components::common::{ErrorBanner, Modal};
use crate::state::AppState;

#[component]
pub fn CustomMetricModal(
    container: Container,
    target: MetricTarget,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_update: Callback<Container>,
) -> impl IntoView {
    let app_state = expect_context::<AppState>();

    let initial = match target {
        MetricTarget::Table => CustomMetricForm::table_metric(),
        MetricTarget::Column(column) => CustomMetricForm::column_metric(column),
    };
    let is_column_metric = initial.is_column_metric;
    let form = create_rw_signal(initial);
    let (saving, set_saving) = create_signal(false);
    let error = create_rw_signal(None::<String>);

    let column_names: Vec<String> = container.columns().iter().map(|c| c.name.clone()).collect();
    let container = store_value(container);

    let on_save = move |_| {
        let draft = form.get_untracked();
        let validated = container.with_value(|c| {
            draft.validate(existing_metrics(c, draft.column_name.as_deref()))
        });
        let metric = match validated {
            Ok(metric) => metric,
            Err(err) => {
                error.set(Some(err.to_string()));
                return;
            }
        };

        error.set(None);
        let id = container.with_value(|c| c.id);
        let client = app_state.client();
        spawn_local(async move {
            set_saving.set(true);
            match client.add_custom_metric(&id, &metric).await {
                Ok(updated) => {
                    tracing::info!("Saved custom metric '{}'", metric.name);
                    on_update.call(updated);
                }
                Err(err) => error.set(Some(err.to_string())),
            }
            set_saving.set(false);
        });
    };

    view! {
        <Modal title="Custom Metric" on_close=on_close>
            <ErrorBanner message=error />

            <label class="block">
                <span class="text-sm text-slate-400">"Name"</span>
                <input
                    type="text"
                    class="w-full mt-1 px-3 py-2 bg-slate-900 border border-slate-700 rounded-lg text-white"
                    prop:value=move || form.with(|f| f.name.clone())
                    on:input=move |ev| {
                        let name = event_target_value(&ev);
                        form.update(|f| f.name = name);
                    }
                />
            </label>

            <Show when=move || is_column_metric>
                <label class="block">
                    <span class="text-sm text-slate-400">"Column"</span>
                    <select
                        class="w-full mt-1 px-3 py-2 bg-slate-900 border border-slate-700 rounded-lg text-white"
                        on:change=move |ev| {
                            let column = event_target_value(&ev);
                            form.update(|f| f.column_name = (!column.is_empty()).then_some(column));
                        }
                    >
                        <option value="">"Select a column"</option>
                        {column_names.iter().map(|name| {
                            let value = name.clone();
                            let selected = name.clone();
                            view! {
                                <option
                                    value=value
                                    selected=move || form.with(|f| f.column_name.as_deref() == Some(selected.as_str()))
                                >
                                    {name.clone()}
                                </option>
                            }
                        }).collect_view()}
                    </select>
                </label>
            </Show>

            <label class="block">
                <span class="text-sm text-slate-400">"SQL expression"</span>
                <textarea
                    rows="4"
                    class="w-full mt-1 px-3 py-2 bg-slate-900 border border-slate-700 rounded-lg text-white font-mono text-sm"
                    prop:value=move || form.with(|f| f.expression.clone())
                    on:input=move |ev| {
                        let expression = event_target_value(&ev);
                        form.update(|f| f.expression = expression);
                    }
                />
            </label>

            <label class="block">
                <span class="text-sm text-slate-400">"Description"</span>
                <input
                    type="text"
                    class="w-full mt-1 px-3 py-2 bg-slate-900 border border-slate-700 rounded-lg text-white"
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=move |ev| {
                        let description = event_target_value(&ev);
                        form.update(|f| f.description = description);
                    }
                />
            </label>

            <div class="flex justify-end gap-3 pt-2">
                <button
                    class="px-4 py-2 text-sm bg-slate-700 hover:bg-slate-600 text-white rounded-lg"
                    on:click=move |_| on_close.call(())
                >
                    "Cancel"
                </button>
                <button
                    class="px-4 py-2 text-sm bg-blue-500 hover:bg-blue-600 text-white rounded-lg disabled:opacity-50"
                    disabled=move || saving.get()
                    on:click=on_save.clone()
                >
                    "Save"
                </button>
            </div>
        </Modal>
    }
}
