//! Profiler settings dialog

use leptos::*;
use uuid::Uuid;

use catalog_shared::views::ProfilerSettingsForm;
use catalog_shared::{Column, PartitionIntervalType, PartitionIntervalUnit, ProfileSampleType};

use crate::components::common::{ErrorBanner, Modal, Spinner};
use crate::state::AppState;

/// Split a comma separated list, dropping blanks
fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[component]
pub fn ProfilerSettingsModal(
    container_id: Uuid,
    columns: Vec<Column>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let app_state = expect_context::<AppState>();

    let form = create_rw_signal(ProfilerSettingsForm::default());
    let (loading, set_loading) = create_signal(true);
    let (saving, set_saving) = create_signal(false);
    let error = create_rw_signal(None::<String>);

    // Prefill from the stored config
    {
        let client = app_state.client();
        spawn_local(async move {
            match client.get_table_profiler_config(&container_id).await {
                Ok(container) => {
                    if let Some(config) = container.table_profiler_config.as_ref() {
                        form.set(ProfilerSettingsForm::from_config(config));
                    }
                }
                Err(err) => {
                    tracing::warn!("Failed to load profiler config: {}", err);
                    error.set(Some(err.to_string()));
                }
            }
            set_loading.set(false);
        });
    }

    let on_save = {
        let app_state = app_state.clone();
        move |_| {
            let config = form.get_untracked().to_config();
            let client = app_state.client();
            spawn_local(async move {
                set_saving.set(true);
                match client.put_table_profiler_config(&container_id, &config).await {
                    Ok(_) => {
                        tracing::info!("Saved profiler config for {}", container_id);
                        on_close.call(());
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
                set_saving.set(false);
            });
        }
    };

    let is_percentage = move || form.with(|f| f.profile_sample_type == ProfileSampleType::Percentage);

    view! {
        <Modal title="Profiler Settings" on_close=on_close>
            <ErrorBanner message=error />
            <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                <div class="grid grid-cols-2 gap-4">
                    <label class="block">
                        <span class="text-sm text-slate-400">"Sample type"</span>
                        <select
                            class="w-full mt-1 px-3 py-2 bg-slate-900 border border-slate-700 rounded-lg text-white"
                            on:change=move |ev| {
                                let sample_type = if event_target_value(&ev) == "ROWS" {
                                    ProfileSampleType::Rows
                                } else {
                                    ProfileSampleType::Percentage
                                };
                                form.update(|f| f.profile_sample_type = sample_type);
                            }
                        >
                            <option value="PERCENTAGE" selected=is_percentage>"Percentage"</option>
                            <option value="ROWS" selected=move || !is_percentage()>"Rows"</option>
                        </select>
                    </label>

                    <Show
                        when=is_percentage
                        fallback=move || view! {
                            <label class="block">
                                <span class="text-sm text-slate-400">"Sample rows"</span>
                                <input
                                    type="number"
                                    min="0"
                                    class="w-full mt-1 px-3 py-2 bg-slate-900 border border-slate-700 rounded-lg text-white"
                                    prop:value=move || form.with(|f| f.profile_sample_rows.map(|r| r.to_string()).unwrap_or_default())
                                    on:input=move |ev| {
                                        let rows = event_target_value(&ev).parse::<f64>().ok();
                                        form.update(|f| f.profile_sample_rows = rows);
                                    }
                                />
                            </label>
                        }
                    >
                        <label class="block">
                            <span class="text-sm text-slate-400">"Sample percentage"</span>
                            <input
                                type="number"
                                min="0"
                                max="100"
                                class="w-full mt-1 px-3 py-2 bg-slate-900 border border-slate-700 rounded-lg text-white"
                                prop:value=move || form.with(|f| f.profile_sample_percentage.to_string())
                                on:input=move |ev| {
                                    let pct = event_target_value(&ev).parse::<f64>().unwrap_or(f64::NAN);
                                    form.update(|f| f.set_sample_percentage(pct));
                                }
                            />
                        </label>
                    </Show>

                    <label class="block">
                        <span class="text-sm text-slate-400">"Sample data rows"</span>
                        <input
                            type="number"
                            min="0"
                            class="w-full mt-1 px-3 py-2 bg-slate-900 border border-slate-700 rounded-lg text-white"
                            prop:value=move || form.with(|f| f.sample_data_count.map(|c| c.to_string()).unwrap_or_default())
                            on:input=move |ev| {
                                let count = event_target_value(&ev).parse::<u64>().ok();
                                form.update(|f| f.sample_data_count = count);
                            }
                        />
                    </label>

                    <label class="block">
                        <span class="text-sm text-slate-400">"Exclude columns"</span>
                        <input
                            type="text"
                            placeholder="col_a, col_b"
                            class="w-full mt-1 px-3 py-2 bg-slate-900 border border-slate-700 rounded-lg text-white"
                            prop:value=move || form.with(|f| f.exclude_columns.join(", "))
                            on:change=move |ev| {
                                let columns = parse_list(&event_target_value(&ev));
                                form.update(|f| f.exclude_columns = columns);
                            }
                        />
                    </label>
                </div>

                <div class="block">
                    <span class="text-sm text-slate-400">"Include columns"</span>
                    <div class="mt-1 max-h-48 overflow-y-auto divide-y divide-slate-700 border border-slate-700 rounded-lg">
                        {columns.iter().map(|column| {
                            let name = column.name.clone();
                            let toggle_name = name.clone();
                            let metrics_name = name.clone();
                            let included = {
                                let name = name.clone();
                                move || form.with(|f| f.is_column_included(&name))
                            };
                            let metrics_value = {
                                let name = name.clone();
                                move || form.with(|f| {
                                    f.include_columns
                                        .iter()
                                        .find(|c| c.column_name == name)
                                        .map(|c| c.metrics.join(", "))
                                        .unwrap_or_default()
                                })
                            };
                            view! {
                                <div class="flex items-center gap-3 px-3 py-2">
                                    <label class="flex items-center gap-2 w-40 text-sm text-slate-300">
                                        <input
                                            type="checkbox"
                                            prop:checked=included.clone()
                                            on:change=move |_| form.update(|f| f.toggle_include_column(&toggle_name))
                                        />
                                        {name}
                                    </label>
                                    <Show when=included.clone()>
                                        <input
                                            type="text"
                                            placeholder="all metrics"
                                            class="flex-1 px-2 py-1 bg-slate-900 border border-slate-700 rounded text-sm text-white"
                                            prop:value=metrics_value.clone()
                                            on:change={
                                                let metrics_name = metrics_name.clone();
                                                move |ev| {
                                                    let metrics = parse_list(&event_target_value(&ev));
                                                    form.update(|f| f.set_include_metrics(&metrics_name, metrics));
                                                }
                                            }
                                        />
                                    </Show>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                </div>

                <label class="block">
                    <span class="text-sm text-slate-400">"Profile query"</span>
                    <textarea
                        rows="3"
                        class="w-full mt-1 px-3 py-2 bg-slate-900 border border-slate-700 rounded-lg text-white font-mono text-sm"
                        prop:value=move || form.with(|f| f.sql_query.clone())
                        on:input=move |ev| {
                            let query = event_target_value(&ev);
                            form.update(|f| f.sql_query = query);
                        }
                    />
                </label>

                <label class="flex items-center gap-2 text-sm text-slate-300">
                    <input
                        type="checkbox"
                        prop:checked=move || form.with(|f| f.enable_partition)
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            form.update(|f| f.enable_partition = checked);
                        }
                    />
                    "Enable partition"
                </label>

                <Show when=move || form.with(|f| f.enable_partition)>
                    <div class="grid grid-cols-2 gap-4">
                        <label class="block">
                            <span class="text-sm text-slate-400">"Interval type"</span>
                            <select
                                class="w-full mt-1 px-3 py-2 bg-slate-900 border border-slate-700 rounded-lg text-white"
                                on:change=move |ev| {
                                    let interval_type = PartitionIntervalType::parse(&event_target_value(&ev));
                                    form.update(|f| f.partition.partition_interval_type = interval_type);
                                }
                            >
                                <option value="" selected=move || form.with(|f| f.partition.partition_interval_type.is_none())>
                                    "Select type"
                                </option>
                                {PartitionIntervalType::ALL.into_iter().map(|interval_type| view! {
                                    <option
                                        value=interval_type.as_str()
                                        selected=move || form.with(|f| f.partition.partition_interval_type == Some(interval_type))
                                    >
                                        {interval_type.as_str()}
                                    </option>
                                }).collect_view()}
                            </select>
                        </label>
                        <label class="block">
                            <span class="text-sm text-slate-400">"Interval unit"</span>
                            <select
                                class="w-full mt-1 px-3 py-2 bg-slate-900 border border-slate-700 rounded-lg text-white"
                                on:change=move |ev| {
                                    let unit = PartitionIntervalUnit::parse(&event_target_value(&ev));
                                    form.update(|f| f.partition.partition_interval_unit = unit);
                                }
                            >
                                <option value="" selected=move || form.with(|f| f.partition.partition_interval_unit.is_none())>
                                    "Select unit"
                                </option>
                                {PartitionIntervalUnit::ALL.into_iter().map(|unit| view! {
                                    <option
                                        value=unit.as_str()
                                        selected=move || form.with(|f| f.partition.partition_interval_unit == Some(unit))
                                    >
                                        {unit.as_str()}
                                    </option>
                                }).collect_view()}
                            </select>
                        </label>
                        <label class="block">
                            <span class="text-sm text-slate-400">"Partition column"</span>
                            <input
                                type="text"
                                class="w-full mt-1 px-3 py-2 bg-slate-900 border border-slate-700 rounded-lg text-white"
                                prop:value=move || form.with(|f| f.partition.partition_column_name.clone().unwrap_or_default())
                                on:input=move |ev| {
                                    let name = event_target_value(&ev);
                                    form.update(|f| {
                                        f.partition.partition_column_name = (!name.trim().is_empty()).then_some(name);
                                    });
                                }
                            />
                        </label>
                        <label class="block">
                            <span class="text-sm text-slate-400">"Interval"</span>
                            <input
                                type="number"
                                min="0"
                                class="w-full mt-1 px-3 py-2 bg-slate-900 border border-slate-700 rounded-lg text-white"
                                prop:value=move || form.with(|f| f.partition.partition_interval.map(|i| i.to_string()).unwrap_or_default())
                                on:input=move |ev| {
                                    let interval = event_target_value(&ev).parse::<i64>().ok();
                                    form.update(|f| f.partition.partition_interval = interval);
                                }
                            />
                        </label>
                    </div>
                </Show>

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
                        {move || if saving.get() { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </Show>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_drops_blanks() {
        assert_eq!(parse_list(" a, ,b ,"), vec!["a".to_string(), "b".to_string()]);
        assert!(parse_list("").is_empty());
    }
}
