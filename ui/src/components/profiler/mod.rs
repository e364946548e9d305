//! Table Profiler
//!
//! Profiler tab of a container page:
//! - Overall summary tiles from the latest profile and test summary
//! - Date range picker driving the profile history
//! - Table and column test results
//! - Profiler settings and custom metric dialogs
//!
//! State lives in a [`TableProfilerContext`] provided to the tab's children.
//! Fetches are never cancelled; each one takes a token from a
//! [`LatestRequest`] and only the newest response is applied.

mod custom_metric_modal;
mod settings_modal;
mod summary;

pub use custom_metric_modal::CustomMetricModal;
pub use settings_modal::ProfilerSettingsModal;
pub use summary::ProfilerSummary;

use leptos::*;

use catalog_shared::client::{ClientError, TestCaseListParams};
use catalog_shared::views::{
    DateRange, LatestRequest, TableProfilerData, TableProfilerViewModel, TestResults,
};
use catalog_shared::{Container, CustomMetric, EntityLink, TestCase, TestSummary};

use crate::components::common::{
    format_number, format_timestamp, ErrorBanner, PlusIcon, RefreshIcon, SettingsIcon, Spinner, TrashIcon,
};
use crate::state::AppState;

/// Selectable trailing windows, in days
const RANGE_OPTIONS: [i64; 5] = [1, 3, 7, 14, 30];

const TEST_CASE_FIELDS: &str = "testCaseResult,entityLink,testDefinition";
const TEST_CASE_PAGE_SIZE: u32 = 100;

/// Shared state of the profiler tab
#[derive(Clone, Copy)]
pub struct TableProfilerContext {
    pub model: RwSignal<TableProfilerViewModel>,
    pub profiles: RwSignal<TableProfilerData>,
    pub date_range: RwSignal<DateRange>,
    pub range_days: RwSignal<i64>,
    pub loading: RwSignal<bool>,
    pub tests_loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub show_settings: RwSignal<bool>,
    pub metric_target: RwSignal<Option<MetricTarget>>,
    latest_profile_requests: StoredValue<LatestRequest>,
    history_requests: StoredValue<LatestRequest>,
    test_requests: StoredValue<LatestRequest>,
}

/// What the custom metric dialog is attached to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricTarget {
    Table,
    Column(Option<String>),
}

impl TableProfilerContext {
    fn new(model: TableProfilerViewModel) -> Self {
        let date_range = model.date_range;
        Self {
            model: create_rw_signal(model),
            profiles: create_rw_signal(TableProfilerData::default()),
            date_range: create_rw_signal(date_range),
            range_days: create_rw_signal(catalog_shared::views::profiler::DEFAULT_RANGE_DAYS),
            loading: create_rw_signal(true),
            tests_loading: create_rw_signal(false),
            error: create_rw_signal(None),
            show_settings: create_rw_signal(false),
            metric_target: create_rw_signal(None),
            latest_profile_requests: store_value(LatestRequest::new()),
            history_requests: store_value(LatestRequest::new()),
            test_requests: store_value(LatestRequest::new()),
        }
    }

    pub fn on_test_case_update(&self, test_case: TestCase) {
        self.model.update(|m| m.on_test_case_update(test_case));
    }

    pub fn on_custom_metric_update(&self, container: Container) {
        self.model.update(|m| m.on_custom_metric_update(container));
    }

    pub fn on_date_range_change(&self, days: i64) {
        let range = DateRange::last_days(days, chrono::Utc::now());
        self.range_days.set(days);
        self.date_range.set(range);
        self.model.update(|m| m.on_date_range_change(range));
    }

    /// Custom metrics for the table, preferring the last saved state
    pub fn table_metrics(&self) -> Vec<CustomMetric> {
        self.model.with(|m| {
            m.custom_metric
                .as_ref()
                .or(m.container.as_ref())
                .map(|c| c.custom_metrics.clone())
                .unwrap_or_default()
        })
    }

    fn report(&self, err: ClientError) {
        tracing::warn!("Profiler request failed: {}", err);
        self.error.set(Some(err.to_string()));
    }

    fn load_latest_profile(&self, app_state: &AppState, fqn: String) {
        let ctx = *self;
        let client = app_state.client();
        let token = ctx.latest_profile_requests.with_value(|r| r.begin());
        spawn_local(async move {
            ctx.loading.set(true);
            let result = client.get_latest_profile(&fqn).await;
            ctx.latest_profile_requests.with_value(|requests| {
                requests.apply(token, result, |result| match result {
                    Ok(container) => ctx.model.update(|m| m.table_profiler = Some(container)),
                    Err(err) if err.is_not_found() => ctx.model.update(|m| m.table_profiler = None),
                    Err(err) => ctx.report(err),
                });
            });
            ctx.loading.set(false);
        });
    }

    fn load_history(&self, app_state: &AppState, fqn: String, range: DateRange) {
        let ctx = *self;
        let client = app_state.client();
        let token = ctx.history_requests.with_value(|r| r.begin());
        spawn_local(async move {
            let profile_range = range.to_profile_range();
            let tables = client.get_table_profiles(&fqn, &profile_range).await;
            let system = client.get_system_profiles(&fqn, &profile_range).await;

            ctx.history_requests.with_value(|requests| {
                requests.apply(token, (tables, system), |(tables, system)| match (tables, system) {
                    (Ok(tables), Ok(system)) => ctx.profiles.set(TableProfilerData {
                        table_profiler_data: tables.data,
                        system_profiler_data: system.data,
                    }),
                    (Err(err), _) | (_, Err(err)) => ctx.report(err),
                });
            });
        });
    }

    /// Fetch every table and column test of the container, following cursors
    fn load_tests(&self, app_state: &AppState, fqn: String) {
        let ctx = *self;
        let client = app_state.client();
        let token = ctx.test_requests.with_value(|r| r.begin());
        spawn_local(async move {
            ctx.tests_loading.set(true);
            let link = EntityLink {
                entity_type: "container".to_string(),
                entity_fqn: fqn,
                column: None,
            };
            let mut params = TestCaseListParams::for_entity(link.to_link());
            params.fields = Some(TEST_CASE_FIELDS.to_string());
            params.limit = Some(TEST_CASE_PAGE_SIZE);

            let mut cases = Vec::new();
            let result = loop {
                match client.list_test_cases(&params).await {
                    Ok(page) => {
                        cases.extend(page.data);
                        match page.paging.after {
                            Some(after) => params.after = Some(after),
                            None => break Ok(cases),
                        }
                    }
                    Err(err) => break Err(err),
                }
            };

            ctx.test_requests.with_value(|requests| {
                requests.apply(token, result, |result| match result {
                    Ok(cases) => ctx.model.update(|m| m.all_test_cases = cases),
                    Err(err) => ctx.report(err),
                });
            });
            ctx.tests_loading.set(false);
        });
    }
}

#[component]
pub fn TableProfiler(
    container: Container,
    #[prop(optional)] test_cases: Vec<TestCase>,
    #[prop(optional_no_strip)] test_summary: Option<TestSummary>,
) -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let fqn = container.fully_qualified_name.clone();

    let mut model = TableProfilerViewModel::new(Some(container), test_summary);
    model.all_test_cases = test_cases;
    let ctx = TableProfilerContext::new(model);
    provide_context(ctx);

    // Latest profile and tests on mount
    ctx.load_latest_profile(&app_state, fqn.clone());
    if ctx.model.with_untracked(|m| m.all_test_cases.is_empty()) {
        ctx.load_tests(&app_state, fqn.clone());
    }

    // Profile history follows the selected range
    {
        let app_state = app_state.clone();
        let fqn = fqn.clone();
        create_effect(move |_| {
            let range = ctx.date_range.get();
            ctx.load_history(&app_state, fqn.clone(), range);
        });
    }

    let on_refresh = {
        let app_state = app_state.clone();
        let fqn = fqn.clone();
        move |_| {
            ctx.error.set(None);
            ctx.load_latest_profile(&app_state, fqn.clone());
            ctx.load_history(&app_state, fqn.clone(), ctx.date_range.get_untracked());
            ctx.load_tests(&app_state, fqn.clone());
        }
    };

    let permissions = app_state.permissions;
    let is_deleted = move || ctx.model.with(|m| m.is_deleted());
    let can_edit = move || permissions.get().can_edit_profile() && !is_deleted();

    view! {
        <div class="space-y-6">
            // Toolbar
            <div class="flex items-center justify-between">
                <div class="flex items-center gap-2">
                    {RANGE_OPTIONS.iter().map(|&days| view! {
                        <button
                            class=move || if ctx.range_days.get() == days {
                                "px-3 py-1.5 text-sm rounded-lg bg-blue-500 text-white"
                            } else {
                                "px-3 py-1.5 text-sm rounded-lg bg-slate-700 text-slate-300 hover:bg-slate-600"
                            }
                            on:click=move |_| ctx.on_date_range_change(days)
                        >
                            {format!("Last {} days", days)}
                        </button>
                    }).collect_view()}
                </div>

                <div class="flex items-center gap-2">
                    <button
                        class="flex items-center gap-2 px-3 py-1.5 text-sm bg-slate-700 hover:bg-slate-600 text-white rounded-lg"
                        on:click=on_refresh
                    >
                        <RefreshIcon class="w-4 h-4" />
                        "Refresh"
                    </button>
                    <Show when=can_edit>
                        <button
                            class="flex items-center gap-2 px-3 py-1.5 text-sm bg-slate-700 hover:bg-slate-600 text-white rounded-lg"
                            on:click=move |_| ctx.metric_target.set(Some(MetricTarget::Table))
                        >
                            <PlusIcon class="w-4 h-4" />
                            "Custom Metric"
                        </button>
                        <button
                            class="flex items-center gap-2 px-3 py-1.5 text-sm bg-blue-500 hover:bg-blue-600 text-white rounded-lg"
                            on:click=move |_| ctx.show_settings.set(true)
                        >
                            <SettingsIcon class="w-4 h-4" />
                            "Settings"
                        </button>
                    </Show>
                </div>
            </div>

            <ErrorBanner message=ctx.error />

            <Show when=move || !ctx.loading.get() && !ctx.model.with(|m| m.is_profiling_enabled())>
                <div class="bg-amber-500/10 border border-amber-500/30 rounded-lg p-4">
                    <p class="text-amber-400 text-sm">
                        "Data profiling has not run for this container. Configure the profiler to collect metrics."
                    </p>
                </div>
            </Show>

            <ProfilerSummary />
            <TestResultsPanel />
            <RowCountHistory />
            <CustomMetricsPanel />
            <ColumnsPanel />

            // Dialogs
            {move || {
                let container = ctx.model.with(|m| m.container.clone());
                match (ctx.show_settings.get(), container) {
                    (true, Some(container)) => view! {
                        <ProfilerSettingsModal
                            container_id=container.id
                            columns=container.columns().to_vec()
                            on_close=move |_| ctx.show_settings.set(false)
                        />
                    }.into_view(),
                    _ => ().into_view(),
                }
            }}
            {move || {
                let container = ctx.model.with(|m| m.container.clone());
                match (ctx.metric_target.get(), container) {
                    (Some(target), Some(container)) => view! {
                        <CustomMetricModal
                            container=container
                            target=target
                            on_close=move |_| ctx.metric_target.set(None)
                            on_update=move |updated: Container| {
                                ctx.on_custom_metric_update(updated);
                                ctx.metric_target.set(None);
                            }
                        />
                    }.into_view(),
                    _ => ().into_view(),
                }
            }}
        </div>
    }
}

// ============================================================================
// Panels
// ============================================================================

#[component]
fn TestResultsPanel() -> impl IntoView {
    let ctx = expect_context::<TableProfilerContext>();

    let counts = move || ctx.model.with(|m| m.table_test_results());

    view! {
        <div class="bg-slate-800 rounded-xl border border-slate-700 p-4">
            <h3 class="text-sm font-medium text-slate-300 mb-3">"Table Tests"</h3>
            {move || {
                if ctx.tests_loading.get() {
                    return view! { <Spinner /> }.into_view();
                }
                let TestResults { success, aborted, failed } = counts();
                if success + aborted + failed == 0 {
                    view! { <p class="text-sm text-slate-500">"No table-level tests"</p> }.into_view()
                } else {
                    view! {
                        <div class="flex gap-6 text-sm">
                            <span class="text-green-400">{format!("{} passed", success)}</span>
                            <span class="text-amber-400">{format!("{} aborted", aborted)}</span>
                            <span class="text-red-400">{format!("{} failed", failed)}</span>
                        </div>
                    }.into_view()
                }
            }}
        </div>
    }
}

#[component]
fn RowCountHistory() -> impl IntoView {
    let ctx = expect_context::<TableProfilerContext>();

    view! {
        <div class="bg-slate-800 rounded-xl border border-slate-700 p-4">
            <h3 class="text-sm font-medium text-slate-300 mb-3">"Row Count"</h3>
            {move || {
                let series = ctx.profiles.with(|p| p.row_count_series());
                let max = series.iter().map(|(_, rows)| *rows).fold(0.0_f64, f64::max);
                if series.is_empty() {
                    return view! { <p class="text-sm text-slate-500">"No profiles in this range"</p> }.into_view();
                }
                view! {
                    <div class="space-y-1">
                        {series.into_iter().map(|(timestamp, rows)| {
                            let width = if max > 0.0 { rows / max * 100.0 } else { 0.0 };
                            view! {
                                <div class="flex items-center gap-3 text-xs">
                                    <span class="w-36 text-slate-500">{format_timestamp(timestamp)}</span>
                                    <div class="flex-1 bg-slate-900 rounded h-2">
                                        <div class="bg-blue-500 h-2 rounded" style=format!("width: {:.1}%", width) />
                                    </div>
                                    <span class="w-24 text-right text-slate-300">
                                        {format_number(rows)}
                                    </span>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                }.into_view()
            }}
            {move || {
                let totals = ctx.profiles.with(|p| p.operation_totals());
                (!totals.is_empty()).then(|| view! {
                    <div class="flex gap-4 mt-4 text-xs text-slate-400">
                        {totals.into_iter().map(|(operation, rows)| view! {
                            <span>{format!("{}: {}", operation, rows)}</span>
                        }).collect_view()}
                    </div>
                })
            }}
        </div>
    }
}

#[component]
fn CustomMetricsPanel() -> impl IntoView {
    let ctx = expect_context::<TableProfilerContext>();
    let app_state = expect_context::<AppState>();
    let (deleting, set_deleting) = create_signal(false);

    let on_delete = move |name: String| {
        let Some(id) = ctx.model.with_untracked(|m| m.container.as_ref().map(|c| c.id)) else {
            return;
        };
        let client = app_state.client();
        spawn_local(async move {
            set_deleting.set(true);
            match client.delete_custom_metric(&id, None, &name).await {
                Ok(container) => ctx.on_custom_metric_update(container),
                Err(err) => ctx.report(err),
            }
            set_deleting.set(false);
        });
    };

    view! {
        <div class="bg-slate-800 rounded-xl border border-slate-700 p-4">
            <h3 class="text-sm font-medium text-slate-300 mb-3">"Custom Metrics"</h3>
            {move || {
                let metrics = ctx.table_metrics();
                if metrics.is_empty() {
                    return view! { <p class="text-sm text-slate-500">"No custom metrics"</p> }.into_view();
                }
                let on_delete = on_delete.clone();
                view! {
                    <div class="divide-y divide-slate-700">
                        {metrics.into_iter().map(|metric| {
                            let on_delete = on_delete.clone();
                            let name = metric.name.clone();
                            view! {
                                <div class="flex items-center justify-between py-2">
                                    <div>
                                        <div class="text-sm text-white">{metric.name.clone()}</div>
                                        <code class="text-xs text-slate-400">{metric.expression.clone()}</code>
                                    </div>
                                    <button
                                        class="text-slate-400 hover:text-red-400 disabled:opacity-50"
                                        disabled=move || deleting.get()
                                        on:click=move |_| on_delete(name.clone())
                                    >
                                        <TrashIcon class="w-4 h-4" />
                                    </button>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                }.into_view()
            }}
        </div>
    }
}

#[component]
fn ColumnsPanel() -> impl IntoView {
    let ctx = expect_context::<TableProfilerContext>();

    view! {
        <div class="bg-slate-800 rounded-xl border border-slate-700 overflow-hidden">
            <table class="w-full">
                <thead class="bg-slate-800/50 border-b border-slate-700">
                    <tr>
                        <th class="px-6 py-3 text-left text-xs font-medium text-slate-400 uppercase tracking-wider">"Column"</th>
                        <th class="px-6 py-3 text-left text-xs font-medium text-slate-400 uppercase tracking-wider">"Type"</th>
                        <th class="px-6 py-3 text-left text-xs font-medium text-slate-400 uppercase tracking-wider">"Null %"</th>
                        <th class="px-6 py-3 text-left text-xs font-medium text-slate-400 uppercase tracking-wider">"Distinct"</th>
                        <th class="px-6 py-3 text-left text-xs font-medium text-slate-400 uppercase tracking-wider">"Tests"</th>
                        <th class="px-6 py-3 text-right text-xs font-medium text-slate-400 uppercase tracking-wider">"Metrics"</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-slate-700">
                    {move || {
                        let results = ctx.model.with(|m| m.column_test_results());
                        ctx.model.with(|m| m.columns_with_tests()).into_iter().map(|item| {
                            let column = item.column;
                            let name = column.name.clone();
                            let profile = column.profile.clone();
                            let failed = results.get(&name).map(|r| r.results.failed).unwrap_or(0);
                            let null_pct = profile
                                .as_ref()
                                .and_then(|p| p.null_proportion)
                                .map(|p| format!("{:.1}%", p * 100.0))
                                .unwrap_or_else(|| "--".to_string());
                            let distinct = profile
                                .as_ref()
                                .and_then(|p| p.distinct_count)
                                .map(format_number)
                                .unwrap_or_else(|| "--".to_string());
                            let target = name.clone();
                            view! {
                                <tr class="hover:bg-slate-700/30 transition-colors">
                                    <td class="px-6 py-3 text-sm text-white">{name}</td>
                                    <td class="px-6 py-3 text-sm text-slate-400">{column.data_type.clone()}</td>
                                    <td class="px-6 py-3 text-sm text-slate-300">{null_pct}</td>
                                    <td class="px-6 py-3 text-sm text-slate-300">{distinct}</td>
                                    <td class="px-6 py-3 text-sm">
                                        <span class="text-slate-300">{item.test_count}</span>
                                        {(failed > 0).then(|| view! {
                                            <span class="ml-2 text-red-400">{format!("{} failed", failed)}</span>
                                        })}
                                    </td>
                                    <td class="px-6 py-3 text-right">
                                        <button
                                            class="text-xs text-blue-400 hover:underline"
                                            on:click=move |_| ctx.metric_target.set(Some(MetricTarget::Column(Some(target.clone()))))
                                        >
                                            "Add metric"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }).collect_view()
                    }}
                </tbody>
            </table>
        </div>
    }
}
