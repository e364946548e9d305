//! Overall summary tiles

use leptos::*;

use super::TableProfilerContext;

fn value_class(class_name: Option<&'static str>) -> &'static str {
    match class_name {
        Some("success") => "text-2xl font-semibold text-green-400",
        Some("aborted") => "text-2xl font-semibold text-amber-400",
        Some("failed") => "text-2xl font-semibold text-red-400",
        _ => "text-2xl font-semibold text-white",
    }
}

#[component]
pub fn ProfilerSummary() -> impl IntoView {
    let ctx = expect_context::<TableProfilerContext>();

    view! {
        <div class="grid grid-cols-2 md:grid-cols-3 lg:grid-cols-6 gap-4">
            {move || ctx.model.with(|m| m.overall_summary()).into_iter().map(|tile| view! {
                <div class="bg-slate-800 rounded-xl border border-slate-700 p-4">
                    <div class="text-xs text-slate-400 mb-1">{tile.title}</div>
                    <div class=value_class(tile.class_name)>{tile.value}</div>
                </div>
            }).collect_view()}
        </div>
    }
}
