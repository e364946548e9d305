//! Common UI Components
//!
//! Reusable components shared across features.

mod icons;

pub use icons::*;

pub use catalog_shared::views::format::{format_number, format_timestamp};

use std::fmt::Display;

use leptos::*;

/// Clear the page error on success, record it on failure
pub fn settle<T, E: Display>(result: Result<T, E>, error: RwSignal<Option<String>>, action: &str) -> Option<T> {
    match result {
        Ok(value) => {
            error.set(None);
            Some(value)
        }
        Err(err) => {
            tracing::warn!("Failed to {}: {}", action, err);
            error.set(Some(err.to_string()));
            None
        }
    }
}

/// Red banner for request errors
#[component]
pub fn ErrorBanner(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message.get().map(|err| {
            view! {
                <div class="bg-red-500/10 border border-red-500/30 rounded-lg p-4 mb-4">
                    <p class="text-red-400 text-sm">{err}</p>
                </div>
            }
        })
    }
}

/// Loading spinner
#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-16">
            <div class="animate-spin w-8 h-8 border-4 border-blue-500 border-t-transparent rounded-full" />
        </div>
    }
}

/// Centered modal dialog with a title bar
#[component]
pub fn Modal(
    title: &'static str,
    #[prop(into)] on_close: Callback<()>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/60">
            <div class="bg-slate-800 border border-slate-700 rounded-xl shadow-xl w-full max-w-xl">
                <div class="flex items-center justify-between px-6 py-4 border-b border-slate-700">
                    <h2 class="text-lg font-semibold text-white">{title}</h2>
                    <button
                        class="text-slate-400 hover:text-white transition-colors"
                        on:click=move |_| on_close.call(())
                    >
                        "✕"
                    </button>
                </div>
                <div class="p-6 space-y-4">{children()}</div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settle_clears_stale_error() {
        let runtime = create_runtime();
        let error = create_rw_signal(None::<String>);

        assert_eq!(settle(Err::<u32, _>("HTTP 500: boom"), error, "load"), None);
        assert_eq!(error.get_untracked().as_deref(), Some("HTTP 500: boom"));

        assert_eq!(settle(Ok::<_, String>(7), error, "load"), Some(7));
        assert_eq!(error.get_untracked(), None);

        runtime.dispose();
    }
}
