//! Search Result Card
//!
//! Renders one entity found by search:
//! - Title linking to the entity page (or advancing the guided tour)
//! - Owner, tier, usage and type row
//! - Description, tags and match breakdown

use leptos::*;
use leptos_router::{use_location, use_navigate};

use catalog_shared::views::{CardTag, TableDataCardProps};

use crate::components::common::{ContainerIcon, TagIcon};
use crate::state::{AppState, RouterNavigator};

fn tag_label(tag: &CardTag) -> String {
    match tag {
        CardTag::Text(text) => text.clone(),
        CardTag::Label(label) => label.tag_fqn.clone(),
    }
}

#[component]
pub fn TableDataCard(card: TableDataCardProps) -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let location = use_location();
    let navigate = use_navigate();

    let href = card.link();
    let extra_info = card.extra_info();
    let tags = card.asset_tags();
    let matches = card.match_summary();
    let meta = card.meta_info();
    let deleted = card.deleted;
    let title = card.name.clone();
    let description = card
        .description
        .clone()
        .unwrap_or_else(|| "No description".to_string());

    let on_title_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        let click = card.on_link_click(&location.pathname.get_untracked());
        click.apply(&RouterNavigator::new(navigate.clone()), &app_state);
    };

    view! {
        <div class="bg-slate-800 rounded-xl border border-slate-700 p-4 hover:border-slate-500 transition-colors">
            {meta.map(|meta| view! {
                <div class="text-xs text-slate-500 mb-1">{meta}</div>
            })}

            <div class="flex items-center gap-2">
                <ContainerIcon class="w-4 h-4 text-blue-400" />
                <a
                    href=href
                    class="text-base font-semibold text-blue-400 hover:underline"
                    on:click=on_title_click
                >
                    {title}
                </a>
                <Show when=move || deleted>
                    <span class="px-2 py-0.5 text-xs rounded bg-red-500/20 text-red-400 border border-red-500/30">
                        "Deleted"
                    </span>
                </Show>
            </div>

            <div class="flex flex-wrap items-center gap-4 mt-2 text-xs text-slate-400">
                {extra_info.into_iter().map(|info| {
                    let value = if info.value.is_empty() { "--".to_string() } else { info.value };
                    view! {
                        <span>
                            {info.show_label.then(|| format!("{}: ", info.key))}
                            {value}
                        </span>
                    }
                }).collect_view()}
            </div>

            <div class="mt-2 text-sm text-slate-300 line-clamp-2">
                {description}
            </div>

            {(!tags.is_empty()).then(|| view! {
                <div class="flex flex-wrap gap-2 mt-3">
                    {tags.iter().map(|tag| view! {
                        <span class="flex items-center gap-1 px-2 py-0.5 text-xs rounded bg-slate-700 text-slate-300">
                            <TagIcon class="w-3 h-3" />
                            {tag_label(tag)}
                        </span>
                    }).collect_view()}
                </div>
            })}

            {matches.map(|summary| view! {
                <div class="mt-3 text-xs text-slate-500">
                    <span class="font-medium text-slate-400">"Matches: "</span>
                    {summary}
                </div>
            })}
        </div>
    }
}
