//! 絞り込みバー（検索・色区分・国・ワインタイプ・並び順・表示形式）
//!
//! 各セレクトの選択肢は他のファセットの選択で絞り込まれる。

use leptos::prelude::*;
use top100_common::filter::{
    humanize_sub_category, options_for, Facet, FacetState, SortOrder, ViewMode, ALL,
};
use top100_common::Wine;

const SORT_OPTIONS: [(&str, &str); 5] = [
    ("rank", "Rank"),
    ("score", "Score"),
    ("price-low", "Price: Low to High"),
    ("price-high", "Price: High to Low"),
    ("name", "Name"),
];

#[component]
pub fn FilterBar(
    facets: ReadSignal<FacetState>,
    set_facets: WriteSignal<FacetState>,
    wines: ReadSignal<Vec<Wine>>,
    sort: ReadSignal<SortOrder>,
    set_sort: WriteSignal<SortOrder>,
    view_mode: ReadSignal<ViewMode>,
    set_view_mode: WriteSignal<ViewMode>,
) -> impl IntoView {
    view! {
        <div class="filter-bar">
            <div class="form-group">
                <label for="search">"Search"</label>
                <input
                    type="search"
                    id="search"
                    placeholder="Wine or winery..."
                    prop:value=move || facets.with(|f| f.search.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        set_facets.update(|f| f.search = value);
                    }
                />
            </div>

            <FacetSelect facet=Facet::Category facets=facets set_facets=set_facets wines=wines />
            <FacetSelect facet=Facet::Locale facets=facets set_facets=set_facets wines=wines />
            <FacetSelect facet=Facet::SubCategory facets=facets set_facets=set_facets wines=wines />

            <div class="form-group">
                <label for="sort">"Sort"</label>
                <select
                    id="sort"
                    on:change=move |ev| {
                        if let Ok(order) = event_target_value(&ev).parse::<SortOrder>() {
                            set_sort.set(order);
                        }
                    }
                >
                    {SORT_OPTIONS
                        .iter()
                        .map(|(value, label)| {
                            let order = value.parse::<SortOrder>().unwrap_or_default();
                            view! {
                                <option value=*value selected=move || sort.get() == order>
                                    {*label}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <div class="view-segmented" role="tablist">
                {[ViewMode::Grid, ViewMode::List]
                    .into_iter()
                    .map(|mode| {
                        view! {
                            <button
                                class=move || if view_mode.get() == mode { "seg active" } else { "seg" }
                                on:click=move |_| set_view_mode.set(mode)
                            >
                                {mode.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <button
                class="btn btn-tertiary btn-small"
                disabled=move || facets.with(|f| f.is_unconstrained())
                on:click=move |_| set_facets.set(FacetState::default())
            >
                "Clear filters"
            </button>
        </div>
    }
}

#[component]
fn FacetSelect(
    facet: Facet,
    facets: ReadSignal<FacetState>,
    set_facets: WriteSignal<FacetState>,
    wines: ReadSignal<Vec<Wine>>,
) -> impl IntoView {
    let options = Memo::new(move |_| wines.with(|items| options_for(facet, items, &facets.get())));

    view! {
        <div class="form-group">
            <label>{facet.label()}</label>
            <select on:change=move |ev| {
                let value = event_target_value(&ev);
                set_facets.update(|f| *f = f.with(facet, value));
            }>
                <For
                    each=move || options.get()
                    key=|option| option.clone()
                    children=move |option| {
                        let label = if facet == Facet::SubCategory && option != ALL {
                            humanize_sub_category(&option)
                        } else {
                            option.clone()
                        };
                        let value = option.clone();
                        view! {
                            <option
                                value=option
                                selected=move || facets.with(|f| f.selected(facet) == value)
                            >
                                {label}
                            </option>
                        }
                    }
                />
            </select>
        </div>
    }
}
