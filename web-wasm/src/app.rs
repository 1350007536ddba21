//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use leptos::task::spawn_local;
use crate::components::{
    comparison::{ComparisonBar, ComparisonModal},
    filter_bar::FilterBar,
    header::Header,
    tasting_panel::TastingPanel,
    wine_grid::{WineDetail, WineGrid},
};
use crate::{download, loader, pwl, storage::LocalStorageStore, url_state};
use top100_common::compare::{comparison_columns, CompareList, CompareToggle, MAX_COMPARE};
use top100_common::dataset::{resolve_year, LoadSequence, CURRENT_YEAR, FALLBACK_YEAR};
use top100_common::export::{export_file_name, to_csv, to_json, ExportFormat};
use top100_common::filter::{filter_wines, sort_wines, FacetState, SortOrder, ViewMode};
use top100_common::links::share_url;
use top100_common::selection::{SelectionManager, TastingStatus};
use top100_common::Wine;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let initial = url_state::initial_link();
    let initial_year = resolve_year(initial.year, CURRENT_YEAR);

    // データセット
    let (year, set_year) = signal(initial_year);
    let (loaded_year, set_loaded_year) = signal(initial_year);
    let (wines, set_wines) = signal(Vec::<Wine>::new());
    let (is_loading, set_is_loading) = signal(true);
    let (load_error, set_load_error) = signal(None::<String>);

    // 絞り込み・表示
    let (facets, set_facets) = signal(FacetState::default());
    let (sort, set_sort) = signal(SortOrder::Rank);
    let (view_mode, set_view_mode) = signal(ViewMode::Grid);
    let (focused, set_focused) = signal(initial.wine.clone());
    let (notice, set_notice) = signal(None::<String>);

    // 比較
    let (compare, set_compare) = signal(CompareList::new());
    let (show_compare, set_show_compare) = signal(false);

    // テイスティング記録（共有リンクの tasted は起動時に取り込む）
    let manager = StoredValue::new(SelectionManager::load(LocalStorageStore));
    if !initial.tasted.is_empty() {
        manager.update_value(|m| {
            if let Err(e) = m.import_tasted(initial.tasted.iter().map(String::as_str)) {
                gloo::console::warn!(format!("共有リンクの取り込みに失敗: {}", e));
            }
        });
    }
    let (selection, set_selection) = signal(manager.with_value(|m| m.selection().clone()));

    // 年度が変わるたびに読み込み（古い応答は捨てる）
    let load_sequence = StoredValue::new(LoadSequence::new());
    Effect::new(move |_| {
        let requested = year.get();
        let ticket = load_sequence.try_update_value(|s| s.begin()).unwrap_or_default();
        set_is_loading.set(true);
        url_state::replace_year(requested);
        spawn_local(async move {
            let result = loader::load_year(requested, FALLBACK_YEAR).await;
            if !load_sequence.with_value(|s| s.is_latest(ticket)) {
                return;
            }
            match result {
                Ok(loaded) => {
                    if loaded.used_fallback() {
                        set_notice.set(Some(format!(
                            "{} data is unavailable. Showing {}.",
                            loaded.requested, loaded.year
                        )));
                    }
                    set_loaded_year.set(loaded.year);
                    set_wines.set(loaded.wines);
                    set_load_error.set(None);
                }
                Err(e) => {
                    set_wines.set(Vec::new());
                    set_load_error.set(Some(e));
                }
            }
            set_is_loading.set(false);
        });
    });

    let filtered = Memo::new(move |_| {
        wines.with(|items| {
            let mut list = filter_wines(items, &facets.get());
            sort_wines(&mut list, sort.get());
            list.into_iter().cloned().collect::<Vec<Wine>>()
        })
    });

    let stats = Signal::derive(move || {
        wines.with(|items| selection.with(|s| s.stats(items)))
    });
    let share_link = Signal::derive(move || {
        let current = wines.with(|items| selection.with(|s| s.retain_known(items)));
        share_url(&url_state::share_base(), &current, loaded_year.get())
    });
    let compare_columns = Memo::new(move |_| {
        wines.with(|items| compare.with(|c| comparison_columns(&c.wines(items))))
    });
    let focused_wine = Memo::new(move |_| {
        let id = focused.get()?;
        wines.with(|items| items.iter().find(|w| w.id == id).cloned())
    });

    // 年度切り替え（絞り込みと比較はリセット）
    let on_year_change = move |y: i32| {
        set_facets.set(FacetState::default());
        set_compare.set(CompareList::new());
        set_show_compare.set(false);
        set_year.set(y);
    };

    let on_status = move |id: String, status: Option<TastingStatus>| {
        manager.update_value(|m| {
            if let Err(e) = m.set_status(&id, status) {
                gloo::console::warn!(format!("記録の保存に失敗: {}", e));
            }
            set_selection.set(m.selection().clone());
        });
    };

    let on_compare_toggle = move |id: String| {
        let mut result = CompareToggle::Added;
        set_compare.update(|c| result = c.toggle(&id));
        if result == CompareToggle::Full {
            set_notice.set(Some(format!("You can compare up to {} wines.", MAX_COMPARE)));
        }
    };

    let on_compare_remove = move |id: String| {
        set_compare.update(|c| c.remove(&id));
        if compare.with(|c| !c.can_compare()) {
            set_show_compare.set(false);
        }
    };

    let on_pwl = move |wine: Wine| {
        set_notice.set(Some(format!("Saving {} ...", wine.full_label())));
        spawn_local(async move {
            let outcome = pwl::add_to_pwl(&wine).await;
            set_notice.set(Some(outcome.message()));
        });
    };

    let on_export = move |format: ExportFormat| {
        let rows = wines.with(|items| selection.with(|s| s.to_export_rows(items)));
        let content = match format {
            ExportFormat::Json => match to_json(&rows) {
                Ok(json) => json,
                Err(e) => {
                    set_notice.set(Some(format!("Export failed: {}", e)));
                    return;
                }
            },
            _ => to_csv(&rows),
        };
        let filename = export_file_name(loaded_year.get_untracked(), &download::today(), format);
        if let Err(e) = download::download_text(&content, &filename, format.mime_type()) {
            gloo::console::error!(format!("ダウンロード失敗: {:?}", e));
        }
    };

    let on_select = move |id: String| set_focused.set(Some(id));

    view! {
        <div class="container">
            <Header year=year stats=stats on_year_change=on_year_change />

            <Show when=move || notice.get().is_some()>
                <div class="notice">
                    <span>{move || notice.get().unwrap_or_default()}</span>
                    <button class="btn btn-small" on:click=move |_| set_notice.set(None)>"×"</button>
                </div>
            </Show>

            <FilterBar
                facets=facets
                set_facets=set_facets
                wines=wines
                sort=sort
                set_sort=set_sort
                view_mode=view_mode
                set_view_mode=set_view_mode
            />

            <TastingPanel stats=stats share_link=share_link on_export=on_export />

            <Show
                when=move || !is_loading.get()
                fallback=|| view! { <p class="text-muted">"Loading..."</p> }
            >
                {move || match load_error.get() {
                    Some(e) => view! { <p class="error">{e}</p> }.into_any(),
                    None => view! {
                        <p class="result-count">
                            {move || format!("{} of {} wines", filtered.with(|f| f.len()), wines.with(|w| w.len()))}
                        </p>
                        <WineGrid
                            wines=filtered
                            year=loaded_year
                            view_mode=view_mode
                            selection=selection
                            compare=compare
                            on_status=on_status
                            on_compare_toggle=on_compare_toggle
                            on_pwl=on_pwl
                            on_select=on_select
                        />
                    }.into_any(),
                }}
            </Show>

            <ComparisonBar
                columns=compare_columns
                on_remove=on_compare_remove
                on_open=move |_: ()| set_show_compare.set(true)
            />

            <Show when=move || show_compare.get()>
                <ComparisonModal
                    columns=compare_columns
                    on_close=move |_: ()| set_show_compare.set(false)
                />
            </Show>

            <Show when=move || focused_wine.get().is_some()>
                {move || focused_wine.get().map(|wine| view! {
                    <WineDetail
                        wine=wine
                        year=loaded_year
                        selection=selection
                        on_status=on_status
                        on_close=move |_: ()| set_focused.set(None)
                    />
                })}
            </Show>
        </div>
    }
}
