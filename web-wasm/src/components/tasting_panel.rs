//! テイスティング記録パネル（件数・出力・共有リンク）

use leptos::prelude::*;
use top100_common::export::ExportFormat;
use top100_common::selection::TastingStats;

#[component]
pub fn TastingPanel<FE>(
    stats: Signal<TastingStats>,
    share_link: Signal<String>,
    on_export: FE,
) -> impl IntoView
where
    FE: Fn(ExportFormat) + 'static + Clone + Send,
{
    let has_records = move || stats.get().total() > 0;

    view! {
        <div class="tasting-panel">
            <h4>"My Tasting List"</h4>
            <p>
                {move || {
                    let s = stats.get();
                    format!("{} tasted · {} want to taste", s.tasted, s.want)
                }}
            </p>

            <div class="export-buttons">
                <button
                    class="btn btn-secondary"
                    disabled=move || !has_records()
                    on:click={
                        let on_export = on_export.clone();
                        move |_| on_export(ExportFormat::Csv)
                    }
                >
                    "Export CSV"
                </button>
                <button
                    class="btn btn-secondary"
                    disabled=move || !has_records()
                    on:click={
                        let on_export = on_export.clone();
                        move |_| on_export(ExportFormat::Json)
                    }
                >
                    "Export JSON"
                </button>
            </div>

            <div class="form-group">
                <label for="share-link">"Share your tasted wines"</label>
                <input type="text" id="share-link" readonly=true prop:value=move || share_link.get() />
            </div>
        </div>
    }
}
