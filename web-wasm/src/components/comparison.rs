//! ワイン比較（比較バー・比較モーダル）

use leptos::prelude::*;
use top100_common::compare::{ComparisonColumn, MAX_COMPARE, MIN_COMPARE};

#[component]
pub fn ComparisonBar<FR, FO>(
    columns: Memo<Vec<ComparisonColumn>>,
    on_remove: FR,
    on_open: FO,
) -> impl IntoView
where
    FR: Fn(String) + 'static + Clone + Send,
    FO: Fn(()) + 'static + Clone + Send,
{
    let count = move || columns.with(|c| c.len());

    view! {
        <div class={move || if count() > 0 { "comparison-bar show" } else { "comparison-bar" }}>
            <div class="comparison-header">
                <h4>{move || format!("Compare Wines ({}/{})", count(), MAX_COMPARE)}</h4>
                <button
                    class="btn btn-primary btn-small"
                    disabled=move || count() < MIN_COMPARE
                    on:click=move |_| on_open(())
                >
                    "Compare Now"
                </button>
            </div>
            <div class="comparison-wines">
                <For
                    each=move || columns.get()
                    key=|column| column.id.clone()
                    children=move |column| {
                        let on_remove = on_remove.clone();
                        let id = column.id.clone();
                        view! {
                            <div class="comparison-wine-item">
                                <img class="comparison-thumb" src=column.image_url.clone() alt=column.name.clone() />
                                <span>{column.name.clone()}</span>
                                <button class="remove-compare-btn" on:click=move |_| on_remove(id.clone())>
                                    "×"
                                </button>
                            </div>
                        }
                    }
                />
                {move || {
                    (0..MAX_COMPARE.saturating_sub(count()))
                        .map(|_| view! {
                            <div class="comparison-wine-empty">
                                <span>"Add wine to compare"</span>
                            </div>
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

#[component]
pub fn ComparisonModal<FX>(columns: Memo<Vec<ComparisonColumn>>, on_close: FX) -> impl IntoView
where
    FX: Fn(()) + 'static + Clone + Send,
{
    view! {
        <div class="modal-overlay">
            <div class="modal-content comparison-modal">
                <button
                    class="modal-close"
                    on:click={
                        let on_close = on_close.clone();
                        move |_| on_close(())
                    }
                >
                    "×"
                </button>
                <div class="comparison-modal-header">
                    <h2>"Wine Comparison"</h2>
                    <p>{format!("Compare up to {} wines side by side", MAX_COMPARE)}</p>
                </div>
                <div class="comparison-grid">
                    <For
                        each=move || columns.get()
                        key=|column| column.id.clone()
                        children=move |column| {
                            view! {
                                <div class="comparison-column">
                                    <div class="comparison-wine-header">
                                        <img class="comparison-wine-image" src=column.image_url.clone() alt=column.name.clone() />
                                        <h3>{column.name.clone()}</h3>
                                        <p class="comparison-winery">{column.producer.clone()}</p>
                                    </div>
                                    <div class="comparison-details">
                                        <DetailRow label="Rank" value=format!("#{}", column.rank) />
                                        <DetailRow label="Score" value=format!("{} pts", column.score) />
                                        <DetailRow label="Price" value=format!("${}", column.price) />
                                        <DetailRow label="Type" value=column.category.clone() />
                                        <DetailRow label="Vintage" value=column.vintage.clone() />
                                        <DetailRow label="Region" value=column.region.clone() />
                                        <DetailRow label="Country" value=column.country.clone() />
                                    </div>
                                    <div class="comparison-description">
                                        <h4>"Tasting Notes"</h4>
                                        <p>{column.note.clone()}</p>
                                    </div>
                                </div>
                            }
                        }
                    />
                </div>
            </div>
        </div>
    }
}

#[component]
fn DetailRow(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="detail-row">
            <span class="detail-label">{label}</span>
            <span class="detail-value">{value}</span>
        </div>
    }
}
