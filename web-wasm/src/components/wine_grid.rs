//! ワイン一覧グリッドと詳細表示

use leptos::prelude::*;
use top100_common::compare::CompareList;
use top100_common::filter::{humanize_sub_category, ViewMode};
use top100_common::label::{wine_delivery_url, wine_srcset, DeliveryParams};
use top100_common::links::video_url;
use top100_common::selection::{format_price, SelectionSet, TastingStatus};
use top100_common::{Category, Wine};

/// カード画像の配信幅
const CARD_WIDTHS: [u32; 3] = [320, 480, 640];

#[component]
pub fn WineGrid<FS, FC, FP, FD>(
    wines: Memo<Vec<Wine>>,
    year: ReadSignal<i32>,
    view_mode: ReadSignal<ViewMode>,
    selection: ReadSignal<SelectionSet>,
    compare: ReadSignal<CompareList>,
    on_status: FS,
    on_compare_toggle: FC,
    on_pwl: FP,
    on_select: FD,
) -> impl IntoView
where
    FS: Fn(String, Option<TastingStatus>) + 'static + Clone + Send,
    FC: Fn(String) + 'static + Clone + Send,
    FP: Fn(Wine) + 'static + Clone + Send,
    FD: Fn(String) + 'static + Clone + Send,
{
    view! {
        <div class=move || view_mode.get().container_class()>
            <For
                each=move || wines.get()
                key=|wine| wine.id.clone()
                children=move |wine| {
                    let on_status = on_status.clone();
                    let on_compare_toggle = on_compare_toggle.clone();
                    let on_pwl = on_pwl.clone();
                    let on_select = on_select.clone();
                    view! {
                        <WineCard
                            wine=wine
                            year=year
                            view_mode=view_mode
                            selection=selection
                            compare=compare
                            on_status=on_status
                            on_compare_toggle=on_compare_toggle
                            on_pwl=on_pwl
                            on_select=on_select
                        />
                    }
                }
            />
        </div>
    }
}

/// ステータスボタン（押下中のステータスを再度押すと解除）
fn status_button<FS>(
    id: String,
    target: TastingStatus,
    selection: ReadSignal<SelectionSet>,
    on_status: FS,
) -> impl IntoView
where
    FS: Fn(String, Option<TastingStatus>) + 'static + Clone + Send,
{
    let current = {
        let id = id.clone();
        move || selection.with(|s| s.get(&id))
    };
    let current_class = current.clone();

    view! {
        <button
            class=move || {
                if current_class() == Some(target) { "btn btn-small active" } else { "btn btn-small" }
            }
            on:click=move |_| {
                let next = if current() == Some(target) { None } else { Some(target) };
                on_status(id.clone(), next);
            }
        >
            {target.label()}
        </button>
    }
}

#[component]
fn WineCard<FS, FC, FP, FD>(
    wine: Wine,
    year: ReadSignal<i32>,
    view_mode: ReadSignal<ViewMode>,
    selection: ReadSignal<SelectionSet>,
    compare: ReadSignal<CompareList>,
    on_status: FS,
    on_compare_toggle: FC,
    on_pwl: FP,
    on_select: FD,
) -> impl IntoView
where
    FS: Fn(String, Option<TastingStatus>) + 'static + Clone + Send,
    FC: Fn(String) + 'static + Clone + Send,
    FP: Fn(Wine) + 'static + Clone + Send,
    FD: Fn(String) + 'static + Clone + Send,
{
    let id = wine.id.clone();
    let rank = wine.display_rank;
    let category_class = Category::css_class(wine.category.as_deref());
    let card_class = move || format!("{} {}", view_mode.get().card_class(), category_class);
    let image = wine_delivery_url(&wine, &DeliveryParams::width(480));
    let image_srcset = wine_srcset(&wine, &CARD_WIDTHS);
    let meta = [
        wine.vintage.map(|v| v.to_string()),
        wine.category.clone(),
        wine.locale.clone(),
        wine.score.map(|s| format!("{} pts", s)),
        Some(format_price(wine.price)).filter(|p| !p.is_empty()),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" · ");

    let in_compare = {
        let id = id.clone();
        move || compare.with(|c| c.contains(&id))
    };
    let in_compare_label = in_compare.clone();

    let select_id = id.clone();
    let compare_id = id.clone();
    let pwl_wine = wine.clone();

    view! {
        <article class=card_class>
            <div class="wine-rank">{format!("#{}", rank)}</div>
            <img src=image srcset=image_srcset alt=wine.name.clone() loading="lazy" />
            <h3 class="wine-name" on:click=move |_| on_select(select_id.clone())>
                {wine.name.clone()}
            </h3>
            <p class="winery">{wine.producer_name.clone().unwrap_or_default()}</p>
            <p class="meta">{meta}</p>

            <div class="card-actions">
                {status_button(id.clone(), TastingStatus::Tasted, selection, on_status.clone())}
                {status_button(id.clone(), TastingStatus::Want, selection, on_status)}
                <button
                    class={move || if in_compare() { "btn btn-small active" } else { "btn btn-small" }}
                    on:click=move |_| on_compare_toggle(compare_id.clone())
                >
                    {move || if in_compare_label() { "Comparing" } else { "Compare" }}
                </button>
                <button class="btn btn-small" on:click=move |_| on_pwl(pwl_wine.clone())>
                    "Save to PWL"
                </button>
            </div>

            {move || video_url(year.get(), rank).map(|url| view! {
                <a class="video-link" href=url target="_blank" rel="noopener noreferrer">
                    "Watch video"
                </a>
            })}
        </article>
    }
}

/// ワイン詳細（モーダル）
#[component]
pub fn WineDetail<FS, FX>(
    wine: Wine,
    year: ReadSignal<i32>,
    selection: ReadSignal<SelectionSet>,
    on_status: FS,
    on_close: FX,
) -> impl IntoView
where
    FS: Fn(String, Option<TastingStatus>) + 'static + Clone + Send,
    FX: Fn(()) + 'static + Clone + Send,
{
    let image = wine_delivery_url(&wine, &DeliveryParams::width(800));
    let wine_type = wine
        .sub_category
        .as_deref()
        .map(humanize_sub_category)
        .unwrap_or_default();
    let origin = [wine.region.clone(), wine.locale.clone()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ");
    let rank = wine.display_rank;
    let id = wine.id.clone();

    view! {
        <div class="modal-overlay">
            <div class="modal-content wine-detail">
                <button
                    class="modal-close"
                    on:click={
                        let on_close = on_close.clone();
                        move |_| on_close(())
                    }
                >
                    "×"
                </button>
                <img src=image alt=wine.name.clone() />
                <h2>{format!("#{} {}", rank, wine.name)}</h2>
                <p class="winery">{wine.producer_name.clone().unwrap_or_default()}</p>
                <dl class="detail-list">
                    <dt>"Vintage"</dt>
                    <dd>{wine.vintage.map(|v| v.to_string()).unwrap_or_default()}</dd>
                    <dt>"Color"</dt>
                    <dd>{wine.category.clone().unwrap_or_default()}</dd>
                    <dt>"Type"</dt>
                    <dd>{wine_type}</dd>
                    <dt>"Origin"</dt>
                    <dd>{origin}</dd>
                    <dt>"Score"</dt>
                    <dd>{wine.score.map(|s| format!("{} pts", s)).unwrap_or_default()}</dd>
                    <dt>"Price"</dt>
                    <dd>{format_price(wine.price)}</dd>
                    <dt>"Bottle"</dt>
                    <dd>{wine.bottle_size.clone().unwrap_or_default()}</dd>
                    <dt>"Taster"</dt>
                    <dd>{wine.taster_initials.clone().unwrap_or_default()}</dd>
                </dl>
                <p class="tasting-note">{wine.note.clone().unwrap_or_default()}</p>
                <div class="card-actions">
                    {status_button(id.clone(), TastingStatus::Tasted, selection, on_status.clone())}
                    {status_button(id, TastingStatus::Want, selection, on_status)}
                </div>
                {move || video_url(year.get(), rank).map(|url| view! {
                    <a class="video-link" href=url target="_blank" rel="noopener noreferrer">
                        "Watch video"
                    </a>
                })}
            </div>
        </div>
    }
}
