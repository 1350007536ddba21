//! ヘッダーコンポーネント（年度切り替え・記録件数）

use leptos::prelude::*;
use top100_common::dataset::{available_years, CURRENT_YEAR};
use top100_common::selection::TastingStats;

#[component]
pub fn Header<FY>(
    year: ReadSignal<i32>,
    stats: Signal<TastingStats>,
    on_year_change: FY,
) -> impl IntoView
where
    FY: Fn(i32) + 'static + Clone + Send,
{
    let years = available_years(CURRENT_YEAR);

    view! {
        <header class="header">
            <h1>"Wine Spectator Top 100"</h1>
            <select
                class="year-select"
                on:change=move |ev| {
                    if let Ok(y) = event_target_value(&ev).parse::<i32>() {
                        on_year_change(y);
                    }
                }
            >
                {years
                    .into_iter()
                    .map(|y| {
                        view! {
                            <option value=y.to_string() selected=move || year.get() == y>
                                {y}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
            <div class="tasting-stats">
                <span class="stat-tasted">{move || format!("Tasted {}", stats.get().tasted)}</span>
                <span class="stat-want">{move || format!("Want to Taste {}", stats.get().want)}</span>
            </div>
        </header>
    }
}
