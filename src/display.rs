//! 端末表示用の整形

use top100_common::compare::ComparisonColumn;
use top100_common::filter::humanize_sub_category;
use top100_common::links::video_url;
use top100_common::selection::{format_price, TastingStatus};
use top100_common::Wine;

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

/// 一覧の1行
pub fn wine_line(wine: &Wine, status: Option<TastingStatus>) -> String {
    let mark = match status {
        Some(TastingStatus::Tasted) => "✔",
        Some(TastingStatus::Want) => "☆",
        None => " ",
    };
    let vintage = wine.vintage.map(|v| v.to_string()).unwrap_or_default();
    let score = wine.score.map(|s| format!("{}pts", s)).unwrap_or_default();
    format!(
        "{} #{:<3} {} {} {} [{}] {} {}",
        mark,
        wine.display_rank,
        or_dash(wine.producer_name.as_deref()),
        wine.name,
        vintage,
        or_dash(wine.category.as_deref()),
        score,
        format_price(wine.price),
    )
    .trim_end()
    .to_string()
}

/// 詳細表示
pub fn wine_detail(wine: &Wine, year: i32, status: Option<TastingStatus>) -> String {
    let mut lines = vec![
        format!("#{} {}", wine.display_rank, wine.full_label()),
        format!("  id: {}", wine.id),
        format!("  色区分: {}", or_dash(wine.category.as_deref())),
        format!(
            "  タイプ: {}",
            wine.sub_category
                .as_deref()
                .map(humanize_sub_category)
                .unwrap_or_else(|| "-".to_string())
        ),
        format!(
            "  産地: {} / {}",
            or_dash(wine.region.as_deref()),
            or_dash(wine.locale.as_deref())
        ),
        format!(
            "  スコア: {}",
            wine.score.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string())
        ),
        format!("  価格: {}", or_dash(Some(format_price(wine.price).as_str()))),
    ];
    if let Some(size) = &wine.bottle_size {
        lines.push(format!("  ボトル: {}", size));
    }
    if let Some(taster) = &wine.taster_initials {
        lines.push(format!("  テイスター: {}", taster));
    }
    if let Some(status) = status {
        lines.push(format!("  記録: {}", status.label()));
    }
    if let Some(url) = video_url(year, wine.display_rank) {
        lines.push(format!("  動画: {}", url));
    }
    if let Some(note) = &wine.note {
        lines.push(String::new());
        lines.push(format!("  {}", note));
    }
    lines.join("\n")
}

/// 比較表（行 = 項目、列 = ワイン）
pub fn comparison_table(columns: &[ComparisonColumn]) -> String {
    let rows: [(&str, fn(&ComparisonColumn) -> String); 9] = [
        ("Wine", |c| c.name.clone()),
        ("Winery", |c| c.producer.clone()),
        ("Rank", |c| format!("#{}", c.rank)),
        ("Score", |c| format!("{} pts", c.score)),
        ("Price", |c| format!("${}", c.price)),
        ("Type", |c| c.category.clone()),
        ("Vintage", |c| c.vintage.clone()),
        ("Region", |c| c.region.clone()),
        ("Country", |c| c.country.clone()),
    ];

    let mut lines = Vec::new();
    for (label, value) in rows.iter() {
        let cells: Vec<String> = columns.iter().map(|c| format!("{:<32}", value(c))).collect();
        lines.push(format!("{:<8} {}", label, cells.join(" ")).trim_end().to_string());
    }
    lines.push(String::new());
    for column in columns {
        lines.push(format!("{}: {}", column.name, column.note));
    }
    lines.join("\n")
}
