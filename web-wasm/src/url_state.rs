//! URLクエリとの同期

use top100_common::links::{with_year_param, ShareLink};
use wasm_bindgen::JsValue;

/// 起動時のクエリ（?year= / ?tasted= / ?wine=）
pub fn initial_link() -> ShareLink {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .map(|search| ShareLink::parse(&search))
        .unwrap_or_default()
}

/// 表示中の年度をURLに反映（履歴は増やさない・他のパラメータは残す）
pub fn replace_year(year: i32) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(history) = window.history() else {
        return;
    };
    let location = window.location();
    let pathname = location.pathname().unwrap_or_default();
    let search = location.search().unwrap_or_default();
    let url = format!("{}?{}", pathname, with_year_param(&search, year));
    if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(&url)) {
        gloo::console::warn!(format!("URL更新に失敗: {:?}", e));
    }
}

/// 共有リンクのベース（origin + pathname）
pub fn share_base() -> String {
    web_sys::window()
        .map(|w| {
            let location = w.location();
            format!(
                "{}{}",
                location.origin().unwrap_or_default(),
                location.pathname().unwrap_or_default()
            )
        })
        .unwrap_or_default()
}
