//! PWL追加（ブラウザ版）
//!
//! wso_session Cookie を送るため credentials: include で送信する。

use gloo::net::http::Request;
use top100_common::pwl::{classify_response, endpoint, PwlOutcome, PwlRequest, DEFAULT_API_BASE};
use top100_common::Wine;
use web_sys::RequestCredentials;

pub async fn add_to_pwl(wine: &Wine) -> PwlOutcome {
    let request = Request::post(&endpoint(DEFAULT_API_BASE))
        .credentials(RequestCredentials::Include)
        .header("Accept", "application/json")
        .json(&PwlRequest::for_wine(wine));

    let request = match request {
        Ok(r) => r,
        Err(e) => return PwlOutcome::network_error(e.to_string()),
    };

    let response = match request.send().await {
        Ok(r) => r,
        Err(e) => {
            gloo::console::error!(format!("PWL送信エラー: {}", e));
            return PwlOutcome::network_error(e.to_string());
        }
    };

    let status = response.status();
    match response.text().await {
        Ok(text) => classify_response(status, &text),
        Err(e) => PwlOutcome::network_error(e.to_string()),
    }
}
