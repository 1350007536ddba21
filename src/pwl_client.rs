//! PWL追加APIの呼び出し
//!
//! 送信は reqwest、結果の分類は共通ライブラリの classify_response。

use std::time::Duration;
use top100_common::pwl::{classify_response, endpoint, PwlOutcome, PwlRequest};
use top100_common::Wine;
use tracing::{debug, warn};

pub struct PwlClient {
    client: reqwest::Client,
    api_base: String,
    session: Option<String>,
}

impl PwlClient {
    pub fn new(api_base: &str, session: Option<String>, timeout_seconds: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "HTTPクライアント設定に失敗、デフォルトを使用");
                reqwest::Client::new()
            });
        Self {
            client,
            api_base: api_base.to_string(),
            session,
        }
    }

    /// ワインを1本追加
    ///
    /// 通信エラーも含めて必ず PwlOutcome を返す。
    pub async fn add_wine(&self, wine: &Wine) -> PwlOutcome {
        let url = endpoint(&self.api_base);
        let body = PwlRequest::for_wine(wine);
        debug!(url = %url, id = %wine.id, "PWLに送信");

        let mut request = self
            .client
            .post(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body);
        if let Some(session) = &self.session {
            request = request.header(reqwest::header::COOKIE, format!("wso_session={}", session));
        }

        let response = match request.send().await {
            Ok(res) => res,
            Err(e) => {
                warn!(error = %e, "PWL送信エラー");
                return PwlOutcome::network_error(e.to_string());
            }
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(text) => classify_response(status, &text),
            Err(e) => {
                warn!(status, error = %e, "PWLレスポンス読み込みエラー");
                PwlOutcome::network_error(e.to_string())
            }
        }
    }
}
