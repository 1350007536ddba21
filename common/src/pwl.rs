//! Personal Wine List（PWL）への追加
//!
//! リクエスト本文の生成とレスポンスの分類だけを行う。
//! 実際の送信は呼び出し側（CLIは reqwest、ブラウザは fetch）が担当。

use crate::types::Wine;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// APIのデフォルトベースURL
pub const DEFAULT_API_BASE: &str = "https://www.winespectator.com";

/// 追加APIのパス
pub const ADD_ITEM_PATH: &str = "/pwl/apiAdditem";

/// 追加先リスト
pub const DEFAULT_LIST_ID: &str = "default";

/// 送信元の識別子
pub const SOURCE: &str = "top100";

/// 追加APIのエンドポイント
pub fn endpoint(api_base: &str) -> String {
    format!("{}{}", api_base.trim_end_matches('/'), ADD_ITEM_PATH)
}

/// 追加リクエスト本文
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PwlRequest {
    pub listid: String,
    pub wineid: Vec<Value>,
    pub source: String,
    pub name: String,
}

impl PwlRequest {
    /// 1本分のリクエストを生成（数値idは数値として送る）
    pub fn for_wine(wine: &Wine) -> Self {
        let id = match wine.id.parse::<u64>() {
            Ok(n) => Value::from(n),
            Err(_) => Value::from(wine.id.clone()),
        };
        Self {
            listid: DEFAULT_LIST_ID.to_string(),
            wineid: vec![id],
            source: SOURCE.to_string(),
            name: wine.full_label(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PwlResponseBody {
    added: Vec<Value>,
    errors: Vec<Value>,
}

/// 追加結果
#[derive(Debug, Clone, PartialEq)]
pub enum PwlOutcome {
    Added { added: Vec<Value> },
    Partial { added: Vec<Value>, errors: Vec<Value> },
    AuthRequired,
    Forbidden,
    NetworkError { detail: String },
}

impl PwlOutcome {
    pub fn network_error(detail: impl Into<String>) -> Self {
        PwlOutcome::NetworkError {
            detail: detail.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PwlOutcome::Added { .. })
    }

    /// エラーコード（成功・一部成功は None）
    pub fn code(&self) -> Option<&'static str> {
        match self {
            PwlOutcome::Added { .. } | PwlOutcome::Partial { .. } => None,
            PwlOutcome::AuthRequired => Some("AUTH_REQUIRED"),
            PwlOutcome::Forbidden => Some("PAYWALL_FORBIDDEN"),
            PwlOutcome::NetworkError { .. } => Some("NETWORK_ERROR"),
        }
    }

    /// 利用者向けメッセージ
    pub fn message(&self) -> String {
        match self {
            PwlOutcome::Added { .. } => "Added to your Personal Wine List.".to_string(),
            PwlOutcome::Partial { added, errors } => format!(
                "Added {} item(s). {} issue(s).",
                added.len(),
                errors.len()
            ),
            PwlOutcome::AuthRequired => "Please sign in to save to PWL.".to_string(),
            PwlOutcome::Forbidden => "Subscriber feature. Upgrade to continue.".to_string(),
            PwlOutcome::NetworkError { .. } => {
                "We had trouble saving that. Please try again.".to_string()
            }
        }
    }
}

/// HTTPステータスと本文から結果を分類
///
/// - 401 → AuthRequired、403 → Forbidden
/// - 2xx 以外かつ 207 以外 → NetworkError
/// - 207 または errors が空でない → Partial
/// - 本文がJSONとして読めない → NetworkError
pub fn classify_response(status: u16, body: &str) -> PwlOutcome {
    match status {
        401 => return PwlOutcome::AuthRequired,
        403 => return PwlOutcome::Forbidden,
        200..=299 => {}
        _ => return PwlOutcome::network_error(format!("Request failed: {}", status)),
    }

    let parsed: PwlResponseBody = if body.trim().is_empty() {
        PwlResponseBody::default()
    } else {
        match serde_json::from_str::<Option<PwlResponseBody>>(body) {
            Ok(parsed) => parsed.unwrap_or_default(),
            Err(e) => {
                warn!(status, error = %e, "PWLレスポンスを解析できません");
                return PwlOutcome::network_error(format!("Invalid response: {}", e));
            }
        }
    };

    if status == 207 || !parsed.errors.is_empty() {
        PwlOutcome::Partial {
            added: parsed.added,
            errors: parsed.errors,
        }
    } else {
        PwlOutcome::Added {
            added: parsed.added,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vintage;
    use serde_json::json;

    #[test]
    fn test_request_body() {
        let wine = Wine {
            id: "4021".to_string(),
            name: "Barolo Monfortino".to_string(),
            producer_name: Some("Giacomo Conterno".to_string()),
            vintage: Some(Vintage::Year(2015)),
            ..Default::default()
        };
        let body = serde_json::to_value(PwlRequest::for_wine(&wine)).unwrap();
        assert_eq!(
            body,
            json!({
                "listid": "default",
                "wineid": [4021],
                "source": "top100",
                "name": "Giacomo Conterno Barolo Monfortino 2015"
            })
        );
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            endpoint("https://www.winespectator.com/"),
            "https://www.winespectator.com/pwl/apiAdditem"
        );
    }

    #[test]
    fn test_classify_auth_and_paywall() {
        assert_eq!(classify_response(401, ""), PwlOutcome::AuthRequired);
        assert_eq!(classify_response(403, "{}"), PwlOutcome::Forbidden);
        assert_eq!(
            classify_response(401, "").message(),
            "Please sign in to save to PWL."
        );
        assert_eq!(classify_response(403, "").code(), Some("PAYWALL_FORBIDDEN"));
    }

    #[test]
    fn test_classify_success() {
        let outcome = classify_response(200, r#"{"added":[12]}"#);
        assert!(outcome.is_success());
        assert_eq!(outcome.message(), "Added to your Personal Wine List.");
    }

    #[test]
    fn test_classify_partial() {
        let outcome = classify_response(207, r#"{"added":[1],"errors":[]}"#);
        assert_eq!(outcome.message(), "Added 1 item(s). 0 issue(s).");

        let outcome = classify_response(200, r#"{"added":[],"errors":["duplicate"]}"#);
        assert!(matches!(outcome, PwlOutcome::Partial { .. }));
        assert_eq!(outcome.message(), "Added 0 item(s). 1 issue(s).");
    }

    #[test]
    fn test_classify_failures() {
        assert_eq!(classify_response(500, "").code(), Some("NETWORK_ERROR"));
        assert_eq!(classify_response(200, "<html>").code(), Some("NETWORK_ERROR"));
        assert_eq!(
            classify_response(502, "").message(),
            "We had trouble saving that. Please try again."
        );
    }

    #[test]
    fn test_classify_null_body() {
        assert!(classify_response(200, "null").is_success());
    }
}
