use thiserror::Error;

#[derive(Error, Debug)]
pub enum Top100Error {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("データディレクトリが見つかりません: {0}")]
    DataDirNotFound(String),

    #[error("ワインが見つかりません: {0}")]
    WineNotFound(String),

    #[error("比較には{min}〜{max}本のワインが必要です（指定: {given}本）")]
    CompareCount { given: usize, min: usize, max: usize },

    #[error("共有リンクが不正: {0}")]
    InvalidShareLink(String),

    #[error("出力エラー: {0}")]
    Export(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] top100_common::Error),
}

pub type Result<T> = std::result::Result<T, Top100Error>;
