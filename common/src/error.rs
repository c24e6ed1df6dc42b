//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// データ品質の問題（画像なし・ファイル名不正・エイリアスなし）はここに含めない。
/// 呼び出し側の契約違反のみをエラーとする。
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing required field `{field}` in product #{index}")]
    MissingField { index: usize, field: &'static str },
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
