use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("商品ファイルが不正: {0}")]
    InvalidProducts(String),

    #[error("画像インデックスが不正: {0}")]
    InvalidIndex(String),

    #[error("スプレッドシート読み込みエラー: {0}")]
    Spreadsheet(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("CSVエラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] catalog_image_common::Error),
}

pub type Result<T> = std::result::Result<T, SyncError>;
