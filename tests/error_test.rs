//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use catalog_image_sync::error::SyncError;
use catalog_image_sync::{pipeline, products, scanner};
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"), None);
    assert!(matches!(result, Err(SyncError::FolderNotFound(_))));
}

/// 画像のないフォルダを照合元にした場合
#[test]
fn test_load_images_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();

    let source = pipeline::ImageSource::Folder {
        path: dir.path().to_path_buf(),
        base_url: None,
    };
    let result = pipeline::load_images(&source);
    assert!(matches!(result, Err(SyncError::NoImagesFound(_))));
}

/// 存在しない商品ファイル
#[test]
fn test_load_products_not_found() {
    let result = products::load_products(Path::new("/nonexistent/products.xlsx"));
    assert!(matches!(result, Err(SyncError::FileNotFound(_))));
}

/// 壊れたスプレッドシート
#[test]
fn test_load_products_broken_xlsx() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("products.xlsx");
    std::fs::write(&path, b"not a zip").unwrap();

    let result = products::load_products(&path);
    assert!(matches!(result, Err(SyncError::Spreadsheet(_))));
}

/// SyncErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        SyncError::Config("テスト設定エラー".to_string()),
        SyncError::FileNotFound("products.xlsx".to_string()),
        SyncError::FolderNotFound("/path/to/folder".to_string()),
        SyncError::InvalidProducts("列がありません".to_string()),
        SyncError::InvalidIndex("列がありません".to_string()),
        SyncError::Spreadsheet("壊れています".to_string()),
        SyncError::ExcelGeneration("Excel生成エラー".to_string()),
        SyncError::NoImagesFound("フォルダ".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: SyncError = io_err.into();

    assert!(matches!(err, SyncError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: SyncError = json_err.into();

    assert!(matches!(err, SyncError::JsonParse(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_conversion() {
    let common_err = catalog_image_common::Error::MissingField { index: 0, field: "modelRef" };
    let err: SyncError = common_err.into();

    assert!(matches!(err, SyncError::Common(_)));
    assert!(format!("{}", err).contains("modelRef"));
}
