//! 画像フォルダの一覧取得
//!
//! オブジェクトストレージの一覧をローカルに書き出したフォルダを想定する。
//! 拡張子では絞り込まず直下のファイルをすべて返す（画像以外はファイル名解析でスキップ扱い）。

use crate::error::{Result, SyncError};
use catalog_image_common::filename::is_image_extension;
use std::path::Path;
use walkdir::WalkDir;

/// 一覧の1件（ファイル名とURL）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub filename: String,
    pub url: String,
}

/// ファイル名からURLを組み立てる
pub fn build_url(base_url: Option<&str>, folder: &Path, filename: &str) -> String {
    match base_url {
        Some(base) => format!("{}/{}", base.trim_end_matches('/'), filename),
        None => folder.join(filename).to_string_lossy().to_string(),
    }
}

/// 画像として扱う拡張子か
pub fn has_image_extension(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .map(|ext| is_image_extension(&ext.to_string_lossy()))
        .unwrap_or(false)
}

pub fn scan_folder(folder: &Path, base_url: Option<&str>) -> Result<Vec<ListingEntry>> {
    if !folder.is_dir() {
        return Err(SyncError::FolderNotFound(folder.display().to_string()));
    }

    let mut entries = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        entries.push(ListingEntry {
            url: build_url(base_url, folder, &filename),
            filename,
        });
    }

    // ファイル名でソート（一覧順を決定的にする）
    entries.sort_by(|a, b| a.filename.cmp(&b.filename));

    Ok(entries)
}
