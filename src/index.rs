//! 画像インデックス（CSV）の読み込み
//!
//! 事前に作成されたインデックス表（列: model_ref, color, filename, url）を読む。
//! モデル番号と色は表の値をそのまま使い、代表画像マーカーだけファイル名から判定する。
//! 列名は大文字小文字・区切り（`_` / `-` / 空白）を無視して照合する。

use crate::error::{Result, SyncError};
use crate::pipeline::ImageListing;
use catalog_image_common::filename::is_primary_stem;
use catalog_image_common::{ImageEntry, SkippedFile};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct IndexRow {
    model_ref: String,
    #[serde(default)]
    color: String,
    #[serde(default)]
    filename: String,
    #[serde(default)]
    url: String,
}

/// 列名を `IndexRow` のフィールド名にそろえる（未知の列はそのまま）
fn canonical_header(header: &str) -> String {
    let folded: String = header
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect();

    match folded.as_str() {
        "modelref" | "model" => "model_ref".into(),
        "color" | "colour" => "color".into(),
        "filename" | "file" => "filename".into(),
        "url" => "url".into(),
        _ => header.to_string(),
    }
}

fn stem_of(filename: &str) -> &str {
    let base = filename.rsplit('/').next().unwrap_or(filename);
    base.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(base)
}

pub fn load_index(path: &Path) -> Result<ImageListing> {
    if !path.exists() {
        return Err(SyncError::FileNotFound(path.display().to_string()));
    }

    let file = std::fs::File::open(path)?;
    load_index_from_reader(file)
}

pub fn load_index_from_reader<R: std::io::Read>(reader: R) -> Result<ImageListing> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: csv::StringRecord = rdr.headers()?.iter().map(canonical_header).collect();
    rdr.set_headers(headers.clone());

    let has = |name: &str| headers.iter().any(|h| h == name);
    if !has("model_ref") || !has("url") {
        return Err(SyncError::InvalidIndex(
            "model_ref / url 列が必要です".into(),
        ));
    }

    let mut listing = ImageListing::default();

    for (line, row) in rdr.deserialize::<IndexRow>().enumerate() {
        let row = row?;
        let label = if row.filename.is_empty() {
            format!("row {}", line + 2)
        } else {
            row.filename.clone()
        };

        if row.model_ref.is_empty() || row.url.is_empty() {
            warn!(row = line + 2, "skipping index row without model_ref or url");
            listing.skipped.push(SkippedFile {
                filename: label,
                reason: "missing model_ref or url".into(),
            });
            continue;
        }

        let name = if row.filename.is_empty() { row.url.as_str() } else { row.filename.as_str() };
        let is_primary = is_primary_stem(stem_of(name));

        listing.entries.push(ImageEntry {
            filename: label,
            model_ref: row.model_ref.to_uppercase(),
            color: row.color,
            is_primary,
            url: row.url,
        });
    }

    debug!(entries = listing.entries.len(), skipped = listing.skipped.len(), "loaded image index");
    Ok(listing)
}
