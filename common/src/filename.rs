//! 画像ファイル名パーサ
//!
//! 命名規則 `MODELREF-COLOR-任意.ext` からモデル番号・色・代表画像マーカーを取り出す。
//! 実データの命名は揺れているため、解析失敗は呼び出し側でスキップして処理を続ける。

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 対応する拡張子（小文字で比較）
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

lazy_static::lazy_static! {
    // 拡張子を除いた部分が `_F` / `-F` で終わるものが代表画像
    static ref PRIMARY_MARKER_RE: Regex = Regex::new(r"(?i)[_-]F$").unwrap();
}

/// ファイル名の解析結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFilename {
    pub model_ref: String,
    /// 正規化前の色
    pub color: String,
    pub is_primary: bool,
}

/// ファイル名を解析できなかった理由
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("no file extension")]
    MissingExtension,

    #[error("unsupported extension: .{0}")]
    UnsupportedExtension(String),

    #[error("expected MODELREF-COLOR-..., found {0} segment(s)")]
    MissingSegments(usize),

    #[error("empty model reference or color segment")]
    EmptySegment,
}

/// 拡張子が対応画像形式か判定（大文字小文字を区別しない）
pub fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(ext))
}

/// 拡張子を除いた部分が代表画像マーカーで終わるか
pub fn is_primary_stem(stem: &str) -> bool {
    PRIMARY_MARKER_RE.is_match(stem)
}

/// ファイル名を解析する
///
/// `a/b/NAME.jpg` のようなストレージキーは最後の `/` 以降だけを見る。
pub fn parse_filename(name: &str) -> Result<ParsedFilename, ParseFailure> {
    let base = name.rsplit('/').next().unwrap_or(name).trim();

    let (stem, ext) = match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, ext),
        _ => return Err(ParseFailure::MissingExtension),
    };

    if !is_image_extension(ext) {
        return Err(ParseFailure::UnsupportedExtension(ext.to_lowercase()));
    }

    let segments: Vec<&str> = stem.split('-').collect();
    if segments.len() < 2 {
        return Err(ParseFailure::MissingSegments(segments.len()));
    }

    let model_ref = segments[0].trim();
    let color = segments[1].trim();
    if model_ref.is_empty() || color.is_empty() {
        return Err(ParseFailure::EmptySegment);
    }

    Ok(ParsedFilename {
        model_ref: model_ref.to_uppercase(),
        color: color.to_string(),
        is_primary: is_primary_stem(stem),
    })
}
