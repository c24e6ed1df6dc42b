//! 一括照合処理
//!
//! ## 処理フロー
//! 1. 画像一覧（フォルダ or インデックスCSV）を読み込み、ファイル名を解析
//! 2. 解析できないファイル名はスキップして記録（処理は止めない）
//! 3. (モデル番号, 色) ごとにグループ化
//! 4. 商品と照合
//! 5. 集計レポートを作成
//!
//! 照合部分は入出力を持たないので、途中で失敗しても同じ入力で再実行できる。

use crate::config::Config;
use crate::error::{Result, SyncError};
use crate::scanner::{self, ListingEntry};
use catalog_image_common::export::report_xlsx::generate_report_xlsx_buffer;
use catalog_image_common::{
    group_images, match_products, ColorAliasTable, ImageEntry, ImageGroups, MatchOptions,
    MatchReport, MatchResult, Product, SkippedFile,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 画像の取得元
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// ストレージ一覧を書き出したフォルダ
    Folder {
        path: PathBuf,
        base_url: Option<String>,
    },
    /// インデックスCSV（model_ref, color, filename, url）
    Index(PathBuf),
}

/// 解析済みの画像一覧
#[derive(Debug, Clone, Default)]
pub struct ImageListing {
    pub entries: Vec<ImageEntry>,
    pub skipped: Vec<SkippedFile>,
}

impl ImageListing {
    /// ファイル名を解析して一覧を作る
    pub fn from_listing(listing: &[ListingEntry]) -> Self {
        let mut result = Self::default();

        for item in listing {
            match ImageEntry::from_listing(&item.filename, &item.url) {
                Ok(entry) => result.entries.push(entry),
                Err(reason) => {
                    warn!(filename = %item.filename, %reason, "skipping unparsable filename");
                    result.skipped.push(SkippedFile {
                        filename: item.filename.clone(),
                        reason: reason.to_string(),
                    });
                }
            }
        }

        result
    }
}

/// 一括処理の結果
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub results: Vec<MatchResult>,
    pub groups: ImageGroups,
    pub report: MatchReport,
}

/// 取得元から画像一覧を読み込む
pub fn load_images(source: &ImageSource) -> Result<ImageListing> {
    match source {
        ImageSource::Folder { path, base_url } => {
            let listing = scanner::scan_folder(path, base_url.as_deref())?;
            // 画像以外のファイルはスキップとして記録するが、画像が1枚もなければエラー
            if !listing.iter().any(|e| scanner::has_image_extension(&e.filename)) {
                return Err(SyncError::NoImagesFound(path.display().to_string()));
            }
            Ok(ImageListing::from_listing(&listing))
        }
        ImageSource::Index(path) => crate::index::load_index(path),
    }
}

/// 設定とCLI指定から照合オプションを組み立てる（CLI指定が優先）
pub fn build_match_options(
    config: &Config,
    alias_file: Option<&Path>,
    default_image: Option<&str>,
) -> Result<MatchOptions> {
    let mut aliases = ColorAliasTable::builtin();

    if let Some(path) = alias_file.or(config.alias_file.as_deref()) {
        if !path.exists() {
            return Err(SyncError::FileNotFound(path.display().to_string()));
        }
        let custom = ColorAliasTable::from_file(path)?;
        debug!(entries = custom.len(), path = %path.display(), "merged custom color aliases");
        aliases.merge(&custom);
    }

    Ok(MatchOptions {
        default_image: default_image
            .map(str::to_string)
            .unwrap_or_else(|| config.default_image.clone()),
        aliases,
    })
}

/// グループ化・照合・集計を行う
pub fn run(products: &[Product], listing: ImageListing, options: &MatchOptions) -> Result<SyncOutcome> {
    let ImageListing { entries, skipped } = listing;

    let groups = group_images(entries);
    info!(
        groups = groups.len(),
        images = groups.image_count(),
        skipped = skipped.len(),
        "grouped images"
    );

    let results = match_products(products, &groups, options)?;
    let report = MatchReport::build(&results, &skipped);
    info!(
        products = report.total_products,
        exact = report.exact_matches,
        alias = report.alias_matches,
        unmatched = report.unmatched,
        "matched products"
    );

    Ok(SyncOutcome { results, groups, report })
}

/// 照合結果をJSONで保存
pub fn write_results(path: &Path, results: &[MatchResult]) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportFile<'a> {
    generated_at: String,
    alias_table_version: u32,
    #[serde(flatten)]
    report: &'a MatchReport,
}

/// レポートを保存（拡張子 .xlsx ならExcel、それ以外はJSON）
pub fn write_report(path: &Path, report: &MatchReport) -> Result<()> {
    let is_xlsx = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false);

    if is_xlsx {
        let buffer = generate_report_xlsx_buffer(report).map_err(SyncError::ExcelGeneration)?;
        std::fs::write(path, buffer)?;
    } else {
        let file = ReportFile {
            generated_at: chrono::Local::now().to_rfc3339(),
            alias_table_version: catalog_image_common::ALIAS_TABLE_VERSION,
            report,
        };
        std::fs::write(path, serde_json::to_string_pretty(&file)?)?;
    }

    Ok(())
}
