//! 照合レポート
//!
//! 照合自体はデータ品質の問題でエラーを出さないため、
//! 「画像のない商品」「エイリアスで一致した商品」「解析できなかったファイル名」を
//! ここで集計して後段で確認できるようにする。

use crate::types::{MatchKind, MatchResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 解析できずにスキップしたファイル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedFile {
    pub filename: String,
    pub reason: String,
}

/// 画像が見つからなかった商品
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmatchedProduct {
    pub model_ref: String,
    pub color: String,
}

/// エイリアス経由で一致した商品
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasMatch {
    pub model_ref: String,
    pub color: String,
    pub matched_color: String,
}

/// 照合結果の集計
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub total_products: usize,
    pub exact_matches: usize,
    pub alias_matches: usize,
    pub unmatched: usize,
    pub alias_details: Vec<AliasMatch>,
    pub unmatched_products: Vec<UnmatchedProduct>,
    pub skipped_files: Vec<SkippedFile>,
}

impl MatchReport {
    pub fn build(results: &[MatchResult], skipped: &[SkippedFile]) -> Self {
        let mut report = Self {
            total_products: results.len(),
            skipped_files: skipped.to_vec(),
            ..Default::default()
        };

        for result in results {
            match result.match_kind {
                MatchKind::Exact => report.exact_matches += 1,
                MatchKind::Alias => {
                    report.alias_matches += 1;
                    report.alias_details.push(AliasMatch {
                        model_ref: result.product.model_ref.clone(),
                        color: result.product.color.clone(),
                        matched_color: result
                            .matched_color
                            .as_ref()
                            .map(|c| c.to_string())
                            .unwrap_or_default(),
                    });
                }
                MatchKind::Unmatched => {
                    report.unmatched += 1;
                    report.unmatched_products.push(UnmatchedProduct {
                        model_ref: result.product.model_ref.clone(),
                        color: result.product.color.clone(),
                    });
                }
            }
        }

        report
    }

    /// 画像が付いた商品の割合
    pub fn coverage(&self) -> f64 {
        if self.total_products == 0 {
            return 0.0;
        }
        (self.exact_matches + self.alias_matches) as f64 / self.total_products as f64
    }
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "products:        {}", self.total_products)?;
        writeln!(f, "  exact match:   {}", self.exact_matches)?;
        writeln!(f, "  alias match:   {}", self.alias_matches)?;
        writeln!(f, "  no image:      {}", self.unmatched)?;
        writeln!(f, "coverage:        {:.1}%", self.coverage() * 100.0)?;
        writeln!(f, "skipped files:   {}", self.skipped_files.len())?;

        if !self.unmatched_products.is_empty() {
            writeln!(f, "\nproducts without images:")?;
            for p in &self.unmatched_products {
                writeln!(f, "  {} / {}", p.model_ref, p.color)?;
            }
        }

        if !self.skipped_files.is_empty() {
            writeln!(f, "\nskipped files:")?;
            for s in &self.skipped_files {
                writeln!(f, "  {} ({})", s.filename, s.reason)?;
            }
        }

        Ok(())
    }
}
