//! 商品・画像照合モジュール
//!
//! ## 照合手順
//! 1. (大文字モデル番号, 色トークン) でグループを直接検索
//! 2. 見つからなければ同じモデル番号のグループを色トークンの辞書順に走査し、
//!    エイリアス表で同値と判定された最初のグループを採用
//! 3. それでもなければ既定画像・空ギャラリー
//!
//! 画像が見つからないのは通常の結果でありエラーにはしない。

use crate::alias::ColorAliasTable;
use crate::error::{Error, Result};
use crate::grouper::ImageGroups;
use crate::types::{ImageGroup, MatchKind, MatchResult, Product, DEFAULT_IMAGE_URL};

/// 照合オプション
#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// 該当なしのときの画像URL
    pub default_image: String,
    /// 色の同値表
    pub aliases: ColorAliasTable,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            default_image: DEFAULT_IMAGE_URL.to_string(),
            aliases: ColorAliasTable::builtin(),
        }
    }
}

/// 1商品に対応する画像グループを探す
pub fn find_group<'a>(
    product: &Product,
    groups: &'a ImageGroups,
    aliases: &ColorAliasTable,
) -> Option<(MatchKind, &'a ImageGroup)> {
    let key = product.key();

    if let Some(group) = groups.get(&key) {
        return Some((MatchKind::Exact, group));
    }

    groups
        .for_model(&key.model_ref)
        .find(|(color, _)| aliases.equivalent(&key.color, color))
        .map(|(_, group)| (MatchKind::Alias, group))
}

/// 商品一覧を画像グループと照合する
///
/// モデル番号が空の商品は呼び出し側の契約違反として全体を失敗させる。
pub fn match_products(
    products: &[Product],
    groups: &ImageGroups,
    options: &MatchOptions,
) -> Result<Vec<MatchResult>> {
    let mut results = Vec::with_capacity(products.len());

    for (index, product) in products.iter().enumerate() {
        if product.model_ref.trim().is_empty() {
            return Err(Error::MissingField {
                index,
                field: "modelRef",
            });
        }

        // 出力キーと同名の素通し列は結果に持ち込まない
        let mut passthrough = product.clone();
        passthrough.strip_reserved_fields();

        let result = match find_group(product, groups, &options.aliases) {
            Some((kind, group)) => MatchResult {
                product: passthrough,
                image_url: group
                    .image_url()
                    .unwrap_or(options.default_image.as_str())
                    .to_string(),
                gallery: group.gallery(),
                match_kind: kind,
                matched_color: Some(group.key.color.clone()),
            },
            None => MatchResult {
                product: passthrough,
                image_url: options.default_image.clone(),
                gallery: Vec::new(),
                match_kind: MatchKind::Unmatched,
                matched_color: None,
            },
        };

        results.push(result);
    }

    Ok(results)
}
