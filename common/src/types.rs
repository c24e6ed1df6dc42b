//! 照合で使う型定義
//!
//! - Product: スプレッドシートの商品行
//! - ImageEntry: ストレージ一覧の画像1件（ファイル名解析済み）
//! - GroupKey / ImageGroup: (モデル番号, 色トークン) ごとの画像グループ
//! - MatchResult: 商品 + 代表画像 + ギャラリー

use crate::color::{normalize, ColorToken};
use crate::filename::{parse_filename, ParseFailure};
use serde::{Deserialize, Serialize};

/// 照合できなかった商品に付ける既定の画像パス
pub const DEFAULT_IMAGE_URL: &str = "/images/placeholder.png";

/// 照合結果の出力で使うキー（素通し列には使えない）
pub const RESERVED_OUTPUT_KEYS: &[&str] = &[
    "modelRef",
    "color",
    "imageUrl",
    "gallery",
    "matchKind",
    "matchedColor",
];

/// 商品レコード
///
/// `model_ref` と `color` 以外の列（サブカテゴリ・ブランド・価格・在庫など）は
/// `fields` にそのまま保持し、出力へ素通しする。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "model_ref")]
    pub model_ref: String,

    #[serde(default)]
    pub color: String,

    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    pub fn new(model_ref: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            model_ref: model_ref.into(),
            color: color.into(),
            fields: serde_json::Map::new(),
        }
    }

    /// 照合キー
    pub fn key(&self) -> GroupKey {
        GroupKey::new(&self.model_ref, &self.color)
    }

    /// 出力キーと衝突する素通し列を取り除き、取り除いた列名を返す
    pub fn strip_reserved_fields(&mut self) -> Vec<String> {
        let mut removed = Vec::new();
        for key in RESERVED_OUTPUT_KEYS {
            if self.fields.remove(*key).is_some() {
                removed.push(key.to_string());
            }
        }
        removed
    }
}

/// 画像グループのキー
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupKey {
    /// 大文字化済みモデル番号
    pub model_ref: String,
    pub color: ColorToken,
}

impl GroupKey {
    pub fn new(model_ref: &str, color: &str) -> Self {
        Self {
            model_ref: model_ref.trim().to_uppercase(),
            color: normalize(color),
        }
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.model_ref, self.color)
    }
}

/// 画像エントリ（一覧から一時的に生成し、グループ化のみ行う）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageEntry {
    pub filename: String,
    pub model_ref: String,
    /// 正規化前の色
    pub color: String,
    pub is_primary: bool,
    pub url: String,
}

impl ImageEntry {
    /// ストレージ一覧の (ファイル名, URL) から生成
    pub fn from_listing(filename: &str, url: &str) -> Result<Self, ParseFailure> {
        let parsed = parse_filename(filename)?;
        Ok(Self {
            filename: filename.to_string(),
            model_ref: parsed.model_ref,
            color: parsed.color,
            is_primary: parsed.is_primary,
            url: url.to_string(),
        })
    }

    pub fn key(&self) -> GroupKey {
        GroupKey::new(&self.model_ref, &self.color)
    }
}

/// 同じ (モデル番号, 色) の画像群（代表画像が先頭）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGroup {
    pub key: GroupKey,
    pub entries: Vec<ImageEntry>,
}

impl ImageGroup {
    /// 代表画像URL（先頭エントリ）
    pub fn image_url(&self) -> Option<&str> {
        self.entries.first().map(|e| e.url.as_str())
    }

    /// 並び順どおりの全URL
    pub fn gallery(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.url.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// どの経路で画像グループが見つかったか
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// キー完全一致
    Exact,
    /// 色エイリアスで一致
    Alias,
    /// 該当なし（既定画像）
    #[default]
    Unmatched,
}

/// 照合結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    #[serde(flatten)]
    pub product: Product,

    pub image_url: String,

    #[serde(default)]
    pub gallery: Vec<String>,

    #[serde(default)]
    pub match_kind: MatchKind,

    /// 一致した画像グループの色トークン
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_color: Option<ColorToken>,
}

impl MatchResult {
    pub fn is_matched(&self) -> bool {
        self.match_kind != MatchKind::Unmatched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_key_normalizes() {
        let key = GroupKey::new(" cv866522 ", "Black Logo");
        assert_eq!(key.model_ref, "CV866522");
        assert_eq!(key.color, "BLACK");
        assert_eq!(key.to_string(), "CV866522/BLACK");
    }

    #[test]
    fn test_image_entry_from_listing() {
        let entry = ImageEntry::from_listing("PD760221-OFF-2_F.jpg", "https://cdn/x.jpg").unwrap();
        assert_eq!(entry.key(), GroupKey::new("PD760221", "OFF"));
        assert!(entry.is_primary);
        assert_eq!(entry.url, "https://cdn/x.jpg");

        assert!(ImageEntry::from_listing("BADFILE.jpg", "u").is_err());
    }

    #[test]
    fn test_product_deserialize_passthrough() {
        let json = r#"{"modelRef": "CV866522", "color": "COGNAC", "brand": "Acme", "price": 199.9, "stock": 3}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.model_ref, "CV866522");
        assert_eq!(product.color, "COGNAC");
        assert_eq!(product.fields["brand"], "Acme");
        assert_eq!(product.fields["stock"], 3);
    }

    #[test]
    fn test_product_requires_model_ref() {
        let result = serde_json::from_str::<Product>(r#"{"color": "RED"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_match_result_serialize() {
        let mut product = Product::new("CV866522", "COGNAC");
        product.fields.insert("brand".into(), "Acme".into());

        let result = MatchResult {
            product,
            image_url: "u1".into(),
            gallery: vec!["u1".into(), "u2".into()],
            match_kind: MatchKind::Alias,
            matched_color: Some(normalize("COG")),
        };

        let json = serde_json::to_string(&result).expect("シリアライズ失敗");
        assert!(json.contains("\"modelRef\":\"CV866522\""));
        assert!(json.contains("\"brand\":\"Acme\""));
        assert!(json.contains("\"imageUrl\":\"u1\""));
        assert!(json.contains("\"matchKind\":\"alias\""));
        assert!(json.contains("\"matchedColor\":\"COG\""));

        let back: MatchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
