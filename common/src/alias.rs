//! 色エイリアス（同値表）モジュール
//!
//! 略号・綴り違い・翻訳（例: `OFF` / `OFF WHITE` / `CREAM` / `אוף וויט`）を
//! 同じ色として扱うための静的テーブル。
//!
//! テーブルは推移的に閉じていない。`A` の別名に `B` があり `B` の別名に `C` があっても
//! `A` と `C` は同値にならない。どの商品にどの画像が付くかはこの判定に依存するため、
//! 閉包を取らずに登録されたエントリだけで判定する。

use crate::color::{normalize, ColorToken};
use crate::error::Result;
use std::collections::BTreeMap;

/// 組み込みテーブルのバージョン（エントリを変更したら上げる）
pub const ALIAS_TABLE_VERSION: u32 = 1;

/// 組み込みエイリアス: 正規キー → 別名（比較時に正規化される生の文字列）
const BUILTIN_COLOR_ALIASES: &[(&str, &[&str])] = &[
    ("OFF", &["OFF WHITE", "OFF-WHITE", "OFFWHITE", "CREAM", "ECRU", "IVORY", "אוף וויט"]),
    ("OFFWHITE", &["OFF", "CREAM"]),
    ("BLA", &["BLACK", "BLK", "NOIR", "NERO", "שחור"]),
    ("BLACK", &["BLA", "BLK"]),
    ("WHI", &["WHITE", "WHT", "BLANC", "BIANCO", "לבן"]),
    ("WHITE", &["WHI", "WHT"]),
    ("COG", &["COGNAC", "CAMEL", "קוניאק"]),
    ("BRO", &["BROWN", "BRN", "MARRON", "CHOCOLATE", "חום"]),
    ("NAV", &["NAVY", "NAVY BLUE", "MARINE", "DARK BLUE"]),
    ("BLU", &["BLUE", "BLEU", "כחול"]),
    ("GRE", &["GREY", "GRAY", "GRIGIO", "אפור"]),
    ("GRN", &["GREEN", "OLIVE", "KHAKI", "ירוק"]),
    ("BEI", &["BEIGE", "SAND", "TAUPE", "NUDE"]),
    ("RED", &["ROUGE", "ROSSO", "BORDEAUX", "אדום"]),
    ("PIN", &["PINK", "ROSE", "ורוד"]),
    ("SIL", &["SILVER", "כסף"]),
    ("GOL", &["GOLD", "זהב"]),
];

lazy_static::lazy_static! {
    static ref BUILTIN: ColorAliasTable = ColorAliasTable::builtin();
}

/// 色の同値表
///
/// キー・別名とも正規化済みトークンで保持する。
/// 正規化すると空になる別名（非ASCIIのみの表記など）は一致判定に使われない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorAliasTable {
    entries: BTreeMap<ColorToken, Vec<ColorToken>>,
}

impl ColorAliasTable {
    /// 組み込みテーブル
    pub fn builtin() -> Self {
        Self::from_entries(
            BUILTIN_COLOR_ALIASES
                .iter()
                .map(|(key, aliases)| (*key, aliases.iter().copied())),
        )
    }

    /// (キー, 別名一覧) の列から構築
    pub fn from_entries<K, I, A>(entries: I) -> Self
    where
        K: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
        I: IntoIterator<Item = (K, A)>,
    {
        let mut table = Self::default();
        for (key, aliases) in entries {
            table.extend_entry(key.as_ref(), aliases);
        }
        table
    }

    /// JSON文字列から読み込み（`{"OFF": ["BONE", "CHALK"]}` 形式）
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        Ok(Self::from_entries(raw))
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// 別のテーブルをマージ（同じキーは別名を追加）
    pub fn merge(&mut self, other: &ColorAliasTable) {
        for (key, aliases) in &other.entries {
            let slot = self.entries.entry(key.clone()).or_default();
            for alias in aliases {
                if !slot.contains(alias) {
                    slot.push(alias.clone());
                }
            }
        }
    }

    fn extend_entry<A>(&mut self, key: &str, aliases: A)
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        let key = normalize(key);
        if key.is_empty() {
            return;
        }

        let slot = self.entries.entry(key).or_default();
        for alias in aliases {
            let alias = normalize(alias.as_ref());
            if !alias.is_empty() && !slot.contains(&alias) {
                slot.push(alias);
            }
        }
    }

    /// キーに登録された別名（未登録なら空）
    pub fn aliases_of(&self, token: &ColorToken) -> &[ColorToken] {
        self.entries.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 2つのトークンが同じ色か判定
    ///
    /// 1. トークンが一致
    /// 2. `a` の別名に `b` がある
    /// 3. `b` の別名に `a` がある
    pub fn equivalent(&self, a: &ColorToken, b: &ColorToken) -> bool {
        if a == b {
            return true;
        }
        self.aliases_of(a).contains(b) || self.aliases_of(b).contains(a)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 組み込みテーブルで同値判定
pub fn equivalent(a: &ColorToken, b: &ColorToken) -> bool {
    BUILTIN.equivalent(a, b)
}
