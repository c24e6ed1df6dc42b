//! 画像グループ化モジュール
//!
//! 解析済みの画像エントリを (モデル番号, 色トークン) ごとにまとめ、
//! 代表画像（`_F` / `-F`）を先頭に並べる。
//!
//! 並び替えは安定ソートなので、代表画像以外は入力（一覧）の順序を保つ。
//! 結果は `BTreeMap` で保持し、同じ入力からは常に同じ出力になる。

use crate::color::ColorToken;
use crate::types::{GroupKey, ImageEntry, ImageGroup};
use std::collections::btree_map::{self, BTreeMap};
use std::collections::HashSet;

/// キー順に並んだ画像グループの集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageGroups {
    groups: BTreeMap<GroupKey, ImageGroup>,
}

impl ImageGroups {
    pub fn get(&self, key: &GroupKey) -> Option<&ImageGroup> {
        self.groups.get(key)
    }

    /// 同じモデル番号のグループを色トークンの辞書順で返す
    pub fn for_model<'a>(
        &'a self,
        model_ref: &str,
    ) -> impl Iterator<Item = (&'a ColorToken, &'a ImageGroup)> + 'a {
        let model_ref = model_ref.to_string();
        let start = GroupKey {
            model_ref: model_ref.clone(),
            color: ColorToken::default(),
        };
        self.groups
            .range(start..)
            .take_while(move |(key, _)| key.model_ref == model_ref)
            .map(|(key, group)| (&key.color, group))
    }

    pub fn iter(&self) -> btree_map::Iter<'_, GroupKey, ImageGroup> {
        self.groups.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.groups.keys()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// 全グループの画像数
    pub fn image_count(&self) -> usize {
        self.groups.values().map(ImageGroup::len).sum()
    }
}

impl<'a> IntoIterator for &'a ImageGroups {
    type Item = (&'a GroupKey, &'a ImageGroup);
    type IntoIter = btree_map::Iter<'a, GroupKey, ImageGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// 画像エントリをグループ化する
///
/// 同じグループ内で同じURLが重複した場合は最初のものだけを残す。
pub fn group_images<I>(entries: I) -> ImageGroups
where
    I: IntoIterator<Item = ImageEntry>,
{
    let mut groups: BTreeMap<GroupKey, ImageGroup> = BTreeMap::new();
    let mut seen: HashSet<(GroupKey, String)> = HashSet::new();

    for entry in entries {
        let key = entry.key();
        if !seen.insert((key.clone(), entry.url.clone())) {
            continue;
        }

        groups
            .entry(key.clone())
            .or_insert_with(|| ImageGroup {
                key,
                entries: Vec::new(),
            })
            .entries
            .push(entry);
    }

    for group in groups.values_mut() {
        // 安定ソート: 代表画像を先頭に、それ以外は入力順
        group.entries.sort_by_key(|e| !e.is_primary);
    }

    ImageGroups { groups }
}
