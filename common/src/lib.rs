//! Catalog Image Common Library
//!
//! 商品（スプレッドシート）と画像（ストレージ一覧）の照合ロジック。
//! I/Oを持たない純粋な変換で、同じ入力には常に同じ結果を返す。

pub mod types;
pub mod color;
pub mod alias;
pub mod error;
pub mod filename;
pub mod grouper;
pub mod matcher;
pub mod report;
pub mod export;

pub use types::{
    GroupKey, ImageEntry, ImageGroup, MatchKind, MatchResult, Product, DEFAULT_IMAGE_URL,
    RESERVED_OUTPUT_KEYS,
};
pub use color::{normalize, ColorToken};
pub use alias::{equivalent, ColorAliasTable, ALIAS_TABLE_VERSION};
pub use error::{Error, Result};
pub use filename::{parse_filename, ParseFailure, ParsedFilename};
pub use grouper::{group_images, ImageGroups};
pub use matcher::{find_group, match_products, MatchOptions};
pub use report::{MatchReport, SkippedFile};
