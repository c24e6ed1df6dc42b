use crate::pipeline::ImageSource;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "catalog-sync")]
#[command(about = "商品スプレッドシートと画像ストレージの照合ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// 画像の取得元（フォルダかインデックスCSVのどちらか）
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct ImageSourceArgs {
    /// 画像フォルダ（ストレージ一覧の書き出し）
    #[arg(short, long)]
    pub images: Option<PathBuf>,

    /// 画像インデックスCSV（model_ref, color, filename, url）
    #[arg(long)]
    pub index: Option<PathBuf>,
}

impl ImageSourceArgs {
    /// base_url はフォルダ指定時のみ使う
    pub fn into_source(self, base_url: Option<String>) -> Option<ImageSource> {
        match (self.images, self.index) {
            (Some(path), _) => Some(ImageSource::Folder { path, base_url }),
            (None, Some(path)) => Some(ImageSource::Index(path)),
            (None, None) => None,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// 商品と画像を照合して結果JSONを出力
    Match {
        /// 商品ファイル（xlsx/csv/json）
        #[arg(short, long, required = true)]
        products: PathBuf,

        #[command(flatten)]
        source: ImageSourceArgs,

        /// 画像URLの接頭辞（フォルダ指定時）
        #[arg(long)]
        base_url: Option<String>,

        /// 追加の色エイリアスJSON
        #[arg(long)]
        aliases: Option<PathBuf>,

        /// 該当なしのときの画像URL
        #[arg(long)]
        default_image: Option<String>,

        /// 出力JSONファイル（デフォルト: match-result.json）
        #[arg(short, long, default_value = "match-result.json")]
        output: PathBuf,

        /// 集計レポートの出力先（.json / .xlsx）
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// 画像グループを表示（診断用）
    Groups {
        #[command(flatten)]
        source: ImageSourceArgs,

        /// 画像URLの接頭辞（フォルダ指定時）
        #[arg(long)]
        base_url: Option<String>,

        /// モデル番号で絞り込み
        #[arg(short, long)]
        model: Option<String>,
    },

    /// 色名の正規化・同値判定（診断用）
    Color {
        /// 色名
        #[arg(required = true)]
        color: String,

        /// 比較する色名
        #[arg(short, long)]
        against: Option<String>,

        /// 追加の色エイリアスJSON
        #[arg(long)]
        aliases: Option<PathBuf>,
    },

    /// 照合結果JSONから画像なし商品の一覧を出力
    Report {
        /// 照合結果JSON
        #[arg(required = true)]
        input: PathBuf,

        /// 出力先（.json / .xlsx、省略時は表示のみ）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 画像URLの接頭辞を設定
        #[arg(long)]
        set_base_url: Option<String>,

        /// 既定画像を設定
        #[arg(long)]
        set_default_image: Option<String>,

        /// 色エイリアスJSONを設定
        #[arg(long)]
        set_alias_file: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
