use crate::error::{Result, SyncError};
use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

/// tracing のグローバルサブスクライバを初期化する
///
/// `RUST_LOG` が設定されていればそれを優先し、なければ `verbose` に応じて
/// `debug` / `info` を使う。出力は stderr（stdout は進捗表示用）。
pub fn init(verbose: bool) -> Result<()> {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| SyncError::Config(format!("ログ初期化に失敗: {}", e)))
}
