//! レポート出力（CLIとテストで共有）

#[cfg(feature = "excel")]
pub mod report_xlsx;
