//! 照合レポートのExcel出力
//!
//! シート構成:
//! - 集計: 件数とカバー率
//! - 画像なし: 画像が見つからなかった商品
//! - エイリアス一致: 色エイリアスで一致した商品（目視確認用）
//! - スキップ: 解析できなかったファイル名

use crate::report::MatchReport;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

const KEY_COL_WIDTH: f64 = 18.0;
const VALUE_COL_WIDTH: f64 = 40.0;

/// ヘッダー行を書き込む
fn write_header(sheet: &mut Worksheet, headers: &[&str], bold: &Format) -> Result<(), XlsxError> {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, bold)?;
        let width = if col == 0 { KEY_COL_WIDTH } else { VALUE_COL_WIDTH };
        sheet.set_column_width(col as u16, width)?;
    }
    Ok(())
}

fn build_workbook(report: &MatchReport) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    // 集計
    let summary = workbook.add_worksheet();
    summary.set_name("Summary")?;
    write_header(summary, &["Item", "Value"], &bold)?;
    let rows: [(&str, f64); 6] = [
        ("Products", report.total_products as f64),
        ("Exact match", report.exact_matches as f64),
        ("Alias match", report.alias_matches as f64),
        ("No image", report.unmatched as f64),
        ("Skipped files", report.skipped_files.len() as f64),
        ("Coverage (%)", (report.coverage() * 1000.0).round() / 10.0),
    ];
    for (i, (label, value)) in rows.iter().enumerate() {
        let row = i as u32 + 1;
        summary.write_string(row, 0, *label)?;
        summary.write_number(row, 1, *value)?;
    }

    // 画像なし
    let unmatched = workbook.add_worksheet();
    unmatched.set_name("No image")?;
    write_header(unmatched, &["Model ref", "Color"], &bold)?;
    for (i, p) in report.unmatched_products.iter().enumerate() {
        let row = i as u32 + 1;
        unmatched.write_string(row, 0, &p.model_ref)?;
        unmatched.write_string(row, 1, &p.color)?;
    }

    // エイリアス一致
    let aliases = workbook.add_worksheet();
    aliases.set_name("Alias match")?;
    write_header(aliases, &["Model ref", "Color", "Image color"], &bold)?;
    for (i, a) in report.alias_details.iter().enumerate() {
        let row = i as u32 + 1;
        aliases.write_string(row, 0, &a.model_ref)?;
        aliases.write_string(row, 1, &a.color)?;
        aliases.write_string(row, 2, &a.matched_color)?;
    }

    // スキップ
    let skipped = workbook.add_worksheet();
    skipped.set_name("Skipped")?;
    write_header(skipped, &["Filename", "Reason"], &bold)?;
    for (i, s) in report.skipped_files.iter().enumerate() {
        let row = i as u32 + 1;
        skipped.write_string(row, 0, &s.filename)?;
        skipped.write_string(row, 1, &s.reason)?;
    }

    Ok(workbook)
}

/// レポートをxlsxのバイト列として生成
pub fn generate_report_xlsx_buffer(report: &MatchReport) -> Result<Vec<u8>, String> {
    let mut workbook = build_workbook(report).map_err(|e| e.to_string())?;
    workbook.save_to_buffer().map_err(|e| e.to_string())
}
