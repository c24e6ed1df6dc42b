//! 商品一覧の読み込み
//!
//! スプレッドシートの書き出しを想定する。
//!
//! - `.xlsx` / `.xls` / `.ods`: 先頭シート、1行目がヘッダー
//! - `.csv`: 1行目がヘッダー
//! - `.json`: `modelRef` / `color` を持つオブジェクトの配列
//!
//! モデル番号列（`model_ref` / `modelRef` / `model`）と色列（`color` / `colour`）は
//! 大文字小文字を区別せずに探す。それ以外の列はそのまま素通しする。

use crate::error::{Result, SyncError};
use calamine::{open_workbook_auto, Data, Reader};
use catalog_image_common::Product;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, warn};

const MODEL_REF_HEADERS: &[&str] = &["model_ref", "modelref", "model ref", "model"];
const COLOR_HEADERS: &[&str] = &["color", "colour"];

/// 拡張子に応じて商品一覧を読み込む
pub fn load_products(path: &Path) -> Result<Vec<Product>> {
    if !path.exists() {
        return Err(SyncError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let products = match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "ods" => load_spreadsheet(path)?,
        "csv" => load_csv(std::fs::File::open(path)?)?,
        "json" => load_json(&std::fs::read_to_string(path)?)?,
        _ => {
            return Err(SyncError::InvalidProducts(format!(
                "未対応の形式です: {} (xlsx/csv/json)",
                path.display()
            )))
        }
    };

    debug!(count = products.len(), path = %path.display(), "loaded products");
    Ok(products)
}

/// ヘッダー行からモデル番号列・色列の位置を探す
fn key_columns(headers: &[String]) -> Result<(usize, Option<usize>)> {
    let find = |candidates: &[&str]| {
        headers
            .iter()
            .position(|h| candidates.contains(&h.trim().to_lowercase().as_str()))
    };

    let model_col = find(MODEL_REF_HEADERS).ok_or_else(|| {
        SyncError::InvalidProducts(format!("モデル番号列がありません: {:?}", headers))
    })?;
    let color_col = find(COLOR_HEADERS);
    if color_col.is_none() {
        warn!("no color column found; all products will use an empty color");
    }

    Ok((model_col, color_col))
}

/// 1行分のセルから商品を組み立てる（空行は None）
fn product_from_row(headers: &[String], cells: Vec<Value>, model_col: usize, color_col: Option<usize>) -> Option<Product> {
    let is_blank = |v: &Value| match v {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    };
    if cells.iter().all(is_blank) {
        return None;
    }

    let mut product = Product::default();
    let mut fields = Map::new();

    for (i, cell) in cells.into_iter().enumerate() {
        if i == model_col {
            product.model_ref = value_to_string(&cell);
        } else if Some(i) == color_col {
            product.color = value_to_string(&cell);
        } else if let Some(header) = headers.get(i).filter(|h| !h.trim().is_empty()) {
            fields.insert(header.trim().to_string(), cell);
        }
    }

    product.fields = fields;
    strip_reserved(&mut product);
    Some(product)
}

/// 出力キーと同名の列は素通しせずに捨てる
fn strip_reserved(product: &mut Product) {
    for column in product.strip_reserved_fields() {
        warn!(model_ref = %product.model_ref, %column, "dropping column that collides with an output key");
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

/// calamine のセルを JSON 値に変換
fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Bool(b) => Value::Bool(*b),
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => {
            // 整数値の数値セル（例: 在庫数・品番）は整数として扱う
            if f.fract() == 0.0 && f.abs() < 1e15 {
                Value::from(*f as i64)
            } else {
                Value::from(*f)
            }
        }
        other => Value::String(other.to_string()),
    }
}

fn load_spreadsheet(path: &Path) -> Result<Vec<Product>> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| SyncError::Spreadsheet(format!("{}: {}", path.display(), e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SyncError::Spreadsheet("シートがありません".into()))?
        .map_err(|e| SyncError::Spreadsheet(e.to_string()))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(|c| c.to_string()).collect(),
        None => return Ok(Vec::new()),
    };
    let (model_col, color_col) = key_columns(&headers)?;

    Ok(rows
        .filter_map(|row| {
            let cells = row.iter().map(cell_to_value).collect();
            product_from_row(&headers, cells, model_col, color_col)
        })
        .collect())
}

pub fn load_csv<R: std::io::Read>(reader: R) -> Result<Vec<Product>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let (model_col, color_col) = key_columns(&headers)?;

    let mut products = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let cells = record
            .iter()
            .map(|s| if s.is_empty() { Value::Null } else { Value::String(s.to_string()) })
            .collect();
        if let Some(product) = product_from_row(&headers, cells, model_col, color_col) {
            products.push(product);
        }
    }

    Ok(products)
}

pub fn load_json(json: &str) -> Result<Vec<Product>> {
    let mut products: Vec<Product> = serde_json::from_str(json)
        .map_err(|e| SyncError::InvalidProducts(format!("JSONパースエラー: {}", e)))?;
    products.iter_mut().for_each(strip_reserved);
    Ok(products)
}
