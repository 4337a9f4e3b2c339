// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Spreadsheet import and export.
//!
//! Import reads the first sheet of a CSV, XLSX/XLS/ODS or JSON file into
//! header-keyed rows and hands them up as-is; nothing is validated against
//! a schema. Export writes such rows back out as CSV, XLSX or JSON.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use calamine::{Data, Reader, open_workbook_auto};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::Workbook;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::SheetError;
use crate::filters::{Lookups, TransactionRow};
use crate::models::{Revenue, Transaction};

/// One data row keyed by the header row, in column order.
pub type Row = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportOutcome {
    pub success: bool,
    pub data: Vec<Row>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
    Json,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("Unknown format: {} (use csv|xlsx|json)", other)),
        }
    }
}

pub fn import_from_file(path: &Path) -> Result<ImportOutcome, SheetError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    let data = match ext.as_str() {
        "csv" | "txt" => parse_csv(&fs::read(path)?)?,
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => parse_workbook(path)?,
        "json" => parse_json(&fs::read(path)?)?,
        other => return Err(SheetError::UnsupportedFormat(other.to_string())),
    };
    tracing::debug!("imported {} rows from {}", data.len(), path.display());
    Ok(ImportOutcome {
        success: true,
        data,
    })
}

/// Header row as keys, every value kept as the literal string.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<Row>, SheetError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    let headers: Vec<String> = match rdr.headers() {
        Ok(h) => h.iter().map(|s| s.trim().to_string()).collect(),
        Err(e) => return Err(SheetError::Parse(vec![e.to_string()])),
    };
    let mut errors = repeated_headers(&headers);

    let mut rows = Vec::new();
    for (n, result) in rdr.records().enumerate() {
        match result {
            // +2: one for the header, one for 1-based numbering
            Ok(rec) if rec.len() > headers.len() => errors.push(format!(
                "linha {}: {} campos, o cabeçalho tem {}",
                n + 2,
                rec.len(),
                headers.len()
            )),
            Ok(rec) => {
                let row: Row = headers
                    .iter()
                    .zip(rec.iter())
                    .map(|(h, v)| (h.clone(), Value::String(v.to_string())))
                    .collect();
                if !row.is_empty() {
                    rows.push(row);
                }
            }
            Err(e) => errors.push(format!("linha {}: {}", n + 2, e)),
        }
    }
    if errors.is_empty() {
        Ok(rows)
    } else {
        Err(SheetError::Parse(errors))
    }
}

/// A repeated header would make a later column overwrite an earlier one.
fn repeated_headers(headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .enumerate()
        .filter(|&(i, h)| headers[..i].contains(h))
        .map(|(_, h)| format!("coluna repetida no cabeçalho: '{}'", h))
        .collect()
}

fn parse_workbook(path: &Path) -> Result<Vec<Row>, SheetError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| SheetError::Parse(vec![e.to_string()]))?;
    let range = match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => range,
        Some(Err(e)) => return Err(SheetError::Parse(vec![e.to_string()])),
        None => return Err(SheetError::Parse(vec!["planilha sem abas".to_string()])),
    };

    let mut sheet_rows = range.rows();
    let headers: Vec<String> = match sheet_rows.next() {
        Some(cells) => cells.iter().map(|c| c.to_string().trim().to_string()).collect(),
        None => return Ok(Vec::new()),
    };
    let repeated = repeated_headers(&headers);
    if !repeated.is_empty() {
        return Err(SheetError::Parse(repeated));
    }

    let mut rows = Vec::new();
    for cells in sheet_rows {
        let row: Row = headers
            .iter()
            .zip(cells.iter())
            .filter(|(_, cell)| !matches!(cell, Data::Empty))
            .map(|(h, cell)| (h.clone(), cell_value(cell)))
            .collect();
        // blank lines are skipped
        if !row.is_empty() {
            rows.push(row);
        }
    }
    Ok(rows)
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Data::Bool(b) => Value::Bool(*b),
        Data::String(s) => Value::String(s.clone()),
        Data::Empty => Value::Null,
        other => Value::String(other.to_string()),
    }
}

fn parse_json(bytes: &[u8]) -> Result<Vec<Row>, SheetError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| SheetError::Parse(vec![e.to_string()]))?;
    let Value::Array(items) = value else {
        return Err(SheetError::Parse(vec![
            "esperado um array de objetos".to_string(),
        ]));
    };
    let mut rows = Vec::new();
    let mut errors = Vec::new();
    for (n, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(map) => rows.push(map),
            other => errors.push(format!("item {}: não é um objeto ({})", n + 1, other)),
        }
    }
    if errors.is_empty() {
        Ok(rows)
    } else {
        Err(SheetError::Parse(errors))
    }
}

/// Union of keys across rows, in first-seen order.
pub fn columns(rows: &[Row]) -> Vec<String> {
    let mut cols: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !cols.contains(key) {
                cols.push(key.clone());
            }
        }
    }
    cols
}

pub fn cell_text(v: Option<&Value>) -> String {
    match v {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Quoting of delimiters, quotes and newlines is left to the csv writer,
/// which applies it per field.
pub fn export_to_csv(rows: &[Row], path: &Path) -> Result<(), SheetError> {
    let cols = columns(rows);
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(&cols)?;
    for row in rows {
        wtr.write_record(cols.iter().map(|c| cell_text(row.get(c))))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_to_excel(rows: &[Row], path: &Path, sheet_name: &str) -> Result<(), SheetError> {
    let cols = columns(rows);
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;
    for (c, name) in cols.iter().enumerate() {
        sheet.write_string(0, col_index(c)?, name)?;
    }
    for (r, row) in rows.iter().enumerate() {
        let r = u32::try_from(r + 1).map_err(|_| SheetError::Write("too many rows".into()))?;
        for (c, name) in cols.iter().enumerate() {
            let c = col_index(c)?;
            match row.get(name) {
                None | Some(Value::Null) => {}
                Some(Value::Number(n)) => match n.as_f64() {
                    Some(f) => {
                        sheet.write_number(r, c, f)?;
                    }
                    None => {
                        sheet.write_string(r, c, n.to_string())?;
                    }
                },
                Some(Value::Bool(b)) => {
                    sheet.write_boolean(r, c, *b)?;
                }
                Some(other) => {
                    sheet.write_string(r, c, cell_text(Some(other)))?;
                }
            }
        }
    }
    workbook.save(path)?;
    Ok(())
}

fn col_index(c: usize) -> Result<u16, SheetError> {
    u16::try_from(c).map_err(|_| SheetError::Write("too many columns".into()))
}

pub fn export_to_json(rows: &[Row], path: &Path) -> Result<(), SheetError> {
    let text = serde_json::to_string_pretty(rows).map_err(|e| SheetError::Write(e.to_string()))?;
    fs::write(path, text)?;
    Ok(())
}

pub fn export(rows: &[Row], path: &Path, format: ExportFormat, sheet_name: &str) -> Result<(), SheetError> {
    match format {
        ExportFormat::Csv => export_to_csv(rows, path),
        ExportFormat::Xlsx => export_to_excel(rows, path, sheet_name),
        ExportFormat::Json => export_to_json(rows, path),
    }
}

fn money(d: Option<Decimal>) -> Value {
    d.and_then(|d| d.round_dp(2).to_f64())
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

pub fn transactions_to_rows(transactions: &[Transaction], lookups: &Lookups) -> Vec<Row> {
    transactions
        .iter()
        .map(|tx| {
            let view = TransactionRow::new(tx, lookups);
            let mut row = Row::new();
            row.insert("Data".into(), Value::String(view.date));
            row.insert("Descrição".into(), Value::String(view.description));
            row.insert("Contato".into(), Value::String(view.contact));
            row.insert("Categoria".into(), Value::String(view.category));
            row.insert("Centro de Custo".into(), Value::String(view.cost_center));
            row.insert("Valor".into(), money(tx.amount));
            row.insert("Tipo".into(), Value::String(view.kind));
            row.insert("Status".into(), Value::String(view.status));
            row
        })
        .collect()
}

pub fn revenues_to_rows(revenues: &[Revenue], lookups: &Lookups) -> Vec<Row> {
    revenues
        .iter()
        .map(|r| {
            let mut row = Row::new();
            row.insert("Data".into(), Value::String(r.date.to_string()));
            row.insert("Código Cliente".into(), Value::String(r.client_code.clone()));
            row.insert(
                "Contato".into(),
                Value::String(lookups.contact_name(r.contact_id).unwrap_or_default().to_string()),
            );
            row.insert("Serviço".into(), Value::String(r.service.clone()));
            row.insert(
                "Categoria".into(),
                Value::String(lookups.category_name(r.category_id).unwrap_or_default().to_string()),
            );
            row.insert("Valor".into(), money(Some(r.amount)));
            row.insert("Tipo".into(), Value::String(r.revenue_type.clone()));
            row.insert("Modelo de Cobrança".into(), Value::String(r.billing_model.clone()));
            row.insert("Status".into(), Value::String(r.status.clone()));
            row.insert("Entregas Principais".into(), Value::String(r.deliverables.clone()));
            row
        })
        .collect()
}
