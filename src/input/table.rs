use std::io::Read;

use crate::input::{InputError, ItemSchema};
use crate::model::item::{Item, ItemId};

pub fn parse_records<R: Read>(
    reader: &mut csv::Reader<R>,
    schema: &ItemSchema,
) -> Result<Vec<Item>, InputError> {
    let headers = reader.headers()?.clone();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(InputError::Parse("table header is empty".to_string()));
    }

    let id_idx = match schema.id_column.as_deref() {
        Some(name) => {
            let idx = find_column(&headers, name);
            if idx.is_none() {
                tracing::warn!(
                    column = name,
                    "id column not found; using 1-based row index as item id"
                );
            }
            idx
        }
        None => None,
    };
    let label_idx = schema
        .label_column
        .as_deref()
        .and_then(|name| find_column(&headers, name));

    let mut items = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record = record?;
        let line_no = row_idx + 2;

        let id = match id_idx {
            Some(idx) => parse_id(record.get(idx).unwrap_or(""), line_no)?,
            None => (row_idx + 1) as ItemId,
        };

        let mut item = Item::new(id);
        if let Some(label) = label_idx.and_then(|idx| record.get(idx)) {
            if !label.is_empty() {
                item = item.with_label(label);
            }
        }

        for (col, name) in headers.iter().enumerate() {
            if Some(col) == label_idx || name.is_empty() {
                continue;
            }
            let Some(raw) = record.get(col) else {
                continue;
            };
            if let Ok(value) = raw.parse::<f64>() {
                if value.is_finite() {
                    item.scores.insert(name.to_string(), value);
                }
            }
        }
        items.push(item);
    }
    Ok(items)
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .or_else(|| headers.iter().position(|h| h.eq_ignore_ascii_case(name)))
}

fn parse_id(raw: &str, line_no: usize) -> Result<ItemId, InputError> {
    if let Ok(id) = raw.parse::<ItemId>() {
        return Ok(id);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 => Ok(v as ItemId),
        _ => Err(InputError::Parse(format!(
            "invalid item id '{raw}' (line {line_no})"
        ))),
    }
}
