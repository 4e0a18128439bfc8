//! Transactional ledger loader.
//!
//! Parses the flat order-line CSV into `LedgerRecord` structs. Expected
//! logical columns (header names are matched case- and whitespace-
//! insensitively, since exports vary in casing and leading spaces):
//!   idtransaksi, JenisTransaksi, Kodeitem, Deskripsi, Qty, Harga,
//!   Nilai, LokasiAlamatToko
//!
//! `Nilai` and `JenisTransaksi` are optional; a missing `Nilai` is computed
//! as `Harga x Qty`, a missing `JenisTransaksi` means no return marking.
//! Numeric fields use the Indonesian locale ("31.700,00" means 31700.0).

use std::collections::HashMap;
use std::io::Read;

use crate::error::{PipelineError, PipelineResult};

/// One parsed input row. Immutable once built; discarded after aggregation.
#[derive(Clone, Debug)]
pub struct LedgerRecord {
    pub transaction_id: String,
    pub item_code: String,
    pub description: String,
    pub location: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub line_value: f64,
    /// True for return/credit-note rows (`JenisTransaksi` other than
    /// "Pembelian").
    pub is_retur: bool,
}

/// Row accounting for the run report. Skipped rows are counted, never
/// silently dropped.
#[derive(Clone, Debug, Default)]
pub struct LoadSummary {
    /// Data rows read from the file, including skipped ones.
    pub rows_read: usize,
    /// Rows dropped for missing a transaction id or item code.
    pub rows_skipped: usize,
}

/// Parse an Indonesian-locale number: "." groups thousands, "," marks the
/// decimal. Empty or unparseable input yields `None`.
pub fn parse_indonesian_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cleaned: String = trimmed.replace('.', "").replace(',', ".");
    cleaned.parse::<f64>().ok()
}

struct HeaderIndex {
    transaction_id: usize,
    item_code: usize,
    location: usize,
    quantity: usize,
    unit_price: usize,
    description: Option<usize>,
    line_value: Option<usize>,
    transaction_kind: Option<usize>,
}

impl HeaderIndex {
    fn from_headers(headers: &csv::StringRecord) -> PipelineResult<Self> {
        let normalized: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_lowercase(), i))
            .collect();

        let required = |name: &'static str| -> PipelineResult<usize> {
            normalized
                .get(name)
                .copied()
                .ok_or(PipelineError::MissingColumn(name))
        };

        Ok(Self {
            transaction_id: required("idtransaksi")?,
            item_code: required("kodeitem")?,
            location: required("lokasialamattoko")?,
            quantity: required("qty")?,
            unit_price: required("harga")?,
            description: normalized.get("deskripsi").copied(),
            line_value: normalized.get("nilai").copied(),
            transaction_kind: normalized.get("jenistransaksi").copied(),
        })
    }
}

fn field<'a>(record: &'a csv::StringRecord, idx: usize) -> &'a str {
    record.get(idx).unwrap_or("").trim()
}

/// Load ledger records from any CSV reader.
///
/// A missing required column is fatal. A row missing its transaction id or
/// item code is skipped, logged, and counted in the summary; unparseable
/// quantity or price falls back to 0.0 so one malformed cell never discards
/// an otherwise valid row.
pub fn load_ledger<R: Read>(reader: R) -> PipelineResult<(Vec<LedgerRecord>, LoadSummary)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let index = HeaderIndex::from_headers(csv_reader.headers()?)?;

    let mut records = Vec::new();
    let mut summary = LoadSummary::default();

    for (row_num, result) in csv_reader.records().enumerate() {
        // Line number in the file: header is line 1.
        let line = row_num + 2;
        let record = result?;
        summary.rows_read += 1;

        let transaction_id = field(&record, index.transaction_id);
        let item_code = field(&record, index.item_code);
        if transaction_id.is_empty() || item_code.is_empty() {
            log::warn!(
                "skipping line {}: missing {}",
                line,
                if transaction_id.is_empty() {
                    "transaction id"
                } else {
                    "item code"
                }
            );
            summary.rows_skipped += 1;
            continue;
        }

        let quantity = parse_indonesian_number(field(&record, index.quantity)).unwrap_or(0.0);
        let unit_price = parse_indonesian_number(field(&record, index.unit_price)).unwrap_or(0.0);
        let line_value = index
            .line_value
            .and_then(|i| parse_indonesian_number(field(&record, i)))
            .unwrap_or(unit_price * quantity);
        let is_retur = index
            .transaction_kind
            .map(|i| !field(&record, i).eq_ignore_ascii_case("pembelian"))
            .unwrap_or(false);

        records.push(LedgerRecord {
            transaction_id: transaction_id.to_string(),
            item_code: item_code.to_string(),
            description: index
                .description
                .map(|i| field(&record, i).to_string())
                .unwrap_or_default(),
            location: field(&record, index.location).to_string(),
            quantity,
            unit_price,
            line_value,
            is_retur,
        });
    }

    Ok((records, summary))
}

/// Load ledger records from a CSV file path.
pub fn load_ledger_file(path: &str) -> PipelineResult<(Vec<LedgerRecord>, LoadSummary)> {
    let file = std::fs::File::open(path).map_err(|source| PipelineError::Open {
        path: path.to_string(),
        source,
    })?;
    load_ledger(file)
}
