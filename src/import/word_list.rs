//! CSV word-list import
//!
//! Expected columns, in order: translation, phonetic, native, and an
//! optional category. A first row naming the translation and native
//! columns is treated as a header and dropped.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vocabulary::{VocabularyItem, VocabularyStore, VocabularyStoreError, DEFAULT_CATEGORY};

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Store error: {0}")]
    Store(#[from] VocabularyStoreError),
}

pub type Result<T> = std::result::Result<T, ImportError>;

/// One parsed line of a word list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvRow {
    pub translation: String,
    pub phonetic: String,
    pub native: String,
    pub category: String,
}

impl CsvRow {
    pub fn into_item(self) -> VocabularyItem {
        VocabularyItem::new(self.native, self.phonetic, self.translation).with_category(self.category)
    }
}

/// How rows that already exist in the store are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportMode {
    /// Skip rows whose native text is already present
    #[default]
    SkipExisting,
    ImportAll,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
    /// Items in the store after the import
    pub total: usize,
}

fn is_header(fields: &[&str]) -> bool {
    let line = fields.join(",").to_lowercase();
    let names_translation = line.contains("translation") || line.contains("polish");
    let names_native = line.contains("native") || line.contains("hanzi");
    names_translation && names_native
}

/// Parse word-list rows from CSV text
pub fn parse_rows(content: &str) -> Result<Vec<CsvRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let fields: Vec<&str> = record.iter().collect();

        if idx == 0 && is_header(&fields) {
            continue;
        }

        if fields.len() < 3 {
            log::warn!("Skipping CSV line {} with {} columns", idx + 1, fields.len());
            continue;
        }

        let category = fields
            .get(3)
            .filter(|c| !c.is_empty())
            .map(|c| c.to_string())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        rows.push(CsvRow {
            translation: fields[0].to_string(),
            phonetic: fields[1].to_string(),
            native: fields[2].to_string(),
            category,
        });
    }

    Ok(rows)
}

/// Read and parse a word-list file. Invalid UTF-8 sequences become U+FFFD
/// so one bad row does not fail the whole file.
pub fn load_rows(path: &Path) -> Result<Vec<CsvRow>> {
    let bytes = fs::read(path)?;
    parse_rows(&String::from_utf8_lossy(&bytes))
}

/// Insert rows into `store` as new vocabulary items
pub fn import_rows<S>(store: &mut S, rows: Vec<CsvRow>, mode: ImportMode) -> Result<ImportSummary>
where
    S: VocabularyStore + ?Sized,
{
    let mut known: HashSet<String> = store.list_items().into_iter().map(|i| i.native_text).collect();
    let mut summary = ImportSummary::default();

    for row in rows {
        if mode == ImportMode::SkipExisting && known.contains(&row.native) {
            summary.skipped += 1;
            continue;
        }

        known.insert(row.native.clone());
        store.insert_item(row.into_item())?;
        summary.imported += 1;
    }

    summary.total = store.list_items().len();
    log::info!(
        "Imported {} words, skipped {}, {} in store",
        summary.imported,
        summary.skipped,
        summary.total
    );

    Ok(summary)
}

/// Load a word-list file straight into `store`
pub fn import_file<S>(store: &mut S, path: &Path, mode: ImportMode) -> Result<ImportSummary>
where
    S: VocabularyStore + ?Sized,
{
    let rows = load_rows(path)?;
    import_rows(store, rows, mode)
}
