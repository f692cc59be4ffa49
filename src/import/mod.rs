//! Word-list import for the vocabulary store

pub mod word_list;

pub use word_list::{
    import_file, import_rows, load_rows, parse_rows, CsvRow, ImportError, ImportMode, ImportSummary,
};
