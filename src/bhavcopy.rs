//! NSE bhavcopy parsing and top-mover rankings.
//!
//! A bhavcopy is the exchange's end-of-day equities file: one CSV row per
//! listed security, shipped inside a ZIP archive. Only four columns matter
//! here:
//!
//! | column | field |
//! |---|---|
//! | 0 | `SYMBOL` |
//! | 5 | `CLOSE` |
//! | 7 | `PREVCLOSE` |
//! | 9 | `TOTTRDVAL` (traded value, INR) |
//!
//! The header row is skipped. Percent change is `close / prev_close - 1`.

use itertools::Itertools;
use serde::Serialize;
use std::io::{Cursor, Read};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use zip::ZipArchive;

const SYMBOL: usize = 0;
const CLOSE: usize = 5;
const PREV_CLOSE: usize = 7;
const TRADED_VALUE: usize = 9;

#[derive(Debug, thiserror::Error)]
pub enum BhavcopyError {
    #[error("invalid archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: {message}")]
    Row { line: u64, message: String },
    #[error("archive contains no CSV file")]
    NoCsv,
}

/// One security's closing figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockRecord {
    pub symbol: String,
    pub close: f64,
    pub prev_close: f64,
    /// Fractional change, `0.05` for +5%.
    pub pct_change: f64,
    pub traded_value: f64,
}

/// A file unpacked from a bhavcopy archive.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveEntry {
    /// Relative path inside the archive, already checked not to escape it.
    pub path: PathBuf,
    pub data: Vec<u8>,
}

impl ArchiveEntry {
    pub fn is_csv(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
    }
}

/// Unpack every file of a ZIP archive held in memory.
///
/// Directories are skipped, and so are entries whose names would land
/// outside the extraction directory.
pub fn extract_archive(bytes: &[u8]) -> Result<Vec<ArchiveEntry>, BhavcopyError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut entries = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() {
            continue;
        }
        let Some(path) = file.enclosed_name() else {
            warn!(name = file.name(), "Skipping archive entry with unsafe path");
            continue;
        };
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        debug!(path = %path.display(), bytes = data.len(), "Extracted archive entry");
        entries.push(ArchiveEntry { path, data });
    }

    Ok(entries)
}

/// Parse bhavcopy CSV rows.
///
/// Rows with a zero previous close (fresh listings) have no percent change
/// and are skipped with a warning. Any other missing or non-numeric field
/// fails the whole parse.
pub fn parse_bhavcopy<R: Read>(reader: R) -> Result<Vec<StockRecord>, BhavcopyError> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv.records() {
        let row = row?;
        let line = row.position().map_or(0, |p| p.line());

        let field = |column: usize| {
            row.get(column).ok_or_else(|| BhavcopyError::Row {
                line,
                message: format!("missing column {column}"),
            })
        };
        let number = |column: usize| -> Result<f64, BhavcopyError> {
            let raw = field(column)?;
            raw.parse().map_err(|e| BhavcopyError::Row {
                line,
                message: format!("column {column} ({raw:?}): {e}"),
            })
        };

        let symbol = field(SYMBOL)?.to_string();
        let close = number(CLOSE)?;
        let prev_close = number(PREV_CLOSE)?;
        let traded_value = number(TRADED_VALUE)?;
        if prev_close == 0.0 {
            warn!(%symbol, line, "Skipping row with zero previous close");
            continue;
        }

        records.push(StockRecord {
            symbol,
            close,
            prev_close,
            pct_change: close / prev_close - 1.0,
            traded_value,
        });
    }

    info!(count = records.len(), "Parsed bhavcopy rows");
    Ok(records)
}

/// The `n` records with the largest percent change, best first.
pub fn top_by_pct_change(records: &[StockRecord], n: usize) -> Vec<StockRecord> {
    top_by(records, n, |r| r.pct_change)
}

/// The `n` records with the largest traded value, best first.
pub fn top_by_traded_value(records: &[StockRecord], n: usize) -> Vec<StockRecord> {
    top_by(records, n, |r| r.traded_value)
}

/// Descending by `key`; equal keys keep file order.
fn top_by(records: &[StockRecord], n: usize, key: impl Fn(&StockRecord) -> f64) -> Vec<StockRecord> {
    records
        .iter()
        .sorted_by(|a, b| key(b).total_cmp(&key(a)))
        .take(n)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    const CSV: &str = "\
SYMBOL,SERIES,OPEN,HIGH,LOW,CLOSE,LAST,PREVCLOSE,TOTTRDQTY,TOTTRDVAL,TIMESTAMP,TOTALTRADES,ISIN,
20MICRONS,EQ,41.5,42.9,41.1,42.5,42.4,41.25,37615,1586473.7,05-JAN-2024,712,INE144J01027,
INFY,EQ,1530,1545,1522,1540.5,1541,1510.3,6213540,9571356235.6,05-JAN-2024,152310,INE009A01021,
RELIANCE,EQ,2590,2612,2581,2595.2,2596,2601,4120983,10702941117.9,05-JAN-2024,201577,INE002A01018,
NEWCO,EQ,100,104,99,103,103,0,5000,515000,05-JAN-2024,40,INE000X01010,
TATASTEEL,EQ,133.1,137.2,132.9,136.8,136.75,132.85,51203344,6943821101.2,05-JAN-2024,188230,INE081A01020,
";

    fn records() -> Vec<StockRecord> {
        parse_bhavcopy(CSV.as_bytes()).unwrap()
    }

    fn symbols(records: &[StockRecord]) -> Vec<&str> {
        records.iter().map(|r| r.symbol.as_str()).collect()
    }

    #[test]
    fn test_parse_rows() {
        let records = records();
        // header skipped, NEWCO dropped for its zero previous close
        assert_eq!(
            symbols(&records),
            vec!["20MICRONS", "INFY", "RELIANCE", "TATASTEEL"]
        );

        let infy = &records[1];
        assert_eq!(infy.close, 1540.5);
        assert_eq!(infy.prev_close, 1510.3);
        assert_eq!(infy.traded_value, 9571356235.6);
        assert!((infy.pct_change - (1540.5 / 1510.3 - 1.0)).abs() < 1e-12);
        assert!(records[2].pct_change < 0.0);
    }

    #[test]
    fn test_parse_trims_padded_fields() {
        let csv = "SYMBOL,SERIES,OPEN,HIGH,LOW,CLOSE,LAST,PREVCLOSE,TOTTRDQTY,TOTTRDVAL\n  ABB , EQ,1,1,1, 110 ,1, 100 ,1, 2500 \n";
        let records = parse_bhavcopy(csv.as_bytes()).unwrap();
        assert_eq!(records[0].symbol, "ABB");
        assert!((records[0].pct_change - 0.1).abs() < 1e-12);
        assert_eq!(records[0].traded_value, 2500.0);
    }

    #[test]
    fn test_parse_rejects_bad_number() {
        let csv = "SYMBOL,SERIES,OPEN,HIGH,LOW,CLOSE,LAST,PREVCLOSE,TOTTRDQTY,TOTTRDVAL\nABB,EQ,1,1,1,n/a,1,100,1,2500\n";
        let err = parse_bhavcopy(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, BhavcopyError::Row { line: 2, .. }), "{err}");
    }

    #[test]
    fn test_parse_rejects_short_row() {
        let csv = "SYMBOL,SERIES,OPEN,HIGH,LOW,CLOSE\nABB,EQ,1,1,1,110\n";
        let err = parse_bhavcopy(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("missing column 7"), "{err}");
    }

    #[test]
    fn test_parse_header_only() {
        let csv = "SYMBOL,SERIES,OPEN,HIGH,LOW,CLOSE,LAST,PREVCLOSE,TOTTRDQTY,TOTTRDVAL\n";
        assert!(parse_bhavcopy(csv.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_top_by_pct_change() {
        let top = top_by_pct_change(&records(), 2);
        // TATASTEEL +2.97%, 20MICRONS +3.03%
        assert_eq!(symbols(&top), vec!["20MICRONS", "TATASTEEL"]);
    }

    #[test]
    fn test_top_by_traded_value() {
        let top = top_by_traded_value(&records(), 3);
        assert_eq!(symbols(&top), vec!["RELIANCE", "INFY", "TATASTEEL"]);
    }

    #[test]
    fn test_top_n_larger_than_input() {
        assert_eq!(top_by_traded_value(&records(), 5).len(), 4);
        assert!(top_by_pct_change(&records(), 0).is_empty());
    }

    #[test]
    fn test_top_ties_keep_file_order() {
        let record = |symbol: &str| StockRecord {
            symbol: symbol.to_string(),
            close: 110.0,
            prev_close: 100.0,
            pct_change: 0.1,
            traded_value: 1000.0,
        };
        let records = vec![record("B"), record("A"), record("C")];
        assert_eq!(symbols(&top_by_pct_change(&records, 2)), vec!["B", "A"]);
    }

    fn zip_of(files: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in files {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_extract_archive() {
        let bytes = zip_of(&[("cm05JAN2024bhav.csv", CSV)]);
        let entries = extract_archive(&bytes).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, PathBuf::from("cm05JAN2024bhav.csv"));
        assert!(entries[0].is_csv());

        let records = parse_bhavcopy(entries[0].data.as_slice()).unwrap();
        assert_eq!(records.len(), 4);
    }

    #[test]
    fn test_extract_skips_directories() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer.add_directory("docs/", SimpleFileOptions::default()).unwrap();
        writer.start_file("docs/notes.txt", SimpleFileOptions::default()).unwrap();
        writer.write_all(b"hello").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let entries = extract_archive(&bytes).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, PathBuf::from("docs/notes.txt"));
        assert_eq!(entries[0].data, b"hello");
        assert!(!entries[0].is_csv());
    }

    #[test]
    fn test_extract_rejects_non_zip() {
        let err = extract_archive(b"not a zip archive").unwrap_err();
        assert!(matches!(err, BhavcopyError::Zip(_)));
    }
}
