//! Excel workbook of a bhavcopy's top movers.
//!
//! Two sheets, one per ranking, laid out the same way:
//!
//! ```text
//! A1  Top Traded Stocks
//! A2  Stock | % Change | Value Traded (INR)
//! A3… one row per security, best first
//! ```
//!
//! `% Change` is written as a fraction (`0.05` for +5%).

use crate::bhavcopy::StockRecord;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

const TITLE: &str = "Top Traded Stocks";
const HEADERS: [&str; 3] = ["Stock", "% Change", "Value Traded (INR)"];

/// Sheet names for a top-`n` workbook, by percent change then by value.
pub fn sheet_names(n: usize) -> [String; 2] {
    [
        format!("Top {n} (By Percent Traded)"),
        format!("Top {n} (By Quantity Traded)"),
    ]
}

fn fill_sheet(sheet: &mut Worksheet, name: &str, records: &[StockRecord]) -> Result<(), XlsxError> {
    sheet.set_name(name)?;
    sheet.write_string(0, 0, TITLE)?;
    for (col, header) in (0u16..).zip(HEADERS) {
        sheet.write_string(1, col, header)?;
    }
    for (row, record) in (2u32..).zip(records) {
        sheet.write_string(row, 0, &record.symbol)?;
        sheet.write_number(row, 1, record.pct_change)?;
        sheet.write_number(row, 2, record.traded_value)?;
    }
    Ok(())
}

/// Build the workbook in memory and return its `.xlsx` bytes.
pub fn top_movers_workbook(
    by_pct: &[StockRecord],
    by_value: &[StockRecord],
    n: usize,
) -> Result<Vec<u8>, XlsxError> {
    let [pct_name, value_name] = sheet_names(n);
    let mut workbook = Workbook::new();
    fill_sheet(workbook.add_worksheet(), &pct_name, by_pct)?;
    fill_sheet(workbook.add_worksheet(), &value_name, by_value)?;
    workbook.save_to_buffer()
}

/// Write the top-movers workbook to `path`.
#[instrument(level = "info", skip(by_pct, by_value), fields(path = %path.display()))]
pub async fn write_top_movers(
    path: &Path,
    by_pct: &[StockRecord],
    by_value: &[StockRecord],
    n: usize,
) -> Result<(), Box<dyn Error>> {
    let bytes = top_movers_workbook(by_pct, by_value, n)?;
    if let Err(e) = fs::write(path, &bytes).await {
        error!(error = %e, "Failed writing workbook");
        return Err(e.into());
    }
    info!(bytes = bytes.len(), "Wrote workbook");
    Ok(())
}

/// Plain-text rendering of one ranking, for stdout.
pub fn movers_to_text(title: &str, records: &[StockRecord]) -> String {
    let mut out = format!("{title}\n");
    for record in records {
        out.push_str(&format!(
            "{:<12} {:>+8.2}% {:>20.2}\n",
            record.symbol,
            record.pct_change * 100.0,
            record.traded_value
        ));
    }
    out
}
