//! Spreadsheet export of the final valuation table.
//!
//! The file is named `<base>_<YYYY_MM_DD>.xlsx`. Column A holds each row's
//! evaluation index, followed by the record columns in
//! [`StockValuation::COLUMNS`] order. Absent values are left blank.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use tracing::info;

use crate::batch::ValuationTable;
use crate::{ExportError, StockValuation};

pub const DEFAULT_OUTPUT_NAME: &str = "stocks_info";

/// Worksheet row limit minus the header row.
const MAX_DATA_ROWS: usize = 1_048_575;

/// Today's date in the local timezone, or UTC when the offset cannot be
/// determined.
pub fn today_local() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

pub fn dated_file_name(base: &str, date: Date) -> Result<String, ExportError> {
    if base.trim().is_empty() {
        return Err(ExportError::EmptyBaseName);
    }
    let stamp = date.format(format_description!("[year]_[month]_[day]"))?;
    Ok(format!("{base}_{stamp}.xlsx"))
}

/// Writes `table` to `<base>_<date>.xlsx` and returns the path written.
pub fn export_table(
    table: &ValuationTable,
    base: &str,
    date: Date,
) -> Result<PathBuf, ExportError> {
    let path = PathBuf::from(dated_file_name(base, date)?);
    write_workbook(table, &path)?;
    info!(path = %path.display(), rows = table.len(), "stocks information exported");
    Ok(path)
}

pub fn write_workbook(table: &ValuationTable, path: &Path) -> Result<(), ExportError> {
    let rows = table.len();
    if rows > MAX_DATA_ROWS {
        return Err(ExportError::TooManyRows { rows });
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Sheet1")?;

    let bold = Format::new().set_bold();
    for (column, name) in StockValuation::COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, column_at(column + 1), *name, &bold)?;
    }

    for (position, row) in table.rows().iter().enumerate() {
        let line = (position + 1) as u32;
        worksheet.write_number_with_format(line, 0, row.index as f64, &bold)?;
        write_record(worksheet, line, &row.record)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_record(
    worksheet: &mut Worksheet,
    line: u32,
    record: &StockValuation,
) -> Result<(), XlsxError> {
    let text = [
        Some(record.ticker.as_str()),
        record.company_name.as_deref(),
        record.stock_market.as_deref(),
        record.country.as_deref(),
        record.sector.as_deref(),
    ];
    let numbers = [
        Some(record.market_cap),
        Some(record.current_assets),
        Some(record.total_liabilities),
        record.net_net_score,
        record.pe,
        record.current_stock_price,
        record.destination_stock_price,
        record.gain_value,
    ];

    for (offset, value) in text.into_iter().enumerate() {
        if let Some(value) = value {
            worksheet.write_string(line, column_at(offset + 1), value)?;
        }
    }

    let first_number = text.len() + 1;
    for (offset, value) in numbers.into_iter().enumerate() {
        if let Some(value) = value {
            worksheet.write_number(line, column_at(first_number + offset), value)?;
        }
    }

    if let Some(obi) = record.obi {
        worksheet.write_boolean(line, column_at(StockValuation::COLUMNS.len()), obi)?;
    }

    Ok(())
}

fn column_at(index: usize) -> u16 {
    // At most 15 columns are ever written.
    index as u16
}
