use std::io::Write;

use crate::config::CsvExportOptions;
use crate::error::ExplorerResult;
use crate::table::Table;

/// Writes `rows` of `table` as delimited text. Fields containing the delimiter, a double quote,
/// or a line break are quoted, with inner quotes doubled. Blank values are empty fields.
pub fn export_csv<W: Write>(
    table: &Table,
    rows: &[usize],
    writer: W,
    options: &CsvExportOptions,
) -> ExplorerResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .quote(b'"')
        .double_quote(true)
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    if options.include_header {
        csv_writer.write_record(table.columns())?;
    }

    let width = table.columns().len();
    let mut fields: Vec<String> = Vec::with_capacity(width);
    for &row in rows {
        fields.clear();
        fields.extend((0..width).map(|idx| table.value_by_idx(row, idx).to_string()));
        csv_writer.write_record(&fields)?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn export_csv_string(
    table: &Table,
    rows: &[usize],
    options: &CsvExportOptions,
) -> ExplorerResult<String> {
    let mut buf = Vec::new();
    export_csv(table, rows, &mut buf, options)?;
    // Every field is rendered from `str`, so the output is valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
