// mod.rs - Output writers module

pub mod log;

use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::FamilyTable;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

pub use log::init_run_log;

/// Ensure parent directory exists before creating file
pub(crate) fn ensure_parent_dir(file_path: &str) -> Result<(), String> {
    if let Some(parent) = Path::new(file_path).parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)
                .map_err(|e| format!("Failed to create parent directory '{}': {}", parent.display(), e))?;
        }
    }
    Ok(())
}

fn write_rows<W: Write>(writer: W, delimiter: u8, table: &FamilyTable) -> Result<(), String> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    // An empty table still gets its header row
    if table.is_empty() {
        csv_writer
            .write_record(FamilyTable::COLUMNS)
            .map_err(|e| format!("Write error: {}", e))?;
    }
    for row in &table.rows {
        csv_writer.serialize(row).map_err(|e| format!("Write error: {}", e))?;
    }

    csv_writer.flush().map_err(|e| format!("Flush error: {}", e))
}

fn write_delimited(
    file_path: &str,
    delimiter: u8,
    table: &FamilyTable,
    command_line: Option<&str>,
) -> Result<(), String> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path, e))?;
    let mut writer = BufWriter::new(file);

    if let Some(command_line) = command_line {
        writeln!(writer, "# Command: {}", command_line).map_err(|e| format!("Write error: {}", e))?;
        writeln!(writer, "# Generated: {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"))
            .map_err(|e| format!("Write error: {}", e))?;
        writeln!(writer, "# blastfam v{}", env!("CARGO_PKG_VERSION"))
            .map_err(|e| format!("Write error: {}", e))?;
    }

    write_rows(&mut writer, delimiter, table)?;
    writer.flush().map_err(|e| format!("Flush error: {}", e))
}

/// Write the family table in TSV format
pub fn write_tsv(file_path: &str, table: &FamilyTable, command_line: &str) -> Result<(), String> {
    write_delimited(file_path, b'\t', table, Some(command_line))?;
    println!("✅ Family table written to: {}", file_path);
    Ok(())
}

/// Write the family table in CSV format
pub fn write_csv(file_path: &str, table: &FamilyTable, command_line: &str) -> Result<(), String> {
    write_delimited(file_path, b',', table, Some(command_line))?;
    println!("✅ Family table written to: {} (CSV format)", file_path);
    Ok(())
}

/// Write a bare CSV copy of the table: header and rows only
pub fn write_plain_csv(file_path: &str, table: &FamilyTable) -> Result<(), String> {
    write_delimited(file_path, b',', table, None)?;
    println!("✅ CSV copy written to: {}", file_path);
    Ok(())
}

/// Write the family table as an Excel workbook with a single sheet
pub fn write_xlsx(file_path: &str, table: &FamilyTable) -> Result<(), String> {
    ensure_parent_dir(file_path)?;
    let xlsx_error = |e: XlsxError| format!("Failed to write Excel file '{}': {}", file_path, e);

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Protein Families").map_err(xlsx_error)?;

    for (col, name) in FamilyTable::COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *name, &header_format)
            .map_err(xlsx_error)?;
    }
    for (i, row) in table.rows.iter().enumerate() {
        let r = i as u32 + 1;
        worksheet.write_string(r, 0, row.family.as_str()).map_err(xlsx_error)?;
        worksheet.write_number(r, 1, row.total as f64).map_err(xlsx_error)?;
        worksheet.write_number(r, 2, row.filtered as f64).map_err(xlsx_error)?;
        worksheet.write_number(r, 3, row.unique as f64).map_err(xlsx_error)?;
    }
    worksheet.autofit();

    workbook.save(file_path).map_err(xlsx_error)?;
    println!("✅ Family table written to: {} (Excel format)", file_path);
    Ok(())
}

/// Format actually written for `file_path`: an `.xlsx` name always gets a workbook
pub fn output_format(file_path: &str, format: &str) -> String {
    let is_xlsx = Path::new(file_path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));
    if is_xlsx {
        "xlsx".to_string()
    } else {
        format.to_lowercase()
    }
}

/// Write the family table in the specified format
pub fn write_table(
    file_path: &str,
    format: &str,
    table: &FamilyTable,
    command_line: &str,
) -> Result<(), String> {
    match output_format(file_path, format).as_str() {
        "tsv" => write_tsv(file_path, table, command_line),
        "csv" => write_csv(file_path, table, command_line),
        "xlsx" => write_xlsx(file_path, table),
        _ => Err(format!("Unsupported output format: {}. Use: tsv, csv, xlsx", format)),
    }
}
