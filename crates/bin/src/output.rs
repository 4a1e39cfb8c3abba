//! Output formatting helpers for human-readable and JSON output.

use std::io::{self, Write};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

const COLUMN_GAP: &str = "  ";

/// Write `rows` under `headers`, padding every column but the last to its
/// widest cell. Cells past the header count are dropped. Nothing is written
/// for an empty table.
pub fn write_table<W: Write>(out: &mut W, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    if rows.is_empty() {
        return Ok(());
    }

    let widths = rows.iter().fold(
        headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>(),
        |mut widths, row| {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
            widths
        },
    );

    write_row(out, headers.iter().copied(), &widths)?;
    for row in rows {
        write_row(out, row.iter().map(String::as_str), &widths)?;
    }
    Ok(())
}

fn write_row<'a, W: Write>(
    out: &mut W,
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
) -> io::Result<()> {
    let last = widths.len().saturating_sub(1);
    for (i, (cell, &width)) in cells.zip(widths).enumerate() {
        if i > 0 {
            out.write_all(COLUMN_GAP.as_bytes())?;
        }
        if i == last {
            out.write_all(cell.as_bytes())?;
        } else {
            write!(out, "{cell:<width$}")?;
        }
    }
    writeln!(out)
}

/// [`write_table`] to stdout.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    write_table(&mut io::stdout().lock(), headers, rows)
}

/// Print any serializable value as a single line of JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
