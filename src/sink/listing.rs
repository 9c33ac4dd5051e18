//! Plain text listing of laid out squares, used by --debug

use crate::layout::CommitSquare;
use chrono::Datelike;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Write one `x y date` line per square, then the square count per year,
/// newest year first.
pub fn write_listing<W: Write>(mut out: W, squares: &[CommitSquare]) -> io::Result<()> {
    writeln!(out, "x y date")?;
    let mut per_year: BTreeMap<i32, usize> = BTreeMap::new();
    for square in squares {
        writeln!(out, "{} {} {}", square.column, square.row, square.date.date())?;
        *per_year.entry(square.date.year()).or_default() += 1;
    }
    for (year, count) in per_year.iter().rev() {
        writeln!(out, "{year}: {count} squares")?;
    }
    Ok(())
}
