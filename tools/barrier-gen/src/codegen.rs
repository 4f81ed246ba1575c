//! C source generator
//!
//! Emits the grid as a `const struct` literal with the layout the game's
//! `Picture` type expects: `width`, `height`, `bytes_per_pixel` and a
//! `pixel_data` string holding every pixel as two octal escapes.

use anyhow::Result;
use std::fmt::Write as FmtWrite;

use crate::grid::{split_pixel, PixelGrid};

/// Characters emitted per pixel: two `\ooo` escapes
pub const ESCAPE_CHARS_PER_PIXEL: usize = 8;

/// Indentation in front of every scanline literal
const ROW_INDENT: &str = "    ";

/// Upper bound on everything outside the scanlines except the symbol,
/// with both dimensions at their widest (10 digits)
const HEADER_LEN: usize = 192;

/// Upper bound on the source length for a `width` x `height` grid named `name`.
///
/// `None` when the size does not fit in `usize`.
pub fn source_len(width: u32, height: u32, name: &str) -> Option<usize> {
    // indent + two quotes + newline around each scanline
    let row_len = (width as usize)
        .checked_mul(ESCAPE_CHARS_PER_PIXEL)?
        .checked_add(ROW_INDENT.len() + 3)?;
    (height as usize)
        .checked_mul(row_len)?
        .checked_add(HEADER_LEN + name.len())
}

/// Write `byte` as a backslash and three zero-padded octal digits.
pub fn write_octal_escape<W: FmtWrite>(out: &mut W, byte: u8) -> std::fmt::Result {
    write!(out, "\\{:03o}", byte)
}

/// Generate the C source for `grid` under the symbol `name`
pub fn render_c_source(grid: &PixelGrid, name: &str) -> Result<String> {
    let width = grid.width();
    let height = grid.height();

    let capacity = source_len(width, height, name).unwrap_or(0);
    let mut output = String::with_capacity(capacity);

    // Struct declaration
    writeln!(output, "const struct")?;
    writeln!(output, "{{")?;
    writeln!(output, "unsigned int width;")?;
    writeln!(output, "unsigned int height;")?;
    writeln!(output, "unsigned int bytes_per_pixel;")?;
    writeln!(
        output,
        "unsigned char pixel_data[{} * {} * {} + 1];",
        width,
        height,
        PixelGrid::BYTES_PER_PIXEL
    )?;
    writeln!(output, "}} {} = {{", name)?;

    // Header values
    writeln!(output, "{},", width)?;
    writeln!(output, "{},", height)?;
    writeln!(output, "{},", PixelGrid::BYTES_PER_PIXEL)?;

    // One literal per scanline
    for row in grid.rows() {
        write!(output, "{}\"", ROW_INDENT)?;
        for &pixel in row {
            let [low, high] = split_pixel(pixel);
            write_octal_escape(&mut output, low)?;
            write_octal_escape(&mut output, high)?;
        }
        writeln!(output, "\"")?;
    }

    writeln!(output, "}};")?;

    tracing::debug!(
        "Rendered {}x{} grid as '{}' ({} bytes of source)",
        width,
        height,
        name,
        output.len()
    );

    Ok(output)
}
