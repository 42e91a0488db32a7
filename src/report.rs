//! Once-per-second serial report.
//!
//! ```text
//! No. 17 Temperature: 23.4 °C\r\n
//! ```
//!
//! The value is the published average truncated to tenths, the same digits
//! the display shows.

use core::fmt::Write;

use heapless::String;

use crate::error::{Error, Result};

/// Longest line: `u32::MAX` report number and a negative two-digit value.
pub const REPORT_LINE_LEN: usize = 48;

pub type ReportLine = String<REPORT_LINE_LEN>;

/// Format report number `n` for `celsius`.
pub fn format_line(n: u32, celsius: f32) -> Result<ReportLine> {
    let tenths = (celsius * 10.0) as i32;
    let sign = if tenths < 0 { "-" } else { "" };
    let magnitude = tenths.unsigned_abs();

    let mut line = ReportLine::new();
    write!(
        line,
        "No. {} Temperature: {}{}.{} °C\r\n",
        n,
        sign,
        magnitude / 10,
        magnitude % 10
    )
    .map_err(|_| Error::BufferOverflow)?;
    Ok(line)
}
