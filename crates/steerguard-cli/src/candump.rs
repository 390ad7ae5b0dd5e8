//! Parser for `candump -l` log lines.
//!
//! ```text
//! (1436509052.249713) can0 488#3FE6400000000000
//! ```

use steerguard_bmw_protocol::CanFrame;

use crate::error::CliError;

/// One frame from a candump log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// 1-based line number in the log.
    pub line: usize,
    /// Capture time in microseconds since the epoch.
    pub timestamp_us: u64,
    /// Capture interface, e.g. `can0`.
    pub interface: String,
    /// The frame.
    pub frame: CanFrame,
}

/// Parse a whole log. Blank lines and `#` comments are skipped.
pub fn parse_log(text: &str) -> Result<Vec<LogRecord>, CliError> {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| parse_line(index + 1, line).transpose())
        .collect()
}

/// Parse a single line. Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line: usize, text: &str) -> Result<Option<LogRecord>, CliError> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }
    let fail = |reason: &str| CliError::LogParse {
        line,
        reason: reason.to_string(),
    };

    let mut fields = text.split_whitespace();
    let stamp = fields.next().ok_or_else(|| fail("missing timestamp"))?;
    let interface = fields.next().ok_or_else(|| fail("missing interface"))?;
    let body = fields.next().ok_or_else(|| fail("missing frame"))?;

    let timestamp_us = parse_timestamp(stamp).ok_or_else(|| fail("bad timestamp"))?;
    let (id, data) = body.split_once('#').ok_or_else(|| fail("missing '#'"))?;
    let address = u32::from_str_radix(id, 16).map_err(|_| fail("bad frame id"))?;
    let payload = parse_hex(data).ok_or_else(|| fail("bad payload"))?;
    let frame = CanFrame::new(address, &payload).ok_or_else(|| fail("payload longer than 8 bytes"))?;

    Ok(Some(LogRecord {
        line,
        timestamp_us,
        interface: interface.to_string(),
        frame,
    }))
}

/// `(<sec>.<usec>)` to microseconds.
fn parse_timestamp(stamp: &str) -> Option<u64> {
    let inner = stamp.strip_prefix('(')?.strip_suffix(')')?;
    let (secs, frac) = inner.split_once('.').unwrap_or((inner, ""));
    let secs: u64 = secs.parse().ok()?;
    let mut micros = 0u64;
    let mut digits = 0;
    for c in frac.chars() {
        let d = c.to_digit(10)?;
        if digits < 6 {
            micros = micros * 10 + u64::from(d);
            digits += 1;
        }
    }
    while digits < 6 {
        micros *= 10;
        digits += 1;
    }
    secs.checked_mul(1_000_000)?.checked_add(micros)
}

fn parse_hex(data: &str) -> Option<Vec<u8>> {
    if data.len() % 2 != 0 {
        return None;
    }
    (0..data.len())
        .step_by(2)
        .map(|i| data.get(i..i + 2).and_then(|pair| u8::from_str_radix(pair, 16).ok()))
        .collect()
}
