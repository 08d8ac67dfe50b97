//! CSV serialization of emitted bars.

use std::io::Write;
use std::path::Path;

use tickforge_bars::IntervalSpec;
use tickforge_core::{format_timestamp_ms, OhlcvBar, Result};

/// Output column order: one row per bar, interval start first.
pub const BAR_COLUMNS: [&str; 6] = ["timestamp", "open", "high", "low", "close", "volume"];

/// Serialize bars as CSV to any writer.
pub fn write_bars<W: Write>(bars: &[OhlcvBar], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(BAR_COLUMNS)?;
    for bar in bars {
        csv_writer.write_record(&[
            format_timestamp_ms(bar.start_ms),
            bar.open.to_string(),
            bar.high.to_string(),
            bar.low.to_string(),
            bar.close.to_string(),
            bar.volume.to_string(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Serialize bars as CSV to a file.
pub fn write_bars_to_path(bars: &[OhlcvBar], path: impl AsRef<Path>) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_bars(bars, file)
}

/// Default output file name for an interval, e.g. `1h30m_bars.csv`.
pub fn default_output_name(interval: &IntervalSpec) -> String {
    format!("{interval}_bars.csv")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickforge_core::parse_timestamp_ms;

    fn make_bar(start: &str, end: &str) -> OhlcvBar {
        OhlcvBar {
            start_ms: parse_timestamp_ms(start).unwrap(),
            end_ms: parse_timestamp_ms(end).unwrap(),
            open: 100.0,
            high: 102.5,
            low: 99.5,
            close: 101.0,
            volume: 42,
        }
    }

    #[test]
    fn test_write_bars_header_and_rows() {
        let bars = vec![make_bar("2024-09-19 09:30:00.000", "2024-09-19 09:30:30.000")];
        let mut out = Vec::new();
        write_bars(&bars, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "timestamp,open,high,low,close,volume");
        assert_eq!(lines[1], "2024-09-19 09:30:00.000,100,102.5,99.5,101,42");
    }

    #[test]
    fn test_write_bars_empty_is_header_only() {
        let mut out = Vec::new();
        write_bars(&[], &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_default_output_name() {
        let interval = IntervalSpec::parse("1h30m").unwrap();
        assert_eq!(default_output_name(&interval), "1h30m_bars.csv");
    }
}
