use clap::Parser;

use crate::{
    core::{data::parse_reading, error::ConfigError, layout::YRange},
    render::PointStyle,
};

/// Top-level CLI structure.
#[derive(Parser, Debug)]
#[command(
    name = "chart",
    about = "Draw a chart in the terminal.",
    long_about = "Draw a chart in the terminal.\n\n\
        chart reads newline-delimited numeric values from FILE (or in the absence \
        of FILE, or if FILE is '-', stdin) and plots them on a chart that is drawn \
        directly in the terminal."
)]
pub struct Cli {
    /// Input path (use `-` for stdin)
    #[arg(value_name = "FILE", default_value = "-")]
    pub file: String,

    /// Use a fixed y-axis from MIN to MAX, inclusive
    #[arg(
        short,
        long,
        value_name = "MIN,MAX",
        value_parser = parse_range,
        allow_hyphen_values = true
    )]
    pub range: Option<YRange>,

    /// Data point style
    #[arg(short, long, value_enum, default_value_t = PointStyle::Dot)]
    pub style: PointStyle,

    /// Displayed title (defaults to the file name)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Retain exactly N points instead of growing with the terminal width
    #[arg(short, long, value_name = "N")]
    pub capacity: Option<usize>,
}

impl Cli {
    /// The named input file, or `None` for stdin.
    #[must_use]
    pub fn input_path(&self) -> Option<&str> {
        (self.file != "-").then_some(self.file.as_str())
    }
}

/// `MIN,MAX` with `MIN < MAX`.
///
/// # Errors
/// A message suitable for clap's usage error.
pub fn parse_range(s: &str) -> Result<YRange, String> {
    let malformed = || ConfigError::MalformedRange(s.to_owned()).to_string();
    let (lo, hi) = s.split_once(',').ok_or_else(malformed)?;
    let low = parse_reading(lo.as_bytes()).map_err(|_| malformed())?;
    let high = parse_reading(hi.as_bytes()).map_err(|_| malformed())?;
    if low >= high {
        return Err(ConfigError::InvalidRange { low, high }.to_string());
    }
    Ok(YRange { low, high })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_accepts_negative_bounds() {
        assert_eq!(
            parse_range("-5,2.5"),
            Ok(YRange {
                low: -5.0,
                high: 2.5
            })
        );
        assert_eq!(parse_range(" 0 , 1 ").map(|r| r.high), Ok(1.0));
    }

    #[test]
    fn range_rejects_bad_input() {
        assert!(parse_range("5").is_err());
        assert!(parse_range("a,b").is_err());
        assert!(parse_range("3,1").unwrap_err().contains("must be <"));
        assert!(parse_range("1,1").is_err());
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::try_parse_from([
            "chart", "-r", "-1,1", "-s", "ohlc", "-t", "cpu", "-c", "300", "data.txt",
        ])
        .unwrap();
        assert_eq!(cli.input_path(), Some("data.txt"));
        assert_eq!(cli.range, Some(YRange { low: -1.0, high: 1.0 }));
        assert_eq!(cli.style, PointStyle::Ohlc);
        assert_eq!(cli.title.as_deref(), Some("cpu"));
        assert_eq!(cli.capacity, Some(300));
    }

    #[test]
    fn defaults_read_stdin_with_dots() {
        let cli = Cli::try_parse_from(["chart"]).unwrap();
        assert_eq!(cli.input_path(), None);
        assert_eq!(cli.style, PointStyle::Dot);
        assert!(Cli::try_parse_from(["chart", "-"]).unwrap().input_path().is_none());
    }

    #[test]
    fn unknown_style_is_a_usage_error() {
        let err = Cli::try_parse_from(["chart", "--style", "bars"]).unwrap_err();
        assert!(err.use_stderr());
    }
}
