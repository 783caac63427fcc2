//! Output formatting module
//!
//! Table and JSON output for CLI commands, plus rating colors.

use colored::{ColoredString, Colorize};
use marquee_core::{ColorBand, Rating};
use serde::Serialize;
use std::fmt::Display;
use tabled::{Table, Tabled};

/// Output format enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid format: {}. Use 'table' or 'json'", s)),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Print rows in the specified format
pub fn print_output<T>(data: &[T], format: OutputFormat) -> anyhow::Result<()>
where
    T: Serialize + Tabled,
{
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                println!("No items found.");
            } else {
                println!("{}", Table::new(data));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
    }
    Ok(())
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Print a labelled field, skipping empty values
pub fn print_field(label: &str, value: impl Display) {
    let value = value.to_string();
    if !value.is_empty() {
        println!("{:>12}  {}", label.bold(), value);
    }
}

/// Print a success message (respects quiet mode)
pub fn print_success(message: &str, quiet: bool) {
    if !quiet {
        println!("{}", message.green());
    }
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{}", message.red());
}

/// Print an info message (respects quiet mode)
pub fn print_info(message: &str, quiet: bool) {
    if !quiet {
        println!("{}", message);
    }
}

/// Rating with one decimal, colored by its band
pub fn colored_rating(rating: &Rating) -> ColoredString {
    let text = rating.format();
    match rating.color_band() {
        ColorBand::High => text.green(),
        ColorBand::MediumHigh => text.yellow(),
        ColorBand::MediumLow => text.truecolor(255, 165, 0),
        ColorBand::Low => text.red(),
    }
}

/// Filled and empty stars for a 0-5 rating
pub fn stars(rating: &Rating) -> String {
    let filled = usize::from(marquee_core::rating::rounded_stars(rating));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Shorten `text` to `max` characters with an ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
