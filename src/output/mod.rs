//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod formatters;
pub mod json;
pub mod table;

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;

    /// Format and print to stdout
    fn print(&self, format: OutputFormat) -> Result<()> {
        println!("{}", self.format(format)?);
        Ok(())
    }
}

impl<T: Tabled + Serialize> Formattable for Vec<T> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(table::format_table(self)),
            OutputFormat::Json => Ok(json::format_json(self)?),
        }
    }
}

/// Schemaless backend records, shown with a fixed column list
pub struct Records<'a> {
    pub value: &'a serde_json::Value,
    pub columns: &'a [&'a str],
}

impl Formattable for Records<'_> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(table::format_records(self.value, self.columns)),
            OutputFormat::Json => Ok(json::format_json(self.value)?),
        }
    }
}
