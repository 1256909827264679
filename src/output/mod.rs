//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod json;
pub mod table;
pub mod tree;

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
            OutputFormat::Json => Ok(json::format_json(self)?),
            OutputFormat::Table | OutputFormat::Pretty => Ok(table::format_table(self)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Tabled, Serialize)]
    struct Row {
        #[tabled(rename = "ID")]
        id: u64,
    }

    #[test]
    fn test_vec_formats_as_table_or_json() {
        let rows = vec![Row { id: 7 }];

        let table = rows.format(OutputFormat::Table).unwrap();
        assert!(table.contains("ID"));
        assert!(table.contains('7'));

        let json = rows.format(OutputFormat::Json).unwrap();
        assert!(json.contains("\"id\": 7"));
    }
}
