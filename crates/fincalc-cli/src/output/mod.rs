//! Rendering of command results. Every command hands back a
//! `serde_json::Value`; the selected format decides how it reaches stdout.

pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use clap::ValueEnum;
use serde_json::Value;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON, the full envelope
    Json,
    /// Field/value tables; comparisons side by side
    Table,
    /// One record per row, or field,value pairs
    Csv,
    /// Just the headline answer
    Minimal,
}

pub fn format_output(format: OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}
