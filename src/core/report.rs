use crate::domain::model::AssignmentSet;
use crate::utils::error::{DrawError, Result};
use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Table => "txt",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(DrawError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "Unsupported format. Valid formats: table, csv, json".to_string(),
            }),
        }
    }
}

pub fn render<Id>(assignments: &AssignmentSet<Id>, format: OutputFormat) -> Result<String>
where
    Id: Display + Serialize,
{
    match format {
        OutputFormat::Table => Ok(render_table(assignments)),
        OutputFormat::Csv => render_csv(assignments),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(assignments)?),
    }
}

fn render_table<Id>(assignments: &AssignmentSet<Id>) -> String {
    let width = assignments
        .iter()
        .map(|a| a.giver_name.chars().count())
        .max()
        .unwrap_or(0);

    assignments
        .iter()
        .map(|a| format!("{:<width$} → {}", a.giver_name, a.receiver_name, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_csv<Id: Display>(assignments: &AssignmentSet<Id>) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["giver_id", "giver_name", "receiver_id", "receiver_name"])?;
    for a in assignments {
        writer.write_record([
            a.giver_id.to_string(),
            a.giver_name.clone(),
            a.receiver_id.to_string(),
            a.receiver_name.clone(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DrawError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| DrawError::ValidationError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}
