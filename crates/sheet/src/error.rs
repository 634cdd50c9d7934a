use thiserror::Error;

/// Errors that can occur while ingesting a sheet
#[derive(Error, Debug)]
pub enum SheetError {
    #[error(
        "No sheet matching {} found. Available sheets: {}",
        quote_list(.targets),
        .available.join(", ")
    )]
    SheetNotFound {
        targets: Vec<String>,
        available: Vec<String>,
    },

    #[error("Sheet '{sheet}' appears to be empty or contains no data")]
    EmptySheet { sheet: String },

    #[error(
        "No valid data found in sheet '{sheet}'. Check columns {ticket_column} (ticket #) and {employee_column} (employee name)"
    )]
    NoValidEntities {
        sheet: String,
        ticket_column: String,
        employee_column: String,
    },

    #[error("Malformed source: {0}")]
    MalformedSource(String),

    #[error("Invalid cell notation: {0}")]
    InvalidCellNotation(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn quote_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("\"{item}\""))
        .collect::<Vec<_>>()
        .join(" or ")
}

pub type Result<T> = std::result::Result<T, SheetError>;
