//! # ticketgrid-cli
//!
//! Command-line interface for browsing in-progress tickets in an Excel tracker.

mod export;
mod render;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use ticketgrid_query::{
    compute_stats, match_records, reconstruct_spans, run, span_mismatches, spans_from_merges, QueryState, RowRef,
    SortDirection, SpanDescriptor,
};
use ticketgrid_sheet::{
    column_index_to_letters, parse_column, search_employees, CellValue, ExcelWorkbook, IngestOptions, Ingestion,
    Ingestor, NormalizedTable, WorkbookSource,
};
use tracing_subscriber::EnvFilter;

/// ticketgrid - browse in-progress tickets from an Excel tracker
#[derive(Parser)]
#[command(name = "ticketgrid")]
#[command(author, version, about = "Browse in-progress tickets from an Excel tracker", long_about = None)]
struct Cli {
    /// Ingest options file (JSON or YAML)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Sheet name fragment to look for (repeatable, replaces the defaults)
    #[arg(long = "alias", global = true, value_name = "NAME")]
    aliases: Vec<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the sheets in a workbook
    Sheets {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Show the in-progress table
    View {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        query: QueryArgs,

        /// Output format (table, json, csv)
        #[arg(short = 'f', long = "format", default_value = "table")]
        format: OutputFormat,

        /// Show at most N rows
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },
    /// List employees found in the sheet
    Employees {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Only employees whose name contains TERM
        #[arg(short = 's', long = "search", value_name = "TERM")]
        search: Option<String>,
    },
    /// Show every record assigned to one employee
    Records {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(value_name = "NAME")]
        name: String,

        /// Output format (table, json, csv)
        #[arg(short = 'f', long = "format", default_value = "table")]
        format: OutputFormat,
    },
    /// Save the current view to a new xlsx file
    Export {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(value_name = "OUT")]
        output: PathBuf,

        #[command(flatten)]
        query: QueryArgs,
    },
}

#[derive(Args)]
struct QueryArgs {
    /// Keep rows where any cell contains TERM
    #[arg(short = 's', long = "search", value_name = "TERM")]
    search: Option<String>,

    /// Sort by column letter or 0-based index
    #[arg(long, value_name = "COL")]
    sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,
}

impl QueryArgs {
    fn to_state(&self, width: usize) -> Result<QueryState> {
        let mut state = QueryState::new().with_search(self.search.as_deref().unwrap_or(""));
        if let Some(sort) = &self.sort {
            let column = parse_column(sort)?;
            if column >= width {
                bail!(
                    "Sort column {} is outside the table (last column is {})",
                    column_index_to_letters(column),
                    column_index_to_letters(width.saturating_sub(1))
                );
            }
            let direction = if self.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            state = state.with_sort(column, direction);
        }
        Ok(state)
    }
}

/// Output format for results.
#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Pretty table output (default)
    #[default]
    Table,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
            .init();
    }

    let ingestor = Ingestor::new(load_options(cli.config.as_deref(), &cli.aliases)?);

    match &cli.command {
        Command::Sheets { file } => list_sheets(&ingestor, file),
        Command::View {
            file,
            query,
            format,
            limit,
        } => view(&ingestor, file, query, *format, *limit),
        Command::Employees { file, search } => employees(&ingestor, file, search.as_deref()),
        Command::Records { file, name, format } => records(&ingestor, file, name, *format),
        Command::Export { file, output, query } => export_view(&ingestor, file, output, query),
    }
}

/// Build ingest options from an optional file and alias overrides.
fn load_options(config: Option<&Path>, aliases: &[String]) -> Result<IngestOptions> {
    let mut options = match config {
        Some(path) => IngestOptions::from_file(path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => IngestOptions::default(),
    };
    if !aliases.is_empty() {
        options = options.with_sheet_aliases(aliases.iter().cloned());
        options.validate()?;
    }
    Ok(options)
}

fn ingest(ingestor: &Ingestor, file: &Path) -> Result<Ingestion> {
    ingestor
        .ingest_path(file)
        .with_context(|| format!("Failed to load {}", file.display()))
}

/// Spans for the group header row, checked against the sheet's merges.
fn group_spans(table: &NormalizedTable) -> Vec<SpanDescriptor> {
    let spans = reconstruct_spans(table.group_headers());
    if !table.header_merges().is_empty() {
        let geometric = spans_from_merges(table.width(), table.group_headers(), table.header_merges());
        let mismatches = span_mismatches(&spans, &geometric);
        if !mismatches.is_empty() {
            let columns: Vec<String> = mismatches.iter().map(|c| column_index_to_letters(*c)).collect();
            tracing::warn!(
                "Group header labels disagree with merged cells at columns {}",
                columns.join(", ")
            );
        }
    }
    spans
}

fn list_sheets(ingestor: &Ingestor, file: &Path) -> Result<()> {
    let workbook = ExcelWorkbook::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    let names = workbook.sheet_names();
    let target = ingestor.locator().locate(&names).ok().map(str::to_string);

    for name in &names {
        if target.as_deref() == Some(name.as_str()) {
            println!("{} {}", "*".green().bold(), name.green().bold());
        } else {
            println!("  {name}");
        }
    }
    if target.is_none() {
        println!(
            "{} no sheet matches {}",
            "Warning:".yellow().bold(),
            ingestor.locator().aliases().join(", ")
        );
    }
    Ok(())
}

fn view(ingestor: &Ingestor, file: &Path, query: &QueryArgs, format: OutputFormat, limit: Option<usize>) -> Result<()> {
    let Ingestion { table, .. } = ingest(ingestor, file)?;
    let state = query.to_state(table.width())?;
    let view = run(&table, &state);
    let stats = compute_stats(&table, view.len());
    let display = ingestor.options().display_options();
    let shown = &view.rows()[..limit.unwrap_or(view.len()).min(view.len())];

    match format {
        OutputFormat::Table => {
            println!("{}", render::render_stats(table.sheet_name(), &stats));
            print!("{}", render::render_table(&table, shown, &group_spans(&table), &display));
            if shown.len() < view.len() {
                println!("{}", format!("... {} more rows", view.len() - shown.len()).dimmed());
            }
        }
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = shown
                .iter()
                .map(|row| render::row_json(table.column_headers(), row.cells, &display))
                .collect();
            let json = serde_json::json!({
                "sheet": table.sheet_name(),
                "stats": stats,
                "group_spans": group_spans(&table),
                "column_headers": table.column_headers(),
                "rows": rows,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Csv => {
            let rows: Vec<&[CellValue]> = shown.iter().map(|row| row.cells).collect();
            render::write_csv(std::io::stdout().lock(), table.column_headers(), &rows, &display)?;
        }
    }
    Ok(())
}

fn employees(ingestor: &Ingestor, file: &Path, search: Option<&str>) -> Result<()> {
    let ingestion = ingest(ingestor, file)?;
    let selected = match search {
        Some(term) => search_employees(&ingestion.employees, term),
        None => ingestion.employees.iter().collect(),
    };
    print!("{}", render::render_employees(&selected));
    Ok(())
}

fn records(ingestor: &Ingestor, file: &Path, name: &str, format: OutputFormat) -> Result<()> {
    let Ingestion { table, .. } = ingest(ingestor, file)?;
    let records = match_records(&table, name);
    let display = ingestor.options().display_options();

    match format {
        OutputFormat::Table => {
            println!("{}", render::render_records_summary(&records));
            if !records.is_empty() {
                let rows: Vec<_> = records
                    .records
                    .iter()
                    .map(|record| RowRef {
                        index: record.row_index,
                        cells: &record.cells,
                    })
                    .collect();
                print!("{}", render::render_table(&table, &rows, &group_spans(&table), &display));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Csv => {
            let rows: Vec<&[CellValue]> = records.records.iter().map(|r| r.cells.as_slice()).collect();
            render::write_csv(std::io::stdout().lock(), table.column_headers(), &rows, &display)?;
        }
    }
    Ok(())
}

fn export_view(ingestor: &Ingestor, file: &Path, output: &Path, query: &QueryArgs) -> Result<()> {
    let Ingestion { table, .. } = ingest(ingestor, file)?;
    let state = query.to_state(table.width())?;
    let view = run(&table, &state);

    let written = export::export_view(output, &table, view.rows(), &export::header_spans(&table))?;
    println!("{} {} rows to {}", "Exported".green().bold(), written, output.display());
    Ok(())
}
