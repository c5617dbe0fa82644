//! csvtable - inspect and convert CSV tables

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use csvtable::config::{parse_delimiter, OutputFormat, ReaderConfig, WriterConfig};
use csvtable::output::{render_json, render_preview, Writer};
use csvtable::parser::Reader;
use csvtable::source::{HttpOptions, Input};
use csvtable::{encoding, Table};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Table,
    Json,
    Csv,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Table => OutputFormat::Table,
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Csv => OutputFormat::Csv,
        }
    }
}

/// Inspect and convert comma-separated tables
#[derive(Parser, Debug)]
#[command(name = "csvtable")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a table
    Show {
        #[command(flatten)]
        input: InputArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: CliOutputFormat,

        /// Show at most this many rows (table format only)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print a single field
    Get {
        #[command(flatten)]
        input: InputArgs,

        /// Zero-based data row
        #[arg(short, long)]
        row: usize,

        /// Column title (titled input) or zero-based column index
        #[arg(short, long)]
        column: String,
    },

    /// Print the TARGET field of every row whose KEY field equals VALUE.
    /// The input is always read as titled.
    Lookup {
        #[command(flatten)]
        input: InputArgs,

        /// Title of the column to match
        #[arg(long)]
        key: String,

        /// Value to match
        #[arg(long)]
        value: String,

        /// Title of the column to print
        #[arg(long)]
        target: String,
    },

    /// Re-encode a table and/or change its row delimiter
    Convert {
        #[command(flatten)]
        input: InputArgs,

        /// Output file
        output: PathBuf,

        /// Output encoding (defaults to the input encoding)
        #[arg(long)]
        to_encoding: Option<String>,

        /// Output row delimiter (defaults to the input delimiter)
        #[arg(long)]
        to_delimiter: Option<String>,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// CSV file path or http(s) URL
    input: String,

    /// First line holds column titles
    #[arg(short, long)]
    titled: bool,

    /// Input character encoding
    #[arg(short, long, default_value = "utf-8")]
    encoding: String,

    /// Row delimiter: crlf, lf, cr or a literal with \r, \n, \t escapes
    #[arg(short, long, default_value = "crlf")]
    delimiter: String,

    /// HTTP proxy for URL inputs (host:port or proxy URL)
    #[arg(long)]
    proxy: Option<String>,

    /// HTTP timeout in milliseconds
    #[arg(long, default_value_t = 10_000)]
    timeout_ms: u64,
}

impl InputArgs {
    fn reader_config(&self, titled: bool) -> Result<ReaderConfig> {
        Ok(ReaderConfig::new()
            .with_encoding(encoding::resolve(&self.encoding)?)
            .with_delimiter(parse_delimiter(&self.delimiter))
            .with_titled(titled))
    }

    fn http_options(&self) -> HttpOptions {
        let options = HttpOptions::default().with_timeout(Duration::from_millis(self.timeout_ms));
        match &self.proxy {
            Some(proxy) => options.with_proxy(proxy.as_str()),
            None => options,
        }
    }

    fn load(&self, titled: bool) -> Result<Option<Table>> {
        let input = Input::from(self.input.as_str());
        let reader = Reader::new(self.reader_config(titled)?);
        reader
            .read_input(&input, &self.http_options())
            .with_context(|| format!("Failed to read table: {}", input))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1), // No data or no match
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "csvtable=warn",
        1 => "csvtable=info",
        2 => "csvtable=debug",
        _ => "csvtable=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> Result<bool> {
    match command {
        Command::Show {
            input,
            format,
            limit,
        } => {
            let Some(table) = input.load(input.titled)? else {
                eprintln!("No data in {}", input.input);
                return Ok(false);
            };
            match OutputFormat::from(format) {
                OutputFormat::Table => println!("{}", render_preview(&table, limit)),
                OutputFormat::Json => println!("{}", render_json(&table, true)?),
                OutputFormat::Csv => println!("{}", table.render()),
            }
            Ok(true)
        }

        Command::Get { input, row, column } => {
            let Some(table) = input.load(input.titled)? else {
                eprintln!("No data in {}", input.input);
                return Ok(false);
            };
            let value = if table.is_titled() {
                table.field_by_title(row, &column)?
            } else {
                let index: usize = column
                    .parse()
                    .with_context(|| format!("Column must be an index for untitled input: {}", column))?;
                table.field(row, index)?
            };
            println!("{}", value);
            Ok(true)
        }

        Command::Lookup {
            input,
            key,
            value,
            target,
        } => {
            let Some(table) = input.load(true)? else {
                eprintln!("No data in {}", input.input);
                return Ok(false);
            };
            let mut found = false;
            for row in table.matching_rows(&key, &value)? {
                println!("{}", table.field_by_title(row, &target)?);
                found = true;
            }
            if !found {
                tracing::info!("No row has {} = {}", key, value);
            }
            Ok(found)
        }

        Command::Convert {
            input,
            output,
            to_encoding,
            to_delimiter,
        } => {
            let Some(mut table) = input.load(input.titled)? else {
                eprintln!("No data in {}", input.input);
                return Ok(false);
            };

            let charset = encoding::resolve(to_encoding.as_deref().unwrap_or(&input.encoding))?;
            let delimiter = parse_delimiter(to_delimiter.as_deref().unwrap_or(&input.delimiter));
            let writer = Writer::new(
                WriterConfig::new()
                    .with_encoding(charset)
                    .with_delimiter(delimiter),
            );

            writer
                .write_path(&mut table, &output)
                .with_context(|| format!("Failed to write table: {}", output.display()))?;
            tracing::info!(
                "Wrote {} rows to {} as {}",
                table.rows(),
                output.display(),
                charset.name()
            );
            Ok(true)
        }
    }
}
