//! bridge-records - Read played boards from LIN and PBN files
//!
//! Parses each input file (in parallel), then prints either a one-line
//! summary per board or the board re-rendered as a LIN record.
//!
//! Usage: bridge-records [--format auto|pbn|lin|multi-lin] [--output summary|lin] <FILES>...

use bridge_records::lin::{build_lin_str, LinType};
use bridge_records::{read_records, read_records_as, DealRecord, SourceFormat};
use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bridge-records")]
#[command(about = "Read played boards from LIN and PBN files")]
#[command(version)]
struct Args {
    /// Input files
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Input format (auto detects from extension and content)
    #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::Auto)]
    format: Format,

    /// What to print for each board
    #[arg(short = 'o', long = "output", value_enum, default_value_t = Output::Summary)]
    output: Output,

    /// More logging (-v for info, -vv for debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Auto,
    Pbn,
    Lin,
    MultiLin,
}

impl Format {
    fn source_format(self) -> Option<SourceFormat> {
        match self {
            Format::Auto => None,
            Format::Pbn => Some(SourceFormat::Pbn),
            Format::Lin => Some(SourceFormat::Lin),
            Format::MultiLin => Some(SourceFormat::MultiLin),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    Summary,
    Lin,
}

fn main() {
    let args = Args::parse();
    let level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let results: Vec<_> = args
        .files
        .par_iter()
        .map(|path| {
            let records = match args.format.source_format() {
                Some(format) => read_records_as(path, format),
                None => read_records(path),
            };
            (path, records)
        })
        .collect();

    let mut failed = false;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (path, records) in results {
        match records {
            Ok(records) => {
                log::info!("{}: {} deals", path.display(), records.len());
                let text = match args.output {
                    Output::Summary => summarize(&path.display().to_string(), &records),
                    Output::Lin => render_lin(&records),
                };
                if let Err(e) = out.write_all(text.as_bytes()) {
                    eprintln!("Error writing output: {}", e);
                    std::process::exit(1);
                }
            }
            Err(e) => {
                eprintln!("Error reading '{}': {}", path.display(), e);
                failed = true;
            }
        }
    }
    if failed {
        std::process::exit(1);
    }
}

/// One line per board: source, board, contract, declarer, tricks, score
fn summarize(source: &str, records: &[DealRecord]) -> String {
    let mut text = String::new();
    for record in records {
        for board in &record.board_records {
            text.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\t{}\n",
                source,
                board.board_name.as_deref().unwrap_or("-"),
                board.contract,
                board.declarer,
                board.tricks,
                board.score
            ));
        }
    }
    text
}

fn render_lin(records: &[DealRecord]) -> String {
    let mut text = String::new();
    for record in records {
        for board in &record.board_records {
            text.push_str(&build_lin_str(&record.deal, board, LinType::Single));
            text.push('\n');
        }
    }
    text
}
