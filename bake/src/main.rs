//! clickup-bake CLI - bake an activity CSV into a ClickUp import
//!
//! # Main Command
//!
//! ```bash
//! clickup-bake                              # uses SOURCE_CSV / DEST_CSV / RELEASE_FILTER
//! clickup-bake bake --release-filter released
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! clickup-bake parse source.csv            # Dump normalized input rows as JSON
//! clickup-bake mapping                     # Show the target columns and their sources
//! ```

use clap::{Args, Parser, Subcommand};
use clickup_bake::config::{
    CSV_DELIMITER_KEY, DEST_CSV_KEY, EMPTY_PHASE_KEY, RELEASE_FILTER_KEY, SKIPPED_CSV_KEY,
    SOURCE_CSV_KEY,
};
use clickup_bake::{
    mapping_description, parse_csv_file, run, Config, ConsoleLog, Delimiter, JsonLog, LogSink,
    NullLog,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "clickup-bake")]
#[command(about = "Bake activity CSV exports into the ClickUp task import layout", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// No progress output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Progress output as JSON lines
    #[arg(long, global = true, conflicts_with = "quiet")]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform the source CSV (default when no command is given)
    Bake(BakeArgs),

    /// Parse a CSV file and output its normalized rows as JSON
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// Delimiter: a single character, 'tab' or 'auto'
        #[arg(short, long, default_value = ",")]
        delimiter: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the target columns and the input columns they come from
    Mapping,
}

/// Overrides for the environment configuration
#[derive(Args, Default)]
struct BakeArgs {
    /// Input CSV [env: SOURCE_CSV, default: source.csv]
    #[arg(short, long)]
    source: Option<String>,

    /// Output CSV [env: DEST_CSV, default: clickup_ready.csv]
    #[arg(short, long)]
    dest: Option<String>,

    /// Rejected rows CSV [env: SKIPPED_CSV, default: skipped_rows.csv]
    #[arg(long)]
    skipped: Option<String>,

    /// 'released' or 'all' [env: RELEASE_FILTER, default: all]
    #[arg(short, long)]
    release_filter: Option<String>,

    /// 'blank' or 'skip' for rows without a phase [env: EMPTY_PHASE, default: blank]
    #[arg(long)]
    empty_phase: Option<String>,

    /// Delimiter: a single character, 'tab' or 'auto' [env: CSV_DELIMITER, default: ,]
    #[arg(long)]
    delimiter: Option<String>,

    /// Write the run summary as JSON to this file
    #[arg(long)]
    summary: Option<PathBuf>,
}

impl BakeArgs {
    fn lookup(&self, key: &str) -> Option<String> {
        let flag = match key {
            SOURCE_CSV_KEY => self.source.as_ref(),
            DEST_CSV_KEY => self.dest.as_ref(),
            SKIPPED_CSV_KEY => self.skipped.as_ref(),
            RELEASE_FILTER_KEY => self.release_filter.as_ref(),
            EMPTY_PHASE_KEY => self.empty_phase.as_ref(),
            CSV_DELIMITER_KEY => self.delimiter.as_ref(),
            _ => None,
        };
        flag.cloned().or_else(|| std::env::var(key).ok())
    }
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log: Box<dyn LogSink> = if cli.quiet {
        Box::new(NullLog)
    } else if cli.json_logs {
        Box::new(JsonLog)
    } else {
        Box::new(ConsoleLog)
    };

    let result = match cli.command {
        None => cmd_bake(&BakeArgs::default(), log.as_ref()),
        Some(Commands::Bake(args)) => cmd_bake(&args, log.as_ref()),
        Some(Commands::Parse {
            input,
            delimiter,
            output,
        }) => cmd_parse(&input, &delimiter, output.as_deref()),
        Some(Commands::Mapping) => cmd_mapping(),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_bake(args: &BakeArgs, log: &dyn LogSink) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_lookup(|key| args.lookup(key))?;

    let summary = run(&config, log)?;

    if let Some(ref path) = args.summary {
        let json = serde_json::to_string_pretty(&summary)?;
        fs::write(path, json)?;
    }

    Ok(())
}

fn cmd_parse(
    input: &Path,
    delimiter: &str,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing CSV: {}", input.display());

    let delimiter: Delimiter = delimiter.parse()?;
    let table = parse_csv_file(input, delimiter)?;

    eprintln!("   Encoding: {}", table.encoding);
    eprintln!("   Delimiter: '{}'", format_delimiter(table.delimiter));
    eprintln!("   Columns: {}", table.headers.join(", "));
    eprintln!("✅ Parsed {} rows", table.rows.len());

    let json = serde_json::to_string_pretty(&table.to_json())?;
    write_output(&json, output)
}

fn cmd_mapping() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", mapping_description());
    Ok(())
}

fn format_delimiter(d: u8) -> String {
    match d {
        b'\t' => "\\t".to_string(),
        c => (c as char).to_string(),
    }
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
