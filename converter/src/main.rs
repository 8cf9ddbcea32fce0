//! oncotree2json CLI - Convert an OncoTree tumor type table to JSON
//!
//! ```bash
//! oncotree2json tumor_types.txt                         # simple format, pretty, stdout
//! oncotree2json tumor_types.txt --format object         # annotated nodes
//! oncotree2json tumor_types.txt -o tree.json --validate # compact file, schema-checked
//! ```

use clap::Parser;
use oncotree2json::logs::{log_error, log_info, log_success, LOGGER};
use oncotree2json::{convert_file, write_output, ConvertOptions, OutputFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oncotree2json")]
#[command(about = "Convert OncoTree file to JSON.", long_about = None)]
struct Cli {
    /// Path to the input oncotree file
    input_file: PathBuf,

    /// Path to the output file (default: pretty JSON on stdout)
    #[arg(short, long, alias = "output_file")]
    output_file: Option<PathBuf>,

    /// Format for the output file (simple json or object json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Simple)]
    format: OutputFormat,

    /// Input field separator
    #[arg(short, long, default_value = "\t", hide_default_value = true)]
    delimiter: char,

    /// Check the output against its JSON schema before writing
    #[arg(long)]
    validate: bool,

    /// Suppress progress output on stderr
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    if cli.quiet {
        LOGGER.set_quiet(true);
    }

    if let Err(e) = run(&cli) {
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    log_info(format!("Converting: {}", cli.input_file.display()));
    log_info(format!("Delimiter: '{}'", format_delimiter(cli.delimiter)));

    let options = ConvertOptions {
        format: cli.format,
        delimiter: cli.delimiter,
        validate: cli.validate,
    };

    let conversion = convert_file(&cli.input_file, &options)?;
    write_output(&conversion.hierarchy, cli.output_file.as_deref())?;

    log_success(format!("Done: {} format", conversion.hierarchy.format()));
    Ok(())
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}
