mod commands;
mod exit_code;

use clap::{Parser, Subcommand};
use colored::Colorize;
use exit_code::ExitCode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mapper")]
#[command(about = "MyBatis mapper completion and checks", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to mapper config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Force colored output even when not a TTY
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true, conflicts_with = "color")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Complete the parameter path at a position in a mapper file
    Complete {
        /// Mapper XML file
        file: PathBuf,

        /// Line number (1-based)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        line: u32,

        /// Column (1-based, in bytes)
        #[arg(short = 'C', long, value_parser = clap::value_parser!(u32).range(1..))]
        character: u32,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Report `resultMap` references that resolve nowhere
    ///
    /// Exits with status 1 when any are found, which makes it usable as a CI
    /// gate.
    Check {
        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Substitute logged parameter values into a prepared SQL statement
    Format {
        /// The prepared statement, e.g. `SELECT * FROM t WHERE id = ?`
        #[arg(long, value_name = "TEMPLATE")]
        sql: String,

        /// The logged parameters line, e.g. `1(Integer), tom(String)`
        #[arg(long, value_name = "LINE")]
        parameters: String,
    },

    /// Find where a result map id is defined, as seen from a mapper file
    Resolve {
        /// Mapper XML file the id is referenced from
        file: PathBuf,

        /// Result map id
        id: String,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON output for tooling
    Json,
}

fn main() {
    let cli = Cli::parse();

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    let result = match cli.command {
        Commands::Complete {
            file,
            line,
            character,
            format,
        } => commands::complete::run(cli.config, &file, line, character, format),
        Commands::Check { format } => commands::check::run(cli.config, format),
        Commands::Format { sql, parameters } => Ok(commands::format::run(&sql, &parameters)),
        Commands::Resolve { file, id } => commands::resolve::run(cli.config, &file, &id),
    };

    match result {
        Ok(code) => code.exit(),
        Err(e) => {
            let code = ExitCode::from_error(&e);
            tracing::debug!(exit_code = code.code(), reason = %code, "Command failed");
            eprintln!("{} {e:#}", "✗".red());
            code.exit();
        }
    }
}

/// Initialize tracing to stderr, filtered by `RUST_LOG` (off by default).
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Configure colored output based on flags and environment variables.
///
/// Priority order (highest to lowest):
/// 1. `--color` flag (force colors on)
/// 2. `--no-color` flag (force colors off)
/// 3. `NO_COLOR` environment variable (if set to any value, disable colors)
/// 4. `CLICOLOR_FORCE` environment variable (if set to non-zero, force colors)
/// 5. `CLICOLOR` environment variable (if set to "0", disable colors)
/// 6. Default: colors enabled if stdout is a TTY (handled by `colored` crate)
///
/// See: <https://no-color.org/> and <https://bixense.com/clicolors/>
fn configure_colors(force_color: bool, no_color: bool) {
    use colored::control;

    if force_color {
        control::set_override(true);
    } else if no_color || std::env::var_os("NO_COLOR").is_some() {
        control::set_override(false);
    } else if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
        if !val.is_empty() && val != "0" {
            control::set_override(true);
        }
    } else if std::env::var("CLICOLOR").is_ok_and(|val| val == "0") {
        control::set_override(false);
    }
}
