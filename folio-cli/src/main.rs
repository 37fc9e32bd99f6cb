use std::path::PathBuf;

use clap::Parser;

use folio_core::error::FolioError;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "folio",
    version,
    about = "Browse and administer a data-visualization portfolio"
)]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,

    /// Site directory holding `.folio/` (default: current directory)
    #[arg(long, global = true, default_value = ".", env = "FOLIO_DIR")]
    dir: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Classify an error into an exit code.
///
/// Exit codes:
///   0  success
///   1  general/unknown error
///   2  configuration error
///   3  site not initialized / project not found
///   4  storage error
///   5  authentication error (bad credentials, not logged in)
fn classify_exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(folio) = cause.downcast_ref::<FolioError>() {
            return match folio {
                FolioError::Config(_) => 2,
                FolioError::Store(folio_core::error::StoreError::NotFound(_)) => 3,
                FolioError::Storage(_) => 4,
                FolioError::Session(_) => 5,
                FolioError::Store(_) | FolioError::Validation(_) => 1,
            };
        }
    }

    let lower = format!("{err:#}").to_lowercase();
    if lower.contains("not initialized") || lower.contains("cannot resolve path") {
        3
    } else if lower.contains("config") {
        2
    } else if lower.contains("database") || lower.contains("sqlite") {
        4
    } else {
        1
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let filter = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (_, 0) => "warn",
        (_, 1) => "info",
        (_, 2) => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: Failed to create runtime: {e}");
            std::process::exit(1);
        }
    };

    match runtime.block_on(commands::run(cli.command, &cli.dir)) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(classify_exit_code(&e));
        }
    }
}
