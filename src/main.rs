use clap::Parser;
use medichat::core::config::{self, CliOverrides, MedichatConfig, RequestMode};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "medichat", about = "Terminal client for a medical chatbot API")]
struct Args {
    /// Base URL of the chatbot API (default: http://localhost:8000)
    #[arg(long)]
    base_url: Option<String>,

    /// What each chat request carries: the whole conversation or only the latest question
    #[arg(long, value_enum)]
    request_mode: Option<RequestMode>,

    /// Skip fetching the tool list during the connection check
    #[arg(long)]
    no_tools: bool,
}

/// Route `log` output to a file at `path`. Stdout belongs to the TUI.
fn init_logging(path: &str) -> Result<(), String> {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let log_file = File::create(path).map_err(|e| format!("cannot create {path}: {e}"))?;
    WriteLogger::init(LevelFilter::Debug, log_config, log_file).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to medichat.log in current directory
    if let Err(e) = init_logging("medichat.log") {
        eprintln!("medichat: logging disabled: {e}");
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Failed to load config, using defaults: {}", e);
        MedichatConfig::default()
    });

    let cli = CliOverrides {
        base_url: args.base_url,
        request_mode: args.request_mode,
        no_tools: args.no_tools,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "medichat starting up (api: {}, mode: {:?})",
        resolved.base_url,
        resolved.request_mode
    );

    medichat::tui::run(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_reports_unwritable_path() {
        let err = init_logging("/nonexistent-dir/medichat.log").unwrap_err();
        assert!(err.contains("/nonexistent-dir/medichat.log"));
    }
}
