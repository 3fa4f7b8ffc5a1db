use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use farmcopilot::core::config;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(
    name = "farmcopilot",
    about = "Chat with your farm documents from the terminal"
)]
struct Args {
    /// Backend origin (overrides FARMCOPILOT_BACKEND_URL and the config file)
    #[arg(short, long)]
    backend_url: Option<String>,

    /// PDF to upload as soon as the app starts
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Log verbosity written to farmcopilot.log (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<LevelFilter>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to farmcopilot.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("farmcopilot.log") {
        let level = args.log_level.unwrap_or(LevelFilter::Debug);
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("Warning: {e}, using defaults");
        log::warn!("Config load failed: {e}");
        config::FarmConfig::default()
    });
    let resolved = config::resolve(&file_config, args.backend_url.as_deref());

    log::info!("FarmCopilot starting up against {}", resolved.backend_url);

    farmcopilot::tui::run(resolved, args.file)
}
