use clap::Parser;
use moment::Provider;
use moment::core::config::{self, CliOverrides};
use moment::core::theme::Theme;
use moment::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(
    name = "moment",
    about = "Moment AI: a human-like decision engine for the current moment"
)]
struct Args {
    /// LLM provider to use (overrides config file and MOMENT_PROVIDER)
    #[arg(short, long, value_enum)]
    provider: Option<Provider>,

    /// Model name (overrides config file and MOMENT_MODEL)
    #[arg(short, long)]
    model: Option<String>,

    /// Start in light mode
    #[arg(long)]
    light: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // File logger: the terminal belongs to the TUI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("moment.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let cli = CliOverrides {
        provider: args.provider,
        model: args.model,
        theme: args.light.then_some(Theme::Light),
    };

    // Configuration problems end the process before the terminal is taken over
    let resolved = match config::load_config().and_then(|file| config::resolve(&file, &cli)) {
        Ok(resolved) => resolved,
        Err(e) => {
            log::error!("Startup failed: {}", e);
            eprintln!("moment: {e}");
            std::process::exit(1);
        }
    };

    let provider = match tui::build_provider(&resolved) {
        Ok(provider) => provider,
        Err(e) => {
            log::error!("Could not build provider: {}", e);
            eprintln!("moment: {e}");
            std::process::exit(1);
        }
    };

    log::info!(
        "Moment starting up with provider: {:?}, model: {}",
        resolved.provider,
        resolved.model_name
    );

    tui::run(resolved, provider)
}
