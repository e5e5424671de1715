use chrono::Local;
use clap::Parser;
use colored::Colorize;
use common::{DiscoveryConfig, DiscoveryError, Result};
use env_logger::fmt::Color;
use env_logger::Builder;
use log::{error, info, Level, LevelFilter};
use onvif_probe::{interfaces, presenter, prompt, DiscoverySession};
use std::io::{self, Write};
use std::process::ExitCode;

const BANNER: &str = r#"
╔═══════════════════════════════════════════════════════════════════╗
║                                                                   ║
║    ONVIF Probe v0.1.0                                             ║
║    WS-Discovery scanner for IP cameras                            ║
║                                                                   ║
╚═══════════════════════════════════════════════════════════════════╝
"#;

fn level_color(level: Level) -> Color {
    match level {
        Level::Error => Color::Red,
        Level::Warn => Color::Yellow,
        Level::Info => Color::Green,
        Level::Debug | Level::Trace => Color::Cyan,
    }
}

fn setup_logger() {
    Builder::new()
        .format(|buf, record| {
            let mut dim = buf.style();
            dim.set_color(Color::Rgb(100, 100, 100));
            let mut level = buf.style();
            level.set_color(level_color(record.level())).set_bold(true);

            writeln!(
                buf,
                "{} {:<5} {} {}",
                dim.value(Local::now().format("%H:%M:%S%.3f")),
                level.value(record.level()),
                dim.value(record.target()),
                record.args()
            )
        })
        // Quiet by default so the prompt stays readable; RUST_LOG takes precedence.
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();
}

/// Discovers ONVIF devices on a chosen network interface with a WS-Discovery probe.
#[derive(Parser)]
#[command(name = "onvif-probe", version)]
struct Args {}

async fn run() -> Result<()> {
    let interfaces = interfaces::list_interfaces()?;
    if interfaces.is_empty() {
        println!("No network interfaces found.");
        return Err(DiscoveryError::InterfaceEnumeration(
            "no network interfaces found".to_string(),
        ));
    }

    let stdin = io::stdin();
    let selected = prompt::select_interface(&interfaces, stdin.lock(), io::stdout())?;

    let config = DiscoveryConfig::default();
    println!(
        "Probing {} for {} seconds...",
        config.multicast_target(),
        config.collection_window.as_secs()
    );

    let mut session = DiscoverySession::new(config);
    let addresses = session.discover(&selected.name).await?;
    info!("Session ended in state {:?}", session.state());

    if let Err(e) = presenter::render(io::stdout(), &addresses) {
        error!("Failed to print results: {}", e);
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    setup_logger();
    let _args = Args::parse();

    println!("{}", BANNER);

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(DiscoveryError::InvalidSelection(selection)) => {
            error!("Invalid selection {}", selection);
            println!("Invalid selection.");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("❌ {}", e);
            println!("{} {}", "Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}
