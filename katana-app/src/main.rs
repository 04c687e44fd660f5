//! `katana` - desktop utility toolbox.
//!
//! Thin dispatch over the library crates; each subcommand maps onto one
//! wrapper module, and the wifi menu shows the picker orchestration end
//! to end.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = Config::load()?;

    match args.first().map(String::as_str) {
        Some("volume") => commands::volume(&args[1..]).await,
        Some("mic") => commands::mic(&args[1..]).await,
        Some("brightness") => commands::brightness(&args[1..]).await,
        Some("wifi") => commands::wifi(&args[1..], &config).await,
        Some("screenshot") => commands::screenshot(&args[1..], &config).await,
        Some("updates") => commands::updates().await,
        Some("power") => commands::power(&args[1..]).await,
        Some("clip") => commands::clip(&args[1..]).await,
        Some("logs") => commands::logs(&args[1..]).await,
        Some(other) => {
            eprintln!("unknown command: {other}");
            usage();
            std::process::exit(2);
        }
        None => {
            usage();
            Ok(())
        }
    }
}

fn usage() {
    println!("usage: katana <command> [args]");
    println!();
    println!("commands:");
    println!("  volume      [get|up|down|set N|mute|unmute|toggle]");
    println!("  mic         [get|up|down|toggle]");
    println!("  brightness  [get|up|down]");
    println!("  wifi        [menu|on|off|list|current]");
    println!("  screenshot  [delay-seconds]");
    println!("  updates");
    println!("  power       off|reboot|suspend|lock|logout");
    println!("  clip        [get|clear|add TEXT]");
    println!("  logs        [show|add PIECES..|clear]");
}
