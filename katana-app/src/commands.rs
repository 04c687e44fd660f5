use std::time::Duration;

use anyhow::{bail, Result};
use katana_logs::{DunstLog, LogFile};
use katana_menu::{LineStatus, Menu, MenuConfig, MenuKind};
use katana_tools::notify::{Notification, Urgency};
use katana_tools::{audio, backlight, clipboard, machine, microphone, system, wifi, ToggleState};
use tracing::info;

use crate::config::Config;

const VOLUME_NOTIFICATION_ID: u32 = 2593;
const WIFI_NOTIFICATION_ID: u32 = 2594;

pub async fn volume(args: &[String]) -> Result<()> {
    match args.first().map(String::as_str) {
        None | Some("get") => {
            println!("{}%", audio::current_volume().await?);
        }
        Some("up") => {
            audio::raise(amount(args.get(1))?).await?;
            notify_volume().await?;
        }
        Some("down") => {
            audio::lower(amount(args.get(1))?).await?;
            notify_volume().await?;
        }
        Some("set") => {
            audio::set_volume(amount(args.get(1))?).await?;
            notify_volume().await?;
        }
        Some("mute") => audio::toggle(Some(ToggleState::Off)).await?,
        Some("unmute") => audio::toggle(Some(ToggleState::On)).await?,
        Some("toggle") => audio::toggle(None).await?,
        Some(other) => bail!("unknown volume action: {other}"),
    }
    Ok(())
}

pub async fn mic(args: &[String]) -> Result<()> {
    match args.first().map(String::as_str) {
        None | Some("get") => println!("{}%", microphone::current_volume().await?),
        Some("up") => microphone::raise(amount(args.get(1))?).await?,
        Some("down") => microphone::lower(amount(args.get(1))?).await?,
        Some("toggle") => microphone::toggle(None).await?,
        Some(other) => bail!("unknown mic action: {other}"),
    }
    Ok(())
}

pub async fn brightness(args: &[String]) -> Result<()> {
    match args.first().map(String::as_str) {
        None | Some("get") => println!("{:.0}%", backlight::screen_level().await?),
        Some("up") => backlight::raise(amount(args.get(1))?).await?,
        Some("down") => backlight::lower(amount(args.get(1))?).await?,
        Some(other) => bail!("unknown brightness action: {other}"),
    }
    Ok(())
}

pub async fn wifi(args: &[String], config: &Config) -> Result<()> {
    match args.first().map(String::as_str) {
        None | Some("menu") => wifi_menu(config).await?,
        Some("on") => wifi::on().await?,
        Some("off") => wifi::off().await?,
        Some("list") => {
            for network in wifi::list().await? {
                println!("{}\t{}\t{}", network.ssid, network.security, network.signal);
            }
        }
        Some("current") => match wifi::current().await? {
            Some(network) => println!("{} (channel {})", network.ssid, network.channel),
            None => println!("not connected"),
        },
        Some(other) => bail!("unknown wifi action: {other}"),
    }
    Ok(())
}

/// Menu-driven network switcher: a loading placeholder goes up first
/// because the scan takes a second or two, then the real list replaces it.
async fn wifi_menu(config: &Config) -> Result<()> {
    let settings = config.menu_settings();

    let placeholder = Menu::new(
        themed(MenuConfig::new(MenuKind::Custom), config).with_prompt("Networks"),
        settings.clone(),
    );
    placeholder.loading(true).await?;

    let networks = wifi::list().await?;
    let current = wifi::current().await?;
    placeholder.destroy().await;

    let mut menu_config = themed(MenuConfig::new(MenuKind::Custom), config)
        .with_prompt("Networks")
        .case_insensitive();
    for network in &networks {
        let connected = current
            .as_ref()
            .map(|c| c.ssid == network.ssid)
            .unwrap_or(false);
        let status = connected.then_some(LineStatus::Active);
        menu_config = menu_config.add_line(
            format!("{}  {}  {}", network.ssid, network.security, network.signal),
            status,
        );
    }

    let menu = Menu::new(menu_config, settings);
    let choice = menu.show().await?.value().await?;
    menu.destroy().await;

    let Some(ssid) = choice.split_whitespace().next() else {
        // Escape, nothing to do.
        return Ok(());
    };

    info!(ssid, "connecting");
    wifi::connect(ssid, None).await?;
    Notification::new(WIFI_NOTIFICATION_ID)
        .appname("Wifi")
        .summary(format!("Connecting to {ssid}"))
        .urgency(Urgency::Low)
        .send()
        .await?;

    Ok(())
}

pub async fn screenshot(args: &[String], config: &Config) -> Result<()> {
    let delay = args
        .first()
        .map(|raw| raw.parse::<u64>())
        .transpose()
        .map_err(|_| anyhow::anyhow!("delay must be a number of seconds"))?
        .unwrap_or(0);

    let path = system::screenshot(&config.screenshot_dir, Duration::from_secs(delay)).await?;
    println!("{}", path.display());
    Ok(())
}

pub async fn updates() -> Result<()> {
    let updates = system::updates().await?;
    println!("{} updates pending", updates.total());
    for package in updates.pacman.iter().chain(updates.aur.iter()) {
        println!("{package}");
    }
    Ok(())
}

pub async fn power(args: &[String]) -> Result<()> {
    match args.first().map(String::as_str) {
        Some("off") => machine::off().await?,
        Some("reboot") => machine::reboot().await?,
        Some("suspend") => machine::suspend().await?,
        Some("lock") => machine::lock().await?,
        Some("logout") => machine::logout().await?,
        Some(other) => bail!("unknown power action: {other}"),
        None => bail!("power needs an action: off, reboot, suspend, lock or logout"),
    }
    Ok(())
}

pub async fn clip(args: &[String]) -> Result<()> {
    match args.first().map(String::as_str) {
        None | Some("get") => print!("{}", clipboard::get().await?),
        Some("clear") => clipboard::clear().await?,
        Some("add") => clipboard::add(args[1..].join(" ").as_bytes()).await?,
        Some(other) => bail!("unknown clip action: {other}"),
    }
    Ok(())
}

pub async fn logs(args: &[String]) -> Result<()> {
    let log = LogFile::new(DunstLog::new());

    match args.first().map(String::as_str) {
        None | Some("show") => {
            for item in log.all().await? {
                println!("{item}");
            }
        }
        Some("add") => {
            let pieces: Vec<&str> = args[1..].iter().map(String::as_str).collect();
            log.append(&pieces).await?;
        }
        Some("clear") => log.clear().await?,
        Some(other) => bail!("unknown logs action: {other}"),
    }
    Ok(())
}

fn themed(menu_config: MenuConfig, config: &Config) -> MenuConfig {
    match &config.menu_theme {
        Some(theme) => menu_config.with_theme(theme),
        None => menu_config,
    }
}

fn amount(arg: Option<&String>) -> Result<u32> {
    match arg {
        None => Ok(10),
        Some(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("expected a percentage, got {raw:?}")),
    }
}

async fn notify_volume() -> Result<()> {
    let volume = audio::current_volume().await?;
    Notification::new(VOLUME_NOTIFICATION_ID)
        .appname("Volume")
        .summary(format!("{volume}%"))
        .hint(format!("int:value:{volume}"))
        .urgency(Urgency::Low)
        .replace()
        .send()
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn power_rejects_unknown_actions() {
        let err = power(&["hibernate".to_string()]).await.unwrap_err();
        assert!(err.to_string().contains("unknown power action"));
    }

    #[tokio::test]
    async fn power_requires_an_action() {
        assert!(power(&[]).await.is_err());
    }
}
