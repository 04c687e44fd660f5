//! Wireless network queries and control through `nmcli`.

use serde::Serialize;
use tracing::debug;

use crate::exec::{run_checked, run_output};
use crate::OsResult;

/// A connection nmcli has a stored profile for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnownConnection {
    pub ssid: String,
    pub uuid: String,
}

/// One scanned network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Network {
    pub ssid: String,
    pub security: String,
    /// Signal strength as nmcli's bar gauge, e.g. `▂▄▆_`.
    pub signal: String,
    pub channel: String,
}

/// The network the device is connected to right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentNetwork {
    pub ssid: String,
    pub channel: String,
}

/// Profiles of networks we have been connected to previously.
pub async fn known_connections() -> OsResult<Vec<KnownConnection>> {
    let output = run_output("nmcli", &["con", "show"]).await?;
    Ok(parse_known_connections(&output))
}

/// Whether the wifi radio is enabled.
pub async fn connected() -> OsResult<bool> {
    let output = run_output("nmcli", &["-f", "WIFI", "g"]).await?;
    Ok(output.contains("enabled"))
}

/// The currently active network, if any.
pub async fn current() -> OsResult<Option<CurrentNetwork>> {
    let output = run_output("nmcli", &["-t", "-f", "active,ssid,chan", "dev", "wifi"]).await?;
    Ok(parse_current(&output))
}

/// All scanned networks with security, signal and channel info.
pub async fn list() -> OsResult<Vec<Network>> {
    let output = run_output(
        "nmcli",
        &["--fields", "SSID,SECURITY,BARS,CHAN", "dev", "wifi", "list"],
    )
    .await?;
    Ok(parse_list(&output))
}

/// Connect to a network, with a password when it needs one.
pub async fn connect(ssid: &str, password: Option<&str>) -> OsResult<()> {
    debug!(ssid, "connecting to network");

    let mut args = vec!["dev", "wifi", "con", ssid];
    if let Some(password) = password {
        args.push("password");
        args.push(password);
    }

    run_checked("nmcli", &args).await
}

/// Turn the wifi card on.
pub async fn on() -> OsResult<()> {
    run_checked("nmcli", &["radio", "wifi", "on"]).await
}

/// Turn the wifi card off.
pub async fn off() -> OsResult<()> {
    run_checked("nmcli", &["radio", "wifi", "off"]).await
}

fn parse_known_connections(output: &str) -> Vec<KnownConnection> {
    // First line is column headers: NAME UUID TYPE DEVICE
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            Some(KnownConnection {
                ssid: fields.next()?.to_string(),
                uuid: fields.next()?.to_string(),
            })
        })
        .collect()
}

fn parse_current(output: &str) -> Option<CurrentNetwork> {
    output.lines().find_map(|line| {
        let mut fields = line.splitn(3, ':');
        let active = fields.next()?;
        let ssid = fields.next()?;
        let channel = fields.next()?.trim_end();

        (active == "yes").then(|| CurrentNetwork {
            ssid: ssid.to_string(),
            channel: channel.to_string(),
        })
    })
}

fn parse_list(output: &str) -> Vec<Network> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            Some(Network {
                ssid: fields.next()?.to_string(),
                security: fields.next()?.to_string(),
                signal: fields.next()?.to_string(),
                channel: fields.next()?.to_string(),
            })
        })
        .collect()
}
