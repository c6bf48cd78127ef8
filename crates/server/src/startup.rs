//! Listener discovery and browser launch.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::{bail, Result};
use tokio::net::TcpListener;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Bind the first free port in `[start, start + range)` on `host`.
pub async fn bind_first_available(host: IpAddr, start: u16, range: u16) -> Result<TcpListener> {
    let end = (start as u32 + range as u32).min(u16::MAX as u32 + 1);

    for port in start as u32..end {
        let addr = SocketAddr::new(host, port as u16);
        match TcpListener::bind(addr).await {
            Ok(listener) => return Ok(listener),
            Err(e) => debug!("Port {} unavailable: {}", port, e),
        }
    }

    bail!(
        "Could not find an available port between {} and {}. Please free up some ports and try again.",
        start,
        end - 1
    )
}

/// Open `url` in the default browser after `delay`. Failures are only logged.
pub async fn open_browser_after(url: String, delay: Duration) {
    tokio::time::sleep(delay).await;

    match browser_command(&url).spawn() {
        Ok(_) => info!("Opened browser at {}", url),
        Err(e) => warn!("Could not open browser at {}: {}", url, e),
    }
}

#[cfg(target_os = "macos")]
fn browser_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "windows")]
fn browser_command(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "", url]);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn browser_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}
