//! Optional public exposure via a cloudflared quick tunnel
//!
//! External collaborator: every failure here ends in a log line and never
//! prevents the local server from starting.

use anyhow::{anyhow, bail, Context, Result};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

const TUNNEL_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ATTEMPTS: u32 = 3;

/// Try to expose the local port and announce the public URL, rewritten to
/// the WebSocket scheme.
pub async fn announce(port: u16) {
    match try_start_tunnel(port, MAX_ATTEMPTS).await {
        Ok(url) => {
            let url = url.replace("https://", "wss://");
            tracing::info!(
                "🌐 Starting streaming server at public url {}{}",
                url,
                super::routes::STREAM_PATH
            );
        }
        Err(e) => tracing::warn!("public tunnel unavailable: {e:#}"),
    }
}

async fn try_start_tunnel(port: u16, max_attempts: u32) -> Result<String> {
    let mut last_err = None;
    for attempt in 1..=max_attempts {
        match start_tunnel(port).await {
            Ok(url) => return Ok(url),
            Err(e) => {
                tracing::warn!("tunnel attempt {attempt}/{max_attempts} failed: {e:#}");
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| anyhow!("tunnel never started")))
}

async fn start_tunnel(port: u16) -> Result<String> {
    let mut child = Command::new("cloudflared")
        .args(["tunnel", "--url", &format!("http://127.0.0.1:{port}")])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .context("spawning cloudflared")?;

    let stderr = child
        .stderr
        .take()
        .context("cloudflared stderr not captured")?;

    // cloudflared reports the assigned hostname on stderr; the child is
    // left running once the URL is known.
    let mut lines = BufReader::new(stderr).lines();
    let url = tokio::time::timeout(TUNNEL_TIMEOUT, async {
        while let Some(line) = lines.next_line().await? {
            if let Some(url) = extract_tunnel_url(&line) {
                return Ok(url);
            }
        }
        bail!("cloudflared exited without reporting a tunnel url")
    })
    .await
    .context("timed out waiting for tunnel url")??;

    // Keep the pipe drained so the tunnel never blocks on a full buffer.
    tokio::spawn(async move { while let Ok(Some(_)) = lines.next_line().await {} });

    Ok(url)
}

fn extract_tunnel_url(line: &str) -> Option<String> {
    line.split_whitespace()
        .find(|token| token.starts_with("https://") && token.contains(".trycloudflare.com"))
        .map(|token| token.to_string())
}
