//! Operating-system glue: the external URL dispatcher and the engine user agent.

use std::process::Command;

use echoes_platform::UrlDispatcher;
use echoes_types::error::{EchoesError, Result};
use url::Url;

/// Schemes that only mean something inside the page. Never handed to the OS.
const PAGE_LOCAL_SCHEMES: &[&str] = &["about", "blob", "data", "javascript"];

/// Hands non-web URLs to the desktop's registered handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopDispatcher;

impl UrlDispatcher for DesktopDispatcher {
    fn dispatch(&self, url: &str) -> Result<()> {
        let mut cmd = opener_command(url)?;
        let mut child = cmd
            .spawn()
            .map_err(|e| EchoesError::Dispatch(format!("no handler for {url}: {e}")))?;

        // Reap the opener without blocking the event loop.
        let target = url.to_string();
        std::thread::Builder::new()
            .name("echoes-opener".into())
            .spawn(move || match child.wait() {
                Ok(status) if !status.success() => {
                    log::warn!("opener exited with {status} for {target}");
                },
                Ok(_) => {},
                Err(e) => log::warn!("opener wait failed for {target}: {e}"),
            })
            .map_err(EchoesError::Io)?;
        Ok(())
    }
}

/// Normalize a page-supplied URL for the OS opener.
///
/// The result is the parsed serialization, so it carries no whitespace,
/// quotes or control characters, and its scheme is not page-local.
pub fn dispatchable_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url)?;
    if PAGE_LOCAL_SCHEMES.contains(&parsed.scheme()) {
        return Err(EchoesError::Dispatch(format!(
            "{}: URLs stay with the page",
            parsed.scheme()
        )));
    }
    let serialized = String::from(parsed);
    if serialized
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || c == '"')
    {
        return Err(EchoesError::Dispatch(format!("refusing to open {serialized:?}")));
    }
    Ok(serialized)
}

/// Command that opens `url` with the platform handler.
///
/// The URL is always a single argument to a non-shell program.
pub fn opener_command(url: &str) -> Result<Command> {
    let url = dispatchable_url(url)?;

    #[cfg(target_os = "windows")]
    let cmd = {
        let mut cmd = Command::new("rundll32.exe");
        cmd.arg("url.dll,FileProtocolHandler").arg(url);
        cmd
    };
    #[cfg(target_os = "macos")]
    let cmd = {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    };
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let cmd = {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    };
    Ok(cmd)
}

/// Blank document that reports the engine's own user agent over IPC.
pub const USER_AGENT_REPORT_HTML: &str =
    "<!doctype html><script>window.ipc.postMessage(navigator.userAgent);</script>";

/// Longest user agent accepted from the engine.
const MAX_USER_AGENT_LEN: usize = 512;

/// Validate the user agent string reported by [`USER_AGENT_REPORT_HTML`].
pub fn engine_user_agent(reported: &str) -> Option<&str> {
    let ua = reported.trim();
    let usable = !ua.is_empty()
        && ua.len() <= MAX_USER_AGENT_LEN
        && !ua.chars().any(char::is_control);
    usable.then_some(ua)
}
