use std::process::{Command, Stdio};

use anyhow::{Context, Result, anyhow};
use tracing::info;

/// Hands the clip URL to the platform's default opener. Does not wait for the player.
pub fn open_video(url: Option<&str>) -> Result<()> {
    let url = url
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| anyhow!("goal has no clip"))?;
    let mut cmd = opener_command(url);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    cmd.spawn()
        .with_context(|| format!("launch player for {url}"))?;
    info!(%url, "opened clip");
    Ok(())
}

fn opener_command(url: &str) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", url]);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_clip_is_an_error() {
        assert!(open_video(None).is_err());
        assert!(open_video(Some("  ")).is_err());
    }
}
