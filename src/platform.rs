//! Platform services injected at construction.
//!
//! The hosting shell decides what the environment can do before the
//! controller is built and hands it a capability value; the core never
//! probes its environment at runtime.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::info;

pub trait PlatformServices: Send + Sync {
    /// Reveal the given media file in the system file manager.
    fn reveal_in_file_manager(&self, path: &Path) -> Result<()>;
}

/// Desktop implementation shelling out to the native opener.
pub struct DesktopPlatform;

impl PlatformServices for DesktopPlatform {
    fn reveal_in_file_manager(&self, path: &Path) -> Result<()> {
        let target = path.parent().unwrap_or(path);
        info!(path = %target.display(), "opening in file manager");

        #[cfg(target_os = "macos")]
        let mut cmd = {
            let mut c = Command::new("open");
            c.arg(target);
            c
        };
        #[cfg(target_os = "windows")]
        let mut cmd = {
            let mut c = Command::new("explorer");
            c.arg(target);
            c
        };
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        let mut cmd = {
            let mut c = Command::new("xdg-open");
            c.arg(target);
            c
        };

        cmd.spawn()
            .with_context(|| format!("launching file manager for {}", target.display()))?;
        Ok(())
    }
}

/// No-op implementation for tests and headless environments.
pub struct NullPlatform;

impl PlatformServices for NullPlatform {
    fn reveal_in_file_manager(&self, path: &Path) -> Result<()> {
        info!(path = %path.display(), "file manager not available on this platform");
        Ok(())
    }
}
