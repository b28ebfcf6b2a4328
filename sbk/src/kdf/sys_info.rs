//! # System Memory Measurements
//!
//! Calibration wants to know how much memory Argon2 may claim. Probing
//! that properly is slow and belongs to the front-ends; the core keeps
//! only a best-effort JSON cache of the last measurement at
//! `$XDG_CONFIG_HOME/sbk/sys_info_measurements.json` and a crude
//! `/proc/meminfo` fallback for machines that have never been measured.
//!
//! The cache is written atomically (temp file in the same directory, then
//! rename) so a crash mid-write leaves either the old file or the new
//! one, never half of each. Every failure here is non-fatal: no cache
//! just means a conservative default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config;

/// The persisted measurement, MiB granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SysInfo {
    /// Physical memory of the machine.
    pub total_mb: u64,
    /// Memory the KDF may reasonably claim without swapping.
    pub usable_mb: u64,
}

fn cache_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(config::APP_DIR_NAME).join(config::SYS_INFO_FILENAME))
}

/// Read the cached measurement, if any. Parse failures are logged and
/// treated as a missing cache.
pub fn load_cached() -> Option<SysInfo> {
    let path = cache_path()?;
    load_from(&path)
}

fn load_from(path: &Path) -> Option<SysInfo> {
    let raw = fs::read_to_string(path).ok()?;
    match serde_json::from_str::<SysInfo>(&raw) {
        Ok(info) => {
            debug!(?path, total_mb = info.total_mb, usable_mb = info.usable_mb, "loaded sys-info cache");
            Some(info)
        }
        Err(e) => {
            warn!(?path, error = %e, "ignoring unparsable sys-info cache");
            None
        }
    }
}

/// Persist a measurement atomically. Callers who don't care whether it
/// worked should use [`store_best_effort`].
pub fn store(info: &SysInfo) -> io::Result<()> {
    let path = cache_path()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no config directory"))?;
    store_to(&path, info)
}

fn store_to(path: &Path, info: &SysInfo) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_string_pretty(info)?)?;
    fs::rename(&tmp, path)
}

/// [`store`], demoted to a log line on failure.
pub fn store_best_effort(info: &SysInfo) {
    if let Err(e) = store(info) {
        warn!(error = %e, "could not persist sys-info cache");
    }
}

/// A measurement taken right now: detected total, half of it usable.
/// Proper usable-memory probing lives in the front-ends; half of
/// physical memory is a defensible floor for a machine that is busy
/// doing other things.
pub fn measure() -> SysInfo {
    let total_mb = detect_total_mb();
    SysInfo {
        total_mb,
        usable_mb: (total_mb / 2).max(1),
    }
}

/// Total physical memory in MiB, from `/proc/meminfo` where available.
pub fn detect_total_mb() -> u64 {
    parse_meminfo_total_kb(&fs::read_to_string("/proc/meminfo").unwrap_or_default())
        .map(|kb| kb / 1024)
        .unwrap_or(config::FALLBACK_TOTAL_MB)
}

fn parse_meminfo_total_kb(meminfo: &str) -> Option<u64> {
    meminfo
        .lines()
        .find(|l| l.starts_with("MemTotal:"))?
        .split_whitespace()
        .nth(1)?
        .parse()
        .ok()
}
