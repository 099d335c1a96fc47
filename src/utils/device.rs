//! Stable per-install device id.

use super::persistence::data_path;
use std::fs;
use std::io;

const DEVICE_FILE: &str = "device_id";

pub fn new_device_id() -> String {
    format!("term_{}", uuid::Uuid::new_v4())
}

pub fn is_device_id(id: &str) -> bool {
    id.strip_prefix("term_")
        .map_or(false, |rest| uuid::Uuid::parse_str(rest).is_ok())
}

/// Reads the device id from ~/.gofish/, creating it on first run.
pub fn load_or_create_device_id() -> io::Result<String> {
    let path = data_path(DEVICE_FILE)?;
    if let Ok(existing) = fs::read_to_string(&path) {
        let existing = existing.trim();
        if is_device_id(existing) {
            return Ok(existing.to_string());
        }
        log::warn!("replacing malformed device id");
    }
    let id = new_device_id();
    fs::write(&path, &id)?;
    log::info!("created device id {}", id);
    Ok(id)
}
