use crate::core::constants::SAVE_VERSION_MAGIC;
use crate::core::game_state::Profile;
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const HEADER_LEN: usize = 8 + 4;
const CHECKSUM_LEN: usize = 32;

/// Manages saving and loading the profile with a checksummed binary format
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Creates a new SaveManager instance
    ///
    /// The save lives in the platform config directory from the
    /// `directories` crate.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "gofish").ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            )
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self {
            save_path: config_dir.join("profile.dat"),
        })
    }

    /// Uses an explicit file, creating its parent directory.
    pub fn with_path(save_path: PathBuf) -> io::Result<Self> {
        if let Some(parent) = save_path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { save_path })
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    /// Saves the profile to disk with checksum verification
    ///
    /// File format:
    /// - Version magic (8 bytes)
    /// - Data length (4 bytes)
    /// - Serialized profile (variable length)
    /// - SHA256 checksum (32 bytes)
    pub fn save(&self, profile: &Profile) -> io::Result<()> {
        let bytes = encode_profile(profile)?;
        // Write beside the old save, then swap it in
        let tmp = self.save_path.with_extension("dat.tmp");
        let mut file = fs::File::create(&tmp)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        fs::rename(&tmp, &self.save_path)?;
        log::debug!("saved profile ({} bytes)", bytes.len());
        Ok(())
    }

    /// Loads the profile from disk with checksum verification
    ///
    /// Returns an error if:
    /// - The file doesn't exist
    /// - The version magic is incorrect
    /// - The checksum verification fails
    /// - The data cannot be deserialized
    pub fn load(&self) -> io::Result<Profile> {
        let bytes = fs::read(&self.save_path)?;
        decode_profile(&bytes)
    }

    /// Checks if a save file exists
    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    pub fn delete(&self) -> io::Result<()> {
        match fs::remove_file(&self.save_path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

fn checksum(version: &[u8], length: &[u8], data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(version);
    hasher.update(length);
    hasher.update(data);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&hasher.finalize());
    out
}

pub fn encode_profile(profile: &Profile) -> io::Result<Vec<u8>> {
    let data =
        bincode::serialize(profile).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let data_len = u32::try_from(data.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "Profile too large"))?;

    let version = SAVE_VERSION_MAGIC.to_le_bytes();
    let length = data_len.to_le_bytes();
    let sum = checksum(&version, &length, &data);

    let mut bytes = Vec::with_capacity(HEADER_LEN + data.len() + CHECKSUM_LEN);
    bytes.extend_from_slice(&version);
    bytes.extend_from_slice(&length);
    bytes.extend_from_slice(&data);
    bytes.extend_from_slice(&sum);
    Ok(bytes)
}

pub fn decode_profile(bytes: &[u8]) -> io::Result<Profile> {
    let truncated = || io::Error::new(io::ErrorKind::UnexpectedEof, "Save file truncated");
    if bytes.len() < HEADER_LEN {
        return Err(truncated());
    }

    let (version_bytes, rest) = bytes.split_at(8);
    let mut magic = [0u8; 8];
    magic.copy_from_slice(version_bytes);
    let version = u64::from_le_bytes(magic);
    if version != SAVE_VERSION_MAGIC {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Invalid save version: expected 0x{:016X}, got 0x{:016X}",
                SAVE_VERSION_MAGIC, version
            ),
        ));
    }

    let (length_bytes, rest) = rest.split_at(4);
    let mut len = [0u8; 4];
    len.copy_from_slice(length_bytes);
    let data_len = u32::from_le_bytes(len) as usize;
    if rest.len() < data_len + CHECKSUM_LEN {
        return Err(truncated());
    }

    let (data, rest) = rest.split_at(data_len);
    let stored = &rest[..CHECKSUM_LEN];
    if stored != checksum(version_bytes, length_bytes, data) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "Checksum verification failed",
        ));
    }

    bincode::deserialize(data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Writes a human-readable copy of the profile.
pub fn export_json(profile: &Profile, path: &Path) -> io::Result<()> {
    let json = serde_json::to_string_pretty(profile)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}

pub fn import_json(path: &Path) -> io::Result<Profile> {
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
