//! Persistence of the last submitted profile.
//!
//! The profile is what a recalculation starts from, so it is written
//! atomically: temp file in the same directory, fsync, rename.

use crate::{Error, LifestyleProfile, Result};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

impl LifestyleProfile {
    /// Load a stored profile with shared locking
    ///
    /// Returns `None` if the file doesn't exist. A corrupted file is logged
    /// and also treated as absent, so the user is asked again.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            tracing::debug!("No stored profile at {:?}", path);
            return Ok(None);
        }

        let file = File::open(path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;
        read?;

        match serde_json::from_str::<LifestyleProfile>(&contents) {
            Ok(profile) => {
                tracing::debug!("Loaded profile from {:?}", path);
                Ok(Some(profile))
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse stored profile {:?}: {}. Ignoring it.",
                    path,
                    e
                );
                Ok(None)
            }
        }
    }

    /// Save the profile atomically with exclusive locking
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = path.parent().ok_or_else(|| {
            Error::Other(format!("profile path {:?} has no parent directory", path))
        })?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, self)?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved profile to {:?}", path);
        Ok(())
    }
}
