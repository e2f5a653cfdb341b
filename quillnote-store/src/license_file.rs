//! Sealed license-key and activation-timestamp files.

use crate::error::StoreResult;
use chrono::{DateTime, Utc};
use quillnote_crypto::{decrypt_string, derive_file_key, encrypt_string, FileKey};
use std::path::{Path, PathBuf};
use tracing::warn;

/// File name of the sealed license key.
const LICENSE_FILE: &str = "license.dat";

/// File name of the sealed activation timestamp.
const ACTIVATION_FILE: &str = "activation.dat";

/// Fixed passphrase the file key is derived from. Shipping it in the
/// binary is the documented weakness of this layer; see
/// `quillnote-crypto`.
const FILE_PASSPHRASE: &str = "Quillnote_2024";

/// Stores the license key and activation timestamp as sealed files in
/// the application data directory.
pub struct LicenseFileStore {
    dir: PathBuf,
    key: FileKey,
}

impl LicenseFileStore {
    /// Creates a license store rooted at the given directory.
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            key: derive_file_key(FILE_PASSPHRASE),
        }
    }

    /// Loads the stored license key, or `None` if missing or unopenable.
    ///
    /// The caller revalidates the key on every access; this only
    /// retrieves the string.
    #[must_use]
    pub fn load_key(&self) -> Option<String> {
        let sealed = std::fs::read_to_string(self.dir.join(LICENSE_FILE)).ok()?;
        decrypt_string(&self.key, &sealed).ok()
    }

    /// Seals and stores a license key, stamping the activation time.
    ///
    /// Returns false if the key could not be persisted; the caller
    /// surfaces that to the user rather than erroring.
    pub fn save_key(&self, license_key: &str) -> bool {
        match self.write_sealed(LICENSE_FILE, license_key) {
            Ok(()) => {
                // The activation stamp is best-effort: a licensed user
                // without a recorded date is still licensed.
                let now = Utc::now().timestamp().to_string();
                if let Err(e) = self.write_sealed(ACTIVATION_FILE, &now) {
                    warn!("activation stamp write failed: {e}");
                }
                true
            }
            Err(e) => {
                warn!("license key write failed: {e}");
                false
            }
        }
    }

    /// Loads the activation timestamp, or `None` if missing/unopenable.
    #[must_use]
    pub fn activation_time(&self) -> Option<DateTime<Utc>> {
        let sealed = std::fs::read_to_string(self.dir.join(ACTIVATION_FILE)).ok()?;
        let secs: i64 = decrypt_string(&self.key, &sealed).ok()?.parse().ok()?;
        DateTime::from_timestamp(secs, 0)
    }

    fn write_sealed(&self, file_name: &str, plaintext: &str) -> StoreResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        let sealed = encrypt_string(&self.key, plaintext)?;
        std::fs::write(self.dir.join(file_name), sealed)?;
        Ok(())
    }
}
