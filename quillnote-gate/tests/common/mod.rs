//! Shared test helpers for gate tests.

#![allow(dead_code)]

use quillnote_gate::{ProtectionConfig, ProtectionCore};
use quillnote_guard::NoticeSink;
use quillnote_store::{MemoryBackend, StoreBackend};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// A notice sink that records what would have been shown to the user.
#[derive(Default)]
pub struct RecordingNotice {
    notices: Mutex<Vec<(String, String)>>,
}

impl RecordingNotice {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn count(&self) -> usize {
        self.notices.lock().unwrap().len()
    }

    pub fn last_message(&self) -> Option<String> {
        self.notices
            .lock()
            .unwrap()
            .last()
            .map(|(_, message)| message.clone())
    }
}

impl NoticeSink for RecordingNotice {
    fn notify(&self, title: &str, message: &str) {
        self.notices
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
    }
}

/// A fully assembled test harness: a core over in-memory backends and
/// a temp data directory, with recorded notices.
pub struct Harness {
    pub core: ProtectionCore,
    pub notices: Arc<RecordingNotice>,
    pub backends: Vec<Arc<MemoryBackend>>,
    // Held so the data directory outlives the core.
    _data_dir: TempDir,
}

/// Builds a harness with the given trial length.
pub fn harness(trial_minutes: i64) -> Harness {
    let data_dir = TempDir::new().unwrap();
    let backends: Vec<Arc<MemoryBackend>> = (0..3)
        .map(|i| Arc::new(MemoryBackend::new(&format!("mem-{i}"))))
        .collect();
    let store_backends: Vec<Arc<dyn StoreBackend>> = backends
        .iter()
        .map(|b| Arc::clone(b) as Arc<dyn StoreBackend>)
        .collect();

    let config = ProtectionConfig {
        data_dir: data_dir.path().to_path_buf(),
        cache_dir_a: data_dir.path().join("cache-a"),
        cache_dir_b: data_dir.path().join("cache-b"),
        trial_minutes,
        ..ProtectionConfig::default()
    };

    let notices = RecordingNotice::new();
    let core = ProtectionCore::with_backends(config, store_backends, notices.clone());

    Harness {
        core,
        notices,
        backends,
        _data_dir: data_dir,
    }
}
