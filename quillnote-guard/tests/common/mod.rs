//! Shared test helpers for guard tests.

#![allow(dead_code)]

use quillnote_guard::NoticeSink;
use std::sync::{Arc, Mutex};

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

    pub fn titles(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|(title, _)| title.clone())
            .collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|(_, message)| message.clone())
            .collect()
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
