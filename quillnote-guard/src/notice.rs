//! User-visible, non-blocking notices.

use tracing::warn;

/// How protection events reach the user.
///
/// The shipped app installs a sink that raises a message box; headless
/// contexts and tests use [`LogNotice`] or a recording stub. Sinks must
/// not block: notices are informational and execution always continues.
pub trait NoticeSink: Send + Sync {
    /// Surfaces a notice to the user.
    fn notify(&self, title: &str, message: &str);
}

/// The default sink: notices go to the log.
#[derive(Debug, Default)]
pub struct LogNotice;

impl NoticeSink for LogNotice {
    fn notify(&self, title: &str, message: &str) {
        warn!(title, "{message}");
    }
}
