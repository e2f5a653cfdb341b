//! Debugger detection: startup, on-demand, and periodic background.

use crate::context::ProtectionContext;
use crate::notice::NoticeSink;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

/// Process names treated as debugging/tracing parents.
const TRACER_PARENTS: [&str; 7] = [
    "gdb",
    "lldb",
    "lldb-server",
    "gdbserver",
    "strace",
    "ltrace",
    "rr",
];

/// Iterations of the timing probe's integer loop.
const TIMING_ITERATIONS: u64 = 100;

/// Watches for attached debugging tools and raises the sticky tamper
/// flag in the shared [`ProtectionContext`].
///
/// Four independent signals; any one suffices:
/// 1. A tracer attached to the process (OS-level query).
/// 2. The parent process is a known debugger or tracer.
/// 3. A tracer attached to any thread of the process.
/// 4. A trivial integer loop taking anomalously long (consistent with
///    single-stepping).
///
/// Detection only ever surfaces a notice and degrades feature gating;
/// it never exits or corrupts data. On platforms without the /proc
/// interface the OS-level queries report not-present and only the
/// timing probe remains — detection is best-effort by design.
pub struct DebuggerSentinel {
    ctx: Arc<ProtectionContext>,
    notices: Arc<dyn NoticeSink>,
    timing_threshold: Duration,
}

impl DebuggerSentinel {
    /// Creates a sentinel over the shared context.
    #[must_use]
    pub fn new(
        ctx: Arc<ProtectionContext>,
        notices: Arc<dyn NoticeSink>,
        timing_threshold: Duration,
    ) -> Self {
        Self {
            ctx,
            notices,
            timing_threshold,
        }
    }

    /// Runs all four signals. Called once at application startup.
    pub fn startup_checks(&self) {
        if os_debugger_present() {
            self.flag("os debugger query");
        }
        if tracer_parent_present() {
            self.flag("tracer parent");
        }
        if remote_tracer_present() {
            self.flag("thread tracer sweep");
        }
        if self.timing_anomaly() {
            self.flag("timing analysis");
        }
    }

    /// Cheap on-demand recheck (signals 1–2 only), for call sites that
    /// need low-latency gating.
    pub fn recheck(&self) {
        if self.ctx.tampered() {
            return;
        }
        if os_debugger_present() || tracer_parent_present() {
            self.flag("runtime recheck");
        }
    }

    /// Spawns the background monitor: signals 1, 2, and 4 at a fixed
    /// interval while the flag remains unset, for the life of the
    /// process.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_monitor(self: &Arc<Self>, interval: Duration) -> tokio::task::JoinHandle<()> {
        let sentinel = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately; startup_checks
            // already covered that instant.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if sentinel.ctx.tampered() {
                    continue;
                }
                if os_debugger_present() {
                    sentinel.flag("background os query");
                }
                if tracer_parent_present() {
                    sentinel.flag("background tracer parent");
                }
                if sentinel.timing_anomaly() {
                    sentinel.flag("background timing");
                }
            }
        })
    }

    /// The timing probe: a fixed trivial loop measured on a monotonic
    /// clock. Single-stepping stretches it by orders of magnitude; the
    /// threshold is generous enough that a loaded machine stays under
    /// it.
    fn timing_anomaly(&self) -> bool {
        let start = Instant::now();
        let mut acc: u64 = 0;
        for i in 0..TIMING_ITERATIONS {
            acc = std::hint::black_box(acc.wrapping_add(i));
        }
        std::hint::black_box(acc);
        start.elapsed() > self.timing_threshold
    }

    /// Raises the sticky flag, notifying the user on the transition.
    fn flag(&self, signal: &str) {
        if !self.ctx.tampered() {
            warn!(signal, "debugger detected");
            self.notices.notify(
                "Debugger detected",
                &format!(
                    "A debugging tool appears to be attached ({signal}). \
                     The application will continue running."
                ),
            );
        }
        self.ctx.mark_tampered();
    }
}

/// Extracts the `TracerPid` field from /proc status content.
#[must_use]
pub fn parse_tracer_pid(status: &str) -> Option<i32> {
    status
        .lines()
        .find(|line| line.starts_with("TracerPid:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|pid| pid.parse().ok())
}

/// Signal 1: a tracer attached to this process.
fn os_debugger_present() -> bool {
    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/proc/self/status")
            .ok()
            .and_then(|status| parse_tracer_pid(&status))
            .is_some_and(|pid| pid != 0)
    }
    #[cfg(not(target_os = "linux"))]
    {
        false
    }
}

/// Signal 2: the parent process is a known debugger or tracer.
fn tracer_parent_present() -> bool {
    #[cfg(target_os = "linux")]
    {
        let Some(ppid) = std::fs::read_to_string("/proc/self/status")
            .ok()
            .and_then(|status| {
                status
                    .lines()
                    .find(|line| line.starts_with("PPid:"))
                    .and_then(|line| line.split_whitespace().nth(1))
                    .and_then(|pid| pid.parse::<i32>().ok())
            })
        else {
            return false;
        };

        std::fs::read_to_string(format!("/proc/{ppid}/comm"))
            .is_ok_and(|comm| TRACER_PARENTS.contains(&comm.trim()))
    }
    #[cfg(not(target_os = "linux"))]
    {
        false
    }
}

/// Signal 3: a tracer attached to any thread of this process.
fn remote_tracer_present() -> bool {
    #[cfg(target_os = "linux")]
    {
        let Ok(tasks) = std::fs::read_dir("/proc/self/task") else {
            return false;
        };
        for task in tasks.flatten() {
            let status_path = task.path().join("status");
            if std::fs::read_to_string(status_path)
                .ok()
                .and_then(|status| parse_tracer_pid(&status))
                .is_some_and(|pid| pid != 0)
            {
                return true;
            }
        }
        false
    }
    #[cfg(not(target_os = "linux"))]
    {
        false
    }
}
