//! User interrupt tracking for foreground child processes
//!
//! While a child runs, Ctrl+C only records the interrupt: the terminal delivers
//! SIGINT to the child too, and the parent waits for it to exit before reporting.
//! A second Ctrl+C kills a child that ignored the first one, and the parent still
//! waits and reports. Outside a child the process exits with code 130.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);
static CHILD_ACTIVE: AtomicBool = AtomicBool::new(false);
static CHILD_KILLED: AtomicBool = AtomicBool::new(false);
/// Pid of the tracked child, 0 when none
static CHILD_PID: AtomicU32 = AtomicU32::new(0);

/// Exit code used when the user stops the CLI itself
pub const INTERRUPT_EXIT_CODE: i32 = 130;

/// Install the process-wide Ctrl+C handler
///
/// `on_exit` runs right before the process exits on an interrupt that no child
/// absorbed (e.g. to restore the terminal cursor).
pub fn install_handler<F>(on_exit: F) -> Result<(), ctrlc::Error>
where
    F: Fn() + Send + 'static,
{
    ctrlc::set_handler(move || {
        let first = !INTERRUPTED.swap(true, Ordering::SeqCst);
        if CHILD_ACTIVE.load(Ordering::SeqCst) {
            if first {
                return;
            }
            if !CHILD_KILLED.swap(true, Ordering::SeqCst) && kill_tracked_child() {
                return;
            }
        }
        on_exit();
        std::process::exit(INTERRUPT_EXIT_CODE);
    })
}

/// Whether an interrupt arrived since the last [`ChildGuard`] was created
pub fn was_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Marks a foreground child as running for the guard's lifetime
///
/// Creating a guard clears any earlier interrupt. Create it before spawning so an
/// early Ctrl+C is absorbed too, then [`ChildGuard::track`] the spawned child.
pub struct ChildGuard {
    _private: (),
}

impl ChildGuard {
    pub fn new() -> Self {
        INTERRUPTED.store(false, Ordering::SeqCst);
        CHILD_KILLED.store(false, Ordering::SeqCst);
        CHILD_PID.store(0, Ordering::SeqCst);
        CHILD_ACTIVE.store(true, Ordering::SeqCst);
        Self { _private: () }
    }

    /// Remember the child's pid so a repeated Ctrl+C can kill it
    pub fn track(&self, pid: Option<u32>) {
        CHILD_PID.store(pid.unwrap_or(0), Ordering::SeqCst);
    }
}

impl Default for ChildGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        CHILD_ACTIVE.store(false, Ordering::SeqCst);
        CHILD_PID.store(0, Ordering::SeqCst);
    }
}

/// SIGKILL the tracked child; false when there is none or the kill failed
#[cfg(unix)]
fn kill_tracked_child() -> bool {
    let pid = CHILD_PID.load(Ordering::SeqCst);
    let Ok(pid) = libc::pid_t::try_from(pid) else {
        return false;
    };
    if pid == 0 {
        return false;
    }
    // SAFETY: kill(2) has no memory-safety preconditions
    unsafe { libc::kill(pid, libc::SIGKILL) == 0 }
}

#[cfg(not(unix))]
fn kill_tracked_child() -> bool {
    false
}

/// SIGINT number on unix
#[cfg(unix)]
pub(crate) const SIGINT: i32 = 2;

/// Whether the child itself was killed by SIGINT
#[cfg(unix)]
pub(crate) fn killed_by_interrupt(status: &std::process::ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    status.signal() == Some(SIGINT)
}

#[cfg(not(unix))]
pub(crate) fn killed_by_interrupt(_status: &std::process::ExitStatus) -> bool {
    false
}
