/// Convert an OS process status into shell-style exit code semantics.
///
/// On Unix, processes terminated by signal map to `128 + signal`.
pub fn exit_code(status: std::process::ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

/// What a raw `waitpid` status reported about a child.
#[cfg(unix)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaitChange {
    /// Exited normally with this code.
    Exited(i32),
    /// Killed by this signal.
    Signaled(i32),
    /// Stopped by this signal (requires `WUNTRACED`).
    Stopped(i32),
    /// Resumed by `SIGCONT` (requires `WCONTINUED`).
    Continued,
}

/// Decode a raw status word from `waitpid` into a [`WaitChange`].
///
/// Returns `None` only for status words waitpid should not produce under
/// `WUNTRACED | WCONTINUED`.
#[cfg(unix)]
pub fn decode_wait_status(raw_status: libc::c_int) -> Option<WaitChange> {
    if unsafe { libc::WIFEXITED(raw_status) } {
        return Some(WaitChange::Exited(unsafe { libc::WEXITSTATUS(raw_status) }));
    }

    if unsafe { libc::WIFSIGNALED(raw_status) } {
        return Some(WaitChange::Signaled(unsafe { libc::WTERMSIG(raw_status) }));
    }

    if unsafe { libc::WIFSTOPPED(raw_status) } {
        return Some(WaitChange::Stopped(unsafe { libc::WSTOPSIG(raw_status) }));
    }

    if unsafe { libc::WIFCONTINUED(raw_status) } {
        return Some(WaitChange::Continued);
    }

    None
}
