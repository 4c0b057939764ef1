use std::io;

use crate::jobs::JobStatus;

/// The three signal-sending directives: which signal each one delivers and
/// which table status it optimistically asserts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Directive {
    /// `halt` — stop the process.
    Halt,
    /// `wakeup` — resume a stopped process.
    Wakeup,
    /// `ice` — interrupt the process.
    Ice,
}

impl Directive {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "halt" => Some(Directive::Halt),
            "wakeup" => Some(Directive::Wakeup),
            "ice" => Some(Directive::Ice),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Directive::Halt => "halt",
            Directive::Wakeup => "wakeup",
            Directive::Ice => "ice",
        }
    }

    /// The table status asserted as soon as the directive is parsed, before
    /// the OS confirms delivery.
    pub fn asserted_status(self) -> JobStatus {
        match self {
            Directive::Halt => JobStatus::Suspended,
            Directive::Wakeup => JobStatus::Running,
            Directive::Ice => JobStatus::Terminated,
        }
    }

    #[cfg(unix)]
    fn signal(self) -> libc::c_int {
        match self {
            Directive::Halt => libc::SIGSTOP,
            Directive::Wakeup => libc::SIGCONT,
            Directive::Ice => libc::SIGINT,
        }
    }
}

/// Deliver a directive's signal to `pid`.
#[cfg(unix)]
pub fn send_signal(directive: Directive, pid: u32) -> io::Result<()> {
    loop {
        let rc = unsafe { libc::kill(pid as libc::pid_t, directive.signal()) };
        if rc == 0 {
            return Ok(());
        }

        let err = io::Error::last_os_error();
        if err.raw_os_error() == Some(libc::EINTR) {
            continue;
        }
        return Err(err);
    }
}

#[cfg(not(unix))]
pub fn send_signal(_directive: Directive, _pid: u32) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "job-control signals require Unix",
    ))
}
