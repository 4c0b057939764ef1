use std::io::Write;
use std::process::Child;

use crate::ast::CmdLine;
use crate::status;

/// The lifecycle state of a tracked job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JobStatus {
    Running,
    Suspended,
    Terminated,
}

impl JobStatus {
    pub fn name(self) -> &'static str {
        match self {
            JobStatus::Running => "Running",
            JobStatus::Suspended => "Suspended",
            JobStatus::Terminated => "Terminated",
        }
    }
}

/// A single tracked OS process: the stage that produced it, its pid, and
/// the last status the reconciler observed (or job control asserted).
pub struct Job {
    pub cmd: CmdLine,
    pub pid: u32,
    pub status: JobStatus,
    child: Child,
}

/// What one non-blocking probe of a job's process reported.
enum Probe {
    /// No state change; leave the job alone.
    Unchanged,
    /// Process unknown and nothing cached; drop the entry.
    Gone,
    Exited(i32),
    #[cfg_attr(not(unix), allow(dead_code))]
    Signaled(i32),
    #[cfg_attr(not(unix), allow(dead_code))]
    Stopped(i32),
    #[cfg_attr(not(unix), allow(dead_code))]
    Continued,
}

/// The shell's process table — every spawned pipeline stage, FIFO order.
pub struct ProcessTable {
    jobs: Vec<Job>,
}

impl Default for ProcessTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessTable {
    pub fn new() -> Self {
        Self { jobs: Vec::new() }
    }

    /// Append a new `Running` job for a freshly spawned child. Returns its pid.
    pub fn insert(&mut self, cmd: CmdLine, child: Child) -> u32 {
        let pid = child.id();
        self.jobs.push(Job {
            cmd,
            pid,
            status: JobStatus::Running,
            child,
        });
        pid
    }

    /// Non-blocking reconciliation pass over every tracked job.
    ///
    /// Each live job gets one status probe that returns immediately. State
    /// changes are applied and reported on stderr; jobs whose process is
    /// gone without a known exit status are removed. Jobs already marked
    /// `Terminated` are skipped so a listing can still display them once.
    pub fn refresh(&mut self) {
        let mut gone = Vec::new();

        for job in &mut self.jobs {
            if job.status == JobStatus::Terminated {
                continue;
            }
            match probe(job) {
                Probe::Unchanged => {}
                Probe::Gone => gone.push(job.pid),
                Probe::Exited(code) => {
                    job.status = JobStatus::Terminated;
                    eprintln!(
                        "Process {} terminated normally with exit status {}",
                        job.pid, code
                    );
                }
                Probe::Signaled(signal) => {
                    job.status = JobStatus::Terminated;
                    eprintln!("Process {} terminated by signal {}", job.pid, signal);
                }
                Probe::Stopped(signal) => {
                    job.status = JobStatus::Suspended;
                    eprintln!("Process {} stopped by signal {}", job.pid, signal);
                }
                Probe::Continued => {
                    job.status = JobStatus::Running;
                    eprintln!("Process {} continued", job.pid);
                }
            }
        }

        self.jobs.retain(|j| !gone.contains(&j.pid));
    }

    /// Refresh, then print one row per job. Jobs observed `Terminated` are
    /// displayed this one time and pruned before the next listing.
    pub fn list(&mut self, out: &mut dyn Write) -> std::io::Result<()> {
        self.refresh();

        writeln!(out, "{:<8} {:<16} {}", "PID", "Command", "STATUS")?;
        for job in &self.jobs {
            writeln!(
                out,
                "{:<8} {:<16} {}",
                job.pid,
                job.cmd.program(),
                job.status.name()
            )?;
        }

        self.jobs.retain(|j| j.status != JobStatus::Terminated);
        Ok(())
    }

    /// Overwrite the status of the job matching `pid`. Returns false when no
    /// entry matches; the caller reports the warning.
    pub fn set_status(&mut self, pid: u32, status: JobStatus) -> bool {
        match self.jobs.iter_mut().find(|j| j.pid == pid) {
            Some(job) => {
                job.status = status;
                true
            }
            None => false,
        }
    }

    /// Block until the job matching `pid` exits.
    ///
    /// The exit status is cached on the child, so a later [`refresh`] still
    /// sees the job as `Terminated` rather than merely gone. The table
    /// status itself is left for the reconciler to settle.
    ///
    /// [`refresh`]: ProcessTable::refresh
    pub fn wait_foreground(&mut self, pid: u32) -> std::io::Result<()> {
        if let Some(job) = self.jobs.iter_mut().find(|j| j.pid == pid) {
            job.child.wait()?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn status_of(&self, pid: u32) -> Option<JobStatus> {
        self.jobs.iter().find(|j| j.pid == pid).map(|j| j.status)
    }

    /// Drop every remaining job and its command descriptor. Called once at
    /// shell shutdown.
    pub fn teardown(&mut self) {
        self.jobs.clear();
    }
}

/// One non-blocking, non-hanging status probe.
///
/// `WNOHANG` keeps the call immediate, `WUNTRACED` surfaces stops, and
/// `WCONTINUED` surfaces resumes. A probe error means the process was
/// already reaped (e.g. by a foreground wait) or is unknown; in that case
/// the child's cached exit status decides between `Exited` and `Gone`.
#[cfg(unix)]
fn probe(job: &mut Job) -> Probe {
    let mut raw_status: libc::c_int = 0;

    loop {
        let rc = unsafe {
            libc::waitpid(
                job.pid as libc::pid_t,
                &mut raw_status,
                libc::WNOHANG | libc::WUNTRACED | libc::WCONTINUED,
            )
        };

        if rc < 0 {
            let err = std::io::Error::last_os_error();
            if err.raw_os_error() == Some(libc::EINTR) {
                continue;
            }
            return match job.child.try_wait() {
                Ok(Some(exit)) => Probe::Exited(status::exit_code(exit)),
                _ => Probe::Gone,
            };
        }

        if rc == 0 {
            return Probe::Unchanged;
        }

        return match status::decode_wait_status(raw_status) {
            Some(status::WaitChange::Exited(code)) => Probe::Exited(code),
            Some(status::WaitChange::Signaled(signal)) => Probe::Signaled(signal),
            Some(status::WaitChange::Stopped(signal)) => Probe::Stopped(signal),
            Some(status::WaitChange::Continued) => Probe::Continued,
            None => Probe::Unchanged,
        };
    }
}

/// Portable fallback: exit detection only, no stop/continue reporting.
#[cfg(not(unix))]
fn probe(job: &mut Job) -> Probe {
    match job.child.try_wait() {
        Ok(Some(exit)) => Probe::Exited(status::exit_code(exit)),
        Ok(None) => Probe::Unchanged,
        Err(_) => Probe::Gone,
    }
}
