use std::io::Write;

use crate::ast::CmdLine;
use crate::job_control::{self, Directive};
use crate::shell::ShellState;

/// The list of all builtin directive names.
const BUILTINS: &[&str] = &["procs", "hist", "cd", "halt", "wakeup", "ice"];

/// Returns true if the command name is a builtin directive.
pub fn is_builtin(name: &str) -> bool {
    BUILTINS.contains(&name)
}

/// Execute a builtin directive, writing output to the provided streams.
///
/// Consumes the command descriptor; builtins never spawn a process and
/// never add a table entry.
pub fn execute(
    cmd: CmdLine,
    shell: &mut ShellState,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) {
    match cmd.program() {
        "procs" => {
            if let Err(e) = shell.table.list(stdout) {
                let _ = writeln!(stderr, "jobsh: procs: {e}");
            }
        }
        "hist" => {
            if let Err(e) = shell.history.print(stdout) {
                let _ = writeln!(stderr, "jobsh: hist: {e}");
            }
        }
        "cd" => builtin_cd(&cmd.args[1..], stderr),
        name => match Directive::from_name(name) {
            Some(directive) => builtin_signal(directive, &cmd.args[1..], shell, stderr),
            None => {
                let _ = writeln!(stderr, "jobsh: unknown builtin: {name}");
            }
        },
    }
}

/// Change the shell's working directory. Failure is reported and the shell
/// carries on.
fn builtin_cd(args: &[String], stderr: &mut dyn Write) {
    let Some(target) = args.first() else {
        let _ = writeln!(stderr, "jobsh: cd: missing argument");
        return;
    };

    if let Err(e) = std::env::set_current_dir(target) {
        let _ = writeln!(stderr, "jobsh: cd: {target}: {e}");
    }
}

/// Send a job-control signal and update the table.
///
/// The table update is deliberately unconditional once the pid parses:
/// failed delivery is reported, but a matching entry still reflects the
/// directive until the reconciler observes the real state.
fn builtin_signal(
    directive: Directive,
    args: &[String],
    shell: &mut ShellState,
    stderr: &mut dyn Write,
) {
    let Some(arg) = args.first() else {
        let _ = writeln!(stderr, "jobsh: {}: missing PID", directive.name());
        return;
    };

    let pid: u32 = match arg.parse() {
        Ok(pid) => pid,
        Err(_) => {
            let _ = writeln!(stderr, "jobsh: {}: invalid PID: {arg}", directive.name());
            return;
        }
    };

    if let Err(e) = job_control::send_signal(directive, pid) {
        let _ = writeln!(stderr, "jobsh: {}: kill failed: {e}", directive.name());
    }

    if !shell.table.set_status(pid, directive.asserted_status()) {
        let _ = writeln!(stderr, "jobsh: no process with PID {pid} in the table");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::JobStatus;

    fn descriptor(args: &[&str]) -> CmdLine {
        CmdLine::new(args.iter().map(|s| s.to_string()).collect())
    }

    fn run(shell: &mut ShellState, args: &[&str]) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        execute(descriptor(args), shell, &mut out, &mut err);
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn builtins_never_spawn_or_register() {
        let mut shell = ShellState::new(false);
        run(&mut shell, &["procs"]);
        run(&mut shell, &["hist"]);
        run(&mut shell, &["cd", "."]);
        assert!(shell.table.is_empty());
    }

    #[test]
    fn procs_prints_header() {
        let mut shell = ShellState::new(false);
        let (out, _) = run(&mut shell, &["procs"]);
        assert!(out.contains("PID"), "output was: {out}");
        assert!(out.contains("STATUS"), "output was: {out}");
    }

    #[test]
    fn directive_without_pid_is_reported() {
        let mut shell = ShellState::new(false);
        let (_, err) = run(&mut shell, &["halt"]);
        assert!(err.contains("missing PID"), "stderr was: {err}");

        let (_, err) = run(&mut shell, &["ice", "notapid"]);
        assert!(err.contains("invalid PID"), "stderr was: {err}");
    }

    #[cfg(unix)]
    #[test]
    fn directive_on_untracked_pid_warns_without_creating_entry() {
        let mut shell = ShellState::new(false);
        let (_, err) = run(&mut shell, &["ice", "99999999"]);
        assert!(err.contains("kill failed"), "stderr was: {err}");
        assert!(
            err.contains("no process with PID"),
            "stderr was: {err}"
        );
        assert!(shell.table.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn directive_updates_matching_entry_even_when_delivery_fails() {
        let mut shell = ShellState::new(false);
        let child = std::process::Command::new("sleep")
            .arg("5")
            .spawn()
            .expect("spawn sleep");
        let pid = shell.table.insert(descriptor(&["sleep", "5"]), child);

        // Reap it out from under the table so the signal has no target.
        unsafe {
            libc::kill(pid as libc::pid_t, libc::SIGKILL);
            libc::waitpid(pid as libc::pid_t, std::ptr::null_mut(), 0);
        }

        let (_, err) = run(&mut shell, &["halt", &pid.to_string()]);
        assert!(err.contains("kill failed"), "stderr was: {err}");
        assert_eq!(shell.table.status_of(pid), Some(JobStatus::Suspended));
    }
}
