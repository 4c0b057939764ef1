use std::fs::{File, OpenOptions};
use std::io;
use std::process::{Child, Command, Stdio};

use crate::ast::CmdLine;
use crate::builtins;
use crate::shell::ShellState;

/// Execute one parsed command line: dispatch builtins, or run the
/// one-or-two-stage pipeline protocol and register every spawned process
/// in the shell's table.
pub fn execute(cmd: CmdLine, shell: &mut ShellState) {
    if builtins::is_builtin(cmd.program()) {
        let mut stdout = io::stdout();
        let mut stderr = io::stderr();
        builtins::execute(cmd, shell, &mut stdout, &mut stderr);
        return;
    }

    run_pipeline(cmd, shell);
}

fn run_pipeline(mut cmd: CmdLine, shell: &mut ShellState) {
    let second = cmd.next.take();

    // Redirection invariants are checked before anything is spawned.
    if second.is_some() && cmd.output_redirect.is_some() {
        eprintln!("jobsh: cannot redirect the output of the left-hand side of a pipeline");
        return;
    }
    if second.as_ref().is_some_and(|s| s.input_redirect.is_some()) {
        eprintln!("jobsh: cannot redirect the input of the right-hand side of a pipeline");
        return;
    }

    // One pipe per line, created up front so single-stage and two-stage
    // commands share the same protocol. Unused ends are dropped right away.
    let (reader, writer) = match os_pipe::pipe() {
        Ok(pipe) => pipe,
        Err(e) => {
            eprintln!("jobsh: pipe failed: {e}");
            return;
        }
    };

    let blocking = cmd.blocking;

    // Stage 1: stdin from the redirect file if any; stdout into the pipe
    // when a second stage exists, otherwise to the redirect file if any.
    let stdin1 = match &cmd.input_redirect {
        Some(path) => match File::open(path) {
            Ok(file) => Some(Stdio::from(file)),
            Err(e) => {
                eprintln!("jobsh: failed to open input file {path}: {e}");
                return;
            }
        },
        None => None,
    };

    let stdout1 = if second.is_some() {
        Some(Stdio::from(writer))
    } else {
        drop(writer);
        match open_output(&cmd.output_redirect) {
            Ok(stdio) => stdio,
            Err(()) => return,
        }
    };

    let child = match spawn_stage(&cmd, stdin1, stdout1) {
        Ok(child) => child,
        Err(e) => {
            report_spawn_error(cmd.program(), &e);
            return;
        }
    };

    // The spawn helper dropped the parent's pipe-write-end copy with its
    // Command, so a downstream reader sees EOF once stage 1 exits.
    register(child, cmd, blocking, shell);

    let Some(mut second) = second else {
        return;
    };

    // Stage 2: stdin from the pipe's read end, stdout per its own redirect.
    let stdout2 = match open_output(&second.output_redirect) {
        Ok(stdio) => stdio,
        Err(()) => return,
    };

    second.blocking = blocking;
    let child = match spawn_stage(&second, Some(Stdio::from(reader)), stdout2) {
        Ok(child) => child,
        Err(e) => {
            report_spawn_error(second.program(), &e);
            return;
        }
    };

    register(child, *second, blocking, shell);
}

/// Spawn one stage with the prepared stdio handles.
///
/// The `Command` (and with it the parent's copies of any pipe ends handed
/// in) is dropped before this returns.
fn spawn_stage(stage: &CmdLine, stdin: Option<Stdio>, stdout: Option<Stdio>) -> io::Result<Child> {
    let mut command = Command::new(stage.program());
    command.args(&stage.args[1..]);
    if let Some(stdin) = stdin {
        command.stdin(stdin);
    }
    if let Some(stdout) = stdout {
        command.stdout(stdout);
    }
    command.spawn()
}

/// Add a freshly spawned stage to the table; wait for it when blocking.
fn register(child: Child, cmd: CmdLine, blocking: bool, shell: &mut ShellState) {
    if shell.debug {
        eprintln!("PID: {}", child.id());
        eprintln!("Executing command: {}", cmd.program());
    }

    let pid = shell.table.insert(cmd, child);
    if blocking {
        if let Err(e) = shell.table.wait_foreground(pid) {
            eprintln!("jobsh: failed to wait for {pid}: {e}");
        }
    }
}

/// Open an output-redirect target for truncating write, if one was given.
fn open_output(target: &Option<String>) -> Result<Option<Stdio>, ()> {
    let Some(path) = target else {
        return Ok(None);
    };

    match OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
    {
        Ok(file) => Ok(Some(Stdio::from(file))),
        Err(e) => {
            eprintln!("jobsh: failed to open output file {path}: {e}");
            Err(())
        }
    }
}

fn report_spawn_error(program: &str, err: &io::Error) {
    if err.kind() == io::ErrorKind::NotFound {
        eprintln!("jobsh: command not found: {program}");
    } else {
        eprintln!("jobsh: {program}: {err}");
    }
}
