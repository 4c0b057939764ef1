//! Standalone two-process pipe demonstration: `ls -ls | wc`.
//!
//! Exercises the same pipe close-discipline as the shell's pipeline
//! executor, without any job tracking: the parent hands the write end to
//! the first child and the read end to the second, keeps no copy of
//! either, and waits for each child in turn. Every step is narrated on
//! stderr so the descriptor hand-off can be observed.

use std::io;
use std::process::{Command, Stdio};

fn main() {
    if let Err(e) = run() {
        eprintln!("pipedemo: {e}");
        std::process::exit(1);
    }
}

fn run() -> io::Result<()> {
    let (reader, writer) = os_pipe::pipe()?;

    eprintln!("(parent_process>spawning ls -ls with stdout on the pipe's write end...)");
    let mut first = Command::new("ls")
        .arg("-ls")
        .stdout(Stdio::from(writer))
        .spawn()?;
    eprintln!("(parent_process>created process with id: {})", first.id());

    // The Command above owned the parent's only copy of the write end and
    // dropped it at the end of the spawn expression; wc will see EOF as
    // soon as ls exits.
    eprintln!("(parent_process>closing the write end of the pipe...)");
    eprintln!("(parent_process>waiting for child processes to terminate...)");
    first.wait()?;

    eprintln!("(parent_process>spawning wc with stdin on the pipe's read end...)");
    let mut second = Command::new("wc").stdin(Stdio::from(reader)).spawn()?;
    eprintln!("(parent_process>created process with id: {})", second.id());

    eprintln!("(parent_process>closing the read end of the pipe...)");
    eprintln!("(parent_process>waiting for child processes to terminate...)");
    second.wait()?;

    eprintln!("(parent_process>exiting...)");
    Ok(())
}
