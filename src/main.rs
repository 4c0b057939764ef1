mod ast;
mod builtins;
mod executor;
mod history;
mod job_control;
mod jobs;
mod parser;
mod shell;
mod status;

use std::io::{self, Write};

use shell::ShellState;

fn main() {
    let debug = std::env::args().skip(1).any(|arg| arg == "-d");
    let mut shell = ShellState::new(debug);

    ctrlc::set_handler(|| {
        println!();
        let _ = io::stdout().flush();
    })
    .expect("Failed to set Ctrl-C handler");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        let cwd = std::env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "?".to_string());
        print!("{cwd}$ ");
        if stdout.flush().is_err() {
            break;
        }

        let mut input = String::new();
        match stdin.read_line(&mut input) {
            Ok(0) => break, // EOF
            Ok(_) => {
                let trimmed = input.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == "quit" {
                    break;
                }

                let line = match resolve_history(trimmed, &mut shell) {
                    Some(line) => line,
                    None => continue,
                };

                match parser::parse(&line) {
                    Ok(cmd) => executor::execute(cmd, &mut shell),
                    Err(e) => eprintln!("jobsh: {e}"),
                }
            }
            Err(error) => {
                eprintln!("jobsh: error reading input: {error}");
                break;
            }
        }
    }

    shell.teardown();
}

/// Resolve `!!` / `!N` replay and record the line in history.
///
/// A replayed line is echoed to stdout and re-recorded, so consecutive `!!`
/// repeats the same command. Returns the line to execute, or `None` when a
/// replay request cannot be resolved.
fn resolve_history(trimmed: &str, shell: &mut ShellState) -> Option<String> {
    if trimmed == "!!" {
        let Some(last) = shell.history.last().map(String::from) else {
            eprintln!("jobsh: history is empty");
            return None;
        };
        println!("{last}");
        shell.history.push(&last);
        return Some(last);
    }

    if let Some(index_str) = trimmed.strip_prefix('!') {
        let Ok(index) = index_str.parse::<usize>() else {
            eprintln!("jobsh: invalid history index: {index_str}");
            return None;
        };
        let Some(line) = shell.history.get(index).map(String::from) else {
            eprintln!("jobsh: invalid history index: {index}");
            return None;
        };
        println!("{line}");
        shell.history.push(&line);
        return Some(line);
    }

    shell.history.push(trimmed);
    Some(trimmed.to_string())
}
