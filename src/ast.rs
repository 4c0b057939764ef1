/// One parsed pipeline stage.
///
/// A command line with a pipe produces two of these, linked through
/// [`CmdLine::next`]. The executor takes ownership of each stage and hands
/// it to the process table when the stage is spawned, so the descriptor
/// lives exactly as long as the job it produced.
#[derive(Debug, Clone)]
pub struct CmdLine {
    /// Argument vector; never empty, `args[0]` is the program name.
    pub args: Vec<String>,
    /// `< path` — feed the stage's stdin from this file.
    pub input_redirect: Option<String>,
    /// `> path` — send the stage's stdout to this file (truncating).
    pub output_redirect: Option<String>,
    /// Second pipeline stage, if the line contained a `|`.
    pub next: Option<Box<CmdLine>>,
    /// False when the line ended with `&` — the shell does not wait.
    pub blocking: bool,
}

impl CmdLine {
    pub fn new(args: Vec<String>) -> Self {
        Self {
            args,
            input_redirect: None,
            output_redirect: None,
            next: None,
            blocking: true,
        }
    }

    /// The program name (first argument token).
    pub fn program(&self) -> &str {
        &self.args[0]
    }
}
