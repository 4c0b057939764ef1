use crate::history::History;
use crate::jobs::ProcessTable;

/// Top-level shell context: the process table, the command history, and the
/// debug flag. Built once at startup and threaded through every operation —
/// there is no ambient global state.
pub struct ShellState {
    pub table: ProcessTable,
    pub history: History,
    pub debug: bool,
}

impl ShellState {
    pub fn new(debug: bool) -> Self {
        Self {
            table: ProcessTable::new(),
            history: History::new(),
            debug,
        }
    }

    /// Release everything the shell still owns: remaining job entries (and
    /// their command descriptors) and the history. Called once at exit.
    pub fn teardown(&mut self) {
        self.table.teardown();
        self.history.clear();
    }
}
