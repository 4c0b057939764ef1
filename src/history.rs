use std::collections::VecDeque;
use std::io::Write;

/// Maximum number of remembered command lines.
pub const HISTORY_LIMIT: usize = 20;

/// Bounded append-only queue of raw command lines.
///
/// Entries are indexed 1-based from the oldest retained line, matching what
/// `hist` prints, so `!N` resolves against the displayed numbering.
pub struct History {
    entries: VecDeque<String>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_LIMIT),
        }
    }

    /// Append a line, evicting the oldest entry once the limit is reached.
    pub fn push(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }
        if self.entries.len() == HISTORY_LIMIT {
            self.entries.pop_front();
        }
        self.entries.push_back(line.to_string());
    }

    /// Look up entry `index` (1-based, as printed by `hist`).
    pub fn get(&self, index: usize) -> Option<&str> {
        if index == 0 {
            return None;
        }
        self.entries.get(index - 1).map(String::as_str)
    }

    /// The most recently appended line, for `!!`.
    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Print `N <line>` per entry, oldest first.
    pub fn print(&self, out: &mut dyn Write) -> std::io::Result<()> {
        for (i, line) in self.entries.iter().enumerate() {
            writeln!(out, "{} {}", i + 1, line)?;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_replay_by_index() {
        let mut history = History::new();
        history.push("echo one");
        history.push("echo two");
        assert_eq!(history.get(1), Some("echo one"));
        assert_eq!(history.get(2), Some("echo two"));
        assert_eq!(history.last(), Some("echo two"));
    }

    #[test]
    fn index_zero_and_out_of_range_are_none() {
        let mut history = History::new();
        history.push("ls");
        assert_eq!(history.get(0), None);
        assert_eq!(history.get(2), None);
    }

    #[test]
    fn oldest_entry_evicted_at_limit() {
        let mut history = History::new();
        for i in 0..HISTORY_LIMIT + 3 {
            history.push(&format!("cmd {i}"));
        }
        assert_eq!(history.len(), HISTORY_LIMIT);
        // cmd 0..=2 were evicted; entry 1 is now "cmd 3".
        assert_eq!(history.get(1), Some("cmd 3"));
        assert_eq!(history.get(HISTORY_LIMIT), Some("cmd 22"));
    }

    #[test]
    fn print_uses_one_based_numbering() {
        let mut history = History::new();
        history.push("pwd");
        history.push("ls -l");
        let mut out = Vec::new();
        history.print(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1 pwd\n2 ls -l\n");
    }

    #[test]
    fn empty_lines_are_not_recorded() {
        let mut history = History::new();
        history.push("");
        assert!(history.is_empty());
    }
}
