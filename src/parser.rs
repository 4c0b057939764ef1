use crate::ast::CmdLine;

/// Tokenize a raw line into a one- or two-stage [`CmdLine`] chain.
///
/// Grammar is deliberately small: whitespace-separated words, `< path` and
/// `> path` redirects (the path may also be attached, `<path`), a single
/// `|`, and a trailing `&` that clears the blocking flag for the whole
/// line. No quoting or expansion.
pub fn parse(line: &str) -> Result<CmdLine, String> {
    let mut line = line.trim();
    let mut blocking = true;

    if let Some(rest) = line.strip_suffix('&') {
        blocking = false;
        line = rest.trim_end();
    }

    // Stage under construction; flips to the second stage at `|`.
    let mut stages: Vec<StageBuilder> = vec![StageBuilder::default()];
    let mut tokens = line.split_whitespace();

    while let Some(token) = tokens.next() {
        match token {
            "|" => {
                if stages.last().unwrap().args.is_empty() {
                    return Err("missing command before '|'".to_string());
                }
                if stages.len() == 2 {
                    return Err("pipelines are limited to two stages".to_string());
                }
                stages.push(StageBuilder::default());
            }
            "<" => {
                let path = expect_filename(tokens.next(), "<")?;
                stages.last_mut().unwrap().input = Some(path);
            }
            ">" => {
                let path = expect_filename(tokens.next(), ">")?;
                stages.last_mut().unwrap().output = Some(path);
            }
            _ => {
                let stage = stages.last_mut().unwrap();
                // Attached forms: "<infile" / ">outfile".
                if let Some(path) = token.strip_prefix('<') {
                    stage.input = Some(expect_filename(Some(path), "<")?);
                } else if let Some(path) = token.strip_prefix('>') {
                    stage.output = Some(expect_filename(Some(path), ">")?);
                } else {
                    stage.args.push(token.to_string());
                }
            }
        }
    }

    if stages.last().unwrap().args.is_empty() {
        return Err(if stages.len() == 2 {
            "missing command after '|'".to_string()
        } else {
            "missing command".to_string()
        });
    }

    let mut second = None;
    if stages.len() == 2 {
        second = Some(Box::new(stages.pop().unwrap().build(blocking)));
    }
    let mut first = stages.pop().unwrap().build(blocking);
    first.next = second;
    Ok(first)
}

/// Validate the token following a redirect operator. Another operator (or
/// nothing) in target position is a syntax error, not a filename.
fn expect_filename(token: Option<&str>, operator: &str) -> Result<String, String> {
    match token {
        Some(t) if !t.is_empty() && !matches!(t, "|" | "<" | ">") => Ok(t.to_string()),
        _ => Err(format!("expected filename after '{operator}'")),
    }
}

#[derive(Default)]
struct StageBuilder {
    args: Vec<String>,
    input: Option<String>,
    output: Option<String>,
}

impl StageBuilder {
    fn build(self, blocking: bool) -> CmdLine {
        let mut cmd = CmdLine::new(self.args);
        cmd.input_redirect = self.input;
        cmd.output_redirect = self.output;
        cmd.blocking = blocking;
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_command() {
        let cmd = parse("ls -ls").unwrap();
        assert_eq!(cmd.args, vec!["ls", "-ls"]);
        assert!(cmd.blocking);
        assert!(cmd.next.is_none());
        assert!(cmd.input_redirect.is_none());
        assert!(cmd.output_redirect.is_none());
    }

    #[test]
    fn trailing_ampersand_clears_blocking() {
        let cmd = parse("sleep 5 &").unwrap();
        assert_eq!(cmd.args, vec!["sleep", "5"]);
        assert!(!cmd.blocking);

        // Attached form too.
        let cmd = parse("sleep 5&").unwrap();
        assert_eq!(cmd.args, vec!["sleep", "5"]);
        assert!(!cmd.blocking);
    }

    #[test]
    fn two_stage_pipeline() {
        let cmd = parse("ls -ls | wc").unwrap();
        assert_eq!(cmd.args, vec!["ls", "-ls"]);
        let second = cmd.next.expect("second stage");
        assert_eq!(second.args, vec!["wc"]);
        assert!(second.next.is_none());
    }

    #[test]
    fn three_stages_rejected() {
        let err = parse("a | b | c").unwrap_err();
        assert!(err.contains("two stages"), "error was: {err}");
    }

    #[test]
    fn redirects_separate_and_attached() {
        let cmd = parse("wc -l < in.txt > out.txt").unwrap();
        assert_eq!(cmd.args, vec!["wc", "-l"]);
        assert_eq!(cmd.input_redirect.as_deref(), Some("in.txt"));
        assert_eq!(cmd.output_redirect.as_deref(), Some("out.txt"));

        let cmd = parse("wc <in.txt >out.txt").unwrap();
        assert_eq!(cmd.input_redirect.as_deref(), Some("in.txt"));
        assert_eq!(cmd.output_redirect.as_deref(), Some("out.txt"));
    }

    #[test]
    fn redirect_on_second_stage_binds_to_it() {
        let cmd = parse("ls | wc > counts.txt").unwrap();
        assert!(cmd.output_redirect.is_none());
        let second = cmd.next.expect("second stage");
        assert_eq!(second.output_redirect.as_deref(), Some("counts.txt"));
    }

    #[test]
    fn missing_redirect_target_is_error() {
        assert!(parse("cat <").is_err());
        assert!(parse("echo hi >").is_err());
    }

    #[test]
    fn operator_as_redirect_target_is_error() {
        // A pipe (or another redirect) in filename position must not be
        // swallowed as a file literally named "|".
        let err = parse("echo > | wc").unwrap_err();
        assert!(err.contains("expected filename"), "error was: {err}");
        assert!(parse("cat < > out.txt").is_err());
        assert!(parse("cat <| wc").is_err());
    }

    #[test]
    fn empty_pipeline_sides_are_errors() {
        assert!(parse("| wc").is_err());
        assert!(parse("ls |").is_err());
        assert!(parse("").is_err());
    }
}
