use std::{
    borrow::Cow,
    io::{self, BufRead, Lines, StdinLock},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output;

pub const SCRIPT_ENV: &str = "FINANCE_CORE_CLI_SCRIPT";

/// Starts the shell. With `FINANCE_CORE_CLI_SCRIPT` set, commands are read
/// from stdin with no line editor and no confirmation prompts.
pub fn run_cli() -> Result<(), CliError> {
    let mode = match std::env::var_os(SCRIPT_ENV) {
        Some(_) => CliMode::Script,
        None => CliMode::Interactive,
    };
    let mut context = ShellContext::new(mode)?;
    let mut source = LineSource::open(&context)?;

    while context.running {
        let Some(line) = source.next_line(&context)? else {
            break;
        };
        match execute_line(&mut context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => context.running = false,
            Err(err) => context.report_error(err),
        }
    }
    Ok(())
}

/// Where command lines come from.
enum LineSource {
    Editor(Box<Editor<CommandHelper, DefaultHistory>>),
    Stdin(Lines<StdinLock<'static>>),
}

impl LineSource {
    fn open(context: &ShellContext) -> Result<Self, CliError> {
        if context.mode == CliMode::Script {
            return Ok(LineSource::Stdin(io::stdin().lock().lines()));
        }
        let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
        editor.set_helper(Some(CommandHelper::new(context.command_names())));
        editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
        output::hint("Type `help` to list commands, Tab or `?` to complete.");
        Ok(LineSource::Editor(Box::new(editor)))
    }

    /// Next non-empty line, or `None` once input ends or the user leaves.
    fn next_line(&mut self, context: &ShellContext) -> Result<Option<String>, CliError> {
        match self {
            LineSource::Stdin(lines) => {
                for line in lines.by_ref() {
                    let line = line?;
                    if !line.trim().is_empty() {
                        return Ok(Some(line));
                    }
                }
                Ok(None)
            }
            LineSource::Editor(editor) => loop {
                match editor.readline(&context.prompt()) {
                    Ok(line) if line.trim().is_empty() => continue,
                    Ok(line) => {
                        editor.add_history_entry(line.trim()).ok();
                        return Ok(Some(line));
                    }
                    Err(ReadlineError::Interrupted) => {
                        if context.confirm_exit()? {
                            return Ok(None);
                        }
                    }
                    Err(ReadlineError::Eof) => {
                        output::info("Bye.");
                        return Ok(None);
                    }
                    Err(err) => return Err(err.into()),
                }
            },
        }
    }
}

/// Tokenizes one line and runs it. Lines starting with `#` are comments.
fn execute_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match shell_words::split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(format!("Could not parse `{}`: {err}", line.trim()));
            return Ok(LoopControl::Continue);
        }
    };
    let Some((head, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    if head.starts_with('#') {
        return Ok(LoopControl::Continue);
    }

    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.last_command = Some(line.trim().to_string());
    tracing::debug!(command = %head, args = args.len(), "dispatching");
    context.dispatch(&head.to_lowercase(), head, &args)
}

/// Completes command names in the first word of the line.
struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names.into_iter().map(str::to_string).collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }

    fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<String>) {
        let typed = &line[..pos];
        let word_start = typed
            .rfind(char::is_whitespace)
            .map_or(0, |idx| idx + 1);
        if !typed[..word_start].trim().is_empty() {
            return (word_start, Vec::new());
        }

        let needle = typed[word_start..].to_ascii_lowercase();
        let matches = self
            .commands
            .iter()
            .filter(|name| name.starts_with(&needle))
            .cloned()
            .collect();
        (word_start, matches)
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.candidates(line, pos);
        let pairs = matches
            .into_iter()
            .map(|name| Pair {
                display: name.clone(),
                replacement: format!("{name} "),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_arguments_stay_together() {
        let tokens = shell_words::split(r#"add expense 12 cat-food "Tacos al pastor""#).unwrap();
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[4], "Tacos al pastor");
        assert!(shell_words::split("add \"unterminated").is_err());
    }

    #[test]
    fn completes_only_the_command_word() {
        let helper = CommandHelper::new(vec!["summary", "sweep", "add"]);
        let (start, matches) = helper.candidates("s", 1);
        assert_eq!(start, 0);
        assert_eq!(matches, vec!["summary".to_string(), "sweep".to_string()]);

        let (_, matches) = helper.candidates("add s", 5);
        assert!(matches.is_empty());
    }
}
