//! Parsing of interactive input lines.

use std::path::PathBuf;

use crate::executor::Language;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text appended to the buffer
    Append(String),
    Clear,
    Load(PathBuf),
    Show,
    Who,
    Room,
    Lang(Language),
    Input(String),
    Run,
    Leave,
    Help,
}

pub const HELP: &str = "\
Commands:
  <text>          append a line to the shared buffer
  :clear          empty the buffer
  :load <path>    replace the buffer with a file
  :show           print the buffer
  :who            list participants
  :room           print the room id
  :lang <code>    select language (c, cpp, js, py, java, go, cs)
  :input <text>   set program input (\\n for newlines)
  :run            execute the buffer
  :leave          leave the room
  :help           show this help
";

/// Parse one line typed by the user
pub fn parse_command(line: &str) -> Result<Command, String> {
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Append(line.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "clear" => Ok(Command::Clear),
        "load" if arg.is_empty() => Err("usage: :load <path>".to_string()),
        "load" => Ok(Command::Load(PathBuf::from(arg))),
        "show" => Ok(Command::Show),
        "who" => Ok(Command::Who),
        "room" => Ok(Command::Room),
        "lang" if arg.is_empty() => Err("usage: :lang <code>".to_string()),
        "lang" => arg.parse().map(Command::Lang),
        "input" => Ok(Command::Input(unescape(arg))),
        "run" => Ok(Command::Run),
        "leave" | "quit" => Ok(Command::Leave),
        "help" => Ok(Command::Help),
        other => Err(format!("unknown command ':{}' (try :help)", other)),
    }
}

/// Expand `\n`, `\t` and `\\`
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
