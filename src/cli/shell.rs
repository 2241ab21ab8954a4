//! Line-oriented interactive shell over a history session
//!
//! Each input line is one request:
//! - `!query rest` retrieves an entry by index or prefix and runs it
//! - `history [N]`, `history -d N`, `history -i N`, `history -c`,
//!   `history -w [FILE]`, `history -r [FILE]` list, delete, browse from an
//!   entry, clear, save and load; other `history ...` lines are recorded
//! - `:up`, `:down`, `:erase`, `:shove` press the bound history keys;
//!   `:up text` navigates as if `text` were typed in the input line
//! - an empty line runs whatever navigation left in the input line
//! - anything else is recorded as a submitted line

use crate::cli::output;
use crate::error::{HistoryError, Result};
use crate::session::{HistoryAction, HistorySession, LineEditor};
use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::debug;

/// Line editor state kept by the shell between requests
#[derive(Debug, Default)]
pub struct TerminalEditor {
    input: String,
    displayed: Vec<String>,
    bindings: HashMap<String, HistoryAction>,
}

impl TerminalEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents of the input line
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn action_for(&self, key: &str) -> Option<HistoryAction> {
        self.bindings.get(key).copied()
    }

    /// Lines shown since the last call, in order
    pub fn take_displayed(&mut self) -> Vec<String> {
        std::mem::take(&mut self.displayed)
    }
}

impl LineEditor for TerminalEditor {
    fn display(&mut self, line: &str) {
        self.displayed.push(line.to_string());
    }

    fn replace_input_line(&mut self, text: &str) {
        self.input = text.to_string();
    }

    fn bind(&mut self, key: &str, action: HistoryAction) {
        self.bindings.insert(key.to_string(), action);
    }
}

/// Key name for a `:name` request
fn key_for(name: &str) -> String {
    match name.to_ascii_lowercase().as_str() {
        "erase" => "^U".to_string(),
        "shove" => "^X".to_string(),
        _ => name.to_ascii_uppercase(),
    }
}

/// Read requests from `input` until end of input or `exit`
pub fn run_shell<R: BufRead, W: Write>(
    session: &mut HistorySession,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let mut editor = TerminalEditor::new();
    session.install_bindings(&mut editor);

    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }
        let request = line.trim_end_matches(['\r', '\n']);
        if matches!(request.trim(), "exit" | "quit") {
            break;
        }

        // A failure writing the error report ends the shell
        if let Err(e) = handle_request(session, &mut editor, request, out) {
            output::write_error(out, &e)?;
        }
        for shown in editor.take_displayed() {
            writeln!(out, "{}", shown)?;
        }
    }
    Ok(())
}

fn handle_request<W: Write>(
    session: &mut HistorySession,
    editor: &mut TerminalEditor,
    request: &str,
    out: &mut W,
) -> Result<()> {
    if let Some(key_request) = request.strip_prefix(':') {
        let (name, typed) = key_request
            .split_once(' ')
            .map_or((key_request, None), |(name, typed)| (name, Some(typed)));
        let key = key_for(name);
        let action = editor.action_for(&key).ok_or_else(|| {
            HistoryError::invalid_argument(format!("no history action bound to {}", key))
        })?;
        if let Some(typed) = typed {
            editor.replace_input_line(typed);
        }
        let current = editor.input().to_string();
        session.perform(action, &current, editor);
        writeln!(out, "[{}]", editor.input())?;
        return Ok(());
    }

    if let Some(bang) = request.strip_prefix('!') {
        let (query, rest) = bang.split_once(' ').unwrap_or((bang, ""));
        session.expand(query, rest, editor)?;
        let expanded = editor.input().to_string();
        writeln!(out, "{}", expanded)?;
        return submit(session, editor, &expanded);
    }

    let mut words = request.split_whitespace();
    if words.next() == Some("history") {
        let args: Vec<&str> = words.collect();
        if let Some(builtin) = Builtin::parse(&args) {
            return run_builtin(session, editor, builtin, out);
        }
    }

    if request.trim().is_empty() {
        let pending = editor.input().to_string();
        if !pending.is_empty() {
            writeln!(out, "{}", pending)?;
        }
        return submit(session, editor, &pending);
    }

    submit(session, editor, request)
}

fn submit(session: &mut HistorySession, editor: &mut TerminalEditor, text: &str) -> Result<()> {
    debug!(text, "Submitting line");
    session.commit_line(text);
    editor.replace_input_line("");
    Ok(())
}

/// Forms of the `history` builtin. Lines that match none of them are
/// recorded like any other line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Builtin<'a> {
    List(Option<&'a str>),
    Clear,
    Delete(&'a str),
    Position(&'a str),
    Save(Option<&'a str>),
    Load(Option<&'a str>),
}

impl<'a> Builtin<'a> {
    fn parse(args: &[&'a str]) -> Option<Self> {
        let builtin = match *args {
            [] => Self::List(None),
            [max] if max.bytes().all(|b| b.is_ascii_digit()) => Self::List(Some(max)),
            ["-c"] => Self::Clear,
            ["-d", index] => Self::Delete(index),
            ["-i", index] => Self::Position(index),
            ["-w"] => Self::Save(None),
            ["-w", file] => Self::Save(Some(file)),
            ["-r"] => Self::Load(None),
            ["-r", file] => Self::Load(Some(file)),
            _ => return None,
        };
        Some(builtin)
    }
}

fn run_builtin<W: Write>(
    session: &mut HistorySession,
    editor: &mut TerminalEditor,
    builtin: Builtin<'_>,
    out: &mut W,
) -> Result<()> {
    match builtin {
        Builtin::List(max) => {
            let max = max.map(parse_index).transpose()?;
            session.list(max, editor);
        }
        Builtin::Clear => session.clear(),
        Builtin::Delete(index) => {
            let index = parse_index(index)?;
            let removed = session.delete(index)?;
            writeln!(out, "Deleted entry {}: {}", index, removed.text)?;
        }
        Builtin::Position(index) => {
            let index = parse_index(index)?;
            session.set_position(index)?;
            writeln!(out, "Browsing from entry {}", index)?;
        }
        Builtin::Save(file) => {
            let written = session.save_to_file(file.map(Path::new))?;
            writeln!(out, "Saved {} entries", written)?;
        }
        Builtin::Load(file) => {
            let added = session.load_from_file(file.map(Path::new))?;
            writeln!(out, "Loaded {} entries", added)?;
        }
    }
    Ok(())
}

fn parse_index(text: &str) -> Result<usize> {
    text.parse()
        .map_err(|_| HistoryError::invalid_argument(format!("not an entry index: {}", text)))
}
