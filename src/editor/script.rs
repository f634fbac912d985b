//! Line-oriented edit scripts replayed against a session.
//!
//! One command per line; blank lines and `#` comments are skipped. A `#`
//! word is read as a colour only in the argument slot of `colour`, `draw`
//! or `fill`; anywhere else it starts a comment.
//!
//! ```text
//! # outline then fill
//! colour #ffd700
//! draw 0 0
//! draw 1 0 #ff3e3e
//! fill 5 5 #1a1b4b
//! undo
//! ```

use crate::error::{Result, StudioError};
use crate::types::Colour;

use super::session::{EditorSession, Tool};

/// A single script command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    SetTool(Tool),
    SetColour(Colour),
    /// Apply the current tool.
    Click { x: usize, y: usize },
    /// Draw with an explicit colour, or the current one.
    Draw {
        x: usize,
        y: usize,
        colour: Option<Colour>,
    },
    Erase { x: usize, y: usize },
    Fill {
        x: usize,
        y: usize,
        colour: Option<Colour>,
    },
    Undo,
    Redo,
    Clear,
    Resize(usize),
    DarkMode(bool),
}

/// A parsed command with its 1-based source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub command: EditCommand,
}

impl EditCommand {
    /// Run the command. Returns whether the grid changed.
    pub fn apply(&self, session: &mut EditorSession) -> Result<bool> {
        match *self {
            EditCommand::SetTool(tool) => {
                session.set_tool(tool);
                Ok(false)
            }
            EditCommand::SetColour(colour) => {
                session.set_colour(colour);
                Ok(false)
            }
            EditCommand::Click { x, y } => session.apply(x, y),
            EditCommand::Draw { x, y, colour } => {
                let colour = colour.unwrap_or(session.colour());
                session.draw(x, y, colour)
            }
            EditCommand::Erase { x, y } => session.erase(x, y),
            EditCommand::Fill { x, y, colour } => {
                let colour = colour.unwrap_or(session.colour());
                Ok(session.fill(x, y, colour))
            }
            EditCommand::Undo => session.undo().map(|()| true),
            EditCommand::Redo => session.redo().map(|()| true),
            EditCommand::Clear => Ok(session.clear()),
            EditCommand::Resize(size) => session.resize(size).map(|()| true),
            EditCommand::DarkMode(on) => {
                session.set_dark_mode(on);
                Ok(false)
            }
        }
    }
}

/// Parse a whole script, failing on the first malformed line.
pub fn parse_script(source: &str) -> Result<Vec<ScriptLine>> {
    let mut commands = Vec::new();

    for (i, raw) in source.lines().enumerate() {
        let line = i + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let command = parse_line(trimmed).map_err(|err| at_line(line, err))?;
        commands.push(ScriptLine { line, command });
    }

    Ok(commands)
}

fn at_line(line: usize, err: StudioError) -> StudioError {
    match err {
        StudioError::Parse { message, help } => StudioError::Parse {
            message: format!("line {}: {}", line, message),
            help,
        },
        other => StudioError::Parse {
            message: format!("line {}: {}", line, other),
            help: None,
        },
    }
}

fn parse_line(line: &str) -> Result<EditCommand> {
    let words = strip_comment(line);
    let (keyword, args) = match words.split_first() {
        Some((keyword, args)) => (keyword.to_lowercase(), args),
        None => return Err(parse_error("empty command")),
    };

    let command = match keyword.as_str() {
        "tool" => EditCommand::SetTool(single(args, "tool <draw|erase|fill>")?.parse()?),
        "colour" | "color" => {
            EditCommand::SetColour(Colour::from_hex(single(args, "colour <#hex>")?)?)
        }
        "click" => {
            let (x, y) = coords(args, 2, "click <x> <y>")?;
            EditCommand::Click { x, y }
        }
        "draw" => {
            let (x, y) = coords(args, 3, "draw <x> <y> [#hex]")?;
            EditCommand::Draw {
                x,
                y,
                colour: optional_colour(args)?,
            }
        }
        "erase" => {
            let (x, y) = coords(args, 2, "erase <x> <y>")?;
            EditCommand::Erase { x, y }
        }
        "fill" => {
            let (x, y) = coords(args, 3, "fill <x> <y> [#hex]")?;
            EditCommand::Fill {
                x,
                y,
                colour: optional_colour(args)?,
            }
        }
        "undo" => no_args(args, EditCommand::Undo, "undo")?,
        "redo" => no_args(args, EditCommand::Redo, "redo")?,
        "clear" => no_args(args, EditCommand::Clear, "clear")?,
        "resize" => EditCommand::Resize(number(single(args, "resize <size>")?)?),
        "dark" => EditCommand::DarkMode(switch(single(args, "dark <on|off>")?)?),
        other => {
            return Err(StudioError::Parse {
                message: format!("unknown command '{}'", other),
                help: Some(
                    "Commands: tool, colour, click, draw, erase, fill, undo, redo, clear, resize, dark"
                        .to_string(),
                ),
            })
        }
    };

    Ok(command)
}

/// Split into words, dropping a trailing comment. A `#` word is kept only
/// where the command takes a colour and it parses as one.
fn strip_comment(line: &str) -> Vec<&str> {
    let mut words: Vec<&str> = Vec::new();
    for word in line.split_whitespace() {
        if word.starts_with('#') {
            let slot = words.first().and_then(|keyword| colour_slot(keyword));
            if slot != Some(words.len()) || Colour::from_hex(word).is_err() {
                break;
            }
        }
        words.push(word);
    }
    words
}

/// Word position of a command's colour argument, counting the keyword.
fn colour_slot(keyword: &str) -> Option<usize> {
    match keyword.to_lowercase().as_str() {
        "colour" | "color" => Some(1),
        "draw" | "fill" => Some(3),
        _ => None,
    }
}

fn parse_error(message: impl Into<String>) -> StudioError {
    StudioError::Parse {
        message: message.into(),
        help: None,
    }
}

fn usage(usage: &str) -> StudioError {
    StudioError::Parse {
        message: "wrong number of arguments".to_string(),
        help: Some(format!("Usage: {}", usage)),
    }
}

fn single<'a>(args: &[&'a str], form: &str) -> Result<&'a str> {
    match args {
        &[value] => Ok(value),
        _ => Err(usage(form)),
    }
}

fn no_args(args: &[&str], command: EditCommand, form: &str) -> Result<EditCommand> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(usage(form))
    }
}

fn coords(args: &[&str], max_args: usize, form: &str) -> Result<(usize, usize)> {
    if args.len() < 2 || args.len() > max_args {
        return Err(usage(form));
    }
    Ok((number(args[0])?, number(args[1])?))
}

fn optional_colour(args: &[&str]) -> Result<Option<Colour>> {
    args.get(2).map(|hex| Colour::from_hex(hex)).transpose()
}

fn number(value: &str) -> Result<usize> {
    value
        .parse()
        .map_err(|_| parse_error(format!("'{}' is not a non-negative integer", value)))
}

fn switch(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(parse_error(format!("expected on or off, found '{}'", value))),
    }
}
