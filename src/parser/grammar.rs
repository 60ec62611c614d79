use crate::error::{DebugError, Result};

/// The fixed command vocabulary. Each variant carries its literal name in
/// [`VOCABULARY`]; dispatch is an explicit match in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Set,
    Sub,
    Print,
    Rem,
    Def,
    Call,
    SetCode,
    EndSetCode,
    Run,
    AddBreak,
    Step,
    StepOver,
    PrintMem,
    PrintTrace,
}

pub const VOCABULARY: [(&str, Command); 14] = [
    ("set", Command::Set),
    ("sub", Command::Sub),
    ("print", Command::Print),
    ("rem", Command::Rem),
    ("def", Command::Def),
    ("call", Command::Call),
    ("set code", Command::SetCode),
    ("end set code", Command::EndSetCode),
    ("run", Command::Run),
    ("add break", Command::AddBreak),
    ("step", Command::Step),
    ("step over", Command::StepOver),
    ("print mem", Command::PrintMem),
    ("print trace", Command::PrintTrace),
];

/// The matching table, sorted longest-name-first at construction so that
/// multi-word names ("print trace", "end set code") win over their prefixes.
pub struct Grammar {
    vocabulary: Vec<(&'static str, Command)>,
}

impl Grammar {
    pub fn new() -> Self {
        let mut vocabulary = VOCABULARY.to_vec();
        vocabulary.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { vocabulary }
    }

    /// Match the longest command name that prefixes the line; everything
    /// after the name is word-split into argument tokens.
    pub fn parse(&self, line: &str) -> Result<(Command, Vec<String>)> {
        for (name, command) in &self.vocabulary {
            if let Some(rest) = line.strip_prefix(name) {
                let args: Vec<String> = shlex::Shlex::new(rest).collect();
                return Ok((*command, args));
            }
        }
        Err(DebugError::UnknownCommand(line.to_string()))
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}

/// A variable or function name: one or more ASCII letters.
pub fn read_name(token: Option<&String>) -> Result<String> {
    let token = token.ok_or(DebugError::MissingArgument("name"))?;
    if !token.is_empty() && token.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(token.clone())
    } else {
        Err(DebugError::InvalidName(token.clone()))
    }
}

/// A strictly positive base-10 integer.
pub fn read_value(token: Option<&String>) -> Result<i64> {
    let token = token.ok_or(DebugError::MissingArgument("value"))?;
    match token.parse::<i64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(DebugError::InvalidValue(token.clone())),
    }
}
