use std::collections::HashMap;

use super::grammar::{read_name, Command, Grammar};
use crate::debugger::{ContextRef, ExecutionContext};
use crate::error::{DebugError, Result};

/// One indentation unit; function bodies are indented exactly one.
pub const INDENT: &str = "    ";

/// Pre-pass over a freshly acquired script: extract each `def` body into the
/// function table, stripping one indentation unit per body line (deeper
/// indentation stays verbatim). A body ends at the first non-indented line or
/// at end of input; that closing line is reprocessed as a normal line.
///
/// The root "main" context keeps the complete raw line sequence, headers and
/// indented bodies included, so absolute positions are indices into the
/// original flattened script; the runtime `def` command skips bodies inline.
pub fn discover_functions(
    grammar: &Grammar,
    lines: &[String],
    base_offset: usize,
    functions: &mut HashMap<String, ContextRef>,
) -> Result<ContextRef> {
    let mut open: Option<ContextRef> = None;

    for (index, line) in lines.iter().enumerate() {
        if let Some(context) = &open {
            if let Some(body_line) = line.strip_prefix(INDENT) {
                context.borrow_mut().push_line(body_line);
                continue;
            }
            open = None;
        }

        if let Ok((Command::Def, args)) = grammar.parse(line) {
            let name = read_name(args.first())?;
            if functions.contains_key(&name) {
                return Err(DebugError::FunctionAlreadyDefined(name));
            }
            let line_offset = base_offset + index + 1;
            log::trace!("discovered function {} at offset {}", name, line_offset);
            let context = ExecutionContext::shared(&name, Vec::new(), line_offset);
            functions.insert(name, context.clone());
            open = Some(context);
        }
        // Anything else is a main-program line; the root context keeps it.
    }

    Ok(ExecutionContext::shared("main", lines.to_vec(), base_offset))
}
