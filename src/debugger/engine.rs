use super::context::CallStack;
use super::memory::Memory;
use super::stepping::RunMode;
use crate::error::{DebugError, Result};
use crate::io::LineSink;
use crate::parser::{discover_functions, read_name, read_value, Command, Grammar, INDENT};

/// Whether incoming lines are commands to execute or raw script text being
/// absorbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    NoCode,
    WaitingForCode,
    CodeAcquired,
}

/// The debugger engine: owns the grammar, the program state, the call stack
/// and the interpreter mode for the lifetime of one interpreter instance.
pub struct Debugger {
    grammar: Grammar,
    memory: Memory,
    stack: CallStack,
    mode: Mode,
}

impl Debugger {
    pub fn new() -> Self {
        Self {
            grammar: Grammar::new(),
            memory: Memory::new(),
            stack: CallStack::new(),
            mode: Mode::NoCode,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn call_stack(&self) -> &CallStack {
        &self.stack
    }

    /// Handle one logical line. This is the single error boundary: any
    /// failure becomes one line on the sink and the engine stays ready for
    /// the next line.
    pub fn handle_line(&mut self, line: &str, out: &mut dyn LineSink) {
        if let Err(err) = self.dispatch(line, out) {
            out.write_line(&err.to_string());
        }
    }

    fn dispatch(&mut self, line: &str, out: &mut dyn LineSink) -> Result<()> {
        match self.mode {
            Mode::WaitingForCode => self.acquire_code(line),
            Mode::NoCode | Mode::CodeAcquired => self.execute_statement(line, out),
        }
    }

    /// Absorb the script payload (the lines between `set code` and
    /// `end set code`, delivered newline-joined as one logical line). The
    /// mode advances before discovery runs, so a trailing `end set code` is
    /// an ordinary command even when discovery fails.
    fn acquire_code(&mut self, payload: &str) -> Result<()> {
        self.mode = Mode::CodeAcquired;
        self.stack.clear();
        self.memory.reset_program();

        let lines: Vec<String> = payload.lines().map(str::to_string).collect();
        log::debug!("acquiring {} script lines", lines.len());
        let root = discover_functions(&self.grammar, &lines, 0, self.memory.functions_mut())?;
        self.memory.install_root(root);
        Ok(())
    }

    fn execute_statement(&mut self, line: &str, out: &mut dyn LineSink) -> Result<()> {
        let (command, args) = self.grammar.parse(line)?;
        log::trace!("dispatching {:?} {:?}", command, args);

        match command {
            Command::Set => {
                let name = read_name(args.first())?;
                let value = read_value(args.get(1))?;
                let position = self.current_position();
                self.memory.set_variable(&name, value, position);
            }
            Command::Sub => {
                let name = read_name(args.first())?;
                let value = read_value(args.get(1))?;
                let position = self.current_position();
                self.memory.subtract_variable(&name, value, position)?;
            }
            Command::Print => {
                let name = read_name(args.first())?;
                let value = self.memory.value_of(&name)?;
                out.write_line(&value.to_string());
            }
            Command::Rem => {
                let name = read_name(args.first())?;
                self.memory.remove_variable(&name)?;
            }
            Command::Def => self.skip_function_body(),
            Command::Call => {
                let name = read_name(args.first())?;
                let context = self.memory.function(&name)?;
                self.stack.push(context);
            }
            Command::SetCode => self.mode = Mode::WaitingForCode,
            Command::EndSetCode => {
                if self.mode == Mode::NoCode {
                    return Err(DebugError::CodeBlockNotOpen);
                }
                self.mode = Mode::CodeAcquired;
            }
            Command::Run => self.resume(RunMode::Run, out)?,
            Command::Step => self.resume(RunMode::Step, out)?,
            Command::StepOver => self.resume(RunMode::StepOver, out)?,
            Command::AddBreak => {
                let position = read_value(args.first())? as usize;
                self.memory.breakpoints_mut().add(position);
            }
            Command::PrintMem => {
                for (name, value, position) in self.memory.variables_sorted() {
                    out.write_line(&format!("{} = {} (changed at {})", name, value, position));
                }
            }
            Command::PrintTrace => self.print_trace(out),
        }
        Ok(())
    }

    /// Absolute position of the statement currently executing, or 0 for a
    /// line handled with an empty stack.
    fn current_position(&self) -> usize {
        self.stack
            .top()
            .map(|frame| frame.borrow().absolute_position())
            .unwrap_or(0)
    }

    /// Runtime `def`: execution reached a function header whose body was
    /// already extracted by discovery, so move the pointer past the indented
    /// lines. The run loop's own advance then lands on the line after the
    /// body.
    fn skip_function_body(&mut self) {
        if let Some(frame) = self.stack.top() {
            let mut frame = frame.borrow_mut();
            while frame.peek_next().map_or(false, |l| l.starts_with(INDENT)) {
                frame.advance();
            }
        }
    }

    /// One line per frame above the bottom, top-down: the position of the
    /// `call` statement in the caller, then the callee's name. Callers have
    /// always advanced past their `call` by the time a callee is on the
    /// stack, hence the minus one.
    fn print_trace(&self, out: &mut dyn LineSink) {
        let frames = self.stack.frames();
        for i in (1..frames.len()).rev() {
            let callee = frames[i].borrow();
            let caller = frames[i - 1].borrow();
            let call_site = caller.absolute_position().saturating_sub(1);
            out.write_line(&format!("{}: {}", call_site, callee.name()));
        }
    }

    fn resume(&mut self, mode: RunMode, out: &mut dyn LineSink) -> Result<()> {
        if self.stack.is_empty() {
            let root = self.memory.root().ok_or(DebugError::NoCodeLoaded)?;
            self.stack.push(root);
        }
        self.drive(mode, out)
    }

    /// The run loop. Drives the top frame until the mode's stop condition
    /// fires or the stack empties. A statement error propagates out with the
    /// failing frame's pointer not yet advanced.
    fn drive(&mut self, mode: RunMode, out: &mut dyn LineSink) -> Result<()> {
        let starting_depth = self.stack.depth();
        let mut executed = 0usize;
        log::debug!("{:?} loop entered at depth {}", mode, starting_depth);

        loop {
            let frame = match self.stack.top() {
                Some(frame) => frame.clone(),
                None => break,
            };

            let statement = frame.borrow().current_line().map(str::to_string);
            let Some(statement) = statement else {
                // Frame exhausted: rewind it for later re-entry and pop.
                frame.borrow_mut().rewind();
                self.stack.pop();
                if mode == RunMode::StepOver && self.stack.depth() == starting_depth {
                    log::debug!("stepped-over call returned");
                    break;
                }
                if self.stack.is_empty() {
                    log::debug!("program finished, clearing variables");
                    self.memory.clear_variables();
                }
                continue;
            };

            self.execute_statement(&statement, out)?;
            // Depth is measured after execution, so a call made at the
            // starting depth is not counted as the stepped-over statement.
            if mode != RunMode::StepOver || self.stack.depth() == starting_depth {
                executed += 1;
            }
            frame.borrow_mut().advance();

            if mode != RunMode::Run && executed > 0 {
                break;
            }
            let at_breakpoint = self.stack.top().map_or(false, |top| {
                self.memory
                    .breakpoints()
                    .contains(top.borrow().absolute_position())
            });
            if at_breakpoint && (mode != RunMode::StepOver || self.stack.depth() == starting_depth) {
                log::debug!("stopped at breakpoint, depth {}", self.stack.depth());
                break;
            }
        }
        Ok(())
    }
}

impl Default for Debugger {
    fn default() -> Self {
        Self::new()
    }
}
