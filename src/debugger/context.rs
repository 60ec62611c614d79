use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to a frame. A function's context is referenced, not cloned,
/// each time it is called, so concurrent activations of the same function
/// share one instruction pointer.
pub type ContextRef = Rc<RefCell<ExecutionContext>>;

/// A reusable unit of executable lines plus its own instruction pointer; the
/// unit pushed and popped on the call stack.
#[derive(Debug)]
pub struct ExecutionContext {
    name: String,
    lines: Vec<String>,
    line_offset: usize,
    instruction_pointer: usize,
}

impl ExecutionContext {
    pub fn new(name: impl Into<String>, lines: Vec<String>, line_offset: usize) -> Self {
        Self {
            name: name.into(),
            lines,
            line_offset,
            instruction_pointer: 0,
        }
    }

    pub fn shared(name: impl Into<String>, lines: Vec<String>, line_offset: usize) -> ContextRef {
        Rc::new(RefCell::new(Self::new(name, lines, line_offset)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The statement's index in the original, fully-flattened script.
    pub fn absolute_position(&self) -> usize {
        self.line_offset + self.instruction_pointer
    }

    pub fn end_reached(&self) -> bool {
        self.instruction_pointer == self.lines.len()
    }

    pub fn current_line(&self) -> Option<&str> {
        self.lines.get(self.instruction_pointer).map(String::as_str)
    }

    pub fn peek_next(&self) -> Option<&str> {
        self.lines.get(self.instruction_pointer + 1).map(String::as_str)
    }

    pub fn advance(&mut self) {
        self.instruction_pointer += 1;
    }

    /// Reset the pointer so the same shared context can be re-entered later.
    pub fn rewind(&mut self) {
        self.instruction_pointer = 0;
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Frame sequence with the currently executing frame on top. Empty only
/// before any run and after a top-level run completes.
#[derive(Debug, Default)]
pub struct CallStack {
    frames: Vec<ContextRef>,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: ContextRef) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<ContextRef> {
        self.frames.pop()
    }

    pub fn top(&self) -> Option<&ContextRef> {
        self.frames.last()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Bottom-to-top view, for trace rendering.
    pub fn frames(&self) -> &[ContextRef] {
        &self.frames
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
