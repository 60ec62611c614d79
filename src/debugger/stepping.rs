/// Run modes for the debugger run loop.
///
/// Run proceeds until the program empties the call stack or a breakpoint is
/// hit. Step executes exactly one statement anywhere in the stack. StepOver
/// executes one statement at the starting depth, running deeper calls to
/// completion transparently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Run,
    Step,
    StepOver,
}
