mod breakpoints;
mod context;
mod engine;
mod memory;
mod stepping;

pub use breakpoints::Breakpoints;
pub use context::{CallStack, ContextRef, ExecutionContext};
pub use engine::{Debugger, Mode};
pub use memory::Memory;
pub use stepping::RunMode;
