pub mod debugger;
pub mod error;
pub mod io;
pub mod parser;

pub use debugger::{Debugger, RunMode};
pub use error::{DebugError, Result};
