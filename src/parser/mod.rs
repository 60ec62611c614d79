mod discovery;
mod grammar;

pub use discovery::{discover_functions, INDENT};
pub use grammar::{read_name, read_value, Command, Grammar, VOCABULARY};
