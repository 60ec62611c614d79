use std::fs;
use std::io;

use script_debugger::debugger::Debugger;
use script_debugger::io::{pump, ReaderSource, StdoutSink};

fn main() -> io::Result<()> {
    pretty_env_logger::init();

    let mut debugger = Debugger::new();
    let mut sink = StdoutSink;

    // An optional script file is loaded through the ordinary set code
    // protocol before the console loop starts.
    if let Some(path) = std::env::args().nth(1) {
        log::debug!("loading {}", path);
        let text = fs::read_to_string(&path)?;
        debugger.handle_line("set code", &mut sink);
        debugger.handle_line(text.trim_end_matches('\n'), &mut sink);
        debugger.handle_line("end set code", &mut sink);
    }

    let stdin = io::stdin();
    let mut source = ReaderSource::new(stdin.lock());
    pump(&mut debugger, &mut source, &mut sink);
    Ok(())
}
