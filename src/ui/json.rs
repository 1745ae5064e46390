use std::io::{self, Write};

/// Write one NDJSON line and flush, so piped consumers see events as they happen.
pub fn write_line(out: &mut impl Write, line: &str) -> io::Result<()> {
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()
}

/// Write a pre-serialized event to stdout.
pub fn emit(line: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_line(&mut out, line)
}

/// Event line for a command that failed before producing a result.
pub fn error_event(command: &str, message: &str) -> String {
    serde_json::json!({
        "command": command,
        "event": "error",
        "message": message,
    })
    .to_string()
}
