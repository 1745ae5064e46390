//! Type-checker diagnostic rendering
//!
//! Mirrors the compiler's own non-pretty format so editors and CI log
//! scrapers can pick the locations up:
//!
//! ```text
//! src/a.ts(3,5): error TS2322: Type 'string' is not assignable to type 'boolean'.
//! ```

use std::path::Path;

use crate::domain::ports::Diagnostic;
use crate::domain::value_objects::RepoPath;

pub fn format_diagnostics(diagnostics: &[Diagnostic], cwd: &Path) -> String {
    let mut output = String::new();
    for diagnostic in diagnostics {
        output.push_str(&format_one(diagnostic, cwd));
        output.push('\n');
    }
    output
}

fn format_one(diagnostic: &Diagnostic, cwd: &Path) -> String {
    let mut lines = diagnostic.message.lines();
    let head = lines.next().unwrap_or_default();

    let mut out = match &diagnostic.file {
        Some(file) => format!(
            "{}({},{}): {} TS{}: {}",
            RepoPath::from_path(file).relative_to(cwd),
            diagnostic.line,
            diagnostic.column,
            diagnostic.category,
            diagnostic.code,
            head
        ),
        None => format!("{} TS{}: {}", diagnostic.category, diagnostic.code, head),
    };

    for continuation in lines {
        out.push_str("\n  ");
        out.push_str(continuation.trim_start());
    }
    out
}
