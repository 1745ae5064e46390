//! Plain-text "stylish" lint report
//!
//! ```text
//!
//! /repo/src/a.ts
//!   3:10  error    Missing return type  @typescript-eslint/explicit-function-return-type
//!   7:1   warning  Unexpected console   no-console
//!
//! ✖ 2 problems (1 error, 1 warning)
//! ```
//!
//! Files without messages are omitted; an entirely clean report is empty.

use unicode_width::UnicodeWidthStr;

use crate::domain::ports::{LintFileResult, LintSeverity};

pub fn format_stylish(results: &[LintFileResult]) -> String {
    let mut output = String::new();
    let mut errors = 0usize;
    let mut warnings = 0usize;

    for result in results {
        if result.messages.is_empty() {
            continue;
        }
        errors += result.error_count;
        warnings += result.warning_count;

        let rows: Vec<[String; 4]> = result
            .messages
            .iter()
            .map(|m| {
                [
                    format!("{}:{}", m.line, m.column),
                    match m.severity {
                        LintSeverity::Error => "error".to_string(),
                        LintSeverity::Warning => "warning".to_string(),
                    },
                    m.message.replace('\n', " ").trim_end_matches('.').to_string(),
                    m.rule_id.clone().unwrap_or_default(),
                ]
            })
            .collect();

        let mut widths = [0usize; 4];
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.width());
            }
        }

        output.push('\n');
        output.push_str(&result.file.display().to_string());
        output.push('\n');
        for row in &rows {
            let mut line = String::from("  ");
            for (i, cell) in row.iter().enumerate() {
                line.push_str(cell);
                if i + 1 < row.len() {
                    line.push_str(&" ".repeat(widths[i] - cell.width() + 2));
                }
            }
            output.push_str(line.trim_end());
            output.push('\n');
        }
    }

    let total = errors + warnings;
    if total == 0 {
        return String::new();
    }

    output.push_str(&format!(
        "\n\u{2716} {} {} ({} {}, {} {})\n",
        total,
        plural(total, "problem"),
        errors,
        plural(errors, "error"),
        warnings,
        plural(warnings, "warning"),
    ));
    output
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
