use tsratchet::application::RunResult;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_check_header(
    root: &str,
    sources: &[&str],
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Check, "tsratchet check");
    header.add("Repo", root);
    header.add(
        "Sources",
        if sources.is_empty() {
            "none".to_string()
        } else {
            sources.join(", ")
        },
    );
    header.render(supports_color, supports_unicode)
}

/// Full human-readable report of one run
///
/// Diagnostics come first in the tools' own formats, then the verdict panel.
pub fn render_run_report(
    result: &RunResult,
    verbose: u8,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    if result.is_guard_failure() {
        return render_guard_failure(result, supports_color, supports_unicode);
    }

    if result.scope_files.is_empty() {
        return format!(
            "{} Nothing to check: no TypeScript files in scope\n",
            Icon::Success.colored(supports_color, supports_unicode)
        );
    }

    let mut out = String::new();

    if verbose > 0 {
        out.push_str(&ColoredText::dim("Checked:").render(supports_color));
        out.push('\n');
        for file in &result.scope_files {
            out.push_str(&format!(
                "  {} {}\n",
                Icon::Bullet.colored(supports_color, supports_unicode),
                file
            ));
        }
        out.push('\n');
    }

    let diagnostics = result
        .check
        .as_ref()
        .map(|c| c.diagnostics_text.as_str())
        .unwrap_or_default();
    push_block(&mut out, diagnostics);

    let lint_report = result
        .lint
        .as_ref()
        .map(|l| l.formatted.as_str())
        .unwrap_or_default();
    push_block(&mut out, lint_report);

    let mut summary = if result.success {
        ResultSummary::success("Checks passed")
    } else {
        ResultSummary::failure("Checks failed")
    };
    summary.add_stat(plural(result.scope_files.len(), "file checked", "files checked"), result.scope_files.len());
    summary.add_stat(plural(result.type_error_count(), "type error", "type errors"), result.type_error_count());
    let (lint_errors, lint_warnings) = result
        .lint
        .as_ref()
        .map(|l| (l.total_errors(), l.total_warnings()))
        .unwrap_or((0, 0));
    summary.add_stat(plural(lint_errors, "lint error", "lint errors"), lint_errors);
    summary.add_stat(plural(lint_warnings, "lint warning", "lint warnings"), lint_warnings);

    if !result.staged.is_empty() {
        summary.add_info(format!(
            "restaged {} {}",
            result.staged.len(),
            plural(result.staged.len(), "file", "files")
        ));
    }
    for warning in &result.warnings {
        summary.add_warning(warning.as_str());
    }
    if !result.success {
        summary.with_next_step("fix the reported errors and run again");
    }

    out.push_str(&summary.render(supports_color, supports_unicode));
    out
}

fn render_guard_failure(result: &RunResult, supports_color: bool, supports_unicode: bool) -> String {
    let mut out = String::new();
    for violation in &result.guard.violations {
        out.push_str(&format!(
            "{} {}: {}\n",
            Icon::Error.colored(supports_color, supports_unicode),
            ColoredText::plain(violation.file.as_str()).bold().render(supports_color),
            violation.reason
        ));
    }
    out.push('\n');

    let count = result.guard.violations.len();
    let mut summary = ResultSummary::failure("Extension check failed");
    summary.add_stat(plural(count, "file needs renaming", "files need renaming"), count);
    summary.with_next_step("rename to .ts/.tsx and stage again");
    out.push_str(&summary.render(supports_color, supports_unicode));
    out
}

fn push_block(out: &mut String, block: &str) {
    if block.trim().is_empty() {
        return;
    }
    out.push_str(block);
    if !block.ends_with('\n') {
        out.push('\n');
    }
    out.push('\n');
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}
