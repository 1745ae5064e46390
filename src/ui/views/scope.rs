use tsratchet::application::ScopePreview;
use tsratchet::domain::value_objects::RepoPath;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// What a check would cover, without running it
pub fn render_scope_preview(
    root: &str,
    preview: &ScopePreview,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Scope, "tsratchet scope");
    header.add("Repo", root);
    header.add("Branch", preview.branch.as_str());
    header.add(
        "Sources",
        if preview.sources.is_empty() {
            "none".to_string()
        } else {
            preview.sources.join(", ")
        },
    );

    let mut out = header.render(supports_color, supports_unicode);
    out.push('\n');

    if preview.candidates.is_empty() {
        out.push_str(&format!(
            "{} No changed files in scope\n",
            Icon::Success.colored(supports_color, supports_unicode)
        ));
        return out;
    }

    let violating = |file: &RepoPath| {
        preview
            .guard
            .violations
            .iter()
            .any(|v| &v.file == file)
    };

    for file in &preview.candidates {
        let (icon, note) = if violating(file) {
            (Icon::Error, Some(ColoredText::error("(rename to .ts/.tsx)")))
        } else if preview.checkable.contains(file) {
            (Icon::Success, None)
        } else {
            (Icon::Bullet, Some(ColoredText::dim("(not checked)")))
        };

        out.push_str(&format!(
            "  {} {}",
            icon.colored(supports_color, supports_unicode),
            file
        ));
        if let Some(note) = note {
            out.push(' ');
            out.push_str(&note.render(supports_color));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "\n{} of {} files would be checked\n",
        preview.checkable.len(),
        preview.candidates.len()
    ));
    if !preview.guard.success {
        out.push_str(&format!(
            "{} {}\n",
            Icon::Warning.colored(supports_color, supports_unicode),
            ColoredText::warning("the extension check would fail this run").render(supports_color)
        ));
    }
    out
}
