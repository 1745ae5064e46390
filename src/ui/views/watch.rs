use tsratchet::application::WatchEvent;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Changed paths listed inline before collapsing to a count
const MAX_LISTED_PATHS: usize = 3;

pub fn render_watch_header(root: &str, supports_color: bool, supports_unicode: bool) -> String {
    let mut header = CommandHeader::new(Icon::Watch, "tsratchet watch");
    header.add("Repo", root);
    header.add("Hint", "Press Ctrl+C to stop");
    header.render(supports_color, supports_unicode)
}

pub fn render_watch_event(
    timestamp: &str,
    event: &WatchEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let prefix = ColoredText::dim(format!("[{}]", timestamp)).render(supports_color);
    let icon = |i: Icon| i.colored(supports_color, supports_unicode);

    match event {
        WatchEvent::WatchStarted {
            watching,
            debounce_ms,
            ..
        } => {
            let target = if watching.is_empty() {
                "files in scope".to_string()
            } else {
                watching.join(", ")
            };
            format!(
                "{} {} Watching {} (debounce {}ms)\n",
                prefix,
                icon(Icon::Watch),
                target,
                debounce_ms
            )
        }
        WatchEvent::FilesChanged { paths } => format!(
            "{} {} Changed: {}\n",
            prefix,
            icon(Icon::Arrow),
            summarize_paths(paths)
        ),
        WatchEvent::RunComplete {
            files,
            success,
            lint_errors,
            type_errors,
            warnings,
            ..
        } => {
            let mut line = if *success {
                format!(
                    "{} {} {} {} clean",
                    prefix,
                    icon(Icon::Success),
                    files,
                    if *files == 1 { "file" } else { "files" }
                )
            } else if type_errors + lint_errors == 0 {
                format!("{} {} Run failed", prefix, icon(Icon::Error))
            } else {
                format!(
                    "{} {} {} type errors, {} lint errors in {} files",
                    prefix,
                    icon(Icon::Error),
                    type_errors,
                    lint_errors,
                    files
                )
            };
            if *warnings > 0 {
                line.push_str(&format!(" ({} warnings)", warnings));
            }
            line.push('\n');
            line
        }
        WatchEvent::Error { message } => format!(
            "{} {} Error: {}\n",
            prefix,
            icon(Icon::Error),
            message
        ),
        WatchEvent::Shutdown => format!("\n{} {} Watch stopped.\n", prefix, icon(Icon::Watch)),
    }
}

fn summarize_paths(paths: &[String]) -> String {
    if paths.len() <= MAX_LISTED_PATHS {
        return paths.join(", ");
    }
    format!(
        "{} and {} more",
        paths[..MAX_LISTED_PATHS].join(", "),
        paths.len() - MAX_LISTED_PATHS
    )
}
