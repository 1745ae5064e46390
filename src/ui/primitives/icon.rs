use crossterm::style::Stylize;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Arrow,
    Bullet,
    Check,
    Watch,
    Scope,
}

impl Icon {
    /// Pick the icon for a pass/fail verdict
    pub fn verdict(success: bool) -> Self {
        if success {
            Icon::Success
        } else {
            Icon::Error
        }
    }

    pub fn render(&self, supports_unicode: bool) -> &'static str {
        match (supports_unicode, self) {
            (true, Icon::Success) => theme::icons::SUCCESS,
            (true, Icon::Error) => theme::icons::ERROR,
            (true, Icon::Warning) => theme::icons::WARNING,
            (true, Icon::Arrow) => theme::icons::ARROW,
            (true, Icon::Bullet) => theme::icons::BULLET,
            (true, Icon::Check) => theme::icons::CHECK,
            (true, Icon::Watch) => theme::icons::WATCH,
            (true, Icon::Scope) => theme::icons::SCOPE,
            (false, Icon::Success) => theme::icons_ascii::SUCCESS,
            (false, Icon::Error) => theme::icons_ascii::ERROR,
            (false, Icon::Warning) => theme::icons_ascii::WARNING,
            (false, Icon::Arrow) => theme::icons_ascii::ARROW,
            (false, Icon::Bullet) => theme::icons_ascii::BULLET,
            (false, Icon::Check) => theme::icons_ascii::CHECK,
            (false, Icon::Watch) => theme::icons_ascii::WATCH,
            (false, Icon::Scope) => theme::icons_ascii::SCOPE,
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success => theme::colors::SUCCESS,
            Icon::Error => theme::colors::ERROR,
            Icon::Warning => theme::colors::WARNING,
            Icon::Arrow | Icon::Bullet => theme::colors::DIM,
            Icon::Check | Icon::Watch | Icon::Scope => theme::colors::INFO,
        };
        format!("{}", s.with(color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_renders_ascii_when_unicode_unsupported() {
        assert_eq!(Icon::Success.render(false), "[OK]");
        assert_eq!(Icon::Watch.render(false), "[~]");
    }

    #[test]
    fn verdict_maps_to_success_or_error() {
        assert_eq!(Icon::verdict(true), Icon::Success);
        assert_eq!(Icon::verdict(false), Icon::Error);
    }

    #[test]
    fn colored_is_plain_without_color_support() {
        assert_eq!(Icon::Error.colored(false, true), theme::icons::ERROR);
        assert!(Icon::Error.colored(true, true).contains("\u{1b}["));
    }
}
