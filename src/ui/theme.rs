use crate::relation::RelationKind;
use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    pub info: Style,
    pub dim: Style,
    pub enabled: bool,
}

impl Theme {
    pub fn detect() -> Self {
        if !console::Term::stdout().is_term() {
            return Self::plain();
        }
        Self::colored()
    }

    pub fn colored() -> Self {
        Self {
            header: Style::new().cyan().bold(),
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
            warn: Style::new().yellow().bold(),
            info: Style::new().magenta(),
            dim: Style::new().white().dimmed(),
            enabled: true,
        }
    }

    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            success: Style::new(),
            error: Style::new(),
            warn: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            enabled: false,
        }
    }

    /// Terminal style approximating the default palette colour of a relation
    pub fn relation(&self, kind: RelationKind) -> Style {
        if !self.enabled {
            return Style::new();
        }
        match kind {
            RelationKind::Reference => Style::new().red(),
            RelationKind::CallCallee => Style::new().purple(),
            RelationKind::CallArgumentBinding => Style::new().yellow(),
            RelationKind::ValueAssignment => Style::new().green(),
            RelationKind::ReturnArgument => Style::new().bright_magenta(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use owo_colors::OwoColorize;

    #[test]
    fn test_plain_theme_leaves_text_untouched() {
        let plain = Theme::plain();
        let styled = "ref".style(plain.relation(RelationKind::Reference)).to_string();
        assert_eq!(styled, "ref");
    }

    #[test]
    fn test_colored_theme_styles_relations() {
        let colored = Theme::colored();
        let styled = "ref".style(colored.relation(RelationKind::Reference)).to_string();
        assert_ne!(styled, "ref");
        assert!(styled.contains("ref"));
    }
}
