//! Check marks and colors for terminal output.

use console::Style;

/// The kind of line being printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    /// A gate that passed.
    Pass,
    /// A gate that failed, or a fatal error.
    Fail,
    /// Something worth noticing that does not fail the run.
    Caution,
}

impl Mark {
    fn glyph(self) -> &'static str {
        match self {
            Mark::Pass => "✓",
            Mark::Fail => "✗",
            Mark::Caution => "⚠",
        }
    }

    fn style(self) -> Style {
        match self {
            Mark::Pass => Style::new().green(),
            Mark::Fail => Style::new().red().bold(),
            Mark::Caution => Style::new().color256(208),
        }
    }
}

/// Whether output is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    colored: bool,
}

impl Theme {
    /// Colored when stdout is a terminal and `NO_COLOR` is unset.
    pub fn detect() -> Self {
        Self {
            colored: should_use_colors(),
        }
    }

    pub fn colored() -> Self {
        Self { colored: true }
    }

    pub fn plain() -> Self {
        Self { colored: false }
    }

    /// `<glyph> <msg>`, colored for the mark.
    pub fn mark(&self, mark: Mark, msg: &str) -> String {
        let line = format!("{} {}", mark.glyph(), msg);
        if self.colored {
            mark.style().force_styling(true).apply_to(line).to_string()
        } else {
            line
        }
    }

    pub fn heading(&self, title: &str) -> String {
        if self.colored {
            Style::new()
                .bold()
                .magenta()
                .force_styling(true)
                .apply_to(title)
                .to_string()
        } else {
            title.to_string()
        }
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    console::Term::stdout().is_term()
}
