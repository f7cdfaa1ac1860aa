//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Also report each gate as it passes.
    Verbose,
    /// Install notices and remediation only.
    #[default]
    Normal,
    /// Remediation and errors only.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows notices, headers and warnings.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Check if this mode reports passing gates during a run.
    pub fn shows_gate_results(&self) -> bool {
        matches!(self, Self::Verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_mode_shows_status() {
        assert!(OutputMode::Verbose.shows_status());
        assert!(OutputMode::Normal.shows_status());
        assert!(!OutputMode::Quiet.shows_status());
    }

    #[test]
    fn output_mode_shows_gate_results() {
        assert!(OutputMode::Verbose.shows_gate_results());
        assert!(!OutputMode::Normal.shows_gate_results());
        assert!(!OutputMode::Quiet.shows_gate_results());
    }

    #[test]
    fn output_mode_default() {
        assert_eq!(OutputMode::default(), OutputMode::Normal);
    }
}
