//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use bstrap::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("psutil is not installed. Installing psutil...");
//! ui.remediation(&["'rsync' is not installed.".to_string()]);
//!
//! assert!(ui.has_message("Installing psutil"));
//! assert_eq!(ui.remediation_lines().len(), 1);
//! ```

use super::{OutputMode, UserInterface};

/// Mock UI implementation for testing.
///
/// Captures everything regardless of output mode; mode-dependent
/// filtering is the caller's concern.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    failures: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    remediation: Vec<String>,
    headers: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured failure lines.
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all remediation lines, in print order.
    pub fn remediation_lines(&self) -> &[String] {
        &self.remediation
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific failure was shown.
    pub fn has_failure(&self, msg: &str) -> bool {
        self.failures.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Check if any remediation line contains `text`.
    pub fn has_remediation(&self, text: &str) -> bool {
        self.remediation.iter().any(|m| m.contains(text))
    }

    /// Whether nothing at all was written.
    pub fn is_silent(&self) -> bool {
        self.messages.is_empty()
            && self.successes.is_empty()
            && self.failures.is_empty()
            && self.warnings.is_empty()
            && self.errors.is_empty()
            && self.remediation.is_empty()
            && self.headers.is_empty()
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn failure(&mut self, msg: &str) {
        self.failures.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn remediation(&mut self, lines: &[String]) {
        self.remediation.extend(lines.iter().cloned());
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_ui_captures_messages() {
        let mut ui = MockUI::new();
        ui.message("Hello");
        ui.message("World");
        assert_eq!(ui.messages(), ["Hello", "World"]);
    }

    #[test]
    fn mock_ui_captures_outcomes() {
        let mut ui = MockUI::new();
        ui.success("Done");
        ui.failure("bazel");
        ui.warning("Careful");
        ui.error("Failed");

        assert!(ui.has_success("Done"));
        assert!(ui.has_failure("bazel"));
        assert_eq!(ui.warnings(), ["Careful"]);
        assert!(ui.has_error("Failed"));
    }

    #[test]
    fn mock_ui_keeps_remediation_order() {
        let mut ui = MockUI::new();
        ui.remediation(&["first".to_string(), "".to_string()]);
        ui.remediation(&["second".to_string()]);
        assert_eq!(ui.remediation_lines(), ["first", "", "second"]);
    }

    #[test]
    fn mock_ui_starts_silent() {
        let mut ui = MockUI::new();
        assert!(ui.is_silent());
        ui.show_header("Preflight");
        assert!(!ui.is_silent());
        assert_eq!(ui.headers(), ["Preflight"]);
    }

    #[test]
    fn mock_ui_with_mode() {
        let ui = MockUI::with_mode(OutputMode::Verbose);
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
    }
}
