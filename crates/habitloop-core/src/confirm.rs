//! Yes/no confirmation seam.
//!
//! Destructive commands ask their caller-supplied prompt before mutating.
//! A UI layer provides an interactive implementation; the non-interactive
//! fallbacks here cover degraded surfaces and tests.

/// A yes/no prompt asked before destructive operations.
pub trait ConfirmPrompt {
    fn confirm(&self, message: &str) -> bool;
}

/// Answers yes to everything. The degraded fallback when no prompt
/// surface exists (e.g. `--yes` in scripts).
pub struct AutoConfirm;

impl ConfirmPrompt for AutoConfirm {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

/// Answers no to everything.
pub struct AutoDecline;

impl ConfirmPrompt for AutoDecline {
    fn confirm(&self, _message: &str) -> bool {
        false
    }
}
