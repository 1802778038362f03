//! Platform abstraction for cursor restoration.
//!
//! The renderer never touches a real UI. After patching, it hands the
//! cursor range and the element that owns it to a `SelectionRestorer`.
//! The browser implementation would use the DOM Selection API, native
//! implementations their own toolkits.

use std::ops::Range;

use thiserror::Error;

/// Error type for platform operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct PlatformError(pub String);

impl From<&str> for PlatformError {
    fn from(s: &str) -> Self {
        PlatformError(s.to_string())
    }
}

impl From<String> for PlatformError {
    fn from(s: String) -> Self {
        PlatformError(s)
    }
}

/// Places a text cursor inside a rendered element.
pub trait SelectionRestorer {
    /// Handle to a live element, as produced by the patch engine.
    type Target;

    /// Restore the `[start, end)` selection inside `target`.
    fn restore(&mut self, range: Range<usize>, target: &Self::Target) -> Result<(), PlatformError>;
}

impl<S: SelectionRestorer> SelectionRestorer for &mut S {
    type Target = S::Target;

    fn restore(&mut self, range: Range<usize>, target: &Self::Target) -> Result<(), PlatformError> {
        (**self).restore(range, target)
    }
}

/// Records every restore call. Useful for headless rendering and tests.
#[derive(Debug, Clone)]
pub struct RecordingRestorer<T> {
    pub calls: Vec<(Range<usize>, T)>,
}

impl<T> Default for RecordingRestorer<T> {
    fn default() -> Self {
        Self { calls: Vec::new() }
    }
}

impl<T> RecordingRestorer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent restore call.
    pub fn last(&self) -> Option<&(Range<usize>, T)> {
        self.calls.last()
    }
}

impl<T: Clone> SelectionRestorer for RecordingRestorer<T> {
    type Target = T;

    fn restore(&mut self, range: Range<usize>, target: &T) -> Result<(), PlatformError> {
        self.calls.push((range, target.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_error_display() {
        let err = PlatformError::from("no selection api");
        assert_eq!(err.to_string(), "no selection api");
    }

    fn restore_with<S: SelectionRestorer>(mut restorer: S, range: Range<usize>, target: &S::Target) {
        restorer.restore(range, target).unwrap();
    }

    #[test]
    fn test_recording_restorer() {
        let mut restorer = RecordingRestorer::<&str>::new();
        assert!(restorer.last().is_none());

        restorer.restore(1..3, &"b1").unwrap();
        restore_with(&mut restorer, 4..4, &"b2");

        assert_eq!(restorer.calls.len(), 2);
        assert_eq!(restorer.last(), Some(&(4..4, "b2")));
    }
}
