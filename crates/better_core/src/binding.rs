//! Controlled/uncontrolled value resolution
//!
//! A widget value is either dictated by its owner (controlled) or kept by the
//! widget itself (uncontrolled). Both cases collapse into one rule:
//!
//! ```text
//! effective = external ?? internal
//! ```
//!
//! and internal writes only happen while no external value is supplied.

/// Resolved value of a widget with optional external control
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueBinding<T> {
    external: Option<T>,
    internal: Option<T>,
}

impl<T> ValueBinding<T> {
    /// Widget-owned value with an optional starting value
    pub fn uncontrolled(default: Option<T>) -> Self {
        Self {
            external: None,
            internal: default,
        }
    }

    /// Owner-supplied value
    pub fn controlled(value: T) -> Self {
        Self {
            external: Some(value),
            internal: None,
        }
    }

    /// Replace the externally supplied value (call on every owner update)
    pub fn set_external(&mut self, value: Option<T>) {
        self.external = value;
    }

    pub fn is_controlled(&self) -> bool {
        self.external.is_some()
    }

    /// The effective value
    pub fn get(&self) -> Option<&T> {
        self.external.as_ref().or(self.internal.as_ref())
    }

    /// Write the internal value unless controlled. Returns whether it was written.
    pub fn write(&mut self, value: Option<T>) -> bool {
        if self.is_controlled() {
            return false;
        }
        self.internal = value;
        true
    }
}

impl<T: Clone> ValueBinding<T> {
    pub fn get_cloned(&self) -> Option<T> {
        self.get().cloned()
    }
}

impl<T> Default for ValueBinding<T> {
    fn default() -> Self {
        Self::uncontrolled(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncontrolled_writes() {
        let mut binding = ValueBinding::uncontrolled(Some(1));
        assert!(!binding.is_controlled());
        assert!(binding.write(Some(2)));
        assert_eq!(binding.get(), Some(&2));
        assert!(binding.write(None));
        assert_eq!(binding.get(), None);
    }

    #[test]
    fn test_controlled_ignores_writes() {
        let mut binding = ValueBinding::controlled("a".to_string());
        assert!(!binding.write(Some("b".to_string())));
        assert_eq!(binding.get_cloned(), Some("a".to_string()));

        binding.set_external(Some("c".to_string()));
        assert_eq!(binding.get().map(String::as_str), Some("c"));
    }

    #[test]
    fn test_releasing_control_falls_back_to_internal() {
        let mut binding = ValueBinding::uncontrolled(Some(5));
        binding.set_external(Some(9));
        assert_eq!(binding.get(), Some(&9));
        binding.set_external(None);
        assert_eq!(binding.get(), Some(&5));
    }
}
