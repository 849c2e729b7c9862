//! Tri-state field value for partial updates.

/// One field of a partial update.
///
/// A plain `Option<T>` cannot tell "leave it alone" apart from "clear it",
/// so updates carry this instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Partial<T> {
    /// Leave the field unchanged.
    Absent,
    /// Clear the field. Only meaningful for optional fields.
    Null,
    /// Set the field to the value.
    Present(T),
}

impl<T> Default for Partial<T> {
    fn default() -> Self {
        Partial::Absent
    }
}

impl<T> Partial<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Partial::Absent)
    }

    /// Resolves the new value of an optional field.
    pub fn apply_to_option(self, current: Option<T>) -> Option<T> {
        match self {
            Partial::Absent => current,
            Partial::Null => None,
            Partial::Present(value) => Some(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_absent() {
        let partial: Partial<String> = Partial::default();
        assert!(partial.is_absent());
    }

    #[test]
    fn test_apply_to_option() {
        let current = Some("old".to_string());
        assert_eq!(Partial::Absent.apply_to_option(current.clone()), current);
        assert_eq!(Partial::<String>::Null.apply_to_option(current.clone()), None);
        assert_eq!(
            Partial::Present("new".to_string()).apply_to_option(current),
            Some("new".to_string())
        );
    }
}
