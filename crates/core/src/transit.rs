//! Hostel gate transit log rules.

use crate::error::CoreError;

/// Maximum length of a transit purpose note.
pub const MAX_PURPOSE_LEN: usize = 200;

text_enum! {
    pub enum TransitDirection {
        Entry => "ENTRY",
        Exit => "EXIT",
    }
}

pub fn validate_purpose(purpose: &str) -> Result<(), CoreError> {
    let trimmed = purpose.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Purpose is required".into()));
    }
    if trimmed.chars().count() > MAX_PURPOSE_LEN {
        return Err(CoreError::Validation(format!(
            "Purpose must be at most {MAX_PURPOSE_LEN} characters"
        )));
    }
    Ok(())
}

/// Whether a student is currently outside, given their most recent entry.
///
/// No history means the student is inside.
pub fn is_outside(last: Option<TransitDirection>) -> bool {
    last == Some(TransitDirection::Exit)
}

/// Reject logging the same direction twice in a row (e.g. two exits).
pub fn validate_sequence(
    last: Option<TransitDirection>,
    next: TransitDirection,
) -> Result<(), CoreError> {
    match (last, next) {
        (Some(TransitDirection::Exit), TransitDirection::Exit) => Err(CoreError::Conflict(
            "Student is already checked out".into(),
        )),
        (None | Some(TransitDirection::Entry), TransitDirection::Entry) => Err(
            CoreError::Conflict("Student is already inside the hostel".into()),
        ),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn purpose_required() {
        assert!(validate_purpose("Library").is_ok());
        assert!(validate_purpose("   ").is_err());
        assert!(validate_purpose(&"a".repeat(MAX_PURPOSE_LEN + 1)).is_err());
    }

    #[test]
    fn outside_only_after_exit() {
        assert!(!is_outside(None));
        assert!(!is_outside(Some(TransitDirection::Entry)));
        assert!(is_outside(Some(TransitDirection::Exit)));
    }

    #[test]
    fn alternating_sequence_enforced() {
        assert!(validate_sequence(None, TransitDirection::Exit).is_ok());
        assert!(validate_sequence(Some(TransitDirection::Exit), TransitDirection::Entry).is_ok());
        assert_matches!(
            validate_sequence(Some(TransitDirection::Exit), TransitDirection::Exit),
            Err(CoreError::Conflict(_))
        );
        assert_matches!(
            validate_sequence(None, TransitDirection::Entry),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn direction_wire_format() {
        assert_eq!(TransitDirection::Exit.as_str(), "EXIT");
        assert_eq!("ENTRY".parse::<TransitDirection>().unwrap(), TransitDirection::Entry);
    }
}
