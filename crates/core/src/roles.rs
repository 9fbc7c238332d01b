//! Roles and hostel-scoped visibility.
//!
//! Role names must match the `users.role` check constraint in
//! `db/migrations/20260101000001_create_users.sql`.

use crate::error::CoreError;
use crate::types::DbId;

text_enum! {
    /// The three account roles.
    pub enum Role {
        Student => "student",
        Warden => "warden",
        Admin => "admin",
    }
}

impl Role {
    /// Wardens and admins.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Warden | Role::Admin)
    }

    /// Students and wardens must belong to a hostel; admins span all of them.
    pub fn requires_hostel(&self) -> bool {
        !matches!(self, Role::Admin)
    }
}

/// The identity a request is evaluated against.
///
/// Built from token claims by the API layer and from the cached session by
/// the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub user_id: DbId,
    pub role: Role,
    pub hostel: Option<String>,
}

impl Viewer {
    pub fn new(user_id: DbId, role: Role, hostel: Option<String>) -> Self {
        Self {
            user_id,
            role,
            hostel,
        }
    }

    /// The hostel this viewer is restricted to, or `None` for admins.
    ///
    /// Fails for a student or warden whose account carries no hostel, which
    /// can only happen with a malformed token.
    pub fn hostel_scope(&self) -> Result<Option<&str>, CoreError> {
        match self.role {
            Role::Admin => Ok(None),
            Role::Student | Role::Warden => self
                .hostel
                .as_deref()
                .map(Some)
                .ok_or_else(|| CoreError::Forbidden("Account is not assigned to a hostel".into())),
        }
    }

    /// Whether this viewer may read records owned by `student_id` living in
    /// `student_hostel`.
    pub fn can_view_student(&self, student_id: DbId, student_hostel: &str) -> bool {
        match self.role {
            Role::Admin => true,
            Role::Warden => self.hostel.as_deref() == Some(student_hostel),
            Role::Student => self.user_id == student_id,
        }
    }

    /// Whether this viewer may act as staff on a record in `hostel`.
    pub fn can_manage_hostel(&self, hostel: &str) -> bool {
        match self.role {
            Role::Admin => true,
            Role::Warden => self.hostel.as_deref() == Some(hostel),
            Role::Student => false,
        }
    }

    /// Resolve the hostel a staff member is operating on.
    ///
    /// Wardens always operate on their own hostel (a conflicting `requested`
    /// value is forbidden); admins must name one explicitly.
    pub fn resolve_managed_hostel(&self, requested: Option<&str>) -> Result<String, CoreError> {
        match self.role {
            Role::Admin => requested.map(str::to_string).ok_or_else(|| {
                CoreError::Validation("hostel is required for admin requests".into())
            }),
            Role::Warden => {
                let own = self.hostel_scope()?.unwrap_or_default();
                match requested {
                    Some(h) if h != own => Err(CoreError::Forbidden(format!(
                        "Wardens may only manage their own hostel ({own})"
                    ))),
                    _ => Ok(own.to_string()),
                }
            }
            Role::Student => Err(CoreError::Forbidden("Warden or Admin role required".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn warden(hostel: &str) -> Viewer {
        Viewer::new(10, Role::Warden, Some(hostel.to_string()))
    }

    #[test]
    fn unknown_role_is_rejected() {
        let result = "superuser".parse::<Role>();
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("superuser"));
    }

    #[test]
    fn admin_has_no_hostel_scope() {
        let admin = Viewer::new(1, Role::Admin, None);
        assert_eq!(admin.hostel_scope().unwrap(), None);
    }

    #[test]
    fn warden_without_hostel_is_forbidden() {
        let broken = Viewer::new(2, Role::Warden, None);
        assert_matches!(broken.hostel_scope(), Err(CoreError::Forbidden(_)));
    }

    #[test]
    fn student_sees_only_own_records() {
        let student = Viewer::new(5, Role::Student, Some("BH-1".into()));
        assert!(student.can_view_student(5, "BH-1"));
        assert!(!student.can_view_student(6, "BH-1"));
    }

    #[test]
    fn warden_sees_own_hostel_only() {
        let w = warden("BH-1");
        assert!(w.can_view_student(99, "BH-1"));
        assert!(!w.can_view_student(99, "GH-2"));
        assert!(w.can_manage_hostel("BH-1"));
        assert!(!w.can_manage_hostel("GH-2"));
    }

    #[test]
    fn warden_cannot_manage_other_hostel() {
        let w = warden("BH-1");
        assert_eq!(w.resolve_managed_hostel(None).unwrap(), "BH-1");
        assert_eq!(w.resolve_managed_hostel(Some("BH-1")).unwrap(), "BH-1");
        assert_matches!(
            w.resolve_managed_hostel(Some("GH-2")),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn admin_must_name_hostel() {
        let admin = Viewer::new(1, Role::Admin, None);
        assert_matches!(
            admin.resolve_managed_hostel(None),
            Err(CoreError::Validation(_))
        );
        assert_eq!(admin.resolve_managed_hostel(Some("GH-2")).unwrap(), "GH-2");
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Warden).unwrap(), "\"warden\"");
        let parsed: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(parsed, Role::Admin);
    }
}
