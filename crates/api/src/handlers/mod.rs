//! Request handlers, one module per resource.

pub mod announcements;
pub mod auth;
pub mod complaints;
pub mod dashboard;
pub mod fees;
pub mod mess;
pub mod transit;
pub mod users;

use hostelia_core::roles::{Role, Viewer};

use crate::error::{AppError, AppResult};

/// The hostel a list request is restricted to.
///
/// Students and wardens always see their own hostel and may not ask for
/// another; admins see everything unless they name a hostel.
pub(crate) fn list_scope(viewer: &Viewer, requested: Option<&str>) -> AppResult<Option<String>> {
    let requested = requested.map(str::trim).filter(|h| !h.is_empty());
    match viewer.role {
        Role::Admin => Ok(requested.map(str::to_string)),
        Role::Student | Role::Warden => {
            let own = viewer.hostel_scope()?.unwrap_or_default();
            match requested {
                Some(h) if h != own => Err(AppError::forbidden(format!(
                    "You may only view records of your own hostel ({own})"
                ))),
                _ => Ok(Some(own.to_string())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use hostelia_core::error::CoreError;

    #[test]
    fn admin_scope_follows_request() {
        let admin = Viewer::new(1, Role::Admin, None);
        assert_eq!(list_scope(&admin, None).unwrap(), None);
        assert_eq!(list_scope(&admin, Some(" ")).unwrap(), None);
        assert_eq!(list_scope(&admin, Some("BH-2")).unwrap().as_deref(), Some("BH-2"));
    }

    #[test]
    fn warden_is_pinned_to_own_hostel() {
        let warden = Viewer::new(2, Role::Warden, Some("BH-1".into()));
        assert_eq!(list_scope(&warden, None).unwrap().as_deref(), Some("BH-1"));
        assert_eq!(list_scope(&warden, Some("BH-1")).unwrap().as_deref(), Some("BH-1"));
        assert_matches!(
            list_scope(&warden, Some("BH-2")),
            Err(AppError::Core(CoreError::Forbidden(_)))
        );
    }
}
