//! Handlers for the `/users` resource (account management).

use axum::extract::{Path, Query, State};
use axum::response::Response;
use hostelia_core::pagination::Paginated;
use hostelia_core::roles::{Role, Viewer};
use hostelia_core::types::DbId;
use hostelia_db::models::user::{CreateUser, CreateUserRequest, User, UserResponse};
use hostelia_db::repositories::{FeeRepo, UserRepo};

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::handlers::list_scope;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::query::ListParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Turn a validated request into an insert, enforcing the per-role shape:
/// students and wardens need a hostel, only students keep room and year,
/// admins belong to no hostel.
fn prepare_user(input: CreateUserRequest, password_hash: String) -> AppResult<CreateUser> {
    let hostel = input
        .hostel
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty());
    if input.role.requires_hostel() && hostel.is_none() {
        return Err(AppError::validation(format!(
            "hostel: is required for a {}",
            input.role
        )));
    }

    let is_student = input.role == Role::Student;
    Ok(CreateUser {
        name: input.name.trim().to_string(),
        email: input.email.trim().to_lowercase(),
        password_hash,
        role: input.role,
        hostel: if input.role == Role::Admin { None } else { hostel },
        room_no: if is_student { input.room_no } else { None },
        year: if is_student { input.year } else { None },
    })
}

/// Whether `viewer` may look at `user`'s profile.
fn can_view_user(viewer: &Viewer, user: &User) -> bool {
    if viewer.user_id == user.id {
        return true;
    }
    match (viewer.role, user.hostel.as_deref()) {
        (Role::Admin, _) => true,
        (Role::Warden, Some(hostel)) => viewer.can_manage_hostel(hostel),
        _ => false,
    }
}

/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ValidatedJson(input): ValidatedJson<CreateUserRequest>,
) -> AppResult<Response> {
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let create = prepare_user(input, password_hash)?;

    let user = UserRepo::create(&state.pool, &create).await?;
    if user.role == Role::Student {
        FeeRepo::ensure_rows(&state.pool, user.id).await?;
    }

    tracing::info!(
        user_id = user.id,
        role = %user.role,
        created_by = admin.user_id,
        "User created"
    );

    Ok(ApiResponse::with_message(UserResponse::from(user), "User created").created())
}

/// GET /api/v1/users/students
pub async fn list_students(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Query(params): Query<ListParams>,
) -> AppResult<ApiResponse<Paginated<UserResponse>>> {
    let mut filter = params.filter();
    filter.hostel = list_scope(&staff.viewer(), filter.hostel.as_deref())?;

    let total = UserRepo::count_students(&state.pool, &filter).await?;
    let pagination = params.pagination(total);
    let students = UserRepo::list_students(
        &state.pool,
        &filter,
        pagination.limit,
        pagination.offset(),
    )
    .await?;

    Ok(ApiResponse::ok(Paginated::new(
        students.into_iter().map(UserResponse::from).collect(),
        &pagination,
    )))
}

/// GET /api/v1/users/wardens
pub async fn list_wardens(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let wardens = UserRepo::list_by_role(&state.pool, Role::Warden).await?;
    Ok(ApiResponse::ok(
        wardens.into_iter().map(UserResponse::from).collect(),
    ))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("User", id))?;

    if !can_view_user(&auth.viewer(), &user) {
        return Err(AppError::forbidden("You may not view this user"));
    }
    Ok(ApiResponse::ok(user.into()))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<()>> {
    if id == admin.user_id {
        return Err(AppError::conflict("You cannot delete your own account"));
    }
    if !UserRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("User", id));
    }

    tracing::info!(user_id = id, deleted_by = admin.user_id, "User deleted");
    Ok(ApiResponse::with_message((), "User deleted"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;
    use hostelia_core::error::CoreError;

    fn request(role: Role, hostel: Option<&str>) -> CreateUserRequest {
        CreateUserRequest {
            name: " Ravi Kumar ".into(),
            email: " Ravi@Uni.edu ".into(),
            password: "password123".into(),
            role,
            hostel: hostel.map(str::to_string),
            room_no: Some("101".into()),
            year: Some(2),
        }
    }

    fn user(id: DbId, role: Role, hostel: Option<&str>) -> User {
        User {
            id,
            name: "Someone".into(),
            email: "someone@uni.edu".into(),
            password_hash: String::new(),
            role,
            hostel: hostel.map(str::to_string),
            room_no: None,
            year: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn student_keeps_room_and_year() {
        let u = prepare_user(request(Role::Student, Some("BH-1")), "h".into()).unwrap();
        assert_eq!(u.email, "ravi@uni.edu");
        assert_eq!(u.name, "Ravi Kumar");
        assert_eq!(u.room_no.as_deref(), Some("101"));
        assert_eq!(u.year, Some(2));
    }

    #[test]
    fn warden_drops_student_fields() {
        let u = prepare_user(request(Role::Warden, Some("BH-1")), "h".into()).unwrap();
        assert_eq!(u.hostel.as_deref(), Some("BH-1"));
        assert_eq!(u.room_no, None);
        assert_eq!(u.year, None);
    }

    #[test]
    fn hostel_required_except_for_admin() {
        assert_matches!(
            prepare_user(request(Role::Student, Some("  ")), "h".into()),
            Err(AppError::Core(CoreError::Validation(_)))
        );
        let admin = prepare_user(request(Role::Admin, Some("BH-1")), "h".into()).unwrap();
        assert_eq!(admin.hostel, None);
    }

    #[test]
    fn profile_visibility() {
        let student = user(5, Role::Student, Some("BH-1"));
        let admin_row = user(1, Role::Admin, None);

        assert!(can_view_user(&Viewer::new(5, Role::Student, Some("BH-1".into())), &student));
        assert!(!can_view_user(&Viewer::new(6, Role::Student, Some("BH-1".into())), &student));
        assert!(can_view_user(&Viewer::new(2, Role::Warden, Some("BH-1".into())), &student));
        assert!(!can_view_user(&Viewer::new(2, Role::Warden, Some("BH-2".into())), &student));
        assert!(!can_view_user(&Viewer::new(2, Role::Warden, Some("BH-1".into())), &admin_row));
        assert!(can_view_user(&Viewer::new(9, Role::Admin, None), &student));
    }
}
