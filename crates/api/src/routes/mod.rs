pub mod announcements;
pub mod auth;
pub mod complaints;
pub mod dashboard;
pub mod fees;
pub mod health;
pub mod mess;
pub mod transit;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                                  login (public)
/// /auth/me                                     current user
///
/// /users                                       create (admin)
/// /users/students                              list (warden/admin)
/// /users/wardens                               list (admin)
/// /users/{id}                                  get (self/staff), delete (admin)
///
/// /complaints                                  list (scoped), create (student)
/// /complaints/{id}                             get (scoped)
/// /complaints/{id}/timeline                    progress stages (scoped)
/// /complaints/{id}/resolve                     mark resolved (warden/admin)
/// /complaints/{id}/reject                      reject (warden/admin)
/// /complaints/{id}/confirm                     confirm fix (owning student)
/// /complaints/{id}/dispute                     dispute fix (owning student)
///
/// /fee                                         own overview or staff summary
/// /fee/{fee_type}                              submit document (student)
/// /fee/students                                per-student review list (staff)
/// /fee/students/{id}                           one student's fees (staff)
/// /fee/students/{id}/timeline                  progress stages (scoped)
/// /fee/students/{id}/{fee_type}/approve        approve (warden/admin)
/// /fee/students/{id}/{fee_type}/reject         reject with reason (warden/admin)
///
/// /announcement                                list (scoped), create (staff)
/// /announcement/{id}                           delete (staff)
///
/// /mess/menu                                   get (scoped), upsert (staff)
/// /mess/feedback                               list (staff), create (student)
///
/// /transit                                     list (scoped), log (student)
///
/// /dashboard                                   role-specific summary
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/complaints", complaints::router())
        .nest("/fee", fees::router())
        .nest("/announcement", announcements::router())
        .nest("/mess", mess::router())
        .nest("/transit", transit::router())
        .nest("/dashboard", dashboard::router())
}
