//! REST client for the Hostelia API.
//!
//! Every call goes through [`HosteliaClient::execute`], which attaches the
//! bearer token, decodes the response envelope and handles session expiry.

use hostelia_core::fee::{FeeOverview, FeeType, StudentFeeStatus};
use hostelia_core::listing::ListFilter;
use hostelia_core::mess::MealType;
use hostelia_core::pagination::{Paginated, Pagination};
use hostelia_core::timeline::FeeTimelines;
use hostelia_core::transit::TransitDirection;
use hostelia_core::types::DbId;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::envelope::{self, Envelope};
use crate::error::ClientError;
use crate::models::{
    Announcement, ComplaintItem, ComplaintTimeline, DashboardView, FeedbackEntry, LoginResponse,
    NewComplaint, StudentFeeRecord, TransitLog, UserProfile, WeeklyMenu,
};
use crate::session::{Session, SessionStore};

/// HTTP client for one Hostelia server. Clones share the session.
#[derive(Debug, Clone)]
pub struct HosteliaClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl HosteliaClient {
    /// * `base_url` - Server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: SessionStore::default(),
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.base_url)
    }

    // ---- auth ----

    /// Log in and keep the returned token for later calls.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, ClientError> {
        let builder = self
            .http
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }));
        let login: LoginResponse = self.execute(builder, None).await?.data;

        self.session
            .set(Session::new(login.token, login.user.clone(), login.expires_in))
            .await;
        tracing::info!(user_id = login.user.id, role = %login.user.role, "Logged in");
        Ok(login.user)
    }

    pub async fn logout(&self) {
        self.session.clear().await;
    }

    pub async fn me(&self) -> Result<UserProfile, ClientError> {
        self.get(&self.url("/auth/me")).await
    }

    // ---- users ----

    pub async fn list_students(
        &self,
        filter: &ListFilter,
        page: &Pagination,
    ) -> Result<Paginated<UserProfile>, ClientError> {
        let builder = self
            .http
            .get(self.url("/users/students"))
            .query(&filter.query_pairs(page));
        self.call(builder).await
    }

    // ---- complaints ----

    pub async fn list_complaints(
        &self,
        filter: &ListFilter,
        page: &Pagination,
    ) -> Result<Paginated<ComplaintItem>, ClientError> {
        let builder = self
            .http
            .get(self.url("/complaints"))
            .query(&filter.query_pairs(page));
        self.call(builder).await
    }

    pub async fn get_complaint(&self, id: DbId) -> Result<ComplaintItem, ClientError> {
        self.get(&self.url(&format!("/complaints/{id}"))).await
    }

    pub async fn complaint_timeline(&self, id: DbId) -> Result<ComplaintTimeline, ClientError> {
        self.get(&self.url(&format!("/complaints/{id}/timeline"))).await
    }

    pub async fn create_complaint(
        &self,
        complaint: &NewComplaint,
    ) -> Result<ComplaintItem, ClientError> {
        let builder = self.http.post(self.url("/complaints")).json(complaint);
        self.call(builder).await
    }

    pub async fn resolve_complaint(&self, id: DbId) -> Result<ComplaintItem, ClientError> {
        self.post_empty(&format!("/complaints/{id}/resolve")).await
    }

    pub async fn reject_complaint(&self, id: DbId) -> Result<ComplaintItem, ClientError> {
        self.post_empty(&format!("/complaints/{id}/reject")).await
    }

    pub async fn confirm_complaint(&self, id: DbId) -> Result<ComplaintItem, ClientError> {
        self.post_empty(&format!("/complaints/{id}/confirm")).await
    }

    pub async fn dispute_complaint(&self, id: DbId) -> Result<ComplaintItem, ClientError> {
        self.post_empty(&format!("/complaints/{id}/dispute")).await
    }

    // ---- fees ----

    pub async fn fee_overview(&self) -> Result<FeeOverview, ClientError> {
        self.get(&self.url("/fee")).await
    }

    pub async fn submit_fee(
        &self,
        fee_type: FeeType,
        document_url: &str,
    ) -> Result<StudentFeeStatus, ClientError> {
        let builder = self
            .http
            .post(self.url(&format!("/fee/{fee_type}")))
            .json(&json!({ "documentUrl": document_url }));
        self.call(builder).await
    }

    pub async fn student_fees(&self, student_id: DbId) -> Result<StudentFeeRecord, ClientError> {
        self.get(&self.url(&format!("/fee/students/{student_id}"))).await
    }

    pub async fn fee_timelines(&self, student_id: DbId) -> Result<FeeTimelines, ClientError> {
        self.get(&self.url(&format!("/fee/students/{student_id}/timeline")))
            .await
    }

    pub async fn approve_fee(
        &self,
        student_id: DbId,
        fee_type: FeeType,
    ) -> Result<StudentFeeRecord, ClientError> {
        self.post_empty(&format!("/fee/students/{student_id}/{fee_type}/approve"))
            .await
    }

    pub async fn reject_fee(
        &self,
        student_id: DbId,
        fee_type: FeeType,
        reason: &str,
    ) -> Result<StudentFeeRecord, ClientError> {
        let builder = self
            .http
            .post(self.url(&format!("/fee/students/{student_id}/{fee_type}/reject")))
            .json(&json!({ "reason": reason }));
        self.call(builder).await
    }

    // ---- announcements, mess, transit, dashboard ----

    pub async fn announcements(
        &self,
        page: &Pagination,
    ) -> Result<Paginated<Announcement>, ClientError> {
        let builder = self
            .http
            .get(self.url("/announcement"))
            .query(&[("page", page.page), ("limit", page.limit)]);
        self.call(builder).await
    }

    pub async fn mess_menu(&self, hostel: Option<&str>) -> Result<WeeklyMenu, ClientError> {
        let mut builder = self.http.get(self.url("/mess/menu"));
        if let Some(h) = hostel {
            builder = builder.query(&[("hostel", h)]);
        }
        self.call(builder).await
    }

    pub async fn submit_feedback(
        &self,
        meal: MealType,
        rating: i16,
        comment: Option<&str>,
    ) -> Result<FeedbackEntry, ClientError> {
        let builder = self
            .http
            .post(self.url("/mess/feedback"))
            .json(&json!({ "meal": meal, "rating": rating, "comment": comment }));
        self.call(builder).await
    }

    pub async fn transit_log(&self, page: &Pagination) -> Result<Paginated<TransitLog>, ClientError> {
        let builder = self
            .http
            .get(self.url("/transit"))
            .query(&[("page", page.page), ("limit", page.limit)]);
        self.call(builder).await
    }

    pub async fn record_transit(
        &self,
        direction: TransitDirection,
        purpose: &str,
    ) -> Result<TransitLog, ClientError> {
        let builder = self
            .http
            .post(self.url("/transit"))
            .json(&json!({ "direction": direction, "purpose": purpose }));
        self.call(builder).await
    }

    pub async fn dashboard(&self) -> Result<DashboardView, ClientError> {
        self.get(&self.url("/dashboard")).await
    }

    // ---- private helpers ----

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
        self.call(self.http.get(url)).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.call(self.http.post(self.url(path))).await
    }

    /// Send with the current session token and return the envelope data.
    async fn call<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let token = self.session.token().await;
        Ok(self.execute(builder, token).await?.data)
    }

    /// Send `builder`, authenticated with `token` when given.
    ///
    /// A 401 on an authenticated request is [`ClientError::SessionExpired`];
    /// the stored session is cleared only if it still holds `token`.
    async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        token: Option<String>,
    ) -> Result<Envelope<T>, ClientError> {
        let builder = match &token {
            Some(t) => builder.bearer_auth(t),
            None => builder,
        };
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status == StatusCode::UNAUTHORIZED {
            if let Some(t) = token {
                if self.session.clear_if_token(&t).await {
                    tracing::warn!("Session rejected by server; logged out");
                }
                return Err(ClientError::SessionExpired);
            }
        }
        envelope::decode(status.as_u16(), &body)
    }
}
