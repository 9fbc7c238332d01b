//! Application state for a Hostelia front end.
//!
//! State lives in explicit slices owned by [`AppStore`] and changes only
//! through [`AppStore::dispatch`]. Loads are tagged with a [`RequestId`]
//! from [`AppStore::begin`]; a result whose tag is no longer the latest for
//! its slice is dropped, so the last request issued wins regardless of the
//! order responses arrive in.

use hostelia_core::dashboard::{summarize_complaints, ComplaintSummary};
use hostelia_core::fee::{FeeOverview, StudentFeeStatus};
use hostelia_core::listing::{sort_by_name, ListFilter};
use hostelia_core::pagination::{Paginated, Pagination, DEFAULT_PAGE_LIMIT};
use hostelia_core::timeline::{fee_timelines, FeeTimelines};

use crate::models::{ComplaintItem, DashboardView, UserProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    Complaints,
    Fees,
    Dashboard,
}

/// Tag identifying one load of one slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId {
    pub slice: Slice,
    pub seq: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<UserProfile>,
    /// Set when the server ended the session, cleared on the next login.
    pub expired: bool,
}

#[derive(Debug, Clone)]
pub struct ComplaintsState {
    pub items: Vec<ComplaintItem>,
    pub filter: ListFilter,
    pub pagination: Pagination,
    pub status: LoadStatus,
    /// Bumped whenever `items` changes.
    pub revision: u64,
    latest: u64,
}

impl Default for ComplaintsState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            filter: ListFilter::default(),
            pagination: Pagination::from_request(None, Some(DEFAULT_PAGE_LIMIT), 0),
            status: LoadStatus::Idle,
            revision: 0,
            latest: 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeesState {
    pub overview: Option<FeeOverview>,
    pub status: LoadStatus,
    latest: u64,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub view: Option<DashboardView>,
    pub status: LoadStatus,
    latest: u64,
    /// Complaint summary computed locally, keyed on the complaints revision.
    memo: Option<(u64, ComplaintSummary)>,
}

#[derive(Debug, Clone)]
pub enum Action {
    LoggedIn(UserProfile),
    LoggedOut,
    SessionExpired,
    /// Replace the complaint filter; resets to the first page and supersedes
    /// any complaint load in flight.
    SetComplaintFilter(ListFilter),
    /// Move to another page; supersedes any complaint load in flight.
    SetComplaintPage(i64),
    ComplaintsLoaded {
        request: RequestId,
        page: Paginated<ComplaintItem>,
    },
    /// A single complaint changed (created or transitioned).
    ComplaintUpdated(ComplaintItem),
    FeesLoaded {
        request: RequestId,
        overview: FeeOverview,
    },
    FeesUpdated(StudentFeeStatus),
    DashboardLoaded {
        request: RequestId,
        view: DashboardView,
    },
    RequestFailed {
        request: RequestId,
        message: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct AppStore {
    pub auth: AuthState,
    pub complaints: ComplaintsState,
    pub fees: FeesState,
    pub dashboard: DashboardState,
}

impl AppStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load of `slice`, superseding any load still in flight.
    pub fn begin(&mut self, slice: Slice) -> RequestId {
        let (latest, status) = match slice {
            Slice::Complaints => (&mut self.complaints.latest, &mut self.complaints.status),
            Slice::Fees => (&mut self.fees.latest, &mut self.fees.status),
            Slice::Dashboard => (&mut self.dashboard.latest, &mut self.dashboard.status),
        };
        *latest += 1;
        *status = LoadStatus::Loading;
        RequestId { slice, seq: *latest }
    }

    fn is_current(&self, request: RequestId) -> bool {
        let latest = match request.slice {
            Slice::Complaints => self.complaints.latest,
            Slice::Fees => self.fees.latest,
            Slice::Dashboard => self.dashboard.latest,
        };
        request.seq == latest
    }

    /// Apply `action`. Returns `false` when it was dropped as stale.
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::LoggedIn(user) => {
                *self = AppStore::default();
                self.auth.user = Some(user);
            }
            Action::LoggedOut => *self = AppStore::default(),
            Action::SessionExpired => {
                *self = AppStore::default();
                self.auth.expired = true;
            }
            Action::SetComplaintFilter(filter) => {
                self.complaints.filter = filter.normalized();
                self.complaints.pagination.page = 1;
                self.complaints.latest += 1;
            }
            Action::SetComplaintPage(page) => {
                self.complaints.pagination.page = page.max(1);
                self.complaints.latest += 1;
            }
            Action::ComplaintsLoaded { request, page } => {
                if !self.is_current(request) {
                    tracing::debug!(seq = request.seq, "Dropping stale complaints response");
                    return false;
                }
                let c = &mut self.complaints;
                c.items = page.items;
                c.pagination = page.pagination.into();
                c.status = LoadStatus::Loaded;
                c.revision += 1;
            }
            Action::ComplaintUpdated(item) => {
                let c = &mut self.complaints;
                match c.items.iter_mut().find(|i| i.id == item.id) {
                    Some(existing) => *existing = item,
                    None => {
                        c.items.insert(0, item);
                        c.pagination.total += 1;
                    }
                }
                c.revision += 1;
            }
            Action::FeesLoaded { request, overview } => {
                if !self.is_current(request) {
                    return false;
                }
                self.fees.overview = Some(overview);
                self.fees.status = LoadStatus::Loaded;
            }
            Action::FeesUpdated(status) => {
                self.fees.overview = Some(FeeOverview::Student(status));
            }
            Action::DashboardLoaded { request, view } => {
                if !self.is_current(request) {
                    return false;
                }
                self.dashboard.view = Some(view);
                self.dashboard.status = LoadStatus::Loaded;
            }
            Action::RequestFailed { request, message } => {
                if !self.is_current(request) {
                    return false;
                }
                let status = match request.slice {
                    Slice::Complaints => &mut self.complaints.status,
                    Slice::Fees => &mut self.fees.status,
                    Slice::Dashboard => &mut self.dashboard.status,
                };
                *status = LoadStatus::Failed(message);
            }
        }
        true
    }

    /// Query parameters for the next complaints load.
    pub fn complaint_query(&self) -> Vec<(&'static str, String)> {
        self.complaints
            .filter
            .query_pairs(&self.complaints.pagination)
    }

    /// Summary of the loaded complaints, recomputed only when they change.
    pub fn complaint_summary(&mut self) -> &ComplaintSummary {
        let revision = self.complaints.revision;
        if !matches!(self.dashboard.memo, Some((r, _)) if r == revision) {
            self.dashboard.memo = None;
        }
        let items = &self.complaints.items;
        let (_, summary) = self.dashboard.memo.get_or_insert_with(|| {
            let progress: Vec<_> = items.iter().map(ComplaintItem::progress).collect();
            (revision, summarize_complaints(&progress))
        });
        summary
    }

    /// The logged-in student's fee timelines, when a student overview is loaded.
    pub fn fee_timelines(&self) -> Option<FeeTimelines> {
        match &self.fees.overview {
            Some(FeeOverview::Student(status)) => Some(fee_timelines(status)),
            _ => None,
        }
    }

    /// Loaded complaints sorted by title, case-insensitively.
    pub fn complaints_by_title(&self) -> Vec<&ComplaintItem> {
        let mut items: Vec<&ComplaintItem> = self.complaints.items.iter().collect();
        sort_by_name(&mut items, |c| c.title.as_str());
        items
    }
}
