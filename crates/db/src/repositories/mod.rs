//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod announcement_repo;
pub mod complaint_repo;
pub mod fee_repo;
pub mod mess_repo;
pub mod transit_repo;
pub mod user_repo;

pub use announcement_repo::AnnouncementRepo;
pub use complaint_repo::{ComplaintRepo, ComplaintScope};
pub use fee_repo::FeeRepo;
pub use mess_repo::MessRepo;
pub use transit_repo::TransitRepo;
pub use user_repo::UserRepo;
