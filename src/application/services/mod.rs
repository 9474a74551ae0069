//! Application services - Use case implementations
//!
//! Each service owns one slice of client state and talks to the outside world
//! only through the outbound ports.

pub mod catalog_service;
pub mod draft_store;
pub mod roster_service;
pub mod session_service;
pub mod submission_service;
pub mod wizard_service;

pub use catalog_service::{Catalog, CatalogService};
pub use draft_store::{Adjustment, DraftRejection, DraftStore};
pub use roster_service::{RefreshOutcome, Roster, RosterService};
pub use session_service::{SessionError, SessionService};
pub use submission_service::{SubmissionError, SubmissionService};
pub use wizard_service::WizardService;
