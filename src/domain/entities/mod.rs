//! Domain entities - Records with identity or lifecycle

mod catalog;
mod character;
mod draft;
mod user;

pub use catalog::{Background, CharClass, FeatureEntry, Page, Race, Subrace};
pub use character::{Character, CharacterSubmission, ShareState};
pub use draft::{ClassEntry, DraftPatch, RaceChoice, WizardDraft, DRAFT_VERSION};
pub use user::{AuthGrant, AuthTokens, User};
