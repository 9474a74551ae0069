//! Domain layer - Core character-building logic with no I/O
//!
//! This layer contains:
//! - Entities: WizardDraft, Character, catalog records
//! - Value Objects: Ability scores, slots, score methods, rule tables
//! - Domain Services: Ability engine, derived stats, draft migration

pub mod entities;
pub mod services;
pub mod value_objects;
