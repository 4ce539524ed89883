//! # folio-core
//!
//! Core library for the folio portfolio site generator.
//!
//! This crate provides site configuration, the content collections and
//! their loaders, canonical research links, research view state, and the
//! contact-form model.

pub mod config;
pub mod contact;
pub mod content;
pub mod models;
pub mod research;
pub mod slug;
pub mod view;

pub use config::{Config, RelayKind};
pub use contact::{
    mailto_fallback, ContactError, ContactMessage, ContactRelay, Delivery, LogRelay,
    OutgoingEmail, RelayError,
};
pub use content::ContentStore;
pub use models::{IndustryResearch, Project, ResearchPaper, Talk};
pub use research::{build_research_url, generate_research_url, has_link, NUCLEUS_RESEARCH_BASE};
pub use slug::slugify;
pub use view::{research_type_tone, ResearchSelection, ResearchTab, ResearchView};
