//! # folio-render
//!
//! Template rendering library for folio.
//!
//! This crate handles HTML page and email rendering using Askama.

pub mod emails;
pub mod pages;
pub mod templates;

pub use emails::{EmailContext, RenderError};
pub use pages::{Page, SitePages};
pub use templates::{IndustryEntry, Layout, NavLink};
