//! Issue body rendering using Handlebars.
//!
//! The default template lays out the Mantis description followed by the
//! optional "Steps to reproduce" and "Additional information" sections. A
//! custom template can be registered in its place.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, TemplateRenderer, DEFAULT_ISSUE_BODY_TEMPLATE};
