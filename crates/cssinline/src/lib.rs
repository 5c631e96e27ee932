//! Stylesheet-to-HTML inlining for templates and the command line.
//!
//! An [`InlineFilter`] turns an HTML payload into the same payload with the
//! rules of one stylesheet written into `style` attributes. Filters are
//! obtained from a [`FilterRegistry`], which keeps one filter per stylesheet
//! identifier for the life of the process so each stylesheet is read and
//! compiled once.

mod config;
mod filter;
mod registry;

pub use config::InlineConfig;
pub use filter::InlineFilter;
pub use registry::{FilterRegistry, filter_for, global_registry};
