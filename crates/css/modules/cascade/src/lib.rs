//! CSS cascade inputs: shorthand expansion and specificity ranking.
//!
//! [`StyleSheet::parse`] runs the whole front half of the pipeline: grammar
//! parsing, per-block shorthand expansion, per-selector accumulation and the
//! final ordering by descending specificity.

#![forbid(unsafe_code)]

mod expand;
mod stylesheet;

pub use expand::{expand_box_model, expand_positional, expand_properties};
pub use stylesheet::{StyleRule, StyleSheet, rank_by_specificity};
