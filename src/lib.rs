//! Seismic catalog viewer.
//!
//! [`data`] holds the pipeline: raw rows are normalized into an immutable
//! [`data::model::Dataset`], which then serves magnitude range queries
//! ([`data::filter`]) and a twelve-bucket monthly distribution
//! ([`data::aggregate`]). Everything under [`ui`] only renders those results.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
