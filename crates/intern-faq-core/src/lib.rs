//! # Intern FAQ Core
//!
//! Shared, I/O-free logic for the Intern FAQ Desk: the FAQ data model,
//! the fuzzy index built over it, and the threshold/fallback policy that
//! turns a ranked candidate list into an answer.
//!
//! This crate contains no tokio, HTTP, or filesystem dependencies. The
//! application crate is responsible for loading entries and passing a
//! shared [`matcher::FaqIndex`] into its request path.

pub mod matcher;
pub mod models;
