//! CLI operation handlers.
//!
//! [`browse`] loads one page of reviews; output formatting lives in
//! [`output`].

pub mod browse;
pub mod output;
