//! Unit tests for configuration loading and precedence.
//!
//! Tests are organised into modules by functional area:
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `resolution`: Restaurant, locator, label and timeout resolution tests
//! - `loading`: Environment and CLI loading through `load_from_iter`

mod helpers;
