//! Service layer for the user registry.
//! - Loads and saves the whole users file on every operation.
//! - Reuses validation and user shapes from the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod user;
#[cfg(test)]
pub mod test_support;
