//! Domain types for the user registry.
//! - `user`: stored, input, patch and rendered user shapes plus field validation.
//! - `body`: BMI and weight-category derivation.

pub mod errors;
pub mod body;
pub mod user;

pub use body::{bmi, Verdict};
pub use errors::ModelError;
pub use user::{Gender, StoredUser, UserInput, UserPatch, UserRecord};
