pub mod common;
pub mod policy_evaluation;
pub mod value_iteration;

pub use common::equiprobable_policy;
pub use policy_evaluation::*;
pub use value_iteration::*;
