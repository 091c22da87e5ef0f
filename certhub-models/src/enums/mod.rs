mod common;
mod rbac;

pub use common::*;
pub use rbac::*;
