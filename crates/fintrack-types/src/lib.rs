#![allow(non_snake_case)]

pub mod error;
pub mod finance;
pub use error::*;
pub use finance::*;

/// Session credential accepted by the route guard, shared with handlers via request extensions.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionToken(pub String);
