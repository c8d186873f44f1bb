#![allow(non_snake_case)]

pub mod client;
pub mod descriptor;
pub mod dispatch;
pub mod error;
pub mod services;
pub mod token;

pub use client::ApiClient;
pub use descriptor::{FormField, FormValue, Method, RequestBody, RequestDescriptor};
pub use dispatch::DispatchHandle;
pub use error::ApiError;
pub use token::{provider_fn, SharedTokenProvider, StaticToken, TokenError, TokenProvider};
pub use tokio_util::sync::CancellationToken;
