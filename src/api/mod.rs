//! Form service client module for HTTP communication

mod client;
mod traits;

pub use client::{FormApiClient, FormResponse};
pub use traits::FormApi;

#[cfg(test)]
pub use client::UserResponse;
#[cfg(test)]
pub use traits::MockFormApi;
