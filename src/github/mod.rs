mod auth;
mod client;
mod client_builder;
mod enumerator;
mod error;
pub mod models;
mod result;

pub use auth::Auth;
pub use client::Client;
pub use client_builder::ClientBuilder;
pub use enumerator::Enumerator;
pub use error::Error;
pub use result::Result;
