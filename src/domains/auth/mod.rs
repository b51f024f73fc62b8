//! Auth domain: the OAuth credential store.
//!
//! Owns the single active session, refreshes it transparently before
//! expiry, and persists the credential record across restarts. The token
//! endpoint is reached through the `TokenExchanger` seam.

mod error;
mod session;
mod store;
mod token;

#[cfg(test)]
pub mod testing;

pub use error::AuthError;
pub use session::Session;
pub use store::CredentialStore;
pub use token::{SpotifyTokenExchanger, TokenExchanger, TokenGrant};
