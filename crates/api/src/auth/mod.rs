//! Bearer-token identity.
//!
//! Tokens are minted by the account service; this crate only validates them.

pub mod jwt;
