//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`]: the caller identified by a JWT Bearer token.
//! - [`rbac::RequireAuth`]: any authenticated caller.
//! - [`rbac::RequireOfficer`]: `officer` or `admin`.

pub mod auth;
pub mod rbac;
