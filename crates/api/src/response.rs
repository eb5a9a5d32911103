//! Response envelopes shared by every handler.
//!
//! Single resources are wrapped as `{ "data": ... }`; list endpoints add a
//! `pagination` block next to `data`.

use serde::Serialize;
use scholarship_core::pagination::PageInfo;

/// Standard `{ "data": T }` envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": [...], "pagination": {...} }` envelope for list endpoints.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
}
