//! Shared HTTP API types
//!
//! Wire-level request and response types used by the service crate and its
//! integration tests. No HTTP framework dependencies here; axum-specific
//! code lives in `binvault-api`.

pub mod types;

pub use types::{
    AddRequest, BinCode, ErrorResponse, LoginRequest, LoginResponse, LookupResponse,
    MutationResponse, RemoveRequest, StatsResponse,
};
