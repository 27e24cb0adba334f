//! # BinVault Common Library
//!
//! Shared code for the BinVault lookup service including:
//! - Error types
//! - Site normalization (raw input → canonical host key)
//! - Admin credential hashing and verification
//! - API request/response types

pub mod api;
pub mod auth;
pub mod error;
pub mod normalize;

pub use error::{Error, Result};
pub use normalize::normalize;
