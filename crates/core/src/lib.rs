//! Core logic for Folio.
//!
//! This crate contains the business rules with ZERO web or database dependencies.
//!
//! # Modules
//!
//! - `auth` - Admin credential hashing and verification
//! - `hero` - Homepage hero content and the single-active-record rule
//! - `storage` - Object storage adapter (S3 via OpenDAL)

pub mod auth;
pub mod hero;
pub mod storage;
