//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations with no domain
//! knowledge:
//! - Cryptographic utilities (SHA-256, secure randomness, constant-time
//!   comparison)
//! - Password policy and digesting
//! - Cookie building and extraction

pub mod cookie;
pub mod crypto;
pub mod password;
