//! Core types and configuration for imgmatrix.
//!
//! This crate defines the `imgmatrix.toml` schema ([`MatrixConfig`]), the
//! image matrix ([`ImageMatrix`]), tag alias derivation, pipeline step labels,
//! and shared error types.

pub mod config;
pub mod error;
pub mod label;
pub mod matrix;
pub mod tags;

pub use config::{ImageConfig, MatrixConfig, MatrixSpec, VersionAliases};
pub use error::{Error, Result};
pub use label::sanitize;
pub use matrix::{CanonicalImage, ExtendedImage, ImageMatrix, build_matrix};
pub use tags::derive_tags;
