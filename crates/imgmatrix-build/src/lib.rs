//! Artifact rendering and writing for imgmatrix.
//!
//! # Generate pipeline
//!
//! ```text
//! imgmatrix generate
//!   1. Config     ── imgmatrix.toml, or built-in defaults
//!   2. Matrix     ── versions × variants, then × targets
//!   3. Render     ── Generator::render()
//!        data/<image>/Dockerfile
//!        .codefresh/deploy-build-image.yaml
//!        .github/workflows/ci.yml
//!        README.md
//!   4. Write      ── ArtifactWriter::write_all()
//! ```
//!
//! `imgmatrix check` runs steps 1-3 and compares the result with the files
//! on disk instead of writing them.
//!
//! # Step labels
//!
//! Every Codefresh step id comes from [`imgmatrix_core::sanitize`]. The push
//! stage refers to build steps by rebuilding their label from the extended
//! image name, so both sides must use the same prefix and input.

pub mod codefresh;
pub mod dockerfile;
pub mod error;
pub mod generator;
pub mod readme;
pub mod workflow;
pub mod writer;

pub use error::EmitError;
pub use generator::{Artifact, Generator};
pub use writer::{ArtifactWriter, Drift, DriftKind, FsSink, OutputSink};

/// First line of every generated YAML file.
pub const GENERATED_HEADER: &str = "# Generated by: imgmatrix generate\n";

/// Command that regenerates all artifacts from the repository root.
pub const REGENERATE_COMMAND: &str = "cargo run --bin imgmatrix -- generate";
