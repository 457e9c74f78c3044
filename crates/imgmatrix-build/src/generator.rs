use std::path::PathBuf;

use imgmatrix_core::{ImageMatrix, MatrixConfig};

use crate::codefresh::{PIPELINE_PATH, PipelineGenerator};
use crate::dockerfile::{DockerfileGenerator, unknown_stages};
use crate::error::EmitError;
use crate::readme::{README_PATH, ReadmeGenerator};
use crate::workflow::{WORKFLOW_PATH, WorkflowGenerator};

/// Directory holding one build context per canonical image.
pub const DATA_DIR: &str = "data";

/// A rendered file, relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

/// Dockerfile path of a canonical image, as referenced from pipelines.
pub fn dockerfile_path(image_name: &str) -> String {
    format!("{DATA_DIR}/{image_name}/Dockerfile")
}

/// Renders every artifact for one configuration.
pub struct Generator<'a> {
    config: &'a MatrixConfig,
    matrix: ImageMatrix,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a MatrixConfig) -> Self {
        for version in config.unmatched_alias_versions() {
            tracing::warn!(version, "alias version is not in the version list; no tags derived");
        }
        let named = config
            .matrix
            .targets
            .iter()
            .chain(std::iter::once(&config.matrix.default_target))
            .map(String::as_str);
        for target in unknown_stages(named) {
            tracing::warn!(target, "target is not a Dockerfile stage; its builds will fail");
        }

        Self {
            config,
            matrix: ImageMatrix::from_config(config),
        }
    }

    pub fn matrix(&self) -> &ImageMatrix {
        &self.matrix
    }

    /// Dockerfiles first, in canonical order, then pipeline, workflow and README.
    pub fn render(&self) -> Result<Vec<Artifact>, EmitError> {
        let mut artifacts: Vec<Artifact> = self
            .matrix
            .images
            .iter()
            .map(|image| Artifact {
                path: PathBuf::from(dockerfile_path(&image.name)),
                contents: DockerfileGenerator::new(&image.version).render(),
            })
            .collect();

        artifacts.push(Artifact {
            path: PathBuf::from(PIPELINE_PATH),
            contents: PipelineGenerator::new(self.config, &self.matrix).render()?,
        });
        artifacts.push(Artifact {
            path: PathBuf::from(WORKFLOW_PATH),
            contents: WorkflowGenerator::new(&self.matrix).render()?,
        });
        artifacts.push(Artifact {
            path: PathBuf::from(README_PATH),
            contents: ReadmeGenerator::new(self.config, &self.matrix).render(),
        });

        tracing::debug!(
            images = self.matrix.images.len(),
            extended = self.matrix.extended.len(),
            artifacts = artifacts.len(),
            "rendered artifacts"
        );
        Ok(artifacts)
    }
}
