//! Codefresh deploy pipeline: prepare → build per target → test → push.

use imgmatrix_core::{ImageMatrix, MatrixConfig, derive_tags, sanitize};
use serde::{Serialize, Serializer};

use crate::dockerfile::SMOKE_TEST;
use crate::error::EmitError;

/// Output path, relative to the output root.
pub const PIPELINE_PATH: &str = ".codefresh/deploy-build-image.yaml";

const CLONE_STEP: &str = "main_clone";
const PREPARE_STAGE: &str = "prepare";
const TEST_STAGE: &str = "test";
const PUSH_STAGE: &str = "push";

#[derive(Debug, Serialize)]
pub struct Pipeline {
    pub version: String,
    pub stages: Vec<String>,
    pub steps: Steps,
}

/// Step ids mapped to steps, serialized in insertion order.
#[derive(Debug, Default)]
pub struct Steps(Vec<(String, Step)>);

impl Steps {
    pub fn push(&mut self, label: String, step: Step) {
        self.0.push((label, step));
    }

    pub fn get(&self, label: &str) -> Option<&Step> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, s)| s)
    }
}

impl Serialize for Steps {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(label, step)| (label, step)))
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Step {
    GitClone {
        stage: String,
        repo: String,
        revision: String,
    },
    Parallel {
        stage: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        when: Option<When>,
        steps: Steps,
    },
    Build {
        image_name: String,
        target: String,
        tag: String,
        registry: String,
        dockerfile: String,
    },
    Freestyle {
        image: String,
        registry: String,
        commands: Vec<String>,
    },
    Push {
        candidate: String,
        registry: String,
        tag: String,
    },
}

#[derive(Debug, Serialize)]
pub struct When {
    pub branch: BranchFilter,
}

#[derive(Debug, Serialize)]
pub struct BranchFilter {
    pub only: Vec<String>,
}

/// Label of the parallel step (and stage) building one target.
pub fn build_stage_label(target: &str) -> String {
    sanitize("build_", target)
}

/// Label of the step building one extended image.
pub fn build_step_label(extended_name: &str) -> String {
    sanitize("b", extended_name)
}

pub fn test_step_label(extended_name: &str) -> String {
    sanitize("t", extended_name)
}

pub fn push_step_label(tag: &str) -> String {
    sanitize("p", tag)
}

/// Builds the Codefresh pipeline document.
pub struct PipelineGenerator<'a> {
    config: &'a MatrixConfig,
    matrix: &'a ImageMatrix,
}

impl<'a> PipelineGenerator<'a> {
    pub fn new(config: &'a MatrixConfig, matrix: &'a ImageMatrix) -> Self {
        Self { config, matrix }
    }

    pub fn pipeline(&self) -> Pipeline {
        let targets = &self.config.matrix.targets;

        let mut stages = vec![PREPARE_STAGE.to_owned()];
        stages.extend(targets.iter().map(|t| build_stage_label(t)));
        stages.push(TEST_STAGE.to_owned());
        stages.push(PUSH_STAGE.to_owned());

        let mut steps = Steps::default();
        steps.push(
            CLONE_STEP.to_owned(),
            Step::GitClone {
                stage: PREPARE_STAGE.to_owned(),
                repo: self.config.image.repo.clone(),
                revision: "${{CF_BRANCH}}".to_owned(),
            },
        );
        for target in targets {
            let label = build_stage_label(target);
            steps.push(
                label.clone(),
                Step::Parallel {
                    stage: label,
                    when: None,
                    steps: self.build_steps(target),
                },
            );
        }
        steps.push(
            TEST_STAGE.to_owned(),
            Step::Parallel {
                stage: TEST_STAGE.to_owned(),
                when: None,
                steps: self.test_steps(),
            },
        );
        steps.push(
            PUSH_STAGE.to_owned(),
            Step::Parallel {
                stage: PUSH_STAGE.to_owned(),
                when: Some(When {
                    branch: BranchFilter {
                        only: vec![self.config.image.push_branch.clone()],
                    },
                }),
                steps: self.push_steps(),
            },
        );

        Pipeline {
            version: "1.0".to_owned(),
            stages,
            steps,
        }
    }

    pub fn render(&self) -> Result<String, EmitError> {
        let yaml =
            serde_yaml::to_string(&self.pipeline()).map_err(|e| EmitError::Serialize {
                artifact: PIPELINE_PATH,
                source: e,
            })?;
        Ok(format!("{}{yaml}", crate::GENERATED_HEADER))
    }

    fn build_steps(&self, target: &str) -> Steps {
        let mut steps = Steps::default();
        for image in self.matrix.for_target(target) {
            steps.push(
                build_step_label(&image.name),
                Step::Build {
                    image_name: self.config.image.name.clone(),
                    target: target.to_owned(),
                    tag: format!("${{{{CF_BUILD_ID}}}}-{}", image.name),
                    registry: self.config.image.registry.clone(),
                    dockerfile: crate::generator::dockerfile_path(&image.base),
                },
            );
        }
        steps
    }

    fn test_steps(&self) -> Steps {
        let mut steps = Steps::default();
        for image in &self.matrix.extended {
            steps.push(
                test_step_label(&image.name),
                Step::Freestyle {
                    image: format!(
                        "{}:${{{{CF_BUILD_ID}}}}-{}",
                        self.config.image.name, image.name
                    ),
                    registry: self.config.image.registry.clone(),
                    commands: vec![format!("php {SMOKE_TEST}")],
                },
            );
        }
        steps
    }

    fn push_steps(&self) -> Steps {
        let mut steps = Steps::default();
        for image in &self.matrix.extended {
            let candidate = format!("${{{{{}}}}}", build_step_label(&image.name));
            for tag in derive_tags(&image.name, &self.config.aliases) {
                steps.push(
                    push_step_label(&tag),
                    Step::Push {
                        candidate: candidate.clone(),
                        registry: self.config.image.registry.clone(),
                        tag,
                    },
                );
            }
        }
        steps
    }
}
