//! GitHub Actions workflow: templating drift check plus a Dockerfile build matrix.

use imgmatrix_core::ImageMatrix;
use serde::Serialize;

use crate::error::EmitError;
use crate::generator::DATA_DIR;

/// Output path, relative to the output root.
pub const WORKFLOW_PATH: &str = ".github/workflows/ci.yml";

const SCHEDULE_CRON: &str = "20 */2 * * *";
const CHECKOUT_ACTION: &str = "actions/checkout@v4";
const RUST_TOOLCHAIN_ACTION: &str = "dtolnay/rust-toolchain@stable";
const RUNNER: &str = "ubuntu-latest";

#[derive(Debug, Serialize)]
pub struct Workflow {
    pub name: String,
    #[serde(rename = "on")]
    pub triggers: Triggers,
    pub jobs: Jobs,
}

#[derive(Debug, Serialize)]
pub struct Triggers {
    pub pull_request: EventFilter,
    pub push: EventFilter,
    pub schedule: Vec<Schedule>,
}

/// An event trigger with no branch or path filters.
#[derive(Debug, Default, Serialize)]
pub struct EventFilter {}

#[derive(Debug, Serialize)]
pub struct Schedule {
    pub cron: String,
}

#[derive(Debug, Serialize)]
pub struct Jobs {
    pub unit: Job,
    pub build: Job,
}

#[derive(Debug, Serialize)]
pub struct Job {
    pub name: String,
    #[serde(rename = "runs-on")]
    pub runs_on: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
    pub steps: Vec<JobStep>,
}

#[derive(Debug, Serialize)]
pub struct Strategy {
    #[serde(rename = "fail-fast")]
    pub fail_fast: bool,
    pub matrix: BuildMatrix,
}

#[derive(Debug, Serialize)]
pub struct BuildMatrix {
    #[serde(rename = "imageName")]
    pub image_name: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct JobStep {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<String>,
}

impl JobStep {
    fn uses(name: &str, action: &str) -> Self {
        Self {
            name: name.to_owned(),
            uses: Some(action.to_owned()),
            run: None,
        }
    }

    fn run(name: &str, script: String) -> Self {
        Self {
            name: name.to_owned(),
            uses: None,
            run: Some(script),
        }
    }
}

/// Builds the CI workflow document.
pub struct WorkflowGenerator<'a> {
    matrix: &'a ImageMatrix,
}

impl<'a> WorkflowGenerator<'a> {
    pub fn new(matrix: &'a ImageMatrix) -> Self {
        Self { matrix }
    }

    pub fn workflow(&self) -> Workflow {
        Workflow {
            name: "CI".to_owned(),
            triggers: Triggers {
                pull_request: EventFilter::default(),
                push: EventFilter::default(),
                schedule: vec![Schedule {
                    cron: SCHEDULE_CRON.to_owned(),
                }],
            },
            jobs: Jobs {
                unit: self.templating_job(),
                build: self.build_job(),
            },
        }
    }

    pub fn render(&self) -> Result<String, EmitError> {
        let yaml =
            serde_yaml::to_string(&self.workflow()).map_err(|e| EmitError::Serialize {
                artifact: WORKFLOW_PATH,
                source: e,
            })?;
        Ok(format!("{}{yaml}", crate::GENERATED_HEADER))
    }

    /// Regenerates everything and fails when the committed tree differs.
    fn templating_job(&self) -> Job {
        Job {
            name: "Templating".to_owned(),
            runs_on: RUNNER.to_owned(),
            strategy: None,
            steps: vec![
                JobStep::uses("Checkout", CHECKOUT_ACTION),
                JobStep::uses("Install Rust", RUST_TOOLCHAIN_ACTION),
                JobStep::run(
                    "Check if files are in-sync",
                    format!(
                        "rm -rf {DATA_DIR}/\n{}\ngit diff --exit-code\n",
                        crate::REGENERATE_COMMAND
                    ),
                ),
            ],
        }
    }

    fn build_job(&self) -> Job {
        // one unconditional retry absorbs transient network failures on the runners
        let build = format!("docker build -f {DATA_DIR}/${{{{ matrix.imageName }}}}/Dockerfile ./");

        Job {
            name: "Build".to_owned(),
            runs_on: RUNNER.to_owned(),
            strategy: Some(Strategy {
                fail_fast: false,
                matrix: BuildMatrix {
                    image_name: self
                        .matrix
                        .image_names()
                        .into_iter()
                        .map(str::to_owned)
                        .collect(),
                },
            }),
            steps: vec![
                JobStep::uses("Checkout", CHECKOUT_ACTION),
                JobStep::run("Build Dockerfile", format!("{build} || {build}")),
            ],
        }
    }
}
