use imgmatrix_core::{ImageMatrix, MatrixConfig, derive_tags};

/// Output path, relative to the output root.
pub const README_PATH: &str = "README.md";

/// Renders the published tag listing.
pub struct ReadmeGenerator<'a> {
    config: &'a MatrixConfig,
    matrix: &'a ImageMatrix,
}

impl<'a> ReadmeGenerator<'a> {
    pub fn new(config: &'a MatrixConfig, matrix: &'a ImageMatrix) -> Self {
        Self { config, matrix }
    }

    pub fn render(&self) -> String {
        let tag_lines: Vec<String> = self
            .matrix
            .extended
            .iter()
            .map(|image| {
                let tags: Vec<String> = derive_tags(&image.name, &self.config.aliases)
                    .iter()
                    .map(|tag| format!("`{tag}`"))
                    .collect();
                format!("- {}", tags.join(" "))
            })
            .collect();

        format!(
            r#"# Container Images for ATK

This repository builds `{image}` image and publishes the following tags:

{tags}

## Running Locally

Run `{command}` to regenerate Dockerfiles.
"#,
            image = self.config.image.name,
            tags = tag_lines.join("\n"),
            command = crate::REGENERATE_COMMAND,
        )
    }
}
