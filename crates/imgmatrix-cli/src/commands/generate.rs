use imgmatrix_build::{ArtifactWriter, Generator};
use imgmatrix_core::MatrixConfig;
use std::path::Path;

/// Render every artifact and write it below `root`.
pub fn generate(root: &Path) -> anyhow::Result<()> {
    let config = MatrixConfig::load(root)?;
    let generator = Generator::new(&config);
    let artifacts = generator.render()?;

    ArtifactWriter::new(root).write_all(&artifacts)?;

    tracing::info!(
        root = %root.display(),
        images = generator.matrix().images.len(),
        files = artifacts.len(),
        "generated"
    );
    for artifact in &artifacts {
        println!("Generated: {}", artifact.path.display());
    }

    Ok(())
}
