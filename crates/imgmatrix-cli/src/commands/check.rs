use imgmatrix_build::generator::DATA_DIR;
use imgmatrix_build::{ArtifactWriter, DriftKind, Generator, REGENERATE_COMMAND};
use imgmatrix_core::MatrixConfig;
use std::path::Path;

/// Compare freshly rendered artifacts with the files below `root`.
pub fn check(root: &Path) -> anyhow::Result<()> {
    let config = MatrixConfig::load(root)?;
    let artifacts = Generator::new(&config).render()?;

    let drift = ArtifactWriter::new(root).diff(&artifacts)?;
    if drift.is_empty() {
        println!("All {} generated files are up to date.", artifacts.len());
        return Ok(());
    }

    for entry in &drift {
        eprintln!("  {entry}");
    }

    // generate never deletes, so leftover images need the data dir cleared first
    let fix = if drift.iter().any(|d| d.kind == DriftKind::Orphan) {
        format!("rm -rf {DATA_DIR}/ && {REGENERATE_COMMAND}")
    } else {
        REGENERATE_COMMAND.to_owned()
    };
    anyhow::bail!("{} generated file(s) out of date; run: {fix}", drift.len())
}
