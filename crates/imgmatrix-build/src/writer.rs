use std::io;
use std::path::{Path, PathBuf};

use crate::error::EmitError;
use crate::generator::{Artifact, DATA_DIR};

/// Abstraction over the output filesystem for testability.
///
/// Production code uses [`FsSink`], tests use mockall-generated mocks.
pub trait OutputSink {
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Names of the subdirectories of `path`.
    fn list_dirs(&self, path: &Path) -> io::Result<Vec<String>>;

    fn is_file(&self, path: &Path) -> bool;
}

/// Real filesystem sink.
pub struct FsSink;

impl OutputSink for FsSink {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn list_dirs(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// A generated file whose on-disk copy does not match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drift {
    pub path: PathBuf,
    pub kind: DriftKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftKind {
    Missing,
    Stale,
    /// A Dockerfile under `data/` for an image the matrix no longer has.
    Orphan,
}

impl Drift {
    fn new(path: PathBuf, kind: DriftKind) -> Self {
        Self { path, kind }
    }
}

impl std::fmt::Display for Drift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            DriftKind::Missing => "missing",
            DriftKind::Stale => "stale",
            DriftKind::Orphan => "orphan",
        };
        write!(f, "{kind}: {}", self.path.display())
    }
}

/// Writes artifacts below an output root, parameterized over the sink.
pub struct ArtifactWriter<S: OutputSink = FsSink> {
    root: PathBuf,
    sink: S,
}

impl ArtifactWriter<FsSink> {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            sink: FsSink,
        }
    }
}

impl<S: OutputSink> ArtifactWriter<S> {
    pub fn with_sink(root: impl Into<PathBuf>, sink: S) -> Self {
        Self {
            root: root.into(),
            sink,
        }
    }

    /// Writes every artifact, creating parent directories as needed and
    /// overwriting existing files. Stops at the first failure.
    pub fn write_all(&self, artifacts: &[Artifact]) -> Result<(), EmitError> {
        for artifact in artifacts {
            let path = self.root.join(&artifact.path);

            if let Some(parent) = path.parent() {
                self.sink
                    .create_dir_all(parent)
                    .map_err(|e| EmitError::CreateDir {
                        path: parent.to_path_buf(),
                        source: e,
                    })?;
            }

            self.sink
                .write(&path, &artifact.contents)
                .map_err(|e| EmitError::Write {
                    path: path.clone(),
                    source: e,
                })?;
            tracing::debug!(path = %path.display(), bytes = artifact.contents.len(), "wrote artifact");
        }

        Ok(())
    }

    /// Compares artifacts with the files on disk without writing anything.
    ///
    /// Dockerfiles left under `data/` by images no longer in the matrix are
    /// reported as [`DriftKind::Orphan`].
    pub fn diff(&self, artifacts: &[Artifact]) -> Result<Vec<Drift>, EmitError> {
        let mut drift = Vec::new();

        for artifact in artifacts {
            let path = self.root.join(&artifact.path);
            match self.sink.read_to_string(&path) {
                Ok(existing) if existing == artifact.contents => {}
                Ok(_) => drift.push(Drift::new(artifact.path.clone(), DriftKind::Stale)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    drift.push(Drift::new(artifact.path.clone(), DriftKind::Missing))
                }
                Err(e) => return Err(EmitError::Read { path, source: e }),
            }
        }

        drift.extend(self.orphans(artifacts)?);
        Ok(drift)
    }

    fn orphans(&self, artifacts: &[Artifact]) -> Result<Vec<Drift>, EmitError> {
        let data_dir = self.root.join(DATA_DIR);
        let dirs = match self.sink.list_dirs(&data_dir) {
            Ok(dirs) => dirs,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(EmitError::Read {
                    path: data_dir,
                    source: e,
                });
            }
        };

        let orphans = dirs
            .into_iter()
            .map(|name| Path::new(DATA_DIR).join(name).join("Dockerfile"))
            .filter(|rel| !artifacts.iter().any(|a| &a.path == rel))
            .filter(|rel| self.sink.is_file(&self.root.join(rel)))
            .map(|rel| Drift::new(rel, DriftKind::Orphan))
            .collect();
        Ok(orphans)
    }
}
