// Model artifact stored as a single JSON document
use crate::application::repository::ArtifactRepository;
use crate::domain::artifact::ModelArtifact;
use crate::infrastructure::{ensure_parent_dir, write_staged};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct JsonArtifactRepository {
    path: PathBuf,
}

impl JsonArtifactRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ArtifactRepository for JsonArtifactRepository {
    fn save(&self, artifact: &ModelArtifact) -> io::Result<()> {
        ensure_parent_dir(&self.path)?;

        let bytes = serde_json::to_vec(artifact)?;
        write_staged(&self.path, |staging| fs::write(staging, &bytes))?;

        tracing::info!("Saved model → {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Option<ModelArtifact> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No model artifact at {}", self.path.display());
                return None;
            }
            Err(e) => {
                tracing::warn!("Could not read model {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_slice::<ModelArtifact>(&bytes) {
            Ok(artifact) if artifact.is_supported() => Some(artifact),
            Ok(artifact) => {
                tracing::warn!(
                    "Ignoring model {} with unsupported format version {}",
                    self.path.display(),
                    artifact.format_version
                );
                None
            }
            Err(e) => {
                tracing::warn!("Could not parse model {}: {}", self.path.display(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::tests::row;
    use crate::domain::pipeline::FittedPipeline;
    use crate::infrastructure::staging_path;

    fn artifact() -> ModelArtifact {
        let rows: Vec<_> = (0..10)
            .map(|h| row("field_1", h, 12.0 + 3.0 * h as f64))
            .collect();
        let pipeline = FittedPipeline::fit(&rows).unwrap();
        ModelArtifact::new(pipeline, 10, 0, None)
    }

    #[test]
    fn test_missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonArtifactRepository::new(dir.path().join("models/baseline.json"));
        assert!(repo.load().is_none());
    }

    #[test]
    fn test_unreadable_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("baseline.json");
        fs::write(&path, b"not a model").unwrap();

        assert!(JsonArtifactRepository::new(path).load().is_none());
    }

    #[test]
    fn test_unsupported_version_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonArtifactRepository::new(dir.path().join("baseline.json"));
        let mut stale = artifact();
        stale.format_version = 0;
        repo.save(&stale).unwrap();

        assert!(repo.load().is_none());
    }

    #[test]
    fn test_save_replaces_previous_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonArtifactRepository::new(dir.path().join("models/baseline.json"));

        let first = artifact();
        repo.save(&first).unwrap();
        let mut second = artifact();
        second.train_rows = 99;
        repo.save(&second).unwrap();

        let loaded = repo.load().unwrap();
        assert_eq!(loaded.train_rows, 99);
        assert_eq!(
            loaded.pipeline.encoder().categories(),
            first.pipeline.encoder().categories()
        );
        assert!(!staging_path(repo.path()).exists());
    }

    #[test]
    fn test_failed_save_cleans_up_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory where the artifact should go makes the rename fail
        let path = dir.path().join("baseline.json");
        fs::create_dir_all(path.join("occupied")).unwrap();
        let repo = JsonArtifactRepository::new(&path);

        assert!(repo.save(&artifact()).is_err());
        assert!(!staging_path(repo.path()).exists());
        assert!(path.join("occupied").is_dir());
    }
}
