// Repository traits for dataset and model artifact persistence
use crate::domain::artifact::ModelArtifact;
use crate::domain::dataset::Dataset;
use crate::domain::error::DataError;

pub trait DatasetRepository: Send + Sync {
    /// Persist the dataset, replacing any previous one wholesale
    fn save(&self, dataset: &Dataset) -> Result<(), DataError>;

    /// Load the dataset; `DataError::MissingDataFile` before the first generation run
    fn load(&self) -> Result<Dataset, DataError>;
}

pub trait ArtifactRepository: Send + Sync {
    /// Replace the stored artifact wholesale
    fn save(&self, artifact: &ModelArtifact) -> std::io::Result<()>;

    /// The stored artifact, or None when it is missing or unreadable
    fn load(&self) -> Option<ModelArtifact>;
}
