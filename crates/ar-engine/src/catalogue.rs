use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::Assessment;

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("catalogue file not found: {path}")]
    NotFound { path: PathBuf },
    #[error("invalid catalogue JSON in {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read catalogue: {0}")]
    Io(#[from] std::io::Error),
}

/// Wire shape of a catalogue source. A missing `assessments` key is an
/// empty catalogue, not an error.
#[derive(Debug, Default, Deserialize)]
struct CatalogueFile {
    #[serde(default)]
    assessments: Vec<Assessment>,
}

/// Read-only, order-preserving snapshot of the assessment catalogue.
/// Lookup by id is a linear scan; the catalogue is bounded to a few
/// hundred records.
#[derive(Debug, Clone, Default)]
pub struct CatalogueStore {
    assessments: Vec<Assessment>,
}

impl CatalogueStore {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogueError> {
        let path = path.as_ref();

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(CatalogueError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(err) => return Err(err.into()),
        };

        let file: CatalogueFile =
            serde_json::from_str(&raw).map_err(|source| CatalogueError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;

        info!(
            path = %path.display(),
            count = file.assessments.len(),
            "catalogue loaded"
        );

        Ok(Self {
            assessments: file.assessments,
        })
    }

    pub fn from_assessments(assessments: Vec<Assessment>) -> Self {
        Self { assessments }
    }

    pub fn len(&self) -> usize {
        self.assessments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assessments.is_empty()
    }

    /// Full catalogue snapshot in load order.
    pub fn get_all(&self) -> &[Assessment] {
        &self.assessments
    }

    /// First record with a matching id, if any.
    pub fn get_by_id(&self, id: &str) -> Option<&Assessment> {
        self.assessments.iter().find(|a| a.id == id)
    }

    /// Records whose name or description contains `term`, case-insensitively.
    /// No validation of `term` happens here: an empty term matches every
    /// record by construction of substring search.
    pub fn search_by_name(&self, term: &str) -> Vec<&Assessment> {
        let needle = term.to_lowercase();
        self.assessments
            .iter()
            .filter(|a| {
                a.name.to_lowercase().contains(&needle)
                    || a.description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .collect()
    }
}
