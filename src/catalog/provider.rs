//! Figure lists per difficulty: the embedded catalog plus user figures
//! kept in the key-value store.

use crate::config::{get_json, FigurePool, KvStore, CUSTOM_FIGURES_KEY};
use crate::figure::{Difficulty, Figure};
use include_dir::{include_dir, Dir};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

static DATA_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/catalog/data");

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("embedded catalog file {0} not found")]
    MissingFile(String),
    #[error("embedded catalog file {0} is not UTF-8")]
    Encoding(String),
    #[error("embedded catalog file {file} is invalid: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct CatalogFile {
    difficulty: Difficulty,
    figures: Vec<Figure>,
}

#[derive(Debug, Clone, Default)]
pub struct FigureCatalog {
    lists: HashMap<Difficulty, Vec<Figure>>,
}

impl FigureCatalog {
    /// The catalog shipped with the binary
    pub fn builtin() -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for difficulty in Difficulty::ALL {
            let file = read_catalog_file(&format!("{difficulty}.json"))?;
            catalog
                .lists
                .entry(file.difficulty)
                .or_default()
                .extend(file.figures);
        }
        Ok(catalog)
    }

    /// Built-in figures followed by the user's own, read from `store`.
    /// Unreadable custom data is logged and skipped.
    pub fn load(store: &dyn KvStore) -> Result<Self, CatalogError> {
        let catalog = Self::builtin()?;
        Ok(catalog.with_custom(custom_figures(store)))
    }

    /// Append figures to their difficulty lists. Ids already present are skipped.
    pub fn with_custom(mut self, figures: Vec<Figure>) -> Self {
        let mut seen: HashSet<_> = self.lists.values().flatten().map(|f| f.id.clone()).collect();
        for figure in figures {
            if !seen.insert(figure.id.clone()) {
                tracing::warn!(id = %figure.id, "custom figure id already in catalog, skipped");
                continue;
            }
            self.lists.entry(figure.difficulty).or_default().push(figure);
        }
        self
    }

    pub fn figures(&self, difficulty: Difficulty) -> &[Figure] {
        self.lists.get(&difficulty).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Source list for a session, in catalog order
    pub fn pool(&self, pool: FigurePool, difficulty: Difficulty) -> Vec<Figure> {
        match pool {
            FigurePool::Difficulty => self.figures(difficulty).to_vec(),
            FigurePool::All => Difficulty::ALL
                .iter()
                .flat_map(|d| self.figures(*d).iter().cloned())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lists.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn read_catalog_file(name: &str) -> Result<CatalogFile, CatalogError> {
    let file = DATA_DIR
        .get_file(name)
        .ok_or_else(|| CatalogError::MissingFile(name.to_string()))?;
    let text = file
        .contents_utf8()
        .ok_or_else(|| CatalogError::Encoding(name.to_string()))?;
    serde_json::from_str(text).map_err(|source| CatalogError::Parse {
        file: name.to_string(),
        source,
    })
}

/// User figures stored under `customFigures`; empty when absent or unreadable.
pub fn custom_figures(store: &dyn KvStore) -> Vec<Figure> {
    match get_json::<Vec<Figure>>(store, CUSTOM_FIGURES_KEY) {
        Ok(None) => Vec::new(),
        Ok(Some(Ok(figures))) => figures,
        Ok(Some(Err(e))) => {
            tracing::warn!(error = %e, "ignoring malformed custom figures");
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not read custom figures");
            Vec::new()
        }
    }
}
