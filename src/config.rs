//! Engine configuration, loadable from JSON.
//!
//! Every field is optional in the file; missing fields take the defaults
//! below. Command-line flags in the binary override file values.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::engine::DefaultEngine;
use crate::error::ConfigError;
use crate::opening::{OpeningLibrary, PolyglotBook, SelectionMode};
use crate::search::{Minimax, ParallelSearch};

fn default_depth() -> u32 { crate::engine::DEFAULT_DEPTH }

fn default_selection() -> SelectionMode { SelectionMode::HighestWeight }

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Search depth in plies.
    #[serde(default = "default_depth")]
    pub depth: u32,
    /// Worker threads; `None` uses the available hardware parallelism.
    #[serde(default)]
    pub threads: Option<usize>,
    /// Polyglot opening book consulted before searching.
    #[serde(default)]
    pub book: Option<PathBuf>,
    #[serde(default = "default_selection")]
    pub selection: SelectionMode,
    /// Seed for random book selection; entropy when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { depth: default_depth(), threads: None, book: None, selection: default_selection(), seed: None }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: EngineConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let cfg = Self::from_json_str(&fs::read_to_string(path)?)?;
        info!("loaded engine config from {}", path.display());
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 { return Err(ConfigError::ZeroDepth); }
        if self.threads == Some(0) { return Err(ConfigError::ZeroThreads); }
        Ok(())
    }

    pub fn open_book(&self) -> Result<Option<PolyglotBook>, ConfigError> {
        let Some(path) = &self.book else { return Ok(None) };
        let mut book = PolyglotBook::open(path)?.with_selection(self.selection);
        if let Some(seed) = self.seed { book = book.with_seed(seed); }
        Ok(Some(book))
    }

    /// Material-evaluating engine with this configuration's depth, pool size and book.
    pub fn build_engine(&self) -> Result<DefaultEngine, ConfigError> {
        self.validate()?;
        let search = ParallelSearch::new(Minimax::with_material(self.depth), self.threads)?;
        let book = self.open_book()?.map(|b| Box::new(b) as Box<dyn OpeningLibrary>);
        Ok(DefaultEngine::from_parts(search, book))
    }
}
