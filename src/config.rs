//! Configuração do ensemble: a lista ordenada de estilos e os limites do pool.
//!
//! Carregada de TOML:
//!
//! ```toml
//! max_workers = 4
//! deadline_ms = 2000
//!
//! [[styles]]
//! name = "Material"
//! depth = 3
//! use_pruning = true
//!
//! [styles.weights]
//! material = 1.0
//! position = 0.2
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::search::evaluation::EvalWeights;

pub const DEFAULT_DEPTH: u8 = 3;
pub const MAX_DEPTH: u8 = 8;

fn default_depth() -> u8 {
    DEFAULT_DEPTH
}

fn default_pruning() -> bool {
    true
}

/// Um estilo de busca: profundidade, poda e pesos próprios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub name: String,
    #[serde(default = "default_depth")]
    pub depth: u8,
    #[serde(default = "default_pruning")]
    pub use_pruning: bool,
    #[serde(default)]
    pub weights: EvalWeights,
}

impl Style {
    pub fn new(name: impl Into<String>, depth: u8, weights: EvalWeights) -> Self {
        Style {
            name: name.into(),
            depth,
            use_pruning: true,
            weights,
        }
    }

    /// Os cinco estilos clássicos, todos à mesma profundidade.
    pub fn default_roster(depth: u8) -> Vec<Style> {
        let w = |material, position, mobility, king_safety, pawn_structure| EvalWeights {
            material,
            position,
            mobility,
            king_safety,
            pawn_structure,
        };
        vec![
            Style::new("Material", depth, w(1.0, 0.2, 0.1, 0.1, 0.1)),
            Style::new("Tactical", depth, w(1.0, 0.2, 0.4, 0.2, 0.05)),
            Style::new("Positional", depth, w(1.0, 0.6, 0.2, 0.1, 0.4)),
            Style::new("Safety", depth, w(1.0, 0.3, 0.1, 0.5, 0.1)),
            Style::new("Dynamic", depth, w(1.0, 0.2, 0.5, 0.1, 0.1)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnsembleConfig {
    /// Limite superior de threads do pool; o pool usa min(estilos, max_workers).
    pub max_workers: usize,
    /// Prazo opcional por análise, em milissegundos.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline_ms: Option<u64>,
    pub styles: Vec<Style>,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        EnsembleConfig {
            max_workers: num_cpus::get().clamp(1, 8),
            deadline_ms: None,
            styles: Style::default_roster(DEFAULT_DEPTH),
        }
    }
}

impl EnsembleConfig {
    pub fn from_toml_str(text: &str) -> EngineResult<Self> {
        let config: EnsembleConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> EngineResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Mesma lista de estilos, todos à profundidade dada.
    pub fn with_depth(mut self, depth: u8) -> Self {
        for style in &mut self.styles {
            style.depth = depth;
        }
        self
    }

    pub fn with_deadline_ms(mut self, deadline_ms: Option<u64>) -> Self {
        self.deadline_ms = deadline_ms;
        self
    }

    pub fn worker_count(&self) -> usize {
        self.styles.len().min(self.max_workers).max(1)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.styles.is_empty() {
            return Err(EngineError::invalid_config("roster has no styles"));
        }
        if self.max_workers == 0 {
            return Err(EngineError::invalid_config("max_workers must be at least 1"));
        }

        let mut seen = HashSet::new();
        for style in &self.styles {
            if style.name.trim().is_empty() {
                return Err(EngineError::invalid_config("style name is empty"));
            }
            if !seen.insert(style.name.as_str()) {
                return Err(EngineError::invalid_config(format!(
                    "duplicate style name '{}'",
                    style.name
                )));
            }
            if style.depth == 0 || style.depth > MAX_DEPTH {
                return Err(EngineError::invalid_config(format!(
                    "style '{}' has depth {} (expected 1..={})",
                    style.name, style.depth, MAX_DEPTH
                )));
            }
            if !style.weights.is_finite() {
                return Err(EngineError::invalid_config(format!(
                    "style '{}' has a non-finite weight",
                    style.name
                )));
            }
        }
        Ok(())
    }
}
