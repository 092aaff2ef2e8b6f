//! Category dispatch
//!
//! A category (`schema`, `diff`) decides how input data is filtered for
//! hierarchical formats and turned into a table for tabular ones. Strategies
//! live in an explicit registry keyed by category identifier; new categories
//! are added with [`CategoryRegistry::register`].

use std::collections::BTreeMap;

use serde_json::Value;

use super::ExportError;
use super::columns::ColumnSpec;
use super::diff::DiffStrategy;
use super::schema::SchemaStrategy;
use super::table::Table;
use crate::config::ExportConfig;

/// Filtering and flattening rules for one data category
pub trait CategoryStrategy: Send + Sync {
    /// Category identifier this strategy handles
    fn category(&self) -> &'static str;

    /// Data for hierarchical formats when counts are to be omitted
    fn filter(&self, data: &Value) -> Value {
        data.clone()
    }

    /// Data for tabular formats
    fn to_table(&self, data: &Value, columns: &[ColumnSpec]) -> Result<Table, ExportError>;
}

/// Builds a strategy configured for one export run
pub type StrategyFactory = fn(&ExportConfig) -> Box<dyn CategoryStrategy>;

/// Category identifier → strategy factory
#[derive(Clone)]
pub struct CategoryRegistry {
    factories: BTreeMap<String, StrategyFactory>,
}

impl CategoryRegistry {
    /// Registry without any category
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Registry with the `schema` and `diff` categories
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register("schema", schema_strategy);
        registry.register("diff", diff_strategy);
        registry
    }

    /// Add or replace a category
    pub fn register(&mut self, category: &str, factory: StrategyFactory) {
        self.factories.insert(category.to_string(), factory);
    }

    /// Known category identifiers, sorted
    pub fn categories(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Strategy for `category`, configured from `config`
    pub fn resolve(
        &self,
        category: &str,
        config: &ExportConfig,
    ) -> Result<Box<dyn CategoryStrategy>, ExportError> {
        self.factories
            .get(category)
            .map(|factory| factory(config))
            .ok_or_else(|| ExportError::UnknownCategory(category.to_string()))
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn schema_strategy(config: &ExportConfig) -> Box<dyn CategoryStrategy> {
    Box::new(SchemaStrategy::with_max_depth(config.max_depth))
}

fn diff_strategy(_config: &ExportConfig) -> Box<dyn CategoryStrategy> {
    Box::new(DiffStrategy)
}

impl std::fmt::Debug for CategoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryRegistry")
            .field("categories", &self.categories())
            .finish()
    }
}
