//! Concrete value type to type name registry
//!
//! Concrete types are identified by their MongoDB `$type` alias (`int`,
//! `objectId`, ...). The registry only ever grows: an alias seen without a
//! mapping is recorded as `unknown` for the lifetime of the registry.

use std::collections::{BTreeSet, HashMap};
use std::sync::{PoisonError, RwLock};

use tracing::warn;

use super::{
    ARRAY, BIGINTEGER, BOOLEAN, DATE, DBREF, FLOAT, INTEGER, NULL, OBJECT, OID, STRING, TIMESTAMP,
    UNKNOWN,
};

const SEEDED: &[(&str, &str)] = &[
    ("array", ARRAY),
    ("object", OBJECT),
    ("null", NULL),
    ("bool", BOOLEAN),
    ("int", INTEGER),
    ("long", BIGINTEGER),
    ("double", FLOAT),
    ("string", STRING),
    ("date", DATE),
    ("timestamp", TIMESTAMP),
    ("dbPointer", DBREF),
    ("objectId", OID),
];

/// Thread-safe alias registry
///
/// Readers share the lock; the first resolution of an unmapped alias takes the
/// write lock and inserts only if no other writer got there first.
#[derive(Debug)]
pub struct TypeRegistry {
    mappings: RwLock<HashMap<String, &'static str>>,
    unmapped: RwLock<BTreeSet<String>>,
}

impl TypeRegistry {
    /// Create a registry seeded with the standard aliases
    pub fn new() -> Self {
        Self {
            mappings: RwLock::new(Self::seeded()),
            unmapped: RwLock::new(BTreeSet::new()),
        }
    }

    fn seeded() -> HashMap<String, &'static str> {
        SEEDED
            .iter()
            .map(|(alias, name)| (alias.to_string(), *name))
            .collect()
    }

    /// Type name for a concrete type alias
    ///
    /// Never fails: unmapped aliases resolve to `unknown`, and a warning is
    /// logged the first time each one is seen.
    pub fn resolve(&self, alias: &str) -> &'static str {
        {
            let mappings = self.mappings.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(name) = mappings.get(alias) {
                return *name;
            }
        }

        let mut mappings = self.mappings.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(name) = mappings.get(alias) {
            return *name;
        }
        warn!(
            alias,
            "Type is not mapped to a type name; treating it as unknown for this schema"
        );
        mappings.insert(alias.to_string(), UNKNOWN);
        self.unmapped
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(alias.to_string());
        UNKNOWN
    }

    /// Whether `alias` already has a mapping (seeded or downgraded)
    pub fn is_known(&self, alias: &str) -> bool {
        self.mappings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(alias)
    }

    /// Aliases that were downgraded to `unknown`, sorted
    pub fn unmapped(&self) -> Vec<String> {
        self.unmapped
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Drop every downgraded alias, keeping the seeded mappings
    pub fn reset(&self) {
        *self.mappings.write().unwrap_or_else(PoisonError::into_inner) = Self::seeded();
        self.unmapped
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
