//! Schema introspection: cached, normalized column metadata per table.
//!
//! The [`SchemaIntrospector`] sits between callers and the external
//! connectivity collaborator. Each table's descriptor sequence is fetched
//! once, described through the dialect, and cached for the adapter session;
//! an explicit reload replaces the cached sequence with a copy-and-swap so
//! in-flight readers never observe a partially-built set.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::core::schema::{ColumnAttrs, ColumnDescriptor, RawColumn, TypeKind};
use crate::dialect::Dialect;
use crate::error::{AdapterError, Result};

/// External source of raw catalog metadata.
///
/// Implemented over the connectivity collaborator ("execute SQL, get rows
/// back"). The fetch is a single synchronous call; retries, if any, belong
/// to the implementation, and its failures propagate unchanged as
/// [`AdapterError::MetadataFetch`].
pub trait MetadataSource: Send + Sync {
    /// Fetch the raw column records for a table.
    ///
    /// An unknown table yields an empty vector, not an error.
    fn table_columns(&self, table: &str) -> Result<Vec<RawColumn>>;
}

/// One entry of a merged schema view.
///
/// A column reports its semantic kind and attributes only when it is
/// present in both the expected column set and the live schema; otherwise
/// the tuple is `(None, None)`.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedColumn {
    /// Column name.
    pub name: String,
    /// Semantic type, when resolvable.
    pub kind: Option<TypeKind>,
    /// Precision/scale/default attributes, when resolvable.
    pub attrs: Option<ColumnAttrs>,
}

/// Cached schema introspection over a metadata source.
pub struct SchemaIntrospector {
    source: Arc<dyn MetadataSource>,
    dialect: Arc<dyn Dialect>,
    cache: RwLock<HashMap<String, Arc<[ColumnDescriptor]>>>,
}

impl SchemaIntrospector {
    /// Create an introspector over a metadata source and dialect.
    pub fn new(source: Arc<dyn MetadataSource>, dialect: Arc<dyn Dialect>) -> Self {
        Self {
            source,
            dialect,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The column descriptors of a table, sorted by name.
    ///
    /// Fetched once per table name and cached for the session. An unknown
    /// table yields an empty sequence.
    pub fn columns(&self, table: &str) -> Result<Arc<[ColumnDescriptor]>> {
        if let Some(cached) = self.cache.read().expect("cache lock").get(table) {
            return Ok(Arc::clone(cached));
        }

        let descriptors = self.load(table)?;
        let mut cache = self.cache.write().expect("cache lock");
        // A concurrent loader may have won the race; keep its copy.
        let entry = cache
            .entry(table.to_string())
            .or_insert_with(|| Arc::clone(&descriptors));
        Ok(Arc::clone(entry))
    }

    /// A single column descriptor by name.
    pub fn column(&self, table: &str, name: &str) -> Result<ColumnDescriptor> {
        self.columns(table)?
            .iter()
            .find(|c| c.name == name)
            .cloned()
            .ok_or_else(|| AdapterError::UnknownColumn {
                table: table.to_string(),
                column: name.to_string(),
            })
    }

    /// Refetch a table's metadata and atomically publish the new sequence.
    ///
    /// The replacement is fully built before the cache entry is swapped, so
    /// readers holding the previous sequence keep a consistent view.
    pub fn reload(&self, table: &str) -> Result<Arc<[ColumnDescriptor]>> {
        let descriptors = self.load(table)?;
        self.cache
            .write()
            .expect("cache lock")
            .insert(table.to_string(), Arc::clone(&descriptors));
        Ok(descriptors)
    }

    /// Drop a table's cached metadata.
    pub fn invalidate(&self, table: &str) {
        self.cache.write().expect("cache lock").remove(table);
    }

    /// Drop all cached metadata.
    pub fn clear(&self) {
        self.cache.write().expect("cache lock").clear();
    }

    /// Merged view of an expected column set against the live schema.
    ///
    /// Produces the sorted-by-name union of both name sets. An entry
    /// carries its semantic kind and attributes only when the column is in
    /// both sets; a column known to one side only reports `(None, None)`
    /// rather than failing.
    pub fn merged_columns(&self, table: &str, expected: &[&str]) -> Result<Vec<MergedColumn>> {
        let live = self.columns(table)?;

        let mut names: BTreeSet<&str> = expected.iter().copied().collect();
        names.extend(live.iter().map(|c| c.name.as_str()));

        Ok(names
            .into_iter()
            .map(|name| {
                let resolved = expected
                    .contains(&name)
                    .then(|| live.iter().find(|c| c.name == name))
                    .flatten();
                MergedColumn {
                    name: name.to_string(),
                    kind: resolved.map(|c| c.semantic_kind()),
                    attrs: resolved.map(|c| c.attrs()),
                }
            })
            .collect())
    }

    fn load(&self, table: &str) -> Result<Arc<[ColumnDescriptor]>> {
        let raw = self.source.table_columns(table)?;
        debug!(table, columns = raw.len(), "loaded table metadata");

        let mut descriptors: Vec<ColumnDescriptor> =
            raw.iter().map(|r| self.dialect.describe(r)).collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Arc::from(descriptors))
    }
}

impl std::fmt::Debug for SchemaIntrospector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tables: Vec<String> = self
            .cache
            .read()
            .expect("cache lock")
            .keys()
            .cloned()
            .collect();
        f.debug_struct("SchemaIntrospector")
            .field("dialect", &self.dialect.name())
            .field("cached_tables", &tables)
            .finish()
    }
}
