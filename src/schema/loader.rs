//! Panel schema loader
//!
//! Schemas are stored one per file at `<root>/schemas/panel_<id>.json` and
//! loaded into an in-memory registry at startup. A missing directory is an
//! empty registry; a malformed file is a startup failure.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{SchemaError, SchemaResult};
use super::types::Schema;

/// Loads panel schemas from disk and keeps them indexed by identifier.
pub struct SchemaLoader {
    /// Directory containing schema files
    schema_dir: PathBuf,
    /// Loaded schemas indexed by schema_id
    schemas: HashMap<String, Schema>,
}

impl SchemaLoader {
    /// Creates a new loader rooted at the given data directory.
    ///
    /// Schema files are expected at `<data_dir>/schemas/`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            schema_dir: data_dir.join("schemas"),
            schemas: HashMap::new(),
        }
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Loads every schema file from the schema directory.
    pub fn load_all(&mut self) -> SchemaResult<()> {
        if !self.schema_dir.exists() {
            return Ok(()); // No schemas to load
        }

        let entries = fs::read_dir(&self.schema_dir).map_err(|e| SchemaError::Malformed {
            path: self.schema_dir.display().to_string(),
            reason: format!("failed to read schema directory: {}", e),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| SchemaError::Malformed {
                path: self.schema_dir.display().to_string(),
                reason: format!("failed to read directory entry: {}", e),
            })?;

            let path = entry.path();

            // Skip non-JSON files
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }

            self.load_schema_file(&path)?;
        }

        Ok(())
    }

    fn load_schema_file(&mut self, path: &Path) -> SchemaResult<()> {
        let content = fs::read_to_string(path).map_err(|e| SchemaError::Malformed {
            path: path.display().to_string(),
            reason: format!("failed to read file: {}", e),
        })?;

        let schema: Schema = serde_json::from_str(&content).map_err(|e| SchemaError::Malformed {
            path: path.display().to_string(),
            reason: format!("invalid JSON: {}", e),
        })?;

        schema.validate_structure().map_err(|reason| SchemaError::Malformed {
            path: path.display().to_string(),
            reason,
        })?;

        if self.schemas.contains_key(&schema.schema_id) {
            return Err(SchemaError::AlreadyRegistered(schema.schema_id));
        }

        self.schemas.insert(schema.schema_id.clone(), schema);
        Ok(())
    }

    /// Registers a schema directly (for embedding or tests).
    pub fn register(&mut self, schema: Schema) -> SchemaResult<()> {
        schema
            .validate_structure()
            .map_err(|reason| SchemaError::Malformed {
                path: "<in-memory>".into(),
                reason,
            })?;

        if self.schemas.contains_key(&schema.schema_id) {
            return Err(SchemaError::AlreadyRegistered(schema.schema_id));
        }

        self.schemas.insert(schema.schema_id.clone(), schema);
        Ok(())
    }

    /// Gets a schema by identifier.
    pub fn get(&self, schema_id: &str) -> Option<&Schema> {
        self.schemas.get(schema_id)
    }

    /// Gets a schema by identifier, or an error for unknown identifiers.
    pub fn require(&self, schema_id: &str) -> SchemaResult<&Schema> {
        self.get(schema_id)
            .ok_or_else(|| SchemaError::UnknownSchema(schema_id.to_string()))
    }

    /// Checks whether a schema identifier is registered.
    pub fn exists(&self, schema_id: &str) -> bool {
        self.schemas.contains_key(schema_id)
    }

    /// Returns all loaded schemas.
    pub fn all_schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values()
    }

    /// Returns the number of loaded schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}
