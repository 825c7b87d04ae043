//! In-memory catalog and the JSON catalog loader.
//!
//! The catalog keeps items in insertion order; replacing an item keeps its
//! original position. The loader reads arrays of wire items from a single
//! file or from every `*.json` file below a directory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::types::Item;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    positions: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self { Self::default() }

    /// Insert `item`, or replace the item with the same id in place.
    /// Returns the replaced item, if any.
    pub fn upsert(&mut self, item: Item) -> Option<Item> {
        match self.positions.get(&item.id) {
            Some(&pos) => Some(std::mem::replace(&mut self.items[pos], item)),
            None => {
                self.positions.insert(item.id.clone(), self.items.len());
                self.items.push(item);
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.positions.get(id).map(|&pos| &self.items[pos])
    }

    pub fn items(&self) -> &[Item] { &self.items }

    pub fn owned_by<'a>(&'a self, owner_id: &'a str) -> impl Iterator<Item = &'a Item> + 'a {
        self.items.iter().filter(move |item| item.owner_id == owner_id)
    }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn clear(&mut self) {
        self.items.clear();
        self.positions.clear();
    }
}

impl FromIterator<Item> for Catalog {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for item in iter {
            catalog.upsert(item);
        }
        catalog
    }
}

#[derive(Debug, Default)]
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn new() -> Self { Self }

    /// Load a single file or every `*.json` file below a directory.
    pub fn load(&self, path: &Path) -> Result<Vec<Item>> {
        if path.is_dir() { self.load_directory(path) } else { self.load_file(path) }
    }

    pub fn load_file(&self, path: &Path) -> Result<Vec<Item>> {
        let content = fs::read_to_string(path)
            .map_err(|source| Error::CatalogIo { path: path.to_path_buf(), source })?;
        let items: Vec<Item> = serde_json::from_str(&content)
            .map_err(|source| Error::CatalogFormat { path: path.to_path_buf(), source })?;
        debug!(path = %path.display(), items = items.len(), "loaded catalog file");
        Ok(items)
    }

    pub fn load_directory(&self, dir: &Path) -> Result<Vec<Item>> {
        let files = self.list_json_files(dir);
        if files.is_empty() {
            warn!(dir = %dir.display(), "no .json catalog files found");
            return Ok(vec![]);
        }
        let mut all_items = Vec::new();
        for (file_index, file_path) in files.iter().enumerate() {
            debug!(file = file_index + 1, total = files.len(), path = %file_path.display(), "loading catalog file");
            all_items.extend(self.load_file(file_path)?);
        }
        info!(files = files.len(), items = all_items.len(), "loaded catalog directory");
        Ok(all_items)
    }

    fn list_json_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut json_files = Vec::new();
        for entry in walkdir::WalkDir::new(root).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") { json_files.push(path.to_path_buf()); }
        }
        json_files.sort();
        json_files
    }
}
