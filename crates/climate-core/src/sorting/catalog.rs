//! Waste items and the bins they belong in

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

const BUILTIN_ITEMS: &str = include_str!("../../data/sorting_items.ron");

/// Destination bin for a waste item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bin {
    Compost,
    Recycle,
    Trash,
}

impl Bin {
    pub const ALL: [Bin; 3] = [Bin::Compost, Bin::Recycle, Bin::Trash];

    pub fn name(&self) -> &'static str {
        match self {
            Bin::Compost => "compost",
            Bin::Recycle => "recycle",
            Bin::Trash => "trash",
        }
    }

    /// Label used in feedback and on the bin buttons
    pub fn label(&self) -> &'static str {
        match self {
            Bin::Compost => "🌱 COMPOST",
            Bin::Recycle => "♻️ RECYCLE",
            Bin::Trash => "🗑️ TRASH",
        }
    }
}

impl fmt::Display for Bin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortingItem {
    pub emoji: String,
    pub name: String,
    pub bin: Bin,
}

/// The full item pool a session draws from
///
/// Item names are unique; emoji are not (two different bottles share one).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortingCatalog {
    items: Vec<SortingItem>,
}

impl SortingCatalog {
    pub fn builtin() -> Result<Self> {
        Self::from_ron_str(BUILTIN_ITEMS)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_ron_str(&content)
    }

    pub fn from_ron_str(content: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct ItemFile {
            items: Vec<SortingItem>,
        }

        let file: ItemFile = ron::from_str(content)?;
        Self::from_items(file.items)
    }

    pub fn from_items(items: Vec<SortingItem>) -> Result<Self> {
        let mut seen = HashSet::new();
        for item in &items {
            if item.name.trim().is_empty() {
                return Err(Error::InvalidContent("sorting item without a name".to_string()));
            }
            if !seen.insert(item.name.as_str()) {
                return Err(Error::DuplicateDefinition(item.name.clone()));
            }
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[SortingItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
