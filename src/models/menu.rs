//! Structured menu model.

use serde::{Deserialize, Serialize};

/// A parsed menu document: sections in encounter order.
///
/// Constructed fresh per parse call and never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuDocument {
    pub sections: Vec<MenuSection>,
}

impl MenuDocument {
    /// True when the document holds no sections at all.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of items across all sections.
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }
}

/// A titled grouping of menu items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuSection {
    /// Section title (synthesized default if none was explicit)
    pub title: String,

    /// Items in document order
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

impl MenuSection {
    /// Create an empty section with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }
}

/// A named entry with optional price, ingredient text, and addons.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuItem {
    /// Item name
    pub name: String,

    /// Raw price text including the unit (e.g. "95 kr")
    #[serde(default)]
    pub price: Option<String>,

    /// Raw ingredient text
    #[serde(default)]
    pub ingredients: Option<String>,

    /// Supplementary lines attached to this item
    #[serde(default)]
    pub addons: Vec<String>,
}
