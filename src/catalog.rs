//! In-memory element catalog shared by enrichment and search.
//!
//! The catalog is built once at startup and never grows or shrinks. Its two
//! mutating actors write disjoint fields: the enrichment pipeline sets
//! thumbnails, the search controller re-sorts the iteration order.

use crate::render::{Renderer, RowId};
use serde::Serialize;

/// Immutable element attributes loaded from the snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ElementRecord {
    pub atomic_number: u32,
    pub atomic_weight: f64,
    pub symbol: String,
    pub name: String,
    pub series: String,
    pub oxidation_states: Vec<i32>,
    pub wikipedia_url: String,
}

impl ElementRecord {
    /// Oxidation states for display: positive values get an explicit `+`
    /// prefix, joined with ", ".
    pub fn oxidation_display(&self) -> String {
        self.oxidation_states
            .iter()
            .map(|state| {
                if *state > 0 {
                    format!("+{state}")
                } else {
                    state.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One catalog entry: snapshot attributes plus mutable enrichment state and
/// the row handle issued by the renderer.
#[derive(Debug, Clone)]
pub struct Element {
    pub record: ElementRecord,
    /// Thumbnail URL; absent until the pipeline sets it, then never reverted.
    pub thumbnail: Option<String>,
    pub row: RowId,
}

/// Ordered element set keyed by name. Iteration order is re-sorted by the
/// search controller but always remains a permutation of the load-time set.
pub struct Catalog {
    elements: Vec<Element>,
}

impl Catalog {
    /// Wire loaded records to renderer rows, preserving load order.
    pub fn build(records: Vec<ElementRecord>, renderer: &mut dyn Renderer) -> Self {
        let elements = records
            .into_iter()
            .map(|record| {
                let row = renderer.create_row(&record);
                Element {
                    record,
                    thumbnail: None,
                    row,
                }
            })
            .collect();
        Self { elements }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Element names in current catalog order, the unit the enrichment
    /// pipeline partitions into batches.
    pub fn names_in_order(&self) -> Vec<String> {
        self.elements
            .iter()
            .map(|element| element.record.name.clone())
            .collect()
    }

    /// Set an element's thumbnail by key. Returns the row handle on the
    /// absent-to-present transition; an unknown name or an already-set
    /// thumbnail is a no-op.
    pub fn set_thumbnail(&mut self, name: &str, url: &str) -> Option<RowId> {
        let element = self
            .elements
            .iter_mut()
            .find(|element| element.record.name == name)?;
        if element.thumbnail.is_some() {
            return None;
        }
        element.thumbnail = Some(url.to_string());
        Some(element.row)
    }

    pub fn thumbnail_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|element| element.thumbnail.is_some())
            .count()
    }

    /// Apply a permutation of the current indices as the new catalog order.
    pub(crate) fn reorder(&mut self, order: &[usize]) {
        debug_assert_eq!(order.len(), self.elements.len());
        let mut taken: Vec<Option<Element>> = self.elements.drain(..).map(Some).collect();
        self.elements = order
            .iter()
            .filter_map(|&idx| taken.get_mut(idx).and_then(Option::take))
            .collect();
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
