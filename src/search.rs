//! Incremental search and ordering over the catalog.
//!
//! Every invocation recomputes the full order and visibility partition from
//! scratch; the controller keeps no state between calls, so repeated
//! invocations with the same query are idempotent.

use crate::catalog::{Catalog, Element};
use crate::render::Renderer;
use std::cmp::Ordering;

/// Recomputed order and visibility for one query.
///
/// `order` is a permutation of the current catalog indices; `visible` is
/// aligned with `order`, not with the original indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchUpdate {
    pub order: Vec<usize>,
    pub visible: Vec<bool>,
}

/// Plan the total order and visibility partition for `query`.
///
/// Empty query: ascending atomic number, everything visible. Non-empty query:
/// an exact (case-insensitive) symbol match ranks first, everything else by
/// atomic number; an element is visible iff its name or symbol contains the
/// query as a substring. Ranking and filtering are independent rules.
pub fn plan(query: &str, elements: &[Element]) -> SearchUpdate {
    let mut order: Vec<usize> = (0..elements.len()).collect();
    if query.is_empty() {
        order.sort_by_key(|&idx| elements[idx].record.atomic_number);
        let visible = vec![true; order.len()];
        return SearchUpdate { order, visible };
    }

    let needle = query.to_ascii_lowercase();
    order.sort_by(|&a, &b| compare(&elements[a], &elements[b], &needle));
    let visible = order
        .iter()
        .map(|&idx| is_visible(&elements[idx], &needle))
        .collect();
    SearchUpdate { order, visible }
}

/// Stamp a freshly planned order and visibility partition onto the catalog
/// and renderer as one atomic update.
pub fn apply(query: &str, catalog: &mut Catalog, renderer: &mut dyn Renderer) {
    let update = plan(query, catalog.elements());
    catalog.reorder(&update.order);
    let mut shown = Vec::new();
    for (position, element) in catalog.elements().iter().enumerate() {
        let visible = update.visible.get(position).copied().unwrap_or(false);
        renderer.set_visible(element.row, visible);
        if visible {
            shown.push(element.row);
        }
    }
    renderer.set_order(&shown);
}

fn compare(a: &Element, b: &Element, needle: &str) -> Ordering {
    let a_exact = a.record.symbol.eq_ignore_ascii_case(needle);
    let b_exact = b.record.symbol.eq_ignore_ascii_case(needle);
    match (a_exact, b_exact) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.record.atomic_number.cmp(&b.record.atomic_number),
    }
}

fn is_visible(element: &Element, needle: &str) -> bool {
    element.record.name.to_ascii_lowercase().contains(needle)
        || element.record.symbol.to_ascii_lowercase().contains(needle)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
