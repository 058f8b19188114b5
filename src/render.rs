//! Rendering seam between the core and its output surfaces.
//!
//! The core only creates rows, reorders them, toggles visibility, and attaches
//! thumbnails; everything about how a row is materialized stays behind the
//! [`Renderer`] trait.

use crate::catalog::ElementRecord;
use anyhow::{Context, Result};
use serde::Serialize;

/// Opaque handle to one on-screen row, issued by [`Renderer::create_row`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(usize);

impl RowId {
    fn index(self) -> usize {
        self.0
    }
}

/// Presentation collaborator for the catalog.
pub trait Renderer {
    fn create_row(&mut self, record: &ElementRecord) -> RowId;
    fn set_visible(&mut self, row: RowId, visible: bool);
    /// Replace the display order with `rows`, the visible set in final order.
    fn set_order(&mut self, rows: &[RowId]);
    /// Attach a thumbnail to a row's asset slot. First attachment wins.
    fn attach_asset(&mut self, row: RowId, url: &str);
}

/// Display state for one row.
#[derive(Debug, Clone, Serialize)]
pub struct RowState {
    #[serde(flatten)]
    pub record: ElementRecord,
    pub thumbnail: Option<String>,
    #[serde(skip)]
    pub visible: bool,
}

/// Buffer-backed renderer: rows accumulate display state and the caller
/// materializes the visible set as text or JSON. Also backs the TUI table.
#[derive(Default)]
pub struct TableRenderer {
    rows: Vec<RowState>,
    order: Vec<RowId>,
}

impl TableRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible rows in display order.
    pub fn visible_rows(&self) -> Vec<&RowState> {
        self.order
            .iter()
            .filter_map(|row| self.rows.get(row.index()))
            .filter(|state| state.visible)
            .collect()
    }

    pub fn hidden_count(&self) -> usize {
        self.rows.iter().filter(|state| !state.visible).count()
    }

    /// Plain-text table of the visible rows, one line per element.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for state in self.visible_rows() {
            let thumbnail = state.thumbnail.as_deref().unwrap_or("-");
            out.push_str(&format!(
                "{:>3}  {:<3}  {:<14}  {:>10}  {:<20}  {:<16}  {}  {}\n",
                state.record.atomic_number,
                state.record.symbol,
                state.record.name,
                state.record.atomic_weight,
                state.record.series,
                state.record.oxidation_display(),
                state.record.wikipedia_url,
                thumbnail,
            ));
        }
        out
    }

    /// Visible rows as a JSON array in display order.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.visible_rows()).context("serialize visible rows")
    }
}

impl Renderer for TableRenderer {
    fn create_row(&mut self, record: &ElementRecord) -> RowId {
        let id = RowId(self.rows.len());
        self.rows.push(RowState {
            record: record.clone(),
            thumbnail: None,
            visible: true,
        });
        self.order.push(id);
        id
    }

    fn set_visible(&mut self, row: RowId, visible: bool) {
        if let Some(state) = self.rows.get_mut(row.index()) {
            state.visible = visible;
        }
    }

    fn set_order(&mut self, rows: &[RowId]) {
        self.order = rows.to_vec();
    }

    fn attach_asset(&mut self, row: RowId, url: &str) {
        if let Some(state) = self.rows.get_mut(row.index()) {
            state.thumbnail.get_or_insert_with(|| url.to_string());
        }
    }
}
