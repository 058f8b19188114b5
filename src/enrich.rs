//! Batched thumbnail enrichment.
//!
//! The catalog is partitioned into consecutive batches of at most
//! [`BATCH_SIZE`] names, in catalog order, and one request is issued per
//! batch strictly sequentially: batch i+1 is not started until batch i has
//! settled, so at most one request is ever outstanding. Responses are merged
//! back by page title, never by position. The first failed batch ends the run
//! and leaves every remaining batch untouched; thumbnails merged before the
//! failure are kept.

use crate::catalog::Catalog;
use crate::render::Renderer;
use crate::wiki::{ThumbEntry, ThumbnailSource};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::sync::mpsc;
use std::thread;

/// Maximum lookup cardinality per request, imposed by the thumbnail API.
pub const BATCH_SIZE: usize = 50;

/// Outcome counters for a completed run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EnrichSummary {
    pub batches: usize,
    pub thumbnails: usize,
}

/// Partition names into consecutive groups of at most [`BATCH_SIZE`],
/// preserving catalog order. Every name lands in exactly one batch.
pub fn batches(names: &[String]) -> Vec<Vec<String>> {
    names
        .chunks(BATCH_SIZE)
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// Merge one batch response into the catalog.
///
/// Only entries that carry a thumbnail and whose title names a member of
/// `batch` are applied; entries without a thumbnail and titles outside the
/// batch are skipped, neither is an error. Returns the number of thumbnails
/// set.
pub fn merge_batch(
    catalog: &mut Catalog,
    renderer: &mut dyn Renderer,
    batch: &[String],
    entries: &[ThumbEntry],
) -> usize {
    let members: HashSet<&str> = batch.iter().map(String::as_str).collect();
    let mut merged = 0;
    for entry in entries {
        let Some(url) = entry.url.as_deref() else {
            continue;
        };
        if !members.contains(entry.title.as_str()) {
            tracing::debug!(title = %entry.title, "response entry outside batch, ignoring");
            continue;
        }
        if let Some(row) = catalog.set_thumbnail(&entry.title, url) {
            renderer.attach_asset(row, url);
            merged += 1;
        }
    }
    merged
}

/// Run the full pipeline inline: request and merge every batch sequentially.
pub fn run(
    catalog: &mut Catalog,
    renderer: &mut dyn Renderer,
    source: &dyn ThumbnailSource,
) -> Result<EnrichSummary> {
    let groups = batches(&catalog.names_in_order());
    let mut summary = EnrichSummary::default();
    for (index, batch) in groups.iter().enumerate() {
        let entries = source
            .thumbnails(batch)
            .with_context(|| format!("enrichment batch {index} of {}", groups.len()))?;
        let merged = merge_batch(catalog, renderer, batch, &entries);
        summary.batches += 1;
        summary.thumbnails += merged;
        tracing::info!(batch = index, merged, "thumbnail batch merged");
    }
    Ok(summary)
}

/// Progress events shipped from the worker thread to the UI loop.
#[derive(Debug)]
pub enum EnrichEvent {
    /// One element's thumbnail arrived; the receiver owns the merge.
    Thumb { name: String, url: String },
    /// Every batch settled successfully.
    Done(EnrichSummary),
    /// A batch failed; no further batches will be attempted.
    Failed(String),
}

/// Drive the pipeline on a worker thread that owns only the batch title
/// lists. Merges are shipped to the caller, which owns the catalog; dropping
/// the receiver stops the worker at its next send.
pub fn spawn(
    names: Vec<String>,
    source: impl ThumbnailSource + Send + 'static,
) -> mpsc::Receiver<EnrichEvent> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let groups = batches(&names);
        let mut summary = EnrichSummary::default();
        for (index, batch) in groups.iter().enumerate() {
            let entries = match source.thumbnails(batch) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!(
                        batch = index,
                        error = %format!("{err:#}"),
                        "thumbnail batch failed, halting enrichment"
                    );
                    let _ = tx.send(EnrichEvent::Failed(format!("{err:#}")));
                    return;
                }
            };
            let members: HashSet<&str> = batch.iter().map(String::as_str).collect();
            for entry in entries {
                let Some(url) = entry.url else {
                    continue;
                };
                if !members.contains(entry.title.as_str()) {
                    continue;
                }
                summary.thumbnails += 1;
                let event = EnrichEvent::Thumb {
                    name: entry.title,
                    url,
                };
                if tx.send(event).is_err() {
                    return;
                }
            }
            summary.batches += 1;
            tracing::info!(batch = index, "thumbnail batch merged");
        }
        let _ = tx.send(EnrichEvent::Done(summary));
    });
    rx
}

#[cfg(test)]
#[path = "enrich_tests.rs"]
mod tests;
