//! Batch extraction.
//!
//! Envelopes are independent and the catalogue is read-only, so a batch is
//! a parallel map: scoped worker threads pull indices from a shared cursor
//! and write into their own result slot, which keeps output order equal to
//! input order without any post-hoc sort.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::debug;

use carelog_model::{Catalog, ExtractedRecord, MailEnvelope};

use crate::pipeline::extract_envelope;

/// Extracts a record for every envelope, in input order.
///
/// `workers` is clamped to the batch size; zero or one runs sequentially.
pub fn extract_batch(
    catalog: &Catalog,
    envelopes: &[MailEnvelope],
    workers: usize,
) -> Vec<ExtractedRecord> {
    let workers = workers.min(envelopes.len());
    if workers <= 1 {
        return envelopes
            .iter()
            .map(|envelope| extract_envelope(catalog, envelope))
            .collect();
    }

    debug!(workers, total = envelopes.len(), "starting worker pool");
    let cursor = AtomicUsize::new(0);
    let slots: Vec<OnceLock<ExtractedRecord>> =
        (0..envelopes.len()).map(|_| OnceLock::new()).collect();

    std::thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| {
                loop {
                    let index = cursor.fetch_add(1, Ordering::Relaxed);
                    let Some(envelope) = envelopes.get(index) else {
                        break;
                    };
                    let record = extract_envelope(catalog, envelope);
                    // Each index is claimed exactly once, so the slot is
                    // always empty here.
                    let _ = slots[index].set(record);
                }
            });
        }
    });

    slots
        .into_iter()
        .map(|slot| {
            slot.into_inner()
                .expect("every slot is filled by a worker before the scope ends")
        })
        .collect()
}
