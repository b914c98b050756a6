//! Document Id Generation
//!
//! Opaque, Firestore-like ids derived by hashing the document title with
//! the creation instant and a process-local counter.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT: AtomicU64 = AtomicU64::new(0);

/// Length of generated ids, in hex characters
const DOC_ID_LEN: usize = 20;

pub fn generate_doc_id(title: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let seq = NEXT.fetch_add(1, Ordering::Relaxed);
    let input = format!("{}|{}|{}", title, millis, seq);
    let hash = blake3::hash(input.as_bytes());
    hash.to_hex()[..DOC_ID_LEN].to_string()
}
