//! Reader/writer discipline of the facade

use crate::common::*;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_parallel_searches_see_consistent_results() {
    let index = Arc::new(fox_and_dog());
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let index = Arc::clone(&index);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..200 {
                    assert_eq!(hits(&index, "quick"), set(&[1, 2]));
                    assert_eq!(hits(&index, "quick -lazy"), set(&[1]));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_writers_and_compaction_interleave() {
    let index = Arc::new(eager_compaction_index());
    let barrier = Arc::new(Barrier::new(3));

    let writer = {
        let index = Arc::clone(&index);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for doc in 0..500u64 {
                insert(&index, doc, &["stream", if doc % 2 == 0 { "even" } else { "odd" }]);
                if doc % 3 == 0 {
                    index.delete_document(doc);
                }
            }
        })
    };
    let compactor = {
        let index = Arc::clone(&index);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            let mut compacted = 0;
            for _ in 0..500 {
                if let CompactionOutcome::Compacted(_) = index.maybe_compact().unwrap() {
                    compacted += 1;
                }
                thread::yield_now();
            }
            compacted
        })
    };
    let reader = {
        let index = Arc::clone(&index);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for _ in 0..200 {
                // Renumbering must never move a handle onto another document
                assert!(hits(&index, "odd").iter().all(|doc| doc % 2 == 1));
                assert!(hits(&index, "even").iter().all(|doc| doc % 2 == 0));
            }
        })
    };

    writer.join().unwrap();
    compactor.join().unwrap();
    reader.join().unwrap();

    let expected: Vec<DocumentId> = (0..500).filter(|d| d % 3 != 0).collect();
    assert_eq!(hits(&index, "stream"), set(&expected));
    let odd: Vec<DocumentId> = expected.iter().copied().filter(|d| d % 2 == 1).collect();
    assert_eq!(hits(&index, "odd"), set(&odd));
}
