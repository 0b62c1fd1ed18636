//! Queries running while rebuilds commit.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

use super::common::{cat_pages, engine_with, pet_pages, query, ranking_of};
use lexis::{DocumentSource, Error, MemorySource, Result, SearchEngine, SourceBatch, WebPage};

/// Blocks in `fetch` until the test lets it through.
struct GatedSource {
    pages: Vec<WebPage>,
    entered: Mutex<Sender<()>>,
    release: Mutex<Receiver<()>>,
}

impl DocumentSource for GatedSource {
    fn describe(&self) -> String {
        "gated".to_string()
    }

    fn fetch(&self) -> Result<SourceBatch> {
        self.entered.lock().unwrap().send(()).unwrap();
        self.release.lock().unwrap().recv().unwrap();
        Ok(SourceBatch::new(self.pages.clone()))
    }
}

#[test]
fn test_queries_see_old_snapshot_until_commit() {
    let engine = Arc::new(engine_with(cat_pages()));
    let (entered_tx, entered_rx) = channel();
    let (release_tx, release_rx) = channel();
    let source = GatedSource {
        pages: pet_pages(),
        entered: Mutex::new(entered_tx),
        release: Mutex::new(release_rx),
    };

    let builder = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || engine.rebuild(&source))
    };
    entered_rx.recv().unwrap();

    // Mid-build: old snapshot still serves, and a second build is refused.
    let during = query(&engine, "cat");
    assert_eq!(during.generation, 1);
    assert_eq!(during.urls().collect::<Vec<_>>(), vec!["a.com/2", "a.com/1"]);
    assert!(matches!(
        engine.rebuild(&MemorySource::new(cat_pages())),
        Err(Error::BuildInProgress)
    ));

    release_tx.send(()).unwrap();
    let report = builder.join().unwrap().unwrap();
    assert_eq!(report.generation, 2);

    let after = query(&engine, "cat");
    assert_eq!(after.generation, 2);
    assert_eq!(after.urls().collect::<Vec<_>>(), vec!["pets.com/cats", "pets.com/both"]);
}

#[test]
fn test_concurrent_queries_never_see_a_mix() {
    let expected_a = ranking_of(&query(&engine_with(cat_pages()), "cat"));
    let expected_b = ranking_of(&query(&engine_with(pet_pages()), "cat"));
    assert_ne!(expected_a, expected_b);

    let engine = Arc::new(engine_with(cat_pages()));
    let stop = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let stop = Arc::clone(&stop);
            let (a, b) = (expected_a.clone(), expected_b.clone());
            thread::spawn(move || {
                let mut seen = 0usize;
                loop {
                    let response = engine.query("cat").unwrap();
                    let ranking = ranking_of(&response);
                    // Odd generations are the cat corpus, even ones the pet corpus.
                    let expected = if response.generation % 2 == 1 { &a } else { &b };
                    assert_eq!(&ranking, expected, "generation {}", response.generation);
                    seen += 1;
                    if stop.load(Ordering::Relaxed) {
                        break seen;
                    }
                }
            })
        })
        .collect();

    for round in 0..20 {
        let pages = if round % 2 == 0 { pet_pages() } else { cat_pages() };
        engine.rebuild(&MemorySource::new(pages)).unwrap();
    }
    stop.store(true, Ordering::Relaxed);

    for reader in readers {
        assert!(reader.join().unwrap() > 0);
    }
    assert_eq!(engine.query("cat").unwrap().generation, 21);
}

#[test]
fn test_searcher_keeps_its_snapshot_after_swap() {
    let engine = engine_with(cat_pages());
    let searcher = engine.reader().searcher().unwrap();
    engine.rebuild(&MemorySource::new(pet_pages())).unwrap();

    assert_eq!(searcher.snapshot().generation(), 1);
    assert_eq!(searcher.snapshot().doc_count(), 2);
    assert_eq!(engine.snapshot().unwrap().generation(), 2);
}

#[test]
fn test_engine_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SearchEngine>();
}
