//! Cleaner integration tests

use dataharvest::core::cleaner::{clean_document, normalize_text};
use dataharvest::core::document::Document;
use dataharvest::core::processor::ParallelBatchProcessor;

#[test]
fn test_normalize_strips_markup_and_noise() {
    let raw = "<html><body><h1>Breaking:</h1>\n\n  Markets  rallied\t(again)!</body></html>";
    assert_eq!(normalize_text(raw), "Breaking Markets rallied again!");
}

#[test]
fn test_clean_document_keeps_other_fields() {
    let mut doc = Document::new("https://example.com/a", "<p>one   two</p>")
        .with_title("A Page");
    clean_document(&mut doc);

    assert_eq!(doc.content, "one two");
    assert_eq!(doc.title.as_deref(), Some("A Page"));
    assert_eq!(doc.url, "https://example.com/a");
}

/// Cleaning is a pure per-item transform, so it composes with the batch
/// processor without any shared state.
#[test]
fn test_batch_cleaning_preserves_order() {
    let processor = ParallelBatchProcessor::with_workers(4).unwrap();
    let pages: Vec<String> = (0..12)
        .map(|i| format!("<div>page   number {}</div>", i))
        .collect();

    let cleaned = processor
        .process_batch(|page: String| normalize_text(&page), pages)
        .unwrap();

    for (i, text) in cleaned.iter().enumerate() {
        assert_eq!(text, &format!("page number {}", i));
    }
}
