use search_core::{DocumentFilter, DocumentId, DocumentStatus, SearchError, SearchServer};

const EPSILON: f64 = 1e-6;

fn reference_server() -> SearchServer {
    let mut server = SearchServer::with_stop_words("and in on");
    server.add_document(0, "white cat and fashionable collar", DocumentStatus::Actual, &[8, -3]).unwrap();
    server.add_document(1, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
    server.add_document(2, "well-groomed dog expressive eyes", DocumentStatus::Actual, &[5, -12, 2, 1]).unwrap();
    server.add_document(3, "well-groomed starling eugene", DocumentStatus::Banned, &[9]).unwrap();
    server
}

fn ids(docs: &[search_core::Document]) -> Vec<DocumentId> {
    docs.iter().map(|d| d.id).collect()
}

#[test]
fn actual_by_default() {
    let server = reference_server();
    let found = server.find_top_documents("fluffy well-groomed cat").unwrap();
    assert_eq!(ids(&found), vec![1, 0, 2]);
    assert!((found[0].relevance - 1.25 * 2f64.ln()).abs() < EPSILON);
    assert_eq!(found[0].rating, 5);
    // 0 and 2 tie on relevance; 0 has the higher rating
    assert!((found[1].relevance - found[2].relevance).abs() < EPSILON);
    assert_eq!((found[1].rating, found[2].rating), (2, -1));
}

#[test]
fn banned_status_filter() {
    let server = reference_server();
    let found = server
        .find_top_documents_by_status("fluffy well-groomed cat", DocumentStatus::Banned)
        .unwrap();
    assert_eq!(ids(&found), vec![3]);
    assert_eq!(found[0].rating, 9);
}

#[test]
fn even_id_predicate() {
    let server = reference_server();
    let found = server
        .find_top_documents_with("fluffy well-groomed cat", |id, _, _| id % 2 == 0)
        .unwrap();
    assert_eq!(ids(&found), vec![0, 2]);
}

#[test]
fn match_document_scenario() {
    let server = reference_server();
    let (words, status) = server.match_document("fluffy well-groomed cat", 1).unwrap();
    assert_eq!(words, vec!["cat", "fluffy"]);
    assert_eq!(status, DocumentStatus::Actual);

    let (words, status) = server.match_document("fluffy well-groomed cat -eugene", 3).unwrap();
    assert!(words.is_empty());
    assert_eq!(status, DocumentStatus::Banned);

    assert_eq!(
        server.match_document("cat", 7),
        Err(SearchError::UnknownDocumentId { id: 7 })
    );
}

#[test]
fn invalid_inputs_are_reported() {
    let mut server = reference_server();
    assert_eq!(
        server.find_top_documents("cat -"),
        Err(SearchError::InvalidQuery { token: "-".into() })
    );
    assert!(server.match_document("-", 0).is_err());
    assert_eq!(
        server.add_document(-1, "grey cat", DocumentStatus::Actual, &[]),
        Err(SearchError::InvalidDocumentId { id: -1 })
    );
    assert_eq!(
        server.add_document(1, "grey cat", DocumentStatus::Actual, &[]),
        Err(SearchError::DuplicateDocumentId { id: 1 })
    );
    assert_eq!(
        server.add_document(9, "and on", DocumentStatus::Actual, &[]),
        Err(SearchError::InvalidDocument { id: 9 })
    );
    assert_eq!(server.document_count(), 4);
}

#[test]
fn term_frequencies_are_normalized() {
    let server = reference_server();
    for id in server.document_ids() {
        let sum: f64 = server.word_frequencies(id).values().sum();
        assert!((sum - 1.0).abs() < 1e-9, "document {id} sums to {sum}");
    }
    assert!(server.word_frequencies(100).is_empty());
}

#[test]
fn top_n_bound_and_ordering() {
    let mut server = SearchServer::with_stop_words("and in on");
    let texts = [
        "cat", "cat dog", "cat dog bird", "cat cat fish", "dog bird", "cat in hat", "big cat",
        "small dog", "cat and dog",
    ];
    for (id, text) in texts.iter().enumerate() {
        let id = id as DocumentId;
        server.add_document(id, text, DocumentStatus::Actual, &[id % 3, -id]).unwrap();
    }
    let all = server.find_all_documents("cat dog", DocumentFilter::default()).unwrap();
    let top = server.find_top_documents("cat dog").unwrap();
    assert_eq!(top.len(), all.len().min(5));
    assert_ordered(&top);
}

/// Every earlier document is either clearly more relevant or tied with a
/// rating at least as high.
fn assert_ordered(docs: &[search_core::Document]) {
    for (i, a) in docs.iter().enumerate() {
        for b in &docs[i + 1..] {
            let tied = (a.relevance - b.relevance).abs() < EPSILON;
            assert!(
                (!tied && a.relevance > b.relevance) || (tied && a.rating >= b.rating),
                "{a} placed before {b}"
            );
        }
    }
}

#[test]
fn near_ties_chain_keeps_pairwise_order() {
    // 0 ties 1 and 1 ties 2, but 0 and 2 are more than epsilon apart
    let docs = vec![
        search_core::Document::new(0, 1.0 + 0.5e-6, 10),
        search_core::Document::new(1, 1.0, 0),
        search_core::Document::new(2, 1.0 - 0.7e-6, 5),
    ];
    let sorted = search_core::ranker::sort_and_truncate(docs, &search_core::SearchConfig::default());
    assert_eq!(ids(&sorted), vec![0, 2, 1]);
    assert_ordered(&sorted);
}

#[test]
fn exclusion_dominates() {
    let server = reference_server();
    let found = server
        .find_top_documents_with("cat fluffy well-groomed -fluffy -dog", |_, _, _| true)
        .unwrap();
    for doc in &found {
        let words = server.word_frequencies(doc.id);
        assert!(!words.contains_key("fluffy") && !words.contains_key("dog"));
    }
    assert_eq!(ids(&found), vec![3, 0]);
}

#[test]
fn predicate_results_are_subset_of_all_documents() {
    let server = reference_server();
    let query = "fluffy well-groomed cat";
    let all = server
        .find_all_documents(query, DocumentFilter::predicate(|_, _, _| true))
        .unwrap();
    let predicate = |_: DocumentId, _: DocumentStatus, rating: i32| rating > 0;
    let filtered = server.find_top_documents_with(query, predicate).unwrap();
    for doc in &filtered {
        let source = all.iter().find(|d| d.id == doc.id).expect("doc in unfiltered set");
        assert!(predicate(source.id, DocumentStatus::Actual, source.rating));
        assert_eq!(doc.relevance, source.relevance);
    }
    assert_eq!(ids(&filtered), vec![1, 3, 0]);
}

#[test]
fn matched_words_have_postings() {
    let server = reference_server();
    for id in server.document_ids() {
        let (words, _) = server.match_document("fluffy well-groomed cat collar dinosaur", id).unwrap();
        let freqs = server.word_frequencies(id);
        for word in &words {
            assert!(freqs.get(word).is_some_and(|tf| *tf > 0.0), "{word} not in {id}");
        }
    }
}
