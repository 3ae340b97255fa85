//! Property-based tests (fuzzing) for the reply decoders.
//!
//! Uses proptest to generate well-formed and arbitrary replies and verify the
//! decoders honour the count/width contract and never panic.
//!
//! Run with: `cargo test --test proptest_fuzz`

use proptest::prelude::*;
use redis::Value as RedisValue;

use redisearch_client::search::{
    decode_search, decode_search_page, decode_spellcheck, DocumentMode, RowLayout,
};

// =============================================================================
// Strategies for generating test data
// =============================================================================

fn bulk(s: &str) -> RedisValue {
    RedisValue::BulkString(s.as_bytes().to_vec())
}

/// Arbitrary reply trees (including shapes the engine never produces)
fn arbitrary_reply_strategy() -> impl Strategy<Value = RedisValue> {
    let leaf = prop_oneof![
        Just(RedisValue::Nil),
        Just(RedisValue::Okay),
        any::<i64>().prop_map(RedisValue::Int),
        "[a-zA-Z0-9.:]{0,8}".prop_map(|s| RedisValue::BulkString(s.into_bytes())),
        prop::collection::vec(any::<u8>(), 0..8).prop_map(RedisValue::BulkString),
    ];

    leaf.prop_recursive(
        4,  // depth
        64, // max nodes
        8,  // items per collection
        |inner| prop::collection::vec(inner, 0..8).prop_map(RedisValue::Array),
    )
}

/// (id, [(field, value)]) rows with unique field names per row
fn rows_strategy() -> impl Strategy<Value = Vec<(String, Vec<String>)>> {
    prop::collection::vec(
        ("[a-z]{1,6}:[0-9]{1,4}", prop::collection::vec("[a-z ]{0,6}", 0..4)),
        1..20,
    )
}

fn layout_strategy() -> impl Strategy<Value = RowLayout> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(with_scores, with_payloads, with_content)| {
        RowLayout {
            with_ids: true,
            with_scores,
            with_payloads,
            with_content,
        }
    })
}

fn search_reply(rows: &[(String, Vec<String>)], layout: RowLayout) -> RedisValue {
    let mut items = vec![RedisValue::Int(rows.len() as i64)];
    for (i, (id, values)) in rows.iter().enumerate() {
        items.push(bulk(id));
        if layout.with_scores {
            items.push(bulk(&format!("{}.5", i)));
        }
        if layout.with_payloads {
            items.push(bulk(&format!("payload-{}", i)));
        }
        if layout.with_content {
            let mut fields = Vec::new();
            for (n, value) in values.iter().enumerate() {
                fields.push(bulk(&format!("f{}", n)));
                fields.push(bulk(value));
            }
            items.push(RedisValue::Array(fields));
        }
    }
    RedisValue::Array(items)
}

// =============================================================================
// Shape Contract Tests
// =============================================================================

proptest! {
    /// A well-formed reply yields exactly `count` documents carrying the requested slots
    #[test]
    fn prop_well_formed_reply_yields_count_documents(rows in rows_strategy(), layout in layout_strategy()) {
        let raw = search_reply(&rows, layout);
        let result = decode_search(&raw, DocumentMode::Object, layout).unwrap();

        prop_assert_eq!(result.count(), rows.len() as i64);
        let docs = result.documents().records().unwrap();
        prop_assert_eq!(docs.len(), rows.len());

        for (i, (doc, (id, values))) in docs.iter().zip(rows.iter()).enumerate() {
            prop_assert_eq!(doc.id.as_deref(), Some(id.as_str()));
            prop_assert_eq!(doc.score.is_some(), layout.with_scores);
            prop_assert_eq!(doc.payload.is_some(), layout.with_payloads);
            if layout.with_scores {
                prop_assert_eq!(doc.score, Some(i as f64 + 0.5));
            }
            if layout.with_content {
                prop_assert_eq!(doc.fields.len(), values.len());
                for (n, value) in values.iter().enumerate() {
                    prop_assert_eq!(doc.get_str(&format!("f{}", n)), Some(value.as_str()));
                }
            } else {
                prop_assert!(doc.fields.is_empty());
            }
        }
    }

    /// Page decoding agrees with count-based decoding when the page holds every hit
    #[test]
    fn prop_full_page_matches_count_decoding(rows in rows_strategy(), layout in layout_strategy()) {
        let raw = search_reply(&rows, layout);
        let by_count = decode_search(&raw, DocumentMode::Array, layout).unwrap();
        let by_page = decode_search_page(&raw, DocumentMode::Array, layout).unwrap();
        prop_assert_eq!(by_count, by_page);
    }

    /// A bare count is preserved with no documents
    #[test]
    fn prop_bare_count_preserved(count in any::<i64>()) {
        let raw = RedisValue::Array(vec![RedisValue::Int(count)]);
        let result = decode_search(&raw, DocumentMode::Object, RowLayout::default()).unwrap();
        prop_assert_eq!(result.count(), count);
        prop_assert!(result.documents().is_empty());
    }

    /// A zero or negative count yields no documents from the page decoder either
    #[test]
    fn prop_page_non_positive_count_has_no_documents(
        count in -50i64..=0,
        rows in rows_strategy(),
        layout in layout_strategy(),
    ) {
        let mut raw = search_reply(&rows, layout);
        if let RedisValue::Array(items) = &mut raw {
            items[0] = RedisValue::Int(count);
        }
        let result = decode_search_page(&raw, DocumentMode::Object, layout).unwrap();
        prop_assert_eq!(result.count(), count);
        prop_assert!(result.documents().is_empty());
    }

    /// Dropping one element from a multi-row body breaks the width contract
    #[test]
    fn prop_truncated_body_is_malformed(rows in rows_strategy()) {
        prop_assume!(rows.len() > 1);
        let layout = RowLayout { with_scores: true, ..RowLayout::default() };
        let RedisValue::Array(mut items) = search_reply(&rows, layout) else {
            unreachable!("search_reply builds an array");
        };
        items.pop();

        let err = decode_search(&RedisValue::Array(items), DocumentMode::Object, layout).unwrap_err();
        prop_assert!(err.is_malformed());
    }

    /// Decoding is repeatable
    #[test]
    fn prop_decode_is_idempotent(rows in rows_strategy(), layout in layout_strategy()) {
        let raw = search_reply(&rows, layout);
        let first = decode_search(&raw, DocumentMode::Object, layout).unwrap();
        let second = decode_search(&raw, DocumentMode::Object, layout).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Spellcheck never keeps single-character suggestions
    #[test]
    fn prop_spellcheck_drops_single_letters(
        terms in prop::collection::vec(
            ("[a-z]{2,8}", prop::collection::vec((0.0f64..1.0, "[a-z]{1,4}"), 0..6)),
            0..6,
        ),
    ) {
        let rows: Vec<RedisValue> = terms
            .iter()
            .map(|(term, suggestions)| {
                let pairs = suggestions
                    .iter()
                    .map(|(score, word)| RedisValue::Array(vec![bulk(&score.to_string()), bulk(word)]))
                    .collect();
                RedisValue::Array(vec![bulk("TERM"), bulk(term), RedisValue::Array(pairs)])
            })
            .collect();

        let result = decode_spellcheck(&RedisValue::Array(rows), DocumentMode::Object).unwrap();
        prop_assert_eq!(result.count(), terms.len() as i64);

        for (doc, (term, suggestions)) in result.documents().records().unwrap().iter().zip(terms.iter()) {
            prop_assert_eq!(&doc.term, term);
            prop_assert!(doc.suggestions.keys().all(|word| word.len() > 1));
            for (_, word) in suggestions.iter().filter(|(_, w)| w.len() > 1) {
                prop_assert!(doc.suggestions.contains_key(word));
            }
        }
    }
}

// =============================================================================
// Robustness Fuzz Tests
// =============================================================================

proptest! {
    /// Search decoding should never panic on arbitrary replies
    #[test]
    fn fuzz_decode_search_arbitrary(raw in arbitrary_reply_strategy(), layout in layout_strategy()) {
        let _ = decode_search(&raw, DocumentMode::Object, layout);
        let _ = decode_search(&raw, DocumentMode::Array, layout);
        let _ = decode_search_page(&raw, DocumentMode::Object, layout);
    }

    /// Spellcheck decoding should never panic on arbitrary replies
    #[test]
    fn fuzz_decode_spellcheck_arbitrary(raw in arbitrary_reply_strategy()) {
        let _ = decode_spellcheck(&raw, DocumentMode::Object);
        let _ = decode_spellcheck(&raw, DocumentMode::Array);
    }

    /// Any count over a non-empty body either decodes to `count` documents or fails cleanly
    #[test]
    fn fuzz_count_body_mismatch(count in -5i64..30, body in prop::collection::vec("[a-z]{1,4}", 1..30)) {
        let mut items = vec![RedisValue::Int(count)];
        items.extend(body.iter().map(|s| bulk(s)));

        match decode_search(&RedisValue::Array(items), DocumentMode::Object, RowLayout::default()) {
            Ok(result) if count > 0 => prop_assert_eq!(result.documents().len() as i64, count),
            Ok(result) => prop_assert!(result.documents().is_empty()),
            Err(err) => prop_assert!(err.is_malformed()),
        }
    }
}
