//! Property-based tests for the diff crate.
//!
//! Invariants covered:
//! - structural round-trip: parse -> Display -> parse is the identity
//! - header counts always agree with the op sequence
//! - fuzz matching is monotonic in the fuzz factor

use crate::model::{Hunk, LineKind, LineOp, PatchFile};
use crate::{match_hunk, parse};
use patchguard_types::VendorPath;
use proptest::prelude::*;

fn arb_line_text() -> impl Strategy<Value = String> {
    // Printable, no leading diff markers needed: the serializer prefixes ops.
    prop::string::string_regex("[a-zA-Z0-9 _.;(){}$>=-]{0,40}").unwrap()
}

fn arb_ops() -> impl Strategy<Value = Vec<LineOp>> {
    prop::collection::vec(
        (0u8..3, arb_line_text()).prop_map(|(kind, text)| match kind {
            0 => LineOp::context(text),
            1 => LineOp::add(text),
            _ => LineOp::remove(text),
        }),
        1..12,
    )
}

fn count_old(ops: &[LineOp]) -> u32 {
    ops.iter()
        .filter(|op| matches!(op.kind, LineKind::Context | LineKind::Remove))
        .count() as u32
}

fn count_new(ops: &[LineOp]) -> u32 {
    ops.iter()
        .filter(|op| matches!(op.kind, LineKind::Context | LineKind::Add))
        .count() as u32
}

fn arb_patch_file() -> impl Strategy<Value = PatchFile> {
    prop::collection::vec(arb_ops(), 1..4).prop_map(|hunk_ops| {
        // Lay hunks out so they never overlap and stay ordered.
        let mut hunks = Vec::new();
        let mut old_pos = 1u32;
        let mut new_pos = 1u32;
        for ops in hunk_ops {
            let old_lines = count_old(&ops);
            let new_lines = count_new(&ops);
            hunks.push(Hunk {
                old_start: old_pos,
                old_lines,
                new_start: new_pos,
                new_lines,
                ops,
            });
            old_pos += old_lines + 3;
            new_pos += new_lines + 3;
        }
        PatchFile {
            path: VendorPath::new("vendor/acme/module-demo/Model/Demo.php"),
            hunks,
        }
    })
}

proptest! {
    #[test]
    fn display_parse_round_trip(file in arb_patch_file()) {
        let text = file.to_string();
        let reparsed = parse(&text).expect("serialized patch must reparse");
        prop_assert_eq!(reparsed.len(), 1);
        prop_assert_eq!(&reparsed[0], &file);
    }

    #[test]
    fn parsed_counts_match_ops(file in arb_patch_file()) {
        let reparsed = parse(&file.to_string()).expect("reparse");
        for hunk in &reparsed[0].hunks {
            prop_assert_eq!(hunk.old_lines, count_old(&hunk.ops));
            prop_assert_eq!(hunk.new_lines, count_new(&hunk.ops));
        }
    }

    #[test]
    fn fuzz_matching_is_monotonic(
        file in arb_patch_file(),
        local in prop::collection::vec(arb_line_text(), 0..30),
        fuzz in 0usize..4,
    ) {
        for hunk in &file.hunks {
            if match_hunk(&local, hunk, fuzz).is_some() {
                prop_assert!(
                    match_hunk(&local, hunk, fuzz + 1).is_some(),
                    "a match at fuzz={} vanished at fuzz={}", fuzz, fuzz + 1
                );
            }
        }
    }
}
