mod common;

use common::generators::{document, pick_batch, step};
use common::harness::{assert_editor_mirrors, editor_for, fresh_render, outline, patch};
use dpe_dom::DocumentAdapter;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn rendered_rows_mirror_document(doc in document()) {
        let editor = editor_for(doc);
        assert_editor_mirrors(&editor);
    }

    #[test]
    fn patched_view_matches_fresh_render(
        doc in document(),
        batches in prop::collection::vec(prop::collection::vec(step(), 1..5), 1..6),
    ) {
        let mut editor = editor_for(doc);
        for steps in &batches {
            let ops = pick_batch(editor.adapter().unwrap().contents(), steps);
            patch(&mut editor, ops).unwrap();
        }

        assert_editor_mirrors(&editor);
        let fresh = fresh_render(&editor);
        prop_assert_eq!(outline(&editor), outline(&fresh));
        prop_assert_eq!(editor.toolkit().live_count(), fresh.toolkit().live_count());
    }

    #[test]
    fn reset_twice_matches_reset_once(doc in document()) {
        let mut editor = editor_for(doc);
        let once = outline(&editor);
        let live = editor.toolkit().live_count();

        editor.handle_reset().unwrap();
        editor.handle_reset().unwrap();
        prop_assert_eq!(outline(&editor), once);
        prop_assert_eq!(editor.toolkit().live_count(), live);
    }
}
