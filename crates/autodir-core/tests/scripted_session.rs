use autodir_core::script::{load_script, replay};
use autodir_core::types::Direction;
use autodir_core::{DirectionMode, DocumentHooks};
use std::path::PathBuf;

#[test]
fn demo_script_produces_expected_change_sequence() {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("..");
    path.push("..");
    path.push("scripts");
    path.push("demo.ds");

    let mut script = load_script(&path).expect("load scripts/demo.ds");
    let editor = script.node("editor").expect("editor element");
    let secret = script.node("secret").expect("secret element");

    let hooks = DocumentHooks::default();
    let changes = replay(&mut script, &hooks);

    // Hebrew auto-detect, Latin auto-detect after clearing, manual chord.
    assert_eq!(changes.len(), 3);
    assert_eq!(
        (changes[0].dir, changes[0].manual),
        (Direction::Rtl, false)
    );
    assert_eq!(
        (changes[1].dir, changes[1].manual),
        (Direction::Ltr, false)
    );
    assert_eq!((changes[2].dir, changes[2].manual), (Direction::Rtl, true));
    assert!(changes.iter().all(|c| c.target == editor));

    // The editor stays pinned; the password field never changed.
    assert_eq!(hooks.mode_of(editor), DirectionMode::Manual);
    assert_eq!(hooks.mode_of(secret), DirectionMode::Auto);
    assert_eq!(
        script.page.element(secret).unwrap().style.direction,
        None
    );
}
