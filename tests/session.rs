//! Editing session tests - insertion point fallback, removal, reconcile, history

mod common;

use common::{output_string, test_catalog, test_state, text, token};
use tagbuf::codec::{SerialForm, Serialized};
use tagbuf::config::TagEditorConfig;
use tagbuf::editable::{Caret, EditOutcome, Position, Selection, TagEditMsg, TagEditorState};
use tagbuf::TagValidation;

fn insert(state: &mut TagEditorState, id: &str) -> EditOutcome {
    state.update(TagEditMsg::InsertToken {
        id: id.to_string(),
        position: None,
    })
}

#[test]
fn test_chained_insertions_follow_the_caret() {
    let mut state = test_state("Dear , enjoy");
    state.capture(Some(Caret::InNode { node: 0, offset: 5 }));

    insert(&mut state, "name");
    insert(&mut state, "gift");
    assert_eq!(output_string(&state), "Dear {name}{gift}, enjoy");
}

#[test]
fn test_focus_leaving_keeps_remembered_position() {
    let mut state = test_state("ab");
    state.capture(Some(Caret::InNode { node: 0, offset: 1 }));
    // User clicks a token picker outside the surface
    state.capture(None);

    insert(&mut state, "x");
    assert_eq!(output_string(&state), "a{x}b");
}

#[test]
fn test_stale_position_falls_back_to_end() {
    let mut state = test_state("hello world");
    state.capture(Some(Caret::InNode { node: 0, offset: 11 }));
    state.update(TagEditMsg::Load("hi".into()));
    state.capture(Some(Caret::InNode { node: 0, offset: 9 }));

    insert(&mut state, "gift");
    assert_eq!(output_string(&state), "hi{gift}");
}

#[test]
fn test_remove_token_request() {
    let mut state = test_state("Hi {name}, {gift}");
    let outcome = state.update(TagEditMsg::RemoveToken("name".to_string()));
    assert_eq!(
        outcome,
        EditOutcome::Changed {
            output: "Hi , {gift}".into(),
            position: Position::new(3),
        }
    );
    assert_eq!(
        state.update(TagEditMsg::RemoveToken("name".to_string())),
        EditOutcome::Unchanged
    );
}

#[test]
fn test_reconcile_after_surface_typing() {
    let mut state = test_state("{gift}");
    state.update(TagEditMsg::Reconcile(vec![
        text("Your "),
        text(""),
        token("gift"),
        text(" awaits"),
    ]));
    assert_eq!(output_string(&state), "Your {gift} awaits");
    assert_eq!(
        state.buffer().segments(),
        &[text("Your "), token("gift"), text(" awaits")]
    );
}

#[test]
fn test_typed_identifier_promotion_is_configurable() {
    let promote = TagEditorConfig {
        promote_typed_tokens: true,
        ..TagEditorConfig::default()
    };
    let mut state = TagEditorState::new(promote, test_catalog());
    state.update(TagEditMsg::Reconcile(vec![text("hi {name}")]));
    assert_eq!(state.buffer().segments(), &[text("hi "), token("name")]);

    let mut plain = TagEditorState::new(TagEditorConfig::default(), test_catalog());
    plain.update(TagEditMsg::Reconcile(vec![text("hi {name}")]));
    assert_eq!(plain.buffer().segments(), &[text("hi {name}")]);
}

#[test]
fn test_any_validation_accepts_unlisted_tokens() {
    let config = TagEditorConfig {
        validation: TagValidation::Any,
        ..TagEditorConfig::default()
    };
    let mut state = TagEditorState::new(config, test_catalog());
    assert!(insert(&mut state, "custom").is_changed());
    assert_eq!(output_string(&state), "{custom}");
    assert_eq!(state.label_for("custom"), None);
    // `}` cannot be written back in bracketed form
    assert_eq!(insert(&mut state, "a}b"), EditOutcome::Unchanged);

    let config = TagEditorConfig {
        form: SerialForm::List,
        validation: TagValidation::Any,
        ..TagEditorConfig::default()
    };
    let mut state = TagEditorState::new(config, test_catalog());
    assert!(insert(&mut state, "a}b").is_changed());
    assert_eq!(state.buffer().segments(), &[token("a}b")]);
}

#[test]
fn test_list_form_session() {
    let config = TagEditorConfig {
        form: SerialForm::List,
        trim_text: true,
        ..TagEditorConfig::default()
    };
    let initial = Serialized::from_json(
        r#"[{"type":"text","value":"  hello  "},{"type":"tag","value":"gift"}]"#,
    )
    .unwrap();
    let state = TagEditorState::from_serialized(&initial, config, test_catalog());
    assert_eq!(
        state.output().to_json().unwrap(),
        r#"[{"type":"text","value":"hello"},{"type":"tag","value":"gift"}]"#
    );
    assert_eq!(state.buffer().display_text(state.catalog()), "helloGift card");
}

#[test]
fn test_undo_restores_deleted_token() {
    let mut state = test_state("a{gift}b");
    state.update(TagEditMsg::RemoveToken("gift".to_string()));
    assert_eq!(output_string(&state), "ab");

    state.update(TagEditMsg::Undo);
    assert_eq!(output_string(&state), "a{gift}b");
    state.update(TagEditMsg::Redo);
    assert_eq!(output_string(&state), "ab");
}

#[test]
fn test_history_limit_from_config() {
    let config = TagEditorConfig {
        history_limit: 2,
        ..TagEditorConfig::default()
    };
    let mut state = TagEditorState::new(config, test_catalog());
    for _ in 0..4 {
        insert(&mut state, "x");
    }
    assert!(state.update(TagEditMsg::Undo).is_changed());
    assert!(state.update(TagEditMsg::Undo).is_changed());
    assert_eq!(state.update(TagEditMsg::Undo), EditOutcome::Unchanged);
    assert_eq!(output_string(&state), "{x}{x}");
}

fn backspace_at(state: &mut TagEditorState, caret: Caret) -> EditOutcome {
    state.update(TagEditMsg::Backspace(Selection::collapsed(caret)))
}

#[test]
fn test_backspace_after_trimming_reconcile() {
    let config = TagEditorConfig {
        trim_text: true,
        ..TagEditorConfig::default()
    };
    let mut state = TagEditorState::new(config, test_catalog());
    state.update(TagEditMsg::Reconcile(vec![text("hi  "), token("gift")]));
    assert_eq!(output_string(&state), "hi{gift}");

    let outcome = backspace_at(&mut state, Caret::InContainer { child: 2 });
    assert_eq!(
        outcome,
        EditOutcome::Changed {
            output: "hi".into(),
            position: Position::new(2),
        }
    );
}

#[test]
fn test_backspace_after_promoting_reconcile() {
    let config = TagEditorConfig {
        promote_typed_tokens: true,
        ..TagEditorConfig::default()
    };
    let mut state = TagEditorState::new(config, test_catalog());
    state.update(TagEditMsg::Reconcile(vec![text("{name} "), token("gift")]));
    assert_eq!(
        state.buffer().segments(),
        &[token("name"), text(" "), token("gift")]
    );

    let outcome = backspace_at(&mut state, Caret::InContainer { child: 2 });
    assert!(outcome.is_changed());
    assert_eq!(output_string(&state), "{name} ");
}

#[test]
fn test_capture_after_trimming_reconcile() {
    let config = TagEditorConfig {
        trim_text: true,
        ..TagEditorConfig::default()
    };
    let mut state = TagEditorState::new(config, test_catalog());
    state.update(TagEditMsg::Reconcile(vec![text("  hello"), token("gift")]));

    let position = state.capture(Some(Caret::InNode { node: 0, offset: 4 }));
    assert_eq!(position, Some(Position::new(2)));
    insert(&mut state, "x");
    assert_eq!(output_string(&state), "he{x}llo{gift}");
}

#[test]
fn test_capture_inside_typed_identifier() {
    let config = TagEditorConfig {
        promote_typed_tokens: true,
        ..TagEditorConfig::default()
    };
    let mut state = TagEditorState::new(config, test_catalog());
    state.update(TagEditMsg::Reconcile(vec![text("hi {name}!")]));

    // Between `a` and `m` of the typed `{name}`
    let position = state.capture(Some(Caret::InNode { node: 0, offset: 6 }));
    assert_eq!(position, Some(Position::new(4)));
    insert(&mut state, "x");
    assert_eq!(output_string(&state), "hi {name}{x}!");
}

#[test]
fn test_rendered_surface_replaces_observed() {
    let mut state = TagEditorState::new(TagEditorConfig::default(), test_catalog());
    let outcome = state.update(TagEditMsg::Reconcile(vec![text("a"), text("b"), token("gift")]));
    assert!(outcome.is_changed());
    assert_eq!(state.surface(), &[text("a"), text("b"), token("gift")]);

    assert_eq!(state.update(TagEditMsg::Rendered), EditOutcome::Unchanged);
    assert_eq!(state.surface(), state.buffer().segments());

    // Carets now index the canonical nodes
    let outcome = backspace_at(&mut state, Caret::InContainer { child: 2 });
    assert!(outcome.is_changed());
    assert_eq!(output_string(&state), "ab");
}
