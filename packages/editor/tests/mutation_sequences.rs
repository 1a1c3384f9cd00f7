//! Mutation scripts and batched edits

use pagecraft_editor::{EditSession, Mutation};
use pagecraft_model::{ElementPatch, ProjectDocument};

#[test]
fn test_script_replay() {
    let script = r#"[
        {"type": "renameProject", "name": "Launch"},
        {"type": "addPage", "name": "Pricing"},
        {"type": "addElement", "template": {"kind": "button", "label": "Button", "defaults": {"content": "Go"}}},
        {"type": "patchTheme", "patch": {"radius": 4}}
    ]"#;

    let mutations = Mutation::parse_script(script).unwrap();
    assert_eq!(mutations.len(), 4);

    let mut session = EditSession::new(ProjectDocument::new("Site"));
    for mutation in mutations {
        session.apply(mutation).unwrap();
    }

    let doc = session.document();
    assert_eq!(doc.name, "Launch");
    assert_eq!(doc.pages.len(), 2);
    assert_eq!(doc.theme.radius, 4.0);

    let page = session.current_page().unwrap();
    assert_eq!(page.name, "Pricing");
    assert_eq!(page.elements[0].content.as_deref(), Some("Go"));
    assert_eq!(session.history().undo_levels(), 4);
}

#[test]
fn test_batched_style_updates() {
    let mut session = EditSession::new(ProjectDocument::new("Site"));
    let id = session
        .apply(Mutation::AddElement {
            template: pagecraft_model::ComponentTemplate::base(
                &pagecraft_model::ElementKind::Text,
            )
            .unwrap(),
        })
        .unwrap()
        .created_id
        .unwrap();
    session.select(&id).unwrap();

    session.begin_batch("Update look");
    for (key, value) in [
        ("color", "blue"),
        ("background", "white"),
        ("padding", "20px"),
        ("borderRadius", "8px"),
    ] {
        session.patch_selected_style(key, value).unwrap();
    }
    session.end_batch();

    assert_eq!(session.history().undo_levels(), 2);
    assert_eq!(session.history().undo_description(), Some("Update look"));

    session.undo();
    let element = session.current_page().unwrap().element(&id).unwrap();
    assert!(!element.style.contains_key("color"));
    assert_eq!(element.style.get("padding").map(String::as_str), Some("12px"));
}

#[test]
fn test_failed_step_does_not_abort_later_steps() {
    let mut session = EditSession::new(ProjectDocument::new("Site"));
    let steps = vec![
        Mutation::RenameProject {
            name: "A".to_string(),
        },
        Mutation::PatchElement {
            element_id: "missing".to_string(),
            patch: ElementPatch::content("x"),
        },
        Mutation::RenameProject {
            name: "B".to_string(),
        },
    ];

    let failures = steps
        .into_iter()
        .map(|m| session.apply(m))
        .filter(Result::is_err)
        .count();

    assert_eq!(failures, 1);
    assert_eq!(session.document().name, "B");
    assert_eq!(session.history().undo_levels(), 2);

    session.undo();
    assert_eq!(session.document().name, "A");
}
