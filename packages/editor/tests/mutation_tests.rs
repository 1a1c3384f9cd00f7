//! Per-mutation behavior against a live session

use pagecraft_editor::{EditSession, Mutation, MutationError};
use pagecraft_model::{
    ComponentTemplate, ElementKind, ElementPatch, GlobalStylesPatch, ProjectDocument, ThemePatch,
};

fn session() -> EditSession {
    EditSession::new(ProjectDocument::new("Site"))
}

fn add(session: &mut EditSession, kind: ElementKind) -> String {
    session
        .apply(Mutation::AddElement {
            template: ComponentTemplate::base(&kind).unwrap(),
        })
        .unwrap()
        .created_id
        .unwrap()
}

#[test]
fn test_add_element_uses_template_defaults() {
    let mut session = session();
    let id = add(&mut session, ElementKind::Image);

    let element = session.current_page().unwrap().element(&id).unwrap();
    assert_eq!(element.kind, ElementKind::Image);
    assert_eq!(element.src.as_deref(), Some("https://placehold.co/600x280"));
    assert_eq!(element.alt.as_deref(), Some("placeholder"));
    assert_eq!(element.style.get("padding").map(String::as_str), Some("12px"));
    assert_eq!(
        element.style.get("borderRadius").map(String::as_str),
        Some("10px")
    );
}

#[test]
fn test_patch_element_merges_style() {
    let mut session = session();
    let id = add(&mut session, ElementKind::Button);

    session
        .apply(Mutation::PatchElement {
            element_id: id.clone(),
            patch: ElementPatch::style("color", "#000"),
        })
        .unwrap();

    let element = session.current_page().unwrap().element(&id).unwrap();
    assert_eq!(element.style.get("color").map(String::as_str), Some("#000"));
    assert_eq!(
        element.style.get("background").map(String::as_str),
        Some("#5b7cfa")
    );
    assert_eq!(element.content.as_deref(), Some("Primary action"));
}

#[test]
fn test_patch_missing_element_is_rejected() {
    let mut session = session();
    let result = session.apply(Mutation::PatchElement {
        element_id: "ghost".to_string(),
        patch: ElementPatch::content("x"),
    });
    assert_eq!(
        result,
        Err(MutationError::ElementNotFound("ghost".to_string()))
    );
    assert_eq!(session.version(), 0);
}

#[test]
fn test_move_element_clamps_index() {
    let mut session = session();
    let first = add(&mut session, ElementKind::Text);
    let second = add(&mut session, ElementKind::Button);

    session
        .apply(Mutation::MoveElement {
            element_id: first.clone(),
            index: 99,
        })
        .unwrap();

    let ids: Vec<_> = session
        .current_page()
        .unwrap()
        .elements
        .iter()
        .map(|el| el.id.clone())
        .collect();
    assert_eq!(ids, vec![second, first]);
}

#[test]
fn test_remove_last_page_is_rejected() {
    let mut session = session();
    let home = session.document().pages[0].id.clone();
    let result = session.apply(Mutation::RemovePage { page_id: home });
    assert_eq!(result, Err(MutationError::LastPage));
    assert_eq!(session.document().pages.len(), 1);
}

#[test]
fn test_remove_current_page_selects_another() {
    let mut session = session();
    let home = session.document().pages[0].id.clone();
    let about = session
        .apply(Mutation::AddPage {
            name: "About".to_string(),
        })
        .unwrap()
        .created_id
        .unwrap();
    assert_eq!(session.current_page().unwrap().id, about);

    session
        .apply(Mutation::RemovePage { page_id: about })
        .unwrap();
    assert_eq!(session.current_page().unwrap().id, home);
}

#[test]
fn test_rename_and_move_page() {
    let mut session = session();
    let about = session
        .apply(Mutation::AddPage {
            name: "About".to_string(),
        })
        .unwrap()
        .created_id
        .unwrap();

    session
        .apply(Mutation::RenamePage {
            page_id: about.clone(),
            name: "Team".to_string(),
        })
        .unwrap();
    session
        .apply(Mutation::MovePage {
            page_id: about.clone(),
            index: 0,
        })
        .unwrap();

    let first = &session.document().pages[0];
    assert_eq!(first.id, about);
    assert_eq!(first.name, "Team");
}

#[test]
fn test_theme_and_global_style_patches() {
    let mut session = session();
    session
        .apply(Mutation::PatchTheme {
            patch: ThemePatch {
                primary: Some("#ff0066".to_string()),
                ..Default::default()
            },
        })
        .unwrap();
    session
        .apply(Mutation::PatchGlobalStyles {
            patch: GlobalStylesPatch {
                background: Some("#000".to_string()),
                ..Default::default()
            },
        })
        .unwrap();

    let doc = session.document();
    assert_eq!(doc.theme.primary, "#ff0066");
    assert_eq!(doc.theme.radius, 10.0);
    assert_eq!(doc.global_styles.background, "#000");
    assert_eq!(doc.global_styles.color, "#0f172a");
    assert_eq!(session.history().undo_levels(), 2);
}

#[test]
fn test_instantiate_missing_reusable() {
    let mut session = session();
    let result = session.apply(Mutation::InstantiateReusable {
        reusable_id: "nope".to_string(),
    });
    assert_eq!(
        result,
        Err(MutationError::ReusableNotFound("nope".to_string()))
    );
}

#[test]
fn test_unknown_kind_survives_editing() {
    let mut session = session();
    let id = session
        .apply(Mutation::AddElement {
            template: ComponentTemplate::new(
                ElementKind::from("carousel"),
                "Carousel",
                ElementPatch::default(),
            ),
        })
        .unwrap()
        .created_id
        .unwrap();

    let element = session.current_page().unwrap().element(&id).unwrap();
    assert_eq!(element.kind.as_str(), "carousel");
    assert!(!element.kind.is_known());
}
