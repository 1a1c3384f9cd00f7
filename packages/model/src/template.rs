use crate::element::{Element, ElementKind, ElementPatch};
use serde::{Deserialize, Serialize};

/// Palette entry that new elements are stamped from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentTemplate {
    pub kind: ElementKind,
    pub label: String,
    #[serde(default)]
    pub defaults: ElementPatch,
}

impl ComponentTemplate {
    pub fn new(kind: ElementKind, label: impl Into<String>, defaults: ElementPatch) -> Self {
        Self {
            kind,
            label: label.into(),
            defaults,
        }
    }

    /// Build a fresh element: base style, then the template's data on top
    pub fn instantiate(&self, id: impl Into<String>) -> Element {
        let mut element = Element::new(id, self.kind.clone());
        element.merge(&self.defaults);
        element
    }

    /// Look up a base component by its type name
    pub fn base(kind: &ElementKind) -> Option<ComponentTemplate> {
        base_components().into_iter().find(|t| &t.kind == kind)
    }
}

/// The built-in component palette
pub fn base_components() -> Vec<ComponentTemplate> {
    vec![
        ComponentTemplate::new(
            ElementKind::Text,
            "Text",
            ElementPatch::content("Edit this text"),
        ),
        ComponentTemplate::new(
            ElementKind::Button,
            "Button",
            ElementPatch::content("Primary action")
                .with_style("background", "#5b7cfa")
                .with_style("color", "#fff"),
        ),
        ComponentTemplate::new(
            ElementKind::Image,
            "Image",
            ElementPatch::src("https://placehold.co/600x280").with_alt("placeholder"),
        ),
        ComponentTemplate::new(ElementKind::Form, "Form", ElementPatch::default()),
        ComponentTemplate::new(
            ElementKind::Card,
            "Card",
            ElementPatch::content("Describe your feature here.").with_title("Card heading"),
        ),
        ComponentTemplate::new(ElementKind::Navbar, "Navbar", ElementPatch::default()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_covers_every_base_kind() {
        let kinds: Vec<ElementKind> = base_components().into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ElementKind::Text,
                ElementKind::Button,
                ElementKind::Image,
                ElementKind::Form,
                ElementKind::Card,
                ElementKind::Navbar,
            ]
        );
    }

    #[test]
    fn test_button_template_layers_style_over_base() {
        let template = ComponentTemplate::base(&ElementKind::Button).unwrap();
        let element = template.instantiate("b1");

        assert_eq!(element.id, "b1");
        assert_eq!(element.kind, ElementKind::Button);
        assert_eq!(element.content.as_deref(), Some("Primary action"));
        assert_eq!(element.style["padding"], "12px");
        assert_eq!(element.style["borderRadius"], "10px");
        assert_eq!(element.style["background"], "#5b7cfa");
        assert_eq!(element.style["color"], "#fff");
    }

    #[test]
    fn test_card_template_sets_title_and_content() {
        let element = ComponentTemplate::base(&ElementKind::Card).unwrap().instantiate("c1");
        assert_eq!(element.title.as_deref(), Some("Card heading"));
        assert_eq!(element.content.as_deref(), Some("Describe your feature here."));
    }

    #[test]
    fn test_no_template_for_reusable_kind() {
        assert!(ComponentTemplate::base(&ElementKind::Reusable).is_none());
    }
}
