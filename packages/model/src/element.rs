use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Inline style declarations, keyed by camelCase property name
pub type StyleMap = IndexMap<String, String>;

/// Fields that are never written through a patch's passthrough map
const PROTECTED_FIELDS: &[&str] = &["id", "type"];

/// The kind of visual component an element renders as
///
/// Serialized as the plain `type` string. Strings outside the known set are
/// kept verbatim in `Unknown` so they survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementKind {
    Text,
    Button,
    Image,
    Form,
    Card,
    Navbar,
    Reusable,
    Unknown(String),
}

impl ElementKind {
    pub fn as_str(&self) -> &str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Button => "button",
            ElementKind::Image => "image",
            ElementKind::Form => "form",
            ElementKind::Card => "card",
            ElementKind::Navbar => "navbar",
            ElementKind::Reusable => "reusable",
            ElementKind::Unknown(other) => other,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ElementKind::Unknown(_))
    }
}

impl From<String> for ElementKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "text" => ElementKind::Text,
            "button" => ElementKind::Button,
            "image" => ElementKind::Image,
            "form" => ElementKind::Form,
            "card" => ElementKind::Card,
            "navbar" => ElementKind::Navbar,
            "reusable" => ElementKind::Reusable,
            _ => ElementKind::Unknown(value),
        }
    }
}

impl From<&str> for ElementKind {
    fn from(value: &str) -> Self {
        ElementKind::from(value.to_string())
    }
}

impl From<ElementKind> for String {
    fn from(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Unknown(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One placed visual component on a page
///
/// `id` and `kind` are fixed at creation. Every other field can be patched.
/// Only the fields meaningful for `kind` are read by the renderer; the rest
/// are carried along untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: ElementKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    /// Catalog name (set on reusable components and their instances)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub style: StyleMap,

    /// Fields this version does not know about
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Element {
    /// Create a bare element with the base style applied
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            content: None,
            title: None,
            src: None,
            alt: None,
            name: None,
            style: base_style(),
            extra: Map::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    /// Shallow-merge a patch into this element
    ///
    /// Style entries are merged into the existing map, not replaced.
    pub fn merge(&mut self, patch: &ElementPatch) {
        merge_field(&mut self.content, &patch.content);
        merge_field(&mut self.title, &patch.title);
        merge_field(&mut self.src, &patch.src);
        merge_field(&mut self.alt, &patch.alt);
        merge_field(&mut self.name, &patch.name);

        for (key, value) in &patch.style {
            self.style.insert(key.clone(), value.clone());
        }

        for (key, value) in &patch.extra {
            if PROTECTED_FIELDS.contains(&key.as_str()) {
                continue;
            }
            self.extra.insert(key.clone(), value.clone());
        }
    }

    /// Copy of this element under a different id
    pub fn duplicate(&self, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..self.clone()
        }
    }
}

fn merge_field(target: &mut Option<String>, value: &Option<String>) {
    if let Some(value) = value {
        *target = Some(value.clone());
    }
}

/// Style every element starts with
pub fn base_style() -> StyleMap {
    let mut style = StyleMap::new();
    style.insert("padding".to_string(), "12px".to_string());
    style.insert("borderRadius".to_string(), "10px".to_string());
    style
}

/// Partial update for an element
///
/// Absent fields leave the element as it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub style: StyleMap,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ElementPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn src(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            ..Default::default()
        }
    }

    pub fn style(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut style = StyleMap::new();
        style.insert(key.into(), value.into());
        Self {
            style,
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.title.is_none()
            && self.src.is_none()
            && self.alt.is_none()
            && self.name.is_none()
            && self.style.is_empty()
            && self.extra.is_empty()
    }
}
