//! # Project Document
//!
//! The in-memory representation of one user project: its pages, theme,
//! global styles, uploaded assets and the reusable component catalog.
//!
//! The serialized form is plain camelCase JSON. Every struct keeps the fields
//! it does not recognise in a flattened `extra` map, so documents written by a
//! newer editor load and save without losing data.

use crate::element::Element;
use crate::id_generator::IDGenerator;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Name of the page every new document starts with
pub const HOME_PAGE_NAME: &str = "Home";

pub const DEFAULT_PROJECT_NAME: &str = "Untitled Project";

/// Named, ordered list of elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Page {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            elements: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn element_index(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    /// Generator that avoids the element ids on this page
    pub fn id_generator(&self) -> IDGenerator {
        IDGenerator::with_taken(self.elements.iter().map(|e| e.id.clone()))
    }
}

/// Project-wide theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_primary")]
    pub primary: String,
    /// Corner radius in pixels
    #[serde(default = "default_radius", deserialize_with = "lenient_radius")]
    pub radius: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_primary() -> String {
    "#5b7cfa".to_string()
}

fn default_radius() -> f64 {
    10.0
}

/// Accepts `8.5` or `"10px"`; anything unreadable falls back to the default
fn lenient_radius<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(radius_from_value(&value).unwrap_or_else(default_radius))
}

fn radius_from_value(value: &Value) -> Option<f64> {
    let radius = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches("px").trim_end().parse().ok(),
        _ => None,
    };
    radius.filter(|r| r.is_finite() && *r >= 0.0)
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            radius: default_radius(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl Theme {
    pub fn merge(&mut self, patch: &ThemePatch) {
        if let Some(primary) = &patch.primary {
            self.primary = primary.clone();
        }
        if let Some(radius) = patch.radius {
            self.radius = radius;
        }
    }
}

/// Page-level styles applied to the whole rendered site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStyles {
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_background")]
    pub background: String,
    /// Text color
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_font_family() -> String {
    "Inter, Arial, sans-serif".to_string()
}

fn default_background() -> String {
    "#f5f7fb".to_string()
}

fn default_color() -> String {
    "#0f172a".to_string()
}

impl Default for GlobalStyles {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            background: default_background(),
            color: default_color(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStylesPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl GlobalStyles {
    pub fn merge(&mut self, patch: &GlobalStylesPatch) {
        if let Some(font_family) = &patch.font_family {
            self.font_family = font_family.clone();
        }
        if let Some(background) = &patch.background {
            self.background = background.clone();
        }
        if let Some(color) = &patch.color {
            self.color = color.clone();
        }
    }
}

/// Uploaded file, addressed by a durable url (often a data url)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Asset {
    pub fn new(id: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
            extra: Map::new(),
        }
    }
}

/// Full editable state of one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    #[serde(default)]
    pub id: String,

    #[serde(default = "default_project_name")]
    pub name: String,

    #[serde(default)]
    pub pages: Vec<Page>,

    #[serde(default)]
    pub current_page_id: Option<String>,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default)]
    pub global_styles: GlobalStyles,

    /// Named element snapshots. Placing one copies it; nothing stays linked.
    #[serde(default)]
    pub reusable_components: Vec<Element>,

    #[serde(default)]
    pub assets: Vec<Asset>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_project_name() -> String {
    DEFAULT_PROJECT_NAME.to_string()
}

impl ProjectDocument {
    /// Fresh document with a single empty Home page
    pub fn new(name: impl Into<String>) -> Self {
        let home = Page::new(IDGenerator::new().new_id(), HOME_PAGE_NAME);
        Self {
            id: String::new(),
            name: name.into(),
            current_page_id: Some(home.id.clone()),
            pages: vec![home],
            theme: Theme::default(),
            global_styles: GlobalStyles::default(),
            reusable_components: Vec::new(),
            assets: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Repair structural invariants after loading untrusted JSON
    ///
    /// Guarantees at least one page and a `current_page_id` that points at an
    /// existing page.
    pub fn normalize(&mut self) {
        if self.pages.is_empty() {
            self.pages
                .push(Page::new(IDGenerator::new().new_id(), HOME_PAGE_NAME));
        }
        if self.current_page_index_exact().is_none() {
            self.current_page_id = Some(self.pages[0].id.clone());
        }
    }

    fn current_page_index_exact(&self) -> Option<usize> {
        let id = self.current_page_id.as_deref()?;
        self.page_index(id)
    }

    /// Index of the current page, falling back to the first page
    pub fn current_page_index(&self) -> Option<usize> {
        if self.pages.is_empty() {
            return None;
        }
        Some(self.current_page_index_exact().unwrap_or(0))
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.current_page_index().map(|i| &self.pages[i])
    }

    pub fn current_page_mut(&mut self) -> Option<&mut Page> {
        let index = self.current_page_index()?;
        self.pages.get_mut(index)
    }

    pub fn first_page(&self) -> Option<&Page> {
        self.pages.first()
    }

    pub fn page(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn page_mut(&mut self, id: &str) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == id)
    }

    pub fn page_index(&self, id: &str) -> Option<usize> {
        self.pages.iter().position(|p| p.id == id)
    }

    pub fn reusable(&self, id: &str) -> Option<&Element> {
        self.reusable_components.iter().find(|r| r.id == id)
    }

    pub fn reusable_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.reusable_components.iter_mut().find(|r| r.id == id)
    }

    pub fn asset(&self, id: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    pub fn page_id_generator(&self) -> IDGenerator {
        IDGenerator::with_taken(self.pages.iter().map(|p| p.id.clone()))
    }

    pub fn reusable_id_generator(&self) -> IDGenerator {
        IDGenerator::with_taken(self.reusable_components.iter().map(|r| r.id.clone()))
    }

    pub fn asset_id_generator(&self) -> IDGenerator {
        IDGenerator::with_taken(self.assets.iter().map(|a| a.id.clone()))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse and normalize a document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut document: ProjectDocument = serde_json::from_str(json)?;
        document.normalize();
        Ok(document)
    }
}

impl Default for ProjectDocument {
    fn default() -> Self {
        Self::new(DEFAULT_PROJECT_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    #[test]
    fn test_new_document_has_home_page() {
        let doc = ProjectDocument::new("Site");
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.pages[0].name, HOME_PAGE_NAME);
        assert_eq!(doc.current_page().map(|p| p.id.as_str()), Some(doc.pages[0].id.as_str()));
        assert_eq!(doc.theme.primary, "#5b7cfa");
        assert_eq!(doc.global_styles.background, "#f5f7fb");
    }

    #[test]
    fn test_stale_current_page_falls_back_to_first() {
        let mut doc = ProjectDocument::new("Site");
        doc.current_page_id = Some("gone".to_string());
        assert_eq!(doc.current_page().unwrap().id, doc.pages[0].id);

        doc.normalize();
        assert_eq!(doc.current_page_id.as_deref(), Some(doc.pages[0].id.as_str()));
    }

    #[test]
    fn test_normalize_restores_missing_pages() {
        let mut doc = ProjectDocument::from_json(r#"{"name":"Empty","pages":[]}"#).unwrap();
        doc.normalize();
        assert_eq!(doc.pages.len(), 1);
        assert!(doc.current_page().is_some());
    }

    #[test]
    fn test_json_uses_camel_case_keys() {
        let doc = ProjectDocument::new("Site");
        let value = serde_json::to_value(&doc).unwrap();
        assert!(value.get("currentPageId").is_some());
        assert!(value.get("globalStyles").unwrap().get("fontFamily").is_some());
        assert!(value.get("reusableComponents").is_some());
    }

    #[test]
    fn test_document_passthrough_fields() {
        let json = r##"{
            "id": "p1",
            "name": "Site",
            "pages": [{"id": "h", "name": "Home", "elements": [
                {"id": "e1", "type": "video", "content": "clip", "style": {}}
            ], "slug": "/"}],
            "currentPageId": "h",
            "theme": {"primary": "#000", "radius": 4, "mode": "dark"},
            "globalStyles": {"fontFamily": "Georgia", "background": "#fff", "color": "#111"},
            "reusableComponents": [],
            "assets": [],
            "seo": {"title": "Hello"}
        }"##;

        let doc = ProjectDocument::from_json(json).unwrap();
        assert_eq!(doc.pages[0].elements[0].kind, ElementKind::Unknown("video".to_string()));

        let out = serde_json::to_value(&doc).unwrap();
        assert_eq!(out["seo"]["title"], "Hello");
        assert_eq!(out["theme"]["mode"], "dark");
        assert_eq!(out["pages"][0]["slug"], "/");
        assert_eq!(out["pages"][0]["elements"][0]["type"], "video");
        assert_eq!(doc.theme.radius, 4.0);
    }

    #[test]
    fn test_theme_radius_loads_loosely() {
        let theme = |json: &str| serde_json::from_str::<Theme>(json).unwrap();

        assert_eq!(theme(r##"{"radius": 8.5}"##).radius, 8.5);
        assert_eq!(theme(r##"{"radius": "10px"}"##).radius, 10.0);
        assert_eq!(theme(r##"{"radius": " 6 px "}"##).radius, 6.0);
        assert_eq!(theme(r##"{"radius": "large"}"##).radius, 10.0);
        assert_eq!(theme(r##"{"radius": -3}"##).radius, 10.0);
        assert_eq!(theme(r##"{"radius": null, "mode": "dark"}"##).radius, 10.0);
        assert_eq!(theme(r##"{"primary": "#000"}"##).radius, 10.0);
    }
}
