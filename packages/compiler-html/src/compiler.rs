use pagecraft_model::{Element, ElementKind, Page, ProjectDocument, StyleMap, HOME_PAGE_NAME};

/// Rules shipped with every rendered page, after the global styles
const BASELINE_CSS: &[&str] = &[
    "* { box-sizing:border-box; }",
    "nav { display:flex; gap:12px; padding:12px; background:rgba(15,23,42,.08); }",
    "a { color:inherit; text-decoration:none; }",
    "main { max-width:1000px; margin:0 auto; padding:24px; display:flex; flex-direction:column; gap:14px; }",
    "button { border:none; border-radius:8px; padding:10px 14px; cursor:pointer; }",
    "input { padding:10px; border:1px solid #ddd; border-radius:8px; margin-right:8px; }",
];

const DEFAULT_IMAGE_SRC: &str = "https://placehold.co/600x300";

struct Context {
    buffer: String,
}

impl Context {
    fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn text(&mut self, text: &str) {
        self.buffer.push_str(&escape_html(text));
    }

    fn open(&mut self, tag: &str, attributes: &[(&str, &str)]) {
        self.add("<");
        self.add(tag);
        self.attributes(attributes);
        self.add(">");
    }

    fn void(&mut self, tag: &str, attributes: &[(&str, &str)]) {
        self.add("<");
        self.add(tag);
        self.attributes(attributes);
        self.add(" />");
    }

    fn close(&mut self, tag: &str) {
        self.add("</");
        self.add(tag);
        self.add(">");
    }

    /// `<tag attrs>text</tag>`
    fn leaf(&mut self, tag: &str, attributes: &[(&str, &str)], text: &str) {
        self.open(tag, attributes);
        self.text(text);
        self.close(tag);
    }

    fn attributes(&mut self, attributes: &[(&str, &str)]) {
        for (name, value) in attributes {
            self.add(" ");
            self.add(name);
            self.add("=\"");
            self.text(value);
            self.add("\"");
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Rewrite a camelCase style key to its hyphenated CSS property name
///
/// `borderRadius` → `border-radius`, `WebkitTransform` → `-webkit-transform`.
/// Keys that are already hyphenated pass through unchanged.
pub fn css_property_name(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Serialize a style map into inline-style syntax: `key:value;key:value`
pub fn style_to_css(style: &StyleMap) -> String {
    style
        .iter()
        .map(|(key, value)| format!("{}:{}", css_property_name(key), value))
        .collect::<Vec<_>>()
        .join(";")
}

/// Render one element to markup
///
/// Never fails: missing fields fall back to per-type defaults and unknown
/// types render as a generic container.
pub fn render_element(element: &Element) -> String {
    let mut ctx = Context::new();
    compile_element(element, &mut ctx);
    ctx.get_output()
}

fn compile_element(element: &Element, ctx: &mut Context) {
    let style = style_to_css(&element.style);
    let style_attr = [("style", style.as_str())];
    let content = element.content.as_deref();

    match &element.kind {
        ElementKind::Text => {
            ctx.leaf("p", &style_attr, content.unwrap_or("Text block"));
        }

        ElementKind::Button => {
            ctx.leaf("button", &style_attr, content.unwrap_or("Click me"));
        }

        ElementKind::Image => {
            ctx.void(
                "img",
                &[
                    ("src", element.src.as_deref().unwrap_or(DEFAULT_IMAGE_SRC)),
                    ("alt", element.alt.as_deref().unwrap_or("image")),
                    ("style", style.as_str()),
                ],
            );
        }

        ElementKind::Form => {
            ctx.open("form", &style_attr);
            ctx.void("input", &[("placeholder", "Your email")]);
            ctx.leaf("button", &[], "Submit");
            ctx.close("form");
        }

        ElementKind::Card => {
            ctx.open("div", &style_attr);
            ctx.leaf("h3", &[], element.title.as_deref().unwrap_or("Card title"));
            ctx.leaf("p", &[], content.unwrap_or("Card content"));
            ctx.close("div");
        }

        ElementKind::Navbar => {
            ctx.open("nav", &style_attr);
            for label in ["Home", "About", "Contact"] {
                ctx.leaf("a", &[("href", "#")], label);
            }
            ctx.close("nav");
        }

        ElementKind::Reusable => {
            ctx.open("div", &style_attr);
            ctx.leaf("strong", &[], element.name.as_deref().unwrap_or("Reusable"));
            ctx.leaf("p", &[], content.unwrap_or("Reusable block"));
            ctx.close("div");
        }

        ElementKind::Unknown(_) => {
            ctx.leaf("div", &style_attr, content.unwrap_or("Custom component"));
        }
    }
}

/// Page-level stylesheet: global styles, theme variables, baseline rules
pub fn global_css(document: &ProjectDocument) -> String {
    let global = &document.global_styles;
    let theme = &document.theme;

    let mut rules = vec![
        format!(
            ":root {{ --primary:{}; --radius:{}px; }}",
            css_value(&theme.primary),
            theme.radius
        ),
        format!(
            "body {{ margin:0; padding:0; font-family:{}; background:{}; color:{}; }}",
            css_value(&global.font_family),
            css_value(&global.background),
            css_value(&global.color)
        ),
    ];
    rules.extend(BASELINE_CSS.iter().map(|rule| rule.to_string()));
    rules.join("\n")
}

/// Render `page` of `document` as a standalone HTML document
///
/// This is the single rendering path for both the live preview and the
/// exported or published artifact.
pub fn render_page(document: &ProjectDocument, page: &Page) -> String {
    let mut ctx = Context::new();

    ctx.add("<!doctype html>");
    ctx.open("html", &[]);

    ctx.open("head", &[]);
    ctx.void("meta", &[("charset", "UTF-8")]);
    ctx.void(
        "meta",
        &[("name", "viewport"), ("content", "width=device-width,initial-scale=1")],
    );
    ctx.leaf("title", &[], &document.name);
    ctx.open("style", &[]);
    ctx.add(&global_css(document));
    ctx.close("style");
    ctx.close("head");

    ctx.open("body", &[]);
    ctx.open("main", &[("data-page", page.name.as_str())]);
    for element in &page.elements {
        compile_element(element, &mut ctx);
    }
    ctx.close("main");
    ctx.close("body");

    ctx.close("html");
    ctx.get_output()
}

/// Render the page used for export and publish: always the first page
pub fn render_project(document: &ProjectDocument) -> String {
    match document.first_page() {
        Some(page) => render_page(document, page),
        None => render_page(document, &Page::new("", HOME_PAGE_NAME)),
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Strip characters that could close the declaration block or the style tag
fn css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '{' | '}'))
        .collect()
}
