//! # Pagecraft HTML Renderer
//!
//! Turns a project document into markup. The same functions back the live
//! preview and the exported/published site, so what the editor shows is what
//! ships.

mod compiler;


pub use compiler::{
    css_property_name, global_css, render_element, render_page, render_project, style_to_css,
};
