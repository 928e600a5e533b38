//! Page descriptions (page.toml)
//!
//! A page is described as a tree of elements with their classes, attributes,
//! text and layout bounds. Bounds are `[x, y, width, height]` in page
//! coordinates; elements without bounds have an empty box at the origin.
//!
//! ```toml
//! [viewport]
//! width = 1280
//! height = 800
//!
//! [[element]]
//! tag = "nav"
//! id = "navbar"
//! bounds = [0, 0, 1280, 70]
//!
//!   [[element.children]]
//!   tag = "div"
//!   id = "hamburger"
//!   class = ["hamburger"]
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use vitrine_core::{ElementId, Error, Rect, Result};

use crate::document::Document;

/// A whole page
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PageSpec {
    #[serde(default)]
    pub viewport: ViewportSpec,
    #[serde(default, rename = "element")]
    pub elements: Vec<ElementSpec>,
}

/// Initial viewport
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ViewportSpec {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    /// Set false to model a host without intersection observation
    #[serde(default = "default_true")]
    pub intersection: bool,
}

fn default_width() -> f32 {
    1280.0
}

fn default_height() -> f32 {
    800.0
}

fn default_true() -> bool {
    true
}

impl Default for ViewportSpec {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            intersection: true,
        }
    }
}

/// One element and its subtree
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ElementSpec {
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "classes")]
    pub class: Vec<String>,
    #[serde(default)]
    pub attrs: IndexMap<String, String>,
    #[serde(default)]
    pub style: IndexMap<String, String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub bounds: Option<[f32; 4]>,
    #[serde(default)]
    pub children: Vec<ElementSpec>,
}

impl PageSpec {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Build a fresh document from the description
    pub fn build(&self) -> Document {
        let mut doc = Document::new(self.viewport.width, self.viewport.height);
        doc.set_intersection_supported(self.viewport.intersection);
        let body = doc.body();
        for element in &self.elements {
            element.build_into(&mut doc, body);
        }
        doc
    }
}

impl ElementSpec {
    fn build_into(&self, doc: &mut Document, parent: ElementId) -> ElementId {
        let id = doc.create_child(parent, &self.tag);
        if let Some(element_id) = &self.id {
            doc.set_element_id(id, element_id.clone());
        }
        for class in &self.class {
            doc.add_class(id, class);
        }
        for (name, value) in &self.attrs {
            doc.set_attr(id, name, value.clone());
        }
        for (property, value) in &self.style {
            doc.set_style(id, property, value.clone());
        }
        if let Some(text) = &self.text {
            doc.set_text(id, text.clone());
        }
        if let Some([x, y, width, height]) = self.bounds {
            doc.set_bounds(id, Rect::new(x, y, width, height));
        }
        for child in &self.children {
            child.build_into(doc, id);
        }
        id
    }
}
