//! Portfolio page behaviors
//!
//! Each component wires itself into a page once, at load: it looks up the
//! elements it drives, applies initial styles, registers visibility triggers
//! and subscribes handlers. Components whose elements are missing skip
//! themselves; the rest of the page keeps working.

pub mod contact;
pub mod counters;
pub mod easter_egg;
pub mod lazy_images;
pub mod navigation;
pub mod particles;
pub mod preloader;
pub mod reveal;
pub mod scroll_effects;
pub mod showcase;
pub mod skills;
pub mod tech_icons;
pub mod typing_text;

use vitrine_core::{ElementId, EventDispatcher};

use crate::document::Document;
use crate::page::PageState;

/// The dispatcher components subscribe to
pub type PageEvents = EventDispatcher<PageState>;

/// Stylesheet rules overlays rely on
const OVERLAY_STYLES: &str = "\
.notification-content { display: flex; align-items: center; gap: 12px; }
.notification-close { background: none; border: none; color: white; cursor: pointer; padding: 4px; border-radius: 4px; transition: background-color 0.2s ease; }
.notification-close:hover { background-color: rgba(255, 255, 255, 0.2); }";

/// Attach every component, in page initialization order
pub fn install(state: &mut PageState, events: &mut PageEvents) {
    state.doc.add_head_style(OVERLAY_STYLES);

    reveal::install(state, events);
    navigation::install(state, events);
    scroll_effects::install(state, events);
    skills::install(state, events);
    showcase::install(state, events);
    counters::install(state, events);
    contact::install(state, events);
    typing_text::install(state, events);
    tech_icons::install(state, events);
    particles::install(state, events);
    easter_egg::install(state, events);
    lazy_images::install(state, events);
    preloader::install(state, events);
}

/// Format a CSS number: at most three decimals, no negative zero
pub(crate) fn css_number(value: f32) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

/// Technology name of an icon or showcase item
pub(crate) fn tech_name(doc: &Document, element: ElementId) -> String {
    match doc.attr(element, "data-tech") {
        Some(name) => name.to_string(),
        None => doc.text_content(element).trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_number() {
        assert_eq!(css_number(0.0), "0");
        assert_eq!(css_number(-0.0), "0");
        assert_eq!(css_number(3.0 * 0.2), "0.6");
        assert_eq!(css_number(-150.0), "-150");
        assert_eq!(css_number(12.34567), "12.346");
    }

    #[test]
    fn test_tech_name_falls_back_to_text() {
        let mut doc = Document::new(800.0, 600.0);
        let item = doc.create_child(doc.body(), "div");
        let label = doc.create_child(item, "span");
        doc.set_text(label, " Docker ");
        assert_eq!(tech_name(&doc, item), "Docker");

        doc.set_attr(item, "data-tech", "Kubernetes");
        assert_eq!(tech_name(&doc, item), "Kubernetes");
    }
}
