//! Vitrine Page Runtime
//!
//! A headless portfolio page: an element tree standing in for the DOM, plus
//! the behaviors wired into it at load.
//!
//! # Example
//!
//! ```rust
//! use vitrine_page::{Page, PageConfig, PageSpec};
//!
//! let spec = PageSpec::from_toml_str(r#"
//!     [[element]]
//!     tag = "button"
//!     id = "back-to-top"
//!
//!     [[element]]
//!     tag = "section"
//!     bounds = [0, 0, 1280, 3000]
//! "#).unwrap();
//!
//! let mut page = Page::from_spec(&spec, PageConfig::default());
//! page.load();
//! page.scroll_to(400.0);
//!
//! let button = page.document().element_by_id("back-to-top").unwrap();
//! assert!(page.document().has_class(button, "visible"));
//! ```

pub mod components;
pub mod config;
pub mod document;
pub mod markup;
pub mod overlay;
pub mod page;
pub mod tasks;
pub mod tech_info;
pub mod visibility;

pub use config::{FeaturesConfig, PageConfig, TimingConfig, TypingConfig};
pub use document::{Document, Element, Viewport};
pub use markup::{ElementSpec, PageSpec, ViewportSpec};
pub use overlay::{NotificationKind, Overlay, OverlayId, OverlayKind, OverlayManager};
pub use page::{Page, PageState};
pub use tasks::{Mutation, Task};
pub use visibility::{Sighting, VisibilityTrigger};
