//! In-memory element tree
//!
//! The rendering surface every page behavior reads attributes from and writes
//! styles, classes and text into. Element handles stay valid until the element
//! (or an ancestor) is removed; afterwards every operation on the handle is a
//! silent no-op, so deferred mutations never need to check liveness.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::SmallVec;
use vitrine_core::geometry::Rect;
use vitrine_core::ElementId;

/// A single element
#[derive(Clone, Debug, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    classes: SmallVec<[String; 4]>,
    attributes: FxHashMap<String, String>,
    /// Inline styles in insertion order
    styles: IndexMap<String, String>,
    text: String,
    children: Vec<ElementId>,
    parent: Option<ElementId>,
    /// Layout box in page coordinates
    bounds: Rect,
    disabled: bool,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    pub fn styles(&self) -> impl Iterator<Item = (&str, &str)> {
        self.styles.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// A `<button>` submits its form unless its type says otherwise
    pub fn is_submit_button(&self) -> bool {
        self.tag.eq_ignore_ascii_case("button") && self.attr("type").unwrap_or("submit") == "submit"
    }
}

/// Scrollable viewport over the page
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scroll_y: f32,
}

impl Viewport {
    /// Visible region in page coordinates
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.height)
    }
}

/// The page document
pub struct Document {
    elements: SlotMap<ElementId, Element>,
    body: ElementId,
    head_styles: Vec<String>,
    viewport: Viewport,
    intersection_supported: bool,
}

impl Document {
    pub fn new(width: f32, height: f32) -> Self {
        let mut elements = SlotMap::with_key();
        let body = elements.insert(Element::new("body"));
        Self {
            elements,
            body,
            head_styles: Vec::new(),
            viewport: Viewport {
                width,
                height,
                scroll_y: 0.0,
            },
            intersection_supported: true,
        }
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    /// True while the handle refers to a live element
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    /// True if the element is attached under `body`
    pub fn is_connected(&self, id: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == self.body {
                return true;
            }
            current = self.elements.get(node).and_then(|e| e.parent);
        }
        false
    }

    /// Number of live elements, `body` included
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    // ------------------------------------------------------------------
    // Tree structure
    // ------------------------------------------------------------------

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.elements.insert(Element::new(tag))
    }

    /// Create an element and append it to `parent`
    pub fn create_child(&mut self, parent: ElementId, tag: &str) -> ElementId {
        let child = self.create_element(tag);
        self.append_child(parent, child);
        child
    }

    /// Append `child` to `parent`, detaching it from any previous parent
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        if parent == child || !self.contains(parent) || !self.contains(child) {
            return false;
        }
        if self.is_ancestor(child, parent) {
            return false;
        }
        self.detach(child);
        self.elements[parent].children.push(child);
        self.elements[child].parent = Some(parent);
        true
    }

    /// Remove an element and its subtree. Removing `body` is refused.
    pub fn remove(&mut self, id: ElementId) -> bool {
        if id == self.body || !self.contains(id) {
            return false;
        }
        self.detach(id);

        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            if let Some(element) = self.elements.remove(node) {
                stack.extend(element.children);
            }
        }
        true
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(id).and_then(|e| e.parent)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements
            .get(id)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
    }

    fn detach(&mut self, id: ElementId) {
        if let Some(parent) = self.elements.get_mut(id).and_then(|e| e.parent.take()) {
            if let Some(parent) = self.elements.get_mut(parent) {
                parent.children.retain(|c| *c != id);
            }
        }
    }

    fn is_ancestor(&self, candidate: ElementId, of: ElementId) -> bool {
        let mut current = self.parent(of);
        while let Some(node) = current {
            if node == candidate {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    // ------------------------------------------------------------------
    // Queries (document order)
    // ------------------------------------------------------------------

    /// Descendants of `root` in document order, `root` excluded
    pub fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(root).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    /// All connected elements matching `predicate`, `body` included
    pub fn query(&self, predicate: impl Fn(&Element) -> bool) -> Vec<ElementId> {
        let mut found: Vec<ElementId> = self
            .elements
            .get(self.body)
            .filter(|body| predicate(body))
            .map(|_| self.body)
            .into_iter()
            .collect();
        found.extend(self.query_within(self.body, &predicate));
        found
    }

    /// Descendants of `root` matching `predicate`
    pub fn query_within(
        &self,
        root: ElementId,
        predicate: impl Fn(&Element) -> bool,
    ) -> Vec<ElementId> {
        self.descendants(root)
            .into_iter()
            .filter(|id| self.elements.get(*id).is_some_and(&predicate))
            .collect()
    }

    pub fn query_class(&self, class: &str) -> Vec<ElementId> {
        self.query(|e| e.has_class(class))
    }

    pub fn query_class_within(&self, root: ElementId, class: &str) -> Vec<ElementId> {
        self.query_within(root, |e| e.has_class(class))
    }

    pub fn first_by_class(&self, class: &str) -> Option<ElementId> {
        self.query_class(class).into_iter().next()
    }

    pub fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.query(|e| e.id.as_deref() == Some(id)).into_iter().next()
    }

    /// Resolve a simple selector: `#id`, `.class` or a tag name
    pub fn select(&self, selector: &str) -> Vec<ElementId> {
        let selector = selector.trim();
        if let Some(id) = selector.strip_prefix('#') {
            self.element_by_id(id).into_iter().collect()
        } else if let Some(class) = selector.strip_prefix('.') {
            self.query_class(class)
        } else {
            self.query(|e| e.tag.eq_ignore_ascii_case(selector))
        }
    }

    // ------------------------------------------------------------------
    // Classes
    // ------------------------------------------------------------------

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.elements.get(id).is_some_and(|e| e.has_class(class))
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            if !element.has_class(class) {
                element.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.classes.retain(|c| c != class);
        }
    }

    /// Toggle a class, returning whether it is now present
    pub fn toggle_class(&mut self, id: ElementId, class: &str) -> bool {
        if self.has_class(id, class) {
            self.remove_class(id, class);
            false
        } else {
            self.add_class(id, class);
            self.contains(id)
        }
    }

    /// Add or remove a class depending on `on`
    pub fn set_class(&mut self, id: ElementId, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    // ------------------------------------------------------------------
    // Attributes, styles, text
    // ------------------------------------------------------------------

    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.elements.get(id).and_then(|e| e.attr(name))
    }

    pub fn set_attr(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        if let Some(element) = self.elements.get_mut(id) {
            element.attributes.insert(name.to_string(), value.into());
        }
    }

    pub fn remove_attr(&mut self, id: ElementId, name: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.attributes.remove(name);
        }
    }

    pub fn set_element_id(&mut self, id: ElementId, element_id: impl Into<String>) {
        if let Some(element) = self.elements.get_mut(id) {
            element.id = Some(element_id.into());
        }
    }

    pub fn style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.elements.get(id).and_then(|e| e.style(property))
    }

    /// Set an inline style. An empty value clears the property.
    pub fn set_style(&mut self, id: ElementId, property: &str, value: impl Into<String>) {
        let Some(element) = self.elements.get_mut(id) else {
            tracing::trace!(property, "style write on removed element skipped");
            return;
        };
        let value = value.into();
        if value.is_empty() {
            element.styles.shift_remove(property);
        } else {
            element.styles.insert(property.to_string(), value);
        }
    }

    /// Set several inline styles at once
    pub fn set_styles<'a>(&mut self, id: ElementId, styles: impl IntoIterator<Item = (&'a str, String)>) {
        for (property, value) in styles {
            self.set_style(id, property, value);
        }
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.elements.get(id).map(|e| e.text())
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        if let Some(element) = self.elements.get_mut(id) {
            element.text = text.into();
        }
    }

    /// Text of an element and all its descendants, in document order
    pub fn text_content(&self, id: ElementId) -> String {
        let mut out = self.text(id).unwrap_or_default().to_string();
        for node in self.descendants(id) {
            out.push_str(self.elements[node].text());
        }
        out
    }

    pub fn is_disabled(&self, id: ElementId) -> bool {
        self.elements.get(id).is_some_and(|e| e.disabled)
    }

    pub fn set_disabled(&mut self, id: ElementId, disabled: bool) {
        if let Some(element) = self.elements.get_mut(id) {
            element.disabled = disabled;
        }
    }

    // ------------------------------------------------------------------
    // Layout and viewport
    // ------------------------------------------------------------------

    pub fn bounds(&self, id: ElementId) -> Option<Rect> {
        self.elements.get(id).map(|e| e.bounds)
    }

    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) {
        if let Some(element) = self.elements.get_mut(id) {
            element.bounds = bounds;
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scroll_y(&self) -> f32 {
        self.viewport.scroll_y
    }

    /// Scroll to `y`, clamped so the viewport stays within the page
    pub fn set_scroll(&mut self, y: f32) -> f32 {
        let max = (self.page_height() - self.viewport.height).max(0.0);
        self.viewport.scroll_y = y.clamp(0.0, max);
        self.viewport.scroll_y
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.width = width;
        self.viewport.height = height;
        self.set_scroll(self.viewport.scroll_y);
    }

    /// Bottom edge of the lowest connected element
    pub fn page_height(&self) -> f32 {
        self.descendants(self.body)
            .into_iter()
            .map(|id| self.elements[id].bounds.bottom())
            .fold(self.viewport.height, f32::max)
    }

    /// Whether the host supports viewport-intersection observation
    pub fn supports_intersection(&self) -> bool {
        self.intersection_supported
    }

    pub fn set_intersection_supported(&mut self, supported: bool) {
        self.intersection_supported = supported;
    }

    /// Fraction of the element's area inside the viewport, with the
    /// viewport's bottom edge pulled in by `root_margin_bottom` pixels.
    ///
    /// Zero-area elements report 1.0 when their origin is inside.
    pub fn intersection_ratio(&self, id: ElementId, root_margin_bottom: f32) -> Option<f32> {
        if !self.is_connected(id) {
            return None;
        }
        let bounds = self.bounds(id)?;
        let view = self.viewport.rect();
        let root = Rect::new(
            view.x(),
            view.y(),
            view.width(),
            (view.height() - root_margin_bottom).max(0.0),
        );

        if bounds.area() <= 0.0 {
            let inside = bounds.x() >= root.x()
                && bounds.x() <= root.right()
                && bounds.y() >= root.y()
                && bounds.y() <= root.bottom();
            return Some(if inside { 1.0 } else { 0.0 });
        }

        let visible = bounds.intersection(&root).map_or(0.0, |r| r.area());
        Some(visible / bounds.area())
    }

    // ------------------------------------------------------------------
    // Document-level stylesheet
    // ------------------------------------------------------------------

    /// Register a stylesheet rule block (keyframes, helper classes)
    pub fn add_head_style(&mut self, css: impl Into<String>) {
        self.head_styles.push(css.into());
    }

    pub fn head_styles(&self) -> &[String] {
        &self.head_styles
    }
}
