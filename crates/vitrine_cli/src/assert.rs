//! Session assertions against the page document

use vitrine_core::ElementId;
use vitrine_page::Document;

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

fn target(doc: &Document, selector: &str, index: usize) -> Result<ElementId, AssertionResult> {
    doc.select(selector)
        .get(index)
        .copied()
        .ok_or_else(|| AssertionResult::Failed {
            code: "missing_element".to_string(),
            message: format!("{selector}[{index}]: element not found"),
        })
}

pub fn exists(doc: &Document, selector: &str, index: usize) -> AssertionResult {
    match target(doc, selector, index) {
        Ok(_) => AssertionResult::Passed,
        Err(failed) => failed,
    }
}

/// The element's text, descendants included, contains `expected`
pub fn text_contains(
    doc: &Document,
    selector: &str,
    index: usize,
    expected: &str,
) -> AssertionResult {
    let element = match target(doc, selector, index) {
        Ok(element) => element,
        Err(failed) => return failed,
    };
    let text = doc.text_content(element);
    if text.contains(expected) {
        AssertionResult::Passed
    } else {
        AssertionResult::Failed {
            code: "text_mismatch".to_string(),
            message: format!("{selector}[{index}]: expected substring '{expected}', got '{text}'"),
        }
    }
}

pub fn has_class(
    doc: &Document,
    selector: &str,
    index: usize,
    class: &str,
    present: bool,
) -> AssertionResult {
    let element = match target(doc, selector, index) {
        Ok(element) => element,
        Err(failed) => return failed,
    };
    if doc.has_class(element, class) == present {
        AssertionResult::Passed
    } else {
        let expectation = if present { "to have" } else { "not to have" };
        AssertionResult::Failed {
            code: "class_mismatch".to_string(),
            message: format!("{selector}[{index}]: expected {expectation} class '{class}'"),
        }
    }
}

pub fn style_equals(
    doc: &Document,
    selector: &str,
    index: usize,
    property: &str,
    expected: &str,
) -> AssertionResult {
    let element = match target(doc, selector, index) {
        Ok(element) => element,
        Err(failed) => return failed,
    };
    match doc.style(element, property) {
        Some(value) if value == expected => AssertionResult::Passed,
        actual => AssertionResult::Failed {
            code: "style_mismatch".to_string(),
            message: format!(
                "{selector}[{index}]: expected {property}: {expected}, got {}",
                actual.unwrap_or("<unset>")
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        let mut doc = Document::new(800.0, 600.0);
        let el = doc.create_child(doc.body(), "div");
        doc.set_element_id(el, "greeting");
        doc.add_class(el, "hello");
        doc.set_text(el, "Hello there");
        doc.set_style(el, "opacity", "1");
        doc
    }

    #[test]
    fn test_passing_checks() {
        let doc = doc();
        assert_eq!(exists(&doc, "#greeting", 0), AssertionResult::Passed);
        assert_eq!(text_contains(&doc, ".hello", 0, "there"), AssertionResult::Passed);
        assert_eq!(has_class(&doc, "div", 0, "hello", true), AssertionResult::Passed);
        assert_eq!(has_class(&doc, "div", 0, "visible", false), AssertionResult::Passed);
        assert_eq!(style_equals(&doc, "div", 0, "opacity", "1"), AssertionResult::Passed);
    }

    #[test]
    fn test_failure_codes() {
        let doc = doc();
        let code = |result: AssertionResult| match result {
            AssertionResult::Failed { code, .. } => code,
            AssertionResult::Passed => "passed".to_string(),
        };
        assert_eq!(code(exists(&doc, "#greeting", 1)), "missing_element");
        assert_eq!(code(text_contains(&doc, "#greeting", 0, "bye")), "text_mismatch");
        assert_eq!(code(has_class(&doc, "#greeting", 0, "hello", false)), "class_mismatch");
        assert_eq!(code(style_equals(&doc, "#greeting", 0, "width", "10px")), "style_mismatch");
    }
}
