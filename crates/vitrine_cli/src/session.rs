//! Scripted sessions
//!
//! A session is an ordered list of steps. Each step first moves the virtual
//! clock to its `at_ms`, then performs one interaction or check.
//!
//! ```toml
//! run_until_ms = 5000
//!
//! [[step]]
//! at_ms = 500
//! type = "scroll"
//! y = 900
//!
//! [[step]]
//! at_ms = 2600
//! type = "assert_text"
//! target = ".stat-number"
//! contains = "120"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use vitrine_core::{ElementId, KeyCode};
use vitrine_page::Page;

use crate::assert::{self, AssertionResult};
use crate::report::SessionReport;

/// A scripted session
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Session {
    /// Keep the clock running until this time once every step has run
    #[serde(default)]
    pub run_until_ms: Option<u64>,
    #[serde(default, rename = "step")]
    pub steps: Vec<SessionStep>,
}

/// One timed step
#[derive(Debug, Clone, Deserialize)]
pub struct SessionStep {
    #[serde(default)]
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: Action,
}

/// What a step does. Targets are simple selectors; `index` picks among
/// several matches in document order.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Scroll {
        y: f32,
    },
    Resize {
        width: f32,
        height: f32,
    },
    Click {
        target: String,
        #[serde(default)]
        index: usize,
    },
    /// Pointer enters the target
    Enter {
        target: String,
        #[serde(default)]
        index: usize,
    },
    /// Pointer leaves the target
    Leave {
        target: String,
        #[serde(default)]
        index: usize,
    },
    Submit {
        target: String,
        #[serde(default)]
        index: usize,
    },
    /// Replace a field's value
    Input {
        target: String,
        #[serde(default)]
        index: usize,
        value: String,
    },
    /// Press keys in order
    Key {
        keys: Vec<String>,
    },
    AssertExists {
        target: String,
        #[serde(default)]
        index: usize,
    },
    AssertText {
        target: String,
        #[serde(default)]
        index: usize,
        contains: String,
    },
    AssertClass {
        target: String,
        #[serde(default)]
        index: usize,
        class: String,
        #[serde(default = "default_true")]
        present: bool,
    },
    AssertStyle {
        target: String,
        #[serde(default)]
        index: usize,
        property: String,
        equals: String,
    },
}

fn default_true() -> bool {
    true
}

impl Session {
    /// Parse a session from TOML text
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Load a session file
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read session {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("invalid session {}", path.display()))
    }
}

/// Load the page if needed, run every step, and report the final state.
///
/// Interactions whose target is missing are skipped with a warning; the first
/// failing assertion stops the run.
pub fn replay(page: &mut Page, session: &Session) -> Result<SessionReport> {
    if !page.is_loaded() {
        page.load();
    }

    for (step_index, step) in session.steps.iter().enumerate() {
        page.advance_to(step.at_ms);
        tracing::debug!(step = step_index, at_ms = step.at_ms, action = ?step.action, "session step");

        let result = match &step.action {
            Action::Scroll { y } => {
                page.scroll_to(*y);
                AssertionResult::Passed
            }
            Action::Resize { width, height } => {
                page.resize(*width, *height);
                AssertionResult::Passed
            }
            Action::Click { target, index } => {
                if let Some(element) = resolve(page, target, *index) {
                    page.click(element);
                }
                AssertionResult::Passed
            }
            Action::Enter { target, index } => {
                if let Some(element) = resolve(page, target, *index) {
                    page.pointer_enter(element);
                }
                AssertionResult::Passed
            }
            Action::Leave { target, index } => {
                if let Some(element) = resolve(page, target, *index) {
                    page.pointer_leave(element);
                }
                AssertionResult::Passed
            }
            Action::Submit { target, index } => {
                if let Some(element) = resolve(page, target, *index) {
                    page.submit(element);
                }
                AssertionResult::Passed
            }
            Action::Input {
                target,
                index,
                value,
            } => {
                if let Some(element) = resolve(page, target, *index) {
                    page.input(element, value);
                }
                AssertionResult::Passed
            }
            Action::Key { keys } => {
                for name in keys {
                    let key = KeyCode::from_name(name)
                        .with_context(|| format!("step {step_index}: unknown key `{name}`"))?;
                    page.key_down(key);
                }
                AssertionResult::Passed
            }
            Action::AssertExists { target, index } => {
                assert::exists(page.document(), target, *index)
            }
            Action::AssertText {
                target,
                index,
                contains,
            } => assert::text_contains(page.document(), target, *index, contains),
            Action::AssertClass {
                target,
                index,
                class,
                present,
            } => assert::has_class(page.document(), target, *index, class, *present),
            Action::AssertStyle {
                target,
                index,
                property,
                equals,
            } => assert::style_equals(page.document(), target, *index, property, equals),
        };

        if let AssertionResult::Failed { code, message } = result {
            tracing::warn!(step = step_index, %message, "assertion failed");
            return Ok(SessionReport::failed(&code, step_index, message, page));
        }
    }

    if let Some(until) = session.run_until_ms {
        page.advance_to(until);
    }
    Ok(SessionReport::passed(session.steps.len(), page))
}

fn resolve(page: &Page, selector: &str, index: usize) -> Option<ElementId> {
    let found = page.document().select(selector).get(index).copied();
    if found.is_none() {
        tracing::warn!(selector, index, "session target not found, step skipped");
    }
    found
}
