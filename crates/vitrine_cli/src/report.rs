//! Report output model for session runs.

use anyhow::{bail, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::io::Write;
use std::path::{Component, Path};
use vitrine_core::ElementId;
use vitrine_page::{Document, OverlayKind, Page};

/// Report status for a session run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// Machine-readable result of a session run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub status: ReportStatus,
    pub failed_step_index: Option<usize>,
    pub assertion: Option<String>,
    pub message: Option<String>,
    pub steps_run: usize,
    pub elapsed_ms: u64,
    pub snapshot: PageSnapshot,
}

impl SessionReport {
    pub fn passed(steps_run: usize, page: &Page) -> Self {
        Self {
            status: ReportStatus::Passed,
            failed_step_index: None,
            assertion: None,
            message: None,
            steps_run,
            elapsed_ms: page.now(),
            snapshot: PageSnapshot::capture(page),
        }
    }

    pub fn failed(assertion: &str, failed_step_index: usize, message: String, page: &Page) -> Self {
        Self {
            status: ReportStatus::Failed,
            failed_step_index: Some(failed_step_index),
            assertion: Some(assertion.to_string()),
            message: Some(message),
            steps_run: failed_step_index + 1,
            elapsed_ms: page.now(),
            snapshot: PageSnapshot::capture(page),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == ReportStatus::Failed
    }

    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        if path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            bail!("report path cannot contain '..' or drive prefixes");
        }
        let payload = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, payload)?;
        Ok(())
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    /// Human-readable summary followed by the element tree.
    ///
    /// Inline styles are listed only when `styles` is set.
    pub fn render_text(&self, styles: bool) -> String {
        let mut out = String::new();
        match self.status {
            ReportStatus::Passed => {
                let _ = writeln!(out, "passed: {} steps, {} ms", self.steps_run, self.elapsed_ms);
            }
            ReportStatus::Failed => {
                let _ = writeln!(
                    out,
                    "failed at step {} ({}): {}",
                    self.failed_step_index.unwrap_or_default(),
                    self.assertion.as_deref().unwrap_or("unknown"),
                    self.message.as_deref().unwrap_or_default()
                );
            }
        }

        let snapshot = &self.snapshot;
        let _ = writeln!(
            out,
            "viewport {}x{} scrolled to {}",
            snapshot.viewport.0, snapshot.viewport.1, snapshot.scroll_y
        );
        if let Some(typing) = &snapshot.typing {
            let _ = writeln!(out, "typing: {typing:?}");
        }
        if let Some(tooltip) = &snapshot.tooltip {
            let _ = writeln!(out, "tooltip: {tooltip:?}");
        }
        for notification in &snapshot.notifications {
            let _ = writeln!(
                out,
                "notification [{}{}]: {}",
                notification.kind,
                if notification.closing { ", closing" } else { "" },
                notification.message
            );
        }
        out.push('\n');
        snapshot.root.render(&mut out, 0, styles);
        out
    }
}

/// State of the page when the run ended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub time_ms: u64,
    pub scroll_y: f32,
    /// Width and height
    pub viewport: (f32, f32),
    /// Text currently shown by the typing animation
    pub typing: Option<String>,
    /// Label of the visible tooltip
    pub tooltip: Option<String>,
    /// Live notifications, oldest first
    pub notifications: Vec<NotificationSnapshot>,
    pub root: NodeSnapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSnapshot {
    pub kind: String,
    pub message: String,
    pub closing: bool,
    /// Horizontal slide offset in px
    pub offset: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub styles: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

impl PageSnapshot {
    pub fn capture(page: &Page) -> Self {
        let doc = page.document();
        let now = page.now();
        let viewport = doc.viewport();
        let overlays = page.overlays();

        let tooltip = overlays
            .active_tooltip()
            .and_then(|id| overlays.get(id))
            .map(|overlay| overlay.message.clone());

        let mut notifications: Vec<_> = overlays
            .notifications()
            .filter_map(|(_, overlay)| match overlay.kind {
                OverlayKind::Notification(kind) => Some((overlay.created_at, NotificationSnapshot {
                    kind: kind.as_str().to_string(),
                    message: overlay.message.clone(),
                    closing: overlay.closing,
                    offset: overlay.rendered_value(now),
                })),
                OverlayKind::Tooltip => None,
            })
            .collect();
        notifications.sort_by_key(|(created_at, _)| *created_at);

        Self {
            time_ms: now,
            scroll_y: viewport.scroll_y,
            viewport: (viewport.width, viewport.height),
            typing: page
                .state()
                .typing()
                .map(|cycler| cycler.displayed().to_string()),
            tooltip,
            notifications: notifications.into_iter().map(|(_, n)| n).collect(),
            root: NodeSnapshot::capture(doc, doc.body()),
        }
    }
}

impl NodeSnapshot {
    fn capture(doc: &Document, id: ElementId) -> Self {
        let Some(element) = doc.get(id) else {
            return Self {
                tag: String::new(),
                id: None,
                classes: Vec::new(),
                text: String::new(),
                styles: IndexMap::new(),
                children: Vec::new(),
            };
        };
        Self {
            tag: element.tag.clone(),
            id: element.id.clone(),
            classes: element.classes().map(String::from).collect(),
            text: element.text().to_string(),
            styles: element
                .styles()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            children: element
                .children()
                .iter()
                .map(|child| NodeSnapshot::capture(doc, *child))
                .collect(),
        }
    }

    fn render(&self, out: &mut String, depth: usize, styles: bool) {
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{indent}{}", self.tag);
        if let Some(id) = &self.id {
            let _ = write!(out, "#{id}");
        }
        for class in &self.classes {
            let _ = write!(out, ".{class}");
        }
        if !self.text.is_empty() {
            let _ = write!(out, " {:?}", self.text);
        }
        out.push('\n');
        if styles {
            for (property, value) in &self.styles {
                let _ = writeln!(out, "{indent}  | {property}: {value}");
            }
        }
        for child in &self.children {
            child.render(out, depth + 1, styles);
        }
    }
}
