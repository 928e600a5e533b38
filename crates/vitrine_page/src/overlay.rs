//! Transient overlays: tooltips and notifications
//!
//! Overlays are real elements appended to `body`. Their enter and exit motion
//! is tracked as a [`StyleTransition`] so the rendered value can be sampled at
//! any time, and every overlay is guaranteed to be removed: tooltips when
//! hidden or replaced, notifications after their display time or when closed.
//!
//! At most one tooltip exists at a time; showing a new one replaces it.

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};
use vitrine_animation::{AnimationScheduler, Easing, StyleTransition};
use vitrine_core::{ElementId, Rect};

use crate::document::Document;
use crate::tasks::{OverlayTask, Task};

new_key_type! {
    pub struct OverlayId;
}

/// Approximate advance of one 14px tooltip glyph
const TOOLTIP_CHAR_WIDTH: f32 = 8.4;
const TOOLTIP_PADDING_X: f32 = 12.0;
const TOOLTIP_HEIGHT: f32 = 33.0;
/// Gap between a tooltip and its anchor
const TOOLTIP_GAP: f32 = 10.0;
/// Off-screen offset notifications slide from and back to
const NOTIFICATION_OFFSET: f32 = 400.0;

/// Notification flavor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Success,
    Info,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Info => "info",
        }
    }

    /// Banner background color
    pub fn background(&self) -> &'static str {
        match self {
            NotificationKind::Success => "#10b981",
            NotificationKind::Info => "#3b82f6",
        }
    }

    /// Icon name (Font Awesome)
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Success => "check-circle",
            NotificationKind::Info => "info-circle",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayKind {
    Tooltip,
    Notification(NotificationKind),
}

/// A live overlay
#[derive(Clone, Debug)]
pub struct Overlay {
    pub node: ElementId,
    pub kind: OverlayKind,
    pub message: String,
    pub created_at: u64,
    /// When the node is due to be removed, if scheduled
    pub deadline: Option<u64>,
    /// Exit animation in progress
    pub closing: bool,
    close_button: Option<ElementId>,
    motion: Option<StyleTransition>,
}

impl Overlay {
    pub fn close_button(&self) -> Option<ElementId> {
        self.close_button
    }

    /// Rendered value of the animated property (opacity for tooltips,
    /// horizontal offset in px for notifications)
    pub fn rendered_value(&self, now_ms: u64) -> f32 {
        match (&self.motion, self.kind) {
            (Some(motion), _) => motion.value_at(now_ms),
            (None, OverlayKind::Tooltip) => 0.0,
            (None, OverlayKind::Notification(_)) => NOTIFICATION_OFFSET,
        }
    }
}

/// Overlay delays, in milliseconds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayTimings {
    /// Delay before the enter transition starts
    pub enter_delay_ms: u64,
    pub fade_ms: u64,
    pub slide_ms: u64,
    /// Time from creation until a notification starts sliding out
    pub notification_ms: u64,
}

impl Default for OverlayTimings {
    fn default() -> Self {
        Self {
            enter_delay_ms: 10,
            fade_ms: 300,
            slide_ms: 300,
            notification_ms: 5000,
        }
    }
}

/// Owns every live overlay
#[derive(Default)]
pub struct OverlayManager {
    overlays: SlotMap<OverlayId, Overlay>,
    tooltip: Option<OverlayId>,
    timings: OverlayTimings,
}

impl OverlayManager {
    pub fn new(timings: OverlayTimings) -> Self {
        Self {
            overlays: SlotMap::with_key(),
            tooltip: None,
            timings,
        }
    }

    pub fn timings(&self) -> OverlayTimings {
        self.timings
    }

    pub fn get(&self, id: OverlayId) -> Option<&Overlay> {
        self.overlays.get(id)
    }

    pub fn active_tooltip(&self) -> Option<OverlayId> {
        self.tooltip
    }

    pub fn notifications(&self) -> impl Iterator<Item = (OverlayId, &Overlay)> {
        self.overlays
            .iter()
            .filter(|(_, o)| matches!(o.kind, OverlayKind::Notification(_)))
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    /// The notification owning a close button
    pub fn close_target(&self, element: ElementId) -> Option<OverlayId> {
        self.overlays
            .iter()
            .find(|(_, o)| o.close_button == Some(element))
            .map(|(id, _)| id)
    }

    // ------------------------------------------------------------------
    // Tooltips
    // ------------------------------------------------------------------

    /// Show a label centered above `anchor`. Any active tooltip is replaced.
    pub fn show_tooltip(
        &mut self,
        doc: &mut Document,
        timers: &mut AnimationScheduler<Task>,
        anchor: ElementId,
        label: &str,
    ) -> Option<OverlayId> {
        let rect = doc.bounds(anchor)?;
        self.hide_tooltip(doc);

        let width = label.chars().count() as f32 * TOOLTIP_CHAR_WIDTH + TOOLTIP_PADDING_X * 2.0;
        let left = rect.x() + rect.width() / 2.0 - width / 2.0;
        let top = rect.y() - TOOLTIP_HEIGHT - TOOLTIP_GAP;

        let node = doc.create_child(doc.body(), "div");
        doc.add_class(node, "tech-tooltip");
        doc.set_text(node, label);
        doc.set_bounds(node, Rect::new(left, top, width, TOOLTIP_HEIGHT));
        doc.set_styles(
            node,
            [
                ("position", "absolute".to_string()),
                ("background", "rgba(0, 0, 0, 0.8)".to_string()),
                ("color", "white".to_string()),
                ("padding", "8px 12px".to_string()),
                ("border-radius", "4px".to_string()),
                ("font-size", "14px".to_string()),
                ("pointer-events", "none".to_string()),
                ("z-index", "1000".to_string()),
                ("opacity", "0".to_string()),
                ("transition", "opacity 0.3s ease".to_string()),
                ("left", format!("{left}px")),
                ("top", format!("{top}px")),
            ],
        );

        let id = self.overlays.insert(Overlay {
            node,
            kind: OverlayKind::Tooltip,
            message: label.to_string(),
            created_at: timers.now(),
            deadline: None,
            closing: false,
            close_button: None,
            motion: None,
        });
        self.tooltip = Some(id);
        timers.set_timeout(self.timings.enter_delay_ms, Task::Overlay(OverlayTask::FadeIn(id)));
        tracing::debug!(label, "tooltip shown");
        Some(id)
    }

    /// Remove the active tooltip immediately
    pub fn hide_tooltip(&mut self, doc: &mut Document) -> bool {
        let Some(id) = self.tooltip.take() else {
            return false;
        };
        if let Some(overlay) = self.overlays.remove(id) {
            doc.remove(overlay.node);
        }
        true
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    /// Show a dismissible banner that slides in and auto-dismisses
    pub fn show_notification(
        &mut self,
        doc: &mut Document,
        timers: &mut AnimationScheduler<Task>,
        message: &str,
        kind: NotificationKind,
    ) -> OverlayId {
        let node = doc.create_child(doc.body(), "div");
        doc.add_class(node, "notification");
        doc.add_class(node, &format!("notification-{}", kind.as_str()));

        let content = doc.create_child(node, "div");
        doc.add_class(content, "notification-content");
        let icon = doc.create_child(content, "i");
        doc.add_class(icon, "fas");
        doc.add_class(icon, &format!("fa-{}", kind.icon()));
        let text = doc.create_child(content, "span");
        doc.set_text(text, message);
        let close = doc.create_child(content, "button");
        doc.add_class(close, "notification-close");
        let close_icon = doc.create_child(close, "i");
        doc.add_class(close_icon, "fas");
        doc.add_class(close_icon, "fa-times");

        doc.set_styles(
            node,
            [
                ("position", "fixed".to_string()),
                ("top", "100px".to_string()),
                ("right", "20px".to_string()),
                ("background", kind.background().to_string()),
                ("color", "white".to_string()),
                ("padding", "16px 20px".to_string()),
                ("border-radius", "8px".to_string()),
                ("box-shadow", "0 10px 15px -3px rgba(0, 0, 0, 0.1)".to_string()),
                ("z-index", "10000".to_string()),
                ("transform", format!("translateX({NOTIFICATION_OFFSET}px)")),
                ("transition", "transform 0.3s ease".to_string()),
                ("max-width", "400px".to_string()),
            ],
        );

        let now = timers.now();
        let id = self.overlays.insert(Overlay {
            node,
            kind: OverlayKind::Notification(kind),
            message: message.to_string(),
            created_at: now,
            deadline: Some(now + self.timings.notification_ms + self.timings.slide_ms),
            closing: false,
            close_button: Some(close),
            motion: None,
        });

        timers.set_timeout(self.timings.enter_delay_ms, Task::Overlay(OverlayTask::SlideIn(id)));
        timers.set_timeout(
            self.timings.notification_ms,
            Task::Overlay(OverlayTask::AutoDismiss(id)),
        );
        tracing::info!(kind = kind.as_str(), message, "notification shown");
        id
    }

    /// Start the slide-out of a notification. Returns false if it is already
    /// closing or gone.
    pub fn dismiss(
        &mut self,
        doc: &mut Document,
        timers: &mut AnimationScheduler<Task>,
        id: OverlayId,
    ) -> bool {
        let now = timers.now();
        let slide_ms = self.timings.slide_ms;
        let Some(overlay) = self.overlays.get_mut(id) else {
            return false;
        };
        if overlay.closing || overlay.kind == OverlayKind::Tooltip {
            return false;
        }

        overlay.closing = true;
        overlay.deadline = Some(now + slide_ms);
        overlay.motion = Some(match &overlay.motion {
            Some(motion) => motion.retarget(NOTIFICATION_OFFSET, now),
            None => StyleTransition::new("translateX", NOTIFICATION_OFFSET, NOTIFICATION_OFFSET)
                .starting_at(now)
                .duration(slide_ms),
        });
        doc.set_style(
            overlay.node,
            "transform",
            format!("translateX({NOTIFICATION_OFFSET}px)"),
        );
        timers.set_timeout(slide_ms, Task::Overlay(OverlayTask::Remove(id)));
        tracing::debug!(?id, "notification dismissed");
        true
    }

    /// Run a scheduled overlay step
    pub fn handle(
        &mut self,
        doc: &mut Document,
        timers: &mut AnimationScheduler<Task>,
        task: OverlayTask,
    ) {
        let now = timers.now();
        match task {
            OverlayTask::FadeIn(id) => {
                let Some(overlay) = self.overlays.get_mut(id) else {
                    return;
                };
                overlay.motion = Some(
                    StyleTransition::new("opacity", 0.0, 1.0)
                        .starting_at(now)
                        .duration(self.timings.fade_ms)
                        .easing(Easing::Ease),
                );
                doc.set_style(overlay.node, "opacity", "1");
            }
            OverlayTask::SlideIn(id) => {
                let Some(overlay) = self.overlays.get_mut(id) else {
                    return;
                };
                if overlay.closing {
                    return;
                }
                overlay.motion = Some(
                    StyleTransition::new("translateX", NOTIFICATION_OFFSET, 0.0)
                        .starting_at(now)
                        .duration(self.timings.slide_ms)
                        .easing(Easing::Ease),
                );
                doc.set_style(overlay.node, "transform", "translateX(0)");
            }
            OverlayTask::AutoDismiss(id) => {
                self.dismiss(doc, timers, id);
            }
            OverlayTask::Remove(id) => {
                if let Some(overlay) = self.overlays.remove(id) {
                    doc.remove(overlay.node);
                    tracing::debug!(?id, "overlay removed");
                }
            }
        }
    }
}
