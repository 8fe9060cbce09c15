//! # Drag Reordering
//!
//! Turns pointer and keyboard input into either a block selection or a
//! reorder request. The controller never touches a project; callers feed
//! the resulting [`DragOutcome`] to the session.
//!
//! ```text
//! Idle ──PointerDown──▶ Armed ──move ≥ threshold──▶ Dragging
//!  ▲                      │                               │
//!  └────── release ───────┴────────── release ────────────┘
//! ```
//!
//! Releasing while Armed is a click (select). Releasing while Dragging
//! over another block is a reorder. Every release or cancel returns to
//! Idle.

use crate::mutations::Direction;

pub const DEFAULT_DRAG_THRESHOLD: f64 = 8.0;

/// Pointer position in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Configuration for drag gesture detection
#[derive(Debug, Clone)]
pub struct DragConfig {
    /// Pointer travel (Euclidean) at which a press becomes a drag
    pub threshold: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_DRAG_THRESHOLD,
        }
    }
}

impl DragConfig {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.max(0.0);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragState {
    Idle,
    /// Pressed on a block, not yet moved far enough
    Armed { source: String, origin: Point },
    /// Moving `source`; `over` is the block under the pointer or focus
    Dragging { source: String, over: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent {
    PointerDown { block: String, pos: Point },
    PointerMove { pos: Point, over: Option<String> },
    PointerUp { over: Option<String> },
    Cancel,
    /// Keyboard pick-up of the focused block
    KeyPickUp { block: String },
    KeyMove { direction: Direction },
    KeyDrop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    None,
    Select(String),
    Reorder { source: String, target: String },
}

/// Drag state machine for one canvas
#[derive(Debug, Clone)]
pub struct DragController {
    config: DragConfig,
    state: DragState,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}

impl DragController {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Feed one input event
    ///
    /// `order` is the current block order; keyboard moves walk through it.
    pub fn handle(&mut self, event: DragEvent, order: &[&str]) -> DragOutcome {
        match event {
            DragEvent::PointerDown { block, pos } => {
                self.state = DragState::Armed {
                    source: block,
                    origin: pos,
                };
                DragOutcome::None
            }

            DragEvent::PointerMove { pos, over } => {
                match &mut self.state {
                    DragState::Armed { source, origin } => {
                        if origin.distance_to(pos) >= self.config.threshold {
                            tracing::debug!("Drag started for {}", source);
                            self.state = DragState::Dragging {
                                source: std::mem::take(source),
                                over,
                            };
                        }
                    }
                    DragState::Dragging { over: current, .. } => *current = over,
                    DragState::Idle => {}
                }
                DragOutcome::None
            }

            DragEvent::PointerUp { over } => {
                if let DragState::Dragging { over: current, .. } = &mut self.state {
                    *current = over;
                }
                self.release()
            }

            DragEvent::KeyDrop => self.release(),

            DragEvent::Cancel => {
                self.state = DragState::Idle;
                DragOutcome::None
            }

            DragEvent::KeyPickUp { block } => {
                if order.contains(&block.as_str()) {
                    self.state = DragState::Dragging {
                        over: Some(block.clone()),
                        source: block,
                    };
                }
                DragOutcome::None
            }

            DragEvent::KeyMove { direction } => {
                if let DragState::Dragging { source, over } = &mut self.state {
                    let current = over.as_deref().unwrap_or(source.as_str());
                    if let Some(index) = order.iter().position(|id| *id == current) {
                        let next = match direction {
                            Direction::Up => index.saturating_sub(1),
                            Direction::Down => (index + 1).min(order.len() - 1),
                        };
                        *over = Some(order[next].to_string());
                    }
                }
                DragOutcome::None
            }
        }
    }

    fn release(&mut self) -> DragOutcome {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Armed { source, .. } => DragOutcome::Select(source),
            DragState::Dragging {
                source,
                over: Some(target),
            } if target != source => DragOutcome::Reorder { source, target },
            _ => DragOutcome::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER: [&str; 3] = ["a", "b", "c"];

    fn down(block: &str, x: f64) -> DragEvent {
        DragEvent::PointerDown {
            block: block.to_string(),
            pos: Point::new(x, 0.0),
        }
    }

    fn move_to(x: f64, over: Option<&str>) -> DragEvent {
        DragEvent::PointerMove {
            pos: Point::new(x, 0.0),
            over: over.map(str::to_string),
        }
    }

    fn up(over: Option<&str>) -> DragEvent {
        DragEvent::PointerUp {
            over: over.map(str::to_string),
        }
    }

    #[test]
    fn test_small_movement_is_a_click() {
        let mut ctl = DragController::default();
        ctl.handle(down("a", 0.0), &ORDER);
        ctl.handle(move_to(5.0, Some("b")), &ORDER);
        assert!(!ctl.is_dragging());
        assert_eq!(ctl.handle(up(Some("b")), &ORDER), DragOutcome::Select("a".into()));
        assert_eq!(ctl.state(), &DragState::Idle);
    }

    #[test]
    fn test_drag_over_other_block_reorders() {
        let mut ctl = DragController::default();
        ctl.handle(down("a", 0.0), &ORDER);
        ctl.handle(move_to(20.0, Some("b")), &ORDER);
        assert!(ctl.is_dragging());
        assert_eq!(
            ctl.handle(up(Some("c")), &ORDER),
            DragOutcome::Reorder {
                source: "a".into(),
                target: "c".into()
            }
        );
        assert_eq!(ctl.state(), &DragState::Idle);
    }

    #[test]
    fn test_drop_on_self_or_nothing() {
        let mut ctl = DragController::default();
        ctl.handle(down("a", 0.0), &ORDER);
        ctl.handle(move_to(20.0, Some("a")), &ORDER);
        assert_eq!(ctl.handle(up(Some("a")), &ORDER), DragOutcome::None);

        ctl.handle(down("a", 0.0), &ORDER);
        ctl.handle(move_to(20.0, Some("b")), &ORDER);
        assert_eq!(ctl.handle(up(None), &ORDER), DragOutcome::None);
    }

    #[test]
    fn test_cancel_resets() {
        let mut ctl = DragController::default();
        ctl.handle(down("a", 0.0), &ORDER);
        ctl.handle(move_to(20.0, Some("b")), &ORDER);
        assert_eq!(ctl.handle(DragEvent::Cancel, &ORDER), DragOutcome::None);
        assert_eq!(ctl.state(), &DragState::Idle);
        assert_eq!(ctl.handle(up(Some("b")), &ORDER), DragOutcome::None);
    }

    #[test]
    fn test_movement_at_threshold_starts_drag() {
        let mut ctl = DragController::default();
        ctl.handle(down("a", 0.0), &ORDER);
        ctl.handle(move_to(7.9, Some("b")), &ORDER);
        assert!(!ctl.is_dragging());

        ctl.handle(move_to(DEFAULT_DRAG_THRESHOLD, Some("b")), &ORDER);
        assert!(ctl.is_dragging());
        assert_eq!(
            ctl.handle(up(Some("b")), &ORDER),
            DragOutcome::Reorder {
                source: "a".into(),
                target: "b".into()
            }
        );
    }

    #[test]
    fn test_custom_threshold() {
        let mut ctl = DragController::new(DragConfig::default().with_threshold(2.0));
        ctl.handle(down("a", 0.0), &ORDER);
        ctl.handle(move_to(3.0, Some("b")), &ORDER);
        assert!(ctl.is_dragging());
    }

    #[test]
    fn test_keyboard_reorder() {
        let mut ctl = DragController::default();
        ctl.handle(DragEvent::KeyPickUp { block: "a".into() }, &ORDER);
        for _ in 0..5 {
            ctl.handle(
                DragEvent::KeyMove {
                    direction: Direction::Down,
                },
                &ORDER,
            );
        }
        assert_eq!(
            ctl.handle(DragEvent::KeyDrop, &ORDER),
            DragOutcome::Reorder {
                source: "a".into(),
                target: "c".into()
            }
        );
    }

    #[test]
    fn test_keyboard_pick_up_unknown_block_ignored() {
        let mut ctl = DragController::default();
        ctl.handle(DragEvent::KeyPickUp { block: "zzz".into() }, &ORDER);
        assert_eq!(ctl.state(), &DragState::Idle);
    }
}
