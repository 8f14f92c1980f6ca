//! Capability interfaces of the page the gesture layer drives.
//!
//! The state machines only talk to these traits, so the same core runs
//! against a DOM bridge, a 3D scene or the in-memory [`headless`] surface.

pub mod headless;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::events::TransitionKind;
use crate::models::geometry::{Point, Point3, Rect};

/// Handle of a draggable card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(pub u64);

/// Handle of any interactive element returned by hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Handle of a layout-preserving placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaceholderId(pub u64);

/// Draggable cards and their visual state.
pub trait TargetProvider {
    /// Topmost interactive element at a viewport point.
    fn element_at(&self, point: Point) -> Option<ElementId>;
    /// Nearest draggable card enclosing `element` (the element itself included).
    fn enclosing_card(&self, element: ElementId) -> Option<TargetId>;
    /// Whether the card was already dropped into the drop-zone.
    fn is_placed(&self, target: TargetId) -> bool;
    fn bounding_rect(&self, target: TargetId) -> Option<Rect>;
    fn set_dragging(&mut self, target: TargetId, dragging: bool);
    fn set_placed(&mut self, target: TargetId);
    /// Pins the card's top-left corner at a viewport position.
    fn set_position(&mut self, target: TargetId, top_left: Point);
    /// Drops any transient positioning so the card follows normal layout again.
    fn clear_position(&mut self, target: TargetId);
    /// Inserts a same-size placeholder where `target` sits.
    fn insert_placeholder(&mut self, target: TargetId, rect: Rect) -> Option<PlaceholderId>;
    fn placeholder_rect(&self, placeholder: PlaceholderId) -> Option<Rect>;
    fn remove_placeholder(&mut self, placeholder: PlaceholderId);
    /// Removes the card from the page for good.
    fn remove_from_flow(&mut self, target: TargetId);
    /// Starts animating the card's top-left towards `to`.
    ///
    /// The surface must later report completion exactly once, tagged with
    /// `session`.
    fn begin_transition(&mut self, target: TargetId, kind: TransitionKind, to: Point, session: Uuid);
}

/// The region that completes a drag.
pub trait DropZone {
    fn drop_zone_rect(&self) -> Option<Rect>;
    fn set_drop_count(&mut self, count: u32);
}

/// Ambient page scroll.
pub trait ViewportScroll {
    fn scroll_by(&mut self, dy: f64);
}

/// Everything the frame loop needs from the page.
pub trait InteractionSurface: TargetProvider + DropZone + ViewportScroll {}

impl<T: TargetProvider + DropZone + ViewportScroll> InteractionSurface for T {}

/// Visual marker for one fingertip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FingertipMarker {
    pub pixel: Point,
    /// Present when a 3D display space is configured.
    pub world: Option<Point3>,
}

/// What the render sink draws for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameMarkers {
    /// Thumb-to-pinky; `None` hides every marker.
    pub tips: Option<[FingertipMarker; 5]>,
    pub pinching: bool,
}

/// Receives smoothed markers once per frame after all state updates.
pub trait RenderSink {
    fn render(&mut self, markers: &FrameMarkers);
}
