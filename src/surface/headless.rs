//! In-memory page used for replays and tests.
//!
//! Card layout rectangles are in document coordinates; bounding rectangles
//! are reported in viewport coordinates (shifted by the scroll offset), the
//! way a browser reports them. A pinned card is positioned in viewport
//! coordinates and ignores scrolling.

use std::collections::BTreeMap;

use uuid::Uuid;

use super::{
    DropZone, ElementId, FrameMarkers, PlaceholderId, RenderSink, TargetId, TargetProvider,
    ViewportScroll,
};
use crate::models::events::TransitionKind;
use crate::models::geometry::{Point, Rect};
use crate::models::recording::SceneLayout;

#[derive(Debug, Clone)]
struct HeadlessCard {
    id: TargetId,
    layout: Rect,
    pinned: Option<Point>,
    dragging: bool,
    placed: bool,
    in_flow: bool,
}

impl HeadlessCard {
    fn viewport_rect(&self, scroll_offset: f64) -> Rect {
        match self.pinned {
            Some(top_left) => self.layout.moved_to(top_left),
            None => self.layout.moved_to(self.layout.top_left().offset(0.0, -scroll_offset)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct RunningTransition {
    session: Uuid,
    target: TargetId,
    kind: TransitionKind,
    remaining: u32,
}

/// Snapshot of one card, for assertions and summaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardView {
    pub id: TargetId,
    pub rect: Rect,
    pub dragging: bool,
    pub placed: bool,
    pub in_flow: bool,
    pub pinned: bool,
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    cards: Vec<HeadlessCard>,
    placeholders: BTreeMap<PlaceholderId, Rect>,
    next_placeholder: u64,
    drop_zone: Option<Rect>,
    drop_count: Option<u32>,
    scroll_offset: f64,
    transitions: Vec<RunningTransition>,
    transition_frames: u32,
}

impl HeadlessSurface {
    pub fn new(transition_frames: u32) -> Self {
        Self {
            transition_frames,
            ..Self::default()
        }
    }

    pub fn from_scene(scene: &SceneLayout, transition_frames: u32) -> Self {
        let mut surface = Self::new(transition_frames);
        for card in &scene.cards {
            surface.add_card(TargetId(card.id), card.rect);
        }
        surface.drop_zone = scene.drop_zone;
        surface
    }

    /// Later cards sit on top of earlier ones.
    pub fn add_card(&mut self, id: TargetId, layout: Rect) {
        self.cards.push(HeadlessCard {
            id,
            layout,
            pinned: None,
            dragging: false,
            placed: false,
            in_flow: true,
        });
    }

    pub fn set_drop_zone(&mut self, rect: Option<Rect>) {
        self.drop_zone = rect;
    }

    pub fn card(&self, id: TargetId) -> Option<CardView> {
        let offset = self.scroll_offset;
        self.find(id).map(|card| CardView {
            id: card.id,
            rect: card.viewport_rect(offset),
            dragging: card.dragging,
            placed: card.placed,
            in_flow: card.in_flow,
            pinned: card.pinned.is_some(),
        })
    }

    pub fn placeholder_count(&self) -> usize {
        self.placeholders.len()
    }

    /// Last value written to the drop counter display.
    pub fn displayed_drop_count(&self) -> Option<u32> {
        self.drop_count
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn running_transitions(&self) -> usize {
        self.transitions.len()
    }

    /// Advances running transitions by one frame and returns the sessions
    /// whose transition finished.
    pub fn advance(&mut self) -> Vec<Uuid> {
        let mut finished = Vec::new();
        self.transitions.retain_mut(|transition| {
            transition.remaining = transition.remaining.saturating_sub(1);
            if transition.remaining > 0 {
                return true;
            }
            log::debug!(
                "headless: {:?} transition of card {} finished",
                transition.kind,
                transition.target.0
            );
            finished.push(transition.session);
            false
        });
        finished
    }

    fn find(&self, id: TargetId) -> Option<&HeadlessCard> {
        self.cards.iter().find(|card| card.id == id)
    }

    fn find_mut(&mut self, id: TargetId) -> Option<&mut HeadlessCard> {
        self.cards.iter_mut().find(|card| card.id == id)
    }
}

impl TargetProvider for HeadlessSurface {
    fn element_at(&self, point: Point) -> Option<ElementId> {
        let offset = self.scroll_offset;
        self.cards
            .iter()
            .rev()
            .filter(|card| card.in_flow)
            .find(|card| card.viewport_rect(offset).contains(point))
            .map(|card| ElementId(card.id.0))
    }

    fn enclosing_card(&self, element: ElementId) -> Option<TargetId> {
        self.find(TargetId(element.0)).map(|card| card.id)
    }

    fn is_placed(&self, target: TargetId) -> bool {
        self.find(target).map(|card| card.placed).unwrap_or(false)
    }

    fn bounding_rect(&self, target: TargetId) -> Option<Rect> {
        let offset = self.scroll_offset;
        self.find(target)
            .filter(|card| card.in_flow)
            .map(|card| card.viewport_rect(offset))
    }

    fn set_dragging(&mut self, target: TargetId, dragging: bool) {
        if let Some(card) = self.find_mut(target) {
            card.dragging = dragging;
        }
    }

    fn set_placed(&mut self, target: TargetId) {
        if let Some(card) = self.find_mut(target) {
            card.placed = true;
        }
    }

    fn set_position(&mut self, target: TargetId, top_left: Point) {
        if let Some(card) = self.find_mut(target) {
            card.pinned = Some(top_left);
        }
    }

    fn clear_position(&mut self, target: TargetId) {
        if let Some(card) = self.find_mut(target) {
            card.pinned = None;
        }
    }

    fn insert_placeholder(&mut self, target: TargetId, rect: Rect) -> Option<PlaceholderId> {
        let layout = self.find(target)?.layout;
        self.next_placeholder += 1;
        let id = PlaceholderId(self.next_placeholder);
        self.placeholders.insert(
            id,
            Rect {
                width: rect.width,
                height: rect.height,
                ..layout
            },
        );
        log::debug!("headless: placeholder {} for card {}", id.0, target.0);
        Some(id)
    }

    fn placeholder_rect(&self, placeholder: PlaceholderId) -> Option<Rect> {
        let offset = self.scroll_offset;
        self.placeholders
            .get(&placeholder)
            .map(|slot| slot.moved_to(slot.top_left().offset(0.0, -offset)))
    }

    fn remove_placeholder(&mut self, placeholder: PlaceholderId) {
        self.placeholders.remove(&placeholder);
    }

    fn remove_from_flow(&mut self, target: TargetId) {
        if let Some(card) = self.find_mut(target) {
            card.in_flow = false;
            card.pinned = None;
            card.dragging = false;
        }
    }

    fn begin_transition(&mut self, target: TargetId, kind: TransitionKind, to: Point, session: Uuid) {
        let remaining = self.transition_frames;
        let Some(card) = self.find_mut(target) else {
            return;
        };
        card.pinned = Some(to);
        self.transitions.push(RunningTransition {
            session,
            target,
            kind,
            remaining,
        });
    }
}

impl DropZone for HeadlessSurface {
    fn drop_zone_rect(&self) -> Option<Rect> {
        self.drop_zone
    }

    fn set_drop_count(&mut self, count: u32) {
        self.drop_count = Some(count);
    }
}

impl ViewportScroll for HeadlessSurface {
    fn scroll_by(&mut self, dy: f64) {
        self.scroll_offset = (self.scroll_offset + dy).max(0.0);
    }
}

/// Render sink that keeps the last frame's markers.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub last: FrameMarkers,
    pub frames_rendered: u64,
}

impl RenderSink for RecordingSink {
    fn render(&mut self, markers: &FrameMarkers) {
        self.last = *markers;
        self.frames_rendered += 1;
    }
}
