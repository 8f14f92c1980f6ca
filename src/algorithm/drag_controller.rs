//! Drag-and-drop lifecycle: grab, follow, drop or return, forced abort.
//!
//! Visual transitions started on release finish asynchronously. Their
//! cleanup is parked in a pending list keyed by session id and runs exactly
//! once, when the surface's completion notice is drained at the start of a
//! later frame.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::events::TransitionKind;
use crate::models::geometry::{Point, Rect};
use crate::models::settings::DragSettings;
use crate::surface::{DropZone, PlaceholderId, TargetId, TargetProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragPhase {
    Idle,
    Dragging,
    /// Drop transition still running.
    Dropped,
    /// Return transition still running.
    Returned,
}

/// The single in-flight drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub id: Uuid,
    pub item: TargetId,
    /// Fingertip position minus the item's top-left at grab time.
    pub grab_offset: Point,
    pub original_rect: Rect,
    pub placeholder: Option<PlaceholderId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragStart {
    pub session: Uuid,
    pub target: TargetId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Dropped {
        session: Uuid,
        target: TargetId,
        drop_count: u32,
    },
    Returned {
        session: Uuid,
        target: TargetId,
    },
}

#[derive(Debug, Clone, Copy)]
struct PendingCleanup {
    session: Uuid,
    item: TargetId,
    placeholder: Option<PlaceholderId>,
    kind: TransitionKind,
}

#[derive(Debug, Clone)]
pub struct DragController {
    settings: DragSettings,
    session: Option<DragSession>,
    pending: Vec<PendingCleanup>,
    completed: VecDeque<Uuid>,
    drop_count: u32,
}

impl DragController {
    pub fn new(settings: DragSettings) -> Self {
        Self {
            settings,
            session: None,
            pending: Vec::new(),
            completed: VecDeque::new(),
            drop_count: 0,
        }
    }

    pub fn phase(&self) -> DragPhase {
        if self.session.is_some() {
            return DragPhase::Dragging;
        }
        match self.pending.last().map(|cleanup| cleanup.kind) {
            Some(TransitionKind::Drop) => DragPhase::Dropped,
            Some(TransitionKind::Return) => DragPhase::Returned,
            None => DragPhase::Idle,
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn drop_count(&self) -> u32 {
        self.drop_count
    }

    pub fn pending_transitions(&self) -> usize {
        self.pending.len()
    }

    /// Tries to grab the card under the fingertip. Called on pinch start.
    pub fn begin<S: TargetProvider>(&mut self, surface: &mut S, tip: Point) -> Option<DragStart> {
        debug_assert!(
            self.session.is_none(),
            "drag: begin called while a session is active"
        );
        if let Some(active) = &self.session {
            log::warn!(
                "drag: ignoring grab while card {} is still dragged",
                active.item.0
            );
            return None;
        }

        let target = self.hit_test(surface, tip)?;
        if surface.is_placed(target) {
            log::debug!("drag: card {} already placed", target.0);
            return None;
        }
        let Some(rect) = surface.bounding_rect(target) else {
            log::warn!("drag: card {} has no bounding rect", target.0);
            return None;
        };

        // A new grab supersedes an unfinished return animation of the same card.
        self.pending
            .retain(|cleanup| !(cleanup.item == target && cleanup.kind == TransitionKind::Return));

        let placeholder = surface.insert_placeholder(target, rect);
        if placeholder.is_none() {
            log::warn!("drag: no placeholder for card {}", target.0);
        }
        surface.set_dragging(target, true);
        surface.set_position(target, rect.top_left());

        let session = DragSession {
            id: Uuid::new_v4(),
            item: target,
            grab_offset: tip.minus(rect.top_left()),
            original_rect: rect,
            placeholder,
        };
        log::info!(
            "drag: grabbed card {} session={} offset=({:.1}, {:.1})",
            target.0,
            session.id,
            session.grab_offset.x,
            session.grab_offset.y
        );
        let start = DragStart {
            session: session.id,
            target,
        };
        self.session = Some(session);
        Some(start)
    }

    /// Primary probe at the fingertip, then one probe slightly below it,
    /// since the fingertip itself covers the card it points at.
    fn hit_test<S: TargetProvider>(&self, surface: &S, tip: Point) -> Option<TargetId> {
        let probe = |point: Point| {
            surface
                .element_at(point)
                .and_then(|element| surface.enclosing_card(element))
        };
        probe(tip).or_else(|| probe(tip.offset(0.0, self.settings.hit_test_fallback_offset_px)))
    }

    /// Rigidly follows the fingertip.
    pub fn follow<S: TargetProvider>(&mut self, surface: &mut S, tip: Point) {
        if let Some(session) = &self.session {
            surface.set_position(session.item, tip.minus(session.grab_offset));
        }
    }

    /// Ends the drag on pinch release: drop if over the drop-zone, otherwise
    /// animate back to the placeholder.
    pub fn release<S: TargetProvider + DropZone>(&mut self, surface: &mut S) -> Option<DragOutcome> {
        let session = self.session.take()?;

        let item_rect = surface.bounding_rect(session.item);
        let zone_rect = surface.drop_zone_rect();
        let over_zone = match (item_rect, zone_rect) {
            (Some(item), Some(zone)) => item.overlaps(zone),
            _ => false,
        };

        match (over_zone, item_rect, zone_rect) {
            (true, Some(item), Some(zone)) => {
                self.drop_count += 1;
                surface.set_drop_count(self.drop_count);

                let center = zone.center();
                let to = Point::new(center.x - item.width * 0.5, center.y - item.height * 0.5);
                surface.set_dragging(session.item, false);
                surface.set_placed(session.item);
                surface.begin_transition(session.item, TransitionKind::Drop, to, session.id);
                self.pending.push(PendingCleanup {
                    session: session.id,
                    item: session.item,
                    placeholder: session.placeholder,
                    kind: TransitionKind::Drop,
                });
                log::info!(
                    "drag: dropped card {} total={}",
                    session.item.0,
                    self.drop_count
                );
                Some(DragOutcome::Dropped {
                    session: session.id,
                    target: session.item,
                    drop_count: self.drop_count,
                })
            }
            _ => {
                self.return_to_placeholder(surface, &session);
                log::info!("drag: returned card {}", session.item.0);
                Some(DragOutcome::Returned {
                    session: session.id,
                    target: session.item,
                })
            }
        }
    }

    /// Tracking lost mid-drag: return the card right away.
    pub fn abort<S: TargetProvider>(&mut self, surface: &mut S) -> Option<(Uuid, TargetId)> {
        let session = self.session.take()?;
        log::info!("drag: hand lost, returning card {}", session.item.0);
        self.return_to_placeholder(surface, &session);
        Some((session.id, session.item))
    }

    fn return_to_placeholder<S: TargetProvider>(&mut self, surface: &mut S, session: &DragSession) {
        surface.set_dragging(session.item, false);

        match session
            .placeholder
            .and_then(|placeholder| surface.placeholder_rect(placeholder))
        {
            Some(slot) => {
                surface.begin_transition(
                    session.item,
                    TransitionKind::Return,
                    slot.top_left(),
                    session.id,
                );
                self.pending.push(PendingCleanup {
                    session: session.id,
                    item: session.item,
                    placeholder: None,
                    kind: TransitionKind::Return,
                });
            }
            None => surface.clear_position(session.item),
        }

        if let Some(placeholder) = session.placeholder {
            surface.remove_placeholder(placeholder);
        }
    }

    /// Queues a completion notice from the surface.
    pub fn notify_transition_complete(&mut self, session: Uuid) {
        self.completed.push_back(session);
    }

    /// Runs cleanup for every queued completion. Notices for unknown or
    /// already-cleaned sessions are ignored.
    pub fn drain_completions<S: TargetProvider>(&mut self, surface: &mut S) -> Vec<Uuid> {
        let mut finished = Vec::new();
        while let Some(session) = self.completed.pop_front() {
            let Some(index) = self
                .pending
                .iter()
                .position(|cleanup| cleanup.session == session)
            else {
                log::debug!("drag: ignoring completion for unknown session {session}");
                continue;
            };

            let cleanup = self.pending.remove(index);
            match cleanup.kind {
                TransitionKind::Drop => {
                    surface.remove_from_flow(cleanup.item);
                    if let Some(placeholder) = cleanup.placeholder {
                        surface.remove_placeholder(placeholder);
                    }
                }
                TransitionKind::Return => surface.clear_position(cleanup.item),
            }
            log::debug!(
                "drag: {:?} cleanup done for card {}",
                cleanup.kind,
                cleanup.item.0
            );
            finished.push(session);
        }
        finished
    }
}
