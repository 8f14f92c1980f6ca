//! Per-frame orchestrator.
//!
//! One `tick` pulls a frame from the detector, runs smoothing, pinch, drag
//! and scroll in that order, applies side effects to the surface and hands
//! markers to the render sink. All mutable interaction state lives in
//! [`InteractionContext`], owned by the loop.

use uuid::Uuid;

use crate::algorithm::coordinate_mapper::CoordinateMapper;
use crate::algorithm::drag_controller::{DragController, DragOutcome, DragPhase};
use crate::algorithm::pinch::{next_pinch_state_for_frame, PinchState};
use crate::algorithm::point_smoother::PointSmoother;
use crate::algorithm::scroll_velocity::ScrollVelocityEstimator;
use crate::capture::Detector;
use crate::models::events::InteractionEvent;
use crate::models::geometry::Point;
use crate::models::landmarks::{Fingertip, HandFrame};
use crate::models::settings::{InteractionSettings, PinchSettings};
use crate::surface::{FingertipMarker, FrameMarkers, InteractionSurface, RenderSink};

/// Interaction state threaded through every frame.
#[derive(Debug, Clone)]
pub struct InteractionContext {
    mapper: CoordinateMapper,
    smoothers: [PointSmoother; 5],
    pinch_settings: PinchSettings,
    pinch: PinchState,
    drag: DragController,
    scroll: ScrollVelocityEstimator,
    frame: u64,
    hand_present: bool,
}

impl InteractionContext {
    pub fn new(settings: &InteractionSettings) -> Self {
        Self {
            mapper: CoordinateMapper::new(settings.viewport, settings.world),
            smoothers: [PointSmoother::new(settings.smoothing.factor); 5],
            pinch_settings: settings.pinch,
            pinch: PinchState::Idle,
            drag: DragController::new(settings.drag),
            scroll: ScrollVelocityEstimator::new(settings.scroll),
            frame: 0,
            hand_present: false,
        }
    }

    pub fn pinch(&self) -> PinchState {
        self.pinch
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn scroll(&self) -> &ScrollVelocityEstimator {
        &self.scroll
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn hand_present(&self) -> bool {
        self.hand_present
    }

    /// Smoothed index fingertip, the drag pointer.
    pub fn pointer(&self) -> Option<Point> {
        self.smoothers[Fingertip::Index.slot()].current()
    }
}

/// Outcome of one frame.
#[derive(Debug, Clone)]
pub struct FrameReport {
    pub frame: u64,
    pub hand_present: bool,
    pub pinch: PinchState,
    pub drag_phase: DragPhase,
    pub scroll_active: bool,
    pub scroll_velocity: f64,
    pub markers: FrameMarkers,
    pub events: Vec<InteractionEvent>,
}

pub struct InteractionLoop<D, S, R> {
    detector: D,
    surface: S,
    sink: R,
    context: InteractionContext,
}

impl<D, S, R> InteractionLoop<D, S, R>
where
    D: Detector,
    S: InteractionSurface,
    R: RenderSink,
{
    pub fn new(detector: D, surface: S, sink: R, settings: &InteractionSettings) -> Self {
        Self {
            detector,
            surface,
            sink,
            context: InteractionContext::new(settings),
        }
    }

    pub fn context(&self) -> &InteractionContext {
        &self.context
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Forwards a visual-transition completion from the surface. Cleanup
    /// runs at the start of the next tick or on [`Self::drain_completions`].
    pub fn notify_transition_complete(&mut self, session: Uuid) {
        self.context.drag.notify_transition_complete(session);
    }

    pub fn drain_completions(&mut self) -> Vec<InteractionEvent> {
        let frame = self.context.frame;
        self.context
            .drag
            .drain_completions(&mut self.surface)
            .into_iter()
            .map(|session| InteractionEvent::TransitionCompleted { frame, session })
            .collect()
    }

    pub fn tick(&mut self) -> FrameReport {
        let mut events = self.drain_completions();
        let frame = self.context.frame;

        let hand = self.detector.detect();
        let markers = match &hand {
            Some(hand) => self.track_hand(hand, &mut events),
            None => {
                self.lose_hand(&mut events);
                FrameMarkers::default()
            }
        };

        let ctx = &mut self.context;
        let blocked = ctx.pinch.is_pinching() || ctx.drag.session().is_some();
        let was_scrolling = ctx.scroll.is_gesture_active();
        let velocity = ctx
            .scroll
            .update(hand.as_ref(), blocked, ctx.mapper.viewport().height);
        let scroll_active = ctx.scroll.is_gesture_active();
        match (was_scrolling, scroll_active) {
            (false, true) => events.push(InteractionEvent::ScrollStarted { frame }),
            (true, false) => events.push(InteractionEvent::ScrollEnded { frame }),
            _ => {}
        }
        if velocity != 0.0 {
            self.surface.scroll_by(velocity);
        }

        debug_assert!(
            !(scroll_active && ctx.drag.session().is_some()),
            "scroll and drag active together"
        );

        self.sink.render(&markers);

        let report = FrameReport {
            frame,
            hand_present: ctx.hand_present,
            pinch: ctx.pinch,
            drag_phase: ctx.drag.phase(),
            scroll_active,
            scroll_velocity: velocity,
            markers,
            events,
        };
        ctx.frame += 1;
        report
    }

    fn track_hand(&mut self, hand: &HandFrame, events: &mut Vec<InteractionEvent>) -> FrameMarkers {
        let ctx = &mut self.context;
        let frame = ctx.frame;
        if !ctx.hand_present {
            log::debug!("loop: hand found at frame {frame}");
            events.push(InteractionEvent::HandFound { frame });
            ctx.hand_present = true;
        }

        let mut tips = [FingertipMarker {
            pixel: Point::default(),
            world: None,
        }; 5];
        for tip in Fingertip::ALL {
            let landmark = hand.fingertip(tip);
            let raw = ctx.mapper.to_pixels(landmark);
            tips[tip.slot()] = FingertipMarker {
                pixel: ctx.smoothers[tip.slot()].smooth(raw.x, raw.y),
                world: ctx.mapper.to_world(landmark),
            };
        }
        let pointer = tips[Fingertip::Index.slot()].pixel;

        let previous = ctx.pinch;
        ctx.pinch = next_pinch_state_for_frame(previous, hand, &ctx.pinch_settings);

        match (previous, ctx.pinch) {
            (PinchState::Idle, PinchState::Pinching) => {
                events.push(InteractionEvent::PinchStarted { frame });
                if ctx.drag.session().is_none() {
                    if let Some(start) = ctx.drag.begin(&mut self.surface, pointer) {
                        events.push(InteractionEvent::DragStarted {
                            frame,
                            target: start.target,
                            session: start.session,
                        });
                    }
                }
            }
            (PinchState::Pinching, PinchState::Idle) => {
                events.push(InteractionEvent::PinchEnded { frame });
                match ctx.drag.release(&mut self.surface) {
                    Some(DragOutcome::Dropped {
                        session,
                        target,
                        drop_count,
                    }) => events.push(InteractionEvent::Dropped {
                        frame,
                        target,
                        session,
                        drop_count,
                    }),
                    Some(DragOutcome::Returned { session, target }) => {
                        events.push(InteractionEvent::Returned {
                            frame,
                            target,
                            session,
                        })
                    }
                    None => {}
                }
            }
            _ => {}
        }

        if ctx.pinch.is_pinching() {
            ctx.drag.follow(&mut self.surface, pointer);
        }

        FrameMarkers {
            tips: Some(tips),
            pinching: ctx.pinch.is_pinching(),
        }
    }

    /// Tracking loss cancels everything within this frame.
    fn lose_hand(&mut self, events: &mut Vec<InteractionEvent>) {
        let ctx = &mut self.context;
        let frame = ctx.frame;
        if ctx.hand_present {
            log::debug!("loop: hand lost at frame {frame}");
            events.push(InteractionEvent::HandLost { frame });
            ctx.hand_present = false;
        }
        if let Some((session, target)) = ctx.drag.abort(&mut self.surface) {
            events.push(InteractionEvent::DragAborted {
                frame,
                target,
                session,
            });
        }
        if ctx.pinch.is_pinching() {
            ctx.pinch = PinchState::Idle;
            events.push(InteractionEvent::PinchEnded { frame });
        }
    }
}
