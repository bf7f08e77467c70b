//=========================================================================
// Core Systems Orchestrator
//
// Central coordinator for the gesture pipeline running on the logic
// (non-platform) thread.
//
// Responsibilities:
// - Receive batched platform events via the bounded channel
// - Run the InputSystem once per tick with the measured delta time
// - Maintain deterministic pacing using a fixed tick rate (TPS)
// - Hand the hit-test world and gesture handler back on exit
//
// Notes:
// The orchestrator runs independently from the platform layer. It owns
// the world, the handler and every gesture tracker, so none of them are
// ever touched from two threads. Communication with the platform occurs
// only through message passing.
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================
use crossbeam_channel::Receiver;
use log::{info, trace};

//=== Public Modules ======================================================

pub mod gesture;
pub mod hit_test;
pub mod input;
pub mod platform_bridge;

//=== Internal Modules ====================================================
use gesture::GestureHandler;
use hit_test::HitTest;
use input::{InputEvent, InputSystem, TouchInputConfig};
use platform_bridge::{EventCollector, PlatformEvent, TickControl};

//=== GestureOrchestrator =================================================
//
// Owns the input system together with the host's world and handler, and
// schedules their updates.
//
pub(crate) struct GestureOrchestrator<W, H> {
    input_system: InputSystem,
    world: W,
    handler: H,
}

impl<W, H> GestureOrchestrator<W, H>
where
    W: HitTest + Send + 'static,
    H: GestureHandler + Send + 'static,
{
    //--- Construction -----------------------------------------------------
    //
    // Builds all systems but does not yet start the logic thread.
    //
    pub fn new(config: TouchInputConfig, world: W, handler: H) -> Self {
        Self {
            input_system: InputSystem::new(config),
            world,
            handler,
        }
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Spawns the logic thread that ticks the gesture pipeline at a fixed
    // frequency (TPS - ticks per second).
    //
    // Each tick:
    //  1. Collects batched platform events
    //  2. Runs pointer tracking and gesture trackers
    //  3. Sleeps to maintain fixed pacing
    //  4. On shutdown: processes the final frame, cancels live gestures
    //
    pub fn spawn_core_thread(
        mut self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
    ) -> thread::JoinHandle<(W, H)> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut collector = EventCollector::new(receiver);
            let mut last_tick = Instant::now()
                .checked_sub(frame_duration)
                .unwrap_or_else(Instant::now);

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                let control = collector.collect_frame();
                if !collector.batches().is_empty() {
                    trace!(
                        "Tick with {} pointer events in {} batches",
                        collector.event_count(),
                        collector.batches().len()
                    );
                }

                //--- Step 2: Update gestures --------------------------------
                let delta_time = frame_start.duration_since(last_tick).as_secs_f32();
                last_tick = frame_start;
                self.tick(collector.batches_mut(), delta_time);

                if control == TickControl::Exit {
                    self.input_system.cancel_all(&mut self.handler);
                    info!("Core thread exiting.");
                    break;
                }

                //--- Step 3: Maintain deterministic pacing ----------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }

            (self.world, self.handler)
        })
    }

    //--- tick() -----------------------------------------------------------
    //
    // One logic frame: feeds the frame's batches through the input system.
    //
    pub(crate) fn tick(&mut self, input_batches: &mut Vec<Vec<InputEvent>>, delta_time: f32) {
        self.input_system
            .process_frame(input_batches, delta_time, &self.world, &mut self.handler);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gesture::GestureEvent;
    use crate::core::hit_test::{Collider, ColliderWorld, TargetId};
    use crate::core::input::MouseButton;
    use crossbeam_channel::unbounded;
    use glam::Vec2;

    type Recorded = Vec<(TargetId, GestureEvent)>;

    fn world() -> ColliderWorld {
        let mut world = ColliderWorld::new();
        world
            .insert(Collider::rect(TargetId(1), Vec2::ZERO, Vec2::new(10.0, 10.0)))
            .unwrap();
        world
    }

    #[test]
    fn tick_runs_gestures_on_owned_world() {
        let mut orchestrator =
            GestureOrchestrator::new(TouchInputConfig::default(), world(), Recorded::new());

        let mut batches = vec![vec![
            InputEvent::MouseMoved { x: 5.0, y: 5.0 },
            InputEvent::MouseButtonDown { button: MouseButton::Left },
        ]];
        orchestrator.tick(&mut batches, 0.016);

        assert_eq!(
            orchestrator.handler,
            vec![
                (TargetId(1), GestureEvent::TouchDown),
                (TargetId(1), GestureEvent::Touch),
                (TargetId(1), GestureEvent::Drag),
            ]
        );
    }

    #[test]
    fn close_processes_final_frame_then_cancels() {
        let orchestrator =
            GestureOrchestrator::new(TouchInputConfig::default(), world(), Recorded::new());
        let (tx, rx) = unbounded();

        tx.send(PlatformEvent::Inputs(vec![InputEvent::TouchStarted { id: 1, x: 2.0, y: 2.0 }]))
            .unwrap();
        tx.send(PlatformEvent::WindowClosed).unwrap();

        let (_world, recorded) = orchestrator
            .spawn_core_thread(rx, 240.0)
            .join()
            .expect("core thread panicked");

        assert_eq!(
            recorded,
            vec![
                (TargetId(1), GestureEvent::TouchDown),
                (TargetId(1), GestureEvent::Touch),
                (TargetId(1), GestureEvent::Drag),
                (TargetId(1), GestureEvent::TouchUp),
            ]
        );
    }

    #[test]
    fn disconnect_stops_thread() {
        let orchestrator =
            GestureOrchestrator::new(TouchInputConfig::default(), world(), Recorded::new());
        let (tx, rx) = unbounded::<PlatformEvent>();
        drop(tx);

        let (world, recorded) = orchestrator
            .spawn_core_thread(rx, 60.0)
            .join()
            .expect("core thread panicked");

        assert!(recorded.is_empty());
        assert_eq!(world.len(), 1);
    }
}
