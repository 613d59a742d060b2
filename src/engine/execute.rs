//! Command execution and raw input dispatch for HelixEngine

use std::rc::Rc;

use glam::Vec3;
use web_time::Instant;

use super::{EngineCommand, HelixEngine, MarkerId};
use crate::error::HelixError;
use crate::input::InputEvent;

impl HelixEngine {
    /// Process a platform-agnostic input event.
    ///
    /// The event runs through the engine's
    /// [`InputProcessor`](crate::input::InputProcessor); the resulting
    /// command, if any, is executed. Regaining focus restarts the frame
    /// clock at `now`. Rejected commands are logged and dropped.
    pub fn handle_event(&mut self, event: InputEvent, now: Instant) {
        let Some(command) = self.input.handle_event(event) else {
            return;
        };
        if command == EngineCommand::Resume {
            self.resume_at(now);
            return;
        }
        if let Err(e) = self.execute(command) {
            log::warn!("{} rejected: {e}", command.name());
        }
    }

    /// Apply one command.
    ///
    /// # Errors
    ///
    /// [`HelixError::LinkIndexOutOfRange`] for a link that does not exist;
    /// [`HelixError::InvalidKeyframes`] if a flight cannot be built.
    pub fn execute(&mut self, command: EngineCommand) -> Result<(), HelixError> {
        match command {
            EngineCommand::Rotate { input } => {
                self.rotation.on_input(&mut self.rotation_state, input);
            }
            EngineCommand::Drag { direction } => {
                self.rotation.on_drag(&mut self.rotation_state, direction);
            }
            EngineCommand::ReleaseDrag => {
                self.rotation.on_release(&mut self.rotation_state);
            }
            EngineCommand::HoverLink { link } => self.hover_link(link)?,
            EngineCommand::LeaveLink { link } => self.leave_link(link)?,
            EngineCommand::FlyTo { link } => self.fly_to(link)?,
            EngineCommand::Tour => self.start_tour()?,
            EngineCommand::CancelFlights => self.cancel_flights(),
            EngineCommand::Pause => {
                self.frame_clock.pause();
                self.resume_pending = false;
                log::debug!("paused");
            }
            EngineCommand::Resume => {
                if !self.frame_clock.is_running() {
                    self.resume_pending = true;
                }
            }
        }
        Ok(())
    }

    pub(super) fn resume_at(&mut self, now: Instant) {
        self.frame_clock.resume(now);
        self.resume_pending = false;
        log::debug!("resumed");
    }

    fn link_color(&self, link: usize) -> Vec3 {
        Vec3::from_array(self.options.colors.link_highlight(link))
    }

    fn base_color(&self) -> Vec3 {
        Vec3::from_array(self.options.colors.base)
    }

    fn hover_link(&mut self, link: usize) -> Result<(), HelixError> {
        if self.links.links().get(link).is_none() {
            return Err(HelixError::LinkIndexOutOfRange {
                index: link,
                len: self.links.links().len(),
            });
        }
        if let Some(previous) = self.hovered.filter(|&p| p != link) {
            // Entered a new label without leaving the old one.
            let base = self.base_color();
            self.links.clear_highlight(&mut self.field, previous, base)?;
        }
        let color = self.link_color(link);
        self.links.highlight_link(&mut self.field, link, color)?;
        self.hovered = Some(link);
        self.rotation.hold(&mut self.rotation_state);
        Ok(())
    }

    fn leave_link(&mut self, link: usize) -> Result<(), HelixError> {
        if self.links.links().get(link).is_none() {
            return Err(HelixError::LinkIndexOutOfRange {
                index: link,
                len: self.links.links().len(),
            });
        }
        if self.hovered != Some(link) {
            // Late leave for a label already superseded by a newer hover.
            log::debug!("ignoring leave for link {link}, hovered {:?}", self.hovered);
            return Ok(());
        }
        let base = self.base_color();
        self.links.clear_highlight(&mut self.field, link, base)?;
        self.hovered = None;
        self.rotation.release_hold(&mut self.rotation_state);
        Ok(())
    }

    fn fly_to(&mut self, link: usize) -> Result<(), HelixError> {
        let target = self.link_positions.get(link).copied().ok_or(
            HelixError::LinkIndexOutOfRange {
                index: link,
                len: self.link_positions.len(),
            },
        )?;
        let from = self.camera_position();
        let hop = self.options.flight.hop_duration;
        self.camera_position = from;
        self.camera_flight
            .start(vec![from, target], vec![0.0, hop], 0.0)?;
        let notify = self.completion_notifier(MarkerId::Camera);
        self.camera_flight.on_finish(notify);
        log::debug!("camera flying to link {link}");
        Ok(())
    }

    fn start_tour(&mut self) -> Result<(), HelixError> {
        if self.link_positions.is_empty() {
            return Err(HelixError::InvalidKeyframes(
                "tour needs at least one link".to_owned(),
            ));
        }
        let step = self.options.flight.tour_step;
        let stagger = self.options.flight.tour_stagger;
        let timestamps: Vec<f32> = (0..self.link_positions.len())
            .map(|k| k as f32 * step)
            .collect();

        for marker in 0..self.tour_flights.len() {
            let notify = self.completion_notifier(MarkerId::Tour(marker));
            let flight = &mut self.tour_flights[marker];
            flight.start(
                self.link_positions.clone(),
                timestamps.clone(),
                marker as f32 * stagger,
            )?;
            flight.on_finish(notify);
        }
        log::info!(
            "tour started: {} markers over {} links",
            self.tour_flights.len(),
            self.link_positions.len()
        );
        Ok(())
    }

    fn cancel_flights(&mut self) {
        self.camera_position = self.camera_position();
        self.camera_flight.reset();
        for flight in &mut self.tour_flights {
            flight.reset();
        }
        log::debug!("flights cancelled");
    }

    /// Callback pushing `id` into the engine's completion sink.
    fn completion_notifier(&self, id: MarkerId) -> impl FnOnce() + 'static {
        let sink = Rc::clone(&self.completed);
        move || sink.borrow_mut().push(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::small_options;
    use crate::rotation::{Direction, RotationInput, RotationPhase};

    fn engine() -> HelixEngine {
        HelixEngine::new(small_options()).unwrap()
    }

    #[test]
    fn rotate_and_drag_drive_the_controller() {
        let mut engine = engine();
        engine
            .execute(EngineCommand::Rotate {
                input: RotationInput::from_wheel(1.0),
            })
            .unwrap();
        assert_eq!(engine.rotation_state().direction, Direction::Up);
        assert_eq!(engine.rotation_state().current_rate, 2.0);

        engine
            .execute(EngineCommand::Drag {
                direction: Direction::Down,
            })
            .unwrap();
        assert_eq!(engine.rotation_state().direction, Direction::Down);
        engine.execute(EngineCommand::ReleaseDrag).unwrap();
        assert!(engine.rotation_state().is_settling());
    }

    #[test]
    fn hover_highlights_strand_and_holds_rotation() {
        let mut engine = engine();
        engine.execute(EngineCommand::HoverLink { link: 1 }).unwrap();
        assert_eq!(engine.rotation_state().phase, RotationPhase::Held);
        assert_eq!(engine.rotation_state().current_rate, 0.0);

        let blue = Vec3::from_array(engine.options().colors.link_highlight(1));
        // Link 1 sits on index 100: the even strand lights up.
        assert_eq!(engine.field().color(0), Some(blue));
        assert_eq!(engine.field().color(398), Some(blue));
        assert_eq!(engine.field().color(1), Some(Vec3::ZERO));
        // Band points are never touched.
        assert_eq!(engine.field().color(400), Some(Vec3::ZERO));

        engine.execute(EngineCommand::LeaveLink { link: 1 }).unwrap();
        assert_eq!(engine.field().color(0), Some(Vec3::ZERO));
        assert_eq!(engine.rotation_state().phase, RotationPhase::Settled);
        assert_eq!(engine.rotation_state().current_rate, 0.25);
        assert_eq!(engine.hovered_link(), None);
    }

    #[test]
    fn hovering_another_link_clears_the_previous_strand() {
        let mut options = small_options();
        options.links.policy = crate::links::LinkPolicy::FixedOffset {
            base: 10,
            stride: 1,
        };
        let mut engine = HelixEngine::new(options).unwrap();
        engine.execute(EngineCommand::HoverLink { link: 0 }).unwrap();
        engine.execute(EngineCommand::HoverLink { link: 1 }).unwrap();
        // Link 1 sits on index 11: only the odd strand stays lit.
        assert_eq!(engine.field().color(10), Some(Vec3::ZERO));
        assert_ne!(engine.field().color(11), Some(Vec3::ZERO));
        assert_eq!(engine.hovered_link(), Some(1));
    }

    #[test]
    fn late_leave_keeps_current_hover_lit() {
        let mut engine = engine();
        engine.execute(EngineCommand::HoverLink { link: 0 }).unwrap();
        engine.execute(EngineCommand::HoverLink { link: 1 }).unwrap();
        // Links 0 and 1 sit on indices 0 and 100, both on the even strand.
        engine.execute(EngineCommand::LeaveLink { link: 0 }).unwrap();

        let blue = Vec3::from_array(engine.options().colors.link_highlight(1));
        assert_eq!(engine.hovered_link(), Some(1));
        assert_eq!(engine.field().color(100), Some(blue));
        assert_eq!(engine.rotation_state().phase, RotationPhase::Held);

        engine.execute(EngineCommand::LeaveLink { link: 1 }).unwrap();
        assert_eq!(engine.field().color(100), Some(Vec3::ZERO));
        assert_eq!(engine.rotation_state().phase, RotationPhase::Settled);
    }

    #[test]
    fn leave_without_hover_changes_nothing() {
        let mut engine = engine();
        engine.execute(EngineCommand::LeaveLink { link: 2 }).unwrap();
        assert!(!engine.field().is_color_dirty());
        assert_eq!(engine.rotation_state().phase, RotationPhase::Settled);
        assert!(matches!(
            engine.execute(EngineCommand::LeaveLink { link: 7 }),
            Err(HelixError::LinkIndexOutOfRange { index: 7, len: 4 })
        ));
    }

    #[test]
    fn unknown_link_is_rejected() {
        let mut engine = engine();
        assert!(matches!(
            engine.execute(EngineCommand::HoverLink { link: 9 }),
            Err(HelixError::LinkIndexOutOfRange { index: 9, len: 4 })
        ));
        assert!(engine.execute(EngineCommand::FlyTo { link: 4 }).is_err());
        assert!(!engine.field().is_color_dirty());
        assert_eq!(engine.rotation_state().phase, RotationPhase::Settled);
    }

    #[test]
    fn fly_to_starts_camera_flight() {
        let mut engine = engine();
        engine.execute(EngineCommand::FlyTo { link: 2 }).unwrap();
        assert!(engine.is_flying());
        assert_eq!(engine.camera_position(), engine.link_positions()[0]);
    }

    #[test]
    fn tour_without_links_is_rejected() {
        let mut options = small_options();
        options.links.count = 0;
        let mut engine = HelixEngine::new(options).unwrap();
        assert!(matches!(
            engine.execute(EngineCommand::Tour),
            Err(HelixError::InvalidKeyframes(_))
        ));
    }

    #[test]
    fn cancel_stops_every_flight() {
        let mut engine = engine();
        engine.execute(EngineCommand::Tour).unwrap();
        engine.execute(EngineCommand::FlyTo { link: 3 }).unwrap();
        engine.execute(EngineCommand::CancelFlights).unwrap();
        assert!(!engine.is_flying());
    }

    #[test]
    fn focus_events_pause_and_resume() {
        let mut engine = engine();
        let now = Instant::now();
        engine.handle_event(InputEvent::Focus { focused: false }, now);
        assert!(engine.is_paused());
        engine.handle_event(InputEvent::Focus { focused: true }, now);
        assert!(!engine.is_paused());
    }

    #[test]
    fn rejected_events_are_dropped() {
        let mut engine = engine();
        engine.handle_event(
            InputEvent::LinkHover {
                link: 42,
                entered: true,
            },
            Instant::now(),
        );
        assert_eq!(engine.hovered_link(), None);
    }
}
