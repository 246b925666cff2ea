//! Movement Controller
//!
//! Per-character movement core. Turns directional and jump input into a
//! velocity, hands the resulting displacement to a [`Collider`], and
//! corrects vertical velocity from the contacts that come back.
//!
//! ## Frame order
//!
//! ```text
//! update(dt):
//!   1. integrate      smooth velocity.x toward input, accrue gravity
//!   2. wall slide     enter/leave WallSliding, clamp fall speed, stick timer
//!   3. move           collider.move_body(velocity * dt) -> ContactReport
//!   4. correct        zero velocity.y on flat contact, or push back along
//!                     an over-steep slope's normal
//! ```
//!
//! Jump press/release are edge events applied between updates.
//!
//! ## Events
//!
//! Events are queued for the current frame only: jump edges applied
//! before an update and everything that update produces. The next update
//! discards whatever was not drained with `take_events`, so a host that
//! never drains holds at most one frame of events.

use tracing::debug;
#[cfg(feature = "debug-tracing")]
use tracing::trace;

use crate::core::hash::{StateHash, StateHasher};
use crate::core::smoothing::DampedAxis;
use crate::core::vec2::Vec2;
use crate::motion::config::{ConfigError, JumpKinematics, MovementConfig};
use crate::motion::contact::{Collider, ContactReport, WallSide};
use crate::motion::events::{JumpKind, MotionEvent};
use crate::motion::state::{Footing, Locomotion, MotionState, WallStick};

/// Horizontal input relative to a wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WallInput {
    /// Pressing into the wall
    Toward,
    /// No horizontal input
    Neutral,
    /// Pressing away from the wall
    Away,
}

impl WallInput {
    /// Classify by sign so analog input behaves like its digital direction.
    fn classify(input_x: f32, wall: WallSide) -> Self {
        if input_x == 0.0 {
            WallInput::Neutral
        } else if input_x.signum() == wall.dir_x() {
            WallInput::Toward
        } else {
            WallInput::Away
        }
    }
}

/// True when horizontal input points into an over-steep slope.
fn pushing_into_slope(input_x: f32, normal: Vec2) -> bool {
    input_x != 0.0 && input_x.signum() == -normal.x.signum()
}

/// Movement core for one character.
#[derive(Clone, Debug)]
pub struct MovementController {
    config: MovementConfig,
    kinematics: JumpKinematics,

    velocity: Vec2,
    velocity_x_smoothing: DampedAxis,
    directional_input: Vec2,

    footing: Footing,
    wall_contact: Option<WallSide>,
    locomotion: Locomotion,
    wall_stick: WallStick,

    frame: u64,
    events: Vec<MotionEvent>,
}

impl MovementController {
    /// Build a controller at rest, airborne, touching nothing.
    pub fn new(config: MovementConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let kinematics = JumpKinematics::derive(&config)?;

        debug!(
            gravity = kinematics.gravity,
            max_jump_velocity = kinematics.max_jump_velocity,
            min_jump_velocity = kinematics.min_jump_velocity,
            "movement controller configured"
        );

        Ok(Self {
            config,
            kinematics,
            velocity: Vec2::ZERO,
            velocity_x_smoothing: DampedAxis::new(),
            directional_input: Vec2::ZERO,
            footing: Footing::Airborne,
            wall_contact: None,
            locomotion: Locomotion::Free,
            wall_stick: WallStick::default(),
            frame: 0,
            events: Vec::new(),
        })
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Tuning this controller was built with.
    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// Gravity and jump speeds.
    pub fn kinematics(&self) -> JumpKinematics {
        self.kinematics
    }

    /// Current velocity.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Overwrite velocity (knockback, teleports, tests).
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Last directional input.
    pub fn directional_input(&self) -> Vec2 {
        self.directional_input
    }

    /// Ground support after the last move.
    pub fn footing(&self) -> Footing {
        self.footing
    }

    /// Wall-slide machine state.
    pub fn locomotion(&self) -> Locomotion {
        self.locomotion
    }

    /// Coarse state for animation.
    pub fn motion_state(&self) -> MotionState {
        MotionState::summarize(self.locomotion, self.footing)
    }

    /// True while sliding down a wall.
    pub fn is_wall_sliding(&self) -> bool {
        matches!(self.locomotion, Locomotion::WallSliding { .. })
    }

    /// Wall touched after the last move.
    pub fn wall_contact(&self) -> Option<WallSide> {
        self.wall_contact
    }

    /// Direction toward the touched wall (-1 or +1), if any.
    pub fn wall_dir_x(&self) -> Option<f32> {
        self.wall_contact.map(WallSide::dir_x)
    }

    /// Remaining wall-stick time.
    pub fn time_to_wall_unstick(&self) -> f32 {
        self.wall_stick.time_to_unstick
    }

    /// Horizontal smoothing accumulator.
    pub fn smoothing_rate(&self) -> f32 {
        self.velocity_x_smoothing.rate
    }

    /// Updates completed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Drain events queued since the previous update.
    pub fn take_events(&mut self) -> Vec<MotionEvent> {
        std::mem::take(&mut self.events)
    }

    // =========================================================================
    // INPUT
    // =========================================================================

    /// Store the latest directional input. Values are trusted to be in [-1, 1].
    pub fn set_directional_input(&mut self, input: Vec2) {
        self.directional_input = input;
    }

    /// Jump pressed.
    ///
    /// The wall jump and the ground jump are checked independently; both
    /// fire when the body is wall sliding and grounded at once.
    pub fn on_jump_input_down(&mut self) {
        if let Locomotion::WallSliding { wall } = self.locomotion {
            let (kind, launch) = match WallInput::classify(self.directional_input.x, wall) {
                WallInput::Toward => (JumpKind::WallClimb, self.config.wall_jump_climb),
                WallInput::Neutral => (JumpKind::WallOff, self.config.wall_jump_off),
                WallInput::Away => (JumpKind::WallLeap, self.config.wall_leap),
            };
            self.velocity = Vec2::new(-wall.dir_x() * launch.x, launch.y);
            self.emit_jump(kind);
        }

        match self.footing {
            Footing::Grounded => {
                self.velocity.y = self.kinematics.max_jump_velocity;
                self.emit_jump(JumpKind::Ground);
            }
            Footing::SlidingSlope { normal } => {
                if pushing_into_slope(self.directional_input.x, normal) {
                    debug!(input_x = self.directional_input.x, "slope jump blocked");
                } else {
                    self.velocity = normal * self.kinematics.max_jump_velocity;
                    self.emit_jump(JumpKind::Slope);
                }
            }
            Footing::Airborne => {}
        }
    }

    /// Jump released. Cuts upward speed to the tapped-jump speed.
    pub fn on_jump_input_up(&mut self) {
        let min = self.kinematics.min_jump_velocity;
        if self.velocity.y > min {
            let from = self.velocity.y;
            self.velocity.y = min;
            debug!(from, to = min, "jump cut");
            self.events.push(MotionEvent::jump_cut(self.frame, from, min));
        }
    }

    // =========================================================================
    // FRAME UPDATE
    // =========================================================================

    /// Advance one frame. Returns the contact report produced by the move.
    pub fn update<C: Collider + ?Sized>(&mut self, dt: f32, collider: &mut C) -> ContactReport {
        // Undrained events from earlier frames are dropped
        let frame = self.frame;
        self.events.retain(|event| event.frame >= frame);

        self.calculate_velocity(dt);
        self.handle_wall_sliding(dt);

        let report = collider.move_body(self.velocity * dt, self.directional_input);
        self.apply_contacts(&report, dt);

        self.frame += 1;
        report
    }

    /// Horizontal smoothing and gravity.
    fn calculate_velocity(&mut self, dt: f32) {
        let target_x = self.directional_input.x * self.config.move_speed;
        let smooth_time = if self.footing.is_below() {
            self.config.acceleration_time_grounded
        } else {
            self.config.acceleration_time_airborne
        };

        self.velocity.x = self
            .velocity_x_smoothing
            .step(self.velocity.x, target_x, smooth_time, dt);
        self.velocity.y += self.kinematics.gravity * dt;

        #[cfg(feature = "debug-tracing")]
        trace!(
            frame = self.frame,
            vx = self.velocity.x,
            vy = self.velocity.y,
            rate = self.velocity_x_smoothing.rate,
            "integrated"
        );
    }

    /// Wall-slide transitions, fall clamp and stick timer.
    fn handle_wall_sliding(&mut self, dt: f32) {
        let previous = self.locomotion;

        let sliding_on = match self.wall_contact {
            Some(wall) if !self.footing.is_below() && self.velocity.y < 0.0 => Some(wall),
            _ => None,
        };

        let Some(wall) = sliding_on else {
            self.locomotion = Locomotion::Free;
            if previous.wall().is_some() {
                debug!(frame = self.frame, "wall slide ended");
                self.events.push(MotionEvent::wall_slide_ended(self.frame));
            }
            return;
        };

        self.locomotion = Locomotion::WallSliding { wall };
        if previous.wall() != Some(wall) {
            debug!(frame = self.frame, ?wall, "wall slide started");
            self.events.push(MotionEvent::wall_slide_started(self.frame, wall));
        }

        let max_fall = self.config.wall_slide_speed_max;
        if self.velocity.y < -max_fall {
            self.velocity.y = -max_fall;
        }

        if !self.wall_stick.is_armed() {
            self.wall_stick.time_to_unstick = self.config.wall_stick_time;
            return;
        }

        self.velocity_x_smoothing.reset();
        self.velocity.x = 0.0;

        if WallInput::classify(self.directional_input.x, wall) == WallInput::Away {
            self.wall_stick.time_to_unstick -= dt;
            if !self.wall_stick.is_armed() {
                debug!(frame = self.frame, ?wall, "wall stick released");
                self.events.push(MotionEvent::wall_unstuck(self.frame, wall));
            }
        } else {
            self.wall_stick.time_to_unstick = self.config.wall_stick_time;
        }
    }

    /// Vertical correction from the fresh report, then retain footing.
    fn apply_contacts(&mut self, report: &ContactReport, dt: f32) {
        let was_airborne = !self.footing.is_below();
        let impact_speed = (-self.velocity.y).max(0.0);

        if report.vertical_contact() {
            if report.sliding_down_max_slope {
                self.velocity.y += report.slope_normal.y * -self.kinematics.gravity * dt;
            } else {
                self.velocity.y = 0.0;
            }
        }

        self.footing = Footing::from_report(report);
        self.wall_contact = report.wall_side();

        if was_airborne && self.footing.is_below() {
            debug!(frame = self.frame, impact_speed, "landed");
            self.events.push(MotionEvent::landed(self.frame, impact_speed));
        }
    }

    fn emit_jump(&mut self, kind: JumpKind) {
        debug!(frame = self.frame, ?kind, vx = self.velocity.x, vy = self.velocity.y, "jump");
        self.events.push(MotionEvent::jumped(self.frame, kind, self.velocity));
    }

    // =========================================================================
    // HASHING
    // =========================================================================

    /// Fingerprint of every mutable field, in a fixed order.
    pub fn compute_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_motion_state();

        hasher.update_u64(self.frame);
        hasher.update_vec2(self.velocity);
        hasher.update_f32(self.velocity_x_smoothing.rate);
        hasher.update_vec2(self.directional_input);

        hasher.update_u8(self.footing.tag());
        if let Footing::SlidingSlope { normal } = self.footing {
            hasher.update_vec2(normal);
        }
        hasher.update_u8(self.wall_contact.map_or(0, WallSide::tag));
        hasher.update_u8(self.locomotion.tag());
        hasher.update_f32(self.wall_stick.time_to_unstick);

        hasher.finalize()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::arena::BoxArena;
    use crate::motion::events::MotionEventKind;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    const DT: f32 = 1.0 / 60.0;

    /// Collider that replays canned reports and records requested moves.
    struct ScriptedCollider {
        queued: VecDeque<ContactReport>,
        fallback: ContactReport,
        moves: Vec<Vec2>,
    }

    impl ScriptedCollider {
        fn always(report: ContactReport) -> Self {
            Self {
                queued: VecDeque::new(),
                fallback: report,
                moves: Vec::new(),
            }
        }

        fn then(mut self, report: ContactReport) -> Self {
            self.queued.push_back(report);
            self
        }
    }

    impl Collider for ScriptedCollider {
        fn move_body(&mut self, displacement: Vec2, _input: Vec2) -> ContactReport {
            self.moves.push(displacement);
            self.queued.pop_front().unwrap_or(self.fallback)
        }
    }

    fn controller() -> MovementController {
        MovementController::new(MovementConfig::default()).unwrap()
    }

    /// Two updates against a wall: the first reports contact, the second slides.
    fn wall_sliding(config: MovementConfig, side: WallSide, input_x: f32) -> MovementController {
        let mut c = MovementController::new(config).unwrap();
        c.set_directional_input(Vec2::new(input_x, 0.0));
        let mut wall = ScriptedCollider::always(ContactReport::against_wall(side));
        c.update(DT, &mut wall);
        c.update(DT, &mut wall);
        assert!(c.is_wall_sliding());
        c
    }

    #[test]
    fn test_constants_exact() {
        let k = controller().kinematics();
        assert_eq!(k.gravity, -50.0);
        assert_eq!(k.max_jump_velocity, 20.0);
        assert_eq!(k.min_jump_velocity, 10.0);
    }

    #[test]
    fn test_zero_apex_time_rejected() {
        let config = MovementConfig {
            time_to_jump_apex: 0.0,
            ..MovementConfig::default()
        };
        assert!(matches!(
            MovementController::new(config),
            Err(ConfigError::NonPositiveApexTime(_))
        ));
    }

    #[test]
    fn test_gravity_accrues_in_air() {
        let mut c = controller();
        let mut air = ScriptedCollider::always(ContactReport::AIRBORNE);
        c.update(DT, &mut air);
        assert_eq!(c.velocity().y, -50.0 * DT);
        c.update(DT, &mut air);
        assert_eq!(c.velocity().y, -50.0 * DT + -50.0 * DT);
        assert_eq!(air.moves.len(), 2);
        assert_eq!(air.moves[1], c.velocity() * DT);
        assert_eq!(c.motion_state(), MotionState::Airborne);
    }

    #[test]
    fn test_horizontal_smoothing_never_overshoots() {
        let mut c = controller();
        c.set_directional_input(Vec2::new(1.0, 0.0));
        let mut air = ScriptedCollider::always(ContactReport::AIRBORNE);

        let mut prev = 0.0;
        for _ in 0..300 {
            c.update(DT, &mut air);
            let vx = c.velocity().x;
            assert!(vx >= prev, "not monotonic: {} -> {}", prev, vx);
            assert!((0.0..=6.0).contains(&vx), "out of range: {}", vx);
            prev = vx;
        }
        assert!((prev - 6.0).abs() < 1e-3);
    }

    #[test]
    fn test_grounded_smoothing_is_faster() {
        let mut ground = controller();
        let mut air = controller();
        let mut floor = ScriptedCollider::always(ContactReport::grounded());
        let mut sky = ScriptedCollider::always(ContactReport::AIRBORNE);

        // Establish footing first
        ground.update(DT, &mut floor);
        air.update(DT, &mut sky);

        ground.set_directional_input(Vec2::RIGHT);
        air.set_directional_input(Vec2::RIGHT);
        ground.update(DT, &mut floor);
        air.update(DT, &mut sky);

        assert!(ground.velocity().x > air.velocity().x);
    }

    #[test]
    fn test_post_move_grounding_zeroes_vertical() {
        let mut c = controller();
        c.set_velocity(Vec2::new(2.0, -37.0));
        let mut floor = ScriptedCollider::always(ContactReport::grounded());
        c.update(DT, &mut floor);
        assert_eq!(c.velocity().y, 0.0);
        assert_eq!(c.footing(), Footing::Grounded);

        c.set_velocity(Vec2::new(0.0, 12.0));
        c.update(DT, &mut floor);
        assert_eq!(c.velocity().y, 0.0);
    }

    #[test]
    fn test_ceiling_bump_zeroes_vertical() {
        let mut c = controller();
        c.set_velocity(Vec2::new(0.0, 15.0));
        let ceiling = ContactReport {
            above: true,
            ..ContactReport::AIRBORNE
        };
        let mut collider = ScriptedCollider::always(ceiling);
        c.update(DT, &mut collider);
        assert_eq!(c.velocity().y, 0.0);
        assert_eq!(c.footing(), Footing::Airborne);
    }

    #[test]
    fn test_steep_slope_counteracts_gravity_along_normal() {
        let mut c = controller();
        let normal = Vec2::new(-0.7, 0.714_142_8);
        let mut slope = ScriptedCollider::always(ContactReport::on_steep_slope(normal));
        c.update(DT, &mut slope);

        let expected = -50.0 * DT + normal.y * 50.0 * DT;
        assert_eq!(c.velocity().y, expected);
        assert!(c.velocity().y < 0.0, "still slides down");
        assert_eq!(c.footing(), Footing::SlidingSlope { normal });
    }

    #[test]
    fn test_ground_jump() {
        let mut c = controller();
        let mut floor = ScriptedCollider::always(ContactReport::grounded());
        c.set_directional_input(Vec2::RIGHT);
        c.update(DT, &mut floor);
        let vx = c.velocity().x;

        c.on_jump_input_down();
        assert_eq!(c.velocity(), Vec2::new(vx, 20.0));
        let events = c.take_events();
        assert!(events.iter().any(|e| e.jump_kind() == Some(JumpKind::Ground)));
    }

    #[test]
    fn test_no_jump_in_air() {
        let mut c = controller();
        let mut air = ScriptedCollider::always(ContactReport::AIRBORNE);
        c.update(DT, &mut air);
        let before = c.velocity();
        c.on_jump_input_down();
        assert_eq!(c.velocity(), before);
        assert!(c.take_events().is_empty());
    }

    #[test]
    fn test_jump_release_clamps_once() {
        let mut c = controller();
        c.set_velocity(Vec2::new(0.0, 18.0));
        c.on_jump_input_up();
        assert_eq!(c.velocity().y, 10.0);
        c.on_jump_input_up();
        assert_eq!(c.velocity().y, 10.0);

        let cuts: Vec<_> = c
            .take_events()
            .into_iter()
            .filter(|e| matches!(e.kind, MotionEventKind::JumpCut { .. }))
            .collect();
        assert_eq!(cuts.len(), 1);
    }

    #[test]
    fn test_jump_release_leaves_slow_rise_alone() {
        let mut c = controller();
        c.set_velocity(Vec2::new(0.0, 4.0));
        c.on_jump_input_up();
        assert_eq!(c.velocity().y, 4.0);
    }

    #[test]
    fn test_wall_slide_entry_requires_falling_and_no_ground() {
        let mut c = controller();
        let mut wall = ScriptedCollider::always(ContactReport::against_wall(WallSide::Right));
        c.update(DT, &mut wall);
        assert!(!c.is_wall_sliding(), "wall contact not known until after first move");
        c.update(DT, &mut wall);
        assert!(c.is_wall_sliding());
        assert_eq!(c.wall_dir_x(), Some(1.0));
        assert_eq!(c.motion_state(), MotionState::WallSliding);

        // Rising past the wall does not slide
        let mut c = controller();
        c.update(DT, &mut wall);
        c.set_velocity(Vec2::new(0.0, 10.0));
        c.update(DT, &mut wall);
        assert!(!c.is_wall_sliding());

        // Wall plus ground does not slide
        let mut c = controller();
        let corner = ContactReport {
            right: true,
            ..ContactReport::grounded()
        };
        let mut corner = ScriptedCollider::always(corner);
        c.update(DT, &mut corner);
        c.update(DT, &mut corner);
        assert!(!c.is_wall_sliding());
    }

    #[test]
    fn test_wall_slide_clamps_fall_speed() {
        let mut c = controller();
        let mut wall = ScriptedCollider::always(ContactReport::against_wall(WallSide::Left));
        c.update(DT, &mut wall);
        c.set_velocity(Vec2::new(0.0, -20.0));
        c.update(DT, &mut wall);
        assert_eq!(c.velocity().y, -3.0);
        assert_eq!(c.wall_dir_x(), Some(-1.0));
    }

    #[test]
    fn test_wall_slide_exit_emits_event() {
        let mut c = wall_sliding(MovementConfig::default(), WallSide::Right, 0.0);
        c.take_events();

        let mut air = ScriptedCollider::always(ContactReport::AIRBORNE);
        c.update(DT, &mut air); // report still had the wall
        assert!(c.is_wall_sliding());
        c.update(DT, &mut air);
        assert_eq!(c.locomotion(), Locomotion::Free);

        let events = c.take_events();
        assert!(events
            .iter()
            .any(|e| matches!(e.kind, MotionEventKind::WallSlideEnded)));
    }

    #[test]
    fn test_wall_stick_holds_while_pressing_into_wall() {
        let config = MovementConfig {
            wall_stick_time: 0.25,
            ..MovementConfig::default()
        };
        let mut c = wall_sliding(config, WallSide::Right, 1.0);
        // The entry frame only arms the timer; the clamp starts next frame
        assert!(c.velocity().x > 0.0, "entry frame is not clamped");
        assert_eq!(c.time_to_wall_unstick(), 0.25);

        let mut wall = ScriptedCollider::always(ContactReport::against_wall(WallSide::Right));
        let mut elapsed = 0.0;
        while elapsed < 0.5 {
            c.update(DT, &mut wall);
            elapsed += DT;
            assert_eq!(c.velocity().x, 0.0);
            assert_eq!(c.smoothing_rate(), 0.0);
            assert_eq!(c.time_to_wall_unstick(), 0.25);
        }
    }

    #[test]
    fn test_wall_stick_gates_leaving_the_wall() {
        let config = MovementConfig {
            wall_stick_time: 0.25,
            ..MovementConfig::default()
        };
        let mut c = wall_sliding(config, WallSide::Right, 0.0);
        let mut wall = ScriptedCollider::always(ContactReport::against_wall(WallSide::Right));

        // Now press away from the wall
        c.set_directional_input(Vec2::LEFT);
        let mut pinned = 0.0;
        let mut frames = 0;
        let mut events = Vec::new();
        loop {
            c.update(DT, &mut wall);
            events.extend(c.take_events());
            frames += 1;
            assert!(frames < 120, "never released");
            if c.velocity().x != 0.0 {
                break;
            }
            pinned += DT;
        }

        assert!(pinned >= 0.25 - 1e-4, "released after only {}s", pinned);
        assert!(c.velocity().x < 0.0, "drifts away from the wall");
        assert!(events
            .iter()
            .any(|e| matches!(e.kind, MotionEventKind::WallUnstuck { wall: WallSide::Right })));
    }

    #[test]
    fn test_wall_jump_climb() {
        let config = MovementConfig {
            wall_jump_climb: Vec2::new(10.0, 15.0),
            ..MovementConfig::default()
        };
        let mut c = wall_sliding(config, WallSide::Right, 1.0);
        c.on_jump_input_down();
        assert_eq!(c.velocity(), Vec2::new(-10.0, 15.0));
    }

    #[test]
    fn test_wall_jump_off_and_leap() {
        let mut c = wall_sliding(MovementConfig::default(), WallSide::Right, 0.0);
        c.on_jump_input_down();
        assert_eq!(c.velocity(), Vec2::new(-8.5, 7.0));

        let mut c = wall_sliding(MovementConfig::default(), WallSide::Right, -1.0);
        c.on_jump_input_down();
        assert_eq!(c.velocity(), Vec2::new(-18.0, 17.0));
        assert_eq!(
            c.take_events().last().and_then(MotionEvent::jump_kind),
            Some(JumpKind::WallLeap)
        );
    }

    #[test]
    fn test_wall_jump_mirrors_on_left_wall() {
        let mut c = wall_sliding(MovementConfig::default(), WallSide::Left, -1.0);
        c.on_jump_input_down();
        assert_eq!(c.velocity(), Vec2::new(7.5, 16.0));
    }

    #[test]
    fn test_analog_input_classified_by_sign() {
        // Half-tilt into the right wall still climbs
        let mut c = wall_sliding(MovementConfig::default(), WallSide::Right, 0.5);
        c.on_jump_input_down();
        assert_eq!(c.velocity(), Vec2::new(-7.5, 16.0));
    }

    #[test]
    fn test_corner_fires_wall_and_ground_jump() {
        let mut c = controller();
        c.set_directional_input(Vec2::RIGHT);
        let corner = ContactReport {
            right: true,
            ..ContactReport::grounded()
        };
        let mut collider = ScriptedCollider::always(ContactReport::against_wall(WallSide::Right))
            .then(ContactReport::against_wall(WallSide::Right))
            .then(corner);
        c.update(DT, &mut collider);
        c.update(DT, &mut collider);
        assert!(c.is_wall_sliding());
        assert_eq!(c.footing(), Footing::Grounded);

        c.take_events();
        c.on_jump_input_down();
        assert_eq!(c.velocity(), Vec2::new(-7.5, 20.0));

        let kinds: Vec<_> = c.take_events().iter().filter_map(MotionEvent::jump_kind).collect();
        assert_eq!(kinds, vec![JumpKind::WallClimb, JumpKind::Ground]);
    }

    #[test]
    fn test_slope_jump_blocked_into_slope() {
        let mut c = controller();
        let normal = Vec2::new(-0.7, 0.714_142_8);
        let mut slope = ScriptedCollider::always(ContactReport::on_steep_slope(normal));
        c.update(DT, &mut slope);

        c.set_directional_input(Vec2::new(0.7, 0.0));
        let before = c.velocity();
        c.on_jump_input_down();
        assert_eq!(c.velocity().y, before.y);
        assert_eq!(c.velocity(), before);
    }

    #[test]
    fn test_slope_jump_along_normal() {
        let mut c = controller();
        let normal = Vec2::new(-0.7, 0.714_142_8);
        let mut slope = ScriptedCollider::always(ContactReport::on_steep_slope(normal));
        c.update(DT, &mut slope);

        c.set_directional_input(Vec2::new(-1.0, 0.0));
        c.on_jump_input_down();
        assert_eq!(c.velocity(), Vec2::new(-0.7 * 20.0, 0.714_142_8 * 20.0));

        // No input also jumps
        let mut c = controller();
        c.update(DT, &mut slope);
        c.on_jump_input_down();
        assert_eq!(c.velocity(), normal * 20.0);
    }

    #[test]
    fn test_landing_event() {
        let mut c = controller();
        let mut collider = ScriptedCollider::always(ContactReport::grounded())
            .then(ContactReport::AIRBORNE)
            .then(ContactReport::AIRBORNE);
        let mut events = Vec::new();
        for _ in 0..4 {
            c.update(DT, &mut collider);
            events.extend(c.take_events());
        }

        let landings: Vec<_> = events
            .into_iter()
            .filter_map(|e| match e.kind {
                MotionEventKind::Landed { impact_speed } => Some((e.frame, impact_speed)),
                _ => None,
            })
            .collect();
        assert_eq!(landings.len(), 1);
        assert_eq!(landings[0].0, 2);
        assert!((landings[0].1 - 2.5).abs() < 1e-4);
    }

    #[test]
    fn test_undrained_events_stay_bounded() {
        let mut c = controller();
        let mut arena = BoxArena::new(20.0, 12.0, Vec2::new(0.5, 1.0));

        // Jump once a second for 100 seconds and never drain
        for i in 0..6000 {
            if i % 60 == 0 {
                c.on_jump_input_down();
            }
            c.update(DT, &mut arena);
        }

        let events = c.take_events();
        assert!(events.len() <= 3, "queue grew to {}", events.len());
        assert!(events.iter().all(|e| e.frame + 1 == c.frame()));
    }

    #[test]
    fn test_edge_events_survive_their_own_update() {
        let mut c = controller();
        let mut floor = ScriptedCollider::always(ContactReport::grounded());
        c.update(DT, &mut floor);
        c.take_events();

        c.on_jump_input_down();
        c.update(DT, &mut ScriptedCollider::always(ContactReport::AIRBORNE));
        let kinds: Vec<_> = c.take_events().iter().filter_map(MotionEvent::jump_kind).collect();
        assert_eq!(kinds, vec![JumpKind::Ground]);
    }

    #[test]
    fn test_hash_tracks_state() {
        let mut a = controller();
        let mut b = controller();
        assert_eq!(a.compute_hash(), b.compute_hash());

        let mut air = ScriptedCollider::always(ContactReport::AIRBORNE);
        a.update(DT, &mut air);
        assert_ne!(a.compute_hash(), b.compute_hash());
        b.update(DT, &mut air);
        assert_eq!(a.compute_hash(), b.compute_hash());

        b.set_directional_input(Vec2::RIGHT);
        assert_ne!(a.compute_hash(), b.compute_hash());
    }

    proptest! {
        #[test]
        fn prop_jump_release_idempotent(vy in 10.0001f32..200.0, vx in -10.0f32..10.0) {
            let mut c = controller();
            c.set_velocity(Vec2::new(vx, vy));
            c.on_jump_input_up();
            prop_assert_eq!(c.velocity(), Vec2::new(vx, 10.0));
            c.on_jump_input_up();
            prop_assert_eq!(c.velocity(), Vec2::new(vx, 10.0));
            prop_assert_eq!(c.take_events().len(), 1);
        }

        #[test]
        fn prop_release_below_min_is_a_no_op(vy in -50.0f32..=10.0) {
            let mut c = controller();
            c.set_velocity(Vec2::new(0.0, vy));
            c.on_jump_input_up();
            prop_assert_eq!(c.velocity().y, vy);
        }
    }
}
