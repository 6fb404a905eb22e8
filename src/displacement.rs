use kurbo::{Point, Vec2};

/// Starting scale of the distortion map sprite.
pub const INITIAL_MAP_SCALE: f64 = 3.0;

/// Coast-down timer parameters: every `DECAY_INTERVAL` seconds of wall
/// clock the coast speed loses `DECAY_DECREMENT`, until it falls below
/// `DECAY_FLOOR` and the timer stops.
pub const DECAY_INTERVAL: f64 = 0.1;
pub const DECAY_DECREMENT: f64 = 0.4;
pub const DECAY_FLOOR: f64 = 0.8;

/// Runtime state of the distortion map.
///
/// Two drivers write here with disjoint field ownership: the idle
/// driver owns `position` (every frame, transition or not), the active
/// transition timeline owns `scale` and, in wacky mode, `rotation`.
/// The distortion texture is assumed mirrored-repeat, so unbounded
/// position drift never shows a seam.
#[derive(Clone, Copy, Debug, serde::Serialize)]
pub struct DisplacementState {
    pub position: Point,
    pub scale: Vec2,
    pub rotation: f64,
}

impl DisplacementState {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            scale: Vec2::new(INITIAL_MAP_SCALE, INITIAL_MAP_SCALE),
            rotation: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct DecayTimer {
    accumulated: f64,
}

/// Idle-drift driver for the distortion map position.
///
/// With autoplay on, the map drifts at the configured speed. With
/// autoplay off, it coasts: a periodic timer shrinks a scalar speed
/// until it passes the floor, producing a gradual near-stop instead of
/// a hard halt. The coast speed is clamped at zero, never reset.
#[derive(Clone, Copy, Debug)]
pub struct DisplacementDriver {
    auto_play: bool,
    base_speed: Vec2,
    coast_speed: f64,
    decay: Option<DecayTimer>,
}

impl DisplacementDriver {
    pub fn new(auto_play: bool, base_speed: Vec2) -> Self {
        let mut driver = Self {
            auto_play: true,
            base_speed,
            coast_speed: base_speed.x,
            decay: None,
        };
        driver.set_auto_play(auto_play);
        driver
    }

    pub fn auto_play(&self) -> bool {
        self.auto_play
    }

    pub fn coast_speed(&self) -> f64 {
        self.coast_speed
    }

    /// Toggle autoplay. The coast speed restarts from the configured
    /// autoplay speed each time; disabling replaces any running decay
    /// timer, enabling cancels it outright.
    pub fn set_auto_play(&mut self, enabled: bool) {
        self.auto_play = enabled;
        self.coast_speed = self.base_speed.x;
        self.decay = if enabled {
            None
        } else {
            Some(DecayTimer { accumulated: 0.0 })
        };
    }

    /// Advance one frame: run the decay timer against wall-clock time,
    /// then drift the map position. Only `position` is written.
    pub fn tick(&mut self, state: &mut DisplacementState, dt: f64) {
        self.advance_decay(dt);
        let step = if self.auto_play {
            self.base_speed * dt
        } else {
            Vec2::new(self.coast_speed, self.coast_speed) * dt
        };
        state.position += step;
    }

    fn advance_decay(&mut self, dt: f64) {
        let Some(timer) = &mut self.decay else {
            return;
        };
        timer.accumulated += dt;
        while timer.accumulated >= DECAY_INTERVAL {
            timer.accumulated -= DECAY_INTERVAL;
            self.coast_speed = (self.coast_speed - DECAY_DECREMENT).max(0.0);
            if self.coast_speed < DECAY_FLOOR {
                self.decay = None;
                break;
            }
        }
    }
}
