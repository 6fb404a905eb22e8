use kurbo::{Point, Vec2};

use crate::{
    config::SlideshowConfig,
    displacement::{DisplacementDriver, DisplacementState},
    error::RippleResult,
    interactivity,
    loader::{ImageLoader, SlideImage},
    navigation::NavState,
    scene::{DisplacementNode, Scene, SlideNode},
    slide::SlideDeck,
    timeline::{PropertyWrite, Timeline, TweenTarget, Value},
    transition,
};

/// Structured notifications drained from [`Slideshow::tick`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlideshowEvent {
    TransitionStarted { from: usize, to: usize },
    /// A transition committed; `index` is the new current slide.
    SlideChanged { index: usize },
}

/// The slideshow engine.
///
/// Single-threaded and cooperative: the host calls [`tick`] once per
/// rendered frame and hands the returned scene snapshot to its
/// renderer. Navigation calls that land mid-transition are rejected
/// synchronously, never queued.
///
/// [`tick`]: Slideshow::tick
pub struct Slideshow {
    config: SlideshowConfig,
    deck: SlideDeck,
    nav: NavState,
    displacement: DisplacementState,
    driver: DisplacementDriver,
    timeline: Option<Timeline>,
    pending_events: Vec<SlideshowEvent>,
}

impl Slideshow {
    pub fn new(config: SlideshowConfig) -> RippleResult<Self> {
        config.validate()?;
        let deck = SlideDeck::from_config(&config);
        // Wacky mode anchors the map at stage center like explicit centering.
        let map_position = if config.displacement_centered || config.wacky {
            config.stage_center()
        } else {
            Point::ORIGIN
        };
        let driver = DisplacementDriver::new(config.auto_play, config.auto_play_speed);
        Ok(Self {
            deck,
            nav: NavState::new(),
            displacement: DisplacementState::new(map_position),
            driver,
            timeline: None,
            pending_events: Vec::new(),
            config,
        })
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.nav.current()
    }

    pub fn is_transitioning(&self) -> bool {
        self.nav.is_busy()
    }

    pub fn auto_play(&self) -> bool {
        self.driver.auto_play()
    }

    pub fn deck(&self) -> &SlideDeck {
        &self.deck
    }

    pub fn displacement(&self) -> &DisplacementState {
        &self.displacement
    }

    /// Advance to the next slide, wrapping to 0 past the end. `false`
    /// when a transition is already running.
    pub fn slide_next(&mut self) -> bool {
        let Some(target) = self.nav.request_next(self.deck.len()) else {
            tracing::debug!("slide_next rejected: transition in flight");
            return false;
        };
        self.start_transition(target)
    }

    /// Advance to the previous slide, wrapping to the last. `false`
    /// when a transition is already running.
    pub fn slide_prev(&mut self) -> bool {
        let Some(target) = self.nav.request_prev(self.deck.len()) else {
            tracing::debug!("slide_prev rejected: transition in flight");
            return false;
        };
        self.start_transition(target)
    }

    /// Jump to a specific slide. `Ok(false)` when busy; an out-of-range
    /// index is an error. `index == current` still runs a full
    /// transition and still emits the change event.
    pub fn slide_to(&mut self, index: usize) -> RippleResult<bool> {
        let Some(target) = self.nav.request_to(index, self.deck.len())? else {
            tracing::debug!(index, "slide_to rejected: transition in flight");
            return Ok(false);
        };
        Ok(self.start_transition(target))
    }

    pub fn set_auto_play(&mut self, enabled: bool) {
        self.driver.set_auto_play(enabled);
    }

    /// Deliver a decode result for one slide. Consumed once; repeats
    /// and unknown indices are warned no-ops.
    pub fn resolve_image(&mut self, index: usize, image: SlideImage) -> bool {
        self.deck.resolve_image(index, image)
    }

    /// Register the interactive children attached inside the host's
    /// loaded hook. Children come up enabled only when their slide is
    /// current and no transition is moving off it.
    pub fn register_children(&mut self, index: usize, ids: &[u32]) -> bool {
        let enabled = index == self.nav.current() && !self.nav.is_busy();
        self.deck.register_children(index, ids, enabled)
    }

    /// Decode every slide source through `loader`. Each failure leaves
    /// that slide permanently pending, fire-and-forget.
    pub fn load_slides(&mut self, loader: &mut dyn ImageLoader) {
        for index in 0..self.deck.len() {
            let Some(source) = self.deck.get(index).map(|s| s.source.clone()) else {
                continue;
            };
            match loader.load(&source) {
                Ok(image) => {
                    self.deck.resolve_image(index, image);
                }
                Err(err) => {
                    tracing::warn!(index, %source, %err, "slide decode failed, leaving hidden");
                }
            }
        }
    }

    /// Per-frame drive: decay timer, idle drift, timeline writes, wacky
    /// override, interactivity toggles, completion commit. Returns the
    /// events that became observable this frame.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn tick(&mut self, dt: f64) -> Vec<SlideshowEvent> {
        let mut events = std::mem::take(&mut self.pending_events);

        // Idle driver owns position, transition or not.
        self.driver.tick(&mut self.displacement, dt);

        let Some(timeline) = &mut self.timeline else {
            return events;
        };

        let deck = &self.deck;
        let displacement = &self.displacement;
        let mut resolve = |target: TweenTarget| match target {
            TweenTarget::SlideOpacity(i) => {
                Value::Scalar(deck.get(i).map(|s| s.opacity()).unwrap_or(0.0))
            }
            TweenTarget::DisplaceScale => Value::Pair(displacement.scale),
        };
        let tick = timeline.advance(dt, &mut resolve);

        // Outgoing slide must never stay interactive past transition
        // start; repeat the disable every update tick (idempotent).
        interactivity::disable(&mut self.deck, self.nav.current());

        for write in &tick.writes {
            self.apply_write(write);
        }

        if self.config.wacky {
            self.displacement.rotation += tick.progress * transition::WACKY_ROTATION_DELTA;
            let s = tick.progress * transition::WACKY_SCALE_FACTOR;
            self.displacement.scale = Vec2::new(s, s);
        }

        if tick.completed {
            self.timeline = None;
            let index = self.nav.complete();
            if self.config.wacky {
                self.displacement.scale =
                    Vec2::new(transition::WACKY_SCALE_RESET, transition::WACKY_SCALE_RESET);
            }
            interactivity::enable(&mut self.deck, index);
            tracing::debug!(index, "transition committed");
            events.push(SlideshowEvent::SlideChanged { index });
        }

        events
    }

    /// Snapshot the stage for a renderer.
    pub fn scene(&self) -> Scene {
        Scene {
            stage_width: self.config.stage_width,
            stage_height: self.config.stage_height,
            slides: self
                .deck
                .iter()
                .enumerate()
                .map(|(index, slide)| SlideNode {
                    index,
                    opacity: slide.opacity(),
                    position: slide.position,
                    centered: slide.centered,
                    image: slide.image().cloned(),
                })
                .collect(),
            displacement: DisplacementNode {
                source: self.config.displacement_image.clone(),
                position: self.displacement.position,
                scale: self.displacement.scale,
                rotation: self.displacement.rotation,
                centered: self.config.displacement_centered || self.config.wacky,
                auto_fit: self.config.displace_auto_fit,
                mirrored_repeat: true,
            },
        }
    }

    fn start_transition(&mut self, target: usize) -> bool {
        let from = self.nav.current();
        let timeline = match transition::build(from, target, &self.config) {
            Ok(tl) => tl,
            Err(err) => {
                tracing::error!(%err, "transition timeline rejected");
                return false;
            }
        };
        self.nav.begin(target);
        // Ordering guarantee: old slide loses interactivity before any
        // enable can happen at completion.
        interactivity::disable(&mut self.deck, from);
        self.timeline = Some(timeline);
        self.pending_events
            .push(SlideshowEvent::TransitionStarted { from, to: target });
        tracing::debug!(from, to = target, "transition started");
        true
    }

    fn apply_write(&mut self, write: &PropertyWrite) {
        match (write.target, write.value) {
            (TweenTarget::SlideOpacity(i), Value::Scalar(alpha)) => {
                if let Some(slide) = self.deck.get_mut(i) {
                    slide.set_opacity(alpha);
                }
            }
            (TweenTarget::DisplaceScale, Value::Pair(scale)) => {
                self.displacement.scale = scale;
            }
            _ => debug_assert!(false, "write kind does not match its target"),
        }
    }
}
