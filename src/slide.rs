use kurbo::Point;

use crate::{config::SlideshowConfig, loader::SlideImage};

/// Image state of one slide. A pending slide renders as nothing (its
/// opacity stays 0 unless it is slide 0) and accepts no children.
#[derive(Clone, Debug, Default)]
pub enum SlideVisual {
    #[default]
    Pending,
    Ready(SlideImage),
}

/// A pointer-interactive element attached to one slide.
///
/// `enabled` and `hit_testable` always move together; the binder is the
/// only writer after registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InteractiveChild {
    pub id: u32,
    pub enabled: bool,
    pub hit_testable: bool,
}

impl InteractiveChild {
    pub fn new(id: u32, enabled: bool) -> Self {
        Self {
            id,
            enabled,
            hit_testable: enabled,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Slide {
    pub source: String,
    pub visual: SlideVisual,
    pub position: Point,
    pub centered: bool,
    opacity: f64,
    children: Vec<InteractiveChild>,
}

impl Slide {
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.visual, SlideVisual::Ready(_))
    }

    pub fn image(&self) -> Option<&SlideImage> {
        match &self.visual {
            SlideVisual::Ready(img) => Some(img),
            SlideVisual::Pending => None,
        }
    }

    pub fn children(&self) -> &[InteractiveChild] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [InteractiveChild] {
        &mut self.children
    }
}

/// Ordered registry of slides. Insertion order is display order; the
/// deck is fixed-size for the lifetime of the slideshow.
#[derive(Clone, Debug)]
pub struct SlideDeck {
    slides: Vec<Slide>,
}

impl SlideDeck {
    pub fn from_config(config: &SlideshowConfig) -> Self {
        let position = if config.center_slides {
            config.stage_center()
        } else {
            Point::ORIGIN
        };
        let slides = config
            .slides
            .iter()
            .enumerate()
            .map(|(i, source)| Slide {
                source: source.clone(),
                visual: SlideVisual::Pending,
                position,
                centered: config.center_slides,
                opacity: if i == 0 { 1.0 } else { 0.0 },
                children: Vec::new(),
            })
            .collect();
        Self { slides }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Slide> {
        self.slides.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slide> {
        self.slides.iter()
    }

    /// Deliver a decode result. The resolution is consumed once: the
    /// first call stores the image and returns `true`; anything else is
    /// a warned no-op.
    pub fn resolve_image(&mut self, index: usize, image: SlideImage) -> bool {
        let Some(slide) = self.slides.get_mut(index) else {
            tracing::warn!(index, "image resolved for unknown slide");
            return false;
        };
        if slide.is_ready() {
            tracing::warn!(index, "image already resolved, ignoring");
            return false;
        }
        slide.visual = SlideVisual::Ready(image);
        true
    }

    /// Snapshot interactive children onto a slide. Valid only once the
    /// slide's image has resolved: attachment happens inside the host's
    /// loaded hook, so a pending slide cannot have children yet.
    pub fn register_children(&mut self, index: usize, ids: &[u32], enabled: bool) -> bool {
        let Some(slide) = self.slides.get_mut(index) else {
            tracing::warn!(index, "children registered for unknown slide");
            return false;
        };
        if !slide.is_ready() {
            tracing::warn!(index, "children registered before image resolved, ignoring");
            return false;
        }
        slide.children = ids
            .iter()
            .map(|&id| InteractiveChild::new(id, enabled))
            .collect();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::SlideImage;

    fn deck(n: usize) -> SlideDeck {
        let config = SlideshowConfig {
            slides: (0..n).map(|i| format!("s{i}.png")).collect(),
            ..SlideshowConfig::default()
        };
        SlideDeck::from_config(&config)
    }

    fn px() -> SlideImage {
        SlideImage::from_rgba8(1, 1, vec![0, 0, 0, 255])
    }

    #[test]
    fn only_first_slide_starts_visible() {
        let deck = deck(3);
        assert_eq!(deck.get(0).unwrap().opacity(), 1.0);
        assert_eq!(deck.get(1).unwrap().opacity(), 0.0);
        assert_eq!(deck.get(2).unwrap().opacity(), 0.0);
    }

    #[test]
    fn centered_deck_positions_at_stage_center() {
        let config = SlideshowConfig {
            slides: vec!["a.png".to_string()],
            center_slides: true,
            ..SlideshowConfig::default()
        };
        let deck = SlideDeck::from_config(&config);
        assert_eq!(deck.get(0).unwrap().position, Point::new(960.0, 540.0));
    }

    #[test]
    fn resolution_is_consumed_once() {
        let mut deck = deck(2);
        assert!(deck.resolve_image(1, px()));
        assert!(!deck.resolve_image(1, px()));
        assert!(!deck.resolve_image(9, px()));
    }

    #[test]
    fn children_require_resolved_image() {
        let mut deck = deck(2);
        assert!(!deck.register_children(1, &[7], false));
        deck.resolve_image(1, px());
        assert!(deck.register_children(1, &[7, 8], false));
        let kids = deck.get(1).unwrap().children();
        assert_eq!(kids.len(), 2);
        assert!(!kids[0].enabled && !kids[0].hit_testable);
    }

    #[test]
    fn opacity_is_clamped() {
        let mut deck = deck(1);
        deck.get_mut(0).unwrap().set_opacity(3.0);
        assert_eq!(deck.get(0).unwrap().opacity(), 1.0);
        deck.get_mut(0).unwrap().set_opacity(-1.0);
        assert_eq!(deck.get(0).unwrap().opacity(), 0.0);
    }
}
