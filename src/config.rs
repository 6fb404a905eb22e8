use kurbo::Vec2;

use crate::error::{RippleError, RippleResult};

/// Construction-time options for a [`crate::Slideshow`].
///
/// Immutable after construction; the autoplay flag is the only field
/// with a runtime toggle, and that lives on the slideshow itself.
/// Every field has a serde default so JSON configs may be partial.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SlideshowConfig {
    /// Image refs for the slides, in display order.
    pub slides: Vec<String>,
    pub stage_width: u32,
    pub stage_height: u32,
    /// Anchor slides at stage center instead of the origin.
    pub center_slides: bool,
    /// Drive the displacement map at full speed when idle.
    pub auto_play: bool,
    /// Idle drift speed, units per second per axis.
    pub auto_play_speed: Vec2,
    /// Peak displacement scale reached mid-transition.
    pub displace_scale: Vec2,
    /// Image ref for the distortion map texture.
    pub displacement_image: String,
    /// Anchor the distortion map at stage center.
    pub displacement_centered: bool,
    /// Ask the renderer to fit the distortion bounds to the stage.
    pub displace_auto_fit: bool,
    /// Settle displacement scale at transition end.
    pub displace_scale_to: Vec2,
    /// Rotation + uniform scale pulsing embellishment during transitions.
    pub wacky: bool,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            slides: Vec::new(),
            stage_width: 1920,
            stage_height: 1080,
            center_slides: false,
            auto_play: true,
            auto_play_speed: Vec2::new(4.0, 4.0),
            displace_scale: Vec2::new(200.0, 70.0),
            displacement_image: String::new(),
            displacement_centered: false,
            displace_auto_fit: false,
            displace_scale_to: Vec2::new(20.0, 20.0),
            wacky: false,
        }
    }
}

impl SlideshowConfig {
    pub fn validate(&self) -> RippleResult<()> {
        if self.slides.is_empty() {
            return Err(RippleError::config("slides must be non-empty"));
        }
        if self.stage_width == 0 || self.stage_height == 0 {
            return Err(RippleError::config("stage width/height must be > 0"));
        }
        for (name, v) in [
            ("auto_play_speed", self.auto_play_speed),
            ("displace_scale", self.displace_scale),
            ("displace_scale_to", self.displace_scale_to),
        ] {
            if !v.x.is_finite() || !v.y.is_finite() {
                return Err(RippleError::config(format!("{name} must be finite")));
            }
        }
        Ok(())
    }

    pub fn stage_center(&self) -> kurbo::Point {
        kurbo::Point::new(
            f64::from(self.stage_width) / 2.0,
            f64::from(self.stage_height) / 2.0,
        )
    }
}
