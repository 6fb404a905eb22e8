use kurbo::{Point, Vec2};

use crate::{error::RippleResult, loader::SlideImage};

/// Immutable per-frame snapshot handed to a renderer.
///
/// Slides appear in deck order; stacking follows that order. Pending
/// slides carry no image and render as nothing.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Scene {
    pub stage_width: u32,
    pub stage_height: u32,
    pub slides: Vec<SlideNode>,
    pub displacement: DisplacementNode,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct SlideNode {
    pub index: usize,
    pub opacity: f64,
    pub position: Point,
    pub centered: bool,
    #[serde(skip)]
    pub image: Option<SlideImage>,
}

/// Distortion-map parameters for the displacement filter pass.
#[derive(Clone, Debug, serde::Serialize)]
pub struct DisplacementNode {
    pub source: String,
    pub position: Point,
    pub scale: Vec2,
    pub rotation: f64,
    pub centered: bool,
    pub auto_fit: bool,
    /// The map texture must wrap mirrored-repeat so drift never seams.
    pub mirrored_repeat: bool,
}

/// Seam to the GPU/2D surface. Implementations consume a scene and
/// produce pixels; the engine never sees them.
pub trait RenderBackend {
    fn render(&mut self, scene: &Scene) -> RippleResult<()>;
}
