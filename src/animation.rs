//! Scene assembly - builds the layered dice roll and renders its frames

use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::RgbaImage;
use thiserror::Error;

use crate::motion::{MotionError, Point2D};
use crate::renderer::{MovingRenderer, Render, RotatedRenderer, SpriteRenderer, StaticRenderer};
use crate::spritesheet::{SheetError, SpriteSheet};

/// Frames in the finished animation.
pub const FRAME_COUNT: usize = 128;

/// Faces on the die. Outcomes are 0-indexed, so face 19 shows a 20.
pub const FACES: u32 = 20;

const BACKGROUND_FILE: &str = "roll_frame.png";

/// A sheet asset and the grid it is sliced on.
struct SheetSpec {
    file: &'static str,
    rows: u32,
    cols: u32,
}

impl SheetSpec {
    fn load(&self, assets: &Path) -> Result<Rc<SpriteSheet>, SheetError> {
        let sheet = SpriteSheet::load(&assets.join(self.file), self.rows, self.cols)?;
        Ok(Rc::new(sheet))
    }
}

const ROLL_SHEET: SheetSpec = SheetSpec {
    file: "single_roll.png",
    rows: 8,
    cols: 8,
};
const FACE_SHEET: SheetSpec = SheetSpec {
    file: "d20.png",
    rows: 5,
    cols: 5,
};
const EXPLOSION_SHEET: SheetSpec = SheetSpec {
    file: "popExplosion.png",
    rows: 4,
    cols: 4,
};
const SHINE_SHEET: SheetSpec = SheetSpec {
    file: "d20Shine.png",
    rows: 5,
    cols: 6,
};
const HIT_SHEET: SheetSpec = SheetSpec {
    file: "d20Explosion.png",
    rows: 6,
    cols: 6,
};

/// The die's tumble around the table before settling back in the center.
const ROLL_WAYPOINTS: [Point2D; 7] = [
    Point2D::new(0.5, 0.5),
    Point2D::new(0.2, 0.7),
    Point2D::new(0.3, 0.8),
    Point2D::new(0.8, 0.5),
    Point2D::new(0.3, 0.2),
    Point2D::new(0.2, 0.3),
    Point2D::new(0.5, 0.5),
];

/// Frames spent tumbling along each leg between waypoints.
const ROLL_SEGMENT_FRAMES: [u32; 6] = [7, 5, 14, 15, 8, 14];

/// A wall-impact burst: when it fires, how it is oriented, where it draws.
struct Impact {
    start: usize,
    angle: f64,
    position: Point2D,
}

/// Impact bursts timed to the tumble's wall contacts. Each start is a
/// running sum of segment frames, one frame before the die reaches the wall.
const IMPACTS: [Impact; 3] = [
    // Bottom-left wall
    Impact {
        start: 7 - 1,
        angle: 0.0,
        position: Point2D::new(0.15, 0.85),
    },
    // Right wall
    Impact {
        start: 7 + 5 + 14 - 1,
        angle: 135.0,
        position: Point2D::new(0.83, 0.48),
    },
    // Top-left wall
    Impact {
        start: 7 + 5 + 14 + 15 - 1,
        angle: -90.0,
        position: Point2D::new(0.15, 0.17),
    },
];

/// Errors from assembling or rendering the animation.
#[derive(Debug, Error)]
pub enum AnimationError {
    #[error("failed to load background '{path}': {source}")]
    Background {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Sheet(#[from] SheetError),

    #[error(transparent)]
    Motion(#[from] MotionError),

    #[error("outcome {0} is out of range; a d20 rolls 0-19 (0-indexed)")]
    OutcomeRange(u32),
}

/// A renderer paired with the screen position it draws at.
struct Layer {
    renderer: Box<dyn Render>,
    position: Point2D,
}

impl Layer {
    fn new(renderer: impl Render + 'static, position: Point2D) -> Self {
        Self {
            renderer: Box::new(renderer),
            position,
        }
    }
}

/// A rendered dice roll: every frame plus the face it landed on.
#[derive(Debug)]
pub struct RollAnimation {
    pub frames: Vec<RgbaImage>,
    pub outcome: u32,
}

/// Render the full dice roll sequence.
///
/// # Arguments
///
/// * `assets` - Directory holding the sprite sheets and the background
/// * `outcome` - Face to land on, 0-indexed; rolled at random when `None`
///
/// # Returns
///
/// * `Ok(RollAnimation)` carrying `FRAME_COUNT` frames and the outcome
/// * `Err(AnimationError)` if the outcome is out of range or an asset fails
///   to load
pub fn render_animation(
    assets: &Path,
    outcome: Option<u32>,
) -> Result<RollAnimation, AnimationError> {
    render_animation_with_rng(assets, outcome, &mut fastrand::Rng::new())
}

/// As [`render_animation`], with the random roll drawn from a caller-supplied
/// generator.
pub fn render_animation_with_rng(
    assets: &Path,
    outcome: Option<u32>,
    rng: &mut fastrand::Rng,
) -> Result<RollAnimation, AnimationError> {
    // Validate before touching the filesystem
    let outcome = match outcome {
        Some(n) if n >= FACES => return Err(AnimationError::OutcomeRange(n)),
        Some(n) => n,
        None => rng.u32(0..FACES),
    };

    let background = load_background(assets)?;
    let layers = build_scene(assets, outcome)?;

    let frames = (0..FRAME_COUNT)
        .map(|index| {
            layers.iter().fold(background.clone(), |canvas, layer| {
                layer.renderer.render_frame(index, &canvas, layer.position)
            })
        })
        .collect();

    Ok(RollAnimation { frames, outcome })
}

fn load_background(assets: &Path) -> Result<RgbaImage, AnimationError> {
    let path = assets.join(BACKGROUND_FILE);
    let image =
        image::open(&path).map_err(|source| AnimationError::Background { path, source })?;
    Ok(image.to_rgba8())
}

/// Stack the scene back to front: wall impacts behind the tumbling die,
/// then the settled face with its burst and shine on top.
fn build_scene(assets: &Path, outcome: u32) -> Result<Vec<Layer>, AnimationError> {
    let roll = ROLL_SHEET.load(assets)?;
    let face = FACE_SHEET.load(assets)?;
    let explosion = EXPLOSION_SHEET.load(assets)?;
    let shine = SHINE_SHEET.load(assets)?;
    let hit = HIT_SHEET.load(assets)?;

    let tumble = MovingRenderer::new(roll, 0, &ROLL_WAYPOINTS, &ROLL_SEGMENT_FRAMES)?;
    let settled = tumble.end();

    let mut layers: Vec<Layer> = IMPACTS
        .iter()
        .map(|impact| {
            let burst = RotatedRenderer::new(Rc::clone(&hit), impact.start, impact.angle, true);
            Layer::new(burst, impact.position)
        })
        .collect();

    // The tumble follows its own path, so its stored position is unused
    layers.push(Layer::new(tumble, Point2D::new(0.0, 0.0)));
    layers.push(Layer::new(
        StaticRenderer::new(face, settled, FRAME_COUNT, outcome as usize),
        Point2D::new(0.5, 0.5),
    ));
    // The pop starts one frame before the die comes to rest
    layers.push(Layer::new(
        SpriteRenderer::new(explosion, settled - 1),
        Point2D::new(0.5, 0.45),
    ));
    layers.push(Layer::new(
        SpriteRenderer::new(shine, settled),
        Point2D::new(0.5, 0.5),
    ));

    Ok(layers)
}
