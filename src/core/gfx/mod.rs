//=========================================================================
// Graphics Interfaces
//=========================================================================
//
// Render-target abstraction plus the sprite/animation layer on top.
//
// Architecture:
//   States/Sprites ──draw──> dyn RenderTarget
//                                 │
//                       CommandBuffer (records DrawCommand)
//                                 │
//                       external presenter (out of crate)
//
// Submodules:
// - `texture`: handles, scale quality, memoised loading
// - `animation`: frame-indexed playback
// - `sprite`: texture region + named animations
// - `tilemap`: grid of sprites
//
//=========================================================================

//=== Module Declarations =================================================

mod animation;
mod sprite;
mod texture;
mod tilemap;

//=== Public API ==========================================================

pub use animation::{Animation, Frame};
pub use sprite::Sprite;
pub use texture::{DeferredLoader, GfxError, ScaleQuality, Texture, TextureCache, TextureHandle, TextureLoader};
pub use tilemap::TileMap;

//=== Geometry ============================================================

/// Integer rectangle in texture space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Floating-point rectangle in logical screen space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

/// Mirroring applied when drawing a texture region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
}

//=== Color ===============================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgba(0, 0, 0, 0xFF);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpacks `0xRRGGBBAA`.
    pub const fn from_packed(rgba: u32) -> Self {
        Self {
            r: (rgba >> 24) as u8,
            g: (rgba >> 16) as u8,
            b: (rgba >> 8) as u8,
            a: rgba as u8,
        }
    }

    /// Same colour with alpha scaled by `factor` (clamped to 0..=1).
    pub fn scale_alpha(self, factor: f64) -> Self {
        let alpha = (f64::from(self.a) * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a: alpha, ..self }
    }
}

//=== RenderTarget ========================================================

/// Sink for draw requests.
///
/// Modulation values are normalised: alpha in `0..=1`, colour channels
/// in `0..=1`.
pub trait RenderTarget {
    /// Draws `src` of `texture` (or all of it) into `dst`.
    fn draw_texture(&mut self, texture: TextureHandle, src: Option<Rect>, dst: FRect, flip: Flip);

    fn set_alpha_mod(&mut self, texture: TextureHandle, alpha: f64);

    fn set_color_mod(&mut self, texture: TextureHandle, r: f64, g: f64, b: f64);

    fn fill_rect(&mut self, dst: FRect, color: Color);
}

//=== DrawCommand =========================================================

/// One recorded [`RenderTarget`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Texture {
        texture: TextureHandle,
        src: Option<Rect>,
        dst: FRect,
        flip: Flip,
    },
    AlphaMod {
        texture: TextureHandle,
        alpha: f64,
    },
    ColorMod {
        texture: TextureHandle,
        r: f64,
        g: f64,
        b: f64,
    },
    Fill {
        dst: FRect,
        color: Color,
    },
}

//=== CommandBuffer =======================================================

/// Render target that records commands for a presenter to replay.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Takes the recorded frame, leaving the buffer empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl RenderTarget for CommandBuffer {
    fn draw_texture(&mut self, texture: TextureHandle, src: Option<Rect>, dst: FRect, flip: Flip) {
        self.commands.push(DrawCommand::Texture { texture, src, dst, flip });
    }

    fn set_alpha_mod(&mut self, texture: TextureHandle, alpha: f64) {
        self.commands.push(DrawCommand::AlphaMod { texture, alpha });
    }

    fn set_color_mod(&mut self, texture: TextureHandle, r: f64, g: f64, b: f64) {
        self.commands.push(DrawCommand::ColorMod { texture, r, g, b });
    }

    fn fill_rect(&mut self, dst: FRect, color: Color) {
        self.commands.push(DrawCommand::Fill { dst, color });
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
