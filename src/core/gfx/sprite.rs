//=========================================================================
// Sprite
//=========================================================================
//
// A texture region with optional named animations and per-sprite
// modulation.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::warn;

//=== Internal Dependencies ===============================================

use super::{Animation, FRect, Flip, Rect, RenderTarget, Texture};

//=== Sprite ==============================================================

#[derive(Debug, Clone)]
pub struct Sprite {
    texture: Texture,
    crop: Rect,
    animations: HashMap<String, Animation>,
    current: Option<String>,
    alpha: f64,
    tint: (f64, f64, f64),
}

impl Sprite {
    /// Sprite showing the whole of `texture`.
    pub fn new(texture: Texture) -> Self {
        let mut sprite = Self {
            texture,
            crop: Rect::default(),
            animations: HashMap::new(),
            current: None,
            alpha: 1.0,
            tint: (1.0, 1.0, 1.0),
        };
        sprite.crop(0, 0, texture.width as i32, texture.height as i32);
        sprite
    }

    /// Shows a fixed region and stops any animation.
    pub fn crop(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.crop = Rect::new(x, y, width, height);
        self.current = None;
    }

    //--- Animations -------------------------------------------------------

    /// # Panics
    ///
    /// Panics if `name` is already registered.
    pub fn register_animation(&mut self, name: &str, animation: Animation) {
        if self.animations.contains_key(name) {
            panic!("duplicate animation registration for {:?}", name);
        }
        self.animations.insert(name.to_owned(), animation);
    }

    /// Plays `name` from its first frame, unless it is already playing.
    pub fn set_animation(&mut self, name: &str) {
        let Some(animation) = self.animations.get_mut(name) else {
            warn!("Attempted to set unknown animation {:?}", name);
            return;
        };

        if self.current.as_deref() == Some(name) {
            return;
        }

        animation.reset();
        self.current = Some(name.to_owned());
    }

    pub fn current_animation(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn update(&mut self, delta: f64) {
        if let Some(animation) = self.active_mut() {
            animation.update(delta);
        }
    }

    //--- Modulation -------------------------------------------------------

    pub fn set_alpha_mod(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn set_color_mod(&mut self, r: f64, g: f64, b: f64) {
        self.tint = (r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0));
    }

    pub fn alpha_mod(&self) -> f64 {
        self.alpha
    }

    pub fn color_mod(&self) -> (f64, f64, f64) {
        self.tint
    }

    //--- Drawing ----------------------------------------------------------

    /// Draws the current frame (or the crop) with its top-left at `(x, y)`.
    pub fn draw(&self, target: &mut dyn RenderTarget, x: f64, y: f64) {
        let (src, flip) = match self.active().and_then(Animation::frame) {
            Some(frame) => (frame.src, frame.flip),
            None => (self.crop, Flip::None),
        };

        let handle = self.texture.handle;
        let (r, g, b) = self.tint;
        target.set_alpha_mod(handle, self.alpha);
        target.set_color_mod(handle, r, g, b);
        target.draw_texture(
            handle,
            Some(src),
            FRect::new(x, y, f64::from(src.width), f64::from(src.height)),
            flip,
        );
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    //--- Internal Helpers -------------------------------------------------

    fn active(&self) -> Option<&Animation> {
        self.current.as_deref().and_then(|name| self.animations.get(name))
    }

    fn active_mut(&mut self) -> Option<&mut Animation> {
        let name = self.current.as_deref()?;
        self.animations.get_mut(name)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
