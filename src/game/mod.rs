//=========================================================================
// Game Content
//=========================================================================
//
// The overworld demo: a hero and a wandering NPC, with fade-in and
// pause screens stacked over the overworld.
//
// Modules:
// - `entity`: actors, their bodies and the walker sprite sheet
// - `actor_states`: idle/move behaviour for hero and NPC
// - `screens`: fade, explore and pause
//
//=========================================================================

//=== Module Declarations =================================================

pub mod actor_states;
pub mod entity;
pub mod screens;

//=== Public API ==========================================================

pub use entity::{walker_sprite, Actor, ActorData, ActorMessage, Body, Controls};
pub use screens::{Explore, Fade, GameEvent, GameEventKind, Pause, ScreenMessage, CANVAS_HEIGHT, CANVAS_WIDTH};

//=== External Dependencies ===============================================

use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

//=== Internal Dependencies ===============================================

use crate::core::gfx::{FRect, Sprite, Texture, TileMap};
use crate::core::state::Fsm;
use crate::core::FrameContext;

//=== Constants ===========================================================

/// Window pixels per canvas pixel.
pub const PIXEL_SCALE: u32 = 4;

const TILE_SIZE: u32 = 16;
const NPC_START: DVec2 = DVec2::new(75.0, 75.0);

//=== Setup ===============================================================

/// Textures the demo draws with.
#[derive(Debug, Clone, Copy)]
pub struct Assets {
    pub walker: Texture,
    pub ground: Texture,
}

/// Registers the screens and enters the overworld.
///
/// `seed` drives NPC wandering.
pub fn setup(fsm: &mut Fsm<FrameContext, ScreenMessage>, assets: Assets, seed: u64) {
    let hero = Actor::hero(walker_sprite(assets.walker), DVec2::ZERO);
    let npc = Actor::npc(walker_sprite(assets.walker), NPC_START, StdRng::seed_from_u64(seed));

    let canvas = FRect::new(0.0, 0.0, f64::from(CANVAS_WIDTH), f64::from(CANVAS_HEIGHT));

    fsm.register_state("fade", Fade::new(canvas));
    fsm.register_state("explore", Explore::new(vec![hero, npc]).with_ground(ground(assets.ground)));
    fsm.register_state("pause", Pause::new(PIXEL_SCALE as i32));
    fsm.switch("explore", ScreenMessage::Empty);
}

/// Canvas-filling grid of the first ground tile.
fn ground(texture: Texture) -> TileMap {
    let mut map = TileMap::new(TILE_SIZE, TILE_SIZE);
    let columns = (CANVAS_WIDTH as u32).div_ceil(TILE_SIZE) as usize;
    let rows = (CANVAS_HEIGHT as u32).div_ceil(TILE_SIZE) as usize;

    for y in 0..rows {
        for x in 0..columns {
            let mut tile = Sprite::new(texture);
            tile.crop(0, 0, TILE_SIZE as i32, TILE_SIZE as i32);
            map.set_tile(x, y, tile);
        }
    }
    map
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gfx::{CommandBuffer, DrawCommand, TextureHandle};
    use crate::core::input::BindingMap;

    fn assets() -> Assets {
        Assets {
            walker: Texture {
                handle: TextureHandle(0),
                width: 420,
                height: 150,
            },
            ground: Texture {
                handle: TextureHandle(1),
                width: 64,
                height: 64,
            },
        }
    }

    #[test]
    fn setup_enters_explore_under_fade() {
        let mut fsm = Fsm::new(FrameContext::new(&BindingMap::builtin()));
        setup(&mut fsm, assets(), 0);

        assert_eq!(fsm.stack_names().collect::<Vec<_>>(), vec!["explore", "fade"]);
        assert!(fsm.is_registered("pause"));
    }

    #[test]
    fn ground_covers_canvas() {
        let map = ground(assets().ground);
        assert_eq!(map.size(), (13, 10));

        let mut buffer = CommandBuffer::new();
        map.draw(&mut buffer);
        let tiles = buffer
            .commands()
            .iter()
            .filter(|command| matches!(command, DrawCommand::Texture { .. }))
            .count();
        assert_eq!(tiles, 130);
    }
}
