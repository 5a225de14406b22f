//=========================================================================
// Entities
//=========================================================================
//
// Actors walking around the overworld.
//
// Architecture:
//   Actor
//     └─ Fsm<ActorData, ActorMessage>
//          ├─ data: ActorData { body, controls, delta }
//          └─ states: idle + move (hero) or idle + stroll (NPC)
//
// The owning screen copies the frame's directional buttons into
// `controls` before input and the frame delta before update.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::DVec2;
use rand::rngs::StdRng;

//=== Internal Dependencies ===============================================

use super::actor_states::{HeroIdle, HeroMove, NpcIdle, NpcStroll};
use crate::core::gfx::{Animation, Flip, RenderTarget, Sprite, Texture};
use crate::core::input::{Button, Device};
use crate::core::state::Fsm;

//=== Sprite Sheet ========================================================

/// Cell pitch of the walker sheet.
const CELL: i32 = 30;
const FRAME_WIDTH: i32 = 22;
const FRAME_HEIGHT: i32 = 24;
const WALK_FPS: f64 = 24.0;

fn strip(columns: std::ops::Range<i32>, row: i32) -> Animation {
    let mut animation = Animation::new();
    for column in columns {
        animation.add_frame(CELL * column, CELL * row, FRAME_WIDTH, FRAME_HEIGHT, Flip::None);
    }
    animation.set_fps(WALK_FPS);
    animation
}

/// Sprite with the five walker clips registered, showing "idle".
pub fn walker_sprite(sheet: Texture) -> Sprite {
    let mut sprite = Sprite::new(sheet);

    sprite.register_animation("walk:down", strip(0..8, 1));
    sprite.register_animation("walk:up", strip(0..8, 4));
    sprite.register_animation("walk:left", strip(8..14, 1));
    sprite.register_animation("walk:right", strip(8..14, 4));
    sprite.register_animation("idle", strip(1..2, 0));
    sprite.set_animation("idle");

    sprite
}

//=== Body ================================================================

/// Where an actor is and what it looks like.
#[derive(Debug, Clone)]
pub struct Body {
    pub position: DVec2,
    pub sprite: Sprite,
}

impl Body {
    pub fn draw(&self, target: &mut dyn RenderTarget) {
        self.sprite.draw(target, self.position.x, self.position.y);
    }
}

//=== Controls ============================================================

/// Directional buttons for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    pub up: Button,
    pub down: Button,
    pub left: Button,
    pub right: Button,
}

impl Controls {
    pub fn read(device: &Device) -> Self {
        Self {
            up: *device.get("up"),
            down: *device.get("down"),
            left: *device.get("left"),
            right: *device.get("right"),
        }
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            up: Button::RELEASED,
            down: Button::RELEASED,
            left: Button::RELEASED,
            right: Button::RELEASED,
        }
    }
}

//=== ActorData ===========================================================

/// Context shared by an actor's states.
#[derive(Debug, Clone)]
pub struct ActorData {
    pub body: Body,
    pub controls: Controls,
    pub delta: f64,
}

//=== ActorMessage ========================================================

/// Payload of an actor state transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActorMessage {
    Stop,

    /// Direction to walk in; need not be normalized.
    Walk(DVec2),
}

//=== Actor ===============================================================

pub struct Actor {
    fsm: Fsm<ActorData, ActorMessage>,
}

impl Actor {
    /// Player-controlled actor.
    pub fn hero(sprite: Sprite, position: DVec2) -> Self {
        let mut fsm = Self::machine(sprite, position);
        fsm.register_state("idle", HeroIdle);
        fsm.register_state("move", HeroMove::default());
        fsm.switch("idle", ActorMessage::Stop);
        Self { fsm }
    }

    /// Wanders on its own, drawing directions from `rng`.
    pub fn npc(sprite: Sprite, position: DVec2, rng: StdRng) -> Self {
        let mut fsm = Self::machine(sprite, position);
        fsm.register_state("idle", NpcIdle::new(rng));
        fsm.register_state("stroll", NpcStroll::default());
        fsm.switch("idle", ActorMessage::Stop);
        Self { fsm }
    }

    fn machine(sprite: Sprite, position: DVec2) -> Fsm<ActorData, ActorMessage> {
        Fsm::new(ActorData {
            body: Body { position, sprite },
            controls: Controls::default(),
            delta: 0.0,
        })
    }

    //--- Frame Dispatch ---------------------------------------------------

    pub fn input(&mut self, device: &Device) {
        self.fsm.data_mut().controls = Controls::read(device);
        self.fsm.input();
    }

    pub fn update(&mut self, delta: f64) {
        self.fsm.data_mut().delta = delta;
        self.fsm.update();
        self.fsm.data_mut().body.sprite.update(delta);
    }

    pub fn render(&mut self, target: &mut dyn RenderTarget) {
        self.fsm.render(target);
    }

    //--- Accessors --------------------------------------------------------

    pub fn body(&self) -> &Body {
        &self.fsm.data().body
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.fsm.data_mut().body
    }

    /// Name of the active behaviour.
    pub fn state(&self) -> Option<&str> {
        self.fsm.current()
    }
}

impl std::fmt::Debug for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actor")
            .field("state", &self.state())
            .field("position", &self.body().position)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gfx::{CommandBuffer, DrawCommand, TextureHandle};
    use rand::SeedableRng;

    fn sheet() -> Texture {
        Texture {
            handle: TextureHandle(0),
            width: 420,
            height: 150,
        }
    }

    #[test]
    fn walker_sprite_starts_idle() {
        let sprite = walker_sprite(sheet());
        assert_eq!(sprite.current_animation(), Some("idle"));
    }

    #[test]
    fn actors_start_in_idle() {
        let hero = Actor::hero(walker_sprite(sheet()), DVec2::ZERO);
        let npc = Actor::npc(walker_sprite(sheet()), DVec2::new(75.0, 75.0), StdRng::seed_from_u64(1));

        assert_eq!(hero.state(), Some("idle"));
        assert_eq!(npc.state(), Some("idle"));
        assert_eq!(npc.body().position, DVec2::new(75.0, 75.0));
    }

    #[test]
    fn render_draws_sprite_at_position() {
        let mut hero = Actor::hero(walker_sprite(sheet()), DVec2::new(10.0, 20.0));
        let mut buffer = CommandBuffer::new();

        hero.render(&mut buffer);

        let drawn = buffer.commands().iter().find_map(|command| match command {
            DrawCommand::Texture { dst, .. } => Some(*dst),
            _ => None,
        });
        let dst = drawn.expect("hero should draw a texture");
        assert_eq!((dst.x, dst.y, dst.width, dst.height), (10.0, 20.0, 22.0, 24.0));
    }
}
