//=========================================================================
// Actor States
//=========================================================================
//
// Idle and walking behaviour shared by every actor, specialised for the
// player (reads controls in `input`) and for NPCs (self-timed in
// `update`).
//
//   hero: idle ⇄ move        (directional buttons)
//   npc:  idle ─2 s─> stroll ─0.5 s─> idle
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::DVec2;
use log::trace;
use rand::rngs::StdRng;
use rand::Rng;

//=== Internal Dependencies ===============================================

use super::entity::{ActorData, ActorMessage, Body, Controls};
use crate::core::gfx::RenderTarget;
use crate::core::state::{Controller, State};

//=== Constants ===========================================================

/// Walking speed in logical pixels per second.
pub const WALK_SPEED: f64 = 70.0;

const NPC_IDLE_SECONDS: f64 = 2.0;
const NPC_STROLL_SECONDS: f64 = 0.5;

//=== Shared Behaviour ====================================================

/// Clip for walking in `direction`; vertical movement takes precedence.
pub fn walk_animation(direction: DVec2) -> &'static str {
    if direction.y < 0.0 {
        "walk:up"
    } else if direction.y > 0.0 {
        "walk:down"
    } else if direction.x < 0.0 {
        "walk:left"
    } else if direction.x > 0.0 {
        "walk:right"
    } else {
        "idle"
    }
}

fn enter_idle(body: &mut Body) {
    body.sprite.set_animation("idle");
}

/// Current walking direction, always unit length or zero.
#[derive(Debug, Clone, Copy, Default)]
struct Walk {
    direction: DVec2,
}

impl Walk {
    fn enter(&mut self, message: ActorMessage) {
        self.direction = match message {
            ActorMessage::Walk(direction) => direction.normalize_or_zero(),
            ActorMessage::Stop => DVec2::ZERO,
        };
    }

    fn step(&self, body: &mut Body, delta: f64) {
        body.sprite.set_animation(walk_animation(self.direction));
        body.position += WALK_SPEED * delta * self.direction;
    }
}

/// Opposing buttons cancel; `right` contributes its analog value.
fn steer(controls: &Controls) -> DVec2 {
    let y = match (controls.up.is_down, controls.down.is_down) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    };
    let x = match (controls.left.is_down, controls.right.is_down) {
        (true, false) => -1.0,
        (false, true) => controls.right.value,
        _ => 0.0,
    };
    DVec2::new(x, y)
}

//=== Hero ================================================================

#[derive(Debug, Default)]
pub struct HeroIdle;

impl State<ActorData, ActorMessage> for HeroIdle {
    fn enter(&mut self, _ctl: &mut Controller<ActorMessage>, data: &mut ActorData, _message: ActorMessage) {
        enter_idle(&mut data.body);
    }

    fn input(&mut self, ctl: &mut Controller<ActorMessage>, data: &mut ActorData) {
        if steer(&data.controls) != DVec2::ZERO {
            ctl.switch("move", ActorMessage::Walk(DVec2::ZERO));
        }
    }

    fn render(&mut self, data: &ActorData, target: &mut dyn RenderTarget) {
        data.body.draw(target);
    }
}

#[derive(Debug, Default)]
pub struct HeroMove {
    walk: Walk,
}

impl State<ActorData, ActorMessage> for HeroMove {
    fn enter(&mut self, _ctl: &mut Controller<ActorMessage>, _data: &mut ActorData, message: ActorMessage) {
        self.walk.enter(message);
    }

    fn input(&mut self, ctl: &mut Controller<ActorMessage>, data: &mut ActorData) {
        let controls = &data.controls;
        let all_down = controls.up.is_down && controls.down.is_down && controls.left.is_down && controls.right.is_down;
        let none_down = !controls.up.is_down && !controls.down.is_down && !controls.left.is_down && !controls.right.is_down;

        if all_down || none_down {
            ctl.switch("idle", ActorMessage::Stop);
            return;
        }

        self.walk.enter(ActorMessage::Walk(steer(controls)));
    }

    fn update(&mut self, _ctl: &mut Controller<ActorMessage>, data: &mut ActorData) {
        self.walk.step(&mut data.body, data.delta);
    }

    fn render(&mut self, data: &ActorData, target: &mut dyn RenderTarget) {
        data.body.draw(target);
    }
}

//=== NPC =================================================================

pub struct NpcIdle {
    rng: StdRng,
    waited: f64,
}

impl NpcIdle {
    pub fn new(rng: StdRng) -> Self {
        Self { rng, waited: 0.0 }
    }

    /// Random non-zero direction with components in {-1, 0, 1}.
    fn pick_direction(&mut self) -> DVec2 {
        loop {
            let direction = DVec2::new(
                f64::from(self.rng.gen_range(-1i32..=1)),
                f64::from(self.rng.gen_range(-1i32..=1)),
            );
            if direction != DVec2::ZERO {
                return direction;
            }
        }
    }
}

impl State<ActorData, ActorMessage> for NpcIdle {
    fn enter(&mut self, _ctl: &mut Controller<ActorMessage>, data: &mut ActorData, _message: ActorMessage) {
        enter_idle(&mut data.body);
        self.waited = 0.0;
    }

    fn update(&mut self, ctl: &mut Controller<ActorMessage>, data: &mut ActorData) {
        self.waited += data.delta;

        if self.waited >= NPC_IDLE_SECONDS {
            let direction = self.pick_direction();
            trace!("NPC strolling toward {}", direction);
            ctl.switch("stroll", ActorMessage::Walk(direction));
        }
    }

    fn render(&mut self, data: &ActorData, target: &mut dyn RenderTarget) {
        data.body.draw(target);
    }
}

#[derive(Debug, Default)]
pub struct NpcStroll {
    walk: Walk,
    walked: f64,
}

impl State<ActorData, ActorMessage> for NpcStroll {
    fn enter(&mut self, _ctl: &mut Controller<ActorMessage>, _data: &mut ActorData, message: ActorMessage) {
        self.walk.enter(message);
        self.walked = 0.0;
    }

    fn update(&mut self, ctl: &mut Controller<ActorMessage>, data: &mut ActorData) {
        self.walked += data.delta;
        self.walk.step(&mut data.body, data.delta);

        if self.walked >= NPC_STROLL_SECONDS {
            ctl.switch("idle", ActorMessage::Stop);
        }
    }

    fn render(&mut self, data: &ActorData, target: &mut dyn RenderTarget) {
        data.body.draw(target);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
