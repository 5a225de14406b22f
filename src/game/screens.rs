//=========================================================================
// Screens
//=========================================================================
//
// Top-level game states, stacked on the engine's game Fsm.
//
//   explore ─enter─> push fade        (fade pops itself after 2 s)
//   explore ─pause─> push pause       (pause pops itself once slid out)
//
// Screens draw in logical canvas pixels; the presenter scales the canvas
// to the window.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use log::{info, trace};

//=== Internal Dependencies ===============================================

use super::entity::Actor;
use crate::core::ease::{bounce_out, linear, Tween};
use crate::core::event::{Broker, Event};
use crate::core::gfx::{Color, FRect, RenderTarget, TileMap};
use crate::core::imgui::{Gui, Pointer, WidgetKind};
use crate::core::state::{Controller, State};
use crate::core::timer::Timer;
use crate::core::FrameContext;

//=== Constants ===========================================================

pub const CANVAS_WIDTH: i32 = 200;
pub const CANVAS_HEIGHT: i32 = 150;

const ENTITY_ALPHA_PAUSED: f64 = 0.5;
const ENTITY_TINT_PAUSED: (f64, f64, f64) = (0.9, 0.3, 0.45);

const PANEL_WIDTH: f64 = 100.0;
const PANEL_HEIGHT: f64 = 150.0;
const PANEL_COLOR: Color = Color::rgba(155, 175, 198, 150);
const RESUME_BUTTON: (i32, i32, i32, i32) = (10, 118, 80, 20);

//=== ScreenMessage =======================================================

/// Payload of a screen transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScreenMessage {
    Empty,

    /// Colour the fade starts from.
    FadeIn(Color),
}

type ScreenHook = Tween<Controller<ScreenMessage>>;

//=== GameEvent ===========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Tick { count: u32 },
    Boom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEventKind {
    Tick,
    Boom,
}

impl Event for GameEvent {
    type Kind = GameEventKind;

    fn kind(&self) -> GameEventKind {
        match self {
            Self::Tick { .. } => GameEventKind::Tick,
            Self::Boom => GameEventKind::Boom,
        }
    }
}

//=== Fade ================================================================

/// Full-canvas colour fading from opaque to clear.
pub struct Fade {
    tween: ScreenHook,
    area: FRect,
    color: Color,
}

impl Fade {
    pub fn new(area: FRect) -> Self {
        let mut tween = Tween::new(1.0, 0.0, Duration::from_secs(2), Some(linear));
        tween.on_finished(|_, ctl: &mut Controller<ScreenMessage>| ctl.pop());

        Self {
            tween,
            area,
            color: Color::BLACK,
        }
    }
}

impl State<FrameContext, ScreenMessage> for Fade {
    fn enter(&mut self, _ctl: &mut Controller<ScreenMessage>, _ctx: &mut FrameContext, message: ScreenMessage) {
        self.color = match message {
            ScreenMessage::FadeIn(color) => color,
            ScreenMessage::Empty => Color::BLACK,
        };
        self.tween.reset();
    }

    fn update(&mut self, ctl: &mut Controller<ScreenMessage>, ctx: &mut FrameContext) {
        self.tween.update(ctx.delta, ctl);
    }

    fn render(&mut self, _ctx: &FrameContext, target: &mut dyn RenderTarget) {
        target.fill_rect(self.area, self.color.scale_alpha(self.tween.value()));
    }
}

//=== Explore =============================================================

/// The overworld: actors walking on an optional tile map.
pub struct Explore {
    actors: Vec<Actor>,
    ground: Option<TileMap>,
    timer: Timer,
    events: Rc<RefCell<Broker<GameEvent>>>,
}

impl Explore {
    pub fn new(actors: Vec<Actor>) -> Self {
        let mut broker = Broker::new();
        broker.listen(GameEventKind::Tick, |event: &GameEvent| {
            if let GameEvent::Tick { count } = event {
                info!("Tick {}...", count);
            }
        });
        broker.listen(GameEventKind::Boom, |_: &GameEvent| info!("Boom!"));

        Self {
            actors,
            ground: None,
            timer: Timer::new(),
            events: Rc::new(RefCell::new(broker)),
        }
    }

    pub fn with_ground(mut self, ground: TileMap) -> Self {
        self.ground = Some(ground);
        self
    }

    /// Broker the screen's timed events go through.
    pub fn events(&self) -> Rc<RefCell<Broker<GameEvent>>> {
        Rc::clone(&self.events)
    }

    fn tint_actors(&mut self, alpha: f64, (r, g, b): (f64, f64, f64)) {
        for actor in &mut self.actors {
            let sprite = &mut actor.body_mut().sprite;
            sprite.set_alpha_mod(alpha);
            sprite.set_color_mod(r, g, b);
        }
    }
}

impl State<FrameContext, ScreenMessage> for Explore {
    fn init(&mut self, _ctl: &mut Controller<ScreenMessage>, _ctx: &mut FrameContext) {
        let events = Rc::clone(&self.events);
        let mut count = 0;
        self.timer.every(Duration::from_secs(1), 4, move || {
            count += 1;
            events.borrow_mut().queue(GameEvent::Tick { count });
        });

        let events = Rc::clone(&self.events);
        self.timer.after(Duration::from_secs(5), move || {
            events.borrow_mut().queue(GameEvent::Boom);
        });
    }

    fn enter(&mut self, ctl: &mut Controller<ScreenMessage>, _ctx: &mut FrameContext, _message: ScreenMessage) {
        ctl.push("fade", ScreenMessage::FadeIn(Color::BLACK));
    }

    fn resume(&mut self, _ctl: &mut Controller<ScreenMessage>, _ctx: &mut FrameContext) {
        self.tint_actors(1.0, (1.0, 1.0, 1.0));
    }

    fn input(&mut self, ctl: &mut Controller<ScreenMessage>, ctx: &mut FrameContext) {
        let right = ctx.device.get("right");
        if right.is_down {
            trace!("Right held for {:?}", right.down_duration);
        }

        if ctx.device.get("pause").is_pressed {
            self.tint_actors(ENTITY_ALPHA_PAUSED, ENTITY_TINT_PAUSED);
            ctl.push("pause", ScreenMessage::Empty);
        }

        for actor in &mut self.actors {
            actor.input(&ctx.device);
        }
    }

    fn update(&mut self, _ctl: &mut Controller<ScreenMessage>, ctx: &mut FrameContext) {
        self.timer.update(ctx.delta);
        self.events.borrow_mut().process();

        for actor in &mut self.actors {
            actor.update(ctx.delta);
        }
    }

    fn render(&mut self, _ctx: &FrameContext, target: &mut dyn RenderTarget) {
        if let Some(ground) = &self.ground {
            ground.draw(target);
        }

        self.actors
            .sort_by(|a, b| a.body().position.y.total_cmp(&b.body().position.y));
        for actor in &mut self.actors {
            actor.render(target);
        }
    }
}

//=== Pause ===============================================================

/// Side panel that bounces in and slides back out.
pub struct Pause {
    tween: ScreenHook,
    gui: Gui,
    pixel_scale: i32,
    panel: FRect,
}

impl Pause {
    /// `pixel_scale` converts window pointer coordinates to canvas pixels.
    pub fn new(pixel_scale: i32) -> Self {
        let mut tween = Tween::new(-PANEL_WIDTH, 0.0, Duration::from_secs(1), Some(bounce_out));
        tween.on_finished(|tween, ctl: &mut Controller<ScreenMessage>| {
            if tween.is_backward() {
                ctl.pop();
            }
        });

        Self {
            tween,
            gui: Gui::new(),
            pixel_scale: pixel_scale.max(1),
            panel: FRect::new(-PANEL_WIDTH, 0.0, PANEL_WIDTH, PANEL_HEIGHT),
        }
    }

    /// Lays out the panel; true when resume was clicked.
    fn run_gui(&mut self, pointer: Pointer) -> bool {
        self.gui.set_pointer(Pointer {
            x: pointer.x / self.pixel_scale,
            y: pointer.y / self.pixel_scale,
            is_down: pointer.is_down,
        });

        self.gui.begin_ui(0, 0, CANVAS_WIDTH, CANVAS_HEIGHT);
        self.gui.begin_container(
            self.panel.x.round() as i32,
            self.panel.y as i32,
            PANEL_WIDTH as i32,
            PANEL_HEIGHT as i32,
            (0, 0),
        );
        self.gui.panel(0, 0, PANEL_WIDTH as i32, PANEL_HEIGHT as i32);

        let (x, y, width, height) = RESUME_BUTTON;
        self.gui.draw_data("resume");
        let clicked = self.gui.button(x, y, width, height);

        self.gui.end_container();
        self.gui.end_ui();
        clicked
    }
}

impl State<FrameContext, ScreenMessage> for Pause {
    fn enter(&mut self, _ctl: &mut Controller<ScreenMessage>, _ctx: &mut FrameContext, _message: ScreenMessage) {
        self.tween.reset();
        self.panel.x = self.tween.from();
    }

    fn input(&mut self, _ctl: &mut Controller<ScreenMessage>, ctx: &mut FrameContext) {
        if ctx.device.get("pause").is_pressed {
            self.tween.invert_or_reverse();
        }
    }

    fn update(&mut self, ctl: &mut Controller<ScreenMessage>, ctx: &mut FrameContext) {
        if self.run_gui(ctx.pointer) {
            self.tween.invert_or_reverse();
        }

        self.tween.update(ctx.delta, ctl);
        self.panel.x = self.tween.value();
    }

    fn render(&mut self, _ctx: &FrameContext, target: &mut dyn RenderTarget) {
        target.fill_rect(self.panel, PANEL_COLOR);

        for command in self.gui.commands().filter(|c| c.kind == WidgetKind::Button) {
            let color = match (command.flags.active, command.flags.hot) {
                (true, _) => Color::rgba(60, 80, 110, 230),
                (false, true) => Color::rgba(120, 140, 170, 230),
                _ => Color::rgba(90, 110, 140, 220),
            };
            let clip = command.clip;
            target.fill_rect(
                FRect::new(
                    f64::from(clip.x),
                    f64::from(clip.y),
                    f64::from(clip.width),
                    f64::from(clip.height),
                ),
                color,
            );
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gfx::{CommandBuffer, DrawCommand, Texture, TextureHandle};
    use crate::core::input::{BindingMap, InputEvent, KeyCode, StateTracker};
    use crate::core::state::Fsm;
    use crate::game::entity::walker_sprite;
    use glam::DVec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;
    use std::time::Instant;

    fn sheet() -> Texture {
        Texture {
            handle: TextureHandle(1),
            width: 420,
            height: 150,
        }
    }

    fn canvas() -> FRect {
        FRect::new(0.0, 0.0, f64::from(CANVAS_WIDTH), f64::from(CANVAS_HEIGHT))
    }

    /// Game machine plus the tracker that feeds it.
    struct Harness {
        fsm: Fsm<FrameContext, ScreenMessage>,
        tracker: StateTracker,
        now: Instant,
    }

    impl Harness {
        fn new(explore: Explore) -> Self {
            let mut bindings = BindingMap::default();
            bindings.bind("pause", &["keyboard:escape"]);

            let mut fsm = Fsm::new(FrameContext::new(&bindings));
            fsm.register_state("fade", Fade::new(canvas()));
            fsm.register_state("explore", explore);
            fsm.register_state("pause", Pause::new(1));
            fsm.switch("explore", ScreenMessage::Empty);

            Self {
                fsm,
                tracker: StateTracker::new(),
                now: Instant::now(),
            }
        }

        fn frame(&mut self, delta: f64, events: &[InputEvent]) {
            self.tracker.clear();
            self.tracker.process_events(events);
            self.tracker.finalize_frame();

            self.now += Duration::from_secs_f64(delta);
            let now = self.now;
            self.fsm.data_mut().refresh(&self.tracker, now, delta);
            self.fsm.input();
            self.fsm.update();
        }

        fn render(&mut self) -> Vec<DrawCommand> {
            let mut buffer = CommandBuffer::new();
            self.fsm.render(&mut buffer);
            buffer.take()
        }

        fn stack(&self) -> Vec<&str> {
            self.fsm.stack_names().collect()
        }
    }

    fn escape_down() -> InputEvent {
        InputEvent::KeyDown { key: KeyCode::Escape }
    }

    fn escape_up() -> InputEvent {
        InputEvent::KeyUp { key: KeyCode::Escape }
    }

    fn color_mods(commands: &[DrawCommand]) -> Vec<(f64, f64, f64)> {
        commands
            .iter()
            .filter_map(|command| match *command {
                DrawCommand::ColorMod { r, g, b, .. } => Some((r, g, b)),
                _ => None,
            })
            .collect()
    }

    fn explore() -> Explore {
        let hero = Actor::hero(walker_sprite(sheet()), DVec2::new(0.0, 50.0));
        let npc = Actor::npc(walker_sprite(sheet()), DVec2::new(75.0, 10.0), StdRng::seed_from_u64(5));
        Explore::new(vec![hero, npc])
    }

    //=====================================================================
    // Fade
    //=====================================================================

    #[test]
    fn explore_enters_under_a_fade() {
        let harness = Harness::new(explore());
        assert_eq!(harness.stack(), vec!["explore", "fade"]);
    }

    #[test]
    fn fade_goes_from_opaque_to_clear_then_pops() {
        let mut harness = Harness::new(explore());

        let fill = |commands: &[DrawCommand]| {
            commands.iter().find_map(|command| match command {
                DrawCommand::Fill { color, .. } => Some(*color),
                _ => None,
            })
        };

        assert_eq!(fill(&harness.render()).map(|c| c.a), Some(255));

        harness.frame(1.0, &[]);
        assert_eq!(fill(&harness.render()).map(|c| c.a), Some(128));

        harness.frame(1.0, &[]);
        assert_eq!(harness.fsm.current(), Some("explore"));
        assert!(fill(&harness.render()).is_none(), "fade is gone from the stack");
    }

    //=====================================================================
    // Explore
    //=====================================================================

    #[test]
    fn explore_renders_actors_by_depth() {
        let mut harness = Harness::new(explore());
        harness.frame(2.0, &[]);

        let ys: Vec<f64> = harness
            .render()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Texture { dst, .. } => Some(dst.y),
                _ => None,
            })
            .collect();

        assert_eq!(ys.len(), 2);
        assert!(ys[0] <= ys[1], "actors should be drawn top to bottom, got {:?}", ys);
    }

    #[test]
    fn timer_events_reach_broker() {
        let explore = explore();
        let events = explore.events();
        let ticks = Rc::new(Cell::new(0));
        let booms = Rc::new(Cell::new(0));
        {
            let ticks = Rc::clone(&ticks);
            events.borrow_mut().listen(GameEventKind::Tick, move |_| ticks.set(ticks.get() + 1));
            let booms = Rc::clone(&booms);
            events.borrow_mut().listen(GameEventKind::Boom, move |_| booms.set(booms.get() + 1));
        }

        let mut harness = Harness::new(explore);
        harness.frame(2.0, &[]);
        for _ in 0..12 {
            harness.frame(0.5, &[]);
        }

        assert_eq!(ticks.get(), 4, "ticks are limited to four");
        assert_eq!(booms.get(), 1);
    }

    #[test]
    fn timer_is_frozen_while_fade_is_on_top() {
        let explore = explore();
        let events = explore.events();
        let ticks = Rc::new(Cell::new(0));
        {
            let ticks = Rc::clone(&ticks);
            events.borrow_mut().listen(GameEventKind::Tick, move |_| ticks.set(ticks.get() + 1));
        }

        let mut harness = Harness::new(explore);
        harness.frame(1.5, &[]);

        assert_eq!(ticks.get(), 0, "only the top state updates");
    }

    //=====================================================================
    // Pause
    //=====================================================================

    #[test]
    fn pause_tints_pushes_and_restores() {
        let mut harness = Harness::new(explore());
        harness.frame(2.0, &[]);

        harness.frame(0.016, &[escape_down()]);
        assert_eq!(harness.fsm.current(), Some("pause"));
        assert!(color_mods(&harness.render()).iter().all(|&mods| mods == ENTITY_TINT_PAUSED));

        harness.frame(1.0, &[escape_up()]);
        harness.frame(0.016, &[escape_down()]);
        assert_eq!(harness.fsm.current(), Some("pause"), "sliding out first");

        harness.frame(1.0, &[escape_up()]);
        assert_eq!(harness.fsm.current(), Some("explore"));
        assert!(color_mods(&harness.render()).iter().all(|&mods| mods == (1.0, 1.0, 1.0)));
    }

    #[test]
    fn pause_panel_bounces_in_from_the_left() {
        let mut pause = Pause::new(1);
        let mut ctl = Controller::new();
        let mut ctx = FrameContext::new(&BindingMap::default());

        pause.enter(&mut ctl, &mut ctx, ScreenMessage::Empty);
        assert_eq!(pause.panel.x, -PANEL_WIDTH);

        ctx.delta = 1.0;
        pause.update(&mut ctl, &mut ctx);
        assert!(pause.panel.x.abs() < 1e-9, "panel at {}", pause.panel.x);
        assert!(!ctl.has_pending(), "finishing forward does not pop");
    }

    #[test]
    fn resume_button_click_slides_panel_out() {
        let mut pause = Pause::new(1);
        let mut ctl = Controller::new();
        let mut ctx = FrameContext::new(&BindingMap::default());
        pause.enter(&mut ctl, &mut ctx, ScreenMessage::Empty);
        ctx.delta = 1.0;
        pause.update(&mut ctl, &mut ctx);

        let (x, y, _, _) = RESUME_BUTTON;
        let over = |is_down| Pointer { x: x + 5, y: y + 5, is_down };
        ctx.delta = 0.0;

        ctx.pointer = over(false);
        pause.update(&mut ctl, &mut ctx);
        ctx.pointer = over(true);
        pause.update(&mut ctl, &mut ctx);
        ctx.pointer = over(false);
        pause.update(&mut ctl, &mut ctx);

        assert!(pause.tween.is_backward(), "click should turn the panel around");

        ctx.delta = 1.0;
        pause.update(&mut ctl, &mut ctx);
        assert!((pause.panel.x + PANEL_WIDTH).abs() < 1e-9, "panel at {}", pause.panel.x);
        assert!(ctl.has_pending(), "finishing backward requests a pop");
    }
}
