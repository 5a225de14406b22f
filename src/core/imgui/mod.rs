//=========================================================================
// Immediate-Mode GUI
//=========================================================================
//
// Widgets are declared every frame; only the interaction state (which
// widget is hot, hovered, active) survives between frames.
//
// Frame protocol:
//   set_pointer() → begin_ui() → widgets / containers → end_ui() → draw
//
// Identity:
//   A widget's id is its allocation index within the frame, so the same
//   sequence of widget calls yields the same ids frame after frame. The
//   widget and command arenas are cleared (not freed) on begin_ui.
//
// Interaction slots:
//   warm   - widget under the pointer this frame, hot next frame
//   hot    - widget that was under the pointer last frame
//   active - widget that owns the current press gesture
//   hover  - hot while released, active while dragging
//   blur / focus - previous / new hot on the frame hot changed
//
//=========================================================================

//=== Module Declarations =================================================

mod button;
mod progress_bar;
mod scrollbar;

//=== Internal Dependencies ===============================================

use crate::core::gfx::Rect;

//=== Pointer =============================================================

/// Pointer state the GUI reads, in logical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pointer {
    pub x: i32,
    pub y: i32,
    pub is_down: bool,
}

//=== WidgetKind ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    RootContainer,
    Container,
    Button,
    ImageButton,
    Panel,
    HProgressBar,
    HProgressIndicator,
    VProgressBar,
    VProgressIndicator,
    HScrollbar,
    HScrollbarThumb,
    VScrollbar,
    VScrollbarThumb,
}

//=== WidgetFlags =========================================================

/// Interaction classification of a widget (or of the last widget call).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetFlags {
    pub hot: bool,
    pub hover: bool,
    pub active: bool,
    pub blur: bool,
    pub focus: bool,
}

impl WidgetFlags {
    fn union(self, other: Self) -> Self {
        Self {
            hot: self.hot || other.hot,
            hover: self.hover || other.hover,
            active: self.active || other.active,
            blur: self.blur || other.blur,
            focus: self.focus || other.focus,
        }
    }
}

//=== DrawCmd =============================================================

/// One visible widget, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCmd {
    pub kind: WidgetKind,

    /// Index of the enclosing command for two-part widgets.
    pub parent: Option<usize>,

    /// Absolute rectangle before clipping.
    pub bounds: Rect,
    pub clip: Rect,
    pub flags: WidgetFlags,

    /// Payload set with [`Gui::draw_data`].
    pub data: Option<String>,
}

//=== Events ==============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Events {
    Auto,
    Ignore,
}

//=== Slot ================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Unassigned,
    /// Pointer went down over no widget.
    Inactive,
    /// Active widget was dragged off; restored from hover on the next press frame.
    Partial,
    Widget(WidgetId),
}

impl Slot {
    fn holds(self, id: WidgetId) -> bool {
        self == Slot::Widget(id)
    }
}

//=== Widget ==============================================================

#[derive(Debug, Clone, Copy)]
struct Widget {
    kind: WidgetKind,
    parent: Option<WidgetId>,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    offset: (i32, i32),
    clip: Rect,
}

//=== Gui =================================================================

#[derive(Debug)]
pub struct Gui {
    pointer: Pointer,

    warm: Slot,
    hot: Slot,
    hover: Slot,
    active: Slot,
    blur: Slot,
    focus: Slot,
    previous_hot: Slot,

    flags: WidgetFlags,
    events: Events,
    drag_offset: (i32, i32),
    draw_data: Option<String>,

    widgets: Vec<Widget>,
    commands: Vec<DrawCmd>,
    containers: Vec<WidgetId>,
}

impl Gui {
    pub fn new() -> Self {
        Self {
            pointer: Pointer::default(),
            warm: Slot::Unassigned,
            hot: Slot::Unassigned,
            hover: Slot::Unassigned,
            active: Slot::Unassigned,
            blur: Slot::Unassigned,
            focus: Slot::Unassigned,
            previous_hot: Slot::Unassigned,
            flags: WidgetFlags::default(),
            events: Events::Auto,
            drag_offset: (0, 0),
            draw_data: None,
            widgets: Vec::new(),
            commands: Vec::new(),
            containers: Vec::new(),
        }
    }

    pub fn set_pointer(&mut self, pointer: Pointer) {
        self.pointer = pointer;
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    //--- Frame Lifecycle --------------------------------------------------

    /// Starts a frame with a root container covering the given area.
    pub fn begin_ui(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.widgets.clear();
        self.commands.clear();
        self.containers.clear();
        self.draw_data = None;

        if self.pointer.is_down && self.active == Slot::Partial {
            self.active = self.hover;
        }

        self.warm = Slot::Unassigned;
        self.blur = Slot::Unassigned;
        self.focus = Slot::Unassigned;
        self.events = Events::Auto;

        if self.previous_hot != self.hot {
            self.blur = self.previous_hot;
            self.focus = self.hot;
        }

        self.open_container(WidgetKind::RootContainer, x, y, width, height, (0, 0));
    }

    /// Closes the frame and settles hot/active/hover for the next one.
    ///
    /// # Panics
    ///
    /// Panics if a container opened this frame was never closed.
    pub fn end_ui(&mut self) {
        self.end_container();
        if !self.containers.is_empty() {
            panic!("not enough calls to end_container");
        }

        self.previous_hot = self.hot;
        self.hot = self.warm;

        if !self.pointer.is_down {
            self.active = Slot::Unassigned;
            self.hover = Slot::Unassigned;
        } else if self.active == Slot::Unassigned {
            self.active = Slot::Inactive;
        }

        if self.pointer.is_down {
            if let Slot::Widget(_) = self.active {
                self.hover = self.active;
                if self.active != self.hot {
                    self.active = Slot::Partial;
                }
            }
        } else {
            self.hover = self.hot;
        }

        self.flags = WidgetFlags {
            hot: self.hot != Slot::Unassigned,
            hover: self.hover != Slot::Unassigned,
            active: self.active != Slot::Unassigned,
            blur: self.blur != Slot::Unassigned,
            focus: self.focus != Slot::Unassigned,
        };
    }

    //--- Containers -------------------------------------------------------

    /// Opens a child area; children are placed relative to it, shifted by
    /// `offset`, and clipped to it. The size is clamped to the parent.
    pub fn begin_container(&mut self, x: i32, y: i32, width: i32, height: i32, offset: (i32, i32)) {
        self.open_container(WidgetKind::Container, x, y, width, height, offset);
    }

    /// # Panics
    ///
    /// Panics when no container is open.
    pub fn end_container(&mut self) {
        if self.containers.pop().is_none() {
            panic!("too many calls to end_container");
        }
    }

    fn open_container(
        &mut self,
        kind: WidgetKind,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        offset: (i32, i32),
    ) {
        let id = self.new_widget(kind, x, y, width, height);

        let parent_size = self.widgets[id.0]
            .parent
            .map(|parent| (self.widgets[parent.0].width, self.widgets[parent.0].height));

        let container = &mut self.widgets[id.0];
        container.offset = offset;
        if let Some((parent_width, parent_height)) = parent_size {
            container.width = container.width.min(parent_width - container.x);
            container.height = container.height.min(parent_height - container.y);
        }

        self.containers.push(id);
        self.emit(id, None);
    }

    //--- Frame Options ----------------------------------------------------

    /// Widgets declared after this call in the current frame cannot
    /// become hot or active.
    pub fn ignore_events(&mut self) {
        self.events = Events::Ignore;
    }

    /// Attaches `data` to the next draw command.
    pub fn draw_data(&mut self, data: impl Into<String>) {
        self.draw_data = Some(data.into());
    }

    //--- Queries ----------------------------------------------------------

    /// Flags of the last widget call, or frame-wide flags after `end_ui`.
    pub fn flags(&self) -> WidgetFlags {
        self.flags
    }

    pub fn is_hot(&self) -> bool {
        self.flags.hot
    }

    pub fn is_hover(&self) -> bool {
        self.flags.hover
    }

    pub fn is_active(&self) -> bool {
        self.flags.active
    }

    pub fn is_blur(&self) -> bool {
        self.flags.blur
    }

    pub fn is_focus(&self) -> bool {
        self.flags.focus
    }

    /// Half-open hit test against the pointer.
    pub fn region_hit_rect(&self, x: i32, y: i32, width: i32, height: i32) -> bool {
        let Pointer { x: px, y: py, .. } = self.pointer;
        px >= x && px < x + width && py >= y && py < y + height
    }

    //--- Output -----------------------------------------------------------

    pub fn commands(&self) -> impl Iterator<Item = &DrawCmd> {
        self.commands.iter()
    }

    /// Feeds every command of the frame to `f` in submission order.
    pub fn draw(&self, mut f: impl FnMut(&DrawCmd)) {
        for command in &self.commands {
            f(command);
        }
    }

    //--- Widget Plumbing --------------------------------------------------

    fn new_widget(&mut self, kind: WidgetKind, x: i32, y: i32, width: i32, height: i32) -> WidgetId {
        let parent = self.containers.last().copied();
        let mut widget = Widget {
            kind,
            parent,
            x,
            y,
            width,
            height,
            offset: (0, 0),
            clip: Rect::new(x, y, width, height),
        };

        if let Some(parent) = parent {
            let (origin_x, origin_y) = self.child_origin(parent);
            let bounds = self.widgets[parent.0].clip;
            widget.clip = intersect(
                Rect::new(x + origin_x, y + origin_y, width, height),
                bounds,
            );
        }

        self.widgets.push(widget);
        WidgetId(self.widgets.len() - 1)
    }

    /// Absolute position that children of `id` are placed relative to.
    fn child_origin(&self, id: WidgetId) -> (i32, i32) {
        let (x, y) = self.absolute(id);
        let offset = self.widgets[id.0].offset;
        (x + offset.0, y + offset.1)
    }

    fn absolute(&self, id: WidgetId) -> (i32, i32) {
        let widget = &self.widgets[id.0];
        match widget.parent {
            Some(parent) => {
                let (origin_x, origin_y) = self.child_origin(parent);
                (widget.x + origin_x, widget.y + origin_y)
            }
            None => (widget.x, widget.y),
        }
    }

    /// Hit-tests `id` and claims the press gesture for it when it was hot
    /// and nothing else is active. Returns whether it claimed.
    fn do_button_logic(&mut self, id: WidgetId) -> bool {
        if self.events == Events::Ignore {
            return false;
        }

        let clip = self.widgets[id.0].clip;
        if self.region_hit_rect(clip.x, clip.y, clip.width, clip.height) {
            self.warm = Slot::Widget(id);
        }

        let claimed = self.hot.holds(id) && self.active == Slot::Unassigned && self.pointer.is_down;
        if claimed {
            self.active = Slot::Widget(id);
        }
        claimed
    }

    fn flags_of(&self, id: WidgetId) -> WidgetFlags {
        WidgetFlags {
            hot: self.hot.holds(id),
            hover: self.hover.holds(id),
            active: self.active.holds(id),
            blur: self.blur.holds(id),
            focus: self.focus.holds(id),
        }
    }

    /// Records a draw command for `id`, consuming any pending draw data.
    /// Widgets clipped away entirely produce no command.
    fn emit(&mut self, id: WidgetId, parent: Option<usize>) -> Option<usize> {
        let data = self.draw_data.take();
        let widget = self.widgets[id.0];
        if widget.clip.is_empty() {
            return None;
        }

        let (x, y) = self.absolute(id);
        self.commands.push(DrawCmd {
            kind: widget.kind,
            parent,
            bounds: Rect::new(x, y, widget.width, widget.height),
            clip: widget.clip,
            flags: self.flags_of(id),
            data,
        });
        Some(self.commands.len() - 1)
    }

    /// Emits a track/indicator pair; both commands carry the same data.
    fn emit_pair(&mut self, outer: WidgetId, inner: WidgetId) {
        let data = self.draw_data.clone();
        let parent = self.emit(outer, None);
        self.draw_data = data;
        self.emit(inner, parent);
    }

    /// Click semantics shared by every widget: released while both hot
    /// and active.
    fn clicked(&self) -> bool {
        !self.pointer.is_down && self.flags.hot && self.flags.active
    }
}

impl Default for Gui {
    fn default() -> Self {
        Self::new()
    }
}

//=== Helpers =============================================================

fn intersect(rect: Rect, bounds: Rect) -> Rect {
    let left = rect.x.max(bounds.x);
    let top = rect.y.max(bounds.y);
    let right = (rect.x + rect.width).min(bounds.x + bounds.width);
    let bottom = (rect.y + rect.height).min(bounds.y + bounds.height);
    Rect::new(left, top, right - left, bottom - top)
}

//=== Axis ================================================================

/// Orientation shared by progress bars and scrollbars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Component along the axis.
    fn main(self, x: i32, y: i32) -> i32 {
        match self {
            Axis::Horizontal => x,
            Axis::Vertical => y,
        }
    }

    /// Rectangle with `start`/`length` along the axis and the rest from `across`.
    fn span(self, across: Rect, start: i32, length: i32) -> Rect {
        match self {
            Axis::Horizontal => Rect::new(start, across.y, length, across.height),
            Axis::Vertical => Rect::new(across.x, start, across.width, length),
        }
    }
}

/// Normalises a `[min, max]` range that may be given descending.
///
/// Returns `(min, range, descending, value offset clamped to the range)`.
fn normalise_range(min: f64, max: f64, value: f64) -> (f64, f64, bool, f64) {
    let descending = max < min;
    let (min, max) = if descending { (max, min) } else { (min, max) };
    let range = max - min;
    let offset = (value - min).max(0.0).min(range);
    (min, range, descending, offset)
}

/// Pixel length covering `offset / range` of `length`.
fn fraction_of(length: i32, offset: f64, range: f64) -> i32 {
    if range > 0.0 {
        (f64::from(length) * (offset / range)) as i32
    } else {
        0
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    fn pointer(x: i32, y: i32, is_down: bool) -> Pointer {
        Pointer { x, y, is_down }
    }

    /// One frame with a single 100x40 button at (10, 10).
    fn button_frame(gui: &mut Gui, at: Pointer) -> bool {
        gui.set_pointer(at);
        gui.begin_ui(0, 0, 640, 480);
        let clicked = gui.button(10, 10, 100, 40);
        gui.end_ui();
        clicked
    }

    //=====================================================================
    // Click Protocol
    //=====================================================================

    #[test]
    fn click_fires_on_release_after_press() {
        let mut gui = Gui::new();

        assert!(!button_frame(&mut gui, pointer(50, 20, false)), "hover frame");
        assert!(!button_frame(&mut gui, pointer(50, 20, true)), "press frame arms active");
        assert!(gui.is_active());
        assert!(button_frame(&mut gui, pointer(50, 20, false)), "release frame clicks");
        assert!(!button_frame(&mut gui, pointer(50, 20, false)), "click fires once");
    }

    #[test]
    fn press_outside_then_drag_in_does_not_click() {
        let mut gui = Gui::new();

        button_frame(&mut gui, pointer(300, 300, true));
        button_frame(&mut gui, pointer(50, 20, true));
        button_frame(&mut gui, pointer(50, 20, true));

        assert!(!button_frame(&mut gui, pointer(50, 20, false)));
    }

    #[test]
    fn release_off_widget_cancels_click() {
        let mut gui = Gui::new();

        button_frame(&mut gui, pointer(50, 20, false));
        button_frame(&mut gui, pointer(50, 20, true));
        button_frame(&mut gui, pointer(300, 300, true));

        assert!(!button_frame(&mut gui, pointer(300, 300, false)));
    }

    #[test]
    fn drag_off_and_back_keeps_gesture() {
        let mut gui = Gui::new();

        button_frame(&mut gui, pointer(50, 20, false));
        button_frame(&mut gui, pointer(50, 20, true));
        button_frame(&mut gui, pointer(300, 300, true));
        assert!(gui.is_hover(), "dragged widget keeps hover");

        button_frame(&mut gui, pointer(50, 20, true));
        button_frame(&mut gui, pointer(50, 20, true));
        assert!(button_frame(&mut gui, pointer(50, 20, false)));
    }

    //=====================================================================
    // Blur / Focus
    //=====================================================================

    #[test]
    fn focus_and_blur_follow_hot_changes() {
        let mut gui = Gui::new();

        button_frame(&mut gui, pointer(50, 20, false));
        button_frame(&mut gui, pointer(50, 20, false));
        assert!(gui.is_focus(), "hot changed to the button last frame");

        button_frame(&mut gui, pointer(50, 20, false));
        assert!(!gui.is_focus(), "focus is a one-frame edge");

        button_frame(&mut gui, pointer(300, 300, false));
        button_frame(&mut gui, pointer(300, 300, false));
        assert!(gui.is_blur());
    }

    //=====================================================================
    // Containers & Clipping
    //=====================================================================

    #[test]
    fn children_are_offset_and_clipped() {
        let mut gui = Gui::new();
        gui.begin_ui(0, 0, 640, 480);
        gui.begin_container(100, 100, 50, 50, (5, 0));
        gui.panel(40, 10, 30, 10);
        gui.end_container();
        gui.end_ui();

        let panel = gui.commands().find(|cmd| cmd.kind == WidgetKind::Panel).unwrap();
        assert_eq!(panel.bounds, Rect::new(145, 110, 30, 10));
        assert_eq!(panel.clip, Rect::new(145, 110, 5, 10), "clipped to container edge");
    }

    #[test]
    fn container_size_is_clamped_to_parent() {
        let mut gui = Gui::new();
        gui.begin_ui(0, 0, 200, 100);
        gui.begin_container(150, 50, 100, 100, (0, 0));
        gui.end_container();
        gui.end_ui();

        let container = gui.commands().find(|cmd| cmd.kind == WidgetKind::Container).unwrap();
        assert_eq!((container.bounds.width, container.bounds.height), (50, 50));
    }

    #[test]
    fn fully_clipped_widget_emits_nothing_and_is_not_hit() {
        let mut gui = Gui::new();
        gui.set_pointer(pointer(500, 500, false));
        gui.begin_ui(0, 0, 100, 100);
        gui.button(500, 500, 20, 20);
        gui.end_ui();

        assert_eq!(gui.commands().count(), 1, "only the root remains");
        assert!(!gui.is_hot());
    }

    #[test]
    #[should_panic(expected = "not enough calls to end_container")]
    fn unclosed_container_panics() {
        let mut gui = Gui::new();
        gui.begin_ui(0, 0, 100, 100);
        gui.begin_container(0, 0, 10, 10, (0, 0));
        gui.end_ui();
    }

    #[test]
    #[should_panic(expected = "too many calls to end_container")]
    fn extra_end_container_panics() {
        let mut gui = Gui::new();
        gui.begin_ui(0, 0, 100, 100);
        gui.end_container();
        gui.end_container();
    }

    //=====================================================================
    // Frame Options
    //=====================================================================

    #[test]
    fn ignored_widgets_never_click() {
        let mut gui = Gui::new();
        for is_down in [false, true, false] {
            gui.set_pointer(pointer(50, 20, is_down));
            gui.begin_ui(0, 0, 640, 480);
            gui.ignore_events();
            assert!(!gui.button(10, 10, 100, 40));
            gui.end_ui();
        }
        assert!(!gui.is_hot());
    }

    #[test]
    fn draw_data_attaches_to_next_command_only() {
        let mut gui = Gui::new();
        gui.begin_ui(0, 0, 640, 480);
        gui.draw_data("resume");
        gui.button(0, 0, 10, 10);
        gui.button(20, 0, 10, 10);
        gui.end_ui();

        let data: Vec<Option<&str>> = gui.commands().skip(1).map(|cmd| cmd.data.as_deref()).collect();
        assert_eq!(data, vec![Some("resume"), None]);
    }

    #[test]
    fn region_hit_rect_is_half_open() {
        let mut gui = Gui::new();
        gui.set_pointer(pointer(10, 10, false));
        assert!(gui.region_hit_rect(10, 10, 1, 1));
        assert!(!gui.region_hit_rect(0, 0, 10, 10));
        assert!(!gui.region_hit_rect(10, 10, 0, 5));
    }

    #[test]
    fn draw_visits_commands_in_order() {
        let mut gui = Gui::new();
        gui.begin_ui(0, 0, 640, 480);
        gui.panel(0, 0, 10, 10);
        gui.button(0, 0, 10, 10);
        gui.end_ui();

        let mut kinds = Vec::new();
        gui.draw(|cmd| kinds.push(cmd.kind));
        assert_eq!(kinds, vec![WidgetKind::RootContainer, WidgetKind::Panel, WidgetKind::Button]);
    }
}
