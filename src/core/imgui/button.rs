//=========================================================================
// Buttons & Panels
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{Gui, WidgetKind};

//=== Single-Part Widgets =================================================

impl Gui {
    /// Clickable rectangle. Returns `true` on the frame a click completes.
    pub fn button(&mut self, x: i32, y: i32, width: i32, height: i32) -> bool {
        self.single(WidgetKind::Button, x, y, width, height)
    }

    /// Button whose draw command carries `sprite_key` as its data.
    pub fn image_button(&mut self, x: i32, y: i32, width: i32, height: i32, sprite_key: &str) -> bool {
        self.draw_data(sprite_key);
        self.single(WidgetKind::ImageButton, x, y, width, height)
    }

    /// Interactive background area; clicks behave like a button's.
    pub fn panel(&mut self, x: i32, y: i32, width: i32, height: i32) -> bool {
        self.single(WidgetKind::Panel, x, y, width, height)
    }

    fn single(&mut self, kind: WidgetKind, x: i32, y: i32, width: i32, height: i32) -> bool {
        let id = self.new_widget(kind, x, y, width, height);
        self.do_button_logic(id);
        self.flags = self.flags_of(id);
        self.emit(id, None);
        self.clicked()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
