//=========================================================================
// Progress Bars
//=========================================================================
//
// Track plus an indicator sized by `value` within `[min, max]`. Passing
// `max < min` anchors the indicator at the far end (right or bottom).
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{fraction_of, normalise_range, Axis, Gui, WidgetKind};
use crate::core::gfx::Rect;

//=== Progress Bars =======================================================

impl Gui {
    pub fn h_progress_bar(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        min: f64,
        max: f64,
        value: f64,
    ) -> bool {
        self.progress_bar(Axis::Horizontal, Rect::new(x, y, width, height), min, max, value)
    }

    pub fn v_progress_bar(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        min: f64,
        max: f64,
        value: f64,
    ) -> bool {
        self.progress_bar(Axis::Vertical, Rect::new(x, y, width, height), min, max, value)
    }

    fn progress_bar(&mut self, axis: Axis, track: Rect, min: f64, max: f64, value: f64) -> bool {
        let (_, range, descending, offset) = normalise_range(min, max, value);
        let (track_kind, indicator_kind) = match axis {
            Axis::Horizontal => (WidgetKind::HProgressBar, WidgetKind::HProgressIndicator),
            Axis::Vertical => (WidgetKind::VProgressBar, WidgetKind::VProgressIndicator),
        };

        let bar = self.new_widget(track_kind, track.x, track.y, track.width, track.height);

        let start = axis.main(track.x, track.y);
        let length = axis.main(track.width, track.height);
        let filled = fraction_of(length, offset, range);
        let fill_start = if descending { start + length - filled } else { start };

        let fill = axis.span(track, fill_start, filled);
        let indicator = self.new_widget(indicator_kind, fill.x, fill.y, fill.width, fill.height);

        self.do_button_logic(bar);
        self.do_button_logic(indicator);

        self.flags = self.flags_of(bar).union(self.flags_of(indicator));
        self.emit_pair(bar, indicator);
        self.clicked()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
