//=========================================================================
// Scrollbars
//=========================================================================
//
// Track plus a draggable thumb mapping pointer position to a value in
// `[min, max]`. Pressing the track jumps the value under the pointer;
// dragging the thumb keeps the grab point under the pointer. Passing
// `max < min` inverts the mapping (max at the left or top).
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{fraction_of, normalise_range, Axis, Gui, WidgetKind};
use crate::core::gfx::Rect;

//=== Scrollbars ==========================================================

impl Gui {
    /// Returns `true` when `value` was changed this frame.
    pub fn h_scrollbar(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        thumb_width: i32,
        min: f64,
        max: f64,
        value: &mut f64,
    ) -> bool {
        let track = Rect::new(x, y, width, height);
        self.scrollbar(Axis::Horizontal, track, thumb_width, min, max, value)
    }

    /// Returns `true` when `value` was changed this frame.
    pub fn v_scrollbar(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        thumb_height: i32,
        min: f64,
        max: f64,
        value: &mut f64,
    ) -> bool {
        let track = Rect::new(x, y, width, height);
        self.scrollbar(Axis::Vertical, track, thumb_height, min, max, value)
    }

    fn scrollbar(
        &mut self,
        axis: Axis,
        track: Rect,
        thumb_length: i32,
        min: f64,
        max: f64,
        value: &mut f64,
    ) -> bool {
        let (min, range, descending, offset) = normalise_range(min, max, *value);
        let (bar_kind, thumb_kind) = match axis {
            Axis::Horizontal => (WidgetKind::HScrollbar, WidgetKind::HScrollbarThumb),
            Axis::Vertical => (WidgetKind::VScrollbar, WidgetKind::VScrollbarThumb),
        };

        let bar = self.new_widget(bar_kind, track.x, track.y, track.width, track.height);
        self.do_button_logic(bar);

        // Thumb centre travels between half a thumb from either end.
        let half = thumb_length / 2;
        let start = axis.main(track.x, track.y) + half;
        let travel = axis.main(track.width, track.height) - thumb_length;
        let position = fraction_of(travel, offset, range);
        let centre = start + if descending { travel - position } else { position };

        let rect = axis.span(track, centre - half, thumb_length);
        let thumb = self.new_widget(thumb_kind, rect.x, rect.y, rect.width, rect.height);

        let (abs_x, abs_y) = self.absolute(bar);
        let origin = axis.main(abs_x - track.x, abs_y - track.y);
        let pointer = axis.main(self.pointer.x, self.pointer.y);

        if self.do_button_logic(thumb) {
            let grab = pointer - (centre + origin);
            match axis {
                Axis::Horizontal => self.drag_offset.0 = grab,
                Axis::Vertical => self.drag_offset.1 = grab,
            }
        }

        self.flags = self.flags_of(bar).union(self.flags_of(thumb));
        self.emit_pair(bar, thumb);

        if !self.flags.active {
            return false;
        }

        let mut target = pointer - (start + origin);
        if self.active.holds(thumb) {
            target -= axis.main(self.drag_offset.0, self.drag_offset.1);
        }
        let target = target.max(0).min(travel);

        let mut next = if travel > 0 {
            range * (f64::from(target) / f64::from(travel))
        } else {
            0.0
        };
        if descending {
            next = range - next;
        }

        if next != offset {
            *value = min + next;
            return true;
        }
        false
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
