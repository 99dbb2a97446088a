use super::types::{Modifiers, PointerButtonEvent, PointerMoveEvent, RawEvent};

/// Minimal input bookkeeping used while translating platform events.
///
/// Window systems report button presses without a position and modifier
/// changes out of band; the tracker carries the last-seen pointer
/// position and modifier state so translated [`RawEvent`]s are
/// self-contained.
#[derive(Debug, Default)]
pub struct InputTracker {
    /// Current modifier state.
    pub modifiers: Modifiers,

    /// Pointer position in pixels, `None` after the pointer left the surface.
    pub pointer_pos: Option<(f32, f32)>,

    /// Whether the window is focused.
    pub focused: bool,
}

impl InputTracker {
    /// Applies a translated event to the tracked state.
    pub fn apply_event(&mut self, ev: &RawEvent) {
        match ev {
            RawEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            RawEvent::Focused(f) => {
                self.focused = *f;
            }

            RawEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }

            RawEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            RawEvent::PointerButton(PointerButtonEvent { x, y, modifiers, .. }) => {
                self.pointer_pos = Some((*x, *y));
                self.modifiers = *modifiers;
            }

            RawEvent::Key(k) => {
                self.modifiers = k.modifiers;
            }

            RawEvent::Wheel { modifiers, .. } => {
                self.modifiers = *modifiers;
            }

            RawEvent::Text(_) | RawEvent::Resized { .. } | RawEvent::CloseRequested => {}
        }
    }

    /// Last-seen pointer position, `(0, 0)` when unknown.
    pub fn pointer_or_origin(&self) -> (f32, f32) {
        self.pointer_pos.unwrap_or((0.0, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{MouseButton, MouseButtonState};

    #[test]
    fn tracks_pointer_position() {
        let mut t = InputTracker::default();
        t.apply_event(&RawEvent::PointerMoved(PointerMoveEvent { x: 3.0, y: 4.0 }));
        assert_eq!(t.pointer_pos, Some((3.0, 4.0)));

        t.apply_event(&RawEvent::PointerLeft);
        assert_eq!(t.pointer_pos, None);
        assert_eq!(t.pointer_or_origin(), (0.0, 0.0));
    }

    #[test]
    fn button_event_updates_position_and_modifiers() {
        let mut t = InputTracker::default();
        t.apply_event(&RawEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
            x: 7.0,
            y: 8.0,
            modifiers: Modifiers { shift: true, ..Default::default() },
        }));
        assert_eq!(t.pointer_pos, Some((7.0, 8.0)));
        assert!(t.modifiers.shift);
    }
}
