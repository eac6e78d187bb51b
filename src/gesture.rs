//! Pin connection gesture.
//!
//! ```text
//!   Idle --press pin--> PinSelected --release on other pin--> Idle (Connect)
//!                         |  ^   \---release on nothing----> Idle (Cancelled)
//!                         |  '---release on same pin (stays selected)
//!                         '------press same pin----------> Idle (Cancelled)
//! ```
//!
//! Both a drag from pin to pin and two separate clicks complete a
//! connection. Releasing over the selected pin itself therefore keeps the
//! selection instead of dropping it (a press/release in place is the first
//! click); the macro editor's mouse-up handler cleared it there, which left
//! only the drag form working. The gesture never validates pin compatibility itself; a
//! [`GestureOutcome::Connect`] is a request the graph store may still refuse.

use crate::graph::PinRef;
use crate::path::{generate_connection_path, generate_stub_path};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PinGesture {
    #[default]
    Idle,
    PinSelected {
        pin: PinRef,
        /// Canvas position of the selected pin
        anchor: (f32, f32),
        /// Canvas position of the loose end of the temporary curve
        cursor: (f32, f32),
    },
}

/// What a gesture transition asks the editor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// A pin was selected; show the temporary curve
    Started,
    /// Selection dropped without connecting; hide the temporary curve
    Cancelled,
    /// Try to connect these pins, then hide the temporary curve
    Connect { from: PinRef, to: PinRef },
    /// Event did not change the gesture
    Ignored,
}

impl PinGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<PinRef> {
        match self {
            PinGesture::Idle => None,
            PinGesture::PinSelected { pin, .. } => Some(*pin),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, PinGesture::Idle)
    }

    /// Pointer pressed on a pin.
    pub fn press_pin(&mut self, pin: PinRef, anchor: (f32, f32)) -> GestureOutcome {
        match *self {
            PinGesture::Idle => {
                log::trace!("gesture: selected {}", pin);
                *self = PinGesture::PinSelected {
                    pin,
                    anchor,
                    cursor: anchor,
                };
                GestureOutcome::Started
            }
            PinGesture::PinSelected { pin: selected, .. } if selected == pin => {
                log::trace!("gesture: {} clicked again, cancelling", pin);
                *self = PinGesture::Idle;
                GestureOutcome::Cancelled
            }
            PinGesture::PinSelected { .. } => GestureOutcome::Ignored,
        }
    }

    /// Pointer moved; returns whether the temporary curve needs redrawing.
    pub fn move_pointer(&mut self, x: f32, y: f32) -> bool {
        match self {
            PinGesture::Idle => false,
            PinGesture::PinSelected { cursor, .. } => {
                *cursor = (x, y);
                true
            }
        }
    }

    /// Pointer released, over `target` if it is above a pin.
    pub fn release(&mut self, target: Option<PinRef>) -> GestureOutcome {
        let PinGesture::PinSelected { pin: selected, .. } = *self else {
            return GestureOutcome::Ignored;
        };
        match target {
            Some(target) if target == selected => GestureOutcome::Ignored,
            Some(target) => {
                *self = PinGesture::Idle;
                GestureOutcome::Connect {
                    from: selected,
                    to: target,
                }
            }
            None => {
                log::trace!("gesture: released on empty space, cancelling");
                *self = PinGesture::Idle;
                GestureOutcome::Cancelled
            }
        }
    }

    /// Abandon any selection.
    pub fn cancel(&mut self) -> GestureOutcome {
        if self.is_idle() {
            GestureOutcome::Ignored
        } else {
            *self = PinGesture::Idle;
            GestureOutcome::Cancelled
        }
    }

    /// Path of the temporary curve from the selected pin to the pointer.
    pub fn preview_path(&self, min_offset: f32) -> Option<String> {
        match *self {
            PinGesture::Idle => None,
            PinGesture::PinSelected { anchor, cursor, .. } if anchor == cursor => {
                Some(generate_stub_path(anchor.0, anchor.1))
            }
            PinGesture::PinSelected { anchor, cursor, .. } => Some(generate_connection_path(
                anchor.0, anchor.1, cursor.0, cursor.1, min_offset,
            )),
        }
    }
}
