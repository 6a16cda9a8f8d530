use super::cc_map::ButtonRow;
use crate::config::BUTTONS_PER_ROW;

const BOTTOM_ROW_MASK: u16 = 0xFF00;

/// Direction of a committed single-button action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increment,
    Decrement,
}

impl Direction {
    pub fn step(self) -> i32 {
        match self {
            Direction::Increment => 1,
            Direction::Decrement => -1,
        }
    }
}

impl From<ButtonRow> for Direction {
    fn from(row: ButtonRow) -> Self {
        match row {
            ButtonRow::Top => Direction::Increment,
            ButtonRow::Bottom => Direction::Decrement,
        }
    }
}

/// What a single button transition amounts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonOutcome {
    None,
    IncrementOrDecrement(Direction),
    /// `group` is 1..=4, `index` is the one-based button column.
    Jump { group: u8, index: u8 },
}

/// Decoder state as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboState {
    Idle,
    SinglePressed,
    /// Two or more buttons were down together; holds the latched mask.
    MultiPressed(u16),
}

/// Tracks held buttons and tells single presses from combos.
///
/// A lone button commits its increment or decrement on release, so pressing
/// a second button before letting go turns the gesture into a jump instead.
/// Once two buttons have overlapped, no release produces an increment until
/// every button is up again.
#[derive(Debug, Clone, Default)]
pub struct ComboDecoder {
    pressed: u16,
    shifted: u16,
}

impl ComboDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_button_event(
        &mut self,
        index: u8,
        row: ButtonRow,
        is_pressed: bool,
    ) -> ButtonOutcome {
        let Some(bit) = button_bit(index, row) else {
            tracing::debug!(index, ?row, "ignoring button outside the row");
            return ButtonOutcome::None;
        };

        let outcome = if is_pressed {
            let held = self.pressed;
            self.pressed |= bit;
            if held != 0 {
                self.shifted = self.pressed;
                // Bottom-row shift addresses the far half of the jump grid.
                let far = if held & BOTTOM_ROW_MASK != 0 { 2 } else { 0 };
                ButtonOutcome::Jump {
                    group: row.number() + 1 + far,
                    index: index + 1,
                }
            } else {
                ButtonOutcome::None
            }
        } else {
            self.pressed &= !bit;
            if self.shifted == 0 {
                ButtonOutcome::IncrementOrDecrement(row.into())
            } else {
                ButtonOutcome::None
            }
        };

        // Only after classifying, so the last button of a combo is not
        // taken as a single press.
        if self.pressed == 0 {
            self.shifted = 0;
        }

        tracing::trace!(
            pressed = self.pressed,
            shifted = self.shifted,
            ?outcome,
            "button"
        );
        outcome
    }

    pub fn state(&self) -> ComboState {
        if self.pressed == 0 {
            ComboState::Idle
        } else if self.shifted == 0 {
            ComboState::SinglePressed
        } else {
            ComboState::MultiPressed(self.shifted)
        }
    }
}

/// Mask bit for a button; top row in the low byte.
fn button_bit(index: u8, row: ButtonRow) -> Option<u16> {
    (index < BUTTONS_PER_ROW).then(|| {
        1u16 << (u16::from(row.number()) * u16::from(BUTTONS_PER_ROW) + u16::from(index))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ButtonRow::{Bottom, Top};

    #[test]
    fn single_top_button_increments_on_release() {
        let mut combo = ComboDecoder::new();
        assert_eq!(combo.on_button_event(2, Top, true), ButtonOutcome::None);
        assert_eq!(combo.state(), ComboState::SinglePressed);
        assert_eq!(
            combo.on_button_event(2, Top, false),
            ButtonOutcome::IncrementOrDecrement(Direction::Increment)
        );
        assert_eq!(combo.state(), ComboState::Idle);
    }

    #[test]
    fn single_bottom_button_decrements_on_release() {
        let mut combo = ComboDecoder::new();
        assert_eq!(combo.on_button_event(5, Bottom, true), ButtonOutcome::None);
        let outcome = combo.on_button_event(5, Bottom, false);
        assert_eq!(
            outcome,
            ButtonOutcome::IncrementOrDecrement(Direction::Decrement)
        );
        if let ButtonOutcome::IncrementOrDecrement(dir) = outcome {
            assert_eq!(dir.step(), -1);
        }
    }

    #[test]
    fn overlap_jumps_and_suppresses_increments() {
        let mut combo = ComboDecoder::new();
        assert_eq!(combo.on_button_event(0, Top, true), ButtonOutcome::None);
        assert_eq!(
            combo.on_button_event(1, Bottom, true),
            ButtonOutcome::Jump { group: 2, index: 2 }
        );
        assert_eq!(combo.state(), ComboState::MultiPressed(0x0201));

        assert_eq!(combo.on_button_event(0, Top, false), ButtonOutcome::None);
        // Still latched with one button left.
        assert_eq!(combo.state(), ComboState::MultiPressed(0x0201));
        assert_eq!(combo.on_button_event(1, Bottom, false), ButtonOutcome::None);
        assert_eq!(combo.state(), ComboState::Idle);
    }

    #[test]
    fn bottom_row_shift_selects_far_groups() {
        let mut combo = ComboDecoder::new();
        combo.on_button_event(0, Bottom, true);
        assert_eq!(
            combo.on_button_event(3, Top, true),
            ButtonOutcome::Jump { group: 3, index: 4 }
        );

        let mut combo = ComboDecoder::new();
        combo.on_button_event(7, Bottom, true);
        assert_eq!(
            combo.on_button_event(7, Bottom, true),
            ButtonOutcome::Jump { group: 4, index: 8 }
        );
    }

    #[test]
    fn top_row_shift_selects_near_groups() {
        let mut combo = ComboDecoder::new();
        combo.on_button_event(4, Top, true);
        assert_eq!(
            combo.on_button_event(6, Top, true),
            ButtonOutcome::Jump { group: 1, index: 7 }
        );
    }

    #[test]
    fn every_extra_press_jumps_and_refreshes_snapshot() {
        let mut combo = ComboDecoder::new();
        combo.on_button_event(0, Top, true);
        assert_eq!(
            combo.on_button_event(1, Top, true),
            ButtonOutcome::Jump { group: 1, index: 2 }
        );
        assert_eq!(combo.state(), ComboState::MultiPressed(0x0003));
        assert_eq!(
            combo.on_button_event(2, Bottom, true),
            ButtonOutcome::Jump { group: 2, index: 3 }
        );
        assert_eq!(combo.state(), ComboState::MultiPressed(0x0403));

        // Release one and press another while the combo is still active.
        assert_eq!(combo.on_button_event(1, Top, false), ButtonOutcome::None);
        assert_eq!(
            combo.on_button_event(5, Top, true),
            ButtonOutcome::Jump { group: 3, index: 6 }
        );
        assert_eq!(combo.state(), ComboState::MultiPressed(0x0421));
    }

    #[test]
    fn no_residue_after_combo() {
        let mut combo = ComboDecoder::new();
        combo.on_button_event(0, Top, true);
        combo.on_button_event(1, Top, true);
        combo.on_button_event(1, Top, false);
        combo.on_button_event(0, Top, false);
        assert_eq!(combo.state(), ComboState::Idle);

        let mut fresh = ComboDecoder::new();
        let sequence = [
            (2, Top, true),
            (2, Top, false),
            (4, Bottom, true),
            (4, Bottom, false),
        ];
        for (index, row, pressed) in sequence {
            assert_eq!(
                combo.on_button_event(index, row, pressed),
                fresh.on_button_event(index, row, pressed)
            );
        }
    }

    #[test]
    fn indexes_past_the_row_are_ignored() {
        let mut combo = ComboDecoder::new();
        combo.on_button_event(7, Top, true);
        assert_eq!(combo.on_button_event(9, Top, true), ButtonOutcome::None);
        assert_eq!(combo.on_button_event(8, Bottom, true), ButtonOutcome::None);
        assert_eq!(combo.state(), ComboState::SinglePressed);

        assert_eq!(combo.on_button_event(9, Top, false), ButtonOutcome::None);
        // Button 7 is still held.
        assert_eq!(combo.state(), ComboState::SinglePressed);
        assert_eq!(
            combo.on_button_event(7, Top, false),
            ButtonOutcome::IncrementOrDecrement(Direction::Increment)
        );
        assert_eq!(combo.state(), ComboState::Idle);
    }
}
