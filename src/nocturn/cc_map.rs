use crate::config::{CcLayout, BUTTONS_PER_ROW};

/// Which of the two button rows a button sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonRow {
    Top,
    Bottom,
}

impl ButtonRow {
    /// Zero-based row number, top row first.
    pub fn number(self) -> u8 {
        match self {
            ButtonRow::Top => 0,
            ButtonRow::Bottom => 1,
        }
    }
}

/// A physical control addressed by a controller number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    SpeedDial,
    /// Relative knob, numbered 1..=8.
    Knob(u8),
    /// Button at zero-based `index` within its row.
    Button { row: ButtonRow, index: u8 },
}

impl Control {
    /// Accumulator slot for knob-like controls; the speed dial is slot 0.
    pub fn knob_slot(self) -> Option<usize> {
        match self {
            Control::SpeedDial => Some(0),
            Control::Knob(n) => Some(usize::from(n)),
            Control::Button { .. } => None,
        }
    }
}

/// Maps controller numbers to controls by range membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CcMap {
    layout: CcLayout,
}

impl CcMap {
    pub fn new(layout: CcLayout) -> Self {
        Self { layout }
    }

    /// Classify a controller number. Returns `None` for numbers the surface
    /// does not use.
    pub fn classify(&self, controller_no: u8) -> Option<Control> {
        let cc = u16::from(controller_no);

        let buttons = self.layout.buttons();
        if buttons.contains(&cc) {
            let offset = (cc - buttons.start) as u8;
            let (row, index) = if offset < BUTTONS_PER_ROW {
                (ButtonRow::Top, offset)
            } else {
                (ButtonRow::Bottom, offset - BUTTONS_PER_ROW)
            };
            return Some(Control::Button { row, index });
        }

        if self.layout.speed_dial().contains(&cc) {
            return Some(Control::SpeedDial);
        }

        let knobs = self.layout.incrementors();
        if knobs.contains(&cc) {
            return Some(Control::Knob((cc - knobs.start) as u8 + 1));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_default_layout() {
        let map = CcMap::default();

        assert_eq!(map.classify(74), Some(Control::SpeedDial));
        assert_eq!(map.classify(64), Some(Control::Knob(1)));
        assert_eq!(map.classify(71), Some(Control::Knob(8)));
        assert_eq!(
            map.classify(112),
            Some(Control::Button {
                row: ButtonRow::Top,
                index: 0
            })
        );
        assert_eq!(
            map.classify(119),
            Some(Control::Button {
                row: ButtonRow::Top,
                index: 7
            })
        );
        assert_eq!(
            map.classify(120),
            Some(Control::Button {
                row: ButtonRow::Bottom,
                index: 0
            })
        );
        assert_eq!(
            map.classify(127),
            Some(Control::Button {
                row: ButtonRow::Bottom,
                index: 7
            })
        );
    }

    #[test]
    fn drops_unused_numbers() {
        let map = CcMap::default();
        for cc in [0, 63, 72, 73, 75, 81, 96, 111] {
            assert_eq!(map.classify(cc), None, "cc {cc}");
        }
    }

    #[test]
    fn follows_custom_layout() {
        let map = CcMap::new(CcLayout {
            incrementor_base: 0,
            speed_dial: 8,
            button_base: 16,
        });
        assert_eq!(map.classify(0), Some(Control::Knob(1)));
        assert_eq!(map.classify(8), Some(Control::SpeedDial));
        assert_eq!(
            map.classify(31),
            Some(Control::Button {
                row: ButtonRow::Bottom,
                index: 7
            })
        );
        assert_eq!(map.classify(32), None);
    }

    #[test]
    fn knob_slots() {
        assert_eq!(Control::SpeedDial.knob_slot(), Some(0));
        assert_eq!(Control::Knob(5).knob_slot(), Some(5));
        assert_eq!(
            Control::Button {
                row: ButtonRow::Top,
                index: 1
            }
            .knob_slot(),
            None
        );
    }
}
