mod accelerator;
mod cc_map;
mod combo;
mod nocturn_controller;

pub use accelerator::{sign_extend, Accelerator, KNOB_SLOTS};
pub use cc_map::{ButtonRow, CcMap, Control};
pub use combo::{ButtonOutcome, ComboDecoder, ComboState, Direction};
pub use nocturn_controller::NocturnController;
