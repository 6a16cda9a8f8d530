//! Decoder for the Novation Nocturn control surface.
//!
//! Raw control changes from the surface are turned into knob deltas,
//! increment/decrement presses and button-combo jumps, and handed to the
//! subscribers registered on a [`NocturnController`].

pub mod config;
pub mod controller;
pub mod error;
pub mod midi_input;
pub mod nocturn;

pub use config::ControllerConfig;
pub use controller::{ControlChange, Controller, Jump, Notification, Row};
pub use error::{Error, Result};
pub use midi_input::MidiInputLink;
pub use nocturn::NocturnController;
