use std::{fs, ops::Range, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of relative knobs, not counting the speed dial.
pub const INCREMENTORS: u8 = 8;
/// Buttons in each of the two rows.
pub const BUTTONS_PER_ROW: u8 = 8;
/// Total buttons across both rows.
pub const BUTTONS: u8 = BUTTONS_PER_ROW * 2;

/// Upper bounds keeping the fastest turn (64 raw steps, accelerated) plus
/// the carried remainder inside `i32`.
pub const MAX_KNOB_SCALE: i32 = 1_000_000;
pub const MAX_INCREMENTOR_ACCELERATION: i32 = 1_000_000;

pub const DEFAULT_REMOTE_MIDI_DEVICE: &str = "Nocturn";
pub const DEFAULT_LAYOUT: &str = "nocturn.glade";

/// Controller numbers the surface sends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CcLayout {
    /// Controller number of knob 1; knobs 1..=8 are consecutive.
    pub incrementor_base: u8,
    pub speed_dial: u8,
    /// Controller number of the first top-row button. The top row is followed
    /// directly by the bottom row.
    pub button_base: u8,
}

impl Default for CcLayout {
    fn default() -> Self {
        Self {
            incrementor_base: 64,
            speed_dial: 74,
            button_base: 112,
        }
    }
}

impl CcLayout {
    pub fn incrementors(&self) -> Range<u16> {
        let base = u16::from(self.incrementor_base);
        base..base + u16::from(INCREMENTORS)
    }

    pub fn buttons(&self) -> Range<u16> {
        let base = u16::from(self.button_base);
        base..base + u16::from(BUTTONS)
    }

    pub fn speed_dial(&self) -> Range<u16> {
        let cc = u16::from(self.speed_dial);
        cc..cc + 1
    }

    fn validate(&self) -> Result<()> {
        let ranges = [
            ("incrementors", self.incrementors()),
            ("speed dial", self.speed_dial()),
            ("buttons", self.buttons()),
        ];

        for (name, range) in &ranges {
            if range.end > 128 {
                return Err(Error::InvalidConfig(format!(
                    "{name} CC range {}..{} exceeds 127",
                    range.start, range.end
                )));
            }
        }

        for (i, (name_a, a)) in ranges.iter().enumerate() {
            for (name_b, b) in &ranges[i + 1..] {
                if a.start < b.end && b.start < a.end {
                    return Err(Error::InvalidConfig(format!(
                        "{name_a} CC range overlaps {name_b}"
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Runtime configuration for one Nocturn instance.
///
/// Every key is optional in the YAML file; missing keys take the defaults
/// below, which match the factory Nocturn template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Port-name hint used when attaching to a MIDI input.
    pub remote_midi_device: String,
    /// Layout resource handed to the host UI; opaque to the decoder.
    pub layout: String,
    /// Only accept control changes on this channel (0..=15) when set.
    pub channel: Option<u8>,
    /// Raw knob steps per emitted UI step.
    pub knob_scale: i32,
    /// Multiplier applied to raw steps larger than one.
    pub incrementor_acceleration: i32,
    /// Report button increments on the knob row instead of the incrementor row.
    pub buttons_to_incrementors: bool,
    pub cc: CcLayout,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            remote_midi_device: DEFAULT_REMOTE_MIDI_DEVICE.into(),
            layout: DEFAULT_LAYOUT.into(),
            channel: None,
            knob_scale: 2,
            incrementor_acceleration: 10,
            buttons_to_incrementors: false,
            cc: CcLayout::default(),
        }
    }
}

impl ControllerConfig {
    /// Read and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_KNOB_SCALE).contains(&self.knob_scale) {
            return Err(Error::InvalidConfig(format!(
                "knob_scale must be 1..={MAX_KNOB_SCALE}, got {}",
                self.knob_scale
            )));
        }
        if !(1..=MAX_INCREMENTOR_ACCELERATION).contains(&self.incrementor_acceleration) {
            return Err(Error::InvalidConfig(format!(
                "incrementor_acceleration must be 1..={MAX_INCREMENTOR_ACCELERATION}, got {}",
                self.incrementor_acceleration
            )));
        }
        if let Some(channel) = self.channel {
            if channel > 15 {
                return Err(Error::InvalidConfig(format!(
                    "channel must be 0..=15, got {channel}"
                )));
            }
        }
        self.cc.validate()
    }
}
