use super::{
    accelerator::Accelerator,
    cc_map::{CcMap, Control},
    combo::{ButtonOutcome, ComboDecoder, ComboState},
};
use crate::{
    config::ControllerConfig,
    controller::{
        ControlChange, Controller, Jump, JumpCallback, Notification, NotifyCallback, Row,
    },
    error::Result,
};

/// Decoder for one Novation Nocturn.
///
/// Knob and speed-dial turns go through the [`Accelerator`], button presses
/// through the [`ComboDecoder`]. Results are delivered to at most one
/// notification subscriber and one jump subscriber; events with no
/// subscriber are discarded.
pub struct NocturnController {
    map: CcMap,
    accelerator: Accelerator,
    combo: ComboDecoder,
    incrementor_row: Row,
    remote_midi_device: String,
    layout: String,
    notify_callback: Option<NotifyCallback>,
    jump_callback: Option<JumpCallback>,
}

impl NocturnController {
    /// Build a controller, rejecting configs that fail validation.
    pub fn new(config: &ControllerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: &ControllerConfig) -> Self {
        let incrementor_row = if config.buttons_to_incrementors {
            Row::Knob
        } else {
            Row::Incrementor
        };

        Self {
            map: CcMap::new(config.cc),
            accelerator: Accelerator::new(config.knob_scale, config.incrementor_acceleration),
            combo: ComboDecoder::new(),
            incrementor_row,
            remote_midi_device: config.remote_midi_device.clone(),
            layout: config.layout.clone(),
            notify_callback: None,
            jump_callback: None,
        }
    }

    /// Install a callback for knob turns and button increments.
    pub fn set_notify_callback<F>(&mut self, callback: F)
    where
        F: FnMut(Notification) + Send + 'static,
    {
        self.notify_callback = Some(Box::new(callback));
    }

    /// Install a callback for button combos.
    pub fn set_jump_callback<F>(&mut self, callback: F)
    where
        F: FnMut(Jump) + Send + 'static,
    {
        self.jump_callback = Some(Box::new(callback));
    }

    /// Remove all registered callbacks.
    pub fn clear_callbacks(&mut self) {
        self.notify_callback = None;
        self.jump_callback = None;
    }

    pub fn combo_state(&self) -> ComboState {
        self.combo.state()
    }

    pub fn accelerator(&self) -> &Accelerator {
        &self.accelerator
    }

    /// Process one control change. Channel filtering is left to the caller.
    pub fn handle_cc(&mut self, controller_no: u8, value: u8) {
        let Some(control) = self.map.classify(controller_no) else {
            tracing::debug!(controller_no, value, "ignoring unmapped controller");
            return;
        };

        match control {
            Control::SpeedDial | Control::Knob(_) => {
                let slot = control.knob_slot().unwrap_or_default();
                let delta = self.accelerator.accelerate(slot, value);
                self.emit_notification(Notification {
                    index: slot as u8,
                    row: Row::Knob,
                    knob_delta: Some(delta),
                    direction: None,
                });
            }
            Control::Button { row, index } => {
                match self.combo.on_button_event(index, row, value != 0) {
                    ButtonOutcome::None => {}
                    ButtonOutcome::IncrementOrDecrement(direction) => {
                        self.emit_notification(Notification {
                            index: index + 1,
                            row: self.incrementor_row,
                            knob_delta: None,
                            direction: Some(direction.step()),
                        });
                    }
                    ButtonOutcome::Jump { group, index } => {
                        self.emit_jump(Jump { group, index });
                    }
                }
            }
        }
    }

    fn emit_notification(&mut self, notification: Notification) {
        if let Some(cb) = self.notify_callback.as_mut() {
            cb(notification);
        }
    }

    fn emit_jump(&mut self, jump: Jump) {
        if let Some(cb) = self.jump_callback.as_mut() {
            cb(jump);
        }
    }
}

impl Default for NocturnController {
    fn default() -> Self {
        Self::from_valid_config(&ControllerConfig::default())
    }
}

impl Controller for NocturnController {
    fn remote_midi_device(&self) -> &str {
        &self.remote_midi_device
    }

    fn layout_name(&self) -> &str {
        &self.layout
    }

    fn register_notify(&mut self, callback: NotifyCallback) {
        self.notify_callback = Some(callback);
    }

    fn register_jump(&mut self, callback: JumpCallback) {
        self.jump_callback = Some(callback);
    }

    fn handle_control_change(&mut self, cc: ControlChange) {
        self.handle_cc(cc.controller, cc.value);
    }
}
