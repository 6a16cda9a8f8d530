/// One control-change message as it arrives from the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlChange {
    pub channel: u8,
    pub controller: u8,
    pub value: u8,
}

/// Row tag carried by a [`Notification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Knob,
    Incrementor,
}

/// A knob turn or a committed button increment/decrement.
///
/// Knob turns carry `knob_delta`, button actions carry `direction` (+1 or -1);
/// the other field is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    pub index: u8,
    pub row: Row,
    pub knob_delta: Option<i32>,
    pub direction: Option<i32>,
}

/// A button combo addressing a jump target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jump {
    pub group: u8,
    pub index: u8,
}

pub type NotifyCallback = Box<dyn FnMut(Notification) + Send + 'static>;
pub type JumpCallback = Box<dyn FnMut(Jump) + Send + 'static>;

/// Interface a control surface offers to the host editor.
///
/// The host registers its two subscribers, then attaches the controller to
/// a MIDI input (see [`crate::midi_input::MidiInputLink`]) which feeds every
/// control change through [`Controller::handle_control_change`].
pub trait Controller {
    /// Port-name hint for the MIDI input the surface shows up on.
    fn remote_midi_device(&self) -> &str;

    /// Layout resource the host UI should load for this surface.
    fn layout_name(&self) -> &str;

    /// Replace the notification subscriber.
    fn register_notify(&mut self, callback: NotifyCallback);

    /// Replace the jump subscriber.
    fn register_jump(&mut self, callback: JumpCallback);

    fn handle_control_change(&mut self, cc: ControlChange);
}
