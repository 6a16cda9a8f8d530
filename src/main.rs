use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc,
        Arc, Mutex,
    },
    time::Duration,
};

use clap::Parser;
use nocturn_cc::{
    midi_input, ControllerConfig, Jump, MidiInputLink, NocturnController, Notification, Row,
};
use tracing_subscriber::EnvFilter;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Print decoded Nocturn events.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// YAML config file; built-in defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// MIDI input port hint, overriding `remote_midi_device`.
    #[arg(long)]
    port: Option<String>,
    /// List MIDI input ports and exit.
    #[arg(long)]
    list_ports: bool,
}

#[derive(Debug, Clone, Copy)]
enum ControlMessage {
    Notify(Notification),
    Jump(Jump),
}

fn main() -> nocturn_cc::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    if cli.list_ports {
        for name in midi_input::list_input_ports()? {
            println!("{name}");
        }
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => ControllerConfig::load(path)?,
        None => ControllerConfig::default(),
    };
    let port_hint = cli
        .port
        .clone()
        .unwrap_or_else(|| config.remote_midi_device.clone());

    let (tx, rx) = mpsc::channel::<ControlMessage>();
    let mut controller = NocturnController::new(&config)?;
    let notify_tx = tx.clone();
    controller.set_notify_callback(move |notification| {
        let _ = notify_tx.send(ControlMessage::Notify(notification));
    });
    controller.set_jump_callback(move |jump| {
        let _ = tx.send(ControlMessage::Jump(jump));
    });

    // The link owns the controller, and with it both senders.
    let controller = Arc::new(Mutex::new(controller));
    let link = MidiInputLink::attach(controller, &port_hint, config.channel)?;
    println!(
        "Listening on \"{}\" (layout {}), Ctrl-C to quit",
        link.port_name(),
        config.layout
    );

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || r.store(false, Ordering::SeqCst))?;

    while running.load(Ordering::SeqCst) {
        if let Ok(message) = rx.recv_timeout(POLL_INTERVAL) {
            print_message(message);
        }
    }

    drop(link);
    Ok(())
}

fn print_message(message: ControlMessage) {
    match message {
        ControlMessage::Notify(Notification {
            index,
            row: Row::Knob,
            knob_delta: Some(delta),
            ..
        }) => {
            if delta != 0 {
                println!("knob {index}: {delta:+}");
            }
        }
        ControlMessage::Notify(Notification {
            index,
            row,
            direction: Some(direction),
            ..
        }) => {
            println!("button {index} ({row:?}): {direction:+}");
        }
        ControlMessage::Notify(notification) => {
            tracing::debug!(?notification, "unexpected notification shape");
        }
        ControlMessage::Jump(Jump { group, index }) => {
            println!("jump group {group} index {index}");
        }
    }
}
