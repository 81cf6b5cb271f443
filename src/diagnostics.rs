//! Pad diagnostics for writing a correct button map.
//!
//! Dumps every detected gamepad with live button/axis readouts labelled by
//! the canonical indices the button map refers to. This is the "diagnostic
//! script" the default configuration tells users to verify their button
//! numbers with.

use colored::Colorize;
use gilrs::{Event, EventType, Gilrs};
use std::thread;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::input::gilrs_pad::{AXIS_ORDER, BUTTON_ORDER};

/// Print detailed information about all detected gamepads, then return.
///
/// Useful for troubleshooting detection issues and for checking which
/// physical index a given button reports, especially on third-party pads
/// with unusual layouts.
pub fn print_pad_diagnostics() {
    println!("\n{}", "=== Pad diagnostics ===".bold().cyan());
    println!("Platform: {}", std::env::consts::OS);

    let mut gilrs = match Gilrs::new() {
        Ok(g) => g,
        Err(e) => {
            warn!("Failed to initialize gilrs: {e}");
            println!("{}", "Could not initialize the input backend.".red());
            println!("This may indicate missing system libraries or permission issues.");
            return;
        }
    };

    // Give hot-plugged (Bluetooth) pads a moment to announce themselves.
    println!("Scanning for gamepads (3 seconds)...");
    let scan_start = Instant::now();
    while scan_start.elapsed() < Duration::from_secs(3) {
        while let Some(Event { event, .. }) = gilrs.next_event() {
            if event == EventType::Connected {
                println!("  gamepad connection detected...");
            }
        }
        thread::sleep(Duration::from_millis(100));
    }

    let gamepads: Vec<_> = gilrs.gamepads().collect();

    if gamepads.is_empty() {
        println!("{}", "No gamepads detected.".yellow());
        println!("Check that the pad is connected (USB, or Bluetooth paired) and drivers are installed.");
        return;
    }

    println!("{}", format!("Found {} gamepad(s):", gamepads.len()).green());

    for (id, gamepad) in gamepads {
        println!("\n{}", format!("Gamepad {id}: \"{}\"", gamepad.name()).bold());
        println!("  Connected: {}", gamepad.is_connected());
        println!("  UUID: {:?}", gamepad.uuid());
        println!("  Power: {:?}", gamepad.power_info());

        println!(
            "\n  {}",
            "Button indices (hold a button while running this to verify):".bold()
        );
        for (index, button) in BUTTON_ORDER.iter().enumerate() {
            let state = if gamepad.is_pressed(*button) {
                "PRESSED".green().bold()
            } else {
                "released".dimmed()
            };
            println!("    {index:2} {button:?}: {state}");
        }

        println!("\n  {}", "Axis indices:".bold());
        for (index, (axis, inverted)) in AXIS_ORDER.iter().enumerate() {
            let value = gamepad.value(*axis);
            let note = if *inverted {
                " (served negated: up reads negative)"
            } else {
                ""
            };
            println!("    {index:2} {axis:?}: {value:6.3}{note}");
        }
    }

    println!("\n{}", "=== End diagnostics ===".bold().cyan());
    println!("The indices above are what `mapping.button_map` and `mapping.dpad` refer to.");
}
