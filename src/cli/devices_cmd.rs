//! Devices command handler

use cpal::traits::{DeviceTrait, HostTrait};

use super::presenter::Presenter;

/// List available audio input devices
pub fn handle_devices_command(presenter: &Presenter) -> Result<(), String> {
    let host = cpal::default_host();

    let default_name = host
        .default_input_device()
        .and_then(|d| d.name().ok());

    let devices = host
        .input_devices()
        .map_err(|e| format!("Failed to enumerate input devices: {}", e))?;

    let mut found = false;
    for device in devices {
        found = true;
        let name = match device.name() {
            Ok(name) => name,
            Err(_) => continue,
        };
        if default_name.as_deref() == Some(name.as_str()) {
            presenter.output(&format!("{} (default)", name));
        } else {
            presenter.output(&name);
        }
    }

    if !found {
        presenter.warn("No audio input devices found");
    }

    Ok(())
}
