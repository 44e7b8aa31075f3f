//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use rgb_fusion2_hid_protocol::StatusItem;
use serde::Serialize;
use serde_json::json;

use crate::commands::device::ListedDevice;
use crate::error::ErrorKind;

fn print_json(value: &serde_json::Value, what: &str) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format {} as JSON: {}", what, e),
    }
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": ErrorKind::of(error).name()
        }
    });
    print_json(&error_json, "error");
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

pub fn print_device_list(devices: &[ListedDevice], json: bool) {
    if json {
        print_json(
            &json!({
                "success": true,
                "devices": devices
            }),
            "device list",
        );
        return;
    }

    if devices.is_empty() {
        println!("{}", "No RGB Fusion 2.0 controllers found".yellow());
        return;
    }

    println!("{}", "Controllers:".bold());
    for device in devices {
        println!(
            "  {} {} ({})",
            "●".green(),
            device.description.bold(),
            format!("{:04x}:{:04x}", device.vendor_id, device.product_id).dimmed()
        );
        println!("    Path: {}", device.path);
        if let Some(name) = &device.product_name {
            println!("    Product: {}", name);
        }
        if let Some(serial) = &device.serial_number {
            println!("    Serial: {}", serial);
        }
    }
}

/// Print `(property, value, unit)` lines under a heading.
pub fn print_status_items(heading: &str, items: &[StatusItem], json: bool) {
    if json {
        print_json(
            &json!({
                "success": true,
                "status": items
            }),
            "status",
        );
        return;
    }

    if items.is_empty() {
        println!("{} {}", heading.bold(), "no status reported".dimmed());
        return;
    }

    println!("{}", heading.bold());
    let width = items.iter().map(|i| i.property.len()).max().unwrap_or(0);
    for item in items {
        println!(
            "  {:<width$}  {} {}",
            item.property,
            item.value.cyan(),
            item.unit,
            width = width
        );
    }
}

/// Print a one-line confirmation, or `{"success": true, ...details}`.
pub fn print_success<T: Serialize>(message: &str, details: &T, json: bool) {
    if json {
        let mut value = json!({ "success": true });
        if let (Some(obj), Ok(serde_json::Value::Object(extra))) =
            (value.as_object_mut(), serde_json::to_value(details))
        {
            obj.extend(extra);
        }
        print_json(&value, "result");
    } else {
        println!("{} {}", "✓".green(), message);
    }
}
