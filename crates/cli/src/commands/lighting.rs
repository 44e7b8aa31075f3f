//! `set-color`

use anyhow::Result;
use rgb_fusion2_hid_protocol::LightingRequest;
use serde_json::json;

use crate::commands::{DeviceSelector, SetColorArgs};
use crate::output;

/// Resolve every name and color before any device is opened.
pub fn resolve(args: &SetColorArgs) -> Result<LightingRequest> {
    Ok(LightingRequest::from_names(
        &args.channel,
        &args.mode,
        &args.colors,
        &args.speed,
    )?)
}

pub fn set_color(args: &SetColorArgs, selector: &DeviceSelector, json: bool) -> Result<()> {
    let request = resolve(args)?;
    let mut proto = selector.open()?;
    proto.set_color(&request)?;

    let message = match request.color {
        Some(color) => format!("{} set to {} {}", request.selection, request.mode, color),
        None => format!("{} set to {}", request.selection, request.mode),
    };
    let details = json!({
        "channel": request.selection.to_string(),
        "mode": request.mode.to_string(),
        "color": request.color.map(|c| c.to_string()),
        "speed": request.speed.to_string(),
        "dropped_colors": request.dropped_colors,
    });
    output::print_success(&message, &details, json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgb_fusion2_hid_protocol::{
        Channel, ChannelSelection, ColorMode, Rgb, RgbFusionError, Speed,
    };

    fn args(channel: &str, mode: &str, colors: &[&str]) -> SetColorArgs {
        SetColorArgs {
            channel: channel.to_string(),
            mode: mode.to_string(),
            colors: colors.iter().map(|c| c.to_string()).collect(),
            speed: "normal".to_string(),
        }
    }

    #[test]
    fn resolves_names_and_colors() -> Result<()> {
        let request = resolve(&args("led2", "pulse", &["#00ff00"]))?;
        assert_eq!(request.selection, ChannelSelection::Single(Channel::Led2));
        assert_eq!(request.mode, ColorMode::Pulse);
        assert_eq!(request.color, Some(Rgb::new(0, 255, 0)));
        assert_eq!(request.speed, Speed::Normal);
        Ok(())
    }

    #[test]
    fn bad_color_is_an_invalid_color_error() {
        let err = resolve(&args("sync", "static", &["nothex"])).err();
        let kind = err.as_ref().and_then(|e| e.downcast_ref::<RgbFusionError>());
        assert!(matches!(kind, Some(RgbFusionError::InvalidColor(_))));
    }

    #[test]
    fn unknown_mode_wins_over_bad_color() {
        let err = resolve(&args("led1", "rainbow", &["zz"])).err();
        let kind = err.as_ref().and_then(|e| e.downcast_ref::<RgbFusionError>());
        assert!(matches!(kind, Some(RgbFusionError::UnknownMode(_))));
    }

    #[test]
    fn colorless_mode_ignores_bad_color_literals() -> Result<()> {
        let request = resolve(&args("led1", "off", &["zz"]))?;
        assert_eq!(request.color, None);
        assert_eq!(request.dropped_colors, 1);
        Ok(())
    }
}
