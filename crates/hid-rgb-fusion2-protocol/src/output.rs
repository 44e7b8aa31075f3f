//! RGB Fusion 2.0 feature-report encoding.
//!
//! Every write is a 64-byte feature report whose first byte is the report ID
//! `0xCC`. Settings reports are staged per channel and only take effect once
//! the execute frame is sent.
//!
//! # Settings report layout
//!
//! ```text
//! 0      report ID (0xCC)
//! 1..=2  channel address pair
//! 11     mode code
//! 12     brightness (clamped to the mode's cap)
//! 13     reserved, zero
//! 14..=16 color, blue/green/red
//! 22..=27 timing bytes from the mode family's speed table
//! 30     cycle count
//! 31     pulse flag
//! 32     flash count
//! ```
//!
//! All other bytes are zero.

#![deny(static_mut_refs)]

use crate::ids::{REPORT_ID, WRITE_LEN, commands, settings_offsets as off};
use crate::types::{ChannelAddress, ColorMode, Rgb, Speed};
use crate::{RgbFusionError, RgbFusionResult};

/// One zero-padded feature report.
pub type Report = [u8; WRITE_LEN];

/// Brightness requested by every caller today; the per-mode cap does the
/// actual limiting.
pub const DEFAULT_BRIGHTNESS: u8 = 100;

fn padded(frame: &[u8]) -> Report {
    let mut out = [0u8; WRITE_LEN];
    for (dst, src) in out.iter_mut().zip(frame) {
        *dst = *src;
    }
    out
}

/// Init command. The device answers with its identification block.
pub fn build_init_report() -> Report {
    padded(&[REPORT_ID, commands::INIT])
}

/// Execute command: apply every settings report staged since the last execute.
pub fn build_execute_report() -> Report {
    padded(&[REPORT_ID, commands::EXECUTE, commands::EXECUTE_ARG])
}

/// Zero-value report for one channel, used by reset.
///
/// Only the first address byte is sent; the second stays zero.
pub fn build_reset_report(address: ChannelAddress) -> Report {
    padded(&[REPORT_ID, address.0, 0x00])
}

/// Overwrite the address pair of a settings report in place.
pub fn set_address(report: &mut Report, address: ChannelAddress) {
    report[off::ADDRESS] = address.0;
    report[off::ADDRESS + 1] = address.1;
}

/// Build the settings report template for `mode`.
///
/// The address pair is left zero; the sequencer fills it per channel.
///
/// - Modes that take a color require `color`, else [`RgbFusionError::MissingColor`].
/// - Modes that don't take a color encode black whatever `color` holds.
/// - `brightness` is clamped to the mode's cap.
/// - Fixed-timing modes encode six zero speed bytes.
///
/// The result depends only on the arguments.
pub fn build_settings_report(
    mode: ColorMode,
    color: Option<Rgb>,
    speed: Speed,
    brightness: u8,
) -> RgbFusionResult<Report> {
    let desc = mode.descriptor();

    let color = if desc.takes_color {
        color.ok_or(RgbFusionError::MissingColor { mode })?
    } else {
        Rgb::BLACK
    };

    let mut out = [0u8; WRITE_LEN];
    out[0] = REPORT_ID;
    out[off::MODE] = desc.code;
    out[off::BRIGHTNESS] = brightness.min(desc.max_brightness);
    out[off::COLOR..off::COLOR + 3].copy_from_slice(&color.to_bgr());
    out[off::SPEED..off::SPEED + 6].copy_from_slice(&desc.timing.bytes(speed));
    out[off::CYCLE_COUNT] = desc.cycle_count;
    out[off::PULSE] = u8::from(desc.pulses);
    out[off::FLASH_COUNT] = desc.flash_count;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Channel;

    fn build(mode: ColorMode, color: Option<Rgb>, speed: Speed) -> RgbFusionResult<Report> {
        build_settings_report(mode, color, speed, DEFAULT_BRIGHTNESS)
    }

    #[test]
    fn command_frames_are_padded() {
        let init = build_init_report();
        assert_eq!(init.len(), 64);
        assert_eq!(&init[..2], &[0xCC, 0x60]);
        assert!(init[2..].iter().all(|&b| b == 0));

        let exec = build_execute_report();
        assert_eq!(&exec[..3], &[0xCC, 0x28, 0xFF]);
        assert!(exec[3..].iter().all(|&b| b == 0));
    }

    #[test]
    fn reset_report_uses_first_address_byte() {
        let r = build_reset_report(Channel::Led4.address());
        assert_eq!(&r[..3], &[0xCC, 0x23, 0x00]);
        assert!(r[3..].iter().all(|&b| b == 0));
    }

    #[test]
    fn set_address_only_touches_bytes_one_and_two() -> RgbFusionResult<()> {
        let template = build(ColorMode::Static, Some(Rgb::new(9, 8, 7)), Speed::Normal)?;
        let mut report = template;
        set_address(&mut report, Channel::Led7.address());
        assert_eq!(report[1], 0x26);
        assert_eq!(report[2], 0x40);
        assert_eq!(report[0], template[0]);
        assert_eq!(&report[3..], &template[3..]);
        Ok(())
    }

    #[test]
    fn static_red_layout() -> RgbFusionResult<()> {
        let r = build(ColorMode::Static, Some(Rgb::new(255, 0, 0)), Speed::Normal)?;
        assert_eq!(r[0], 0xCC);
        assert_eq!(r[11], 0x01);
        assert_eq!(r[12], 90);
        assert_eq!(r[13], 0x00);
        assert_eq!(&r[14..17], &[0x00, 0x00, 0xFF]);
        assert_eq!(&r[22..28], &[0; 6]);
        assert_eq!(&r[30..33], &[0, 0, 0]);
        Ok(())
    }

    #[test]
    fn pulse_layout_carries_speed_and_flag() -> RgbFusionResult<()> {
        let r = build(ColorMode::Pulse, Some(Rgb::new(0, 0x80, 0xFF)), Speed::Slowest)?;
        assert_eq!(r[11], 0x02);
        assert_eq!(r[12], 90);
        assert_eq!(&r[14..17], &[0xFF, 0x80, 0x00]);
        assert_eq!(&r[22..28], &[0x40, 0x06, 0x40, 0x06, 0x20, 0x03]);
        assert_eq!(r[31], 1);
        assert_eq!(r[32], 0);
        Ok(())
    }

    #[test]
    fn double_flash_sets_flash_count() -> RgbFusionResult<()> {
        let r = build(ColorMode::DoubleFlash, Some(Rgb::new(1, 1, 1)), Speed::Ludicrous)?;
        assert_eq!(r[11], 0x03);
        assert_eq!(r[12], 100);
        assert_eq!(&r[22..28], &[0x64, 0x00, 0x64, 0x00, 0x40, 0x06]);
        assert_eq!(r[31], 1);
        assert_eq!(r[32], 2);
        Ok(())
    }

    #[test]
    fn color_cycle_ignores_color_and_sets_cycle_count() -> RgbFusionResult<()> {
        let r = build(ColorMode::ColorCycle, Some(Rgb::new(255, 255, 255)), Speed::Normal)?;
        assert_eq!(r[11], 0x04);
        assert_eq!(&r[14..17], &[0, 0, 0]);
        assert_eq!(&r[22..28], &[0x52, 0x03, 0xEE, 0x02, 0x00, 0x00]);
        assert_eq!(r[30], 7);
        assert_eq!(r[31], 0);
        Ok(())
    }

    #[test]
    fn off_forces_black_and_zero_brightness() -> RgbFusionResult<()> {
        let r = build(ColorMode::Off, Some(Rgb::new(255, 255, 255)), Speed::Fastest)?;
        assert_eq!(r[11], 0x01);
        assert_eq!(r[12], 0);
        assert_eq!(&r[14..17], &[0, 0, 0]);
        assert_eq!(&r[22..28], &[0; 6]);
        Ok(())
    }

    #[test]
    fn missing_color_is_rejected() {
        let color_modes = [
            ColorMode::Static,
            ColorMode::Pulse,
            ColorMode::Flash,
            ColorMode::DoubleFlash,
        ];
        for mode in color_modes {
            let result = build(mode, None, Speed::Normal);
            assert!(matches!(
                result,
                Err(RgbFusionError::MissingColor { mode: m }) if m == mode
            ));
        }
    }

    #[test]
    fn colorless_modes_accept_no_color() {
        assert!(build(ColorMode::Off, None, Speed::Normal).is_ok());
        assert!(build(ColorMode::ColorCycle, None, Speed::Normal).is_ok());
    }

    #[test]
    fn brightness_below_cap_is_kept() -> RgbFusionResult<()> {
        let r = build_settings_report(ColorMode::Flash, Some(Rgb::BLACK), Speed::Normal, 42)?;
        assert_eq!(r[12], 42);
        Ok(())
    }
}
