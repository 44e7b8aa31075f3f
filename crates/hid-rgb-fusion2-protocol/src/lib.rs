//! Gigabyte RGB Fusion 2.0 HID protocol: settings reports, init handshake,
//! and the write-then-execute transaction sequence.
//!
//! Report construction and response decoding are pure functions over fixed
//! 64-byte buffers. Only [`protocol`] touches a device, and it does so through
//! the three primitives of [`fusion_hid_common::FeatureReportDevice`].
//!
//! ## Supported hardware
//! - ITE IT5702 (`048d:5702`)
//! - ITE IT8297 (`048d:8297`)
//!
//! Seven generic channels (`led1`..`led7`) plus the `sync` alias, and six
//! modes: `off`, `static`, `pulse`, `flash`, `double-flash`, `color-cycle`.
//! The per-LED animation protocol of the addressable headers is not covered.

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod ids;
pub mod input;
pub mod output;
pub mod protocol;
pub mod request;
pub mod types;

pub use ids::{ITE_VENDOR_ID, REPORT_ID, accepts_interface, is_rgb_fusion2_product, product_ids};
pub use input::{DeviceIdentity, FirmwareVersion, StatusItem, parse_init_response};
pub use output::{
    DEFAULT_BRIGHTNESS, Report, build_execute_report, build_init_report, build_reset_report,
    build_settings_report, set_address,
};
pub use protocol::{DeviceSession, RgbFusion2Protocol, apply_transaction};
pub use request::LightingRequest;
pub use types::{
    Channel, ChannelAddress, ChannelSelection, ColorMode, ModeDescriptor, Rgb, RgbFusion2Model,
    Speed, SpeedFamily, SpeedTable, SpeedTiming,
};

use fusion_hid_common::HidCommonError;
use thiserror::Error;

/// Handshake failures. Always fatal: a malformed reply means the device is
/// incompatible or not responding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolViolation {
    #[error("unexpected report ID 0x{found:02X} (expected 0x{expected:02X})")]
    WrongReportId { expected: u8, found: u8 },

    #[error("unexpected status 0x{0:02X}")]
    WrongStatus(u8),

    #[error("response too short: {0} bytes")]
    ShortResponse(usize),
}

#[derive(Error, Debug)]
pub enum RgbFusionError {
    #[error("Unknown mode: {0}")]
    UnknownMode(String),

    #[error("Unknown channel: {0}")]
    UnknownChannel(String),

    #[error("Unknown speed: {0}")]
    UnknownSpeed(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("One color required for mode={mode}")]
    MissingColor { mode: ColorMode },

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolViolation),

    #[error(transparent)]
    Transport(#[from] HidCommonError),
}

pub type RgbFusionResult<T> = Result<T, RgbFusionError>;
