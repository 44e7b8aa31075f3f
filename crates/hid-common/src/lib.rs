//! Feature-report transport shared by the RGB Fusion 2.0 protocol and CLI.
//!
//! The protocol crate only ever needs three primitives from a device:
//! write a feature report, read a feature report, and release the handle
//! so another process can claim it. This crate defines that seam, a
//! hidapi-backed implementation, and a recording mock for tests.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod device_info;
pub mod feature_device;
pub mod hidapi_device;

pub use device_info::*;
pub use feature_device::*;
pub use hidapi_device::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HidCommonError {
    #[error("Failed to open device: {0}")]
    OpenError(String),

    #[error("Failed to read from device: {0}")]
    ReadError(String),

    #[error("Failed to write to device: {0}")]
    WriteError(String),

    #[error("Device disconnected")]
    Disconnected,
}

pub type HidCommonResult<T> = Result<T, HidCommonError>;
