//! Error types for fusionctl

use fusion_hid_common::HidCommonError;
use rgb_fusion2_hid_protocol::RgbFusionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("HID backend unavailable: {0}")]
    HidBackend(String),
}

/// Failure class of an error chain, used for exit codes and JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DeviceNotFound,
    InvalidArgument,
    Protocol,
    Transport,
    Other,
}

impl ErrorKind {
    pub fn of(error: &anyhow::Error) -> Self {
        if let Some(e) = error.downcast_ref::<CliError>() {
            return match e {
                CliError::DeviceNotFound(_) => Self::DeviceNotFound,
                CliError::HidBackend(_) => Self::Transport,
            };
        }
        if let Some(e) = error.downcast_ref::<RgbFusionError>() {
            return match e {
                RgbFusionError::UnknownMode(_)
                | RgbFusionError::UnknownChannel(_)
                | RgbFusionError::UnknownSpeed(_)
                | RgbFusionError::InvalidColor(_)
                | RgbFusionError::MissingColor { .. } => Self::InvalidArgument,
                RgbFusionError::Protocol(_) => Self::Protocol,
                RgbFusionError::Transport(_) => Self::Transport,
            };
        }
        if error.downcast_ref::<HidCommonError>().is_some() {
            return Self::Transport;
        }
        Self::Other
    }

    pub fn exit_code(self) -> i32 {
        match self {
            Self::DeviceNotFound => 2,
            Self::InvalidArgument => 4,
            Self::Protocol => 5,
            Self::Transport | Self::Other => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::DeviceNotFound => "DeviceNotFound",
            Self::InvalidArgument => "InvalidArgument",
            Self::Protocol => "ProtocolError",
            Self::Transport => "TransportError",
            Self::Other => "Error",
        }
    }
}
