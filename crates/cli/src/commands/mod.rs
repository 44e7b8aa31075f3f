//! Command implementations for fusionctl

pub mod device;
pub mod lighting;

use std::fmt;

use anyhow::Result;
use clap::{Args, Subcommand};
use fusion_hid_common::{HidDeviceInfo, HidapiFeatureDevice, enumerate_devices};
use hidapi::HidApi;
use rgb_fusion2_hid_protocol::{
    ITE_VENDOR_ID, RgbFusion2Model, RgbFusion2Protocol, accepts_interface,
};
use tracing::debug;

use crate::error::CliError;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List supported controllers that are present
    List,

    /// Run the init handshake and print the controller's identity
    Initialize,

    /// Print controller status
    Status,

    /// Set one channel, or all of them with `sync`
    SetColor(SetColorArgs),

    /// Switch every channel off
    Reset,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug)]
pub struct SetColorArgs {
    /// Channel name (led1..led7) or `sync`
    pub channel: String,

    /// Mode: off, static, pulse, flash, double-flash, color-cycle
    pub mode: String,

    /// Colors as rrggbb, #rrggbb, 0xrrggbb or r,g,b
    pub colors: Vec<String>,

    /// Animation speed: slowest, slower, normal, faster, fastest, ludicrous
    #[arg(long, env = "FUSIONCTL_SPEED", default_value = "normal")]
    pub speed: String,
}

/// Which controller to talk to.
#[derive(Args, Debug, Clone, Copy)]
pub struct DeviceSelector {
    /// USB vendor ID (hex)
    #[arg(
        long,
        global = true,
        env = "FUSIONCTL_VID",
        value_parser = parse_hex_u16,
        default_value = "048d"
    )]
    pub vid: u16,

    /// USB product ID (hex); any supported controller when omitted
    #[arg(long, global = true, env = "FUSIONCTL_PID", value_parser = parse_hex_u16)]
    pub pid: Option<u16>,
}

impl Default for DeviceSelector {
    fn default() -> Self {
        Self {
            vid: ITE_VENDOR_ID,
            pid: None,
        }
    }
}

impl fmt::Display for DeviceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pid {
            Some(pid) => write!(f, "{:04x}:{:04x}", self.vid, pid),
            None => write!(f, "{:04x}:*", self.vid),
        }
    }
}

impl DeviceSelector {
    fn product_ids(&self) -> Vec<u16> {
        match self.pid {
            Some(pid) => vec![pid],
            None => RgbFusion2Model::ALL.iter().map(|m| m.product_id()).collect(),
        }
    }

    /// Enumerate matching interfaces that accept lighting commands.
    pub fn probe(&self, api: &HidApi) -> Vec<HidDeviceInfo> {
        let is_linux = cfg!(target_os = "linux");
        enumerate_devices(api, self.vid, &self.product_ids())
            .into_iter()
            .filter(|info| {
                let accepted = accepts_interface(info.usage, is_linux);
                if !accepted {
                    debug!(
                        "Skipping {} interface with usage 0x{:04X}",
                        info.path, info.usage
                    );
                }
                accepted
            })
            .collect()
    }

    /// Open the first matching controller.
    pub fn open(&self) -> Result<RgbFusion2Protocol<HidapiFeatureDevice>> {
        let api = hid_api()?;
        let info = self
            .probe(&api)
            .into_iter()
            .next()
            .ok_or_else(|| CliError::DeviceNotFound(self.to_string()))?;
        debug!("Using {} ({})", info.display_name(), info.path);
        let device = HidapiFeatureDevice::new(api, info)?;
        Ok(RgbFusion2Protocol::new(device))
    }
}

pub fn hid_api() -> Result<HidApi, CliError> {
    HidApi::new().map_err(|e| CliError::HidBackend(e.to_string()))
}

fn parse_hex_u16(s: &str) -> Result<u16, String> {
    let s = s.trim_start_matches("0x").trim_start_matches("0X");
    u16::from_str_radix(s, 16).map_err(|e| format!("invalid hex value '{s}': {e}"))
}
