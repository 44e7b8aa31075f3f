//! Device operations: init handshake, staged settings writes, reset.
//!
//! Every operation holds the device through a [`DeviceSession`] and the
//! handle is released when the session drops, on success and on error.
//! Operations take `&mut self`, so two of them can never interleave on the
//! same device.

use std::ops::{Deref, DerefMut};

use fusion_hid_common::FeatureReportDevice;
use tracing::{debug, info, warn};

use crate::ids::{READ_LEN, REPORT_ID};
use crate::input::{DeviceIdentity, StatusItem, parse_init_response};
use crate::output::{
    Report, build_execute_report, build_init_report, build_reset_report, set_address,
};
use crate::request::LightingRequest;
use crate::types::{Channel, ChannelSelection};
use crate::RgbFusionResult;

/// Exclusive use of a device for one operation. Releases it on drop.
pub struct DeviceSession<'a, D: FeatureReportDevice + ?Sized> {
    device: &'a mut D,
}

impl<'a, D: FeatureReportDevice + ?Sized> DeviceSession<'a, D> {
    pub fn new(device: &'a mut D) -> Self {
        Self { device }
    }
}

impl<D: FeatureReportDevice + ?Sized> Deref for DeviceSession<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        self.device
    }
}

impl<D: FeatureReportDevice + ?Sized> DerefMut for DeviceSession<'_, D> {
    fn deref_mut(&mut self) -> &mut D {
        self.device
    }
}

impl<D: FeatureReportDevice + ?Sized> Drop for DeviceSession<'_, D> {
    fn drop(&mut self) {
        self.device.release();
        debug!("device released");
    }
}

/// Stage `template` on every channel of `selection`, then commit.
///
/// The address pair is rewritten for each channel in table order and one
/// execute frame follows the last write. The device is released before
/// returning.
///
/// If a write fails, the remaining channels are skipped and an execute frame
/// is still attempted so nothing stays staged. That commit applies the new
/// settings to every channel written before the failure, so after an error
/// the controller shows a partial update: earlier channels carry the new
/// settings and the failed channel and every later one keep their old ones.
/// The failed write's error is returned either way.
pub fn apply_transaction<D: FeatureReportDevice + ?Sized>(
    device: &mut D,
    selection: ChannelSelection,
    template: &Report,
) -> RgbFusionResult<()> {
    let mut session = DeviceSession::new(device);
    let mut report = *template;

    for channel in selection.channels() {
        let address = channel.address();
        set_address(&mut report, address);
        debug!(
            channel = %channel,
            "writing settings to address {:02X}:{:02X}",
            address.0,
            address.1
        );
        if let Err(e) = session.write_feature_report(&report) {
            if let Err(commit_err) = session.write_feature_report(&build_execute_report()) {
                warn!(error = %commit_err, "execute after failed write also failed");
            }
            return Err(e.into());
        }
    }

    session.write_feature_report(&build_execute_report())?;
    info!(selection = %selection, "settings committed");
    Ok(())
}

/// RGB Fusion 2.0 controller driven through a feature-report transport.
pub struct RgbFusion2Protocol<D: FeatureReportDevice> {
    device: D,
}

impl<D: FeatureReportDevice> RgbFusion2Protocol<D> {
    pub fn new(device: D) -> Self {
        Self { device }
    }

    /// Run the init handshake and decode the identification block.
    pub fn initialize(&mut self) -> RgbFusionResult<DeviceIdentity> {
        let mut session = DeviceSession::new(&mut self.device);
        debug!(path = %session.get_device_info().path, "initializing");

        session.write_feature_report(&build_init_report())?;
        let response = session.read_feature_report(REPORT_ID, READ_LEN)?;
        debug!("init response: {} bytes", response.len());

        let identity = parse_init_response(&response)?;
        info!(
            name = %identity.name,
            firmware = %identity.firmware,
            channels = identity.channel_count,
            "RGB Fusion 2.0 controller initialized"
        );
        Ok(identity)
    }

    /// No status is reported by these controllers.
    pub fn get_status(&mut self) -> RgbFusionResult<Vec<StatusItem>> {
        let _session = DeviceSession::new(&mut self.device);
        Ok(Vec::new())
    }

    /// Apply a validated request to the channels it selects.
    ///
    /// The settings report is built before the device is touched, so a
    /// missing color never produces I/O.
    pub fn set_color(&mut self, request: &LightingRequest) -> RgbFusionResult<()> {
        let template = request.report()?;
        debug!(
            mode = %request.mode,
            speed = %request.speed,
            color = ?request.color,
            "set_color"
        );
        apply_transaction(&mut self.device, request.selection, &template)
    }

    /// Write a zero-value report to every channel, then commit.
    ///
    /// The first failing write is returned immediately.
    pub fn reset_all_channels(&mut self) -> RgbFusionResult<()> {
        let mut session = DeviceSession::new(&mut self.device);
        for channel in Channel::ALL {
            debug!(channel = %channel, "resetting");
            session.write_feature_report(&build_reset_report(channel.address()))?;
        }
        session.write_feature_report(&build_execute_report())?;
        info!("all channels reset");
        Ok(())
    }
}
