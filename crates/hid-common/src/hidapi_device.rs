//! hidapi-backed feature-report device.

use std::ffi::CString;

use hidapi::{HidApi, HidDevice};
use tracing::{debug, trace};

use crate::{FeatureReportDevice, HidCommonError, HidCommonResult, HidDeviceInfo};

/// Convert a hidapi enumeration entry into the transport-neutral info type.
pub fn device_info_from_hidapi(info: &hidapi::DeviceInfo) -> HidDeviceInfo {
    let mut out = HidDeviceInfo::new(
        info.vendor_id(),
        info.product_id(),
        info.path().to_string_lossy().into_owned(),
    )
    .with_usage(info.usage_page(), info.usage())
    .with_interface_number(info.interface_number());
    if let Some(serial) = info.serial_number() {
        out = out.with_serial(serial);
    }
    if let Some(manufacturer) = info.manufacturer_string() {
        out = out.with_manufacturer(manufacturer);
    }
    if let Some(product) = info.product_string() {
        out = out.with_product_name(product);
    }
    out
}

/// List every HID interface exposed by `vendor_id` whose product ID is in `product_ids`.
pub fn enumerate_devices(
    api: &HidApi,
    vendor_id: u16,
    product_ids: &[u16],
) -> Vec<HidDeviceInfo> {
    api.device_list()
        .map(device_info_from_hidapi)
        .filter(|info| product_ids.iter().any(|&pid| info.matches(vendor_id, pid)))
        .collect()
}

/// Feature-report device backed by a hidapi handle.
///
/// The OS handle is opened on first I/O and closed by [`release`]. A released
/// device reopens transparently on the next call.
///
/// [`release`]: FeatureReportDevice::release
pub struct HidapiFeatureDevice {
    api: HidApi,
    info: HidDeviceInfo,
    path: CString,
    handle: Option<HidDevice>,
}

impl HidapiFeatureDevice {
    pub fn new(api: HidApi, info: HidDeviceInfo) -> HidCommonResult<Self> {
        let path = CString::new(info.path.clone())
            .map_err(|e| HidCommonError::OpenError(format!("invalid device path: {e}")))?;
        Ok(Self {
            api,
            info,
            path,
            handle: None,
        })
    }

    fn acquire(&mut self) -> HidCommonResult<&HidDevice> {
        if self.handle.is_none() {
            debug!("Opening HID device {}", self.info.path);
            let device = self
                .api
                .open_path(&self.path)
                .map_err(|e| HidCommonError::OpenError(format!("{}: {e}", self.info.path)))?;
            self.handle = Some(device);
        }
        self.handle
            .as_ref()
            .ok_or_else(|| HidCommonError::OpenError(self.info.path.clone()))
    }
}

impl FeatureReportDevice for HidapiFeatureDevice {
    fn write_feature_report(&mut self, data: &[u8]) -> HidCommonResult<usize> {
        let device = self.acquire()?;
        trace!("SET_FEATURE {:02X?}", data);
        device
            .send_feature_report(data)
            .map_err(|e| HidCommonError::WriteError(e.to_string()))?;
        Ok(data.len())
    }

    fn read_feature_report(&mut self, report_id: u8, len: usize) -> HidCommonResult<Vec<u8>> {
        let device = self.acquire()?;
        let mut buf = vec![0u8; len.max(1)];
        if let Some(first) = buf.first_mut() {
            *first = report_id;
        }
        let read = device
            .get_feature_report(&mut buf)
            .map_err(|e| HidCommonError::ReadError(e.to_string()))?;
        buf.truncate(read);
        trace!("GET_FEATURE {:02X?}", buf);
        Ok(buf)
    }

    fn release(&mut self) {
        if self.handle.take().is_some() {
            debug!("Released HID device {}", self.info.path);
        }
    }

    fn get_device_info(&self) -> &HidDeviceInfo {
        &self.info
    }
}
