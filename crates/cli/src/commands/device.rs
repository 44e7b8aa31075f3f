//! Controller discovery, handshake, status and reset

use anyhow::Result;
use fusion_hid_common::HidDeviceInfo;
use rgb_fusion2_hid_protocol::RgbFusion2Model;
use serde::Serialize;
use serde_json::json;

use crate::commands::{DeviceSelector, hid_api};
use crate::output;

/// One controller interface as shown by `list`.
#[derive(Debug, Clone, Serialize)]
pub struct ListedDevice {
    pub vendor_id: u16,
    pub product_id: u16,
    pub description: String,
    pub path: String,
    pub product_name: Option<String>,
    pub serial_number: Option<String>,
}

impl From<HidDeviceInfo> for ListedDevice {
    fn from(info: HidDeviceInfo) -> Self {
        let description = RgbFusion2Model::from_product_id(info.product_id)
            .map(|m| m.description().to_string())
            .unwrap_or_else(|| info.display_name());
        Self {
            vendor_id: info.vendor_id,
            product_id: info.product_id,
            description,
            path: info.path,
            product_name: info.product_name,
            serial_number: info.serial_number,
        }
    }
}

pub fn list(selector: &DeviceSelector, json: bool) -> Result<()> {
    let api = hid_api()?;
    let devices: Vec<ListedDevice> = selector
        .probe(&api)
        .into_iter()
        .map(ListedDevice::from)
        .collect();
    output::print_device_list(&devices, json);
    Ok(())
}

pub fn initialize(selector: &DeviceSelector, json: bool) -> Result<()> {
    let mut proto = selector.open()?;
    let identity = proto.initialize()?;
    output::print_status_items("Controller", &identity.status_items(), json);
    Ok(())
}

pub fn status(selector: &DeviceSelector, json: bool) -> Result<()> {
    let mut proto = selector.open()?;
    let items = proto.get_status()?;
    output::print_status_items("Status", &items, json);
    Ok(())
}

pub fn reset(selector: &DeviceSelector, json: bool) -> Result<()> {
    let mut proto = selector.open()?;
    proto.reset_all_channels()?;
    output::print_success("All channels reset", &json!({ "reset": "all" }), json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listed_device_uses_model_description() {
        let info = HidDeviceInfo::new(0x048D, 0x8297, "/dev/hidraw4".to_string())
            .with_product_name("IT8297-GIGABYTE V1.0.10.0");
        let listed = ListedDevice::from(info);
        assert_eq!(
            listed.description,
            "Gigabyte RGB Fusion 2.0 8297 Controller (experimental)"
        );
        assert_eq!(listed.product_name.as_deref(), Some("IT8297-GIGABYTE V1.0.10.0"));
    }

    #[test]
    fn unknown_product_falls_back_to_display_name() {
        let info = HidDeviceInfo::new(0x048D, 0x1234, "/dev/hidraw5".to_string())
            .with_product_name("Other");
        let listed = ListedDevice::from(info.clone());
        assert_eq!(listed.description, info.display_name());
    }
}
