//! Init response decoding.

#![deny(static_mut_refs)]

use std::fmt;

use serde::Serialize;

use crate::ProtocolViolation;
use crate::ids::{REPORT_ID, STATUS_OK, init_offsets as off};

/// Four-component firmware version, rendered `a.b.c.d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FirmwareVersion(pub [u8; 4]);

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{a}.{b}.{c}.{d}")
    }
}

/// Identification block returned by the init handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceIdentity {
    pub name: String,
    pub firmware: FirmwareVersion,
    pub channel_count: u8,
}

/// One `(property, value, unit)` line of device information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusItem {
    pub property: String,
    pub value: String,
    pub unit: String,
}

impl StatusItem {
    pub fn new(property: impl Into<String>, value: impl ToString, unit: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.to_string(),
            unit: unit.into(),
        }
    }
}

impl DeviceIdentity {
    pub fn status_items(&self) -> Vec<StatusItem> {
        vec![
            StatusItem::new("Hardware name", &self.name, ""),
            StatusItem::new("Firmware version", self.firmware, ""),
            StatusItem::new("LED channels", self.channel_count, ""),
        ]
    }
}

/// Validate and decode the response to the init command.
///
/// The header (report ID, status) is checked before anything else is read.
/// The device name runs from byte 12 to the first NUL, or to the end of the
/// buffer if there is none; non-ASCII bytes are skipped.
pub fn parse_init_response(data: &[u8]) -> Result<DeviceIdentity, ProtocolViolation> {
    let (Some(&report_id), Some(&status)) = (data.get(off::REPORT_ID), data.get(off::STATUS))
    else {
        return Err(ProtocolViolation::ShortResponse(data.len()));
    };
    if report_id != REPORT_ID {
        return Err(ProtocolViolation::WrongReportId {
            expected: REPORT_ID,
            found: report_id,
        });
    }
    if status != STATUS_OK {
        return Err(ProtocolViolation::WrongStatus(status));
    }

    let (Some(&channel_count), Some(fw), Some(tail)) = (
        data.get(off::CHANNEL_COUNT),
        data.get(off::FIRMWARE..off::FIRMWARE + 4),
        data.get(off::NAME..),
    ) else {
        return Err(ProtocolViolation::ShortResponse(data.len()));
    };

    let mut firmware = [0u8; 4];
    firmware.copy_from_slice(fw);

    let name: String = tail
        .iter()
        .take_while(|&&b| b != 0)
        .filter(|b| b.is_ascii())
        .map(|&b| char::from(b))
        .collect();

    Ok(DeviceIdentity {
        name,
        firmware: FirmwareVersion(firmware),
        channel_count,
    })
}
