//! RGB Fusion 2.0 USB identifiers, command bytes, and report layout.

/// ITE Tech. Inc. USB vendor ID (the controller silicon vendor).
pub const ITE_VENDOR_ID: u16 = 0x048D;

/// Known RGB Fusion 2.0 controller product IDs.
pub mod product_ids {
    /// IT5702 controller.
    pub const IT5702: u16 = 0x5702;
    /// IT8297 controller.
    pub const IT8297: u16 = 0x8297;
}

/// Report ID carried as byte 0 of every write and expected as byte 0 of every read.
///
/// On non-Linux hosts the same value is the top-level HID usage of the only
/// interface that accepts lighting commands.
pub const REPORT_ID: u8 = 0xCC;

/// Command bytes carried at offset 1 of fixed command frames.
pub mod commands {
    /// Request the identification block read back by `GET_FEATURE`.
    pub const INIT: u8 = 0x60;
    /// Apply previously staged channel settings.
    pub const EXECUTE: u8 = 0x28;
    /// Argument byte following [`EXECUTE`].
    pub const EXECUTE_ARG: u8 = 0xFF;
}

/// Feature-report write length, zero-padded. The report ID is included.
pub const WRITE_LEN: usize = 64;

/// Feature-report read length requested for the init response.
pub const READ_LEN: usize = 64;

/// Status byte that marks a successful init response.
pub const STATUS_OK: u8 = 0x01;

/// Byte offsets inside a settings report.
pub mod settings_offsets {
    /// Channel address pair, bytes 1 and 2.
    pub const ADDRESS: usize = 1;
    pub const MODE: usize = 11;
    pub const BRIGHTNESS: usize = 12;
    /// Blue, green, red. Byte 13 is reserved and always zero.
    pub const COLOR: usize = 14;
    /// Six timing bytes.
    pub const SPEED: usize = 22;
    pub const CYCLE_COUNT: usize = 30;
    pub const PULSE: usize = 31;
    pub const FLASH_COUNT: usize = 32;
}

/// Byte offsets inside the init response.
pub mod init_offsets {
    pub const REPORT_ID: usize = 0;
    pub const STATUS: usize = 1;
    pub const CHANNEL_COUNT: usize = 3;
    /// Four firmware version components.
    pub const FIRMWARE: usize = 4;
    /// Start of the NUL-terminated ASCII device name.
    pub const NAME: usize = 12;
}

/// Returns `true` when `product_id` is a known RGB Fusion 2.0 controller.
pub fn is_rgb_fusion2_product(product_id: u16) -> bool {
    matches!(product_id, product_ids::IT5702 | product_ids::IT8297)
}

/// Returns `true` when an enumerated HID interface should be driven.
///
/// These controllers expose several top-level usages. On Windows and macOS
/// each usage is a separate handle and only the one whose usage equals
/// [`REPORT_ID`] accepts lighting commands. On Linux a single hidraw node
/// covers all of them.
pub fn accepts_interface(usage: u16, is_linux: bool) -> bool {
    is_linux || usage == u16::from(REPORT_ID)
}
