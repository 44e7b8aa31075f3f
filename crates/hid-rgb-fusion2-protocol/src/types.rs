//! Channel, mode, and speed tables for RGB Fusion 2.0 controllers.
//!
//! Every table here is closed: names resolve to enum variants through
//! `FromStr`, and everything downstream matches exhaustively on those
//! variants. Unknown names are rejected at parse time, before any I/O.

#![deny(static_mut_refs)]

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::RgbFusionError;
use crate::ids::product_ids;

// ── Devices ──────────────────────────────────────────────────────────────────

/// RGB Fusion 2.0 controller model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RgbFusion2Model {
    /// ITE IT5702 (PID `0x5702`).
    It5702,
    /// ITE IT8297 (PID `0x8297`).
    It8297,
}

impl RgbFusion2Model {
    pub const ALL: [Self; 2] = [Self::It5702, Self::It8297];

    /// Resolve a model from a USB product ID.
    pub fn from_product_id(pid: u16) -> Option<Self> {
        match pid {
            product_ids::IT5702 => Some(Self::It5702),
            product_ids::IT8297 => Some(Self::It8297),
            _ => None,
        }
    }

    pub fn product_id(self) -> u16 {
        match self {
            Self::It5702 => product_ids::IT5702,
            Self::It8297 => product_ids::IT8297,
        }
    }

    /// Human-readable description. Both controllers are experimental.
    pub fn description(self) -> &'static str {
        match self {
            Self::It5702 => "Gigabyte RGB Fusion 2.0 5702 Controller (experimental)",
            Self::It8297 => "Gigabyte RGB Fusion 2.0 8297 Controller (experimental)",
        }
    }
}

// ── Channels ─────────────────────────────────────────────────────────────────

/// Two-byte address that selects one lighting channel inside a settings report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ChannelAddress(pub u8, pub u8);

/// Logical lighting channel.
///
/// The mapping from channel to physical header varies between boards, so
/// channels carry generic names. Operators keep their own map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Channel {
    Led1,
    Led2,
    Led3,
    Led4,
    Led5,
    Led6,
    Led7,
}

impl Channel {
    /// All channels in table order. `sync` expands to exactly this sequence.
    pub const ALL: [Self; 7] = [
        Self::Led1,
        Self::Led2,
        Self::Led3,
        Self::Led4,
        Self::Led5,
        Self::Led6,
        Self::Led7,
    ];

    // An eighth address (0x27, 0x80) presumably exists but has never been
    // observed to drive anything.
    pub fn address(self) -> ChannelAddress {
        match self {
            Self::Led1 => ChannelAddress(0x20, 0x01),
            Self::Led2 => ChannelAddress(0x21, 0x02),
            Self::Led3 => ChannelAddress(0x22, 0x04),
            Self::Led4 => ChannelAddress(0x23, 0x08),
            Self::Led5 => ChannelAddress(0x24, 0x10),
            Self::Led6 => ChannelAddress(0x25, 0x20),
            Self::Led7 => ChannelAddress(0x26, 0x40),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Led1 => "led1",
            Self::Led2 => "led2",
            Self::Led3 => "led3",
            Self::Led4 => "led4",
            Self::Led5 => "led5",
            Self::Led6 => "led6",
            Self::Led7 => "led7",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Led1 => 0,
            Self::Led2 => 1,
            Self::Led3 => 2,
            Self::Led4 => 3,
            Self::Led5 => 4,
            Self::Led6 => 5,
            Self::Led7 => 6,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = RgbFusionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| RgbFusionError::UnknownChannel(s.to_string()))
    }
}

/// Target of a `set_color` call: one channel, or every channel at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChannelSelection {
    Single(Channel),
    /// Broadcast alias for all channels, in table order.
    Sync,
}

impl ChannelSelection {
    /// Channels this selection expands to, in the order they are written.
    pub fn channels(self) -> &'static [Channel] {
        match self {
            Self::Sync => &Channel::ALL,
            Self::Single(channel) => {
                let all: &'static [Channel; 7] = &Channel::ALL;
                let i = channel.index();
                all.get(i..=i).unwrap_or_default()
            }
        }
    }

    pub fn addresses(self) -> impl Iterator<Item = ChannelAddress> {
        self.channels().iter().map(|c| c.address())
    }
}

impl From<Channel> for ChannelSelection {
    fn from(channel: Channel) -> Self {
        Self::Single(channel)
    }
}

impl fmt::Display for ChannelSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(channel) => fmt::Display::fmt(channel, f),
            Self::Sync => f.write_str("sync"),
        }
    }
}

impl FromStr for ChannelSelection {
    type Err = RgbFusionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("sync") {
            return Ok(Self::Sync);
        }
        s.parse::<Channel>().map(Self::Single)
    }
}

// ── Speeds ───────────────────────────────────────────────────────────────────

/// Animation speed tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Speed {
    Slowest,
    Slower,
    #[default]
    Normal,
    Faster,
    Fastest,
    Ludicrous,
}

impl Speed {
    pub const ALL: [Self; 6] = [
        Self::Slowest,
        Self::Slower,
        Self::Normal,
        Self::Faster,
        Self::Fastest,
        Self::Ludicrous,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Slowest => "slowest",
            Self::Slower => "slower",
            Self::Normal => "normal",
            Self::Faster => "faster",
            Self::Fastest => "fastest",
            Self::Ludicrous => "ludicrous",
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Speed {
    type Err = RgbFusionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|speed| speed.name() == wanted)
            .ok_or_else(|| RgbFusionError::UnknownSpeed(s.to_string()))
    }
}

/// Six timing bytes per speed tier for one mode family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedTable {
    pub slowest: [u8; 6],
    pub slower: [u8; 6],
    pub normal: [u8; 6],
    pub faster: [u8; 6],
    pub fastest: [u8; 6],
    pub ludicrous: [u8; 6],
}

impl SpeedTable {
    pub fn get(&self, speed: Speed) -> [u8; 6] {
        match speed {
            Speed::Slowest => self.slowest,
            Speed::Slower => self.slower,
            Speed::Normal => self.normal,
            Speed::Faster => self.faster,
            Speed::Fastest => self.fastest,
            Speed::Ludicrous => self.ludicrous,
        }
    }
}

// Captured from the vendor software; the meaning of individual bytes differs
// per family, so they are kept verbatim.
const PULSE_SPEEDS: SpeedTable = SpeedTable {
    slowest: [0x40, 0x06, 0x40, 0x06, 0x20, 0x03],
    slower: [0x78, 0x05, 0x78, 0x05, 0xBC, 0x02],
    normal: [0xB0, 0x04, 0xB0, 0x04, 0xF4, 0x01],
    faster: [0xE8, 0x03, 0xE8, 0x03, 0xF4, 0x01],
    fastest: [0x84, 0x03, 0x84, 0x03, 0xC2, 0x01],
    ludicrous: [0x20, 0x03, 0x20, 0x03, 0x90, 0x01],
};

const FLASH_SPEEDS: SpeedTable = SpeedTable {
    slowest: [0x64, 0x00, 0x64, 0x00, 0x60, 0x09],
    slower: [0x64, 0x00, 0x64, 0x00, 0x90, 0x08],
    normal: [0x64, 0x00, 0x64, 0x00, 0xD0, 0x07],
    faster: [0x64, 0x00, 0x64, 0x00, 0x08, 0x07],
    fastest: [0x64, 0x00, 0x64, 0x00, 0x40, 0x06],
    ludicrous: [0x64, 0x00, 0x64, 0x00, 0x78, 0x05],
};

const DOUBLE_FLASH_SPEEDS: SpeedTable = SpeedTable {
    slowest: [0x64, 0x00, 0x64, 0x00, 0x28, 0x0A],
    slower: [0x64, 0x00, 0x64, 0x00, 0x60, 0x09],
    normal: [0x64, 0x00, 0x64, 0x00, 0x90, 0x08],
    faster: [0x64, 0x00, 0x64, 0x00, 0xD0, 0x07],
    fastest: [0x64, 0x00, 0x64, 0x00, 0x08, 0x07],
    ludicrous: [0x64, 0x00, 0x64, 0x00, 0x40, 0x06],
};

const COLOR_CYCLE_SPEEDS: SpeedTable = SpeedTable {
    slowest: [0x78, 0x05, 0xB0, 0x04, 0x00, 0x00],
    slower: [0x7E, 0x04, 0x1A, 0x04, 0x00, 0x00],
    normal: [0x52, 0x03, 0xEE, 0x02, 0x00, 0x00],
    faster: [0xF8, 0x02, 0x94, 0x02, 0x00, 0x00],
    fastest: [0x26, 0x02, 0xC2, 0x01, 0x00, 0x00],
    ludicrous: [0xCC, 0x01, 0x68, 0x01, 0x00, 0x00],
};

/// Mode family that owns a speed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpeedFamily {
    Pulse,
    Flash,
    DoubleFlash,
    ColorCycle,
}

impl SpeedFamily {
    pub fn table(self) -> &'static SpeedTable {
        match self {
            Self::Pulse => &PULSE_SPEEDS,
            Self::Flash => &FLASH_SPEEDS,
            Self::DoubleFlash => &DOUBLE_FLASH_SPEEDS,
            Self::ColorCycle => &COLOR_CYCLE_SPEEDS,
        }
    }

    pub fn timing(self, speed: Speed) -> [u8; 6] {
        self.table().get(speed)
    }
}

/// Whether a mode is animated, and if so which speed table it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpeedTiming {
    /// Speed bytes are always zero.
    Fixed,
    Variable(SpeedFamily),
}

impl SpeedTiming {
    pub fn bytes(self, speed: Speed) -> [u8; 6] {
        match self {
            Self::Fixed => [0; 6],
            Self::Variable(family) => family.timing(speed),
        }
    }

    pub fn is_variable(self) -> bool {
        matches!(self, Self::Variable(_))
    }
}

// ── Modes ────────────────────────────────────────────────────────────────────

/// Fixed parameters of one color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModeDescriptor {
    pub code: u8,
    pub pulses: bool,
    /// 0, 1 or 2.
    pub flash_count: u8,
    pub cycle_count: u8,
    /// Upper bound for the encoded brightness byte, 0–100.
    pub max_brightness: u8,
    pub takes_color: bool,
    pub timing: SpeedTiming,
}

/// Lighting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorMode {
    Off,
    Static,
    Pulse,
    Flash,
    DoubleFlash,
    ColorCycle,
}

impl ColorMode {
    pub const ALL: [Self; 6] = [
        Self::Off,
        Self::Static,
        Self::Pulse,
        Self::Flash,
        Self::DoubleFlash,
        Self::ColorCycle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Static => "static",
            Self::Pulse => "pulse",
            Self::Flash => "flash",
            Self::DoubleFlash => "double-flash",
            Self::ColorCycle => "color-cycle",
        }
    }

    /// Wire parameters for this mode.
    ///
    /// `off` reuses the static code with a brightness cap of zero.
    pub fn descriptor(self) -> ModeDescriptor {
        match self {
            Self::Off => ModeDescriptor {
                code: 0x01,
                pulses: false,
                flash_count: 0,
                cycle_count: 0,
                max_brightness: 0,
                takes_color: false,
                timing: SpeedTiming::Fixed,
            },
            Self::Static => ModeDescriptor {
                code: 0x01,
                pulses: false,
                flash_count: 0,
                cycle_count: 0,
                max_brightness: 90,
                takes_color: true,
                timing: SpeedTiming::Fixed,
            },
            Self::Pulse => ModeDescriptor {
                code: 0x02,
                pulses: true,
                flash_count: 0,
                cycle_count: 0,
                max_brightness: 90,
                takes_color: true,
                timing: SpeedTiming::Variable(SpeedFamily::Pulse),
            },
            Self::Flash => ModeDescriptor {
                code: 0x03,
                pulses: true,
                flash_count: 1,
                cycle_count: 0,
                max_brightness: 100,
                takes_color: true,
                timing: SpeedTiming::Variable(SpeedFamily::Flash),
            },
            Self::DoubleFlash => ModeDescriptor {
                code: 0x03,
                pulses: true,
                flash_count: 2,
                cycle_count: 0,
                max_brightness: 100,
                takes_color: true,
                timing: SpeedTiming::Variable(SpeedFamily::DoubleFlash),
            },
            Self::ColorCycle => ModeDescriptor {
                code: 0x04,
                pulses: false,
                flash_count: 0,
                cycle_count: 7,
                max_brightness: 100,
                takes_color: false,
                timing: SpeedTiming::Variable(SpeedFamily::ColorCycle),
            },
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorMode {
    type Err = RgbFusionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == wanted)
            .ok_or_else(|| RgbFusionError::UnknownMode(s.to_string()))
    }
}

// ── Colors ───────────────────────────────────────────────────────────────────

/// 24-bit color as the operator writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Device channel order.
    pub fn to_bgr(self) -> [u8; 3] {
        [self.b, self.g, self.r]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Accepts `rrggbb`, `#rrggbb`, `0xrrggbb`, or a decimal `r,g,b` triple.
impl FromStr for Rgb {
    type Err = RgbFusionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RgbFusionError::InvalidColor(s.to_string());
        let t = s.trim();

        if t.contains(',') {
            let mut parts = t.split(',').map(|p| p.trim().parse::<u8>());
            return match (parts.next(), parts.next(), parts.next(), parts.next()) {
                (Some(Ok(r)), Some(Ok(g)), Some(Ok(b)), None) => Ok(Self::new(r, g, b)),
                _ => Err(invalid()),
            };
        }

        let hex = t
            .strip_prefix('#')
            .or_else(|| t.strip_prefix("0x"))
            .or_else(|| t.strip_prefix("0X"))
            .unwrap_or(t);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let Ok(value) = u32::from_str_radix(hex, 16) else {
            return Err(invalid());
        };
        let [_, r, g, b] = value.to_be_bytes();
        Ok(Self::new(r, g, b))
    }
}
