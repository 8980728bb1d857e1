//! ST7789 command definitions and vendor parameter blocks
//!
//! Command opcodes follow the Sitronix ST7789VW datasheet. The parameter
//! blocks are *not* datasheet defaults: they are the panel-specific voltage,
//! porch and gamma values the GeekMagic vendor firmware programs, captured
//! byte for byte. Deviating from them produces visible tint and flicker on
//! this panel, so they live here as constants rather than builder knobs.

/// Sleep Out: exit minimum-power mode. Requires a 120 ms settle delay.
pub const SLEEP_OUT: u8 = 0x11;

/// Display Inversion On.
///
/// This panel's IPS cell shows inverted colors without it.
pub const INVERSION_ON: u8 = 0x21;

/// Display On: start outputting frame memory to the panel.
pub const DISPLAY_ON: u8 = 0x29;

/// Column Address Set: two big-endian u16s, start and end column.
pub const CASET: u8 = 0x2A;

/// Row Address Set: two big-endian u16s, start and end row.
pub const RASET: u8 = 0x2B;

/// Memory Write: pixel data follows until the next command.
pub const RAMWR: u8 = 0x2C;

/// Tearing Effect Line On
pub const TEARING_EFFECT_ON: u8 = 0x35;

/// Memory Data Access Control: rotation and RGB/BGR order
pub const MADCTL: u8 = 0x36;

/// Interface Pixel Format
pub const COLMOD: u8 = 0x3A;

/// COLMOD parameter selecting 16-bit RGB565
pub const COLMOD_RGB565: u8 = 0x05;

/// Porch Setting
pub const PORCH_CONTROL: u8 = 0xB2;

/// Gate Control
pub const GATE_CONTROL: u8 = 0xB7;

/// VCOM Setting
pub const VCOM_SETTING: u8 = 0xBB;

/// LCM Control
pub const LCM_CONTROL: u8 = 0xC0;

/// VDV and VRH Command Enable
pub const VDV_VRH_ENABLE: u8 = 0xC2;

/// VRH Set
pub const VRH_SET: u8 = 0xC3;

/// VDV Set
pub const VDV_SET: u8 = 0xC4;

/// Frame Rate Control in Normal Mode
pub const FRAME_RATE_CONTROL: u8 = 0xC6;

/// Power Control 1
pub const POWER_CONTROL_1: u8 = 0xD0;

/// Vendor register programmed twice during bring-up, before and after
/// Power Control 1. Undocumented in the public datasheet.
pub const VENDOR_D6: u8 = 0xD6;

/// Positive Voltage Gamma Control
pub const GAMMA_POSITIVE: u8 = 0xE0;

/// Negative Voltage Gamma Control
pub const GAMMA_NEGATIVE: u8 = 0xE1;

/// Vendor gamma adjustment register
pub const GAMMA_CONTROL: u8 = 0xE4;

/// Porch timing for this panel
pub const PORCH_PARAMS: [u8; 5] = [0x1F, 0x1F, 0x00, 0x33, 0x33];

/// Gate voltages
pub const GATE_PARAMS: [u8; 1] = [0x00];

/// VCOM level
pub const VCOM_PARAMS: [u8; 1] = [0x36];

/// LCM polarity and gate order
pub const LCM_PARAMS: [u8; 1] = [0x2C];

/// Enable VDV/VRH programming via commands
pub const VDV_VRH_ENABLE_PARAMS: [u8; 1] = [0x01];

/// VRH voltage
pub const VRH_PARAMS: [u8; 1] = [0x13];

/// VDV voltage
pub const VDV_PARAMS: [u8; 1] = [0x20];

/// Normal-mode frame rate
pub const FRAME_RATE_PARAMS: [u8; 1] = [0x13];

/// Power control voltages
pub const POWER_CONTROL_1_PARAMS: [u8; 2] = [0xA4, 0xA1];

/// Vendor 0xD6 payload
pub const VENDOR_D6_PARAMS: [u8; 1] = [0xA1];

/// Positive gamma curve for this panel
pub const GAMMA_POSITIVE_PARAMS: [u8; 14] = [
    0xF0, 0x08, 0x0E, 0x09, 0x08, 0x04, 0x2F, 0x33, 0x45, 0x36, 0x13, 0x12, 0x2A, 0x2D,
];

/// Negative gamma curve for this panel
pub const GAMMA_NEGATIVE_PARAMS: [u8; 14] = [
    0xF0, 0x0E, 0x12, 0x0C, 0x0A, 0x15, 0x2E, 0x32, 0x44, 0x39, 0x17, 0x18, 0x2B, 0x2F,
];

/// Vendor gamma adjustment payload
pub const GAMMA_CONTROL_PARAMS: [u8; 3] = [0x1D, 0x00, 0x00];

/// MADCTL value for each mounting rotation.
///
/// Index by [`crate::config::Rotation`] code. Codes 2 and 4 share a value:
/// the stock product mounts the panel upside down and the vendor firmware
/// reserves code 4 for that orientation.
pub const MADCTL_FOR_ROTATION: [u8; 5] = [0x00, 0x60, 0xC0, 0xA0, 0xC0];
