//! Panel configuration types and builder
//!
//! [`PanelConfig`] carries everything the bus and panel layers need to know
//! about one hardware variant: geometry, mounting rotation, SPI electrical
//! settings and control-line polarities. Defaults describe the stock
//! GeekMagic/HelloCubic unit. The builder is infallible: out-of-range values
//! fall back to the stock defaults instead of erroring, matching how the
//! device treats a corrupt on-flash configuration.

/// Default panel width and height in pixels
pub const DEFAULT_DIMENSION: u16 = 240;

/// Default SPI clock in Hz
pub const DEFAULT_SPI_HZ: u32 = 40_000_000;

/// Mounting rotation of the panel.
///
/// Codes 0-3 are the usual quarter turns. [`Rotation::Mounted`] (code 4) is
/// the stock product orientation: the panel is installed upside down in the
/// enclosure, so it drives the same memory access order as
/// [`Rotation::Deg180`] while remaining distinguishable in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    /// No rotation
    Deg0 = 0,
    /// 90 degrees clockwise; swaps width and height
    Deg90 = 1,
    /// 180 degrees
    Deg180 = 2,
    /// 270 degrees clockwise; swaps width and height
    Deg270 = 3,
    /// Stock enclosure orientation (upside-down mount)
    #[default]
    Mounted = 4,
}

impl Rotation {
    /// Parse a configured rotation code, falling back to [`Rotation::Deg0`]
    /// for unknown values.
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Self::Deg90,
            2 => Self::Deg180,
            3 => Self::Deg270,
            4 => Self::Mounted,
            _ => Self::Deg0,
        }
    }

    /// Whether this rotation swaps the panel's width and height.
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

/// Panel and bus configuration.
///
/// Construct via [`PanelConfig::builder`]; the `Default` impl describes the
/// stock hardware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    /// Master enable. When false the panel is never initialized and every
    /// drawing entry point becomes a no-op.
    pub enabled: bool,
    /// Native (unrotated) width in pixels
    pub width: u16,
    /// Native (unrotated) height in pixels
    pub height: u16,
    /// Mounting rotation
    pub rotation: Rotation,
    /// SPI clock in Hz
    pub spi_hz: u32,
    /// SPI mode (0-3)
    pub spi_mode: u8,
    /// Chip select is asserted by driving the line high
    pub cs_active_high: bool,
    /// Data/command line level that selects *command* bytes
    pub dc_cmd_high: bool,
    /// Leave chip select asserted between write transactions
    pub keep_cs_asserted: bool,
    /// Backlight enable pin is active-low
    pub backlight_active_low: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            width: DEFAULT_DIMENSION,
            height: DEFAULT_DIMENSION,
            rotation: Rotation::Mounted,
            spi_hz: DEFAULT_SPI_HZ,
            spi_mode: 0,
            cs_active_high: true,
            dc_cmd_high: false,
            keep_cs_asserted: true,
            backlight_active_low: true,
        }
    }
}

impl PanelConfig {
    /// Start building a configuration from the stock defaults.
    pub fn builder() -> PanelBuilder {
        PanelBuilder::default()
    }

    /// Panel dimensions as seen by callers, after rotation.
    pub fn rotated_dimensions(&self) -> (u16, u16) {
        if self.rotation.swaps_dimensions() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }
}

/// Builder for [`PanelConfig`].
///
/// Every setter sanitizes its input: zero or otherwise unusable values are
/// replaced with the stock default rather than carried into the driver.
#[derive(Debug, Default)]
pub struct PanelBuilder {
    config: PanelConfig,
}

impl PanelBuilder {
    /// Master enable flag.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    /// Native panel width in pixels. Zero falls back to 240.
    pub fn width(mut self, width: u16) -> Self {
        self.config.width = if width == 0 { DEFAULT_DIMENSION } else { width };
        self
    }

    /// Native panel height in pixels. Zero falls back to 240.
    pub fn height(mut self, height: u16) -> Self {
        self.config.height = if height == 0 {
            DEFAULT_DIMENSION
        } else {
            height
        };
        self
    }

    /// Mounting rotation.
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.config.rotation = rotation;
        self
    }

    /// SPI clock in Hz. Zero falls back to 40 MHz.
    pub fn spi_hz(mut self, hz: u32) -> Self {
        self.config.spi_hz = if hz == 0 { DEFAULT_SPI_HZ } else { hz };
        self
    }

    /// SPI mode. Values above 3 fall back to mode 0.
    pub fn spi_mode(mut self, mode: u8) -> Self {
        self.config.spi_mode = if mode > 3 { 0 } else { mode };
        self
    }

    /// Chip-select polarity.
    pub fn cs_active_high(mut self, active_high: bool) -> Self {
        self.config.cs_active_high = active_high;
        self
    }

    /// Data/command line polarity for command bytes.
    pub fn dc_cmd_high(mut self, cmd_high: bool) -> Self {
        self.config.dc_cmd_high = cmd_high;
        self
    }

    /// Keep chip select asserted between transactions.
    pub fn keep_cs_asserted(mut self, keep: bool) -> Self {
        self.config.keep_cs_asserted = keep;
        self
    }

    /// Backlight enable pin polarity.
    pub fn backlight_active_low(mut self, active_low: bool) -> Self {
        self.config.backlight_active_low = active_low;
        self
    }

    /// Finish building.
    pub fn build(self) -> PanelConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_stock_hardware() {
        let config = PanelConfig::default();
        assert!(config.enabled);
        assert_eq!(config.width, 240);
        assert_eq!(config.height, 240);
        assert_eq!(config.rotation, Rotation::Mounted);
        assert_eq!(config.spi_hz, 40_000_000);
        assert_eq!(config.spi_mode, 0);
        assert!(config.cs_active_high);
        assert!(!config.dc_cmd_high);
        assert!(config.keep_cs_asserted);
        assert!(config.backlight_active_low);
    }

    #[test]
    fn builder_sanitizes_bad_values() {
        let config = PanelConfig::builder()
            .width(0)
            .height(0)
            .spi_hz(0)
            .spi_mode(7)
            .build();
        assert_eq!(config.width, 240);
        assert_eq!(config.height, 240);
        assert_eq!(config.spi_hz, 40_000_000);
        assert_eq!(config.spi_mode, 0);
    }

    #[test]
    fn rotation_code_parsing() {
        assert_eq!(Rotation::from_code(0), Rotation::Deg0);
        assert_eq!(Rotation::from_code(1), Rotation::Deg90);
        assert_eq!(Rotation::from_code(4), Rotation::Mounted);
        assert_eq!(Rotation::from_code(9), Rotation::Deg0);
    }

    #[test]
    fn quarter_turns_swap_dimensions() {
        let config = PanelConfig::builder()
            .width(240)
            .height(320)
            .rotation(Rotation::Deg90)
            .build();
        assert_eq!(config.rotated_dimensions(), (320, 240));

        let config = PanelConfig::builder()
            .width(240)
            .height(320)
            .rotation(Rotation::Mounted)
            .build();
        assert_eq!(config.rotated_dimensions(), (240, 320));
    }
}
