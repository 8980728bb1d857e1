//! SPI transport adaptor with device-specific chip-select handling
//!
//! The GeekMagic panel wires chip select *active-high*, the opposite of what
//! every stock SPI display bus assumes, and the slow ESP8266 bus makes
//! per-write CS toggling measurably expensive. [`SpiDisplayBus`] therefore
//! owns the CS line itself (which is why it sits on [`SpiBus`] rather than
//! `SpiDevice` - a `SpiDevice` would assert CS per transaction with fixed
//! polarity) and exposes the panel driver's [`DisplayBus`] contract:
//! transaction bracketing plus raw command/data/pixel writes.
//!
//! The adaptor owns chip-select timing and data/command pin sequencing,
//! nothing else; every write delegates straight to the underlying SPI
//! peripheral.

use core::fmt::Debug;

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::config::PanelConfig;
use crate::error::BusError;

/// Chunk size in bytes for streaming pixel data through the SPI peripheral.
const PIXEL_CHUNK_BYTES: usize = 64;

/// Data bus contract consumed by the panel driver.
///
/// Modeled as a trait so the panel is generic over any transport satisfying
/// this capability set, not tied to one concrete SPI wiring. The recording
/// mock used throughout the test suite is the second implementation.
pub trait DisplayBus {
    /// Error type for bus operations
    type Error: Debug;

    /// Prepare the bus for use.
    ///
    /// `None` for either parameter means "use the configured default". If a
    /// chip-select pin is configured it is driven to its *inactive* level.
    /// Electrical clock/mode programming belongs to the HAL-constructed SPI
    /// peripheral; `begin` resolves defaults and conditions the control pins.
    fn begin(&mut self, speed_hz: Option<u32>, mode: Option<u8>) -> Result<(), Self::Error>;

    /// Open a write transaction: drive chip select to its *active* level.
    fn begin_write(&mut self) -> Result<(), Self::Error>;

    /// Close a write transaction.
    ///
    /// Chip select is returned to inactive only when the bus was configured
    /// without the keep-asserted policy.
    fn end_write(&mut self) -> Result<(), Self::Error>;

    /// Write a command byte (data/command pin at command level).
    fn write_command(&mut self, cmd: u8) -> Result<(), Self::Error>;

    /// Write a data byte.
    fn write(&mut self, data: u8) -> Result<(), Self::Error>;

    /// Write a 16-bit data word, most significant byte first.
    fn write16(&mut self, data: u16) -> Result<(), Self::Error>;

    /// Write one RGB565 pixel value `count` times.
    fn write_repeat(&mut self, pixel: u16, count: u32) -> Result<(), Self::Error>;

    /// Write a raw byte buffer as data.
    fn write_bytes(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Write a buffer of RGB565 pixels, each most significant byte first.
    fn write_pixels(&mut self, pixels: &[u16]) -> Result<(), Self::Error>;
}

/// Hardware SPI transport for the GeekMagic panel.
///
/// ## Type Parameters
///
/// * `SPI` - SPI peripheral implementing [`SpiBus`]
/// * `DC` - data/command select pin
/// * `CS` - chip select pin; `None` when the line is not connected
pub struct SpiDisplayBus<SPI, DC, CS> {
    spi: SPI,
    dc: DC,
    cs: Option<CS>,
    cs_active_high: bool,
    /// Leave CS asserted between transactions. Toggling it around every
    /// small write costs real throughput on this MCU's bus.
    keep_cs_asserted: bool,
    dc_cmd_high: bool,
    default_speed_hz: u32,
    default_mode: u8,
    speed_hz: u32,
    mode: u8,
}

impl<SPI, DC, CS> SpiDisplayBus<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    /// Create a new bus from a panel configuration.
    ///
    /// Chip-select polarity, data/command polarity, the keep-asserted policy
    /// and the default clock/mode are taken from `config`. Pass `cs: None`
    /// when the chip-select line is not wired; every CS operation then
    /// becomes a no-op.
    pub fn new(spi: SPI, dc: DC, cs: Option<CS>, config: &PanelConfig) -> Self {
        Self {
            spi,
            dc,
            cs,
            cs_active_high: config.cs_active_high,
            keep_cs_asserted: config.keep_cs_asserted,
            dc_cmd_high: config.dc_cmd_high,
            default_speed_hz: config.spi_hz,
            default_mode: config.spi_mode,
            speed_hz: config.spi_hz,
            mode: config.spi_mode,
        }
    }

    /// Resolved SPI clock in Hz after the last [`DisplayBus::begin`].
    pub fn speed_hz(&self) -> u32 {
        self.speed_hz
    }

    /// Resolved SPI mode after the last [`DisplayBus::begin`].
    pub fn mode(&self) -> u8 {
        self.mode
    }

    fn set_cs_level<E>(cs: &mut CS, active_high: bool, active: bool) -> Result<(), E>
    where
        CS: OutputPin<Error = E>,
    {
        // The electrical level follows the configured polarity, never a
        // hardcoded HIGH.
        if active == active_high {
            cs.set_high()
        } else {
            cs.set_low()
        }
    }

    fn cs_active(&mut self) -> Result<(), CS::Error> {
        match self.cs.as_mut() {
            Some(cs) => Self::set_cs_level(cs, self.cs_active_high, true),
            None => Ok(()),
        }
    }

    fn cs_inactive(&mut self) -> Result<(), CS::Error> {
        match self.cs.as_mut() {
            Some(cs) => Self::set_cs_level(cs, self.cs_active_high, false),
            None => Ok(()),
        }
    }

    fn dc_command(&mut self) -> Result<(), DC::Error> {
        if self.dc_cmd_high {
            self.dc.set_high()
        } else {
            self.dc.set_low()
        }
    }

    fn dc_data(&mut self) -> Result<(), DC::Error> {
        if self.dc_cmd_high {
            self.dc.set_low()
        } else {
            self.dc.set_high()
        }
    }
}

impl<SPI, DC, CS, PinErr> DisplayBus for SpiDisplayBus<SPI, DC, CS>
where
    SPI: SpiBus,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = BusError<SPI::Error, PinErr>;

    fn begin(&mut self, speed_hz: Option<u32>, mode: Option<u8>) -> Result<(), Self::Error> {
        self.speed_hz = speed_hz.unwrap_or(self.default_speed_hz);
        self.mode = mode.unwrap_or(self.default_mode);

        self.cs_inactive().map_err(BusError::Pin)?;
        self.dc_data().map_err(BusError::Pin)?;
        Ok(())
    }

    fn begin_write(&mut self) -> Result<(), Self::Error> {
        self.cs_active().map_err(BusError::Pin)
    }

    fn end_write(&mut self) -> Result<(), Self::Error> {
        self.spi.flush().map_err(BusError::Spi)?;

        if self.keep_cs_asserted {
            return Ok(());
        }

        self.cs_inactive().map_err(BusError::Pin)
    }

    fn write_command(&mut self, cmd: u8) -> Result<(), Self::Error> {
        self.dc_command().map_err(BusError::Pin)?;
        self.spi.write(&[cmd]).map_err(BusError::Spi)?;
        self.dc_data().map_err(BusError::Pin)
    }

    fn write(&mut self, data: u8) -> Result<(), Self::Error> {
        self.spi.write(&[data]).map_err(BusError::Spi)
    }

    fn write16(&mut self, data: u16) -> Result<(), Self::Error> {
        self.spi.write(&data.to_be_bytes()).map_err(BusError::Spi)
    }

    fn write_repeat(&mut self, pixel: u16, count: u32) -> Result<(), Self::Error> {
        let [hi, lo] = pixel.to_be_bytes();
        let mut chunk = [0u8; PIXEL_CHUNK_BYTES];
        for pair in chunk.chunks_exact_mut(2) {
            pair[0] = hi;
            pair[1] = lo;
        }

        let mut remaining = count as usize * 2;
        while remaining > 0 {
            let len = remaining.min(PIXEL_CHUNK_BYTES);
            self.spi.write(&chunk[..len]).map_err(BusError::Spi)?;
            remaining -= len;
        }
        Ok(())
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.spi.write(data).map_err(BusError::Spi)
    }

    fn write_pixels(&mut self, pixels: &[u16]) -> Result<(), Self::Error> {
        let mut chunk = [0u8; PIXEL_CHUNK_BYTES];
        for block in pixels.chunks(PIXEL_CHUNK_BYTES / 2) {
            let mut len = 0;
            for &px in block {
                let [hi, lo] = px.to_be_bytes();
                chunk[len] = hi;
                chunk[len + 1] = lo;
                len += 2;
            }
            self.spi.write(&chunk[..len]).map_err(BusError::Spi)?;
        }
        Ok(())
    }
}
