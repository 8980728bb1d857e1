//! Error types for the driver
//!
//! Two layers, mirroring the hardware stack:
//!
//! - [`BusError`] - SPI or GPIO failure inside the transport adaptor
//! - [`Error`] - driver-level failures, generic over the bus so the concrete
//!   hardware error stays matchable
//!
//! Public drawing entry points on the manager never surface these: per the
//! device's error policy a failed write is logged and dropped, because a lost
//! pixel command beats crashing a headless display. The `Result` plumbing
//! exists so the panel and bus layers stay composable and testable.

use core::fmt::Debug;

use crate::bus::DisplayBus;

/// Errors that can occur at the transport level.
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum BusError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for BusError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for BusError<SpiErr, PinErr> {}

/// Errors that can occur when interacting with the panel.
pub enum Error<B: DisplayBus> {
    /// Transport error (SPI/GPIO), wrapping the bus implementation's error
    Bus(B::Error),
    /// Address window rejected: zero-sized or out of panel bounds
    InvalidWindow {
        /// X coordinate in pixels
        x: u16,
        /// Y coordinate in pixels
        y: u16,
        /// Width in pixels
        w: u16,
        /// Height in pixels
        h: u16,
    },
}

// Manual impl: deriving would bound the bus type itself on Debug, when only
// its error type needs to be.
impl<B: DisplayBus> Debug for Error<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => f.debug_tuple("Bus").field(e).finish(),
            Self::InvalidWindow { x, y, w, h } => f
                .debug_struct("InvalidWindow")
                .field("x", x)
                .field("y", y)
                .field("w", w)
                .field("h", h)
                .finish(),
        }
    }
}

impl<B: DisplayBus> core::fmt::Display for Error<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(_) => write!(f, "Bus error"),
            Self::InvalidWindow { x, y, w, h } => {
                write!(f, "Invalid address window: x={x}, y={y}, w={w}, h={h}")
            }
        }
    }
}

impl<B: DisplayBus> core::error::Error for Error<B> {}
