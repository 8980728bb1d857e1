//! Display pipeline for GeekMagic/HelloCubic smart displays
//!
//! Driver stack for the 240x240 ST7789 panel found in GeekMagic-style
//! ESP8266 smart displays, from the SPI wire protocol up to the widgets a
//! remote HTTP client draws through the JSON command API.
//!
//! ## Features
//!
//! - `no_std` compatible (requires `alloc`)
//! - `embedded-hal` v1.0 support
//! - Custom SPI bus with configurable (commonly active-high) chip select
//! - Vendor bring-up sequence with cooperative yield points
//! - Fixed-width bitmap text with greedy word-wrap into UI regions
//! - `embedded-graphics` primitives via `DrawTarget`
//! - GIF playback coordination over a pluggable decoder
//! - serde-based remote drawing command interpreter
//!
//! ## Usage
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::SpiBus;
//! use geekmagic_lcd::{DisplayManager, NoopGif, NoopYield, Panel, PanelConfig, SpiDisplayBus};
//! # use core::convert::Infallible;
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiBus for MockSpi {
//! #     fn read(&mut self, _: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn write(&mut self, _: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer(&mut self, _: &mut [u8], _: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer_in_place(&mut self, _: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! let config = PanelConfig::builder().build();
//! let bus = SpiDisplayBus::new(MockSpi, MockPin, Some(MockPin), &config);
//! let panel = Panel::new(bus, Some(MockPin), Some(MockPin), config);
//! let mut display = DisplayManager::new(panel, NoopGif);
//!
//! let mut delay = MockDelay;
//! display.begin(0, &mut delay, &mut NoopYield);
//! if display.is_ready() {
//!     display.fill_screen(geekmagic_lcd::color::RED);
//! }
//! ```

#![no_std]

extern crate alloc;

/// SPI transport adaptor with device-specific chip-select handling
pub mod bus;
/// RGB565 color constants and hex string conversion
pub mod color;
/// ST7789 command definitions and vendor parameter blocks
pub mod command;
/// Panel configuration types and builder
pub mod config;
/// Error types for the driver
pub mod error;
/// Fixed-width 5x7 bitmap font in a 6x8 cell
pub mod font;
/// GIF decoder boundary trait
pub mod gif;
/// Remote drawing command interpreter
pub mod interpreter;
/// UI regions and greedy word-wrap
pub mod layout;
/// Display manager: lifecycle, guarded primitives and widgets
pub mod manager;
/// Panel driver: vendor bring-up and pixel streaming
pub mod panel;
/// Cooperative yield seam
pub mod task;

pub use bus::{DisplayBus, SpiDisplayBus};
pub use color::hex_to_rgb565;
pub use config::{PanelBuilder, PanelConfig, Rotation};
pub use error::{BusError, Error};
pub use gif::{GifDecoder, NoopGif};
pub use interpreter::{DrawBatch, DrawCommand, apply_command, parse_batch, parse_command, run_batch};
pub use layout::{UiRect, wrap_text};
pub use manager::{DisplayManager, PanelState};
pub use panel::Panel;
pub use task::{NoopYield, YieldNow};
