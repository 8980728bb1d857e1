//! Panel driver: vendor bring-up and pixel streaming
//!
//! Drives the ST7789 controller through a [`DisplayBus`]. The bring-up
//! sequence reproduces the GeekMagic vendor firmware exactly, including its
//! double reset/begin dance; the panel misprograms its voltages on a single
//! pass often enough that the quirk is load-bearing. Drawing is address
//! window + pixel stream, with an `embedded-graphics` [`DrawTarget`] on top
//! for everything that is not a plain rectangle.

use embedded_graphics_core::pixelcolor::Rgb565;
use embedded_graphics_core::prelude::*;
use embedded_graphics_core::primitives::Rectangle;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use alloc::vec::Vec;

use crate::bus::DisplayBus;
use crate::command;
use crate::config::{PanelConfig, Rotation};
use crate::error::Error;
use crate::font::{GLYPH_COLUMNS, GLYPH_HEIGHT, GLYPH_WIDTH, glyph};
use crate::task::YieldNow;

/// Settle time after Sleep Out, from the controller datasheet.
const SLEEP_OUT_DELAY_MS: u32 = 120;

/// Reset pulse width used by the vendor firmware.
const RESET_PULSE_MS: u32 = 100;

/// ST7789 panel behind a [`DisplayBus`].
///
/// Reset and backlight pins are optional; boards that tie them in hardware
/// pass `None` and the corresponding steps are skipped with a log line.
pub struct Panel<B, RST, BL> {
    bus: B,
    rst: Option<RST>,
    backlight: Option<BL>,
    config: PanelConfig,
}

impl<B, RST, BL> Panel<B, RST, BL>
where
    B: DisplayBus,
    RST: OutputPin,
    BL: OutputPin,
{
    /// Create a new panel driver. No hardware access happens until
    /// [`Panel::init`].
    pub fn new(bus: B, rst: Option<RST>, backlight: Option<BL>, config: PanelConfig) -> Self {
        Self {
            bus,
            rst,
            backlight,
            config,
        }
    }

    /// Panel width in pixels after rotation.
    pub fn width(&self) -> u16 {
        self.config.rotated_dimensions().0
    }

    /// Panel height in pixels after rotation.
    pub fn height(&self) -> u16 {
        self.config.rotated_dimensions().1
    }

    /// The configuration this panel was built with.
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Switch the backlight on, honoring the configured polarity.
    pub fn backlight_on(&mut self) {
        self.set_backlight(true);
    }

    /// Switch the backlight off.
    pub fn backlight_off(&mut self) {
        self.set_backlight(false);
    }

    fn set_backlight(&mut self, on: bool) {
        let Some(bl) = self.backlight.as_mut() else {
            log::warn!("no backlight pin configured");
            return;
        };
        let level_high = on != self.config.backlight_active_low;
        let result = if level_high { bl.set_high() } else { bl.set_low() };
        if result.is_err() {
            log::error!("backlight pin write failed");
        }
    }

    /// Pulse the hardware reset line: high, low, high, 100 ms apart.
    pub fn hard_reset<D: DelayNs>(&mut self, delay: &mut D) {
        let Some(rst) = self.rst.as_mut() else {
            log::warn!("no reset pin configured, skipping hardware reset");
            return;
        };
        if rst.set_high().is_err() {
            log::error!("reset pin write failed");
            return;
        }
        delay.delay_ms(RESET_PULSE_MS);
        let _ = rst.set_low();
        delay.delay_ms(RESET_PULSE_MS);
        let _ = rst.set_high();
        delay.delay_ms(RESET_PULSE_MS);
    }

    /// Full hardware bring-up.
    ///
    /// Backlight on, then reset and bus begin *twice* before the vendor
    /// register sequence. The duplicated pass matches the vendor firmware;
    /// removing it leaves some units with wrong panel voltages after a warm
    /// boot.
    pub fn init<D: DelayNs, Y: YieldNow>(
        &mut self,
        delay: &mut D,
        yld: &mut Y,
    ) -> Result<(), Error<B>> {
        self.backlight_on();

        self.hard_reset(delay);
        self.bus.begin(None, None).map_err(Error::Bus)?;
        delay.delay_ms(10);

        self.hard_reset(delay);
        self.bus.begin(None, None).map_err(Error::Bus)?;

        self.vendor_init(delay, yld)?;
        self.set_rotation(self.config.rotation)?;
        Ok(())
    }

    /// Vendor register sequence, byte for byte.
    fn vendor_init<D: DelayNs, Y: YieldNow>(
        &mut self,
        delay: &mut D,
        yld: &mut Y,
    ) -> Result<(), Error<B>> {
        let width = self.config.width;
        let height = self.config.height;

        self.bus.begin_write().map_err(Error::Bus)?;
        let result = self.vendor_init_sequence(delay, yld, width, height);
        // Close the transaction even when a register write failed.
        let end = self.bus.end_write().map_err(Error::Bus);
        result.and(end)
    }

    fn vendor_init_sequence<D: DelayNs, Y: YieldNow>(
        &mut self,
        delay: &mut D,
        yld: &mut Y,
        width: u16,
        height: u16,
    ) -> Result<(), Error<B>> {
        self.command(command::SLEEP_OUT, &[], yld)?;
        delay.delay_ms(SLEEP_OUT_DELAY_MS);

        self.command(command::PORCH_CONTROL, &command::PORCH_PARAMS, yld)?;
        self.command(command::TEARING_EFFECT_ON, &[0x00], yld)?;
        self.command(command::MADCTL, &[0x00], yld)?;
        self.command(command::COLMOD, &[command::COLMOD_RGB565], yld)?;
        self.command(command::GATE_CONTROL, &command::GATE_PARAMS, yld)?;
        self.command(command::VCOM_SETTING, &command::VCOM_PARAMS, yld)?;
        self.command(command::LCM_CONTROL, &command::LCM_PARAMS, yld)?;
        self.command(command::VDV_VRH_ENABLE, &command::VDV_VRH_ENABLE_PARAMS, yld)?;
        self.command(command::VRH_SET, &command::VRH_PARAMS, yld)?;
        self.command(command::VDV_SET, &command::VDV_PARAMS, yld)?;
        self.command(command::FRAME_RATE_CONTROL, &command::FRAME_RATE_PARAMS, yld)?;
        self.command(command::VENDOR_D6, &command::VENDOR_D6_PARAMS, yld)?;
        self.command(command::POWER_CONTROL_1, &command::POWER_CONTROL_1_PARAMS, yld)?;
        self.command(command::VENDOR_D6, &command::VENDOR_D6_PARAMS, yld)?;
        self.command(command::GAMMA_POSITIVE, &command::GAMMA_POSITIVE_PARAMS, yld)?;
        self.command(command::GAMMA_NEGATIVE, &command::GAMMA_NEGATIVE_PARAMS, yld)?;
        self.command(command::GAMMA_CONTROL, &command::GAMMA_CONTROL_PARAMS, yld)?;
        self.command(command::INVERSION_ON, &[], yld)?;
        self.command(command::DISPLAY_ON, &[], yld)?;

        let col_end = (width - 1).to_be_bytes();
        let row_end = (height - 1).to_be_bytes();
        self.command(command::CASET, &[0x00, 0x00, col_end[0], col_end[1]], yld)?;
        self.command(command::RASET, &[0x00, 0x00, row_end[0], row_end[1]], yld)?;
        self.command(command::RAMWR, &[], yld)?;
        Ok(())
    }

    /// Write one command with its parameter bytes, then yield to the
    /// runtime so long register sequences cannot trip the watchdog.
    fn command<Y: YieldNow>(&mut self, cmd: u8, params: &[u8], yld: &mut Y) -> Result<(), Error<B>> {
        self.bus.write_command(cmd).map_err(Error::Bus)?;
        if !params.is_empty() {
            self.bus.write_bytes(params).map_err(Error::Bus)?;
        }
        yld.yield_now();
        Ok(())
    }

    /// Program the memory access order for a mounting rotation.
    pub fn set_rotation(&mut self, rotation: Rotation) -> Result<(), Error<B>> {
        let madctl = command::MADCTL_FOR_ROTATION[rotation as usize];
        self.bus.begin_write().map_err(Error::Bus)?;
        self.bus.write_command(command::MADCTL).map_err(Error::Bus)?;
        self.bus.write_bytes(&[madctl]).map_err(Error::Bus)?;
        self.bus.end_write().map_err(Error::Bus)?;
        self.config.rotation = rotation;
        Ok(())
    }

    /// Open an address window and leave the controller expecting pixel
    /// data. Caller must hold an open write transaction.
    fn set_address_window(&mut self, x: u16, y: u16, w: u16, h: u16) -> Result<(), Error<B>> {
        if w == 0 || h == 0 || x + w > self.width() || y + h > self.height() {
            return Err(Error::InvalidWindow { x, y, w, h });
        }

        let x_end = x + w - 1;
        let y_end = y + h - 1;

        self.bus.write_command(command::CASET).map_err(Error::Bus)?;
        let xs = x.to_be_bytes();
        let xe = x_end.to_be_bytes();
        self.bus
            .write_bytes(&[xs[0], xs[1], xe[0], xe[1]])
            .map_err(Error::Bus)?;

        self.bus.write_command(command::RASET).map_err(Error::Bus)?;
        let ys = y.to_be_bytes();
        let ye = y_end.to_be_bytes();
        self.bus
            .write_bytes(&[ys[0], ys[1], ye[0], ye[1]])
            .map_err(Error::Bus)?;

        self.bus.write_command(command::RAMWR).map_err(Error::Bus)
    }

    /// Clip a signed rectangle to the screen. Returns `None` when nothing
    /// remains visible.
    fn clip(&self, x: i16, y: i16, w: i16, h: i16) -> Option<(u16, u16, u16, u16)> {
        if w <= 0 || h <= 0 {
            return None;
        }
        let screen_w = i32::from(self.width());
        let screen_h = i32::from(self.height());

        let x0 = i32::from(x).max(0);
        let y0 = i32::from(y).max(0);
        let x1 = (i32::from(x) + i32::from(w)).min(screen_w);
        let y1 = (i32::from(y) + i32::from(h)).min(screen_h);

        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16))
    }

    /// Fill a rectangle with one color. Off-screen parts are clipped away;
    /// a fully off-screen rectangle is a no-op.
    pub fn fill_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: u16) -> Result<(), Error<B>> {
        let Some((x, y, w, h)) = self.clip(x, y, w, h) else {
            return Ok(());
        };

        self.bus.begin_write().map_err(Error::Bus)?;
        self.set_address_window(x, y, w, h)?;
        self.bus
            .write_repeat(color, u32::from(w) * u32::from(h))
            .map_err(Error::Bus)?;
        self.bus.end_write().map_err(Error::Bus)
    }

    /// Fill the whole screen with one color.
    pub fn fill_screen(&mut self, color: u16) -> Result<(), Error<B>> {
        let (w, h) = (self.width() as i16, self.height() as i16);
        self.fill_rect(0, 0, w, h, color)
    }

    /// Set a single pixel. Out-of-bounds coordinates are ignored.
    pub fn draw_pixel(&mut self, x: i16, y: i16, color: u16) -> Result<(), Error<B>> {
        if x < 0 || y < 0 || x as u16 >= self.width() || y as u16 >= self.height() {
            return Ok(());
        }

        self.bus.begin_write().map_err(Error::Bus)?;
        self.set_address_window(x as u16, y as u16, 1, 1)?;
        self.bus.write16(color).map_err(Error::Bus)?;
        self.bus.end_write().map_err(Error::Bus)
    }

    /// Draw one line of text as a single opaque pixel block.
    ///
    /// Every cell pixel is written, foreground or background, so redrawing
    /// over old content needs no separate clear. Text running past the
    /// right edge is clipped; nothing renders when the anchor is off
    /// screen.
    pub fn draw_text_line(
        &mut self,
        x: i16,
        y: i16,
        text: &str,
        text_size: u8,
        fg: u16,
        bg: u16,
    ) -> Result<(), Error<B>> {
        if text.is_empty() || text_size == 0 {
            return Ok(());
        }
        let scale = u16::from(text_size);
        let full_w = text.chars().count() as u32 * u32::from(GLYPH_WIDTH) * u32::from(scale);
        let cell_h = GLYPH_HEIGHT * scale;

        let Some((cx, cy, cw, ch)) = self.clip(
            x,
            y,
            full_w.min(u32::from(i16::MAX as u16)) as i16,
            cell_h as i16,
        ) else {
            return Ok(());
        };
        // Only right/bottom clipping is supported for text; an anchor left
        // of or above the screen is treated as fully off screen.
        if x < 0 || y < 0 {
            return Ok(());
        }

        let mut row: Vec<u16> = Vec::with_capacity(cw as usize);

        self.bus.begin_write().map_err(Error::Bus)?;
        self.set_address_window(cx, cy, cw, ch)?;

        for cell_row in 0..ch {
            let glyph_row = (cell_row / scale) as u8;
            row.clear();
            'chars: for c in text.chars() {
                let columns = glyph(c);
                for col in 0..GLYPH_WIDTH {
                    let lit = (col as usize) < GLYPH_COLUMNS
                        && glyph_row < 7
                        && (columns[col as usize] >> glyph_row) & 1 == 1;
                    let px = if lit { fg } else { bg };
                    for _ in 0..scale {
                        if row.len() >= cw as usize {
                            break 'chars;
                        }
                        row.push(px);
                    }
                }
            }
            self.bus.write_pixels(&row).map_err(Error::Bus)?;
        }

        self.bus.end_write().map_err(Error::Bus)
    }
}

impl<B, RST, BL> OriginDimensions for Panel<B, RST, BL>
where
    B: DisplayBus,
    RST: OutputPin,
    BL: OutputPin,
{
    fn size(&self) -> Size {
        Size::new(u32::from(self.width()), u32::from(self.height()))
    }
}

impl<B, RST, BL> DrawTarget for Panel<B, RST, BL>
where
    B: DisplayBus,
    RST: OutputPin,
    BL: OutputPin,
{
    type Color = Rgb565;
    type Error = Error<B>;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        for Pixel(point, color) in pixels {
            if bounds.contains(point) {
                self.draw_pixel(point.x as i16, point.y as i16, color.into_storage())?;
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(_) = area.bottom_right() else {
            return Ok(());
        };
        self.fill_rect(
            area.top_left.x as i16,
            area.top_left.y as i16,
            area.size.width as i16,
            area.size.height as i16,
            color.into_storage(),
        )
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_screen(color.into_storage())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::color;
    use crate::config::PanelConfig;
    use crate::task::NoopYield;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;
    use core::convert::Infallible;

    /// One recorded bus operation.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum Op {
        Begin,
        BeginWrite,
        EndWrite,
        Command(u8),
        Data(Vec<u8>),
        Repeat(u16, u32),
        Pixels(Vec<u16>),
    }

    /// Recording bus shared between the test and the driver under test.
    #[derive(Clone, Default)]
    pub(crate) struct MockBus {
        pub ops: Rc<RefCell<Vec<Op>>>,
    }

    impl MockBus {
        pub fn commands(&self) -> Vec<u8> {
            self.ops
                .borrow()
                .iter()
                .filter_map(|op| match op {
                    Op::Command(c) => Some(*c),
                    _ => None,
                })
                .collect()
        }

        /// Parameter bytes immediately following the `n`th occurrence of
        /// `cmd`.
        pub fn params_after(&self, cmd: u8, n: usize) -> Option<Vec<u8>> {
            let ops = self.ops.borrow();
            let mut seen = 0;
            for (i, op) in ops.iter().enumerate() {
                if *op == Op::Command(cmd) {
                    if seen == n {
                        if let Some(Op::Data(bytes)) = ops.get(i + 1) {
                            return Some(bytes.clone());
                        }
                        return None;
                    }
                    seen += 1;
                }
            }
            None
        }
    }

    impl DisplayBus for MockBus {
        type Error = Infallible;

        fn begin(&mut self, _speed_hz: Option<u32>, _mode: Option<u8>) -> Result<(), Infallible> {
            self.ops.borrow_mut().push(Op::Begin);
            Ok(())
        }
        fn begin_write(&mut self) -> Result<(), Infallible> {
            self.ops.borrow_mut().push(Op::BeginWrite);
            Ok(())
        }
        fn end_write(&mut self) -> Result<(), Infallible> {
            self.ops.borrow_mut().push(Op::EndWrite);
            Ok(())
        }
        fn write_command(&mut self, cmd: u8) -> Result<(), Infallible> {
            self.ops.borrow_mut().push(Op::Command(cmd));
            Ok(())
        }
        fn write(&mut self, data: u8) -> Result<(), Infallible> {
            self.ops.borrow_mut().push(Op::Data(vec![data]));
            Ok(())
        }
        fn write16(&mut self, data: u16) -> Result<(), Infallible> {
            self.ops.borrow_mut().push(Op::Pixels(vec![data]));
            Ok(())
        }
        fn write_repeat(&mut self, pixel: u16, count: u32) -> Result<(), Infallible> {
            self.ops.borrow_mut().push(Op::Repeat(pixel, count));
            Ok(())
        }
        fn write_bytes(&mut self, data: &[u8]) -> Result<(), Infallible> {
            self.ops.borrow_mut().push(Op::Data(data.to_vec()));
            Ok(())
        }
        fn write_pixels(&mut self, pixels: &[u16]) -> Result<(), Infallible> {
            self.ops.borrow_mut().push(Op::Pixels(pixels.to_vec()));
            Ok(())
        }
    }

    /// Delay that only counts requested milliseconds.
    #[derive(Default)]
    pub(crate) struct MockDelay {
        pub total_ms: u32,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ms += ns / 1_000_000;
        }
    }

    /// Pin that remembers its level history.
    #[derive(Clone, Default)]
    pub(crate) struct MockPin {
        pub levels: Rc<RefCell<Vec<bool>>>,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.levels.borrow_mut().push(false);
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Infallible> {
            self.levels.borrow_mut().push(true);
            Ok(())
        }
    }

    pub(crate) fn panel_with(
        config: PanelConfig,
    ) -> (Panel<MockBus, MockPin, MockPin>, MockBus, MockPin, MockPin) {
        let bus = MockBus::default();
        let rst = MockPin::default();
        let bl = MockPin::default();
        let panel = Panel::new(bus.clone(), Some(rst.clone()), Some(bl.clone()), config);
        (panel, bus, rst, bl)
    }

    fn stock_panel() -> (Panel<MockBus, MockPin, MockPin>, MockBus, MockPin, MockPin) {
        panel_with(PanelConfig::builder().build())
    }

    #[test]
    fn init_issues_vendor_sequence_in_order() {
        let (mut panel, bus, _rst, _bl) = stock_panel();
        panel.init(&mut MockDelay::default(), &mut NoopYield).unwrap();

        let commands = bus.commands();
        let vendor: Vec<u8> = vec![
            0x11, 0xB2, 0x35, 0x36, 0x3A, 0xB7, 0xBB, 0xC0, 0xC2, 0xC3, 0xC4, 0xC6, 0xD6, 0xD0,
            0xD6, 0xE0, 0xE1, 0xE4, 0x21, 0x29, 0x2A, 0x2B, 0x2C,
            // trailing MADCTL from the rotation pass
            0x36,
        ];
        assert_eq!(commands, vendor);
    }

    #[test]
    fn init_programs_full_240_line_window() {
        let (mut panel, bus, _rst, _bl) = stock_panel();
        panel.init(&mut MockDelay::default(), &mut NoopYield).unwrap();

        assert_eq!(bus.params_after(0x2A, 0), Some(vec![0x00, 0x00, 0x00, 0xEF]));
        assert_eq!(bus.params_after(0x2B, 0), Some(vec![0x00, 0x00, 0x00, 0xEF]));
    }

    #[test]
    fn init_repeats_reset_and_begin() {
        let (mut panel, bus, rst, _bl) = stock_panel();
        panel.init(&mut MockDelay::default(), &mut NoopYield).unwrap();

        let begins = bus
            .ops
            .borrow()
            .iter()
            .filter(|op| **op == Op::Begin)
            .count();
        assert_eq!(begins, 2);
        // One bracket for the vendor sequence, one for the rotation pass.
        let brackets = bus
            .ops
            .borrow()
            .iter()
            .filter(|op| **op == Op::BeginWrite)
            .count();
        assert_eq!(brackets, 2);
        // Two reset pulses: high, low, high each.
        assert_eq!(
            rst.levels.borrow().as_slice(),
            &[true, false, true, true, false, true]
        );
    }

    #[test]
    fn init_yields_between_register_writes() {
        struct CountYield(u32);
        impl YieldNow for CountYield {
            fn yield_now(&mut self) {
                self.0 += 1;
            }
        }

        let (mut panel, _bus, _rst, _bl) = stock_panel();
        let mut yld = CountYield(0);
        panel.init(&mut MockDelay::default(), &mut yld).unwrap();
        // One yield per vendor command.
        assert_eq!(yld.0, 23);
    }

    #[test]
    fn init_waits_after_sleep_out() {
        let (mut panel, _bus, _rst, _bl) = stock_panel();
        let mut delay = MockDelay::default();
        panel.init(&mut delay, &mut NoopYield).unwrap();
        // 2 resets x 300 ms + 10 ms settle + 120 ms sleep-out.
        assert_eq!(delay.total_ms, 730);
    }

    #[test]
    fn backlight_polarity_is_honored() {
        let config = PanelConfig::builder().backlight_active_low(true).build();
        let (mut panel, _bus, _rst, bl) = panel_with(config);
        panel.backlight_on();
        assert_eq!(bl.levels.borrow().last(), Some(&false));
        panel.backlight_off();
        assert_eq!(bl.levels.borrow().last(), Some(&true));
    }

    #[test]
    fn mounted_rotation_matches_180() {
        let (mut panel, bus, _rst, _bl) = stock_panel();
        panel.set_rotation(Rotation::Mounted).unwrap();
        panel.set_rotation(Rotation::Deg180).unwrap();
        assert_eq!(bus.params_after(0x36, 0), bus.params_after(0x36, 1));
    }

    #[test]
    fn fill_rect_clips_to_screen() {
        let (mut panel, bus, _rst, _bl) = stock_panel();
        panel.fill_rect(-10, -10, 20, 20, color::RED).unwrap();

        assert_eq!(bus.params_after(0x2A, 0), Some(vec![0, 0, 0, 9]));
        assert_eq!(bus.params_after(0x2B, 0), Some(vec![0, 0, 0, 9]));
        assert!(bus.ops.borrow().contains(&Op::Repeat(color::RED, 100)));
    }

    #[test]
    fn offscreen_rect_is_a_noop() {
        let (mut panel, bus, _rst, _bl) = stock_panel();
        panel.fill_rect(240, 0, 10, 10, color::RED).unwrap();
        panel.fill_rect(0, 0, -5, 10, color::RED).unwrap();
        assert!(bus.ops.borrow().is_empty());
    }

    #[test]
    fn fill_screen_covers_every_pixel() {
        let (mut panel, bus, _rst, _bl) = stock_panel();
        panel.fill_screen(color::BLUE).unwrap();
        assert!(bus.ops.borrow().contains(&Op::Repeat(color::BLUE, 57_600)));
    }

    #[test]
    fn text_line_streams_opaque_rows() {
        let (mut panel, bus, _rst, _bl) = stock_panel();
        panel
            .draw_text_line(10, 20, "Hi", 1, color::WHITE, color::BLACK)
            .unwrap();

        // 2 chars x 6 px wide, 8 rows tall.
        assert_eq!(bus.params_after(0x2A, 0), Some(vec![0, 10, 0, 21]));
        assert_eq!(bus.params_after(0x2B, 0), Some(vec![0, 20, 0, 27]));
        let rows: Vec<Vec<u16>> = bus
            .ops
            .borrow()
            .iter()
            .filter_map(|op| match op {
                Op::Pixels(px) => Some(px.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(rows.len(), 8);
        assert!(rows.iter().all(|r| r.len() == 12));
        // Row 7 is the inter-line gap: all background.
        assert!(rows[7].iter().all(|&px| px == color::BLACK));
        // 'H' column 0 is solid over rows 0..=6.
        for row in rows.iter().take(7) {
            assert_eq!(row[0], color::WHITE);
        }
    }

    #[test]
    fn text_scales_by_integer_factor() {
        let (mut panel, bus, _rst, _bl) = stock_panel();
        panel
            .draw_text_line(0, 0, "A", 2, color::WHITE, color::BLACK)
            .unwrap();

        assert_eq!(bus.params_after(0x2A, 0), Some(vec![0, 0, 0, 11]));
        assert_eq!(bus.params_after(0x2B, 0), Some(vec![0, 0, 0, 15]));
    }

    #[test]
    fn text_clips_at_right_edge() {
        let (mut panel, bus, _rst, _bl) = stock_panel();
        panel
            .draw_text_line(234, 0, "wide", 1, color::WHITE, color::BLACK)
            .unwrap();
        // Only 6 columns remain.
        assert_eq!(bus.params_after(0x2A, 0), Some(vec![0, 234, 0, 239]));
    }

    #[test]
    fn draw_target_fill_solid_uses_fast_path() {
        use embedded_graphics_core::prelude::*;

        let (mut panel, bus, _rst, _bl) = stock_panel();
        panel
            .fill_solid(
                &Rectangle::new(Point::new(5, 5), Size::new(10, 10)),
                Rgb565::RED,
            )
            .unwrap();
        assert!(bus.ops.borrow().contains(&Op::Repeat(0xF800, 100)));
    }
}
