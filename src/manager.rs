//! Display manager: lifecycle, guarded primitives and widgets
//!
//! Owns the panel and the GIF coordinator and enforces the device's error
//! policy: drawing is attempted only when the panel reports ready, and a
//! failed write is logged and dropped rather than propagated. The device is
//! headless, so the remote clients calling these entry points cannot do
//! anything useful with a hardware error anyway.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle, Ellipse, Line, PrimitiveStyle, Rectangle, RoundedRectangle, StyledDrawable, Triangle,
};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::bus::DisplayBus;
use crate::color;
use crate::color::rgb565;
use crate::config::PanelConfig;
use crate::error::Error;
use crate::font::GLYPH_HEIGHT;
use crate::gif::GifDecoder;
use crate::layout::{self, GAP, PADDING, UiRect};
use crate::panel::Panel;
use crate::task::YieldNow;

/// Default loading bar geometry and palette
pub const LOADING_BAR_Y: i16 = 180;
/// Default loading bar width in pixels
pub const LOADING_BAR_WIDTH: i16 = 200;
/// Default loading bar height in pixels
pub const LOADING_BAR_HEIGHT: i16 = 20;

/// Duration of each full-screen color flash during startup
const STARTUP_FLASH_MS: u32 = 1000;

/// Panel lifecycle state.
///
/// `ready` records that a bring-up attempt completed; `init_ok` whether it
/// succeeded. Drawing requires both.
#[derive(Debug, Default, Clone)]
pub struct PanelState {
    /// A bring-up attempt has completed
    pub ready: bool,
    /// A bring-up attempt is in progress (re-entry guard)
    pub initializing: bool,
    /// The last bring-up attempt succeeded
    pub init_ok: bool,
    /// Number of bring-up attempts so far
    pub attempts: u32,
    /// Caller-supplied timestamp of the last attempt, in milliseconds
    pub last_attempt_ms: u32,
}

/// High-level display front end.
///
/// All drawing entry points are no-ops until [`DisplayManager::begin`] has
/// succeeded, so callers never need to sequence against initialization.
pub struct DisplayManager<B, RST, BL, G> {
    panel: Panel<B, RST, BL>,
    state: PanelState,
    gif: G,
}

impl<B, RST, BL, G> DisplayManager<B, RST, BL, G>
where
    B: DisplayBus,
    RST: OutputPin,
    BL: OutputPin,
    G: GifDecoder,
{
    /// Create a manager over an uninitialized panel.
    pub fn new(panel: Panel<B, RST, BL>, gif: G) -> Self {
        Self {
            panel,
            state: PanelState::default(),
            gif,
        }
    }

    /// Bring up the panel if it is not up already.
    ///
    /// `now_ms` is a caller-supplied monotonic timestamp recorded for
    /// diagnostics. Safe to call repeatedly; only the first call does
    /// hardware work. A disabled panel configuration makes this a no-op.
    pub fn begin<D: DelayNs, Y: YieldNow>(&mut self, now_ms: u32, delay: &mut D, yld: &mut Y) {
        if !self.panel.config().enabled || self.state.ready || self.state.initializing {
            return;
        }

        self.state.initializing = true;
        self.state.attempts += 1;
        self.state.last_attempt_ms = now_ms;
        self.state.init_ok = false;

        match self.panel.init(delay, yld) {
            Ok(()) => {
                self.state.init_ok = true;
                log::info!(
                    "display ready: {}x{}",
                    self.panel.width(),
                    self.panel.height()
                );
            }
            Err(e) => log::error!("display init failed: {e}"),
        }

        self.state.ready = true;
        self.state.initializing = false;

        if self.state.init_ok {
            Self::note(self.panel.fill_screen(color::BLACK));
        }
    }

    /// Whether the panel is initialized and accepting draw calls.
    pub fn is_ready(&self) -> bool {
        self.state.ready && self.state.init_ok
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &PanelState {
        &self.state
    }

    /// Panel configuration.
    pub fn config(&self) -> &PanelConfig {
        self.panel.config()
    }

    /// Screen width in pixels, after rotation.
    pub fn screen_width(&self) -> i16 {
        self.panel.width() as i16
    }

    /// Screen height in pixels, after rotation.
    pub fn screen_height(&self) -> i16 {
        self.panel.height() as i16
    }

    /// Status bar region.
    pub fn status_bar_rect(&self) -> UiRect {
        layout::status_bar_rect(self.screen_width(), self.screen_height())
    }

    /// Footer region.
    pub fn footer_rect(&self) -> UiRect {
        layout::footer_rect(self.screen_width(), self.screen_height())
    }

    /// Body region between status bar and footer.
    pub fn body_rect(&self) -> UiRect {
        layout::body_rect(self.screen_width(), self.screen_height())
    }

    fn note(result: Result<(), Error<B>>) {
        if let Err(e) = result {
            log::error!("draw failed: {e}");
        }
    }

    fn draw_styled<P: StyledDrawable<PrimitiveStyle<Rgb565>, Color = Rgb565, Output = ()>>(
        &mut self,
        primitive: &P,
        style: &PrimitiveStyle<Rgb565>,
    ) {
        if !self.is_ready() {
            return;
        }
        Self::note(primitive.draw_styled(style, &mut self.panel));
    }

    fn stroke(color: u16) -> PrimitiveStyle<Rgb565> {
        PrimitiveStyle::with_stroke(rgb565(color), 1)
    }

    fn fill(color: u16) -> PrimitiveStyle<Rgb565> {
        PrimitiveStyle::with_fill(rgb565(color))
    }

    /// Fill the whole screen.
    pub fn fill_screen(&mut self, color: u16) {
        if self.is_ready() {
            Self::note(self.panel.fill_screen(color));
        }
    }

    /// Clear the whole screen to black.
    pub fn clear_screen(&mut self) {
        self.fill_screen(color::BLACK);
    }

    /// Set a single pixel.
    pub fn draw_pixel(&mut self, x: i16, y: i16, color: u16) {
        if self.is_ready() {
            Self::note(self.panel.draw_pixel(x, y, color));
        }
    }

    /// Draw a one-pixel line between two points.
    pub fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, color: u16) {
        let line = Line::new(point(x0, y0), point(x1, y1));
        self.draw_styled(&line, &Self::stroke(color));
    }

    /// Draw a rectangle outline.
    pub fn draw_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: u16) {
        if w <= 0 || h <= 0 {
            return;
        }
        let rect = Rectangle::new(point(x, y), size(w, h));
        self.draw_styled(&rect, &Self::stroke(color));
    }

    /// Draw a filled rectangle.
    pub fn fill_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: u16) {
        if w <= 0 || h <= 0 || !self.is_ready() {
            return;
        }
        Self::note(self.panel.fill_rect(x, y, w, h, color));
    }

    /// Draw a circle outline around a center point.
    pub fn draw_circle(&mut self, cx: i16, cy: i16, r: i16, color: u16) {
        if r < 0 {
            return;
        }
        let circle = Circle::with_center(point(cx, cy), diameter(r));
        self.draw_styled(&circle, &Self::stroke(color));
    }

    /// Draw a filled circle around a center point.
    pub fn fill_circle(&mut self, cx: i16, cy: i16, r: i16, color: u16) {
        if r < 0 {
            return;
        }
        let circle = Circle::with_center(point(cx, cy), diameter(r));
        self.draw_styled(&circle, &Self::fill(color));
    }

    /// Draw a triangle outline.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_triangle(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, x2: i16, y2: i16, color: u16) {
        let tri = Triangle::new(point(x0, y0), point(x1, y1), point(x2, y2));
        self.draw_styled(&tri, &Self::stroke(color));
    }

    /// Draw a filled triangle.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_triangle(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, x2: i16, y2: i16, color: u16) {
        let tri = Triangle::new(point(x0, y0), point(x1, y1), point(x2, y2));
        self.draw_styled(&tri, &Self::fill(color));
    }

    /// Draw an ellipse outline around a center point.
    pub fn draw_ellipse(&mut self, cx: i16, cy: i16, rx: i16, ry: i16, color: u16) {
        if rx < 0 || ry < 0 {
            return;
        }
        let ellipse = Ellipse::with_center(point(cx, cy), Size::new(diameter(rx), diameter(ry)));
        self.draw_styled(&ellipse, &Self::stroke(color));
    }

    /// Draw a filled ellipse around a center point.
    pub fn fill_ellipse(&mut self, cx: i16, cy: i16, rx: i16, ry: i16, color: u16) {
        if rx < 0 || ry < 0 {
            return;
        }
        let ellipse = Ellipse::with_center(point(cx, cy), Size::new(diameter(rx), diameter(ry)));
        self.draw_styled(&ellipse, &Self::fill(color));
    }

    /// Draw a rounded rectangle outline.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_round_rect(&mut self, x: i16, y: i16, w: i16, h: i16, r: i16, color: u16) {
        if w <= 0 || h <= 0 || r < 0 {
            return;
        }
        let rect = RoundedRectangle::with_equal_corners(
            Rectangle::new(point(x, y), size(w, h)),
            Size::new(r as u32, r as u32),
        );
        self.draw_styled(&rect, &Self::stroke(color));
    }

    /// Draw a filled rounded rectangle.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_round_rect(&mut self, x: i16, y: i16, w: i16, h: i16, r: i16, color: u16) {
        if w <= 0 || h <= 0 || r < 0 {
            return;
        }
        let rect = RoundedRectangle::with_equal_corners(
            Rectangle::new(point(x, y), size(w, h)),
            Size::new(r as u32, r as u32),
        );
        self.draw_styled(&rect, &Self::fill(color));
    }

    /// Draw word-wrapped text anchored at `(x, y)`.
    ///
    /// Negative coordinates clamp to zero; an anchor past the screen edge
    /// draws nothing. With `clear_bg` the rectangle from the anchor to the
    /// right screen edge, as tall as the wrapped block, is filled with the
    /// background color first. Each rendered line is opaque regardless.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text_wrapped(
        &mut self,
        x: i16,
        y: i16,
        text: &str,
        text_size: u8,
        fg: u16,
        bg: u16,
        clear_bg: bool,
    ) {
        if !self.is_ready() {
            return;
        }

        let screen_w = self.screen_width();
        let screen_h = self.screen_height();
        let x = x.max(0);
        let y = y.max(0);

        if x >= screen_w || y >= screen_h {
            log::warn!("text anchor ({x}, {y}) off screen");
            return;
        }
        if text_size == 0 {
            log::warn!("text size zero");
            return;
        }

        let char_h = (GLYPH_HEIGHT as i16) * i16::from(text_size);
        let lines: Vec<String> = layout::wrap_text(x, y, text, text_size, screen_w, screen_h);

        if clear_bg {
            let block_h = char_h * lines.len() as i16;
            Self::note(self.panel.fill_rect(x, y, screen_w - x, block_h, bg));
        }

        for (i, line) in lines.iter().enumerate() {
            let line_y = y + char_h * i as i16;
            Self::note(self.panel.draw_text_line(x, line_y, line, text_size, fg, bg));
        }
    }

    /// Draw wrapped text into the body region, inset by the standard
    /// padding.
    pub fn draw_body_text(&mut self, text: &str, text_size: u8, fg: u16, bg: u16, clear_bg: bool) {
        if !self.is_ready() {
            return;
        }
        let body = self.body_rect();
        if body.w <= 0 || body.h <= 0 {
            return;
        }
        if clear_bg {
            self.fill_rect(body.x, body.y, body.w, body.h, bg);
        }
        self.draw_text_wrapped(body.x + PADDING, body.y + PADDING, text, text_size, fg, bg, false);
    }

    /// Draw the status bar: left/right labels plus wifi and battery icons,
    /// with a one-pixel separator along the bottom edge.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_status_bar(
        &mut self,
        left_text: &str,
        right_text: &str,
        wifi_connected: bool,
        wifi_bars: i8,
        battery_pct: i8,
        charging: bool,
        fg: u16,
        bg: u16,
        clear_bg: bool,
    ) {
        if !self.is_ready() {
            return;
        }
        let bar = self.status_bar_rect();
        if bar.h <= 0 {
            return;
        }

        if clear_bg {
            self.fill_rect(bar.x, bar.y, bar.w, bar.h, bg);
        }
        self.fill_rect(bar.x, bar.y + bar.h - 1, bar.w, 1, color::SEPARATOR);

        let text_size = 1u8;
        let y_text = status_text_y(text_size, &bar);

        // Right-side icons: [wifi][gap][battery]
        let icon_h = 10i16;
        let icon_y = bar.y + (bar.h - icon_h) / 2;

        let battery_w = 20i16;
        let wifi_w = 14i16;
        let icons_w = wifi_w + GAP + battery_w;

        let mut x_right = bar.x + bar.w - PADDING;
        self.draw_battery_icon(x_right, icon_y, battery_pct, charging, fg, bg);
        x_right -= battery_w + GAP;
        self.draw_wifi_icon(x_right, icon_y, wifi_connected, wifi_bars, fg, bg);

        if !right_text.is_empty() {
            let text_w = layout::text_width_px(right_text, text_size);
            let x = bar.x + bar.w - PADDING - icons_w - GAP - text_w;
            self.draw_text_wrapped(x, y_text, right_text, text_size, fg, bg, false);
        }
        if !left_text.is_empty() {
            self.draw_text_wrapped(bar.x + PADDING, y_text, left_text, text_size, fg, bg, false);
        }
    }

    /// Four-bar wifi indicator, 14x10, right-edge anchored.
    fn draw_wifi_icon(&mut self, x_right: i16, y_top: i16, connected: bool, bars: i8, fg: u16, bg: u16) {
        let icon_w = 14i16;
        let icon_h = 10i16;
        let x_left = x_right - icon_w;
        self.fill_rect(x_left, y_top, icon_w, icon_h, bg);

        let bars = i16::from(bars).clamp(0, 4);
        // With a white foreground the dimmed bars go gray; any other
        // palette keeps its own color for both states.
        let color_off = if fg == color::WHITE { color::GRAY_50 } else { fg };

        if !connected {
            self.draw_rect(x_left, y_top, icon_w, icon_h, color_off);
        }

        for i in 0..4i16 {
            let bar_w = 2i16;
            let gap = 1i16;
            let x = x_left + 1 + i * (bar_w + gap);
            let h = 2 + i * 2;
            let y = y_top + icon_h - h;
            let color = if i < bars && connected { fg } else { color_off };
            self.fill_rect(x, y, bar_w, h, color);
        }
    }

    /// Battery indicator with nub, fill level and optional charging bolt,
    /// 20x10, right-edge anchored.
    fn draw_battery_icon(&mut self, x_right: i16, y_top: i16, pct: i8, charging: bool, fg: u16, bg: u16) {
        let icon_w = 20i16;
        let icon_h = 10i16;
        let x_left = x_right - icon_w;
        self.fill_rect(x_left, y_top, icon_w, icon_h, bg);

        let body_w = 16i16;
        let body_h = 10i16;
        let nub_w = 3i16;
        let nub_h = 4i16;

        self.draw_rect(x_left, y_top, body_w, body_h, fg);
        self.fill_rect(x_left + body_w, y_top + (icon_h - nub_h) / 2, nub_w, nub_h, fg);

        let pct = i16::from(pct).clamp(0, 100);
        let fill_w = (body_w - 2) * pct / 100;
        if fill_w > 0 {
            self.fill_rect(x_left + 1, y_top + 1, fill_w, body_h - 2, fg);
        }

        if charging {
            let cx = x_left + body_w / 2;
            let cy = y_top + body_h / 2;
            self.draw_line(cx - 2, cy - 3, cx, cy, bg);
            self.draw_line(cx, cy, cx - 1, cy + 3, bg);
            self.draw_line(cx + 2, cy - 3, cx, cy, bg);
        }
    }

    /// Habit tracker bar in the status region: water, pomodoro, pushup and
    /// supplement cells with icons and counts.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_tracker_bar(
        &mut self,
        water_count: i16,
        tomato_count: i16,
        pushup_count: i16,
        supplements_done: bool,
        fg: u16,
        bg: u16,
        clear_bg: bool,
    ) {
        if !self.is_ready() {
            return;
        }
        let bar = self.status_bar_rect();
        if bar.h <= 0 {
            return;
        }

        if clear_bg {
            self.fill_rect(bar.x, bar.y, bar.w, bar.h, bg);
        }
        self.fill_rect(bar.x, bar.y + bar.h - 1, bar.w, 1, color::SEPARATOR);

        let inner_w = bar.w - 2 * PADDING;
        let cell_w = if inner_w > 0 { inner_w / 4 } else { bar.w / 4 };

        let y_mid = bar.y + bar.h / 2;
        let icon_cy = y_mid - 4;

        let count_size = 2u8;
        let count_y = bar.y + bar.h - (GLYPH_HEIGHT as i16) * i16::from(count_size) - 6;

        let icon_inset_x = 14i16;
        let count_inset_x = 14i16;
        let count_inset_x_wide = 18i16;
        let pill_count_inset_x = 16i16;

        // Water
        let icon_cx = bar.x + PADDING + icon_inset_x;
        self.draw_droplet_icon(icon_cx, icon_cy, color::CYAN, color::WHITE);
        self.draw_text_wrapped(
            icon_cx + count_inset_x,
            count_y,
            &format!("{water_count}"),
            count_size,
            color::CYAN,
            bg,
            true,
        );

        // Tomato
        let icon_cx = bar.x + PADDING + cell_w + icon_inset_x;
        self.draw_tomato_icon(icon_cx, icon_cy, color::RED, color::GREEN, color::WHITE);
        self.draw_text_wrapped(
            icon_cx + count_inset_x,
            count_y,
            &format!("{tomato_count}"),
            count_size,
            color::RED,
            bg,
            true,
        );

        // Dumbbell
        let icon_cx = bar.x + PADDING + 2 * cell_w + icon_inset_x;
        self.draw_dumbbell_icon(icon_cx, icon_cy, color::WHITE, bg);
        self.draw_text_wrapped(
            icon_cx + count_inset_x_wide,
            count_y,
            &format!("{pushup_count}"),
            count_size,
            color::WHITE,
            bg,
            true,
        );

        // Supplements: pill plus a green check when done, gray zero when not
        let icon_cx = bar.x + PADDING + 3 * cell_w + icon_inset_x;
        self.draw_pill_icon(icon_cx, icon_cy);
        if supplements_done {
            let x0 = icon_cx + count_inset_x;
            let y0 = count_y + 10;
            self.draw_line(x0, y0, x0 + 4, y0 + 4, color::GREEN);
            self.draw_line(x0 + 4, y0 + 4, x0 + 12, y0 - 4, color::GREEN);
        } else {
            self.draw_text_wrapped(
                icon_cx + pill_count_inset_x,
                count_y,
                "0",
                count_size,
                color::GRAY_50,
                bg,
                true,
            );
        }
        let _ = fg;
    }

    /// Water droplet: circle body, triangular tip, small shine.
    fn draw_droplet_icon(&mut self, cx: i16, cy: i16, color: u16, shine: u16) {
        self.fill_circle(cx, cy + 3, 8, color);
        self.fill_triangle(cx, cy - 10, cx - 7, cy + 2, cx + 7, cy + 2, color);
        self.fill_circle(cx - 2, cy + 1, 2, shine);
    }

    /// Tomato: red ellipse with shine and a green stem speck.
    fn draw_tomato_icon(&mut self, cx: i16, cy: i16, red: u16, green: u16, shine: u16) {
        self.fill_ellipse(cx, cy + 4, 11, 9, red);
        self.fill_circle(cx - 4, cy, 3, shine);
        self.fill_circle(cx, cy - 6, 2, green);
    }

    /// Dumbbell: center bar plus two plates with inner cutouts.
    fn draw_dumbbell_icon(&mut self, cx: i16, cy: i16, fg: u16, bg: u16) {
        let plate_w = 8i16;
        let plate_h = 14i16;
        let bar_w = 16i16;
        let bar_h = 4i16;
        let y_top = cy - plate_h / 2 + 2;

        self.fill_rect(cx - bar_w / 2, cy - bar_h / 2 + 2, bar_w, bar_h, fg);

        let left_x = cx - bar_w / 2 - plate_w;
        self.fill_round_rect(left_x, y_top, plate_w, plate_h, 2, fg);
        self.fill_round_rect(left_x + 2, y_top + 2, plate_w - 4, plate_h - 4, 1, bg);

        let right_x = cx + bar_w / 2;
        self.fill_round_rect(right_x, y_top, plate_w, plate_h, 2, fg);
        self.fill_round_rect(right_x + 2, y_top + 2, plate_w - 4, plate_h - 4, 1, bg);
    }

    /// Two-tone vertical capsule with outline and midline.
    fn draw_pill_icon(&mut self, cx: i16, cy: i16) {
        let w = 12i16;
        let h = 24i16;
        let r = 6i16;
        let x_left = cx - w / 2;
        let y_top = cy - h / 2;

        self.fill_round_rect(x_left, y_top, w, h, r, color::PURPLE);
        self.fill_rect(x_left, y_top + h / 2, w, h / 2, color::WHITE);
        self.draw_round_rect(x_left, y_top, w, h, r, color::BLACK);
        self.draw_line(x_left + 1, y_top + h / 2, x_left + w - 2, y_top + h / 2, color::BLACK);
    }

    /// Boot splash: one-second red, green and blue full-screen flashes,
    /// then title, firmware version, IP address and three color swatches.
    pub fn draw_startup<D: DelayNs, Y: YieldNow>(
        &mut self,
        version: &str,
        ip: &str,
        delay: &mut D,
        yld: &mut Y,
    ) {
        if !self.is_ready() {
            log::warn!("display not ready for startup screen");
            return;
        }

        for flash in [color::RED, color::GREEN, color::BLUE] {
            self.fill_screen(flash);
            delay.delay_ms(STARTUP_FLASH_MS);
        }
        self.fill_screen(color::BLACK);

        let title_y = 10i16;
        let font_size = 2u8;
        let line3 = 60i16;
        let line2 = 40i16;
        let line1 = 20i16;

        self.draw_text_wrapped(
            PADDING,
            title_y,
            "GeekMagic Open Firmware",
            font_size,
            color::WHITE,
            color::BLACK,
            false,
        );
        self.draw_text_wrapped(
            PADDING,
            title_y + line3,
            version,
            font_size,
            color::WHITE,
            color::BLACK,
            false,
        );
        self.draw_text_wrapped(
            PADDING,
            title_y + line3 + line2,
            &format!("IP: {ip}"),
            font_size,
            color::WHITE,
            color::BLACK,
            false,
        );

        let swatch = 40i16;
        let gap = 20i16;
        let swatch_y = title_y + line3 * 2 + line1;

        self.fill_rect(PADDING, swatch_y, swatch, swatch, color::RED);
        self.fill_rect(PADDING + swatch + gap, swatch_y, swatch, swatch, color::GREEN);
        self.fill_rect(PADDING + (swatch + gap) * 2, swatch_y, swatch, swatch, color::BLUE);

        yld.yield_now();
        log::info!("startup screen drawn");
    }

    /// Horizontally centered progress bar. `progress` is 0.0..=1.0.
    ///
    /// The stock caller uses `y` [`LOADING_BAR_Y`], width
    /// [`LOADING_BAR_WIDTH`], height [`LOADING_BAR_HEIGHT`], a green
    /// foreground and the separator gray as trough.
    pub fn draw_loading_bar(&mut self, progress: f32, y: i16, w: i16, h: i16, fg: u16, bg: u16) {
        if !self.is_ready() || w <= 0 || h <= 0 {
            return;
        }

        let x = (self.screen_width() - w) / 2;
        self.fill_rect(x, y, w, h, bg);

        let fill_w = (f32::from(w) * progress) as i16;
        if fill_w > 0 {
            self.fill_rect(x, y, fill_w.min(w), h, fg);
        }
    }

    /// Play one GIF file full screen, blocking.
    ///
    /// `time_ms == 0` starts looping playback and returns immediately;
    /// otherwise playback is pumped for up to `time_ms` milliseconds, then
    /// stopped and wound down. Returns false when the decoder is
    /// unavailable or the file cannot be played.
    pub fn play_gif_full_screen<D: DelayNs, Y: YieldNow>(
        &mut self,
        path: &str,
        time_ms: u32,
        delay: &mut D,
        yld: &mut Y,
    ) -> bool {
        if !self.gif.begin() {
            log::warn!("gif decoder unavailable");
            return false;
        }

        self.clear_screen();
        self.gif.set_loop_enabled(time_ms == 0);

        if !self.gif.play_one(path) {
            log::warn!("gif playback failed to start: {path}");
            return false;
        }

        if time_ms == 0 {
            return true;
        }

        let mut elapsed_ms = 0u32;
        while self.gif.is_playing() && elapsed_ms < time_ms {
            self.gif.update();
            yld.yield_now();
            delay.delay_ms(1);
            elapsed_ms += 1;
        }

        if self.gif.is_playing() {
            self.gif.stop();
        }
        // Let the decoder wind down before touching the screen again.
        while self.gif.is_playing() {
            self.gif.update();
            yld.yield_now();
        }

        self.gif.set_loop_enabled(false);
        true
    }

    /// Stop any GIF playback and clear the screen.
    pub fn stop_gif(&mut self) -> bool {
        self.gif.stop();
        self.clear_screen();
        true
    }

    /// Pump the GIF decoder by one frame. Call from the main loop.
    pub fn update(&mut self) {
        self.gif.update();
    }
}

/// Center a text row vertically in the status bar, clamped inside the bar
/// when the bar is shorter than the glyph cell.
fn status_text_y(text_size: u8, bar: &UiRect) -> i16 {
    let char_h = (GLYPH_HEIGHT as i16) * i16::from(text_size);
    (bar.y + (bar.h - char_h) / 2).clamp(bar.y, bar.y + bar.h)
}

fn point(x: i16, y: i16) -> Point {
    Point::new(i32::from(x), i32::from(y))
}

fn size(w: i16, h: i16) -> Size {
    Size::new(w as u32, h as u32)
}

fn diameter(r: i16) -> u32 {
    (i32::from(r) * 2 + 1) as u32
}
