//! Remote drawing command interpreter
//!
//! Parses the JSON wire format the HTTP layer receives and maps each command
//! onto [`DisplayManager`] calls. Parsing is zero-copy: string fields borrow
//! from the request body, and batches land in a fixed-capacity vector, so no
//! allocation happens per request beyond what drawing itself needs.
//!
//! Every field except the command type is optional; absent fields take the
//! documented per-type defaults. Unknown command types are counted as
//! processed but draw nothing, keeping a batch with one bad entry from
//! failing wholesale.

use serde::Deserialize;

use embedded_hal::digital::OutputPin;

use crate::bus::DisplayBus;
use crate::color;
use crate::gif::GifDecoder;
use crate::manager::DisplayManager;
use crate::task::YieldNow;

/// Maximum number of commands accepted in one batch.
pub const MAX_BATCH_COMMANDS: usize = 32;

/// One drawing command as it appears on the wire.
///
/// `kind` selects the shape; the relevant subset of the remaining fields is
/// read per type and everything else is ignored. Colors are `#RRGGBB`
/// strings.
#[derive(Debug, Default, Deserialize)]
pub struct DrawCommand<'a> {
    /// Command type: `clear`, `pixel`, `line`, `rect`, `circle`, `triangle`,
    /// `ellipse`, `roundrect` or `text`
    #[serde(rename = "type", borrow, default)]
    pub kind: Option<&'a str>,
    /// Stroke/fill color; absent means white (black for `clear`)
    #[serde(borrow, default)]
    pub color: Option<&'a str>,
    /// X coordinate / center X
    #[serde(default)]
    pub x: Option<i16>,
    /// Y coordinate / center Y
    #[serde(default)]
    pub y: Option<i16>,
    /// Width
    #[serde(default)]
    pub w: Option<i16>,
    /// Height
    #[serde(default)]
    pub h: Option<i16>,
    /// Radius (circle, rounded rectangle corners)
    #[serde(default)]
    pub r: Option<i16>,
    /// Ellipse X radius
    #[serde(default)]
    pub rx: Option<i16>,
    /// Ellipse Y radius
    #[serde(default)]
    pub ry: Option<i16>,
    /// First point X (line, triangle)
    #[serde(default)]
    pub x0: Option<i16>,
    /// First point Y
    #[serde(default)]
    pub y0: Option<i16>,
    /// Second point X
    #[serde(default)]
    pub x1: Option<i16>,
    /// Second point Y
    #[serde(default)]
    pub y1: Option<i16>,
    /// Third point X (triangle)
    #[serde(default)]
    pub x2: Option<i16>,
    /// Third point Y
    #[serde(default)]
    pub y2: Option<i16>,
    /// Text payload
    #[serde(borrow, default)]
    pub text: Option<&'a str>,
    /// Text size multiplier, defaults to 2
    #[serde(default)]
    pub size: Option<u8>,
    /// Text background color, defaults to black
    #[serde(borrow, default)]
    pub bg: Option<&'a str>,
    /// Clear the text background rectangle first
    #[serde(default)]
    pub clear: Option<bool>,
    /// Filled variant instead of outline, defaults to true
    #[serde(default)]
    pub fill: Option<bool>,
}

/// A `{"commands": [...]}` batch payload.
#[derive(Debug, Deserialize)]
pub struct DrawBatch<'a> {
    /// Commands in application order
    #[serde(borrow)]
    pub commands: heapless::Vec<DrawCommand<'a>, MAX_BATCH_COMMANDS>,
}

/// Parse a single command body.
pub fn parse_command(json: &str) -> Result<DrawCommand<'_>, serde_json_core::de::Error> {
    serde_json_core::from_str(json).map(|(cmd, _)| cmd)
}

/// Parse a batch body. Fails when the payload is malformed or holds more
/// than [`MAX_BATCH_COMMANDS`] entries.
pub fn parse_batch(json: &str) -> Result<DrawBatch<'_>, serde_json_core::de::Error> {
    serde_json_core::from_str(json).map(|(batch, _)| batch)
}

/// Apply one command to the display.
///
/// Unknown types draw nothing. Absent fields take the per-type defaults the
/// wire format documents.
///
/// A `clear` without a color fills black, matching the standalone clear
/// endpoint. Earlier firmware builds flashed white when a bare `clear`
/// arrived inside a batch; that inconsistency is not kept.
pub fn apply_command<B, RST, BL, G>(mgr: &mut DisplayManager<B, RST, BL, G>, cmd: &DrawCommand<'_>)
where
    B: DisplayBus,
    RST: OutputPin,
    BL: OutputPin,
    G: GifDecoder,
{
    let color = color::hex_or(cmd.color, color::WHITE);
    let fill = cmd.fill.unwrap_or(true);

    match cmd.kind.unwrap_or("") {
        // Clear defaults to black: "clear the screen" means back to the
        // canvas color, not a white flash.
        "clear" => mgr.fill_screen(color::hex_or(cmd.color, color::BLACK)),
        "pixel" => {
            mgr.draw_pixel(cmd.x.unwrap_or(0), cmd.y.unwrap_or(0), color);
        }
        "line" => {
            mgr.draw_line(
                cmd.x0.unwrap_or(0),
                cmd.y0.unwrap_or(0),
                cmd.x1.unwrap_or(240),
                cmd.y1.unwrap_or(240),
                color,
            );
        }
        "rect" => {
            let (x, y) = (cmd.x.unwrap_or(0), cmd.y.unwrap_or(0));
            let (w, h) = (cmd.w.unwrap_or(10), cmd.h.unwrap_or(10));
            if fill {
                mgr.fill_rect(x, y, w, h, color);
            } else {
                mgr.draw_rect(x, y, w, h, color);
            }
        }
        "circle" => {
            let (x, y) = (cmd.x.unwrap_or(120), cmd.y.unwrap_or(120));
            let r = cmd.r.unwrap_or(50);
            if fill {
                mgr.fill_circle(x, y, r, color);
            } else {
                mgr.draw_circle(x, y, r, color);
            }
        }
        "triangle" => {
            let (x0, y0) = (cmd.x0.unwrap_or(0), cmd.y0.unwrap_or(0));
            let (x1, y1) = (cmd.x1.unwrap_or(0), cmd.y1.unwrap_or(0));
            let (x2, y2) = (cmd.x2.unwrap_or(0), cmd.y2.unwrap_or(0));
            if fill {
                mgr.fill_triangle(x0, y0, x1, y1, x2, y2, color);
            } else {
                mgr.draw_triangle(x0, y0, x1, y1, x2, y2, color);
            }
        }
        "ellipse" => {
            let (x, y) = (cmd.x.unwrap_or(120), cmd.y.unwrap_or(120));
            let (rx, ry) = (cmd.rx.unwrap_or(50), cmd.ry.unwrap_or(30));
            if fill {
                mgr.fill_ellipse(x, y, rx, ry, color);
            } else {
                mgr.draw_ellipse(x, y, rx, ry, color);
            }
        }
        "roundrect" => {
            let (x, y) = (cmd.x.unwrap_or(0), cmd.y.unwrap_or(0));
            let (w, h) = (cmd.w.unwrap_or(50), cmd.h.unwrap_or(30));
            let r = cmd.r.unwrap_or(5);
            if fill {
                mgr.fill_round_rect(x, y, w, h, r, color);
            } else {
                mgr.draw_round_rect(x, y, w, h, r, color);
            }
        }
        "text" => {
            let (x, y) = (cmd.x.unwrap_or(0), cmd.y.unwrap_or(0));
            let text = cmd.text.unwrap_or("");
            let size = cmd.size.unwrap_or(2);
            let bg = color::hex_or(cmd.bg, color::BLACK);
            let clear_bg = cmd.clear.unwrap_or(false);
            mgr.draw_text_wrapped(x, y, text, size, color, bg, clear_bg);
        }
        other => log::warn!("unknown draw command type: {other:?}"),
    }
}

/// Apply a whole batch in order, yielding to the runtime between entries.
///
/// Returns the number of commands processed. Unknown types count too; the
/// caller reports the number back to the remote client.
pub fn run_batch<B, RST, BL, G, Y>(
    mgr: &mut DisplayManager<B, RST, BL, G>,
    batch: &DrawBatch<'_>,
    yld: &mut Y,
) -> usize
where
    B: DisplayBus,
    RST: OutputPin,
    BL: OutputPin,
    G: GifDecoder,
    Y: YieldNow,
{
    let mut processed = 0;
    for cmd in &batch.commands {
        apply_command(mgr, cmd);
        processed += 1;
        yld.yield_now();
    }
    processed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PanelConfig;
    use crate::gif::NoopGif;
    use crate::panel::tests::{MockBus, MockDelay, MockPin, Op, panel_with};
    use crate::task::NoopYield;
    use alloc::vec;

    fn ready_manager() -> (DisplayManager<MockBus, MockPin, MockPin, NoopGif>, MockBus) {
        let (panel, bus, _rst, _bl) = panel_with(PanelConfig::builder().build());
        let mut mgr = DisplayManager::new(panel, NoopGif);
        mgr.begin(0, &mut MockDelay::default(), &mut NoopYield);
        bus.ops.borrow_mut().clear();
        (mgr, bus)
    }

    #[test]
    fn parses_text_command_with_borrowed_strings() {
        let cmd = parse_command(
            r##"{"type":"text","x":70,"y":100,"text":"Hello","size":2,"color":"#ffffff"}"##,
        )
        .unwrap();
        assert_eq!(cmd.kind, Some("text"));
        assert_eq!(cmd.text, Some("Hello"));
        assert_eq!(cmd.x, Some(70));
        assert_eq!(cmd.color, Some("#ffffff"));
        assert_eq!(cmd.bg, None);
    }

    #[test]
    fn parses_batch_in_order() {
        let batch = parse_batch(
            r##"{"commands":[
                {"type":"clear","color":"#000000"},
                {"type":"rect","x":10,"y":10,"w":50,"h":50,"color":"#ff0000","fill":true},
                {"type":"line","x0":0,"y0":0,"x1":240,"y1":240,"color":"#0000ff"}
            ]}"##,
        )
        .unwrap();
        assert_eq!(batch.commands.len(), 3);
        assert_eq!(batch.commands[0].kind, Some("clear"));
        assert_eq!(batch.commands[2].kind, Some("line"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_batch(r#"{"commands":"#).is_err());
        assert!(parse_command("[]").is_err());
    }

    #[test]
    fn rect_defaults_to_ten_by_ten_filled_white() {
        let (mut mgr, bus) = ready_manager();
        let cmd = parse_command(r#"{"type":"rect"}"#).unwrap();
        apply_command(&mut mgr, &cmd);
        assert!(bus.ops.borrow().contains(&Op::Repeat(crate::color::WHITE, 100)));
    }

    #[test]
    fn bare_clear_defaults_to_black() {
        let (mut mgr, bus) = ready_manager();
        let cmd = parse_command(r#"{"type":"clear"}"#).unwrap();
        apply_command(&mut mgr, &cmd);
        assert!(bus.ops.borrow().contains(&Op::Repeat(crate::color::BLACK, 57_600)));
    }

    #[test]
    fn clear_fills_with_given_color() {
        let (mut mgr, bus) = ready_manager();
        let cmd = parse_command(r##"{"type":"clear","color":"#ff0000"}"##).unwrap();
        apply_command(&mut mgr, &cmd);
        assert!(bus.ops.borrow().contains(&Op::Repeat(crate::color::RED, 57_600)));
    }

    #[test]
    fn malformed_color_degrades_to_white() {
        let (mut mgr, bus) = ready_manager();
        let cmd = parse_command(r##"{"type":"clear","color":"#zz"}"##).unwrap();
        apply_command(&mut mgr, &cmd);
        assert!(bus.ops.borrow().contains(&Op::Repeat(crate::color::WHITE, 57_600)));
    }

    #[test]
    fn text_command_renders_at_anchor() {
        let (mut mgr, bus) = ready_manager();
        let cmd =
            parse_command(r#"{"type":"text","x":12,"y":40,"text":"Hi","size":1}"#).unwrap();
        apply_command(&mut mgr, &cmd);
        assert_eq!(bus.params_after(0x2A, 0), Some(vec![0, 12, 0, 23]));
        assert_eq!(bus.params_after(0x2B, 0), Some(vec![0, 40, 0, 47]));
    }

    #[test]
    fn batch_counts_every_entry_and_yields_between() {
        struct CountYield(u32);
        impl YieldNow for CountYield {
            fn yield_now(&mut self) {
                self.0 += 1;
            }
        }

        let (mut mgr, bus) = ready_manager();
        let batch = parse_batch(
            r##"{"commands":[
                {"type":"clear"},
                {"type":"bogus"},
                {"type":"pixel","x":5,"y":5,"color":"#00ff00"}
            ]}"##,
        )
        .unwrap();

        let mut yld = CountYield(0);
        let processed = run_batch(&mut mgr, &batch, &mut yld);

        // Unknown types are counted, not errored.
        assert_eq!(processed, 3);
        assert_eq!(yld.0, 3);
        assert!(bus.ops.borrow().contains(&Op::Repeat(crate::color::BLACK, 57_600)));
        assert!(bus.ops.borrow().contains(&Op::Pixels(vec![crate::color::GREEN])));
    }

    #[test]
    fn batch_over_capacity_is_rejected() {
        let mut body = alloc::string::String::from(r#"{"commands":["#);
        for i in 0..=MAX_BATCH_COMMANDS {
            if i > 0 {
                body.push(',');
            }
            body.push_str(r#"{"type":"pixel"}"#);
        }
        body.push_str("]}");
        assert!(parse_batch(&body).is_err());
    }
}
