//! UI regions and greedy word-wrap
//!
//! Pure geometry and text layout, independent of any hardware so the whole
//! module is host-testable. The screen splits into three bands: a status bar
//! at the top, a footer at the bottom and the body between them. Text layout
//! is greedy word-wrap over the fixed 6x8 font cell.

use alloc::string::String;
use alloc::vec::Vec;
use core::mem;

use crate::font::{GLYPH_HEIGHT, GLYPH_WIDTH};

/// Status bar height in pixels
pub const STATUS_BAR_HEIGHT: i16 = 64;

/// Footer height in pixels
pub const FOOTER_HEIGHT: i16 = 70;

/// Horizontal padding for UI content
pub const PADDING: i16 = 10;

/// Gap between adjacent UI elements
pub const GAP: i16 = 6;

/// Absolute cap on wrapped lines, independent of the vertical budget
pub const MAX_LINE_SLOTS: usize = 10;

/// A screen-space rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiRect {
    /// Left edge
    pub x: i16,
    /// Top edge
    pub y: i16,
    /// Width
    pub w: i16,
    /// Height
    pub h: i16,
}

fn clamp_i16(value: i32, low: i32, high: i32) -> i16 {
    value.clamp(low, high) as i16
}

/// Status bar region: full width, anchored to the top.
pub fn status_bar_rect(screen_w: i16, screen_h: i16) -> UiRect {
    let h = clamp_i16(i32::from(STATUS_BAR_HEIGHT), 0, i32::from(screen_h));
    UiRect {
        x: 0,
        y: 0,
        w: screen_w,
        h,
    }
}

/// Footer region: full width, anchored to the bottom.
pub fn footer_rect(screen_w: i16, screen_h: i16) -> UiRect {
    let h = clamp_i16(i32::from(FOOTER_HEIGHT), 0, i32::from(screen_h));
    UiRect {
        x: 0,
        y: screen_h - h,
        w: screen_w,
        h,
    }
}

/// Body region: everything between status bar and footer.
///
/// Height clamps to zero when the bands overlap on a short screen.
pub fn body_rect(screen_w: i16, screen_h: i16) -> UiRect {
    let bar_h = clamp_i16(i32::from(STATUS_BAR_HEIGHT), 0, i32::from(screen_h));
    let footer_h = clamp_i16(i32::from(FOOTER_HEIGHT), 0, i32::from(screen_h));
    let body_h = i32::from(screen_h) - i32::from(bar_h) - i32::from(footer_h);
    UiRect {
        x: 0,
        y: bar_h,
        w: screen_w,
        h: clamp_i16(body_h, 0, i32::from(screen_h)),
    }
}

/// Pixel width of `text` at the given integer scale.
pub fn text_width_px(text: &str, text_size: u8) -> i16 {
    let px = text.chars().count() as i32 * i32::from(GLYPH_WIDTH) * i32::from(text_size);
    clamp_i16(px, 0, i32::from(i16::MAX))
}

fn push_line(out: &mut Vec<String>, line: &mut String, max_lines: usize) {
    if out.len() >= max_lines || out.len() >= MAX_LINE_SLOTS {
        log::warn!("text wrap: line budget exhausted, truncating");
        return;
    }
    out.push(mem::take(line));
}

fn append_word(out: &mut Vec<String>, line: &mut String, word: &mut String, max_chars: usize, max_lines: usize) {
    if word.is_empty() {
        return;
    }

    let at_cap = |out: &Vec<String>| out.len() >= max_lines || out.len() >= MAX_LINE_SLOTS;

    if word.chars().count() > max_chars {
        // A word longer than the line budget gets a line of its own and is
        // drawn past the right edge rather than split mid-word.
        if !line.is_empty() {
            push_line(out, line, max_lines);
            if at_cap(out) {
                word.clear();
                log::warn!("text wrap: line budget exhausted, truncating");
                return;
            }
        }
        *line = mem::take(word);
        return;
    }

    if line.is_empty() {
        *line = mem::take(word);
        return;
    }

    if line.chars().count() + 1 + word.chars().count() <= max_chars {
        line.push(' ');
        line.push_str(word);
        word.clear();
        return;
    }

    push_line(out, line, max_lines);
    if at_cap(out) {
        word.clear();
        return;
    }
    *line = mem::take(word);
}

/// Greedily wrap `text` into lines fitting the area from `(start_x, start_y)`
/// to the bottom-right screen corner at the given text size.
///
/// Semantics:
/// - `\r` is dropped, `\n` forces a line break (blank lines survive)
/// - space and tab separate words; runs collapse to one separator
/// - a word wider than the line budget gets its own line, unsplit
/// - output is capped at the vertical budget and at [`MAX_LINE_SLOTS`]
///   lines, whichever is smaller; overflow is silently dropped
/// - the result is never empty: degenerate input or a degenerate area
///   yields one empty line
pub fn wrap_text(
    start_x: i16,
    start_y: i16,
    text: &str,
    text_size: u8,
    screen_w: i16,
    screen_h: i16,
) -> Vec<String> {
    let char_w = i32::from(GLYPH_WIDTH) * i32::from(text_size);
    let char_h = i32::from(GLYPH_HEIGHT) * i32::from(text_size);
    if char_w <= 0 || char_h <= 0 {
        return alloc::vec![String::new()];
    }

    let max_chars = (i32::from(screen_w) - i32::from(start_x)) / char_w;
    let max_lines = (i32::from(screen_h) - i32::from(start_y)) / char_h;

    if max_chars <= 0 || max_lines <= 0 {
        log::warn!("text wrap: no room at ({start_x}, {start_y})");
        return alloc::vec![String::new()];
    }

    let max_chars = max_chars as usize;
    let max_lines = max_lines as usize;

    let mut out = Vec::with_capacity(max_lines.min(MAX_LINE_SLOTS));
    let mut line = String::new();
    let mut word = String::new();

    for chr in text.chars() {
        match chr {
            '\r' => {}
            '\n' => {
                append_word(&mut out, &mut line, &mut word, max_chars, max_lines);
                push_line(&mut out, &mut line, max_lines);
            }
            ' ' | '\t' => {
                append_word(&mut out, &mut line, &mut word, max_chars, max_lines);
            }
            _ => word.push(chr),
        }
    }

    append_word(&mut out, &mut line, &mut word, max_chars, max_lines);

    if !line.is_empty() && out.len() < max_lines && out.len() < MAX_LINE_SLOTS {
        out.push(line);
    }
    if out.is_empty() {
        out.push(String::new());
    }

    out
}
