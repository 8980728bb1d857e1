//! GIF decoder boundary trait
//!
//! Decoding itself lives outside this crate (it is board- and
//! filesystem-specific); the display manager only coordinates playback
//! through this trait. [`NoopGif`] is the stand-in for builds without an
//! animation backend.

/// Playback interface the display manager drives.
///
/// Implementations own the decoder, the file access and the frame blitting.
/// `update` is pumped from the main loop; one call advances at most one
/// frame.
pub trait GifDecoder {
    /// Prepare the decoder. Returns false when the backend is unavailable
    /// (missing filesystem, allocation failure), in which case playback
    /// requests fail cleanly.
    fn begin(&mut self) -> bool;

    /// Restart the animation from the first frame when it finishes instead
    /// of stopping.
    fn set_loop_enabled(&mut self, enabled: bool);

    /// Start playing the file at `path`. Returns false when the file cannot
    /// be opened or decoded.
    fn play_one(&mut self, path: &str) -> bool;

    /// Whether an animation is currently in progress.
    fn is_playing(&self) -> bool;

    /// Advance playback by at most one frame.
    fn update(&mut self);

    /// Request playback stop. The decoder may need further [`Self::update`]
    /// calls to wind down; `is_playing` reports when it has.
    fn stop(&mut self);
}

/// Decoder that plays nothing.
///
/// Every playback request fails cleanly, so manager code paths behave as if
/// each file were unreadable.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopGif;

impl GifDecoder for NoopGif {
    fn begin(&mut self) -> bool {
        false
    }

    fn set_loop_enabled(&mut self, _enabled: bool) {}

    fn play_one(&mut self, _path: &str) -> bool {
        false
    }

    fn is_playing(&self) -> bool {
        false
    }

    fn update(&mut self) {}

    fn stop(&mut self) {}
}
