//! Host hook contract invoked by [`crate::reset`] and [`crate::iterate`].
//!
//! Every hook is a required trait method, so a host that forgets one fails to
//! compile instead of faulting mid-run. Hooks are called unconditionally from
//! the frame loop and must not panic.

/// Controller buttons polled through [`Callbacks::input_requested`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// D-pad up.
    Up,
    /// D-pad down.
    Down,
    /// D-pad left.
    Left,
    /// D-pad right.
    Right,
    /// Face button A.
    A,
    /// Face button B.
    B,
    /// Face button C.
    C,
    /// Six-button pad X.
    X,
    /// Six-button pad Y.
    Y,
    /// Six-button pad Z.
    Z,
    /// Start.
    Start,
    /// Six-button pad Mode.
    Mode,
}

impl Button {
    /// Every button, in the bit order used by the pad-read instruction.
    pub const ALL: [Self; 12] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::A,
        Self::B,
        Self::C,
        Self::X,
        Self::Y,
        Self::Z,
        Self::Start,
        Self::Mode,
    ];
}

/// Playback mode requested when seeking to a CD audio track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CddaMode {
    /// Play from the track to the end of the disc.
    PlayAll,
    /// Play the track once, then stop.
    PlayOnce,
    /// Loop the track.
    PlayRepeat,
}

/// Audio synthesis step supplied by the core to an audio hook.
///
/// The argument is the host's sample buffer; the core writes interleaved
/// samples for the requested frame count into its prefix and never past its
/// end.
pub type AudioGenerator<'a> = dyn FnMut(&mut [i16]) + 'a;

/// Complete set of host services the core can request.
pub trait Callbacks {
    /// Reads one byte of cartridge space.
    fn cartridge_read(&mut self, address: u32) -> u8;

    /// Receives a byte written to cartridge space.
    fn cartridge_written(&mut self, address: u32, value: u8);

    /// Receives a colour RAM update (`colour` is `0x0BGR`, four bits per gun).
    fn colour_updated(&mut self, index: u16, colour: u16);

    /// Receives one rendered scanline of palette indices.
    fn scanline_rendered(
        &mut self,
        scanline: u16,
        pixels: &[u8],
        screen_width: u16,
        screen_height: u16,
    );

    /// Reports whether a controller button is held.
    fn input_requested(&mut self, player_id: u8, button: Button) -> bool;

    /// Requests `total_frames` stereo frames of FM audio.
    fn fm_audio_to_be_generated(&mut self, total_frames: usize, generate: &mut AudioGenerator<'_>);

    /// Requests `total_samples` mono samples of PSG audio.
    fn psg_audio_to_be_generated(
        &mut self,
        total_samples: usize,
        generate: &mut AudioGenerator<'_>,
    );

    /// Requests `total_frames` stereo frames of CD add-on PCM audio.
    fn pcm_audio_to_be_generated(&mut self, total_frames: usize, generate: &mut AudioGenerator<'_>);

    /// Requests `total_frames` stereo frames of CD audio.
    fn cdda_audio_to_be_generated(
        &mut self,
        total_frames: usize,
        generate: &mut AudioGenerator<'_>,
    );

    /// Moves the disc head to a data sector.
    fn cd_seeked(&mut self, sector_index: u32);

    /// Fills `buffer` with the sector under the head.
    fn cd_sector_read(&mut self, buffer: &mut [u16]);

    /// Moves the disc head to an audio track; `false` when absent.
    fn cd_seek_track(&mut self, track_index: u16, mode: CddaMode) -> bool;

    /// Reads up to `total_frames` stereo frames of CD audio into `buffer`,
    /// returning the frame count produced.
    fn cd_audio_read(&mut self, buffer: &mut [i16], total_frames: usize) -> usize;

    /// Opens a save file for reading; `false` when it does not exist.
    fn save_file_opened_for_reading(&mut self, filename: &str) -> bool;

    /// Reads the next byte of the open save file; `None` at end of file.
    fn save_file_read(&mut self) -> Option<u8>;

    /// Opens a save file for writing; `false` when that is unsupported.
    fn save_file_opened_for_writing(&mut self, filename: &str) -> bool;

    /// Appends a byte to the open save file.
    fn save_file_written(&mut self, byte: u8);

    /// Closes the open save file.
    fn save_file_closed(&mut self);

    /// Deletes a save file; `false` when nothing was removed.
    fn save_file_removed(&mut self, filename: &str) -> bool;

    /// Returns the size of a save file, or `None` when it does not exist.
    fn save_file_size_obtained(&mut self, filename: &str) -> Option<usize>;
}
