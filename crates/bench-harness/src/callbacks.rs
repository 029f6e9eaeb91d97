//! Host side of the callback boundary for benchmarking: serve cartridge bytes,
//! run every synthesis request into a scratch buffer, discard all output.

use console_core::{AudioGenerator, Button, Callbacks, CddaMode, MAX_AUDIO_SAMPLES};

use crate::CartridgeImage;

/// Callback table that exercises the core while producing nothing.
#[derive(Debug)]
pub struct BenchmarkCallbacks<'a> {
    cartridge: &'a CartridgeImage,
    audio_scratch: Box<[i16]>,
}

impl<'a> BenchmarkCallbacks<'a> {
    /// Binds the table to a loaded cartridge and allocates the audio scratch
    /// buffer once.
    #[must_use]
    pub fn new(cartridge: &'a CartridgeImage) -> Self {
        Self {
            cartridge,
            audio_scratch: vec![0; MAX_AUDIO_SAMPLES].into_boxed_slice(),
        }
    }

    /// The cartridge served by [`Callbacks::cartridge_read`].
    #[must_use]
    pub const fn cartridge(&self) -> &'a CartridgeImage {
        self.cartridge
    }

    fn generate_discarded(&mut self, generate: &mut AudioGenerator<'_>) {
        generate(&mut self.audio_scratch);
    }
}

impl Callbacks for BenchmarkCallbacks<'_> {
    fn cartridge_read(&mut self, address: u32) -> u8 {
        self.cartridge.read(address)
    }

    fn cartridge_written(&mut self, _address: u32, _value: u8) {}

    fn colour_updated(&mut self, _index: u16, _colour: u16) {}

    fn scanline_rendered(
        &mut self,
        _scanline: u16,
        _pixels: &[u8],
        _screen_width: u16,
        _screen_height: u16,
    ) {
    }

    fn input_requested(&mut self, _player_id: u8, _button: Button) -> bool {
        false
    }

    fn fm_audio_to_be_generated(
        &mut self,
        _total_frames: usize,
        generate: &mut AudioGenerator<'_>,
    ) {
        self.generate_discarded(generate);
    }

    fn psg_audio_to_be_generated(
        &mut self,
        _total_samples: usize,
        generate: &mut AudioGenerator<'_>,
    ) {
        self.generate_discarded(generate);
    }

    fn pcm_audio_to_be_generated(
        &mut self,
        _total_frames: usize,
        generate: &mut AudioGenerator<'_>,
    ) {
        self.generate_discarded(generate);
    }

    fn cdda_audio_to_be_generated(
        &mut self,
        _total_frames: usize,
        generate: &mut AudioGenerator<'_>,
    ) {
        self.generate_discarded(generate);
    }

    fn cd_seeked(&mut self, _sector_index: u32) {}

    fn cd_sector_read(&mut self, _buffer: &mut [u16]) {}

    fn cd_seek_track(&mut self, _track_index: u16, _mode: CddaMode) -> bool {
        false
    }

    fn cd_audio_read(&mut self, _buffer: &mut [i16], _total_frames: usize) -> usize {
        0
    }

    fn save_file_opened_for_reading(&mut self, _filename: &str) -> bool {
        false
    }

    fn save_file_read(&mut self) -> Option<u8> {
        None
    }

    fn save_file_opened_for_writing(&mut self, _filename: &str) -> bool {
        false
    }

    fn save_file_written(&mut self, _byte: u8) {}

    fn save_file_closed(&mut self) {}

    fn save_file_removed(&mut self, _filename: &str) -> bool {
        false
    }

    fn save_file_size_obtained(&mut self, _filename: &str) -> Option<usize> {
        None
    }
}
