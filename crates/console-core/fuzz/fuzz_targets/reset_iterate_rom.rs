#![no_main]

use console_core::{
    iterate, reset, AudioGenerator, Button, Callbacks, CddaMode, Configuration, ConstantTables,
    RuntimeState, TvStandard, MAX_AUDIO_SAMPLES,
};
use libfuzzer_sys::fuzz_target;

struct RomHost<'a> {
    rom: &'a [u8],
    scratch: Vec<i16>,
}

impl Callbacks for RomHost<'_> {
    fn cartridge_read(&mut self, address: u32) -> u8 {
        usize::try_from(address)
            .ok()
            .and_then(|index| self.rom.get(index))
            .copied()
            .unwrap_or(0)
    }

    fn cartridge_written(&mut self, _address: u32, _value: u8) {}

    fn colour_updated(&mut self, _index: u16, _colour: u16) {}

    fn scanline_rendered(&mut self, _: u16, pixels: &[u8], width: u16, _: u16) {
        assert_eq!(pixels.len(), usize::from(width));
    }

    fn input_requested(&mut self, player_id: u8, _button: Button) -> bool {
        player_id == 0
    }

    fn fm_audio_to_be_generated(&mut self, _: usize, generate: &mut AudioGenerator<'_>) {
        generate(&mut self.scratch);
    }

    fn psg_audio_to_be_generated(&mut self, _: usize, generate: &mut AudioGenerator<'_>) {
        generate(&mut self.scratch);
    }

    fn pcm_audio_to_be_generated(&mut self, _: usize, generate: &mut AudioGenerator<'_>) {
        generate(&mut self.scratch);
    }

    fn cdda_audio_to_be_generated(&mut self, _: usize, generate: &mut AudioGenerator<'_>) {
        generate(&mut self.scratch);
    }

    fn cd_seeked(&mut self, _sector_index: u32) {}

    fn cd_sector_read(&mut self, buffer: &mut [u16]) {
        for (word, chunk) in buffer.iter_mut().zip(self.rom.chunks(2)) {
            *word = u16::from(chunk[0]);
        }
    }

    fn cd_seek_track(&mut self, track_index: u16, _mode: CddaMode) -> bool {
        track_index % 2 == 0
    }

    fn cd_audio_read(&mut self, buffer: &mut [i16], total_frames: usize) -> usize {
        buffer.fill(0x100);
        total_frames
    }

    fn save_file_opened_for_reading(&mut self, _filename: &str) -> bool {
        false
    }

    fn save_file_read(&mut self) -> Option<u8> {
        None
    }

    fn save_file_opened_for_writing(&mut self, _filename: &str) -> bool {
        true
    }

    fn save_file_written(&mut self, _byte: u8) {}

    fn save_file_closed(&mut self) {}

    fn save_file_removed(&mut self, _filename: &str) -> bool {
        true
    }

    fn save_file_size_obtained(&mut self, _filename: &str) -> Option<usize> {
        None
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&flags, rom)) = data.split_first() else {
        return;
    };

    let mut config = Configuration::default();
    config.general.cd_add_on_enabled = flags & 0x01 != 0;
    config.general.low_pass_filter_disabled = flags & 0x02 != 0;
    if flags & 0x04 != 0 {
        config.tv_standard = TvStandard::Pal;
    }

    let constants = ConstantTables::new();
    let mut state = RuntimeState::new();
    let mut host = RomHost {
        rom,
        scratch: vec![0; MAX_AUDIO_SAMPLES],
    };

    reset(&config, &constants, &mut state, &mut host, false);
    for _ in 0..2 {
        iterate(&config, &constants, &mut state, &mut host);
    }
});
