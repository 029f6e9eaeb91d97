//! Prints an FNV-1a fingerprint of the cartridge read sequence for
//! cross-host determinism comparison.

use console_core::{
    iterate, reset, AudioGenerator, Button, Callbacks, CddaMode, Configuration, ConstantTables,
    RuntimeState, TvStandard, MAX_AUDIO_SAMPLES,
};
use proptest as _;
use rstest as _;
use thiserror as _;

const FRAMES: usize = 10;

struct FingerprintHost {
    rom: Vec<u8>,
    hash: u64,
    scratch: Vec<i16>,
}

impl FingerprintHost {
    fn mix(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.hash ^= u64::from(*byte);
            self.hash = self.hash.wrapping_mul(0x1000_0000_01B3);
        }
    }
}

impl Callbacks for FingerprintHost {
    fn cartridge_read(&mut self, address: u32) -> u8 {
        self.mix(&address.to_le_bytes());
        usize::try_from(address)
            .ok()
            .and_then(|index| self.rom.get(index))
            .copied()
            .unwrap_or(0)
    }

    fn cartridge_written(&mut self, address: u32, value: u8) {
        self.mix(&address.to_le_bytes());
        self.mix(&[value]);
    }

    fn colour_updated(&mut self, _index: u16, _colour: u16) {}

    fn scanline_rendered(&mut self, _: u16, _: &[u8], _: u16, _: u16) {}

    fn input_requested(&mut self, _player_id: u8, _button: Button) -> bool {
        false
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

/// Cartridge that loops over cartridge writes and RAM stores.
fn cartridge() -> Vec<u8> {
    let mut rom = vec![0; 0x100];
    rom[4..8].copy_from_slice(&[0x00, 0x00, 0x00, 0x10]);
    rom[0x10..0x1B].copy_from_slice(&[
        0x20, 0x01, 0x01, // ADD 0x0101
        0xC3, // CWR bank 3
        0x50, // STR
        0x60, // INX +1
        0xE0, 0x00, 0x00, 0x10, // JMP 0x10
        0xF0, // WAIT (unreached)
    ]);
    rom
}

fn fingerprint(tv_standard: TvStandard) -> String {
    let config = Configuration {
        tv_standard,
        ..Configuration::default()
    };
    let constants = ConstantTables::new();
    let mut state = RuntimeState::new();
    let mut host = FingerprintHost {
        rom: cartridge(),
        hash: 0xcbf2_9ce4_8422_2325,
        scratch: vec![0; MAX_AUDIO_SAMPLES],
    };

    reset(&config, &constants, &mut state, &mut host, false);
    for _ in 0..FRAMES {
        iterate(&config, &constants, &mut state, &mut host);
    }

    host.mix(&state.cpu.pc.to_le_bytes());
    host.mix(&state.cpu.a.to_le_bytes());
    host.mix(&state.work_ram);

    format!("{:016x}", host.hash)
}

fn main() {
    println!("ntsc {}", fingerprint(TvStandard::Ntsc));
    println!("pal  {}", fingerprint(TvStandard::Pal));
}
