//! Reset idempotence and replay determinism of the reference core.

use console_core::{
    iterate, reset, AudioGenerator, Button, Callbacks, CddaMode, Configuration, ConstantTables,
    RuntimeState, TvStandard, MAX_AUDIO_SAMPLES,
};
use proptest::prelude::*;
use rstest::rstest;
use thiserror as _;

/// Host serving a cartridge and logging the cartridge read addresses.
struct TraceHost {
    rom: Vec<u8>,
    reads: Vec<u32>,
    scratch: Vec<i16>,
    colours: usize,
}

impl TraceHost {
    fn new(rom: Vec<u8>) -> Self {
        Self {
            rom,
            reads: Vec::new(),
            scratch: vec![0; MAX_AUDIO_SAMPLES],
            colours: 0,
        }
    }
}

impl Callbacks for TraceHost {
    fn cartridge_read(&mut self, address: u32) -> u8 {
        self.reads.push(address);
        usize::try_from(address)
            .ok()
            .and_then(|index| self.rom.get(index))
            .copied()
            .unwrap_or(0)
    }

    fn cartridge_written(&mut self, _address: u32, _value: u8) {}

    fn colour_updated(&mut self, _index: u16, _colour: u16) {
        self.colours += 1;
    }

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

/// Counting loop that touches every subsystem: colour, VDP, FM, PSG and RAM.
fn busy_rom() -> Vec<u8> {
    let mut rom = vec![0; 0x200];
    rom[4..8].copy_from_slice(&[0x00, 0x00, 0x01, 0x00]);
    let program = [
        0x10, 0x80, 0x40, // LDI 0x8040
        0x90, // FM voice 0
        0xA4, // PSG tone 0 volume
        0x20, 0x00, 0x03, // ADD 3
        0x71, // CRAM 1
        0x50, // STR
        0x61, // INX +2
        0x82, // VDP reg 2
        0xD0, 0xF7, // BNZ back to ADD
        0xF0, // WAIT
    ];
    rom[0x100..0x100 + program.len()].copy_from_slice(&program);
    rom
}

fn run_frames(config: &Configuration, rom: Vec<u8>, frames: usize) -> (RuntimeState, TraceHost) {
    let constants = ConstantTables::new();
    let mut state = RuntimeState::new();
    let mut host = TraceHost::new(rom);
    reset(config, &constants, &mut state, &mut host, false);
    for _ in 0..frames {
        iterate(config, &constants, &mut state, &mut host);
    }
    (state, host)
}

#[rstest]
#[case(TvStandard::Ntsc)]
#[case(TvStandard::Pal)]
fn identical_roms_replay_identical_read_sequences(#[case] tv_standard: TvStandard) {
    let config = Configuration {
        tv_standard,
        ..Configuration::default()
    };

    let (first_state, first) = run_frames(&config, busy_rom(), 3);
    let (second_state, second) = run_frames(&config, busy_rom(), 3);

    assert!(!first.reads.is_empty());
    assert_eq!(first.reads, second.reads);
    assert_eq!(first_state, second_state);
}

#[test]
fn reset_after_iterating_matches_fresh_reset() {
    let config = Configuration::default();
    let constants = ConstantTables::new();

    let mut baseline = RuntimeState::new();
    let mut host = TraceHost::new(busy_rom());
    reset(&config, &constants, &mut baseline, &mut host, false);

    let mut state = RuntimeState::new();
    reset(&config, &constants, &mut state, &mut host, false);
    for _ in 0..5 {
        iterate(&config, &constants, &mut state, &mut host);
    }
    assert_ne!(state, baseline);

    reset(&config, &constants, &mut state, &mut host, false);
    reset(&config, &constants, &mut state, &mut host, false);

    assert_eq!(state, baseline);
}

#[test]
fn soft_reset_keeps_palette_written_by_the_program() {
    let config = Configuration::default();
    let constants = ConstantTables::new();
    let mut state = RuntimeState::new();
    let mut host = TraceHost::new(busy_rom());
    reset(&config, &constants, &mut state, &mut host, false);
    iterate(&config, &constants, &mut state, &mut host);
    let cram = state.vdp.cram;

    reset(&config, &constants, &mut state, &mut host, true);

    assert_eq!(state.vdp.cram, cram);
    assert_eq!(state.vdp.frame, 0);
    assert_eq!(state.cpu.pc, 0x100);
}

#[test]
fn empty_cartridge_runs_as_a_sled_of_nops() {
    let (state, host) = run_frames(&Configuration::default(), Vec::new(), 1);

    assert_eq!(state.cpu.pc, 262 * 122);
    assert_eq!(host.reads.len(), 4 + 262 * 122);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn arbitrary_cartridges_never_panic_and_stay_deterministic(
        rom in prop::collection::vec(any::<u8>(), 0..512),
        cd in any::<bool>(),
    ) {
        let mut config = Configuration::default();
        config.general.cd_add_on_enabled = cd;

        let (first_state, first) = run_frames(&config, rom.clone(), 2);
        let (second_state, second) = run_frames(&config, rom, 2);

        prop_assert_eq!(first.reads, second.reads);
        prop_assert_eq!(first.colours, second.colours);
        prop_assert!(first_state == second_state);
    }
}
