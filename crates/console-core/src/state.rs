//! Mutable execution state owned by one session and rebuilt on every reset.

use crate::timing::{CDDA_CHANNEL_COUNT, CDDA_SAMPLE_RATE, SCREEN_WIDTH_H40};

/// Bytes of CPU work RAM.
pub const WORK_RAM_BYTES: usize = 0x1_0000;
/// Entries in colour RAM (four palette lines of sixteen).
pub const CRAM_ENTRIES: usize = 0x40;
/// Number of VDP registers.
pub const VDP_REGISTER_COUNT: usize = 0x18;
/// Number of FM voices.
pub const FM_VOICES: usize = 6;
/// Number of PSG tone voices (the noise voice is separate).
pub const PSG_TONE_VOICES: usize = 3;
/// Bytes of CD add-on backup RAM.
pub const BACKUP_RAM_BYTES: usize = 0x2000;
/// 16-bit words in one raw CD sector.
pub const CD_SECTOR_WORDS: usize = 2352 / 2;
/// Samples buffered for one frame of CD audio at the slowest frame rate.
pub const CDDA_FRAME_BUFFER_SAMPLES: usize =
    (CDDA_SAMPLE_RATE as usize / 50 + 1) * CDDA_CHANNEL_COUNT;

/// VDP register values after a full reset: display on, 40-cell mode.
pub const VDP_BASELINE_REGISTERS: [u8; VDP_REGISTER_COUNT] = {
    let mut registers = [0; VDP_REGISTER_COUNT];
    registers[1] = 0x44;
    registers[12] = 0x81;
    registers
};

/// Accumulator machine registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuState {
    /// Program counter into cartridge space.
    pub pc: u32,
    /// Accumulator.
    pub a: u16,
    /// Index register, addressing work RAM.
    pub x: u16,
    /// Set by `WAIT` until the next scanline starts.
    pub waiting: bool,
    /// Cycles borrowed from the next scanline by the last instruction.
    pub overrun: u16,
    /// Version register value latched at reset.
    pub version: u16,
}

/// Video display processor state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VdpState {
    /// Mode and plane registers.
    pub registers: [u8; VDP_REGISTER_COUNT],
    /// Colour RAM words (`----BBB-GGG-RRR-`).
    pub cram: [u16; CRAM_ENTRIES],
    /// Palette indices of the scanline being rendered.
    pub line_buffer: [u8; SCREEN_WIDTH_H40 as usize],
    /// Scanline currently being emulated.
    pub current_line: u16,
    /// Frames completed since reset.
    pub frame: u32,
}

impl Default for VdpState {
    fn default() -> Self {
        Self {
            registers: VDP_BASELINE_REGISTERS,
            cram: [0; CRAM_ENTRIES],
            line_buffer: [0; SCREEN_WIDTH_H40 as usize],
            current_line: 0,
            frame: 0,
        }
    }
}

/// One FM voice reduced to a keyed sine oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FmVoice {
    /// Phase increment per output sample.
    pub frequency: u16,
    /// 10.10 fixed-point phase accumulator.
    pub phase: u32,
    /// Whether the voice is sounding.
    pub key_on: bool,
}

/// FM synthesiser state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FmState {
    /// The six voices.
    pub voices: [FmVoice; FM_VOICES],
    /// Whether the DAC replaces voice six.
    pub dac_enabled: bool,
    /// Current DAC output.
    pub dac_sample: i16,
    /// Low-pass filter history.
    pub filter: i32,
    /// Fractional samples carried between frames.
    pub sample_remainder: u32,
}

/// One PSG square-wave voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PsgTone {
    /// 10-bit half-period in output samples.
    pub period: u16,
    /// Samples left until the next edge.
    pub counter: u16,
    /// 4-bit attenuation; 15 is silent.
    pub attenuation: u8,
    /// Current square-wave polarity.
    pub output_high: bool,
}

impl Default for PsgTone {
    fn default() -> Self {
        Self {
            period: 0,
            counter: 0,
            attenuation: 0x0F,
            output_high: false,
        }
    }
}

/// PSG noise voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PsgNoise {
    /// Bits 0-1 select the shift rate, bit 2 selects white noise.
    pub mode: u8,
    /// Samples left until the next shift.
    pub counter: u16,
    /// 4-bit attenuation; 15 is silent.
    pub attenuation: u8,
    /// Linear-feedback shift register.
    pub lfsr: u16,
}

impl Default for PsgNoise {
    fn default() -> Self {
        Self {
            mode: 0,
            counter: 0,
            attenuation: 0x0F,
            lfsr: 0x8000,
        }
    }
}

/// PSG state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PsgState {
    /// Tone voices.
    pub tones: [PsgTone; PSG_TONE_VOICES],
    /// Noise voice.
    pub noise: PsgNoise,
    /// Fractional samples carried between frames.
    pub sample_remainder: u32,
}

/// CD add-on state. Untouched unless the add-on is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdState {
    /// Last sector read from the disc.
    pub sector_buffer: Box<[u16]>,
    /// Battery-backed save memory.
    pub backup_ram: Box<[u8]>,
    /// Set when backup RAM changed since the last flush.
    pub backup_dirty: bool,
    /// Whether a CD audio track is playing.
    pub track_playing: bool,
    /// CD audio fetched for the current frame.
    pub cdda_buffer: Box<[i16]>,
    /// PCM playback position in sector words.
    pub pcm_position: usize,
    /// Fractional PCM frames carried between frames.
    pub pcm_remainder: u32,
    /// Fractional CD audio frames carried between frames.
    pub cdda_remainder: u32,
}

impl Default for CdState {
    fn default() -> Self {
        Self {
            sector_buffer: vec![0; CD_SECTOR_WORDS].into_boxed_slice(),
            backup_ram: vec![0; BACKUP_RAM_BYTES].into_boxed_slice(),
            backup_dirty: false,
            track_playing: false,
            cdda_buffer: vec![0; CDDA_FRAME_BUFFER_SAMPLES].into_boxed_slice(),
            pcm_position: 0,
            pcm_remainder: 0,
            cdda_remainder: 0,
        }
    }
}

/// Complete mutable core state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeState {
    /// CPU registers.
    pub cpu: CpuState,
    /// Flat work RAM image.
    pub work_ram: Box<[u8]>,
    /// Video state.
    pub vdp: VdpState,
    /// FM state.
    pub fm: FmState,
    /// PSG state.
    pub psg: PsgState,
    /// CD add-on state.
    pub cd: CdState,
}

impl Default for RuntimeState {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeState {
    /// Allocates a state at the reset baseline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cpu: CpuState::default(),
            work_ram: vec![0; WORK_RAM_BYTES].into_boxed_slice(),
            vdp: VdpState::default(),
            fm: FmState::default(),
            psg: PsgState::default(),
            cd: CdState::default(),
        }
    }

    /// Returns every field to the baseline without reallocating.
    ///
    /// With `keep_settings` the VDP registers and colour RAM survive, as
    /// they do across a console soft reset.
    pub fn reset_canonical(&mut self, keep_settings: bool) {
        self.cpu = CpuState::default();
        self.work_ram.fill(0);

        if !keep_settings {
            self.vdp.registers = VDP_BASELINE_REGISTERS;
            self.vdp.cram = [0; CRAM_ENTRIES];
        }
        self.vdp.line_buffer.fill(0);
        self.vdp.current_line = 0;
        self.vdp.frame = 0;

        self.fm = FmState::default();
        self.psg = PsgState::default();

        self.cd.sector_buffer.fill(0);
        self.cd.backup_ram.fill(0);
        self.cd.backup_dirty = false;
        self.cd.track_playing = false;
        self.cd.cdda_buffer.fill(0);
        self.cd.pcm_position = 0;
        self.cd.pcm_remainder = 0;
        self.cd.cdda_remainder = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::{RuntimeState, VDP_BASELINE_REGISTERS, WORK_RAM_BYTES};

    fn scribble(state: &mut RuntimeState) {
        state.cpu.pc = 0x1234;
        state.cpu.a = 0xBEEF;
        state.cpu.waiting = true;
        state.work_ram[0x100] = 0xAA;
        state.vdp.registers[7] = 0x3F;
        state.vdp.cram[5] = 0x0EEE;
        state.vdp.frame = 9;
        state.fm.voices[2].key_on = true;
        state.psg.noise.lfsr = 1;
        state.cd.backup_ram[3] = 7;
        state.cd.track_playing = true;
    }

    #[test]
    fn new_state_allocates_full_work_ram() {
        let state = RuntimeState::new();
        assert_eq!(state.work_ram.len(), WORK_RAM_BYTES);
        assert_eq!(state.vdp.registers, VDP_BASELINE_REGISTERS);
    }

    #[test]
    fn full_reset_returns_to_a_freshly_built_state() {
        let mut state = RuntimeState::new();
        scribble(&mut state);

        state.reset_canonical(false);

        assert_eq!(state, RuntimeState::new());
    }

    #[test]
    fn soft_reset_keeps_video_settings_only() {
        let mut state = RuntimeState::new();
        scribble(&mut state);

        state.reset_canonical(true);

        assert_eq!(state.vdp.registers[7], 0x3F);
        assert_eq!(state.vdp.cram[5], 0x0EEE);
        assert_eq!(state.cpu.pc, 0);
        assert_eq!(state.work_ram[0x100], 0);
        assert_eq!(state.vdp.frame, 0);
        assert!(!state.cd.track_playing);
    }
}
