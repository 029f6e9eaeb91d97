//! Deterministic cycle-stepped console core driven entirely through host
//! callbacks.

/// Region, TV standard and per-subsystem feature switches.
pub mod config;
pub use config::{
    Configuration, FmConfig, GeneralConfig, ParseConfigError, PsgConfig, Region, TvStandard,
    VdpConfig,
};

/// Host hook contract.
pub mod callbacks;
pub use callbacks::{AudioGenerator, Button, Callbacks, CddaMode};

/// Clock rates, frame geometry and the instruction cycle-cost table.
pub mod timing;
pub use timing::{
    cycle_cost, fm_sample_rate, frames_per_second, lines_per_frame, master_clock,
    psg_sample_rate, OpcodeKind, CDDA_CHANNEL_COUNT, CDDA_SAMPLE_RATE, CYCLES_PER_SCANLINE,
    CYCLE_COST_TABLE, FM_CHANNEL_COUNT, LINES_PER_FRAME_NTSC, LINES_PER_FRAME_PAL,
    MASTER_CLOCK_NTSC, MASTER_CLOCK_PAL, MAX_AUDIO_SAMPLES, PCM_CHANNEL_COUNT, PCM_SAMPLE_RATE,
    PSG_CHANNEL_COUNT, SCREEN_WIDTH_H32, SCREEN_WIDTH_H40, VISIBLE_LINES_V28, VISIBLE_LINES_V30,
};

/// Immutable lookup tables shared by any number of sessions.
pub mod constant;
pub use constant::{
    ConstantTables, COLOUR_TABLE_LENGTH, FM_SINE_TABLE_LENGTH, FM_VOICE_AMPLITUDE,
    PSG_VOICE_AMPLITUDE, PSG_VOLUME_LEVELS,
};

/// Mutable per-session machine state.
pub mod state;
pub use state::{
    CdState, CpuState, FmState, FmVoice, PsgNoise, PsgState, PsgTone, RuntimeState, VdpState,
    BACKUP_RAM_BYTES, CDDA_FRAME_BUFFER_SAMPLES, CD_SECTOR_WORDS, CRAM_ENTRIES, FM_VOICES,
    PSG_TONE_VOICES, VDP_BASELINE_REGISTERS, VDP_REGISTER_COUNT, WORK_RAM_BYTES,
};

/// Instruction interpreter.
pub mod cpu;
pub use cpu::{run_scanline, step, CARTRIDGE_ADDRESS_MASK};

/// Scanline renderer.
pub mod video;
pub use video::{render_scanline, screen_width, visible_lines};

/// Per-frame audio requests.
pub mod audio;
pub use audio::{generate_frame_audio, samples_this_frame};

/// Reset and frame iteration entry points.
pub mod machine;
pub use machine::{iterate, reset, version_register, BACKUP_RAM_FILENAME, RESET_VECTOR_OFFSET};

#[cfg(test)]
mod test_support;

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
