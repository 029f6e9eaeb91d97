//! Clock rates, frame geometry, audio sample rates and the instruction
//! cycle-cost table.

use crate::TvStandard;

/// NTSC master crystal frequency in hertz.
pub const MASTER_CLOCK_NTSC: u32 = 53_693_175;
/// PAL master crystal frequency in hertz.
pub const MASTER_CLOCK_PAL: u32 = 53_203_424;

/// CPU cycles available per scanline.
pub const CYCLES_PER_SCANLINE: u16 = 488;

/// Scanlines per NTSC frame, including blanking.
pub const LINES_PER_FRAME_NTSC: u16 = 262;
/// Scanlines per PAL frame, including blanking.
pub const LINES_PER_FRAME_PAL: u16 = 313;

/// Active display height in 28-cell mode.
pub const VISIBLE_LINES_V28: u16 = 224;
/// Active display height in 30-cell mode (PAL only).
pub const VISIBLE_LINES_V30: u16 = 240;

/// Display width in 40-cell mode.
pub const SCREEN_WIDTH_H40: u16 = 320;
/// Display width in 32-cell mode.
pub const SCREEN_WIDTH_H32: u16 = 256;

/// Interleaved output channels produced by the FM synthesiser.
pub const FM_CHANNEL_COUNT: usize = 2;
/// Output channels produced by the PSG.
pub const PSG_CHANNEL_COUNT: usize = 1;
/// Interleaved output channels produced by the CD add-on PCM chip.
pub const PCM_CHANNEL_COUNT: usize = 2;
/// Interleaved output channels of CD audio.
pub const CDDA_CHANNEL_COUNT: usize = 2;

/// CD add-on PCM output rate in hertz.
pub const PCM_SAMPLE_RATE: u32 = 32_552;
/// CD audio output rate in hertz.
pub const CDDA_SAMPLE_RATE: u32 = 44_100;

/// Returns the master clock for a video standard.
#[must_use]
pub const fn master_clock(tv_standard: TvStandard) -> u32 {
    match tv_standard {
        TvStandard::Ntsc => MASTER_CLOCK_NTSC,
        TvStandard::Pal => MASTER_CLOCK_PAL,
    }
}

/// Returns the FM synthesiser output rate for a video standard.
#[must_use]
pub const fn fm_sample_rate(tv_standard: TvStandard) -> u32 {
    master_clock(tv_standard) / 7 / 144
}

/// Returns the PSG output rate for a video standard.
#[must_use]
pub const fn psg_sample_rate(tv_standard: TvStandard) -> u32 {
    master_clock(tv_standard) / 15 / 16
}

/// Returns the nominal frame rate for a video standard.
#[must_use]
pub const fn frames_per_second(tv_standard: TvStandard) -> u32 {
    match tv_standard {
        TvStandard::Ntsc => 60,
        TvStandard::Pal => 50,
    }
}

/// Returns the number of scanlines in one frame.
#[must_use]
pub const fn lines_per_frame(tv_standard: TvStandard) -> u16 {
    match tv_standard {
        TvStandard::Ntsc => LINES_PER_FRAME_NTSC,
        TvStandard::Pal => LINES_PER_FRAME_PAL,
    }
}

const fn max(a: usize, b: usize) -> usize {
    if a > b {
        a
    } else {
        b
    }
}

/// Largest one-second sample count over every audio source and video standard.
///
/// A host buffer of this many `i16` samples can satisfy any single audio
/// generation request the core makes.
pub const MAX_AUDIO_SAMPLES: usize = max(
    max(
        max(
            fm_sample_rate(TvStandard::Ntsc) as usize,
            fm_sample_rate(TvStandard::Pal) as usize,
        ) * FM_CHANNEL_COUNT,
        max(
            psg_sample_rate(TvStandard::Ntsc) as usize,
            psg_sample_rate(TvStandard::Pal) as usize,
        ) * PSG_CHANNEL_COUNT,
    ),
    max(
        PCM_SAMPLE_RATE as usize * PCM_CHANNEL_COUNT,
        CDDA_SAMPLE_RATE as usize * CDDA_CHANNEL_COUNT,
    ),
);

/// Instruction forms of the core, one per opcode high nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpcodeKind {
    /// No operation.
    Nop,
    /// Load 16-bit immediate into the accumulator.
    LoadImmediate,
    /// Add 16-bit immediate to the accumulator.
    Add,
    /// Exclusive-or 16-bit immediate into the accumulator.
    Xor,
    /// Load accumulator from work RAM at the index register.
    LoadRam,
    /// Store accumulator to work RAM at the index register.
    StoreRam,
    /// Advance the index register.
    IncrementIndex,
    /// Write the accumulator to a colour RAM entry.
    ColourWrite,
    /// Write the accumulator low byte to a VDP register.
    VdpRegisterWrite,
    /// Program an FM channel.
    FmWrite,
    /// Program a PSG channel.
    PsgWrite,
    /// Poll a controller into the accumulator.
    PadRead,
    /// Write a byte to cartridge space.
    CartridgeWrite,
    /// Relative branch when the accumulator is non-zero.
    BranchNotZero,
    /// Absolute 24-bit jump.
    Jump,
    /// Idle until the next scanline.
    Wait,
}

impl OpcodeKind {
    /// Every kind in opcode order (index equals the high nibble).
    pub const ALL: [Self; 16] = [
        Self::Nop,
        Self::LoadImmediate,
        Self::Add,
        Self::Xor,
        Self::LoadRam,
        Self::StoreRam,
        Self::IncrementIndex,
        Self::ColourWrite,
        Self::VdpRegisterWrite,
        Self::FmWrite,
        Self::PsgWrite,
        Self::PadRead,
        Self::CartridgeWrite,
        Self::BranchNotZero,
        Self::Jump,
        Self::Wait,
    ];

    /// Classifies an opcode byte by its high nibble.
    #[must_use]
    pub const fn from_opcode(opcode: u8) -> Self {
        Self::ALL[(opcode >> 4) as usize]
    }
}

/// Single source-of-truth cycle-cost table for every instruction form.
pub const CYCLE_COST_TABLE: &[(OpcodeKind, u16)] = &[
    (OpcodeKind::Nop, 4),
    (OpcodeKind::LoadImmediate, 8),
    (OpcodeKind::Add, 8),
    (OpcodeKind::Xor, 8),
    (OpcodeKind::LoadRam, 12),
    (OpcodeKind::StoreRam, 12),
    (OpcodeKind::IncrementIndex, 4),
    (OpcodeKind::ColourWrite, 16),
    (OpcodeKind::VdpRegisterWrite, 16),
    (OpcodeKind::FmWrite, 20),
    (OpcodeKind::PsgWrite, 16),
    (OpcodeKind::PadRead, 24),
    (OpcodeKind::CartridgeWrite, 12),
    (OpcodeKind::BranchNotZero, 10),
    (OpcodeKind::Jump, 12),
    (OpcodeKind::Wait, 4),
];

/// Looks up the cycle cost for an instruction form.
#[must_use]
pub fn cycle_cost(kind: OpcodeKind) -> Option<u16> {
    CYCLE_COST_TABLE
        .iter()
        .find_map(|(entry_kind, cycles)| (*entry_kind == kind).then_some(*cycles))
}
