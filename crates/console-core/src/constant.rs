//! Read-only lookup tables derived once at start-up and shared by every
//! reset and iterate call.

use std::f64::consts::TAU;

use crate::{OpcodeKind, CYCLE_COST_TABLE};

/// Entries in one period of the FM sine table.
pub const FM_SINE_TABLE_LENGTH: usize = 0x400;
/// Peak magnitude of one FM voice.
pub const FM_VOICE_AMPLITUDE: i16 = 0x0FFF;
/// Number of PSG attenuation steps.
pub const PSG_VOLUME_LEVELS: usize = 0x10;
/// Peak magnitude of one PSG voice.
pub const PSG_VOICE_AMPLITUDE: i16 = 0x0FFF;
/// Entries in the colour conversion table (3 bits per gun).
pub const COLOUR_TABLE_LENGTH: usize = 0x200;

/// Precomputed tables the core consults on every frame.
///
/// Fields are private so the tables cannot change once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantTables {
    fm_sine: Box<[i16]>,
    psg_volume: [i16; PSG_VOLUME_LEVELS],
    colour: Box<[u16]>,
    cycle_costs: [u16; OpcodeKind::ALL.len()],
}

impl Default for ConstantTables {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstantTables {
    /// Builds every table.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn new() -> Self {
        let fm_sine = (0..FM_SINE_TABLE_LENGTH)
            .map(|index| {
                let angle = (index as f64 + 0.5) * TAU / FM_SINE_TABLE_LENGTH as f64;
                (angle.sin() * f64::from(FM_VOICE_AMPLITUDE)).round() as i16
            })
            .collect();

        // 2 dB per step, with the last step fully silent.
        let mut psg_volume = [0; PSG_VOLUME_LEVELS];
        for (step, level) in psg_volume.iter_mut().enumerate().take(PSG_VOLUME_LEVELS - 1) {
            let gain = 10_f64.powf(-(step as f64) / 10.0);
            *level = (gain * f64::from(PSG_VOICE_AMPLITUDE)).round() as i16;
        }

        let colour = (0..COLOUR_TABLE_LENGTH)
            .map(|index| {
                let red = expand_gun(index & 7);
                let green = expand_gun((index >> 3) & 7);
                let blue = expand_gun((index >> 6) & 7);
                (blue << 8) | (green << 4) | red
            })
            .collect();

        let mut cycle_costs = [0; OpcodeKind::ALL.len()];
        for (kind, cycles) in CYCLE_COST_TABLE {
            cycle_costs[*kind as usize] = *cycles;
        }

        Self {
            fm_sine,
            psg_volume,
            colour,
            cycle_costs,
        }
    }

    /// Returns the sine sample for a 10.10 fixed-point phase.
    #[must_use]
    pub fn fm_sine(&self, phase: u32) -> i16 {
        self.fm_sine[(phase >> 10) as usize & (FM_SINE_TABLE_LENGTH - 1)]
    }

    /// Returns the output level for a 4-bit PSG attenuation.
    #[must_use]
    pub const fn psg_volume(&self, attenuation: u8) -> i16 {
        self.psg_volume[attenuation as usize & (PSG_VOLUME_LEVELS - 1)]
    }

    /// Converts a colour RAM word (`----BBB-GGG-RRR-`) to `0x0BGR`.
    #[must_use]
    pub fn colour(&self, cram: u16) -> u16 {
        let red = (cram >> 1) & 7;
        let green = (cram >> 5) & 7;
        let blue = (cram >> 9) & 7;
        self.colour[usize::from((blue << 6) | (green << 3) | red)]
    }

    /// Returns the cycle cost of an instruction form.
    #[must_use]
    pub const fn cycle_cost(&self, kind: OpcodeKind) -> u16 {
        self.cycle_costs[kind as usize]
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn expand_gun(level: usize) -> u16 {
    let level = level as u16;
    (level << 1) | (level >> 2)
}
