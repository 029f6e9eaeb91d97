//! Accumulator-machine interpreter fetching its program through
//! [`Callbacks::cartridge_read`].
//!
//! Every byte decodes to some instruction, so execution never faults.

use crate::{
    Button, Callbacks, Configuration, ConstantTables, OpcodeKind, RuntimeState,
    BACKUP_RAM_BYTES, CRAM_ENTRIES, CYCLES_PER_SCANLINE, FM_VOICES, PSG_TONE_VOICES,
};

/// Cartridge space is a 4 MiB window.
pub const CARTRIDGE_ADDRESS_MASK: u32 = 0x3F_FFFF;

/// `CWR` bank routed to backup RAM when the CD add-on is attached.
const BACKUP_RAM_BANK: u8 = 0x0E;
/// `CWR` bank routed to the CD track command port.
const CD_COMMAND_BANK: u8 = 0x0F;

/// Runs instructions until the scanline's cycle budget is spent or `WAIT`
/// parks the CPU.
pub fn run_scanline<C: Callbacks + ?Sized>(
    configuration: &Configuration,
    constants: &ConstantTables,
    state: &mut RuntimeState,
    callbacks: &mut C,
) {
    state.cpu.waiting = false;
    let mut elapsed = state.cpu.overrun;

    while elapsed < CYCLES_PER_SCANLINE && !state.cpu.waiting {
        elapsed += step(configuration, constants, state, callbacks);
    }

    state.cpu.overrun = elapsed.saturating_sub(CYCLES_PER_SCANLINE);
}

/// Fetches and executes one instruction, returning its cycle cost.
pub fn step<C: Callbacks + ?Sized>(
    configuration: &Configuration,
    constants: &ConstantTables,
    state: &mut RuntimeState,
    callbacks: &mut C,
) -> u16 {
    let opcode = fetch_byte(state, callbacks);
    let operand = opcode & 0x0F;
    let kind = OpcodeKind::from_opcode(opcode);

    match kind {
        OpcodeKind::Nop => {}
        OpcodeKind::LoadImmediate => state.cpu.a = fetch_word(state, callbacks),
        OpcodeKind::Add => {
            let value = fetch_word(state, callbacks);
            state.cpu.a = state.cpu.a.wrapping_add(value);
        }
        OpcodeKind::Xor => state.cpu.a ^= fetch_word(state, callbacks),
        OpcodeKind::LoadRam => {
            let [hi, lo] = [
                state.work_ram[usize::from(state.cpu.x)],
                state.work_ram[usize::from(state.cpu.x.wrapping_add(1))],
            ];
            state.cpu.a = u16::from_be_bytes([hi, lo]);
        }
        OpcodeKind::StoreRam => {
            let [hi, lo] = state.cpu.a.to_be_bytes();
            state.work_ram[usize::from(state.cpu.x)] = hi;
            state.work_ram[usize::from(state.cpu.x.wrapping_add(1))] = lo;
        }
        OpcodeKind::IncrementIndex => {
            state.cpu.x = state.cpu.x.wrapping_add(u16::from(operand) + 1);
        }
        OpcodeKind::ColourWrite => {
            let index = u16::from(operand) | (state.cpu.x & 0x30);
            let value = state.cpu.a & 0x0EEE;
            state.vdp.cram[usize::from(index) % CRAM_ENTRIES] = value;
            callbacks.colour_updated(index, constants.colour(value));
        }
        OpcodeKind::VdpRegisterWrite => {
            state.vdp.registers[usize::from(operand)] = state.cpu.a.to_be_bytes()[1];
        }
        OpcodeKind::FmWrite => write_fm(state, operand),
        OpcodeKind::PsgWrite => write_psg(state, operand),
        OpcodeKind::PadRead => {
            state.cpu.a = if operand & 0x08 == 0 {
                read_pad(callbacks, operand & 0x01)
            } else {
                state.cpu.version
            };
        }
        OpcodeKind::CartridgeWrite => write_cartridge(configuration, state, callbacks, operand),
        OpcodeKind::BranchNotZero => {
            let offset = i32::from(i8::from_be_bytes([fetch_byte(state, callbacks)]));
            if state.cpu.a != 0 {
                state.cpu.pc = state.cpu.pc.wrapping_add_signed(offset) & CARTRIDGE_ADDRESS_MASK;
            }
        }
        OpcodeKind::Jump => {
            let bank = u32::from(fetch_byte(state, callbacks));
            let offset = u32::from(fetch_word(state, callbacks));
            state.cpu.pc = ((bank << 16) | offset) & CARTRIDGE_ADDRESS_MASK;
        }
        OpcodeKind::Wait => state.cpu.waiting = true,
    }

    constants.cycle_cost(kind)
}

fn fetch_byte<C: Callbacks + ?Sized>(state: &mut RuntimeState, callbacks: &mut C) -> u8 {
    let byte = callbacks.cartridge_read(state.cpu.pc);
    state.cpu.pc = state.cpu.pc.wrapping_add(1) & CARTRIDGE_ADDRESS_MASK;
    byte
}

fn fetch_word<C: Callbacks + ?Sized>(state: &mut RuntimeState, callbacks: &mut C) -> u16 {
    let hi = fetch_byte(state, callbacks);
    let lo = fetch_byte(state, callbacks);
    u16::from_be_bytes([hi, lo])
}

fn read_pad<C: Callbacks + ?Sized>(callbacks: &mut C, player_id: u8) -> u16 {
    Button::ALL
        .iter()
        .enumerate()
        .filter(|(_, button)| callbacks.input_requested(player_id, **button))
        .fold(0, |mask, (bit, _)| mask | (1 << bit))
}

fn write_fm(state: &mut RuntimeState, operand: u8) {
    let value = state.cpu.a;
    match usize::from(operand & 0x07) {
        voice if voice < FM_VOICES => {
            let voice = &mut state.fm.voices[voice];
            voice.frequency = value & 0x3FFF;
            voice.key_on = value & 0x8000 != 0;
        }
        FM_VOICES => state.fm.dac_enabled = value & 0x0080 != 0,
        _ => {
            // Unsigned 8-bit DAC input, centred.
            let level = i16::from(value.to_be_bytes()[1]) - 0x80;
            state.fm.dac_sample = level << 5;
        }
    }
}

fn write_psg(state: &mut RuntimeState, operand: u8) {
    let value = state.cpu.a;
    let voice = usize::from(operand & 0x03);
    let attenuation = value.to_be_bytes()[1] & 0x0F;
    let latch_volume = operand & 0x04 != 0;

    if voice < PSG_TONE_VOICES {
        let tone = &mut state.psg.tones[voice];
        if latch_volume {
            tone.attenuation = attenuation;
        } else {
            tone.period = value & 0x03FF;
        }
    } else if latch_volume {
        state.psg.noise.attenuation = attenuation;
    } else {
        state.psg.noise.mode = value.to_be_bytes()[1] & 0x07;
        state.psg.noise.lfsr = 0x8000;
    }
}

fn write_cartridge<C: Callbacks + ?Sized>(
    configuration: &Configuration,
    state: &mut RuntimeState,
    callbacks: &mut C,
    bank: u8,
) {
    let [_, value] = state.cpu.a.to_be_bytes();

    if configuration.general.cd_add_on_enabled {
        match bank {
            BACKUP_RAM_BANK => {
                state.cd.backup_ram[usize::from(state.cpu.x) % BACKUP_RAM_BYTES] = value;
                state.cd.backup_dirty = true;
                return;
            }
            CD_COMMAND_BANK => {
                state.cd.track_playing =
                    callbacks.cd_seek_track(u16::from(value), crate::CddaMode::PlayRepeat);
                return;
            }
            _ => {}
        }
    }

    let address = (u32::from(bank) << 16) | u32::from(state.cpu.x);
    callbacks.cartridge_written(address, value);
}
