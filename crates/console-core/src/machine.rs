//! The two operations a host drives: [`reset`] and [`iterate`].

use crate::audio::generate_frame_audio;
use crate::cpu::{run_scanline, CARTRIDGE_ADDRESS_MASK};
use crate::timing::lines_per_frame;
use crate::video::{render_scanline, screen_width, visible_lines};
use crate::{Callbacks, Configuration, ConstantTables, Region, RuntimeState, TvStandard};

/// Save file holding CD add-on backup RAM.
pub const BACKUP_RAM_FILENAME: &str = "backup_ram.bin";

/// Cartridge offset of the big-endian initial program counter.
pub const RESET_VECTOR_OFFSET: u32 = 4;

/// Returns `state` to its power-on baseline and boots from the cartridge.
///
/// Without `keep_settings` the result depends only on `configuration`,
/// `constants` and the cartridge bytes, so calling it twice in a row is the
/// same as calling it once.
pub fn reset<C: Callbacks + ?Sized>(
    configuration: &Configuration,
    constants: &ConstantTables,
    state: &mut RuntimeState,
    callbacks: &mut C,
    keep_settings: bool,
) {
    state.reset_canonical(keep_settings);
    state.cpu.version = version_register(configuration);

    let vector = (0..4).fold(0_u32, |pc, offset| {
        (pc << 8) | u32::from(callbacks.cartridge_read(RESET_VECTOR_OFFSET + offset))
    });
    state.cpu.pc = vector & CARTRIDGE_ADDRESS_MASK;

    for (index, cram) in (0_u16..).zip(state.vdp.cram.iter()) {
        callbacks.colour_updated(index, constants.colour(*cram));
    }

    if configuration.general.cd_add_on_enabled {
        callbacks.cd_seeked(0);
        callbacks.cd_sector_read(&mut state.cd.sector_buffer);
        load_backup_ram(state, callbacks);
    }
}

/// Emulates one video frame.
pub fn iterate<C: Callbacks + ?Sized>(
    configuration: &Configuration,
    constants: &ConstantTables,
    state: &mut RuntimeState,
    callbacks: &mut C,
) {
    for line in 0..lines_per_frame(configuration.tv_standard) {
        state.vdp.current_line = line;
        run_scanline(configuration, constants, state, callbacks);

        // Geometry is re-read per line because the program can change modes mid-frame.
        let height = visible_lines(configuration, state);
        if line < height {
            let width = screen_width(state);
            render_scanline(configuration, state, line);
            callbacks.scanline_rendered(
                line,
                &state.vdp.line_buffer[..usize::from(width)],
                width,
                height,
            );
        }
    }

    state.vdp.frame = state.vdp.frame.wrapping_add(1);
    generate_frame_audio(configuration, constants, state, callbacks);

    if configuration.general.cd_add_on_enabled {
        flush_backup_ram(state, callbacks);
    }
}

/// Builds the version register: bit 7 overseas, bit 6 PAL, bit 5 no CD add-on.
#[must_use]
pub const fn version_register(configuration: &Configuration) -> u16 {
    let mut version = 0;
    if matches!(configuration.region, Region::Overseas) {
        version |= 0x80;
    }
    if matches!(configuration.tv_standard, TvStandard::Pal) {
        version |= 0x40;
    }
    if !configuration.general.cd_add_on_enabled {
        version |= 0x20;
    }
    version
}

fn load_backup_ram<C: Callbacks + ?Sized>(state: &mut RuntimeState, callbacks: &mut C) {
    if callbacks.save_file_size_obtained(BACKUP_RAM_FILENAME).is_none()
        || !callbacks.save_file_opened_for_reading(BACKUP_RAM_FILENAME)
    {
        return;
    }

    for byte in state.cd.backup_ram.iter_mut() {
        match callbacks.save_file_read() {
            Some(value) => *byte = value,
            None => break,
        }
    }
    callbacks.save_file_closed();
}

fn flush_backup_ram<C: Callbacks + ?Sized>(state: &mut RuntimeState, callbacks: &mut C) {
    if !state.cd.backup_dirty {
        return;
    }
    state.cd.backup_dirty = false;

    if state.cd.backup_ram.iter().all(|byte| *byte == 0) {
        callbacks.save_file_removed(BACKUP_RAM_FILENAME);
        return;
    }

    if callbacks.save_file_opened_for_writing(BACKUP_RAM_FILENAME) {
        for byte in state.cd.backup_ram.iter() {
            callbacks.save_file_written(*byte);
        }
        callbacks.save_file_closed();
    }
}
