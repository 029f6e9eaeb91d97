//! Scanline renderer: two scroll planes, a window plane and eight sprites,
//! all sourced from work RAM.

use crate::{
    Configuration, RuntimeState, TvStandard, SCREEN_WIDTH_H32, SCREEN_WIDTH_H40,
    VISIBLE_LINES_V28, VISIBLE_LINES_V30, WORK_RAM_BYTES,
};

/// Work RAM base of plane A pixel rows.
pub const PLANE_A_BASE: usize = 0x0000;
/// Work RAM base of plane B pixel rows.
pub const PLANE_B_BASE: usize = 0x8000;
/// Work RAM base of the window plane.
pub const WINDOW_BASE: usize = 0xC000;
/// Work RAM base of the sprite attribute table.
pub const SPRITE_TABLE_BASE: usize = 0xFE00;
/// Sprites considered per line.
pub const SPRITES_PER_LINE: usize = 8;
/// Width and height of every sprite in pixels.
pub const SPRITE_SIZE: usize = 16;

const PLANE_ROW_BYTES: usize = 0x100;
const PLANE_ROWS: usize = 0x80;
const SPRITE_PALETTE_LINE: u8 = 3;

/// Returns the active display width selected by register 12.
#[must_use]
pub const fn screen_width(state: &RuntimeState) -> u16 {
    if state.vdp.registers[12] & 0x01 == 0 {
        SCREEN_WIDTH_H32
    } else {
        SCREEN_WIDTH_H40
    }
}

/// Returns the active display height; 30-cell mode exists only on PAL.
#[must_use]
pub fn visible_lines(configuration: &Configuration, state: &RuntimeState) -> u16 {
    if configuration.tv_standard == TvStandard::Pal && state.vdp.registers[1] & 0x08 != 0 {
        VISIBLE_LINES_V30
    } else {
        VISIBLE_LINES_V28
    }
}

#[derive(Clone, Copy)]
struct SpriteSpan {
    left: usize,
    row: usize,
    attributes: u8,
}

/// Renders `line` into the state's line buffer as palette indices.
pub fn render_scanline(configuration: &Configuration, state: &mut RuntimeState, line: u16) {
    let width = usize::from(screen_width(state));
    let line = usize::from(line);
    let registers = state.vdp.registers;
    let ram = &state.work_ram;

    let background = registers[7] & 0x3F;
    let display_enabled = registers[1] & 0x40 != 0;
    let plane_a_palette = registers[2] & 0x03;
    let plane_b_palette = registers[4] & 0x03;
    let scroll_a = usize::from(registers[16]);
    let scroll_b = usize::from(registers[18]);
    let window_right = usize::from(registers[17] & 0x1F) * 16;

    let mut sprites = [None; SPRITES_PER_LINE];
    if !configuration.vdp.sprites_disabled {
        for (index, slot) in sprites.iter_mut().enumerate() {
            let entry = SPRITE_TABLE_BASE + index * 4;
            let top = usize::from(ram[entry]);
            if line >= top && line < top + SPRITE_SIZE {
                let left = u16::from_be_bytes([ram[entry + 1], ram[entry + 2]]) & 0x01FF;
                *slot = Some(SpriteSpan {
                    left: usize::from(left),
                    row: line - top,
                    attributes: ram[entry + 3],
                });
            }
        }
    }

    for (x, pixel) in state.vdp.line_buffer[..width].iter_mut().enumerate() {
        let mut colour = background;

        if display_enabled {
            let layers = [
                (!configuration.vdp.planes_disabled[1])
                    .then(|| plane_pixel(ram, PLANE_B_BASE, x + scroll_b, line, plane_b_palette)),
                (!configuration.vdp.planes_disabled[0])
                    .then(|| plane_pixel(ram, PLANE_A_BASE, x + scroll_a, line, plane_a_palette)),
                (!configuration.vdp.window_disabled && x < window_right)
                    .then(|| plane_pixel(ram, WINDOW_BASE, x, line, plane_a_palette)),
                sprites
                    .iter()
                    .flatten()
                    .find_map(|sprite| sprite_pixel(*sprite, x)),
            ];

            for layer in layers.into_iter().flatten() {
                if layer & 0x0F != 0 {
                    colour = layer;
                }
            }
        }

        *pixel = colour;
    }
}

const fn plane_pixel(
    ram: &[u8],
    base: usize,
    column: usize,
    line: usize,
    palette_line: u8,
) -> u8 {
    let column = column & (PLANE_ROW_BYTES * 2 - 1);
    let offset = base + (line % PLANE_ROWS) * PLANE_ROW_BYTES + column / 2;
    let byte = ram[offset % WORK_RAM_BYTES];
    let nibble = if column & 1 == 0 { byte >> 4 } else { byte & 0x0F };
    (palette_line << 4) | nibble
}

fn sprite_pixel(sprite: SpriteSpan, x: usize) -> Option<u8> {
    if x < sprite.left || x >= sprite.left + SPRITE_SIZE {
        return None;
    }
    // Diagonal stripe keyed off the pattern nibble so sprites have shape.
    let column = x - sprite.left;
    let nibble = sprite.attributes & 0x0F;
    ((column + sprite.row) % 4 != 0 && nibble != 0).then_some((SPRITE_PALETTE_LINE << 4) | nibble)
}
