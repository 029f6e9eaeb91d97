//! End-of-frame audio requests and the synthesis closures handed to the host.

use crate::state::{CdState, FmState, PsgState};
use crate::timing::{
    fm_sample_rate, frames_per_second, psg_sample_rate, CDDA_CHANNEL_COUNT, CDDA_SAMPLE_RATE,
    FM_CHANNEL_COUNT, PCM_CHANNEL_COUNT, PCM_SAMPLE_RATE,
};
use crate::{Callbacks, Configuration, ConstantTables, RuntimeState, FM_VOICES};

/// Splits a per-second rate into whole samples for one frame, carrying the
/// fractional part in `remainder`.
pub const fn samples_this_frame(rate: u32, frames_per_second: u32, remainder: &mut u32) -> usize {
    let total = rate + *remainder;
    *remainder = total % frames_per_second;
    (total / frames_per_second) as usize
}

/// Issues every audio request for the frame that just finished.
pub fn generate_frame_audio<C: Callbacks + ?Sized>(
    configuration: &Configuration,
    constants: &ConstantTables,
    state: &mut RuntimeState,
    callbacks: &mut C,
) {
    let tv_standard = configuration.tv_standard;
    let fps = frames_per_second(tv_standard);

    let fm_frames =
        samples_this_frame(fm_sample_rate(tv_standard), fps, &mut state.fm.sample_remainder);
    let fm = &mut state.fm;
    callbacks.fm_audio_to_be_generated(fm_frames, &mut |buffer: &mut [i16]| {
        synthesise_fm(configuration, constants, fm, buffer, fm_frames);
    });

    let psg_samples =
        samples_this_frame(psg_sample_rate(tv_standard), fps, &mut state.psg.sample_remainder);
    let psg = &mut state.psg;
    callbacks.psg_audio_to_be_generated(psg_samples, &mut |buffer: &mut [i16]| {
        synthesise_psg(configuration, constants, psg, buffer, psg_samples);
    });

    if !configuration.general.cd_add_on_enabled {
        return;
    }

    let pcm_frames = samples_this_frame(PCM_SAMPLE_RATE, fps, &mut state.cd.pcm_remainder);
    let cd = &mut state.cd;
    callbacks.pcm_audio_to_be_generated(pcm_frames, &mut |buffer: &mut [i16]| {
        synthesise_pcm(cd, buffer, pcm_frames);
    });

    let cdda_frames = samples_this_frame(CDDA_SAMPLE_RATE, fps, &mut state.cd.cdda_remainder);
    let fetched = if state.cd.track_playing {
        let wanted = cdda_frames.min(state.cd.cdda_buffer.len() / CDDA_CHANNEL_COUNT);
        callbacks
            .cd_audio_read(&mut state.cd.cdda_buffer, wanted)
            .min(wanted)
    } else {
        0
    };
    let cdda = &state.cd.cdda_buffer[..fetched * CDDA_CHANNEL_COUNT];
    callbacks.cdda_audio_to_be_generated(cdda_frames, &mut |buffer: &mut [i16]| {
        copy_cdda(cdda, buffer, cdda_frames);
    });
}

fn clamp_sample(mix: i32) -> i16 {
    i16::try_from(mix.clamp(i32::from(i16::MIN), i32::from(i16::MAX))).unwrap_or_default()
}

fn synthesise_fm(
    configuration: &Configuration,
    constants: &ConstantTables,
    fm: &mut FmState,
    buffer: &mut [i16],
    total_frames: usize,
) {
    let dac_active = fm.dac_enabled;

    for frame in buffer.chunks_exact_mut(FM_CHANNEL_COUNT).take(total_frames) {
        let mut mix = 0_i32;

        for (index, voice) in fm.voices.iter_mut().enumerate() {
            voice.phase = voice.phase.wrapping_add(u32::from(voice.frequency));
            let replaced_by_dac = dac_active && index == FM_VOICES - 1;
            if voice.key_on && !replaced_by_dac && !configuration.fm.channels_disabled[index] {
                mix += i32::from(constants.fm_sine(voice.phase));
            }
        }

        if dac_active && !configuration.fm.dac_channel_disabled {
            mix += i32::from(fm.dac_sample);
        }

        if !configuration.general.low_pass_filter_disabled {
            fm.filter += (mix - fm.filter) / 4;
            mix = fm.filter;
        }

        frame.fill(clamp_sample(mix));
    }
}

fn synthesise_psg(
    configuration: &Configuration,
    constants: &ConstantTables,
    psg: &mut PsgState,
    buffer: &mut [i16],
    total_samples: usize,
) {
    for sample in buffer.iter_mut().take(total_samples) {
        let mut mix = 0_i32;

        for (index, tone) in psg.tones.iter_mut().enumerate() {
            if tone.counter == 0 {
                tone.counter = tone.period.max(1);
                tone.output_high = !tone.output_high;
            } else {
                tone.counter -= 1;
            }

            if !configuration.psg.channels_disabled[index] {
                let level = i32::from(constants.psg_volume(tone.attenuation));
                mix += if tone.output_high { level } else { -level };
            }
        }

        let third_period = psg.tones[2].period;
        let noise = &mut psg.noise;
        if noise.counter == 0 {
            noise.counter = match noise.mode & 0x03 {
                0 => 0x10,
                1 => 0x20,
                2 => 0x40,
                _ => third_period.max(1),
            };
            let feedback = if noise.mode & 0x04 == 0 {
                noise.lfsr & 1
            } else {
                (noise.lfsr ^ (noise.lfsr >> 3)) & 1
            };
            noise.lfsr = (noise.lfsr >> 1) | (feedback << 15);
        } else {
            noise.counter -= 1;
        }

        if !configuration.psg.noise_disabled {
            let level = i32::from(constants.psg_volume(noise.attenuation));
            mix += if noise.lfsr & 1 == 0 { -level } else { level };
        }

        *sample = clamp_sample(mix);
    }
}

fn synthesise_pcm(cd: &mut CdState, buffer: &mut [i16], total_frames: usize) {
    for frame in buffer.chunks_exact_mut(PCM_CHANNEL_COUNT).take(total_frames) {
        let word = cd.sector_buffer[cd.pcm_position % cd.sector_buffer.len()];
        cd.pcm_position = cd.pcm_position.wrapping_add(1);
        let [left, right] = word.to_be_bytes();
        frame[0] = pcm_sample(left);
        frame[1] = pcm_sample(right);
    }
}

/// Decodes sign-magnitude 8-bit PCM.
fn pcm_sample(byte: u8) -> i16 {
    let magnitude = i16::from(byte & 0x7F) << 6;
    if byte & 0x80 == 0 {
        -magnitude
    } else {
        magnitude
    }
}

fn copy_cdda(fetched: &[i16], buffer: &mut [i16], total_frames: usize) {
    let wanted = (total_frames * CDDA_CHANNEL_COUNT).min(buffer.len());
    let copied = fetched.len().min(wanted);
    buffer[..copied].copy_from_slice(&fetched[..copied]);
    buffer[copied..wanted].fill(0);
}
