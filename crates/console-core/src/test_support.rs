use crate::{
    AudioGenerator, Button, Callbacks, CddaMode, FM_CHANNEL_COUNT, PCM_CHANNEL_COUNT,
    PSG_CHANNEL_COUNT,
};

/// Host double serving a fixed cartridge and recording every hook call.
#[derive(Debug, Default)]
pub struct RecordingCallbacks {
    pub rom: Vec<u8>,
    pub reads: Vec<u32>,
    pub writes: Vec<(u32, u8)>,
    pub colours: Vec<(u16, u16)>,
    pub scanlines: Vec<u16>,
    pub pressed: Vec<(u8, Button)>,
    pub input_polls: usize,
    pub fm_requests: Vec<usize>,
    pub psg_requests: Vec<usize>,
    pub pcm_requests: Vec<usize>,
    pub cdda_requests: Vec<usize>,
    pub last_fm: Vec<i16>,
    pub last_psg: Vec<i16>,
    pub cd_seeks: Vec<u32>,
    pub sector_reads: usize,
    pub cd_audio_reads: usize,
    pub save_file: Option<Vec<u8>>,
    pub save_cursor: usize,
    pub opened_for_reading: Vec<String>,
    pub saved: Vec<u8>,
    pub removed: Vec<String>,
}

impl RecordingCallbacks {
    pub fn with_rom(rom: &[u8]) -> Self {
        Self {
            rom: rom.to_vec(),
            ..Self::default()
        }
    }

    fn generate(total: usize, channels: usize, generate: &mut AudioGenerator<'_>) -> Vec<i16> {
        let mut buffer = vec![0; total * channels];
        generate(&mut buffer);
        buffer
    }
}

impl Callbacks for RecordingCallbacks {
    fn cartridge_read(&mut self, address: u32) -> u8 {
        self.reads.push(address);
        usize::try_from(address)
            .ok()
            .and_then(|index| self.rom.get(index))
            .copied()
            .unwrap_or(0)
    }

    fn cartridge_written(&mut self, address: u32, value: u8) {
        self.writes.push((address, value));
    }

    fn colour_updated(&mut self, index: u16, colour: u16) {
        self.colours.push((index, colour));
    }

    fn scanline_rendered(
        &mut self,
        scanline: u16,
        pixels: &[u8],
        screen_width: u16,
        _screen_height: u16,
    ) {
        assert_eq!(pixels.len(), usize::from(screen_width));
        self.scanlines.push(scanline);
    }

    fn input_requested(&mut self, player_id: u8, button: Button) -> bool {
        self.input_polls += 1;
        self.pressed.contains(&(player_id, button))
    }

    fn fm_audio_to_be_generated(&mut self, total_frames: usize, generate: &mut AudioGenerator<'_>) {
        self.fm_requests.push(total_frames);
        self.last_fm = Self::generate(total_frames, FM_CHANNEL_COUNT, generate);
    }

    fn psg_audio_to_be_generated(
        &mut self,
        total_samples: usize,
        generate: &mut AudioGenerator<'_>,
    ) {
        self.psg_requests.push(total_samples);
        self.last_psg = Self::generate(total_samples, PSG_CHANNEL_COUNT, generate);
    }

    fn pcm_audio_to_be_generated(
        &mut self,
        total_frames: usize,
        generate: &mut AudioGenerator<'_>,
    ) {
        self.pcm_requests.push(total_frames);
        Self::generate(total_frames, PCM_CHANNEL_COUNT, generate);
    }

    fn cdda_audio_to_be_generated(
        &mut self,
        total_frames: usize,
        generate: &mut AudioGenerator<'_>,
    ) {
        self.cdda_requests.push(total_frames);
        Self::generate(total_frames, crate::CDDA_CHANNEL_COUNT, generate);
    }

    fn cd_seeked(&mut self, sector_index: u32) {
        self.cd_seeks.push(sector_index);
    }

    fn cd_sector_read(&mut self, _buffer: &mut [u16]) {
        self.sector_reads += 1;
    }

    fn cd_seek_track(&mut self, _track_index: u16, _mode: CddaMode) -> bool {
        false
    }

    fn cd_audio_read(&mut self, _buffer: &mut [i16], _total_frames: usize) -> usize {
        self.cd_audio_reads += 1;
        0
    }

    fn save_file_opened_for_reading(&mut self, filename: &str) -> bool {
        self.opened_for_reading.push(filename.to_string());
        self.save_cursor = 0;
        self.save_file.is_some()
    }

    fn save_file_read(&mut self) -> Option<u8> {
        let byte = self.save_file.as_ref()?.get(self.save_cursor).copied()?;
        self.save_cursor += 1;
        Some(byte)
    }

    fn save_file_opened_for_writing(&mut self, _filename: &str) -> bool {
        self.saved.clear();
        true
    }

    fn save_file_written(&mut self, byte: u8) {
        self.saved.push(byte);
    }

    fn save_file_closed(&mut self) {}

    fn save_file_removed(&mut self, filename: &str) -> bool {
        self.removed.push(filename.to_string());
        true
    }

    fn save_file_size_obtained(&mut self, _filename: &str) -> Option<usize> {
        self.save_file.as_ref().map(Vec::len)
    }
}
