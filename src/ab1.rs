//! For operations pertaining to AB1 (Applied Biosystems' sequencing) trace sequence data.

use bincode::{Decode, Encode};
use strum_macros::EnumIter;

/// One of the four dye channels in a trace file.
#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumIter)]
pub enum TraceChannel {
    One,
    Two,
    Three,
    Four,
}

/// The data structure representing AB1 trace data, as produced by the toolkit's reader.
///
/// All coordinates share one x-axis: `peak_locations` marks where each called base's
/// signal peaks, and `trace_x` carries the (denser) sample positions of the raw curves.
#[derive(Clone, Debug, Default, Encode, Decode)]
pub struct SeqRecordAb1 {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Called bases. May include ambiguity codes such as `N`.
    pub sequence: String,
    /// Phred quality scores, if the file carries them.
    pub quality: Option<Vec<u8>>,
    /// Peak x-coordinate for each called base. Increasing; same length as `sequence`.
    pub peak_locations: Vec<f32>,
    /// X-coordinates of the raw trace samples.
    pub trace_x: Vec<f32>,
    /// Analyzed data, for each channel. Each is aligned per-sample with `trace_x`.
    pub data_ch1: Vec<u16>,
    pub data_ch2: Vec<u16>,
    pub data_ch3: Vec<u16>,
    pub data_ch4: Vec<u16>,
    /// Which base each channel reports, from the file's channel-order tag (eg `FWO_`).
    pub channels: [char; 4],
}

impl SeqRecordAb1 {
    /// Number of called bases.
    pub fn len(&self) -> usize {
        self.sequence.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// The called base at a 0-based index.
    pub fn base(&self, i: usize) -> Option<char> {
        self.sequence.chars().nth(i)
    }

    /// Peak x-coordinate for a 1-based base position. Panics if out of range;
    /// positions come from upstream callers which use 1-based indexing throughout.
    pub fn peak_x(&self, position: usize) -> f32 {
        self.peak_locations[position - 1]
    }

    pub fn channel_data(&self, channel: TraceChannel) -> &[u16] {
        match channel {
            TraceChannel::One => &self.data_ch1,
            TraceChannel::Two => &self.data_ch2,
            TraceChannel::Three => &self.data_ch3,
            TraceChannel::Four => &self.data_ch4,
        }
    }

    /// The base letter a channel reports.
    pub fn channel_base(&self, channel: TraceChannel) -> char {
        self.channels[channel as usize]
    }
}
