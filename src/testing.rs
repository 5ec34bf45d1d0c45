//! Synthetic audio files for tests.
//!
//! The files carry no real audio, only enough structure for lofty to
//! recognize the container, report properties and accept tag writes.

use std::fs;
use std::path::{Path, PathBuf};

/// MPEG-1 Layer III, 128 kbit/s, 44.1 kHz, joint stereo, no CRC.
const MPEG_FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];
/// 144 * 128000 / 44100, no padding.
const MPEG_FRAME_LEN: usize = 417;

const FLAC_SAMPLE_RATE: u64 = 44_100;

/// `frames` back-to-back silent MPEG frames.
pub fn mp3_bytes(frames: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(frames * MPEG_FRAME_LEN);
    for _ in 0..frames {
        out.extend_from_slice(&MPEG_FRAME_HEADER);
        out.resize(out.len() + MPEG_FRAME_LEN - MPEG_FRAME_HEADER.len(), 0);
    }
    out
}

const FLAC_STREAMINFO: u8 = 0;
const FLAC_PADDING: u8 = 1;
const FLAC_VORBIS_COMMENT: u8 = 4;

/// Stand-in for encoded audio; starts with a FLAC frame sync code.
pub const FLAC_AUDIO: [u8; 16] = [
    0xFF, 0xF8, 0x69, 0x08, 0x00, 0x00, 0x8A, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08,
];

fn flac_block(out: &mut Vec<u8>, block_type: u8, last: bool, body: &[u8]) {
    out.push(if last { 0x80 | block_type } else { block_type });
    out.extend_from_slice(&(body.len() as u32).to_be_bytes()[1..]);
    out.extend_from_slice(body);
}

/// STREAMINFO announcing `seconds` of 16-bit stereo audio.
fn streaminfo(seconds: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(34);
    out.extend_from_slice(&4096u16.to_be_bytes());
    out.extend_from_slice(&4096u16.to_be_bytes());
    // Min/max frame size unknown.
    out.extend_from_slice(&[0; 6]);
    let packed: u64 = (FLAC_SAMPLE_RATE << 44)
        | (1 << 41) // channels - 1
        | (15 << 36) // bits per sample - 1
        | (FLAC_SAMPLE_RATE * seconds);
    out.extend_from_slice(&packed.to_be_bytes());
    // MD5 of the audio.
    out.extend_from_slice(&[0; 16]);
    out
}

/// A FLAC laid out the way encoders write it: STREAMINFO, an empty
/// VORBIS_COMMENT, a trailing PADDING block, then [`FLAC_AUDIO`].
pub fn flac_bytes(seconds: u64) -> Vec<u8> {
    let vendor = b"tunedex";
    let mut comments = (vendor.len() as u32).to_le_bytes().to_vec();
    comments.extend_from_slice(vendor);
    comments.extend_from_slice(&0u32.to_le_bytes());

    let mut out = b"fLaC".to_vec();
    flac_block(&mut out, FLAC_STREAMINFO, false, &streaminfo(seconds));
    flac_block(&mut out, FLAC_VORBIS_COMMENT, false, &comments);
    flac_block(&mut out, FLAC_PADDING, true, &[0; 256]);
    out.extend_from_slice(&FLAC_AUDIO);
    out
}

/// A FLAC whose only metadata block is STREAMINFO, followed by [`FLAC_AUDIO`].
pub fn bare_flac_bytes(seconds: u64) -> Vec<u8> {
    let mut out = b"fLaC".to_vec();
    flac_block(&mut out, FLAC_STREAMINFO, true, &streaminfo(seconds));
    out.extend_from_slice(&FLAC_AUDIO);
    out
}

/// An ID3v2.3 tag holding a single TYER frame.
pub fn id3v23_year_tag(year: &str) -> Vec<u8> {
    let mut frame = b"TYER".to_vec();
    // v2.3 frame sizes are plain big-endian.
    frame.extend_from_slice(&(year.len() as u32 + 1).to_be_bytes());
    // No flags.
    frame.extend_from_slice(&[0, 0]);
    // ISO-8859-1.
    frame.push(0);
    frame.extend_from_slice(year.as_bytes());

    // The tag size is synchsafe; frames this small never reach bit 7.
    let mut out = b"ID3".to_vec();
    out.extend_from_slice(&[3, 0, 0]);
    out.extend_from_slice(&(frame.len() as u32).to_be_bytes());
    out.extend_from_slice(&frame);
    out
}

pub fn write_mp3(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, mp3_bytes(40)).unwrap();
    path
}

pub fn write_flac(dir: &Path, name: &str, seconds: u64) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, flac_bytes(seconds)).unwrap();
    path
}

pub fn write_bare_flac(dir: &Path, name: &str, seconds: u64) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, bare_flac_bytes(seconds)).unwrap();
    path
}

/// An MP3 whose only year is a TYER frame in an ID3v2.3 tag.
pub fn write_id3v23_mp3(dir: &Path, name: &str, year: &str) -> PathBuf {
    let path = dir.join(name);
    let mut bytes = id3v23_year_tag(year);
    bytes.extend_from_slice(&mp3_bytes(40));
    fs::write(&path, bytes).unwrap();
    path
}
