//! Playable audio handles produced by prompt rendering.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An opaque handle the telephony backend can play to a call.
///
/// Prompt renderers produce one of three shapes: a file written to disk
/// (cloud synthesis output), raw PCM held in memory (native synthesis),
/// or a URI the backend resolves itself (e.g. a `tts://` scheme the
/// media server expands at playback time).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioHandle {
    /// Path to a rendered audio file.
    File(PathBuf),
    /// Raw PCM audio data (s16le).
    Pcm(Vec<u8>),
    /// A URI the playback backend resolves.
    Uri(String),
}

impl AudioHandle {
    /// A short description of the handle for log output. Never includes
    /// raw audio bytes.
    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => format!("file:{}", path.display()),
            Self::Pcm(data) => format!("pcm:{}B", data.len()),
            Self::Uri(uri) => uri.clone(),
        }
    }
}
