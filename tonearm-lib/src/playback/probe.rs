//! Duration probing for audio resources.

use std::fs::File;
use std::path::Path;

use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::{PlayerError, Result};

/// Probe a media file and return its duration in milliseconds.
///
/// The duration comes from the first audio track's time base and frame count;
/// resources without either are rejected, since the seek range cannot be
/// configured without a total duration.
pub fn duration_ms(path: &Path) -> Result<u64> {
    let file = File::open(path)?;
    let source = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            source,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|err| PlayerError::Probe(err.to_string()))?;

    let track = probed
        .format
        .tracks()
        .iter()
        .find(|track| track.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| PlayerError::Probe("no audio track found".to_string()))?;

    let params = &track.codec_params;
    let time_base = params
        .time_base
        .ok_or_else(|| PlayerError::Probe("track has no time base".to_string()))?;
    let frames = params
        .n_frames
        .ok_or_else(|| PlayerError::Probe("track duration is unknown".to_string()))?;

    let time = time_base.calc_time(params.start_ts + frames);
    Ok(time.seconds * 1000 + (time.frac * 1000.0) as u64)
}
