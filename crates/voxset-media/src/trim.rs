//! Endpoint trimming.

use tracing::debug;

use crate::error::{MediaError, MediaResult};
use crate::waveform::Waveform;

/// Remove the first `start_secs` and last `end_secs` of audio.
///
/// `end_secs == 0` means no trailing trim is applied. Fails with
/// [`MediaError::InvalidTrimRange`] when the trim bounds meet or exceed the
/// waveform duration; this is non-retryable for the same inputs, so callers
/// should validate against the real duration first.
pub fn trim(waveform: &Waveform, start_secs: u32, end_secs: u32) -> MediaResult<Waveform> {
    let duration_ms = waveform.duration_ms();
    let trim_total_ms = (start_secs as u64 + end_secs as u64) * 1000;

    if trim_total_ms >= duration_ms {
        return Err(MediaError::InvalidTrimRange {
            start_secs,
            end_secs,
            duration_secs: waveform.duration_secs(),
        });
    }

    let start_ms = start_secs as u64 * 1000;
    let end_ms = if end_secs == 0 {
        duration_ms
    } else {
        duration_ms - end_secs as u64 * 1000
    };

    let trimmed = waveform.slice_ms(start_ms, end_ms);
    debug!(
        input_ms = duration_ms,
        output_ms = trimmed.duration_ms(),
        start_secs,
        end_secs,
        "Trimmed waveform endpoints"
    );

    Ok(trimmed)
}
