use std::path::Path;

use crate::audio::domain::audio_reader::AudioReader;
use crate::audio::domain::audio_segment::AudioSegment;

/// Decodes the audio track of a video file using ffmpeg-next.
///
/// Output is mono f32 PCM at the requested sample rate, ready to hand to
/// the speech recognizer.
pub struct FfmpegAudioReader;

impl AudioReader for FfmpegAudioReader {
    fn read_audio(
        &self,
        path: &Path,
        target_sample_rate: u32,
    ) -> Result<Option<AudioSegment>, Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        let mut ictx = ffmpeg_next::format::input(path)?;

        let stream = match ictx.streams().best(ffmpeg_next::media::Type::Audio) {
            Some(s) => s,
            None => return Ok(None),
        };
        let stream_index = stream.index();

        let codec_ctx =
            ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())?;
        let mut decoder = codec_ctx.decoder().audio()?;

        let mut resampler = ffmpeg_next::software::resampling::Context::get(
            decoder.format(),
            decoder.channel_layout(),
            decoder.rate(),
            ffmpeg_next::format::Sample::F32(ffmpeg_next::format::sample::Type::Planar),
            ffmpeg_next::ChannelLayout::MONO,
            target_sample_rate,
        )?;

        let mut samples: Vec<f32> = Vec::new();
        let mut decoded = ffmpeg_next::util::frame::audio::Audio::empty();
        let mut resampled = ffmpeg_next::util::frame::audio::Audio::empty();

        for (s, packet) in ictx.packets() {
            if s.index() != stream_index {
                continue;
            }
            decoder.send_packet(&packet)?;
            drain_decoder(
                &mut decoder,
                &mut resampler,
                &mut decoded,
                &mut resampled,
                &mut samples,
            )?;
        }

        // Flush the decoder, then whatever the resampler has buffered
        decoder.send_eof()?;
        drain_decoder(
            &mut decoder,
            &mut resampler,
            &mut decoded,
            &mut resampled,
            &mut samples,
        )?;
        if let Ok(Some(delay)) = resampler.flush(&mut resampled) {
            if delay.output > 0 {
                append_mono(&resampled, &mut samples);
            }
        }

        Ok(Some(AudioSegment::new(samples, target_sample_rate, 1)))
    }
}

fn drain_decoder(
    decoder: &mut ffmpeg_next::decoder::Audio,
    resampler: &mut ffmpeg_next::software::resampling::Context,
    decoded: &mut ffmpeg_next::util::frame::audio::Audio,
    resampled: &mut ffmpeg_next::util::frame::audio::Audio,
    out: &mut Vec<f32>,
) -> Result<(), ffmpeg_next::Error> {
    while decoder.receive_frame(decoded).is_ok() {
        resampler.run(decoded, resampled)?;
        append_mono(resampled, out);
    }
    Ok(())
}

/// Append the samples of a planar mono f32 frame.
fn append_mono(frame: &ffmpeg_next::util::frame::audio::Audio, out: &mut Vec<f32>) {
    let n = frame.samples();
    if n == 0 {
        return;
    }
    let data = frame.data(0);
    let floats = unsafe { std::slice::from_raw_parts(data.as_ptr() as *const f32, n) };
    out.extend_from_slice(floats);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_read_audio_nonexistent_file() {
        let reader = FfmpegAudioReader;
        let path = if cfg!(windows) {
            Path::new("Z:\\nonexistent\\file.mp4")
        } else {
            Path::new("/nonexistent/file.mp4")
        };
        let result = reader.read_audio(path, 16000);
        assert!(result.is_err());
    }
}
