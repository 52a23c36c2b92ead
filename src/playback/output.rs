use super::PlaybackError;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::io::Cursor;

/// Something that can play one encoded audio clip at a time.
pub trait AudioOutput {
    fn play(&mut self, audio: Vec<u8>) -> Result<(), PlaybackError>;

    /// Stops playback; the next `play` starts from the beginning.
    fn stop(&mut self);

    fn is_playing(&self) -> bool;
}

/// Default device output. The stream is opened on first use.
#[derive(Default)]
pub struct RodioOutput {
    stream: Option<(OutputStream, OutputStreamHandle)>,
    sink: Option<Sink>,
}

impl AudioOutput for RodioOutput {
    fn play(&mut self, audio: Vec<u8>) -> Result<(), PlaybackError> {
        self.stop();
        let stream = match self.stream.take() {
            Some(stream) => stream,
            None => OutputStream::try_default()?,
        };
        let (_, handle) = self.stream.insert(stream);

        let sink = Sink::try_new(handle)?;
        sink.append(Decoder::new(Cursor::new(audio))?);
        self.sink = Some(sink);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn is_playing(&self) -> bool {
        self.sink.as_ref().map_or(false, |sink| !sink.empty())
    }
}
