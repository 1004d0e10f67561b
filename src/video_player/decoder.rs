// SPDX-License-Identifier: MPL-2.0
//! Async video frame decoder using FFmpeg.
//!
//! Decoding runs in a blocking Tokio task because FFmpeg types are not
//! `Send`. The UI talks to it through a command channel and receives frames
//! through a small bounded event channel, which gives the decoder
//! backpressure when the UI falls behind.

use crate::error::{Error, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// FFmpeg seek timestamps are expressed in `AV_TIME_BASE` units.
const AV_TIME_BASE: f64 = 1_000_000.0;

/// Idle wait between command polls while paused.
const IDLE_POLL: Duration = Duration::from_millis(10);

/// Frames buffered between the decoder and the UI.
const EVENT_CAPACITY: usize = 2;

/// A decoded video frame ready for display.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// RGBA pixel data (width × height × 4 bytes).
    pub rgba_data: Arc<Vec<u8>>,
    pub width: u32,
    pub height: u32,
    /// Presentation timestamp in seconds.
    pub pts_secs: f64,
}

impl DecodedFrame {
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.rgba_data.len()
    }
}

/// Properties of the opened video stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamInfo {
    pub width: u32,
    pub height: u32,
    /// Container duration, when the file declares one.
    pub duration_secs: Option<f64>,
}

/// Commands sent to the decoder task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderCommand {
    /// Start or resume decoding. Restarts from the top after the end.
    Play,
    /// Stop sending frames, keeping the position.
    Pause,
    /// Stop decoding and release the file.
    Stop,
}

/// Events sent from the decoder to the UI.
#[derive(Debug, Clone)]
pub enum DecoderEvent {
    /// The container and its video stream opened successfully.
    Opened(StreamInfo),
    FrameReady(DecodedFrame),
    EndOfStream,
    Error(String),
}

/// Handle on a decoder running in a blocking Tokio task.
pub struct AsyncDecoder {
    command_tx: mpsc::UnboundedSender<DecoderCommand>,
    event_rx: mpsc::Receiver<DecoderEvent>,
}

impl AsyncDecoder {
    /// Spawns a decoder for `video_path`.
    ///
    /// The first frame is decoded right away so the surface has a poster.
    /// Playback itself waits for [`DecoderCommand::Play`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file does not exist. Problems found while
    /// opening the container arrive later as [`DecoderEvent::Error`].
    pub fn new<P: AsRef<Path>>(video_path: P) -> Result<Self> {
        let path = video_path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(Error::Io(format!("Video file not found: {}", path.display())));
        }

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(EVENT_CAPACITY);

        tokio::task::spawn_blocking(move || {
            if let Err(err) = Self::decoder_loop_blocking(&path, command_rx, &event_tx) {
                tracing::warn!(%err, path = %path.display(), "video decoder stopped");
                let _ = event_tx.blocking_send(DecoderEvent::Error(err.to_string()));
            }
        });

        Ok(Self {
            command_tx,
            event_rx,
        })
    }

    /// Sends a command to the decoder task.
    ///
    /// # Errors
    ///
    /// Fails once the decoder task has exited.
    pub fn send_command(&self, command: DecoderCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| Error::Io("Decoder task is not running".into()))
    }

    /// Waits for the next decoder event. `None` once the task has exited.
    pub async fn recv_event(&mut self) -> Option<DecoderEvent> {
        self.event_rx.recv().await
    }

    fn decoder_loop_blocking(
        video_path: &Path,
        mut command_rx: mpsc::UnboundedReceiver<DecoderCommand>,
        event_tx: &mpsc::Sender<DecoderEvent>,
    ) -> Result<()> {
        super::init_ffmpeg()?;

        let mut ictx = ffmpeg_next::format::input(video_path)
            .map_err(|e| Error::Io(format!("Failed to open video: {e}")))?;

        let input = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or_else(|| Error::Io("No video stream found".to_string()))?;
        let video_stream_index = input.index();
        let time_base = input.time_base();
        let time_base_f64 = f64::from(time_base.numerator()) / f64::from(time_base.denominator());

        let context_decoder =
            ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
                .map_err(|e| Error::Io(format!("Failed to create codec context: {e}")))?;
        let mut decoder = context_decoder
            .decoder()
            .video()
            .map_err(|e| Error::Io(format!("Failed to create video decoder: {e}")))?;

        let width = decoder.width();
        let height = decoder.height();
        let mut scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGBA,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )
        .map_err(|e| Error::Io(format!("Failed to create scaler: {e}")))?;

        let duration_secs = Some(ictx.duration())
            .filter(|duration| *duration > 0)
            .map(|duration| duration as f64 / AV_TIME_BASE);
        if event_tx
            .blocking_send(DecoderEvent::Opened(StreamInfo {
                width,
                height,
                duration_secs,
            }))
            .is_err()
        {
            return Ok(());
        }

        let mut is_playing = false;
        let mut at_end = false;
        let mut playback_start_time: Option<Instant> = None;
        let mut first_pts: Option<f64> = None;
        // Poster frame
        let mut decode_single_frame = true;

        loop {
            match command_rx.try_recv() {
                Ok(DecoderCommand::Play) => {
                    if at_end {
                        if let Err(e) = ictx.seek(0, ..0) {
                            tracing::warn!(error = %e, "rewind failed");
                        } else {
                            decoder.flush();
                        }
                        at_end = false;
                    }
                    is_playing = true;
                    playback_start_time = Some(Instant::now());
                    first_pts = None;
                }
                Ok(DecoderCommand::Pause) => {
                    is_playing = false;
                    playback_start_time = None;
                    first_pts = None;
                }
                Ok(DecoderCommand::Stop) | Err(mpsc::error::TryRecvError::Disconnected) => break,
                Err(mpsc::error::TryRecvError::Empty) => {}
            }

            if !is_playing && !decode_single_frame {
                std::thread::sleep(IDLE_POLL);
                continue;
            }

            let mut frame_decoded = false;
            for (stream, packet) in ictx.packets() {
                if stream.index() != video_stream_index {
                    continue;
                }
                if let Err(e) = decoder.send_packet(&packet) {
                    tracing::debug!(error = %e, "skipping undecodable packet");
                    continue;
                }

                let mut decoded_frame = ffmpeg_next::frame::Video::empty();
                if decoder.receive_frame(&mut decoded_frame).is_err() {
                    continue;
                }
                let mut rgba_frame = ffmpeg_next::frame::Video::empty();
                if let Err(e) = scaler.run(&decoded_frame, &mut rgba_frame) {
                    tracing::debug!(error = %e, "skipping frame that failed to scale");
                    continue;
                }

                let pts_secs = decoded_frame
                    .timestamp()
                    .map_or(0.0, |pts| pts as f64 * time_base_f64);

                // Pace frames against the wall clock from the first one shown
                if let Some(start_time) = playback_start_time {
                    let first = *first_pts.get_or_insert(pts_secs);
                    let delay = (pts_secs - first).max(0.0);
                    let target_time = start_time + Duration::from_secs_f64(delay);
                    let now = Instant::now();
                    if target_time > now {
                        std::thread::sleep(target_time - now);
                    }
                }

                let frame = DecodedFrame {
                    rgba_data: Arc::new(Self::extract_rgba_data(&rgba_frame)),
                    width,
                    height,
                    pts_secs,
                };
                if event_tx.blocking_send(DecoderEvent::FrameReady(frame)).is_err() {
                    return Ok(());
                }
                frame_decoded = true;
                decode_single_frame = false;
                break;
            }

            if !frame_decoded {
                if event_tx.blocking_send(DecoderEvent::EndOfStream).is_err() {
                    return Ok(());
                }
                is_playing = false;
                at_end = true;
                playback_start_time = None;
                first_pts = None;
                decode_single_frame = false;
            }
        }

        Ok(())
    }

    /// Copies the RGBA plane row by row, dropping the stride padding.
    fn extract_rgba_data(frame: &ffmpeg_next::frame::Video) -> Vec<u8> {
        let width = frame.width() as usize;
        let height = frame.height() as usize;
        let data = frame.data(0);
        let stride = frame.stride(0);

        let mut rgba_bytes = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            let row_start = y * stride;
            rgba_bytes.extend_from_slice(&data[row_start..row_start + width * 4]);
        }
        rgba_bytes
    }
}
