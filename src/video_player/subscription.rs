// SPDX-License-Identifier: MPL-2.0
//! Iced subscription bridging the decoder to the UI event loop.
//!
//! One subscription runs per video surface. Its identity is the surface id,
//! so moving to another item tears the decoder down and a new surface gets
//! a fresh one.

use super::{AsyncDecoder, DecodedFrame, DecoderCommand, DecoderEvent, StreamInfo};
use crate::application::gallery::SurfaceId;
use iced::futures::channel::mpsc as ui_channel;
use iced::futures::SinkExt;
use iced::stream;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Subscription identity of one playback session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct VideoPlaybackId(SurfaceId);

/// Subscription data: only the id takes part in the identity hash.
struct PlaybackSession {
    id: VideoPlaybackId,
    video_path: PathBuf,
}

impl std::hash::Hash for PlaybackSession {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Cloneable handle the UI uses to drive the decoder.
#[derive(Clone)]
pub struct DecoderCommandSender {
    video_tx: mpsc::UnboundedSender<DecoderCommand>,
}

impl DecoderCommandSender {
    /// Sends a command to the decoder.
    ///
    /// # Errors
    ///
    /// Fails once the playback session has ended.
    pub fn send(&self, command: DecoderCommand) -> Result<(), String> {
        self.video_tx
            .send(command)
            .map_err(|_| "Video decoder not running".to_string())
    }
}

impl From<mpsc::UnboundedSender<DecoderCommand>> for DecoderCommandSender {
    fn from(video_tx: mpsc::UnboundedSender<DecoderCommand>) -> Self {
        Self { video_tx }
    }
}

impl std::fmt::Debug for DecoderCommandSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecoderCommandSender")
            .field("closed", &self.video_tx.is_closed())
            .finish()
    }
}

/// What happened in a playback session.
#[derive(Debug, Clone)]
pub enum PlaybackEvent {
    /// The session is up; commands go through this sender.
    Started(DecoderCommandSender),
    Opened(StreamInfo),
    FrameReady(DecodedFrame),
    EndOfStream,
    Error(String),
}

/// A playback event tagged with the surface it belongs to.
#[derive(Debug, Clone)]
pub struct PlaybackMessage {
    pub surface: SurfaceId,
    pub event: PlaybackEvent,
}

impl From<DecoderEvent> for PlaybackEvent {
    fn from(event: DecoderEvent) -> Self {
        match event {
            DecoderEvent::Opened(info) => PlaybackEvent::Opened(info),
            DecoderEvent::FrameReady(frame) => PlaybackEvent::FrameReady(frame),
            DecoderEvent::EndOfStream => PlaybackEvent::EndOfStream,
            DecoderEvent::Error(message) => PlaybackEvent::Error(message),
        }
    }
}

/// Creates the playback subscription for the video at `video_path`.
///
/// The first message is [`PlaybackEvent::Started`] carrying the command
/// sender, unless the file is missing, in which case it is an error.
pub fn video_playback(
    video_path: PathBuf,
    surface: SurfaceId,
) -> iced::Subscription<PlaybackMessage> {
    let session = PlaybackSession {
        id: VideoPlaybackId(surface),
        video_path,
    };
    iced::Subscription::run_with(session, |session| {
        let video_path = session.video_path.clone();
        let surface = session.id.0;
        stream::channel(16, move |mut output| async move {
            match AsyncDecoder::new(&video_path) {
                Ok(decoder) => forward_events(decoder, surface, &mut output).await,
                Err(err) => {
                    tracing::debug!(%err, path = %video_path.display(), "video unavailable");
                    let _ = output
                        .send(PlaybackMessage {
                            surface,
                            event: PlaybackEvent::Error(err.to_string()),
                        })
                        .await;
                }
            }

            // Keep the subscription alive but idle
            std::future::pending::<()>().await;
        })
    })
}

/// Relays UI commands to the decoder and decoder events to the UI until
/// either side goes away.
async fn forward_events(
    mut decoder: AsyncDecoder,
    surface: SurfaceId,
    output: &mut ui_channel::Sender<PlaybackMessage>,
) {
    let (command_tx, mut command_rx) = mpsc::unbounded_channel();
    let started = PlaybackMessage {
        surface,
        event: PlaybackEvent::Started(command_tx.into()),
    };
    if output.send(started).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            Some(command) = command_rx.recv() => {
                if decoder.send_command(command).is_err() {
                    break;
                }
            }
            event = decoder.recv_event() => {
                let Some(event) = event else {
                    break;
                };
                let message = PlaybackMessage {
                    surface,
                    event: event.into(),
                };
                if output.send(message).await.is_err() {
                    break;
                }
            }
        }
    }
    let _ = decoder.send_command(DecoderCommand::Stop);
}
