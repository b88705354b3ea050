//! Frame-triggered audio cue scheduling.

use std::collections::HashMap;

use crate::document::movie::MovieDocument;
use crate::document::resources::sniff_audio_format;
use crate::playback::sink::{AudioClip, AudioSink, LoadOutcome};

/// Lifecycle of one audio cue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CueState {
    /// Created, load not yet attempted.
    Idle,
    /// The backend is decoding in the background. `play_when_ready` records
    /// whether the cue's start frame passed while waiting.
    Loading {
        /// Play immediately once the clip arrives.
        play_when_ready: bool,
    },
    /// Clip decoded, waiting for its start frame.
    Ready,
    /// Clip audible.
    Playing,
    /// Suspended mid-clip together with the timeline.
    Paused,
    /// Halted; eligible to retrigger on the next start-frame pass.
    Stopped,
}

struct Cue {
    key: String,
    start_frame: usize,
    /// Frame after which the clip is cut off; zero means play to the end.
    end_frame: usize,
    start_time_ms: u32,
    state: CueState,
    clip: Option<Box<dyn AudioClip>>,
}

/// Frame-driven audio trigger table.
///
/// Cues are primed at construction: every audio record with a classified
/// binary is handed to the backend immediately, so by the time playback
/// starts each cue is either ready or loading. Records pointing at missing
/// binaries are logged and skipped. Triggering is exact: a cue fires only
/// when the timeline enters its start frame, so seeking into the middle of
/// a cue stays silent.
pub struct CueScheduler {
    cues: Vec<Cue>,
    triggers: HashMap<usize, Vec<usize>>,
    pitch: f64,
}

impl CueScheduler {
    /// Build the trigger table and prime every cue through `sink`.
    pub fn new<A: AudioSink>(doc: &MovieDocument, sink: &mut A) -> Self {
        let mut cues = Vec::new();
        for audio in doc.audios() {
            let Some(bytes) = doc.audio_binary(&audio.audio_key) else {
                tracing::warn!(
                    key = %audio.audio_key,
                    "audio cue references a missing binary, skipping"
                );
                continue;
            };
            let mut cue = Cue {
                key: audio.audio_key.clone(),
                start_frame: audio.start_frame.max(0) as usize,
                end_frame: audio.end_frame.max(0) as usize,
                start_time_ms: audio.start_time.max(0) as u32,
                state: CueState::Idle,
                clip: None,
            };
            match sink.load(&cue.key, sniff_audio_format(bytes), bytes) {
                LoadOutcome::Ready(clip) => {
                    cue.clip = Some(clip);
                    cue.state = CueState::Ready;
                }
                LoadOutcome::Pending => {
                    cue.state = CueState::Loading {
                        play_when_ready: false,
                    };
                }
            }
            cues.push(cue);
        }

        let mut triggers: HashMap<usize, Vec<usize>> = HashMap::new();
        for (i, cue) in cues.iter().enumerate() {
            triggers.entry(cue.start_frame).or_default().push(i);
        }

        tracing::info!(cues = cues.len(), "audio cue table primed");
        Self {
            cues,
            triggers,
            pitch: 1.0,
        }
    }

    /// React to the timeline entering `frame`: fire cues starting here and
    /// cut off cues whose range ended.
    pub fn enter_frame(&mut self, frame: usize) {
        if let Some(indices) = self.triggers.get(&frame) {
            for &i in indices {
                let cue = &mut self.cues[i];
                match cue.state {
                    CueState::Ready | CueState::Stopped => {
                        if let Some(clip) = cue.clip.as_mut() {
                            clip.play(cue.start_time_ms, self.pitch);
                            cue.state = CueState::Playing;
                        }
                    }
                    CueState::Loading { .. } => {
                        cue.state = CueState::Loading {
                            play_when_ready: true,
                        };
                    }
                    _ => {}
                }
            }
        }

        for cue in &mut self.cues {
            if cue.state == CueState::Playing && cue.end_frame > 0 && frame >= cue.end_frame {
                if let Some(clip) = cue.clip.as_mut() {
                    clip.stop();
                }
                cue.state = CueState::Stopped;
            }
        }
    }

    /// Hand over a clip whose decode finished in the background. The clip
    /// goes to the first cue still loading under `key`; it plays at once if
    /// its start frame passed in the meantime.
    pub fn finish_load(&mut self, key: &str, clip: Box<dyn AudioClip>) {
        let waiting = self
            .cues
            .iter_mut()
            .find(|c| c.key == key && matches!(c.state, CueState::Loading { .. }));
        let Some(cue) = waiting else {
            tracing::warn!(key = %key, "finished load has no waiting cue, dropping clip");
            return;
        };

        let play_now = matches!(
            cue.state,
            CueState::Loading {
                play_when_ready: true
            }
        );
        cue.clip = Some(clip);
        if play_now {
            if let Some(clip) = cue.clip.as_mut() {
                clip.play(cue.start_time_ms, self.pitch);
            }
            cue.state = CueState::Playing;
        } else {
            cue.state = CueState::Ready;
        }
    }

    /// Suspend audible cues and cancel pending autoplay on loading ones.
    pub fn pause_all(&mut self) {
        for cue in &mut self.cues {
            match cue.state {
                CueState::Playing => {
                    if let Some(clip) = cue.clip.as_mut() {
                        clip.pause();
                    }
                    cue.state = CueState::Paused;
                }
                CueState::Loading {
                    play_when_ready: true,
                } => {
                    cue.state = CueState::Loading {
                        play_when_ready: false,
                    };
                }
                _ => {}
            }
        }
    }

    /// Resume cues paused by [`pause_all`](Self::pause_all).
    pub fn resume_all(&mut self) {
        for cue in &mut self.cues {
            if cue.state == CueState::Paused {
                if let Some(clip) = cue.clip.as_mut() {
                    clip.resume();
                }
                cue.state = CueState::Playing;
            }
        }
    }

    /// Halt every audible or suspended cue. Halted cues retrigger the next
    /// time the timeline passes their start frame.
    pub fn stop_all(&mut self) {
        for cue in &mut self.cues {
            match cue.state {
                CueState::Playing | CueState::Paused => {
                    if let Some(clip) = cue.clip.as_mut() {
                        clip.stop();
                    }
                    cue.state = CueState::Stopped;
                }
                CueState::Loading {
                    play_when_ready: true,
                } => {
                    cue.state = CueState::Loading {
                        play_when_ready: false,
                    };
                }
                _ => {}
            }
        }
    }

    /// Reconcile cue state with the backend: a cue whose clip reports it is
    /// no longer audible ran to its own end and becomes eligible to
    /// retrigger on the next start-frame pass.
    pub fn sync_finished(&mut self) {
        for cue in &mut self.cues {
            if cue.state == CueState::Playing && cue.clip.as_ref().is_some_and(|c| !c.is_playing())
            {
                cue.state = CueState::Stopped;
            }
        }
    }

    /// Propagate a playback-rate change to audible clips.
    pub fn set_pitch(&mut self, pitch: f64) {
        self.pitch = pitch;
        for cue in &mut self.cues {
            if cue.state == CueState::Playing {
                if let Some(clip) = cue.clip.as_mut() {
                    clip.set_pitch(pitch);
                }
            }
        }
    }

    /// Number of primed cues.
    pub fn cue_count(&self) -> usize {
        self.cues.len()
    }

    /// State of one cue by construction order.
    pub fn cue_state(&self, index: usize) -> Option<CueState> {
        self.cues.get(index).map(|c| c.state)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/audio.rs"]
mod tests;
