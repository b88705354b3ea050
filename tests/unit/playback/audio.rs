use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::document::movie::MovieDocument;
use crate::document::proto::{AudioEntity, MovieEntity, MovieParams};
use crate::document::resources::AudioFormat;
use crate::playback::audio::{CueScheduler, CueState};
use crate::playback::sink::{AudioClip, AudioSink, LoadOutcome};

type Log = Arc<Mutex<Vec<String>>>;

struct FakeClip {
    log: Log,
}

impl AudioClip for FakeClip {
    fn play(&mut self, offset_ms: u32, pitch: f64) {
        self.log.lock().unwrap().push(format!("play {offset_ms} {pitch}"));
    }
    fn pause(&mut self) {
        self.log.lock().unwrap().push("pause".into());
    }
    fn resume(&mut self) {
        self.log.lock().unwrap().push("resume".into());
    }
    fn stop(&mut self) {
        self.log.lock().unwrap().push("stop".into());
    }
    fn set_pitch(&mut self, pitch: f64) {
        self.log.lock().unwrap().push(format!("pitch {pitch}"));
    }
    fn is_playing(&self) -> bool {
        true
    }
}

/// A clip that runs out the moment it starts.
struct OneShotClip;

impl AudioClip for OneShotClip {
    fn play(&mut self, _offset_ms: u32, _pitch: f64) {}
    fn pause(&mut self) {}
    fn resume(&mut self) {}
    fn stop(&mut self) {}
    fn set_pitch(&mut self, _pitch: f64) {}
    fn is_playing(&self) -> bool {
        false
    }
}

struct OneShotSink;

impl AudioSink for OneShotSink {
    fn load(&mut self, _key: &str, _format: AudioFormat, _bytes: &[u8]) -> LoadOutcome {
        LoadOutcome::Ready(Box::new(OneShotClip))
    }
}

/// Decodes synchronously; records the formats it was handed.
struct SyncSink {
    log: Log,
    formats: Vec<AudioFormat>,
}

impl AudioSink for SyncSink {
    fn load(&mut self, _key: &str, format: AudioFormat, _bytes: &[u8]) -> LoadOutcome {
        self.formats.push(format);
        LoadOutcome::Ready(Box::new(FakeClip {
            log: self.log.clone(),
        }))
    }
}

/// Always defers to a background decode.
struct PendingSink;

impl AudioSink for PendingSink {
    fn load(&mut self, _key: &str, _format: AudioFormat, _bytes: &[u8]) -> LoadOutcome {
        LoadOutcome::Pending
    }
}

fn doc_with_cue(key: &str, start_frame: i32, end_frame: i32, start_time: i32) -> MovieDocument {
    let mut images = HashMap::new();
    images.insert(key.to_string(), b"RIFFxxxxWAVEdata".to_vec());
    MovieDocument::from_movie(MovieEntity {
        version: "2.0.0".into(),
        params: Some(MovieParams {
            view_box_width: 100.0,
            view_box_height: 100.0,
            fps: 30,
            frames: 20,
        }),
        images,
        audios: vec![AudioEntity {
            audio_key: key.into(),
            start_frame,
            end_frame,
            start_time,
            total_frame: 20,
        }],
        ..Default::default()
    })
}

fn log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

#[test]
fn cues_fire_exactly_on_their_start_frame() {
    let log = log();
    let mut sink = SyncSink {
        log: log.clone(),
        formats: Vec::new(),
    };
    let mut cues = CueScheduler::new(&doc_with_cue("boom", 2, 0, 250), &mut sink);
    assert_eq!(cues.cue_count(), 1);
    assert_eq!(cues.cue_state(0), Some(CueState::Ready));
    assert_eq!(sink.formats, vec![AudioFormat::Wav]);

    cues.enter_frame(1);
    assert_eq!(cues.cue_state(0), Some(CueState::Ready));
    cues.enter_frame(2);
    assert_eq!(cues.cue_state(0), Some(CueState::Playing));
    assert_eq!(log.lock().unwrap().as_slice(), ["play 250 1"]);

    // Entering later frames does not retrigger.
    cues.enter_frame(3);
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[test]
fn cues_cut_off_at_their_end_frame_and_can_retrigger() {
    let log = log();
    let mut sink = SyncSink {
        log: log.clone(),
        formats: Vec::new(),
    };
    let mut cues = CueScheduler::new(&doc_with_cue("boom", 2, 5, 0), &mut sink);
    cues.enter_frame(2);
    cues.enter_frame(4);
    assert_eq!(cues.cue_state(0), Some(CueState::Playing));
    cues.enter_frame(5);
    assert_eq!(cues.cue_state(0), Some(CueState::Stopped));

    cues.enter_frame(2);
    assert_eq!(cues.cue_state(0), Some(CueState::Playing));
    assert_eq!(
        log.lock().unwrap().as_slice(),
        ["play 0 1", "stop", "play 0 1"]
    );
}

#[test]
fn a_pending_clip_plays_as_soon_as_it_arrives() {
    let log = log();
    let mut cues = CueScheduler::new(&doc_with_cue("boom", 2, 0, 100), &mut PendingSink);
    assert_eq!(
        cues.cue_state(0),
        Some(CueState::Loading {
            play_when_ready: false
        })
    );

    cues.enter_frame(2);
    assert_eq!(
        cues.cue_state(0),
        Some(CueState::Loading {
            play_when_ready: true
        })
    );

    cues.finish_load("boom", Box::new(FakeClip { log: log.clone() }));
    assert_eq!(cues.cue_state(0), Some(CueState::Playing));
    assert_eq!(log.lock().unwrap().as_slice(), ["play 100 1"]);
}

#[test]
fn pausing_while_loading_cancels_the_autoplay() {
    let log = log();
    let mut cues = CueScheduler::new(&doc_with_cue("boom", 2, 0, 100), &mut PendingSink);
    cues.enter_frame(2);
    cues.pause_all();
    cues.finish_load("boom", Box::new(FakeClip { log: log.clone() }));
    assert_eq!(cues.cue_state(0), Some(CueState::Ready));
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn pause_and_resume_pass_through_to_the_clip() {
    let log = log();
    let mut sink = SyncSink {
        log: log.clone(),
        formats: Vec::new(),
    };
    let mut cues = CueScheduler::new(&doc_with_cue("boom", 0, 0, 0), &mut sink);
    cues.enter_frame(0);
    cues.pause_all();
    assert_eq!(cues.cue_state(0), Some(CueState::Paused));
    cues.resume_all();
    assert_eq!(cues.cue_state(0), Some(CueState::Playing));
    cues.stop_all();
    assert_eq!(cues.cue_state(0), Some(CueState::Stopped));
    assert_eq!(
        log.lock().unwrap().as_slice(),
        ["play 0 1", "pause", "resume", "stop"]
    );
}

#[test]
fn pitch_changes_reach_playing_clips_and_later_triggers() {
    let log = log();
    let mut sink = SyncSink {
        log: log.clone(),
        formats: Vec::new(),
    };
    let mut cues = CueScheduler::new(&doc_with_cue("boom", 0, 0, 0), &mut sink);
    cues.enter_frame(0);
    cues.set_pitch(2.0);
    cues.stop_all();
    cues.enter_frame(0);
    assert_eq!(
        log.lock().unwrap().as_slice(),
        ["play 0 1", "pitch 2", "stop", "play 0 2"]
    );
}

#[test]
fn clips_that_end_on_their_own_become_stopped() {
    let mut cues = CueScheduler::new(&doc_with_cue("boom", 0, 0, 0), &mut OneShotSink);
    cues.enter_frame(0);
    assert_eq!(cues.cue_state(0), Some(CueState::Playing));
    cues.sync_finished();
    assert_eq!(cues.cue_state(0), Some(CueState::Stopped));

    // A naturally finished cue retriggers on the next start-frame pass.
    cues.enter_frame(0);
    assert_eq!(cues.cue_state(0), Some(CueState::Playing));
}

#[test]
fn cues_without_a_binary_are_skipped() {
    let movie = MovieEntity {
        version: "2.0.0".into(),
        params: Some(MovieParams {
            view_box_width: 100.0,
            view_box_height: 100.0,
            fps: 30,
            frames: 20,
        }),
        audios: vec![AudioEntity {
            audio_key: "ghost".into(),
            start_frame: 0,
            ..Default::default()
        }],
        ..Default::default()
    };
    let doc = MovieDocument::from_movie(movie);
    let cues = CueScheduler::new(&doc, &mut PendingSink);
    assert_eq!(cues.cue_count(), 0);
}

#[test]
fn an_unexpected_finished_load_is_dropped() {
    let log = log();
    let mut sink = SyncSink {
        log: log.clone(),
        formats: Vec::new(),
    };
    let mut cues = CueScheduler::new(&doc_with_cue("boom", 2, 0, 0), &mut sink);
    // Already ready; a stray background result must not disturb it.
    cues.finish_load("boom", Box::new(FakeClip { log: log.clone() }));
    assert_eq!(cues.cue_state(0), Some(CueState::Ready));
}
