//! The host-facing playback session.

use crate::document::movie::{MovieDocument, affine_of};
use crate::geometry::cache::FrameGeometryCache;
use crate::playback::audio::CueScheduler;
use crate::playback::sink::{AudioClip, AudioSink, GraphicsSink, ImageDraw};
use crate::playback::timeline::{PlayState, Tick, TickEvent, Timeline};

/// How a sprite track is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    /// Backed by a bitmap blob; drawn through [`GraphicsSink::draw_image`].
    Image,
    /// Pure vector track; drawn from the frame geometry cache.
    Vector,
}

/// One running animation: a document, its resolved geometry, the frame
/// clock and the audio trigger table.
///
/// The session is driven by the host loop: `tick` with the elapsed wall
/// time, then `render` into a graphics sink. A destroyed session keeps its
/// memory claim small and turns every call into a no-op.
pub struct PlaybackSession {
    doc: MovieDocument,
    cache: FrameGeometryCache,
    timeline: Timeline,
    cues: CueScheduler,
    destroyed: bool,
}

impl PlaybackSession {
    /// Prepare a document for playback: build the geometry cache, prime the
    /// audio cues through `audio` and park the clock at frame zero.
    #[tracing::instrument(skip_all)]
    pub fn new<A: AudioSink>(doc: MovieDocument, audio: &mut A) -> Self {
        let cache = FrameGeometryCache::build(&doc);
        let timeline = Timeline::new(doc.fps(), doc.total_frames());
        let cues = CueScheduler::new(&doc, audio);
        tracing::info!(
            version = %doc.version(),
            frames = doc.total_frames(),
            sprites = doc.sprites().len(),
            "playback session ready"
        );
        Self {
            doc,
            cache,
            timeline,
            cues,
            destroyed: false,
        }
    }

    /// The decoded document backing this session.
    pub fn document(&self) -> &MovieDocument {
        &self.doc
    }

    /// The resolved frame geometry.
    pub fn geometry(&self) -> &FrameGeometryCache {
        &self.cache
    }

    /// Play from frame zero, looping forever.
    pub fn play(&mut self) {
        self.play_with(0, 0);
    }

    /// Play from `start`. `loops` of zero repeats forever, a positive count
    /// stops after that many passes, and `-1` only positions the cursor
    /// without starting the clock.
    pub fn play_with(&mut self, start: usize, loops: i32) {
        if self.destroyed {
            return;
        }
        self.cues.stop_all();
        self.timeline.seek(start);
        if loops >= 0 {
            self.timeline.play(loops);
            self.cues.enter_frame(self.timeline.frame());
        }
    }

    /// Suspend the clock and any audible cues.
    pub fn pause(&mut self) {
        if self.destroyed {
            return;
        }
        self.timeline.pause();
        self.cues.pause_all();
    }

    /// Resume a paused session.
    pub fn resume(&mut self) {
        if self.destroyed {
            return;
        }
        self.timeline.resume();
        self.cues.resume_all();
    }

    /// Halt playback, rewind to frame zero and silence every cue.
    pub fn stop(&mut self) {
        if self.destroyed {
            return;
        }
        self.timeline.stop();
        self.cues.stop_all();
    }

    /// Jump to `frame`, clamped to the valid range. The next `render` call
    /// shows the target frame immediately, and cue state is re-resolved for
    /// it: cues starting exactly there fire, cues past their end frame are
    /// cut off. Landing mid-cue stays silent.
    pub fn seek(&mut self, frame: usize) {
        if self.destroyed {
            return;
        }
        self.timeline.seek(frame);
        self.cues.enter_frame(self.timeline.frame());
    }

    /// Set the playback rate multiplier (floored at 0.01) and match the
    /// pitch of audible cues to it.
    pub fn set_rate(&mut self, rate: f64) {
        if self.destroyed {
            return;
        }
        self.timeline.set_rate(rate);
        self.cues.set_pitch(self.timeline.rate());
    }

    /// Override the frame rate; `fps` of zero or less restores the rate the
    /// document declared.
    pub fn set_fps(&mut self, fps: i32) {
        if self.destroyed {
            return;
        }
        self.timeline.set_fps(fps);
    }

    /// Advance by `dt` seconds of wall time, firing audio cues for every
    /// frame entered and silencing them on each completed pass.
    pub fn tick(&mut self, dt: f64) -> Tick {
        if self.destroyed {
            return Tick::default();
        }
        self.cues.sync_finished();
        let tick = self.timeline.tick(dt);
        for event in &tick.events {
            match event {
                TickEvent::Frame(frame) => self.cues.enter_frame(*frame),
                TickEvent::Completed => self.cues.stop_all(),
            }
        }
        tick
    }

    /// Emit the current frame's draw instructions into `sink`, sprites in
    /// document order.
    pub fn render<G: GraphicsSink>(&self, sink: &mut G) {
        if self.destroyed {
            return;
        }
        let fi = self.timeline.frame();
        sink.begin_frame(fi);
        for (i, sprite) in self.doc.sprites().iter().enumerate() {
            let Some(frame) = sprite.frames.get(fi) else {
                continue;
            };
            let alpha = frame.alpha.clamp(0.0, 1.0);
            if alpha <= 0.0 {
                continue;
            }

            let clipped = !frame.clip_path.is_empty();
            if clipped {
                sink.set_clip_path(Some(&frame.clip_path));
            }

            if self.sprite_kind(i) == Some(SpriteKind::Image) {
                let (x, y, width, height) = frame
                    .layout
                    .map(|l| {
                        (
                            f64::from(l.x),
                            f64::from(l.y),
                            f64::from(l.width),
                            f64::from(l.height),
                        )
                    })
                    .unwrap_or((0.0, 0.0, 0.0, 0.0));
                sink.draw_image(ImageDraw {
                    key: &sprite.image_key,
                    transform: affine_of(frame.transform.as_ref()),
                    x,
                    y,
                    width,
                    height,
                    alpha,
                });
            }

            let meshes = self.cache.shapes(i, fi);
            if meshes.iter().any(|m| !m.is_empty()) {
                sink.draw_meshes(meshes);
            }

            if clipped {
                sink.set_clip_path(None);
            }
        }
        sink.end_frame();
    }

    /// Hand a background-decoded clip to the audio cue table.
    pub fn finish_audio_load(&mut self, key: &str, clip: Box<dyn AudioClip>) {
        if self.destroyed {
            return;
        }
        self.cues.finish_load(key, clip);
    }

    /// Tear the session down: silence audio, release resource binaries and
    /// turn every subsequent call into a no-op.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.cues.stop_all();
        self.timeline.stop();
        self.doc.release_binaries();
        self.destroyed = true;
        tracing::info!("playback session destroyed");
    }

    /// True once [`destroy`](Self::destroy) ran.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// How sprite `index` is drawn, `None` when out of range.
    pub fn sprite_kind(&self, index: usize) -> Option<SpriteKind> {
        let sprite = self.doc.sprites().get(index)?;
        if !sprite.image_key.is_empty() && self.doc.image_binary(&sprite.image_key).is_some() {
            Some(SpriteKind::Image)
        } else {
            Some(SpriteKind::Vector)
        }
    }

    /// Current frame index.
    pub fn frame(&self) -> usize {
        self.timeline.frame()
    }

    /// Current clock state.
    pub fn state(&self) -> PlayState {
        self.timeline.state()
    }

    /// Full passes finished since the last play call.
    pub fn completed(&self) -> u32 {
        self.timeline.completed()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/session.rs"]
mod tests;
