//! The frame clock.

/// Default frame rate for documents that declare none.
const DEFAULT_FPS: f64 = 30.0;
/// Lower bound on the playback rate multiplier.
const MIN_RATE: f64 = 0.01;

/// Coarse playback state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum PlayState {
    /// Not advancing; the frame cursor is wherever it was left.
    #[default]
    Stopped,
    /// Advancing on every tick.
    Playing,
    /// Suspended mid-run; resumable without losing loop progress.
    Paused,
}

/// Something that happened while consuming a tick, in occurrence order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickEvent {
    /// The cursor entered this frame.
    Frame(usize),
    /// One full pass over the animation finished.
    Completed,
}

/// Outcome of one [`Timeline::tick`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tick {
    /// Frame entries and completions in the order they happened.
    pub events: Vec<TickEvent>,
    /// True when this tick exhausted the final loop and playback stopped.
    pub finished: bool,
}

impl Tick {
    /// Number of completions in this tick.
    pub fn completions(&self) -> u32 {
        self.events
            .iter()
            .filter(|e| matches!(e, TickEvent::Completed))
            .count() as u32
    }
}

/// Frame clock driven by wall-clock deltas.
///
/// Time accumulates as `dt * rate`; whole frame periods are consumed one at
/// a time so a large delta steps through every intermediate frame rather
/// than jumping. Loop accounting is per full pass: a loop budget of zero
/// plays forever, a positive budget stops on the final frame of the last
/// pass.
#[derive(Clone, Debug)]
pub struct Timeline {
    fps: f64,
    document_fps: f64,
    total: usize,
    rate: f64,
    acc: f64,
    frame: usize,
    state: PlayState,
    loops: i32,
    completed: u32,
}

impl Timeline {
    /// Clock over `total` frames at `fps`. Non-positive rates fall back to
    /// 30 frames per second.
    pub fn new(fps: i32, total: usize) -> Self {
        let fps = if fps > 0 { f64::from(fps) } else { DEFAULT_FPS };
        Self {
            fps,
            document_fps: fps,
            total,
            rate: 1.0,
            acc: 0.0,
            frame: 0,
            state: PlayState::Stopped,
            loops: 0,
            completed: 0,
        }
    }

    /// Start playing from the current frame. `loops` of zero plays forever,
    /// a positive count stops after that many full passes. Loop progress
    /// restarts from zero.
    pub fn play(&mut self, loops: i32) {
        if self.total == 0 {
            tracing::warn!("refusing to play a zero-frame timeline");
            return;
        }
        self.loops = loops.max(0);
        self.completed = 0;
        self.acc = 0.0;
        self.state = PlayState::Playing;
    }

    /// Suspend without losing loop progress.
    pub fn pause(&mut self) {
        if self.state == PlayState::Playing {
            self.state = PlayState::Paused;
        }
    }

    /// Resume a paused run.
    pub fn resume(&mut self) {
        if self.state == PlayState::Paused {
            self.state = PlayState::Playing;
        }
    }

    /// Halt and rewind: frame zero, empty accumulator, loop progress
    /// cleared.
    pub fn stop(&mut self) {
        self.state = PlayState::Stopped;
        self.frame = 0;
        self.acc = 0.0;
        self.completed = 0;
    }

    /// Jump to `frame`, clamped to the valid range. The accumulator is
    /// cleared so the next tick starts a fresh frame period.
    pub fn seek(&mut self, frame: usize) {
        if self.total == 0 {
            return;
        }
        self.frame = frame.min(self.total - 1);
        self.acc = 0.0;
    }

    /// Override the frame rate. Non-positive values restore the rate the
    /// document declared.
    pub fn set_fps(&mut self, fps: i32) {
        self.fps = if fps > 0 {
            f64::from(fps)
        } else {
            self.document_fps
        };
    }

    /// Effective frames per second.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Set the playback rate multiplier, floored at 0.01.
    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate.max(MIN_RATE);
    }

    /// Current playback rate multiplier.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Current frame index.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Current playback state.
    pub fn state(&self) -> PlayState {
        self.state
    }

    /// Full passes finished since the last `play`.
    pub fn completed(&self) -> u32 {
        self.completed
    }

    /// Advance by `dt` seconds of wall-clock time.
    pub fn tick(&mut self, dt: f64) -> Tick {
        let mut tick = Tick::default();
        if self.state != PlayState::Playing || dt <= 0.0 {
            return tick;
        }

        self.acc += dt * self.rate;
        let frame_period = 1.0 / self.fps;
        while self.acc >= frame_period {
            self.acc -= frame_period;
            if self.frame + 1 < self.total {
                self.frame += 1;
                tick.events.push(TickEvent::Frame(self.frame));
                continue;
            }

            // Final frame consumed: one pass is complete.
            self.completed += 1;
            tick.events.push(TickEvent::Completed);
            if self.loops > 0 && self.completed >= self.loops as u32 {
                self.state = PlayState::Stopped;
                self.acc = 0.0;
                tick.finished = true;
                break;
            }
            self.frame = 0;
            tick.events.push(TickEvent::Frame(0));
        }

        tick
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/timeline.rs"]
mod tests;
