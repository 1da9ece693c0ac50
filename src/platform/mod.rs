//! Platform layer: the render loop thread and the input handoff
//!
//! The loop owns nothing but handles. All mutable demo state sits behind one
//! mutex that the loop takes once per frame and input producers take once per
//! event. A flag stops the loop between frames, never mid-frame.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::renderer::{CircleInstance, draw_list};
use crate::sim::{DemoState, Orientation, TickStats, tick};

/// Source of wall-clock milliseconds for the loop
pub trait FrameClock: Send + 'static {
    fn now_millis(&self) -> u64;
}

/// Unix epoch milliseconds from the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl FrameClock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Clock that advances a fixed step on every read (headless runs, tests)
#[derive(Debug)]
pub struct SteppedClock {
    next: AtomicU64,
    step_millis: u64,
}

impl SteppedClock {
    pub fn new(start_millis: u64, step_millis: u64) -> Self {
        Self {
            next: AtomicU64::new(start_millis),
            step_millis,
        }
    }
}

impl FrameClock for SteppedClock {
    fn now_millis(&self) -> u64 {
        self.next.fetch_add(self.step_millis, Ordering::Relaxed)
    }
}

/// Receives each finished frame
pub trait FrameSink: Send + 'static {
    fn present(&mut self, frame: u64, circles: &[CircleInstance], stats: &TickStats);
}

impl<F> FrameSink for F
where
    F: FnMut(u64, &[CircleInstance], &TickStats) + Send + 'static,
{
    fn present(&mut self, frame: u64, circles: &[CircleInstance], stats: &TickStats) {
        self(frame, circles, stats)
    }
}

/// Handle to the demo state shared by the loop and input producers
#[derive(Debug, Clone)]
pub struct SharedState {
    inner: Arc<Mutex<DemoState>>,
}

impl SharedState {
    pub fn new(state: DemoState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DemoState> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            log::warn!("Demo state lock was poisoned, continuing with last state");
            poisoned.into_inner()
        })
    }

    /// Run `f` with exclusive access to the state
    pub fn with<R>(&self, f: impl FnOnce(&mut DemoState) -> R) -> R {
        let mut guard = self.lock();
        f(&mut guard)
    }

    pub fn on_surface_resize(&self, width: f32, height: f32) {
        self.with(|s| s.on_surface_resize(width, height));
    }

    pub fn on_touch(&self, x: f32, y: f32) -> usize {
        self.with(|s| s.on_touch(x, y))
    }

    pub fn on_orientation(&self, orientation: Option<Orientation>) {
        self.with(|s| s.on_orientation(orientation));
    }

    /// One simulation step plus draw list, under a single lock
    pub fn frame(&self, now_millis: u64) -> (u64, TickStats, Vec<CircleInstance>) {
        self.with(|s| {
            let stats = tick(s, now_millis);
            (s.frame, stats, draw_list(s))
        })
    }
}

/// The dedicated simulation/render thread
#[derive(Debug)]
pub struct RenderLoop {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<u64>>,
}

impl RenderLoop {
    /// Start looping as fast as the sink accepts frames
    ///
    /// With `max_frames` the loop also ends by itself after that many frames.
    pub fn spawn<C, S>(
        shared: SharedState,
        clock: C,
        mut sink: S,
        max_frames: Option<u64>,
    ) -> std::io::Result<Self>
    where
        C: FrameClock,
        S: FrameSink,
    {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let handle = thread::Builder::new()
            .name("ball-clock-render".into())
            .spawn(move || {
                log::info!("Render loop started");
                let mut frames = 0u64;
                while flag.load(Ordering::Acquire) {
                    let (frame, stats, circles) = shared.frame(clock.now_millis());
                    sink.present(frame, &circles, &stats);
                    frames += 1;
                    if max_frames.is_some_and(|max| frames >= max) {
                        break;
                    }
                }
                flag.store(false, Ordering::Release);
                log::info!("Render loop stopped after {} frames", frames);
                frames
            })?;

        Ok(Self {
            running,
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Ask the loop to finish its current frame and exit
    pub fn request_stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Stop and wait for the thread; returns the number of frames it ran
    pub fn stop(mut self) -> u64 {
        self.request_stop();
        self.join()
    }

    /// Wait for the loop to end by itself (requires `max_frames`)
    pub fn wait(mut self) -> u64 {
        self.join()
    }

    fn join(&mut self) -> u64 {
        match self.handle.take().map(JoinHandle::join) {
            Some(Ok(frames)) => frames,
            Some(Err(_)) => {
                log::error!("Render loop thread panicked");
                0
            }
            None => 0,
        }
    }
}

impl Drop for RenderLoop {
    fn drop(&mut self) {
        self.request_stop();
        self.join();
    }
}
