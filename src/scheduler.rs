// Frame scheduling: "call me again when the display wants a new frame".
// `FrameLoop` re-arms itself through a `FrameScheduler` after every frame until
// cancelled. In the browser frames come from requestAnimationFrame; tests and
// headless hosts drive them by hand with `ManualScheduler`.

use crate::error::{js_message, ScheduleError};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

pub type FrameCallback = Rc<dyn Fn()>;

pub trait FrameScheduler {
    type Handle;

    /// Runs `callback` once, at the next frame.
    fn schedule(&self, callback: FrameCallback) -> Result<Self::Handle, ScheduleError>;

    /// Prevents a scheduled callback from running. Cancelling a handle whose
    /// callback already ran is a no-op.
    fn cancel(&self, handle: Self::Handle);
}

struct LoopState<S: FrameScheduler> {
    scheduler: S,
    step: RefCell<Box<dyn FnMut()>>,
    pending: RefCell<Option<S::Handle>>,
    stopped: Cell<bool>,
    frames: Cell<u64>,
}

/// A self re-arming frame loop. Dropping it cancels the pending frame.
pub struct FrameLoop<S: FrameScheduler> {
    state: Rc<LoopState<S>>,
}

impl<S: FrameScheduler + 'static> FrameLoop<S> {
    pub fn start<F>(scheduler: S, step: F) -> FrameLoop<S>
    where
        F: FnMut() + 'static,
    {
        let state = Rc::new(LoopState {
            scheduler,
            step: RefCell::new(Box::new(step)),
            pending: RefCell::new(None),
            stopped: Cell::new(false),
            frames: Cell::new(0),
        });
        arm(&state);
        FrameLoop { state }
    }

    pub fn cancel(&self) {
        self.state.stopped.set(true);
        let pending = self.state.pending.borrow_mut().take();
        if let Some(handle) = pending {
            self.state.scheduler.cancel(handle);
        }
    }

    pub fn is_running(&self) -> bool {
        !self.state.stopped.get()
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.state.frames.get()
    }
}

impl<S: FrameScheduler> Drop for FrameLoop<S> {
    fn drop(&mut self) {
        self.state.stopped.set(true);
        let pending = self.state.pending.borrow_mut().take();
        if let Some(handle) = pending {
            self.state.scheduler.cancel(handle);
        }
    }
}

fn arm<S: FrameScheduler + 'static>(state: &Rc<LoopState<S>>) {
    if state.stopped.get() {
        return;
    }
    let weak: Weak<LoopState<S>> = Rc::downgrade(state);
    let callback: FrameCallback = Rc::new(move || {
        let state = match weak.upgrade() {
            Some(state) => state,
            None => return,
        };
        state.pending.borrow_mut().take();
        if state.stopped.get() {
            return;
        }
        {
            let mut step = state.step.borrow_mut();
            (*step)();
        }
        state.frames.set(state.frames.get() + 1);
        arm(&state);
    });
    match state.scheduler.schedule(callback) {
        Ok(handle) => *state.pending.borrow_mut() = Some(handle),
        Err(err) => {
            log::warn!("frame loop stopped: {}", err);
            state.stopped.set(true);
        }
    }
}

/// Queues callbacks until the owner runs a frame. Clones share one queue,
/// so a test can keep a clone while the loop owns the other.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<Vec<(u64, FrameCallback)>>>,
    next_id: Rc<Cell<u64>>,
}

impl ManualScheduler {
    pub fn new() -> ManualScheduler {
        ManualScheduler::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Runs every callback queued before this call. Callbacks scheduled while
    /// running wait for the next frame. Returns how many ran.
    pub fn run_frame(&self) -> usize {
        let due = std::mem::take(&mut *self.queue.borrow_mut());
        let count = due.len();
        for (_, callback) in due {
            callback();
        }
        count
    }

    pub fn run_frames(&self, frames: usize) {
        for _ in 0..frames {
            self.run_frame();
        }
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u64;

    fn schedule(&self, callback: FrameCallback) -> Result<u64, ScheduleError> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.queue.borrow_mut().push((id, callback));
        Ok(id)
    }

    fn cancel(&self, handle: u64) {
        self.queue.borrow_mut().retain(|(id, _)| *id != handle);
    }
}

/// Schedules through `window.requestAnimationFrame`.
pub struct AnimationFrameScheduler {
    window: Window,
}

impl AnimationFrameScheduler {
    pub fn new(window: Window) -> AnimationFrameScheduler {
        AnimationFrameScheduler { window }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    type Handle = i32;

    fn schedule(&self, callback: FrameCallback) -> Result<i32, ScheduleError> {
        // The closure frees itself once called. A cancelled one is leaked,
        // which happens at most once per loop.
        let closure = Closure::once_into_js(move || callback());
        let id = self
            .window
            .request_animation_frame(closure.unchecked_ref())?;
        Ok(id)
    }

    fn cancel(&self, handle: i32) {
        if let Err(err) = self.window.cancel_animation_frame(handle) {
            log::warn!("cancelAnimationFrame failed: {}", js_message(&err));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_rearms_every_frame() {
        let scheduler = ManualScheduler::new();
        let count = Rc::new(Cell::new(0));
        let frame_loop = {
            let count = count.clone();
            FrameLoop::start(scheduler.clone(), move || count.set(count.get() + 1))
        };
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(count.get(), 0);

        scheduler.run_frames(5);
        assert_eq!(count.get(), 5);
        assert_eq!(frame_loop.frames(), 5);
        assert_eq!(scheduler.pending(), 1);
        assert!(frame_loop.is_running());
    }

    #[test]
    fn cancel_removes_pending_frame() {
        let scheduler = ManualScheduler::new();
        let count = Rc::new(Cell::new(0));
        let frame_loop = {
            let count = count.clone();
            FrameLoop::start(scheduler.clone(), move || count.set(count.get() + 1))
        };
        scheduler.run_frames(2);
        frame_loop.cancel();
        assert!(!frame_loop.is_running());
        assert_eq!(scheduler.pending(), 0);

        scheduler.run_frames(3);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn dropping_the_loop_cancels_it() {
        let scheduler = ManualScheduler::new();
        let count = Rc::new(Cell::new(0));
        {
            let count = count.clone();
            let _frame_loop =
                FrameLoop::start(scheduler.clone(), move || count.set(count.get() + 1));
            scheduler.run_frame();
        }
        assert_eq!(scheduler.pending(), 0);
        scheduler.run_frames(3);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn frames_scheduled_during_a_frame_wait_for_the_next() {
        let scheduler = ManualScheduler::new();
        let _frame_loop = FrameLoop::start(scheduler.clone(), || {});
        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn cancelling_one_handle_keeps_the_others() {
        let scheduler = ManualScheduler::new();
        let ran = Rc::new(Cell::new(0));
        let first = {
            let ran = ran.clone();
            scheduler
                .schedule(Rc::new(move || ran.set(ran.get() + 1)))
                .unwrap()
        };
        {
            let ran = ran.clone();
            scheduler
                .schedule(Rc::new(move || ran.set(ran.get() + 10)))
                .unwrap();
        }
        scheduler.cancel(first);
        scheduler.cancel(first);
        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(ran.get(), 10);
    }
}
