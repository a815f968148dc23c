//! Bifurcation state: which branch of each nesting level runs on the
//! current pass.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

#[derive(Debug, Clone, Copy, Default)]
struct Frame {
    current: usize,
    count: usize,
}

/// Root or nested view over the frames shared by one test tree.
///
/// A fresh tracker is unusable until a first [`Tracker::next`]; every
/// other operation panics before that.
#[derive(Debug, Default)]
pub struct Tracker {
    frames: Option<Rc<RefCell<Vec<Frame>>>>,
    level: usize,
}

impl Tracker {
    pub fn new() -> Self {
        Tracker::default()
    }

    /// Start the first pass, or move to the next one. Returns `false` once
    /// every branch has run.
    pub fn next(&mut self) -> bool {
        let Some(frames) = &self.frames else {
            self.frames = Some(Rc::new(RefCell::new(vec![Frame::default()])));
            return true;
        };
        let mut frames = frames.borrow_mut();
        for i in (0..frames.len()).rev() {
            frames[i].current += 1;
            if frames[i].current < frames[i].count {
                for (j, frame) in frames.iter_mut().enumerate() {
                    frame.count = 0;
                    if j > i {
                        frame.current = 0;
                    }
                }
                trace!(target: "testpredicate", level = i, branch = frames[i].current, "next pass");
                return true;
            }
        }
        false
    }

    /// Tracker for the level nested under this one.
    pub fn sub_tracker(&self) -> Tracker {
        let frames = self
            .frames
            .as_ref()
            .unwrap_or_else(|| panic!("Tracker::sub_tracker() called before iteration started with Tracker::next()"));
        {
            let mut f = frames.borrow_mut();
            while f.len() < self.level + 2 {
                f.push(Frame::default());
            }
        }
        Tracker {
            frames: Some(Rc::clone(frames)),
            level: self.level + 1,
        }
    }

    /// Count one branch at this level and tell whether it is the one
    /// selected for the current pass.
    pub fn active(&self) -> bool {
        let frames = self
            .frames
            .as_ref()
            .unwrap_or_else(|| panic!("Tracker::active() called before iteration started with Tracker::next()"));
        let mut frames = frames.borrow_mut();
        let frame = &mut frames[self.level];
        let active = frame.count == frame.current;
        frame.count += 1;
        active
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
