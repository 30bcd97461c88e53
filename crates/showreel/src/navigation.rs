//! Slide navigation: clamped index arithmetic plus the keyboard and swipe
//! adapters that feed it.

use crate::constants::SWIPE_THRESHOLD;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Next,
    Previous,
    First,
    Last,
    GoTo(usize),
}

/// Index into a deck of `len` slides. Never leaves `[0, len - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    current: usize,
    len: usize,
}

impl Navigator {
    pub fn new(len: usize) -> Self {
        Self { current: 0, len }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.len
    }

    fn last_index(&self) -> usize {
        self.len.saturating_sub(1)
    }

    /// Target index of `cmd` without applying it.
    pub fn target(&self, cmd: NavCommand) -> usize {
        match cmd {
            NavCommand::Next => (self.current + 1).min(self.last_index()),
            NavCommand::Previous => self.current.saturating_sub(1),
            NavCommand::First => 0,
            NavCommand::Last => self.last_index(),
            NavCommand::GoTo(i) => i.min(self.last_index()),
        }
    }

    /// Returns whether the index changed.
    pub fn apply(&mut self, cmd: NavCommand) -> bool {
        let target = self.target(cmd);
        let changed = target != self.current;
        self.current = target;
        changed
    }
}

/// Physical keys that navigate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,
    Space,
    Home,
    End,
}

impl NavKey {
    pub fn command(self) -> NavCommand {
        match self {
            Self::ArrowLeft | Self::ArrowUp => NavCommand::Previous,
            Self::ArrowRight | Self::ArrowDown | Self::Space => NavCommand::Next,
            Self::Home => NavCommand::First,
            Self::End => NavCommand::Last,
        }
    }
}

/// Turns a horizontal drag into a navigation step. Only the X axis counts.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    start_x: Option<f32>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_tracking(&self) -> bool {
        self.start_x.is_some()
    }

    pub fn begin(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    pub fn cancel(&mut self) {
        self.start_x = None;
    }

    /// Finish the gesture. Dragging left past the threshold goes forward,
    /// dragging right goes back.
    pub fn end(&mut self, x: f32) -> Option<NavCommand> {
        let start = self.start_x.take()?;
        let dx = start - x;
        if dx.abs() <= SWIPE_THRESHOLD {
            return None;
        }
        Some(if dx > 0.0 {
            NavCommand::Next
        } else {
            NavCommand::Previous
        })
    }
}
