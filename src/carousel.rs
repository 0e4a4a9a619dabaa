//! Hero carousel state machine.
//!
//! Tracks which photo is active, which cards render around it, and whether
//! autoplay is still running.
//!
//! ## Indexing
//!
//! The active index moves circularly: stepping past either end wraps around.
//! In coverflow presentation the two neighbors on each side are rendered too,
//! so with fewer than five photos the same photo can appear under more than
//! one role.
//!
//! ## Autoplay
//!
//! A [`Ticker`] fires every interval (3s by default) and each firing steps the
//! carousel forward. The first user interaction (pointer-down, touch-start,
//! wheel, or a completed swipe) stops autoplay for good; it never restarts.
//! Keyboard and button navigation move the carousel without stopping it.
//!
//! ## Empty carousels
//!
//! A carousel with no photos renders nothing and ignores every operation.

use crate::config::{CarouselConfig, Presentation};
use crate::types::PhotoItem;
use std::time::{Duration, Instant};

/// Step direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    fn offset(self) -> isize {
        match self {
            Direction::Backward => -1,
            Direction::Forward => 1,
        }
    }
}

/// The part a card plays in the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardRole {
    Prev2,
    Prev,
    Active,
    Next,
    Next2,
}

impl CardRole {
    /// Offset from the active index.
    pub fn offset(self) -> isize {
        match self {
            CardRole::Prev2 => -2,
            CardRole::Prev => -1,
            CardRole::Active => 0,
            CardRole::Next => 1,
            CardRole::Next2 => 2,
        }
    }

    /// CSS state class for the card.
    pub fn css_class(self) -> &'static str {
        match self {
            CardRole::Prev2 => "is-prev2",
            CardRole::Prev => "is-prev",
            CardRole::Active => "is-active",
            CardRole::Next => "is-next",
            CardRole::Next2 => "is-next2",
        }
    }
}

/// Coverflow roles, left to right.
const COVERFLOW_ROLES: [CardRole; 5] = [
    CardRole::Prev2,
    CardRole::Prev,
    CardRole::Active,
    CardRole::Next,
    CardRole::Next2,
];

/// A card to render in the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleCard<'a> {
    pub index: usize,
    pub item: &'a PhotoItem,
    pub role: CardRole,
}

/// User input the carousel reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    PointerDown,
    Wheel,
    TouchStart { x: f64 },
    TouchEnd { x: f64 },
    ArrowLeft,
    ArrowRight,
    /// A neighbor card was clicked.
    CardClick { index: usize },
}

/// Wraps `value` into `[0, n)`. `n` must be non-zero.
fn wrap(value: isize, n: usize) -> usize {
    value.rem_euclid(n as isize) as usize
}

/// Fixed-interval timer driven by caller-supplied instants.
///
/// `poll` reports how many intervals elapsed since the last firing, so a host
/// loop that wakes late still gets every tick it missed.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Instant,
}

impl Ticker {
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            next_due: start + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Number of ticks that fired at or before `now`.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let mut fired = 0;
        while now >= self.next_due && !self.interval.is_zero() {
            fired += 1;
            self.next_due += self.interval;
        }
        fired
    }
}

/// Horizontal swipe detection between touch-start and touch-end.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    start_x: Option<f64>,
}

impl SwipeTracker {
    pub fn begin(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    /// Horizontal travel since `begin`, clearing the gesture.
    ///
    /// `None` when no gesture is in progress.
    pub fn finish(&mut self, x: f64) -> Option<f64> {
        self.start_x.take().map(|start| x - start)
    }

    pub fn in_progress(&self) -> bool {
        self.start_x.is_some()
    }
}

/// Circular carousel over a fixed list of photos.
#[derive(Debug, Clone)]
pub struct Carousel {
    items: Vec<PhotoItem>,
    active: usize,
    autoplay: bool,
    presentation: Presentation,
    swipe_threshold: f64,
    swipe: SwipeTracker,
}

impl Carousel {
    pub fn new(items: Vec<PhotoItem>, config: &CarouselConfig) -> Self {
        Self {
            items,
            active: 0,
            autoplay: true,
            presentation: config.presentation,
            swipe_threshold: config.swipe_threshold,
            swipe: SwipeTracker::default(),
        }
    }

    pub fn items(&self) -> &[PhotoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_item(&self) -> Option<&PhotoItem> {
        self.items.get(self.active)
    }

    pub fn autoplay_enabled(&self) -> bool {
        self.autoplay
    }

    pub fn presentation(&self) -> Presentation {
        self.presentation
    }

    /// Step one position, wrapping at either end.
    pub fn advance(&mut self, direction: Direction) {
        if self.items.is_empty() {
            return;
        }
        self.active = wrap(self.active as isize + direction.offset(), self.items.len());
    }

    /// Make `index` active. Out-of-range indices are ignored.
    pub fn jump_to(&mut self, index: usize) {
        if index < self.items.len() {
            self.active = index;
        }
    }

    /// Cards for the current frame, left to right.
    pub fn visible_set(&self) -> Vec<VisibleCard<'_>> {
        if self.items.is_empty() {
            return Vec::new();
        }
        let roles: &[CardRole] = match self.presentation {
            Presentation::Single => &[CardRole::Active],
            Presentation::Coverflow => &COVERFLOW_ROLES,
        };
        let n = self.items.len();
        roles
            .iter()
            .map(|&role| {
                let index = wrap(self.active as isize + role.offset(), n);
                VisibleCard {
                    index,
                    item: &self.items[index],
                    role,
                }
            })
            .collect()
    }

    /// Stop autoplay for the rest of the session.
    pub fn stop_autoplay(&mut self) {
        if self.autoplay {
            log::debug!("carousel autoplay stopped by user interaction");
        }
        self.autoplay = false;
    }

    /// One autoplay tick: steps forward while autoplay is on.
    ///
    /// Returns whether the carousel moved.
    pub fn autoplay_tick(&mut self) -> bool {
        if !self.autoplay || self.items.is_empty() {
            return false;
        }
        self.advance(Direction::Forward);
        true
    }

    /// Fire every tick the ticker reports as due. Returns the number of steps.
    pub fn run_autoplay(&mut self, ticker: &mut Ticker, now: Instant) -> u32 {
        (0..ticker.poll(now)).filter(|_| self.autoplay_tick()).count() as u32
    }

    /// Evaluate a completed horizontal gesture.
    ///
    /// Travel beyond the swipe threshold navigates (rightward goes back,
    /// leftward goes forward) and stops autoplay. Shorter travel does nothing.
    pub fn swipe(&mut self, dx: f64) -> Option<Direction> {
        if dx.abs() <= self.swipe_threshold {
            return None;
        }
        let direction = if dx > 0.0 {
            Direction::Backward
        } else {
            Direction::Forward
        };
        self.stop_autoplay();
        self.advance(direction);
        Some(direction)
    }

    /// Route a user interaction.
    ///
    /// Returns the direction moved when the interaction navigated.
    pub fn handle(&mut self, interaction: Interaction) -> Option<Direction> {
        if self.items.is_empty() {
            return None;
        }
        match interaction {
            Interaction::PointerDown | Interaction::Wheel => {
                self.stop_autoplay();
                None
            }
            Interaction::TouchStart { x } => {
                self.stop_autoplay();
                self.swipe.begin(x);
                None
            }
            Interaction::TouchEnd { x } => {
                let dx = self.swipe.finish(x)?;
                self.swipe(dx)
            }
            Interaction::ArrowLeft => {
                self.advance(Direction::Backward);
                Some(Direction::Backward)
            }
            Interaction::ArrowRight => {
                self.advance(Direction::Forward);
                Some(Direction::Forward)
            }
            Interaction::CardClick { index } => {
                self.jump_to(index);
                None
            }
        }
    }
}
