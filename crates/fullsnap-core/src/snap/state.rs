//! Page index state

/// Which way a transition moves through the panel sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward higher page indices (scrolling down)
    Forward,
    /// Toward lower page indices (scrolling up)
    Backward,
}

/// A request for one transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionRequest {
    pub direction: Direction,
    pub steps: usize,
    /// Overrides the configured speed for this transition
    pub speed: Option<f64>,
}

impl TransitionRequest {
    /// One page in `direction` at the configured speed
    pub fn step(direction: Direction) -> Self {
        Self {
            direction,
            steps: 1,
            speed: None,
        }
    }

    /// Steps and direction that lead from `current` to `page`
    pub fn to_page(current: usize, page: i64, speed: Option<f64>) -> Self {
        let current = current as i64;
        Self {
            direction: if page > current {
                Direction::Forward
            } else {
                Direction::Backward
            },
            steps: page.abs_diff(current) as usize,
            speed,
        }
    }
}

/// Page count, settled page, and the origin of an unresolved touch gesture
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageState {
    pub(crate) page_count: usize,
    pub(crate) current: usize,
    pub(crate) touch_origin: Option<f64>,
}

impl PageState {
    pub fn new(page_count: usize) -> Self {
        Self {
            page_count,
            ..Default::default()
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Re-derive the page count. The current index is left alone; the next
    /// transition clamps it.
    pub fn set_page_count(&mut self, page_count: usize) {
        self.page_count = page_count;
    }

    /// Target page for a request, clamped to [0, N-1]; `None` when there
    /// are no pages
    pub fn target_for(&self, direction: Direction, steps: usize) -> Option<usize> {
        let last = self.page_count.checked_sub(1)?;
        let target = match direction {
            Direction::Forward => self.current.saturating_add(steps),
            Direction::Backward => self.current.saturating_sub(steps),
        };
        Some(target.min(last))
    }

    /// Record a touch position; returns the gesture direction when this
    /// completes a pair
    pub fn track_touch(&mut self, client_y: f64) -> Option<Direction> {
        match self.touch_origin.take() {
            Some(origin) if client_y < origin => Some(Direction::Forward),
            Some(_) => Some(Direction::Backward),
            None => {
                self.touch_origin = Some(client_y);
                None
            }
        }
    }
}
