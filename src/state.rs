#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Lifecycle {
    Constructed, // Selectors resolved, surface untouched
    Created,     // Structure built, listeners bound, autoplay armed if enabled
    Destroyed,   // Listeners and timer released; terminal
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    Next,
    Prev,
}

/// The current-slide index over a fixed number of slides.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct SlideCursor {
    current: usize,
    count: usize,
}

impl SlideCursor {
    /// `count` must be at least one; construction guarantees it.
    pub fn new(count: usize) -> Self {
        debug_assert!(count > 0, "a carousel needs at least one slide");
        Self { current: 0, count }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Jumps to `index` without clamping. Callers pass indices they derived
    /// from the slide set.
    pub fn go_to(&mut self, index: usize) {
        debug_assert!(index < self.count);
        self.current = index;
    }

    /// Steps one slide, wrapping at both ends.
    pub fn advance(&mut self, direction: Direction) {
        self.current = match direction {
            Direction::Next => (self.current + 1) % self.count,
            Direction::Prev => (self.current + self.count - 1) % self.count,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_wraps_to_first() {
        let mut cursor = SlideCursor::new(3);
        cursor.go_to(2);
        cursor.advance(Direction::Next);
        assert_eq!(cursor.current(), 0);
    }

    #[test]
    fn prev_wraps_to_last() {
        let mut cursor = SlideCursor::new(3);
        cursor.advance(Direction::Prev);
        assert_eq!(cursor.current(), 2);
    }

    #[test]
    fn single_slide_stays_put() {
        let mut cursor = SlideCursor::new(1);
        cursor.advance(Direction::Next);
        assert_eq!(cursor.current(), 0);
        cursor.advance(Direction::Prev);
        assert_eq!(cursor.current(), 0);
    }

    #[test]
    fn index_stays_in_range_over_any_walk() {
        let mut cursor = SlideCursor::new(4);
        let walk = [Direction::Prev, Direction::Prev, Direction::Next, Direction::Prev, Direction::Next];
        for step in walk.iter().cycle().take(50) {
            cursor.advance(*step);
            assert!(cursor.current() < cursor.count());
        }
    }
}
