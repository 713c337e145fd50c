/// One full clear-and-redraw cycle of the drawing surface.
///
/// The viewer is event-driven: a frame is produced per gesture or load
/// transition, not per wall-clock tick, so the index is the only timebase.
/// It doubles as the ordering key for trace events.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Frame {
    /// 0-based draw-cycle index.
    pub index: u64,
}

impl Frame {
    pub fn new(index: u64) -> Self {
        Self { index }
    }

    pub fn next(self) -> Self {
        Self::new(self.index.wrapping_add(1))
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::Frame;

    #[test]
    fn next_advances_index() {
        let f0 = Frame::new(0);
        let f1 = f0.next();
        assert_eq!(f1.index, 1);
        assert_eq!(f1.next().index, 2);
    }

    #[test]
    fn wraps_instead_of_overflowing() {
        let f = Frame::new(u64::MAX);
        assert_eq!(f.next().index, 0);
    }
}
