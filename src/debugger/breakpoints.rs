use std::collections::HashSet;

/// Absolute positions at which a run should pause. Add-only: this design has
/// no command that removes a breakpoint.
#[derive(Debug, Default)]
pub struct Breakpoints {
    points: HashSet<usize>,
}

impl Breakpoints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, position: usize) {
        if self.points.insert(position) {
            log::debug!("breakpoint set at position {}", position);
        }
    }

    pub fn contains(&self, position: usize) -> bool {
        self.points.contains(&position)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
