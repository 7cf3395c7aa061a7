use crate::{LogLine, ViewerEvent};

/// The render target: every line shown so far, in arrival order.
///
/// Only ever grows, except for [`View::replace_with`] which swaps
/// the whole content for a single line. There is no size limit.
#[derive(Debug, Default)]
pub struct View {
    lines: Vec<LogLine>,
    generation: u64,
}

impl View {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, line: LogLine) {
        self.lines.push(line);
    }

    pub fn replace_with(&mut self, line: LogLine) {
        self.lines.clear();
        self.lines.push(line);
        self.generation += 1;
    }

    /// Applies an event, returning whether the visible lines changed.
    pub fn apply(&mut self, event: ViewerEvent) -> bool {
        match event {
            ViewerEvent::Append(line) => {
                self.append(line);
                true
            }
            ViewerEvent::Replace(line) => {
                self.replace_with(line);
                true
            }
            ViewerEvent::SessionOpened(_) | ViewerEvent::SessionEnded { .. } => false,
        }
    }

    #[must_use]
    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Bumped every time the view is replaced.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
