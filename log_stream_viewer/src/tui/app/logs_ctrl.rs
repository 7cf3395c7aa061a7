// Logs pane scrolling

use lsv_core::LogLine;

use crate::tui::app::App;

/// Rows a line takes in the logs pane, one per `\n`-separated part.
pub fn line_rows(line: &LogLine) -> usize {
    line.text.split('\n').count()
}

impl App {
    pub fn total_log_rows(&self) -> usize {
        self.log_rows
    }

    fn max_logs_offset(&self) -> usize {
        self.total_log_rows().saturating_sub(self.logs_visible_lines)
    }

    /// First and one-past-last row currently on screen.
    pub fn visible_log_rows(&self) -> (usize, usize) {
        let total = self.total_log_rows();
        let offset = self.logs_offset.min(self.max_logs_offset());
        let end = total - offset;
        (end.saturating_sub(self.logs_visible_lines), end)
    }

    pub fn scroll_logs_up(&mut self, rows: usize) {
        self.logs_auto_follow = false;
        self.logs_offset = (self.logs_offset + rows).min(self.max_logs_offset());
    }

    pub fn scroll_logs_down(&mut self, rows: usize) {
        self.logs_offset = self.logs_offset.saturating_sub(rows);
        if self.logs_offset == 0 {
            self.logs_auto_follow = true;
        }
    }

    pub fn scroll_logs_top(&mut self) {
        self.logs_auto_follow = false;
        self.logs_offset = self.max_logs_offset();
    }

    pub fn scroll_logs_bottom(&mut self) {
        self.logs_offset = 0;
        self.logs_auto_follow = true;
    }

    pub fn toggle_follow(&mut self) {
        if self.logs_auto_follow {
            self.logs_auto_follow = false;
            self.status_message = "Follow paused. Press 'f' to resume.".to_owned();
        } else {
            self.scroll_logs_bottom();
            self.status_message = "Following new logs".to_owned();
        }
    }

    /// Called before `line` is appended: when not following,
    /// the rows already on screen stay put.
    pub(super) fn keep_scroll_position(&mut self, line: &LogLine) {
        let rows = line_rows(line);
        self.log_rows += rows;
        if !self.logs_auto_follow {
            self.logs_offset += rows;
        }
    }

    /// Called after the view was replaced: start over at the bottom.
    pub(super) fn reset_log_rows(&mut self) {
        self.view_generation = self.view.generation();
        self.log_rows = self.view.lines().iter().map(line_rows).sum();
        self.scroll_logs_bottom();
    }
}
