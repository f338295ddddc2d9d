use std::time::{Duration, Instant};

/// How long a blurred input keeps its suggestions, so a click in flight still lands.
pub const SUGGESTION_BLUR_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone)]
pub struct Autocomplete {
    names: Vec<String>,
    filtered: Vec<usize>,
    selected: Option<usize>,
    visible: bool,
    hide_at: Option<Instant>,
}

impl Autocomplete {
    pub fn new(names: Vec<String>) -> Self {
        Self {
            names,
            filtered: Vec::new(),
            selected: None,
            visible: false,
            hide_at: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn suggestions(&self) -> Vec<&str> {
        self.filtered
            .iter()
            .filter_map(|idx| self.names.get(*idx).map(String::as_str))
            .collect()
    }

    /// Re-filters on every keystroke; case-insensitive substring match.
    pub fn on_input(&mut self, value: &str) {
        let needle = value.trim().to_lowercase();
        if needle.is_empty() {
            self.hide();
            return;
        }
        self.filtered = self
            .names
            .iter()
            .enumerate()
            .filter(|(_, name)| name.to_lowercase().contains(&needle))
            .map(|(idx, _)| idx)
            .collect();
        if self.filtered.is_empty() {
            self.hide();
        } else {
            self.visible = true;
            self.selected = None;
            self.hide_at = None;
        }
    }

    pub fn move_down(&mut self) {
        if !self.visible || self.filtered.is_empty() {
            return;
        }
        let last = self.filtered.len() - 1;
        self.selected = Some(match self.selected {
            None => 0,
            Some(idx) => (idx + 1).min(last),
        });
    }

    pub fn move_up(&mut self) {
        if !self.visible {
            return;
        }
        self.selected = match self.selected {
            None | Some(0) => None,
            Some(idx) => Some(idx - 1),
        };
    }

    /// Enter while the list is open. Returns the highlighted name, if any.
    pub fn confirm(&mut self) -> Option<String> {
        if !self.visible {
            return None;
        }
        let picked = self.selected.and_then(|idx| self.pick(idx));
        if picked.is_some() {
            self.hide();
        }
        picked
    }

    pub fn click(&mut self, index: usize) -> Option<String> {
        if !self.visible {
            return None;
        }
        let picked = self.pick(index);
        self.hide();
        picked
    }

    pub fn escape(&mut self) {
        self.hide();
    }

    pub fn click_outside(&mut self) {
        self.hide();
    }

    pub fn blur(&mut self, now: Instant) {
        if self.visible {
            self.hide_at = Some(now + SUGGESTION_BLUR_DELAY);
        }
    }

    /// Applies a pending blur once its delay has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(at) = self.hide_at
            && now >= at
        {
            self.hide();
        }
    }

    pub fn clear(&mut self) {
        self.filtered.clear();
        self.hide();
    }

    fn pick(&self, index: usize) -> Option<String> {
        self.filtered
            .get(index)
            .and_then(|idx| self.names.get(*idx))
            .cloned()
    }

    fn hide(&mut self) {
        self.visible = false;
        self.selected = None;
        self.hide_at = None;
    }
}
