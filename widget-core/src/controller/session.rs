//! Suggestion session: the open/closed state and selection cursor over
//! the current autocomplete candidate list.

use crate::model::CitySuggestion;

/// `Closed`, or `Open` with the current batch and the keyboard cursor.
///
/// Invariant: the cursor, when `Some(i)`, always satisfies `i < len`.
/// Closing or replacing the batch resets it to `None` (the "no selection"
/// position). An empty batch still opens the session — the view renders a
/// placeholder row — but exposes zero selectable items.
#[derive(Debug, Default)]
pub enum SuggestionSession {
    #[default]
    Closed,
    Open {
        suggestions: Vec<CitySuggestion>,
        cursor: Option<usize>,
    },
}

impl SuggestionSession {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// Replace the batch and open the session with no selection.
    pub fn open(&mut self, suggestions: Vec<CitySuggestion>) {
        *self = Self::Open {
            suggestions,
            cursor: None,
        };
    }

    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    pub fn suggestions(&self) -> &[CitySuggestion] {
        match self {
            Self::Closed => &[],
            Self::Open { suggestions, .. } => suggestions,
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        match self {
            Self::Closed => None,
            Self::Open { cursor, .. } => *cursor,
        }
    }

    /// Currently highlighted suggestion, if any.
    pub fn selected(&self) -> Option<&CitySuggestion> {
        match self {
            Self::Closed => None,
            Self::Open {
                suggestions,
                cursor,
            } => cursor.and_then(|i| suggestions.get(i)),
        }
    }

    /// Suggestion at `index` (a click target). `None` for the
    /// placeholder row of an empty batch.
    pub fn get(&self, index: usize) -> Option<&CitySuggestion> {
        self.suggestions().get(index)
    }

    /// Move the cursor toward the last item, clamped there. Returns true
    /// when the cursor changed.
    pub fn move_down(&mut self) -> bool {
        let Self::Open {
            suggestions,
            cursor,
        } = self
        else {
            return false;
        };
        if suggestions.is_empty() {
            return false;
        }

        let next = match *cursor {
            None => 0,
            Some(i) => (i + 1).min(suggestions.len() - 1),
        };
        let changed = *cursor != Some(next);
        *cursor = Some(next);
        changed
    }

    /// Move the cursor toward "no selection", clamped there. Returns true
    /// when the cursor changed.
    pub fn move_up(&mut self) -> bool {
        let Self::Open { cursor, .. } = self else {
            return false;
        };

        let next = match *cursor {
            None | Some(0) => None,
            Some(i) => Some(i - 1),
        };
        let changed = *cursor != next;
        *cursor = next;
        changed
    }

    /// Drop the selection without closing (a fresh keystroke while the
    /// previous batch is still showing).
    pub fn reset_cursor(&mut self) {
        if let Self::Open { cursor, .. } = self {
            *cursor = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(name: &str) -> CitySuggestion {
        CitySuggestion {
            name: name.to_string(),
            state: None,
            country: "GB".to_string(),
        }
    }

    fn open_session(n: usize) -> SuggestionSession {
        let mut session = SuggestionSession::default();
        session.open((0..n).map(|i| city(&format!("City{i}"))).collect());
        session
    }

    #[test]
    fn opens_with_no_selection() {
        let session = open_session(3);
        assert!(session.is_open());
        assert_eq!(session.cursor(), None);
        assert!(session.selected().is_none());
    }

    #[test]
    fn cursor_clamps_at_both_ends() {
        let mut session = open_session(2);

        assert!(session.move_down());
        assert_eq!(session.cursor(), Some(0));
        assert!(session.move_down());
        assert_eq!(session.cursor(), Some(1));
        // Down at the last item stays put.
        assert!(!session.move_down());
        assert_eq!(session.cursor(), Some(1));

        assert!(session.move_up());
        assert!(session.move_up());
        assert_eq!(session.cursor(), None);
        // Up at "no selection" stays put.
        assert!(!session.move_up());
        assert_eq!(session.cursor(), None);
    }

    #[test]
    fn empty_batch_has_no_selectable_items() {
        let mut session = open_session(0);

        assert!(session.is_open());
        assert!(!session.move_down());
        assert_eq!(session.cursor(), None);
        assert_eq!(session.get(0), None);
    }

    #[test]
    fn close_resets_cursor() {
        let mut session = open_session(3);
        session.move_down();
        session.close();

        assert!(!session.is_open());
        assert_eq!(session.cursor(), None);
        assert!(session.suggestions().is_empty());
    }

    #[test]
    fn replacing_batch_resets_cursor() {
        let mut session = open_session(3);
        session.move_down();
        session.move_down();

        session.open(vec![city("Other")]);
        assert_eq!(session.cursor(), None);
        assert_eq!(session.suggestions().len(), 1);
    }

    #[test]
    fn moves_are_ignored_while_closed() {
        let mut session = SuggestionSession::default();
        assert!(!session.move_down());
        assert!(!session.move_up());
        assert!(session.selected().is_none());
    }

    #[test]
    fn selected_follows_cursor() {
        let mut session = open_session(2);
        session.move_down();
        session.move_down();

        assert_eq!(session.selected().map(|s| s.name.as_str()), Some("City1"));

        session.reset_cursor();
        assert!(session.selected().is_none());
    }
}
