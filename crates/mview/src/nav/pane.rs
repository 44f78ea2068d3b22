/// One selectable list in the hierarchy.
///
/// Labels need not be unique. The selection, when present, always indexes
/// into `items`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pane {
    items: Vec<String>,
    selected: Option<usize>,
    /// Item count when the selection was last set.
    len_at_select: usize,
}

impl Pane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.selected.map(|i| self.items[i].as_str())
    }

    pub fn append(&mut self, label: impl Into<String>) {
        self.items.push(label.into());
    }

    /// Drop every item and the selection. Never notifies.
    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = None;
        self.len_at_select = 0;
    }

    /// Set the selection; `None` deselects and is legal on an empty pane.
    ///
    /// Returns `true` when a change notification must fire: the stored index
    /// differs, or it is the same index but the items changed size since it
    /// was last set. Out-of-range indexes are ignored.
    pub fn select(&mut self, index: Option<usize>) -> bool {
        if let Some(i) = index {
            if i >= self.items.len() {
                return false;
            }
        }

        let changed = self.selected != index || self.len_at_select != self.items.len();
        self.selected = index;
        self.len_at_select = self.items.len();
        changed
    }

    /// Move the selection by `delta`, clamped to the item range.
    ///
    /// With nothing selected the first item becomes selected. Returns `true`
    /// if the selection moved.
    pub fn move_selection(&mut self, delta: isize) -> bool {
        if self.items.is_empty() || delta == 0 {
            return false;
        }

        let last = self.items.len() - 1;
        let target = match self.selected {
            None => 0,
            Some(cur) => cur.saturating_add_signed(delta).min(last),
        };

        if self.selected == Some(target) {
            return false;
        }
        self.select(Some(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pane(items: &[&str]) -> Pane {
        let mut p = Pane::new();
        for item in items {
            p.append(*item);
        }
        p
    }

    #[test]
    fn test_select_bounds() {
        let mut p = pane(&["a", "b"]);
        assert!(p.select(Some(1)));
        assert_eq!(p.selected_item(), Some("b"));

        assert!(!p.select(Some(2)));
        assert_eq!(p.selected(), Some(1));

        assert!(p.select(None));
        assert_eq!(p.selected(), None);
    }

    #[test]
    fn test_deselect_on_empty_pane_is_legal() {
        let mut p = Pane::new();
        assert!(!p.select(None));
        assert_eq!(p.selected(), None);
    }

    #[test]
    fn test_reselect_same_index_notifies_only_after_resize() {
        let mut p = pane(&["a", "b"]);
        assert!(p.select(Some(0)));
        assert!(!p.select(Some(0)));

        p.append("c");
        assert!(p.select(Some(0)));
        assert!(!p.select(Some(0)));
    }

    #[test]
    fn test_clear_drops_selection() {
        let mut p = pane(&["a", "b"]);
        p.select(Some(1));
        p.clear();
        assert!(p.is_empty());
        assert_eq!(p.selected(), None);
    }

    #[test]
    fn test_duplicate_labels_allowed() {
        let p = pane(&["x", "x"]);
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn test_move_selection_clamps_without_wrapping() {
        let mut p = pane(&["a", "b", "c"]);

        // First move from "none" lands on the first item.
        assert!(p.move_selection(1));
        assert_eq!(p.selected(), Some(0));

        assert!(!p.move_selection(-1));
        assert_eq!(p.selected(), Some(0));

        assert!(p.move_selection(1));
        assert!(p.move_selection(1));
        assert!(!p.move_selection(1));
        assert_eq!(p.selected(), Some(2));

        assert!(p.move_selection(-10));
        assert_eq!(p.selected(), Some(0));
    }

    #[test]
    fn test_move_selection_on_empty_pane() {
        let mut p = Pane::new();
        assert!(!p.move_selection(1));
        assert!(!p.move_selection(-1));
        assert_eq!(p.selected(), None);
    }

    #[test]
    fn test_random_moves_stay_in_bounds() {
        // Deterministic pseudo-random walk.
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        for n in 1..12usize {
            let labels: Vec<String> = (0..n).map(|i| i.to_string()).collect();
            let mut p = Pane::new();
            for l in &labels {
                p.append(l.clone());
            }
            for _ in 0..200 {
                seed ^= seed << 13;
                seed ^= seed >> 7;
                seed ^= seed << 17;
                let delta = if seed % 2 == 0 { 1 } else { -1 };
                p.move_selection(delta);
                let sel = p.selected().unwrap();
                assert!(sel < n);
            }
        }
    }
}
