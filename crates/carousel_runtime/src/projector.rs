//! Visible-window and pagination projection for multi-slide display.
//!
//! Everything here is a pure function of `(current_index, item_count, window_size)` and is
//! recomputed from scratch whenever the index changes. Positions wrap circularly, so a window
//! that starts near the end of the sequence continues at the beginning.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Slides on screen plus page-indicator state for a given position.
pub struct WindowProjection {
    /// Visible positions in on-screen order, starting at the current index.
    pub visible: Vec<usize>,
    /// Window size the projection was computed with.
    pub window_size: usize,
    /// `ceil(item_count / window_size)`.
    pub page_count: usize,
    /// `floor(current_index / window_size)`.
    pub current_page: usize,
}

impl WindowProjection {
    pub fn contains(&self, position: usize) -> bool {
        self.visible.contains(&position)
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn is_current_page(&self, page: usize) -> bool {
        !self.visible.is_empty() && self.current_page == page
    }
}

/// Forward circular distance from `current` to `position`.
///
/// Doubles as the on-screen order of a slide in strip mode.
pub fn forward_distance(position: usize, current: usize, item_count: usize) -> usize {
    (position % item_count + item_count - current % item_count) % item_count
}

pub fn is_visible(position: usize, current: usize, item_count: usize, window_size: usize) -> bool {
    if item_count == 0 || position >= item_count {
        return false;
    }
    forward_distance(position, current, item_count) < window_size
}

pub fn visible_positions(current: usize, item_count: usize, window_size: usize) -> Vec<usize> {
    if item_count == 0 {
        return Vec::new();
    }
    (0..window_size.min(item_count))
        .map(|offset| (current + offset) % item_count)
        .collect()
}

pub fn page_count(item_count: usize, window_size: usize) -> usize {
    if window_size == 0 {
        return 0;
    }
    item_count.div_ceil(window_size)
}

pub fn current_page(current: usize, window_size: usize) -> usize {
    if window_size == 0 {
        return 0;
    }
    current / window_size
}

/// First position of `page`; jumping to a page means jumping to this index.
pub fn page_start(page: usize, window_size: usize) -> usize {
    page.saturating_mul(window_size)
}

pub fn project_window(current: usize, item_count: usize, window_size: usize) -> WindowProjection {
    if item_count == 0 || window_size == 0 {
        return WindowProjection {
            window_size,
            ..WindowProjection::default()
        };
    }

    let current = current % item_count;
    WindowProjection {
        visible: visible_positions(current, item_count, window_size),
        window_size,
        page_count: page_count(item_count, window_size),
        current_page: current_page(current, window_size),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn window_wraps_past_the_end_of_the_sequence() {
        let projection = project_window(8, 10, 4);

        assert_eq!(projection.visible, vec![8, 9, 0, 1]);
        assert_eq!(projection.current_page, 2);
        assert_eq!(projection.page_count, 3);
    }

    #[test]
    fn visibility_predicate_agrees_with_visible_set() {
        for n in 1..=9 {
            for current in 0..n {
                let projection = project_window(current, n, 4);
                for position in 0..n {
                    assert_eq!(
                        is_visible(position, current, n, 4),
                        projection.contains(position),
                        "n={n} current={current} position={position}"
                    );
                }
            }
        }
    }

    #[test]
    fn short_sequences_show_every_item_once() {
        let projection = project_window(1, 3, 4);
        assert_eq!(projection.visible, vec![1, 2, 0]);
        assert_eq!(projection.page_count, 1);
        assert_eq!(projection.current_page, 0);
    }

    #[test]
    fn empty_sequence_projects_nothing() {
        let projection = project_window(0, 0, 4);
        assert!(projection.is_empty());
        assert_eq!(projection.page_count, 0);
        assert!(!projection.is_current_page(0));
        assert!(!is_visible(0, 0, 0, 4));
    }

    #[test]
    fn single_slide_window_tracks_the_current_index() {
        let projection = project_window(3, 5, 1);
        assert_eq!(projection.visible, vec![3]);
        assert_eq!(projection.page_count, 5);
        assert_eq!(projection.current_page, 3);
    }

    #[test]
    fn projection_is_idempotent() {
        assert_eq!(project_window(6, 11, 4), project_window(6, 11, 4));
    }

    #[test]
    fn pages_start_at_window_multiples() {
        assert_eq!(page_start(0, 4), 0);
        assert_eq!(page_start(2, 4), 8);
        assert_eq!(page_count(8, 4), 2);
        assert_eq!(page_count(9, 4), 3);
    }

    #[test]
    fn out_of_range_positions_are_never_visible() {
        assert!(!is_visible(10, 8, 10, 4));
    }
}
