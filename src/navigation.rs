//! Page navigation - which section of the paper is showing
//!
//! The navigator is a small state machine over the six pages. Direction is
//! always derived from page order, never supplied by the caller, and each
//! real move opens a transition window that is closed with `settle`.

/// A section of the paper, in reading order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PageId {
    #[default]
    Front,
    About,
    Projects,
    Experience,
    Writing,
    Contact,
}

impl PageId {
    /// All pages in reading order
    pub const ALL: [PageId; 6] = [
        PageId::Front,
        PageId::About,
        PageId::Projects,
        PageId::Experience,
        PageId::Writing,
        PageId::Contact,
    ];

    pub fn index(&self) -> usize {
        match self {
            PageId::Front => 0,
            PageId::About => 1,
            PageId::Projects => 2,
            PageId::Experience => 3,
            PageId::Writing => 4,
            PageId::Contact => 5,
        }
    }

    pub fn from_index(index: usize) -> Option<PageId> {
        Self::ALL.get(index).copied()
    }

    pub fn next(&self) -> Option<PageId> {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(&self) -> Option<PageId> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PageId::Front => "Front Page",
            PageId::About => "About",
            PageId::Projects => "Works",
            PageId::Experience => "Record",
            PageId::Writing => "Writing",
            PageId::Contact => "Dispatch",
        }
    }

    pub fn numeral(&self) -> &'static str {
        match self {
            PageId::Front => "I",
            PageId::About => "II",
            PageId::Projects => "III",
            PageId::Experience => "IV",
            PageId::Writing => "V",
            PageId::Contact => "VI",
        }
    }
}

/// Which way the paper turns
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    fn between(from: PageId, to: PageId) -> Direction {
        if to.index() > from.index() {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }
}

/// A page switch that actually happened
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: PageId,
    pub to: PageId,
    pub direction: Direction,
    /// Pass back to `PageNavigator::settle` when the switch has finished
    pub ticket: u64,
}

/// Owned navigation state for the paper
#[derive(Clone, Debug, Default)]
pub struct PageNavigator {
    current: PageId,
    previous: Option<PageId>,
    direction: Direction,
    pending: bool,
    last_ticket: u64,
}

impl PageNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> PageId {
        self.current
    }

    pub fn previous(&self) -> Option<PageId> {
        self.previous
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn has_next(&self) -> bool {
        self.current.next().is_some()
    }

    pub fn has_prev(&self) -> bool {
        self.current.prev().is_some()
    }

    /// One-based position, e.g. `3/6`
    pub fn position(&self) -> String {
        format!("{}/{}", self.current.index() + 1, PageId::ALL.len())
    }

    /// Switch to `target`. Returns `None` when already there.
    pub fn go_to(&mut self, target: PageId) -> Option<Transition> {
        if target == self.current {
            return None;
        }

        let direction = Direction::between(self.current, target);
        let from = self.current;

        self.direction = direction;
        self.previous = Some(from);
        self.current = target;
        self.pending = true;
        self.last_ticket += 1;

        tracing::debug!(from = ?from, to = ?target, direction = ?direction, "Page transition");

        Some(Transition {
            from,
            to: target,
            direction,
            ticket: self.last_ticket,
        })
    }

    pub fn go_next(&mut self) -> Option<Transition> {
        self.current.next().and_then(|page| self.go_to(page))
    }

    pub fn go_prev(&mut self) -> Option<Transition> {
        self.current.prev().and_then(|page| self.go_to(page))
    }

    /// Close the transition window opened by the transition holding `ticket`.
    /// Stale tickets are ignored so the latest switch keeps its window.
    pub fn settle(&mut self, ticket: u64) -> bool {
        if self.pending && ticket == self.last_ticket {
            self.pending = false;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let nav = PageNavigator::new();
        assert_eq!(nav.current(), PageId::Front);
        assert_eq!(nav.previous(), None);
        assert_eq!(nav.direction(), Direction::Forward);
        assert!(!nav.is_pending());
        assert_eq!(nav.position(), "1/6");
    }

    #[test]
    fn test_go_to_same_page_twice_is_noop() {
        for page in PageId::ALL {
            let mut nav = PageNavigator::new();
            if let Some(t) = nav.go_to(page) {
                nav.settle(t.ticket);
            }
            let before = nav.clone();

            assert!(nav.go_to(page).is_none());
            assert_eq!(nav.current(), before.current());
            assert_eq!(nav.previous(), before.previous());
            assert_eq!(nav.direction(), before.direction());
            assert!(!nav.is_pending());
        }
    }

    #[test]
    fn test_adjacent_pairs_direction() {
        for pair in PageId::ALL.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let mut nav = PageNavigator::new();
            nav.go_to(a);

            let forward = nav.go_to(b).unwrap();
            assert_eq!(forward.direction, Direction::Forward);
            assert_eq!(nav.direction(), Direction::Forward);
            assert_eq!(nav.previous(), Some(a));

            let backward = nav.go_to(a).unwrap();
            assert_eq!(backward.direction, Direction::Backward);
            assert_eq!(nav.direction(), Direction::Backward);
            assert_eq!(nav.previous(), Some(b));
        }
    }

    #[test]
    fn test_next_on_last_and_prev_on_first_are_noops() {
        let mut nav = PageNavigator::new();
        assert!(!nav.has_prev());
        assert!(nav.go_prev().is_none());
        assert_eq!(nav.current(), PageId::Front);
        assert_eq!(nav.previous(), None);

        nav.go_to(PageId::Contact);
        let t = nav.go_next();
        assert!(t.is_none());
        assert_eq!(nav.current(), PageId::Contact);
        assert!(!nav.has_next());
        assert!(nav.has_prev());
    }

    #[test]
    fn test_walk_forward_through_every_page() {
        let mut nav = PageNavigator::new();
        let mut visited = vec![nav.current()];
        while let Some(t) = nav.go_next() {
            assert_eq!(t.direction, Direction::Forward);
            nav.settle(t.ticket);
            visited.push(nav.current());
        }
        assert_eq!(visited, PageId::ALL.to_vec());
        assert_eq!(nav.position(), "6/6");
    }

    #[test]
    fn test_jump_computes_direction_from_order() {
        let mut nav = PageNavigator::new();
        nav.go_to(PageId::Writing);
        let t = nav.go_to(PageId::About).unwrap();
        assert_eq!(t.direction, Direction::Backward);
        assert_eq!(t.from, PageId::Writing);
    }

    #[test]
    fn test_pending_resolves_with_latest_ticket_only() {
        let mut nav = PageNavigator::new();
        let first = nav.go_next().unwrap();
        assert!(nav.is_pending());
        let second = nav.go_next().unwrap();

        // Superseded transition cannot close the newer window
        assert!(!nav.settle(first.ticket));
        assert!(nav.is_pending());

        assert!(nav.settle(second.ticket));
        assert!(!nav.is_pending());
        assert_eq!(nav.current(), PageId::Projects);
    }

    #[test]
    fn test_noop_does_not_open_window() {
        let mut nav = PageNavigator::new();
        assert!(nav.go_to(PageId::Front).is_none());
        assert!(!nav.is_pending());
    }
}
