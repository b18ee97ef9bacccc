use std::collections::BTreeSet;

/// What a mutation made stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    /// The raster was replaced. Dimensions and every cell must be re-read.
    Full,
    /// Exactly one cell changed.
    Cell { row: u32, col: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(Change)>;

/// Callbacks registered on a grid. Invoked synchronously, in registration order.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, listener: impl FnMut(Change) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn emit(&mut self, change: Change) {
        for (_, listener) in self.entries.iter_mut() {
            listener(change);
        }
    }
}

/// Level-triggered summary of pending changes.
///
/// Any number of full invalidations collapse into one, and a full
/// invalidation swallows every pending cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Invalidation {
    full: bool,
    cells: BTreeSet<(u32, u32)>,
}

impl Invalidation {
    pub fn record(&mut self, change: Change) {
        match change {
            Change::Full => {
                self.full = true;
                self.cells.clear();
            }
            Change::Cell { row, col } => {
                if !self.full {
                    self.cells.insert((row, col));
                }
            }
        }
    }

    pub fn is_full(&self) -> bool {
        self.full
    }

    pub fn is_clean(&self) -> bool {
        !self.full && self.cells.is_empty()
    }

    /// Pending cells as `(row, col)`, empty when [`Invalidation::is_full`].
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.cells.iter().copied()
    }
}
