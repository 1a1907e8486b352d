//! Game events and the observer registry
//!
//! Presentation layers (audio, score panels, alerts) subscribe to the event kinds
//! they care about. Subscribers of a kind are called in the order they were
//! registered. The game dispatches only after the state change that produced an
//! event has been fully applied, so a subscriber never sees a half-applied move.

/// Something that happened during a game update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    /// A freshly spawned piece had no room; the game is over
    Finished,
    /// The falling piece locked in place
    PieceLocked { rows_cleared: u32 },
    /// The falling piece rotated (possibly after a wall kick)
    PieceRotated,
    /// The falling piece moved one cell
    PieceMoved,
    /// Rows were removed after a lock
    RowsCleared(u32),
    /// The level went up to the given number
    LevelUp(u32),
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::Finished => EventKind::Finished,
            GameEvent::PieceLocked { .. } => EventKind::PieceLocked,
            GameEvent::PieceRotated => EventKind::PieceRotated,
            GameEvent::PieceMoved => EventKind::PieceMoved,
            GameEvent::RowsCleared(_) => EventKind::RowsCleared,
            GameEvent::LevelUp(_) => EventKind::LevelUp,
        }
    }
}

/// Subscription key: the variant of a [`GameEvent`] without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Finished,
    PieceLocked,
    PieceRotated,
    PieceMoved,
    RowsCleared,
    LevelUp,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::Finished,
        EventKind::PieceLocked,
        EventKind::PieceRotated,
        EventKind::PieceMoved,
        EventKind::RowsCleared,
        EventKind::LevelUp,
    ];

    const COUNT: usize = Self::ALL.len();

    fn index(&self) -> usize {
        match self {
            EventKind::Finished => 0,
            EventKind::PieceLocked => 1,
            EventKind::PieceRotated => 2,
            EventKind::PieceMoved => 3,
            EventKind::RowsCleared => 4,
            EventKind::LevelUp => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Finished => "finished",
            EventKind::PieceLocked => "pieceLocked",
            EventKind::PieceRotated => "pieceRotated",
            EventKind::PieceMoved => "pieceMoved",
            EventKind::RowsCleared => "rowsCleared",
            EventKind::LevelUp => "levelUp",
        }
    }
}

/// Handle returned by [`Observers::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type Subscriber = Box<dyn FnMut(&GameEvent)>;

/// One ordered subscriber list per event kind
#[derive(Default)]
pub struct Observers {
    lists: [Vec<(SubscriptionId, Subscriber)>; EventKind::COUNT],
    next_id: u64,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.lists[kind.index()].push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscriber. Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for list in &mut self.lists {
            if let Some(pos) = list.iter().position(|(sid, _)| *sid == id) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    pub fn len(&self, kind: EventKind) -> usize {
        self.lists[kind.index()].len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(Vec::is_empty)
    }

    /// Call every subscriber of the event's kind, in registration order
    pub fn notify(&mut self, event: &GameEvent) {
        for (_, subscriber) in &mut self.lists[event.kind().index()] {
            subscriber(event);
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: Vec<(EventKind, usize)> = EventKind::ALL
            .iter()
            .map(|kind| (*kind, self.len(*kind)))
            .collect();
        f.debug_struct("Observers").field("subscribers", &counts).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_subscribers_called_in_insertion_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::new();

        for tag in ["first", "second", "third"] {
            let calls = Rc::clone(&calls);
            observers.subscribe(EventKind::PieceMoved, move |_| calls.borrow_mut().push(tag));
        }

        observers.notify(&GameEvent::PieceMoved);
        assert_eq!(*calls.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_notify_only_matching_kind() {
        let count = Rc::new(RefCell::new(0));
        let mut observers = Observers::new();
        let c = Rc::clone(&count);
        observers.subscribe(EventKind::RowsCleared, move |event| {
            if let GameEvent::RowsCleared(n) = event {
                *c.borrow_mut() += n;
            }
        });

        observers.notify(&GameEvent::PieceMoved);
        observers.notify(&GameEvent::RowsCleared(3));
        assert_eq!(*count.borrow(), 3);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut observers = Observers::new();
        let c = Rc::clone(&count);
        let id = observers.subscribe(EventKind::Finished, move |_| *c.borrow_mut() += 1);

        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        assert!(observers.is_empty());

        observers.notify(&GameEvent::Finished);
        assert_eq!(*count.borrow(), 0);
    }
}
