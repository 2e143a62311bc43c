//! Next-piece queue and hold slot
//!
//! The queue keeps up to 14 upcoming kinds. In bag mode it is topped up with a freshly
//! shuffled set of all seven kinds whenever seven or fewer remain, so every run of seven
//! pieces starting at a bag boundary is a permutation of the seven kinds. In uniform mode
//! each dequeue is replaced by one independent roll.

use arrayvec::ArrayVec;

use crate::pieces::Tetromino;
use crate::rng::SimpleRng;
use crate::types::{PieceKind, NEXT_QUEUE_LEN, PIECE_KIND_COUNT};

/// How new kinds are generated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Randomizer {
    /// Shuffled bags of all seven kinds
    Bag,
    /// Independent uniform rolls
    Uniform,
}

#[derive(Debug, Clone)]
pub struct PieceQueue {
    kinds: ArrayVec<PieceKind, NEXT_QUEUE_LEN>,
    randomizer: Randomizer,
}

impl PieceQueue {
    /// A full queue: two bags, or fourteen rolls
    pub fn new(randomizer: Randomizer, rng: &mut SimpleRng) -> Self {
        let mut queue = Self {
            kinds: ArrayVec::new(),
            randomizer,
        };
        queue.fill(rng);
        queue
    }

    /// Drop every queued kind and fill again with `randomizer`
    pub fn reset(&mut self, randomizer: Randomizer, rng: &mut SimpleRng) {
        self.kinds.clear();
        self.randomizer = randomizer;
        self.fill(rng);
    }

    fn fill(&mut self, rng: &mut SimpleRng) {
        match self.randomizer {
            Randomizer::Bag => {
                while self.kinds.remaining_capacity() >= PIECE_KIND_COUNT {
                    self.refill_bag(rng);
                }
            }
            Randomizer::Uniform => {
                while !self.kinds.is_full() {
                    self.kinds.push(roll(rng));
                }
            }
        }
    }

    /// Append one shuffled bag of all seven kinds
    pub fn refill_bag(&mut self, rng: &mut SimpleRng) {
        let mut bag = PieceKind::ALL;
        rng.shuffle(&mut bag);
        for kind in bag {
            if self.kinds.try_push(kind).is_err() {
                log::warn!("piece queue full, dropping rest of bag");
                break;
            }
        }
    }

    /// Take the next kind and return a fresh piece of it
    pub fn dequeue(&mut self, rng: &mut SimpleRng) -> Tetromino {
        if self.kinds.is_empty() {
            self.fill(rng);
        }
        let kind = self.kinds.remove(0);

        match self.randomizer {
            Randomizer::Bag => {
                if self.kinds.len() <= PIECE_KIND_COUNT {
                    self.refill_bag(rng);
                }
            }
            Randomizer::Uniform => self.kinds.push(roll(rng)),
        }

        Tetromino::pick(kind)
    }

    /// Upcoming kinds, next first
    pub fn upcoming(&self) -> &[PieceKind] {
        &self.kinds
    }

    /// The next `n` kinds (fewer if the queue is shorter)
    pub fn peek(&self, n: usize) -> &[PieceKind] {
        &self.kinds[..n.min(self.kinds.len())]
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn randomizer(&self) -> Randomizer {
        self.randomizer
    }
}

fn roll(rng: &mut SimpleRng) -> PieceKind {
    PieceKind::ALL[rng.next_range(PIECE_KIND_COUNT as u32) as usize]
}

/// The stored piece kind, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoldSlot(Option<PieceKind>);

impl HoldSlot {
    pub fn kind(&self) -> Option<PieceKind> {
        self.0
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}

/// Result of a hold request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldOutcome {
    /// The active piece went into the slot and a replacement is now active
    Held,
    /// The active piece already came out of a hold
    Refused,
    /// Nothing to hold
    NoPiece,
}

/// Swap the active piece with the hold slot
///
/// The replacement (the previously held kind, or the next queued piece when the slot was
/// empty) starts at its spawn position with `was_held` set, so it cannot be held again
/// before it locks.
pub fn hold(
    active: &mut Option<Tetromino>,
    slot: &mut HoldSlot,
    queue: &mut PieceQueue,
    rng: &mut SimpleRng,
) -> HoldOutcome {
    let Some(current) = active.as_ref() else {
        return HoldOutcome::NoPiece;
    };
    if current.was_held {
        return HoldOutcome::Refused;
    }

    let mut next = match slot.0.replace(current.kind) {
        Some(kind) => Tetromino::pick(kind),
        None => queue.dequeue(rng),
    };
    next.was_held = true;
    *active = Some(next);
    HoldOutcome::Held
}
