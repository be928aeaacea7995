//! The 3x3 board

use std::fmt;

/// The eight winning lines, rows first, then columns, then diagonals
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Who owns a slot. The human plays X, the bot plays O.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    Human,
    Bot,
}

impl Mark {
    pub fn symbol(&self) -> char {
        match self {
            Mark::Human => 'X',
            Mark::Bot => 'O',
        }
    }

    pub fn opponent(&self) -> Mark {
        match self {
            Mark::Human => Mark::Bot,
            Mark::Bot => Mark::Human,
        }
    }
}

/// Why a move was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    OutOfRange(usize),
    Occupied(usize),
    NotYourTurn,
    GameOver,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::OutOfRange(i) => write!(f, "slot {} is not on the board", i),
            MoveError::Occupied(i) => write!(f, "slot {} is already taken", i),
            MoveError::NotYourTurn => write!(f, "it is not your turn"),
            MoveError::GameOver => write!(f, "the game is over"),
        }
    }
}

impl std::error::Error for MoveError {}

/// Nine slots, row-major
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Board {
    slots: [Option<Mark>; 9],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.slots.get(index).copied().flatten()
    }

    pub fn slots(&self) -> &[Option<Mark>; 9] {
        &self.slots
    }

    /// Put `mark` on an empty slot
    pub fn place(&mut self, index: usize, mark: Mark) -> Result<(), MoveError> {
        let slot = self.slots.get_mut(index).ok_or(MoveError::OutOfRange(index))?;
        if slot.is_some() {
            return Err(MoveError::Occupied(index));
        }
        *slot = Some(mark);
        Ok(())
    }

    /// Copy of the board with `mark` on `index` (which must be empty)
    pub(crate) fn with(&self, index: usize, mark: Mark) -> Board {
        let mut next = *self;
        next.slots[index] = Some(mark);
        next
    }

    /// First completed line in [`LINES`] order, with its slots
    pub fn winner(&self) -> Option<(Mark, [usize; 3])> {
        LINES.iter().find_map(|&[a, b, c]| {
            let mark = self.slots[a]?;
            (self.slots[b] == Some(mark) && self.slots[c] == Some(mark)).then_some((mark, [a, b, c]))
        })
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Empty slot indices in ascending order
    pub fn empty_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_none())
            .map(|(i, _)| i)
    }

    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..3 {
                let c = self.slots[row * 3 + col].map(|m| m.symbol()).unwrap_or('.');
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}
