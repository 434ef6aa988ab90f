use derive_more::Display;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::hunk::Hunk;

/// Navigation direction for [`find_nearest_hunk`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    #[display(fmt = "first")]
    First,
    #[display(fmt = "last")]
    Last,
    #[display(fmt = "next")]
    Next,
    #[display(fmt = "prev")]
    Prev,
}

impl FromStr for Direction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(Direction::First),
            "last" => Ok(Direction::Last),
            "next" => Ok(Direction::Next),
            "prev" => Ok(Direction::Prev),
            other => Err(ParseError::UnknownDirection(other.to_string())),
        }
    }
}

/// Find the first hunk covering `line_number`, with its index
///
/// Line 1 also matches a placeholder hunk at new start 0 (an emptied file).
pub fn find_hunk(line_number: usize, hunks: &[Hunk]) -> Option<(&Hunk, usize)> {
    hunks.iter().enumerate().find_map(|(i, hunk)| {
        let empty_file = line_number == 1 && hunk.added.start == 0 && hunk.vend == 0;
        let covers = hunk.added.start <= line_number && hunk.vend >= line_number;
        (empty_file || covers).then_some((hunk, i))
    })
}

/// Index of the hunk to jump to from `line_number`
///
/// `Next` picks the first hunk starting below the line, `Prev` the last hunk
/// ending above it. With `wrap`, running off either end continues from the
/// other end. Returns `None` for an empty list or when nothing qualifies.
pub fn find_nearest_hunk(
    line_number: usize,
    hunks: &[Hunk],
    direction: Direction,
    wrap: bool,
) -> Option<usize> {
    let last = hunks.len().checked_sub(1)?;

    match direction {
        Direction::First => Some(0),
        Direction::Last => Some(last),
        Direction::Next => {
            // Scan back from the end to the boundary hunk
            let boundary = hunks.iter().rposition(|h| h.added.start <= line_number);
            match boundary {
                None => Some(0),
                Some(i) if i < last => Some(i + 1),
                Some(_) => wrap.then_some(0),
            }
        }
        Direction::Prev => {
            if hunks[last].vend < line_number {
                return Some(last);
            }
            let boundary = hunks.iter().position(|h| line_number <= h.vend.max(1));
            match boundary {
                Some(i) if i > 0 && hunks[i - 1].vend.max(1) < line_number => Some(i - 1),
                _ => wrap.then_some(last),
            }
        }
    }
}
