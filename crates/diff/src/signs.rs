//! Gutter sign calculation
//!
//! Maps a hunk, seen together with its neighbours, to one sign per visible
//! line. Two strategies exist and are picked when a [`SignCalculator`] is
//! built: [`BaselineSigns`] looks ahead at the next hunk to decide
//! change-delete markers, [`RefinedSigns`] looks behind and also places
//! top-delete markers for chained deletions.

use derive_more::Display;
use log::warn;
use std::ops::RangeInclusive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::hunk::{Hunk, HunkKind};

/// The kind of a gutter sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SignKind {
    #[display(fmt = "add")]
    Add,
    #[display(fmt = "change")]
    Change,
    #[display(fmt = "delete")]
    Delete,
    /// A changed line that also removes trailing old lines
    #[display(fmt = "changedelete")]
    ChangeDelete,
    /// A deletion with no anchor line, shown on the line below
    #[display(fmt = "topdelete")]
    TopDelete,
    /// A line of a file that is not tracked yet
    #[display(fmt = "untracked")]
    Untracked,
}

impl From<HunkKind> for SignKind {
    fn from(kind: HunkKind) -> Self {
        match kind {
            HunkKind::Add => SignKind::Add,
            HunkKind::Change => SignKind::Change,
            HunkKind::Delete => SignKind::Delete,
        }
    }
}

/// A request to render a sign on one line of the new file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sign {
    pub kind: SignKind,

    /// Target line in the new file
    pub line_number: usize,

    /// Total line count of the run, present on its first sign only
    pub count: Option<usize>,
}

impl Sign {
    fn new(kind: SignKind, line_number: usize, count: Option<usize>) -> Self {
        Self {
            kind,
            line_number,
            count,
        }
    }
}

/// The visible line window; an absent bound is unbounded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineWindow {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl LineWindow {
    pub fn new(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// A window covering the whole file
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Lower bound clamped to line 1
    fn min_lnum(&self) -> usize {
        self.min.unwrap_or(1).max(1)
    }

    /// `lo..=hi` cut to the upper bound
    fn visible(&self, lo: usize, hi: usize) -> RangeInclusive<usize> {
        let hi = match self.max {
            Some(max) => hi.min(max),
            None => hi,
        };
        lo..=hi
    }
}

/// A sign-calculation algorithm
pub trait SignStrategy {
    /// Compute the signs for `hunk` within `window`
    ///
    /// `untracked` is only valid for add hunks; other combinations log a
    /// warning and yield no signs.
    fn calc_signs(
        &self,
        prev: Option<&Hunk>,
        hunk: &Hunk,
        next: Option<&Hunk>,
        window: LineWindow,
        untracked: bool,
    ) -> Vec<Sign>;
}

fn untracked_allowed(hunk: &Hunk, untracked: bool) -> bool {
    if untracked && hunk.kind != HunkKind::Add {
        warn!(
            "Invalid hunk with untracked=true: {} hunk {:?}",
            hunk.kind, hunk.header
        );
        return false;
    }
    true
}

/// Count carried by the first sign of a hunk's run
fn run_count(hunk: &Hunk) -> usize {
    match hunk.kind {
        HunkKind::Add => hunk.added.count,
        _ => hunk.removed.count,
    }
}

/// Add signs for the lines a growing change hunk appends after its change end
///
/// The tail covers `change_end + 1..=vend`. The line at `change_end` already
/// carries the change sign of the primary run, so it gets no second sign and
/// a window ending at `change_end` yields no tail.
fn growing_tail(hunk: &Hunk, min_lnum: usize, window: LineWindow) -> Vec<Sign> {
    let (added, removed) = (hunk.added.count, hunk.removed.count);
    if hunk.kind != HunkKind::Change || added <= removed {
        return Vec::new();
    }

    let first = (hunk.change_end() + 1).max(min_lnum);
    window
        .visible(first, hunk.vend)
        .map(|lnum| {
            let count = (lnum == hunk.vend).then(|| added - removed);
            Sign::new(SignKind::Add, lnum, count)
        })
        .collect()
}

/// The original algorithm: change-delete looks ahead at the next hunk
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselineSigns;

impl SignStrategy for BaselineSigns {
    fn calc_signs(
        &self,
        _prev: Option<&Hunk>,
        hunk: &Hunk,
        next: Option<&Hunk>,
        window: LineWindow,
        untracked: bool,
    ) -> Vec<Sign> {
        if !untracked_allowed(hunk, untracked) {
            return Vec::new();
        }

        let min_lnum = window.min_lnum();
        let start = hunk.added.start;

        if hunk.kind == HunkKind::Delete && start == 0 {
            return if min_lnum <= 1 {
                vec![Sign::new(SignKind::TopDelete, 1, Some(hunk.removed.count))]
            } else {
                Vec::new()
            };
        }

        let cend = hunk.change_end();
        let changedelete = hunk.kind == HunkKind::Change
            && (hunk.removed.count > hunk.added.count
                || next.is_some_and(|n| n.kind == HunkKind::Delete && n.added.start == hunk.vend));

        let mut signs: Vec<Sign> = window
            .visible(start.max(min_lnum), cend)
            .map(|lnum| {
                let kind = if changedelete && lnum == cend {
                    SignKind::ChangeDelete
                } else if untracked {
                    SignKind::Untracked
                } else {
                    hunk.kind.into()
                };
                Sign::new(kind, lnum, (lnum == start).then(|| run_count(hunk)))
            })
            .collect();

        signs.extend(growing_tail(hunk, min_lnum, window));
        signs
    }
}

/// The newer algorithm: change-delete looks behind, top-delete covers delete chains
#[derive(Debug, Clone, Copy, Default)]
pub struct RefinedSigns;

impl SignStrategy for RefinedSigns {
    fn calc_signs(
        &self,
        prev: Option<&Hunk>,
        hunk: &Hunk,
        next: Option<&Hunk>,
        window: LineWindow,
        untracked: bool,
    ) -> Vec<Sign> {
        if !untracked_allowed(hunk, untracked) {
            return Vec::new();
        }

        let mut min_lnum = window.min_lnum();
        let start = hunk.added.start;
        let cend = hunk.change_end();

        let topdelete = hunk.kind == HunkKind::Delete
            && (start == 0 || prev.is_some_and(|p| p.change_end() == start))
            && !next.is_some_and(|n| n.added.start == start + 1);

        // The anchor of a top delete sits one line above its sign
        if topdelete && min_lnum == 1 {
            min_lnum = 0;
        }

        let after_top_insert = prev.is_some_and(|p| p.kind == HunkKind::Add && p.added.start == 0);
        let shrinking_change =
            hunk.kind == HunkKind::Change && hunk.removed.count > hunk.added.count;

        let mut signs: Vec<Sign> = window
            .visible(start.max(min_lnum), cend)
            .map(|lnum| {
                let changedelete = (shrinking_change && lnum == cend) || after_top_insert;
                let kind = if topdelete {
                    SignKind::TopDelete
                } else if changedelete {
                    SignKind::ChangeDelete
                } else if untracked {
                    SignKind::Untracked
                } else {
                    hunk.kind.into()
                };
                let count = (lnum == start).then(|| run_count(hunk));
                Sign::new(kind, lnum + usize::from(topdelete), count)
            })
            .collect();

        signs.extend(growing_tail(hunk, min_lnum, window));
        signs
    }
}

/// Selects a sign strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SignAlgorithm {
    #[display(fmt = "baseline")]
    Baseline,
    #[default]
    #[display(fmt = "refined")]
    Refined,
}

impl SignAlgorithm {
    pub fn strategy(self) -> &'static dyn SignStrategy {
        match self {
            SignAlgorithm::Baseline => &BaselineSigns,
            SignAlgorithm::Refined => &RefinedSigns,
        }
    }
}

/// Computes gutter signs with a strategy fixed at construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignCalculator {
    algorithm: SignAlgorithm,
}

impl SignCalculator {
    pub fn new(algorithm: SignAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> SignAlgorithm {
        self.algorithm
    }

    /// Signs for a single hunk with its neighbours
    pub fn calc_signs(
        &self,
        prev: Option<&Hunk>,
        hunk: &Hunk,
        next: Option<&Hunk>,
        window: LineWindow,
        untracked: bool,
    ) -> Vec<Sign> {
        self.algorithm
            .strategy()
            .calc_signs(prev, hunk, next, window, untracked)
    }

    /// Signs for every hunk of an ascending list, in list order
    pub fn signs_for_hunks(&self, hunks: &[Hunk], window: LineWindow, untracked: bool) -> Vec<Sign> {
        let strategy = self.algorithm.strategy();
        hunks
            .iter()
            .enumerate()
            .flat_map(|(i, hunk)| {
                let prev = i.checked_sub(1).and_then(|p| hunks.get(p));
                let next = hunks.get(i + 1);
                strategy.calc_signs(prev, hunk, next, window, untracked)
            })
            .collect()
    }
}
