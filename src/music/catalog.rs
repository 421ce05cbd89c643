// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Exhaustive enumeration of scale patterns.
//!
//! Patterns are derived from a small grammar of step runs:
//!
//! - `Any`: a semitone run, a wide step, or the end of the pattern
//! - `Semitones`: `n >= 1` semitone steps, then a wide step or the end
//! - `Wide`: `2` then `Any`, `3` then a semitone run or the end,
//!   or `2, 3` then `Any`
//!
//! Every pattern whose steps add up to the requested length is produced
//! once; different derivations of the same flat step sequence collapse
//! into one pattern.

use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;
use std::sync::OnceLock;

use rand::Rng;

use super::scale::ScalePattern;
use super::tone::NUM_TONES;
use crate::error::{Result, ScaleError};

/// Grammar categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Category {
    Any,
    Semitones,
    Wide,
}

/// A run of steps emitted by one grammar rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepRun {
    /// `n` consecutive semitones
    Semitones(u32),
    /// A whole tone
    Whole,
    /// An augmented second
    Augmented,
    /// A whole tone followed by an augmented second
    WholeAugmented,
}

impl StepRun {
    fn steps(self) -> Vec<u32> {
        match self {
            StepRun::Semitones(n) => vec![1; n as usize],
            StepRun::Whole => vec![2],
            StepRun::Augmented => vec![3],
            StepRun::WholeAugmented => vec![2, 3],
        }
    }

    fn width(self) -> u32 {
        match self {
            StepRun::Semitones(n) => n,
            StepRun::Whole => 2,
            StepRun::Augmented => 3,
            StepRun::WholeAugmented => 5,
        }
    }

    /// Category that may follow this run
    fn follower(self) -> Category {
        match self {
            StepRun::Semitones(_) => Category::Wide,
            StepRun::Whole | StepRun::WholeAugmented => Category::Any,
            StepRun::Augmented => Category::Semitones,
        }
    }

    /// Whether the pattern may stop right after this run
    fn may_end(self) -> bool {
        // Any already admits the end on its own
        matches!(self, StepRun::Semitones(_) | StepRun::Augmented)
    }
}

impl Category {
    /// Runs this category can start with, given the remaining length
    fn runs(self, remaining: u32) -> Vec<StepRun> {
        match self {
            Category::Any => Vec::new(),
            Category::Semitones => (1..=remaining).map(StepRun::Semitones).collect(),
            Category::Wide => [StepRun::Whole, StepRun::Augmented, StepRun::WholeAugmented]
                .into_iter()
                .filter(|run| run.width() <= remaining)
                .collect(),
        }
    }
}

type Suffixes = Rc<BTreeSet<Vec<u32>>>;

/// Backtracking enumerator memoized on `(remaining, category)`
#[derive(Default)]
struct Enumerator {
    memo: HashMap<(u32, Category), Suffixes>,
}

impl Enumerator {
    /// All step sequences of exactly `remaining` semitones derivable from `category`
    fn derive(&mut self, remaining: u32, category: Category) -> Suffixes {
        if let Some(found) = self.memo.get(&(remaining, category)) {
            return Rc::clone(found);
        }

        let mut out = BTreeSet::new();
        match category {
            Category::Any => {
                if remaining == 0 {
                    out.insert(Vec::new());
                }
                out.extend(self.derive(remaining, Category::Semitones).iter().cloned());
                out.extend(self.derive(remaining, Category::Wide).iter().cloned());
            }
            Category::Semitones | Category::Wide => {
                for run in category.runs(remaining) {
                    let rest = remaining - run.width();
                    let head = run.steps();
                    if run.may_end() && rest == 0 {
                        out.insert(head.clone());
                    }
                    for tail in self.derive(rest, run.follower()).iter() {
                        let mut steps = head.clone();
                        steps.extend_from_slice(tail);
                        out.insert(steps);
                    }
                }
            }
        }

        let out = Rc::new(out);
        self.memo.insert((remaining, category), Rc::clone(&out));
        out
    }
}

/// Every pattern the grammar derives whose steps sum to `total_length`
pub fn enumerate(total_length: u32) -> BTreeSet<ScalePattern> {
    let mut enumerator = Enumerator::default();
    enumerator
        .derive(total_length, Category::Any)
        .iter()
        .filter(|steps| !steps.is_empty())
        .map(|steps| ScalePattern::from_steps_unchecked(steps.clone()))
        .collect()
}

/// The set of selectable scale patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleCatalog {
    total_length: u32,
    patterns: BTreeSet<ScalePattern>,
}

static OCTAVE_CATALOG: OnceLock<ScaleCatalog> = OnceLock::new();

impl ScaleCatalog {
    /// Enumerate the catalog for a span of `total_length` semitones
    pub fn enumerate(total_length: u32) -> Self {
        Self {
            total_length,
            patterns: enumerate(total_length),
        }
    }

    /// The one-octave catalog, computed once per process
    pub fn octave() -> &'static ScaleCatalog {
        OCTAVE_CATALOG.get_or_init(|| Self::enumerate(NUM_TONES as u32))
    }

    pub fn total_length(&self) -> u32 {
        self.total_length
    }

    pub fn patterns(&self) -> &BTreeSet<ScalePattern> {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn contains(&self, steps: &[u32]) -> bool {
        self.patterns.iter().any(|p| p.steps() == steps)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScalePattern> {
        self.patterns.iter()
    }

    /// First pattern in sort order
    pub fn first(&self) -> Result<&ScalePattern> {
        self.patterns.first().ok_or_else(|| self.empty_error())
    }

    /// A uniformly random pattern
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&ScalePattern> {
        if self.patterns.is_empty() {
            return Err(self.empty_error());
        }
        let pick = rng.gen_range(0..self.patterns.len());
        self.patterns.iter().nth(pick).ok_or_else(|| self.empty_error())
    }

    fn empty_error(&self) -> ScaleError {
        ScaleError::EmptySequence(format!(
            "no scale patterns span {} semitones",
            self.total_length
        ))
    }
}
