//! Survival / birth / aging rules
//!
//! A rule is two sets of neighbour counts plus a maximum age. Neighbour counts
//! live in `0..=26` (the 3D Moore neighbourhood), so each set is a single `u32`
//! bitmask and membership is one shift and mask in the hot loop.
//!
//! The text form is `<survive>/<born>/<states>`, e.g. `9-26/5-7,12-13,15/5`.
//! `<states>` counts every state including dead, so the stored max age is
//! `states - 1`.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::{EngineError, RuleParseError};

/// Largest neighbour count a cell can see (3x3x3 block minus itself)
pub const MAX_NEIGHBOURS: u8 = 26;

/// Set of neighbour counts in `0..=26`, stored as a bitmask
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NeighbourSet(u32);

impl NeighbourSet {
    pub const EMPTY: NeighbourSet = NeighbourSet(0);

    /// Build a set from individual counts, rejecting anything above 26
    pub fn from_counts<I>(counts: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = u8>,
    {
        let mut set = Self::EMPTY;
        for count in counts {
            set.insert(count)?;
        }
        Ok(set)
    }

    /// Build a set from an inclusive range of counts
    pub fn from_range(range: RangeInclusive<u8>) -> Result<Self, EngineError> {
        Self::from_counts(range)
    }

    pub fn insert(&mut self, count: u8) -> Result<(), EngineError> {
        if count > MAX_NEIGHBOURS {
            return Err(EngineError::CountOutOfRange(count));
        }
        self.0 |= 1 << count;
        Ok(())
    }

    #[inline]
    pub fn contains(&self, count: u8) -> bool {
        count <= MAX_NEIGHBOURS && self.0 & (1 << count) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Counts in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=MAX_NEIGHBOURS).filter(move |&n| self.contains(n))
    }

    fn parse_list(text: &str) -> Result<Self, RuleParseError> {
        let mut mask = 0u32;
        let text = text.trim();
        if text.is_empty() {
            return Ok(Self::EMPTY);
        }

        for token in text.split(',') {
            let token = token.trim();
            let (start, end) = match token.split_once('-') {
                Some((a, b)) => (parse_count(a)?, parse_count(b)?),
                None => {
                    let n = parse_count(token)?;
                    (n, n)
                }
            };
            if start > end {
                return Err(RuleParseError::InvertedRange(token.to_string()));
            }
            for n in start..=end {
                mask |= 1 << n;
            }
        }

        Ok(NeighbourSet(mask))
    }
}

fn parse_count(text: &str) -> Result<u32, RuleParseError> {
    let n: u32 = text
        .trim()
        .parse()
        .map_err(|_| RuleParseError::InvalidNumber(text.trim().to_string()))?;
    if n > MAX_NEIGHBOURS as u32 {
        return Err(RuleParseError::CountOutOfRange(n));
    }
    Ok(n)
}

impl fmt::Display for NeighbourSet {
    /// Ascending, comma separated, consecutive runs collapsed to `a-b`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<u8> = self.iter().collect();
        let mut first = true;
        let mut i = 0;
        while i < counts.len() {
            let start = counts[i];
            let mut end = start;
            while i + 1 < counts.len() && counts[i + 1] == end + 1 {
                end += 1;
                i += 1;
            }
            if !first {
                f.write_str(",")?;
            }
            first = false;
            if start == end {
                write!(f, "{start}")?;
            } else {
                write!(f, "{start}-{end}")?;
            }
            i += 1;
        }
        Ok(())
    }
}

/// Generalised 3D life rule
///
/// `max_age` is both the "alive" state and the number of decay steps a dying
/// cell passes through before it reaches 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rule {
    survive: NeighbourSet,
    born: NeighbourSet,
    max_age: u8,
}

impl Rule {
    /// Create a rule, rejecting a max age of 0
    pub fn new(survive: NeighbourSet, born: NeighbourSet, max_age: u8) -> Result<Self, EngineError> {
        if max_age == 0 {
            return Err(EngineError::ZeroMaxAge);
        }
        Ok(Self {
            survive,
            born,
            max_age,
        })
    }

    /// Classic 2D life counts (`2,3/3/2`) applied to the 3D neighbourhood
    pub fn classic() -> Self {
        Self {
            survive: NeighbourSet((1 << 2) | (1 << 3)),
            born: NeighbourSet(1 << 3),
            max_age: 1,
        }
    }

    pub fn survive(&self) -> NeighbourSet {
        self.survive
    }

    pub fn born(&self) -> NeighbourSet {
        self.born
    }

    pub fn max_age(&self) -> u8 {
        self.max_age
    }

    /// Per-cell transition for one tick
    ///
    /// Alive cells survive or start decaying, dead cells may be born, and
    /// dying cells lose one step of age whatever their neighbourhood.
    #[inline]
    pub fn next_state(&self, last: u8, neighbours: u8) -> u8 {
        if last == self.max_age {
            if self.survive.contains(neighbours) {
                self.max_age
            } else {
                self.max_age - 1
            }
        } else if last == 0 {
            if self.born.contains(neighbours) {
                self.max_age
            } else {
                0
            }
        } else {
            last - 1
        }
    }
}

impl Default for Rule {
    /// `9-26/5-7,12-13,15/5`
    fn default() -> Self {
        let survive = (9..=26).fold(0u32, |mask, n| mask | (1 << n));
        let born = [5, 6, 7, 12, 13, 15]
            .iter()
            .fold(0u32, |mask, n| mask | (1 << n));
        Self {
            survive: NeighbourSet(survive),
            born: NeighbourSet(born),
            max_age: 4,
        }
    }
}

impl FromStr for Rule {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sections: Vec<&str> = s.trim().split('/').collect();
        if sections.len() != 3 {
            return Err(RuleParseError::SectionCount(sections.len()));
        }

        let survive = NeighbourSet::parse_list(sections[0])?;
        let born = NeighbourSet::parse_list(sections[1])?;

        let states_text = sections[2].trim();
        let states: u32 = states_text
            .parse()
            .map_err(|_| RuleParseError::InvalidNumber(states_text.to_string()))?;
        if states < 2 {
            return Err(RuleParseError::TooFewStates(states));
        }
        let max_age =
            u8::try_from(states - 1).map_err(|_| RuleParseError::TooManyStates(states))?;

        Ok(Self {
            survive,
            born,
            max_age,
        })
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.survive,
            self.born,
            self.max_age as u16 + 1
        )
    }
}
