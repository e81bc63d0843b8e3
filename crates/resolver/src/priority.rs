//! Tie-break between fonts covering the same character.

use std::{cmp::Ordering, collections::HashMap};

use fontmap_unicode::block;

use crate::Candidates;

/// Ordered list of explicitly preferred fonts. Rank is list position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorityList {
    names: Vec<String>,
    ranks: HashMap<String, usize>,
}

impl PriorityList {
    /// Build from font names in priority order. A repeated name keeps its
    /// first rank.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::default();
        for name in names {
            let name = name.into();
            if !list.ranks.contains_key(&name) {
                list.ranks.insert(name.clone(), list.names.len());
                list.names.push(name);
            }
        }
        list
    }

    pub fn rank(&self, name: &str) -> Option<usize> {
        self.ranks.get(name).copied()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Everything a comparison needs: priority ranks and block coverage sizes.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub priority: &'a PriorityList,
    pub candidates: &'a Candidates,
}

impl<'a> ResolveContext<'a> {
    pub fn new(candidates: &'a Candidates, priority: &'a PriorityList) -> Self {
        Self { priority, candidates }
    }
}

/// Sort key of a (font, character) pair.
///
/// Ranked fonts come first, by ascending rank. Unranked fonts follow, the
/// one covering more of the character's block first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharFontPriority {
    pub rank: Option<usize>,
    pub cov: usize,
}

impl CharFontPriority {
    pub fn new(font: &str, c: char, ctx: &ResolveContext<'_>) -> Self {
        Self {
            rank: ctx.priority.rank(font),
            cov: ctx.candidates.block_coverage(font, block(c)),
        }
    }

    /// Whether `self` should be chosen over `other`.
    pub fn precedes(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Less
    }
}

impl Ord for CharFontPriority {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.rank, other.rank) {
            (None, None) => other.cov.cmp(&self.cov),
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(&b),
        }
    }
}

impl PartialOrd for CharFontPriority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Order two candidate fonts for `c`; the lesser one wins.
///
/// Keys that tie (unranked with equal block coverage) fall back to the font
/// name, so the result never depends on candidate order.
pub fn compare(a: &str, b: &str, c: char, ctx: &ResolveContext<'_>) -> Ordering {
    CharFontPriority::new(a, c, ctx)
        .cmp(&CharFontPriority::new(b, c, ctx))
        .then_with(|| a.cmp(b))
}
