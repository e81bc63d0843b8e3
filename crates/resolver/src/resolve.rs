//! Picking exactly one font for every covered character.

use std::collections::{BTreeMap, BTreeSet};

use log::info;
use rayon::prelude::*;

use crate::{Candidates, CharFontPriority, PriorityList, ResolveContext, compare};

/// Final character to font assignment.
///
/// Contains every character with at least one candidate and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolved {
    fonts: Vec<String>,
    mapping: BTreeMap<char, usize>,
}

impl Resolved {
    pub fn get(&self, c: char) -> Option<&str> {
        self.mapping.get(&c).map(|&i| self.fonts[i].as_str())
    }

    pub fn contains(&self, c: char) -> bool {
        self.mapping.contains_key(&c)
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Assignments in ascending character order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.mapping.iter().map(|(c, &i)| (*c, self.fonts[i].as_str()))
    }

    /// Fonts chosen for at least one character.
    pub fn selected_fonts(&self) -> BTreeSet<&str> {
        self.mapping.values().map(|&i| self.fonts[i].as_str()).collect()
    }

    pub fn to_map(&self) -> BTreeMap<char, String> {
        self.iter().map(|(c, name)| (c, name.to_string())).collect()
    }
}

/// Choose one font per covered character.
///
/// A single candidate is taken as is. Otherwise the candidate that is least
/// under [`compare`] wins. Characters are resolved in parallel against
/// read-only context.
pub fn resolve(candidates: &Candidates, priority: &PriorityList) -> Resolved {
    let ctx = ResolveContext::new(candidates, priority);

    let mapping: BTreeMap<char, usize> = candidates
        .by_char()
        .par_iter()
        .filter_map(|(c, ordinals)| select(*c, ordinals, &ctx).map(|ordinal| (*c, ordinal)))
        .collect();

    let resolved = Resolved {
        fonts: candidates.fonts().iter().map(|f| f.name.clone()).collect(),
        mapping,
    };
    info!(
        "Resolved {} characters to {} of {} fonts",
        resolved.len(),
        resolved.selected_fonts().len(),
        candidates.fonts().len()
    );
    resolved
}

fn select(c: char, ordinals: &[usize], ctx: &ResolveContext<'_>) -> Option<usize> {
    match ordinals {
        [] => None,
        [only] => Some(*only),
        _ => ordinals.iter().copied().min_by(|&a, &b| {
            compare(&ctx.candidates.font(a).name, &ctx.candidates.font(b).name, c, ctx)
        }),
    }
}

/// Every candidate for `c` with its sort key, best first.
pub fn ranked_candidates<'a>(
    c: char,
    candidates: &'a Candidates,
    priority: &PriorityList,
) -> Vec<(&'a str, CharFontPriority)> {
    let ctx = ResolveContext::new(candidates, priority);
    let mut ranked: Vec<(&str, CharFontPriority)> = candidates
        .candidates(c)
        .into_iter()
        .map(|name| (name, CharFontPriority::new(name, c, &ctx)))
        .collect();
    ranked.sort_by(|(a, _), (b, _)| compare(a, b, c, &ctx));
    ranked
}
