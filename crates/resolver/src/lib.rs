//! Character to font resolution.
//!
//! [`Candidates::aggregate`] inverts per-font coverage into per-character
//! candidate lists, and [`resolve`] picks one font per character:
//!
//! 1. fonts named in the [`PriorityList`] win, lowest rank first;
//! 2. otherwise the font covering more of the character's Unicode block wins;
//! 3. remaining ties go to the lexicographically smaller font name.
//!
//! Characters no font covers are left out of the result.

mod candidates;
mod priority;
mod resolve;

pub use candidates::{Candidates, FontSummary};
pub use priority::{CharFontPriority, PriorityList, ResolveContext, compare};
pub use resolve::{Resolved, ranked_candidates, resolve};
