//! Codepoint-indexed UTF-8 text.
//!
//! Two types share one model: text is stored as UTF-8 bytes, but every public
//! position is a codepoint index.
//!
//! - [`CodepointString`]: owning, growable, mutable in place
//! - [`CodepointView`]: borrowed `Copy` window over someone else's bytes
//!
//! Neither caches a codepoint index. Lengths and positional lookups scan the
//! bytes, which keeps edits near a cursor cheap and memory equal to the text.

mod sequence;
mod view;

pub use sequence::CodepointString;
pub use view::CodepointView;
