//! Where laid out squares end up
//!
//! Squares are either committed into a git repository or listed as text.
//! Dates on the skip list are dropped before either happens.

pub mod git;
pub mod listing;
pub mod skip_list;

pub use git::GitSink;
pub use listing::write_listing;
pub use skip_list::SkipList;
