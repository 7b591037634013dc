/*! Filtering utilities

Filters implement [filter::Filter]: they are pure, two successive equal inputs give two
equal outputs.

[length::Bounds] keeps paragraphs (or whole chains of paragraphs) whose word and sentence counts
are within inclusive bounds.
! */
mod filter;
mod length;

pub use filter::Filter;
pub use length::{filter_chains, Bounds};
