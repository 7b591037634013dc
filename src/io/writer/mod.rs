/*!
# Dataset writing

Examples are written as tab separated values, one example per line, without header.
Destination files are truncated on creation.
!*/
mod tsv;

pub use tsv::{write_tsv, TsvWriter};
