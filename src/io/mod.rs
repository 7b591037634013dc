/*!
# IO utilities

Corpus loading ([reader]) and dataset writing ([writer]).
!*/
pub mod reader;
pub mod writer;
