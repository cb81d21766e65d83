//! Attack payload corpus.
//!
//! Pure data tables plus one randomized constructor (the stored-XSS
//! correlation payload). Nothing here performs I/O.

pub mod injector;
pub mod sqli;
pub mod xss;
