//! Probes for community forums.

pub mod mybb;
