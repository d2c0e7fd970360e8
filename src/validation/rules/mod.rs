//! One rule module per finding category. Each rule is a free function over
//! the read-only snapshot that returns its findings; rules never call each
//! other.
pub(crate) mod continuity;
pub(crate) mod geometry;
pub(crate) mod hydraulic;
pub(crate) mod standards;
pub(crate) mod topology;
