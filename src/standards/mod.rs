//! Jurisdiction design standards: immutable threshold profiles and their
//! registry.
pub mod profile;
pub mod registry;

pub use profile::StandardsProfile;
pub use registry::StandardsRegistry;
