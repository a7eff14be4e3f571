//! Secret masking.
//!
//! [`OutputMasker`] redacts credential values from anything shown to the
//! user, such as error messages that echo a request URL.

pub mod mask;

pub use mask::OutputMasker;
