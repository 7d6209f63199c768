//! Deterministic random number generation
//!
//! Uses xorshift64* for fast, deterministic random number generation.
//! CRITICAL: All randomness in the simulator MUST go through this module.
//! There is no ambient/global random state; every generation and
//! strategy function takes an explicit `&mut RngManager`.

mod xorshift;

pub use xorshift::RngManager;
