//! Formula module
//!
//! All numeric game formulas consolidated as named, independently testable
//! pure functions. Each function takes its configuration section as an
//! explicit parameter and documents its input domain and output range;
//! none of them throw for in-range numeric input (out-of-range values
//! are clamped, not rejected).

pub mod archetype;
pub mod psychology;
pub mod quality;
pub mod revenue;
