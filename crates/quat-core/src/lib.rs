//! Quaternion value type.
//!
//! `Quaternion` is a plain `Copy` value `r + i·𝐢 + j·𝐣 + k·𝐤` over `f64` with
//! the full Hamilton algebra: sums, the non-commutative product, scaling,
//! conjugate, inverse, left and right division, and the symmetric dot
//! product. Comparisons use a fixed absolute tolerance [`EPS`].
//!
//! The text form (`1.00+2.00i-3.00j+4.00k`) round-trips through
//! [`Quaternion::value_of`] and `str::parse`.
//!
//! Zero I/O. Pure math, no logging.

pub mod constants;
pub mod error;
pub mod quaternion;
pub mod text;

pub use constants::{DISPLAY_PRECISION, EPS};
pub use error::{QuatError, Result};
pub use quaternion::{Quaternion, approx_eq};
