use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

use crate::constants::EPS;
use crate::error::{QuatError, Result};

/// Quaternion `r + i·𝐢 + j·𝐣 + k·𝐤` over `f64`.
///
/// Components are stored verbatim: no normalization, no unit constraint.
/// Every operation returns a fresh value and leaves its operands untouched.
///
/// Equality is tolerance-based (each component within [`EPS`]), so it is
/// not transitive and the type deliberately does not implement `Eq`.
#[derive(Clone, Copy, Debug)]
pub struct Quaternion {
    r: f64,
    i: f64,
    j: f64,
    k: f64,
}

impl Quaternion {
    pub const fn new(r: f64, i: f64, j: f64, k: f64) -> Self {
        Self { r, i, j, k }
    }

    /// Additive identity (0, 0, 0, 0).
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Multiplicative identity (1, 0, 0, 0).
    pub const fn one() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    pub fn real(self) -> f64 {
        self.r
    }

    pub fn i(self) -> f64 {
        self.i
    }

    pub fn j(self) -> f64 {
        self.j
    }

    pub fn k(self) -> f64 {
        self.k
    }

    /// True if every component is strictly within [`EPS`] of zero.
    pub fn is_zero(self) -> bool {
        self.r.abs() < EPS && self.i.abs() < EPS && self.j.abs() < EPS && self.k.abs() < EPS
    }

    /// conjugate(a+bi+cj+dk) = a-bi-cj-dk
    pub fn conjugate(self) -> Self {
        Self::new(self.r, -self.i, -self.j, -self.k)
    }

    /// opposite(a+bi+cj+dk) = -a-bi-cj-dk
    pub fn opposite(self) -> Self {
        Self::new(-self.r, -self.i, -self.j, -self.k)
    }

    pub fn plus(self, q: Self) -> Self {
        Self::new(self.r + q.r, self.i + q.i, self.j + q.j, self.k + q.k)
    }

    pub fn minus(self, q: Self) -> Self {
        Self::new(self.r - q.r, self.i - q.i, self.j - q.j, self.k - q.k)
    }

    /// Hamilton product `self * q`. Not commutative: `q * self` needs
    /// `q.times(self)`.
    pub fn times(self, q: Self) -> Self {
        Self {
            r: self.r * q.r - self.i * q.i - self.j * q.j - self.k * q.k,
            i: self.r * q.i + self.i * q.r + self.j * q.k - self.k * q.j,
            j: self.r * q.j - self.i * q.k + self.j * q.r + self.k * q.i,
            k: self.r * q.k + self.i * q.j - self.j * q.i + self.k * q.r,
        }
    }

    /// Multiply every component by a real coefficient.
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.r * factor, self.i * factor, self.j * factor, self.k * factor)
    }

    /// r² + i² + j² + k²
    pub fn norm_squared(self) -> f64 {
        self.r * self.r + self.i * self.i + self.j * self.j + self.k * self.k
    }

    /// Euclidean length of the 4-vector (r, i, j, k).
    pub fn norm(self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Multiplicative inverse `(r/n, -i/n, -j/n, -k/n)` with `n = norm²`.
    ///
    /// Fails only when `n` is exactly `0.0`. The check is an exact float
    /// comparison, not the [`EPS`] zero test: a tiny but nonzero quaternion
    /// still has an inverse.
    pub fn inverse(self) -> Result<Self> {
        let n = self.norm_squared();
        if n == 0.0 {
            return Err(QuatError::DivisionByZero);
        }
        Ok(Self::new(self.r / n, -self.i / n, -self.j / n, -self.k / n))
    }

    /// `self * q⁻¹`
    pub fn divide_by_right(self, q: Self) -> Result<Self> {
        Ok(self.times(q.inverse()?))
    }

    /// `q⁻¹ * self`
    pub fn divide_by_left(self, q: Self) -> Result<Self> {
        Ok(q.inverse()?.times(self))
    }

    /// Symmetric product `½ · (self·conj(q) + q·conj(self))`.
    ///
    /// Built from `times`, `plus` and `scale` in exactly this order so the
    /// rounding matches the composed definition. The real part is the 4D
    /// dot product of the two quaternions.
    pub fn dot_mult(self, q: Self) -> Self {
        let first = self.times(q.conjugate());
        let second = q.times(self.conjugate());
        first.plus(second).scale(0.5)
    }

    /// Convert to [r, i, j, k].
    pub fn to_array(self) -> [f64; 4] {
        [self.r, self.i, self.j, self.k]
    }

    /// Create from [r, i, j, k].
    pub fn from_array(arr: [f64; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }
}

/// Component-wise approximate equality: every `|a - b| <= eps`.
pub fn approx_eq(a: &Quaternion, b: &Quaternion, eps: f64) -> bool {
    (a.r - b.r).abs() <= eps
        && (a.i - b.i).abs() <= eps
        && (a.j - b.j).abs() <= eps
        && (a.k - b.k).abs() <= eps
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::zero()
    }
}

impl PartialEq for Quaternion {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || approx_eq(self, other, EPS)
    }
}

/// Hashes the raw bit patterns of i, j, k, r in that order.
///
/// Not tolerance-aware: two quaternions that compare equal within [`EPS`]
/// but differ in their bits land in different buckets. Keep that in mind
/// before using `Quaternion` as a `HashMap` key.
impl Hash for Quaternion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.i.to_bits().hash(state);
        self.j.to_bits().hash(state);
        self.k.to_bits().hash(state);
        self.r.to_bits().hash(state);
    }
}

impl Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self {
        self.opposite()
    }
}

impl Add for Quaternion {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.plus(rhs)
    }
}

impl Sub for Quaternion {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.minus(rhs)
    }
}

/// Hamilton product.
impl Mul for Quaternion {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.times(rhs)
    }
}

impl Mul<f64> for Quaternion {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}
