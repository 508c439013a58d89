//! Real-coefficient polynomials in `s`.
//!
//! Coefficients are stored highest power first, so `[2.0, 3.0, 1.0]` is
//! `2 s^2 + 3 s + 1`. Leading zeros are trimmed on construction; the zero
//! polynomial is `[0.0]`.

use std::fmt;
use std::ops::{Add, Mul, Neg};

use nalgebra::{Complex, DMatrix};
use serde::Serialize;

/// Polynomial with real coefficients in descending powers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Polynomial {
    /// Create a polynomial from descending coefficients, trimming leading zeros.
    pub fn new(coeffs: Vec<f64>) -> Self {
        let first_nonzero = coeffs.iter().position(|&c| c != 0.0);
        let coeffs = match first_nonzero {
            Some(0) => coeffs,
            Some(i) => coeffs[i..].to_vec(),
            None => vec![0.0],
        };
        Self { coeffs }
    }

    /// Constant polynomial `c`.
    pub fn constant(c: f64) -> Self {
        Self::new(vec![c])
    }

    /// The polynomial `s`.
    pub fn s() -> Self {
        Self { coeffs: vec![1.0, 0.0] }
    }

    pub fn zero() -> Self {
        Self { coeffs: vec![0.0] }
    }

    pub fn one() -> Self {
        Self { coeffs: vec![1.0] }
    }

    /// Coefficients, highest power first.
    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0] == 0.0
    }

    /// Highest-power coefficient.
    pub fn leading(&self) -> f64 {
        self.coeffs[0]
    }

    /// Value at `s = 0`.
    pub fn constant_term(&self) -> f64 {
        self.coeffs[self.coeffs.len() - 1]
    }

    /// Number of exact roots at the origin (exactly-zero trailing coefficients).
    pub fn origin_multiplicity(&self) -> usize {
        if self.is_zero() {
            return 0;
        }
        self.coeffs.iter().rev().take_while(|&&c| c == 0.0).count()
    }

    /// Divide out `s^k`. Callers must ensure `k <= origin_multiplicity()`.
    pub fn deflate_origin(&self, k: usize) -> Self {
        let k = k.min(self.origin_multiplicity());
        Self::new(self.coeffs[..self.coeffs.len() - k].to_vec())
    }

    /// Multiply every coefficient by `k`.
    pub fn scale(&self, k: f64) -> Self {
        Self::new(self.coeffs.iter().map(|c| c * k).collect())
    }

    /// Horner evaluation at a real point.
    pub fn eval(&self, x: f64) -> f64 {
        self.coeffs.iter().fold(0.0, |acc, &c| acc * x + c)
    }

    /// Horner evaluation at a complex point.
    pub fn eval_complex(&self, z: Complex<f64>) -> Complex<f64> {
        self.coeffs
            .iter()
            .fold(Complex::new(0.0, 0.0), |acc, &c| acc * z + c)
    }

    /// Roots as eigenvalues of the companion matrix.
    ///
    /// Exact roots at the origin are split off first so that they come back
    /// as exact zeros. Result is sorted by real part, then imaginary part.
    pub fn roots(&self) -> Vec<Complex<f64>> {
        if self.degree() == 0 {
            return Vec::new();
        }

        let k = self.origin_multiplicity();
        let mut roots = vec![Complex::new(0.0, 0.0); k];

        let reduced = self.deflate_origin(k);
        let n = reduced.degree();
        if n > 0 {
            let lead = reduced.leading();
            let mut companion = DMatrix::<f64>::zeros(n, n);
            for j in 0..n {
                companion[(0, j)] = -reduced.coeffs[j + 1] / lead;
            }
            for i in 1..n {
                companion[(i, i - 1)] = 1.0;
            }
            roots.extend(companion.complex_eigenvalues().iter().copied());
        }

        roots.sort_by(|a, b| a.re.total_cmp(&b.re).then(a.im.total_cmp(&b.im)));
        roots
    }
}

impl From<Vec<f64>> for Polynomial {
    fn from(coeffs: Vec<f64>) -> Self {
        Self::new(coeffs)
    }
}

impl From<&[f64]> for Polynomial {
    fn from(coeffs: &[f64]) -> Self {
        Self::new(coeffs.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Polynomial {
    fn from(coeffs: [f64; N]) -> Self {
        Self::new(coeffs.to_vec())
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        let n = self.coeffs.len().max(rhs.coeffs.len());
        let pad_a = n - self.coeffs.len();
        let pad_b = n - rhs.coeffs.len();
        let sum = (0..n)
            .map(|i| {
                let a = if i >= pad_a { self.coeffs[i - pad_a] } else { 0.0 };
                let b = if i >= pad_b { rhs.coeffs[i - pad_b] } else { 0.0 };
                a + b
            })
            .collect();
        Polynomial::new(sum)
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        if self.is_zero() || rhs.is_zero() {
            return Polynomial::zero();
        }
        let mut out = vec![0.0; self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in rhs.coeffs.iter().enumerate() {
                out[i + j] += a * b;
            }
        }
        Polynomial::new(out)
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self.scale(-1.0)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let n = self.degree();
        let mut first = true;
        for (i, &c) in self.coeffs.iter().enumerate() {
            if c == 0.0 {
                continue;
            }
            let power = n - i;
            if first {
                if c < 0.0 {
                    write!(f, "-")?;
                }
            } else if c < 0.0 {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            let mag = c.abs();
            match power {
                0 => write!(f, "{mag}")?,
                1 if mag == 1.0 => write!(f, "s")?,
                1 => write!(f, "{mag} s")?,
                _ if mag == 1.0 => write!(f, "s^{power}")?,
                _ => write!(f, "{mag} s^{power}")?,
            }
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_leading_zeros() {
        let p = Polynomial::new(vec![0.0, 0.0, 2.0, 1.0]);
        assert_eq!(p.coeffs(), &[2.0, 1.0]);
        assert_eq!(p.degree(), 1);

        let z = Polynomial::new(vec![0.0, 0.0]);
        assert!(z.is_zero());
        assert_eq!(z.degree(), 0);

        let empty = Polynomial::new(vec![]);
        assert!(empty.is_zero());
    }

    #[test]
    fn multiply_and_add() {
        // (s + 1)(s + 2) = s^2 + 3s + 2
        let a = Polynomial::from([1.0, 1.0]);
        let b = Polynomial::from([1.0, 2.0]);
        assert_eq!((&a * &b).coeffs(), &[1.0, 3.0, 2.0]);

        // (s^2 + 1) + (2s + 3) = s^2 + 2s + 4
        let c = Polynomial::from([1.0, 0.0, 1.0]);
        let d = Polynomial::from([2.0, 3.0]);
        assert_eq!((&c + &d).coeffs(), &[1.0, 2.0, 4.0]);
    }

    #[test]
    fn cancelling_addition_drops_degree() {
        let a = Polynomial::from([1.0, 2.0]);
        let b = Polynomial::from([-1.0, 5.0]);
        let sum = &a + &b;
        assert_eq!(sum.coeffs(), &[7.0]);
        assert!((&a + &(-&a)).is_zero());
    }

    #[test]
    fn origin_multiplicity_and_deflation() {
        let p = Polynomial::from([3.0, 2.0, 0.0, 0.0]);
        assert_eq!(p.origin_multiplicity(), 2);
        assert_eq!(p.deflate_origin(2).coeffs(), &[3.0, 2.0]);
        assert_eq!(p.deflate_origin(5).coeffs(), &[3.0, 2.0]);
        assert_eq!(Polynomial::zero().origin_multiplicity(), 0);
    }

    #[test]
    fn evaluation() {
        let p = Polynomial::from([2.0, -3.0, 1.0]);
        assert_eq!(p.eval(0.0), 1.0);
        assert_eq!(p.eval(2.0), 3.0);

        let z = p.eval_complex(Complex::new(0.0, 1.0));
        // 2(i^2) - 3i + 1 = -1 - 3i
        assert!((z.re + 1.0).abs() < 1e-12);
        assert!((z.im + 3.0).abs() < 1e-12);
    }

    #[test]
    fn roots_of_quadratic() {
        // s^2 + 12 s + 20 = (s + 2)(s + 10)
        let p = Polynomial::from([1.0, 12.0, 20.0]);
        let r = p.roots();
        assert_eq!(r.len(), 2);
        assert!((r[0].re + 10.0).abs() < 1e-9);
        assert!((r[1].re + 2.0).abs() < 1e-9);
        assert!(r.iter().all(|z| z.im.abs() < 1e-9));
    }

    #[test]
    fn roots_complex_pair() {
        // s^2 + 2s + 5 -> -1 +- 2i
        let r = Polynomial::from([1.0, 2.0, 5.0]).roots();
        assert_eq!(r.len(), 2);
        for z in &r {
            assert!((z.re + 1.0).abs() < 1e-9);
            assert!((z.im.abs() - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn origin_roots_are_exact() {
        let r = Polynomial::from([1.0, 3.0, 0.0]).roots();
        assert_eq!(r.len(), 2);
        assert!(r.iter().any(|z| z.re == 0.0 && z.im == 0.0));
        assert!(r.iter().any(|z| (z.re + 3.0).abs() < 1e-12));
        assert!(Polynomial::constant(4.0).roots().is_empty());
    }

    #[test]
    fn display_format() {
        assert_eq!(Polynomial::from([2.0, -3.0, 1.0]).to_string(), "2 s^2 - 3 s + 1");
        assert_eq!(Polynomial::from([1.0, 0.0]).to_string(), "s");
        assert_eq!(Polynomial::from([-1.0, 0.0, 0.0]).to_string(), "-s^2");
        assert_eq!(Polynomial::zero().to_string(), "0");
    }
}
