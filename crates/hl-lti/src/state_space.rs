//! State-space realization of a proper transfer function.
//!
//! Uses controllable canonical form. For a monic denominator
//! `s^n + a_1 s^(n-1) + ... + a_n` and numerator `b_0 s^n + ... + b_n`:
//!
//! ```text
//! A = [-a_1 -a_2 ... -a_n]     B = [1]
//!     [  1    0  ...   0 ]         [0]
//!     [  :    ⋱        : ]         [:]
//!     [  0  ...   1    0 ]         [0]
//!
//! C = [b_1 - b_0 a_1, ..., b_n - b_0 a_n]    D = b_0
//! ```

use nalgebra::{DMatrix, DVector, RowDVector};

use crate::error::{LtiError, LtiResult};
use crate::transfer_function::TransferFunction;

/// Continuous-time SISO state-space model `dx/dt = Ax + Bu`, `y = Cx + Du`.
#[derive(Clone, Debug)]
pub struct StateSpace {
    pub a: DMatrix<f64>,
    pub b: DVector<f64>,
    pub c: RowDVector<f64>,
    pub d: f64,
}

impl StateSpace {
    /// Realize a proper transfer function.
    ///
    /// # Errors
    ///
    /// Returns `LtiError::Improper` when the numerator degree exceeds the
    /// denominator degree.
    pub fn from_transfer_function(tf: &TransferFunction) -> LtiResult<Self> {
        if !tf.is_proper() {
            return Err(LtiError::Improper {
                num_degree: tf.num().degree(),
                den_degree: tf.den().degree(),
            });
        }

        let monic = tf.normalized();
        let den = monic.den().coeffs();
        let n = den.len() - 1;

        // Numerator padded to n + 1 coefficients
        let mut num = vec![0.0; n + 1];
        let raw = monic.num().coeffs();
        num[n + 1 - raw.len()..].copy_from_slice(raw);

        let d = num[0];

        let mut a = DMatrix::<f64>::zeros(n, n);
        for j in 0..n {
            a[(0, j)] = -den[j + 1];
        }
        for i in 1..n {
            a[(i, i - 1)] = 1.0;
        }

        let mut b = DVector::<f64>::zeros(n);
        if n > 0 {
            b[0] = 1.0;
        }

        let c = RowDVector::<f64>::from_iterator(n, (0..n).map(|i| num[i + 1] - d * den[i + 1]));

        Ok(Self { a, b, c, d })
    }

    /// Number of states.
    pub fn order(&self) -> usize {
        self.a.nrows()
    }

    /// State derivative for input `u`.
    pub fn derivative(&self, x: &DVector<f64>, u: f64) -> DVector<f64> {
        &self.a * x + &self.b * u
    }

    /// Output for state `x` and input `u`.
    pub fn output(&self, x: &DVector<f64>, u: f64) -> f64 {
        (&self.c * x)[(0, 0)] + self.d * u
    }
}
