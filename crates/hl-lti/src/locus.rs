//! Root locus: closed-loop poles of `D(s) + k N(s)` over a gain sweep.

use nalgebra::Complex;
use serde::Serialize;

use crate::error::{LtiError, LtiResult};
use crate::transfer_function::TransferFunction;

/// Closed-loop poles for one loop gain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocusPoint {
    pub gain: f64,
    #[serde(serialize_with = "serialize_roots")]
    pub poles: Vec<Complex<f64>>,
}

fn serialize_roots<S: serde::Serializer>(
    roots: &[Complex<f64>],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeSeq;
    let mut seq = serializer.serialize_seq(Some(roots.len()))?;
    for r in roots {
        seq.serialize_element(&[r.re, r.im])?;
    }
    seq.end()
}

/// Poles of `open_loop` closed through unity feedback with extra gain `k`,
/// for every `k` in `gains`.
///
/// # Errors
///
/// - `LtiError::InvalidArg` for a non-finite gain
/// - `LtiError::ZeroDenominator` if the characteristic polynomial vanishes
pub fn root_locus(open_loop: &TransferFunction, gains: &[f64]) -> LtiResult<Vec<LocusPoint>> {
    gains
        .iter()
        .map(|&gain| {
            if !gain.is_finite() {
                return Err(LtiError::InvalidArg {
                    what: "root locus gain must be finite",
                });
            }
            let characteristic = open_loop.den() + &open_loop.num().scale(gain);
            if characteristic.is_zero() {
                return Err(LtiError::ZeroDenominator);
            }
            Ok(LocusPoint {
                gain,
                poles: characteristic.roots(),
            })
        })
        .collect()
}
