//! SI unit aliases for the plant constants.

use uom::si::f64::{
    Area as UomArea, ElectricalResistance as UomElectricalResistance,
    Inductance as UomInductance, MomentOfInertia as UomMomentOfInertia,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Inertia = UomMomentOfInertia;
pub type Inductance = UomInductance;
pub type Resistance = UomElectricalResistance;

#[inline]
pub fn kgm2(v: f64) -> Inertia {
    use uom::si::moment_of_inertia::kilogram_square_meter;
    Inertia::new::<kilogram_square_meter>(v)
}

#[inline]
pub fn ohm(v: f64) -> Resistance {
    use uom::si::electrical_resistance::ohm;
    Resistance::new::<ohm>(v)
}

#[inline]
pub fn henry(v: f64) -> Inductance {
    use uom::si::inductance::henry;
    Inductance::new::<henry>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}
