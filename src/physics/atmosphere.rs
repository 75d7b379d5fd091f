use crate::dynamics::state::G0;

// ---------------------------------------------------------------------------
// ISA standard atmosphere, troposphere and lower tropopause
// ---------------------------------------------------------------------------

const R_AIR: f64 = 287.052_87; // specific gas constant for dry air, J/(kg·K)

const T0: f64 = 288.15;    // sea-level temperature, K
const P0: f64 = 101_325.0; // sea-level pressure, Pa
const LAPSE: f64 = -0.0065; // K/m

const H_TROPOPAUSE: f64 = 11_000.0; // m
const T_TROPOPAUSE: f64 = 216.65;   // K
const H_TOP: f64 = 20_000.0;        // m, upper validity limit

/// Atmospheric properties at a given geometric altitude.
#[derive(Debug, Clone, Copy)]
pub struct Atmo {
    pub density: f64,     // kg/m^3
    pub pressure: f64,    // Pa
    pub temperature: f64, // K
}

/// ISA air properties from sea level to 20 km.
///
/// Negative altitudes clamp to sea level, altitudes above 20 km clamp to 20 km.
/// Throwing sites live well inside the troposphere; the isothermal layer only
/// keeps the function total.
pub fn isa(altitude_m: f64) -> Atmo {
    let h = altitude_m.clamp(0.0, H_TOP);

    let (temperature, pressure) = if h < H_TROPOPAUSE {
        let t = T0 + LAPSE * h;
        (t, P0 * (t / T0).powf(-G0 / (LAPSE * R_AIR)))
    } else {
        let t_base = T0 + LAPSE * H_TROPOPAUSE;
        let p_base = P0 * (t_base / T0).powf(-G0 / (LAPSE * R_AIR));
        let p = p_base * ((-G0 / (R_AIR * T_TROPOPAUSE)) * (h - H_TROPOPAUSE)).exp();
        (T_TROPOPAUSE, p)
    };

    Atmo {
        density: pressure / (R_AIR * temperature),
        pressure,
        temperature,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sea_level_standard_values() {
        let a = isa(0.0);
        assert!((a.temperature - 288.15).abs() < 0.01);
        assert!((a.pressure - 101_325.0).abs() < 1.0);
        assert!((a.density - 1.225).abs() < 0.001);
    }

    #[test]
    fn mile_high_course_is_thinner() {
        // Denver-ish course at 1600 m: roughly 15% thinner air.
        let ratio = isa(1600.0).density / isa(0.0).density;
        assert!(ratio > 0.83 && ratio < 0.87, "ratio {}", ratio);
    }

    #[test]
    fn continuous_at_tropopause() {
        let below = isa(H_TROPOPAUSE - 1e-6);
        let above = isa(H_TROPOPAUSE + 1e-6);
        assert!((below.pressure - above.pressure).abs() < 1e-2);
        assert!((below.temperature - above.temperature).abs() < 1e-3);
    }

    #[test]
    fn negative_altitude_clamps_to_sea_level() {
        let a = isa(-500.0);
        assert!((a.temperature - 288.15).abs() < 0.01);
    }
}
