// ---------------------------------------------------------------------------
// Tabulated aerodynamic coefficients vs angle of attack
// ---------------------------------------------------------------------------

/// Lift, drag and pitching-moment coefficients at one angle of attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AeroCoefficients {
    pub cl: f64,
    pub cd: f64,
    pub cm: f64,
}

/// One coefficient curve with its precomputed knot slopes.
#[derive(Debug, Clone)]
struct Curve {
    values: Vec<f64>,
    slopes: Vec<f64>,
}

impl Curve {
    fn new(alpha: &[f64], values: Vec<f64>) -> Self {
        let slopes = monotone_slopes(alpha, &values);
        Self { values, slopes }
    }
}

/// CL / CD / CM sampled over angle of attack.
///
/// Between samples the curves are monotone piecewise-cubic Hermite
/// interpolants (Fritsch–Butland slopes): C¹, deterministic, and they never
/// overshoot the tabulated data. Outside the sampled range every curve is
/// held at its end value.
#[derive(Debug, Clone)]
pub struct CoefficientTable {
    alpha: Vec<f64>, // rad, strictly increasing
    cl: Curve,
    cd: Curve,
    cm: Curve,
}

impl CoefficientTable {
    /// Build from `[alpha_deg, cl, cd, cm]` rows. Returns the reason on failure.
    pub fn from_rows_deg(rows: &[[f64; 4]]) -> Result<Self, String> {
        if rows.len() < 2 {
            return Err(format!(
                "coefficient table needs at least 2 rows, got {}",
                rows.len()
            ));
        }
        for (i, row) in rows.iter().enumerate() {
            if row.iter().any(|v| !v.is_finite()) {
                return Err(format!("coefficient row {} has a non-finite value", i));
            }
        }
        for (i, pair) in rows.windows(2).enumerate() {
            if pair[1][0] <= pair[0][0] {
                return Err(format!(
                    "angles of attack must be strictly increasing (row {} -> {})",
                    i,
                    i + 1
                ));
            }
        }

        let alpha: Vec<f64> = rows.iter().map(|r| r[0].to_radians()).collect();
        let column = |c: usize| rows.iter().map(|r| r[c]).collect::<Vec<_>>();
        Ok(Self {
            cl: Curve::new(&alpha, column(1)),
            cd: Curve::new(&alpha, column(2)),
            cm: Curve::new(&alpha, column(3)),
            alpha,
        })
    }

    /// Sampled angle-of-attack range, radians.
    pub fn alpha_range(&self) -> (f64, f64) {
        (self.alpha[0], self.alpha[self.alpha.len() - 1])
    }

    pub fn len(&self) -> usize {
        self.alpha.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alpha.is_empty()
    }

    /// Evaluate all three coefficients at `alpha` (rad).
    pub fn eval(&self, alpha: f64) -> AeroCoefficients {
        let (lo, hi) = self.alpha_range();
        let x = alpha.clamp(lo, hi);
        // Last knot index i with alpha[i] <= x, kept off the final knot so
        // [i, i+1] is always a valid interval.
        let i = self
            .alpha
            .partition_point(|&a| a <= x)
            .saturating_sub(1)
            .min(self.alpha.len() - 2);

        AeroCoefficients {
            cl: hermite(&self.alpha, &self.cl, i, x),
            cd: hermite(&self.alpha, &self.cd, i, x),
            cm: hermite(&self.alpha, &self.cm, i, x),
        }
    }
}

fn hermite(alpha: &[f64], curve: &Curve, i: usize, x: f64) -> f64 {
    let h = alpha[i + 1] - alpha[i];
    let t = (x - alpha[i]) / h;
    let t2 = t * t;
    let t3 = t2 * t;

    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    h00 * curve.values[i]
        + h10 * h * curve.slopes[i]
        + h01 * curve.values[i + 1]
        + h11 * h * curve.slopes[i + 1]
}

/// Knot slopes: weighted harmonic mean of the neighbouring secants, zero at
/// local extrema, one-sided secant at the ends.
fn monotone_slopes(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let d: Vec<f64> = (0..n - 1).map(|i| (y[i + 1] - y[i]) / h[i]).collect();

    let mut m = vec![0.0; n];
    m[0] = d[0];
    m[n - 1] = d[n - 2];
    for i in 1..n - 1 {
        let (d0, d1) = (d[i - 1], d[i]);
        if d0 * d1 <= 0.0 {
            m[i] = 0.0;
        } else {
            let (h0, h1) = (h[i - 1], h[i]);
            let w0 = 2.0 * h1 + h0;
            let w1 = h1 + 2.0 * h0;
            m[i] = (w0 + w1) / (w0 / d0 + w1 / d1);
        }
    }
    m
}
