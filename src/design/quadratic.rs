use crate::design::Topology;
use crate::error::{DesignError, Result};

/// Design quadratic `a·n² + b·n + c = 0` in the shape factor `n`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadratic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Quadratic {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    pub fn discriminant(&self) -> f64 {
        self.b * self.b - 4.0 * self.a * self.c
    }

    /// Both real roots, `None` when the discriminant is negative
    pub fn roots(&self) -> Option<(f64, f64)> {
        let discriminant = self.discriminant();
        if discriminant < 0.0 || discriminant.is_nan() {
            return None;
        }
        let sqrt_d = discriminant.sqrt();
        Some((
            (-self.b + sqrt_d) / (2.0 * self.a),
            (-self.b - sqrt_d) / (2.0 * self.a),
        ))
    }
}

/// Solve the design quadratic and pick the shape factor.
///
/// The larger root is always taken. A negative discriminant, or a larger
/// root that is not strictly positive, means the requested combination of
/// gain and Q has no physical realization.
pub fn select_shape_factor(
    quadratic: &Quadratic,
    topology: Topology,
    hint: &'static str,
) -> Result<f64> {
    let discriminant = quadratic.discriminant();
    let infeasible = DesignError::DesignInfeasible {
        topology,
        discriminant,
        hint,
    };

    let Some((n1, n2)) = quadratic.roots() else {
        log::debug!(
            "{}: quadratic {:?} has discriminant {:.6e}, no real roots",
            topology,
            quadratic,
            discriminant
        );
        return Err(infeasible);
    };

    let n = n1.max(n2);
    log::debug!(
        "{}: discriminant {:.6e}, roots n1={:.6} n2={:.6}, selected n={:.6}",
        topology,
        discriminant,
        n1,
        n2,
        n
    );

    if n > 0.0 && n.is_finite() {
        Ok(n)
    } else {
        Err(infeasible)
    }
}
