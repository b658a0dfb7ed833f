/// A scalar quadratic `f(t) = a*t^2 + b*t + c`.
///
/// One instance describes one spatial axis of a [`super::Trajectory`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticCurve {
    a: f64,
    b: f64,
    c: f64,
}

impl QuadraticCurve {
    /// Creates a quadratic from its coefficients, leading term first.
    #[must_use]
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Creates a quadratic from a `[a, b, c]` triple.
    #[must_use]
    pub fn from_coefficients(coefficients: [f64; 3]) -> Self {
        let [a, b, c] = coefficients;
        Self { a, b, c }
    }

    /// Returns the leading (`t^2`) coefficient.
    #[must_use]
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Returns the linear coefficient.
    #[must_use]
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Returns the constant coefficient.
    #[must_use]
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Evaluates `a*t^2 + b*t + c`.
    #[must_use]
    pub fn evaluate(&self, t: f64) -> f64 {
        (self.a * t + self.b) * t + self.c
    }

    /// Evaluates the derivative `2*a*t + b`.
    #[must_use]
    pub fn derivative(&self, t: f64) -> f64 {
        2.0 * self.a * t + self.b
    }

    /// Returns `true` if all coefficients are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.c.is_finite()
    }
}
