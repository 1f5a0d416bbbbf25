use glam::Vec3;

/// Lower bound for the per-frame parameter step.
pub const MIN_SPEED: f32 = 0.001;

/// Clamp a requested step to at least [`MIN_SPEED`]. Non-finite requests
/// fall back to the minimum.
#[must_use]
pub fn clamp_speed(speed: f32) -> f32 {
    if speed.is_finite() {
        speed.max(MIN_SPEED)
    } else {
        MIN_SPEED
    }
}

/// Coefficients of `pos(t) = c + b·t + a·t²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathCoefficients {
    /// Quadratic term.
    pub a: Vec3,
    /// Linear term.
    pub b: Vec3,
    /// Constant term (the start point).
    pub c: Vec3,
}

impl PathCoefficients {
    /// Fit the quadratic passing through `p0` at `t = 0`, `p1` at
    /// `t = 0.5` and `p2` at `t = 1`.
    pub fn fit(p0: Vec3, p1: Vec3, p2: Vec3) -> Self {
        Self {
            a: 2.0 * (p0 + p2) - 4.0 * p1,
            b: 4.0 * p1 - 3.0 * p0 - p2,
            c: p0,
        }
    }

    /// Position at parameter `t`.
    #[inline]
    pub fn evaluate(&self, t: f32) -> Vec3 {
        self.c + self.b * t + self.a * t * t
    }
}

/// Result of one [`PathMotion::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionStep {
    /// Position to write into the entity transform.
    pub position: Vec3,
    /// Whether the curve end was reached on this step.
    pub finished: bool,
}

/// Quadratic path driven one parameter step per frame.
///
/// Two placed points plus the entity's position at the time the second
/// point is placed define the curve. The point buffer is cleared when the
/// curve is fit, and motion returns to idle at `t = 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathMotion {
    coefficients: Option<PathCoefficients>,
    current_t: f32,
    speed: f32,
    collected: Vec<Vec3>,
}

impl Default for PathMotion {
    fn default() -> Self {
        Self::new(0.01)
    }
}

impl PathMotion {
    /// Idle motion advancing `speed` per frame once started.
    pub fn new(speed: f32) -> Self {
        Self {
            coefficients: None,
            current_t: 0.0,
            speed: clamp_speed(speed),
            collected: Vec::with_capacity(2),
        }
    }

    /// Whether a curve is currently being followed.
    pub fn is_moving(&self) -> bool {
        self.coefficients.is_some()
    }

    /// Curve parameter in `[0, 1]`.
    pub fn current_t(&self) -> f32 {
        self.current_t
    }

    /// Per-frame parameter step.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Points waiting for the curve fit.
    pub fn collected_points(&self) -> &[Vec3] {
        &self.collected
    }

    /// Active curve, if moving.
    pub fn coefficients(&self) -> Option<PathCoefficients> {
        self.coefficients
    }

    /// Set the per-frame step, clamped to at least [`MIN_SPEED`].
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = clamp_speed(speed);
    }

    /// Record a path point. The second point starts the motion from
    /// `current_position` through the first point to the second.
    ///
    /// Returns whether motion started. Points are ignored while moving.
    pub fn place_point(&mut self, point: Vec3, current_position: Vec3) -> bool {
        if self.is_moving() {
            return false;
        }
        self.collected.push(point);
        if self.collected.len() < 2 {
            return false;
        }
        let (p1, p2) = (self.collected[0], self.collected[1]);
        self.start(current_position, p1, p2);
        true
    }

    /// Start following the curve through `p0`, `p1`, `p2`. Clears any
    /// collected points.
    pub fn start(&mut self, p0: Vec3, p1: Vec3, p2: Vec3) {
        self.coefficients = Some(PathCoefficients::fit(p0, p1, p2));
        self.current_t = 0.0;
        self.collected.clear();
        log::debug!("path motion started: {p0} -> {p1} -> {p2}");
    }

    /// Step the parameter and return the new position, or `None` when
    /// idle. Resets to idle once `t` reaches 1.
    pub fn advance(&mut self) -> Option<MotionStep> {
        let coefficients = self.coefficients?;
        self.current_t = (self.current_t + self.speed).min(1.0);
        let position = coefficients.evaluate(self.current_t);
        let finished = self.current_t >= 1.0;
        if finished {
            self.coefficients = None;
            self.current_t = 0.0;
        }
        Some(MotionStep { position, finished })
    }

    /// Stop where the motion currently is.
    pub fn cancel(&mut self) {
        self.coefficients = None;
        self.current_t = 0.0;
    }

    /// Forget points placed so far.
    pub fn clear_points(&mut self) {
        self.collected.clear();
    }
}
