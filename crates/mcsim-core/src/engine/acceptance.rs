use rand::Rng;

/// Probability of accepting a move that changes the energy by `delta`.
#[inline]
pub fn acceptance_probability(delta: f64, beta: f64) -> f64 {
    if delta <= 0.0 {
        1.0
    } else {
        (-beta * delta).exp()
    }
}

/// Metropolis acceptance rule.
///
/// Downhill and neutral moves (`delta <= 0`) are accepted without touching the
/// random stream. Uphill moves consume exactly one uniform draw `u` in `[0, 1)`
/// and are accepted iff `u < exp(-beta * delta)`.
#[inline]
pub fn metropolis_criterion<R: Rng + ?Sized>(delta: f64, beta: f64, rng: &mut R) -> bool {
    if delta <= 0.0 {
        return true;
    }
    let draw: f64 = rng.r#gen();
    draw < (-beta * delta).exp()
}
