use std::f64::consts::PI;

/// Distance of the Lennard-Jones minimum in reduced units, `2^(1/6)`.
pub const LJ_MINIMUM_DISTANCE: f64 = 1.122_462_048_309_373;

/// Reduced-unit Lennard-Jones 12-6 potential, `4 (r^-12 - r^-6)`.
///
/// Finite for every `r > 0` and undefined at `r = 0`; callers are expected to
/// reject coincident particles before evaluating it.
#[inline]
pub fn lennard_jones(dist: f64) -> f64 {
    let inv_r6 = dist.powi(-6);
    let inv_r12 = inv_r6 * inv_r6;
    4.0 * (inv_r12 - inv_r6)
}

/// Analytic estimate of the interaction energy beyond `cutoff`, assuming a
/// uniform particle density outside the cutoff sphere.
#[inline]
pub fn tail_correction(num_particles: usize, box_length: f64, cutoff: f64) -> f64 {
    let volume = box_length.powi(3);
    let n = num_particles as f64;
    let inv_rc3 = cutoff.powi(-3);
    let inv_rc9 = inv_rc3.powi(3);
    (8.0 * PI * n * n / (3.0 * volume)) * (inv_rc9 / 3.0 - inv_rc3)
}
