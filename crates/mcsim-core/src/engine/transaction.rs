use crate::core::models::configuration::Configuration;
use nalgebra::{Point3, Vector3};

/// A single-particle displacement that has been applied to a configuration
/// but not yet committed.
///
/// The particle's prior position is stored when the move is proposed, and
/// reverting writes it back verbatim. A trial move that is dropped without
/// calling [`TrialMove::commit`] is reverted, so an error raised while the
/// move is being evaluated never leaves the configuration displaced.
#[must_use = "a trial move is reverted when dropped; call commit() to keep it"]
pub struct TrialMove<'a> {
    configuration: &'a mut Configuration,
    particle: usize,
    displacement: Vector3<f64>,
    previous: Point3<f64>,
    resolved: bool,
}

impl<'a> TrialMove<'a> {
    /// Displaces `particle` by `displacement` in place.
    ///
    /// Panics if `particle` is out of bounds.
    pub fn propose(
        configuration: &'a mut Configuration,
        particle: usize,
        displacement: Vector3<f64>,
    ) -> Self {
        let previous = configuration.displace(particle, &displacement);
        Self {
            configuration,
            particle,
            displacement,
            previous,
            resolved: false,
        }
    }

    /// The configuration with the trial displacement applied.
    #[inline]
    pub fn configuration(&self) -> &Configuration {
        &*self.configuration
    }

    #[inline]
    pub fn particle(&self) -> usize {
        self.particle
    }

    #[inline]
    pub fn displacement(&self) -> &Vector3<f64> {
        &self.displacement
    }

    #[inline]
    pub fn previous_position(&self) -> &Point3<f64> {
        &self.previous
    }

    /// Keeps the displaced position.
    pub fn commit(mut self) {
        self.resolved = true;
    }

    /// Restores the exact position the particle had before the move.
    pub fn revert(mut self) {
        self.restore();
    }

    fn restore(&mut self) {
        if !self.resolved {
            self.configuration.set_position(self.particle, self.previous);
            self.resolved = true;
        }
    }
}

impl Drop for TrialMove<'_> {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Runs `evaluate` against a configuration with `particle` displaced, keeping
/// the move if it returns `Ok(true)` and reverting it otherwise.
pub fn with_trial_move<F, E>(
    configuration: &mut Configuration,
    particle: usize,
    displacement: Vector3<f64>,
    evaluate: F,
) -> Result<bool, E>
where
    F: FnOnce(&Configuration) -> Result<bool, E>,
{
    let trial = TrialMove::propose(configuration, particle, displacement);
    let keep = evaluate(trial.configuration())?;
    if keep {
        trial.commit();
    } else {
        trial.revert();
    }
    Ok(keep)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_particles() -> Configuration {
        Configuration::new(vec![
            Point3::new(0.1, 0.2, 0.3),
            Point3::new(1.0, 1.0, 1.0),
        ])
    }

    #[test]
    fn proposed_move_is_visible_before_resolution() {
        let mut configuration = two_particles();
        let trial = TrialMove::propose(&mut configuration, 0, Vector3::new(0.5, 0.0, 0.0));

        assert_eq!(trial.particle(), 0);
        assert_eq!(trial.previous_position(), &Point3::new(0.1, 0.2, 0.3));
        assert_eq!(
            trial.configuration().position(0),
            Some(&Point3::new(0.6, 0.2, 0.3))
        );
        trial.commit();
    }

    #[test]
    fn commit_keeps_displaced_position() {
        let mut configuration = two_particles();
        TrialMove::propose(&mut configuration, 1, Vector3::new(0.25, -0.5, 0.0)).commit();
        assert_eq!(
            configuration.position(1),
            Some(&Point3::new(1.25, 0.5, 1.0))
        );
    }

    #[test]
    fn revert_restores_bit_identical_position() {
        let mut configuration = two_particles();
        let original = configuration.clone();
        // 0.1 + 0.7 - 0.7 != 0.1 in floating point; the stored position is used instead.
        TrialMove::propose(&mut configuration, 0, Vector3::new(0.7, 1e-17, -0.3)).revert();
        assert_eq!(configuration, original);
    }

    #[test]
    fn dropping_an_unresolved_move_reverts_it() {
        let mut configuration = two_particles();
        let original = configuration.clone();
        {
            let _trial = TrialMove::propose(&mut configuration, 1, Vector3::new(3.0, 3.0, 3.0));
        }
        assert_eq!(configuration, original);
    }

    #[test]
    fn with_trial_move_commits_or_reverts_on_decision() {
        let mut configuration = two_particles();
        let original = configuration.clone();

        let push = Vector3::new(1.0, 0.0, 0.0);
        let kept = with_trial_move::<_, ()>(&mut configuration, 0, push, |c| {
            Ok(c.position(0).unwrap().x > 1.0)
        })
        .unwrap();
        assert!(kept);
        assert_eq!(configuration.position(0).unwrap().x, 1.1);

        let mut configuration = original.clone();
        let kept =
            with_trial_move::<_, ()>(&mut configuration, 0, push, |_| Ok(false)).unwrap();
        assert!(!kept);
        assert_eq!(configuration, original);
    }

    #[test]
    fn with_trial_move_reverts_when_evaluation_fails() {
        let mut configuration = two_particles();
        let original = configuration.clone();
        let result: Result<bool, &str> =
            with_trial_move(&mut configuration, 1, Vector3::new(0.5, 0.5, 0.5), |_| {
                Err("evaluation failed")
            });
        assert_eq!(result, Err("evaluation failed"));
        assert_eq!(configuration, original);
    }
}
