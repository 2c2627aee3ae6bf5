use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use mcsim::engine::progress::{Progress, ProgressCallback};

const TEMPLATE: &str = "{prefix:>12.cyan.bold} [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}";

/// Renders engine progress as a single bar on stderr. The phase name is the
/// bar prefix and the latest sampled energy per particle is its message.
#[derive(Clone)]
pub struct CliProgressHandler {
    bar: ProgressBar,
    echo_samples: bool,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target).with_style(Self::style());
        bar.finish_and_clear();
        Self {
            bar,
            echo_samples: false,
        }
    }

    /// Also prints a `step energy/particle` line for every recorded frame.
    pub fn with_sample_echo(mut self, echo: bool) -> Self {
        self.echo_samples = echo;
        self
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let bar = self.bar.clone();
        let echo_samples = self.echo_samples;

        Box::new(move |progress: Progress| match progress {
            Progress::PhaseStart { name } => {
                bar.reset();
                bar.set_length(0);
                bar.set_prefix(name);
                bar.set_message("");
            }
            Progress::PhaseFinish => bar.finish(),
            Progress::TaskStart { total_steps } => {
                bar.set_length(total_steps);
                bar.set_position(0);
            }
            Progress::TaskAdvance { steps } => bar.inc(steps),
            Progress::TaskFinish => {
                if let Some(length) = bar.length() {
                    bar.set_position(length);
                }
            }
            Progress::Sample {
                step,
                energy_per_particle,
            } => {
                bar.set_message(format!("E/N {:.4}", energy_per_particle));
                if echo_samples {
                    bar.println(format!("{:>12} {:>14.6}", step, energy_per_particle));
                }
            }
            Progress::Message(msg) => bar.println(format!("  {}", msg)),
        })
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template(TEMPLATE)
            .expect("Failed to create progress bar template")
            .progress_chars("=> ")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
