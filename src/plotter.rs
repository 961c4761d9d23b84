use glam::DVec3;

use crate::config::PlotConfig;
use crate::core::PlotCurve;
use crate::expr::{Bindings, Expression, ParseError};

/// Evenly spaced samples over `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleDomain {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for SampleDomain {
    fn default() -> Self {
        Self {
            min: -5000.0,
            max: 5000.0,
            step: 0.1,
        }
    }
}

/// Largest number of samples a domain may produce.
pub const MAX_SAMPLES: usize = 10_000_000;

impl SampleDomain {
    /// Number of whole steps in the range, and whether `step` divides it.
    /// `None` for empty, malformed or oversized domains.
    fn intervals(&self) -> Option<(usize, bool)> {
        if !(self.step > 0.0) || !(self.max >= self.min) {
            return None;
        }
        let ratio = (self.max - self.min) / self.step;
        if !(ratio < MAX_SAMPLES as f64) {
            return None;
        }
        let nearest = ratio.round();
        if (ratio - nearest).abs() <= 1e-9 * nearest.max(1.0) {
            Some((nearest as usize, true))
        } else {
            Some((ratio.floor() as usize, false))
        }
    }

    pub fn sample_count(&self) -> usize {
        self.intervals().map_or(0, |(n, _)| n + 1)
    }

    /// The `i`th sample, `step` apart from its neighbours starting at `min`.
    /// The last sample is the largest one not past `max`.
    ///
    /// When `step` divides the range the samples are interpolated by index
    /// instead, so both ends and values like 0 and 2 land exactly.
    pub fn sample(&self, i: usize) -> f64 {
        match self.intervals() {
            Some((last, true)) if last > 0 => {
                let i = i.min(last) as f64;
                let last = last as f64;
                (self.min * (last - i) + self.max * i) / last
            }
            Some((last, false)) => self.min + i.min(last) as f64 * self.step,
            _ => self.min,
        }
    }

    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.sample_count()).map(|i| self.sample(i))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PlotOutcome {
    /// Input was blank; no curve is shown.
    Cleared,
    /// Input did not parse. The previous curve is already gone.
    Rejected(ParseError),
    Plotted { samples: usize, skipped: usize },
}

impl PlotOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, PlotOutcome::Rejected(_))
    }
}

#[derive(Clone, Debug)]
pub struct FunctionPlotter {
    domain: SampleDomain,
    variable: String,
    curve: Option<PlotCurve>,
}

impl Default for FunctionPlotter {
    fn default() -> Self {
        Self::new(&PlotConfig::default())
    }
}

impl FunctionPlotter {
    pub fn new(config: &PlotConfig) -> Self {
        Self {
            domain: SampleDomain {
                min: config.min,
                max: config.max,
                step: config.step,
            },
            variable: config.variable.clone(),
            curve: None,
        }
    }

    pub fn domain(&self) -> SampleDomain {
        self.domain
    }

    pub fn curve(&self) -> Option<&PlotCurve> {
        self.curve.as_ref()
    }

    /// Replace the current curve with a plot of `text`.
    ///
    /// The old curve is dropped before parsing, so a rejected input leaves
    /// nothing on screen.
    pub fn plot(&mut self, text: &str) -> PlotOutcome {
        self.curve = None;

        let text = text.trim();
        if text.is_empty() {
            tracing::debug!("plot input empty, curve cleared");
            return PlotOutcome::Cleared;
        }

        let expression = match Expression::parse(text) {
            Ok(expression) => expression,
            Err(err) => {
                tracing::warn!(input = text, error = %err, "rejected function");
                return PlotOutcome::Rejected(err);
            }
        };

        let count = self.domain.sample_count();
        let mut bindings = Bindings::new();
        let mut points = Vec::with_capacity(count);
        let mut skipped = 0;

        for i in 0..count {
            let x = self.domain.sample(i);
            bindings.set(&self.variable, x);
            match expression.evaluate(&bindings) {
                Ok(y) => points.push(DVec3::new(x, y, 0.0)),
                Err(err) => {
                    skipped += 1;
                    tracing::trace!(x, error = %err, "sample skipped");
                }
            }
        }

        tracing::info!(
            input = text,
            samples = points.len(),
            skipped,
            "plotted function"
        );
        let samples = points.len();
        self.curve = Some(PlotCurve {
            expression: expression.source().to_owned(),
            points,
        });
        PlotOutcome::Plotted { samples, skipped }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_domain_hits_integers_exactly() {
        let domain = SampleDomain::default();
        assert_eq!(domain.sample_count(), 100_001);
        assert_eq!(domain.sample(0), -5000.0);
        assert_eq!(domain.sample(50_000), 0.0);
        assert_eq!(domain.sample(50_020), 2.0);
        assert_eq!(domain.sample(50_001), 0.1);
        assert_eq!(domain.sample(49_999), -0.1);
        assert_eq!(domain.sample(100_000), 5000.0);
    }

    #[test]
    fn degenerate_domains() {
        let empty = SampleDomain {
            min: 1.0,
            max: 0.0,
            step: 0.1,
        };
        assert_eq!(empty.sample_count(), 0);
        let single = SampleDomain {
            min: 3.0,
            max: 3.0,
            step: 1.0,
        };
        assert_eq!(single.samples().collect::<Vec<_>>(), vec![3.0]);
    }

    #[test]
    fn uneven_step_keeps_its_spacing() {
        let domain = SampleDomain {
            min: 0.0,
            max: 1.0,
            step: 0.3,
        };
        let samples: Vec<f64> = domain.samples().collect();
        assert_eq!(samples.len(), 4);
        for (i, x) in samples.iter().enumerate() {
            assert!((x - 0.3 * i as f64).abs() < 1e-12, "{x}");
        }
        assert!(samples.iter().all(|&x| x <= 1.0));
    }

    #[test]
    fn oversized_domains_produce_nothing() {
        let huge = SampleDomain {
            min: -5000.0,
            max: 5000.0,
            step: 1e-9,
        };
        assert_eq!(huge.sample_count(), 0);
        let unbounded = SampleDomain {
            min: f64::MIN,
            max: f64::MAX,
            step: 1.0,
        };
        assert_eq!(unbounded.sample_count(), 0);
    }
}
