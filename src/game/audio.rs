// game/audio.rs

use rand::Rng;
use rand_distr::StandardNormal;
use std::f64::consts::TAU;

/// Parameters of the "recovered log" sound: a faint tone buried in noise
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalSpec {
    pub tone_hz: f64,
    pub tone_amplitude: f64,
    /// Standard deviation of the zero-mean Gaussian noise
    pub noise_std_dev: f64,
    pub sample_rate: u32,
    pub duration_secs: f64,
}

impl SignalSpec {
    /// 42 Hz at 0.1 under N(0, 0.5) noise, two seconds at 44.1 kHz
    pub const RECOVERED_LOG: SignalSpec = SignalSpec {
        tone_hz: 42.0,
        tone_amplitude: 0.1,
        noise_std_dev: 0.5,
        sample_rate: 44_100,
        duration_secs: 2.0,
    };

    pub fn sample_count(&self) -> usize {
        (self.sample_rate as f64 * self.duration_secs).round() as usize
    }

    /// Render the signal, drawing noise from `rng`
    ///
    /// Samples are not clipped; with the default noise level a few land
    /// outside [-1, 1].
    pub fn synthesize<R: Rng + ?Sized>(&self, rng: &mut R) -> AudioClip {
        let rate = self.sample_rate as f64;

        let samples = (0..self.sample_count())
            .map(|i| {
                let t = i as f64 / rate;
                let tone = (TAU * self.tone_hz * t).sin() * self.tone_amplitude;
                let noise: f64 = rng.sample(StandardNormal);
                (tone + noise * self.noise_std_dev) as f32
            })
            .collect();

        AudioClip {
            samples,
            sample_rate: self.sample_rate,
        }
    }
}

impl Default for SignalSpec {
    fn default() -> Self {
        Self::RECOVERED_LOG
    }
}

/// Mono PCM samples plus their rate
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioClip {
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Largest absolute sample value
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0_f32, |acc, s| acc.max(s.abs()))
    }

    pub fn rms(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
        (sum / self.samples.len() as f64).sqrt() as f32
    }
}
