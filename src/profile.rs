//! Print-process profile and physical estimates
//!
//! All process constants live in [`PrintProfile`] and are passed explicitly
//! to the estimators and the bounds checker.
//!
//! # Example
//!
//! ```
//! use studio3d::PrintProfile;
//!
//! let profile = PrintProfile::default();
//! assert_eq!(profile.estimate_print_time(40.0).to_string(), "~1h 0m");
//! assert_eq!(profile.estimate_print_time(20.0).to_string(), "~30m");
//!
//! let filament = profile.estimate_filament(100.0);
//! assert!((filament.weight_grams - 124.0).abs() < 1e-9);
//! assert!((filament.cost_usd - 1.55).abs() < 1e-9);
//! ```

use std::fmt;

/// Printable cuboid, centred on the origin in X/Z with its floor at `y = 0`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildEnvelope {
    /// Extent along X (cm)
    pub width: f64,
    /// Extent along Z (cm)
    pub depth: f64,
    /// Extent along Y (cm)
    pub height: f64,
}

impl BuildEnvelope {
    /// Envelope with separate extents
    pub fn new(width: f64, depth: f64, height: f64) -> Self {
        Self {
            width,
            depth,
            height,
        }
    }

    /// Cubic envelope
    pub fn cube(size: f64) -> Self {
        Self::new(size, size, size)
    }
}

impl Default for BuildEnvelope {
    /// 256 mm cube
    fn default() -> Self {
        Self::cube(25.6)
    }
}

/// Material and process constants for one printer/filament combination
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrintProfile {
    /// Build volume
    pub envelope: BuildEnvelope,
    /// Deposition rate in cm³ per hour
    pub print_rate: f64,
    /// Filament density in g/cm³
    pub filament_density: f64,
    /// Filament price in USD per gram
    pub price_per_gram: f64,
}

impl PrintProfile {
    /// Bambu Lab A1 with PLA: 256 mm cube, 40 cm³/h, 1.24 g/cm³, 50 USD per 4 kg
    pub fn bambu_a1() -> Self {
        Self {
            envelope: BuildEnvelope::cube(25.6),
            print_rate: 40.0,
            filament_density: 1.24,
            price_per_gram: 50.0 / 4000.0,
        }
    }

    /// Set the build volume
    pub fn with_build_envelope(mut self, envelope: BuildEnvelope) -> Self {
        self.envelope = envelope;
        self
    }

    /// Set the deposition rate (cm³ per hour)
    pub fn with_print_rate(mut self, rate: f64) -> Self {
        self.print_rate = rate;
        self
    }

    /// Set the filament density (g/cm³)
    pub fn with_filament_density(mut self, density: f64) -> Self {
        self.filament_density = density;
        self
    }

    /// Set the filament price (USD per gram)
    pub fn with_price_per_gram(mut self, price: f64) -> Self {
        self.price_per_gram = price;
        self
    }

    /// Print time for a part volume: `round(volume / rate * 60)` minutes
    pub fn estimate_print_time(&self, volume_cm3: f64) -> PrintTime {
        let minutes = (volume_cm3 / self.print_rate * 60.0).round();
        PrintTime {
            minutes: minutes.max(0.0) as u64,
        }
    }

    /// Filament weight and cost for a part volume
    pub fn estimate_filament(&self, volume_cm3: f64) -> FilamentEstimate {
        let weight_grams = volume_cm3 * self.filament_density;
        FilamentEstimate {
            weight_grams,
            cost_usd: weight_grams * self.price_per_gram,
        }
    }
}

impl Default for PrintProfile {
    fn default() -> Self {
        Self::bambu_a1()
    }
}

/// Estimated print duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PrintTime {
    /// Total whole minutes
    pub minutes: u64,
}

impl PrintTime {
    /// Whole hours
    pub fn hours(&self) -> u64 {
        self.minutes / 60
    }

    /// Minutes past the last whole hour
    pub fn remainder_minutes(&self) -> u64 {
        self.minutes % 60
    }
}

impl fmt::Display for PrintTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hours() > 0 {
            write!(f, "~{}h {}m", self.hours(), self.remainder_minutes())
        } else {
            write!(f, "~{}m", self.minutes)
        }
    }
}

/// Estimated filament usage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilamentEstimate {
    /// Filament weight in grams
    pub weight_grams: f64,
    /// Filament cost in USD
    pub cost_usd: f64,
}

impl fmt::Display for FilamentEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}g (${:.2})", self.weight_grams, self.cost_usd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_time_rounding() {
        let profile = PrintProfile::bambu_a1();
        assert_eq!(profile.estimate_print_time(0.0).minutes, 0);
        // 389.6 cm³ at 40 cm³/h is 584.4 minutes
        let t = profile.estimate_print_time(389.6);
        assert_eq!(t.minutes, 584);
        assert_eq!(t.to_string(), "~9h 44m");
        assert_eq!(profile.estimate_print_time(0.5).to_string(), "~1m");
        assert_eq!(profile.estimate_print_time(0.3).to_string(), "~0m");
    }

    #[test]
    fn test_filament_estimate() {
        let f = PrintProfile::bambu_a1().estimate_filament(389.6);
        assert!((f.weight_grams - 483.104).abs() < 1e-9);
        assert!((f.cost_usd - 6.0388).abs() < 1e-9);
        assert_eq!(f.to_string(), "483g ($6.04)");
    }

    #[test]
    fn test_custom_profile() {
        let profile = PrintProfile::default()
            .with_print_rate(20.0)
            .with_filament_density(1.0)
            .with_price_per_gram(0.02)
            .with_build_envelope(BuildEnvelope::new(18.0, 18.0, 18.0));
        assert_eq!(profile.estimate_print_time(20.0).minutes, 60);
        assert!((profile.estimate_filament(10.0).cost_usd - 0.2).abs() < 1e-12);
        assert_eq!(profile.envelope.height, 18.0);
        assert_eq!(BuildEnvelope::default(), PrintProfile::bambu_a1().envelope);
    }
}
