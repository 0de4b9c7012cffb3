//! Configuration for building a [Predictor].

use std::fmt;

use log::debug;

use crate::error::ConfigError;
use crate::predictor::*;

/// Widest table index accepted by [PredictorConfig::validate].
pub const MAX_INDEX_BITS: usize = 30;

/// Parameters for one of the supported predictors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PredictorConfig {
    /// A bimodal predictor with `2^m2` entries.
    Bimodal { m2: usize },

    /// A gshare predictor with `2^m1` entries and `n` bits of history.
    ///
    /// With `n == 0` this builds a bimodal predictor with `2^m1` entries.
    Gshare { m1: usize, n: usize },

    /// A hybrid predictor with `2^k` chooser entries, a gshare component
    /// with `2^m1` entries and `n` bits of history, and a bimodal component
    /// with `2^m2` entries.
    Hybrid { k: usize, m1: usize, n: usize, m2: usize },
}

impl PredictorConfig {
    fn check_width(name: &'static str, bits: usize) -> Result<(), ConfigError> {
        if bits > MAX_INDEX_BITS {
            return Err(ConfigError::IndexWidthTooLarge {
                name, bits, max: MAX_INDEX_BITS
            });
        }
        Ok(())
    }

    fn check_history(m1: usize, n: usize) -> Result<(), ConfigError> {
        if n > m1 {
            return Err(ConfigError::HistoryTooLong { n, m1 });
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Bimodal { m2 } => {
                Self::check_width("M2", m2)?;
            },
            Self::Gshare { m1, n } => {
                Self::check_width("M1", m1)?;
                Self::check_history(m1, n)?;
            },
            Self::Hybrid { k, m1, n, m2 } => {
                Self::check_width("K", k)?;
                Self::check_width("M1", m1)?;
                Self::check_width("M2", m2)?;
                Self::check_history(m1, n)?;
            },
        }
        Ok(())
    }

    /// Total number of counter entries across all tables.
    pub fn total_entries(&self) -> usize {
        match *self {
            Self::Bimodal { m2 } => 1 << m2,
            Self::Gshare { m1, .. } => 1 << m1,
            Self::Hybrid { k, m1, m2, .. } => (1 << k) + (1 << m1) + (1 << m2),
        }
    }

    /// Get the number of storage bits (2 bits per counter, plus history).
    pub fn storage_bits(&self) -> usize {
        let history = match *self {
            Self::Bimodal { .. } => 0,
            Self::Gshare { n, .. } | Self::Hybrid { n, .. } => n,
        };
        2 * self.total_entries() + history
    }

    /// Use this configuration to create a new [Predictor].
    pub fn build(self) -> Result<Predictor, ConfigError> {
        self.validate()?;
        let res = match self {
            Self::Bimodal { m2 } => {
                Predictor::Bimodal(BimodalPredictor::new(m2))
            },
            Self::Gshare { m1, n: 0 } => {
                debug!("gshare with no history, using bimodal with M2={}", m1);
                Predictor::Bimodal(BimodalPredictor::new(m1))
            },
            Self::Gshare { m1, n } => {
                Predictor::Gshare(GsharePredictor::new(m1, n))
            },
            Self::Hybrid { k, m1, n, m2 } => {
                Predictor::Hybrid(HybridPredictor::new(k, m1, m2, n))
            },
        };
        debug!("built {} predictor ({}, {} storage bits)",
            res.name(), self, self.storage_bits());
        Ok(res)
    }
}

/// Formats the parameters in the order they are given on the command-line.
impl fmt::Display for PredictorConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Bimodal { m2 } => write!(f, "bimodal {}", m2),
            Self::Gshare { m1, n } => write!(f, "gshare {} {}", m1, n),
            Self::Hybrid { k, m1, n, m2 } => {
                write!(f, "hybrid {} {} {} {}", k, m1, n, m2)
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[test]
    fn gshare_without_history_is_bimodal() {
        let p = PredictorConfig::Gshare { m1: 5, n: 0 }.build().unwrap();
        match p {
            Predictor::Bimodal(bp) => assert_eq!(bp.index_bits(), 5),
            other => panic!("expected bimodal, got {}", other.name()),
        }
    }

    #[test]
    fn builds_each_kind() {
        let p = PredictorConfig::Bimodal { m2: 3 }.build().unwrap();
        assert_eq!(p.name(), "bimodal");
        let p = PredictorConfig::Gshare { m1: 4, n: 2 }.build().unwrap();
        assert_eq!(p.name(), "gshare");
        let p = PredictorConfig::Hybrid { k: 2, m1: 4, n: 2, m2: 3 }
            .build().unwrap();
        assert_eq!(p.name(), "hybrid");
        assert_eq!(p.tables().iter().map(|t| t.len()).collect::<Vec<_>>(),
            vec![4, 16, 8]);
    }

    #[rstest]
    #[case(PredictorConfig::Gshare { m1: 3, n: 4 },
        ConfigError::HistoryTooLong { n: 4, m1: 3 })]
    #[case(PredictorConfig::Hybrid { k: 2, m1: 2, n: 3, m2: 2 },
        ConfigError::HistoryTooLong { n: 3, m1: 2 })]
    #[case(PredictorConfig::Bimodal { m2: 31 },
        ConfigError::IndexWidthTooLarge { name: "M2", bits: 31, max: 30 })]
    #[case(PredictorConfig::Hybrid { k: 40, m1: 2, n: 1, m2: 2 },
        ConfigError::IndexWidthTooLarge { name: "K", bits: 40, max: 30 })]
    fn rejects_invalid(#[case] cfg: PredictorConfig, #[case] err: ConfigError) {
        assert_eq!(cfg.validate(), Err(err.clone()));
        assert_eq!(cfg.build().err(), Some(err));
    }

    #[test]
    fn storage_accounting() {
        assert_eq!(PredictorConfig::Bimodal { m2: 4 }.storage_bits(), 32);
        assert_eq!(PredictorConfig::Gshare { m1: 4, n: 3 }.storage_bits(), 35);
        let cfg = PredictorConfig::Hybrid { k: 1, m1: 2, n: 2, m2: 3 };
        assert_eq!(cfg.total_entries(), 2 + 4 + 8);
        assert_eq!(cfg.storage_bits(), 30);
        assert_eq!(cfg.to_string(), "hybrid 1 2 2 3");
    }
}
