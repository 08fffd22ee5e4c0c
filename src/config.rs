#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

pub const CONSERVATIVE_MIN_BRIDGE_QUAL: f64 = 25.0;
pub const NORMAL_MIN_BRIDGE_QUAL: f64 = 10.0;
pub const BOLD_MIN_BRIDGE_QUAL: f64 = 1.0;

/// How aggressively the graph is bridged. Bolder modes give longer
/// contigs at a higher risk of misassembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "lowercase"))]
pub enum BridgingMode {
    Conservative,
    Normal,
    Bold,
}

impl Default for BridgingMode {
    fn default() -> Self {
        Self::Normal
    }
}

impl BridgingMode {
    /// Bridges below this quality are not applied, unless the user
    /// sets their own cutoff.
    pub fn default_min_bridge_qual(&self) -> f64 {
        match self {
            Self::Conservative => CONSERVATIVE_MIN_BRIDGE_QUAL,
            Self::Normal => NORMAL_MIN_BRIDGE_QUAL,
            Self::Bold => BOLD_MIN_BRIDGE_QUAL,
        }
    }
}

impl std::str::FromStr for BridgingMode {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "conservative" => Ok(Self::Conservative),
            "normal" => Ok(Self::Normal),
            "bold" => Ok(Self::Bold),
            _ => Err(BridgeError::InvalidMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for BridgingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Conservative => "conservative",
            Self::Normal => "normal",
            Self::Bold => "bold",
        };
        write!(f, "{}", name)
    }
}

#[derive(Default, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct BridgingConfig {
    pub mode: BridgingMode,
    /// User-set quality cutoff, overriding the mode's default.
    pub min_bridge_qual: Option<f64>,
}

impl BridgingConfig {
    pub fn new(mode: BridgingMode) -> Self {
        BridgingConfig {
            mode,
            min_bridge_qual: None,
        }
    }

    pub fn conservative() -> Self {
        Self::new(BridgingMode::Conservative)
    }

    pub fn normal() -> Self {
        Self::new(BridgingMode::Normal)
    }

    pub fn bold() -> Self {
        Self::new(BridgingMode::Bold)
    }

    pub fn with_min_bridge_qual(mut self, min_bridge_qual: f64) -> Self {
        self.min_bridge_qual = Some(min_bridge_qual);
        self
    }

    pub fn effective_min_bridge_qual(&self) -> f64 {
        self.min_bridge_qual
            .unwrap_or_else(|| self.mode.default_min_bridge_qual())
    }

    /// Conservative mode doesn't trust the short read assembler's
    /// paths at all, so only long read bridges are made.
    pub fn builds_short_read_bridges(&self) -> bool {
        self.mode != BridgingMode::Conservative
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_cutoffs() {
        let qual = |c: BridgingConfig| c.effective_min_bridge_qual();
        assert_eq!(qual(BridgingConfig::conservative()), 25.0);
        assert_eq!(qual(BridgingConfig::normal()), 10.0);
        assert_eq!(qual(BridgingConfig::bold()), 1.0);
        assert_eq!(BridgingConfig::default(), BridgingConfig::normal());
    }

    #[test]
    fn user_cutoff_overrides_mode() {
        let config = BridgingConfig::bold().with_min_bridge_qual(40.0);
        assert_eq!(config.effective_min_bridge_qual(), 40.0);
        assert!(config.builds_short_read_bridges());
        assert!(!BridgingConfig::conservative().builds_short_read_bridges());
    }

    #[test]
    fn parse_mode() {
        assert_eq!("bold".parse::<BridgingMode>(), Ok(BridgingMode::Bold));
        assert_eq!(
            "Conservative".parse::<BridgingMode>(),
            Ok(BridgingMode::Conservative)
        );
        assert_eq!(
            "reckless".parse::<BridgingMode>(),
            Err(BridgeError::InvalidMode("reckless".to_string()))
        );
        assert_eq!(BridgingMode::Normal.to_string(), "normal");
    }
}
