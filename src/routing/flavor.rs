//! Deployment flavors.
//!
//! Each flavor is a fixed rule-set the resolver evaluates. The flavors differ
//! in how OAuth traffic is recognized (substring vs. suffix) and in which
//! methods get extra path stripping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Selects which rewrite rule-set is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Flavor {
    /// ChatGPT-app deployments: substring match on OAuth markers, GET strips `/chatgpt`.
    Generic,
    /// Webhook deployments with an OAuth surface: suffix match on `/oauth2` and
    /// `/register-public-client`.
    #[default]
    Default,
    /// Plain webhook relay: no rewriting at all.
    Passthrough,
}

impl Flavor {
    pub const ALL: [Flavor; 3] = [Flavor::Generic, Flavor::Default, Flavor::Passthrough];

    pub fn as_str(&self) -> &'static str {
        match self {
            Flavor::Generic => "generic",
            Flavor::Default => "default",
            Flavor::Passthrough => "passthrough",
        }
    }

    /// Whether the always-200 setting is honored.
    /// The passthrough relay always reports the true upstream status.
    pub fn honors_always_succeed(&self) -> bool {
        !matches!(self, Flavor::Passthrough)
    }

    /// Whether GET requests are webhook verification handshakes.
    pub fn verifies_webhooks(&self) -> bool {
        matches!(self, Flavor::Passthrough)
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown flavor name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown flavor {0:?} (expected generic, default or passthrough)")]
pub struct UnknownFlavor(pub String);

impl FromStr for Flavor {
    type Err = UnknownFlavor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic" | "chatgpt" => Ok(Flavor::Generic),
            "default" => Ok(Flavor::Default),
            "passthrough" | "webhook" => Ok(Flavor::Passthrough),
            other => Err(UnknownFlavor(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_display() {
        for flavor in Flavor::ALL {
            assert_eq!(flavor.as_str().parse::<Flavor>().unwrap(), flavor);
        }
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!("ChatGPT".parse::<Flavor>().unwrap(), Flavor::Generic);
        assert_eq!("webhook".parse::<Flavor>().unwrap(), Flavor::Passthrough);
        assert!("instagram".parse::<Flavor>().is_err());
    }

    #[test]
    fn only_passthrough_ignores_always_succeed() {
        assert!(Flavor::Generic.honors_always_succeed());
        assert!(Flavor::Default.honors_always_succeed());
        assert!(!Flavor::Passthrough.honors_always_succeed());
    }
}
