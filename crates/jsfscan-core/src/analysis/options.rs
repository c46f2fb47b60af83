use serde::{Deserialize, Serialize};

use crate::protocols::jsf::layout::START_MARKER;

/// What the walker does with a header whose marker is not the expected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerPolicy {
    /// Decode the frame as if the marker matched.
    Ignore,
    /// Decode the frame and record a `MarkerMismatch` warning.
    #[default]
    Warn,
    /// Stop the walk before reading the frame's payload.
    Reject,
}

impl std::str::FromStr for MarkerPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "warn" => Ok(Self::Warn),
            "reject" => Ok(Self::Reject),
            other => Err(format!(
                "unknown marker policy '{other}' (expected ignore, warn or reject)"
            )),
        }
    }
}

/// Walker configuration.
///
/// # Examples
/// ```
/// use jsfscan_core::{DecodeOptions, MarkerPolicy};
///
/// let options = DecodeOptions::default();
/// assert_eq!(options.marker_policy, MarkerPolicy::Warn);
/// assert_eq!(options.expected_marker, 0x1601);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    pub marker_policy: MarkerPolicy,
    pub expected_marker: u16,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            marker_policy: MarkerPolicy::default(),
            expected_marker: START_MARKER,
        }
    }
}

impl DecodeOptions {
    pub fn with_marker_policy(mut self, policy: MarkerPolicy) -> Self {
        self.marker_policy = policy;
        self
    }
}
