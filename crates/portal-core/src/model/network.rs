// ── Network domain types ──

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use portal_api::ScanEntry;

/// A wireless access point as reported by the portal's scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub name: String,
    /// Signal strength; higher is stronger. Missing values rank as `0`.
    pub rssi: Option<i64>,
    /// Declared security type (`"WPA2"`, `"None"`, ...).
    pub security: Option<String>,
    /// Access point hardware address, when the backend reports one.
    pub bssid: Option<String>,
}

impl Network {
    /// Signal strength used for ordering and tier selection.
    pub fn signal_strength(&self) -> i64 {
        self.rssi.unwrap_or(0)
    }

    /// `true` unless security is missing, empty, or `"none"` in any case.
    pub fn requires_password(&self) -> bool {
        self.security
            .as_deref()
            .is_some_and(|s| !s.is_empty() && !s.eq_ignore_ascii_case("none"))
    }

    pub fn security_icon(&self) -> SecurityIcon {
        if self.requires_password() {
            SecurityIcon::Locked
        } else {
            SecurityIcon::Unlocked
        }
    }

    pub fn signal_tier(&self) -> SignalTier {
        SignalTier::from_rssi(self.signal_strength())
    }
}

impl From<ScanEntry> for Network {
    fn from(entry: ScanEntry) -> Self {
        Self {
            name: entry.name,
            rssi: entry.rssi,
            security: entry.security,
            bssid: entry.bssid,
        }
    }
}

/// Order networks strongest first. Ties keep their scan order.
pub fn sort_by_signal(networks: &mut [Network]) {
    networks.sort_by_key(|n| Reverse(n.signal_strength()));
}

/// Signal icon tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum SignalTier {
    Weak,
    Fair,
    Good,
    #[strum(to_string = "very good")]
    VeryGood,
    Excellent,
}

impl SignalTier {
    /// Comparisons are strict, so 80/60/40/20 land in the tier below.
    pub fn from_rssi(rssi: i64) -> Self {
        if rssi > 80 {
            Self::Excellent
        } else if rssi > 60 {
            Self::VeryGood
        } else if rssi > 40 {
            Self::Good
        } else if rssi > 20 {
            Self::Fair
        } else {
            Self::Weak
        }
    }

    /// Number of lit bars, 1 (weak) through 5 (excellent).
    pub fn bars(self) -> usize {
        match self {
            Self::Weak => 1,
            Self::Fair => 2,
            Self::Good => 3,
            Self::VeryGood => 4,
            Self::Excellent => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum SecurityIcon {
    Locked,
    Unlocked,
}
