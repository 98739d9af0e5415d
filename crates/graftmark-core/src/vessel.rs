//! Target vessel vocabulary
//!
//! Each fenestration serves one visceral branch vessel. Display name, short
//! label and plot color live on the enum instead of in lookup tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Branch vessel a fenestration is planned for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vessel {
    /// Celiac trunk
    CeliacTrunk,
    /// Superior mesenteric artery
    Sma,
    /// Right renal artery
    RightRenal,
    /// Left renal artery
    LeftRenal,
    /// First accessory renal artery
    AccessoryRenal1,
    /// Second accessory renal artery
    AccessoryRenal2,
    /// Inferior mesenteric artery
    Ima,
}

impl Vessel {
    /// All vessels, in the order they are offered to the user
    pub const ALL: [Vessel; 7] = [
        Vessel::CeliacTrunk,
        Vessel::Sma,
        Vessel::RightRenal,
        Vessel::LeftRenal,
        Vessel::AccessoryRenal1,
        Vessel::AccessoryRenal2,
        Vessel::Ima,
    ];

    /// Full display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Vessel::CeliacTrunk => "Celiac trunk",
            Vessel::Sma => "SMA",
            Vessel::RightRenal => "Right renal artery",
            Vessel::LeftRenal => "Left renal artery",
            Vessel::AccessoryRenal1 => "Accessory renal artery 1",
            Vessel::AccessoryRenal2 => "Accessory renal artery 2",
            Vessel::Ima => "IMA",
        }
    }

    /// Short label drawn inside the hole
    pub fn short_label(&self) -> &'static str {
        match self {
            Vessel::CeliacTrunk => "CT",
            Vessel::Sma => "SMA",
            Vessel::RightRenal => "RRA",
            Vessel::LeftRenal => "LRA",
            Vessel::AccessoryRenal1 => "ARA1",
            Vessel::AccessoryRenal2 => "ARA2",
            Vessel::Ima => "IMA",
        }
    }

    /// Fill color as a CSS hex string
    pub fn color(&self) -> &'static str {
        match self {
            Vessel::CeliacTrunk => "#FF6B6B",
            Vessel::Sma => "#4ECDC4",
            Vessel::RightRenal => "#45B7D1",
            Vessel::LeftRenal => "#96CEB4",
            Vessel::AccessoryRenal1 => "#FFEAA7",
            Vessel::AccessoryRenal2 => "#DDA0DD",
            Vessel::Ima => "#FFB347",
        }
    }
}

impl fmt::Display for Vessel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Vessel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match key.as_str() {
            "ct" | "celiac" | "celiactrunk" => Ok(Vessel::CeliacTrunk),
            "sma" | "superiormesentericartery" => Ok(Vessel::Sma),
            "rra" | "rightrenal" | "rightrenalartery" => Ok(Vessel::RightRenal),
            "lra" | "leftrenal" | "leftrenalartery" => Ok(Vessel::LeftRenal),
            "ara1" | "accessoryrenal1" | "accessoryrenalartery1" => Ok(Vessel::AccessoryRenal1),
            "ara2" | "accessoryrenal2" | "accessoryrenalartery2" => Ok(Vessel::AccessoryRenal2),
            "ima" | "inferiormesentericartery" => Ok(Vessel::Ima),
            _ => Err(format!("Unknown vessel: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vessel_aliases() {
        assert_eq!("SMA".parse::<Vessel>().unwrap(), Vessel::Sma);
        assert_eq!("Celiac trunk".parse::<Vessel>().unwrap(), Vessel::CeliacTrunk);
        assert_eq!("left_renal".parse::<Vessel>().unwrap(), Vessel::LeftRenal);
        assert_eq!(
            "Accessory renal artery 2".parse::<Vessel>().unwrap(),
            Vessel::AccessoryRenal2
        );
        assert!("aorta".parse::<Vessel>().is_err());
    }

    #[test]
    fn test_vessel_data_is_distinct() {
        for (i, a) in Vessel::ALL.iter().enumerate() {
            for b in &Vessel::ALL[i + 1..] {
                assert_ne!(a.short_label(), b.short_label());
                assert_ne!(a.color(), b.color());
            }
        }
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for vessel in Vessel::ALL {
            assert_eq!(vessel.to_string().parse::<Vessel>().unwrap(), vessel);
        }
    }
}
