use serde::Serialize;

use crate::records::{CustomerStatus, DealStage, Segment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Green,
    Gray,
    Blue,
    Red,
    Purple,
    Orange,
    Yellow,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Green => "green",
            Tone::Gray => "gray",
            Tone::Blue => "blue",
            Tone::Red => "red",
            Tone::Purple => "purple",
            Tone::Orange => "orange",
            Tone::Yellow => "yellow",
        }
    }

    /// Tailwind classes for a pill badge.
    pub fn badge_classes(&self) -> String {
        format!("bg-{0}-100 text-{0}-800", self.as_str())
    }

    pub fn text_classes(&self) -> String {
        format!("text-{}-600", self.as_str())
    }
}

pub trait Badge {
    fn tone(&self) -> Tone;
}

impl Badge for CustomerStatus {
    fn tone(&self) -> Tone {
        match self {
            CustomerStatus::Active => Tone::Green,
            CustomerStatus::Inactive => Tone::Gray,
            CustomerStatus::Prospect => Tone::Blue,
            CustomerStatus::Churned => Tone::Red,
        }
    }
}

impl Badge for Segment {
    fn tone(&self) -> Tone {
        match self {
            Segment::Enterprise => Tone::Purple,
            Segment::Sme => Tone::Blue,
            Segment::Individual => Tone::Green,
        }
    }
}

impl Badge for DealStage {
    fn tone(&self) -> Tone {
        match self {
            DealStage::Prospecting => Tone::Red,
            DealStage::Qualification => Tone::Orange,
            DealStage::Proposal => Tone::Yellow,
            DealStage::Negotiation => Tone::Blue,
            DealStage::ClosedWon => Tone::Green,
            DealStage::ClosedLost => Tone::Gray,
        }
    }
}

pub fn probability_tone(probability: u8) -> Tone {
    match probability {
        80.. => Tone::Green,
        60..=79 => Tone::Yellow,
        _ => Tone::Red,
    }
}
