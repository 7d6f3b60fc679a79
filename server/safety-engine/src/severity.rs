//! Severity tier derived from title keywords.

use crate::types::SeverityTier;

/// Violent or life-threatening crime.
pub const HIGH_KEYWORDS: &[&str] = &[
  "murder",
  "homicide",
  "rape",
  "gangrape",
  "sexual assault",
  "shooting",
  "killed",
  "dead",
];

/// Serious but non-lethal crime and weapon mentions.
pub const MEDIUM_KEYWORDS: &[&str] = &[
  "robbery",
  "stabbing",
  "kidnapping",
  "assault",
  "attack",
  "gun",
  "knife",
];

/// Minor crime and ambiguous law-enforcement activity.
pub const LOW_KEYWORDS: &[&str] = &[
  "theft",
  "snatching",
  "harassment",
  "molestation",
  "arrested",
  "busted",
  "seized",
  "police",
];

/// Classify a title by substring match on its lowercase form.
///
/// Sets are checked high, medium, low; the first hit wins.
pub fn classify(title: &str) -> SeverityTier {
  let t = title.to_lowercase();
  if matches_any(&t, HIGH_KEYWORDS) {
    SeverityTier::High
  } else if matches_any(&t, MEDIUM_KEYWORDS) {
    SeverityTier::Medium
  } else if matches_any(&t, LOW_KEYWORDS) {
    SeverityTier::Low
  } else {
    SeverityTier::None
  }
}

fn matches_any(text: &str, keywords: &[&str]) -> bool {
  keywords.iter().any(|k| text.contains(k))
}
