use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Sustainable Development Goals that appear in the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sdg {
    #[serde(rename = "SDG3")]
    Sdg3,
    #[serde(rename = "SDG6")]
    Sdg6,
    #[serde(rename = "SDG7")]
    Sdg7,
    #[serde(rename = "SDG11")]
    Sdg11,
    #[serde(rename = "SDG13")]
    Sdg13,
}

impl Sdg {
    pub const ALL: [Sdg; 5] = [Sdg::Sdg3, Sdg::Sdg6, Sdg::Sdg7, Sdg::Sdg11, Sdg::Sdg13];

    /// Identifier as it appears in the feed, e.g. `"SDG11"`.
    pub fn id(&self) -> &'static str {
        match self {
            Sdg::Sdg3 => "SDG3",
            Sdg::Sdg6 => "SDG6",
            Sdg::Sdg7 => "SDG7",
            Sdg::Sdg11 => "SDG11",
            Sdg::Sdg13 => "SDG13",
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            Sdg::Sdg3 => 3,
            Sdg::Sdg6 => 6,
            Sdg::Sdg7 => 7,
            Sdg::Sdg11 => 11,
            Sdg::Sdg13 => 13,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Sdg::Sdg3 => "Good Health and Well-being",
            Sdg::Sdg6 => "Clean Water and Sanitation",
            Sdg::Sdg7 => "Affordable and Clean Energy",
            Sdg::Sdg11 => "Sustainable Cities and Communities",
            Sdg::Sdg13 => "Climate Action",
        }
    }
}

impl fmt::Display for Sdg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.pad(self.id()) }
}

impl FromStr for Sdg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sdg::ALL.into_iter()
            .find(|sdg| sdg.id() == s)
            .ok_or_else(|| format!("unknown SDG identifier: {s}"))
    }
}

/// SDG tags read from the free-text `SDGs` cell.
///
/// Membership is a case-sensitive substring test of each known identifier
/// against the whole raw text, so `"SDG30"` reports `SDG3`. The feed never
/// writes such values; stricter parsing would need a delimited format.
/// Separator-delimited pieces that contain no known identifier are kept
/// verbatim in `unrecognized`. A piece that does carry a known identifier is
/// split again on whitespace and `/`, so `"SDG3 SDG15"` still keeps `SDG15`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdgTags {
    raw: String,
    known: Vec<Sdg>,
    unrecognized: Vec<String>,
}

const SEPARATORS: [char; 4] = [',', ';', '|', '\n'];

fn has_known_id(text: &str) -> bool {
    Sdg::ALL.iter().any(|sdg| text.contains(sdg.id()))
}

impl SdgTags {
    pub fn parse(raw: &str) -> Self {
        let known = Sdg::ALL.into_iter()
            .filter(|sdg| raw.contains(sdg.id()))
            .collect();

        let mut unrecognized = Vec::new();
        for piece in raw.split(SEPARATORS).map(str::trim).filter(|p| !p.is_empty()) {
            if !has_known_id(piece) {
                unrecognized.push(piece.to_string());
                continue;
            }
            unrecognized.extend(piece.split(|c: char| c.is_whitespace() || c == '/')
                .filter(|word| !word.is_empty() && !has_known_id(word))
                .map(str::to_string));
        }

        Self { raw: raw.to_string(), known, unrecognized }
    }

    pub fn raw(&self) -> &str { &self.raw }

    /// Known goals, in vocabulary order.
    pub fn known(&self) -> &[Sdg] { &self.known }

    pub fn unrecognized(&self) -> &[String] { &self.unrecognized }

    pub fn contains(&self, sdg: Sdg) -> bool { self.known.contains(&sdg) }

    pub fn is_empty(&self) -> bool { self.known.is_empty() && self.unrecognized.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_list_reports_each_goal() {
        let tags = SdgTags::parse("SDG3, SDG11");
        assert_eq!(tags.known(), &[Sdg::Sdg3, Sdg::Sdg11]);
        assert!(tags.unrecognized().is_empty());
    }

    #[test]
    fn sdg1_does_not_report_sdg11() {
        let tags = SdgTags::parse("SDG1");
        assert!(!tags.contains(Sdg::Sdg11));
        assert!(tags.known().is_empty());
        assert_eq!(tags.unrecognized(), &["SDG1".to_string()]);
    }

    #[test]
    fn sdg13_does_not_report_sdg3() {
        let tags = SdgTags::parse("SDG13");
        assert_eq!(tags.known(), &[Sdg::Sdg13]);
    }

    #[test]
    fn substring_match_is_not_delimiter_aware() {
        // Loose matching: any occurrence of an identifier counts.
        let tags = SdgTags::parse("SDG30");
        assert_eq!(tags.known(), &[Sdg::Sdg3]);
        assert!(SdgTags::parse("goals:SDG6/SDG7").contains(Sdg::Sdg7));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let tags = SdgTags::parse("sdg3");
        assert!(tags.known().is_empty());
        assert_eq!(tags.unrecognized(), &["sdg3".to_string()]);
    }

    #[test]
    fn known_order_follows_vocabulary() {
        let tags = SdgTags::parse("SDG13; SDG6");
        assert_eq!(tags.known(), &[Sdg::Sdg6, Sdg::Sdg13]);
    }

    #[test]
    fn unknown_pieces_are_preserved() {
        let tags = SdgTags::parse("SDG7 | SDG15 |  | Life on Land");
        assert_eq!(tags.known(), &[Sdg::Sdg7]);
        assert_eq!(tags.unrecognized(), &["SDG15".to_string(), "Life on Land".to_string()]);
        assert_eq!(tags.raw(), "SDG7 | SDG15 |  | Life on Land");
    }

    #[test]
    fn unknown_tag_sharing_a_piece_is_kept() {
        let spaced = SdgTags::parse("SDG3 SDG15");
        assert_eq!(spaced.known(), &[Sdg::Sdg3]);
        assert_eq!(spaced.unrecognized(), &["SDG15".to_string()]);

        let slashed = SdgTags::parse("SDG3/SDG15");
        assert_eq!(slashed.known(), &[Sdg::Sdg3]);
        assert_eq!(slashed.unrecognized(), &["SDG15".to_string()]);

        assert!(SdgTags::parse("goals:SDG6/SDG7").unrecognized().is_empty());
    }

    #[test]
    fn empty_text_has_no_tags() {
        assert!(SdgTags::parse("").is_empty());
        assert!(SdgTags::parse(" , ").is_empty());
    }

    #[test]
    fn ids_round_trip_through_from_str() {
        for sdg in Sdg::ALL {
            assert_eq!(sdg.id().parse::<Sdg>().unwrap(), sdg);
            assert_eq!(sdg.id(), format!("SDG{}", sdg.number()));
        }
        assert!("SDG99".parse::<Sdg>().is_err());
    }
}
