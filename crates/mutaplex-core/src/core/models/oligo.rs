use serde::{Deserialize, Serialize};
use std::fmt;

/// Strand orientation encoded in an oligo label prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Forward,
    ReverseComplement,
}

impl Orientation {
    pub fn of_label(label: &str) -> Self {
        if label.starts_with("FF") {
            Orientation::Forward
        } else {
            Orientation::ReverseComplement
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Orientation::Forward => "FF",
                Orientation::ReverseComplement => "RC",
            }
        )
    }
}

/// One synthesized oligo as returned by the design service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OligoRecord {
    pub label: String,    // `<ORIENT>_<index>[...]`, e.g. `FF_3`
    pub sequence: String, // Oligo sequence, 5' to 3'
    pub length: usize,    // Reported length of `sequence`
    pub fragment: String, // Name of the source fragment
    #[serde(default)]
    pub invalid: bool, // Set when the service could not repair the oligo
}

impl OligoRecord {
    pub fn new(label: &str, sequence: &str, fragment: &str) -> Self {
        Self {
            label: label.to_string(),
            sequence: sequence.to_string(),
            length: sequence.len(),
            fragment: fragment.to_string(),
            invalid: false,
        }
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::of_label(&self.label)
    }

    /// Tile index from the second `_`-delimited token of the label.
    ///
    /// Leading whitespace is skipped and trailing non-digits are ignored, so
    /// `RC_12b` yields 12. Returns `None` when the token is missing or starts
    /// with anything other than a digit.
    pub fn index_num(&self) -> Option<u64> {
        let token = self.label.split('_').nth(1)?.trim_start();
        let end = token
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map_or(token.len(), |(i, _)| i);
        token[..end].parse().ok()
    }

    /// Label as shown in listings, with an `INVALID_` marker for flagged oligos.
    pub fn display_label(&self) -> String {
        if self.invalid {
            format!("INVALID_{}", self.label)
        } else {
            self.label.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_is_forward_only_for_ff_prefix() {
        assert_eq!(Orientation::of_label("FF_1"), Orientation::Forward);
        assert_eq!(Orientation::of_label("RC_1"), Orientation::ReverseComplement);
        assert_eq!(Orientation::of_label("XX_1"), Orientation::ReverseComplement);
        assert_eq!(Orientation::of_label("ff_1"), Orientation::ReverseComplement);
    }

    #[test]
    fn index_num_reads_second_token_leading_digits() {
        assert_eq!(OligoRecord::new("FF_12", "A", "x").index_num(), Some(12));
        assert_eq!(OligoRecord::new("RC_3_trim", "A", "x").index_num(), Some(3));
        assert_eq!(OligoRecord::new("RC_7b", "A", "x").index_num(), Some(7));
    }

    #[test]
    fn index_num_is_none_for_unparseable_labels() {
        assert_eq!(OligoRecord::new("FF", "A", "x").index_num(), None);
        assert_eq!(OligoRecord::new("FF_x1", "A", "x").index_num(), None);
        assert_eq!(OligoRecord::new("FF_", "A", "x").index_num(), None);
    }

    #[test]
    fn deserializes_with_invalid_flag_defaulting_to_false() {
        let json = r#"{"label":"FF_1","sequence":"ATGC","length":4,"fragment":"x","tm":61.2}"#;
        let oligo: OligoRecord = serde_json::from_str(json).unwrap();
        assert!(!oligo.invalid);
        assert_eq!(oligo.display_label(), "FF_1");
    }

    #[test]
    fn display_label_marks_invalid_oligos() {
        let mut oligo = OligoRecord::new("RC_2", "ATGC", "x");
        oligo.invalid = true;
        assert_eq!(oligo.display_label(), "INVALID_RC_2");
    }
}
