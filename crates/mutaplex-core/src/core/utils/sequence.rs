use phf::{Map, phf_map};

static IUPAC_COMPLEMENTS: Map<char, char> = phf_map! {
    'A' => 'T', 'T' => 'A', 'C' => 'G', 'G' => 'C',
    'W' => 'W', 'S' => 'S', 'N' => 'N',
    'M' => 'K', 'K' => 'M',
    'R' => 'Y', 'Y' => 'R',
    'B' => 'V', 'V' => 'B',
    'D' => 'H', 'H' => 'D',
};

/// Reverse complement over the IUPAC alphabet. Characters without a known
/// complement are carried over unchanged.
pub fn reverse_complement(sequence: &str) -> String {
    sequence
        .chars()
        .rev()
        .map(|base| IUPAC_COMPLEMENTS.get(&base).copied().unwrap_or(base))
        .collect()
}

pub fn gc_content(sequence: &str) -> f64 {
    if sequence.is_empty() {
        return 0.0;
    }
    let gc = sequence
        .chars()
        .filter(|c| matches!(c.to_ascii_uppercase(), 'G' | 'C'))
        .count();
    gc as f64 / sequence.chars().count() as f64
}

pub fn is_in_frame(sequence: &str) -> bool {
    sequence.len() % 3 == 0
}

/// Keeps ASCII letters only, upper-cased.
pub(crate) fn normalize_residues(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
