use once_cell::sync::Lazy;
use phf::{Map, Set, phf_map, phf_set};
use std::collections::HashMap;

pub const STOP: char = '*';
pub const UNKNOWN_RESIDUE: char = '?';

/// The standard genetic code in canonical order.
///
/// The order of codons within each amino acid defines which codon is preferred
/// when a residue has to be back-translated (the first one wins).
pub static CANONICAL_CODONS: [(&str, char); 64] = [
    ("GCA", 'A'), ("GCC", 'A'), ("GCG", 'A'), ("GCT", 'A'),
    ("AGA", 'R'), ("AGG", 'R'), ("CGA", 'R'), ("CGC", 'R'), ("CGG", 'R'), ("CGT", 'R'),
    ("AAC", 'N'), ("AAT", 'N'),
    ("GAC", 'D'), ("GAT", 'D'),
    ("TGC", 'C'), ("TGT", 'C'),
    ("GAA", 'E'), ("GAG", 'E'),
    ("CAA", 'Q'), ("CAG", 'Q'),
    ("GGA", 'G'), ("GGC", 'G'), ("GGG", 'G'), ("GGT", 'G'),
    ("CAC", 'H'), ("CAT", 'H'),
    ("ATA", 'I'), ("ATC", 'I'), ("ATT", 'I'),
    ("TTA", 'L'), ("TTG", 'L'), ("CTA", 'L'), ("CTC", 'L'), ("CTG", 'L'), ("CTT", 'L'),
    ("AAA", 'K'), ("AAG", 'K'),
    ("ATG", 'M'),
    ("TTC", 'F'), ("TTT", 'F'),
    ("CCC", 'P'), ("CCT", 'P'), ("CCA", 'P'), ("CCG", 'P'),
    ("AGC", 'S'), ("AGT", 'S'), ("TCA", 'S'), ("TCC", 'S'), ("TCG", 'S'), ("TCT", 'S'),
    ("ACC", 'T'), ("ACG", 'T'), ("ACT", 'T'), ("ACA", 'T'),
    ("TGG", 'W'),
    ("TAC", 'Y'), ("TAT", 'Y'),
    ("GTA", 'V'), ("GTC", 'V'), ("GTG", 'V'), ("GTT", 'V'),
    ("TAA", '*'), ("TAG", '*'), ("TGA", '*'),
];

static CODON_TABLE: Map<&'static str, char> = phf_map! {
    "GCA" => 'A', "GCC" => 'A', "GCG" => 'A', "GCT" => 'A',
    "AGA" => 'R', "AGG" => 'R', "CGA" => 'R', "CGC" => 'R', "CGG" => 'R', "CGT" => 'R',
    "AAC" => 'N', "AAT" => 'N',
    "GAC" => 'D', "GAT" => 'D',
    "TGC" => 'C', "TGT" => 'C',
    "GAA" => 'E', "GAG" => 'E',
    "CAA" => 'Q', "CAG" => 'Q',
    "GGA" => 'G', "GGC" => 'G', "GGG" => 'G', "GGT" => 'G',
    "CAC" => 'H', "CAT" => 'H',
    "ATA" => 'I', "ATC" => 'I', "ATT" => 'I',
    "TTA" => 'L', "TTG" => 'L', "CTA" => 'L', "CTC" => 'L', "CTG" => 'L', "CTT" => 'L',
    "AAA" => 'K', "AAG" => 'K',
    "ATG" => 'M',
    "TTC" => 'F', "TTT" => 'F',
    "CCC" => 'P', "CCT" => 'P', "CCA" => 'P', "CCG" => 'P',
    "AGC" => 'S', "AGT" => 'S', "TCA" => 'S', "TCC" => 'S', "TCG" => 'S', "TCT" => 'S',
    "ACC" => 'T', "ACG" => 'T', "ACT" => 'T', "ACA" => 'T',
    "TGG" => 'W',
    "TAC" => 'Y', "TAT" => 'Y',
    "GTA" => 'V', "GTC" => 'V', "GTG" => 'V', "GTT" => 'V',
    "TAA" => '*', "TAG" => '*', "TGA" => '*',
};

pub static NUCLEOTIDE_TOKENS: Set<char> = phf_set! { 'A', 'T', 'G', 'C' };

pub static AMINO_ACID_TOKENS: Set<char> = phf_set! {
    'A', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'K', 'L',
    'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'V', 'W', 'Y', '*',
};

pub const STANDARD_AMINO_ACIDS: &str = "ACDEFGHIKLMNPQRSTVWY";
pub const NUCLEOTIDES: &str = "ATGC";

static REVERSE_TABLE: Lazy<HashMap<char, Vec<&'static str>>> = Lazy::new(|| {
    let mut reverse: HashMap<char, Vec<&'static str>> = HashMap::new();
    for (codon, residue) in CANONICAL_CODONS.iter() {
        reverse.entry(*residue).or_default().push(*codon);
    }
    reverse
});

/// Translates a single codon, ignoring case. Returns `None` for anything that is
/// not one of the 64 unambiguous codons.
pub fn translate_codon(codon: &str) -> Option<char> {
    if codon.len() != 3 {
        return None;
    }
    CODON_TABLE.get(codon.to_ascii_uppercase().as_str()).copied()
}

pub fn is_stop_codon(codon: &str) -> bool {
    translate_codon(codon) == Some(STOP)
}

/// Codons encoding `residue`, in canonical order. Empty for unknown residues.
pub fn codons_for(residue: char) -> &'static [&'static str] {
    REVERSE_TABLE
        .get(&residue.to_ascii_uppercase())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub fn preferred_codon(residue: char) -> Option<&'static str> {
    codons_for(residue).first().copied()
}

/// In-frame translation. Unknown codons become `?`; a trailing partial codon is ignored.
pub fn translate(sequence: &str) -> String {
    sequence
        .as_bytes()
        .chunks_exact(3)
        .map(|chunk| {
            std::str::from_utf8(chunk)
                .ok()
                .and_then(translate_codon)
                .unwrap_or(UNKNOWN_RESIDUE)
        })
        .collect()
}

pub fn contains_stop_in_frame(sequence: &str) -> bool {
    translate(sequence).contains(STOP)
}
