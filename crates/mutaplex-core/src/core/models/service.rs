//! Request and response shapes exchanged with the Sequence Design Service.

use super::oligo::OligoRecord;
use super::sequence::AddressType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    Individual,
    Group,
    GroupDegenerate,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid generation mode: '{0}'")]
pub struct ParseGenerationModeError(pub String);

impl FromStr for GenerationMode {
    type Err = ParseGenerationModeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "individual" => Ok(GenerationMode::Individual),
            "group" => Ok(GenerationMode::Group),
            "group_degenerate" => Ok(GenerationMode::GroupDegenerate),
            _ => Err(ParseGenerationModeError(s.to_string())),
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                GenerationMode::Individual => "individual",
                GenerationMode::Group => "group",
                GenerationMode::GroupDegenerate => "group_degenerate",
            }
        )
    }
}

/// Degenerate codon scheme used by scanning libraries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LibraryType {
    #[serde(rename = "NNN")]
    Nnn,
    #[serde(rename = "NNK")]
    Nnk,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid library type: '{0}' (expected NNN or NNK)")]
pub struct ParseLibraryTypeError(pub String);

impl LibraryType {
    pub fn triplet(&self) -> &'static str {
        match self {
            LibraryType::Nnn => "NNN",
            LibraryType::Nnk => "NNK",
        }
    }
}

impl FromStr for LibraryType {
    type Err = ParseLibraryTypeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NNN" => Ok(LibraryType::Nnn),
            "NNK" => Ok(LibraryType::Nnk),
            _ => Err(ParseLibraryTypeError(s.to_string())),
        }
    }
}

impl fmt::Display for LibraryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.triplet())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationSpec {
    #[serde(rename = "type")]
    pub kind: AddressType,
    pub pos: usize,
    pub new: Vec<char>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSpec {
    #[serde(rename = "type")]
    pub kind: AddressType,
    pub pos: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomMutagenesisRequest {
    pub original_sequence: String,
    pub original_name: String,
    pub mutations: Vec<MutationSpec>,
    pub generation_mode: GenerationMode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaturationMutagenesisRequest {
    pub original_sequence: String,
    pub original_name: String,
    pub fasta_content: String,
    pub mutations: Vec<MutationSpec>,
    pub saturation_mutations: Vec<SiteSpec>,
    pub exclude_stops: bool,
    pub include_original: bool,
    pub generation_mode: GenerationMode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanningLibraryRequest {
    pub sequence: String,
    pub sequence_name: String,
    pub start_position: Option<usize>,
    pub end_position: Option<usize>,
    pub full_sequence: bool,
    pub library_type: LibraryType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OligoDesignRequest {
    pub sequence: String,
    pub oligo_length: usize,
    pub overlap_length: usize,
    pub gap_length: usize,
    pub na_conc: f64,
    pub k_conc: f64,
    pub oligo_conc: f64,
    pub simple_oligo_maker: bool,
    pub gapped_oligo_maker: bool,
    pub clean_oligos: bool,
    pub optimized_oligos: bool,
}

/// Body returned by the mutagenesis endpoints.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VariantResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub variants: Vec<String>,
    #[serde(default)]
    pub total_count: usize,
    #[serde(default)]
    pub parameters: serde_json::Value,
    #[serde(default)]
    pub error: Option<String>,
}

/// Primers designed for one fragment; either side may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimerPair {
    #[serde(default)]
    pub forward_primer: Option<String>,
    #[serde(default)]
    pub reverse_primer: Option<String>,
}

/// Body returned by the oligo design endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OligoDesignResponse {
    #[serde(default)]
    pub oligos: Vec<OligoRecord>,
    #[serde(default)]
    pub primers: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
