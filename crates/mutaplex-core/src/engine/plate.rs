use super::layout::OligoLayout;
use crate::core::models::service::PrimerPair;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Order in which wells are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillOrder {
    /// A1, B1, C1, ... then A2.
    Column,
    /// A1, A2, A3, ... then B1.
    Row,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlateFormat {
    capacity: usize, // 96 or 384
    order: FillOrder,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid plate format: '{0}' (expected 96-column, 96-row, 384-column or 384-row)")]
pub struct ParsePlateFormatError(pub String);

impl PlateFormat {
    pub const WELLS_96_COLUMN: Self = Self::new(96, FillOrder::Column);
    pub const WELLS_96_ROW: Self = Self::new(96, FillOrder::Row);
    pub const WELLS_384_COLUMN: Self = Self::new(384, FillOrder::Column);
    pub const WELLS_384_ROW: Self = Self::new(384, FillOrder::Row);

    const fn new(capacity: usize, order: FillOrder) -> Self {
        Self { capacity, order }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn order(&self) -> FillOrder {
        self.order
    }

    fn dimensions(&self) -> (usize, usize) {
        if self.capacity == 384 { (16, 24) } else { (8, 12) }
    }

    /// Well name for a 0-based slot on one plate, e.g. `A1` or `P24`.
    pub fn well(&self, index: usize) -> Option<String> {
        let (rows, cols) = self.dimensions();
        if index >= rows * cols {
            return None;
        }
        let (row, col) = match self.order {
            FillOrder::Column => (index % rows, index / rows),
            FillOrder::Row => (index / cols, index % cols),
        };
        let row_letter = char::from(b'A' + row as u8);
        Some(format!("{}{}", row_letter, col + 1))
    }
}

impl Default for PlateFormat {
    fn default() -> Self {
        Self::WELLS_96_COLUMN
    }
}

impl FromStr for PlateFormat {
    type Err = ParsePlateFormatError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "96-column" | "96" => Ok(Self::WELLS_96_COLUMN),
            "96-row" => Ok(Self::WELLS_96_ROW),
            "384-column" | "384" => Ok(Self::WELLS_384_COLUMN),
            "384-row" => Ok(Self::WELLS_384_ROW),
            _ => Err(ParsePlateFormatError(s.to_string())),
        }
    }
}

impl fmt::Display for PlateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = match self.order {
            FillOrder::Column => "column",
            FillOrder::Row => "row",
        };
        write!(f, "{}-{}", self.capacity, order)
    }
}

/// Microlitres moved from each source well into its pool.
pub const POOLING_VOLUME_UL: u32 = 2;
/// Microlitres moved from a source plate into its working copy.
pub const DILUTION_VOLUME_UL: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WellAssignment {
    pub plate: String,       // `Plate_<n>`, numbered from 1
    pub plate_number: usize, // The `<n>` of `plate`
    pub well: String,        // e.g. `B3`
    pub fragment: String,    // Source fragment of the oligo
    pub label: String,       // Display label, `INVALID_` marked when flagged
    pub sequence: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub fragment: String,
    pub plate: String, // `Destination_Plate_<n>`
    pub well: String,
}

/// One transfer of an oligo into the destination well of its fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolingRow {
    pub source_plate: String,
    pub source_well: String,
    pub sequence: String,
    pub dest_plate: String,
    pub dest_well: String,
    pub volume_ul: u32,
}

/// Copy of a source well onto the same well of `Working_Plate<n>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DilutionRow {
    pub source_plate: String,
    pub well: String,
    pub working_plate: String,
    pub volume_ul: u32,
}

/// A primer placed on a primer plate and routed to its fragment's pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimerAssignment {
    pub source_plate: String, // `Primer_Plate_<n>`
    pub source_well: String,
    pub label: String, // `<fragment>_FP` or `<fragment>_RP`
    pub sequence: String,
    pub dest_plate: String,
    pub dest_well: String,
}

/// 1-based plate number and well name of the `index`-th item placed in `format`.
fn slot(index: usize, format: PlateFormat) -> Option<(usize, String)> {
    let well = format.well(index % format.capacity)?;
    Some((index / format.capacity + 1, well))
}

/// Places every oligo of `layout` on source plates, in layout order.
pub fn assign_wells(layout: &OligoLayout<'_>, format: PlateFormat) -> Vec<WellAssignment> {
    layout
        .flatten()
        .into_iter()
        .enumerate()
        .filter_map(|(i, oligo)| {
            let (plate_number, well) = slot(i, format)?;
            Some(WellAssignment {
                plate: format!("Plate_{}", plate_number),
                plate_number,
                well,
                fragment: oligo.fragment.clone(),
                label: oligo.display_label(),
                sequence: oligo.sequence.clone(),
            })
        })
        .collect()
}

/// One destination well per fragment, in first-seen fragment order.
pub fn destination_map(layout: &OligoLayout<'_>, format: PlateFormat) -> Vec<Destination> {
    layout
        .fragments()
        .into_iter()
        .enumerate()
        .filter_map(|(i, fragment)| {
            let (plate_number, well) = slot(i, format)?;
            Some(Destination {
                fragment: fragment.to_string(),
                plate: format!("Destination_Plate_{}", plate_number),
                well,
            })
        })
        .collect()
}

fn destination_index(destinations: &[Destination]) -> HashMap<&str, &Destination> {
    destinations
        .iter()
        .map(|d| (d.fragment.as_str(), d))
        .collect()
}

/// Routes every source well to the destination well of its fragment.
///
/// Rows come in layout order, so all oligos of one fragment are contiguous.
pub fn pooling_map(
    layout: &OligoLayout<'_>,
    source: PlateFormat,
    destination: PlateFormat,
) -> Vec<PoolingRow> {
    let destinations = destination_map(layout, destination);
    let by_fragment = destination_index(&destinations);
    assign_wells(layout, source)
        .into_iter()
        .filter_map(|w| {
            let dest = by_fragment.get(w.fragment.as_str())?;
            Some(PoolingRow {
                source_plate: w.plate,
                source_well: w.well,
                sequence: w.sequence,
                dest_plate: dest.plate.clone(),
                dest_well: dest.well.clone(),
                volume_ul: POOLING_VOLUME_UL,
            })
        })
        .collect()
}

/// Working-plate copies of the source wells, well for well.
pub fn dilution_map(wells: &[WellAssignment]) -> Vec<DilutionRow> {
    wells
        .iter()
        .map(|w| DilutionRow {
            source_plate: w.plate.clone(),
            well: w.well.clone(),
            working_plate: format!("Working_Plate{}", w.plate_number),
            volume_ul: DILUTION_VOLUME_UL,
        })
        .collect()
}

/// Places forward then reverse primers of each fragment on primer plates.
///
/// Every primer takes a source well in the given order. Primers whose fragment
/// has no oligos in `layout` get no destination and are left out of the result.
pub fn primer_map(
    primers: &[(String, PrimerPair)],
    layout: &OligoLayout<'_>,
    source: PlateFormat,
    destination: PlateFormat,
) -> Vec<PrimerAssignment> {
    let destinations = destination_map(layout, destination);
    let by_fragment = destination_index(&destinations);

    primers
        .iter()
        .flat_map(|(fragment, pair)| {
            [
                ("FP", pair.forward_primer.as_deref()),
                ("RP", pair.reverse_primer.as_deref()),
            ]
            .into_iter()
            .filter_map(move |(suffix, sequence)| {
                let sequence = sequence.filter(|s| !s.is_empty())?;
                Some((fragment.as_str(), suffix, sequence))
            })
        })
        .enumerate()
        .filter_map(|(i, (fragment, suffix, sequence))| {
            let (plate_number, well) = slot(i, source)?;
            let dest = by_fragment.get(fragment)?;
            Some(PrimerAssignment {
                source_plate: format!("Primer_Plate_{}", plate_number),
                source_well: well,
                label: format!("{}_{}", fragment, suffix),
                sequence: sequence.to_string(),
                dest_plate: dest.plate.clone(),
                dest_well: dest.well.clone(),
            })
        })
        .collect()
}
