use crate::core::models::oligo::{OligoRecord, Orientation};
use std::fmt;
use tracing::{debug, warn};

/// Oligos of one fragment in display order. Borrows from the input list and is
/// rebuilt on every layout pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutGroup<'a> {
    fragment: &'a str,
    ordered_oligos: Vec<&'a OligoRecord>,
}

impl<'a> LayoutGroup<'a> {
    pub fn fragment(&self) -> &'a str {
        self.fragment
    }

    pub fn oligos(&self) -> &[&'a OligoRecord] {
        &self.ordered_oligos
    }

    pub fn len(&self) -> usize {
        self.ordered_oligos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_oligos.is_empty()
    }

    pub fn labels(&self) -> Vec<&'a str> {
        self.ordered_oligos.iter().map(|o| o.label.as_str()).collect()
    }
}

/// Fragment-grouped, orientation-interlaced view over a flat oligo list.
///
/// Group order is the order in which fragments first appear in the input. This
/// ordering is the one handed to well-plate assignment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OligoLayout<'a> {
    groups: Vec<LayoutGroup<'a>>,
}

impl<'a> OligoLayout<'a> {
    pub fn groups(&self) -> &[LayoutGroup<'a>] {
        &self.groups
    }

    pub fn iter(&self) -> impl Iterator<Item = &LayoutGroup<'a>> {
        self.groups.iter()
    }

    pub fn get(&self, fragment: &str) -> Option<&LayoutGroup<'a>> {
        self.groups.iter().find(|g| g.fragment == fragment)
    }

    pub fn fragments(&self) -> Vec<&'a str> {
        self.groups.iter().map(|g| g.fragment).collect()
    }

    pub fn total_oligos(&self) -> usize {
        self.groups.iter().map(LayoutGroup::len).sum()
    }

    /// Every oligo in layout order, across all groups.
    pub fn flatten(&self) -> Vec<&'a OligoRecord> {
        self.groups
            .iter()
            .flat_map(|g| g.ordered_oligos.iter().copied())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Plain-text listing: a `> fragment` header, one tab-separated line per oligo,
/// and a blank line after each group.
impl fmt::Display for OligoLayout<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in &self.groups {
            writeln!(f, "> {}", group.fragment)?;
            for oligo in &group.ordered_oligos {
                writeln!(
                    f,
                    "{}\t{}\t{}",
                    oligo.display_label(),
                    oligo.sequence,
                    oligo.length
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Groups oligos by fragment and interlaces forward and reverse-complement
/// strands as `FF_1, RC_1, FF_2, RC_2, ...`.
///
/// Within each strand oligos are sorted by the label index. Labels without a
/// parseable index go last, keeping their input order. Invalid oligos are kept.
pub fn layout(oligos: &[OligoRecord]) -> OligoLayout<'_> {
    let mut buckets: Vec<(&str, Vec<&OligoRecord>)> = Vec::new();
    for oligo in oligos {
        match buckets.iter_mut().find(|(name, _)| *name == oligo.fragment) {
            Some((_, members)) => members.push(oligo),
            None => buckets.push((oligo.fragment.as_str(), vec![oligo])),
        }
    }

    let groups = buckets
        .into_iter()
        .map(|(fragment, members)| {
            let (mut forward, mut reverse): (Vec<&OligoRecord>, Vec<&OligoRecord>) = members
                .into_iter()
                .partition(|o| o.orientation() == Orientation::Forward);

            sort_by_index(&mut forward, fragment);
            sort_by_index(&mut reverse, fragment);

            LayoutGroup {
                fragment,
                ordered_oligos: interlace(forward, reverse),
            }
        })
        .collect::<Vec<_>>();

    debug!(
        "Laid out {} oligo(s) across {} fragment(s).",
        oligos.len(),
        groups.len()
    );
    OligoLayout { groups }
}

fn sort_by_index(strand: &mut [&OligoRecord], fragment: &str) {
    for oligo in strand.iter().filter(|o| o.index_num().is_none()) {
        warn!(
            "Oligo label '{}' in fragment '{}' has no numeric index; placing it last.",
            oligo.label, fragment
        );
    }
    // Stable: ties and unparseable labels keep input order.
    strand.sort_by_key(|o| match o.index_num() {
        Some(index) => (false, index),
        None => (true, 0),
    });
}

fn interlace<'a>(forward: Vec<&'a OligoRecord>, reverse: Vec<&'a OligoRecord>) -> Vec<&'a OligoRecord> {
    let slots = forward.len().max(reverse.len());
    let mut ordered = Vec::with_capacity(forward.len() + reverse.len());
    let mut forward = forward.into_iter();
    let mut reverse = reverse.into_iter();
    for _ in 0..slots {
        ordered.extend(forward.next());
        ordered.extend(reverse.next());
    }
    ordered
}
