use super::pool::Reducer;
use crate::model::{AuthorUnit, Contributor};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::mem;

/// An [`AuthorUnit`] with its identity key already computed by a worker.
#[derive(Debug)]
pub struct KeyedUnit {
    pub key: String,
    pub unit: AuthorUnit,
}

struct Tracked {
    contributor: Contributor,
    first_seq: usize,
}

impl Tracked {
    /// Keep discovery order and display name tied to the earliest commit in
    /// the stream, whatever order units arrive in.
    fn observe(&mut self, unit: &AuthorUnit) {
        if unit.seq < self.first_seq {
            self.first_seq = unit.seq;
            self.contributor.name = unit.author.clone();
        }
    }
}

/// Reduces keyed units into contributors. Output is in discovery order.
///
/// Units carrying a hash are held back until `finish`: for each hash only
/// the copy earliest in the stream is counted, whichever copy arrives first.
#[derive(Default)]
pub struct ContributorTally {
    counted: HashMap<String, KeyedUnit>,
    entries: HashMap<String, Tracked>,
    duplicates: usize,
}

impl ContributorTally {
    pub fn new() -> Self {
        Self::default()
    }

    fn fold(&mut self, item: KeyedUnit) {
        let KeyedUnit { key, unit } = item;
        match self.entries.entry(key) {
            Entry::Occupied(mut occupied) => {
                let tracked = occupied.get_mut();
                tracked.contributor.add_unit(&unit);
                tracked.observe(&unit);
            }
            Entry::Vacant(vacant) => {
                vacant.insert(Tracked {
                    contributor: Contributor::new(&unit),
                    first_seq: unit.seq,
                });
            }
        }
    }
}

impl Reducer<KeyedUnit> for ContributorTally {
    type Output = Vec<Contributor>;

    fn absorb(&mut self, item: KeyedUnit) {
        let Some(hash) = item.unit.hash.clone() else {
            self.fold(item);
            return;
        };

        match self.counted.entry(hash) {
            Entry::Occupied(mut occupied) => {
                self.duplicates += 1;
                if item.unit.seq < occupied.get().unit.seq {
                    occupied.insert(item);
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(item);
            }
        }
    }

    fn finish(mut self) -> Vec<Contributor> {
        if self.duplicates > 0 {
            log::debug!("skipped {} repeated commit hashes", self.duplicates);
        }
        let kept: Vec<KeyedUnit> = mem::take(&mut self.counted).into_values().collect();
        for item in kept {
            self.fold(item);
        }

        let mut tracked: Vec<Tracked> = self.entries.into_values().collect();
        tracked.sort_by_key(|t| t.first_seq);
        tracked.into_iter().map(|t| t.contributor).collect()
    }
}
