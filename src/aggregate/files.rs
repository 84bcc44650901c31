use super::pool::Reducer;
use crate::model::FileChange;
use std::collections::HashMap;

/// A path together with its position in the name-only stream.
#[derive(Debug)]
pub struct SeqPath {
    pub seq: usize,
    pub path: String,
}

#[derive(Default)]
pub struct FileTally {
    entries: HashMap<String, (u64, usize)>,
}

impl FileTally {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reducer<SeqPath> for FileTally {
    type Output = Vec<FileChange>;

    fn absorb(&mut self, item: SeqPath) {
        let entry = self.entries.entry(item.path).or_insert((0, item.seq));
        entry.0 += 1;
        entry.1 = entry.1.min(item.seq);
    }

    fn finish(self) -> Vec<FileChange> {
        let mut entries: Vec<(String, (u64, usize))> = self.entries.into_iter().collect();
        entries.sort_by_key(|(_, (_, first_seq))| *first_seq);
        entries
            .into_iter()
            .map(|(path, (change_count, _))| FileChange { path, change_count })
            .collect()
    }
}
