use crate::id3::specs::FrameId;

/// Ordered `FrameId -> value` map.
///
/// Iteration follows insertion order, which is also the order frames are
/// written. Inserting an existing id replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameMap {
    entries: Vec<(FrameId, String)>,
}

impl FrameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(&mut self, id: FrameId, value: impl Into<String>) -> Option<String> {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == id) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((id, value));
                None
            }
        }
    }

    pub fn get(&self, id: FrameId) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == id)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, id: FrameId) -> Option<String> {
        let pos = self.entries.iter().position(|(k, _)| *k == id)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn contains(&self, id: FrameId) -> bool {
        self.entries.iter().any(|(k, _)| *k == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FrameId, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(FrameId, S)> for FrameMap {
    fn from_iter<I: IntoIterator<Item = (FrameId, S)>>(iter: I) -> Self {
        let mut map = FrameMap::new();
        for (id, value) in iter {
            map.insert(id, value);
        }
        map
    }
}
