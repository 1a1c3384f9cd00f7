use std::collections::HashSet;
use uuid::Uuid;

/// Length of generated element, page, asset and catalog ids
pub const ID_LENGTH: usize = 8;

/// Random lowercase hex id of `len` characters (at most 32)
pub fn random_id(len: usize) -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(len.min(32));
    id
}

/// Id generator that never repeats an id already taken in its category
///
/// Ids only need to be unique within one category (pages, elements of a page,
/// reusable components, assets), so callers seed the generator with the ids
/// currently in use for the category they are adding to.
#[derive(Debug, Clone, Default)]
pub struct IDGenerator {
    taken: HashSet<String>,
}

impl IDGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_taken<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            taken: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Generate the next id and reserve it
    pub fn new_id(&mut self) -> String {
        loop {
            let id = random_id(ID_LENGTH);
            if self.taken.insert(id.clone()) {
                return id;
            }
        }
    }

    pub fn is_taken(&self, id: &str) -> bool {
        self.taken.contains(id)
    }
}
