//! Client-side collection state
//!
//! A [`ListView`] holds one screen's copy of a backend collection together
//! with the search term, named filters and the bulk selection set. The
//! collection is replaced wholesale on refetch and patched by id after
//! successful mutations.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use crate::api::Resource;

type Predicate<R> = Box<dyn Fn(&R) -> bool + Send + Sync>;

pub struct ListView<R: Resource> {
    items: Vec<R>,
    search: String,
    filters: BTreeMap<String, Predicate<R>>,
    selected: BTreeSet<i64>,
}

impl<R: Resource> Default for ListView<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search: String::new(),
            filters: BTreeMap::new(),
            selected: BTreeSet::new(),
        }
    }
}

impl<R: Resource + fmt::Debug> fmt::Debug for ListView<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListView")
            .field("items", &self.items)
            .field("search", &self.search)
            .field("filters", &self.filters.keys().collect::<Vec<_>>())
            .field("selected", &self.selected)
            .finish()
    }
}

/// Case-insensitive substring match against any searchable field
pub fn matches_search<R: Resource>(item: &R, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
}

impl<R: Resource> ListView<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the collection after a (re)fetch; selections of vanished
    /// rows are dropped
    pub fn replace_all(&mut self, items: Vec<R>) {
        let ids: BTreeSet<i64> = items.iter().map(Resource::id).collect();
        self.selected.retain(|id| ids.contains(id));
        self.items = items;
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Install or replace the filter registered under `name`
    pub fn set_filter<F>(&mut self, name: &str, predicate: F)
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.filters.insert(name.to_string(), Box::new(predicate));
    }

    pub fn clear_filter(&mut self, name: &str) -> bool {
        self.filters.remove(name).is_some()
    }

    pub fn has_filter(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    /// Rows matching the search term and every active filter, in collection order
    pub fn visible(&self) -> Vec<&R> {
        self.items
            .iter()
            .filter(|item| matches_search(*item, &self.search))
            .filter(|item| self.filters.values().all(|predicate| predicate(*item)))
            .collect()
    }

    /// Replace the row with the same id; returns `false` when absent
    pub fn patch(&mut self, item: R) -> bool {
        match self.items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Patch by id, or append when the row is new
    pub fn upsert(&mut self, item: R) {
        if !self.patch(item.clone()) {
            self.items.push(item);
        }
    }

    /// Remove exactly the row with `id`
    pub fn remove(&mut self, id: i64) -> Option<R> {
        self.selected.remove(&id);
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Apply `update` to every row whose id is in `ids`; returns the number touched
    pub fn update_where<F>(&mut self, ids: &BTreeSet<i64>, mut update: F) -> usize
    where
        F: FnMut(&mut R),
    {
        let mut touched = 0;
        for item in self.items.iter_mut().filter(|item| ids.contains(&item.id())) {
            update(item);
            touched += 1;
        }
        touched
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    pub fn toggle_selected(&mut self, id: i64) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Select every visible row, or clear the selection when all visible
    /// rows are already selected
    pub fn toggle_select_all(&mut self) {
        let visible: BTreeSet<i64> = self.visible().into_iter().map(Resource::id).collect();
        if !visible.is_empty() && visible.is_subset(&self.selected) {
            self.selected.clear();
        } else {
            self.selected = visible;
        }
    }

    pub fn selected_ids(&self) -> &BTreeSet<i64> {
        &self.selected
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }
}
