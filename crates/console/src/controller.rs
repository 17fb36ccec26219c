//! Generic list controller.
//!
//! One controller instance owns the full lifecycle of a resource list
//! screen: load the collection, filter and sort it client-side, mutate
//! individual items, and reconcile mutation results back into the
//! in-memory collection without a full reload. View layers render the
//! working collection and forward user actions (search input, sort-header
//! clicks, delete clicks, inline field edits) into it.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::{Map, Value};
use xomo_admin_core::{ResourceId, ResourceRecord, SortKey, merge_partial};

use crate::client::ResourceClient;
use crate::error::{Operation, OperationError};

/// Sort direction for the working collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Transient filter state; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_term: String,
    pub sort_field: Option<String>,
    pub sort_direction: SortDirection,
}

/// A sortable field: its name and the extractor producing a comparable key.
pub struct SortSpec<R> {
    pub field: String,
    pub extract: fn(&R) -> Option<SortKey>,
}

impl<R> Clone for SortSpec<R> {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
            extract: self.extract,
        }
    }
}

/// Per-kind controller configuration: which fields search reads and which
/// fields the list can sort by. Fields outside the config cannot be used.
pub struct ListConfig<R> {
    searchable_fields: Vec<String>,
    sortable_fields: Vec<SortSpec<R>>,
}

impl<R> Default for ListConfig<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ListConfig<R> {
    /// An empty configuration (no search, no sort).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            searchable_fields: Vec::new(),
            sortable_fields: Vec::new(),
        }
    }

    /// Add a dotted field path read by search.
    #[must_use]
    pub fn searchable(mut self, path: &str) -> Self {
        self.searchable_fields.push(path.to_string());
        self
    }

    /// Add a sortable field with its key extractor.
    #[must_use]
    pub fn sortable(mut self, field: &str, extract: fn(&R) -> Option<SortKey>) -> Self {
        self.sortable_fields.push(SortSpec {
            field: field.to_string(),
            extract,
        });
        self
    }

    fn sort_spec(&self, field: &str) -> Option<&SortSpec<R>> {
        self.sortable_fields.iter().find(|s| s.field == field)
    }
}

struct ListState<R> {
    /// Server truth as of the last successful load, with mutation results
    /// reconciled in. Replaced wholesale by `load`, never filtered in place.
    raw: Vec<R>,
    /// Filtered + sorted view of `raw`; always recomputed, never mutated.
    working: Vec<R>,
    filter: FilterState,
    /// IDs with a mutation in flight; an entry exists only until the
    /// operation settles.
    in_flight: HashSet<ResourceId>,
    loading: bool,
    last_error: Option<OperationError>,
}

impl<R> Default for ListState<R> {
    fn default() -> Self {
        Self {
            raw: Vec::new(),
            working: Vec::new(),
            filter: FilterState::default(),
            in_flight: HashSet::new(),
            loading: false,
            last_error: None,
        }
    }
}

/// Generic controller for one resource collection.
///
/// Cheaply cloneable; clones share state, so a view can hold one handle
/// while an in-flight operation holds another. All methods take `&self`:
/// mutations on different IDs may overlap freely, each tracked by its own
/// in-flight flag. There is no per-ID serialization (two patches racing on
/// one ID resolve last-wins) and no cancellation: a result arriving after
/// the collection was replaced is discarded, not reconciled.
pub struct ResourceListController<C: ResourceClient> {
    inner: Arc<ControllerInner<C>>,
}

impl<C: ResourceClient> Clone for ResourceListController<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct ControllerInner<C: ResourceClient> {
    client: C,
    config: ListConfig<C::Resource>,
    state: Mutex<ListState<C::Resource>>,
}

impl<C: ResourceClient> ResourceListController<C> {
    /// Create a controller over a client and its list configuration.
    #[must_use]
    pub fn new(client: C, config: ListConfig<C::Resource>) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                client,
                config,
                state: Mutex::new(ListState::default()),
            }),
        }
    }

    /// Load (or reload) the collection.
    ///
    /// On success the raw collection is replaced wholesale and any error
    /// state clears; on failure the collection empties and a `LoadFailure`
    /// is both returned and kept for the empty-with-retry view. Idempotent;
    /// overlapping calls are not de-duplicated and the last resolution
    /// wins.
    pub async fn load(&self) -> Result<(), OperationError> {
        self.with_state(|state| state.loading = true);

        let result = self.inner.client.list().await;

        self.with_state(|state| {
            state.loading = false;
            match result {
                Ok(items) => {
                    state.raw = items;
                    state.last_error = None;
                    recompute(state, &self.inner.config);
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(error = %e, "list load failed");
                    state.raw.clear();
                    recompute(state, &self.inner.config);
                    let err = OperationError::load(e.to_string());
                    state.last_error = Some(err.clone());
                    Err(err)
                }
            }
        })
    }

    /// Update the search term and recompute the working collection.
    ///
    /// A resource matches when the lower-cased term is a substring of the
    /// lower-cased string form of any configured searchable field (missing
    /// fields count as empty). A blank term matches everything.
    pub fn set_search_term(&self, term: &str) {
        self.with_state(|state| {
            state.filter.search_term = term.to_string();
            recompute(state, &self.inner.config);
        });
    }

    /// Toggle sorting by a configured field.
    ///
    /// Sorting by the current field flips direction; a new field starts
    /// ascending. Unknown fields are a no-op.
    pub fn set_sort(&self, field: &str) {
        if self.inner.config.sort_spec(field).is_none() {
            return;
        }
        self.with_state(|state| {
            if state.filter.sort_field.as_deref() == Some(field) {
                state.filter.sort_direction = state.filter.sort_direction.toggled();
            } else {
                state.filter.sort_field = Some(field.to_string());
                state.filter.sort_direction = SortDirection::Asc;
            }
            recompute(state, &self.inner.config);
        });
    }

    /// Delete one resource.
    ///
    /// Any confirmation prompt is the caller's job. An ID absent from the
    /// raw collection is a no-op (a concurrent reload already dropped the
    /// row). On success the entry is removed in place; on failure the
    /// collection is untouched and a `MutationFailure` is returned. The
    /// in-flight flag clears either way.
    pub async fn remove_resource(&self, id: &ResourceId) -> Result<(), OperationError> {
        if !self.begin_mutation(id) {
            return Ok(());
        }

        let result = self.inner.client.remove(id).await;

        self.with_state(|state| {
            state.in_flight.remove(id);
            match result {
                Ok(()) => {
                    state.raw.retain(|r| r.id() != *id);
                    recompute(state, &self.inner.config);
                    Ok(())
                }
                Err(e) => {
                    tracing::warn!(%id, error = %e, "remove failed");
                    Err(OperationError::mutation(
                        Operation::Remove,
                        id.clone(),
                        e.to_string(),
                    ))
                }
            }
        })
    }

    /// Mutate named fields of one resource (e.g. an inline status or role
    /// edit).
    ///
    /// Confirm-then-apply: nothing changes locally until the server
    /// confirms, then the server's representation (or the partial, if the
    /// server acked without one) merges into the matching entry. An ID
    /// absent from the raw collection is a no-op, and a result arriving
    /// after a reload dropped the entry is discarded.
    pub async fn patch_resource(
        &self,
        id: &ResourceId,
        partial: Map<String, Value>,
    ) -> Result<(), OperationError> {
        if !self.begin_mutation(id) {
            return Ok(());
        }

        let result = self.inner.client.patch(id, &partial).await;

        self.with_state(|state| {
            state.in_flight.remove(id);
            let updated = match result {
                Ok(updated) => updated,
                Err(e) => {
                    tracing::warn!(%id, error = %e, "patch failed");
                    return Err(OperationError::mutation(
                        Operation::Patch,
                        id.clone(),
                        e.to_string(),
                    ));
                }
            };

            let Some(entry) = state.raw.iter_mut().find(|r| r.id() == *id) else {
                return Ok(());
            };
            let merged = match updated {
                Some(record) => Ok(record),
                None => merge_partial(entry, &partial),
            };
            match merged {
                Ok(record) => {
                    *entry = record;
                    recompute(state, &self.inner.config);
                    Ok(())
                }
                Err(e) => Err(OperationError::mutation(
                    Operation::Patch,
                    id.clone(),
                    e.to_string(),
                )),
            }
        })
    }

    /// The current working (filtered + sorted) collection.
    #[must_use]
    pub fn working(&self) -> Vec<C::Resource> {
        self.with_state(|state| state.working.clone())
    }

    /// Whether a list fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.with_state(|state| state.loading)
    }

    /// Whether a mutation on this ID is in flight.
    #[must_use]
    pub fn is_in_flight(&self, id: &ResourceId) -> bool {
        self.with_state(|state| state.in_flight.contains(id))
    }

    /// The most recent load failure, if the last load failed.
    #[must_use]
    pub fn last_error(&self) -> Option<OperationError> {
        self.with_state(|state| state.last_error.clone())
    }

    /// Snapshot of the current filter state.
    #[must_use]
    pub fn filter(&self) -> FilterState {
        self.with_state(|state| state.filter.clone())
    }

    /// Mark a mutation in flight; `false` when the ID is not in the raw
    /// collection and the operation should be a no-op.
    fn begin_mutation(&self, id: &ResourceId) -> bool {
        self.with_state(|state| {
            if state.raw.iter().any(|r| r.id() == *id) {
                state.in_flight.insert(id.clone());
                true
            } else {
                false
            }
        })
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut ListState<C::Resource>) -> T) -> T {
        let mut state = self
            .inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }
}

/// Recompute the working collection as a pure function of the raw
/// collection and the filter state.
fn recompute<R: ResourceRecord>(state: &mut ListState<R>, config: &ListConfig<R>) {
    // A blank term matches everything, but a non-blank term matches with
    // its whitespace intact.
    let term = state.filter.search_term.to_lowercase();
    let blank = term.trim().is_empty();
    let mut working: Vec<R> = state
        .raw
        .iter()
        .filter(|r| blank || matches_search(*r, &term, &config.searchable_fields))
        .cloned()
        .collect();

    if let Some(spec) = state
        .filter
        .sort_field
        .as_deref()
        .and_then(|f| config.sort_spec(f))
    {
        let direction = state.filter.sort_direction;
        // Vec::sort_by is stable, so equal keys keep their input order.
        working.sort_by(|a, b| {
            let ordering = compare_keys((spec.extract)(a).as_ref(), (spec.extract)(b).as_ref());
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    state.working = working;
}

fn matches_search<R: ResourceRecord>(record: &R, term: &str, fields: &[String]) -> bool {
    fields
        .iter()
        .any(|path| record.field_text(path).is_some_and(|text| text.to_lowercase().contains(term)))
}

/// `None` (unset field) orders before every `Some`, i.e. as the type's
/// smallest value.
fn compare_keys(a: Option<&SortKey>, b: Option<&SortKey>) -> std::cmp::Ordering {
    match (a, b) {
        (None, None) => std::cmp::Ordering::Equal,
        (None, Some(_)) => std::cmp::Ordering::Less,
        (Some(_), None) => std::cmp::Ordering::Greater,
        (Some(a), Some(b)) => a.compare(b),
    }
}
