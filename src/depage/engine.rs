//! The depagination engine

use super::path::{self, Step};
use super::types::{MergeState, PageInfo};
use crate::client::QueryExecutor;
use crate::cursor::{CursorSpec, CursorTable};
use crate::error::{Error, Result};
use crate::types::{JsonValue, Variables};
use futures::future::BoxFuture;
use tracing::{debug, trace};

/// Depaginate `query` against `executor`, fully materializing every
/// collection described by `table`.
///
/// Convenience wrapper around [`Depaginator::run`].
pub async fn depaginate<E>(
    executor: &E,
    query: &str,
    table: &CursorTable,
    variables: Variables,
) -> Result<JsonValue>
where
    E: QueryExecutor + ?Sized,
{
    Depaginator::new(executor, query).run(table, variables).await
}

/// Drives repeated executor calls for one query until every cursor in a
/// table is exhausted, merging pages into a single result tree.
pub struct Depaginator<'a, E: ?Sized> {
    executor: &'a E,
    query: &'a str,
}

impl<E: ?Sized> std::fmt::Debug for Depaginator<'_, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Depaginator")
            .field("query_len", &self.query.len())
            .finish_non_exhaustive()
    }
}

impl<'a, E> Depaginator<'a, E>
where
    E: QueryExecutor + ?Sized,
{
    /// Create an engine bound to an executor and a query.
    pub fn new(executor: &'a E, query: &'a str) -> Self {
        Self { executor, query }
    }

    /// Issue the first call and fully depaginate it.
    ///
    /// An empty cursor table is a direct pass-through to the executor: the
    /// result tree comes back untouched.
    pub async fn run(&self, table: &CursorTable, variables: Variables) -> Result<JsonValue> {
        if table.is_empty() {
            return self.executor.execute(self.query, &variables).await;
        }
        self.fetch_and_drain(table, &[], variables).await
    }

    /// One whole depagination pass: a fresh first call, then every cursor
    /// in `table` drained against it, scoped at `prev_path`.
    async fn fetch_and_drain(
        &self,
        table: &CursorTable,
        prev_path: &[Step],
        variables: Variables,
    ) -> Result<JsonValue> {
        let mut tree = self.executor.execute(self.query, &variables).await?;
        self.drain(&mut tree, table, prev_path, variables).await?;
        Ok(tree)
    }

    /// Drain every cursor in `table` against `tree`.
    ///
    /// Boxed: this is the point the nested fan-out re-enters. Cursors are
    /// independent; cursor-variable writes persist across siblings at this
    /// level but never leak back to the caller's map.
    fn drain<'s>(
        &'s self,
        tree: &'s mut JsonValue,
        table: &'s CursorTable,
        prev_path: &'s [Step],
        mut variables: Variables,
    ) -> BoxFuture<'s, Result<()>> {
        Box::pin(async move {
            for (cursor, spec) in table {
                self.merge_pages(tree, cursor, spec, prev_path, &mut variables)
                    .await?;
            }
            Ok(())
        })
    }

    /// Multi-page loop for a single cursor: locate the paginated object,
    /// strip its `pageInfo`, then fetch and append pages until the
    /// upstream reports `hasNextPage: false`.
    async fn merge_pages(
        &self,
        tree: &mut JsonValue,
        cursor: &str,
        spec: &CursorSpec,
        prev_path: &[Step],
        variables: &mut Variables,
    ) -> Result<()> {
        let current_path = path::extend(prev_path, &spec.path);
        let mut state = MergeState::new();

        let mut info = {
            let obj = path::walk_mut(tree, &current_path)?;
            take_page_info(obj, &current_path)?
        };

        while info.has_next_page {
            let end_cursor = info.end_cursor.take().ok_or_else(|| {
                Error::shape(
                    path::render(&current_path),
                    "hasNextPage is true but endCursor is missing",
                )
            })?;
            variables.insert(cursor.to_string(), JsonValue::String(end_cursor.clone()));
            state.fetched(end_cursor);
            trace!(cursor, page = state.pages_fetched, "fetching next page");

            let mut page = self.executor.execute(self.query, variables).await?;
            let (next_info, mut fresh) = {
                let page_obj = path::walk_mut(&mut page, &current_path)?;
                let next_info = take_page_info(page_obj, &current_path)?;
                let fresh = take_nodes(page_obj, &current_path)?;
                (next_info, fresh)
            };
            state.merged(fresh.len());

            // Append in fetch order; duplicates across pages are an
            // upstream inconsistency and are preserved verbatim.
            let obj = path::walk_mut(tree, &current_path)?;
            nodes_mut(obj, &current_path)?.append(&mut fresh);
            info = next_info;
        }
        state.done();
        debug!(
            cursor,
            pages = state.pages_fetched,
            appended = state.nodes_merged,
            path = %path::render(&current_path),
            "cursor drained"
        );

        if let Some(next_table) = &spec.next {
            self.fan_out(tree, next_table, prev_path, &current_path, variables)
                .await?;
        }
        Ok(())
    }

    /// Visit every node of a completed collection and depaginate its
    /// nested cursors.
    async fn fan_out(
        &self,
        tree: &mut JsonValue,
        next_table: &CursorTable,
        prev_path: &[Step],
        current_path: &[Step],
        variables: &Variables,
    ) -> Result<()> {
        // At the true top level the node base reuses the cursor's own
        // path; deeper in, the enclosing node path already embeds it.
        let base = if prev_path.is_empty() {
            current_path
        } else {
            prev_path
        };

        let node_count = {
            let obj = path::walk(tree, current_path)?;
            nodes_len(obj, current_path)?
        };

        for index in 0..node_count {
            let mut node_path = base.to_vec();
            node_path.push(Step::key("nodes"));
            node_path.push(Step::Index(index));
            self.depaginate_node(tree, &node_path, next_table, variables)
                .await?;
        }
        Ok(())
    }

    /// Per-node nested fan-out: pre-check, recurse, weld.
    async fn depaginate_node(
        &self,
        tree: &mut JsonValue,
        node_path: &[Step],
        next_table: &CursorTable,
        variables: &Variables,
    ) -> Result<()> {
        // A further call is only needed when a nested cursor has more
        // pages or owns a deeper table. The pre-check also strips each
        // nested pageInfo so the final tree is cursor-free either way.
        let mut call_required = false;
        for nested_spec in next_table.values() {
            let target_path = path::extend(node_path, &nested_spec.path);
            let target = path::walk_mut(tree, &target_path)?;
            let info = take_page_info(target, &target_path)?;
            if info.has_next_page || nested_spec.next.is_some() {
                call_required = true;
            }
        }
        if !call_required {
            trace!(path = %path::render(node_path), "nested collections complete in first page");
            return Ok(());
        }

        let mut sub_tree = self
            .fetch_and_drain(next_table, node_path, variables.clone())
            .await?;

        // Weld: wholesale replacement. The sub-tree already holds each
        // nested collection's complete merged nodes.
        for nested_spec in next_table.values() {
            let join_path = path::extend(node_path, &nested_spec.path);
            let resolved = {
                let sub_obj = path::walk_mut(&mut sub_tree, &join_path)?;
                take_nodes(sub_obj, &join_path)?
            };
            let target = path::walk_mut(tree, &join_path)?;
            set_nodes(target, &join_path, resolved)?;
        }
        Ok(())
    }
}

// ============================================================================
// Pagination object helpers
// ============================================================================

fn take_page_info(obj: &mut JsonValue, at: &[Step]) -> Result<PageInfo> {
    let map = obj
        .as_object_mut()
        .ok_or_else(|| Error::shape(path::render(at), "expected an object"))?;
    let raw = map
        .remove("pageInfo")
        .ok_or_else(|| Error::shape(path::render(at), "missing pageInfo"))?;
    serde_json::from_value(raw)
        .map_err(|err| Error::shape(path::render(at), format!("malformed pageInfo: {err}")))
}

fn take_nodes(obj: &mut JsonValue, at: &[Step]) -> Result<Vec<JsonValue>> {
    let map = obj
        .as_object_mut()
        .ok_or_else(|| Error::shape(path::render(at), "expected an object"))?;
    match map.remove("nodes") {
        Some(JsonValue::Array(nodes)) => Ok(nodes),
        Some(_) => Err(Error::shape(path::render(at), "nodes is not an array")),
        None => Err(Error::shape(path::render(at), "missing nodes")),
    }
}

fn nodes_mut<'v>(obj: &'v mut JsonValue, at: &[Step]) -> Result<&'v mut Vec<JsonValue>> {
    obj.get_mut("nodes")
        .and_then(JsonValue::as_array_mut)
        .ok_or_else(|| Error::shape(path::render(at), "missing nodes"))
}

fn nodes_len(obj: &JsonValue, at: &[Step]) -> Result<usize> {
    obj.get("nodes")
        .and_then(JsonValue::as_array)
        .map(Vec::len)
        .ok_or_else(|| Error::shape(path::render(at), "missing nodes"))
}

fn set_nodes(obj: &mut JsonValue, at: &[Step], nodes: Vec<JsonValue>) -> Result<()> {
    let map = obj
        .as_object_mut()
        .ok_or_else(|| Error::shape(path::render(at), "expected an object"))?;
    map.insert("nodes".to_string(), JsonValue::Array(nodes));
    Ok(())
}
