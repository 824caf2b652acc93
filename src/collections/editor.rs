use super::{ChildItem, CollectionLimit, CollectionSink, SyncStrategy, is_placeholder, placeholder_id};
use crate::core::{ConsoleError, Result};
use tracing::{debug, warn};

/// Which form, if any, is open over the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Closed,
    Adding,
    Editing(usize),
}

impl EditMode {
    /// Index used by the add form.
    pub const ADD_SENTINEL: i64 = -1;

    /// `-1` while adding, the item index while editing.
    pub fn index(&self) -> Option<i64> {
        match self {
            Self::Closed => None,
            Self::Adding => Some(Self::ADD_SENTINEL),
            Self::Editing(index) => Some(*index as i64),
        }
    }
}

/// A staged change: the local state is already updated where the strategy
/// allows it, and the backend call still has to run.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOp<T> {
    ReplaceAll { previous: Vec<T>, payload: Vec<T> },
    Create { item: T },
    Update { index: usize, id: String, item: T },
    Delete { index: usize, id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome<T> {
    Collection(Vec<T>),
    Item(T),
    Removed,
}

impl<T: ChildItem> SyncOp<T> {
    pub async fn run<S>(&self, sink: &S) -> Result<SyncOutcome<T>>
    where
        S: CollectionSink<T> + ?Sized,
    {
        match self {
            Self::ReplaceAll { payload, .. } => {
                sink.replace_all(payload).await.map(SyncOutcome::Collection)
            }
            Self::Create { item } => sink.create_item(item).await.map(SyncOutcome::Item),
            Self::Update { id, item, .. } => {
                sink.update_item(id, item).await.map(SyncOutcome::Item)
            }
            Self::Delete { id, .. } => sink.delete_item(id).await.map(|_| SyncOutcome::Removed),
        }
    }
}

pub struct CollectionEditor<T: ChildItem> {
    items: Vec<T>,
    strategy: SyncStrategy,
    limit: Option<CollectionLimit>,
    mode: EditMode,
}

impl<T: ChildItem> CollectionEditor<T> {
    pub fn new(items: Vec<T>, strategy: SyncStrategy, limit: Option<CollectionLimit>) -> Self {
        Self {
            items,
            strategy,
            limit,
            mode: EditMode::Closed,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn strategy(&self) -> SyncStrategy {
        self.strategy
    }

    /// Replace local items with the collection as refetched from the server.
    /// Placeholder identifiers disappear here.
    pub fn reconcile(&mut self, server_items: Vec<T>) {
        self.items = server_items;
    }

    pub fn begin_add(&mut self) -> Result<()> {
        self.check_capacity()?;
        self.mode = EditMode::Adding;
        Ok(())
    }

    pub fn begin_edit(&mut self, index: usize) -> Result<()> {
        self.ensure_index(index)?;
        self.mode = EditMode::Editing(index);
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.mode = EditMode::Closed;
    }

    /// Stage the open form's `draft`. Fails locally, without touching the
    /// backend, when no form is open or the collection is full.
    pub fn stage_submit(&mut self, mut draft: T) -> Result<SyncOp<T>> {
        match (self.mode, self.strategy) {
            (EditMode::Closed, _) => Err(ConsoleError::validation("no item is being edited")),
            (EditMode::Adding, SyncStrategy::ArrayReplace) => {
                self.check_capacity()?;
                draft.set_child_id(Some(placeholder_id()));
                let previous = self.items.clone();
                self.items.push(draft);
                Ok(self.replace_all_op(previous))
            }
            (EditMode::Adding, SyncStrategy::PerItem) => {
                self.check_capacity()?;
                draft.set_child_id(None);
                Ok(SyncOp::Create { item: draft })
            }
            (EditMode::Editing(index), SyncStrategy::ArrayReplace) => {
                self.ensure_index(index)?;
                draft.set_child_id(self.items[index].child_id().map(str::to_string));
                let previous = self.items.clone();
                self.items[index] = draft;
                Ok(self.replace_all_op(previous))
            }
            (EditMode::Editing(index), SyncStrategy::PerItem) => {
                let id = self.persisted_id(index)?;
                draft.set_child_id(Some(id.clone()));
                Ok(SyncOp::Update {
                    index,
                    id,
                    item: draft,
                })
            }
        }
    }

    pub fn stage_remove(&mut self, index: usize) -> Result<SyncOp<T>> {
        self.ensure_index(index)?;
        match self.strategy {
            SyncStrategy::ArrayReplace => {
                let previous = self.items.clone();
                self.items.remove(index);
                Ok(self.replace_all_op(previous))
            }
            SyncStrategy::PerItem => {
                let id = self.persisted_id(index)?;
                Ok(SyncOp::Delete { index, id })
            }
        }
    }

    /// Reorder; only whole-array collections carry an order the server keeps.
    pub fn stage_move(&mut self, from: usize, to: usize) -> Result<SyncOp<T>> {
        if self.strategy != SyncStrategy::ArrayReplace {
            return Err(ConsoleError::validation(
                "items of this collection cannot be reordered",
            ));
        }
        self.ensure_index(from)?;
        self.ensure_index(to)?;

        let previous = self.items.clone();
        let item = self.items.remove(from);
        self.items.insert(to, item);
        Ok(self.replace_all_op(previous))
    }

    /// Apply the backend's answer to a staged op.
    ///
    /// On failure, optimistic local changes are rolled back and the form stays
    /// open so the user can retry.
    pub fn settle(&mut self, op: SyncOp<T>, outcome: Result<SyncOutcome<T>>) -> Result<()> {
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, "collection sync failed");
                if let SyncOp::ReplaceAll { previous, .. } = op {
                    self.items = previous;
                }
                return Err(err);
            }
        };

        match (op, outcome) {
            (SyncOp::ReplaceAll { .. }, SyncOutcome::Collection(saved)) => self.reconcile(saved),
            (SyncOp::Create { .. }, SyncOutcome::Item(saved)) => self.items.push(saved),
            (SyncOp::Update { index, .. }, SyncOutcome::Item(saved)) => {
                if let Some(slot) = self.items.get_mut(index) {
                    *slot = saved;
                }
            }
            (SyncOp::Delete { index, id }, SyncOutcome::Removed) => {
                // Guard against the list having been reconciled meanwhile.
                if self.items.get(index).and_then(|item| item.child_id()) == Some(id.as_str()) {
                    self.items.remove(index);
                } else {
                    self.items.retain(|item| item.child_id() != Some(id.as_str()));
                }
            }
            (op, outcome) => {
                return Err(ConsoleError::Decode(format!(
                    "unexpected sync outcome {} for {}",
                    outcome_name(&outcome),
                    op_name(&op)
                )));
            }
        }

        debug!(len = self.items.len(), "collection synced");
        self.mode = EditMode::Closed;
        Ok(())
    }

    pub async fn submit<S>(&mut self, draft: T, sink: &S) -> Result<()>
    where
        S: CollectionSink<T> + ?Sized,
    {
        let op = self.stage_submit(draft)?;
        let outcome = op.run(sink).await;
        self.settle(op, outcome)
    }

    pub async fn remove<S>(&mut self, index: usize, sink: &S) -> Result<()>
    where
        S: CollectionSink<T> + ?Sized,
    {
        let op = self.stage_remove(index)?;
        let outcome = op.run(sink).await;
        self.settle(op, outcome)
    }

    pub async fn move_item<S>(&mut self, from: usize, to: usize, sink: &S) -> Result<()>
    where
        S: CollectionSink<T> + ?Sized,
    {
        let op = self.stage_move(from, to)?;
        let outcome = op.run(sink).await;
        self.settle(op, outcome)
    }

    fn check_capacity(&self) -> Result<()> {
        match self.limit {
            Some(limit) => limit.check(self.items.len()),
            None => Ok(()),
        }
    }

    fn ensure_index(&self, index: usize) -> Result<()> {
        if index >= self.items.len() {
            return Err(ConsoleError::NotFound(format!("item #{index}")));
        }
        Ok(())
    }

    fn persisted_id(&self, index: usize) -> Result<String> {
        self.ensure_index(index)?;
        match self.items[index].child_id() {
            Some(id) if !is_placeholder(id) => Ok(id.to_string()),
            _ => Err(ConsoleError::validation("item has not been saved yet")),
        }
    }

    fn replace_all_op(&self, previous: Vec<T>) -> SyncOp<T> {
        SyncOp::ReplaceAll {
            previous,
            payload: strip_placeholders(&self.items),
        }
    }
}

/// Copy of `items` with client-generated identifiers removed.
pub fn strip_placeholders<T: ChildItem>(items: &[T]) -> Vec<T> {
    items
        .iter()
        .cloned()
        .map(|mut item| {
            if item.child_id().is_some_and(is_placeholder) {
                item.set_child_id(None);
            }
            item
        })
        .collect()
}

fn op_name<T>(op: &SyncOp<T>) -> &'static str {
    match op {
        SyncOp::ReplaceAll { .. } => "replace",
        SyncOp::Create { .. } => "create",
        SyncOp::Update { .. } => "update",
        SyncOp::Delete { .. } => "delete",
    }
}

fn outcome_name<T>(outcome: &SyncOutcome<T>) -> &'static str {
    match outcome {
        SyncOutcome::Collection(_) => "collection",
        SyncOutcome::Item(_) => "item",
        SyncOutcome::Removed => "removed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::POINTS_LIMIT;
    use crate::entities::Point;

    fn point(id: Option<&str>, title: &str) -> Point {
        Point {
            id: id.map(str::to_string),
            title: title.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn add_mode_reports_sentinel_index() {
        let mut editor = CollectionEditor::new(
            vec![point(Some("p1"), "Trusted")],
            SyncStrategy::ArrayReplace,
            Some(POINTS_LIMIT),
        );
        assert_eq!(editor.mode().index(), None);
        editor.begin_add().unwrap();
        assert_eq!(editor.mode().index(), Some(-1));
        editor.begin_edit(0).unwrap();
        assert_eq!(editor.mode().index(), Some(0));
        assert!(editor.begin_edit(3).is_err());
    }

    #[test]
    fn staged_add_shows_placeholder_but_payload_strips_it() {
        let mut editor =
            CollectionEditor::new(Vec::new(), SyncStrategy::ArrayReplace, Some(POINTS_LIMIT));
        editor.begin_add().unwrap();
        let op = editor.stage_submit(point(None, "Vetted")).unwrap();

        let local_id = editor.items()[0].id.clone().unwrap();
        assert!(is_placeholder(&local_id));
        match op {
            SyncOp::ReplaceAll { payload, previous } => {
                assert!(previous.is_empty());
                assert_eq!(payload[0].id, None);
            }
            other => panic!("expected replace op, got {other:?}"),
        }
    }

    #[test]
    fn failed_replace_rolls_back_and_keeps_form_open() {
        let mut editor = CollectionEditor::new(
            vec![point(Some("p1"), "One")],
            SyncStrategy::ArrayReplace,
            Some(POINTS_LIMIT),
        );
        editor.begin_add().unwrap();
        let op = editor.stage_submit(point(None, "Two")).unwrap();
        assert_eq!(editor.len(), 2);

        let err = editor
            .settle(op, Err(ConsoleError::api(500, "")))
            .unwrap_err();
        assert!(matches!(err, ConsoleError::Api { .. }));
        assert_eq!(editor.len(), 1);
        assert_eq!(editor.mode(), EditMode::Adding);
    }

    #[test]
    fn move_reorders_and_rejects_per_item_collections() {
        let mut editor = CollectionEditor::new(
            vec![point(Some("a"), "A"), point(Some("b"), "B"), point(Some("c"), "C")],
            SyncStrategy::ArrayReplace,
            None,
        );
        editor.stage_move(2, 0).unwrap();
        let titles: Vec<_> = editor.items().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);

        let mut per_item =
            CollectionEditor::new(vec![point(Some("a"), "A")], SyncStrategy::PerItem, None);
        assert!(per_item.stage_move(0, 0).is_err());
    }

    #[test]
    fn per_item_edit_requires_a_saved_id() {
        let mut editor = CollectionEditor::new(
            vec![point(Some("tmp-1"), "Pending")],
            SyncStrategy::PerItem,
            None,
        );
        editor.begin_edit(0).unwrap();
        assert!(editor.stage_submit(point(None, "Renamed")).is_err());
    }
}
