//! TagEditorState - one editing session: buffer, catalog, position tracker and
//! history, driven by [`TagEditMsg`] requests.

use tracing::{debug, span, warn, Level};

use super::buffer::{Segment, TagBuffer};
use super::cursor::{Caret, Position, PositionTracker};
use super::history::{EditHistory, EditOperation};
use super::messages::{EditOutcome, TagEditMsg};
use super::ops::{resolve_backspace_target, SurfaceMap, TagRef};
use super::selection::Selection;
use crate::catalog::{is_bracketable, TagCatalog};
use crate::codec::{SerialForm, Serialized};
use crate::config::TagEditorConfig;
use crate::tracing::BufferSnapshot;

/// A single editing session over one [`TagBuffer`].
///
/// The session is the only writer of its buffer. Every request is handled
/// synchronously and sees the buffer left by the previous one.
#[derive(Debug, Clone)]
pub struct TagEditorState {
    buffer: TagBuffer,
    catalog: TagCatalog,
    config: TagEditorConfig,
    tracker: PositionTracker,
    history: EditHistory,
    /// What the surface shows when it differs from `buffer` (after direct
    /// typing). `None` once re-rendered.
    observed: Option<ObservedSurface>,
}

/// Raw surface segments plus where their positions land in the buffer
#[derive(Debug, Clone)]
struct ObservedSurface {
    segments: Vec<Segment>,
    map: SurfaceMap,
}

impl TagEditorState {
    /// Start a session on an empty buffer
    pub fn new(config: TagEditorConfig, catalog: TagCatalog) -> Self {
        let history = EditHistory::with_max_size(config.history_limit);
        Self {
            buffer: TagBuffer::new(),
            catalog,
            config,
            tracker: PositionTracker::new(),
            history,
            observed: None,
        }
    }

    /// Start a session from an external value
    pub fn from_serialized(
        value: &Serialized,
        config: TagEditorConfig,
        catalog: TagCatalog,
    ) -> Self {
        let mut state = Self::new(config, catalog);
        state.buffer = value.decode(&state.config.codec_options(), &state.catalog);
        debug!(
            target: "buffer",
            segments = state.buffer.len(),
            tokens = state.buffer.token_count(),
            "session initialized"
        );
        state
    }

    pub fn buffer(&self) -> &TagBuffer {
        &self.buffer
    }

    pub fn catalog(&self) -> &TagCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &TagEditorConfig {
        &self.config
    }

    pub fn tracker(&self) -> &PositionTracker {
        &self.tracker
    }

    /// Segments the surface currently shows
    pub fn surface(&self) -> &[Segment] {
        match &self.observed {
            Some(observed) => &observed.segments,
            None => self.buffer.segments(),
        }
    }

    /// Buffer in the configured external form
    pub fn output(&self) -> Serialized {
        Serialized::encode(&self.buffer, self.config.form)
    }

    pub fn label_for(&self, id: &str) -> Option<&str> {
        self.catalog.label(id)
    }

    /// Read the surface caret into the position tracker. The returned
    /// position is in buffer units.
    pub fn capture(&mut self, caret: Option<Caret>) -> Option<Position> {
        let Some(observed) = &self.observed else {
            return self.tracker.capture(self.buffer.segments(), caret);
        };
        let position = self
            .tracker
            .capture(&observed.segments, caret)
            .map(|on_surface| observed.map.position(on_surface));
        if let Some(position) = position {
            self.tracker.remember(position);
        }
        position
    }

    /// Where an insertion without an explicit position goes
    pub fn insertion_point(&self) -> Position {
        self.tracker.insertion_point(&self.buffer)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Handle one request
    pub fn update(&mut self, msg: TagEditMsg) -> EditOutcome {
        let msg_name = msg.name();
        let _span = span!(Level::DEBUG, "update", msg = msg_name).entered();

        let before = BufferSnapshot::from_state(self);
        let outcome = self.update_inner(msg);
        let after = BufferSnapshot::from_state(self);
        if let Some(diff) = before.diff(&after) {
            debug!(target: "buffer", %diff, "state changed");
        }

        debug_assert!(
            self.buffer.is_canonical(),
            "buffer left non-canonical by {msg_name}"
        );
        outcome
    }

    fn update_inner(&mut self, msg: TagEditMsg) -> EditOutcome {
        match msg {
            TagEditMsg::InsertToken { id, position } => {
                if !self.config.validation.accepts(&id, &self.catalog) {
                    warn!(%id, "token not insertable, ignoring");
                    return EditOutcome::Unchanged;
                }
                if self.config.form == SerialForm::Bracketed && !is_bracketable(&id) {
                    warn!(%id, "identifier cannot be written in bracketed form, ignoring");
                    return EditOutcome::Unchanged;
                }
                let position = position.unwrap_or_else(|| self.insertion_point());
                let before = self.buffer.clone();
                let after = self.buffer.insert_token(position, id);
                self.commit(before, after)
            }
            TagEditMsg::InsertText { text, position } => {
                if text.is_empty() {
                    return EditOutcome::Unchanged;
                }
                let position = position.unwrap_or_else(|| self.insertion_point());
                let before = self.buffer.clone();
                let after = self.buffer.insert_text(position, &text);
                self.commit(before, after)
            }
            TagEditMsg::Backspace(selection) => self.backspace(selection),
            TagEditMsg::RemoveToken(id) => match self.buffer.find_token(&id) {
                Some(target) => self.remove(target),
                None => {
                    warn!(%id, "remove requested for token not in buffer");
                    EditOutcome::Unchanged
                }
            },
            TagEditMsg::RemoveAt(target) => self.remove(target),
            TagEditMsg::Reconcile(observed) => self.reconcile(observed),
            TagEditMsg::Rendered => {
                if self.observed.take().is_some() {
                    debug!(target: "cursor", "surface re-rendered from buffer");
                }
                EditOutcome::Unchanged
            }
            TagEditMsg::Load(value) => {
                self.buffer = value.decode(&self.config.codec_options(), &self.catalog);
                self.history.clear();
                self.tracker.forget();
                self.observed = None;
                let position = self.buffer.end();
                self.changed(position)
            }
            TagEditMsg::Undo => match self.history.pop_undo() {
                Some(op) => self.restore(op),
                None => EditOutcome::Unchanged,
            },
            TagEditMsg::Redo => match self.history.pop_redo() {
                Some(op) => self.restore(op),
                None => EditOutcome::Unchanged,
            },
        }
    }

    fn backspace(&mut self, selection: Selection) -> EditOutcome {
        let surface = self.surface();
        if !selection.is_collapsed(surface) {
            return EditOutcome::PassThrough;
        }
        let Some(target) = resolve_backspace_target(surface, selection.head) else {
            return EditOutcome::PassThrough;
        };
        let target = match &self.observed {
            Some(observed) => observed.map.tag_ref(target),
            None => target,
        };
        self.remove(target)
    }

    fn remove(&mut self, target: TagRef) -> EditOutcome {
        let before = self.buffer.clone();
        match self.buffer.delete_token(&target) {
            Ok(position) => self.commit(before, position),
            Err(e) => {
                warn!(error = %e, "token removal ignored");
                EditOutcome::Unchanged
            }
        }
    }

    fn reconcile(&mut self, observed: Vec<Segment>) -> EditOutcome {
        let before = self.buffer.clone();
        let options = self.config.codec_options();
        let (changed, map) = self
            .buffer
            .reconcile(observed.iter().cloned(), &options, &self.catalog);
        let rendered = observed.as_slice() == self.buffer.segments();
        self.observed = (!rendered).then(|| ObservedSurface {
            segments: observed,
            map,
        });
        if !changed {
            return EditOutcome::Unchanged;
        }
        let position = self.insertion_point();
        self.history.push(EditOperation::new(
            before,
            self.buffer.clone(),
            self.tracker.last_known(),
            self.tracker.last_known(),
        ));
        self.changed(position)
    }

    /// Record a completed edit and report it
    fn commit(&mut self, before: TagBuffer, position: Position) -> EditOutcome {
        if before == self.buffer {
            return EditOutcome::Unchanged;
        }
        self.history.push(EditOperation::new(
            before,
            self.buffer.clone(),
            self.tracker.last_known(),
            Some(position),
        ));
        self.tracker.remember(position);
        self.observed = None;
        self.changed(position)
    }

    fn restore(&mut self, op: EditOperation) -> EditOutcome {
        self.buffer = op.before;
        self.observed = None;
        match op.position_before {
            Some(position) => self.tracker.remember(position),
            None => self.tracker.forget(),
        }
        let position = self.insertion_point();
        self.changed(position)
    }

    fn changed(&self, position: Position) -> EditOutcome {
        EditOutcome::Changed {
            output: self.output(),
            position,
        }
    }
}
