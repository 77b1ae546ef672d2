//! Batch coordination: fan an edit out over the selection, then report.
//!
//! A batch reads the document's styles once, reconciles every selected style
//! against that reading, and commits each style's update on its own. One
//! style failing never stops the others. Results come back in selection order
//! regardless of which reconciliation finishes first.
//!
//! Every batch ends the same way: one summary notice, then a fresh snapshot
//! posted to the UI, whatever the outcome.

use futures::stream::{self, StreamExt};

use crate::config::Config;
use crate::error::{HostError, ReconcileError};
use crate::host::{DocumentHost, UiBridge};
use crate::message::{OutboundMessage, RemoveCommand, UpdateCommand};
use crate::model::{PaintStyleRecord, StyleId, StyleKind, StyleRef, TextStyleRecord};
use crate::notice::{Notice, NoticeContext, NoticeRenderer, NoticeTemplate};
use crate::reconcile::{prepare_color, prepare_text, BindingSkip, ColorEdit, TextEdit};
use crate::snapshot::snapshot;

/// What a batch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    Update(StyleKind),
    Remove,
}

/// The result for one selected style.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The update was committed. Bindings listed in `skipped` were not applied.
    Updated { skipped: Vec<BindingSkip> },
    Removed,
    /// The style does not exist in the document.
    NotFound,
    Failed(ReconcileError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    pub style: StyleRef,
    pub outcome: Outcome,
}

/// Per-style outcomes of one batch, in selection order.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResult {
    pub kind: BatchKind,
    pub entries: Vec<BatchEntry>,
}

impl BatchResult {
    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.outcome)).count()
    }

    pub fn updated(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Updated { .. }))
    }

    pub fn removed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Removed))
    }

    pub fn not_found(&self) -> usize {
        self.count(|o| matches!(o, Outcome::NotFound))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed(_)))
    }

    /// Total binding skips across all updated entries.
    pub fn skipped(&self) -> usize {
        self.entries
            .iter()
            .map(|e| match &e.outcome {
                Outcome::Updated { skipped } => skipped.len(),
                _ => 0,
            })
            .sum()
    }

    /// True when the batch was non-empty and nothing succeeded or went missing.
    pub fn all_failed(&self) -> bool {
        !self.entries.is_empty() && self.failed() == self.entries.len()
    }

    fn failed_all(kind: BatchKind, selection: &[StyleRef], err: HostError) -> Self {
        Self {
            kind,
            entries: selection
                .iter()
                .map(|style| BatchEntry {
                    style: style.clone(),
                    outcome: Outcome::Failed(ReconcileError::Host(err.clone())),
                })
                .collect(),
        }
    }

    /// The summary notice for this batch.
    pub fn notice(&self, renderer: &NoticeRenderer) -> Notice {
        let (count, kind, template) = match self.kind {
            BatchKind::Update(kind) => (self.updated(), kind.noun(), NoticeTemplate::Updated),
            BatchKind::Remove => (self.removed(), "", NoticeTemplate::Removed),
        };
        let context = NoticeContext {
            count,
            kind: kind.to_string(),
            not_found: self.not_found(),
            failed: self.failed(),
            skipped: self.skipped(),
        };

        if self.all_failed() {
            return Notice::error(renderer.render(NoticeTemplate::Failed, &context));
        }
        let text = renderer.render(template, &context);
        if context.not_found + context.failed + context.skipped == 0 {
            Notice::success(text)
        } else {
            Notice::warning(text)
        }
    }
}

/// Drives one batch against a host and reports to a UI.
pub struct Coordinator<'a, H: ?Sized, U: ?Sized> {
    host: &'a H,
    ui: &'a U,
    config: &'a Config,
    notices: &'a NoticeRenderer,
}

impl<'a, H, U> Coordinator<'a, H, U>
where
    H: DocumentHost + ?Sized,
    U: UiBridge + ?Sized,
{
    pub fn new(host: &'a H, ui: &'a U, config: &'a Config, notices: &'a NoticeRenderer) -> Self {
        Self {
            host,
            ui,
            config,
            notices,
        }
    }

    /// Applies an update, notifies, and posts a snapshot.
    pub async fn apply(&self, command: &UpdateCommand) -> BatchResult {
        let result = self.reconcile(command).await;
        self.report(&result).await;
        result
    }

    /// Removes the selected styles, notifies, and posts a snapshot.
    pub async fn remove(&self, command: &RemoveCommand) -> BatchResult {
        let result = self.remove_styles(command);
        self.report(&result).await;
        result
    }

    /// Posts a fresh snapshot.
    pub async fn refresh(&self) {
        let payload = snapshot(self.host).await;
        log::debug!(
            "posting {} text and {} color styles",
            payload.text_styles.len(),
            payload.color_styles.len()
        );
        self.ui.post(OutboundMessage::PostStyles(payload));
    }

    async fn report(&self, result: &BatchResult) {
        self.ui.notify(&result.notice(self.notices));
        self.refresh().await;
    }

    /// Reconciles and commits every selected style without reporting.
    pub async fn reconcile(&self, command: &UpdateCommand) -> BatchResult {
        let kind = BatchKind::Update(command.variant);
        let selection = &command.selected_styles;
        let total = selection.len();
        let limit = self.config.max_concurrent_reconciles.max(1);

        let entries = match command.variant {
            StyleKind::Text => {
                let styles = match self.host.local_text_styles() {
                    Ok(styles) => styles,
                    Err(err) => {
                        log::error!("listing text styles failed: {}", err);
                        return BatchResult::failed_all(kind, selection, err);
                    }
                };
                let styles = &styles;
                let edit = &command.text_edit();
                stream::iter(selection.iter().enumerate())
                    .map(|(index, style)| async move {
                        let outcome = self.update_text(styles, edit, style, index, total).await;
                        entry(style, outcome)
                    })
                    .buffered(limit)
                    .collect::<Vec<_>>()
                    .await
            }
            StyleKind::Color => {
                let styles = match self.host.local_paint_styles() {
                    Ok(styles) => styles,
                    Err(err) => {
                        log::error!("listing paint styles failed: {}", err);
                        return BatchResult::failed_all(kind, selection, err);
                    }
                };
                let styles = &styles;
                let edit = &command.color_edit();
                stream::iter(selection.iter().enumerate())
                    .map(|(index, style)| async move {
                        let outcome = self.update_color(styles, edit, style, index, total).await;
                        entry(style, outcome)
                    })
                    .buffered(limit)
                    .collect::<Vec<_>>()
                    .await
            }
        };

        BatchResult { kind, entries }
    }

    async fn update_text(
        &self,
        styles: &[TextStyleRecord],
        edit: &TextEdit,
        style: &StyleRef,
        index: usize,
        total: usize,
    ) -> Outcome {
        let Some(record) = styles.iter().find(|s| s.id == style.id) else {
            log::warn!("text style {} not found", style.id);
            return Outcome::NotFound;
        };
        match prepare_text(self.host, record, edit, index, total).await {
            Ok(prepared) => commit(
                &style.id,
                self.host.update_text_style(&record.id, prepared.update),
                prepared.skipped,
            ),
            Err(err) => failed(&style.id, err),
        }
    }

    async fn update_color(
        &self,
        styles: &[PaintStyleRecord],
        edit: &ColorEdit,
        style: &StyleRef,
        index: usize,
        total: usize,
    ) -> Outcome {
        let Some(record) = styles.iter().find(|s| s.id == style.id) else {
            log::warn!("paint style {} not found", style.id);
            return Outcome::NotFound;
        };
        match prepare_color(self.host, record, edit, index, total).await {
            Ok(prepared) => commit(
                &style.id,
                self.host.update_paint_style(&record.id, prepared.update),
                prepared.skipped,
            ),
            Err(err) => failed(&style.id, err),
        }
    }

    fn remove_styles(&self, command: &RemoveCommand) -> BatchResult {
        let entries = command
            .selected_styles
            .iter()
            .map(|style| {
                let outcome = match self.host.remove_style(&style.id) {
                    Ok(true) => {
                        log::debug!("removed style {}", style.id);
                        Outcome::Removed
                    }
                    Ok(false) => Outcome::NotFound,
                    Err(err) => failed(&style.id, err.into()),
                };
                entry(style, outcome)
            })
            .collect();
        BatchResult {
            kind: BatchKind::Remove,
            entries,
        }
    }
}

fn entry(style: &StyleRef, outcome: Outcome) -> BatchEntry {
    BatchEntry {
        style: style.clone(),
        outcome,
    }
}

fn commit(
    id: &StyleId,
    result: Result<(), HostError>,
    skipped: Vec<BindingSkip>,
) -> Outcome {
    match result {
        Ok(()) => Outcome::Updated { skipped },
        Err(HostError::StyleNotFound(_)) => {
            log::warn!("style {} disappeared before commit", id);
            Outcome::NotFound
        }
        Err(err) => failed(id, err.into()),
    }
}

fn failed(id: &StyleId, err: ReconcileError) -> Outcome {
    log::error!("style {}: {}", id, err);
    Outcome::Failed(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NoticeTemplates;
    use crate::notice::NoticeLevel;
    use crate::reconcile::SkipReason;

    fn result(kind: BatchKind, outcomes: Vec<Outcome>) -> BatchResult {
        BatchResult {
            kind,
            entries: outcomes
                .into_iter()
                .enumerate()
                .map(|(i, outcome)| BatchEntry {
                    style: StyleRef::new(format!("S:{}", i)),
                    outcome,
                })
                .collect(),
        }
    }

    fn renderer() -> NoticeRenderer {
        NoticeRenderer::new(&NoticeTemplates::default()).unwrap()
    }

    fn skip() -> BindingSkip {
        BindingSkip {
            field: "fontSize".into(),
            variable: "V:1".into(),
            reason: SkipReason::MissingVariable,
        }
    }

    #[test]
    fn test_counts() {
        let batch = result(
            BatchKind::Update(StyleKind::Text),
            vec![
                Outcome::Updated { skipped: vec![skip(), skip()] },
                Outcome::Updated { skipped: vec![] },
                Outcome::NotFound,
                Outcome::Failed(ReconcileError::NoSolidPaint),
            ],
        );
        assert_eq!(batch.updated(), 2);
        assert_eq!(batch.not_found(), 1);
        assert_eq!(batch.failed(), 1);
        assert_eq!(batch.skipped(), 2);
        assert!(!batch.all_failed());
    }

    #[test]
    fn test_success_notice() {
        let batch = result(
            BatchKind::Update(StyleKind::Color),
            vec![
                Outcome::Updated { skipped: vec![] },
                Outcome::Updated { skipped: vec![] },
            ],
        );
        let notice = batch.notice(&renderer());
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(notice.text, "Successfully updated 2 color styles");
    }

    #[test]
    fn test_partial_notice_is_warning() {
        let batch = result(
            BatchKind::Update(StyleKind::Text),
            vec![Outcome::Updated { skipped: vec![] }, Outcome::NotFound],
        );
        let notice = batch.notice(&renderer());
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.text, "Successfully updated 1 text styles, 1 not found");
    }

    #[test]
    fn test_all_failed_notice() {
        let batch = result(
            BatchKind::Update(StyleKind::Text),
            vec![Outcome::Failed(ReconcileError::MappingMiss {
                weight: "Thin".into(),
            })],
        );
        let notice = batch.notice(&renderer());
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.text, "Encountered an error, full output in console");
    }

    #[test]
    fn test_remove_notice() {
        let batch = result(BatchKind::Remove, vec![Outcome::Removed, Outcome::Removed]);
        let notice = batch.notice(&renderer());
        assert_eq!(notice.text, "Successfully removed 2 styles");
    }

    #[test]
    fn test_empty_batch_is_not_a_failure() {
        let batch = result(BatchKind::Update(StyleKind::Text), vec![]);
        assert!(!batch.all_failed());
        assert_eq!(batch.notice(&renderer()).level, NoticeLevel::Success);
    }

    #[test]
    fn test_commit_maps_missing_style() {
        let id = StyleId::from("S:1");
        assert_eq!(
            commit(&id, Err(HostError::StyleNotFound(id.clone())), vec![]),
            Outcome::NotFound
        );
        assert!(matches!(
            commit(&id, Err(HostError::call("setFontName", "locked")), vec![]),
            Outcome::Failed(ReconcileError::Host(_))
        ));
        assert_eq!(
            commit(&id, Ok(()), vec![skip()]),
            Outcome::Updated { skipped: vec![skip()] }
        );
    }
}
