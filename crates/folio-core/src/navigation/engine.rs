//! Reading position engine implementation

use super::{ChapterSurface, PageMove, PositionSubscriber, ReadingPosition};
use crate::chapters::{ChapterSequencer, ChapterSummary};
use crate::error::{ReaderError, Result};
use crate::pagination::{PageTarget, Paginator};
use crate::progress::overall_progress;
use crate::settings::{ReaderSettings, SettingsPatch};
use parking_lot::{Mutex, RwLock};
use std::collections::VecDeque;
use std::sync::{Arc, Weak};
use tracing::{debug, info, warn};

/// Handler invoked with every newly published position
pub type PositionHandler = Arc<dyn Fn(&ReadingPosition) + Send + Sync>;

/// What caused a recomputation
#[derive(Debug, Clone)]
enum Trigger {
    /// Open another chapter of the loaded book
    ChapterSwitch { index: usize, target: PageTarget },
    /// Open the chapter `delta` places away from the current one
    ChapterStep { delta: isize, target: PageTarget },
    /// Open the chapter with this id
    ChapterId(String),
    /// Move a page, spilling into the neighbouring chapter at either edge
    Turn { forward: bool },
    /// Viewport or settings changed; re-measure the current chapter
    LayoutInvalidated,
    /// Move within the current chapter
    Navigate(PageMove),
}

/// Positions waiting to be delivered, in the order they were applied
#[derive(Default)]
struct Outbox {
    queue: VecDeque<ReadingPosition>,
    notifying: bool,
}

/// Engine state stored internally
struct EngineState<S> {
    sequencer: ChapterSequencer,
    paginator: Paginator<S>,
    settings: ReaderSettings,
}

impl<S: ChapterSurface> EngineState<S> {
    fn position(&self) -> ReadingPosition {
        let page = self.paginator.state();
        let chapter_index = self.sequencer.current_index();
        let total_chapters = self.sequencer.len();

        ReadingPosition {
            chapter_index,
            chapter_id: self.sequencer.current_chapter().id.clone(),
            total_chapters,
            page,
            overall_progress: overall_progress(
                chapter_index as i64,
                page.current_page as i64,
                page.total_pages as i64,
                total_chapters as i64,
            ),
            is_first_chapter: !self.sequencer.has_prev(),
            is_last_chapter: !self.sequencer.has_next(),
        }
    }

    /// Apply one trigger. Either everything changes or nothing does.
    fn apply(&mut self, trigger: Trigger) -> Result<bool> {
        match trigger {
            Trigger::Navigate(step) => Ok(self.move_page(step)),
            Trigger::LayoutInvalidated => {
                let config = self.settings.pagination()?;
                self.paginator.relayout(config)
            }
            Trigger::ChapterSwitch { index, target } => self.switch_to(index, target),
            Trigger::ChapterStep { delta, target } => {
                match self.sequencer.current_index().checked_add_signed(delta) {
                    Some(index) if index < self.sequencer.len() => self.switch_to(index, target),
                    _ => Ok(false),
                }
            }
            Trigger::ChapterId(id) => match self.sequencer.index_of(&id) {
                Some(index) => self.switch_to(index, PageTarget::Start),
                None => {
                    warn!(%id, "unknown chapter id");
                    Ok(false)
                }
            },
            Trigger::Turn { forward: true } => {
                if self.move_page(PageMove::Next) {
                    return Ok(true);
                }
                self.apply(Trigger::ChapterStep {
                    delta: 1,
                    target: PageTarget::Start,
                })
            }
            Trigger::Turn { forward: false } => {
                if self.move_page(PageMove::Prev) {
                    return Ok(true);
                }
                self.apply(Trigger::ChapterStep {
                    delta: -1,
                    target: PageTarget::End,
                })
            }
        }
    }

    fn move_page(&mut self, step: PageMove) -> bool {
        match step {
            PageMove::Next => self.paginator.next_page(),
            PageMove::Prev => self.paginator.prev_page(),
            PageMove::To(page) => self.paginator.go_to_page(page),
            PageMove::Start => self.paginator.go_to_start(),
            PageMove::End => self.paginator.go_to_end(),
        }
    }

    fn switch_to(&mut self, index: usize, target: PageTarget) -> Result<bool> {
        let Some(chapter) = self.sequencer.chapter(index).cloned() else {
            warn!(index, "chapter index out of range");
            return Ok(false);
        };
        self.open_chapter(&chapter, target)?;
        self.sequencer.go_to(index);
        debug!(chapter = index, id = %chapter.id, "opened chapter");
        Ok(true)
    }

    /// Render `chapter` and start paginating it at `target`.
    ///
    /// On failure the previously shown chapter is put back on the surface.
    fn open_chapter(&mut self, chapter: &ChapterSummary, target: PageTarget) -> Result<()> {
        let config = self.settings.pagination()?;

        let opened = self
            .paginator
            .surface_mut()
            .render(chapter, &self.settings)
            .map_err(ReaderError::Surface)
            .and_then(|_| self.paginator.reset(config, target));

        if let Err(err) = opened {
            warn!(id = %chapter.id, error = %err, "failed to open chapter");
            self.restore_current();
            return Err(err);
        }
        Ok(())
    }

    fn restore_current(&mut self) {
        let current = self.sequencer.current_chapter().clone();
        let page = self.paginator.current_page() as i64;
        let config = *self.paginator.config();

        if let Err(err) = self.paginator.surface_mut().render(&current, &self.settings) {
            warn!(id = %current.id, error = %err, "could not restore previous chapter");
            return;
        }
        if let Err(err) = self.paginator.reset(config, PageTarget::Page(page)) {
            warn!(id = %current.id, error = %err, "could not re-paginate previous chapter");
        }
    }
}

/// Coordinates chapter sequencing, pagination and progress for one reader
pub struct ReadingEngine<S> {
    state: RwLock<EngineState<S>>,
    subscribers: RwLock<Vec<Weak<dyn PositionSubscriber>>>,
    on_change: RwLock<Option<PositionHandler>>,
    outbox: Mutex<Outbox>,
}

impl<S: ChapterSurface> ReadingEngine<S> {
    /// Create an engine for `chapters`, rendering the first one into `surface`
    pub fn new(chapters: Vec<ChapterSummary>, mut surface: S, settings: ReaderSettings) -> Result<Self> {
        let settings = settings.normalized();
        let config = settings.pagination()?;
        let sequencer = ChapterSequencer::new(chapters)?;

        surface
            .render(sequencer.current_chapter(), &settings)
            .map_err(ReaderError::Surface)?;
        let paginator = Paginator::new(surface, config)?;

        info!(
            chapters = sequencer.len(),
            first = %sequencer.current_chapter().id,
            "loaded book"
        );

        Ok(Self {
            state: RwLock::new(EngineState {
                sequencer,
                paginator,
                settings,
            }),
            subscribers: RwLock::new(Vec::new()),
            on_change: RwLock::new(None),
            outbox: Mutex::new(Outbox::default()),
        })
    }

    /// Current reading position
    pub fn state(&self) -> ReadingPosition {
        self.state.read().position()
    }

    pub fn settings(&self) -> ReaderSettings {
        self.state.read().settings.clone()
    }

    /// Chapters in canonical order
    pub fn chapters(&self) -> Vec<ChapterSummary> {
        self.state.read().sequencer.chapters().to_vec()
    }

    pub fn current_chapter(&self) -> ChapterSummary {
        self.state.read().sequencer.current_chapter().clone()
    }

    /// Translation currently applied to the surface
    pub fn surface_offset(&self) -> f64 {
        self.state.read().paginator.offset()
    }

    /// Run `f` against the surface
    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(self.state.read().paginator.surface())
    }

    pub fn next_page(&self) -> bool {
        self.navigate(PageMove::Next)
    }

    pub fn prev_page(&self) -> bool {
        self.navigate(PageMove::Prev)
    }

    /// Jump to a page of the current chapter, clamped into range
    pub fn go_to_page(&self, page: i64) -> bool {
        self.navigate(PageMove::To(page))
    }

    pub fn go_to_start(&self) -> bool {
        self.navigate(PageMove::Start)
    }

    pub fn go_to_end(&self) -> bool {
        self.navigate(PageMove::End)
    }

    /// Open the next chapter at its first page
    pub fn go_to_next_chapter(&self) -> Result<bool> {
        self.run(Trigger::ChapterStep {
            delta: 1,
            target: PageTarget::Start,
        })
    }

    /// Open the previous chapter at its first page
    pub fn go_to_prev_chapter(&self) -> Result<bool> {
        self.run(Trigger::ChapterStep {
            delta: -1,
            target: PageTarget::Start,
        })
    }

    /// Open the chapter at `index`; out-of-range indices are rejected
    pub fn go_to_chapter(&self, index: usize) -> Result<bool> {
        self.go_to_chapter_at(index, PageTarget::Start)
    }

    /// Open the chapter with `id`; unknown ids are rejected
    pub fn go_to_chapter_id(&self, id: &str) -> Result<bool> {
        self.run(Trigger::ChapterId(id.to_string()))
    }

    /// Open the chapter at `index` and land on `target`
    pub fn go_to_chapter_at(&self, index: usize, target: PageTarget) -> Result<bool> {
        self.run(Trigger::ChapterSwitch { index, target })
    }

    /// Turn forward, continuing into the next chapter from the last page
    pub fn turn_forward(&self) -> Result<bool> {
        self.run(Trigger::Turn { forward: true })
    }

    /// Turn back, continuing into the end of the previous chapter from the first page
    pub fn turn_backward(&self) -> Result<bool> {
        self.run(Trigger::Turn { forward: false })
    }

    /// Re-measure after the host's visible area changed
    pub fn relayout(&self) -> Result<bool> {
        self.run(Trigger::LayoutInvalidated)
    }

    /// Apply a settings change, re-paginating only when page geometry is affected
    pub fn update_settings(&self, patch: &SettingsPatch) -> Result<bool> {
        let changed;
        {
            let mut guard = self.state.write();
            let state = &mut *guard;
            let before = state.position();

            let next = state.settings.patched(patch);
            next.pagination()?;
            if next == state.settings {
                return Ok(false);
            }
            let relayout = state.settings.affects_layout(&next);
            let previous = std::mem::replace(&mut state.settings, next);

            let mut applied = state
                .paginator
                .surface_mut()
                .restyle(&state.settings)
                .map_err(ReaderError::Surface);
            if applied.is_ok() && relayout {
                applied = state.apply(Trigger::LayoutInvalidated).map(|_| ());
            }

            if let Err(err) = applied {
                warn!(error = %err, "settings change rejected");
                state.settings = previous;
                if let Err(err) = state.paginator.surface_mut().restyle(&state.settings) {
                    warn!(error = %err, "could not restore previous styling");
                }
                return Err(err);
            }
            debug!(relayout, "settings updated");
            changed = Self::changed_from(before, state);
        }
        Ok(self.publish(changed))
    }

    /// Replace the book, opening its first chapter
    pub fn load_book(&self, chapters: Vec<ChapterSummary>) -> Result<()> {
        let sequencer = ChapterSequencer::new(chapters)?;
        let changed;
        {
            let mut state = self.state.write();
            let before = state.position();

            let first = sequencer.current_chapter().clone();
            state.open_chapter(&first, PageTarget::Start)?;
            state.sequencer = sequencer;
            info!(chapters = state.sequencer.len(), first = %first.id, "loaded book");
            changed = Self::changed_from(before, &state);
        }
        self.publish(changed);
        Ok(())
    }

    /// Set the single change handler, replacing any previous one
    pub fn set_on_change(&self, handler: Option<PositionHandler>) {
        *self.on_change.write() = handler;
    }

    /// Add a subscriber
    pub fn add_subscriber(&self, subscriber: Arc<dyn PositionSubscriber>) {
        let mut subscribers = self.subscribers.write();
        subscribers.push(Arc::downgrade(&subscriber));
    }

    fn navigate(&self, step: PageMove) -> bool {
        // page moves cannot fail
        self.run(Trigger::Navigate(step)).unwrap_or(false)
    }

    fn run(&self, trigger: Trigger) -> Result<bool> {
        let changed;
        {
            let mut state = self.state.write();
            let before = state.position();
            if !state.apply(trigger)? {
                return Ok(false);
            }
            changed = Self::changed_from(before, &state);
        }
        self.publish(changed);
        Ok(true)
    }

    /// The position after a change, or `None` when it matches `before`
    fn changed_from(before: ReadingPosition, state: &EngineState<S>) -> Option<ReadingPosition> {
        let after = state.position();
        (after != before).then_some(after)
    }

    /// Queue `position` for delivery and drain the queue unless a delivery is
    /// already in progress further up the stack.
    fn publish(&self, position: Option<ReadingPosition>) -> bool {
        let Some(position) = position else {
            return false;
        };
        {
            let mut outbox = self.outbox.lock();
            outbox.queue.push_back(position);
            if outbox.notifying {
                return true;
            }
            outbox.notifying = true;
        }

        loop {
            let next = {
                let mut outbox = self.outbox.lock();
                match outbox.queue.pop_front() {
                    Some(next) => next,
                    None => {
                        outbox.notifying = false;
                        break;
                    }
                }
            };
            self.notify(&next);
        }
        true
    }

    fn notify(&self, position: &ReadingPosition) {
        let handler = self.on_change.read().clone();
        if let Some(handler) = handler {
            handler(position);
        }

        let live: Vec<Arc<dyn PositionSubscriber>> = {
            let mut subscribers = self.subscribers.write();

            // Remove any dead weak references
            subscribers.retain(|weak| weak.strong_count() > 0);
            subscribers.iter().filter_map(Weak::upgrade).collect()
        };

        for subscriber in live {
            subscriber.on_position_change(position);
        }
    }
}
