//! Page position within one rendered chapter

use super::{PageLayout, PageState, PageSurface, PageTarget, PaginationConfig};
use crate::error::Result;
use tracing::debug;

/// Handler invoked with the new state after every page move
pub type PageChangeHandler = Box<dyn FnMut(&PageState) + Send + Sync>;

/// Tracks the current page of a chapter and keeps the surface scrolled to it
pub struct Paginator<S> {
    surface: S,
    config: PaginationConfig,
    layout: PageLayout,
    current_page: usize,
    on_page_change: Option<PageChangeHandler>,
}

impl<S: PageSurface> Paginator<S> {
    /// Measure `surface` and start at the first page
    pub fn new(surface: S, config: PaginationConfig) -> Result<Self> {
        let layout = PageLayout::compute(&surface.measure(), &config)?;
        let mut paginator = Self {
            surface,
            config,
            layout,
            current_page: 0,
            on_page_change: None,
        };
        paginator.apply_offset();
        debug!(total_pages = layout.total_pages, page_width = layout.page_width, "paginated chapter");
        Ok(paginator)
    }

    pub fn state(&self) -> PageState {
        PageState::new(self.current_page, self.layout.total_pages)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.layout.total_pages
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Translation currently applied to the surface
    pub fn offset(&self) -> f64 {
        self.layout.offset_for(self.current_page)
    }

    pub fn set_on_page_change(&mut self, handler: Option<PageChangeHandler>) {
        self.on_page_change = handler;
    }

    pub fn next_page(&mut self) -> bool {
        if self.current_page >= self.layout.last_page() {
            return false;
        }
        self.move_to(self.current_page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        if self.current_page == 0 {
            return false;
        }
        self.move_to(self.current_page - 1)
    }

    /// Jump to `page`, clamped into range. Returns whether the page changed.
    pub fn go_to_page(&mut self, page: i64) -> bool {
        self.move_to(self.layout.clamp_page(page))
    }

    pub fn go_to_start(&mut self) -> bool {
        self.move_to(0)
    }

    pub fn go_to_end(&mut self) -> bool {
        self.move_to(self.layout.last_page())
    }

    /// Re-measure after a resize or settings change.
    ///
    /// The current page is carried over at the same relative position. On error
    /// nothing changes. Returns whether the page state changed.
    pub fn relayout(&mut self, config: PaginationConfig) -> Result<bool> {
        let measurements = self.surface.measure();
        let layout = PageLayout::compute(&measurements, &config)?;
        let before = self.state();

        let page = carry_over(self.current_page, self.layout.total_pages, layout.total_pages);
        self.config = config;
        self.layout = layout;
        self.current_page = page;
        self.apply_offset();

        let after = self.state();
        debug!(
            total_pages = after.total_pages,
            current_page = after.current_page,
            "re-paginated chapter"
        );
        if after == before {
            return Ok(false);
        }
        self.notify(&after);
        Ok(true)
    }

    /// Start over on freshly rendered content, as a new paginator would.
    ///
    /// Does not invoke the page-change handler.
    pub fn reset(&mut self, config: PaginationConfig, target: PageTarget) -> Result<PageState> {
        let layout = PageLayout::compute(&self.surface.measure(), &config)?;
        self.config = config;
        self.layout = layout;
        self.current_page = layout.resolve(target);
        self.apply_offset();
        Ok(self.state())
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn move_to(&mut self, page: usize) -> bool {
        if page == self.current_page {
            return false;
        }
        self.current_page = page;
        self.apply_offset();

        let state = self.state();
        debug!(page, total_pages = state.total_pages, "turned page");
        self.notify(&state);
        true
    }

    fn apply_offset(&mut self) {
        let offset = self.offset();
        self.surface.set_offset(offset);
    }

    fn notify(&mut self, state: &PageState) {
        if let Some(handler) = self.on_page_change.as_mut() {
            handler(state);
        }
    }
}

/// Map a page onto a new page count at the same relative position
fn carry_over(page: usize, old_total: usize, new_total: usize) -> usize {
    let last = new_total.saturating_sub(1);
    if old_total <= 1 || new_total <= 1 {
        return page.min(last);
    }
    let fraction = page as f64 / (old_total - 1) as f64;
    ((fraction * last as f64).round() as usize).min(last)
}
