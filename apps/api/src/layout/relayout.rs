//! Relayout trigger: reruns the full pipeline when a document's inputs change
//! and publishes the result atomically.
//!
//! A pass is render → measure off-view → pack → render pages. Passes for one
//! document are serialized on the paginator mutex. Each pass is numbered by a
//! [`PassTicket`] handed out in request order; only a pass newer than the
//! committed one may replace the visible [`PageSet`], so a slow pass for stale
//! inputs can never overwrite fresher output.
//!
//! Partial edits are merged into the inputs of the newest ticket when the
//! ticket is issued, so overlapping edits to different knobs accumulate.

use std::sync::{Arc, Mutex, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::layout::context::{
    validate_font_size, LayoutContext, PageGeometry, DEFAULT_FONT_SIZE_PT,
};
use crate::layout::error::LayoutError;
use crate::layout::font_metrics::FontFamily;
use crate::layout::fragment::ContentBlock;
use crate::layout::packer::pack_pages;
use crate::layout::renderer::{render_pages, PageSet};
use crate::layout::sandbox::{Measure, MeasurementSandbox, Measurement, MetricSurface};
use crate::models::ResumeData;
use crate::templates::TemplateKind;

/// Pass number of the layout produced when a session opens.
pub const FIRST_PASS: u64 = 1;

/// Everything a pass depends on. Two equal inputs always produce the same pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutInputs {
    pub data: ResumeData,
    pub template: TemplateKind,
    pub font_family: FontFamily,
    pub font_size_pt: f32,
}

impl Default for LayoutInputs {
    fn default() -> Self {
        LayoutInputs {
            data: ResumeData::sample(),
            template: TemplateKind::Vanguard,
            font_family: FontFamily::Helvetica,
            font_size_pt: DEFAULT_FONT_SIZE_PT,
        }
    }
}

/// A partial edit. `None` keeps the value of the inputs it is applied to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutPatch {
    pub data: Option<ResumeData>,
    pub template: Option<TemplateKind>,
    pub font_family: Option<FontFamily>,
    pub font_size_pt: Option<f32>,
}

impl LayoutPatch {
    /// Overlays the patch on `base`. The font size is checked here so a bad
    /// edit is rejected before it can claim a ticket.
    pub fn apply(self, base: &LayoutInputs) -> Result<LayoutInputs, LayoutError> {
        let font_size_pt = self.font_size_pt.unwrap_or(base.font_size_pt);
        validate_font_size(font_size_pt)?;
        Ok(LayoutInputs {
            data: self.data.unwrap_or_else(|| base.data.clone()),
            template: self.template.unwrap_or(base.template),
            font_family: self.font_family.unwrap_or(base.font_family),
            font_size_pt,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Paginator
// ────────────────────────────────────────────────────────────────────────────

/// Runs complete layout passes over one page geometry and one sandbox.
pub struct Paginator<M: Measure = MetricSurface> {
    geometry: PageGeometry,
    sandbox: MeasurementSandbox<M>,
}

impl Paginator<MetricSurface> {
    pub fn with_metrics(geometry: PageGeometry) -> Self {
        Paginator::new(geometry, MetricSurface)
    }
}

impl<M: Measure> Paginator<M> {
    pub fn new(geometry: PageGeometry, surface: M) -> Self {
        Paginator {
            geometry,
            sandbox: MeasurementSandbox::new(surface),
        }
    }

    /// Renders `inputs` through its template and paginates the result.
    ///
    /// Style knobs are validated before anything is rendered.
    pub fn run_pass(&mut self, inputs: &LayoutInputs, pass: u64) -> Result<PageSet, LayoutError> {
        let ctx = LayoutContext::new(self.geometry, inputs.font_family, inputs.font_size_pt)?;
        let blocks = inputs.template.render(&inputs.data);
        Ok(self.paginate_blocks(blocks, &ctx, pass))
    }

    /// Measures, packs and renders blocks that are already rendered.
    pub fn paginate_blocks(
        &mut self,
        blocks: Vec<ContentBlock>,
        ctx: &LayoutContext,
        pass: u64,
    ) -> PageSet {
        let Measurement { blocks, warnings } = self.sandbox.measure(blocks, ctx);
        let pages = pack_pages(blocks, ctx.page_content_height());
        render_pages(pages, ctx, pass, warnings)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document sessions
// ────────────────────────────────────────────────────────────────────────────

/// Claim on the next pass number and the inputs that pass lays out.
/// Tickets are issued in request order.
#[derive(Debug)]
pub struct PassTicket {
    number: u64,
    inputs: LayoutInputs,
}

impl PassTicket {
    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn inputs(&self) -> &LayoutInputs {
        &self.inputs
    }
}

/// What a relayout request did to the visible pages.
#[derive(Debug, Clone)]
pub enum RelayoutOutcome {
    /// Inputs matched the committed ones; no pass ran.
    Unchanged(Arc<PageSet>),
    /// This pass's output is now visible.
    Committed(Arc<PageSet>),
    /// A newer pass committed first; this output was dropped. Carries the
    /// visible pages.
    Superseded(Arc<PageSet>),
}

impl RelayoutOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            RelayoutOutcome::Unchanged(_) => "unchanged",
            RelayoutOutcome::Committed(_) => "committed",
            RelayoutOutcome::Superseded(_) => "superseded",
        }
    }

    /// The pages visible after this request.
    pub fn pages(&self) -> &Arc<PageSet> {
        match self {
            RelayoutOutcome::Unchanged(pages)
            | RelayoutOutcome::Committed(pages)
            | RelayoutOutcome::Superseded(pages) => pages,
        }
    }
}

struct DocumentView {
    /// Newest ticket whose request is reflected in `pages`.
    committed: u64,
    inputs: LayoutInputs,
    pages: Arc<PageSet>,
    /// Number the next ticket gets.
    next_pass: u64,
    /// Inputs of the newest ticket issued. Later patches build on these.
    requested: LayoutInputs,
}

/// One open document: its paginator and the pages currently shown.
pub struct DocumentSession<M: Measure = MetricSurface> {
    id: Uuid,
    paginator: Mutex<Paginator<M>>,
    view: RwLock<DocumentView>,
}

impl<M: Measure> DocumentSession<M> {
    /// Runs the first pass synchronously; the session is only returned once it
    /// has pages to show.
    pub fn open(
        id: Uuid,
        inputs: LayoutInputs,
        mut paginator: Paginator<M>,
    ) -> Result<Self, LayoutError> {
        let pages = paginator.run_pass(&inputs, FIRST_PASS)?;
        info!(
            document = %id,
            pages = pages.page_count(),
            template = %inputs.template,
            font = %inputs.font_family,
            font_size_pt = inputs.font_size_pt,
            "document session opened"
        );
        Ok(DocumentSession {
            id,
            paginator: Mutex::new(paginator),
            view: RwLock::new(DocumentView {
                committed: FIRST_PASS,
                inputs: inputs.clone(),
                pages: Arc::new(pages),
                next_pass: FIRST_PASS + 1,
                requested: inputs,
            }),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The visible pages. Always a complete set from one pass.
    pub fn current(&self) -> Result<Arc<PageSet>, LayoutError> {
        let view = self.view.read().map_err(|_| poisoned("view"))?;
        Ok(Arc::clone(&view.pages))
    }

    /// Inputs and pages read under one lock, so they always belong together.
    pub fn snapshot(&self) -> Result<(LayoutInputs, Arc<PageSet>), LayoutError> {
        let view = self.view.read().map_err(|_| poisoned("view"))?;
        Ok((view.inputs.clone(), Arc::clone(&view.pages)))
    }

    /// Merges `patch` into the inputs of the newest ticket and issues the next
    /// ticket, both under the view lock. A rejected patch claims no ticket.
    pub fn begin_pass(&self, patch: LayoutPatch) -> Result<PassTicket, LayoutError> {
        let mut view = self.view.write().map_err(|_| poisoned("view"))?;
        let inputs = patch.apply(&view.requested)?;
        let number = view.next_pass;
        view.next_pass += 1;
        view.requested = inputs.clone();
        Ok(PassTicket { number, inputs })
    }

    /// Lays the document out again for the ticket's inputs and publishes the
    /// result if nothing newer has been published meanwhile.
    ///
    /// On error the visible pages are left as they were.
    pub fn relayout(&self, ticket: PassTicket) -> Result<RelayoutOutcome, LayoutError> {
        let PassTicket { number, inputs } = ticket;
        {
            let mut view = self.view.write().map_err(|_| poisoned("view"))?;
            if number <= view.committed {
                debug!(document = %self.id, pass = number, "pass superseded before it ran");
                return Ok(RelayoutOutcome::Superseded(Arc::clone(&view.pages)));
            }
            // Skipping is only safe when no other pass was issued in between.
            if number == view.committed + 1 && view.inputs == inputs {
                view.committed = number;
                debug!(document = %self.id, pass = number, "inputs unchanged; pass skipped");
                return Ok(RelayoutOutcome::Unchanged(Arc::clone(&view.pages)));
            }
        }

        let pages = {
            let mut paginator = self.paginator.lock().map_err(|_| poisoned("paginator"))?;
            // A newer pass may have committed while this one waited for the lock.
            {
                let view = self.view.read().map_err(|_| poisoned("view"))?;
                if number <= view.committed {
                    debug!(document = %self.id, pass = number, "pass superseded while queued");
                    return Ok(RelayoutOutcome::Superseded(Arc::clone(&view.pages)));
                }
            }
            paginator.run_pass(&inputs, number)?
        };

        let mut view = self.view.write().map_err(|_| poisoned("view"))?;
        if number <= view.committed {
            debug!(
                document = %self.id,
                pass = number,
                committed = view.committed,
                "pass finished after a newer one; output dropped"
            );
            return Ok(RelayoutOutcome::Superseded(Arc::clone(&view.pages)));
        }

        let pages = Arc::new(pages);
        info!(
            document = %self.id,
            pass = number,
            pages = pages.page_count(),
            font = %inputs.font_family,
            font_size_pt = inputs.font_size_pt,
            warnings = pages.warnings.len(),
            "layout pass committed"
        );
        view.committed = number;
        view.inputs = inputs;
        view.pages = Arc::clone(&pages);
        Ok(RelayoutOutcome::Committed(pages))
    }
}

fn poisoned(what: &'static str) -> LayoutError {
    LayoutError::SessionUnavailable(what)
}
