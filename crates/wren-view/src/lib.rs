//! HTML view façade for the wren layout engine.
//!
//! # Scope
//!
//! [`HtmlView`] owns the current document and its box tree and exposes the
//! entry points a hosting widget needs:
//!
//! - **Content replacement** — [`HtmlView::set_text`] (in-memory markup)
//!   and [`HtmlView::set_url`] (blocking fetch with redirect handling and
//!   charset sniffing). Failure leaves existing content untouched; success
//!   swaps document and box tree as one unit.
//! - **Measurement** — [`HtmlView::calc_ideal_size`] lays the tree out at
//!   the configured ideal width and reports the resulting size.
//! - **Arrangement** — [`HtmlView::set_rect`] re-runs layout at the
//!   assigned width.
//! - **Drawing** — [`HtmlView::draw`] emits a display list with alpha
//!   blending enabled for the whole subtree.
//!
//! # Threading
//!
//! Everything here is single-threaded and synchronous; `set_url` blocks
//! the calling thread until the fetch completes. Callers needing a
//! responsive UI should invoke it off the UI thread and marshal the
//! result back.

mod font;

pub use font::SystemFontMetrics;

use thiserror::Error;

use wren_common::net::{self, FetchError};
use wren_common::url::resolve_location;
use wren_common::warning::clear_warnings;
use wren_dom::Document;
use wren_html::{ParseError, TextEncoding, parse_bytes, parse_document};
use wren_layout::{
    ApproximateFontMetrics, BlendMode, ColorValue, DisplayCommand, DisplayList, FontMetrics,
    LayoutBox, LayoutContext, Rect, build_box_tree,
};

/// Height of the placeholder rect reported before any content has loaded.
const DEFAULT_HEIGHT: f32 = 400.0;

/// Maximum number of `Location` redirects [`HtmlView::set_url`] follows.
///
/// The header-chasing loop would otherwise recurse without bound on a
/// misconfigured server that redirects to itself.
const MAX_REDIRECTS: u32 = 10;

/// Errors surfaced by content replacement.
#[derive(Debug, Error)]
pub enum ViewError {
    /// The byte stream could not be parsed as a document.
    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),
    /// The document could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// A redirect chain exceeded [`MAX_REDIRECTS`].
    #[error("redirect limit of {limit} exceeded")]
    TooManyRedirects {
        /// The configured redirect cap.
        limit: u32,
    },
}

/// An HTML view: owns a document and its box tree, and lays the tree out
/// on demand.
///
/// The view exclusively owns both halves; layout items refer back into
/// the document arena by node handle, never by reference, so the pair can
/// be replaced wholesale without aliasing concerns.
pub struct HtmlView {
    document: Option<Document>,
    root_box: Option<LayoutBox>,
    ideal_width: f32,
    rect: Rect,
    text_size: f32,
    text_color: ColorValue,
    vspace: f32,
    hspace: f32,
    metrics: Box<dyn FontMetrics>,
}

impl HtmlView {
    /// Create an empty view that measures itself at `ideal_width` until a
    /// rect is assigned.
    ///
    /// Uses real system-font metrics when a font can be found, fixed-ratio
    /// approximations otherwise.
    #[must_use]
    pub fn new(ideal_width: f32) -> Self {
        let metrics: Box<dyn FontMetrics> = match SystemFontMetrics::load() {
            Some(system) => Box::new(system),
            None => Box::new(ApproximateFontMetrics),
        };
        Self::with_metrics(ideal_width, metrics)
    }

    /// Create a view with explicit font metrics (used by tests for
    /// deterministic measurement).
    #[must_use]
    pub fn with_metrics(ideal_width: f32, metrics: Box<dyn FontMetrics>) -> Self {
        Self {
            document: None,
            root_box: None,
            ideal_width,
            rect: Rect::default(),
            text_size: 14.0,
            text_color: ColorValue::BLACK,
            vspace: 2.0,
            hspace: 0.0,
            metrics,
        }
    }

    // =========================================================================
    // Content replacement
    // =========================================================================

    /// Parse `html` as a standalone in-memory document and make it the
    /// view's content.
    ///
    /// On success the previous document and box tree are discarded and
    /// rebuilt; on failure the existing content is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Parse`] when the markup cannot be parsed.
    pub fn set_text(&mut self, html: &str) -> Result<(), ViewError> {
        let document = parse_document(html)?;
        self.install(document);
        Ok(())
    }

    /// Fetch `url` and make the resulting document the view's content.
    ///
    /// Follows `Location` redirects (up to [`MAX_REDIRECTS`]), resolving
    /// relative targets against the URL that produced them. The text
    /// encoding comes from a `charset=` token in the `Content-Type`
    /// header when present; unknown charsets fall back to lossy UTF-8.
    ///
    /// Blocks the calling thread until the final response arrives. On any
    /// failure the existing content is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Fetch`] when no response arrives,
    /// [`ViewError::TooManyRedirects`] on an unbounded redirect chain,
    /// and [`ViewError::Parse`] when the final body cannot be parsed.
    pub fn set_url(&mut self, url: &str) -> Result<(), ViewError> {
        let (response, final_url) = fetch_following_redirects(url, net::fetch)?;

        let encoding = response
            .header("content-type")
            .map_or(TextEncoding::Unknown, charset_from_content_type);

        let mut document = parse_bytes(&response.body, encoding)?;
        document.set_source_url(final_url);
        self.install(document);
        Ok(())
    }

    /// Swap in a freshly parsed document: discards the previous document
    /// and box tree entirely, builds the new tree, and runs an initial
    /// layout pass at the ideal width.
    fn install(&mut self, document: Document) {
        clear_warnings();
        let mut root = build_box_tree(&document);
        let ctx = self.context(self.ideal_width);
        root.layout(&ctx, self.metrics.as_ref());
        self.document = Some(document);
        self.root_box = Some(root);
    }

    /// The URL of the current document, if it was loaded from one.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.document.as_ref().and_then(Document::source_url)
    }

    /// The current document, if any content is loaded.
    #[must_use]
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// The root layout box, if any content is loaded.
    #[must_use]
    pub fn root_box(&self) -> Option<&LayoutBox> {
        self.root_box.as_ref()
    }

    // =========================================================================
    // Measurement and arrangement
    // =========================================================================

    /// Run a full measurement pass and return the ideal size.
    ///
    /// Measures at the configured ideal width, or at the currently
    /// assigned width if a rect has been assigned. With no content ever
    /// loaded, reports a placeholder of the ideal width and a default
    /// height.
    ///
    /// Idempotent: repeated calls without intervening content or width
    /// changes return identical results.
    pub fn calc_ideal_size(&mut self) -> Rect {
        let width = if self.rect.width > 0.0 {
            self.rect.width
        } else {
            self.ideal_width
        };
        let ctx = self.context(width);
        let Some(root) = self.root_box.as_mut() else {
            return Rect::sized(width, DEFAULT_HEIGHT);
        };
        root.layout(&ctx, self.metrics.as_ref());
        let ideal = root.ideal_rect();
        Rect::sized(ideal.width, ideal.height)
    }

    /// Assign the view's rect: re-runs layout at the new width and
    /// assigns final rects to the tree.
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
        let ctx = self.context(rect.width);
        if let Some(root) = self.root_box.as_mut() {
            root.layout(&ctx, self.metrics.as_ref());
            let ideal = root.ideal_rect();
            root.set_rect(Rect::new(rect.x, rect.y, ideal.width, ideal.height));
        }
    }

    /// Emit the display list for the current content, with alpha blending
    /// enabled for the whole subtree. No layout state is mutated.
    #[must_use]
    pub fn draw(&self) -> DisplayList {
        let mut list = DisplayList::new();
        list.push(DisplayCommand::SetBlendMode {
            mode: BlendMode::Alpha,
        });
        if let Some(root) = &self.root_box {
            root.call_draw(&mut list, 0.0, 0.0);
        }
        list
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// The width used for measurement when no rect is assigned.
    #[must_use]
    pub fn ideal_width(&self) -> f32 {
        self.ideal_width
    }

    /// Set the measurement width used when no rect is assigned.
    pub fn set_ideal_width(&mut self, ideal_width: f32) {
        self.ideal_width = ideal_width;
    }

    /// The base text size in pixels.
    #[must_use]
    pub fn text_size(&self) -> f32 {
        self.text_size
    }

    /// Set the base text size in pixels.
    pub fn set_text_size(&mut self, text_size: f32) {
        self.text_size = text_size;
    }

    /// The base text color.
    #[must_use]
    pub fn text_color(&self) -> ColorValue {
        self.text_color
    }

    /// Set the base text color.
    pub fn set_text_color(&mut self, color: ColorValue) {
        self.text_color = color;
    }

    /// Extra vertical space between lines, in pixels.
    #[must_use]
    pub fn vspace(&self) -> f32 {
        self.vspace
    }

    /// Set the extra vertical space between lines.
    pub fn set_vspace(&mut self, vspace: f32) {
        self.vspace = vspace;
    }

    /// Extra horizontal space between inline fragments, in pixels.
    #[must_use]
    pub fn hspace(&self) -> f32 {
        self.hspace
    }

    /// Set the extra horizontal space between inline fragments.
    pub fn set_hspace(&mut self, hspace: f32) {
        self.hspace = hspace;
    }

    /// Build the layout context for a pass at the given maximum width.
    fn context(&self, max_width: f32) -> LayoutContext {
        LayoutContext {
            text_size: self.text_size,
            text_fg_color: self.text_color,
            max_width,
            vspace: self.vspace,
            hspace: self.hspace,
            ..LayoutContext::default()
        }
    }
}

/// Chase `Location` headers until a response without one arrives.
///
/// Relative redirect targets are resolved against the URL of the request
/// that produced them; the chain is bounded by [`MAX_REDIRECTS`]. Returns
/// the final response together with the URL it came from.
///
/// The fetch implementation is a parameter so the redirect policy can be
/// exercised without a network.
///
/// # Errors
///
/// Propagates fetch failures and reports [`ViewError::TooManyRedirects`]
/// when the chain does not terminate within the cap.
pub fn fetch_following_redirects<F>(
    url: &str,
    mut fetch: F,
) -> Result<(net::Response, String), ViewError>
where
    F: FnMut(&str) -> Result<net::Response, FetchError>,
{
    let mut url = url.to_string();
    let mut response = fetch(&url)?;

    let mut redirects = 0;
    while let Some(location) = response.header("location") {
        redirects += 1;
        if redirects > MAX_REDIRECTS {
            return Err(ViewError::TooManyRedirects {
                limit: MAX_REDIRECTS,
            });
        }
        url = resolve_location(&url, location);
        response = fetch(&url)?;
    }

    Ok((response, url))
}

/// Extract the text encoding from a `Content-Type` header value.
///
/// Looks for a `charset=` token (case-insensitive), e.g.
/// `text/html; charset=ISO-8859-1`. Absent or unparseable charsets yield
/// [`TextEncoding::Unknown`], which decodes as lossy UTF-8.
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> TextEncoding {
    let lower = content_type.to_ascii_lowercase();
    let Some(pos) = lower.find("charset=") else {
        return TextEncoding::Unknown;
    };
    let label = &content_type[pos + "charset=".len()..];
    let label = label.split(';').next().unwrap_or(label);
    TextEncoding::from_label(label)
}
