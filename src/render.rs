//! Portfolio page rendering.
//!
//! Rendering happens in two steps. The **plan** functions turn store,
//! carousel and layout state into plain card lists with every URL, size and
//! CSS class decided. [`render_portfolio`] then walks a [`PortfolioPlan`]
//! and emits HTML with no further decisions of its own.
//!
//! ## Page structure
//!
//! ```text
//! header.site-header
//! section#heroWheel      carousel frame (1 or 5 cards)
//! div#featuredGrid       featured strip
//! div#photoGrid          justified rows
//! button#loadMoreBtn     "Load more" / "No more photos"
//! div#lightbox           open photo and "i / n" counter
//! ```
//!
//! Uses [maud](https://maud.lambda.xyz/) so every URL and alt text is
//! escaped by construction.
//!
//! ## Re-layout on resize
//!
//! [`ResizeWatcher`] coalesces container resizes through a
//! [`Debouncer`]: only a size that has been stable for the configured delay
//! produces new [`LayoutParams`].

use crate::carousel::Carousel;
use crate::config::{LayoutConfig, Presentation};
use crate::debounce::Debouncer;
use crate::gallery::{FrameShape, GalleryStore};
use crate::layout::{self, LayoutParams, Row, RowLayoutItem};
use crate::ratio::{AspectRatioResolver, DimensionProbe};
use crate::types::PhotoItem;
use maud::{DOCTYPE, Markup, html};
use std::time::Instant;

const CSS: &str = include_str!("../static/folio.css");

/// One photo in a justified grid row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCard {
    /// Manifest index; the lightbox opens here on click.
    pub original_index: usize,
    pub url: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRow {
    pub cards: Vec<GridCard>,
    /// The trailing row renders at natural size, centered.
    pub centered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturedCard {
    pub url: String,
    pub alt: String,
    pub lightbox_index: usize,
    pub shape: FrameShape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselCard {
    /// Index into the carousel items.
    pub index: usize,
    pub url: String,
    pub alt: String,
    pub class: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxView {
    pub url: String,
    pub alt: String,
    pub counter: String,
}

/// Everything the page template needs.
#[derive(Debug, Clone)]
pub struct PortfolioPlan {
    pub title: String,
    pub service_area: Option<String>,
    pub presentation: Presentation,
    pub carousel: Vec<CarouselCard>,
    pub featured: Vec<FeaturedCard>,
    pub grid: Vec<RenderRow>,
    pub gap: u32,
    pub load_more_label: &'static str,
    pub has_more: bool,
    pub lightbox: Option<LightboxView>,
}

// ============================================================================
// Planning
// ============================================================================

/// Lay out the visible grid page.
///
/// Resolves every visible item's ratio first (probing in parallel), then
/// packs rows.
pub fn layout_grid<P: DimensionProbe>(
    store: &GalleryStore,
    resolver: &AspectRatioResolver<P>,
    params: &LayoutParams,
) -> Vec<Row> {
    let visible = store.grid_items();
    resolver.resolve_all(visible.iter().map(|&(_, photo)| photo));

    let items: Vec<RowLayoutItem<'_>> = visible
        .iter()
        .map(|&(original_index, item)| RowLayoutItem {
            item,
            original_index,
            aspect_ratio: resolver.ratio_for(item),
        })
        .collect();
    layout::layout(&items, params)
}

/// Attach URLs and alt text to laid-out rows.
///
/// Cells whose index isn't in `photos` are dropped.
pub fn plan_rows(rows: &[Row], photos: &[PhotoItem]) -> Vec<RenderRow> {
    rows.iter()
        .map(|row| RenderRow {
            cards: row
                .cells
                .iter()
                .filter_map(|cell| {
                    let photo = photos.get(cell.original_index)?;
                    Some(GridCard {
                        original_index: cell.original_index,
                        url: photo.display_url().to_string(),
                        alt: photo.alt_text().to_string(),
                        width: cell.width,
                        height: cell.height,
                    })
                })
                .collect(),
            centered: row.is_last,
        })
        .collect()
}

pub fn plan_grid<P: DimensionProbe>(
    store: &GalleryStore,
    resolver: &AspectRatioResolver<P>,
    params: &LayoutParams,
) -> Vec<RenderRow> {
    plan_rows(&layout_grid(store, resolver, params), store.photos())
}

/// Featured cards in list order.
///
/// Srcs that match a manifest photo use its thumbnail and alt text; the
/// frame shape comes from the cached ratio.
pub fn plan_featured<P: DimensionProbe>(
    store: &GalleryStore,
    resolver: &AspectRatioResolver<P>,
) -> Vec<FeaturedCard> {
    let brand = store.brand();
    store
        .featured_cards()
        .into_iter()
        .map(|(src, lightbox_index)| {
            let matched = store
                .index_of(src)
                .and_then(|i| store.photos().get(i));
            match matched {
                Some(photo) => FeaturedCard {
                    url: photo.display_url().to_string(),
                    alt: alt_or(photo, brand),
                    lightbox_index,
                    shape: FrameShape::from_ratio(resolver.resolve(photo)),
                },
                None => FeaturedCard {
                    url: src.to_string(),
                    alt: brand.to_string(),
                    lightbox_index,
                    shape: FrameShape::from_ratio(resolver.resolve(&PhotoItem::new(src))),
                },
            }
        })
        .collect()
}

/// Cards for the carousel's current frame, left to right.
pub fn plan_carousel(carousel: &Carousel) -> Vec<CarouselCard> {
    carousel
        .visible_set()
        .into_iter()
        .map(|card| CarouselCard {
            index: card.index,
            url: card.item.display_url().to_string(),
            alt: card.item.alt_text().to_string(),
            class: card.role.css_class(),
        })
        .collect()
}

/// The open lightbox photo, if any. Shows the full-size image.
pub fn plan_lightbox(store: &GalleryStore) -> Option<LightboxView> {
    let index = store.lightbox.current()?;
    let photo = store.photos().get(index)?;
    Some(LightboxView {
        url: photo.src.clone(),
        alt: photo.alt_text().to_string(),
        counter: store.lightbox.counter()?,
    })
}

/// Plan the whole page.
pub fn plan_portfolio<P: DimensionProbe>(
    store: &GalleryStore,
    carousel: &Carousel,
    resolver: &AspectRatioResolver<P>,
    params: &LayoutParams,
) -> PortfolioPlan {
    let manifest = store.manifest();
    PortfolioPlan {
        title: store.brand().to_string(),
        service_area: manifest.service_area.clone().filter(|s| !s.is_empty()),
        presentation: carousel.presentation(),
        carousel: plan_carousel(carousel),
        featured: plan_featured(store, resolver),
        grid: plan_grid(store, resolver, params),
        gap: params.gap,
        load_more_label: store.load_more_label(),
        has_more: store.remaining() > 0,
        lightbox: plan_lightbox(store),
    }
}

fn alt_or(photo: &PhotoItem, fallback: &str) -> String {
    match photo.alt.as_deref() {
        Some(alt) if !alt.is_empty() => alt.to_string(),
        _ => fallback.to_string(),
    }
}

// ============================================================================
// Resize handling
// ============================================================================

/// Debounced container-size tracking.
#[derive(Debug)]
pub struct ResizeWatcher {
    debouncer: Debouncer<(u32, u32)>,
    current: Option<(u32, u32)>,
}

impl ResizeWatcher {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            debouncer: Debouncer::new(config.resize_debounce()),
            current: None,
        }
    }

    /// Record a resize to `container_width` inside a `viewport_width` window.
    pub fn resized(&mut self, now: Instant, container_width: u32, viewport_width: u32) {
        self.debouncer.trigger(now, (container_width, viewport_width));
    }

    /// Params for a re-layout once the size has settled.
    ///
    /// Returns `None` while a resize is still pending, and also when the
    /// settled size equals the last one laid out.
    pub fn poll(&mut self, now: Instant, config: &LayoutConfig) -> Option<LayoutParams> {
        let size = self.debouncer.poll(now)?;
        if self.current == Some(size) {
            return None;
        }
        self.current = Some(size);
        Some(LayoutParams::from_config(config, size.0, size.1))
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

// ============================================================================
// HTML
// ============================================================================

pub fn render_portfolio(plan: &PortfolioPlan) -> Markup {
    let presentation = match plan.presentation {
        Presentation::Single => "single",
        Presentation::Coverflow => "coverflow",
    };
    let gap_style = format!("gap:{}px", plan.gap);

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (plan.title) }
                style { (CSS) }
            }
            body {
                header.site-header {
                    h1 { (plan.title) }
                    @if let Some(area) = &plan.service_area {
                        p.service-area { (area) }
                    }
                }
                section.hero #heroWheel data-presentation=(presentation) {
                    @for card in &plan.carousel {
                        figure class={ "hero-card " (card.class) } data-index=(card.index) {
                            img src=(card.url) alt=(card.alt) loading="eager";
                        }
                    }
                }
                div.featured-grid #featuredGrid {
                    @for card in &plan.featured {
                        button type="button"
                            class={ "featured-card frame-" (card.shape.css_class()) }
                            data-index=(card.lightbox_index) {
                            img src=(card.url) alt=(card.alt) loading="lazy";
                        }
                    }
                }
                div.photo-grid #photoGrid style=(gap_style) {
                    @for row in &plan.grid {
                        div.grid-row.is-centered[row.centered] style=(gap_style) {
                            @for card in &row.cards {
                                button.grid-card type="button" data-index=(card.original_index) {
                                    img src=(card.url) alt=(card.alt) loading="lazy"
                                        width=(card.width) height=(card.height)
                                        style={ "width:" (card.width) "px;height:" (card.height) "px" };
                                }
                            }
                        }
                    }
                }
                button.load-more #loadMoreBtn type="button" disabled[!plan.has_more] {
                    (plan.load_more_label)
                }
                div.lightbox #lightbox hidden[plan.lightbox.is_none()] {
                    @if let Some(view) = &plan.lightbox {
                        img src=(view.url) alt=(view.alt);
                        span.lightbox-counter { (view.counter) }
                    }
                }
            }
        }
    }
}
