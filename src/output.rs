//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Photos are listed by positional index and file name; site-relative paths
//! follow as indented context lines. Counts lead every section header so the
//! output reads as an inventory of the portfolio.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Photos (3)
//! 001 a-dusk.png
//!     Source: assets/gallery/full/a-dusk.png
//!     Thumb: missing
//! 002 b-dawn.png
//!     Source: assets/gallery/full/b-dawn.png
//!     Thumb: assets/gallery/thumb/b-dawn.jpg
//!
//! Wrote gallery.json: 3 photos, 2 with thumbnails
//! ```
//!
//! ## Check
//!
//! ```text
//! Manifest
//!     Portfolio: 12 photos in 1 category
//! Featured (2, from list)
//! 001 p3.jpg → lightbox 004
//! 002 p9.jpg → lightbox 010
//!     Missing: gone.jpg
//! Carousel (7)
//! 001 p0.jpg
//! Grid
//!     10 photos, 18 per page, 0 hidden
//! ```
//!
//! ## Layout
//!
//! ```text
//! Layout 1000px, row height 260px, gap 14px
//! Row 001 (4 photos, 223px)
//!     001 p0.jpg 222×223
//! Row 002 (1 photo, last, centered)
//!     005 p4.jpg 390×260
//! ```
//!
//! ## Carousel
//!
//! ```text
//! 000 p5.jpg p6.jpg [p0.jpg] p1.jpg p2.jpg
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::carousel::{CardRole, Carousel};
use crate::gallery::{GalleryStore, ListSource};
use crate::layout::{LayoutParams, Row};
use crate::render::PortfolioPlan;
use crate::scan::ScanReport;
use crate::selection::basename;
use crate::types::{GalleryManifest, PhotoItem};
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// `001 dawn.jpg`: index plus file name.
fn photo_line(index: usize, src: &str) -> String {
    format!("{} {}", format_index(index), basename(src))
}

// ============================================================================
// scan
// ============================================================================

pub fn format_scan_output(
    manifest: &GalleryManifest,
    report: &ScanReport,
    manifest_path: &Path,
) -> Vec<String> {
    let photos = manifest.primary_photos();
    let mut lines = vec![format!("Photos ({})", photos.len())];

    for (i, photo) in photos.iter().enumerate() {
        lines.push(photo_line(i + 1, &photo.src));
        lines.push(format!("{}Source: {}", indent(1), photo.src));
        lines.push(format!(
            "{}Thumb: {}",
            indent(1),
            photo.thumb.as_deref().unwrap_or("missing")
        ));
    }

    lines.push(String::new());
    if let Some(imported) = report.imported {
        lines.push(format!("Imported {}", plural(imported, "photo", "photos")));
    }
    lines.push(format!(
        "Wrote {}: {}, {} with thumbnails",
        manifest_path.display(),
        plural(report.photos, "photo", "photos"),
        report.with_thumb
    ));
    lines
}

pub fn print_scan_output(manifest: &GalleryManifest, report: &ScanReport, manifest_path: &Path) {
    for line in format_scan_output(manifest, report, manifest_path) {
        println!("{}", line);
    }
}

// ============================================================================
// check
// ============================================================================

/// Summarize what the portfolio page will show.
pub fn format_check_output(store: &GalleryStore) -> Vec<String> {
    let manifest = store.manifest();
    let mut lines = vec![
        "Manifest".to_string(),
        format!(
            "{}{}: {} in {}",
            indent(1),
            store.brand(),
            plural(store.photos().len(), "photo", "photos"),
            plural(manifest.categories.len(), "category", "categories"),
        ),
    ];

    let featured = store.featured();
    let source = match featured.source {
        ListSource::File => "from list",
        ListSource::Fallback => "fallback",
    };
    lines.push(format!("Featured ({}, {})", featured.srcs.len(), source));
    for (i, (src, lightbox_index)) in store.featured_cards().into_iter().enumerate() {
        lines.push(format!(
            "{} → lightbox {}",
            photo_line(i + 1, src),
            format_index(lightbox_index + 1)
        ));
    }
    for missing in &featured.missing {
        lines.push(format!("{}Missing: {}", indent(1), missing));
    }

    let carousel = store.carousel_items();
    lines.push(format!("Carousel ({})", carousel.len()));
    for (i, photo) in carousel.iter().enumerate() {
        lines.push(photo_line(i + 1, &photo.src));
    }

    lines.push("Grid".to_string());
    lines.push(format!(
        "{}{}, {} per page, {} hidden",
        indent(1),
        plural(store.grid_pool().len(), "photo", "photos"),
        store.visible_count(),
        store.remaining()
    ));
    lines
}

pub fn print_check_output(store: &GalleryStore) {
    for line in format_check_output(store) {
        println!("{}", line);
    }
}

// ============================================================================
// layout
// ============================================================================

pub fn format_layout_output(
    rows: &[Row],
    photos: &[PhotoItem],
    params: &LayoutParams,
) -> Vec<String> {
    let mut lines = vec![format!(
        "Layout {}px, row height {}px, gap {}px",
        params.container_width, params.target_row_height, params.gap
    )];

    for (i, row) in rows.iter().enumerate() {
        let count = plural(row.cells.len(), "photo", "photos");
        let header = if row.is_last {
            format!("Row {} ({}, last, centered)", format_index(i + 1), count)
        } else {
            format!(
                "Row {} ({}, {}px)",
                format_index(i + 1),
                count,
                row.height.round() as u32
            )
        };
        lines.push(header);

        for cell in &row.cells {
            let name = photos
                .get(cell.original_index)
                .map(|p| basename(&p.src))
                .unwrap_or("?");
            lines.push(format!(
                "{}{} {} {}×{}",
                indent(1),
                format_index(cell.original_index + 1),
                name,
                cell.width,
                cell.height
            ));
        }
    }
    lines
}

pub fn print_layout_output(rows: &[Row], photos: &[PhotoItem], params: &LayoutParams) {
    for line in format_layout_output(rows, photos, params) {
        println!("{}", line);
    }
}

// ============================================================================
// carousel
// ============================================================================

/// One carousel frame on a single line, the active card in brackets.
pub fn format_carousel_frame(step: usize, carousel: &Carousel) -> String {
    let cards: Vec<String> = carousel
        .visible_set()
        .iter()
        .map(|card| {
            let name = basename(&card.item.src);
            if card.role == CardRole::Active {
                format!("[{}]", name)
            } else {
                name.to_string()
            }
        })
        .collect();
    format!("{} {}", format_index(step), cards.join(" "))
}

pub fn print_carousel_frame(step: usize, carousel: &Carousel) {
    println!("{}", format_carousel_frame(step, carousel));
}

// ============================================================================
// render
// ============================================================================

pub fn format_render_output(plan: &PortfolioPlan, out: &Path) -> Vec<String> {
    let grid_photos: usize = plan.grid.iter().map(|r| r.cards.len()).sum();
    vec![
        format!("{} → {}", plan.title, out.display()),
        format!("{}Carousel: {}", indent(1), plural(plan.carousel.len(), "card", "cards")),
        format!("{}Featured: {}", indent(1), plural(plan.featured.len(), "photo", "photos")),
        format!(
            "{}Grid: {} in {}",
            indent(1),
            plural(grid_photos, "photo", "photos"),
            plural(plan.grid.len(), "row", "rows")
        ),
        format!("{}{}", indent(1), plan.load_more_label),
    ]
}

pub fn print_render_output(plan: &PortfolioPlan, out: &Path) {
    for line in format_render_output(plan, out) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FolioConfig, Presentation};
    use crate::layout::Cell;
    use crate::render::{GridCard, RenderRow};
    use crate::test_helpers::{manifest_with, numbered_photos};
    use std::io;

    fn lines(list: &[&str]) -> io::Result<Vec<String>> {
        Ok(list.iter().map(|s| s.to_string()).collect())
    }

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(1234), "1234");
    }

    #[test]
    fn plural_picks_form() {
        assert_eq!(plural(1, "photo", "photos"), "1 photo");
        assert_eq!(plural(0, "photo", "photos"), "0 photos");
    }

    #[test]
    fn photo_line_shows_basename() {
        assert_eq!(photo_line(2, "assets/gallery/full/dawn.jpg"), "002 dawn.jpg");
    }

    // =========================================================================
    // scan
    // =========================================================================

    #[test]
    fn scan_output_lists_thumbs_and_summary() {
        let mut photos = numbered_photos(2);
        photos[1].thumb = Some("assets/gallery/thumb/p1.jpg".into());
        let manifest = manifest_with(photos);
        let report = ScanReport {
            photos: 2,
            with_thumb: 1,
            missing_thumbs: vec!["assets/gallery/full/p0.jpg".into()],
            imported: None,
        };

        let out = format_scan_output(&manifest, &report, Path::new("gallery.json"));
        assert_eq!(
            out,
            vec![
                "Photos (2)",
                "001 p0.jpg",
                "    Source: assets/gallery/full/p0.jpg",
                "    Thumb: missing",
                "002 p1.jpg",
                "    Source: assets/gallery/full/p1.jpg",
                "    Thumb: assets/gallery/thumb/p1.jpg",
                "",
                "Wrote gallery.json: 2 photos, 1 with thumbnails",
            ]
        );
    }

    #[test]
    fn scan_output_reports_imported_photos() {
        let manifest = manifest_with(numbered_photos(1));
        let report = ScanReport {
            photos: 1,
            imported: Some(1),
            ..Default::default()
        };

        let out = format_scan_output(&manifest, &report, Path::new("gallery.json"));
        assert_eq!(
            &out[out.len() - 2..],
            ["Imported 1 photo", "Wrote gallery.json: 1 photo, 0 with thumbnails"]
        );
    }

    // =========================================================================
    // check
    // =========================================================================

    #[test]
    fn check_output_reports_lists() {
        let store = GalleryStore::new(
            manifest_with(numbered_photos(12)),
            lines(&["p3.jpg", "gone.jpg"]),
            lines(&["p0.jpg"]),
            &FolioConfig::default(),
        );

        let out = format_check_output(&store);
        assert_eq!(out[0], "Manifest");
        assert_eq!(out[1], "    Portfolio: 12 photos in 1 category");
        assert_eq!(out[2], "Featured (1, from list)");
        assert_eq!(out[3], "001 p3.jpg → lightbox 004");
        assert_eq!(out[4], "    Missing: gone.jpg");
        assert_eq!(out[5], "Carousel (1)");
        assert_eq!(out[6], "001 p0.jpg");
        assert_eq!(out[7], "Grid");
        assert_eq!(out[8], "    11 photos, 18 per page, 0 hidden");
    }

    #[test]
    fn check_output_marks_fallback() {
        let missing = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let store = GalleryStore::new(
            manifest_with(numbered_photos(3)),
            missing,
            lines(&[]),
            &FolioConfig::default(),
        );
        let out = format_check_output(&store);
        assert_eq!(out[2], "Featured (3, fallback)");
    }

    // =========================================================================
    // layout
    // =========================================================================

    #[test]
    fn layout_output_shows_rows_and_cells() {
        let photos = numbered_photos(3);
        let rows = vec![
            Row {
                cells: vec![
                    Cell {
                        original_index: 0,
                        width: 500,
                        height: 250,
                    },
                    Cell {
                        original_index: 1,
                        width: 486,
                        height: 250,
                    },
                ],
                height: 249.6,
                is_last: false,
            },
            Row {
                cells: vec![Cell {
                    original_index: 2,
                    width: 390,
                    height: 260,
                }],
                height: 260.0,
                is_last: true,
            },
        ];
        let params = LayoutParams {
            container_width: 1000,
            target_row_height: 260,
            gap: 14,
            min_available: 10,
        };

        let out = format_layout_output(&rows, &photos, &params);
        assert_eq!(
            out,
            vec![
                "Layout 1000px, row height 260px, gap 14px",
                "Row 001 (2 photos, 250px)",
                "    001 p0.jpg 500×250",
                "    002 p1.jpg 486×250",
                "Row 002 (1 photo, last, centered)",
                "    003 p2.jpg 390×260",
            ]
        );
    }

    // =========================================================================
    // carousel
    // =========================================================================

    #[test]
    fn carousel_frame_brackets_active() {
        let mut config = FolioConfig::default().carousel;
        config.presentation = Presentation::Coverflow;
        let carousel = Carousel::new(numbered_photos(7), &config);
        assert_eq!(
            format_carousel_frame(0, &carousel),
            "000 p5.jpg p6.jpg [p0.jpg] p1.jpg p2.jpg"
        );
    }

    #[test]
    fn carousel_frame_single() {
        let carousel = Carousel::new(numbered_photos(2), &FolioConfig::default().carousel);
        assert_eq!(format_carousel_frame(3, &carousel), "003 [p0.jpg]");
    }

    #[test]
    fn carousel_frame_empty() {
        let carousel = Carousel::new(Vec::new(), &FolioConfig::default().carousel);
        assert_eq!(format_carousel_frame(1, &carousel), "001 ");
    }

    // =========================================================================
    // render
    // =========================================================================

    #[test]
    fn render_output_counts() {
        let card = |i: usize| GridCard {
            original_index: i,
            url: format!("p{i}.jpg"),
            alt: String::new(),
            width: 100,
            height: 100,
        };
        let plan = PortfolioPlan {
            title: "Studio".into(),
            service_area: None,
            presentation: Presentation::Single,
            carousel: Vec::new(),
            featured: Vec::new(),
            grid: vec![
                RenderRow {
                    cards: vec![card(0), card(1)],
                    centered: false,
                },
                RenderRow {
                    cards: vec![card(2)],
                    centered: true,
                },
            ],
            gap: 14,
            load_more_label: "No more photos",
            has_more: false,
            lightbox: None,
        };

        let out = format_render_output(&plan, Path::new("index.html"));
        assert_eq!(
            out,
            vec![
                "Studio → index.html",
                "    Carousel: 0 cards",
                "    Featured: 0 photos",
                "    Grid: 3 photos in 2 rows",
                "    No more photos",
            ]
        );
    }
}
