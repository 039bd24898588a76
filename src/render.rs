use crate::error::{PlotError, Result};
use crate::model::{Element, Figure, TextAlign};
use clap::ValueEnum;
use std::fmt::Write as _;
use tracing::{debug, warn};
use typst::layout::PagedDocument;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_as_lib::TypstEngine;

const BAR_FILL: &str = "#1f77b4";
const STROKE: &str = "0.6pt + black";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pdf,
    Svg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Svg => "svg",
        }
    }
}

fn pt(v: f64) -> String {
    format!("{v:.2}pt")
}

/// Quotes `s` as a Typst string literal.
fn typst_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Writes the figure as a single Typst page of absolutely placed elements.
pub fn to_typst_source(figure: &Figure) -> String {
    let mut src = String::new();
    let _ = writeln!(
        src,
        "#set page(width: {}, height: {}, margin: 0pt)",
        pt(figure.width),
        pt(figure.height)
    );
    src.push_str("#{\n");

    for element in &figure.elements {
        let _ = match element {
            Element::Rect { x, y, width, height } => writeln!(
                src,
                "  place(top + left, dx: {}, dy: {}, rect(width: {}, height: {}, fill: rgb({}), stroke: none))",
                pt(*x),
                pt(*y),
                pt(*width),
                pt(*height),
                typst_str(BAR_FILL)
            ),
            Element::Line { x1, y1, x2, y2 } => writeln!(
                src,
                "  place(top + left, line(start: ({}, {}), end: ({}, {}), stroke: {}))",
                pt(*x1),
                pt(*y1),
                pt(*x2),
                pt(*y2),
                STROKE
            ),
            Element::Text {
                x,
                y,
                width,
                height,
                size,
                align,
                rotated,
                content,
            } => {
                let align = match align {
                    TextAlign::Center => "center + horizon",
                    TextAlign::Right => "right + horizon",
                };
                let body = format!(
                    "align({align}, text(size: {}, {}))",
                    pt(*size),
                    typst_str(content)
                );
                if *rotated {
                    // The box is laid out upright and turned about its centre.
                    writeln!(
                        src,
                        "  place(top + left, dx: {}, dy: {}, rotate(-90deg, box(width: {}, height: {}, {body})))",
                        pt(x + width / 2.0 - height / 2.0),
                        pt(y + height / 2.0 - width / 2.0),
                        pt(*height),
                        pt(*width)
                    )
                } else {
                    writeln!(
                        src,
                        "  place(top + left, dx: {}, dy: {}, box(width: {}, height: {}, {body}))",
                        pt(*x),
                        pt(*y),
                        pt(*width),
                        pt(*height)
                    )
                }
            }
        };
    }

    src.push_str("}\n");
    src
}

/// Compiles Typst sources in-process against the fonts bundled with the binary.
///
/// System fonts are never consulted, so output does not depend on the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypstRenderer;

impl TypstRenderer {
    pub fn new() -> Self {
        Self
    }

    fn font_options() -> TypstKitFontOptions {
        TypstKitFontOptions::default()
            .include_system_fonts(false)
            .include_embedded_fonts(true)
    }

    pub fn compile(&self, source: &str) -> Result<PagedDocument> {
        let engine = TypstEngine::builder()
            .main_file(source)
            .search_fonts_with(Self::font_options())
            .build();

        let compiled = engine.compile::<PagedDocument>();
        for warning in &compiled.warnings {
            warn!(diagnostic = %warning.message, "typst warning");
        }

        compiled
            .output
            .map_err(|e| PlotError::Render(format!("{e:?}")))
    }

    pub fn render(&self, figure: &Figure, format: OutputFormat) -> Result<Vec<u8>> {
        let source = to_typst_source(figure);
        debug!(bytes = source.len(), ?format, "compiling figure");
        let document = self.compile(&source)?;

        match format {
            OutputFormat::Pdf => typst_pdf::pdf(&document, &typst_pdf::PdfOptions::default())
                .map_err(|e| PlotError::Render(format!("{e:?}"))),
            OutputFormat::Svg => document
                .pages
                .first()
                .map(|page| typst_svg::svg(page).into_bytes())
                .ok_or_else(|| PlotError::Render("document has no pages".to_string())),
        }
    }
}
