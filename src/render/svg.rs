//! SVG generation and output

use std::fs;
use std::io;
use std::path::Path;

use ::svg::Document as SvgDocument;
use ::svg::node::element::Group;

use super::Document;
use super::shapes::{Shape, ShapeEnum};
use crate::errors::WriteError;

/// Prefix written before the root element
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8" standalone="no"?>"#;

/// Build the SVG DOM for a document.
///
/// Cells are grouped under `<g id="Grid">`; markers follow at the root in
/// document order so they draw on top.
pub fn to_svg_document(document: &Document) -> SvgDocument {
    let (min_x, min_y, width, height) = document.view_box();
    let view_box = format!(
        "{} {} {} {}",
        fmt_num(min_x),
        fmt_num(min_y),
        fmt_num(width),
        fmt_num(height)
    );

    let mut grid = Group::new().set("id", "Grid");
    let mut markers = Vec::new();
    for primitive in document.primitives() {
        match primitive {
            ShapeEnum::Cell(cell) => grid = grid.add(cell.render_svg()),
            ShapeEnum::Marker(marker) => markers.push(marker.render_svg()),
        }
    }

    let mut svg = SvgDocument::new()
        .set("version", "1.1")
        .set("viewBox", view_box)
        .add(grid);
    for marker in markers {
        svg = svg.add(marker);
    }
    svg
}

/// Serialize a document, XML declaration included
pub fn to_svg_string(document: &Document) -> String {
    let svg = to_svg_document(document);
    format!("{}\n{}\n", XML_DECLARATION, svg)
}

/// Write a document to `path`.
///
/// The full SVG text is built before the filesystem is touched, then written
/// to a sibling temporary file and renamed over the target so readers never
/// see a partial document.
pub fn write_svg(document: &Document, path: &Path) -> Result<(), WriteError> {
    let contents = to_svg_string(document);

    let Some(file_name) = path.file_name() else {
        return Err(WriteError {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
        });
    };
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    crate::log::debug!(
        path = %path.display(),
        bytes = contents.len(),
        "writing svg"
    );

    fs::write(&tmp_path, contents.as_bytes()).map_err(|source| WriteError {
        path: tmp_path.clone(),
        source,
    })?;
    fs::rename(&tmp_path, path).map_err(|source| {
        let _ = fs::remove_file(&tmp_path);
        WriteError {
            path: path.to_path_buf(),
            source,
        }
    })?;

    crate::log::info!(path = %path.display(), "wrote svg");
    Ok(())
}

/// Shortest text that parses back to the same value. `-0` prints as `0`.
pub(crate) fn fmt_num(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}
