//! Error types with rich diagnostics using miette
//!
//! Scene errors carry source spans so the CLI can point at the offending
//! statement.

use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::SizeError;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Invalid grid parameters, rejected before any geometry is produced
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid tile size {value}: {reason}")]
    #[diagnostic(
        code(formation_grid::config::invalid_tile_size),
        help("the tile size is in pixels and must be positive")
    )]
    InvalidTileSize { value: f64, reason: SizeError },

    #[error("invalid chunk size {value}")]
    #[diagnostic(
        code(formation_grid::config::invalid_chunk_size),
        help("a chunk must be at least one tile wide")
    )]
    InvalidChunkSize { value: u32 },

    #[error("invalid chunk count {x}x{y}")]
    #[diagnostic(
        code(formation_grid::config::invalid_chunk_count),
        help("the grid needs at least one chunk on each axis")
    )]
    InvalidChunkCount { x: u32, y: u32 },

    #[error("grid of {x}x{y} chunks of {chunk_size} tiles is too large")]
    #[diagnostic(
        code(formation_grid::config::grid_too_large),
        help("the tile count on each axis must fit in a u32")
    )]
    GridTooLarge { chunk_size: u32, x: u32, y: u32 },
}

// ============================================================================
// Scene Errors
// ============================================================================

/// Errors found while reading a scene description
#[derive(Error, Diagnostic, Debug)]
pub enum SceneError {
    #[error("syntax error: {message}")]
    #[diagnostic(code(formation_grid::scene::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("invalid number: {message}")]
    #[diagnostic(code(formation_grid::scene::invalid_number))]
    InvalidNumber {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid number")]
        span: SourceSpan,
    },

    #[error("unknown pattern: {name}")]
    #[diagnostic(code(formation_grid::scene::unknown_pattern))]
    UnknownPattern {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not defined")]
        span: SourceSpan,
        #[help]
        suggestion: Option<String>,
    },

    #[error("pattern {name} takes {expected} arguments, got {got}")]
    #[diagnostic(code(formation_grid::scene::pattern_arity))]
    PatternArity {
        name: String,
        expected: String,
        got: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("wrong number of arguments")]
        span: SourceSpan,
    },

    #[error("`{attr}` given more than once")]
    #[diagnostic(code(formation_grid::scene::duplicate_attribute))]
    DuplicateAttribute {
        attr: &'static str,
        #[source_code]
        src: NamedSource<String>,
        #[label("first given here")]
        first: SourceSpan,
        #[label("repeated here")]
        second: SourceSpan,
    },

    #[error("`{attr}` is not valid on a {statement} statement")]
    #[diagnostic(code(formation_grid::scene::unsupported_attribute))]
    UnsupportedAttribute {
        attr: &'static str,
        statement: &'static str,
        #[source_code]
        src: NamedSource<String>,
        #[label("not allowed here")]
        span: SourceSpan,
    },

    #[error("{statement} statement is missing `{attr}`")]
    #[diagnostic(code(formation_grid::scene::missing_attribute))]
    MissingAttribute {
        attr: &'static str,
        statement: &'static str,
        #[source_code]
        src: NamedSource<String>,
        #[label("in this statement")]
        span: SourceSpan,
    },

    #[error("the grid is configured more than once")]
    #[diagnostic(
        code(formation_grid::scene::duplicate_grid),
        help("merge both grid statements into one")
    )]
    DuplicateGrid {
        #[source_code]
        src: NamedSource<String>,
        #[label("first grid statement")]
        first: SourceSpan,
        #[label("second grid statement")]
        second: SourceSpan,
    },

    #[error("invalid grid configuration")]
    #[diagnostic(code(formation_grid::scene::invalid_grid))]
    InvalidGrid {
        #[source]
        #[diagnostic_source]
        source: ConfigError,
        #[source_code]
        src: NamedSource<String>,
        #[label("in this grid statement")]
        span: SourceSpan,
    },
}

// ============================================================================
// Write Errors
// ============================================================================

/// The document could not be written to disk
#[derive(Error, Diagnostic, Debug)]
#[error("failed to write {}", .path.display())]
#[diagnostic(code(formation_grid::write::io))]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}
