//! Abstract Syntax Tree types for scene descriptions
//!
//! Every node keeps the source span it was parsed from so later stages can
//! point diagnostics at it.

use miette::SourceSpan;

use crate::formation::{Label, PatternOffset};

/// A value together with the span it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub value: T,
    pub span: SourceSpan,
}

impl<T> Spanned<T> {
    pub fn new(value: T, span: SourceSpan) -> Self {
        Self { value, span }
    }
}

/// A complete scene file
#[derive(Debug, Clone, PartialEq)]
pub struct SceneAst {
    pub statements: Vec<Spanned<Statement>>,
}

/// A scene statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// grid tile 32 chunk 20 chunks 3 3 colors "a" "b" "c"
    Grid(Vec<Spanned<GridAttr>>),
    /// pattern heart { (0,0) "A", (1,-1) }
    Pattern(PatternDef),
    /// formation diamond(1, 2) at (30, 30) gap 3 centered
    Formation(FormationStmt),
    /// wave at (30, 42) gap 3.5 count 12
    Wave(Vec<Spanned<Attr>>),
    /// saturn at (30, 30) throw 4 gap 3 count 8
    Saturn(Vec<Spanned<Attr>>),
}

impl Statement {
    /// Keyword that introduces the statement
    pub fn keyword(&self) -> &'static str {
        match self {
            Statement::Grid(_) => "grid",
            Statement::Pattern(_) => "pattern",
            Statement::Formation(_) => "formation",
            Statement::Wave(_) => "wave",
            Statement::Saturn(_) => "saturn",
        }
    }
}

/// Attribute of a `grid` statement
#[derive(Debug, Clone, PartialEq)]
pub enum GridAttr {
    Tile(f64),
    Chunk(u32),
    Chunks(u32, u32),
    Colors(String, String, String),
}

impl GridAttr {
    pub fn name(&self) -> &'static str {
        match self {
            GridAttr::Tile(_) => "tile",
            GridAttr::Chunk(_) => "chunk",
            GridAttr::Chunks(..) => "chunks",
            GridAttr::Colors(..) => "colors",
        }
    }
}

/// User-defined pattern
#[derive(Debug, Clone, PartialEq)]
pub struct PatternDef {
    pub name: Spanned<String>,
    /// Entries in source order; duplicates are kept here and merged later
    pub entries: Vec<(PatternOffset, Label)>,
}

/// Pattern formation statement
#[derive(Debug, Clone, PartialEq)]
pub struct FormationStmt {
    pub pattern: Spanned<String>,
    pub args: Option<Spanned<Vec<i32>>>,
    pub attrs: Vec<Spanned<Attr>>,
}

/// Attribute of a formation, wave or saturn statement
#[derive(Debug, Clone, PartialEq)]
pub enum Attr {
    At(f64, f64),
    Gap(f64),
    Throw(f64),
    Count(u32),
    Color(String),
    Centered,
    Hidden,
}

impl Attr {
    pub fn name(&self) -> &'static str {
        match self {
            Attr::At(..) => "at",
            Attr::Gap(_) => "gap",
            Attr::Throw(_) => "throw",
            Attr::Count(_) => "count",
            Attr::Color(_) => "color",
            Attr::Centered => "centered",
            Attr::Hidden => "hidden",
        }
    }
}
