//! Scene resolution: turns a parsed scene into a grid configuration and a
//! list of parameterized formations.

use std::collections::HashMap;

use miette::{NamedSource, SourceSpan};

use crate::ast::*;
use crate::errors::SceneError;
use crate::formation::{BuiltinPattern, Formation, FormationPattern, Marker};
use crate::log::{debug, warn};
use crate::render::{Document, GridColors, GridConfig, assemble, defaults};
use crate::types::{Color, TilePoint};

/// A formation as placed in a scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFormation {
    pub formation: Formation,
    /// Validated but not drawn
    pub hidden: bool,
}

/// A resolved scene
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    grid: GridConfig,
    formations: Vec<SceneFormation>,
}

impl Scene {
    pub fn grid_config(&self) -> &GridConfig {
        &self.grid
    }

    pub fn formations(&self) -> &[SceneFormation] {
        &self.formations
    }

    /// Markers of every visible formation, in statement order
    pub fn markers(&self) -> Vec<Marker> {
        let mut markers = Vec::new();
        for entry in &self.formations {
            if entry.hidden {
                debug!("skipping hidden formation");
                continue;
            }
            let generated = entry.formation.markers();
            debug!(markers = generated.len(), "generated formation");
            markers.extend(generated);
        }
        markers
    }

    /// Assemble the scene into a drawable document
    pub fn document(&self) -> Document {
        assemble(&self.grid, &self.markers())
    }
}

/// Parse and resolve a scene. `name` labels the source in diagnostics.
pub fn parse_scene(name: &str, source: &str) -> Result<Scene, SceneError> {
    let ast = crate::parse::parse(name, source)?;
    Resolver { name, source }.resolve(&ast)
}

struct Resolver<'a> {
    name: &'a str,
    source: &'a str,
}

/// Attributes a generator statement accepts
const FORMATION_ATTRS: &[&str] = &["at", "gap", "color", "centered", "hidden"];
const WAVE_ATTRS: &[&str] = &["at", "gap", "count", "color", "hidden"];
const SATURN_ATTRS: &[&str] = &["at", "throw", "gap", "count", "color", "hidden"];

/// Validated attribute set of one statement
#[derive(Default)]
struct Attrs {
    at: Option<(f64, f64)>,
    gap: Option<f64>,
    throw: Option<f64>,
    count: Option<u32>,
    color: Option<String>,
    centered: bool,
    hidden: bool,
}

impl Resolver<'_> {
    fn src(&self) -> NamedSource<String> {
        NamedSource::new(self.name, self.source.to_string())
    }

    fn resolve(&self, ast: &SceneAst) -> Result<Scene, SceneError> {
        let grid = self.grid(ast)?;
        let patterns = self.patterns(ast);

        let mut formations = Vec::new();
        for statement in &ast.statements {
            let span = statement.span;
            let entry = match &statement.value {
                Statement::Grid(_) | Statement::Pattern(_) => continue,
                Statement::Formation(stmt) => {
                    let attrs = self.attrs(&stmt.attrs, "formation", FORMATION_ATTRS)?;
                    let pattern = self.pattern(stmt, &patterns)?;
                    SceneFormation {
                        formation: Formation::Pattern {
                            pattern,
                            center: attrs.center(&grid),
                            color: attrs.color(),
                            gap: attrs.gap.unwrap_or(1.0),
                            centered: attrs.centered,
                        },
                        hidden: attrs.hidden,
                    }
                }
                Statement::Wave(list) => {
                    let attrs = self.attrs(list, "wave", WAVE_ATTRS)?;
                    SceneFormation {
                        formation: Formation::Wave {
                            center: attrs.center(&grid),
                            gap: attrs.gap.unwrap_or(1.0),
                            count: self.count(&attrs, "wave", span)?,
                            color: attrs.color(),
                        },
                        hidden: attrs.hidden,
                    }
                }
                Statement::Saturn(list) => {
                    let attrs = self.attrs(list, "saturn", SATURN_ATTRS)?;
                    SceneFormation {
                        formation: Formation::Saturn {
                            center: attrs.center(&grid),
                            throw_gap: attrs.throw.unwrap_or(1.0),
                            gap: attrs.gap.unwrap_or(1.0),
                            count: self.count(&attrs, "saturn", span)?,
                            color: attrs.color(),
                        },
                        hidden: attrs.hidden,
                    }
                }
            };
            formations.push(entry);
        }

        debug!(
            formations = formations.len(),
            patterns = patterns.len(),
            "resolved scene"
        );

        Ok(Scene { grid, formations })
    }

    /// The single optional grid statement, over the defaults
    fn grid(&self, ast: &SceneAst) -> Result<GridConfig, SceneError> {
        let mut grids = ast.statements.iter().filter_map(|s| match &s.value {
            Statement::Grid(attrs) => Some((s.span, attrs)),
            _ => None,
        });

        let Some((span, attrs)) = grids.next() else {
            return Ok(GridConfig::default());
        };
        if let Some((second, _)) = grids.next() {
            return Err(SceneError::DuplicateGrid {
                src: self.src(),
                first: span,
                second,
            });
        }

        let mut seen: HashMap<&'static str, SourceSpan> = HashMap::new();
        let mut tile_size = defaults::TILE_SIZE;
        let mut chunk_size = defaults::CHUNK_SIZE;
        let mut chunks = (defaults::CHUNK_COUNT_X, defaults::CHUNK_COUNT_Y);
        let mut colors = GridColors::default();

        for attr in attrs {
            self.check_duplicate(&mut seen, attr.value.name(), attr.span)?;
            match &attr.value {
                GridAttr::Tile(size) => tile_size = *size,
                GridAttr::Chunk(size) => chunk_size = *size,
                GridAttr::Chunks(x, y) => chunks = (*x, *y),
                GridAttr::Colors(interior, alternate, border) => {
                    colors = GridColors {
                        interior: Color::from(interior.as_str()),
                        alternate: Color::from(alternate.as_str()),
                        border: Color::from(border.as_str()),
                    }
                }
            }
        }

        GridConfig::new(tile_size, chunk_size, chunks.0, chunks.1, colors).map_err(|source| {
            SceneError::InvalidGrid {
                source,
                src: self.src(),
                span,
            }
        })
    }

    /// User patterns by name, merged in source order
    fn patterns<'s>(&self, ast: &'s SceneAst) -> HashMap<&'s str, FormationPattern> {
        let mut patterns = HashMap::new();
        for statement in &ast.statements {
            let Statement::Pattern(def) = &statement.value else {
                continue;
            };
            let name = def.name.value.as_str();
            if BuiltinPattern::from_name(name).is_some() {
                warn!(pattern = name, "user pattern shadows a built-in pattern");
            }
            let pattern: FormationPattern = def.entries.iter().cloned().collect();
            if patterns.insert(name, pattern).is_some() {
                warn!(pattern = name, "pattern redefined, the last definition wins");
            }
        }
        patterns
    }

    fn pattern(
        &self,
        stmt: &FormationStmt,
        patterns: &HashMap<&str, FormationPattern>,
    ) -> Result<FormationPattern, SceneError> {
        let name = stmt.pattern.value.as_str();
        let args = stmt
            .args
            .as_ref()
            .map(|a| a.value.as_slice())
            .unwrap_or_default();
        let args_span = stmt.args.as_ref().map_or(stmt.pattern.span, |a| a.span);

        if let Some(pattern) = patterns.get(name) {
            if !args.is_empty() {
                return Err(self.arity(name, "no".to_string(), args.len(), args_span));
            }
            return Ok(pattern.clone());
        }

        if let Some(builtin) = BuiltinPattern::from_name(name) {
            let max = builtin.max_args();
            if args.len() > max {
                let expected = if max == 0 {
                    "no".to_string()
                } else {
                    format!("at most {max}")
                };
                return Err(self.arity(name, expected, args.len(), args_span));
            }
            return Ok(builtin.build(args));
        }

        let mut known: Vec<&str> = BuiltinPattern::ALL.iter().map(|b| b.name()).collect();
        let mut user: Vec<&str> = patterns.keys().copied().collect();
        user.sort_unstable();
        known.extend(user);

        Err(SceneError::UnknownPattern {
            name: name.to_string(),
            src: self.src(),
            span: stmt.pattern.span,
            suggestion: Some(format!("known patterns: {}", known.join(", "))),
        })
    }

    fn arity(&self, name: &str, expected: String, got: usize, span: SourceSpan) -> SceneError {
        SceneError::PatternArity {
            name: name.to_string(),
            expected,
            got,
            src: self.src(),
            span,
        }
    }

    fn attrs(
        &self,
        list: &[Spanned<Attr>],
        statement: &'static str,
        allowed: &[&str],
    ) -> Result<Attrs, SceneError> {
        let mut seen: HashMap<&'static str, SourceSpan> = HashMap::new();
        let mut attrs = Attrs::default();

        for attr in list {
            let name = attr.value.name();
            if !allowed.contains(&name) {
                return Err(SceneError::UnsupportedAttribute {
                    attr: name,
                    statement,
                    src: self.src(),
                    span: attr.span,
                });
            }
            self.check_duplicate(&mut seen, name, attr.span)?;
            match &attr.value {
                Attr::At(x, y) => attrs.at = Some((*x, *y)),
                Attr::Gap(gap) => attrs.gap = Some(*gap),
                Attr::Throw(throw) => attrs.throw = Some(*throw),
                Attr::Count(count) => attrs.count = Some(*count),
                Attr::Color(color) => attrs.color = Some(color.clone()),
                Attr::Centered => attrs.centered = true,
                Attr::Hidden => attrs.hidden = true,
            }
        }

        Ok(attrs)
    }

    fn check_duplicate(
        &self,
        seen: &mut HashMap<&'static str, SourceSpan>,
        attr: &'static str,
        span: SourceSpan,
    ) -> Result<(), SceneError> {
        match seen.insert(attr, span) {
            Some(first) => Err(SceneError::DuplicateAttribute {
                attr,
                src: self.src(),
                first,
                second: span,
            }),
            None => Ok(()),
        }
    }

    fn count(
        &self,
        attrs: &Attrs,
        statement: &'static str,
        span: SourceSpan,
    ) -> Result<usize, SceneError> {
        attrs
            .count
            .map(|count| count as usize)
            .ok_or_else(|| SceneError::MissingAttribute {
                attr: "count",
                statement,
                src: self.src(),
                span,
            })
    }
}

impl Attrs {
    fn center(&self, grid: &GridConfig) -> TilePoint {
        self.at
            .map(|(x, y)| TilePoint::new(x, y))
            .unwrap_or_else(|| grid.center())
    }

    fn color(&self) -> Color {
        Color::from(self.color.as_deref().unwrap_or(defaults::MARKER_COLOR))
    }
}
