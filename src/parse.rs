//! Parse pest pairs into AST nodes

use std::str::FromStr;

use miette::{NamedSource, SourceSpan};
use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::{Pair, Pairs};

use crate::ast::*;
use crate::errors::SceneError;
use crate::formation::{Label, PatternOffset};
use crate::{Rule, SceneParser};

/// Parse scene source into AST. `name` is used in diagnostics only.
pub fn parse(name: &str, source: &str) -> Result<SceneAst, SceneError> {
    AstBuilder { name, source }.scene()
}

/// Span of a pest pair as a miette span
pub(crate) fn span_of(pair: &Pair<Rule>) -> SourceSpan {
    let span = pair.as_span();
    (span.start(), span.end() - span.start()).into()
}

struct AstBuilder<'a> {
    name: &'a str,
    source: &'a str,
}

impl<'a> AstBuilder<'a> {
    fn src(&self) -> NamedSource<String> {
        NamedSource::new(self.name, self.source.to_string())
    }

    fn syntax(&self, message: impl Into<String>, span: SourceSpan) -> SceneError {
        SceneError::Syntax {
            message: message.into(),
            src: self.src(),
            span,
        }
    }

    /// Next child of `parent`, or a syntax error pointing at the parent
    fn next<'i>(
        &self,
        pairs: &mut Pairs<'i, Rule>,
        parent: SourceSpan,
        what: &str,
    ) -> Result<Pair<'i, Rule>, SceneError> {
        pairs
            .next()
            .ok_or_else(|| self.syntax(format!("expected {what}"), parent))
    }

    fn scene(&self) -> Result<SceneAst, SceneError> {
        let pairs = SceneParser::parse(Rule::scene, self.source).map_err(|e| {
            let span: SourceSpan = match e.location {
                InputLocation::Pos(pos) => (pos, 0).into(),
                InputLocation::Span((start, end)) => (start, end - start).into(),
            };
            self.syntax(e.variant.message().into_owned(), span)
        })?;

        let mut statements = Vec::new();
        for pair in pairs {
            if pair.as_rule() == Rule::scene {
                for inner in pair.into_inner() {
                    if inner.as_rule() == Rule::statement {
                        statements.push(self.statement(inner)?);
                    }
                }
            }
        }

        Ok(SceneAst { statements })
    }

    fn statement(&self, pair: Pair<Rule>) -> Result<Spanned<Statement>, SceneError> {
        let parent = span_of(&pair);
        let mut inner = pair.into_inner();
        let stmt = self.next(&mut inner, parent, "a statement")?;
        // the trailing `;` is not part of the statement span
        let span = span_of(&stmt);

        let statement = match stmt.as_rule() {
            Rule::grid_stmt => Statement::Grid(
                stmt.into_inner()
                    .map(|attr| self.grid_attr(attr))
                    .collect::<Result<_, _>>()?,
            ),
            Rule::pattern_stmt => Statement::Pattern(self.pattern_def(stmt)?),
            Rule::formation_stmt => Statement::Formation(self.formation(stmt)?),
            Rule::wave_stmt => Statement::Wave(self.attrs(stmt.into_inner())?),
            Rule::saturn_stmt => Statement::Saturn(self.attrs(stmt.into_inner())?),
            rule => return Err(self.syntax(format!("unexpected {rule:?}"), span)),
        };

        Ok(Spanned::new(statement, span))
    }

    fn grid_attr(&self, pair: Pair<Rule>) -> Result<Spanned<GridAttr>, SceneError> {
        let span = span_of(&pair);
        let rule = pair.as_rule();
        let mut inner = pair.into_inner();

        let attr = match rule {
            Rule::tile_attr => GridAttr::Tile(self.number(self.next(&mut inner, span, "a number")?)?),
            Rule::chunk_attr => GridAttr::Chunk(self.literal(self.next(&mut inner, span, "a count")?)?),
            Rule::chunks_attr => GridAttr::Chunks(
                self.literal(self.next(&mut inner, span, "a count")?)?,
                self.literal(self.next(&mut inner, span, "a count")?)?,
            ),
            Rule::colors_attr => GridAttr::Colors(
                self.string(self.next(&mut inner, span, "a color")?)?,
                self.string(self.next(&mut inner, span, "a color")?)?,
                self.string(self.next(&mut inner, span, "a color")?)?,
            ),
            rule => return Err(self.syntax(format!("unexpected {rule:?} in grid"), span)),
        };

        Ok(Spanned::new(attr, span))
    }

    fn pattern_def(&self, pair: Pair<Rule>) -> Result<PatternDef, SceneError> {
        let span = span_of(&pair);
        let mut inner = pair.into_inner();
        let name = self.next(&mut inner, span, "a pattern name")?;
        let name = Spanned::new(name.as_str().to_string(), span_of(&name));

        let mut entries = Vec::new();
        for entry in inner {
            let entry_span = span_of(&entry);
            let mut parts = entry.into_inner();
            let offset = self.offset(self.next(&mut parts, entry_span, "an offset")?)?;
            let label = match parts.next() {
                Some(label) => Label::new(self.string(label)?),
                None => Label::Blank,
            };
            entries.push((offset, label));
        }

        Ok(PatternDef { name, entries })
    }

    fn offset(&self, pair: Pair<Rule>) -> Result<PatternOffset, SceneError> {
        let span = span_of(&pair);
        let mut inner = pair.into_inner();
        let x = self.literal(self.next(&mut inner, span, "an x offset")?)?;
        let y = self.literal(self.next(&mut inner, span, "a y offset")?)?;
        Ok(PatternOffset::new(x, y))
    }

    fn formation(&self, pair: Pair<Rule>) -> Result<FormationStmt, SceneError> {
        let span = span_of(&pair);
        let mut inner = pair.into_inner();

        let reference = self.next(&mut inner, span, "a pattern name")?;
        let reference_span = span_of(&reference);
        let mut parts = reference.into_inner();
        let name = self.next(&mut parts, reference_span, "a pattern name")?;
        let pattern = Spanned::new(name.as_str().to_string(), span_of(&name));
        let args = match parts.next() {
            Some(args) => {
                let args_span = span_of(&args);
                let values = args
                    .into_inner()
                    .map(|arg| self.literal(arg))
                    .collect::<Result<Vec<i32>, _>>()?;
                Some(Spanned::new(values, args_span))
            }
            None => None,
        };

        Ok(FormationStmt {
            pattern,
            args,
            attrs: self.attrs(inner)?,
        })
    }

    fn attrs(&self, pairs: Pairs<Rule>) -> Result<Vec<Spanned<Attr>>, SceneError> {
        pairs.map(|pair| self.attr(pair)).collect()
    }

    fn attr(&self, pair: Pair<Rule>) -> Result<Spanned<Attr>, SceneError> {
        let span = span_of(&pair);
        let rule = pair.as_rule();
        let mut inner = pair.into_inner();

        let attr = match rule {
            Rule::at_attr => {
                let point = self.next(&mut inner, span, "a point")?;
                let point_span = span_of(&point);
                let mut coords = point.into_inner();
                let x = self.number(self.next(&mut coords, point_span, "an x coordinate")?)?;
                let y = self.number(self.next(&mut coords, point_span, "a y coordinate")?)?;
                Attr::At(x, y)
            }
            Rule::gap_attr => Attr::Gap(self.number(self.next(&mut inner, span, "a number")?)?),
            Rule::throw_attr => Attr::Throw(self.number(self.next(&mut inner, span, "a number")?)?),
            Rule::count_attr => Attr::Count(self.literal(self.next(&mut inner, span, "a count")?)?),
            Rule::color_attr => Attr::Color(self.string(self.next(&mut inner, span, "a color")?)?),
            Rule::centered_attr => Attr::Centered,
            Rule::hidden_attr => Attr::Hidden,
            rule => return Err(self.syntax(format!("unexpected {rule:?}"), span)),
        };

        Ok(Spanned::new(attr, span))
    }

    // ------------------------------------------------------------------------
    // literals
    // ------------------------------------------------------------------------

    fn number(&self, pair: Pair<Rule>) -> Result<f64, SceneError> {
        let value: f64 = self.literal(pair.clone())?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(self.invalid_number(format!("{} is out of range", pair.as_str()), span_of(&pair)))
        }
    }

    /// Parse a numeric literal of any width
    fn literal<T>(&self, pair: Pair<Rule>) -> Result<T, SceneError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        pair.as_str()
            .parse()
            .map_err(|e| self.invalid_number(format!("{}: {e}", pair.as_str()), span_of(&pair)))
    }

    fn invalid_number(&self, message: String, span: SourceSpan) -> SceneError {
        SceneError::InvalidNumber {
            message,
            src: self.src(),
            span,
        }
    }

    fn string(&self, pair: Pair<Rule>) -> Result<String, SceneError> {
        let span = span_of(&pair);
        let raw = match pair.into_inner().next() {
            Some(inner) => inner.as_str(),
            None => return Err(self.syntax("expected a string", span)),
        };

        let mut out = String::with_capacity(raw.len());
        let mut chars = raw.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => return Err(self.syntax("unterminated escape", span)),
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(source: &str) -> Vec<Statement> {
        parse("test.scene", source)
            .unwrap_or_else(|e| panic!("failed to parse {source:?}: {e:?}"))
            .statements
            .into_iter()
            .map(|s| s.value)
            .collect()
    }

    #[test]
    fn parse_grid_statement() {
        let statements = parse_ok(r#"grid tile 16 chunk 4 chunks 2 3 colors "a" "b" "c";"#);
        let Statement::Grid(attrs) = &statements[0] else {
            panic!("expected grid, got {:?}", statements[0]);
        };
        let values: Vec<_> = attrs.iter().map(|a| a.value.clone()).collect();
        assert_eq!(
            values,
            vec![
                GridAttr::Tile(16.0),
                GridAttr::Chunk(4),
                GridAttr::Chunks(2, 3),
                GridAttr::Colors("a".into(), "b".into(), "c".into()),
            ]
        );
    }

    #[test]
    fn parse_pattern_with_labels() {
        let statements = parse_ok(r#"pattern heart { (0, 0) "A", (1,-1), (-1, -1) "", }"#);
        let Statement::Pattern(def) = &statements[0] else {
            panic!("expected pattern");
        };
        assert_eq!(def.name.value, "heart");
        assert_eq!(
            def.entries,
            vec![
                (PatternOffset::new(0, 0), Label::new("A")),
                (PatternOffset::new(1, -1), Label::Blank),
                (PatternOffset::new(-1, -1), Label::Blank),
            ]
        );
    }

    #[test]
    fn parse_formation_with_args_and_flags() {
        let statements =
            parse_ok(r##"formation diamond(1, 2) at (30, 30.5) gap 3 color "#0022ff" centered hidden"##);
        let Statement::Formation(stmt) = &statements[0] else {
            panic!("expected formation");
        };
        assert_eq!(stmt.pattern.value, "diamond");
        assert_eq!(stmt.args.as_ref().map(|a| a.value.clone()), Some(vec![1, 2]));
        let attrs: Vec<_> = stmt.attrs.iter().map(|a| a.value.clone()).collect();
        assert_eq!(
            attrs,
            vec![
                Attr::At(30.0, 30.5),
                Attr::Gap(3.0),
                Attr::Color("#0022ff".into()),
                Attr::Centered,
                Attr::Hidden,
            ]
        );
    }

    #[test]
    fn parse_generators_and_comments() {
        let statements = parse_ok(
            r#"
            // a row
            wave at (30, 42) gap 3.5 count 12
            saturn at (30, 30) throw 4 gap -3 count 8; // trailing
            "#,
        );
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].keyword(), "wave");
        let Statement::Saturn(attrs) = &statements[1] else {
            panic!("expected saturn");
        };
        assert_eq!(attrs[2].value, Attr::Gap(-3.0));
    }

    #[test]
    fn string_escapes() {
        let statements = parse_ok(r#"pattern p { (0,0) "say \"hi\"\n" }"#);
        let Statement::Pattern(def) = &statements[0] else {
            panic!("expected pattern");
        };
        assert_eq!(def.entries[0].1, Label::new("say \"hi\"\n"));
    }

    #[test]
    fn syntax_error_points_at_offending_input() {
        let err = parse("test.scene", "wave at (1, 2) speed 3").unwrap_err();
        let SceneError::Syntax { span, .. } = err else {
            panic!("expected syntax error, got {err:?}");
        };
        assert_eq!(span.offset(), 15);
    }

    #[test]
    fn out_of_range_numbers_are_rejected() {
        let err = parse("test.scene", "wave count 99999999999").unwrap_err();
        assert!(matches!(err, SceneError::InvalidNumber { .. }), "{err:?}");

        let huge = format!("wave gap 1{} count 1", "0".repeat(400));
        let err = parse("test.scene", &huge).unwrap_err();
        assert!(matches!(err, SceneError::InvalidNumber { .. }), "{err:?}");
    }
}
