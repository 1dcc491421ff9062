//! Formation grid renderer
//!
//! Draws a chunked tile grid with formations of colored markers on top and
//! writes the result as an SVG document. Formations are described in a small
//! scene language (see [`scene`]).

use pest_derive::Parser;

pub mod ast;
pub mod errors;
pub mod formation;
pub mod log;
pub mod parse;
pub mod render;
pub mod scene;
pub mod types;

pub use errors::{ConfigError, SceneError, WriteError};
pub use formation::{
    BuiltinPattern, Formation, FormationPattern, Label, Marker, PatternOffset, pattern_markers,
    saturn, silent_wave,
};
pub use render::svg::{to_svg_document, to_svg_string, write_svg};
pub use render::{Document, GridColors, GridConfig, assemble, build_cell, build_marker, compose_grid};
pub use scene::{Scene, SceneFormation, parse_scene};

#[derive(Parser)]
#[grammar = "scene.pest"]
pub struct SceneParser;

/// The scene rendered by the `formation-grid` binary
pub const BUILTIN_SCENE: &str = include_str!("builtin.scene");

/// Render scene source to SVG.
///
/// Returns the SVG string on success, or an error with diagnostics.
pub fn render_scene(source: &str) -> Result<String, miette::Report> {
    let scene = parse_scene("scene", source)?;
    Ok(to_svg_string(&scene.document()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pest::Parser;

    #[test]
    fn parse_grid() {
        let input = r##"grid tile 32 chunk 20 chunks 3 3 colors "#a" "#b" "#c";"##;
        let result = SceneParser::parse(Rule::scene, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_empty_pattern() {
        let input = "pattern nothing { }";
        let result = SceneParser::parse(Rule::scene, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_flags_in_any_order() {
        let input = "formation box hidden centered gap 2";
        let result = SceneParser::parse(Rule::scene, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_chunk_and_chunks() {
        let input = "grid chunks 2 2 chunk 5";
        let result = SceneParser::parse(Rule::scene, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn reject_fractional_count() {
        let input = "wave count 2.5";
        let result = SceneParser::parse(Rule::scene, input);
        assert!(result.is_err());
    }

    #[test]
    fn keywords_need_a_word_boundary() {
        for input in [
            "patternfoo { }",
            "wavecount 3",
            "grid tile32",
            "formation box gap2",
            "saturn colors \"red\"",
            "formation box centeredx",
        ] {
            let result = SceneParser::parse(Rule::scene, input);
            assert!(result.is_err(), "{input:?} should not parse");
        }
    }

    #[test]
    fn longer_keywords_are_not_split() {
        let input = r#"grid chunks 2 2 chunk 5 colors "a" "b" "c"; wave color "red" count 1"#;
        let result = SceneParser::parse(Rule::scene, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn reject_unterminated_string() {
        let input = r#"wave count 2 color "red"#;
        let result = SceneParser::parse(Rule::scene, input);
        assert!(result.is_err());
    }

    #[test]
    fn parse_builtin_scene() {
        let result = SceneParser::parse(Rule::scene, BUILTIN_SCENE);
        assert!(result.is_ok(), "Failed to parse builtin scene: {:?}", result.err());
    }

    #[test]
    fn render_reports_scene_errors() {
        let err = render_scene("formation star").unwrap_err();
        assert!(err.to_string().contains("unknown pattern: star"));
    }
}
