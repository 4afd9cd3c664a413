//! Canonical text rendering of a validated configuration.

use super::configuration::Configuration;
use tracing::instrument;

/// How an empty cell is written.
pub const EMPTY_CELL: &str = "( ,N)";

/// Renders a configuration in canonical form.
///
/// One `Layer <index>:` header per layer, its rows as space-joined cell
/// tokens and a blank line after each layer. Trailing blank lines are
/// trimmed and the output ends with exactly one newline. The dimension
/// line is not part of the rendering; see [`render_document`].
#[instrument(skip(config), fields(layers = config.layers().len()))]
pub fn render(config: &Configuration) -> String {
    let mut lines = Vec::new();
    for layer in config.layers() {
        lines.push(format!("Layer {}:", layer.index()));
        for row in layer.rows() {
            let tokens: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Some(piece) => piece.to_string(),
                    None => EMPTY_CELL.to_string(),
                })
                .collect();
            lines.push(tokens.join(" "));
        }
        lines.push(String::new());
    }

    let mut out = lines.join("\n").trim_end().to_string();
    out.push('\n');
    out
}

/// Renders a complete configuration document, dimension line included.
///
/// The result is itself a valid configuration and validates back to an
/// equal [`Configuration`].
#[instrument(skip(config))]
pub fn render_document(config: &Configuration) -> String {
    format!("{}\n\n{}\n", config.dimensions(), render(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::khet::validator::validate;

    const INPUT: &str = "3,3,1\n\nLayer 0:\n(▲,A)  ( ,N) (•,B)\n( ,N) (◆,N) ( ,N)   \n(•,A) ( ,N) (▼,B)\n\n";

    #[test]
    fn test_render_normalizes_spacing() {
        let config = validate(INPUT).unwrap();
        assert_eq!(
            render(&config),
            "Layer 0:\n(▲,A) ( ,N) (•,B)\n( ,N) (◆,N) ( ,N)\n(•,A) ( ,N) (▼,B)\n"
        );
    }

    #[test]
    fn test_render_multiple_layers() {
        let input = "3,3,2\n\nLayer 0:\n(▲,A) ( ,N) ( ,N)\n( ,N) ( ,N) ( ,N)\n( ,N) ( ,N) (▼,B)\n\nLayer 1:\n(•,A) ( ,N) ( ,N)\n( ,N) ( ,N) ( ,N)\n( ,N) ( ,N) (•,B)\n\n";
        let config = validate(input).unwrap();
        let rendered = render(&config);
        assert!(rendered.starts_with("Layer 0:\n"));
        assert!(rendered.contains("\n\nLayer 1:\n"));
        assert!(rendered.ends_with("(•,B)\n"));
        assert!(!rendered.ends_with("\n\n"));
    }

    #[test]
    fn test_document_is_a_fixed_point() {
        let config = validate(INPUT).unwrap();
        let document = render_document(&config);
        let again = validate(&document).expect("rendered document validates");
        assert_eq!(again, config);
        assert_eq!(render_document(&again), document);
    }

    #[test]
    fn test_display_matches_render() {
        let config = validate(INPUT).unwrap();
        assert_eq!(config.to_string(), render(&config));
    }
}
