//! Custom shape files.
//!
//! One shape per line, a name and a list of coordinate pairs:
//!
//! ```text
//! # comments and lines without a colon are ignored
//! wedge: ((-10, -10), (10, -10), (0, 10))
//! slab:  [(-10, -4), (10, -4), (10, 4), (-10, 4)]
//! ```
//!
//! The coordinate list is read by a small hand-written parser. Parentheses
//! and square brackets are interchangeable and a trailing comma is allowed;
//! anything else is an error that names the offending line.
//!
//! Coordinates are taken about the shape's own origin. An outline that
//! reaches past [`TEMPLATE_HALF_EXTENT`] is scaled down about that origin
//! so it fits the same culling box as the built-in shapes.

use std::fs;
use std::iter::Peekable;
use std::path::Path;
use std::str::CharIndices;

use log::warn;

use crate::error::{Result, ScatterError};
use crate::geometry::Point;
use crate::shape::{ShapeTemplate, TEMPLATE_HALF_EXTENT};

/// Parse every shape definition in `text`.
pub fn parse_shape_file(text: &str) -> Result<Vec<ShapeTemplate>> {
    let mut templates: Vec<ShapeTemplate> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((name, coords)) = line.split_once(':') else {
            continue;
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(parse_error(line_no, "missing shape name"));
        }

        let vertices = parse_coordinate_list(coords).map_err(|message| parse_error(line_no, &message))?;
        let mut template = ShapeTemplate::new(name, vertices)?;
        let reach = template.reach();
        if reach > TEMPLATE_HALF_EXTENT {
            warn!(
                "shape '{}' on line {} reaches {}, scaling to {}",
                name, line_no, reach, TEMPLATE_HALF_EXTENT
            );
            template = template.fitted(TEMPLATE_HALF_EXTENT);
        }

        if templates.iter().any(|t| t.name() == template.name()) {
            warn!("shape '{}' on line {} is defined twice, keeping the first", name, line_no);
            continue;
        }
        templates.push(template);
    }

    Ok(templates)
}

/// Read and parse a shape file from disk.
pub fn load_shape_file(path: impl AsRef<Path>) -> Result<Vec<ShapeTemplate>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ScatterError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let templates = parse_shape_file(&text)?;
    if templates.is_empty() {
        return Err(ScatterError::NoShapes(path.display().to_string()));
    }
    Ok(templates)
}

fn parse_error(line: usize, message: &str) -> ScatterError {
    ScatterError::ShapeParse {
        line,
        message: message.to_string(),
    }
}

/// `list := open pair (',' pair)* ','? close`
fn parse_coordinate_list(input: &str) -> std::result::Result<Vec<Point>, String> {
    let mut cursor = Cursor::new(input);
    let close = cursor.open()?;
    let mut points = Vec::new();

    loop {
        cursor.skip_ws();
        if cursor.try_close(close) {
            break;
        }
        points.push(cursor.pair()?);
        cursor.skip_ws();
        if cursor.try_close(close) {
            break;
        }
        cursor.expect(',')?;
    }

    cursor.skip_ws();
    if let Some((pos, c)) = cursor.chars.next() {
        return Err(format!("unexpected '{}' after coordinate list at column {}", c, pos + 1));
    }
    Ok(points)
}

struct Cursor<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    fn skip_ws(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    /// Consume `(` or `[` and return the matching closer.
    fn open(&mut self) -> std::result::Result<char, String> {
        self.skip_ws();
        match self.chars.next() {
            Some((_, '(')) => Ok(')'),
            Some((_, '[')) => Ok(']'),
            Some((pos, c)) => Err(format!("expected '(' or '[' at column {}, found '{}'", pos + 1, c)),
            None => Err("expected '(' or '[', found end of line".to_string()),
        }
    }

    fn try_close(&mut self, close: char) -> bool {
        self.chars.next_if(|&(_, c)| c == close).is_some()
    }

    fn expect(&mut self, want: char) -> std::result::Result<(), String> {
        self.skip_ws();
        match self.chars.next() {
            Some((_, c)) if c == want => Ok(()),
            Some((pos, c)) => Err(format!("expected '{}' at column {}, found '{}'", want, pos + 1, c)),
            None => Err(format!("expected '{}', found end of line", want)),
        }
    }

    /// `pair := open number ',' number ','? close`
    fn pair(&mut self) -> std::result::Result<Point, String> {
        let close = self.open()?;
        let x = self.number()?;
        self.expect(',')?;
        let y = self.number()?;
        self.skip_ws();
        if self.chars.next_if(|&(_, c)| c == ',').is_some() {
            self.skip_ws();
        }
        if !self.try_close(close) {
            return Err(format!("expected '{}' to close coordinate pair", close));
        }
        Ok(Point::new(x, y))
    }

    fn number(&mut self) -> std::result::Result<f64, String> {
        self.skip_ws();
        let start = match self.chars.peek() {
            Some(&(pos, _)) => pos,
            None => return Err("expected a number, found end of line".to_string()),
        };
        let mut end = start;
        while let Some((pos, c)) =
            self.chars.next_if(|&(_, c)| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        {
            end = pos + c.len_utf8();
        }

        let literal = &self.input[start..end];
        if literal.is_empty() {
            return Err(format!("expected a number at column {}", start + 1));
        }
        let value: f64 = literal
            .parse()
            .map_err(|_| format!("invalid number '{}' at column {}", literal, start + 1))?;
        if !value.is_finite() {
            return Err(format!("number '{}' is not finite", literal));
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tuple_syntax() {
        let shapes = parse_shape_file("wedge: ((-10, -10), (10, -10), (0, 10))\n").unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].name(), "wedge");
        assert_eq!(
            shapes[0].vertices(),
            &[Point::new(-10.0, -10.0), Point::new(10.0, -10.0), Point::new(0.0, 10.0)]
        );
    }

    #[test]
    fn accepts_brackets_and_trailing_commas() {
        let shapes = parse_shape_file("slab: [(-10,-4.5), [10,-4.5], (10, 4.5,), (-1e1, 4.5),]").unwrap();
        assert_eq!(shapes[0].vertices().len(), 4);
        assert_eq!(shapes[0].vertices()[3], Point::new(-10.0, 4.5));
    }

    #[test]
    fn skips_lines_without_colon_and_comments() {
        let text = "\n# header: not a shape\njust some text\nsq: ((0,0),(1,0),(1,1),(0,1))\n";
        let shapes = parse_shape_file(text).unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].name(), "sq");
    }

    #[test]
    fn rejects_expressions() {
        let err = parse_shape_file("evil: __import__('os').system('ls')").unwrap_err();
        assert!(matches!(err, ScatterError::ShapeParse { line: 1, .. }));

        let err = parse_shape_file("ok: ((0,0),(1,0),(0,1))\nmath: ((1+1, 0), (2, 0), (0, 2))").unwrap_err();
        assert!(matches!(err, ScatterError::ShapeParse { line: 2, .. }), "got {:?}", err);
    }

    #[test]
    fn rejects_trailing_garbage() {
        let err = parse_shape_file("tri: ((0,0),(1,0),(0,1)) extra").unwrap_err();
        assert!(matches!(err, ScatterError::ShapeParse { .. }));
    }

    #[test]
    fn rejects_unbalanced_pairs() {
        assert!(parse_shape_file("tri: ((0,0),(1,0],(0,1))").is_err());
        assert!(parse_shape_file("tri: ((0,0),(1,0),(0,1)").is_err());
    }

    #[test]
    fn too_few_vertices_is_degenerate() {
        let err = parse_shape_file("stick: ((0,0),(1,1))").unwrap_err();
        assert!(matches!(err, ScatterError::DegenerateTemplate { vertices: 2, .. }));
    }

    #[test]
    fn missing_name() {
        let err = parse_shape_file(": ((0,0),(1,0),(0,1))").unwrap_err();
        assert!(matches!(err, ScatterError::ShapeParse { line: 1, .. }));
    }

    #[test]
    fn duplicate_names_keep_first() {
        let text = "a: ((0,0),(1,0),(0,1))\na: ((0,0),(5,0),(0,5))";
        let shapes = parse_shape_file(text).unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].vertices()[1], Point::new(1.0, 0.0));
    }

    #[test]
    fn oversized_outline_is_scaled_to_fit() {
        let shapes = parse_shape_file("big: ((-30,-30),(30,-30),(30,30),(-30,30))").unwrap();
        assert!((shapes[0].reach() - TEMPLATE_HALF_EXTENT).abs() < 1e-9);
        let corner = shapes[0].vertices()[2];
        assert!((corner.x - 10.0).abs() < 1e-9 && (corner.y - 10.0).abs() < 1e-9, "{:?}", corner);

        let shapes = parse_shape_file("off: ((0,0),(40,0),(0,20))").unwrap();
        assert_eq!(shapes[0].vertices(), &[Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(0.0, 5.0)]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_shape_file("/definitely/not/here/shapes.txt").unwrap_err();
        assert!(matches!(err, ScatterError::Io { .. }));
    }
}
