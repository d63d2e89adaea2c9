//! Decoder for the [Run Length Encoded](https://conwaylife.com/wiki/Run_Length_Encoded)
//! pattern format.

use regex::Regex;
use tracing::warn;

use crate::error::Error;
use crate::grid::Grid;

/// Lines in an RLE file must not exceed 70 characters. Longer lines are
/// skipped with a warning rather than failing the whole decode.
const MAX_LINE_LEN: usize = 70;

/// A fully decoded pattern: the populated grid plus any `#` commentary
/// collected from the file, in file order.
#[derive(Clone, Debug, PartialEq)]
pub struct Pattern {
    grid: Grid,
    comment: String,
}

impl Pattern {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub(crate) fn into_parts(self) -> (Grid, String) {
        (self.grid, self.comment)
    }
}

/// Decodes an RLE pattern from a string.
///
/// The header's width and height size the grid; `wrap` decides the topology
/// of the decoded grid independently of anything the file declares. Any
/// format error aborts the decode, no partially filled grid is returned.
///
/// # Arguments
/// * `src` - The full text of the pattern.
/// * `wrap` - Whether the decoded grid wraps toroidally.
pub fn decode(src: &str, wrap: bool) -> Result<Pattern, Error> {
    let digits = Regex::new(r"\d+").unwrap();
    let life_rule = Regex::new(r"(?i)b3/s23").unwrap();

    let mut comment = String::new();
    let mut grid: Option<Grid> = None;
    let mut decoded = false;

    let mut lines = src.lines();
    while let Some(line) = lines.next() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        if line.len() > MAX_LINE_LEN {
            warn!(line, "line exceeds {MAX_LINE_LEN} characters, skipping");
            continue;
        }
        if let Some(rest) = line.strip_prefix('#') {
            // The tag letter and its separator occupy the next two bytes.
            comment.push_str(rest.get(2..).unwrap_or(""));
            comment.push('\n');
        } else if line.starts_with('x') {
            if line.contains("rule") && !life_rule.is_match(line) {
                return Err(Error::Rule(line.to_string()));
            }
            // The width and height are the first two runs of digits, any
            // surrounding text (including a trailing rule token) is ignored.
            let params = digits
                .find_iter(line)
                .take(2)
                .map(|m| m.as_str().parse())
                .collect::<Result<Vec<usize>, _>>()?;
            if params.len() != 2 {
                return Err(Error::HeaderParams(params.len()));
            }
            let (width, height) = (params[0], params[1]);
            if width == 0 || height == 0 {
                return Err(Error::Dimensions(width, height));
            }
            grid = Some(Grid::new(width, height, wrap));
        } else {
            // Pattern data. The header must have sized the grid by now.
            let grid = grid.as_mut().ok_or(Error::MissingHeader)?;
            if decoded {
                continue;
            }
            // An exclamation mark marks the end of the configuration; keep
            // pulling lines until one shows up, wherever it is embedded.
            let mut data = line.to_string();
            while !data.contains('!') {
                let next = lines.next().ok_or(Error::Unterminated)?;
                data.push_str(next.trim_end_matches('\r'));
            }
            let body = &data[..data.find('!').unwrap_or(data.len())];
            for (y, segment) in body.split('$').enumerate() {
                if y == grid.height() {
                    return Err(Error::RowCount(body.split('$').count(), grid.height()));
                }
                decode_row(segment, grid, y)?;
            }
            // Rows past the last '$' stay dead, nothing to pad.
            decoded = true;
        }
    }

    let grid = grid.ok_or(Error::MissingHeader)?;
    Ok(Pattern { grid, comment })
}

/// Decodes one `$`-delimited row segment into row `y` of the grid.
///
/// The grammar is a sequence of `(digit* tag)` items where `o` is a run of
/// alive cells, `b` a run of dead cells, and an omitted count means 1.
/// Cells past the end of the segment stay dead.
fn decode_row(segment: &str, grid: &mut Grid, y: usize) -> Result<(), Error> {
    let width = grid.width();
    let mut x = 0;
    let mut chars = segment.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_whitespace() {
            chars.next();
            continue;
        }
        let mut count = String::new();
        while let Some(d) = chars.peek() {
            if !d.is_ascii_digit() {
                break;
            }
            count.push(*d);
            chars.next();
        }
        let run = if count.is_empty() {
            1
        } else {
            count.parse::<usize>()?
        };
        let alive = match chars.next() {
            Some('o') => true,
            Some('b') => false,
            Some(other) => return Err(Error::Tag(other)),
            None => return Err(Error::DanglingRunCount),
        };
        // A row that encodes more cells than the header promised would
        // otherwise let the input dictate allocation size.
        if x + run > width {
            return Err(Error::RowOverflow {
                row: y,
                cells: x + run,
                width,
            });
        }
        if alive {
            for i in 0..run {
                grid.set(x + i, y, true);
            }
        }
        x += run;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GLIDER: &str = "x = 3, y = 3, rule = B3/S23\nbo$2bo$3o!\n";

    fn rows(grid: &Grid) -> Vec<Vec<bool>> {
        (0..grid.height())
            .map(|y| {
                (0..grid.width())
                    .map(|x| grid.alive(x as i64, y as i64))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn when_decoding_a_glider_the_exact_cells_are_populated() {
        let pattern = decode(GLIDER, true).unwrap();
        let grid = pattern.grid();

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(
            rows(grid),
            vec![
                vec![false, true, false],
                vec![false, false, true],
                vec![true, true, true],
            ]
        );
    }

    #[test]
    fn when_the_header_declares_an_alternative_rule_decoding_fails() {
        let src = "x = 3, y = 3, rule = B36/S23\nbo$2bo$3o!\n";
        assert!(matches!(decode(src, true), Err(Error::Rule(_))));
    }

    #[test]
    fn when_the_header_has_fewer_than_two_numbers_decoding_fails() {
        assert!(matches!(
            decode("x = 3\no!\n", true),
            Err(Error::HeaderParams(1))
        ));
    }

    #[test]
    fn when_the_header_declares_a_zero_dimension_decoding_fails() {
        assert!(matches!(
            decode("x = 0, y = 3\n!\n", true),
            Err(Error::Dimensions(0, 3))
        ));
    }

    #[test]
    fn when_pattern_data_appears_before_the_header_decoding_fails() {
        assert!(matches!(
            decode("bo$2bo$3o!\nx = 3, y = 3\n", true),
            Err(Error::MissingHeader)
        ));
    }

    #[test]
    fn when_the_input_holds_no_header_at_all_decoding_fails() {
        assert!(matches!(
            decode("#C just a comment\n", true),
            Err(Error::MissingHeader)
        ));
    }

    #[test]
    fn when_the_pattern_is_never_terminated_decoding_fails() {
        assert!(matches!(
            decode("x = 2, y = 2\nbo$oo\n", true),
            Err(Error::Unterminated)
        ));
    }

    #[test]
    fn when_a_tag_is_unknown_decoding_fails() {
        assert!(matches!(
            decode("x = 2, y = 2\nbz!\n", true),
            Err(Error::Tag('z'))
        ));
    }

    #[test]
    fn when_a_run_count_has_no_tag_decoding_fails() {
        assert!(matches!(
            decode("x = 2, y = 2\noo$3!\n", true),
            Err(Error::DanglingRunCount)
        ));
    }

    #[test]
    fn when_a_row_encodes_more_cells_than_the_width_decoding_fails() {
        assert!(matches!(
            decode("x = 2, y = 2\n5o!\n", true),
            Err(Error::RowOverflow {
                row: 0,
                cells: 5,
                width: 2,
            })
        ));
    }

    #[test]
    fn when_the_pattern_encodes_more_rows_than_the_height_decoding_fails() {
        assert!(matches!(
            decode("x = 2, y = 2\no$o$o!\n", true),
            Err(Error::RowCount(3, 2))
        ));
    }

    #[test]
    fn when_rows_and_cells_are_left_unspecified_they_default_to_dead() {
        let pattern = decode("x = 4, y = 3\n2o!\n", false).unwrap();

        assert_eq!(
            rows(pattern.grid()),
            vec![
                vec![true, true, false, false],
                vec![false, false, false, false],
                vec![false, false, false, false],
            ]
        );
    }

    #[test]
    fn when_the_pattern_spans_multiple_lines_they_are_concatenated() {
        let src = "x = 3, y = 3\nbo$2b\no$3o\n!\n";
        let pattern = decode(src, true).unwrap();

        assert_eq!(rows(pattern.grid()), rows(decode(GLIDER, true).unwrap().grid()));
    }

    #[test]
    fn when_comment_lines_are_present_they_accumulate_in_file_order() {
        let src = "#N Glider\n#C by Richard K. Guy\nx = 3, y = 3\nbo$2bo$3o!\n";
        let pattern = decode(src, true).unwrap();

        assert_eq!(pattern.comment(), "Glider\nby Richard K. Guy\n");
    }

    #[test]
    fn when_a_line_exceeds_the_length_limit_it_is_skipped() {
        let long_comment = format!("#C {}", "x".repeat(MAX_LINE_LEN));
        let src = format!("{}\nx = 3, y = 3\nbo$2bo$3o!\n", long_comment);
        let pattern = decode(&src, true).unwrap();

        assert_eq!(pattern.comment(), "");
        assert_eq!(rows(pattern.grid()), rows(decode(GLIDER, true).unwrap().grid()));
    }

    #[test]
    fn when_text_follows_the_terminator_it_is_ignored() {
        let src = "x = 1, y = 1\no!garbage\n#C trailing note\n";
        let pattern = decode(src, true).unwrap();

        assert!(pattern.grid().alive(0, 0));
        assert_eq!(pattern.comment(), "trailing note\n");
    }
}
