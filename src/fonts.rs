//! Text measurement for the builtin Helvetica face.
//!
//! Builtin PDF fonts carry no metrics we can query, so widths are estimated
//! from a few glyph classes. The estimate only has to be good enough to keep
//! wrapped lines inside their column.

/// Estimated advance of one character in em units.
fn char_advance(ch: char) -> f32 {
    match ch {
        ' ' | 'i' | 'j' | 'l' | 'I' | '.' | ',' | ':' | ';' | '!' | '|' | '\'' => 0.28,
        'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '-' | '/' => 0.33,
        'm' | 'w' | 'M' | 'W' | '@' => 0.83,
        c if c.is_ascii_uppercase() || c.is_ascii_digit() => 0.62,
        c if c.is_ascii() => 0.5,
        // Glyphs outside WinAnsi come out as a single replacement character.
        _ => 0.56,
    }
}

/// Width of `text` in points at `font_size`.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_advance).sum::<f32>() * font_size
}

/// Word-wrap text to fit within `max_width` points. Returns a vec of lines.
///
/// Existing newlines start new lines; blank lines are kept so paragraph
/// spacing survives. Spacing inside a line is kept as written (tabs become
/// four spaces); only the whitespace at a wrap point and at the end of a
/// line is dropped. Words wider than the column (long URLs) are broken
/// between characters.
pub fn wrap_text(text: &str, font_size: f32, max_width: f32) -> Vec<String> {
    if max_width <= 0.0 || text.is_empty() {
        return vec![text.to_string()];
    }

    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.lines() {
        let paragraph = paragraph.replace('\t', "    ");
        let words = words_with_gaps(&paragraph);
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        let mut wrapped = false;
        for (gap, word) in words {
            let gap = if wrapped && current_line.is_empty() {
                ""
            } else {
                gap
            };
            let candidate = format!("{current_line}{gap}{word}");
            if text_width(&candidate, font_size) <= max_width {
                current_line = candidate;
                continue;
            }
            if !current_line.is_empty() {
                lines.push(std::mem::take(&mut current_line));
            }
            wrapped = true;
            if text_width(word, font_size) <= max_width {
                current_line = word.to_string();
            } else {
                let mut pieces = break_word(word, font_size, max_width);
                current_line = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Split a line into `(leading whitespace, word)` pairs. Trailing whitespace
/// is dropped.
fn words_with_gaps(line: &str) -> Vec<(&str, &str)> {
    let mut words = Vec::new();
    let mut rest = line;
    while !rest.is_empty() {
        let word_start = rest
            .find(|c: char| !c.is_whitespace())
            .unwrap_or(rest.len());
        let (gap, tail) = rest.split_at(word_start);
        let word_end = tail.find(char::is_whitespace).unwrap_or(tail.len());
        let (word, next) = tail.split_at(word_end);
        if word.is_empty() {
            break;
        }
        words.push((gap, word));
        rest = next;
    }
    words
}

fn break_word(word: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0f32;
    for ch in word.chars() {
        let advance = char_advance(ch) * font_size;
        if width + advance > max_width && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(ch);
        width += advance;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
