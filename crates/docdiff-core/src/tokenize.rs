//! Line and word tokenizers.
//!
//! Both tokenizers are lossless: joining the lines with `'\n'`, or
//! concatenating a line's tokens in order, reproduces the input exactly.
//! Downstream equality tests and index arithmetic depend on this.

/// Split raw text into lines on `'\n'` boundaries.
///
/// Empty input yields a single empty line, and a trailing newline yields a
/// trailing empty line. Content is preserved byte-for-byte (no trimming), so
/// a `'\r'` left by CRLF input stays on its line and participates in
/// equality.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Classification of a word-level token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// A run of word characters, or a single CJK ideograph.
    Word,
    /// A run of whitespace and/or punctuation.
    Separator,
}

/// One word-level token: a slice of the line it came from, plus its kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub kind: TokenKind,
}

/// Separator characters beyond Unicode whitespace and ASCII punctuation:
/// the full-width punctuation common in CJK prose.
const CJK_PUNCTUATION: &str = "，。！？；：“”‘’（）【】《》、";

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c.is_ascii_punctuation() || CJK_PUNCTUATION.contains(c)
}

/// CJK Unified Ideographs. Unsegmented CJK prose carries no whitespace
/// between words, so each ideograph stands alone as its own token and
/// alignment works at the character level where it has to.
fn is_cjk_ideograph(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

/// Split one line into word and separator tokens.
///
/// Each maximal run of separator characters becomes one [`Separator`] token
/// and each maximal run of other characters one [`Word`] token, except that
/// CJK ideographs always tokenize individually. An empty line yields no
/// tokens.
///
/// [`Separator`]: TokenKind::Separator
/// [`Word`]: TokenKind::Word
pub fn tokenize_line(line: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut run_start = 0;
    let mut run_kind: Option<TokenKind> = None;

    for (pos, c) in line.char_indices() {
        if is_cjk_ideograph(c) {
            if let Some(kind) = run_kind.take() {
                tokens.push(Token {
                    text: &line[run_start..pos],
                    kind,
                });
            }
            let end = pos + c.len_utf8();
            tokens.push(Token {
                text: &line[pos..end],
                kind: TokenKind::Word,
            });
            run_start = end;
            continue;
        }

        let kind = if is_separator(c) {
            TokenKind::Separator
        } else {
            TokenKind::Word
        };
        match run_kind {
            Some(current) if current == kind => {}
            Some(current) => {
                tokens.push(Token {
                    text: &line[run_start..pos],
                    kind: current,
                });
                run_start = pos;
                run_kind = Some(kind);
            }
            None => {
                run_start = pos;
                run_kind = Some(kind);
            }
        }
    }
    if let Some(kind) = run_kind {
        tokens.push(Token {
            text: &line[run_start..],
            kind,
        });
    }
    tokens
}
