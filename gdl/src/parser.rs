use thiserror::Error;

use super::term::{Symbol, Term};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected a term but the input was empty")]
    Empty,
    #[error("unexpected end of input, {0} list(s) left open")]
    UnexpectedEnd(usize),
    #[error("unexpected ')' at offset {0}")]
    UnexpectedClose(usize),
    #[error("list at offset {0} has no root symbol")]
    MissingRoot(usize),
    #[error("unexpected trailing input at offset {0}")]
    TrailingInput(usize),
    #[error("{text} has no term at position {position}")]
    PositionNotFound { text: String, position: usize },
}

/// Turns the textual form of a game fact or move into a structured term.
pub trait TermParser {
    fn parse(&self, text: &str) -> Result<Term, ParseError>;
}

/// Parses the term found at `position` of `text`.
///
/// `(true (cell 1 1 b))` at position 1 is `(cell 1 1 b)`, `(does white noop)` at position 2 is
/// the atom `noop`.
pub fn symbolize<P: TermParser + ?Sized>(
    parser: &P,
    text: &str,
    position: usize,
) -> Result<Term, ParseError> {
    let term = parser.parse(text)?;

    if position == 0 {
        return Ok(Term::atom(term.root().clone()));
    }

    term.sub_term(position)
        .cloned()
        .ok_or_else(|| ParseError::PositionNotFound {
            text: text.to_string(),
            position,
        })
}

/// Parser for the KIF style S-expressions used by game descriptions. Comments start with `;`
/// and run to the end of the line.
#[derive(Default, Clone, Copy, Debug)]
pub struct SExprParser {}

impl SExprParser {
    pub fn new() -> Self {
        Self {}
    }
}

impl TermParser for SExprParser {
    fn parse(&self, text: &str) -> Result<Term, ParseError> {
        let tokens = tokenize(text);
        let mut tokens = tokens.iter();

        let term = match tokens.next() {
            Some(token) => parse_term(*token, &mut tokens)?,
            None => return Err(ParseError::Empty),
        };

        match tokens.next() {
            Some(token) => Err(ParseError::TrailingInput(token.offset())),
            None => Ok(term),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token<'a> {
    Open(usize),
    Close(usize),
    Atom(usize, &'a str),
}

impl Token<'_> {
    fn offset(&self) -> usize {
        match self {
            Token::Open(offset) | Token::Close(offset) | Token::Atom(offset, _) => *offset,
        }
    }
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    let mut in_comment = false;

    for (i, c) in text.char_indices() {
        if in_comment {
            in_comment = c != '\n';
            continue;
        }

        let is_delimiter = c.is_whitespace() || c == '(' || c == ')' || c == ';';
        if !is_delimiter {
            start.get_or_insert(i);
            continue;
        }

        if let Some(s) = start.take() {
            tokens.push(Token::Atom(s, &text[s..i]));
        }

        match c {
            '(' => tokens.push(Token::Open(i)),
            ')' => tokens.push(Token::Close(i)),
            ';' => in_comment = true,
            _ => {}
        }
    }

    if let Some(s) = start {
        tokens.push(Token::Atom(s, &text[s..]));
    }

    tokens
}

fn parse_term<'a, 'b, I>(token: Token<'a>, tokens: &mut I) -> Result<Term, ParseError>
where
    'a: 'b,
    I: Iterator<Item = &'b Token<'a>>,
{
    match token {
        Token::Atom(_, name) => Ok(Term::atom(name)),
        Token::Close(offset) => Err(ParseError::UnexpectedClose(offset)),
        Token::Open(offset) => {
            let root = match tokens.next() {
                Some(Token::Atom(_, name)) => Symbol::new(name),
                Some(_) => return Err(ParseError::MissingRoot(offset)),
                None => return Err(ParseError::UnexpectedEnd(1)),
            };

            let mut args = Vec::new();
            loop {
                match tokens.next() {
                    Some(Token::Close(_)) => return Ok(Term::new(root, args)),
                    Some(token) => args.push(parse_term(*token, tokens).map_err(nest)?),
                    None => return Err(ParseError::UnexpectedEnd(1)),
                }
            }
        }
    }
}

fn nest(err: ParseError) -> ParseError {
    match err {
        ParseError::UnexpectedEnd(depth) => ParseError::UnexpectedEnd(depth + 1),
        err => err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Term, ParseError> {
        SExprParser::new().parse(text)
    }

    #[test]
    fn test_parse_atom() {
        assert_eq!(parse("noop").unwrap(), Term::atom("noop"));
    }

    #[test]
    fn test_parse_nested() {
        let term = parse("(true (cell 1 2 b))").unwrap();
        let expected = Term::new(
            "true",
            vec![Term::new(
                "cell",
                vec![Term::atom("1"), Term::atom("2"), Term::atom("b")],
            )],
        );

        assert_eq!(term, expected);
    }

    #[test]
    fn test_parse_ignores_whitespace_and_comments() {
        let term = parse("  ( mark\n\t1 ; the column\n 2 )  ").unwrap();

        assert_eq!(
            term,
            Term::new("mark", vec![Term::atom("1"), Term::atom("2")])
        );
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse("   "), Err(ParseError::Empty));
    }

    #[test]
    fn test_parse_unclosed() {
        assert_eq!(parse("(true (cell 1 2 b)"), Err(ParseError::UnexpectedEnd(1)));
        assert_eq!(parse("(true (cell 1 2 b"), Err(ParseError::UnexpectedEnd(2)));
    }

    #[test]
    fn test_parse_unexpected_close() {
        assert_eq!(parse(")"), Err(ParseError::UnexpectedClose(0)));
    }

    #[test]
    fn test_parse_missing_root() {
        assert_eq!(parse("()"), Err(ParseError::MissingRoot(0)));
        assert_eq!(parse("((a) b)"), Err(ParseError::MissingRoot(0)));
    }

    #[test]
    fn test_parse_trailing_input() {
        assert_eq!(parse("(a b) c"), Err(ParseError::TrailingInput(6)));
    }

    #[test]
    fn test_symbolize_base() {
        let parser = SExprParser::new();
        let term = symbolize(&parser, "(true (cell 1 1 b))", 1).unwrap();

        assert_eq!(term.to_string(), "(cell 1 1 b)");
    }

    #[test]
    fn test_symbolize_atom_action() {
        let parser = SExprParser::new();
        let term = symbolize(&parser, "(does white noop)", 2).unwrap();

        assert_eq!(term, Term::atom("noop"));
        assert!(term.is_atom());
    }

    #[test]
    fn test_symbolize_root() {
        let parser = SExprParser::new();

        assert_eq!(
            symbolize(&parser, "(does white noop)", 0).unwrap(),
            Term::atom("does")
        );
    }

    #[test]
    fn test_symbolize_missing_position() {
        let parser = SExprParser::new();

        assert_eq!(
            symbolize(&parser, "(true (control white))", 2),
            Err(ParseError::PositionNotFound {
                text: "(true (control white))".to_string(),
                position: 2
            })
        );
    }
}
