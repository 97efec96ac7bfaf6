use crate::error::{Error, Result};

/// Lexical token kinds produced from DBML text.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    /// `"double quoted"` name.
    QuotedIdent(String),
    /// `'single'` or `'''triple'''` quoted string.
    Str(String),
    Number(String),
    /// `` `backtick` `` expression.
    Expr(String),
    /// `#rrggbb` color literal.
    Color(String),
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Colon,
    Comma,
    Dot,
    Lt,
    Gt,
    Minus,
    LtGt,
    Newline,
    Eof,
}

impl TokenKind {
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Ident(value) => format!("identifier `{value}`"),
            TokenKind::QuotedIdent(value) => format!("quoted name \"{value}\""),
            TokenKind::Str(_) => "string".to_string(),
            TokenKind::Number(value) => format!("number `{value}`"),
            TokenKind::Expr(_) => "expression".to_string(),
            TokenKind::Color(value) => format!("color `{value}`"),
            TokenKind::LBrace => "`{`".to_string(),
            TokenKind::RBrace => "`}`".to_string(),
            TokenKind::LBracket => "`[`".to_string(),
            TokenKind::RBracket => "`]`".to_string(),
            TokenKind::LParen => "`(`".to_string(),
            TokenKind::RParen => "`)`".to_string(),
            TokenKind::Colon => "`:`".to_string(),
            TokenKind::Comma => "`,`".to_string(),
            TokenKind::Dot => "`.`".to_string(),
            TokenKind::Lt => "`<`".to_string(),
            TokenKind::Gt => "`>`".to_string(),
            TokenKind::Minus => "`-`".to_string(),
            TokenKind::LtGt => "`<>`".to_string(),
            TokenKind::Newline => "end of line".to_string(),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

/// A token with its 1-based source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

/// Split DBML source into tokens. Comments are dropped; newlines are kept
/// because column and enum members are line-delimited.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).run()
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl Lexer {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn push(&mut self, kind: TokenKind, line: usize, column: usize) {
        self.tokens.push(Token { kind, line, column });
    }

    fn run(mut self) -> Result<Vec<Token>> {
        while let Some(ch) = self.peek() {
            let (line, column) = (self.line, self.column);
            match ch {
                ' ' | '\t' | '\r' => {
                    self.bump();
                }
                '\n' => {
                    self.bump();
                    self.push(TokenKind::Newline, line, column);
                }
                '/' if self.peek_at(1) == Some('/') => self.skip_line_comment(),
                '/' if self.peek_at(1) == Some('*') => self.skip_block_comment(line, column)?,
                '\'' => {
                    let value = if self.peek_at(1) == Some('\'') && self.peek_at(2) == Some('\'') {
                        self.read_triple_string(line, column)?
                    } else {
                        self.read_delimited('\'', line, column)?
                    };
                    self.push(TokenKind::Str(value), line, column);
                }
                '"' => {
                    let value = self.read_delimited('"', line, column)?;
                    self.push(TokenKind::QuotedIdent(value), line, column);
                }
                '`' => {
                    let value = self.read_delimited('`', line, column)?;
                    self.push(TokenKind::Expr(value), line, column);
                }
                '#' => {
                    self.bump();
                    let mut value = String::from("#");
                    value.push_str(&self.read_while(|c| c.is_ascii_alphanumeric()));
                    self.push(TokenKind::Color(value), line, column);
                }
                '-' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => {
                    self.bump();
                    let mut value = String::from("-");
                    value.push_str(&self.read_number());
                    self.push(TokenKind::Number(value), line, column);
                }
                c if c.is_ascii_digit() => {
                    let mut value = self.read_number();
                    if self.peek().is_some_and(is_ident_char) {
                        value.push_str(&self.read_while(is_ident_char));
                        self.push(TokenKind::Ident(value), line, column);
                    } else {
                        self.push(TokenKind::Number(value), line, column);
                    }
                }
                c if is_ident_start(c) => {
                    let value = self.read_while(is_ident_char);
                    self.push(TokenKind::Ident(value), line, column);
                }
                '<' if self.peek_at(1) == Some('>') => {
                    self.bump();
                    self.bump();
                    self.push(TokenKind::LtGt, line, column);
                }
                _ => {
                    let kind = match ch {
                        '{' => TokenKind::LBrace,
                        '}' => TokenKind::RBrace,
                        '[' => TokenKind::LBracket,
                        ']' => TokenKind::RBracket,
                        '(' => TokenKind::LParen,
                        ')' => TokenKind::RParen,
                        ':' => TokenKind::Colon,
                        ',' => TokenKind::Comma,
                        '.' => TokenKind::Dot,
                        '<' => TokenKind::Lt,
                        '>' => TokenKind::Gt,
                        '-' => TokenKind::Minus,
                        other => {
                            return Err(Error::parse(
                                line,
                                column,
                                format!("unexpected character `{other}`"),
                            ));
                        }
                    };
                    self.bump();
                    self.push(kind, line, column);
                }
            }
        }

        let (line, column) = (self.line, self.column);
        self.push(TokenKind::Eof, line, column);
        Ok(self.tokens)
    }

    fn read_while(&mut self, keep: impl Fn(char) -> bool) -> String {
        let mut value = String::new();
        while let Some(ch) = self.peek() {
            if !keep(ch) {
                break;
            }
            value.push(ch);
            self.bump();
        }
        value
    }

    fn read_number(&mut self) -> String {
        let mut value = self.read_while(|c| c.is_ascii_digit());
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
            value.push('.');
            value.push_str(&self.read_while(|c| c.is_ascii_digit()));
        }
        value
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn skip_block_comment(&mut self, line: usize, column: usize) -> Result<()> {
        self.bump();
        self.bump();
        loop {
            match self.bump() {
                Some('*') if self.peek() == Some('/') => {
                    self.bump();
                    return Ok(());
                }
                Some(_) => {}
                None => return Err(Error::parse(line, column, "unterminated block comment")),
            }
        }
    }

    /// Reads a single-line literal closed by `delimiter`; `\` escapes the next char.
    fn read_delimited(&mut self, delimiter: char, line: usize, column: usize) -> Result<String> {
        self.bump();
        let mut value = String::new();
        loop {
            match self.bump() {
                Some('\\') => match self.bump() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some(escaped) => value.push(escaped),
                    None => break,
                },
                Some(ch) if ch == delimiter => return Ok(value),
                Some('\n') if delimiter != '`' => break,
                Some(ch) => value.push(ch),
                None => break,
            }
        }
        Err(Error::parse(
            line,
            column,
            format!("unterminated literal starting with {delimiter}"),
        ))
    }

    fn read_triple_string(&mut self, line: usize, column: usize) -> Result<String> {
        for _ in 0..3 {
            self.bump();
        }
        let mut raw = String::new();
        loop {
            if self.peek() == Some('\'')
                && self.peek_at(1) == Some('\'')
                && self.peek_at(2) == Some('\'')
            {
                for _ in 0..3 {
                    self.bump();
                }
                return Ok(dedent(&raw));
            }
            match self.bump() {
                Some('\\') if self.peek() == Some('\'') => {
                    self.bump();
                    raw.push('\'');
                }
                Some(ch) => raw.push(ch),
                None => return Err(Error::parse(line, column, "unterminated multi-line string")),
            }
        }
    }
}

fn is_ident_start(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

fn is_ident_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

/// Strip the leading/trailing blank line and the common indentation of a
/// multi-line string.
fn dedent(raw: &str) -> String {
    let trimmed = raw.strip_prefix('\n').unwrap_or(raw);
    let trimmed = trimmed.trim_end_matches([' ', '\t']);
    let trimmed = trimmed.strip_suffix('\n').unwrap_or(trimmed);

    let indent = trimmed
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    trimmed
        .lines()
        .map(|line| line.get(indent..).unwrap_or_else(|| line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .expect("tokenize")
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn lexes_column_line_with_settings() {
        let kinds = kinds("id bigint [pk, default: -1] // trailing\n");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident("id".to_string()),
                TokenKind::Ident("bigint".to_string()),
                TokenKind::LBracket,
                TokenKind::Ident("pk".to_string()),
                TokenKind::Comma,
                TokenKind::Ident("default".to_string()),
                TokenKind::Colon,
                TokenKind::Number("-1".to_string()),
                TokenKind::RBracket,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lexes_literals() {
        let kinds = kinds(r#""full name" 'it\'s' `now()` #3498DB <>"#);
        assert_eq!(
            kinds,
            vec![
                TokenKind::QuotedIdent("full name".to_string()),
                TokenKind::Str("it's".to_string()),
                TokenKind::Expr("now()".to_string()),
                TokenKind::Color("#3498DB".to_string()),
                TokenKind::LtGt,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn dedents_triple_quoted_strings() {
        let kinds = kinds("'''\n    first\n      second\n  '''");
        assert_eq!(kinds[0], TokenKind::Str("first\n  second".to_string()));
    }

    #[test]
    fn skips_block_comments_and_tracks_lines() {
        let tokens = tokenize("/* a\nb */ Table").expect("tokenize");
        assert_eq!(tokens[0].kind, TokenKind::Ident("Table".to_string()));
        assert_eq!((tokens[0].line, tokens[0].column), (2, 6));
    }

    #[test]
    fn reports_unterminated_string_position() {
        let err = tokenize("Table t {\n  note: 'oops\n}").expect_err("must fail");
        match err {
            Error::Parse { line, column, .. } => assert_eq!((line, column), (2, 9)),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
