//! Recursive-descent DBML parser.
//!
//! Covers `Project`, `Table` (alias, header settings, notes, column settings,
//! `indexes`), `Enum`, `Ref` (short and long form), `TableGroup` and sticky
//! `Note` blocks. Keywords are matched case-insensitively.

mod lexer;

use std::io::Read;

pub use lexer::{Token, TokenKind, tokenize};

use crate::error::{Error, Result};
use crate::schema::{
    Column, ColumnSettings, DbmlDocument, DefaultValue, Enum, EnumValue, Index, IndexPart,
    InlineRef, Project, Ref, RefEndpoint, Relation, Table, TableGroup,
};

/// Parse a DBML document from text.
pub fn parse_dbml(input: &str) -> Result<DbmlDocument> {
    let tokens = tokenize(input)?;
    Parser::new(tokens).document()
}

/// Read a DBML document from any reader and parse it.
pub fn parse_dbml_reader<R: Read>(mut reader: R) -> Result<DbmlDocument> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_dbml(&input)
}

/// One `key[: value]` entry of a `[...]` settings list.
#[derive(Debug, Clone)]
struct Setting {
    key: String,
    value: Option<SettingValue>,
    line: usize,
    column: usize,
}

#[derive(Debug, Clone)]
enum SettingValue {
    Str(String),
    Number(String),
    Expr(String),
    /// Bare words (`no action`, `true`, `hash`), quoted names and colors.
    Word(String),
    Ref(Relation, RefEndpoint),
}

impl SettingValue {
    fn into_text(self) -> String {
        match self {
            SettingValue::Str(value)
            | SettingValue::Number(value)
            | SettingValue::Expr(value)
            | SettingValue::Word(value) => value,
            SettingValue::Ref(relation, endpoint) => {
                format!("{} {}", relation.symbol(), endpoint_text(&endpoint))
            }
        }
    }
}

fn endpoint_text(endpoint: &RefEndpoint) -> String {
    let mut text = String::new();
    if let Some(schema) = &endpoint.schema {
        text.push_str(schema);
        text.push('.');
    }
    text.push_str(&endpoint.table);
    text.push('.');
    if endpoint.columns.len() == 1 {
        text.push_str(&endpoint.columns[0]);
    } else {
        text.push('(');
        text.push_str(&endpoint.columns.join(", "));
        text.push(')');
    }
    text
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.pos.min(last)]
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    fn peek_kind_at(&self, offset: usize) -> &TokenKind {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[(self.pos + offset).min(last)].kind
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn skip_newlines(&mut self) {
        while matches!(self.peek_kind(), TokenKind::Newline) {
            self.advance();
        }
    }

    fn error_here(&self, message: impl Into<String>) -> Error {
        let token = self.peek();
        Error::parse(token.line, token.column, message)
    }

    fn unexpected(&self, expected: &str) -> Error {
        self.error_here(format!(
            "expected {expected}, found {}",
            self.peek_kind().describe()
        ))
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token> {
        if *self.peek_kind() == kind {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        matches!(self.peek_kind(), TokenKind::Ident(value) if value.eq_ignore_ascii_case(keyword))
    }

    fn name(&mut self) -> Result<String> {
        match self.peek_kind().clone() {
            TokenKind::Ident(value) | TokenKind::QuotedIdent(value) => {
                self.advance();
                Ok(value)
            }
            _ => Err(self.unexpected("a name")),
        }
    }

    /// `name` or `schema.name`.
    fn qualified_name(&mut self) -> Result<(Option<String>, String)> {
        let first = self.name()?;
        if matches!(self.peek_kind(), TokenKind::Dot) {
            self.advance();
            let second = self.name()?;
            Ok((Some(first), second))
        } else {
            Ok((None, first))
        }
    }

    fn string(&mut self) -> Result<String> {
        match self.peek_kind().clone() {
            TokenKind::Str(value) => {
                self.advance();
                Ok(value)
            }
            _ => Err(self.unexpected("a string")),
        }
    }

    fn document(mut self) -> Result<DbmlDocument> {
        let mut document = DbmlDocument::default();

        loop {
            self.skip_newlines();
            if matches!(self.peek_kind(), TokenKind::Eof) {
                break;
            }

            if self.at_keyword("project") {
                if document.project.is_some() {
                    return Err(self.error_here("duplicate Project definition"));
                }
                document.project = Some(self.project()?);
            } else if self.at_keyword("table") {
                let table = self.table()?;
                document.tables.push(table);
            } else if self.at_keyword("enum") {
                let item = self.enum_def()?;
                document.enums.push(item);
            } else if self.at_keyword("ref") {
                let reference = self.ref_def()?;
                document.refs.push(reference);
            } else if self.at_keyword("tablegroup") {
                let group = self.table_group()?;
                document.table_groups.push(group);
            } else if self.at_keyword("note") {
                self.sticky_note()?;
            } else {
                return Err(self.unexpected("Project, Table, Enum, Ref, TableGroup or Note"));
            }
        }

        Ok(document)
    }

    fn project(&mut self) -> Result<Project> {
        self.advance();
        let mut project = Project::default();
        if !matches!(self.peek_kind(), TokenKind::LBrace) {
            project.name = Some(self.name()?);
        }
        self.expect(TokenKind::LBrace, "`{` after Project")?;

        loop {
            self.skip_newlines();
            if matches!(self.peek_kind(), TokenKind::RBrace) {
                self.advance();
                break;
            }
            if self.at_keyword("note") {
                project.note = Some(self.note_body()?);
                continue;
            }

            let key = self.name()?;
            self.expect(TokenKind::Colon, "`:` after project setting")?;
            let value = match self.peek_kind().clone() {
                TokenKind::Str(value)
                | TokenKind::Ident(value)
                | TokenKind::QuotedIdent(value)
                | TokenKind::Number(value) => {
                    self.advance();
                    value
                }
                _ => return Err(self.unexpected("a project setting value")),
            };
            if key.eq_ignore_ascii_case("database_type") {
                project.database_type = Some(value);
            } else {
                project.settings.insert(key, value);
            }
        }

        Ok(project)
    }

    /// `Note: '...'` or `Note { '...' }`, positioned at the `Note` keyword.
    fn note_body(&mut self) -> Result<String> {
        self.advance();
        match self.peek_kind() {
            TokenKind::Colon => {
                self.advance();
                self.string()
            }
            TokenKind::LBrace => {
                self.advance();
                self.skip_newlines();
                let value = self.string()?;
                self.skip_newlines();
                self.expect(TokenKind::RBrace, "`}` after note")?;
                Ok(value)
            }
            _ => Err(self.unexpected("`:` or `{` after Note")),
        }
    }

    /// Top-level `Note name { '...' }`; parsed for syntax and discarded.
    fn sticky_note(&mut self) -> Result<()> {
        self.advance();
        self.name()?;
        self.expect(TokenKind::LBrace, "`{` after note name")?;
        self.skip_newlines();
        self.string()?;
        self.skip_newlines();
        self.expect(TokenKind::RBrace, "`}` after note")?;
        Ok(())
    }

    fn table(&mut self) -> Result<Table> {
        self.advance();
        let (schema, name) = self.qualified_name()?;
        let mut table = Table {
            schema,
            name,
            ..Table::default()
        };

        if self.at_keyword("as") {
            self.advance();
            table.alias = Some(self.name()?);
        }

        if matches!(self.peek_kind(), TokenKind::LBracket) {
            for setting in self.settings()? {
                let key = setting.key;
                let value = setting.value.map(SettingValue::into_text).unwrap_or_default();
                if key == "note" {
                    table.note = Some(value);
                } else {
                    table.settings.insert(key, value);
                }
            }
        }

        self.expect(TokenKind::LBrace, "`{` after table name")?;

        loop {
            self.skip_newlines();
            match self.peek_kind() {
                TokenKind::RBrace => {
                    self.advance();
                    break;
                }
                TokenKind::Eof => {
                    return Err(self.error_here(format!("unterminated table `{}`", table.name)));
                }
                _ => {}
            }

            let next = self.peek_kind_at(1).clone();
            if self.at_keyword("note") && matches!(next, TokenKind::Colon | TokenKind::LBrace) {
                table.note = Some(self.note_body()?);
            } else if self.at_keyword("indexes") && matches!(next, TokenKind::LBrace) {
                let indexes = self.indexes()?;
                table.indexes.extend(indexes);
            } else {
                let column = self.column()?;
                table.columns.push(column);
            }
        }

        Ok(table)
    }

    fn column(&mut self) -> Result<Column> {
        let name = self.name()?;
        let column_type = self.column_type()?;
        let mut settings = ColumnSettings::default();

        if matches!(self.peek_kind(), TokenKind::LBracket) {
            for setting in self.settings()? {
                apply_column_setting(&mut settings, setting)?;
            }
        }

        match self.peek_kind() {
            TokenKind::Newline | TokenKind::RBrace | TokenKind::Eof => {}
            _ => return Err(self.unexpected("end of column definition")),
        }

        Ok(Column {
            name,
            column_type,
            settings,
        })
    }

    /// Type token with optional schema, size arguments and array suffix,
    /// rebuilt without whitespace: `decimal(10,2)`, `int[]`.
    fn column_type(&mut self) -> Result<String> {
        let mut text = match self.peek_kind().clone() {
            TokenKind::Ident(value) | TokenKind::QuotedIdent(value) => {
                self.advance();
                value
            }
            _ => return Err(self.unexpected("a column type")),
        };

        if matches!(self.peek_kind(), TokenKind::Dot) {
            self.advance();
            text.push('.');
            text.push_str(&self.name()?);
        }

        if matches!(self.peek_kind(), TokenKind::LParen) {
            self.advance();
            let mut args = Vec::new();
            loop {
                match self.peek_kind().clone() {
                    TokenKind::RParen => {
                        self.advance();
                        break;
                    }
                    TokenKind::Comma | TokenKind::Newline => {
                        self.advance();
                    }
                    TokenKind::Number(value)
                    | TokenKind::Ident(value)
                    | TokenKind::QuotedIdent(value) => {
                        self.advance();
                        args.push(value);
                    }
                    TokenKind::Str(value) => {
                        self.advance();
                        args.push(format!("'{value}'"));
                    }
                    _ => return Err(self.unexpected("a type argument or `)`")),
                }
            }
            text.push('(');
            text.push_str(&args.join(","));
            text.push(')');
        }

        while matches!(self.peek_kind(), TokenKind::LBracket)
            && matches!(self.peek_kind_at(1), TokenKind::RBracket)
        {
            self.advance();
            self.advance();
            text.push_str("[]");
        }

        Ok(text)
    }

    /// `[key, key: value, ...]`. Keys are lowercased; multi-word keys such
    /// as `primary key` and `not null` are joined by a single space.
    fn settings(&mut self) -> Result<Vec<Setting>> {
        self.expect(TokenKind::LBracket, "`[`")?;
        let mut settings = Vec::new();

        loop {
            self.skip_newlines();
            if matches!(self.peek_kind(), TokenKind::RBracket) {
                self.advance();
                break;
            }

            let start = self.peek().clone();
            let mut words = Vec::new();
            while let TokenKind::Ident(word) = self.peek_kind().clone() {
                self.advance();
                words.push(word.to_ascii_lowercase());
            }
            if words.is_empty() {
                return Err(self.unexpected("a setting name"));
            }

            let value = if matches!(self.peek_kind(), TokenKind::Colon) {
                self.advance();
                Some(self.setting_value()?)
            } else {
                None
            };

            settings.push(Setting {
                key: words.join(" "),
                value,
                line: start.line,
                column: start.column,
            });

            self.skip_newlines();
            match self.peek_kind() {
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::RBracket => {}
                _ => return Err(self.unexpected("`,` or `]`")),
            }
        }

        Ok(settings)
    }

    fn setting_value(&mut self) -> Result<SettingValue> {
        if let Some(relation) = self.relation() {
            let endpoint = self.endpoint()?;
            return Ok(SettingValue::Ref(relation, endpoint));
        }

        match self.peek_kind().clone() {
            TokenKind::Str(value) => {
                self.advance();
                Ok(SettingValue::Str(value))
            }
            TokenKind::Number(value) => {
                self.advance();
                Ok(SettingValue::Number(value))
            }
            TokenKind::Expr(value) => {
                self.advance();
                Ok(SettingValue::Expr(value))
            }
            TokenKind::Color(value) | TokenKind::QuotedIdent(value) => {
                self.advance();
                Ok(SettingValue::Word(value))
            }
            TokenKind::Ident(_) => {
                let mut words = Vec::new();
                while let TokenKind::Ident(word) = self.peek_kind().clone() {
                    self.advance();
                    words.push(word);
                }
                Ok(SettingValue::Word(words.join(" ")))
            }
            _ => Err(self.unexpected("a setting value")),
        }
    }

    fn relation(&mut self) -> Option<Relation> {
        let relation = match self.peek_kind() {
            TokenKind::Gt => Relation::ManyToOne,
            TokenKind::Lt => Relation::OneToMany,
            TokenKind::Minus => Relation::OneToOne,
            TokenKind::LtGt => Relation::ManyToMany,
            _ => return None,
        };
        self.advance();
        Some(relation)
    }

    /// `table.column`, `schema.table.column` or `table.(a, b)`.
    fn endpoint(&mut self) -> Result<RefEndpoint> {
        let mut path = vec![self.name()?];
        let mut columns = None;

        while matches!(self.peek_kind(), TokenKind::Dot) {
            self.advance();
            if matches!(self.peek_kind(), TokenKind::LParen) {
                self.advance();
                let mut list = Vec::new();
                loop {
                    match self.peek_kind() {
                        TokenKind::RParen => {
                            self.advance();
                            break;
                        }
                        TokenKind::Comma => {
                            self.advance();
                        }
                        _ => list.push(self.name()?),
                    }
                }
                columns = Some(list);
                break;
            }
            path.push(self.name()?);
        }

        let columns = match columns {
            Some(list) => list,
            None if path.len() >= 2 => path.pop().into_iter().collect(),
            None => return Err(self.error_here("reference must name `table.column`")),
        };

        match path.len() {
            1 => Ok(RefEndpoint {
                schema: None,
                table: path.remove(0),
                columns,
            }),
            2 => {
                let table = path.remove(1);
                Ok(RefEndpoint {
                    schema: Some(path.remove(0)),
                    table,
                    columns,
                })
            }
            _ => Err(self.error_here("reference path has too many segments")),
        }
    }

    fn indexes(&mut self) -> Result<Vec<Index>> {
        self.advance();
        self.expect(TokenKind::LBrace, "`{` after indexes")?;
        let mut indexes = Vec::new();

        loop {
            self.skip_newlines();
            let mut index = Index::default();
            match self.peek_kind().clone() {
                TokenKind::RBrace => {
                    self.advance();
                    break;
                }
                TokenKind::LParen => {
                    self.advance();
                    loop {
                        match self.peek_kind().clone() {
                            TokenKind::RParen => {
                                self.advance();
                                break;
                            }
                            TokenKind::Comma => {
                                self.advance();
                            }
                            TokenKind::Expr(value) => {
                                self.advance();
                                index.columns.push(IndexPart::Expression(value));
                            }
                            _ => index.columns.push(IndexPart::Column(self.name()?)),
                        }
                    }
                }
                TokenKind::Expr(value) => {
                    self.advance();
                    index.columns.push(IndexPart::Expression(value));
                }
                TokenKind::Ident(_) | TokenKind::QuotedIdent(_) => {
                    index.columns.push(IndexPart::Column(self.name()?));
                }
                _ => return Err(self.unexpected("an index definition")),
            }

            if matches!(self.peek_kind(), TokenKind::LBracket) {
                for setting in self.settings()? {
                    match setting.key.as_str() {
                        "pk" | "primary key" => index.pk = true,
                        "unique" => index.unique = true,
                        "name" => index.name = setting.value.map(SettingValue::into_text),
                        "type" => index.index_type = setting.value.map(SettingValue::into_text),
                        "note" => index.note = setting.value.map(SettingValue::into_text),
                        _ => {}
                    }
                }
            }

            indexes.push(index);
        }

        Ok(indexes)
    }

    fn enum_def(&mut self) -> Result<Enum> {
        self.advance();
        let (schema, name) = self.qualified_name()?;
        self.expect(TokenKind::LBrace, "`{` after enum name")?;
        let mut values = Vec::new();

        loop {
            self.skip_newlines();
            match self.peek_kind() {
                TokenKind::RBrace => {
                    self.advance();
                    break;
                }
                TokenKind::Eof => {
                    return Err(self.error_here(format!("unterminated enum `{name}`")));
                }
                _ => {}
            }

            let mut value = EnumValue {
                name: self.name()?,
                note: None,
            };
            if matches!(self.peek_kind(), TokenKind::LBracket) {
                for setting in self.settings()? {
                    if setting.key == "note" {
                        value.note = setting.value.map(SettingValue::into_text);
                    }
                }
            }
            values.push(value);
        }

        Ok(Enum {
            schema,
            name,
            values,
        })
    }

    fn ref_def(&mut self) -> Result<Ref> {
        self.advance();
        let name = match self.peek_kind() {
            TokenKind::Colon | TokenKind::LBrace => None,
            _ => Some(self.name()?),
        };

        match self.peek_kind() {
            TokenKind::Colon => {
                self.advance();
                self.ref_body(name)
            }
            TokenKind::LBrace => {
                self.advance();
                self.skip_newlines();
                let reference = self.ref_body(name)?;
                self.skip_newlines();
                self.expect(TokenKind::RBrace, "`}` after reference")?;
                Ok(reference)
            }
            _ => Err(self.unexpected("`:` or `{` after Ref")),
        }
    }

    fn ref_body(&mut self, name: Option<String>) -> Result<Ref> {
        let from = self.endpoint()?;
        let relation = self
            .relation()
            .ok_or_else(|| self.unexpected("a relation (`<`, `>`, `-`, `<>`)"))?;
        let to = self.endpoint()?;

        let mut reference = Ref {
            name,
            from,
            to,
            relation,
            on_delete: None,
            on_update: None,
        };

        if matches!(self.peek_kind(), TokenKind::LBracket) {
            for setting in self.settings()? {
                match setting.key.as_str() {
                    "delete" => reference.on_delete = setting.value.map(SettingValue::into_text),
                    "update" => reference.on_update = setting.value.map(SettingValue::into_text),
                    _ => {}
                }
            }
        }

        Ok(reference)
    }

    fn table_group(&mut self) -> Result<TableGroup> {
        self.advance();
        let name = self.name()?;
        self.expect(TokenKind::LBrace, "`{` after table group name")?;
        let mut tables = Vec::new();

        loop {
            self.skip_newlines();
            match self.peek_kind() {
                TokenKind::RBrace => {
                    self.advance();
                    break;
                }
                TokenKind::Eof => {
                    return Err(self.error_here(format!("unterminated table group `{name}`")));
                }
                _ => {}
            }
            let (schema, table) = self.qualified_name()?;
            tables.push(match schema {
                Some(schema) => format!("{schema}.{table}"),
                None => table,
            });
        }

        Ok(TableGroup { name, tables })
    }
}

fn apply_column_setting(settings: &mut ColumnSettings, setting: Setting) -> Result<()> {
    let Setting {
        key,
        value,
        line,
        column,
    } = setting;

    match (key.as_str(), value) {
        ("pk" | "primary key", None) => settings.pk = true,
        ("null", None) => settings.null = true,
        ("not null", None) => settings.null = false,
        ("unique", None) => settings.unique = true,
        ("increment", None) => settings.increment = true,
        ("note", Some(value)) => settings.note = Some(value.into_text()),
        ("default", Some(value)) => {
            settings.default = Some(match value {
                SettingValue::Str(text) => DefaultValue::String(text),
                SettingValue::Number(text) => DefaultValue::Number(text),
                SettingValue::Expr(text) => DefaultValue::Expression(text),
                SettingValue::Word(word) => match word.to_ascii_lowercase().as_str() {
                    "true" => DefaultValue::Boolean(true),
                    "false" => DefaultValue::Boolean(false),
                    "null" => DefaultValue::Null,
                    _ => DefaultValue::Expression(word),
                },
                SettingValue::Ref(..) => {
                    return Err(Error::parse(line, column, "default cannot be a reference"));
                }
            });
        }
        ("ref", Some(SettingValue::Ref(relation, target))) => {
            settings.refs.push(InlineRef { relation, target });
        }
        ("ref", _) => {
            return Err(Error::parse(
                line,
                column,
                "ref setting must be `ref: <relation> table.column`",
            ));
        }
        ("note" | "default", None) => {
            return Err(Error::parse(
                line,
                column,
                format!("setting `{key}` requires a value"),
            ));
        }
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_table_with_alias_and_settings() {
        let document = parse_dbml(
            "Table order_item as OI [headercolor: #3498DB] {\n  id bigint [pk, increment]\n  name varchar(255) [not null, note: 'display name']\n}\n",
        )
        .expect("parse");

        let table = &document.tables[0];
        assert_eq!(table.name, "order_item");
        assert_eq!(table.alias.as_deref(), Some("OI"));
        assert_eq!(
            table.settings.get("headercolor").map(String::as_str),
            Some("#3498DB")
        );
        assert_eq!(table.columns.len(), 2);
        assert!(table.columns[0].settings.pk);
        assert!(table.columns[0].settings.increment);
        assert_eq!(table.columns[1].column_type, "varchar(255)");
        assert_eq!(table.columns[1].settings.note.as_deref(), Some("display name"));
    }

    #[test]
    fn parses_default_values() {
        let document = parse_dbml(
            "Table t {\n  a int [default: 1]\n  b varchar [default: 'x']\n  c timestamp [default: `now()`]\n  d bool [default: false]\n  e text [null, default: null]\n}",
        )
        .expect("parse");
        let columns = &document.tables[0].columns;
        assert_eq!(
            columns[0].settings.default,
            Some(DefaultValue::Number("1".to_string()))
        );
        assert_eq!(
            columns[1].settings.default,
            Some(DefaultValue::String("x".to_string()))
        );
        assert_eq!(
            columns[2].settings.default,
            Some(DefaultValue::Expression("now()".to_string()))
        );
        assert_eq!(columns[3].settings.default, Some(DefaultValue::Boolean(false)));
        assert_eq!(columns[4].settings.default, Some(DefaultValue::Null));
        assert!(columns[4].settings.null);
    }

    #[test]
    fn column_named_like_keyword_is_a_column() {
        let document = parse_dbml("Table t {\n  note text\n  indexes int\n}").expect("parse");
        let names: Vec<&str> = document.tables[0]
            .columns
            .iter()
            .map(|column| column.name.as_str())
            .collect();
        assert_eq!(names, vec!["note", "indexes"]);
    }

    #[test]
    fn parses_inline_and_composite_refs() {
        let document = parse_dbml(
            "Table posts {\n  user_id int [ref: > users.id]\n}\nRef fk_pair: a.(x, y) - core.b.(x, y) [delete: cascade]\n",
        )
        .expect("parse");

        let inline = &document.tables[0].columns[0].settings.refs[0];
        assert_eq!(inline.relation, Relation::ManyToOne);
        assert_eq!(inline.target.table, "users");
        assert_eq!(inline.target.columns, vec!["id".to_string()]);

        let reference = &document.refs[0];
        assert_eq!(reference.name.as_deref(), Some("fk_pair"));
        assert_eq!(reference.relation, Relation::OneToOne);
        assert_eq!(reference.to.schema.as_deref(), Some("core"));
        assert_eq!(reference.to.columns.len(), 2);
        assert_eq!(reference.on_delete.as_deref(), Some("cascade"));
    }

    #[test]
    fn rejects_garbage_after_column() {
        let err = parse_dbml("Table t {\n  id int int\n}").expect_err("must fail");
        match err {
            Error::Parse { line, column, .. } => assert_eq!((line, column), (2, 10)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_top_level_item() {
        assert!(parse_dbml("View v {}").is_err());
    }
}
