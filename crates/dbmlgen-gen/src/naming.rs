//! Identifier conversions between schema names and generated names.

/// Convert `snake_case` to `CamelCase`.
///
/// Underscores become token boundaries, the first character of every token
/// is uppercased and the boundaries are removed. Every other character keeps
/// its original case, so `user_ID` becomes `UserID`.
pub fn camel_name(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut out = String::with_capacity(spaced.len());
    let mut boundary = true;

    for ch in spaced.chars() {
        if ch == ' ' {
            boundary = true;
            continue;
        }
        if boundary {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        boundary = false;
    }

    out
}

/// Convert `CamelCase` to `snake_case`.
///
/// Every uppercase character except the first one is prefixed with `_`, and
/// all uppercase characters are lowercased. Runs of capitals are split one
/// letter at a time: `ID` becomes `i_d`.
pub fn underscore_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (index, ch) in name.char_indices() {
        if ch.is_uppercase() {
            if index != 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "macro",
    "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Rust field identifier for a generated field name (`UserName` -> `user_name`).
pub fn rust_field_ident(name: &str) -> String {
    let snake = underscore_name(name);
    let mut ident: String = snake
        .chars()
        .map(|ch| if ch == '_' || ch.is_alphanumeric() { ch } else { '_' })
        .collect();

    if ident.chars().all(|ch| ch == '_') {
        ident.push_str("field");
    }
    if ident.starts_with(|ch: char| ch.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if matches!(ident.as_str(), "self" | "Self" | "super" | "crate") {
        ident.push('_');
    } else if RUST_KEYWORDS.contains(&ident.as_str()) {
        ident.insert_str(0, "r#");
    }
    ident
}

/// Rust type identifier for a generated struct name. Names are kept as
/// given; only characters Rust rejects are replaced.
pub fn rust_type_ident(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|ch| if ch == '_' || ch.is_alphanumeric() { ch } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|ch: char| ch.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// `SCREAMING_CASE` constant name derived from a schema name.
pub fn constant_name(name: &str) -> String {
    name.chars()
        .map(|ch| {
            if ch.is_alphanumeric() {
                ch.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_name_capitalizes_tokens() {
        assert_eq!(camel_name("user_name"), "UserName");
        assert_eq!(camel_name("id"), "Id");
        assert_eq!(camel_name(""), "");
        assert_eq!(camel_name("order_item_id"), "OrderItemId");
    }

    #[test]
    fn camel_name_preserves_interior_case() {
        assert_eq!(camel_name("user_ID"), "UserID");
        assert_eq!(camel_name("httpURL"), "HttpURL");
    }

    #[test]
    fn camel_name_treats_spaces_as_boundaries() {
        assert_eq!(camel_name("display name"), "DisplayName");
        assert_eq!(camel_name("a__b"), "AB");
    }

    #[test]
    fn underscore_name_splits_on_capitals() {
        assert_eq!(underscore_name("UserName"), "user_name");
        assert_eq!(underscore_name("orderItem"), "order_item");
        assert_eq!(underscore_name("order_item"), "order_item");
    }

    // Acronyms are split letter by letter; callers relying on `ID` -> `id`
    // must rename the table instead.
    #[test]
    fn underscore_name_is_acronym_unaware() {
        assert_eq!(underscore_name("ID"), "i_d");
        assert_eq!(underscore_name("UserID"), "user_i_d");
    }

    #[test]
    fn underscore_name_reverses_pure_camel_case() {
        for name in ["user_name", "order_item", "id", "a_b_c"] {
            assert_eq!(underscore_name(&camel_name(name)), name);
        }
    }

    #[test]
    fn rust_field_ident_sanitizes() {
        assert_eq!(rust_field_ident("UserName"), "user_name");
        assert_eq!(rust_field_ident("Type"), "r#type");
        assert_eq!(rust_field_ident("Self"), "self_");
        assert_eq!(rust_field_ident("2fa"), "_2fa");
        assert_eq!(rust_field_ident("Price-usd"), "price_usd");
        assert_eq!(rust_field_ident(""), "field");
        assert_eq!(rust_field_ident("_"), "_field");
    }

    #[test]
    fn rust_type_ident_keeps_aliases() {
        assert_eq!(rust_type_ident("order_items"), "order_items");
        assert_eq!(rust_type_ident("Line Item"), "Line_Item");
        assert_eq!(rust_type_ident("3d"), "_3d");
    }

    #[test]
    fn constant_name_shouts() {
        assert_eq!(constant_name("order_status"), "ORDER_STATUS");
        assert_eq!(constant_name("shipped out"), "SHIPPED_OUT");
    }
}
