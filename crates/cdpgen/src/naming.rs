//! Naming policy for generated Rust identifiers.
//!
//! Every identifier the emitters produce goes through this module, so the
//! rules live in one place:
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `scriptToEvaluateOnLoad` | [`field_name`] | `script_to_evaluate_on_load` |
//! | `DOMStorage` | [`module_name`] | `dom_storage` |
//! | `reload` | [`to_pascal_case`] | `Reload` |
//! | `parser-blocking` | [`variant_name`] | `ParserBlocking` |
//! | `type` | [`escape_keyword`] | `type_` |
//!
//! Wire names are never derived from these results; the emitters keep the
//! schema name for serde and only use the converted name as the identifier.

/// Rust keywords (strict, reserved and edition-dependent) that cannot be
/// used as plain identifiers.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Label of the ordinal-0 variant of every enumerated type.
pub const NOT_SET: &str = "NotSet";

/// Convert camelCase, PascalCase or separated words to snake_case.
///
/// Acronyms stay together: `baseURL` becomes `base_url`, `URLFragment`
/// becomes `url_fragment`.
///
/// # Examples
///
/// ```
/// use cdpgen::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("executionContextId"), "execution_context_id");
/// assert_eq!(to_snake_case("backendDOMNodeId"), "backend_dom_node_id");
/// assert_eq!(to_snake_case("already_snake"), "already_snake");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            continue;
        }

        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let word_start = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
                _ => false,
            };
            if word_start && !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }

    while result.ends_with('_') {
        result.pop();
    }
    result
}

/// Convert a string to PascalCase.
///
/// Any non-alphanumeric character is a word break; the rest of each word is
/// kept as written.
///
/// # Examples
///
/// ```
/// use cdpgen::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
/// assert_eq!(to_pascal_case("hello-world"), "HelloWorld");
/// assert_eq!(to_pascal_case("getFrameTree"), "GetFrameTree");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split(|c: char| !c.is_alphanumeric())
        .map(capitalize)
        .collect()
}

/// Capitalize the first letter of a string.
///
/// # Examples
///
/// ```
/// use cdpgen::naming::capitalize;
///
/// assert_eq!(capitalize("hello"), "Hello");
/// assert_eq!(capitalize("world"), "World");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Whether `s` is a Rust keyword.
pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.contains(&s)
}

/// Whether `s` can be used as a plain identifier.
///
/// # Examples
///
/// ```
/// use cdpgen::naming::is_identifier;
///
/// assert!(is_identifier("frame_id"));
/// assert!(is_identifier("_1x"));
/// assert!(!is_identifier(""));
/// assert!(!is_identifier("_"));
/// ```
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let starts = match chars.next() {
        Some(first) => first == '_' || first.is_alphabetic(),
        None => false,
    };
    starts && s != "_" && chars.all(|c| c == '_' || c.is_alphanumeric()) && !is_keyword(s)
}

/// Append `_` to keywords and prefix `_` to names starting with a digit.
///
/// # Examples
///
/// ```
/// use cdpgen::naming::escape_keyword;
///
/// assert_eq!(escape_keyword("type".to_string()), "type_");
/// assert_eq!(escape_keyword("url".to_string()), "url");
/// ```
pub fn escape_keyword(s: String) -> String {
    if is_keyword(&s) {
        format!("{s}_")
    } else if s.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{s}")
    } else {
        s
    }
}

/// Module name of a domain package.
pub fn module_name(domain: &str) -> String {
    escape_keyword(to_snake_case(domain))
}

/// Field, argument or method name for a schema name.
pub fn field_name(name: &str) -> String {
    escape_keyword(to_snake_case(name))
}

/// Type name for a schema type id, command or event name.
pub fn type_name(name: &str) -> String {
    escape_keyword(to_pascal_case(name))
}

/// Variant name for one enumerated label.
///
/// Labels starting with a digit get a `V` prefix; an empty label is `Empty`.
pub fn variant_name(label: &str) -> String {
    let name = to_pascal_case(label);
    if name.is_empty() {
        "Empty".to_string()
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("V{name}")
    } else {
        escape_keyword(name)
    }
}

/// Variant names for an enumerated type, `NotSet` first.
///
/// A label whose name collides with an earlier variant gets its ordinal
/// appended, so the result always has `labels.len() + 1` distinct entries.
pub fn variant_names(labels: &[String]) -> Vec<String> {
    let mut names = Vec::with_capacity(labels.len() + 1);
    names.push(NOT_SET.to_string());

    for (index, label) in labels.iter().enumerate() {
        let base = variant_name(label);
        let mut name = base.clone();
        let mut suffix = index + 1;
        while names.contains(&name) {
            name = format!("{base}{suffix}");
            suffix += 1;
        }
        names.push(name);
    }

    names
}

/// Registry variant for a command or event: `Page` + `reload` = `PageReload`.
pub fn registry_variant(domain: &str, name: &str) -> String {
    format!("{}{}", to_pascal_case(domain), to_pascal_case(name))
}

/// Wire name of a command or event: `<domain>.<name>`.
pub fn wire_name(domain: &str, name: &str) -> String {
    format!("{domain}.{name}")
}
