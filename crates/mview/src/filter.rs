//! Document filter parsing.
//!
//! Two textual forms are accepted:
//! - Extended JSON, e.g. `{"name": "a", "age": {"$gt": 30}}`
//! - a shorthand of comparisons joined by `and`/`&&`, e.g. `age > 30 and name = "a"`
//!
//! Blank input means "no filter".

use mongodb::bson::{doc, Bson, Document};

use crate::error::BrowseError;

/// A validated filter applied to the documents pane.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterExpression {
    doc: Option<Document>,
}

impl FilterExpression {
    /// The filter that matches every document.
    pub fn none() -> Self {
        Self { doc: None }
    }

    pub fn from_document(doc: Document) -> Self {
        if doc.is_empty() {
            Self::none()
        } else {
            Self { doc: Some(doc) }
        }
    }

    pub fn is_none(&self) -> bool {
        self.doc.is_none()
    }

    pub fn document(&self) -> Option<&Document> {
        self.doc.as_ref()
    }

    /// The document to hand to `find`.
    pub fn to_query(&self) -> Document {
        self.doc.clone().unwrap_or_default()
    }

    /// Short label for the status line.
    pub fn label(&self) -> String {
        match &self.doc {
            Some(doc) => Bson::Document(doc.clone())
                .into_relaxed_extjson()
                .to_string(),
            None => "none".to_string(),
        }
    }
}

/// Parse submitted filter text.
pub fn parse_filter(text: &str) -> Result<FilterExpression, BrowseError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(FilterExpression::none());
    }

    if text.starts_with('{') {
        return parse_extended_json(text);
    }

    parse_shorthand(text)
}

fn parse_extended_json(text: &str) -> Result<FilterExpression, BrowseError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| BrowseError::parse(e.to_string()))?;
    match Bson::try_from(value).map_err(|e| BrowseError::parse(e.to_string()))? {
        Bson::Document(doc) => Ok(FilterExpression::from_document(doc)),
        other => Err(BrowseError::parse(format!(
            "filter must be a document, got {:?}",
            other.element_type()
        ))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Op {
    fn operator(self) -> &'static str {
        match self {
            Op::Eq => "$eq",
            Op::Ne => "$ne",
            Op::Gt => "$gt",
            Op::Gte => "$gte",
            Op::Lt => "$lt",
            Op::Lte => "$lte",
        }
    }
}

// Longest tokens first so `>=` is not read as `>`.
const OPERATORS: [(&str, Op); 7] = [
    (">=", Op::Gte),
    ("<=", Op::Lte),
    ("!=", Op::Ne),
    ("==", Op::Eq),
    (">", Op::Gt),
    ("<", Op::Lt),
    ("=", Op::Eq),
];

fn parse_shorthand(text: &str) -> Result<FilterExpression, BrowseError> {
    let clauses = split_clauses(text)
        .iter()
        .map(|clause| parse_clause(clause))
        .collect::<Result<Vec<_>, _>>()?;

    // Field order is kept so the resulting document reads like the input.
    let mut fields: Vec<(&str, Vec<(Op, &Bson)>)> = Vec::new();
    let mut repeated = false;
    for (field, op, value) in &clauses {
        match fields.iter_mut().find(|(name, _)| *name == field.as_str()) {
            Some((_, conds)) => {
                repeated |= conds.iter().any(|(seen, _)| seen == op);
                conds.push((*op, value));
            }
            None => fields.push((field.as_str(), vec![(*op, value)])),
        }
    }

    // One operator document cannot hold the same operator twice, so fall
    // back to one `$and` entry per clause.
    if repeated {
        let all: Vec<Bson> = clauses
            .iter()
            .map(|(field, op, value)| Bson::Document(condition(field, &[(*op, value)])))
            .collect();
        return Ok(FilterExpression::from_document(doc! { "$and": all }));
    }

    let mut doc = Document::new();
    for (field, conds) in fields {
        for (key, value) in condition(field, &conds) {
            doc.insert(key, value);
        }
    }
    Ok(FilterExpression::from_document(doc))
}

/// `{field: value}` for a lone equality, otherwise `{field: {$op: value, ..}}`.
fn condition(field: &str, conds: &[(Op, &Bson)]) -> Document {
    let mut doc = Document::new();
    if let [(Op::Eq, value)] = conds {
        doc.insert(field, (*value).clone());
        return doc;
    }
    let mut ops = Document::new();
    for (op, value) in conds {
        ops.insert(op.operator(), (*value).clone());
    }
    doc.insert(field, ops);
    doc
}

/// Split on `&&` and the word `and` (any case), ignoring separators inside quotes.
fn split_clauses(text: &str) -> Vec<String> {
    let mut clauses = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            current.push(c);
            i += 1;
            continue;
        }

        if c == '"' || c == '\'' {
            quote = Some(c);
            current.push(c);
            i += 1;
            continue;
        }

        if c == '&' && chars.get(i + 1) == Some(&'&') {
            clauses.push(std::mem::take(&mut current));
            i += 2;
            continue;
        }

        let at_word_start = i == 0 || chars[i - 1].is_whitespace();
        if at_word_start && i + 3 <= chars.len() {
            let word: String = chars[i..i + 3].iter().collect();
            let ends = chars.get(i + 3).is_none_or(|c| c.is_whitespace());
            if word.eq_ignore_ascii_case("and") && ends {
                clauses.push(std::mem::take(&mut current));
                i += 3;
                continue;
            }
        }

        current.push(c);
        i += 1;
    }
    clauses.push(current);
    clauses
}

fn parse_clause(clause: &str) -> Result<(String, Op, Bson), BrowseError> {
    let clause = clause.trim();
    if clause.is_empty() {
        return Err(BrowseError::parse("empty condition"));
    }

    let Some((pos, token, op)) = find_operator(clause) else {
        return Err(BrowseError::parse(format!(
            "expected a comparison like `field > value` in `{clause}`"
        )));
    };

    let raw_field = clause[..pos].trim();
    let raw_value = clause[pos + token.len()..].trim();

    if raw_field.is_empty() {
        return Err(BrowseError::parse(format!("missing field name in `{clause}`")));
    }
    let field = match unquote(raw_field)? {
        Some(inner) if !inner.is_empty() => inner,
        Some(_) => return Err(BrowseError::parse("empty field name")),
        None if is_bare_field(raw_field) => raw_field.to_string(),
        None => return Err(BrowseError::parse(format!("invalid field name `{raw_field}`"))),
    };
    if raw_value.is_empty() {
        return Err(BrowseError::parse(format!("missing value for `{field}`")));
    }

    Ok((field, op, parse_value(raw_value)?))
}

/// Letters, digits, `_`, `-` and dotted paths; anything else must be quoted.
fn is_bare_field(field: &str) -> bool {
    !field.starts_with('$')
        && field
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '$'))
}

fn find_operator(clause: &str) -> Option<(usize, &'static str, Op)> {
    // Operators inside a quoted value do not count.
    let mut quote: Option<char> = None;
    for (pos, c) in clause.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None => {
                let rest = &clause[pos..];
                if let Some((token, op)) = OPERATORS.iter().find(|(t, _)| rest.starts_with(t)) {
                    return Some((pos, token, *op));
                }
            }
        }
    }
    None
}

/// The contents of a string quoted with `"` or `'`, or `None` when `s` is
/// not quoted. Text after the closing quote is an error.
fn unquote(s: &str) -> Result<Option<String>, BrowseError> {
    let Some(quote) = s.chars().next().filter(|c| *c == '"' || *c == '\'') else {
        return Ok(None);
    };
    let body = &s[1..];
    let Some(end) = body.find(quote) else {
        return Err(BrowseError::parse(format!("unterminated string {s}")));
    };
    let rest = &body[end + 1..];
    if !rest.is_empty() {
        return Err(BrowseError::parse(format!(
            "unexpected `{rest}` after closing quote in {s}"
        )));
    }
    Ok(Some(body[..end].to_string()))
}

fn parse_value(raw: &str) -> Result<Bson, BrowseError> {
    if let Some(inner) = unquote(raw)? {
        return Ok(Bson::String(inner));
    }

    match raw {
        "true" => return Ok(Bson::Boolean(true)),
        "false" => return Ok(Bson::Boolean(false)),
        "null" => return Ok(Bson::Null),
        _ => {}
    }

    if let Ok(n) = raw.parse::<i64>() {
        return Ok(match i32::try_from(n) {
            Ok(small) => Bson::Int32(small),
            Err(_) => Bson::Int64(n),
        });
    }
    if let Ok(f) = raw.parse::<f64>() {
        if f.is_finite() {
            return Ok(Bson::Double(f));
        }
    }

    if raw.chars().any(char::is_whitespace) {
        return Err(BrowseError::parse(format!(
            "unexpected `{raw}`, quote values that contain spaces"
        )));
    }
    Ok(Bson::String(raw.to_string()))
}
