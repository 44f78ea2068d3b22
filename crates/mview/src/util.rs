use mongodb::bson::{Bson, Document};
use mongodb::error::{Error as MongoError, ErrorKind};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Format a driver error as a single line, keeping the server code when the
/// failure came back from a command.
pub fn format_mongo_error(e: &MongoError) -> String {
    let msg = match e.kind.as_ref() {
        ErrorKind::Command(cmd) => format!("{} ({}): {}", cmd.code_name, cmd.code, cmd.message),
        _ => e.to_string(),
    };
    single_line(&msg)
}

/// Collapse any line breaks so a message fits in one list row.
pub fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Stringify a document the way it is listed: relaxed Extended JSON on one line.
pub fn document_to_line(doc: Document) -> String {
    Bson::Document(doc).into_relaxed_extjson().to_string()
}

/// Truncate `s` to at most `width` display columns, ending with `…` when cut.
pub fn fit_to_width(s: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    if s.width() <= width {
        return s.to_string();
    }

    let target = width - 1;
    let mut out = String::new();
    let mut used = 0usize;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > target {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
