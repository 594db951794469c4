use crate::record::Record;

/// Prefix of the footer line; the record id is appended to it.
pub const SOURCE_FOOTER_PREFIX: &str = "jsonplaceholder.typicode.com/posts/";

/// Renders a record as the text that ends up in its file: the uppercased
/// title, a blank line, the body, a blank line and a footer naming the
/// source. Lines are joined with `\n` and there is no trailing newline.
pub fn compose(record: &Record) -> String {
    [
        record.title.trim().to_uppercase(),
        String::new(),
        record.body.trim().to_string(),
        String::new(),
        format!("(source: {SOURCE_FOOTER_PREFIX}{})", record.id),
    ]
    .join("\n")
}
