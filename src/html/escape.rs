/// Append `text` to `buf` with `& < > "` replaced by entities
pub fn push_escaped(buf: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => buf.push_str("&amp;"),
            '<' => buf.push_str("&lt;"),
            '>' => buf.push_str("&gt;"),
            '"' => buf.push_str("&quot;"),
            _ => buf.push(c),
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut buf = String::with_capacity(text.len());
    push_escaped(&mut buf, text);
    buf
}
