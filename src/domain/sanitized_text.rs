use std::fmt::{Display, Formatter};

/// Elements whose content is dropped along with their tags.
const DISCARDED_CONTENT_TAGS: [&str; 4] = ["script", "style", "textarea", "option"];

/// User-supplied text with all markup stripped.
///
/// The stored text is plain; use [`SanitizedText::as_html`] when embedding it in markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedText(String);

impl SanitizedText {
    /// Strips markup from `raw`, rejecting it when nothing but whitespace is left.
    pub fn parse(raw: &str) -> Result<SanitizedText, String> {
        let stripped = strip_markup(raw);
        if stripped.trim().is_empty() {
            Err(format!("{:?} is empty once markup is removed.", raw))
        } else {
            Ok(Self(stripped))
        }
    }

    pub fn as_html(&self) -> String {
        escape_html(&self.0)
    }

    /// The escaped text with every line break replaced by `<br>`.
    pub fn with_line_breaks(&self) -> String {
        self.as_html().replace("\r\n", "<br>").replace('\n', "<br>")
    }
}

impl AsRef<str> for SanitizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for SanitizedText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Removes every tag, comment and declaration from `input`.
///
/// Attributes (event handlers included) go with the tag that carries them, and the body of
/// `script`/`style`/`textarea`/`option` elements is dropped too. A stripped tag is replaced by
/// nothing, so the text on either side keeps its own whitespace:
/// `John <script>x</script> Doe` becomes `John  Doe`. A `<` that opens no markup is kept.
pub fn strip_markup(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find('<') {
        output.push_str(&rest[..start]);
        let candidate = &rest[start..];
        match scan_markup(candidate) {
            Some(Markup::Opening { name, len, self_closing })
                if !self_closing && DISCARDED_CONTENT_TAGS.contains(&name.as_str()) =>
            {
                let after_tag = &candidate[len..];
                rest = match find_closing_tag(after_tag, &name) {
                    Some(close) => &after_tag[close..],
                    // an unclosed script swallows everything after it
                    None => "",
                };
            }
            Some(markup) => rest = &candidate[markup.len()..],
            None => {
                output.push('<');
                rest = &candidate[1..];
            }
        }
    }
    output.push_str(rest);
    output
}

#[derive(Debug, PartialEq)]
enum Markup {
    Opening {
        name: String,
        len: usize,
        self_closing: bool,
    },
    Closing {
        len: usize,
    },
    /// Comments, doctypes and processing instructions.
    Other {
        len: usize,
    },
}

impl Markup {
    fn len(&self) -> usize {
        match self {
            Markup::Opening { len, .. } | Markup::Closing { len } | Markup::Other { len } => *len,
        }
    }
}

/// Recognises the markup starting at the `<` that opens `s`; `None` means a literal `<`.
fn scan_markup(s: &str) -> Option<Markup> {
    let bytes = s.as_bytes();
    if s.starts_with("<!--") {
        let len = s[4..].find("-->").map(|i| i + 7).unwrap_or(s.len());
        return Some(Markup::Other { len });
    }
    match bytes.get(1) {
        Some(b'!') | Some(b'?') => Some(Markup::Other { len: tag_end(s) }),
        Some(b'/') if bytes.get(2).is_some_and(u8::is_ascii_alphabetic) => {
            Some(Markup::Closing { len: tag_end(s) })
        }
        Some(c) if c.is_ascii_alphabetic() => {
            let name: String = s[1..]
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
                .map(|c| c.to_ascii_lowercase())
                .collect();
            let len = tag_end(s);
            let self_closing = s[..len].trim_end_matches('>').ends_with('/');
            Some(Markup::Opening {
                name,
                len,
                self_closing,
            })
        }
        _ => None,
    }
}

/// Byte length of the tag opening `s`. Only a quote right after `=` starts an attribute value;
/// an unterminated tag runs to the end of the input.
fn tag_end(s: &str) -> usize {
    let mut quote = None;
    let mut after_equals = false;
    for (i, c) in s.char_indices().skip(1) {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '>' => return i + 1,
            '"' | '\'' if after_equals => quote = Some(c),
            _ => {}
        }
        if c == '=' {
            after_equals = true;
        } else if !c.is_whitespace() {
            after_equals = false;
        }
    }
    s.len()
}

/// Returns the offset just past `</name ...>` in `s`, ignoring ASCII case.
fn find_closing_tag(s: &str, name: &str) -> Option<usize> {
    s.match_indices("</").find_map(|(i, _)| {
        let after = &s[i + 2..];
        let candidate = after.get(..name.len())?;
        if !candidate.eq_ignore_ascii_case(name) {
            return None;
        }
        let terminated = after[name.len()..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_ascii_alphanumeric());
        terminated.then(|| i + tag_end(&s[i..]))
    })
}

/// Escapes the characters that would otherwise be read as markup.
pub fn escape_html(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            c => output.push(c),
        }
    }
    output
}
