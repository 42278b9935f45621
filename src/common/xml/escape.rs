use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use quick_xml::escape::resolve_html5_entity;

const SPECIAL: [&str; 5] = ["&", "<", ">", "\"", "'"];
const ESCAPED: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"];

/// Longest reference name we try to resolve, e.g. `CounterClockwiseContourIntegral`
const MAX_REFERENCE_LEN: usize = 32;

static ESCAPER: Lazy<AhoCorasick> =
    Lazy::new(|| AhoCorasick::new(SPECIAL).expect("Failed to build XML escaper"));

/// Escape the characters that may not appear literally in XML text or in a
/// double-quoted attribute value.
///
/// # Examples
///
/// ```
/// use flat_odt::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<p class=\"x\">"), "&lt;p class=&quot;x&quot;&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    ESCAPER.replace_all(s, &ESCAPED)
}

/// Replace entity and character references with the text they stand for.
///
/// Everything [`resolve_reference`] understands is replaced. Unknown names
/// and a lone `&` are kept as written.
///
/// # Examples
///
/// ```
/// use flat_odt::common::xml::unescape_xml;
/// assert_eq!(unescape_xml("&lt;a &amp; b&gt;"), "<a & b>");
/// assert_eq!(unescape_xml("&amp;lt;"), "&lt;");
/// assert_eq!(unescape_xml("caf&#233; &hellip;"), "café …");
/// assert_eq!(unescape_xml("&invalid; & &amp"), "&invalid; & &amp");
/// ```
pub fn unescape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let resolved = tail
            .find(';')
            .filter(|&end| end <= MAX_REFERENCE_LEN)
            .and_then(|end| Some((end, resolve_reference(&tail[..end])?)));

        match resolved {
            Some((end, text)) => {
                out.push_str(&text);
                rest = &tail[end + 1..];
            },
            None => {
                out.push('&');
                rest = tail;
            },
        }
    }

    out.push_str(rest);
    out
}

/// Resolve the name of an entity or character reference (the part between
/// `&` and `;`) to the text it stands for.
///
/// Character references (`#38`, `#x26`) and every named entity of HTML5,
/// which includes the five predefined XML entities, are understood. Returns
/// `None` for anything else.
///
/// # Examples
///
/// ```
/// use flat_odt::common::xml::resolve_reference;
/// assert_eq!(resolve_reference("amp").as_deref(), Some("&"));
/// assert_eq!(resolve_reference("uuml").as_deref(), Some("ü"));
/// assert_eq!(resolve_reference("#x41").as_deref(), Some("A"));
/// assert_eq!(resolve_reference("#66").as_deref(), Some("B"));
/// assert_eq!(resolve_reference("unknown"), None);
/// ```
pub fn resolve_reference(name: &str) -> Option<String> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }

    resolve_html5_entity(name).map(str::to_string)
}
