//! Tag categories and default vocabularies.
//!
//! Every filter asks [`TagKind::of`] instead of carrying its own
//! "is this inline" list. The arrays below are the defaults used to build
//! [`Options`](crate::Options); filters read the copies held by the options
//! rather than these statics.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Structural category of an HTML tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// Elements that never have children or carry meaning without text
    /// (`img`, `br`, `hr`, `iframe`, `video`, ...).
    Void,
    /// List items: `li`, `dt`, `dd`.
    ListItem,
    /// Phrasing content (`a`, `span`, `em`, ...).
    Inline,
    /// Flow/block containers (`div`, `p`, `table`, `ul`, ...).
    Block,
    /// Anything unknown or structural (`html`, `body`, table parts, ...).
    Other,
}

impl TagKind {
    /// Classify a lower-case tag name.
    #[must_use]
    pub fn of(tag: &str) -> Self {
        if VOID_TAG_SET.contains(tag) {
            Self::Void
        } else if LIST_ITEM_TAG_SET.contains(tag) {
            Self::ListItem
        } else if INLINE_TAG_SET.contains(tag) {
            Self::Inline
        } else if BLOCK_TAG_SET.contains(tag) {
            Self::Block
        } else {
            Self::Other
        }
    }

    /// Whether text adjacent to this kind of element flows into it visually.
    #[inline]
    #[must_use]
    pub fn is_inline(self) -> bool {
        self == Self::Inline
    }
}

// === Tag Lists (arrays for iteration) ===

/// Void-like tags.
pub static VOID_TAGS: &[&str] = &[
    "area", "audio", "base", "br", "canvas", "col", "embed", "hr", "iframe", "img", "input",
    "keygen", "link", "meta", "object", "param", "picture", "source", "svg", "track", "video",
    "wbr",
];

/// List item tags.
pub static LIST_ITEM_TAGS: &[&str] = &["li", "dt", "dd"];

/// List container tags.
pub static LIST_TAGS: &[&str] = &["ul", "ol", "dl"];

/// Phrasing (inline) tags.
pub static INLINE_TAGS: &[&str] = &[
    "a", "abbr", "acronym", "b", "bdi", "bdo", "big", "blink", "cite", "code", "data", "del",
    "dfn", "em", "font", "i", "ins", "kbd", "label", "mark", "nobr", "q", "s", "samp", "small",
    "span", "strike", "strong", "sub", "sup", "time", "tt", "u", "var", "ruby",
];

/// Block (flow container) tags.
pub static BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "center", "dd", "details", "dialog", "dir",
    "div", "dl", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4",
    "h5", "h6", "header", "hgroup", "ilayer", "layer", "main", "menu", "nav", "noscript", "ol",
    "p", "pre", "section", "summary", "table", "ul", "xmp", "listing",
];

/// Tags whose text whitespace is significant.
pub static PREFORMATTED_TAGS: &[&str] = &["code", "pre", "ruby", "textarea", "xmp", "listing"];

/// Paragraph-like tags counted as content-bearing blocks by the topology model.
pub static PARAGRAPH_TAGS: &[&str] = &["p", "pre", "blockquote", "figure"];

/// Tags whose text is never document content.
pub static NON_CONTENT_TEXT_TAGS: &[&str] = &["script", "style", "template"];

/// Generic containers unwrapped by the pipeline.
pub static GENERIC_CONTAINER_TAGS: &[&str] = &["div", "layer", "ilayer"];

/// Default tags removed together with their subtree.
pub static BLACKLISTED_TAGS: &[&str] = &[
    "applet", "base", "basefont", "bgsound", "button", "command", "datalist", "dialog",
    "fieldset", "frame", "head", "input", "isindex", "keygen", "link", "math", "meta",
    "noembed", "object", "optgroup", "option", "output", "param", "progress", "script",
    "select", "spacer", "style", "template", "textarea", "title", "menuitem",
];

/// Default tags that are never leaves even when empty.
pub static LEAF_EXCEPTIONS: &[&str] = &[
    "area", "audio", "br", "canvas", "col", "hr", "iframe", "img", "picture", "source", "svg",
    "track", "video", "wbr", "embed",
];

/// Default per-tag attribute whitelist.
pub static ALLOWED_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("a", &["href", "name", "title", "rel"]),
    ("abbr", &["title"]),
    ("audio", &["src", "controls"]),
    ("blockquote", &["cite"]),
    ("col", &["span"]),
    ("colgroup", &["span"]),
    ("iframe", &["src"]),
    ("img", &["src", "alt", "title", "srcset"]),
    ("li", &["value"]),
    ("ol", &["start", "reversed", "type"]),
    ("q", &["cite"]),
    ("source", &["src", "srcset", "type", "media"]),
    ("td", &["colspan", "rowspan"]),
    ("th", &["colspan", "rowspan", "scope"]),
    ("time", &["datetime"]),
    ("track", &["src", "kind", "srclang", "label"]),
    ("video", &["src", "poster", "controls"]),
];

// === Tag Sets (HashSets for O(1) lookup) ===

static VOID_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| VOID_TAGS.iter().copied().collect());

static LIST_ITEM_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| LIST_ITEM_TAGS.iter().copied().collect());

static INLINE_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| INLINE_TAGS.iter().copied().collect());

static BLOCK_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| BLOCK_TAGS.iter().copied().collect());

// === Helper Functions ===

/// Check if tag is a list container (ul, ol, dl)
#[inline]
#[must_use]
pub fn is_list_tag(tag: &str) -> bool {
    LIST_TAGS.contains(&tag)
}

/// Check if tag preserves whitespace for itself and its descendants
#[inline]
#[must_use]
pub fn is_preformatted_tag(tag: &str) -> bool {
    PREFORMATTED_TAGS.contains(&tag)
}

/// Check if tag is paragraph-like
#[inline]
#[must_use]
pub fn is_paragraph_tag(tag: &str) -> bool {
    PARAGRAPH_TAGS.contains(&tag)
}

/// Check if text under this tag should be ignored when measuring content
#[inline]
#[must_use]
pub fn is_non_content_text_tag(tag: &str) -> bool {
    NON_CONTENT_TEXT_TAGS.contains(&tag)
}

/// Check if tag is a generic container (div, layer, ilayer)
#[inline]
#[must_use]
pub fn is_generic_container_tag(tag: &str) -> bool {
    GENERIC_CONTAINER_TAGS.contains(&tag)
}

/// Whether children should never be moved into a new element of this tag.
#[inline]
#[must_use]
pub fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "keygen" | "link"
            | "meta" | "param" | "source" | "track" | "wbr"
    )
}
