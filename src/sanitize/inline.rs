//! Inline-content stages: breaks, anchors, images, generic containers and
//! figures.

use crate::dom::{self, Document, NodeRef};
use crate::error::Result;
use crate::rewrite;
use crate::tags::{is_generic_container_tag, TagKind};
use crate::url_utils::{is_resolvable, srcset_has_candidate};

use super::Context;

pub(super) fn collapse_breaks(doc: &Document) -> usize {
    let root = dom::analysis_root(doc);
    let mut changes = 0;

    for br in dom::elements_by_tag(&root, "br") {
        if !dom::is_attached(&br) {
            continue;
        }
        while let Some(next) = dom::next_significant_sibling(&br) {
            if !dom::has_tag(&next, "br") {
                break;
            }
            dom::remove(&next);
            changes += 1;
        }
    }

    changes
}

/// Check if an anchor should be replaced by its content.
///
/// Anchors with an `href` must point somewhere resolvable. Anchors without
/// one survive only as named targets (`name` or `id`).
#[must_use]
pub fn is_dead_anchor(anchor: &NodeRef, ctx: &Context) -> bool {
    match anchor.attr("href") {
        Some(href) => !is_resolvable(&href, ctx.base_url.as_ref()),
        None => anchor.attr("name").is_none() && anchor.attr("id").is_none(),
    }
}

pub(super) fn filter_anchors(doc: &Document, ctx: &Context) -> usize {
    let root = dom::analysis_root(doc);
    let mut changes = 0;

    for anchor in dom::elements_by_tag(&root, "a") {
        if dom::is_attached(&anchor) && is_dead_anchor(&anchor, ctx) && rewrite::unwrap(&anchor) {
            changes += 1;
        }
    }

    changes
}

/// Parse a declared `width`/`height`, accepting a trailing `px`.
fn declared_dimension(img: &NodeRef, name: &str) -> Option<u32> {
    let value = img.attr(name)?;
    let value = value.trim();
    value.strip_suffix("px").unwrap_or(value).trim().parse().ok()
}

/// Check if an image has nothing to show or only serves as a tracking pixel.
#[must_use]
pub fn is_unusable_image(img: &NodeRef, ctx: &Context) -> bool {
    let has_src = img
        .attr("src")
        .is_some_and(|src| is_resolvable(&src, ctx.base_url.as_ref()));
    let has_srcset = img.attr("srcset").is_some_and(|s| srcset_has_candidate(&s));
    if !has_src && !has_srcset {
        return true;
    }

    let limit = ctx.options.min_image_dimension;
    matches!(
        (declared_dimension(img, "width"), declared_dimension(img, "height")),
        (Some(w), Some(h)) if w <= limit && h <= limit
    )
}

pub(super) fn filter_images(doc: &Document, ctx: &Context) -> usize {
    let root = dom::analysis_root(doc);
    let mut changes = 0;

    for img in dom::elements_by_tag(&root, "img") {
        if dom::is_attached(&img) && is_unusable_image(&img, ctx) {
            dom::remove(&img);
            changes += 1;
        }
    }

    changes
}

/// Check if a child would break a paragraph: anything that is neither text
/// nor phrasing content.
fn breaks_paragraph(node: &NodeRef) -> bool {
    dom::tag_name(node).is_some_and(|t| !matches!(TagKind::of(&t), TagKind::Inline | TagKind::Void))
}

pub(super) fn unwrap_containers(doc: &Document) -> Result<usize> {
    let root = dom::analysis_root(doc);
    let mut changes = 0;

    for container in dom::elements(&root) {
        if !dom::is_attached(&container)
            || !dom::tag_name(&container).is_some_and(|t| is_generic_container_tag(&t))
        {
            continue;
        }

        if container.children().iter().any(breaks_paragraph) {
            if rewrite::unwrap(&container) {
                changes += 1;
            }
        } else {
            rewrite::coerce(&container, "p")?;
            changes += 1;
        }
    }

    Ok(changes)
}

pub(super) fn unwrap_figures(doc: &Document) -> usize {
    let root = dom::analysis_root(doc);
    let mut changes = 0;

    for figure in dom::elements_by_tag(&root, "figure") {
        if !dom::is_attached(&figure) {
            continue;
        }
        let children: Vec<NodeRef> = figure
            .children()
            .into_iter()
            .filter(NodeRef::is_element)
            .collect();
        let captioned = children.iter().any(|c| dom::has_tag(c, "figcaption"));
        if !captioned && children.len() == 1 && rewrite::unwrap(&figure) {
            changes += 1;
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{body, elements_by_tag, parse, Selection};
    use crate::options::Options;

    fn body_html(doc: &Document) -> String {
        Selection::from(body(doc).unwrap()).inner_html().to_string()
    }

    #[test]
    fn test_collapse_breaks() {
        let doc = parse("<body><p>a<br><br> <br>b<br>c</p></body>");
        assert_eq!(collapse_breaks(&doc), 2);
        assert_eq!(body_html(&doc), "<p>a<br> b<br>c</p>");
    }

    #[test]
    fn test_filter_anchors() {
        let doc = parse(
            r##"<body><a href="javascript:void(0)">js</a> <a href="">empty</a> <a>bare</a> <a name="top">named</a> <a href="/ok">ok</a></body>"##,
        );
        let options = Options::default();
        let ctx = Context::new(&options).unwrap();

        assert_eq!(filter_anchors(&doc, &ctx), 3);
        let remaining = elements_by_tag(&body(&doc).unwrap(), "a");
        assert_eq!(remaining.len(), 2);
        assert_eq!(body(&doc).unwrap().text().as_ref(), "js empty bare named ok");
    }

    #[test]
    fn test_filter_anchors_keeps_words_apart() {
        let doc = parse(r#"<body><p>x<a href="javascript:0">y</a>z</p></body>"#);
        let options = Options::default();
        let ctx = Context::new(&options).unwrap();

        assert_eq!(filter_anchors(&doc, &ctx), 1);
        assert_eq!(body(&doc).unwrap().text().as_ref(), "x y z");
    }

    #[test]
    fn test_filter_anchors_against_base_url() {
        let doc = parse(r#"<body><a href="http://[::1">broken</a><a href="page.html">fine</a></body>"#);
        let options = Options {
            base_url: Some("https://example.com/".to_string()),
            ..Options::default()
        };
        let ctx = Context::new(&options).unwrap();

        assert_eq!(filter_anchors(&doc, &ctx), 1);
    }

    #[test]
    fn test_filter_images() {
        let doc = parse(
            r#"<body><img><img src=""><img src="a.png"><img srcset="b.png 2x"><img src="t.gif" width="1" height="1px"><img src="w.png" width="1" height="300"></body>"#,
        );
        let options = Options::default();
        let ctx = Context::new(&options).unwrap();

        assert_eq!(filter_images(&doc, &ctx), 3);
        assert_eq!(elements_by_tag(&body(&doc).unwrap(), "img").len(), 3);
    }

    #[test]
    fn test_unwrap_containers() {
        let doc = parse(r#"<body><div id="outer"><div class="c">inline <b>only</b></div><p>para</p></div></body>"#);
        assert_eq!(unwrap_containers(&doc).unwrap(), 2);
        assert_eq!(body_html(&doc), r#"<p class="c">inline <b>only</b></p><p>para</p>"#);
    }

    #[test]
    fn test_unwrap_figures() {
        let doc = parse(
            r#"<body><figure><img src="a.png"></figure><figure><img src="b.png"><figcaption>B</figcaption></figure></body>"#,
        );
        assert_eq!(unwrap_figures(&doc), 1);
        assert_eq!(elements_by_tag(&body(&doc).unwrap(), "figure").len(), 1);
        assert_eq!(elements_by_tag(&body(&doc).unwrap(), "img").len(), 2);
    }
}
