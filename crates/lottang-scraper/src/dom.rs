//! Document-order traversal helpers over parsed HTML.
//!
//! The winning-store markup drifts between draws and devices, so rank labels
//! are associated with tables by walking a bounded number of elements forward
//! or backward from a marker instead of matching a fixed structure. The
//! stepping primitives live here; the hop-counted loops that use them sit in
//! `detail` and `archive`. Only elements participate — text and comment nodes
//! are stepped over.

use scraper::ElementRef;

/// Concatenated text of an element's descendants, space-separated.
pub(crate) fn text(el: ElementRef<'_>) -> String {
    el.text().collect::<Vec<_>>().join(" ")
}

/// First element after `el` in document order: its first element child, else
/// the nearest following element found by climbing the ancestor chain.
pub(crate) fn first_forward_element<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    if let Some(child) = el.children().find_map(ElementRef::wrap) {
        return Some(child);
    }
    std::iter::once(*el)
        .chain(el.ancestors())
        .find_map(|node| node.next_siblings().find_map(ElementRef::wrap))
}

/// Next element among `el`'s following siblings.
pub(crate) fn next_sibling_element<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

/// Nearest element before `el` in document order: the deepest last
/// descendant of the previous sibling, else the parent.
pub(crate) fn previous_element<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    let mut cur = *el;
    loop {
        cur = match cur.prev_sibling() {
            Some(mut prev) => {
                while let Some(last) = prev.last_child() {
                    prev = last;
                }
                prev
            }
            None => cur.parent()?,
        };
        if let Some(found) = ElementRef::wrap(cur) {
            return Some(found);
        }
    }
}
