mod content;
mod node;

pub use content::Content;
pub use node::{is_void_tag, Element};

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id.as_deref() == Some(id) {
        return Some(root);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_element(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Collect every element matching `predicate`, in document order.
pub fn find_all<'a>(root: &'a Element, predicate: impl Fn(&Element) -> bool) -> Vec<&'a Element> {
    let mut found = Vec::new();
    collect(root, &predicate, &mut found);
    found
}

fn collect<'a>(element: &'a Element, predicate: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
    if predicate(element) {
        out.push(element);
    }
    if let Content::Children(children) = &element.content {
        for child in children {
            collect(child, predicate, out);
        }
    }
}

/// Collect every element carrying the given class.
pub fn find_by_class<'a>(root: &'a Element, class: &str) -> Vec<&'a Element> {
    find_all(root, |el| el.has_class(class))
}

/// Collect every element with the given tag name.
pub fn find_by_tag<'a>(root: &'a Element, tag: &str) -> Vec<&'a Element> {
    find_all(root, |el| el.tag == tag)
}
