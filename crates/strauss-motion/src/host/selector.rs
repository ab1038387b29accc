//! Minimal CSS selector matching for the in-memory page
//!
//! Supports what the landing page uses: selector lists (`a, b`), the
//! descendant combinator (`.nav-logo img`) and compound selectors made of
//! a tag, an `#id` and any number of `.class`es.

use crate::types::ElementId;

/// Element facts a selector needs to match against
pub(crate) trait SelectorSubject {
    fn tag_of(&self, element: ElementId) -> Option<&str>;
    fn id_of(&self, element: ElementId) -> Option<&str>;
    fn has_class_name(&self, element: ElementId, class: &str) -> bool;
    fn parent_of(&self, element: ElementId) -> Option<ElementId>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(input: &str) -> Option<Self> {
        let mut compound = Compound::default();
        let mut rest = input;

        let tag_end = rest.find(['.', '#']).unwrap_or(rest.len());
        if tag_end > 0 {
            let tag = &rest[..tag_end];
            if !is_ident(tag) && tag != "*" {
                return None;
            }
            if tag != "*" {
                compound.tag = Some(tag.to_ascii_lowercase());
            }
            rest = &rest[tag_end..];
        }

        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(['.', '#']).unwrap_or(body.len());
            let name = &body[..end];
            if !is_ident(name) {
                return None;
            }
            match marker {
                '.' => compound.classes.push(name.to_string()),
                '#' => compound.id = Some(name.to_string()),
                _ => return None,
            }
            rest = &body[end..];
        }

        Some(compound)
    }

    fn matches<S: SelectorSubject + ?Sized>(&self, subject: &S, element: ElementId) -> bool {
        if let Some(tag) = &self.tag {
            match subject.tag_of(element) {
                Some(t) if t.eq_ignore_ascii_case(tag) => {}
                _ => return false,
            }
        }
        if let Some(id) = &self.id {
            if subject.id_of(element) != Some(id.as_str()) {
                return false;
            }
        }
        self.classes
            .iter()
            .all(|class| subject.has_class_name(element, class))
    }
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// A parsed selector list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    /// Each alternative is a descendant chain, outermost first
    alternatives: Vec<Vec<Compound>>,
}

impl Selector {
    /// Parse a selector list; `None` for anything outside the supported subset
    pub fn parse(input: &str) -> Option<Self> {
        let mut alternatives = Vec::new();
        for part in input.split(',') {
            let chain: Vec<Compound> = part
                .split_whitespace()
                .map(Compound::parse)
                .collect::<Option<_>>()?;
            if chain.is_empty() {
                return None;
            }
            alternatives.push(chain);
        }
        Some(Self { alternatives })
    }

    pub(crate) fn matches<S: SelectorSubject + ?Sized>(&self, subject: &S, element: ElementId) -> bool {
        self.alternatives
            .iter()
            .any(|chain| chain_matches(chain, subject, element))
    }
}

fn chain_matches<S: SelectorSubject + ?Sized>(
    chain: &[Compound],
    subject: &S,
    element: ElementId,
) -> bool {
    let Some((last, ancestors)) = chain.split_last() else {
        return false;
    };
    if !last.matches(subject, element) {
        return false;
    }

    // Walk up greedily: each remaining compound must match some ancestor
    let mut remaining = ancestors;
    let mut cursor = subject.parent_of(element);
    while let Some((needed, rest)) = remaining.split_last() {
        loop {
            match cursor {
                Some(ancestor) => {
                    cursor = subject.parent_of(ancestor);
                    if needed.matches(subject, ancestor) {
                        break;
                    }
                }
                None => return false,
            }
        }
        remaining = rest;
    }
    true
}
