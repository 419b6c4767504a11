//! Rewrites in-page anchors in answer fragments into full routes.

use regex::{Captures, Regex};

/// Section id to application route.
pub const ROUTE_MAP: &[(&str, &str)] = &[
    ("about", "/#about"),
    ("stats", "/#stats"),
    ("skills", "/portfolio#skills"),
    ("experience", "/portfolio#experience"),
    ("projects", "/portfolio#projects"),
    ("education", "/journey#education"),
    ("blog", "/journey#blog"),
    ("resume", "/journey#resume"),
    ("contact", "/contact#contact"),
];

/// Turns `href="#<id>"` references into navigable routes.
pub struct LinkRewriter {
    fragment_href: Regex,
}

impl Default for LinkRewriter {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkRewriter {
    pub fn new() -> Self {
        Self {
            fragment_href: Regex::new(r##"href="#(.*?)""##).expect("Invalid href regex"),
        }
    }

    /// Full route for a section id, if the section is known.
    pub fn route_for(id: &str) -> Option<&'static str> {
        ROUTE_MAP
            .iter()
            .find(|(section, _)| *section == id)
            .map(|(_, route)| *route)
    }

    /// Rewrite every fragment-only href.
    ///
    /// Known ids map to their route; unknown ids become root-relative
    /// `/#<id>`. Rewritten hrefs start with `/`, so running this on its own
    /// output changes nothing.
    pub fn normalize(&self, fragment: &str) -> String {
        self.fragment_href
            .replace_all(fragment, |caps: &Captures<'_>| {
                let id = &caps[1];
                match Self::route_for(id) {
                    Some(route) => format!("href=\"{}\"", route),
                    None => format!("href=\"/#{}\"", id),
                }
            })
            .into_owned()
    }
}
