pub const SECTION_ROOT_MARGIN: &str = "-40% 0px -55% 0px";
pub const SECTION_THRESHOLD: f64 = 0.1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavPanel {
    open: bool,
}

impl NavPanel {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    pub fn closed() -> Self {
        Self { open: false }
    }

    /// Value for the toggle's `aria-expanded` attribute.
    pub fn aria_expanded(self) -> &'static str {
        if self.open {
            "true"
        } else {
            "false"
        }
    }
}

/// Element id targeted by an in-page link, or `None` when the browser should
/// handle the link itself.
pub fn in_page_anchor(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    (!id.is_empty()).then_some(id)
}

pub fn link_targets_section(href: &str, section_id: &str) -> bool {
    in_page_anchor(href) == Some(section_id)
}

/// Walks one batch of intersection notifications in delivery order and
/// returns the section that ends up active, if any entry was intersecting.
pub fn resolve_active_section<'a, I>(entries: I) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, bool)>,
{
    entries
        .into_iter()
        .filter(|(_, intersecting)| *intersecting)
        .map(|(id, _)| id)
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_state_and_aria_value() {
        let panel = NavPanel::default();
        assert_eq!(panel.aria_expanded(), "false");

        let opened = panel.toggled();
        assert!(opened.is_open());
        assert_eq!(opened.aria_expanded(), "true");

        let closed = opened.toggled();
        assert_eq!(closed, NavPanel::closed());
        assert_eq!(closed.aria_expanded(), "false");
    }

    #[test]
    fn only_hash_links_are_in_page() {
        assert_eq!(in_page_anchor("#about"), Some("about"));
        assert_eq!(in_page_anchor("/resume.pdf"), None);
        assert_eq!(in_page_anchor("https://github.com/#readme"), None);
        assert_eq!(in_page_anchor("#"), None);
    }

    #[test]
    fn link_matches_exact_section_id() {
        assert!(link_targets_section("#about", "about"));
        assert!(!link_targets_section("#about-me", "about"));
        assert!(!link_targets_section("about", "about"));
    }

    #[test]
    fn last_intersecting_entry_wins() {
        let batch = [("hero", true), ("about", false), ("projects", true), ("contact", false)];
        assert_eq!(resolve_active_section(batch), Some("projects"));
    }

    #[test]
    fn batch_without_intersections_changes_nothing() {
        let batch = [("hero", false), ("about", false)];
        assert_eq!(resolve_active_section(batch), None);
    }
}
