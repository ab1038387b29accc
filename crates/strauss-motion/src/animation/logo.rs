//! Logo image fallback
//!
//! When the navigation logo image fails to load the text logo is shown
//! instead; a later successful load swaps back. The footer logo simply
//! hides itself on error.

use crate::host::{EventKind, EventTarget, Page};
use crate::types::ElementId;

pub const NAV_LOGO_IMAGE: &str = ".nav-logo img";
pub const NAV_LOGO_TEXT: &str = ".nav-logo h1";
pub const FOOTER_LOGO_IMAGE: &str = ".footer-logo img";

#[derive(Debug, Default)]
pub struct LogoFallback {
    /// (image, text) pair, only wired when both exist
    nav: Option<(ElementId, ElementId)>,
    footer: Option<ElementId>,
}

impl LogoFallback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn setup<P: Page>(&mut self, page: &mut P) {
        if let (Some(image), Some(text)) = (page.query(NAV_LOGO_IMAGE), page.query(NAV_LOGO_TEXT)) {
            page.listen(EventTarget::Element(image), EventKind::Error);
            page.listen(EventTarget::Element(image), EventKind::Load);
            self.nav = Some((image, text));
        }

        if let Some(footer) = page.query(FOOTER_LOGO_IMAGE) {
            page.listen(EventTarget::Element(footer), EventKind::Error);
            self.footer = Some(footer);
        }
    }

    /// React to an image load/error; false if the element is not a logo
    pub fn on_image_event<P: Page>(&self, page: &mut P, element: ElementId, kind: EventKind) -> bool {
        if let Some((image, text)) = self.nav {
            if image == element {
                match kind {
                    EventKind::Error => {
                        page.set_style(image, "display", "none");
                        page.set_style(text, "display", "block");
                    }
                    EventKind::Load => {
                        page.set_style(image, "display", "block");
                        page.set_style(text, "display", "none");
                    }
                    _ => return false,
                }
                return true;
            }
        }

        if self.footer == Some(element) && kind == EventKind::Error {
            page.set_style(element, "display", "none");
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryPage;

    fn logo_page() -> (MemoryPage, ElementId, ElementId, ElementId) {
        let mut page = MemoryPage::new();
        let body = page.body();
        let nav_logo = page.insert(body, "div", "nav-logo");
        let image = page.insert(nav_logo, "img", "");
        let text = page.insert(nav_logo, "h1", "");
        let footer_logo = page.insert(body, "div", "footer-logo");
        let footer = page.insert(footer_logo, "img", "");
        (page, image, text, footer)
    }

    #[test]
    fn test_broken_image_shows_text() {
        let (mut page, image, text, _) = logo_page();
        let mut logo = LogoFallback::new();
        logo.setup(&mut page);

        assert!(logo.on_image_event(&mut page, image, EventKind::Error));
        assert_eq!(page.style(image, "display"), "none");
        assert_eq!(page.style(text, "display"), "block");
    }

    #[test]
    fn test_loaded_image_hides_text() {
        let (mut page, image, text, _) = logo_page();
        let mut logo = LogoFallback::new();
        logo.setup(&mut page);

        logo.on_image_event(&mut page, image, EventKind::Error);
        assert!(logo.on_image_event(&mut page, image, EventKind::Load));
        assert_eq!(page.style(image, "display"), "block");
        assert_eq!(page.style(text, "display"), "none");
    }

    #[test]
    fn test_footer_hides_on_error_only() {
        let (mut page, _, _, footer) = logo_page();
        let mut logo = LogoFallback::new();
        logo.setup(&mut page);

        assert!(page.is_listening(EventTarget::Element(footer), EventKind::Error));
        assert!(!page.is_listening(EventTarget::Element(footer), EventKind::Load));
        assert!(!logo.on_image_event(&mut page, footer, EventKind::Load));
        assert!(logo.on_image_event(&mut page, footer, EventKind::Error));
        assert_eq!(page.style(footer, "display"), "none");
    }

    #[test]
    fn test_image_without_text_not_wired() {
        let mut page = MemoryPage::new();
        let body = page.body();
        let nav_logo = page.insert(body, "div", "nav-logo");
        let image = page.insert(nav_logo, "img", "");
        let mut logo = LogoFallback::new();
        logo.setup(&mut page);

        assert!(page.listeners().is_empty());
        assert!(!logo.on_image_event(&mut page, image, EventKind::Error));
        assert_eq!(page.style(image, "display"), "");
    }
}
