//! Copy and share actions for a single article.

use crate::domain::Article;

/// Where share actions deliver their text.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String>;
}

/// System clipboard via arboard, opened on first use and kept open.
///
/// On X11 the copied text lives only as long as the handle, so the owner
/// must outlive the copy. Some platforms have no clipboard at all.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn is_open(&self) -> bool {
        self.inner.is_some()
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String> {
        let clipboard = match &mut self.inner {
            Some(clipboard) => clipboard,
            slot => slot.insert(arboard::Clipboard::new().map_err(|e| e.to_string())?),
        };
        clipboard.set_text(text.to_string()).map_err(|e| e.to_string())
    }
}

/// Copy the article's source link. Returns the toast text.
pub fn copy_link(clipboard: &mut dyn Clipboard, article: &Article) -> String {
    match clipboard.set_text(&article.source_url) {
        Ok(()) => "Link copied".to_string(),
        Err(e) => {
            tracing::warn!("Clipboard unavailable: {}", e);
            "Clipboard unavailable".to_string()
        }
    }
}

/// Copy the headline together with its link. Returns the toast text.
pub fn share(clipboard: &mut dyn Clipboard, article: &Article) -> String {
    match clipboard.set_text(&article.share_text()) {
        Ok(()) => "Copied to share".to_string(),
        Err(e) => {
            tracing::warn!("Clipboard unavailable: {}", e);
            "Clipboard unavailable".to_string()
        }
    }
}

/// Open the source page in the default browser. Returns the toast text.
pub fn open_in_browser(article: &Article) -> String {
    match open::that(&article.source_url) {
        Ok(()) => format!("Opened {}", article.source_name),
        Err(e) => format!("Failed to open browser: {}", e),
    }
}
