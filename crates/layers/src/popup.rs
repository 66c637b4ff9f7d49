use std::fmt::Write;
use std::path::Path;

use crate::entry::DictEntry;

/// Inline width shared by popup images and audio controls.
pub const MEDIA_WIDTH_PX: u32 = 230;

/// Absolute file:/// URL for a local path, forward slashes throughout.
/// The path does not have to exist yet.
pub fn file_url(path: &Path) -> String {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let flat = absolute.display().to_string().replace('\\', "/");
    format!("file:///{}", flat.trim_start_matches('/'))
}

/// Renders the popup block for one entry: a right-to-left text panel with
/// the four labeled fields, followed by the entry's image and audio clip
/// when the row references them. Media paths are resolved against
/// `assets_root`.
pub fn render_info_panel(entry: &DictEntry, assets_root: &Path) -> String {
    let mut out = String::new();
    out.push_str("<div style=\"direction: rtl; text-align: right; font-family: Arial;\">\n");
    push_labeled(&mut out, "المدخل", &entry.headword);
    push_labeled(&mut out, "الكتابة الصّوتيّة", &entry.transcription);
    push_labeled(&mut out, "الموقع", &entry.location);
    push_labeled(&mut out, "الدلالة", &entry.meaning);
    out.push_str("</div>\n");

    let image = entry.image.trim();
    if !image.is_empty() {
        let url = file_url(&assets_root.join(image));
        let _ = write!(
            out,
            "<img src=\"{}\" width=\"{MEDIA_WIDTH_PX}\"><br>\n",
            escape_html(&url)
        );
    }

    let audio = entry.audio.trim();
    if !audio.is_empty() {
        let url = file_url(&assets_root.join(audio));
        // TODO: derive the source type from the file extension; every clip
        // is declared audio/mpeg today even when the recording is not MP3.
        let _ = write!(
            out,
            "<audio controls style=\"width:{MEDIA_WIDTH_PX}px;\"><source src=\"{}\" type=\"audio/mpeg\"></audio><br>\n",
            escape_html(&url)
        );
    }

    out
}

fn push_labeled(out: &mut String, label: &str, value: &str) {
    let _ = write!(out, "<b>{label}:</b> {}<br>\n", escape_html(value));
}

/// Field text goes straight into popup markup; escape the handful of
/// characters that would change the document structure.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{escape_html, file_url, render_info_panel};
    use crate::entry::DictEntry;

    fn root() -> &'static Path {
        Path::new("/data/atlas")
    }

    #[test]
    fn panel_carries_the_four_labeled_fields() {
        let entry = DictEntry {
            headword: "برّاد".to_string(),
            transcription: "berrād".to_string(),
            location: "قفصة".to_string(),
            meaning: "إبريق الشاي".to_string(),
            ..DictEntry::default()
        };
        let html = render_info_panel(&entry, root());

        assert!(html.starts_with("<div style=\"direction: rtl;"));
        assert!(html.contains("<b>المدخل:</b> برّاد<br>"));
        assert!(html.contains("<b>الكتابة الصّوتيّة:</b> berrād<br>"));
        assert!(html.contains("<b>الموقع:</b> قفصة<br>"));
        assert!(html.contains("<b>الدلالة:</b> إبريق الشاي<br>"));
    }

    #[test]
    fn empty_fields_render_as_empty_labels_without_media() {
        let html = render_info_panel(&DictEntry::default(), root());
        assert!(html.contains("<b>المدخل:</b> <br>"));
        assert!(!html.contains("<img"));
        assert!(!html.contains("<audio"));
    }

    #[test]
    fn whitespace_only_media_references_are_treated_as_absent() {
        let entry = DictEntry {
            image: "   ".to_string(),
            audio: "\u{a0}".to_string(),
            ..DictEntry::default()
        };
        let html = render_info_panel(&entry, root());
        assert!(!html.contains("<img"));
        assert!(!html.contains("<audio"));
    }

    #[test]
    fn image_reference_becomes_a_fixed_width_file_link() {
        let entry = DictEntry {
            image: "photos/berrad.jpg".to_string(),
            ..DictEntry::default()
        };
        let html = render_info_panel(&entry, root());
        assert!(html.contains("<img src=\"file:///data/atlas/photos/berrad.jpg\" width=\"230\">"));
    }

    #[test]
    fn audio_reference_becomes_a_fixed_width_player() {
        let entry = DictEntry {
            audio: "clips/berrad.mp3".to_string(),
            ..DictEntry::default()
        };
        let html = render_info_panel(&entry, root());
        assert!(html.contains("<audio controls style=\"width:230px;\">"));
        assert!(html.contains("src=\"file:///data/atlas/clips/berrad.mp3\" type=\"audio/mpeg\""));
    }

    #[test]
    fn field_text_is_escaped() {
        let entry = DictEntry {
            headword: "<b>&\"".to_string(),
            ..DictEntry::default()
        };
        let html = render_info_panel(&entry, root());
        assert!(html.contains("<b>المدخل:</b> &lt;b&gt;&amp;&quot;<br>"));
    }

    #[test]
    fn file_urls_are_absolute_with_forward_slashes() {
        assert_eq!(
            file_url(Path::new("/data/atlas/photos/a.jpg")),
            "file:///data/atlas/photos/a.jpg"
        );
        // Relative paths are anchored to the working directory.
        assert!(file_url(Path::new("photos/a.jpg")).starts_with("file:///"));
    }

    #[test]
    fn escape_covers_the_structural_characters() {
        assert_eq!(escape_html("a & b < c > d \" e"), "a &amp; b &lt; c &gt; d &quot; e");
    }
}
