//! Server-side rendering of the form page.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::services::form::{BackgroundMode, QrForm};

use super::assets::index_template;

/// Caption shown under every generated image.
pub const CAPTION: &str = "Fancy QR Code";

/// What to show below the form.
#[derive(Debug, Clone, Default)]
pub enum Outcome {
    #[default]
    Empty,
    Image(Vec<u8>),
    Warning(String),
}

/// Values needed to render the form page.
#[derive(Debug, Clone)]
pub struct PageView {
    pub data: String,
    pub color: String,
    pub background_color: String,
    pub background: BackgroundMode,
    pub gradient: bool,
    pub outcome: Outcome,
}

impl PageView {
    /// Fresh form with the configured default colors.
    pub fn blank(color: String, background_color: String) -> Self {
        Self {
            data: String::new(),
            color,
            background_color,
            background: BackgroundMode::Plain,
            gradient: false,
            outcome: Outcome::Empty,
        }
    }

    /// Echo a submitted form back with the given outcome.
    pub fn from_form(form: &QrForm, outcome: Outcome) -> Self {
        Self {
            data: form.data.clone(),
            color: form.color.clone(),
            background_color: form.background_color.clone(),
            background: form.background,
            gradient: form.gradient,
            outcome,
        }
    }

    pub fn render(&self) -> Result<String, &'static str> {
        let template = index_template().ok_or("form template missing")?;
        let selected = |mode: BackgroundMode| if self.background == mode { " selected" } else { "" };

        Ok(fill_placeholders(&template, |name| {
            let value = match name {
                "DATA" => escape_html(&self.data),
                "COLOR" => escape_html(&self.color),
                "BACKGROUND_COLOR" => escape_html(&self.background_color),
                "PLAIN_SELECTED" => selected(BackgroundMode::Plain).to_string(),
                "IMAGE_SELECTED" => selected(BackgroundMode::Image).to_string(),
                "UPLOAD_HIDDEN" => {
                    let hidden = self.background != BackgroundMode::Image;
                    (if hidden { " hidden" } else { "" }).to_string()
                }
                "GRADIENT_CHECKED" => (if self.gradient { " checked" } else { "" }).to_string(),
                "RESULT" => self.result_html(),
                _ => return None,
            };
            Some(value)
        }))
    }

    fn result_html(&self) -> String {
        match &self.outcome {
            Outcome::Empty => String::new(),
            Outcome::Image(png) => format!(
                "<figure><img src=\"data:image/png;base64,{}\" alt=\"{CAPTION}\"><figcaption>{CAPTION}</figcaption></figure>",
                STANDARD.encode(png)
            ),
            Outcome::Warning(message) => {
                format!("<p class=\"warning-text\">{}</p>", escape_html(message))
            }
        }
    }
}

/// Substitute every `{{NAME}}` in `template` in a single left-to-right pass.
///
/// Substituted text is never rescanned. Unknown names are kept verbatim.
fn fill_placeholders<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = &after[..end];
                match lookup(name) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push_str("{{");
                        out.push_str(name);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Escape text for use inside HTML element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_handles_markup() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn blank_page_has_defaults_and_no_result() {
        let html = PageView::blank("#000000".into(), "#ffffff".into())
            .render()
            .unwrap();
        assert!(html.contains(r##"name="color" value="#000000""##));
        assert!(html.contains(r##"name="background_color" value="#ffffff""##));
        assert!(html.contains(r#"<option value="plain" selected>"#));
        assert!(html.contains(r#"<div id="upload" hidden>"#));
        assert!(!html.contains("{{"));
        assert!(!html.contains("<figure>"));
        assert!(!html.contains("warning-text\">"));
    }

    #[test]
    fn image_outcome_is_inlined_with_caption() {
        let mut view = PageView::blank("#000000".into(), "#ffffff".into());
        view.outcome = Outcome::Image(vec![0x89, b'P', b'N', b'G']);
        let html = view.render().unwrap();
        assert!(html.contains("data:image/png;base64,iVBORw=="));
        assert!(html.contains("<figcaption>Fancy QR Code</figcaption>"));
    }

    #[test]
    fn warning_outcome_is_rendered() {
        let mut view = PageView::blank("#000000".into(), "#ffffff".into());
        view.outcome = Outcome::Warning("Please enter the data for the QR code.".into());
        let html = view.render().unwrap();
        assert!(html.contains(
            r#"<p class="warning-text">Please enter the data for the QR code.</p>"#
        ));
    }

    #[test]
    fn submitted_values_are_echoed_escaped() {
        let form = QrForm {
            data: "\"><script>".into(),
            color: "#ff0070".into(),
            background_color: "#ffffff".into(),
            background: BackgroundMode::Image,
            upload: None,
            gradient: true,
        };
        let html = PageView::from_form(&form, Outcome::Empty).render().unwrap();
        assert!(html.contains(r#"value="&quot;&gt;&lt;script&gt;""#));
        assert!(html.contains(r#"<option value="image" selected>"#));
        assert!(html.contains(r#"<div id="upload">"#));
        assert!(html.contains(r#"name="gradient" checked>"#));
    }

    #[test]
    fn placeholder_names_in_payload_are_echoed_verbatim() {
        let form = QrForm {
            data: "{{RESULT}}".into(),
            color: "#000000".into(),
            background_color: "#ffffff".into(),
            ..QrForm::default()
        };
        let html = PageView::from_form(&form, Outcome::Image(vec![1, 2, 3]))
            .render()
            .unwrap();
        assert!(html.contains(r#"name="data" value="{{RESULT}}">"#));
        assert_eq!(html.matches("<figure>").count(), 1);
    }

    #[test]
    fn fill_placeholders_keeps_unknown_and_unclosed() {
        let lookup = |name: &str| (name == "A").then(|| "{{B}}".to_string());
        assert_eq!(fill_placeholders("x{{A}}y{{B}}z", lookup), "x{{B}}y{{B}}z");
        assert_eq!(fill_placeholders("tail {{A", lookup), "tail {{A");
        assert_eq!(fill_placeholders("none", lookup), "none");
    }
}
