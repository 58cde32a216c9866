//! Minimal SVG document builder.

/// Escape text for use in SVG element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

const FONT_FAMILY: &str = "DejaVu Sans, Liberation Sans, Arial, sans-serif";

/// Text anchor for labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Middle,
    End,
}

impl Anchor {
    fn as_str(&self) -> &'static str {
        match self {
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// An SVG document under construction.
pub struct SvgDocument {
    body: String,
    width: u32,
    height: u32,
}

impl SvgDocument {
    pub fn new(width: u32, height: u32) -> Self {
        let mut doc = Self {
            body: String::new(),
            width,
            height,
        };
        doc.body
            .push_str("  <rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");
        doc
    }

    pub fn width(&self) -> f64 {
        self.width as f64
    }

    pub fn height(&self) -> f64 {
        self.height as f64
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &str) {
        self.body.push_str(&format!(
            "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\" stroke=\"#333333\" stroke-width=\"0.5\"/>\n",
            x,
            y,
            width.max(0.0),
            height.max(0.0),
            escape(fill)
        ));
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str) {
        self.body.push_str(&format!(
            "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"1\"/>\n",
            x1,
            y1,
            x2,
            y2,
            escape(stroke)
        ));
    }

    pub fn text(&mut self, x: f64, y: f64, size: u32, anchor: Anchor, content: &str) {
        self.body.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"{}\" text-anchor=\"{}\">{}</text>\n",
            x,
            y,
            size,
            anchor.as_str(),
            escape(content)
        ));
    }

    /// Text rotated around its anchor point, in degrees.
    pub fn rotated_text(
        &mut self,
        x: f64,
        y: f64,
        size: u32,
        anchor: Anchor,
        degrees: f64,
        content: &str,
    ) {
        self.body.push_str(&format!(
            "  <text x=\"{x:.1}\" y=\"{y:.1}\" font-size=\"{size}\" text-anchor=\"{}\" transform=\"rotate({degrees:.0} {x:.1} {y:.1})\">{}</text>\n",
            anchor.as_str(),
            escape(content)
        ));
    }

    pub fn title(&mut self, content: &str) {
        self.body.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"30\" font-size=\"16\" font-weight=\"bold\" text-anchor=\"middle\">{}</text>\n",
            self.width() / 2.0,
            escape(content)
        ));
    }

    /// Finish the document.
    pub fn finish(self) -> String {
        let mut svg = String::new();
        svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"{FONT_FAMILY}\">\n",
            w = self.width,
            h = self.height
        ));
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(escape("\"quoted\" 'single'"), "&quot;quoted&quot; &apos;single&apos;");
        assert_eq!(escape("__init__"), "__init__");
    }

    #[test]
    fn test_document_structure() {
        let mut doc = SvgDocument::new(400, 300);
        doc.title("Chart <1>");
        doc.rect(10.0, 20.0, 30.0, -5.0, "#4C72B0");
        let svg = doc.finish();

        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("width=\"400\" height=\"300\""));
        assert!(svg.contains("Chart &lt;1&gt;"));
        assert!(svg.contains("height=\"0.0\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
