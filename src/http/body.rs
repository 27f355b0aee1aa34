use crate::args::BodyFormat;
use crate::plan::substitute_placeholders;

/// Request payload together with the content type it is sent as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBody {
    pub content: String,
    pub content_type: &'static str,
}

/// Renders the body for one descriptor.
///
/// Form bodies ignore the template and pair each token with its position
/// (`data1=a&data2=b`). Tokens are sent as given, without URL encoding.
#[must_use]
pub fn render_body(format: BodyFormat, template: &str, parts: &[String]) -> RenderedBody {
    let content = match format {
        BodyFormat::Form => parts
            .iter()
            .enumerate()
            .map(|(index, part)| format!("data{}={}", index.saturating_add(1), part))
            .collect::<Vec<_>>()
            .join("&"),
        BodyFormat::Json | BodyFormat::Raw => substitute_placeholders(template, parts),
    };
    RenderedBody {
        content,
        content_type: format.content_type(),
    }
}
