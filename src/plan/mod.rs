//! Expansion of a URL template and data rows into the ordered request plan.

/// One fully resolved request: the substituted URL plus the tokens that
/// produced it. The tokens are reused to render the request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub url: String,
    pub data_parts: Vec<String>,
}

/// Builds the ordered plan for a run.
///
/// Without data rows the template URL is repeated `repeats` times. With data
/// rows the plan iterates repeats in the outer loop and rows in the inner
/// loop, so its length is `repeats * data.len()`.
#[must_use]
pub fn build_plan(url_template: &str, data: &[String], repeats: usize) -> Vec<RequestDescriptor> {
    if data.is_empty() {
        return (0..repeats)
            .map(|_| RequestDescriptor {
                url: url_template.to_owned(),
                data_parts: Vec::new(),
            })
            .collect();
    }

    let rows: Vec<RequestDescriptor> = data
        .iter()
        .map(|row| {
            let data_parts: Vec<String> = row.split_whitespace().map(str::to_owned).collect();
            RequestDescriptor {
                url: substitute_placeholders(url_template, &data_parts),
                data_parts,
            }
        })
        .collect();

    let mut plan = Vec::with_capacity(rows.len().saturating_mul(repeats));
    for _ in 0..repeats {
        plan.extend(rows.iter().cloned());
    }
    plan
}

/// Replaces `{data1}`, `{data2}`, ... with the matching token, in order.
///
/// Replacement is literal; a token that itself contains a later placeholder
/// is substituted again when that placeholder's turn comes.
#[must_use]
pub fn substitute_placeholders(template: &str, parts: &[String]) -> String {
    let mut rendered = template.to_owned();
    for (index, part) in parts.iter().enumerate() {
        let placeholder = format!("{{data{}}}", index.saturating_add(1));
        rendered = rendered.replace(&placeholder, part);
    }
    rendered
}
