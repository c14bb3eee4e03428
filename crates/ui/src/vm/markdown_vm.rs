use std::collections::{HashMap, HashSet};

/// Render mentor replies and task descriptions, which arrive as markdown.
#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let mut options = pulldown_cmark::Options::empty();
    options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);
    options.insert(pulldown_cmark::Options::ENABLE_TABLES);

    let parser = pulldown_cmark::Parser::new_ext(input, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "br", "em", "strong", "b", "i", "code", "pre", "blockquote", "ul", "ol", "li", "a",
        "table", "thead", "tbody", "tr", "th", "td", "del",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_code_and_emphasis() {
        let html = markdown_to_html("Try a **hash map**:\n\n```\nseen = {}\n```");
        assert!(html.contains("<strong>hash map</strong>"));
        assert!(html.contains("<pre><code>seen = {}"));
    }

    #[test]
    fn strips_scripts_and_handlers() {
        let html = markdown_to_html("<script>alert(1)</script><a href=\"https://x.dev\" onclick=\"x()\">x</a>");
        assert!(!html.contains("<script"));
        assert!(!html.contains("onclick"));
        assert!(html.contains("href=\"https://x.dev\""));
    }
}
