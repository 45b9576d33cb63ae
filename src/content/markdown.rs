//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::MarkdownConfig;

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    highlight: bool,
    line_numbers: bool,
    smart_punctuation: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::from_config(&MarkdownConfig::default())
    }

    /// Create from the `markdown` section of the config
    pub fn from_config(config: &MarkdownConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: config.highlight.theme.clone(),
            highlight: config.highlight.enable,
            line_numbers: config.highlight.line_number,
            smart_punctuation: config.smart_punctuation,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        // Front-matter is split off before rendering, so no metadata blocks here
        let mut options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;
        if self.smart_punctuation {
            options |= Options::ENABLE_SMART_PUNCTUATION;
        }
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        // Some(lang) while inside a code block
        let mut code_block: Option<Option<String>> = None;
        let mut code_block_content = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(|lang| lang.to_string()),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some(lang);
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let lang = code_block.take().flatten();
                    let html = self.highlight_code(&code_block_content, lang.as_deref());
                    events.push(Event::Html(CowStr::from(html)));
                }
                Event::Text(text) if code_block.is_some() => {
                    code_block_content.push_str(&text);
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Render a code block, highlighted when the language is known
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let plain = |class: &str| {
            format!(
                r#"<pre><code{}>{}</code></pre>"#,
                class,
                html_escape(code)
            )
        };
        let Some(lang) = lang else {
            return plain("");
        };
        let class = format!(r#" class="language-{}""#, html_escape(lang));

        if !self.highlight {
            return plain(&class);
        }

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang));
        let Some(syntax) = syntax else {
            return plain(&class);
        };
        let Some(theme) = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())
        else {
            return plain(&class);
        };

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) if self.line_numbers => self.add_line_numbers(&highlighted, lang),
            Ok(highlighted) => highlighted,
            Err(e) => {
                tracing::debug!("Highlighting {} failed, emitting plain code: {}", lang, e);
                plain(&class)
            }
        }
    }

    /// Add line numbers to highlighted code
    fn add_line_numbers(&self, code: &str, lang: &str) -> String {
        let lines: Vec<&str> = code.lines().collect();

        let gutter = (1..=lines.len())
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
            html_escape(lang),
            gutter,
            lines.join("\n")
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HighlightConfig;

    fn plain_renderer() -> MarkdownRenderer {
        MarkdownRenderer::from_config(&MarkdownConfig {
            smart_punctuation: false,
            highlight: HighlightConfig {
                enable: false,
                ..Default::default()
            },
        })
    }

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_highlighted_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert!(html.contains("<pre style="));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_render_plain_code_block() {
        let html = plain_renderer().render("```rust\nlet x = 1 < 2;\n```");
        assert_eq!(
            html,
            "<pre><code class=\"language-rust\">let x = 1 &lt; 2;\n</code></pre>"
        );
    }

    #[test]
    fn test_unknown_language_falls_back() {
        let html = MarkdownRenderer::new().render("```nosuchlang\na & b\n```");
        assert!(html.contains("class=\"language-nosuchlang\""));
        assert!(html.contains("a &amp; b"));
    }

    #[test]
    fn test_line_numbers() {
        let renderer = MarkdownRenderer::from_config(&MarkdownConfig {
            smart_punctuation: false,
            highlight: HighlightConfig {
                line_number: true,
                ..Default::default()
            },
        });
        let html = renderer.render("```rust\nlet a = 1;\nlet b = 2;\n```");
        assert!(html.contains(r#"<figure class="highlight rust">"#));
        assert!(html.contains(r#"<span class="line-number">2</span>"#));
    }

    #[test]
    fn test_raw_html_passes_through() {
        let html = plain_renderer().render("<div class=\"note\">hi</div>\n");
        assert!(html.contains(r#"<div class="note">hi</div>"#));
    }

    #[test]
    fn test_smart_punctuation() {
        let smart = MarkdownRenderer::from_config(&MarkdownConfig {
            smart_punctuation: true,
            highlight: HighlightConfig::default(),
        });
        let html = smart.render("\"quoted\"");
        assert!(html.contains("\u{201c}quoted\u{201d}"));

        let html = plain_renderer().render("\"quoted\"");
        assert!(!html.contains('\u{201c}'));
        assert!(html.contains("\"quoted\"") || html.contains("&quot;quoted&quot;"));
    }

    #[test]
    fn test_gfm_extensions() {
        let html = plain_renderer().render("~~gone~~\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains("<table>"));
    }
}
