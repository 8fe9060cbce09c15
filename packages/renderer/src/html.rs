use crate::render::{render_document_with, RenderMode, RenderOptions};
use crate::vdom::{VNode, VirtualDomDocument};
use pamphlet_schema::Project;

pub const DEFAULT_FOOTER: &str = "Powered by Pamphlet";

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

impl CompileOptions {
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Default::default()
        }
    }
}

/// Options for a published page
#[derive(Debug, Clone)]
pub struct PageOptions {
    /// Origin forwarded to video embeds
    pub origin: String,
    pub footer: String,
    pub compile: CompileOptions,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            origin: String::new(),
            footer: DEFAULT_FOOTER.to_string(),
            compile: CompileOptions::default(),
        }
    }
}

struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        let indent = self.options.indent.clone();
        for _ in 0..self.depth {
            self.add(&indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile the block nodes of a document to an HTML fragment
pub fn compile_to_html(document: &VirtualDomDocument, options: CompileOptions) -> String {
    let mut ctx = Context::new(options);
    for node in &document.nodes {
        compile_node(node, &mut ctx);
    }
    ctx.get_output()
}

/// Compile a single node
pub fn compile_node_to_html(node: &VNode, options: CompileOptions) -> String {
    let mut ctx = Context::new(options);
    compile_node(node, &mut ctx);
    ctx.get_output()
}

/// Full standalone page for the read-only view of a project
pub fn render_published_page(project: &Project, options: &PageOptions) -> String {
    let render_options = RenderOptions::new(RenderMode::ReadOnly).with_origin(options.origin.as_str());
    let document = render_document_with(project, &render_options);

    let mut ctx = Context::new(options.compile.clone());
    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html lang=\"ko\">");
    ctx.indent();

    ctx.add_line("<head>");
    ctx.indent();
    ctx.add_line("<meta charset=\"utf-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    ctx.add_line(&format!("<title>{}</title>", escape_html(&document.title)));
    ctx.add_line(&format!("<style>{}</style>", page_css(&project.theme_color)));
    ctx.dedent();
    ctx.add_line("</head>");

    ctx.add_line("<body>");
    ctx.indent();
    ctx.add_line("<main class=\"page\">");
    ctx.indent();
    for node in &document.nodes {
        compile_node(node, &mut ctx);
    }
    ctx.add_line(&format!(
        "<footer class=\"page-footer\">{}</footer>",
        escape_html(&options.footer)
    ));
    ctx.dedent();
    ctx.add_line("</main>");
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    ctx.get_output()
}

fn page_css(theme_color: &str) -> String {
    let theme = if is_safe_css_value(theme_color) {
        theme_color
    } else {
        pamphlet_schema::DEFAULT_THEME_COLOR
    };

    format!(
        ":root{{--theme:{}}}\
         body{{margin:0;background:#f3f4f6;font-family:sans-serif}}\
         .page{{max-width:480px;margin:0 auto;min-height:100vh;background:#fff}}\
         .page-footer{{padding:24px;text-align:center;font-size:12px;color:#9ca3af}}\
         img{{max-width:100%}}",
        theme
    )
}

/// Single CSS value with no declaration or rule separators
fn is_safe_css_value(value: &str) -> bool {
    !value.is_empty()
        && value.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '#' | '(' | ')' | ',' | '.' | ' ' | '%' | '-' | '/')
        })
}

fn compile_node(node: &VNode, ctx: &mut Context) {
    match node {
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
            ..
        } => {
            let mut open = format!("<{}", tag);
            for (name, value) in attributes {
                if value.is_empty() {
                    open.push_str(&format!(" {}", name));
                } else {
                    open.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
                }
            }
            let css = styles
                .iter()
                .filter(|(k, v)| {
                    let safe = is_safe_css_value(v);
                    if !safe {
                        tracing::warn!("Dropping unsafe style {}: {:?}", k, v);
                    }
                    safe
                })
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect::<Vec<_>>()
                .join("; ");
            if !css.is_empty() {
                open.push_str(&format!(" style=\"{}\"", escape_html(&css)));
            }
            open.push('>');

            if is_self_closing(tag) {
                ctx.add_line(&open);
                return;
            }

            // Text-only content stays on the element's line
            if children.iter().all(|c| matches!(c, VNode::Text { .. })) {
                let text: String = children
                    .iter()
                    .map(|c| escape_html(&c.text_content()))
                    .collect();
                ctx.add_line(&format!("{}{}</{}>", open, text, tag));
                return;
            }

            ctx.add_line(&open);
            ctx.indent();
            for child in children {
                compile_node(child, ctx);
            }
            ctx.dedent();
            ctx.add_line(&format!("</{}>", tag));
        }
        VNode::Text { content } => ctx.add_line(&escape_html(content)),
        VNode::Error { message } => ctx.add_line(&format!(
            "<div class=\"render-error\" role=\"alert\">{}</div>",
            escape_html(message)
        )),
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img" | "input" | "br" | "hr" | "meta" | "link" | "source" | "embed"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_text_and_attributes() {
        let node = VNode::element("p")
            .with_attr("title", "a \"b\"")
            .with_text("<script>&");
        let html = compile_node_to_html(&node, CompileOptions::compact());
        assert_eq!(html, "<p title=\"a &quot;b&quot;\">&lt;script&gt;&amp;</p>");
    }

    #[test]
    fn test_flags_and_void_elements() {
        let node = VNode::element("input")
            .with_attr("type", "email")
            .with_flag("disabled");
        let html = compile_node_to_html(&node, CompileOptions::compact());
        assert_eq!(html, "<input disabled type=\"email\">");
    }

    #[test]
    fn test_pretty_nesting() {
        let node = VNode::element("div")
            .with_style("padding", "16px")
            .with_child(VNode::element("hr"));
        let html = compile_node_to_html(&node, CompileOptions::default());
        assert_eq!(html, "<div style=\"padding: 16px\">\n  <hr>\n</div>\n");
    }

    #[test]
    fn test_unsafe_block_style_is_dropped() {
        use pamphlet_schema::{Block, BlockContent, BlockStyle, TextContent};

        let block = Block::new(
            "t",
            BlockContent::Text(TextContent { text: "안내".to_string() }),
            BlockStyle::default()
                .with_background("red; position:fixed; inset:0")
                .with_text_color("rgba(0, 0, 0, 0.8)")
                .with_padding("10px 0"),
        );
        let node = crate::render::render_block(&block, crate::render::RenderMode::ReadOnly);
        let html = compile_node_to_html(&node, CompileOptions::compact());

        assert!(!html.contains("position"));
        assert!(!html.contains("background-color: red"));
        assert!(html.contains("color: rgba(0, 0, 0, 0.8)"));
        assert!(html.contains("padding: 10px 0"));
    }

    #[test]
    fn test_unsafe_theme_color_is_replaced() {
        assert!(page_css("red;}body{display:none").contains("--theme:#3b82f6"));
        assert!(page_css("#10b981").contains("--theme:#10b981"));
    }
}
