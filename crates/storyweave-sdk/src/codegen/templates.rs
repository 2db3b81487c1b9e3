//! Askama template structs for rendering widget components and embed snippets.
//!
//! JSX fields are pre-escaped ([`JsLiteral`] or [`StyleObject`]), so the
//! component templates run with escaping disabled. The embed snippet is HTML
//! and leaves attribute escaping to Askama.

use askama::Template;

use super::component::{ComponentDef, Fragment};
use super::escape::{JsLiteral, StyleObject};
use super::{styles, CodegenError};

// =========================================================================
// Component template
// =========================================================================

#[derive(Template, Debug)]
#[template(path = "codegen/component.jsx", escape = "none")]
struct ComponentTemplate<'a> {
    name: &'a str,
    title: &'a JsLiteral,
    container_style: &'a StyleObject,
    heading_style: StyleObject,
    results_style: StyleObject,
    fragments: &'a [String],
}

/// Render the complete component module for a lowered widget.
pub(crate) fn render_component(def: &ComponentDef) -> Result<String, CodegenError> {
    let fragments = def
        .fragments
        .iter()
        .map(render_fragment)
        .collect::<Result<Vec<_>, _>>()?;

    let template = ComponentTemplate {
        name: &def.name,
        title: &def.title,
        container_style: &def.container_style,
        heading_style: styles::heading(),
        results_style: styles::results_panel(),
        fragments: &fragments,
    };
    let mut code = render(&template)?;
    if !code.ends_with('\n') {
        code.push('\n');
    }
    Ok(code)
}

// =========================================================================
// Fragment templates
// =========================================================================

#[derive(Template, Debug)]
#[template(path = "codegen/text.jsx", escape = "none")]
struct TextFragmentTemplate<'a> {
    id: &'a JsLiteral,
    content: &'a JsLiteral,
    style: &'a StyleObject,
}

#[derive(Template, Debug)]
#[template(path = "codegen/input.jsx", escape = "none")]
struct InputFragmentTemplate<'a> {
    id: &'a JsLiteral,
    label: &'a JsLiteral,
    placeholder: &'a JsLiteral,
    wrapper_style: StyleObject,
    label_style: StyleObject,
    input_style: StyleObject,
}

#[derive(Template, Debug)]
#[template(path = "codegen/button.jsx", escape = "none")]
struct ButtonFragmentTemplate<'a> {
    id: &'a JsLiteral,
    label: &'a JsLiteral,
    style: &'a StyleObject,
}

#[derive(Debug)]
struct QuestionOption<'a> {
    /// JSX `key` attribute value, e.g. `{0}`.
    key: String,
    value: &'a JsLiteral,
}

#[derive(Template, Debug)]
#[template(path = "codegen/question.jsx", escape = "none")]
struct QuestionFragmentTemplate<'a> {
    id: &'a JsLiteral,
    label: &'a JsLiteral,
    options: Vec<QuestionOption<'a>>,
    wrapper_style: StyleObject,
    prompt_style: StyleObject,
    option_style: StyleObject,
    radio_style: StyleObject,
}

#[derive(Template, Debug)]
#[template(path = "codegen/placeholder.jsx", escape = "none")]
struct PlaceholderFragmentTemplate<'a> {
    id: &'a JsLiteral,
    kind: &'a JsLiteral,
    message: &'a JsLiteral,
    style: StyleObject,
}

/// Render one fragment. The result carries its own indentation and no
/// trailing newline.
pub(crate) fn render_fragment(fragment: &Fragment) -> Result<String, CodegenError> {
    let output = match fragment {
        Fragment::Text { id, content, style } => render(&TextFragmentTemplate { id, content, style }),
        Fragment::Input {
            id,
            label,
            placeholder,
        } => render(&InputFragmentTemplate {
            id,
            label,
            placeholder,
            wrapper_style: styles::field_wrapper(),
            label_style: styles::field_label(),
            input_style: styles::text_input(),
        }),
        Fragment::Button { id, label, style } => render(&ButtonFragmentTemplate { id, label, style }),
        Fragment::Question { id, label, options } => render(&QuestionFragmentTemplate {
            id,
            label,
            options: options
                .iter()
                .enumerate()
                .map(|(index, value)| QuestionOption {
                    key: format!("{{{index}}}"),
                    value,
                })
                .collect(),
            wrapper_style: styles::field_wrapper(),
            prompt_style: styles::question_prompt(),
            option_style: styles::field_label(),
            radio_style: styles::radio_input(),
        }),
        Fragment::Placeholder { id, kind, message } => render(&PlaceholderFragmentTemplate {
            id,
            kind,
            message,
            style: styles::placeholder(),
        }),
    }?;

    Ok(output.trim_end().to_string())
}

// =========================================================================
// Embed template
// =========================================================================

#[derive(Template, Debug)]
#[template(path = "codegen/embed.html", escape = "html")]
struct EmbedTemplate<'a> {
    /// Raw container element id, escaped by the template.
    container_id: &'a str,
    /// Title made safe for a `//` comment. Empty omits the ` for ...` suffix.
    title_comment: &'a str,
    script_url: &'a JsLiteral,
}

pub(crate) fn render_embed(
    container_id: &str,
    title_comment: &str,
    script_url: &JsLiteral,
) -> Result<String, CodegenError> {
    let template = EmbedTemplate {
        container_id,
        title_comment,
        script_url,
    };
    let mut code = render(&template)?;
    if !code.ends_with('\n') {
        code.push('\n');
    }
    Ok(code)
}

fn render<T: Template>(template: &T) -> Result<String, CodegenError> {
    template
        .render()
        .map_err(|e| CodegenError::Rendering(e.to_string()))
}
