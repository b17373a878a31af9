//! SVG markup to UI-component source.
//!
//! Purely textual: the markup is never parsed, only rewritten.

use std::sync::LazyLock;

use minijinja::{Environment, context};
use regex::{Captures, Regex};

use crate::error::SvgError;

const COMPONENT_TEMPLATE: &str = r#"export default function {{ name }}({ className{{ class_default }} }: { className?: string }) {
  return (
    {{ markup }}
  );
}"#;

/// Prefix of generated component names.
pub const DEFAULT_COMPONENT_PREFIX: &str = "Icon";

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static RE_OPEN_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([A-Za-z][^\s/>]*)([^>]*)>").unwrap());
static RE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\s+)([^\s=/>"']+)(\s*=\s*)("[^"]*"|'[^']*')"#).unwrap()
});

/// Name for the component generated from the `index`-th SVG: `Icon1`,
/// `Icon2`, ...
pub fn component_name(index: usize) -> String {
    component_name_with_prefix(DEFAULT_COMPONENT_PREFIX, index)
}

pub fn component_name_with_prefix(prefix: &str, index: usize) -> String {
    format!("{}{}", prefix, index + 1)
}

/// Generate component source embedding `svg_markup`.
///
/// The component takes one optional `className` prop, bound on the root
/// `svg` tag. A static `class` on the root becomes the prop's default.
/// `component_name` is used as given; it is not checked for being a valid
/// identifier.
pub fn generate_component(svg_markup: &str, component_name: &str) -> Result<String, SvgError> {
    let collapsed = RE_WHITESPACE.replace_all(svg_markup, " ");
    let collapsed = collapsed.trim();

    let mut root_class = None;
    let mut seen_root = false;
    let markup = RE_OPEN_TAG.replace_all(collapsed, |caps: &Captures| {
        let name = &caps[1];
        let attrs = rename_attributes(&caps[2]);

        if seen_root || name != "svg" {
            return format!("<{name}{attrs}>");
        }
        seen_root = true;

        let (class, attrs) = take_class_name(&attrs);
        root_class = class;
        format!("<{name} className={{className}}{attrs}>")
    });

    let class_default = match root_class {
        Some(class) => format!(" = {}", serde_json::Value::String(class)),
        None => String::new(),
    };

    let mut env = Environment::new();
    env.add_template("component.tsx", COMPONENT_TEMPLATE)?;
    let source = env.get_template("component.tsx")?.render(context! {
        name => component_name,
        class_default => class_default,
        markup => markup.as_ref(),
    })?;
    Ok(source)
}

fn rename_attributes(attrs: &str) -> String {
    RE_ATTR
        .replace_all(attrs, |caps: &Captures| {
            format!(
                "{}{}{}{}",
                &caps[1],
                jsx_attribute_name(&caps[2]),
                &caps[3],
                &caps[4]
            )
        })
        .into_owned()
}

/// Remove a `className` attribute, returning its unquoted value.
fn take_class_name(attrs: &str) -> (Option<String>, String) {
    let found = RE_ATTR
        .captures_iter(attrs)
        .find(|caps| &caps[2] == "className");
    let Some(caps) = found else {
        return (None, attrs.to_string());
    };
    let Some(whole) = caps.get(0) else {
        return (None, attrs.to_string());
    };

    let quoted = &caps[4];
    let value = quoted[1..quoted.len() - 1].to_string();
    let rest = format!("{}{}", &attrs[..whole.start()], &attrs[whole.end()..]);
    (Some(value), rest)
}

/// Attribute name as the UI framework spells it.
fn jsx_attribute_name(name: &str) -> String {
    if name == "class" {
        return "className".into();
    }
    if name.starts_with("data-") || name.starts_with("aria-") {
        return name.into();
    }

    let mut out = String::with_capacity(name.len());
    let mut separator = None;
    for c in name.chars() {
        match (separator.take(), c) {
            (None, ':' | '-') => separator = Some(c),
            (Some(_), c) if c.is_ascii_lowercase() => out.push(c.to_ascii_uppercase()),
            (Some(sep), c) => {
                out.push(sep);
                if c == ':' || c == '-' {
                    separator = Some(c);
                } else {
                    out.push(c);
                }
            }
            (None, c) => out.push(c),
        }
    }
    if let Some(sep) = separator {
        out.push(sep);
    }
    out
}
