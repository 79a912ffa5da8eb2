//! Path template resolution.
//!
//! Resource paths are written as templates with `{name}` placeholders, e.g.
//! `{+base_path}/sites/{site}/envs/{env}.json`. Resolution substitutes each
//! placeholder with the percent-encoded form of its supplied value, so
//! composite identifiers like `stage-one:mysite` become unambiguous path
//! segments. A `{+name}` placeholder is substituted literally and is used for
//! values that are already encoded, such as the configured base path.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::TemplateError;

/// Characters allowed to pass through unencoded in a substituted value.
///
/// Everything outside the URL "unreserved" set is encoded, which keeps a
/// value confined to a single path segment or query argument (`:` -> `%3A`,
/// `@` -> `%40`, `/` -> `%2F`).
const PLACEHOLDER_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Expand a path template against an ordered parameter list.
///
/// Each `{name}` placeholder is replaced by the percent-encoded form of the
/// matching parameter value; `{+name}` placeholders are replaced literally.
/// The parameters must cover the placeholders exactly.
///
/// # Errors
///
/// Returns [`TemplateError::MissingParameter`] if a placeholder has no
/// supplied value, and [`TemplateError::UnusedParameter`] if a supplied
/// value has no corresponding placeholder. The latter guards against silent
/// typos at call sites.
///
/// # Example
///
/// ```rust
/// use stratus_core::resolve_template;
///
/// let path = resolve_template(
///     "{+base_path}/sites/{site}.json",
///     &[("base_path", "/v1"), ("site", "stage-one:mysite")],
/// ).unwrap();
/// assert_eq!(path, "/v1/sites/stage-one%3Amysite.json");
/// ```
pub fn resolve_template(
    template: &str,
    params: &[(&str, &str)],
) -> Result<String, TemplateError> {
    let mut resolved = String::with_capacity(template.len());
    let mut used = vec![false; params.len()];

    let mut rest = template;
    while let Some(open) = rest.find('{') {
        resolved.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| {
            TemplateError::UnterminatedPlaceholder(template.len() - rest.len() + open)
        })?;

        let name = &after[..close];
        let (name, literal) = match name.strip_prefix('+') {
            Some(stripped) => (stripped, true),
            None => (name, false),
        };

        let position = params
            .iter()
            .position(|(key, _)| *key == name)
            .ok_or_else(|| TemplateError::MissingParameter(name.to_string()))?;
        used[position] = true;

        let value = params[position].1;
        if literal {
            resolved.push_str(value);
        } else {
            resolved.push_str(&utf8_percent_encode(value, PLACEHOLDER_VALUE).to_string());
        }

        rest = &after[close + 1..];
    }
    resolved.push_str(rest);

    if let Some(position) = used.iter().position(|consumed| !consumed) {
        return Err(TemplateError::UnusedParameter(params[position].0.to_string()));
    }

    Ok(resolved)
}
