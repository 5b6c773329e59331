//! Positional fragment templates.
//!
//! Templates reference arguments by index (`{0}`, `{1}`, ...). Literal braces
//! are written doubled (`{{`, `}}`). The template text is otherwise copied
//! verbatim; nothing inside it is interpreted as SQL.

use crate::error::{ComposeError, ComposeResult};
use std::fmt::Display;

/// Fill `template` with `args`.
///
/// Every placeholder must name an existing argument, and every argument must
/// be referenced at least once.
///
/// # Example
/// ```
/// use tabsql::compose::fill;
///
/// let s = fill("{0} = {1}", &[&"id", &42]).unwrap();
/// assert_eq!(s, "id = 42");
/// ```
pub fn fill(template: &str, args: &[&dyn Display]) -> ComposeResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut used = vec![false; args.len()];
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' => {
                if chars.next_if(|&(_, c)| c == '{').is_some() {
                    out.push('{');
                    continue;
                }

                let mut digits = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    digits.push(c);
                }
                if !closed {
                    return Err(ComposeError::format(
                        template,
                        format!("unterminated placeholder at byte {pos}"),
                    ));
                }

                let index: usize = digits.trim().parse().map_err(|_| {
                    ComposeError::format(template, format!("invalid placeholder '{{{digits}}}'"))
                })?;
                let Some(arg) = args.get(index) else {
                    return Err(ComposeError::format(
                        template,
                        format!(
                            "placeholder {{{index}}} has no argument ({} supplied)",
                            args.len()
                        ),
                    ));
                };
                used[index] = true;
                out.push_str(&arg.to_string());
            }
            '}' => {
                if chars.next_if(|&(_, c)| c == '}').is_some() {
                    out.push('}');
                } else {
                    return Err(ComposeError::format(
                        template,
                        format!("unmatched '}}' at byte {pos}"),
                    ));
                }
            }
            _ => out.push(c),
        }
    }

    if let Some(unused) = used.iter().position(|u| !u) {
        return Err(ComposeError::format(
            template,
            format!(
                "argument {unused} is never referenced ({} supplied)",
                args.len()
            ),
        ));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_positionally() {
        assert_eq!(fill("{1} > {0}", &[&1, &"b"]).unwrap(), "b > 1");
    }

    #[test]
    fn repeats_placeholders() {
        assert_eq!(fill("{0} = {0}", &[&"x"]).unwrap(), "x = x");
    }

    #[test]
    fn template_without_placeholders_passes_through() {
        assert_eq!(fill("status = 'active'", &[]).unwrap(), "status = 'active'");
    }

    #[test]
    fn escaped_braces() {
        assert_eq!(fill("'{{{0}}}'", &[&"k"]).unwrap(), "'{k}'");
    }

    #[test]
    fn missing_argument_is_an_error() {
        let err = fill("a = {0} AND b = {1}", &[&1]).unwrap_err();
        assert!(err.is_format_argument());
        assert!(err.to_string().contains("placeholder {1}"));
    }

    #[test]
    fn unused_argument_is_an_error() {
        let err = fill("a = {0}", &[&1, &2]).unwrap_err();
        assert!(err.to_string().contains("argument 1 is never referenced"));
    }

    #[test]
    fn malformed_placeholders() {
        assert!(fill("a = {0", &[&1]).is_err());
        assert!(fill("a = {x}", &[&1]).is_err());
        assert!(fill("a = }", &[]).is_err());
    }
}
