//! Indexed placeholder expansion (`{0}`, `{1}`, ...)

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{(\d+)\}").expect("valid placeholder regex");
}

/// Substitute `{N}` with `args[N]`
///
/// A placeholder whose index has no argument is left as written. Anything
/// else in braces is not a placeholder and is copied through.
pub fn expand<S: AsRef<str>>(template: &str, args: &[S]) -> String {
    if args.is_empty() {
        return template.to_string();
    }

    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| args.get(index))
                .map(|arg| arg.as_ref().to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_in_order() {
        assert_eq!(
            expand("message {0} en nog {1}", &["ivo", "woltring"]),
            "message ivo en nog woltring"
        );
    }

    #[test]
    fn test_expand_out_of_order_and_repeated() {
        assert_eq!(expand("{1}, {0} {1}", &["James", "Bond"]), "Bond, James Bond");
    }

    #[test]
    fn test_missing_argument_left_verbatim() {
        assert_eq!(expand("{0} and {2}", &["one"]), "one and {2}");
    }

    #[test]
    fn test_no_args_returns_template() {
        let none: [&str; 0] = [];
        assert_eq!(expand("keep {0}", &none), "keep {0}");
    }

    #[test]
    fn test_non_placeholders_untouched() {
        assert_eq!(
            expand("{name} {} { 0 } {0", &["x"]),
            "{name} {} { 0 } {0"
        );
    }

    #[test]
    fn test_argument_containing_braces_not_reexpanded() {
        assert_eq!(expand("{0}-{1}", &["{1}", "b"]), "{1}-b");
    }

    #[test]
    fn test_huge_index_left_verbatim() {
        assert_eq!(
            expand("{99999999999999999999999}", &["a"]),
            "{99999999999999999999999}"
        );
    }
}
