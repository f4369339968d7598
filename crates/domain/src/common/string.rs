//! String conversion utilities.

/// Replaces every character that is not allowed in a file name with `_`.
///
/// Spaces are replaced as well, so the result can be used unquoted.
///
/// # Examples
///
/// ```
/// use alibi_domain::common::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Murder at 10:00?"), "Murder_at_10_00_");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | '?' | '%' | '*' | ':' | '|' | '"' | '<' | '>' | ' ' => '_',
            other => other,
        })
        .collect()
}

/// Extension trait for strings providing `into_option` as a method.
///
/// # Examples
///
/// ```
/// use alibi_domain::common::StringExt;
///
/// assert_eq!("hello".to_string().into_option(), Some("hello".to_string()));
/// assert_eq!(String::new().into_option(), None);
/// ```
pub trait StringExt {
    /// Converts this string to `None` if it is blank, otherwise `Some(self)`.
    fn into_option(self) -> Option<String>;
}

impl StringExt for String {
    fn into_option(self) -> Option<String> {
        if self.trim().is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_replaces_reserved_characters() {
        assert_eq!(sanitize_filename(r#"a/b\c?d%e*f:g|h"i<j>k l"#), "a_b_c_d_e_f_g_h_i_j_k_l");
    }

    #[test]
    fn test_sanitize_filename_keeps_unicode() {
        assert_eq!(sanitize_filename("とある 事件"), "とある_事件");
    }

    #[test]
    fn test_string_ext_blank_is_none() {
        assert_eq!("   ".to_string().into_option(), None);
        assert_eq!(" x ".to_string().into_option(), Some(" x ".to_string()));
    }
}
