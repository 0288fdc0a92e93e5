//! Assertion helpers for testing.

pub use pretty_assertions::{assert_eq, assert_ne};

/// Assert that a result is an error with a specific message
#[macro_export]
macro_rules! assert_error_contains {
    ($result:expr, $expected:expr) => {
        match $result {
            Ok(_) => panic!("Expected error but got Ok"),
            Err(e) => {
                let error_msg = format!("{}", e);
                assert!(
                    error_msg.contains($expected),
                    "Expected error message to contain '{}', but got: '{}'",
                    $expected,
                    error_msg
                );
            }
        }
    };
}

/// Assert that every name in `names` is lowercase.
pub fn assert_lowercase_names<'a>(names: impl IntoIterator<Item = &'a str>) {
    for name in names {
        assert!(
            !name.chars().any(char::is_uppercase),
            "header name {:?} is not lowercase",
            name
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_error_contains() {
        let result: Result<(), String> = Err("baseUrl must be a valid absolute URL".into());
        assert_error_contains!(result, "absolute URL");
    }

    #[test]
    #[should_panic(expected = "Expected error but got Ok")]
    fn test_assert_error_contains_on_ok() {
        let result: Result<(), String> = Ok(());
        assert_error_contains!(result, "anything");
    }

    #[test]
    #[should_panic(expected = "not lowercase")]
    fn test_assert_lowercase_names() {
        assert_lowercase_names(["accept", "Content-Type"]);
    }
}
