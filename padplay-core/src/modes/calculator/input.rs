//! Key-by-key input validation
//!
//! The buffer only ever holds a prefix of a well-formed expression: appending
//! a digit always yields something the evaluator can parse.

/// Calculator operator characters
pub const OPERATORS: [char; 4] = ['+', '-', '*', '/'];

/// Check whether a character is an operator
pub fn is_operator(ch: char) -> bool {
    OPERATORS.contains(&ch)
}

/// Text of the number currently being typed (after the last operator)
pub fn current_segment(buffer: &str) -> &str {
    match buffer.rfind(is_operator) {
        Some(idx) => &buffer[idx + 1..],
        None => buffer,
    }
}

/// Decide whether `ch` may be appended to `buffer`
///
/// Rules:
/// - digits are always accepted
/// - `.` is rejected at the start and when the current number already has one
/// - only `-` may start the buffer (as a sign)
/// - an operator needs a digit in the current number, which rules out two
///   operators in a row and operators directly after a lone `.`
pub fn is_valid_input(buffer: &str, ch: char) -> bool {
    let segment = current_segment(buffer);

    match ch {
        '0'..='9' => true,
        '.' => !buffer.is_empty() && !segment.contains('.'),
        op if is_operator(op) => {
            if buffer.is_empty() {
                op == '-'
            } else {
                segment.bytes().any(|b| b.is_ascii_digit())
            }
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_characters() {
        assert!(is_valid_input("", '5'));
        assert!(is_valid_input("", '-'));
        assert!(!is_valid_input("", '+'));
        assert!(!is_valid_input("", '*'));
        assert!(!is_valid_input("", '/'));
        assert!(!is_valid_input("", '.'));
    }

    #[test]
    fn test_consecutive_operators_rejected() {
        assert!(is_valid_input("5", '+'));
        assert!(!is_valid_input("5+", '+'));
        assert!(!is_valid_input("5+", '-'));
        assert!(!is_valid_input("-", '*'));
    }

    #[test]
    fn test_decimal_point_per_segment() {
        assert!(is_valid_input("5", '.'));
        assert!(!is_valid_input("5.", '.'));
        assert!(!is_valid_input("5.3", '.'));
        assert!(is_valid_input("5.3+", '.'));
        assert!(is_valid_input("5.3+2", '.'));
        assert!(!is_valid_input("5.3+2.1", '.'));
    }

    #[test]
    fn test_operator_after_lone_point_rejected() {
        assert!(is_valid_input("5+", '.'));
        assert!(!is_valid_input("5+.", '*'));
        assert!(is_valid_input("5+.5", '*'));
        assert!(is_valid_input("5.", '+'));
    }

    #[test]
    fn test_foreign_characters_rejected() {
        assert!(!is_valid_input("5", '='));
        assert!(!is_valid_input("5", 'x'));
    }

    #[test]
    fn test_current_segment() {
        assert_eq!(current_segment("12+3.4"), "3.4");
        assert_eq!(current_segment("12+"), "");
        assert_eq!(current_segment("12"), "12");
    }
}
