//! `${env:NAME}` placeholder expansion for configuration strings.

/// Replace every `${env:NAME}` in `input` with the value of environment
/// variable `NAME`.
///
/// Placeholders naming an unset variable, and unterminated placeholders,
/// are left as written.
pub fn expand_env_placeholders(input: &str) -> String {
    const OPEN: &str = "${env:";

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + OPEN.len()..];
        let Some(end) = after_open.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = &after_open[..end];
        match std::env::var(name) {
            Ok(value) => out.push_str(&value),
            _ => out.push_str(&rest[start..start + OPEN.len() + end + 1]),
        }
        rest = &after_open[end + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_placeholders_is_identity() {
        assert_eq!(expand_env_placeholders("/dev/ttyUSB0"), "/dev/ttyUSB0");
    }

    #[test]
    fn replaces_set_variable() {
        std::env::set_var("CYCLICBUF_TEST_EXPAND_PORT", "ttyACM1");
        assert_eq!(
            expand_env_placeholders("/dev/${env:CYCLICBUF_TEST_EXPAND_PORT}"),
            "/dev/ttyACM1"
        );
        std::env::remove_var("CYCLICBUF_TEST_EXPAND_PORT");
    }

    #[test]
    fn replaces_several_placeholders() {
        std::env::set_var("CYCLICBUF_TEST_EXPAND_A", "x");
        std::env::set_var("CYCLICBUF_TEST_EXPAND_B", "y");
        let input = concat!(
            "${env:CYCLICBUF_TEST_EXPAND_A}",
            "-",
            "${env:CYCLICBUF_TEST_EXPAND_B}"
        );
        assert_eq!(expand_env_placeholders(input), "x-y");
        std::env::remove_var("CYCLICBUF_TEST_EXPAND_A");
        std::env::remove_var("CYCLICBUF_TEST_EXPAND_B");
    }

    #[test]
    fn unset_variable_is_kept() {
        assert_eq!(
            expand_env_placeholders("${env:CYCLICBUF_TEST_EXPAND_UNSET}"),
            "${env:CYCLICBUF_TEST_EXPAND_UNSET}"
        );
    }

    #[test]
    fn unterminated_placeholder_is_kept() {
        assert_eq!(expand_env_placeholders("COM${env:OOPS"), "COM${env:OOPS");
    }
}
