//! Whitespace and delimiter splitting shared by the OBJ and MTL parsers.

/// First whitespace-delimited run of the line, or `""` for a blank line.
pub fn first_token(line: &str) -> &str {
    line.split_whitespace().next().unwrap_or("")
}

/// Everything after the first token and its following whitespace, with
/// trailing whitespace (including a stray `\r`) removed.
pub fn tail(line: &str) -> &str {
    let trimmed = line.trim_start();
    match trimmed.find(char::is_whitespace) {
        Some(end) => trimmed[end..].trim(),
        None => "",
    }
}

/// Splits on a single delimiter, keeping empty fields between adjacent
/// delimiters so that `5//2` yields `["5", "", "2"]`.
pub fn split_fields(line: &str, delimiter: char) -> Vec<&str> {
    line.split(delimiter).collect()
}

#[cfg(test)]
mod tests {
    use super::{first_token, split_fields, tail};

    #[test]
    fn first_token_skips_leading_whitespace() {
        assert_eq!(first_token("  \tusemtl  brick "), "usemtl");
        assert_eq!(first_token("v 1 2 3"), "v");
        assert_eq!(first_token("   "), "");
        assert_eq!(first_token(""), "");
    }

    #[test]
    fn tail_drops_directive_and_trailing_carriage_return() {
        assert_eq!(tail("o  Cube.001\r"), "Cube.001");
        assert_eq!(tail("map_Kd textures/wall brick.png "), "textures/wall brick.png");
        assert_eq!(tail("\tnewmtl\tred"), "red");
    }

    #[test]
    fn tail_of_bare_directive_is_empty() {
        assert_eq!(tail("newmtl"), "");
        assert_eq!(tail("newmtl   "), "");
        assert_eq!(tail(""), "");
    }

    #[test]
    fn split_fields_preserves_empty_runs() {
        assert_eq!(split_fields("5//2", '/'), vec!["5", "", "2"]);
        assert_eq!(split_fields("7", '/'), vec!["7"]);
        assert_eq!(split_fields("1/2/", '/'), vec!["1", "2", ""]);
    }
}
