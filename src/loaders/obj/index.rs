use std::io;
use std::path::PathBuf;

use super::error::ObjError;

/// Best-effort integer parse of an OBJ index, converted from 1-based to
/// 0-based. A token without a numeric prefix reads as 0 and so yields -1.
/// Relative (negative) indices are not resolved.
pub fn parse_index(raw: &str) -> i64 {
    parse_int_prefix(raw).saturating_sub(1)
}

/// Best-effort float parse. The longest numeric prefix is used and a token
/// with none reads as 0.0.
pub fn parse_float(raw: &str) -> f32 {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<f32>() {
        return value;
    }
    raw[..float_prefix_len(raw)].parse::<f32>().unwrap_or(0.0)
}

pub fn parse_int(raw: &str) -> i64 {
    parse_int_prefix(raw)
}

fn parse_int_prefix(raw: &str) -> i64 {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<i64>() {
        return value;
    }

    let bytes = raw.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return 0;
    }

    // only overflow can fail here
    raw[..end].parse::<i64>().unwrap_or(if bytes[0] == b'-' {
        i64::MIN
    } else {
        i64::MAX
    })
}

fn float_prefix_len(raw: &str) -> usize {
    let bytes = raw.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let mantissa_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - mantissa_start;
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        let fraction_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        digits += end - fraction_start;
    }
    if digits == 0 {
        return 0;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+') | Some(b'-')) {
            exponent_end += 1;
        }
        let exponent_digits_start = exponent_end;
        while exponent_end < bytes.len() && bytes[exponent_end].is_ascii_digit() {
            exponent_end += 1;
        }
        if exponent_end > exponent_digits_start {
            end = exponent_end;
        }
    }

    end
}

/// Numeric parsing for one input file. Always lenient; in reporting mode a
/// token that does not parse completely is also recorded as
/// [`ObjError::MalformedToken`]. Read failures of the same file are
/// collected here too, so every report names the file it came from.
#[derive(Debug, Default)]
pub struct NumericReader {
    file: PathBuf,
    report: bool,
    reported: Vec<ObjError>,
}

impl NumericReader {
    pub fn new(report: bool) -> Self {
        Self::for_file(PathBuf::new(), report)
    }

    pub fn for_file(file: impl Into<PathBuf>, report: bool) -> Self {
        Self {
            file: file.into(),
            report,
            reported: Vec::new(),
        }
    }

    pub fn float(&mut self, raw: &str, line_number: usize) -> f32 {
        if self.report && raw.trim().parse::<f32>().is_err() {
            self.flag(raw, line_number);
        }
        parse_float(raw)
    }

    pub fn int(&mut self, raw: &str, line_number: usize) -> i64 {
        if self.report && raw.trim().parse::<i64>().is_err() {
            self.flag(raw, line_number);
        }
        parse_int(raw)
    }

    pub fn index(&mut self, raw: &str, line_number: usize) -> i64 {
        if self.report && raw.trim().parse::<i64>().is_err() {
            self.flag(raw, line_number);
        }
        parse_index(raw)
    }

    /// Reads up to `N` whitespace-separated floats; missing components are 0.
    pub fn floats<const N: usize>(&mut self, rest: &str, line_number: usize) -> [f32; N] {
        let mut out = [0.0; N];
        let mut fields = rest.split_whitespace();
        for component in out.iter_mut() {
            match fields.next() {
                Some(raw) => *component = self.float(raw, line_number),
                None if self.report => self.flag("", line_number),
                None => {}
            }
        }
        out
    }

    /// Records an I/O error that ended reading at `line_number`. Always kept,
    /// whatever the reporting mode.
    pub fn read_failed(&mut self, line_number: usize, source: io::Error) {
        let error = ObjError::ReadFailed {
            file: self.file.clone(),
            line: line_number,
            source,
        };
        log::warn!("stopped reading input: {}", error);
        self.reported.push(error);
    }

    pub fn take_reports(&mut self) -> Vec<ObjError> {
        std::mem::take(&mut self.reported)
    }

    fn flag(&mut self, raw: &str, line_number: usize) {
        let error = ObjError::MalformedToken {
            file: self.file.clone(),
            line: line_number,
            token: raw.to_string(),
        };
        log::warn!("{}", error);
        self.reported.push(error);
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::Path;

    use super::{parse_float, parse_index, parse_int, NumericReader};
    use crate::loaders::obj::error::ObjError;

    #[test]
    fn index_is_shifted_to_zero_based() {
        assert_eq!(parse_index("1"), 0);
        assert_eq!(parse_index("42"), 41);
    }

    #[test]
    fn index_without_digits_reads_as_minus_one() {
        assert_eq!(parse_index(""), -1);
        assert_eq!(parse_index("abc"), -1);
        assert_eq!(parse_index("12abc"), 11);
    }

    #[test]
    fn negative_index_passes_through_unresolved() {
        assert_eq!(parse_index("-1"), -2);
    }

    #[test]
    fn float_uses_longest_numeric_prefix() {
        assert_eq!(parse_float("1.5"), 1.5);
        assert_eq!(parse_float("-2.25e1"), -22.5);
        assert_eq!(parse_float("3.5abc"), 3.5);
        assert_eq!(parse_float("4e"), 4.0);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("nope"), 0.0);
        assert_eq!(parse_float("-"), 0.0);
    }

    #[test]
    fn int_is_best_effort() {
        assert_eq!(parse_int("2"), 2);
        assert_eq!(parse_int(" 7 "), 7);
        assert_eq!(parse_int("x"), 0);
    }

    #[test]
    fn reader_is_silent_unless_reporting() {
        let mut quiet = NumericReader::new(false);
        assert_eq!(quiet.float("bad", 3), 0.0);
        assert!(quiet.take_reports().is_empty());

        let mut strict = NumericReader::for_file("mesh.obj", true);
        assert_eq!(strict.float("1.0x", 9), 1.0);
        assert_eq!(strict.index("2", 9), 1);
        let reported = strict.take_reports();
        assert_eq!(reported.len(), 1);
        match &reported[0] {
            ObjError::MalformedToken { file, line, token } => {
                assert_eq!(file, Path::new("mesh.obj"));
                assert_eq!(*line, 9);
                assert_eq!(token, "1.0x");
            }
            other => panic!("unexpected diagnostic {:?}", other),
        }
    }

    #[test]
    fn floats_fill_missing_components_with_zero() {
        let mut reader = NumericReader::new(false);
        assert_eq!(reader.floats::<3>("1 2", 1), [1.0, 2.0, 0.0]);
        assert_eq!(reader.floats::<2>("0.25 0.75 1.0", 1), [0.25, 0.75]);
    }

    #[test]
    fn read_failures_are_kept_even_when_quiet() {
        let mut reader = NumericReader::for_file("scene.mtl", false);
        reader.read_failed(4, io::Error::new(io::ErrorKind::Other, "disk gone"));
        match reader.take_reports().as_slice() {
            [ObjError::ReadFailed { file, line, .. }] => {
                assert_eq!(file, Path::new("scene.mtl"));
                assert_eq!(*line, 4);
            }
            other => panic!("unexpected diagnostics {:?}", other),
        }
    }
}
