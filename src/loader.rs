use std::fs;
use std::path::Path;

use log::debug;
use rayon::prelude::*;

use crate::error::LoadError;

/// Parses the line-per-byte binary text format. The first malformed line
/// aborts the whole parse.
pub fn parse(source: &str) -> Result<Vec<u8>, LoadError> {
    let lines = source.lines().enumerate().collect::<Vec<(usize, &str)>>();

    let parsed = lines
        .par_iter()
        .map(|(i, line)| parse_line(i + 1, line))
        .collect::<Vec<Result<Option<u8>, LoadError>>>();

    let mut program = Vec::with_capacity(parsed.len());
    for line in parsed {
        if let Some(byte) = line? {
            program.push(byte);
        }
    }

    debug!("parsed {} program bytes from {} lines", program.len(), lines.len());
    Ok(program)
}

pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<u8>, LoadError> {
    parse(&fs::read_to_string(path)?)
}

fn parse_line(line: usize, text: &str) -> Result<Option<u8>, LoadError> {
    let literal = text.split('#').next().unwrap_or_default().trim();
    if literal.is_empty() {
        return Ok(None);
    }

    let invalid = || LoadError::InvalidLiteral {
        line,
        text: literal.to_string(),
    };

    if literal.len() != 8 || !literal.chars().all(|c| c == '0' || c == '1') {
        return Err(invalid());
    }

    u8::from_str_radix(literal, 2).map(Some).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_blank_and_comment_lines() {
        let source = "# print8\n\n10000010 # LDI R0,8\n00000000\n00001000\n   \n01000111\n00000000\n00000001 # HLT\n";
        assert_eq!(
            parse(source).unwrap(),
            vec![0b1000_0010, 0, 8, 0b0100_0111, 0, 0b0000_0001]
        );
    }

    #[test]
    fn reports_first_malformed_line() {
        let source = "10000010\n0000000x\n00001000\n2\n";
        match parse(source) {
            Err(LoadError::InvalidLiteral { line, text }) => {
                assert_eq!(line, 2);
                assert_eq!(text, "0000000x");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn literals_must_be_eight_digits_wide() {
        assert!(matches!(
            parse("101\n"),
            Err(LoadError::InvalidLiteral { line: 1, .. })
        ));
        assert!(matches!(
            parse("00000001\n000000001\n"),
            Err(LoadError::InvalidLiteral { line: 2, .. })
        ));
        assert_eq!(parse("  11111111  # max\n").unwrap(), vec![255]);
    }

    #[test]
    fn rejects_signed_literals() {
        assert!(matches!(
            parse("+0000001\n"),
            Err(LoadError::InvalidLiteral { line: 1, .. })
        ));
    }
}
