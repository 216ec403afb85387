//! # Input Module
//!
//! Interactive reading of maze dimensions for the command-line tool.
//!
//! Bad input is answered with a one-line complaint and the question is asked
//! again. Only a closed input stream ends the loop with an error.

use crate::{config, DelveError, DelveResult};
use std::io::{BufRead, Write};

pub const ROWS_PROMPT: &str = "Enter the # of rows: ";
pub const COLUMNS_PROMPT: &str = "Enter the # of columns: ";
pub const NOT_A_NUMBER: &str = "Input must be number, try again";
pub const TOO_SMALL: &str = "Input must be positive and bigger than 5, try again";

/// Why a line of input was not accepted as a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionError {
    NotANumber,
    TooSmall,
}

impl DimensionError {
    pub fn message(self) -> &'static str {
        match self {
            DimensionError::NotANumber => NOT_A_NUMBER,
            DimensionError::TooSmall => TOO_SMALL,
        }
    }
}

/// Parses one line of input as a maze dimension.
///
/// # Examples
///
/// ```
/// use delve::{parse_dimension, DimensionError};
///
/// assert_eq!(parse_dimension(" 21\n"), Ok(21));
/// assert_eq!(parse_dimension("five"), Err(DimensionError::NotANumber));
/// assert_eq!(parse_dimension("5"), Err(DimensionError::TooSmall));
/// ```
pub fn parse_dimension(line: &str) -> Result<u32, DimensionError> {
    let value: i64 = line.trim().parse().map_err(|_| DimensionError::NotANumber)?;
    check_dimension(value)
}

/// Accepts values strictly greater than the prompt floor.
pub fn check_dimension(value: i64) -> Result<u32, DimensionError> {
    if value <= config::PROMPT_DIMENSION_FLOOR as i64 {
        return Err(DimensionError::TooSmall);
    }
    u32::try_from(value).map_err(|_| DimensionError::NotANumber)
}

/// Asks for a dimension until a valid one is entered.
///
/// Returns an I/O error if the input ends before a valid answer.
pub fn prompt_dimension<R, W>(input: &mut R, output: &mut W, prompt: &str) -> DelveResult<u32>
where
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        write!(output, "{}", prompt)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(DelveError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input closed before a dimension was entered",
            )));
        }

        match parse_dimension(&line) {
            Ok(value) => return Ok(value),
            Err(error) => writeln!(output, "{}", error.message())?,
        }
    }
}

/// Prompts for rows, then columns.
pub fn read_dimensions<R, W>(input: &mut R, output: &mut W) -> DelveResult<(u32, u32)>
where
    R: BufRead,
    W: Write,
{
    let rows = prompt_dimension(input, output, ROWS_PROMPT)?;
    let columns = prompt_dimension(input, output, COLUMNS_PROMPT)?;
    Ok((rows, columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_valid_dimension_first_try() {
        let mut input = Cursor::new("11\n");
        let mut output = Vec::new();
        assert_eq!(prompt_dimension(&mut input, &mut output, ROWS_PROMPT).unwrap(), 11);
        assert_eq!(String::from_utf8(output).unwrap(), ROWS_PROMPT);
    }

    #[test]
    fn test_reprompts_on_bad_input() {
        let mut input = Cursor::new("abc\n-3\n5\n6\n");
        let mut output = Vec::new();
        assert_eq!(prompt_dimension(&mut input, &mut output, ROWS_PROMPT).unwrap(), 6);

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches(ROWS_PROMPT).count(), 4);
        assert_eq!(text.matches(NOT_A_NUMBER).count(), 1);
        assert_eq!(text.matches(TOO_SMALL).count(), 2);
    }

    #[test]
    fn test_eof_is_io_error() {
        let mut input = Cursor::new("nope\n");
        let mut output = Vec::new();
        let result = prompt_dimension(&mut input, &mut output, COLUMNS_PROMPT);
        assert!(matches!(result, Err(DelveError::Io(_))));
    }

    #[test]
    fn test_read_dimensions_order() {
        let mut input = Cursor::new("7\n9\n");
        let mut output = Vec::new();
        assert_eq!(read_dimensions(&mut input, &mut output).unwrap(), (7, 9));
        assert_eq!(
            String::from_utf8(output).unwrap(),
            format!("{}{}", ROWS_PROMPT, COLUMNS_PROMPT)
        );
    }

    #[test]
    fn test_huge_values_rejected() {
        assert_eq!(parse_dimension("99999999999"), Err(DimensionError::NotANumber));
        assert_eq!(check_dimension(6), Ok(6));
    }
}
