//! Interactive city-name prompts

use std::io::{self, BufRead, Write};

use domain::value_objects::CityName;

/// Attempts before the prompt gives up
const MAX_ATTEMPTS: u32 = 3;

/// Read a validated city name from `input`, reprompting on invalid entries
///
/// Returns `None` after three invalid attempts or on end of input.
pub fn read_city_name<R, W>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> io::Result<Option<CityName>>
where
    R: BufRead,
    W: Write,
{
    for _ in 0..MAX_ATTEMPTS {
        write!(output, "{prompt}")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim_end_matches(['\r', '\n']);

        match CityName::parse(line) {
            Ok(name) => return Ok(Some(name)),
            Err(_) => writeln!(
                output,
                "Invalid input. Please enter a valid city name (letters and spaces only, \
                 not empty or just spaces)."
            )?,
        }
    }

    writeln!(output, "Too many invalid attempts. Exiting.")?;
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt_with(input: &str) -> (Option<CityName>, String) {
        let mut reader = Cursor::new(input.to_string());
        let mut output = Vec::new();
        let result = read_city_name(&mut reader, &mut output, "Enter the start city: ")
            .expect("io on in-memory buffers");
        (result, String::from_utf8(output).expect("utf8"))
    }

    #[test]
    fn valid_name_accepted_first_try() {
        let (name, output) = prompt_with("Zurich\n");
        assert_eq!(name.expect("accepted").as_str(), "Zurich");
        assert!(output.contains("Enter the start city: "));
        assert!(!output.contains("Invalid input"));
    }

    #[test]
    fn invalid_then_valid_name() {
        let (name, output) = prompt_with("Zürich2\nSt Gallen\n");
        assert_eq!(name.expect("accepted").as_str(), "St Gallen");
        assert!(output.contains("Invalid input"));
    }

    #[test]
    fn three_invalid_attempts_abort() {
        let (name, output) = prompt_with("123\n!!!\n   \nZurich\n");
        assert!(name.is_none());
        assert!(output.contains("Too many invalid attempts"));
    }

    #[test]
    fn end_of_input_aborts() {
        let (name, _) = prompt_with("");
        assert!(name.is_none());
    }

    #[test]
    fn windows_line_endings_are_trimmed() {
        let (name, _) = prompt_with("Bern\r\n");
        assert_eq!(name.expect("accepted").as_str(), "Bern");
    }
}
