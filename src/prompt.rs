use chrono::NaiveDate;
use log::info;
use std::fmt::Display;
use std::io::{BufRead, Write};

use crate::errors::{LoanError, Result};
use crate::loan::{format_rate, LoanRecord, INPUT_DATE_FORMAT};

/// Line-oriented console over any reader/writer pair.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `prompt` and returns the next input line, trimmed.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(LoanError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

/// A field answer: either a freshly parsed value or a request to keep the
/// existing one.
#[derive(Clone, PartialEq, Debug)]
pub enum Field<T> {
    Keep,
    New(T),
}

impl<T> Field<T> {
    /// Empty input means `Keep` when there is something to keep; otherwise
    /// the line goes through `parse`.
    pub fn read<P>(line: &str, keep_allowed: bool, parse: P) -> Result<Self>
    where
        P: Fn(&str) -> Result<T>,
    {
        if line.is_empty() && keep_allowed {
            return Ok(Field::Keep);
        }
        parse(line).map(Field::New)
    }

    pub fn merge(self, existing: T) -> T {
        match self {
            Field::Keep => existing,
            Field::New(value) => value,
        }
    }
}

pub fn parse_amount(input: &str) -> Result<f64> {
    let amount = parse_number(input)?;
    if amount < 0. {
        return Err(LoanError::NegativeAmount(input.to_string()));
    }
    // -0 compares equal to zero but would print as "-0.00"
    Ok(if amount == 0. { 0. } else { amount })
}

pub fn parse_rate(input: &str) -> Result<f64> {
    parse_number(input)
}

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let bad_date = || LoanError::Parse {
        input: input.to_string(),
        expected: "date (expected dd-mm-yyyy)",
    };
    // chrono's %Y takes any number of digits and a sign, so pin the shape first
    if !is_date_shaped(input) {
        return Err(bad_date());
    }
    NaiveDate::parse_from_str(input, INPUT_DATE_FORMAT).map_err(|_| bad_date())
}

fn is_date_shaped(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

pub fn parse_text(input: &str) -> Result<String> {
    Ok(input.to_string())
}

fn parse_number(input: &str) -> Result<f64> {
    match input.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LoanError::Parse {
            input: input.to_string(),
            expected: "number",
        }),
    }
}

/// Asks for one field until the answer parses. With an `existing` value the
/// prompt shows it and an empty answer keeps it.
pub fn prompt_field<R, W, T, S, P>(
    console: &mut Console<R, W>,
    label: &str,
    existing: Option<&T>,
    show: S,
    parse: P,
) -> Result<T>
where
    R: BufRead,
    W: Write,
    T: Clone,
    S: Fn(&T) -> String,
    P: Fn(&str) -> Result<T>,
{
    let prompt = match existing {
        Some(value) => format!("{} [{}]: ", label, show(value)),
        None => format!("{}: ", label),
    };

    loop {
        let line = console.ask(&prompt)?;
        match Field::read(&line, existing.is_some(), &parse) {
            Ok(Field::New(value)) => return Ok(value),
            Ok(Field::Keep) => {
                if let Some(value) = existing {
                    return Ok(value.clone());
                }
            }
            Err(e) => {
                info!("{}: rejected '{}'", label, line);
                writeln!(console.out(), "{}", e)?;
            }
        }
    }
}

fn show_date(date: &NaiveDate) -> String {
    date.format(INPUT_DATE_FORMAT).to_string()
}

fn show<T: Display>(value: &T) -> String {
    value.to_string()
}

/// Builds a complete loan record from the console, one field at a time.
///
/// `existing` supplies per-field defaults when updating an entry.
/// `default_currency` is offered for new entries only.
pub fn prompt_loan<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    existing: Option<&LoanRecord>,
    default_currency: Option<&str>,
) -> Result<LoanRecord> {
    let principal = prompt_field(
        console,
        "Loan amount",
        existing.map(|l| &l.principal),
        |p| format!("{:.2}", p),
        parse_amount,
    )?;

    let currency_default = existing
        .map(|l| l.currency.clone())
        .or_else(|| default_currency.map(str::to_string));
    let currency = prompt_field(
        console,
        "Loan currency",
        currency_default.as_ref(),
        show,
        parse_text,
    )?;

    let base_rate = prompt_field(
        console,
        "Base interest rate (%)",
        existing.map(|l| &l.base_rate),
        |r| format_rate(*r),
        parse_rate,
    )?;
    let margin = prompt_field(
        console,
        "Margin (%)",
        existing.map(|l| &l.margin),
        |r| format_rate(*r),
        parse_rate,
    )?;

    let start_date = prompt_field(
        console,
        "Start date (dd-mm-yyyy)",
        existing.map(|l| &l.start_date),
        show_date,
        parse_date,
    )?;
    let end_date = prompt_field(
        console,
        "End date (dd-mm-yyyy)",
        existing.map(|l| &l.end_date),
        show_date,
        parse_date,
    )?;

    Ok(LoanRecord::new(
        start_date, end_date, principal, currency, base_rate, margin,
    ))
}

#[cfg(test)]
mod tests {
    use super::{parse_amount, parse_date, parse_rate, prompt_loan, Console, Field};
    use crate::errors::LoanError;
    use crate::loan::LoanRecord;
    use chrono::NaiveDate;
    use std::io::Cursor;
    use test_log::test;

    fn console(script: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_parts().1).unwrap()
    }

    fn sample() -> LoanRecord {
        LoanRecord::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
            1000.,
            "$",
            5.,
            2.,
        )
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1000").unwrap(), 1000.);
        assert_eq!(parse_amount("1000.50").unwrap(), 1000.5);
        assert_eq!(parse_amount("0").unwrap(), 0.);
        assert_eq!(parse_amount("1e3").unwrap(), 1000.);

        for bad in ["", "abc", "1,000", "12.3.4", "nan", "inf"] {
            assert!(
                matches!(parse_amount(bad), Err(LoanError::Parse { .. })),
                "{} should not parse",
                bad
            );
        }
        assert_eq!(parse_amount("-0").unwrap().to_bits(), 0f64.to_bits());
        assert_eq!(parse_amount("-0.00").unwrap().to_bits(), 0f64.to_bits());

        assert!(matches!(
            parse_amount("-5"),
            Err(LoanError::NegativeAmount(_))
        ));
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate("5").unwrap(), 5.);
        assert_eq!(parse_rate("2.25").unwrap(), 2.25);
        assert_eq!(parse_rate("-0.5").unwrap(), -0.5);
        assert!(parse_rate("five").is_err());
        assert!(parse_rate("").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("01-01-2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(
            parse_date("29-02-2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );

        for bad in [
            "2024-01-01",
            "01/01/2024",
            "31-02-2024",
            "29-02-2023",
            "01-13-2024",
            "",
            "01-01-2024x",
            "01-01-24",
            "01-01-+2024",
            "01-01-20240",
            "1-1-2024",
            "+1-01-2024",
        ] {
            assert!(parse_date(bad).is_err(), "{} should not parse", bad);
        }

        assert_eq!(
            parse_date("tomorrow").unwrap_err().to_string(),
            "'tomorrow' is not a valid date (expected dd-mm-yyyy)"
        );
    }

    #[test]
    fn test_field_read_and_merge() {
        let keep: Field<f64> = Field::read("", true, parse_rate).unwrap();
        assert_eq!(keep, Field::Keep);
        assert_eq!(keep.merge(3.), 3.);

        let new = Field::read("4.5", true, parse_rate).unwrap();
        assert_eq!(new, Field::New(4.5));
        assert_eq!(new.merge(3.), 4.5);

        // nothing to keep, so empty input must parse
        assert!(Field::read("", false, parse_rate).is_err());
    }

    #[test]
    fn test_prompt_new_loan() {
        let mut console = console("1000.00\n$\n5\n2\n01-01-2024\n04-01-2024\n");
        let loan = prompt_loan(&mut console, None, None).unwrap();
        assert_eq!(loan, sample());
        assert_eq!(loan.total_rate(), 7.);

        let text = output(console);
        assert!(text.starts_with("Loan amount: Loan currency: "));
        assert!(text.contains("End date (dd-mm-yyyy): "));
    }

    #[test]
    fn test_prompt_reprompts_until_valid() {
        let script = "lots\n-10\n1000\n$\nfive\n5\n2\nJan 1st\n01-01-2024\n2024-01-04\n04-01-24\n04-01-2024\n";
        let mut console = console(script);
        let loan = prompt_loan(&mut console, None, None).unwrap();
        assert_eq!(loan, sample());

        let text = output(console);
        assert!(text.contains("'lots' is not a valid number"));
        assert!(text.contains("'-10' is negative; the loan amount must be zero or more"));
        assert!(text.contains("'five' is not a valid number"));
        assert!(text.contains("'Jan 1st' is not a valid date (expected dd-mm-yyyy)"));
        assert!(text.contains("'2024-01-04' is not a valid date (expected dd-mm-yyyy)"));
        assert_eq!(text.matches("Loan amount: ").count(), 3);
        assert!(text.contains("'04-01-24' is not a valid date (expected dd-mm-yyyy)"));
        assert_eq!(text.matches("End date (dd-mm-yyyy): ").count(), 3);
    }

    #[test]
    fn test_prompt_update_keeps_blank_fields() {
        let existing = sample();
        let mut console = console("\n\n\n\n\n\n");
        let loan = prompt_loan(&mut console, Some(&existing), None).unwrap();
        assert_eq!(loan, existing);

        let text = output(console);
        assert!(text.contains("Loan amount [1000.00]: "));
        assert!(text.contains("Loan currency [$]: "));
        assert!(text.contains("Base interest rate (%) [5]: "));
        assert!(text.contains("Margin (%) [2]: "));
        assert!(text.contains("Start date (dd-mm-yyyy) [01-01-2024]: "));
        assert!(text.contains("End date (dd-mm-yyyy) [04-01-2024]: "));
    }

    #[test]
    fn test_prompt_update_overrides_some_fields() {
        let existing = sample();
        let mut console = console("2000\n\n\n3\n\n31-01-2024\n");
        let loan = prompt_loan(&mut console, Some(&existing), None).unwrap();

        assert_eq!(loan.principal, 2000.);
        assert_eq!(loan.currency, "$");
        assert_eq!(loan.base_rate, 5.);
        assert_eq!(loan.margin, 3.);
        assert_eq!(loan.total_rate(), 8.);
        assert_eq!(loan.start_date, existing.start_date);
        assert_eq!(loan.end_date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    }

    #[test]
    fn test_prompt_default_currency() {
        let mut console = console("1000\n\n5\n2\n01-01-2024\n04-01-2024\n");
        let loan = prompt_loan(&mut console, None, Some("EUR")).unwrap();
        assert_eq!(loan.currency, "EUR");
        assert!(output(console).contains("Loan currency [EUR]: "));
    }

    #[test]
    fn test_prompt_input_closed() {
        let mut console = console("1000\n$\n");
        assert!(matches!(
            prompt_loan(&mut console, None, None),
            Err(LoanError::InputClosed)
        ));
    }
}
