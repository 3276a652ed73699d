//! Unit tests for value coercion.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, ensure};
use rstest::rstest;

use super::ConfigValue;

#[rstest]
#[case("true", true)]
#[case(" TRUE ", true)]
#[case("Yes", true)]
#[case("on", true)]
#[case("1", true)]
#[case("false", false)]
#[case("no", false)]
#[case("OFF", false)]
#[case("0", false)]
fn coerces_booleans(#[case] raw: &str, #[case] expected: bool) -> Result<()> {
    ensure!(bool::coerce(raw)? == expected, "{raw:?} misread");
    Ok(())
}

#[rstest]
#[case("maybe")]
#[case("")]
#[case("2")]
fn rejects_other_booleans(#[case] raw: &str) {
    assert!(bool::coerce(raw).is_err(), "{raw:?} accepted");
}

#[rstest]
fn coerces_numbers() -> Result<()> {
    ensure!(u16::coerce(" 8080 ")? == 8080, "u16");
    ensure!(i64::coerce("-42")? == -42, "i64");
    ensure!(u8::coerce("256").is_err(), "u8 overflow accepted");
    ensure!((f64::coerce("0.25")? - 0.25).abs() < f64::EPSILON, "f64");
    Ok(())
}

#[rstest]
fn strings_are_kept_verbatim() -> Result<()> {
    ensure!(String::coerce("  padded ")? == "  padded ", "string trimmed");
    Ok(())
}

#[rstest]
fn chars_need_exactly_one_character() -> Result<()> {
    ensure!(char::coerce("é")? == 'é', "char");
    ensure!(char::coerce("ab").is_err(), "two chars accepted");
    ensure!(char::coerce("").is_err(), "empty accepted");
    Ok(())
}

#[rstest]
fn paths_are_taken_as_is() -> Result<()> {
    ensure!(PathBuf::coerce("/var/lib/app")? == PathBuf::from("/var/lib/app"), "path");
    Ok(())
}

#[rstest]
#[case("30", Duration::from_secs(30))]
#[case("30s", Duration::from_secs(30))]
#[case("250ms", Duration::from_millis(250))]
#[case("15 us", Duration::from_micros(15))]
#[case("7ns", Duration::from_nanos(7))]
#[case("5m", Duration::from_secs(300))]
#[case("2 hours", Duration::from_secs(7200))]
#[case("1d", Duration::from_secs(86_400))]
#[case(" 10 Seconds ", Duration::from_secs(10))]
fn coerces_durations(#[case] raw: &str, #[case] expected: Duration) -> Result<()> {
    ensure!(Duration::coerce(raw)? == expected, "{raw:?} misread");
    Ok(())
}

#[rstest]
#[case::no_number("ms")]
#[case::unknown_unit("5 fortnights")]
#[case::negative("-5s")]
#[case::fraction("1.5s")]
#[case::overflow("18446744073709551615d")]
fn rejects_bad_durations(#[case] raw: &str) {
    assert!(Duration::coerce(raw).is_err(), "{raw:?} accepted");
}

#[rstest]
fn option_has_a_null_representation() -> Result<()> {
    ensure!(<Option<u8>>::null() == Some(None), "option null");
    ensure!(<Option<u8>>::coerce("3")? == Some(3), "option value");
    ensure!(u8::null().is_none(), "u8 must not be nullable");
    ensure!(String::null().is_none(), "string must not be nullable");
    Ok(())
}

#[rstest]
fn failures_carry_the_parse_message() {
    let err = u16::coerce("port").expect_err("not a number");
    assert_eq!(err.reason(), "invalid digit found in string");
}
