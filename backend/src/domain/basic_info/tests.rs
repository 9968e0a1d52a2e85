//! Tests for Basic Info validation.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid fixture date")
}

#[fixture]
fn valid_input() -> BasicInfoInput {
    BasicInfoInput {
        restaurant_name: "Wing Shack".to_owned(),
        address: "123 Main St".to_owned(),
        date_visited: "2024-01-01".to_owned(),
        website_url: None,
        coordinates: Some(RawCoordinates {
            latitude: 40.0,
            longitude: -75.0,
        }),
    }
}

#[rstest]
fn accepts_complete_input(valid_input: BasicInfoInput, today: NaiveDate) {
    let info = validate_basic_info(&valid_input, today).expect("valid input");

    assert_eq!(info.restaurant_name(), "Wing Shack");
    assert_eq!(info.address(), "123 Main St");
    assert_eq!(
        info.date_visited(),
        NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date")
    );
    assert_eq!(
        info.coordinates(),
        Some(Coordinates::new(40.0, -75.0).expect("valid coordinates"))
    );
    assert!(info.website_url().is_none());
}

#[rstest]
fn trims_text_fields(mut valid_input: BasicInfoInput, today: NaiveDate) {
    valid_input.restaurant_name = "  Wing Shack ".to_owned();
    valid_input.address = "123 Main St\n".to_owned();

    let info = validate_basic_info(&valid_input, today).expect("valid input");
    assert_eq!(info.restaurant_name(), "Wing Shack");
    assert_eq!(info.address(), "123 Main St");
}

#[rstest]
#[case::name(|input: &mut BasicInfoInput| input.restaurant_name.clear(), RequiredField::RestaurantName)]
#[case::blank_name(|input: &mut BasicInfoInput| input.restaurant_name = "   ".to_owned(), RequiredField::RestaurantName)]
#[case::address(|input: &mut BasicInfoInput| input.address.clear(), RequiredField::Address)]
#[case::date(|input: &mut BasicInfoInput| input.date_visited.clear(), RequiredField::DateVisited)]
fn reports_missing_fields(
    mut valid_input: BasicInfoInput,
    today: NaiveDate,
    #[case] blank: fn(&mut BasicInfoInput),
    #[case] field: RequiredField,
) {
    blank(&mut valid_input);
    assert_eq!(
        validate_basic_info(&valid_input, today),
        Err(ValidationError::MissingField { field })
    );
}

#[rstest]
#[case::slashes("01/01/2024")]
#[case::impossible_day("2024-02-30")]
#[case::words("last tuesday")]
fn rejects_malformed_dates(mut valid_input: BasicInfoInput, today: NaiveDate, #[case] raw: &str) {
    valid_input.date_visited = raw.to_owned();
    assert_eq!(
        validate_basic_info(&valid_input, today),
        Err(ValidationError::InvalidDate {
            value: raw.to_owned(),
            problem: DateProblem::Malformed,
        })
    );
}

#[rstest]
fn accepts_visit_dated_today(mut valid_input: BasicInfoInput, today: NaiveDate) {
    valid_input.date_visited = "2024-03-15".to_owned();
    assert!(validate_basic_info(&valid_input, today).is_ok());
}

#[rstest]
fn rejects_visit_one_day_in_the_future(mut valid_input: BasicInfoInput, today: NaiveDate) {
    valid_input.date_visited = "2024-03-16".to_owned();
    assert_eq!(
        validate_basic_info(&valid_input, today),
        Err(ValidationError::InvalidDate {
            value: "2024-03-16".to_owned(),
            problem: DateProblem::InFuture { today },
        })
    );
}

#[rstest]
fn absent_coordinates_stay_absent(mut valid_input: BasicInfoInput, today: NaiveDate) {
    valid_input.coordinates = None;
    let info = validate_basic_info(&valid_input, today).expect("valid input");
    assert!(info.coordinates().is_none());
}

#[rstest]
fn rejects_out_of_range_coordinates(mut valid_input: BasicInfoInput, today: NaiveDate) {
    valid_input.coordinates = Some(RawCoordinates {
        latitude: 40.0,
        longitude: -190.0,
    });
    assert_eq!(
        validate_basic_info(&valid_input, today),
        Err(ValidationError::InvalidCoordinates {
            latitude: 40.0,
            longitude: -190.0,
        })
    );
}

#[rstest]
#[case::https("https://wingshack.example/menu")]
#[case::http("http://wingshack.example")]
fn accepts_http_websites(mut valid_input: BasicInfoInput, today: NaiveDate, #[case] raw: &str) {
    valid_input.website_url = Some(raw.to_owned());
    let info = validate_basic_info(&valid_input, today).expect("valid input");
    assert!(info.website_url().is_some());
}

#[rstest]
fn blank_website_counts_as_absent(mut valid_input: BasicInfoInput, today: NaiveDate) {
    valid_input.website_url = Some("  ".to_owned());
    let info = validate_basic_info(&valid_input, today).expect("valid input");
    assert!(info.website_url().is_none());
}

#[rstest]
#[case::no_scheme("wingshack.example")]
#[case::ftp("ftp://wingshack.example/file")]
#[case::mailto("mailto:owner@wingshack.example")]
fn rejects_malformed_websites(mut valid_input: BasicInfoInput, today: NaiveDate, #[case] raw: &str) {
    valid_input.website_url = Some(raw.to_owned());
    assert_eq!(
        validate_basic_info(&valid_input, today),
        Err(ValidationError::InvalidUrl {
            value: raw.to_owned(),
        })
    );
}

#[rstest]
fn missing_fields_are_reported_before_bad_dates(mut valid_input: BasicInfoInput, today: NaiveDate) {
    valid_input.address.clear();
    valid_input.date_visited = "not a date".to_owned();
    assert_eq!(
        validate_basic_info(&valid_input, today),
        Err(ValidationError::MissingField {
            field: RequiredField::Address,
        })
    );
}
