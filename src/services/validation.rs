use crate::models::book::CreateBookRequest;
use crate::models::errors::ApiError;
use serde_json::{Number, Value};
use uuid::{Uuid, Variant};

pub const MIN_TITLE_LEN: usize = 2;
pub const MAX_TITLE_LEN: usize = 100;
pub const MIN_AUTHOR_LEN: usize = 5;
pub const MIN_YEAR: i32 = 1900;

/// A create request that passed every check that does not need storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: Option<i32>,
}

/// Accepts only the hyphenated 8-4-4-4-12 form, in any letter case, with an
/// RFC 4122 variant and a version between 1 and 8. The nil and max UUIDs are
/// also accepted.
pub fn parse_book_id(raw: &str) -> Result<Uuid, ApiError> {
    match Uuid::try_parse(raw) {
        Ok(id) if raw.len() == 36 && is_well_formed(&id) => Ok(id),
        _ => Err(ApiError::InvalidIdentifier(raw.to_string())),
    }
}

fn is_well_formed(id: &Uuid) -> bool {
    if id.is_nil() || *id == Uuid::from_u128(u128::MAX) {
        return true;
    }
    (1..=8).contains(&id.get_version_num()) && id.get_variant() == Variant::RFC4122
}

pub fn validate_new_book(
    request: &CreateBookRequest,
    current_year: i32,
) -> Result<NewBook, ApiError> {
    if request.id.is_some() {
        return Err(ApiError::Validation(
            "id is assigned by the server and must not be supplied".to_string(),
        ));
    }

    let (title, author) = match (&request.title, &request.author) {
        (Some(title), Some(author)) if !is_falsy(title) && !is_falsy(author) => (title, author),
        _ => {
            return Err(ApiError::Validation(
                "Missing required fields: title and author".to_string(),
            ))
        }
    };

    let title = as_text("title", title)?.trim().to_string();
    let author = as_text("author", author)?.trim().to_string();

    let title_len = title.chars().count();
    if !(MIN_TITLE_LEN..=MAX_TITLE_LEN).contains(&title_len) {
        return Err(ApiError::Validation(format!(
            "title must be between {} and {} characters",
            MIN_TITLE_LEN, MAX_TITLE_LEN
        )));
    }
    if author.chars().count() < MIN_AUTHOR_LEN {
        return Err(ApiError::Validation(format!(
            "author must be at least {} characters",
            MIN_AUTHOR_LEN
        )));
    }

    let year = match &request.year {
        Some(raw) => Some(validate_year(raw, current_year)?),
        None => None,
    };

    Ok(NewBook {
        title,
        author,
        year,
    })
}

fn validate_year(raw: &Value, current_year: i32) -> Result<i32, ApiError> {
    let invalid = || {
        ApiError::Validation(format!(
            "year must be an integer between {} and {}",
            MIN_YEAR, current_year
        ))
    };

    let number = coerce_number(raw).ok_or_else(invalid)?;
    if !number.is_finite() || number.fract() != 0.0 {
        return Err(invalid());
    }
    if number < f64::from(MIN_YEAR) || number > f64::from(current_year) {
        return Err(invalid());
    }

    Ok(number as i32)
}

fn coerce_number(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn as_text(field: &str, value: &Value) -> Result<String, ApiError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(number_text(n)),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ApiError::Validation(format!("{} must be text", field))),
    }
}

// Integral floats print without a fractional part: `1984.0` becomes "1984".
fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const YEAR: i32 = 2026;

    fn request(body: Value) -> CreateBookRequest {
        serde_json::from_value(body).unwrap()
    }

    fn validate(body: Value) -> Result<NewBook, ApiError> {
        validate_new_book(&request(body), YEAR)
    }

    #[test]
    fn accepts_and_trims_a_complete_request() {
        let book = validate(json!({
            "title": "  Dune ",
            "author": " Frank Herbert ",
            "year": 1965
        }))
        .unwrap();
        assert_eq!(
            book,
            NewBook {
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                year: Some(1965),
            }
        );
    }

    #[test]
    fn rejects_client_supplied_id() {
        let err = validate(json!({
            "id": "2f1c1b0e-4a8e-4a4c-9d0f-0b7b8f8d3e11",
            "title": "Dune",
            "author": "Frank Herbert"
        }))
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let err = validate(json!({ "id": null, "title": "Dune", "author": "Frank Herbert" }))
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn rejects_missing_or_falsy_required_fields() {
        for body in [
            json!({ "author": "Frank Herbert" }),
            json!({ "title": "Dune" }),
            json!({ "title": "", "author": "Frank Herbert" }),
            json!({ "title": "Dune", "author": null }),
            json!({ "title": 0, "author": "Frank Herbert" }),
            json!({ "title": false, "author": "Frank Herbert" }),
        ] {
            let err = validate(body.clone()).unwrap_err();
            assert!(
                err.to_string().starts_with("Missing required fields"),
                "{body}"
            );
        }
    }

    #[test]
    fn structured_values_are_not_text() {
        let err = validate(json!({ "title": ["Dune"], "author": "Frank Herbert" })).unwrap_err();
        assert_eq!(err.to_string(), "title must be text");
    }

    #[test]
    fn numbers_are_coerced_to_text() {
        let book = validate(json!({ "title": 1984, "author": "George Orwell" })).unwrap();
        assert_eq!(book.title, "1984");

        let book = validate(json!({ "title": 1984.0, "author": "George Orwell" })).unwrap();
        assert_eq!(book.title, "1984");

        let book = validate(json!({ "title": 2.5, "author": "George Orwell" })).unwrap();
        assert_eq!(book.title, "2.5");
    }

    #[test]
    fn absent_year_is_not_validated() {
        let book = validate(json!({ "title": "Dune", "author": "Frank Herbert" })).unwrap();
        assert_eq!(book.year, None);
    }

    #[test]
    fn title_length_boundaries() {
        let check = |len: usize| {
            validate(json!({ "title": "x".repeat(len), "author": "Frank Herbert" })).is_ok()
        };
        assert!(!check(1));
        assert!(check(2));
        assert!(check(100));
        assert!(!check(101));
    }

    #[test]
    fn title_length_is_measured_after_trimming() {
        assert!(validate(json!({ "title": "  a  ", "author": "Frank Herbert" })).is_err());
    }

    #[test]
    fn author_needs_five_characters() {
        assert!(validate(json!({ "title": "Dune", "author": "Abcd" })).is_err());
        assert!(validate(json!({ "title": "Dune", "author": "Abcde" })).is_ok());
        assert!(validate(json!({ "title": "Dune", "author": "  Abcd   " })).is_err());
    }

    #[test]
    fn year_boundaries() {
        let check = |year: i32| {
            validate(json!({ "title": "Dune", "author": "Frank Herbert", "year": year })).is_ok()
        };
        assert!(!check(1899));
        assert!(check(1900));
        assert!(check(YEAR));
        assert!(!check(YEAR + 1));
    }

    #[test]
    fn year_coercion() {
        let year_of = |year: Value| {
            validate(json!({ "title": "Dune", "author": "Frank Herbert", "year": year }))
                .map(|book| book.year)
        };
        assert_eq!(year_of(json!("1965")).unwrap(), Some(1965));
        assert_eq!(year_of(json!(1965.0)).unwrap(), Some(1965));
        assert!(year_of(Value::Null).is_err());
        assert!(year_of(json!(1965.5)).is_err());
        assert!(year_of(json!("nineteen")).is_err());
        assert!(year_of(json!(true)).is_err());
        assert!(year_of(json!("")).is_err());
    }

    #[test]
    fn parse_book_id_accepts_only_hyphenated_uuids() {
        let id = "2f1c1b0e-4a8e-4a4c-9d0f-0b7b8f8d3e11";
        assert_eq!(parse_book_id(id).unwrap().to_string(), id);
        assert!(parse_book_id(&id.to_uppercase()).is_ok());
        assert!(parse_book_id("00000000-0000-0000-0000-000000000000").is_ok());
        assert!(parse_book_id("ffffffff-ffff-ffff-ffff-ffffffffffff").is_ok());
        assert!(parse_book_id("6ba7b810-9dad-11d1-80b4-00c04fd430c8").is_ok());

        for bad in [
            "not-a-uuid",
            "",
            "2f1c1b0e4a8e4a4c9d0f0b7b8f8d3e11",
            "{2f1c1b0e-4a8e-4a4c-9d0f-0b7b8f8d3e11}",
            "urn:uuid:2f1c1b0e-4a8e-4a4c-9d0f-0b7b8f8d3e11",
            "2f1c1b0e-4a8e-0a4c-9d0f-0b7b8f8d3e11",
            "2f1c1b0e-4a8e-9a4c-9d0f-0b7b8f8d3e11",
            "2f1c1b0e-4a8e-4a4c-0d0f-0b7b8f8d3e11",
            "2f1c1b0e-4a8e-4a4c-cd0f-0b7b8f8d3e11",
        ] {
            assert!(
                matches!(parse_book_id(bad), Err(ApiError::InvalidIdentifier(_))),
                "{bad}"
            );
        }
    }
}
