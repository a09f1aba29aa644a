//! Ordering of answer values against constraint bounds

use octofhir_datacapture_model::{AnswerValue, Decimal, FhirDateTime, Quantity};
use std::cmp::Ordering;

/// Compare an answer with a bound of the `minValue`/`maxValue` extensions
///
/// Returns `None` when the two are not comparable: different kinds, absent
/// payloads, partial temporal values whose order is undetermined, or
/// quantities in different units. Integer and decimal compare numerically;
/// a date compares with a dateTime at the date's precision.
pub fn compare_answer(answer: &AnswerValue, bound: &AnswerValue) -> Option<Ordering> {
    use AnswerValue as V;

    match (answer, bound) {
        (V::Integer(Some(a)), V::Integer(Some(b))) => Some(a.cmp(b)),
        (V::Integer(Some(a)), V::Decimal(Some(b))) => Decimal::from(*a).partial_cmp(b),
        (V::Decimal(Some(a)), V::Integer(Some(b))) => a.partial_cmp(&Decimal::from(*b)),
        (V::Decimal(Some(a)), V::Decimal(Some(b))) => a.partial_cmp(b),
        (V::Date(Some(a)), V::Date(Some(b))) => a.partial_cmp(b),
        (V::Date(Some(a)), V::DateTime(Some(b))) => FhirDateTime::from_date(a.clone()).partial_cmp(b),
        (V::DateTime(Some(a)), V::Date(Some(b))) => a.partial_cmp(&FhirDateTime::from_date(b.clone())),
        (V::DateTime(Some(a)), V::DateTime(Some(b))) => a.partial_cmp(b),
        (V::Time(Some(a)), V::Time(Some(b))) => a.partial_cmp(b),
        (V::Quantity(a), V::Quantity(b)) => compare_quantities(a, b),
        _ => None,
    }
}

fn compare_quantities(a: &Quantity, b: &Quantity) -> Option<Ordering> {
    if !a.is_compatible_with(b) {
        return None;
    }
    a.value?.partial_cmp(&b.value?)
}

/// Human-readable form of a bound for error messages
pub fn display_bound(bound: &AnswerValue) -> String {
    match bound {
        AnswerValue::Quantity(quantity) => {
            let value = quantity.value.map(|v| v.to_string()).unwrap_or_default();
            match quantity.unit.as_deref().or(quantity.code.as_deref()) {
                Some(unit) => format!("{value} {unit}"),
                None => value,
            }
        }
        other => other.primitive_string().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use octofhir_datacapture_model::{FhirDate, FhirTime};
    use rstest::rstest;

    fn dec(s: &str) -> AnswerValue {
        AnswerValue::decimal(s.parse().unwrap())
    }

    #[rstest]
    #[case(AnswerValue::integer(3), AnswerValue::integer(5), Some(Ordering::Less))]
    #[case(AnswerValue::integer(5), dec("4.5"), Some(Ordering::Greater))]
    #[case(dec("2.0"), AnswerValue::integer(2), Some(Ordering::Equal))]
    #[case(AnswerValue::string("5"), AnswerValue::integer(5), None)]
    #[case(AnswerValue::Integer(None), AnswerValue::integer(5), None)]
    #[case(
        AnswerValue::date(FhirDate::new(2024, 1, 1)),
        AnswerValue::date(FhirDate::new(2023, 12, 31)),
        Some(Ordering::Greater)
    )]
    #[case(
        AnswerValue::date(FhirDate::year_only(2024)),
        AnswerValue::date(FhirDate::new(2024, 6, 1)),
        None
    )]
    #[case(
        AnswerValue::date(FhirDate::new(2024, 1, 1)),
        AnswerValue::date_time(FhirDateTime::parse("2024-01-02T00:00:00Z").unwrap()),
        Some(Ordering::Less)
    )]
    #[case(
        AnswerValue::time(FhirTime::new(8, 30, 15)),
        AnswerValue::time(FhirTime::hour_minute(8, 30)),
        None
    )]
    #[case(
        AnswerValue::time(FhirTime::new(9, 0, 0)),
        AnswerValue::time(FhirTime::new(8, 30, 0)),
        Some(Ordering::Greater)
    )]
    fn test_compare_answer(
        #[case] answer: AnswerValue,
        #[case] bound: AnswerValue,
        #[case] expected: Option<Ordering>,
    ) {
        assert_eq!(compare_answer(&answer, &bound), expected);
    }

    #[test]
    fn test_quantities_need_matching_units() {
        let kg = AnswerValue::Quantity(Quantity::new(Decimal::from(70), "kg"));
        let max_kg = AnswerValue::Quantity(Quantity::new(Decimal::from(200), "kg"));
        let max_lb = AnswerValue::Quantity(Quantity::new(Decimal::from(400), "lb"));
        assert_eq!(compare_answer(&kg, &max_kg), Some(Ordering::Less));
        assert_eq!(compare_answer(&kg, &max_lb), None);
    }

    #[test]
    fn test_display_bound() {
        assert_eq!(display_bound(&AnswerValue::integer(18)), "18");
        assert_eq!(display_bound(&dec("0.5")), "0.5");
        assert_eq!(
            display_bound(&AnswerValue::Quantity(Quantity::new(Decimal::from(200), "kg"))),
            "200 kg"
        );
        assert_eq!(
            display_bound(&AnswerValue::date(FhirDate::new(2000, 1, 1))),
            "2000-01-01"
        );
    }
}
