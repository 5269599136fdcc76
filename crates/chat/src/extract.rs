use once_cell::sync::Lazy;
use regex::Regex;
use showroom_core::domain::preferences::{BodyStyle, Brand, Color, ConstraintSet, FuelKind};

/// First dollar figure in a message: optional `$`, digits, optional
/// comma-separated second digit group (`$15,000`, `20000`).
static PRICE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$?(\d+),?(\d+)?").expect("price pattern must compile"));

/// Deterministic keyword scanner over one chat message.
///
/// Each attribute dimension is matched independently against its fixed
/// candidate list; within a dimension the first listed keyword found in the
/// lower-cased message wins, regardless of where it appears in the text.
#[derive(Clone, Debug, Default)]
pub struct PreferenceExtractor;

impl PreferenceExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str) -> ConstraintSet {
        let normalized_text = normalize_text(text);

        ConstraintSet {
            fuel: first_fuel(&normalized_text),
            price_ceiling: price_ceiling(text),
            brand: first_brand(&normalized_text),
            body_style: first_body_style(&normalized_text),
            color: first_color(&normalized_text),
        }
    }
}

fn normalize_text(text: &str) -> String {
    text.to_ascii_lowercase()
}

fn first_fuel(normalized_text: &str) -> Option<FuelKind> {
    FuelKind::DETECTION_ORDER.into_iter().find(|fuel| normalized_text.contains(fuel.keyword()))
}

fn first_brand(normalized_text: &str) -> Option<Brand> {
    Brand::DETECTION_ORDER.into_iter().find(|brand| normalized_text.contains(brand.keyword()))
}

fn first_body_style(normalized_text: &str) -> Option<BodyStyle> {
    BodyStyle::DETECTION_ORDER.into_iter().find(|style| normalized_text.contains(style.keyword()))
}

fn first_color(normalized_text: &str) -> Option<Color> {
    Color::DETECTION_ORDER.into_iter().find(|color| normalized_text.contains(color.keyword()))
}

/// Scans the raw text so `$` placement stays visible to the pattern. Digit
/// groups around one comma are concatenated (`15,000` reads as 15000); a
/// figure too large for `u64` yields no constraint rather than an error.
fn price_ceiling(text: &str) -> Option<u64> {
    let captures = PRICE_PATTERN.captures(text)?;
    let mut digits = captures.get(1)?.as_str().to_string();
    if let Some(tail) = captures.get(2) {
        digits.push_str(tail.as_str());
    }
    digits.parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use showroom_core::domain::preferences::{BodyStyle, Brand, Color, ConstraintSet, FuelKind};

    use super::PreferenceExtractor;

    #[test]
    fn extracts_full_preference_set() {
        let extractor = PreferenceExtractor::new();
        let constraints = extractor.extract("Looking for a red Toyota SUV, gasoline, under $15,000");

        assert_eq!(constraints.fuel, Some(FuelKind::Gasoline));
        assert_eq!(constraints.price_ceiling, Some(15_000));
        assert_eq!(constraints.brand, Some(Brand::Toyota));
        assert_eq!(constraints.body_style, Some(BodyStyle::Suv));
        assert_eq!(constraints.color, Some(Color::Red));
    }

    #[test]
    fn first_listed_candidate_wins_within_a_dimension() {
        let extractor = PreferenceExtractor::new();

        let constraints = extractor.extract("either electric or gasoline works for me");
        assert_eq!(constraints.fuel, Some(FuelKind::Electric));

        // Candidate order decides, not position in the sentence.
        let constraints = extractor.extract("a Hyundai over a BMW any day");
        assert_eq!(constraints.brand, Some(Brand::Bmw));
    }

    #[test]
    fn price_takes_first_figure_and_joins_comma_groups() {
        let extractor = PreferenceExtractor::new();

        assert_eq!(extractor.extract("under $15,000").price_ceiling, Some(15_000));
        assert_eq!(extractor.extract("$20000 tops").price_ceiling, Some(20_000));
        assert_eq!(extractor.extract("between 12000 and 18000").price_ceiling, Some(12_000));
        assert_eq!(extractor.extract("under $20,000 please call 555").price_ceiling, Some(20_000));
    }

    #[test]
    fn oversized_figure_drops_the_price_constraint() {
        let extractor = PreferenceExtractor::new();
        let constraints = extractor.extract("a red one at $99999999999999999999999999");

        assert_eq!(constraints.price_ceiling, None);
        assert_eq!(constraints.color, Some(Color::Red));
    }

    #[test]
    fn keywords_match_inside_larger_words() {
        let extractor = PreferenceExtractor::new();
        let constraints = extractor.extract("the redesigned model");

        assert_eq!(constraints.color, Some(Color::Red));
    }

    #[test]
    fn scanning_ignores_letter_case() {
        let extractor = PreferenceExtractor::new();
        let constraints = extractor.extract("RED TOYOTA SUV");

        assert_eq!(constraints.color, Some(Color::Red));
        assert_eq!(constraints.brand, Some(Brand::Toyota));
        assert_eq!(constraints.body_style, Some(BodyStyle::Suv));
    }

    #[test]
    fn unrecognized_text_yields_empty_constraints() {
        let extractor = PreferenceExtractor::new();
        let constraints = extractor.extract("hello there");

        assert!(constraints.is_empty());
        assert_eq!(constraints, ConstraintSet::default());
    }

    #[test]
    fn handles_common_phrasings() {
        struct Case {
            text: &'static str,
            expected: ConstraintSet,
        }

        let cases = vec![
            Case {
                text: "show me electric cars",
                expected: ConstraintSet { fuel: Some(FuelKind::Electric), ..Default::default() },
            },
            Case {
                text: "a white Mercedes-Benz sedan",
                expected: ConstraintSet {
                    brand: Some(Brand::MercedesBenz),
                    body_style: Some(BodyStyle::Sedan),
                    color: Some(Color::White),
                    ..Default::default()
                },
            },
            Case {
                text: "truck under 30000",
                expected: ConstraintSet {
                    price_ceiling: Some(30_000),
                    body_style: Some(BodyStyle::Truck),
                    ..Default::default()
                },
            },
            Case {
                text: "something in silver with hybrid drive",
                expected: ConstraintSet {
                    fuel: Some(FuelKind::Hybrid),
                    color: Some(Color::Silver),
                    ..Default::default()
                },
            },
            Case {
                text: "cheap petrol hatchback",
                expected: ConstraintSet { fuel: Some(FuelKind::Petrol), ..Default::default() },
            },
            Case {
                text: "Lamborghini convertible in green",
                expected: ConstraintSet {
                    brand: Some(Brand::Lamborghini),
                    body_style: Some(BodyStyle::Convertible),
                    color: Some(Color::Green),
                    ..Default::default()
                },
            },
            Case {
                text: "I want a red SUV under $20000",
                expected: ConstraintSet {
                    price_ceiling: Some(20_000),
                    body_style: Some(BodyStyle::Suv),
                    color: Some(Color::Red),
                    ..Default::default()
                },
            },
            Case {
                text: "gray or grey whatever",
                expected: ConstraintSet { color: Some(Color::Gray), ..Default::default() },
            },
            Case {
                text: "nissan please",
                expected: ConstraintSet { brand: Some(Brand::Nissan), ..Default::default() },
            },
            Case {
                text: "15000 maximum",
                expected: ConstraintSet { price_ceiling: Some(15_000), ..Default::default() },
            },
        ];

        let extractor = PreferenceExtractor::new();
        for (index, case) in cases.iter().enumerate() {
            let constraints = extractor.extract(case.text);
            assert_eq!(constraints, case.expected, "case {index}: {}", case.text);
        }
    }
}
