//! Integration tests for PHI detection and text redaction

use phi_redactor::redaction::geometry::compute_redaction_rects;
use phi_redactor::redaction::models::{BoundingBox, OcrToken};
use phi_redactor::redaction::{
    DetectionMode, NameTokenSet, PhiCategory, PhiMatch, RedactionEngine, RedactionSettings,
};
use test_case::test_case;

fn engine(mode: DetectionMode) -> RedactionEngine {
    RedactionEngine::new(RedactionSettings::with_mode(mode)).unwrap()
}

fn line_tokens(words: &[&str], line: u32) -> Vec<OcrToken> {
    words
        .iter()
        .enumerate()
        .map(|(i, text)| OcrToken {
            text: text.to_string(),
            confidence: Some(91.0),
            bbox: BoundingBox::new(100 + i as u32 * 120, line * 50, 100, 30),
            block_id: 1,
            paragraph_id: 1,
            line_id: line,
        })
        .collect()
}

const CLINICAL_NOTE: &str = "Patient: Marisol Quintero, DOB: 04/11/1975\n\
    MRN: A7731902\n\
    Contact: m.quintero@example.com, Phone: (555) 234-5678\n\
    Admission: 03/14/2024. Quintero reports knee pain; Marisol agreed to PT.";

#[test]
fn test_labeled_name_and_date_of_birth() {
    let text = "Patient: John Smith, DOB: 01/02/1980";
    let matches = engine(DetectionMode::Normal).find_matches(text, None).unwrap();

    let name = matches
        .iter()
        .find(|m| m.category == PhiCategory::Name)
        .expect("name match");
    assert!(name.text.contains("John Smith"));

    let dob = matches
        .iter()
        .find(|m| m.category == PhiCategory::Dob)
        .expect("dob match");
    assert_eq!(dob.text, "DOB: 01/02/1980");
    assert!(dob.confidence >= 0.95);

    // The generic date rule must not claim the labeled birth date
    assert!(matches.iter().all(|m| m.category != PhiCategory::Date));
}

#[test]
fn test_single_email() {
    let text = "Contact: jane@example.com";
    let matches = engine(DetectionMode::Normal).find_matches(text, None).unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].category, PhiCategory::Email);
    assert_eq!(matches[0].text, "jane@example.com");
    assert_eq!(&text[matches[0].start..matches[0].end], "jane@example.com");
    assert!((matches[0].confidence - 0.98).abs() < 1e-6);
}

#[test]
fn test_bare_zip_depends_on_mode() {
    let text = "Zip 90210";

    let normal = engine(DetectionMode::Normal).find_matches(text, None).unwrap();
    assert!(normal.iter().all(|m| m.category != PhiCategory::ZipCode));

    let aggressive = engine(DetectionMode::Aggressive)
        .find_matches(text, None)
        .unwrap();
    let zips: Vec<&PhiMatch> = aggressive
        .iter()
        .filter(|m| m.category == PhiCategory::ZipCode)
        .collect();
    assert_eq!(zips.len(), 1);
    assert_eq!(zips[0].text, "90210");
    assert!((zips[0].confidence - 0.5).abs() < f32::EPSILON);
}

#[test]
fn test_short_name_found_on_later_page() {
    let engine = engine(DetectionMode::Normal);
    let page_one = line_tokens(&["KJ", "is", "stable"], 1);
    let page_two = line_tokens(&["Patient:", "KJ", "Burmaster"], 1);

    // Discovery sees nothing name-like on the first page by itself
    assert!(engine.discover_page_names(&page_one).unwrap().is_empty());

    let mut known = NameTokenSet::new();
    known.extend(engine.discover_page_names(&page_one).unwrap());
    known.extend(engine.discover_page_names(&page_two).unwrap());
    assert!(known.contains("KJ"));
    assert!(known.contains("Burmaster"));

    let mut page = image::RgbImage::from_pixel(1200, 1100, image::Rgb([255, 255, 255]));
    let result = engine
        .redact_page(&mut page, 1.0, &page_one, Some(&known))
        .unwrap();

    assert_eq!(result.canonical_text, "KJ is stable");
    assert_eq!(result.matches.len(), 1);
    assert_eq!(result.matches[0].text, "KJ");
    assert_eq!(result.matches[0].category, PhiCategory::Name);
    assert!((result.matches[0].confidence - 0.85).abs() < 1e-6);
    assert_eq!(result.redacted_text, "[NAME] is stable");
    assert_eq!(result.rects_drawn, 1);
    assert_eq!(page.get_pixel(150, 65), &image::Rgb([0, 0, 0]));
    assert_eq!(page.get_pixel(270, 65), &image::Rgb([255, 255, 255]));
}

#[test_case("Contact: jane@example.com", PhiCategory::Email; "email address")]
#[test_case("SSN: 123-45-6789", PhiCategory::Ssn; "labeled ssn")]
#[test_case("MRN: A123456", PhiCategory::Mrn; "medical record number")]
#[test_case("Visit https://portal.example.org/records", PhiCategory::Url; "web url")]
#[test_case("Server 192.168.1.10 logged", PhiCategory::IpAddress; "ip address")]
#[test_case("Admission: 03/14/2024", PhiCategory::ServiceDate; "service date")]
#[test_case("Pronouns: they/them", PhiCategory::Pronouns; "pronouns")]
#[test_case("Sex: Female", PhiCategory::Gender; "labeled gender")]
#[test_case("Resident aged 94", PhiCategory::Age90Plus; "age over 89")]
#[test_case("Room 412B", PhiCategory::Location; "room number")]
#[test_case("NPI: 1234567890", PhiCategory::License; "provider identifier")]
#[test_case("Account Number: 889900", PhiCategory::Account; "account number")]
#[test_case("Seen on 2024-03-14", PhiCategory::Date; "iso date")]
fn test_rule_category(text: &str, expected: PhiCategory) {
    let matches = engine(DetectionMode::Normal).find_matches(text, None).unwrap();
    assert!(
        matches.iter().any(|m| m.category == expected),
        "expected {expected} in {text:?}, got {matches:?}"
    );
}

#[test_case("Male patient presents", PhiCategory::Gender; "bare gender")]
#[test_case("Seen 03/14/24", PhiCategory::Date; "two digit year")]
fn test_aggressive_only_rule(text: &str, expected: PhiCategory) {
    let normal = engine(DetectionMode::Normal).find_matches(text, None).unwrap();
    assert!(normal.iter().all(|m| m.category != expected));

    let aggressive = engine(DetectionMode::Aggressive)
        .find_matches(text, None)
        .unwrap();
    assert!(aggressive.iter().any(|m| m.category == expected));
}

#[test]
fn test_excluded_phrase_is_never_a_name() {
    let text = "Referred to Physical Therapy and Internal Medicine.";
    let matches = engine(DetectionMode::Aggressive)
        .find_matches(text, None)
        .unwrap();
    assert!(matches.iter().all(|m| !m.category.is_name_like()));
}

#[test_case(DetectionMode::Normal; "normal")]
#[test_case(DetectionMode::Aggressive; "aggressive")]
fn test_matches_are_sorted_disjoint_and_above_threshold(mode: DetectionMode) {
    let matches = engine(mode).find_matches(CLINICAL_NOTE, None).unwrap();
    assert!(!matches.is_empty());

    for m in &matches {
        assert!(m.start < m.end);
        assert_eq!(&CLINICAL_NOTE[m.start..m.end], m.text);
        assert!(m.confidence >= mode.threshold());
    }
    for pair in matches.windows(2) {
        assert!(pair[0].end <= pair[1].start, "{:?} overlaps {:?}", pair[0], pair[1]);
    }
}

#[test]
fn test_detection_is_deterministic() {
    let engine = engine(DetectionMode::Aggressive);
    let first: Vec<PhiMatch> = engine.find_matches(CLINICAL_NOTE, None).unwrap();
    let second: Vec<PhiMatch> = engine.find_matches(CLINICAL_NOTE, None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_redacted_text_contains_no_matched_value() {
    let result = engine(DetectionMode::Normal)
        .redact_buffer(CLINICAL_NOTE, None)
        .unwrap();

    for m in &result.matches {
        assert!(
            !result.redacted_text.contains(&m.text),
            "{:?} survived redaction",
            m.text
        );
    }
    assert!(result.redacted_text.contains("[EMAIL]"));
    assert!(result.redacted_text.contains("[DOB]"));
    assert!(!result.redacted_text.contains("Quintero"));
    assert!(!result.redacted_text.contains("Marisol"));
}

const VISIT_NOTE: &str = "Patient: KJ Burmaster, seen today. Visited Burmaster Clinic after.";

#[test_case(CLINICAL_NOTE, DetectionMode::Normal, "Quintero"; "clinical note normal")]
#[test_case(CLINICAL_NOTE, DetectionMode::Aggressive, "Quintero"; "clinical note aggressive")]
#[test_case(VISIT_NOTE, DetectionMode::Normal, "Burmaster"; "visit note normal")]
#[test_case(VISIT_NOTE, DetectionMode::Aggressive, "Burmaster"; "visit note aggressive")]
fn test_every_occurrence_of_a_name_token_is_covered(text: &str, mode: DetectionMode, token: &str) {
    let engine = engine(mode);
    let matches = engine.find_matches(text, None).unwrap();
    let tokens = engine.extract_name_tokens(&matches);
    assert!(tokens.contains(token));

    for token in &tokens {
        for (offset, _) in text.match_indices(token.as_str()) {
            let end = offset + token.len();
            let whole_word = !text[..offset]
                .chars()
                .next_back()
                .is_some_and(char::is_alphanumeric)
                && !text[end..]
                    .chars()
                    .next()
                    .is_some_and(char::is_alphanumeric);
            if !whole_word {
                continue;
            }
            assert!(
                matches.iter().any(|m| m.category == PhiCategory::Name
                    && m.start <= offset
                    && end <= m.end),
                "{token} at {offset} is not covered by a NAME match in {mode} mode"
            );
        }
    }
}

#[test]
fn test_known_name_inside_capitalized_pair_becomes_name() {
    let known: NameTokenSet = ["Burmaster".to_string()].into();
    let matches = engine(DetectionMode::Aggressive)
        .find_matches("Visited Burmaster yesterday", Some(&known))
        .unwrap();

    let burmaster = matches
        .iter()
        .find(|m| m.text == "Burmaster")
        .expect("token match");
    assert_eq!(burmaster.category, PhiCategory::Name);
    assert_eq!((burmaster.start, burmaster.end), (8, 17));
}

#[test]
fn test_redaction_rects_contain_scaled_boxes() {
    let boxes = [BoundingBox::new(201, 101, 79, 39), BoundingBox::new(0, 0, 0, 10)];
    let rects = compute_redaction_rects(&boxes, 2.0, 2, (1000, 800));

    // The zero-width box is skipped
    assert_eq!(rects.len(), 1);
    let rect = rects[0];
    assert!(f64::from(rect.left) <= 201.0 / 2.0 - 2.0);
    assert!(f64::from(rect.top) <= 101.0 / 2.0 - 2.0);
    assert!(f64::from(rect.right) >= 280.0 / 2.0 + 2.0);
    assert!(f64::from(rect.bottom) >= 140.0 / 2.0 + 2.0);
}

#[test]
fn test_redaction_rects_clamped_to_image() {
    let boxes = [BoundingBox::new(1990, 1590, 40, 40)];
    let rects = compute_redaction_rects(&boxes, 2.0, 4, (1000, 800));

    assert_eq!(rects.len(), 1);
    assert_eq!(rects[0].right, 1000);
    assert_eq!(rects[0].bottom, 800);
    assert!(rects[0].left < rects[0].right);
}
