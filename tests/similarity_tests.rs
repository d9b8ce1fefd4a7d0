use beatjudge::judge::similarity::accuracy;
use rstest::rstest;

#[test]
fn test_identical_words_are_exact() {
    assert_eq!(accuracy("hello", "hello"), 100.0);
}

#[test]
fn test_case_and_surrounding_whitespace_ignored() {
    assert_eq!(accuracy("Seashells", "  SEASHELLS\n"), 100.0);
}

#[test]
fn test_one_deletion_in_nine_letters() {
    let acc = accuracy("seashells", "seashels");
    assert!((acc - 800.0 / 9.0).abs() < 1e-9, "got {}", acc);
    assert!((acc - 88.9).abs() < 0.1);
}

#[test]
fn test_both_empty_is_degenerate_match() {
    assert_eq!(accuracy("", ""), 100.0);
    assert_eq!(accuracy("   ", ""), 100.0);
}

#[rstest]
#[case("hello", "")]
#[case("", "hello")]
#[case("word", "   ")]
fn test_one_side_empty_scores_zero(#[case] target: &str, #[case] spoken: &str) {
    assert_eq!(accuracy(target, spoken), 0.0);
}

#[rstest]
#[case("cat", "dog", 0.0)]
#[case("kitten", "sitting", (1.0 - 3.0 / 7.0) * 100.0)]
#[case("joy", "joyful", 50.0)]
fn test_known_pairs(#[case] target: &str, #[case] spoken: &str, #[case] expected: f64) {
    let acc = accuracy(target, spoken);
    assert!((acc - expected).abs() < 1e-9, "{} vs {}: {}", target, spoken, acc);
}

#[test]
fn test_symmetric_on_sample() {
    assert_eq!(accuracy("peppers", "pepper"), accuracy("pepper", "peppers"));
    assert_eq!(accuracy("woodchuck", "wood chuck"), accuracy("wood chuck", "woodchuck"));
}

#[test]
fn test_non_ascii_counts_characters_not_bytes() {
    // 'é' vs 'e' is one substitution out of four characters.
    let acc = accuracy("café", "cafe");
    assert!((acc - 75.0).abs() < 1e-9, "got {}", acc);
}
