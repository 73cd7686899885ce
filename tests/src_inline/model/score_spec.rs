use super::*;

#[test]
fn test_parse_score_spec() {
    assert_eq!(
        "LowerBound:asc".parse::<ScoreSpec>().unwrap(),
        ScoreSpec::ascending("LowerBound")
    );
    assert_eq!(
        "ErrorBound:DESC".parse::<ScoreSpec>().unwrap(),
        ScoreSpec::descending("ErrorBound")
    );
    assert_eq!(
        " SubtreeUpper : high ".parse::<ScoreSpec>().unwrap(),
        ScoreSpec::descending("SubtreeUpper")
    );
}

#[test]
fn test_parse_score_spec_keeps_colons_in_name() {
    let spec = "a:b:asc".parse::<ScoreSpec>().unwrap();
    assert_eq!(spec.name, "a:b");
    assert!(spec.ascending);
}

#[test]
fn test_parse_score_spec_errors() {
    assert_eq!(
        "LowerBound".parse::<ScoreSpec>(),
        Err(ScoreSpecError::Malformed("LowerBound".to_string()))
    );
    assert_eq!(
        ":asc".parse::<ScoreSpec>(),
        Err(ScoreSpecError::Malformed(":asc".to_string()))
    );
    assert!(matches!(
        "Score:up".parse::<ScoreSpec>(),
        Err(ScoreSpecError::Direction { .. })
    ));
}

#[test]
fn test_display_round_trips() {
    let spec = ScoreSpec::descending("PercentContribution");
    assert_eq!(spec.to_string(), "PercentContribution:desc");
    assert_eq!(spec.to_string().parse::<ScoreSpec>().unwrap(), spec);
}
