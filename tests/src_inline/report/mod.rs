use super::*;

#[test]
fn test_percent_of() {
    assert_eq!(percent_of(1, 4), 25.0);
    assert_eq!(percent_of(3, 0), 0.0);
}

#[test]
fn test_fixed_precision_formatting() {
    assert_eq!(format_f64_4(0.123456), "0.1235");
    assert_eq!(format_f64_4(100.0), "100.0000");
    assert_eq!(format_f64_2(-1.0), "-1.00");
}
