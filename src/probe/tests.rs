use super::*;

#[test]
fn test_parse_version_release() {
    assert_eq!(parse_version("0.13.0\n"), Some(Version::new(0, 13, 0)));
}

#[test]
fn test_parse_version_dev_build_sorts_before_release() {
    let dev = parse_version("0.14.0-dev.1951+857383689").unwrap();
    assert!(dev < Version::new(0, 14, 0));
    assert!(dev > Version::new(0, 13, 0));
}

#[test]
fn test_parse_version_two_components() {
    assert_eq!(parse_version("v0.12"), Some(Version::new(0, 12, 0)));
}

#[test]
fn test_parse_version_garbage() {
    assert_eq!(parse_version("zig: command not found"), None);
    assert_eq!(parse_version(""), None);
}
