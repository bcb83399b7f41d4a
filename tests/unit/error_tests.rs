//! Unit tests for the application error type.

use agent_bridge::AppError;

/// Each variant renders with its domain prefix.
#[test]
fn display_includes_domain_prefix() {
    let cases = [
        (AppError::Config("bad".into()), "config: bad"),
        (AppError::Spawn("bad".into()), "spawn: bad"),
        (AppError::Encode("bad".into()), "encode: bad"),
        (AppError::Protocol("bad".into()), "protocol: bad"),
        (AppError::Io("bad".into()), "io: bad"),
    ];

    for (err, expected) in cases {
        assert_eq!(err.to_string(), expected);
    }
}

/// TOML parse failures convert into the config variant.
#[test]
fn toml_errors_convert_to_config() {
    let parse_err = toml::from_str::<toml::Value>("not [ valid").expect_err("must fail");
    let err: AppError = parse_err.into();

    assert!(matches!(err, AppError::Config(_)));
    assert!(err.to_string().contains("invalid config"));
}

/// The error type is usable as a boxed `std::error::Error`.
#[test]
fn implements_std_error() {
    let err: Box<dyn std::error::Error> = Box::new(AppError::Io("gone".into()));
    assert_eq!(err.to_string(), "io: gone");
}
