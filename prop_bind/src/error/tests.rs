//! Unit tests for error classification and rendering.

use rstest::rstest;

use super::{BindError, BindErrorKind, LoadError};
use crate::scope::Scope;

fn scope() -> Scope {
    Scope::root("AppConfig", "app", false)
        .field("server")
        .named("app.server".to_owned())
}

#[rstest]
#[case(BindError::tag_syntax(&scope(), "server"), BindErrorKind::TagSyntax)]
#[case(BindError::invalid_target(&scope(), "pointer"), BindErrorKind::InvalidTarget)]
#[case(BindError::not_configured(&scope()), BindErrorKind::NotConfigured)]
#[case(BindError::struct_default(&scope()), BindErrorKind::StructDefault)]
#[case(
    BindError::shape_mismatch(&scope(), "a scalar", "a mapping"),
    BindErrorKind::ShapeMismatch
)]
#[case(
    BindError::unsupported_element(&scope(), "sequence", "u32"),
    BindErrorKind::UnsupportedElement
)]
#[case(BindError::unsupported_type(&scope(), "Duration"), BindErrorKind::UnsupportedType)]
#[case(
    BindError::conversion(&scope(), "u16", "http", "invalid digit"),
    BindErrorKind::Conversion
)]
fn every_variant_reports_kind_and_field(#[case] err: BindError, #[case] kind: BindErrorKind) {
    assert_eq!(err.kind(), kind);
    assert_eq!(err.field(), "AppConfig.server");
    assert!(err.to_string().starts_with("AppConfig.server: "), "{err}");
}

#[test]
fn not_configured_names_the_property() {
    let err = BindError::not_configured(&scope());
    assert_eq!(
        err.to_string(),
        "AppConfig.server: property \"app.server\" is not configured"
    );
}

#[test]
fn conversion_mentions_raw_text_and_type() {
    let message = BindError::conversion(&scope(), "u16", "http", "invalid digit").to_string();
    assert!(message.contains("\"http\""), "{message}");
    assert!(message.contains("u16"), "{message}");
}

#[rstest]
#[case(BindError::not_configured(&scope()), Some("app.server"))]
#[case(BindError::conversion(&scope(), "u16", "http", "invalid digit"), Some("app.server"))]
#[case(BindError::tag_syntax(&scope(), "server"), None)]
#[case(BindError::unsupported_type(&scope(), "Duration"), None)]
fn property_is_reported_where_known(#[case] err: BindError, #[case] expected: Option<&str>) {
    assert_eq!(err.property(), expected);
}

#[test]
fn figment_errors_convert_into_gathering() {
    let err: LoadError = figment::Error::from("boom".to_owned()).into();
    assert!(matches!(err, LoadError::Gathering(_)));
    assert!(err.to_string().contains("boom"));
}
