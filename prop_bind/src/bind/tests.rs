//! Unit tests for the binder's scalar, collection and pointer strategies.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use anyhow::{Result, ensure};
use rstest::rstest;

use super::{Binder, Shape, short_type_name};
use crate::Bindable;
use crate::convert::Converters;
use crate::error::BindErrorKind;
use crate::store::PropertyStore;
use crate::value::Value;

#[derive(Debug, Default, PartialEq, Bindable)]
struct Endpoint {
    #[value("${host}")]
    pub host: String,
    #[value("${port:=80}")]
    pub port: i32,
}

fn store(entries: &[(&str, &str)]) -> PropertyStore {
    entries.iter().copied().collect()
}

#[rstest]
#[case("42", 42)]
#[case("-7", -7)]
#[case("0x1f", 31)]
#[case("1_000", 1000)]
fn signed_scalars_are_cast(#[case] raw: &str, #[case] expected: i64) {
    let props = store(&[("n", raw)]);
    assert_eq!(Binder::default().resolve::<i64>(&props, "n").ok(), Some(expected));
}

#[rstest]
#[case("T", true)]
#[case("true", true)]
#[case("1", true)]
#[case("F", false)]
#[case("FALSE", false)]
fn booleans_accept_common_spellings(#[case] raw: &str, #[case] expected: bool) {
    let props = store(&[("flag", raw)]);
    assert_eq!(Binder::default().resolve::<bool>(&props, "flag").ok(), Some(expected));
}

#[test]
fn out_of_range_integer_is_a_conversion_error() {
    let props = store(&[("n", "300")]);
    let err = Binder::default()
        .resolve::<u8>(&props, "n")
        .expect_err("300 does not fit in u8");
    assert_eq!(err.kind(), BindErrorKind::Conversion);
}

#[rstest]
#[case("--5")]
#[case("0x-5")]
#[case("--170141183460469231731687303715884105728")]
fn doubled_signs_are_conversion_errors(#[case] raw: &str) {
    let props = store(&[("n", raw)]);
    let err = Binder::default()
        .resolve::<i64>(&props, "n")
        .expect_err("malformed sign");
    assert_eq!(err.kind(), BindErrorKind::Conversion);
}

#[test]
fn wide_unsigned_scalars_are_cast() {
    let props = store(&[("n", "340282366920938463463374607431768211455"), ("neg", "-1")]);
    let binder = Binder::default();
    assert_eq!(binder.resolve::<u128>(&props, "n").ok(), Some(u128::MAX));
    let err = binder
        .resolve::<u64>(&props, "neg")
        .expect_err("negative unsigned");
    assert_eq!(err.kind(), BindErrorKind::Conversion);
}

#[test]
fn floats_are_cast() {
    let props = store(&[("ratio", " 0.25 ")]);
    assert_eq!(Binder::default().resolve::<f64>(&props, "ratio").ok(), Some(0.25));
}

#[test]
fn missing_scalar_is_not_configured() {
    let err = Binder::default()
        .resolve::<String>(&PropertyStore::new(), "absent")
        .expect_err("nothing configured");
    assert_eq!(err.kind(), BindErrorKind::NotConfigured);
}

#[test]
fn signed_sequence_reads_list_values() -> Result<()> {
    let mut props = PropertyStore::new();
    props.set("ids", Value::from(vec![1_i64, 2, 3]));
    let ids: Vec<i32> = Binder::default().resolve(&props, "ids")?;
    ensure!(ids == vec![1, 2, 3], "unexpected ids {ids:?}");
    Ok(())
}

#[rstest]
#[case::commas("a, b,,c")]
#[case::whitespace("a b\tc")]
#[case::mixed(" a,b  c ")]
fn scalar_feeding_a_sequence_is_split_into_items(#[case] raw: &str) -> Result<()> {
    let props = store(&[("tags", raw)]);
    let tags: Vec<String> = Binder::default().resolve(&props, "tags")?;
    ensure!(tags == ["a", "b", "c"], "unexpected tags {tags:?}");
    Ok(())
}

#[test]
fn unsigned_and_float_sequences_are_unsupported() {
    let mut props = PropertyStore::new();
    props.set("values", Value::from(vec!["1", "2"]));
    let binder = Binder::default();
    let unsigned = binder
        .resolve::<Vec<u32>>(&props, "values")
        .expect_err("u32 elements are unsupported");
    assert_eq!(unsigned.kind(), BindErrorKind::UnsupportedElement);
    let float = binder
        .resolve::<Vec<f64>>(&props, "values")
        .expect_err("f64 elements are unsupported");
    assert_eq!(float.kind(), BindErrorKind::UnsupportedElement);
}

#[test]
fn string_mapping_strips_the_key_prefix() -> Result<()> {
    let props = store(&[("labels.team", "core"), ("labels.tier", "gold")]);
    let labels: HashMap<String, String> = Binder::default().resolve(&props, "labels")?;
    ensure!(labels.len() == 2, "unexpected labels {labels:?}");
    ensure!(labels.get("team").map(String::as_str) == Some("core"), "team missing");
    ensure!(labels.get("tier").map(String::as_str) == Some("gold"), "tier missing");
    Ok(())
}

#[test]
fn numeric_mapping_elements_are_unsupported() {
    let props = store(&[("limits.cpu", "2")]);
    let err = Binder::default()
        .resolve::<HashMap<String, u32>>(&props, "limits")
        .expect_err("u32 elements are unsupported");
    assert_eq!(err.kind(), BindErrorKind::UnsupportedElement);
}

#[test]
fn converter_elements_are_converted_individually() -> Result<()> {
    let mut props = PropertyStore::new();
    props.set("waits", Value::from(vec!["1s", "250ms"]));
    props.set("timeouts.read", "5s");
    let binder = Binder::default();
    let waits: Vec<Duration> = binder.resolve(&props, "waits")?;
    ensure!(
        waits == [Duration::from_secs(1), Duration::from_millis(250)],
        "unexpected waits {waits:?}"
    );
    let timeouts: BTreeMap<String, Duration> = binder.resolve(&props, "timeouts")?;
    ensure!(
        timeouts.get("read") == Some(&Duration::from_secs(5)),
        "unexpected timeouts {timeouts:?}"
    );
    Ok(())
}

#[test]
fn struct_sequence_binds_each_mapping() -> Result<()> {
    let first: Value = [("host", "a.example"), ("port", "81")].into_iter().collect();
    let second: Value = [("host", "b.example")].into_iter().collect();
    let mut props = PropertyStore::new();
    props.set("endpoints", Value::Sequence(vec![first, second]));
    let endpoints: Vec<Endpoint> = Binder::default().resolve(&props, "endpoints")?;
    ensure!(
        endpoints
            == [
                Endpoint {
                    host: "a.example".into(),
                    port: 81
                },
                Endpoint {
                    host: "b.example".into(),
                    port: 80
                },
            ],
        "unexpected endpoints {endpoints:?}"
    );
    Ok(())
}

#[test]
fn struct_sequence_element_errors_name_the_index() {
    let broken: Value = [("port", "81")].into_iter().collect();
    let mut props = PropertyStore::new();
    props.set("endpoints", Value::Sequence(vec![broken]));
    let err = Binder::default()
        .resolve::<Vec<Endpoint>>(&props, "endpoints")
        .expect_err("host is missing");
    assert_eq!(err.kind(), BindErrorKind::NotConfigured);
    assert!(err.to_string().contains("endpoints[0].host"), "{err}");
}

#[test]
fn struct_mapping_groups_by_first_segment() -> Result<()> {
    let props = store(&[
        ("upstreams.primary.host", "p.example"),
        ("upstreams.backup.host", "b.example"),
        ("upstreams.backup.port", "8080"),
    ]);
    let upstreams: BTreeMap<String, Endpoint> = Binder::default().resolve(&props, "upstreams")?;
    ensure!(upstreams.len() == 2, "unexpected upstreams {upstreams:?}");
    ensure!(
        upstreams.get("backup").map(|e| e.port) == Some(8080),
        "backup port not bound"
    );
    ensure!(
        upstreams.get("primary").map(|e| e.port) == Some(80),
        "primary port should default"
    );
    Ok(())
}

#[test]
fn struct_mapping_rejects_flat_entries() {
    let props = store(&[("upstreams.primary", "p.example")]);
    let err = Binder::default()
        .resolve::<BTreeMap<String, Endpoint>>(&props, "upstreams")
        .expect_err("flat entries are not mappings");
    assert_eq!(err.kind(), BindErrorKind::ShapeMismatch);
}

#[rstest]
#[case::boxed(<Box<Endpoint> as Bindable>::shape())]
#[case::optional(<Option<String> as Bindable>::shape())]
fn pointers_report_pointer_shape(#[case] shape: Shape) {
    assert_eq!(shape, Shape::Pointer);
}

#[test]
fn pointer_root_is_rejected_before_lookup() {
    let mut dest: Option<String> = None;
    let err = Binder::default()
        .bind_into(&PropertyStore::new(), "anything", &mut dest, false)
        .expect_err("pointer roots are invalid");
    assert_eq!(err.kind(), BindErrorKind::InvalidTarget);
    assert!(dest.is_none());
}

#[test]
fn opaque_type_without_converter_is_unsupported() {
    let props = store(&[("timeout", "1s")]);
    let err = Binder::new(Converters::empty())
        .resolve::<Duration>(&props, "timeout")
        .expect_err("no converter for Duration");
    assert_eq!(err.kind(), BindErrorKind::UnsupportedType);
}

#[test]
fn short_type_name_strips_module_paths() {
    assert_eq!(
        short_type_name::<HashMap<String, Vec<Endpoint>>>(),
        "HashMap<String, Vec<Endpoint>>"
    );
}
