use keyschema_core::{
    BinaryObject, ConfigValue, DataType, SchemaEntry, SizeLimits, ValueRole, cidr_contains,
    decode_binary_object, encode_binary_object, is_compliant, parse_cidr, validate_input,
    validate_role, validate_schema_entry,
};
use keyschema_test_support::assert::{assert_empty, assert_invalid, schema_field};
use keyschema_test_support::fixtures::{
    enumerated_entry, instant, list_entry, number_entry, registry, windowed_entry,
};

#[test]
fn number_range_accepts_inside_and_names_bounds_outside() -> anyhow::Result<()> {
    let registry = registry();
    let entry = number_entry("10", "20");
    for n in 10..=20 {
        let values = validate_input(&registry, &entry, Some(&n.to_string()))?;
        assert_eq!(values, vec![ConfigValue::Number(n)]);
    }
    assert_invalid(
        validate_input(&registry, &entry, Some("9")),
        "is too small, the minimum is [10]",
    );
    assert_invalid(
        validate_input(&registry, &entry, Some("21")),
        "is too big, the maximum is [20]",
    );
    Ok(())
}

#[test]
fn cidr_range_and_containment() -> anyhow::Result<()> {
    let range = parse_cidr("10.0.0.0/24")?;
    assert_eq!(range.network().to_string(), "10.0.0.0");
    assert_eq!(range.broadcast().to_string(), "10.0.0.255");
    assert!(cidr_contains(&range, "10.0.0.128"));
    assert!(!cidr_contains(&range, "10.0.1.1"));
    Ok(())
}

#[test]
fn cardinality_bounds_multi_valued_input() -> anyhow::Result<()> {
    let registry = registry();
    let entry = list_entry(DataType::Number, 2, 4);
    assert_eq!(validate_input(&registry, &entry, Some("[1,2,3]"))?.len(), 3);
    assert_invalid(
        validate_input(&registry, &entry, Some("[1]")),
        "min cardinality is [2]",
    );
    assert_invalid(
        validate_input(&registry, &entry, Some("[1,2,3,4,5]")),
        "max cardinality is [4]",
    );
    Ok(())
}

#[test]
fn uniqueness_reports_every_examined_element() {
    let registry = registry();
    let entry = list_entry(DataType::Number, 1, 3).unique();
    let err = assert_invalid(
        validate_input(&registry, &entry, Some("[1,1,2]")),
        "already exist(s)",
    );
    assert_eq!(
        err.converted(),
        &[
            ConfigValue::Number(1),
            ConfigValue::Number(1),
            ConfigValue::Number(2)
        ]
    );
}

#[test]
fn enumeration_names_allowed_values() -> anyhow::Result<()> {
    let registry = registry();
    let entry = enumerated_entry("[\"a\",\"b\"]");
    assert_invalid(
        validate_input(&registry, &entry, Some("c")),
        "is not one of the allowed values: a, b",
    );
    assert_eq!(
        validate_input(&registry, &entry, Some("a"))?,
        vec![ConfigValue::Text("a".into())]
    );
    Ok(())
}

#[test]
fn enumeration_applies_to_each_element_of_a_list() {
    let registry = registry();
    let entry = list_entry(DataType::String, 0, 5).with_enumeration("red, green");
    let err = assert_invalid(
        validate_input(&registry, &entry, Some("[\"red\",\"blue\"]")),
        "is not one of the allowed values: red, green",
    );
    assert_eq!(err.converted(), &[ConfigValue::Text("red".into())]);
}

#[test]
fn compliance_of_validity_windows() -> anyhow::Result<()> {
    let registry = registry();
    let current = windowed_entry(instant(2020, 1, 1), instant(2030, 1, 1));
    let narrower = windowed_entry(instant(2022, 1, 1), instant(2026, 7, 1));
    assert!(is_compliant(&registry, &current, &narrower)?.compliant);

    let widened = windowed_entry(instant(2020, 1, 1), instant(2031, 1, 1));
    let verdict = is_compliant(&registry, &current, &widened)?;
    assert!(!verdict.compliant);
    assert!(verdict.reason.unwrap_or_default().contains("validTill"));
    Ok(())
}

#[test]
fn canonical_literals_are_idempotent() -> anyhow::Result<()> {
    let registry = registry();
    let cases = [
        (DataType::Number, "0042"),
        (DataType::Double, "2.50"),
        (DataType::Boolean, "YES"),
        (DataType::Date, "2024-02-29"),
        (DataType::Time, "08:30:00.1234"),
        (DataType::Timestamp, "2024-05-01T12:00:00.123456+02:00"),
        (DataType::Uuid, "67E55044-10B1-426F-9247-BB680E5FE0C8"),
        (DataType::Uri, "https://example.com/a"),
        (DataType::Cidr, " 10.0.0.0/8 "),
        (DataType::Binary, "logo|2024-05-01T10:00:00Z|{image/png}aGVsbG8="),
    ];
    for (data_type, literal) in cases {
        let entry = SchemaEntry::new("app.value", data_type, "Value");
        let first = validate_input(&registry, &entry, Some(literal))?;
        let canonical = first[0].to_string();
        let second = validate_input(&registry, &entry, Some(&canonical))?;
        assert_eq!(first, second, "{data_type} literal {literal:?}");
    }
    Ok(())
}

#[test]
fn binary_round_trip_holds_when_timestamp_is_present() -> anyhow::Result<()> {
    let object = BinaryObject {
        name: Some("report|final.pdf".into()),
        timestamp: Some(instant(2024, 3, 1)),
        mimetype: Some("application/pdf".into()),
        data: Some("JVBERi0=".into()),
    };
    let encoded = encode_binary_object(&object);
    assert_eq!(decode_binary_object(&encoded)?, object);
    Ok(())
}

#[test]
fn optional_input_is_an_empty_signal_for_callers() {
    let registry = registry();
    let entry = number_entry("1", "5");
    assert_empty(validate_input(&registry, &entry, None));
    assert_empty(validate_role(
        &registry,
        &entry.with_cardinality(keyschema_core::Sizing::between(1, 1)),
        Some(" "),
        ValueRole::DefaultValue,
    ));
}

#[test]
fn schema_entries_are_checked_before_use() {
    let registry = registry();
    let entry = number_entry("1", "5").with_example("9");
    assert_eq!(
        schema_field(validate_schema_entry(&registry, &entry)),
        "exampleValue"
    );
    let sized = SchemaEntry::new("app.logo", DataType::Binary, "Logo")
        .with_value_size(SizeLimits::between("*", "1024"));
    assert!(validate_schema_entry(&registry, &sized).is_ok());
}

#[test]
fn registry_is_shared_across_threads() {
    let registry = registry();
    let entry = list_entry(DataType::Email, 1, 3);
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let values = validate_input(&registry, &entry, Some("[\"a@example.com\"]"))
                    .expect("valid address list");
                assert_eq!(values.len(), 1);
            });
        }
    });
}
