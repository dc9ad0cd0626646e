use chrono::NaiveDate;
use record_assert::logging::init_test_logging;
use record_assert::verify::{compare_multiset, normalize, Mismatch, NativeEq, Normalized};
use record_assert::{
    assert_equals_as_string, assert_equals_ignoring_order, assert_equals_ignoring_order_by,
    assert_record_equals, assert_record_list_equals, assert_records_equal_ignoring_order,
    assert_table_equals, assert_tables_equal, AssertConfig, Assertions, Record, Table, Value,
};
use rust_decimal::Decimal;
use std::io::Write;
use std::str::FromStr;

fn id_val(id: impl Into<Value>, val: impl Into<Value>) -> Record {
    Record::builder().field("id", id).field("val", val).build()
}

fn t(rows: Vec<Record>) -> Table {
    Table::new("T", ["PK", "V"], ["PK"], rows).unwrap()
}

fn pk_v(pk: impl Into<Value>, v: impl Into<Value>) -> Record {
    Record::builder().field("PK", pk).field("V", v).build()
}

#[test]
fn test_records_match_ignoring_order() {
    init_test_logging();
    let expected = vec![id_val("1", "a"), id_val("2", "b")];
    let actual = vec![id_val("2", "b"), id_val("1", "a")];
    assert_records_equal_ignoring_order("", &expected, &actual);
}

#[test]
fn test_records_match_across_native_types() {
    let expected = vec![id_val("1", "0.0000000001"), id_val("2", "2024-01-31")];
    let actual = vec![
        id_val(2, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()),
        id_val(1, Decimal::from_str("0.0000000001").unwrap()),
    ];
    assert_records_equal_ignoring_order("", &expected, &actual);
}

#[test]
#[should_panic(expected = "size differs. expected size=[3], actual size=[2]")]
fn test_size_mismatch_panics() {
    assert_equals_ignoring_order("", &["foo", "bar", "baz"], &["bar", "baz"]);
}

#[test]
#[should_panic(
    expected = "different element(s) found. expected has [bar], actual has [hoge]. expected:<[foo, bar, baz]> but was:<[hoge, foo, baz]>"
)]
fn test_content_mismatch_panics() {
    assert_equals_ignoring_order("", &["foo", "bar", "baz"], &["hoge", "foo", "baz"]);
}

#[test]
fn test_content_mismatch_structure() {
    let failure = compare_multiset(&["foo", "bar", "baz"], &["hoge", "foo", "baz"], &NativeEq, "")
        .unwrap_err();
    assert_eq!(
        failure.mismatch(),
        &Mismatch::Content {
            leftover_expected: vec!["bar".to_string()],
            leftover_actual: vec!["hoge".to_string()],
        }
    );
}

#[test]
fn test_custom_equivalence() {
    let case_insensitive = |e: &&str, a: &String| e.eq_ignore_ascii_case(a);
    let actual = vec!["B".to_string(), "a".to_string()];
    assert_equals_ignoring_order_by("", &["a", "b"], &actual, &case_insensitive);
}

#[test]
#[should_panic(expected = "table=T line=1 column=V expected:<あ> but was:<い>")]
fn test_column_value_mismatch_panics() {
    assert_table_equals("", &t(vec![pk_v("1", "あ")]), &t(vec![pk_v("1", "い")]));
}

#[test]
#[should_panic(expected = "an unexpected record is included in the table of [T]. PK=[PK=2]")]
fn test_unexpected_row_panics() {
    let pk = |v: Value| Record::builder().field("PK", v).build();
    let expected = Table::new("T", ["PK"], ["PK"], vec![pk(Value::text("1"))]).unwrap();
    let actual = expected
        .with_rows(vec![pk(Value::Int(1)), pk(Value::Int(2))])
        .unwrap();
    assert_table_equals("", &expected, &actual);
}

#[test]
#[should_panic(expected = "users the table of [T] is expected to have a record whose PK is [PK=9]")]
fn test_missing_row_panics_with_caller_message() {
    assert_table_equals("users", &t(vec![pk_v("9", "a")]), &t(vec![pk_v("1", "a")]));
}

#[test]
fn test_tables_equal_by_name() {
    let expected = vec![t(vec![pk_v("1", "a"), pk_v("2", Value::Null)])];
    let actual = vec![
        Table::new("OTHER", ["ID"], ["ID"], vec![]).unwrap(),
        t(vec![pk_v(2, Value::Null), pk_v(1, "a")]),
    ];
    assert_tables_equal("", &expected, &actual);
}

#[test]
#[should_panic(expected = "line no=[2]")]
fn test_record_list_is_ordered() {
    let expected = vec![id_val("1", "a"), id_val("2", "b")];
    let actual = vec![id_val(1, "a"), id_val(3, "b")];
    assert_record_list_equals("", &expected, &actual);
}

#[test]
fn test_record_equals() {
    let expected = Record::builder().field("BIN", "0AFF").field("FLAG", "true").build();
    let actual = Record::builder()
        .field("BIN", vec![0x0a_u8, 0xff])
        .field("FLAG", true)
        .build();
    assert_record_equals("", &expected, &actual);
}

#[test]
#[should_panic(expected = "expected:<null> but was:<<null>>")]
fn test_null_never_equals_null_text() {
    assert_equals_as_string("", &Value::text("null"), &Value::Null);
}

#[test]
fn test_decimal_never_uses_exponent() {
    let tiny = Value::Decimal(Decimal::from_str("0.0000000001").unwrap());
    assert_eq!(normalize(&tiny), Normalized::Text("0.0000000001".to_string()));
    assert_equals_as_string("", &Value::text("0.0000000001"), &tiny);
}

const PRICES_CONFIG: &str = r#"
options:
  trim_decimal_zeros: false
  null_display: "<NULL>"
tables:
  - name: PRICES
    columns: [ID, AMOUNT]
    primary_keys: [ID]
"#;

fn price(id: Value, amount: Value) -> Record {
    Record::builder()
        .field("ID", id)
        .field("AMOUNT", amount)
        .build()
}

#[test]
fn test_config_driven_assertions() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{PRICES_CONFIG}").unwrap();
    let config = AssertConfig::from_file(file.path()).unwrap();
    let assertions = Assertions::from_config(&config);

    let row = price;
    let expected = config
        .table("PRICES", vec![row(Value::text("1"), Value::text("1.10"))])
        .unwrap();
    let actual = config
        .table(
            "PRICES",
            vec![row(Value::Int(1), Value::Decimal(Decimal::from_str("1.10").unwrap()))],
        )
        .unwrap();
    assertions.table_equals("", &expected, &actual);
}

#[test]
#[should_panic(
    expected = "an unexpected record is included in the table of [PRICES]. PK=[ID=<NULL>]"
)]
fn test_configured_null_display_in_key_text() {
    let config = AssertConfig::from_yaml(PRICES_CONFIG).unwrap();
    let expected = config.table("PRICES", vec![]).unwrap();
    let actual = config
        .table("PRICES", vec![price(Value::Null, Value::text("1"))])
        .unwrap();
    Assertions::from_config(&config).table_equals("", &expected, &actual);
}
