use arrow::array::{Array, AsArray};
use arrow::datatypes::Int64Type;
use kerncall::{Datum, FunctionGateway, unique_values, value_counts};
use kerncall_test_utils::{int64_array, int64_chunked, int64_values};

#[test]
fn unique_is_idempotent() {
    let gateway = FunctionGateway::default();
    let x = Datum::ChunkedArray(int64_chunked(&[
        &[Some(4), Some(1), None],
        &[Some(4), None, Some(9)],
    ]));

    let once = unique_values(&gateway, &x).expect("unique");
    assert_eq!(int64_values(&once), vec![Some(4), Some(1), None, Some(9)]);

    let twice = unique_values(&gateway, &once).expect("unique");
    assert_eq!(int64_values(&twice), int64_values(&once));
}

#[test]
fn unique_of_empty_array_is_empty() {
    let gateway = FunctionGateway::default();
    let out = unique_values(&gateway, &Datum::Array(int64_array(&[]))).expect("unique");
    assert!(out.is_empty());
}

#[test]
fn counts_follow_first_occurrence() {
    let gateway = FunctionGateway::default();
    let x = Datum::Array(int64_array(&[Some(2), Some(3), Some(2), Some(2)]));
    let out = value_counts(&gateway, &x).expect("value_counts");

    let strukt = out.as_array().expect("array result").as_struct();
    assert_eq!(strukt.len(), 2);
    let values = strukt
        .column_by_name("values")
        .expect("values field")
        .as_primitive::<Int64Type>();
    let counts = strukt
        .column_by_name("counts")
        .expect("counts field")
        .as_primitive::<Int64Type>();
    assert_eq!(values.values().to_vec(), vec![2, 3]);
    assert_eq!(counts.values().to_vec(), vec![3, 1]);
}
