use std::sync::Arc;

use arrow::array::{Array, RecordBatch};
use arrow::datatypes::{DataType, Field, Schema};
use kerncall::{
    Datum, EngineError, Error, FunctionGateway, HostValue, KernelRegistry, Scalar, Value, is_in,
    match_values,
};
use kerncall_test_utils::{RecordingEngine, int64_array, int64_chunked, utf8_array};

fn recording_gateway() -> (Arc<RecordingEngine<KernelRegistry>>, FunctionGateway) {
    let engine = RecordingEngine::new(KernelRegistry::builtin());
    let gateway = FunctionGateway::new(engine.clone());
    (engine, gateway)
}

fn positions(array: &arrow::array::Int32Array) -> Vec<Option<i32>> {
    array.iter().collect()
}

#[test]
fn columnar_match_reports_first_positions() {
    let (engine, gateway) = recording_gateway();
    let x = Value::from(int64_array(&[Some(1), Some(2), Some(3)]));
    let table = Value::from(int64_array(&[Some(3), Some(2), Some(1)]));

    let out = match_values(&gateway, &x, &table).expect("match");
    assert_eq!(positions(&out), vec![Some(2), Some(1), Some(0)]);

    let calls = engine.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].name, "index_in_meta_binary");
    assert!(calls[0].options.is_empty());
}

#[test]
fn result_lines_up_with_chunked_input() {
    let (_, gateway) = recording_gateway();
    let x = Value::Datum(Datum::ChunkedArray(int64_chunked(&[
        &[Some(5), Some(7)],
        &[None, Some(5)],
    ])));
    let table = Value::from(int64_array(&[Some(7), Some(5), Some(5)]));

    let out = match_values(&gateway, &x, &table).expect("match");
    assert_eq!(out.len(), 4);
    assert_eq!(positions(&out), vec![Some(1), Some(0), None, Some(1)]);
}

#[test]
fn host_table_is_converted_before_dispatch() {
    let (engine, gateway) = recording_gateway();
    let x = Value::from(utf8_array(&["b", "z", "a"]));
    let table = Value::Host(HostValue::from(vec!["a", "b"]));

    let out = match_values(&gateway, &x, &table).expect("match");
    assert_eq!(positions(&out), vec![Some(1), None, Some(0)]);
    assert_eq!(engine.call_count(), 1);
}

#[test]
fn host_lookup_in_host_table_skips_the_engine() {
    let (engine, gateway) = recording_gateway();
    let x = Value::Host(HostValue::from(vec![2.0, 9.0, f64::NAN]));
    let table = Value::Host(HostValue::from(vec![f64::NAN, 2.0, 2.0]));

    let out = match_values(&gateway, &x, &table).expect("match");
    assert_eq!(positions(&out), vec![Some(1), None, Some(0)]);

    let found = is_in(&gateway, &x, &table).expect("is_in");
    assert_eq!(
        found.iter().collect::<Vec<_>>(),
        vec![Some(true), Some(false), Some(true)]
    );
    assert_eq!(engine.call_count(), 0);
}

#[test]
fn host_lookup_in_columnar_table_uses_the_engine() {
    let (engine, gateway) = recording_gateway();
    let x = Value::Host(HostValue::from(vec![4_i64, 6]));
    let table = Value::from(int64_array(&[Some(6)]));

    let out = match_values(&gateway, &x, &table).expect("match");
    assert_eq!(positions(&out), vec![None, Some(0)]);
    assert_eq!(engine.calls()[0].name, "index_in_meta_binary");
}

#[test]
fn scalar_lookup_yields_one_position() {
    let (_, gateway) = recording_gateway();
    let x = Value::Datum(Datum::Scalar(Scalar::from(3i64)));
    let table = Value::Datum(Datum::Scalar(Scalar::from(3i64)));

    let out = match_values(&gateway, &x, &table).expect("match");
    assert_eq!(positions(&out), vec![Some(0)]);
}

#[test]
fn is_in_goes_through_the_membership_kernel() {
    let (engine, gateway) = recording_gateway();
    let x = Value::from(int64_array(&[Some(1), None, Some(4)]));
    let table = Value::from(int64_array(&[Some(4), Some(1)]));

    let found = is_in(&gateway, &x, &table).expect("is_in");
    assert_eq!(
        found.iter().collect::<Vec<_>>(),
        vec![Some(true), Some(false), Some(true)]
    );
    assert_eq!(engine.calls()[0].name, "is_in_meta_binary");
}

#[test]
fn record_batch_table_is_rejected_by_the_engine() {
    let (_, gateway) = recording_gateway();
    let schema = Arc::new(Schema::new(vec![Field::new("v", DataType::Int64, true)]));
    let batch = RecordBatch::try_new(schema, vec![int64_array(&[Some(1)])]).expect("batch");

    let err = match_values(
        &gateway,
        &Value::from(int64_array(&[Some(1)])),
        &Value::Datum(Datum::RecordBatch(batch)),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::Engine(EngineError::UnsupportedArgument { index: 1, .. })
    ));
}
