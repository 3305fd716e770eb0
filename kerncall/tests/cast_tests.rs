use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray, Float64Array, TimestampMillisecondArray};
use arrow::datatypes::{DataType, Int8Type, Int64Type, TimeUnit};
use kerncall::{
    CastOptions, ChunkedArray, Datum, EngineError, Error, FunctionGateway, KernelRegistry, Scalar,
    cast, cast_options,
};
use kerncall_test_utils::{RecordingEngine, int64_array};

fn floats() -> Datum {
    Datum::Array(Arc::new(Float64Array::from(vec![1.0, 2.5])))
}

#[test]
fn option_flags_reach_the_engine() {
    let engine = RecordingEngine::new(KernelRegistry::builtin());
    let gateway = FunctionGateway::new(engine.clone());
    let options = cast_options(Some(true), None, Some(true), None);

    cast(&gateway, &Datum::Array(int64_array(&[Some(1)])), &DataType::Int32, &options)
        .expect("cast");

    let call = &engine.calls()[0];
    assert_eq!(call.name, "cast");
    assert_eq!(call.options.get_data_type("to_type"), Some(&DataType::Int32));
    assert_eq!(call.options.get_bool("safe"), Some(true));
    assert_eq!(call.options.get_bool("allow_int_overflow"), Some(false));
    assert_eq!(call.options.get_bool("allow_time_truncate"), Some(true));
    assert_eq!(call.options.get_bool("allow_float_truncate"), Some(false));
}

#[test]
fn safe_cast_refuses_to_truncate_floats() {
    let gateway = FunctionGateway::default();
    let err = cast(&gateway, &floats(), &DataType::Int64, &CastOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Engine(EngineError::Execution { .. })));

    let lenient = cast_options(Some(false), None, None, None);
    let out = cast(&gateway, &floats(), &DataType::Int64, &lenient).expect("cast");
    let out = out.as_array().expect("array").as_primitive::<Int64Type>();
    assert_eq!(out.values().to_vec(), vec![1, 2]);
}

#[test]
fn explicit_override_beats_safe() {
    let gateway = FunctionGateway::default();
    let options = CastOptions::builder().safe(true).allow_float_truncate(true).build();
    assert!(cast(&gateway, &floats(), &DataType::Int64, &options).is_ok());

    let wide = Datum::Array(int64_array(&[Some(1), Some(300)]));
    assert!(cast(&gateway, &wide, &DataType::Int8, &options).is_err());
}

#[test]
fn permitted_overflow_becomes_missing() {
    let gateway = FunctionGateway::default();
    let options = cast_options(Some(true), Some(true), None, None);
    let wide = Datum::Array(int64_array(&[Some(1), Some(300)]));
    let out = cast(&gateway, &wide, &DataType::Int8, &options).expect("cast");
    let out = out.as_array().expect("array").as_primitive::<Int8Type>();
    assert_eq!(out.iter().collect::<Vec<_>>(), vec![Some(1), None]);
}

#[test]
fn time_truncation_needs_permission() {
    let gateway = FunctionGateway::default();
    let millis: ArrayRef = Arc::new(TimestampMillisecondArray::from(vec![1_000, 1_250]));
    let seconds = DataType::Timestamp(TimeUnit::Second, None);
    let x = Datum::Array(millis);

    assert!(cast(&gateway, &x, &seconds, &CastOptions::default()).is_err());
    let out = cast(&gateway, &x, &seconds, &CastOptions::new(false)).expect("cast");
    assert_eq!(out.data_type(), Some(&seconds));
}

#[test]
fn list_targets_are_reachable() {
    let gateway = FunctionGateway::default();
    let x = Datum::Array(int64_array(&[Some(1), Some(2)]));
    let to_type = DataType::new_list(DataType::Int64, true);

    let out = cast(&gateway, &x, &to_type, &CastOptions::default()).expect("cast");
    let lists = out.as_array().expect("array").as_list::<i32>();
    assert_eq!(lists.len(), 2);
    assert_eq!(lists.value(1).as_primitive::<Int64Type>().values().to_vec(), vec![2]);
}

#[test]
fn timestamp_to_time_of_day_under_safe_options() {
    let gateway = FunctionGateway::default();
    let millis: ArrayRef = Arc::new(TimestampMillisecondArray::from(vec![86_400_000]));
    let to_type = DataType::Time64(TimeUnit::Microsecond);

    let out = cast(&gateway, &Datum::Array(millis), &to_type, &CastOptions::default())
        .expect("cast");
    assert_eq!(out.data_type(), Some(&to_type));
    assert_eq!(out.null_count(), 0);
}

#[test]
fn shape_is_preserved() {
    let gateway = FunctionGateway::default();
    let options = CastOptions::default();

    let chunked = ChunkedArray::try_new(vec![int64_array(&[Some(1)]), int64_array(&[Some(2)])])
        .expect("chunked");
    let out = cast(&gateway, &Datum::ChunkedArray(chunked), &DataType::Float64, &options)
        .expect("cast");
    match out {
        Datum::ChunkedArray(chunked) => {
            assert_eq!(chunked.num_chunks(), 2);
            assert_eq!(chunked.data_type(), &DataType::Float64);
        }
        other => panic!("expected a chunked array, got {:?}", other.kind()),
    }

    let out = cast(&gateway, &Datum::Scalar(Scalar::from(7i64)), &DataType::Utf8, &options)
        .expect("cast");
    let scalar = out.into_scalar().expect("scalar");
    assert_eq!(scalar.as_array().as_string::<i32>().value(0), "7");
}
