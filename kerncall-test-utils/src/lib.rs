use std::sync::{Arc, Mutex, Once};

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use kerncall_compute::ComputeEngine;
use kerncall_result::EngineError;
use kerncall_types::{ChunkedArray, Datum, DatumKind, OptionBag};

static INIT: Once = Once::new();

/// Initialize tracing for test binaries. Safe to call multiple times.
pub fn init_tracing_for_tests() {
    INIT.call_once(|| {
        use tracing_subscriber::filter::EnvFilter;
        use tracing_subscriber::fmt;
        let env = std::env::var("RUST_LOG").ok();
        let filter = match env {
            Some(_) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            None => EnvFilter::new("info"),
        };
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_test_writer()
            .init();
    });
}

#[cfg(feature = "auto-init")]
mod auto {
    // Use ctor to run at binary init time to avoid having to call init in every test.
    use ctor::ctor;

    #[ctor]
    fn init() {
        super::init_tracing_for_tests();
    }
}

/// One call observed by a [`RecordingEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub name: String,
    pub arg_kinds: Vec<DatumKind>,
    pub options: OptionBag,
}

/// Engine wrapper that records every call before delegating to `inner`.
pub struct RecordingEngine<E> {
    inner: E,
    calls: Mutex<Vec<RecordedCall>>,
}

impl<E: ComputeEngine> RecordingEngine<E> {
    pub fn new(inner: E) -> Arc<Self> {
        Arc::new(Self {
            inner,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }
}

impl<E: ComputeEngine> ComputeEngine for RecordingEngine<E> {
    fn call(&self, name: &str, args: &[Datum], options: &OptionBag) -> Result<Datum, EngineError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                name: name.to_string(),
                arg_kinds: args.iter().map(Datum::kind).collect(),
                options: options.clone(),
            });
        }
        self.inner.call(name, args, options)
    }
}

pub fn int64_array(values: &[Option<i64>]) -> ArrayRef {
    Arc::new(Int64Array::from(values.to_vec()))
}

pub fn float64_array(values: &[Option<f64>]) -> ArrayRef {
    Arc::new(Float64Array::from(values.to_vec()))
}

pub fn utf8_array(values: &[&str]) -> ArrayRef {
    Arc::new(StringArray::from(values.to_vec()))
}

/// Datum wrapping an Int64 array of present values.
pub fn int64_datum(values: &[i64]) -> Datum {
    Datum::Array(Arc::new(Int64Array::from(values.to_vec())))
}

/// Int64 chunked array with one chunk per slice.
pub fn int64_chunked(chunks: &[&[Option<i64>]]) -> ChunkedArray {
    let chunks = chunks.iter().map(|chunk| int64_array(chunk)).collect();
    ChunkedArray::try_new_with_type(arrow::datatypes::DataType::Int64, chunks)
        .expect("int64 chunks share a type")
}

/// Collect an Int64 datum (array or chunked) into plain options.
pub fn int64_values(datum: &Datum) -> Vec<Option<i64>> {
    use arrow::array::AsArray;
    use arrow::datatypes::Int64Type;

    datum
        .array_chunks()
        .expect("array-like datum")
        .iter()
        .flat_map(|chunk| chunk.as_primitive::<Int64Type>().iter().collect::<Vec<_>>())
        .collect()
}
