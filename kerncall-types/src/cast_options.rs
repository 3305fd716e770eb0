use crate::OptionBag;

/// How a cast treats conversions that lose information.
///
/// In safe mode every lossy conversion is an error unless explicitly allowed.
/// Each permissive flag defaults to `!safe` and an explicit setting always wins
/// over that default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastOptions {
    safe: bool,
    allow_int_overflow: bool,
    allow_time_truncate: bool,
    allow_float_truncate: bool,
}

impl CastOptions {
    /// Options with every permissive flag derived from `safe`.
    pub fn new(safe: bool) -> Self {
        Self::builder().safe(safe).build()
    }

    pub fn builder() -> CastOptionsBuilder {
        CastOptionsBuilder::default()
    }

    pub fn safe(&self) -> bool {
        self.safe
    }

    pub fn allow_int_overflow(&self) -> bool {
        self.allow_int_overflow
    }

    pub fn allow_time_truncate(&self) -> bool {
        self.allow_time_truncate
    }

    pub fn allow_float_truncate(&self) -> bool {
        self.allow_float_truncate
    }

    /// The four flags as function options, keyed by field name.
    pub fn to_option_bag(&self) -> OptionBag {
        OptionBag::new()
            .with("safe", self.safe)
            .with("allow_int_overflow", self.allow_int_overflow)
            .with("allow_time_truncate", self.allow_time_truncate)
            .with("allow_float_truncate", self.allow_float_truncate)
    }
}

impl Default for CastOptions {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Builder for [`CastOptions`]; unset permissive flags resolve at [`build`](Self::build).
#[derive(Debug, Clone, Copy)]
pub struct CastOptionsBuilder {
    safe: bool,
    allow_int_overflow: Option<bool>,
    allow_time_truncate: Option<bool>,
    allow_float_truncate: Option<bool>,
}

impl Default for CastOptionsBuilder {
    fn default() -> Self {
        Self {
            safe: true,
            allow_int_overflow: None,
            allow_time_truncate: None,
            allow_float_truncate: None,
        }
    }
}

impl CastOptionsBuilder {
    pub fn safe(mut self, safe: bool) -> Self {
        self.safe = safe;
        self
    }

    pub fn allow_int_overflow(mut self, allow: bool) -> Self {
        self.allow_int_overflow = Some(allow);
        self
    }

    pub fn allow_time_truncate(mut self, allow: bool) -> Self {
        self.allow_time_truncate = Some(allow);
        self
    }

    pub fn allow_float_truncate(mut self, allow: bool) -> Self {
        self.allow_float_truncate = Some(allow);
        self
    }

    pub fn build(self) -> CastOptions {
        let permissive = !self.safe;
        CastOptions {
            safe: self.safe,
            allow_int_overflow: self.allow_int_overflow.unwrap_or(permissive),
            allow_time_truncate: self.allow_time_truncate.unwrap_or(permissive),
            allow_float_truncate: self.allow_float_truncate.unwrap_or(permissive),
        }
    }
}

/// Build [`CastOptions`] from optional settings; `None` takes the default.
///
/// `safe` defaults to `true`; each permissive flag defaults to `!safe`.
pub fn cast_options(
    safe: Option<bool>,
    allow_int_overflow: Option<bool>,
    allow_time_truncate: Option<bool>,
    allow_float_truncate: Option<bool>,
) -> CastOptions {
    CastOptionsBuilder {
        safe: safe.unwrap_or(true),
        allow_int_overflow,
        allow_time_truncate,
        allow_float_truncate,
    }
    .build()
}
