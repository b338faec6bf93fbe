//! Template function namespace.
//!
//! [`Namespace::bind`] pairs every environment accessor with a borrowed
//! [`Environment`] and adds the stateless utilities, producing one
//! Handlebars helper per function name. Helpers evaluate to JSON values, so
//! they work both as plain expressions (`{{asInt "WORKERS"}}`) and as
//! sub-expressions (`{{#each (asStringSlice "HOSTS" ",")}}`).
//!
//! Arguments are positional. A missing or wrongly-typed argument aborts the
//! render with a message naming the function and the argument position.
//!
//! Printed directly, a slice renders as `[a b c]` and a mapping as
//! `map[A:1 B:2]`.

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext, RenderError,
    ScopedJson,
};
use serde::Serialize;
use serde_json::Value as Json;
use std::error::Error as StdError;
use std::path::Path;

use crate::core::environment::Environment;
use crate::core::utils;

/// Functions reading the bound [`Environment`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    All,
    SortAll,
    AsString,
    AsStringOr,
    AsStringSlice,
    AsStringSliceTrim,
    AsBool,
    AsBoolOr,
    AsInt,
    AsIntOr,
    AsIntSlice,
    AsFloat,
    AsFloatOr,
    AsFloatSlice,
    AsPort,
    AsPortOr,
    AsUrl,
    AsHostPort,
}

impl Accessor {
    pub const ALL: [Accessor; 18] = [
        Accessor::All,
        Accessor::SortAll,
        Accessor::AsString,
        Accessor::AsStringOr,
        Accessor::AsStringSlice,
        Accessor::AsStringSliceTrim,
        Accessor::AsBool,
        Accessor::AsBoolOr,
        Accessor::AsInt,
        Accessor::AsIntOr,
        Accessor::AsIntSlice,
        Accessor::AsFloat,
        Accessor::AsFloatOr,
        Accessor::AsFloatSlice,
        Accessor::AsPort,
        Accessor::AsPortOr,
        Accessor::AsUrl,
        Accessor::AsHostPort,
    ];

    /// Name under which the accessor is callable from templates.
    pub fn name(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::SortAll => "sortAll",
            Self::AsString => "asString",
            Self::AsStringOr => "asStringOr",
            Self::AsStringSlice => "asStringSlice",
            Self::AsStringSliceTrim => "asStringSliceTrim",
            Self::AsBool => "asBool",
            Self::AsBoolOr => "asBoolOr",
            Self::AsInt => "asInt",
            Self::AsIntOr => "asIntOr",
            Self::AsIntSlice => "asIntSlice",
            Self::AsFloat => "asFloat",
            Self::AsFloatOr => "asFloatOr",
            Self::AsFloatSlice => "asFloatSlice",
            Self::AsPort => "asPort",
            Self::AsPortOr => "asPortOr",
            Self::AsUrl => "asURL",
            Self::AsHostPort => "asHostPort",
        }
    }

    fn evaluate(&self, env: &Environment, args: &Args<'_>) -> Result<Json, RenderError> {
        let value = match self {
            Self::All => {
                args.expect(0)?;
                return args.to_json(env.all());
            }
            Self::SortAll => {
                args.expect(0)?;
                return args.to_json(&env.sort_all());
            }
            Self::AsString => {
                args.expect(1)?;
                env.as_string(args.str(0)?).map(Json::from)
            }
            Self::AsStringOr => {
                args.expect(2)?;
                Ok(Json::from(env.as_string_or(args.str(0)?, args.str(1)?)))
            }
            Self::AsStringSlice => {
                args.expect(2)?;
                env.as_string_slice(args.str(0)?, args.str(1)?).map(Json::from)
            }
            Self::AsStringSliceTrim => {
                args.expect(3)?;
                env.as_string_slice_trim(args.str(0)?, args.str(1)?, args.str(2)?)
                    .map(Json::from)
            }
            Self::AsBool => {
                args.expect(1)?;
                env.as_bool(args.str(0)?).map(Json::from)
            }
            Self::AsBoolOr => {
                args.expect(2)?;
                Ok(Json::from(env.as_bool_or(args.str(0)?, args.bool(1)?)))
            }
            Self::AsInt => {
                args.expect(1)?;
                env.as_int(args.str(0)?).map(Json::from)
            }
            Self::AsIntOr => {
                args.expect(2)?;
                Ok(Json::from(env.as_int_or(args.str(0)?, args.int(1)?)))
            }
            Self::AsIntSlice => {
                args.expect(2)?;
                env.as_int_slice(args.str(0)?, args.str(1)?).map(Json::from)
            }
            Self::AsFloat => {
                args.expect(1)?;
                env.as_float(args.str(0)?).map(float_json)
            }
            Self::AsFloatOr => {
                args.expect(2)?;
                Ok(float_json(env.as_float_or(args.str(0)?, args.float(1)?)))
            }
            Self::AsFloatSlice => {
                args.expect(2)?;
                env.as_float_slice(args.str(0)?, args.str(1)?)
                    .map(|values| Json::Array(values.into_iter().map(float_json).collect()))
            }
            Self::AsPort => {
                args.expect(1)?;
                env.as_port(args.str(0)?).map(Json::from)
            }
            Self::AsPortOr => {
                args.expect(2)?;
                env.as_port_or(args.str(0)?, args.int(1)?).map(Json::from)
            }
            Self::AsUrl => {
                args.expect(1)?;
                env.as_url(args.str(0)?).map(Json::from)
            }
            Self::AsHostPort => {
                args.expect(1)?;
                env.as_host_port(args.str(0)?).map(Json::from)
            }
        };
        value.map_err(|err| args.fail(err))
    }
}

/// Stateless functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utility {
    Contains,
    ContainsAny,
    ContainsCaseInsensitive,
    HasPrefix,
    HasSuffix,
    ToLower,
    ToUpper,
    Trim,
    TrimLeft,
    TrimRight,
    TrimSpace,
    IsEmpty,
    IsNotEmpty,
    Base64Encode,
    Base64Decode,
    Hash,
    Sequence,
    FileExistOrDefault,
}

impl Utility {
    pub const ALL: [Utility; 18] = [
        Utility::Contains,
        Utility::ContainsAny,
        Utility::ContainsCaseInsensitive,
        Utility::HasPrefix,
        Utility::HasSuffix,
        Utility::ToLower,
        Utility::ToUpper,
        Utility::Trim,
        Utility::TrimLeft,
        Utility::TrimRight,
        Utility::TrimSpace,
        Utility::IsEmpty,
        Utility::IsNotEmpty,
        Utility::Base64Encode,
        Utility::Base64Decode,
        Utility::Hash,
        Utility::Sequence,
        Utility::FileExistOrDefault,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::ContainsAny => "containsAny",
            Self::ContainsCaseInsensitive => "containsCaseInsensitive",
            Self::HasPrefix => "hasPrefix",
            Self::HasSuffix => "hasSuffix",
            Self::ToLower => "toLower",
            Self::ToUpper => "toUpper",
            Self::Trim => "trim",
            Self::TrimLeft => "trimLeft",
            Self::TrimRight => "trimRight",
            Self::TrimSpace => "trimSpace",
            Self::IsEmpty => "isEmpty",
            Self::IsNotEmpty => "isNotEmpty",
            Self::Base64Encode => "base64Encode",
            Self::Base64Decode => "base64Decode",
            Self::Hash => "hash",
            Self::Sequence => "sequence",
            Self::FileExistOrDefault => "fileExistOrDefault",
        }
    }

    fn evaluate(&self, args: &Args<'_>) -> Result<Json, RenderError> {
        let value = match self {
            Self::Contains => args.str_pair(utils::contains)?,
            Self::ContainsAny => args.str_pair(utils::contains_any)?,
            Self::ContainsCaseInsensitive => args.str_pair(utils::contains_case_insensitive)?,
            Self::HasPrefix => args.str_pair(utils::has_prefix)?,
            Self::HasSuffix => args.str_pair(utils::has_suffix)?,
            Self::ToLower => args.str_single(utils::to_lower)?,
            Self::ToUpper => args.str_single(utils::to_upper)?,
            Self::Trim => args.str_pair(utils::trim)?,
            Self::TrimLeft => args.str_pair(utils::trim_left)?,
            Self::TrimRight => args.str_pair(utils::trim_right)?,
            Self::TrimSpace => args.str_single(utils::trim_space)?,
            Self::IsEmpty => args.str_single(utils::is_empty)?,
            Self::IsNotEmpty => args.str_single(utils::is_not_empty)?,
            Self::Base64Encode => args.str_single(utils::base64_encode)?,
            Self::Base64Decode => {
                args.expect(1)?;
                utils::base64_decode(args.str(0)?)
                    .map(Json::from)
                    .map_err(|err| args.fail(err))?
            }
            Self::Hash => {
                args.expect(2)?;
                utils::hash(args.str(0)?, args.str(1)?)
                    .map(Json::from)
                    .map_err(|err| args.fail(err))?
            }
            Self::Sequence => {
                args.expect(2)?;
                Json::from(utils::sequence(args.int(0)?, args.int(1)?))
            }
            Self::FileExistOrDefault => {
                args.expect(2)?;
                let destination = Path::new(args.str(0)?);
                let default_path = Path::new(args.str(1)?);
                utils::file_exist_or_default(destination, default_path)
                    .map(Json::from)
                    .map_err(|err| args.fail(err))?
            }
        };
        Ok(value)
    }
}

/// Positional arguments of one helper call
struct Args<'a> {
    name: &'static str,
    values: Vec<&'a Json>,
}

impl<'a> Args<'a> {
    fn collect(name: &'static str, helper: &'a Helper<'_, '_>) -> Self {
        Self {
            name,
            values: helper.params().iter().map(|param| param.value()).collect(),
        }
    }

    fn expect(&self, count: usize) -> Result<(), RenderError> {
        if self.values.len() == count {
            Ok(())
        } else {
            Err(RenderError::new(format!(
                "{}: wrong number of args: want {}, got {}",
                self.name,
                count,
                self.values.len()
            )))
        }
    }

    fn typed<T>(
        &self,
        index: usize,
        expected: &str,
        convert: impl FnOnce(&'a Json) -> Option<T>,
    ) -> Result<T, RenderError> {
        let value = self.values.get(index).copied().ok_or_else(|| {
            RenderError::new(format!("{}: missing argument {}", self.name, index + 1))
        })?;
        convert(value).ok_or_else(|| {
            RenderError::new(format!(
                "{}: argument {} must be {expected}, got {value}",
                self.name,
                index + 1
            ))
        })
    }

    fn str(&self, index: usize) -> Result<&'a str, RenderError> {
        self.typed(index, "a string", Json::as_str)
    }

    fn int(&self, index: usize) -> Result<i64, RenderError> {
        self.typed(index, "an integer", Json::as_i64)
    }

    fn float(&self, index: usize) -> Result<f64, RenderError> {
        self.typed(index, "a number", Json::as_f64)
    }

    fn bool(&self, index: usize) -> Result<bool, RenderError> {
        self.typed(index, "a boolean", Json::as_bool)
    }

    fn str_single<T: Into<Json>>(&self, f: impl FnOnce(&'a str) -> T) -> Result<Json, RenderError> {
        self.expect(1)?;
        Ok(f(self.str(0)?).into())
    }

    fn str_pair<T: Into<Json>>(
        &self,
        f: impl FnOnce(&'a str, &'a str) -> T,
    ) -> Result<Json, RenderError> {
        self.expect(2)?;
        Ok(f(self.str(0)?, self.str(1)?).into())
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<Json, RenderError> {
        serde_json::to_value(value).map_err(|err| self.fail(err))
    }

    /// Wraps a function failure, keeping it as the error's source.
    fn fail<E>(&self, err: E) -> RenderError
    where
        E: StdError + Send + Sync + 'static,
    {
        RenderError::from_error(&format!("{}: {err}", self.name), err)
    }
}

/// Whole numbers become integers so they print without a trailing `.0`.
/// Non-finite values have no JSON number form and become `+Inf`, `-Inf` or
/// `NaN` text.
fn float_json(value: f64) -> Json {
    // 2^53, past which not every integer is representable
    const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

    if value.is_nan() {
        Json::from("NaN")
    } else if value.is_infinite() {
        Json::from(if value > 0.0 { "+Inf" } else { "-Inf" })
    } else if value.fract() == 0.0 && value.abs() < EXACT_INTEGER_LIMIT {
        Json::from(value as i64)
    } else {
        Json::from(value)
    }
}

/// Output text of a helper called directly rather than as a sub-expression.
fn display(value: &Json) -> String {
    match value {
        Json::Null => String::new(),
        Json::String(text) => text.clone(),
        Json::Array(items) => {
            let items: Vec<String> = items.iter().map(display).collect();
            format!("[{}]", items.join(" "))
        }
        Json::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{key}:{}", display(value)))
                .collect();
            format!("map[{}]", entries.join(" "))
        }
        other => other.to_string(),
    }
}

/// An accessor bound to one environment
struct EnvHelper<'env> {
    env: &'env Environment,
    accessor: Accessor,
}

impl HelperDef for EnvHelper<'_> {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'reg, 'rc>, RenderError> {
        let args = Args::collect(self.accessor.name(), h);
        self.accessor
            .evaluate(self.env, &args)
            .map(ScopedJson::Derived)
    }

    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let args = Args::collect(self.accessor.name(), h);
        let value = self.accessor.evaluate(self.env, &args)?;
        out.write(&display(&value))?;
        Ok(())
    }
}

impl HelperDef for Utility {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'reg, 'rc>, RenderError> {
        let args = Args::collect(self.name(), h);
        self.evaluate(&args).map(ScopedJson::Derived)
    }

    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let args = Args::collect(self.name(), h);
        let value = self.evaluate(&args)?;
        out.write(&display(&value))?;
        Ok(())
    }
}

type BoxedHelper<'env> = Box<dyn HelperDef + Send + Sync + 'env>;

/// The complete set of template functions for one render.
pub struct Namespace<'env> {
    helpers: Vec<(&'static str, BoxedHelper<'env>)>,
}

impl<'env> Namespace<'env> {
    /// Binds every accessor to `env` and adds the stateless utilities.
    pub fn bind(env: &'env Environment) -> Self {
        let mut helpers: Vec<(&'static str, BoxedHelper<'env>)> =
            Vec::with_capacity(Accessor::ALL.len() + Utility::ALL.len());
        for accessor in Accessor::ALL {
            helpers.push((accessor.name(), Box::new(EnvHelper { env, accessor })));
        }
        for utility in Utility::ALL {
            helpers.push((utility.name(), Box::new(utility)));
        }
        Self { helpers }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.helpers.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }

    /// Registers every function as a helper of `registry`.
    pub fn install(self, registry: &mut Handlebars<'env>) {
        for (name, helper) in self.helpers {
            registry.register_helper(name, helper);
        }
    }
}
